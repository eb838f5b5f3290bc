use super::galois::{gexp, glog};
use crate::error::QRResult;

// Polynomial over GF(256)
//------------------------------------------------------------------------------

// Coefficients are stored highest degree first. Leading zeros are stripped on
// construction, so a non-empty polynomial always has a non-zero head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    num: Vec<u8>,
}

impl Polynomial {
    /// Builds a polynomial from `num` and multiplies it by x^shift. All zero
    /// input gives the empty (zero) polynomial.
    pub fn new(num: &[u8], shift: usize) -> Self {
        let offset = num.iter().take_while(|&&c| c == 0).count();
        if offset == num.len() {
            return Self { num: Vec::new() };
        }
        let mut coeffs = Vec::with_capacity(num.len() - offset + shift);
        coeffs.extend_from_slice(&num[offset..]);
        coeffs.resize(num.len() - offset + shift, 0);
        Self { num: coeffs }
    }

    pub fn get(&self, index: usize) -> u8 {
        self.num[index]
    }

    pub fn len(&self) -> usize {
        self.num.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num.is_empty()
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.num
    }

    pub fn multiply(&self, other: &Polynomial) -> QRResult<Polynomial> {
        if self.is_empty() || other.is_empty() {
            return Ok(Polynomial::new(&[], 0));
        }

        let mut num = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.num.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let log_a = glog(a)? as i32;
            for (j, &b) in other.num.iter().enumerate() {
                if b == 0 {
                    continue;
                }
                num[i + j] ^= gexp(log_a + glog(b)? as i32);
            }
        }
        Ok(Polynomial::new(&num, 0))
    }

    // Remainder of polynomial long division. Each step cancels the head term,
    // so the length strictly decreases until it drops below the divisor's.
    pub fn rem(&self, divisor: &Polynomial) -> QRResult<Polynomial> {
        let mut res = self.clone();
        while !divisor.is_empty() && res.len() >= divisor.len() {
            let ratio = glog(res.get(0))? as i32 - glog(divisor.get(0))? as i32;

            let mut num = res.num;
            for (u, &d) in num.iter_mut().zip(divisor.num.iter()) {
                if d != 0 {
                    *u ^= gexp(glog(d)? as i32 + ratio);
                }
            }
            res = Polynomial::new(&num, 0);
        }
        Ok(res)
    }
}

/// Reed-Solomon generator polynomial (x - α^0)(x - α^1)...(x - α^(ec_count-1)).
pub fn error_correct_polynomial(ec_count: usize) -> QRResult<Polynomial> {
    let mut poly = Polynomial::new(&[1], 0);
    for i in 0..ec_count {
        poly = poly.multiply(&Polynomial::new(&[1, gexp(i as i32)], 0))?;
    }
    Ok(poly)
}

#[cfg(test)]
mod poly_tests {
    use super::{error_correct_polynomial, Polynomial};
    use crate::common::galois::LOG_TABLE;

    #[test]
    fn test_strip_and_shift() {
        let poly = Polynomial::new(&[0, 0, 3, 0, 5], 2);
        assert_eq!(poly.coefficients(), &[3, 0, 5, 0, 0]);
        assert_eq!(poly.len(), 5);

        let zero = Polynomial::new(&[0, 0], 0);
        assert!(zero.is_empty());
        assert!(Polynomial::new(&[0, 0, 0], 4).is_empty());
    }

    #[test]
    fn test_multiply() {
        // (x + 1)(x + 2) = x^2 + 3x + 2
        let a = Polynomial::new(&[1, 1], 0);
        let b = Polynomial::new(&[1, 2], 0);
        assert_eq!(a.multiply(&b).unwrap().coefficients(), &[1, 3, 2]);
    }

    #[test]
    fn test_generator_polynomial_7() {
        // Exponents of α for the degree 7 generator, as tabulated in ISO/IEC 18004 Annex A
        let exp = [0, 87, 229, 146, 149, 238, 102, 21];
        let poly = error_correct_polynomial(7).unwrap();
        let logs = poly.coefficients().iter().map(|&c| LOG_TABLE[c as usize]).collect::<Vec<_>>();
        assert_eq!(logs, exp);
    }

    #[test]
    fn test_rem_shorter_than_divisor() {
        let a = Polynomial::new(&[5, 6], 0);
        let b = Polynomial::new(&[1, 2, 3], 0);
        assert_eq!(a.rem(&b).unwrap(), a);
    }

    #[test]
    fn test_rem_ecc() {
        let data = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let gen = error_correct_polynomial(10).unwrap();
        let rem = Polynomial::new(data, gen.len() - 1).rem(&gen).unwrap();
        assert_eq!(rem.coefficients(), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_rem_exact_divisor() {
        let gen = error_correct_polynomial(4).unwrap();
        let multiple = gen.multiply(&Polynomial::new(&[7, 1], 0)).unwrap();
        assert!(multiple.rem(&gen).unwrap().is_empty());
    }
}
