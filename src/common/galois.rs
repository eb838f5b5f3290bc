use crate::error::{QRError, QRResult};

// GF(256) log & antilog tables
//------------------------------------------------------------------------------

// Antilog table: EXP_TABLE[i] = α^i over GF(2^8) with the QR primitive
// polynomial x^8 + x^4 + x^3 + x^2 + 1. Entry 255 wraps back to 1.
pub static EXP_TABLE: [u8; 256] = build_exp_table();

// Inverse of EXP_TABLE over [0, 255). LOG_TABLE[0] is undefined and left 0.
pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        table[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        table[i] = table[i - 4] ^ table[i - 5] ^ table[i - 6] ^ table[i - 8];
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// α^n, with n taken modulo 255. Negative exponents are allowed.
pub fn gexp(n: i32) -> u8 {
    EXP_TABLE[n.rem_euclid(255) as usize]
}

/// Discrete log of a non-zero field element.
pub fn glog(n: u8) -> QRResult<u8> {
    if n < 1 {
        return Err(QRError::LogOfZero(n));
    }
    Ok(LOG_TABLE[n as usize])
}
