use super::{mask::MaskPattern, metadata::ECLevel};

// BCH codes for format & version info
//------------------------------------------------------------------------------

// Generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const G15: u32 = 0b101_0011_0111;
// Generator x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const G18: u32 = 0b1_1111_0010_0101;
// Keeps format info from ever being all zeros
const G15_MASK: u32 = 0b101_0100_0001_0010;

pub const FORMAT_INFO_BIT_LEN: usize = 15;
pub const VERSION_INFO_BIT_LEN: usize = 18;

// Position of the highest set bit, 0 for 0
fn bch_digit(data: u32) -> u32 {
    u32::BITS - data.leading_zeros()
}

// Remainder of data · x^(deg g) divided by g, over GF(2)
fn bch_remainder(data: u32, gen: u32) -> u32 {
    let gen_digit = bch_digit(gen);
    let mut d = data << (gen_digit - 1);
    while bch_digit(d) >= gen_digit {
        d ^= gen << (bch_digit(d) - gen_digit);
    }
    d
}

/// 15 bit format info for a 5 bit (ec level, mask) payload, masked with 0x5412.
pub fn bch_type_info(data: u32) -> u32 {
    debug_assert!(data < 1 << 5, "Format payload exceeds 5 bits: {data}");
    ((data << 10) | bch_remainder(data, G15)) ^ G15_MASK
}

/// 18 bit version info for a 6 bit version number.
pub fn bch_type_number(data: u32) -> u32 {
    debug_assert!(data < 1 << 6, "Version payload exceeds 6 bits: {data}");
    (data << 12) | bch_remainder(data, G18)
}

pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    bch_type_info((ec_level.format_bits() << 3) | *mask as u32)
}

/// Recovers (ec level, mask) from 15 raw format bits by picking the nearest valid
/// codeword. Codewords sit at least 7 bits apart, so up to 3 flipped bits are corrected.
pub fn decode_format_info(bits: u32) -> Option<(ECLevel, MaskPattern)> {
    let (dist, data) = (0..32u32)
        .map(|data| ((bch_type_info(data) ^ bits).count_ones(), data))
        .min_by_key(|&(dist, _)| dist)?;
    if dist > 3 {
        return None;
    }
    let ec_level = ECLevel::from_format_bits(data >> 3);
    let mask = MaskPattern::new((data & 0b111) as u8).ok()?;
    Some((ec_level, mask))
}

#[cfg(test)]
mod bch_tests {
    use test_case::test_case;

    use super::{bch_type_info, bch_type_number, decode_format_info, format_info};
    use crate::common::{mask::MaskPattern, metadata::ECLevel};

    #[test_case(ECLevel::M, 5, 0b100000011001110)]
    #[test_case(ECLevel::L, 4, 0b110011000101111)]
    #[test_case(ECLevel::Q, 2, 0b011111100110001)]
    #[test_case(ECLevel::H, 7, 0b000100000111011)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        assert_eq!(format_info(ecl, MaskPattern::new(mask).unwrap()), exp);
    }

    #[test]
    fn test_type_info_zero_payload() {
        assert_eq!(bch_type_info(0), 0x5412);
    }

    #[test_case(7, 0x07C94)]
    #[test_case(8, 0x085BC)]
    #[test_case(21, 0x15683)]
    #[test_case(40, 0x28C69)]
    fn test_version_info(ver: u32, exp: u32) {
        assert_eq!(bch_type_number(ver), exp);
    }

    #[test]
    fn test_decode_format_info_clean() {
        for ecl in ECLevel::ALL {
            for m in 0..8 {
                let mask = MaskPattern::new(m).unwrap();
                assert_eq!(decode_format_info(format_info(ecl, mask)), Some((ecl, mask)));
            }
        }
    }

    #[test]
    fn test_decode_format_info_with_errors() {
        let mask = MaskPattern::new(6).unwrap();
        let bits = format_info(ECLevel::Q, mask);
        assert_eq!(decode_format_info(bits ^ 0b100_0000_0010_0001), Some((ECLevel::Q, mask)));
        assert_eq!(decode_format_info(bits ^ 0b1), Some((ECLevel::Q, mask)));
    }
}
