use std::ops::{Deref, Not};

use super::bch::bch_type_number;
use crate::error::{QRError, QRResult};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    /// Iterates every version from 1 to 40 in ascending order.
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Row & column coordinates of alignment pattern centers.
    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    /// 18 bit version info: 6 bit version followed by 12 BCH bits.
    pub fn info(self) -> u32 {
        bch_type_number(self.0 as u32)
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Error correction level
//------------------------------------------------------------------------------

// Ordered from lowest to highest redundancy
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two bit indicator carried in the format info.
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::{Color, ECLevel, Version};
    use crate::error::QRError;

    #[test]
    fn test_version_bounds() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion(0)));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion(41)));
        assert_eq!(*Version::new(40).unwrap(), 40);
        assert_eq!(Version::all().count(), 40);
    }

    #[test_case(1, 21)]
    #[test_case(7, 45)]
    #[test_case(40, 177)]
    fn test_width(ver: usize, exp: usize) {
        assert_eq!(Version::new(ver).unwrap().width(), exp);
    }

    #[test]
    fn test_alignment_pattern() {
        assert!(Version::new(1).unwrap().alignment_pattern().is_empty());
        assert_eq!(Version::new(2).unwrap().alignment_pattern(), &[6, 18]);
        assert_eq!(Version::new(40).unwrap().alignment_pattern(), &[6, 30, 58, 86, 114, 142, 170]);
        for v in Version::all().skip(1) {
            let poses = v.alignment_pattern();
            assert_eq!(*poses.last().unwrap() as usize, v.width() - 7, "Version {}", *v);
        }
    }

    #[test]
    fn test_format_bits_round_trip() {
        for ecl in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(ecl.format_bits()), ecl);
        }
    }

    #[test]
    fn test_color_ops() {
        assert_eq!(!Color::Dark, Color::Light);
        assert_eq!(Color::from(true), Color::Dark);
        assert_eq!(Color::Light.select('.', '#'), '.');
    }
}

// Global constants
//------------------------------------------------------------------------------

#[rustfmt::skip]
static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
