use std::ops::Deref;

use super::metadata::Color;
use crate::builder::QRCode;
use crate::error::{QRError, QRResult};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p % 3) + ((r + c) as i32 & 1)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }

    /// Whether the data module at `(r, c)` is inverted under this mask.
    pub fn is_masked(self, r: i16, c: i16) -> bool {
        self.mask_function()(r, c)
    }
}


// Penalty (lost point) scoring
//------------------------------------------------------------------------------

/// Total penalty of a fully populated matrix. Lower is better.
pub fn penalty(qr: &QRCode) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Scores each module by how many of its up to 8 neighbours share its color.
// More than 5 alike adds 3 plus the excess.
fn compute_adjacent_penalty(qr: &QRCode) -> u32 {
    let mut pen = 0;
    let w = qr.module_count() as i16;
    for r in 0..w {
        for c in 0..w {
            let clr = qr.color(r, c);
            let mut same = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    let (nr, nc) = (r + dr, c + dc);
                    if (dr == 0 && dc == 0) || nr < 0 || nr >= w || nc < 0 || nc >= w {
                        continue;
                    }
                    if qr.color(nr, nc) == clr {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                pen += 3 + same - 5;
            }
        }
    }
    pen
}

fn compute_block_penalty(qr: &QRCode) -> u32 {
    let mut pen = 0;
    let w = qr.module_count() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = qr.color(r, c);
            if clr == qr.color(r + 1, c)
                && clr == qr.color(r, c + 1)
                && clr == qr.color(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QRCode, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.module_count() as i16;
    for i in 0..w {
        let get = |j: i16| if is_hor { qr.color(i, j) } else { qr.color(j, i) };
        for j in 0..w - 6 {
            if (j..j + 7).map(get).eq(PATTERN.iter().copied()) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every full 5% the dark ratio strays from 50%
fn compute_balance_penalty(qr: &QRCode) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.module_count();
    let percent = (dark_cnt * 100 / (w * w)) as i64;
    ((percent - 50).unsigned_abs() / 5 * 10) as u32
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, penalty,
    };
    use crate::builder::QRCode;
    use crate::common::metadata::ECLevel;

    fn sample() -> QRCode {
        let mut qr = QRCode::new(1, ECLevel::M).unwrap();
        qr.add_data("HELLO WORLD");
        qr.make().unwrap();
        qr
    }

    #[test]
    fn test_penalty_is_sum_of_parts() {
        let qr = sample();
        let parts = compute_adjacent_penalty(&qr)
            + compute_block_penalty(&qr)
            + compute_finder_pattern_penalty(&qr, true)
            + compute_finder_pattern_penalty(&qr, false)
            + compute_balance_penalty(&qr);
        assert_eq!(penalty(&qr), parts);
    }

    #[test]
    fn test_finder_patterns_are_penalized() {
        // Each of the 3 finders holds a 1:1:3:1:1 run in 3 rows and 3 columns
        let qr = sample();
        assert!(compute_finder_pattern_penalty(&qr, true) >= 3 * 2 * 40);
        assert!(compute_finder_pattern_penalty(&qr, false) >= 3 * 2 * 40);
    }

    #[test]
    fn test_balance_penalty_range() {
        let qr = sample();
        let pen = compute_balance_penalty(&qr);
        assert!(pen <= 100);
        assert_eq!(pen % 10, 0);
    }
}
