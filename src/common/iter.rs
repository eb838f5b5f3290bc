use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks every module in the zig-zag order codewords are placed in: column pairs
// from the right edge leftwards, alternating upward & downward sweeps, right
// column before left within a row. The vertical timing column is skipped. The
// caller filters out modules already taken by function patterns.
#[derive(Clone)]
pub struct EncRegionIter {
    r: i16,
    c: i16,
    w: i16,
    // Row step, -1 while sweeping upward
    inc: i16,
    // 0 for right column of the pair, 1 for left
    sub: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, w, inc: -1, sub: 0 }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c <= 0 {
            return None;
        }
        let res = (self.r, self.c - self.sub);

        if self.sub == 0 {
            self.sub = 1;
            return Some(res);
        }

        self.sub = 0;
        let next_r = self.r + self.inc;
        if (0..self.w).contains(&next_r) {
            self.r = next_r;
        } else {
            self.inc = -self.inc;
            self.c -= 2;
            if self.c == 6 {
                self.c -= 1;
            }
        }
        Some(res)
    }
}
