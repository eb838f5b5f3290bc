use std::ops::Deref;

use tracing::{debug, trace};

use super::ec::create_data;
use crate::common::{
    bch::{decode_format_info, format_info, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
    block::total_data_count,
    codec::ByteSegment,
    iter::EncRegionIter,
    mask::{penalty, MaskPattern},
    metadata::{Color, ECLevel, Version},
};
use crate::error::{QRError, QRResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Byte mode QR code encoder.
///
/// Segments are queued with [`QRCode::add_data`] and the symbol is built by
/// [`QRCode::make`]. The result is read back module by module through
/// [`QRCode::is_dark`]; rasterizing it is left to the caller.
///
/// ```
/// use qrmatrix::{ECLevel, QRCode};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut qr = QRCode::new(0, ECLevel::M)?;
/// qr.add_data("https://example.com");
/// qr.make()?;
///
/// let w = qr.module_count() as i32;
/// for r in 0..w {
///     let line: String = (0..w).map(|c| if qr.is_dark(r, c).unwrap() { '#' } else { ' ' }).collect();
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QRCode {
    // None selects the smallest fitting version on every make
    requested: Option<Version>,
    ver: Option<Version>,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
    grid: Vec<Module>,
    w: usize,
    data_list: Vec<ByteSegment>,
    // Final codewords, valid for `ver` until data is added
    data_cache: Option<Vec<u8>>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QRCode {
    /// `type_number` 0 picks the version automatically, 1 to 40 pins it.
    pub fn new(type_number: usize, ec_level: ECLevel) -> QRResult<Self> {
        let requested = match type_number {
            0 => None,
            v => Some(Version::new(v)?),
        };
        Ok(Self {
            requested,
            ver: requested,
            ecl: ec_level,
            mask: None,
            grid: Vec::new(),
            w: 0,
            data_list: Vec::new(),
            data_cache: None,
        })
    }

    /// Queues `text` as a byte mode segment, one byte per UTF-16 code unit.
    /// See [`ByteSegment::from_text`].
    pub fn add_data(&mut self, text: &str) {
        self.push_segment(ByteSegment::from_text(text));
    }

    /// Queues raw bytes as a byte mode segment.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.push_segment(ByteSegment::from_bytes(bytes));
    }

    fn push_segment(&mut self, segment: ByteSegment) {
        self.data_list.push(segment);
        self.data_cache = None;
    }

    pub fn segments(&self) -> &[ByteSegment] {
        &self.data_list
    }

    /// Version in use. Unset in auto mode until the first [`QRCode::make`].
    pub fn version(&self) -> Option<Version> {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask_pattern(&self) -> Option<MaskPattern> {
        self.mask
    }

    /// Matrix width & height, 0 before the first make.
    pub fn module_count(&self) -> usize {
        self.w
    }

    pub fn is_dark(&self, row: i32, col: i32) -> QRResult<bool> {
        let w = self.w as i32;
        if row < 0 || w <= row || col < 0 || w <= col {
            return Err(QRError::OutOfBounds { row, col });
        }
        Ok(matches!(*self.get(row as i16, col as i16), Color::Dark))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub(crate) fn color(&self, r: i16, c: i16) -> Color {
        *self.get(r, c)
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative indices count back from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row {r} out of range for width {w}");
        debug_assert!(-w <= c && c < w, "column {c} out of range for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        r as usize * self.w + c as usize
    }

    pub(crate) fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    fn reset_grid(&mut self, ver: Version) {
        self.w = ver.width();
        self.grid.clear();
        self.grid.resize(self.w * self.w, Module::Empty);
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Centered at (r, c), with a light separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_alignment_patterns(&mut self, ver: Version) {
        let poses = ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                // Centers inside a finder pattern are skipped
                if self.get(r, c) != Module::Empty {
                    continue;
                }
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QRCode {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let m = if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
            if self.get(i, 6) == Module::Empty {
                self.set(i, 6, m);
            }
            if self.get(6, i) == Module::Empty {
                self.set(6, i, m);
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QRCode {
    // Coordinates of format bit i, least significant first, in the strip along
    // column 8 and in the strip along row 8
    fn format_info_coords(&self, i: usize) -> ((i16, i16), (i16, i16)) {
        let w = self.w as i16;
        let i = i as i16;
        let vert = match i {
            0..=5 => (i, 8),
            6..=7 => (i + 1, 8),
            _ => (w - 15 + i, 8),
        };
        let hor = match i {
            0..=7 => (8, w - i - 1),
            8 => (8, 15 - i),
            _ => (8, 14 - i),
        };
        (vert, hor)
    }

    // In test mode every format module is light, so mask scoring only sees data
    fn draw_format_info(&mut self, test: bool, mask: MaskPattern) {
        let bits = if test { 0 } else { format_info(self.ecl, mask) };
        self.draw_format_bits(bits, Color::from(!test));
    }

    fn draw_format_bits(&mut self, bits: u32, dark_module: Color) {
        for i in 0..FORMAT_INFO_BIT_LEN {
            let module = Module::Format(Color::from((bits >> i) & 1 == 1));
            let ((vr, vc), (hr, hc)) = self.format_info_coords(i);
            self.set(vr, vc, module);
            self.set(hr, hc, module);
        }
        self.set(-8, 8, Module::Format(dark_module));
    }

    fn draw_version_info(&mut self, test: bool, ver: Version) {
        let bits = if test { 0 } else { ver.info() };
        let w = self.w as i16;
        for i in 0..VERSION_INFO_BIT_LEN as i16 {
            let module = Module::Version(Color::from((bits >> i) & 1 == 1));
            let (a, b) = (i / 3, i % 3 + w - 11);
            self.set(a, b, module);
            self.set(b, a, module);
        }
    }

    /// Reads back the placed format info and error corrects it. The strip along
    /// column 8 is tried first, then the strip along row 8.
    pub fn read_format_info(&self) -> QRResult<(ECLevel, MaskPattern)> {
        if self.w == 0 {
            return Err(QRError::InvalidFormatInfo);
        }
        let mut vert_bits = 0;
        let mut hor_bits = 0;
        for i in 0..FORMAT_INFO_BIT_LEN {
            let ((vr, vc), (hr, hc)) = self.format_info_coords(i);
            vert_bits |= ((self.color(vr, vc) == Color::Dark) as u32) << i;
            hor_bits |= ((self.color(hr, hc) == Color::Dark) as u32) << i;
        }
        decode_format_info(vert_bits)
            .or_else(|| decode_format_info(hor_bits))
            .ok_or(QRError::InvalidFormatInfo)
    }
}

#[cfg(test)]
mod qr_information_tests {
    use super::{Module, QRCode};
    use crate::common::{
        mask::MaskPattern,
        metadata::{Color, ECLevel, Version},
    };
    use crate::error::QRError;

    fn blank(ver: usize) -> QRCode {
        let mut qr = QRCode::new(ver, ECLevel::L).unwrap();
        qr.reset_grid(Version::new(ver).unwrap());
        qr
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = blank(7);
        qr.draw_version_info(false, Version::new(7).unwrap());
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ..................................VVv........\n\
             ..................................VvV........\n\
             ..................................VvV........\n\
             ..................................Vvv........\n\
             ..................................vvv........\n\
             ..................................VVV........\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             VVVVvV.......................................\n\
             VvvvvV.......................................\n\
             vVVvvV.......................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n"
        );
    }

    #[test]
    fn test_version_info_test_mode_is_light() {
        let mut qr = blank(7);
        qr.draw_version_info(true, Version::new(7).unwrap());
        let dark = qr.grid.iter().filter(|m| **m == Module::Version(Color::Dark)).count();
        let light = qr.grid.iter().filter(|m| **m == Module::Version(Color::Light)).count();
        assert_eq!((dark, light), (0, 36));
    }

    #[test]
    fn test_format_info_area() {
        let mut qr = blank(1);
        qr.draw_format_bits((1 << 15) - 1, Color::Dark);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             .....................\n\
             ........m............\n\
             mmmmmm.mm....mmmmmmmm\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n"
        );
    }

    #[test]
    fn test_format_info_bit_order() {
        // 1-L with mask 4 is 110011000101111, least significant bit at (8, w - 1)
        let mut qr = blank(1);
        qr.draw_format_info(false, MaskPattern::new(4).unwrap());
        let row = (0..21)
            .map(|c| match qr.get(8, c) {
                Module::Empty => '.',
                m => m.select('0', '1'),
            })
            .collect::<String>();
        assert_eq!(row, "110011.00....00101111");
        assert_eq!(qr.get(-8, 8), Module::Format(Color::Dark));
    }

    #[test]
    fn test_read_format_info_blank() {
        let qr = QRCode::new(0, ECLevel::L).unwrap();
        assert_eq!(qr.read_format_info(), Err(QRError::InvalidFormatInfo));
    }

    #[test]
    fn test_all_function_patterns_and_qr_info() {
        let ver = Version::new(7).unwrap();
        let mut qr = blank(7);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns(ver);
        qr.draw_timing_pattern();
        qr.draw_version_info(false, ver);
        qr.draw_format_bits((1 << 15) - 1, Color::Dark);
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFm.........................VVvFfffffff\n\
             fFFFFFfFm.........................VvVFfFFFFFf\n\
             fFfffFfFm.........................VvVFfFfffFf\n\
             fFfffFfFm.........................VvvFfFfffFf\n\
             fFfffFfFm...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFm...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mmmmmmfmm...........fffff............mmmmmmmm\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFm...........fffff...........fffff....\n\
             fFfffFfFm....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFm....................................\n\
             fffffffFm....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QRCode {
    // Places codeword bits, most significant first, into every module still
    // empty in zig-zag order. Modules past the last codeword stay light before
    // masking.
    fn map_data(&mut self, ver: Version, data: &[u8], mask: MaskPattern) {
        let mask_fn = mask.mask_function();
        let mut byte_index = 0;
        let mut bit_index = 7;
        for (r, c) in EncRegionIter::new(ver) {
            if self.get(r, c) != Module::Empty {
                continue;
            }

            let mut dark = byte_index < data.len() && (data[byte_index] >> bit_index) & 1 == 1;
            if mask_fn(r, c) {
                dark = !dark;
            }
            self.set(r, c, Module::Data(Color::from(dark)));

            if bit_index == 0 {
                byte_index += 1;
                bit_index = 7;
            } else {
                bit_index -= 1;
            }
        }
    }
}

// Make
//------------------------------------------------------------------------------

impl QRCode {
    /// Builds the matrix, choosing the version (in auto mode) and the mask with
    /// the lowest penalty.
    pub fn make(&mut self) -> QRResult<()> {
        let ver = self.resolve_version()?;
        let mask = self.best_mask_pattern(ver)?;
        self.make_impl(ver, false, mask)?;
        self.report();
        Ok(())
    }

    /// Builds the matrix with a fixed mask instead of searching for the best one.
    pub fn make_with_mask(&mut self, mask: MaskPattern) -> QRResult<()> {
        let ver = self.resolve_version()?;
        self.make_impl(ver, false, mask)?;
        self.report();
        Ok(())
    }

    fn resolve_version(&mut self) -> QRResult<Version> {
        let ver = match self.requested {
            Some(v) => v,
            None => self.find_min_version()?,
        };
        if self.ver != Some(ver) {
            self.data_cache = None;
        }
        self.ver = Some(ver);
        Ok(ver)
    }

    // Smallest version whose data capacity holds every segment with its header
    fn find_min_version(&self) -> QRResult<Version> {
        let mut bits = 0;
        for ver in Version::all() {
            bits = self.data_list.iter().map(|s| s.bit_len(ver)).sum::<usize>();
            let capacity = total_data_count(ver, self.ecl) << 3;
            if bits <= capacity {
                debug!(version = *ver, bits, capacity, "Selected version");
                return Ok(ver);
            }
        }
        let capacity = total_data_count(Version::MAX, self.ecl) << 3;
        Err(QRError::DataTooLong { bits, capacity })
    }

    fn best_mask_pattern(&mut self, ver: Version) -> QRResult<MaskPattern> {
        let mut min_penalty = u32::MAX;
        let mut best = None;
        for mask in MaskPattern::all() {
            self.make_impl(ver, true, mask)?;
            let pen = penalty(self);
            trace!(mask = *mask, penalty = pen, "Evaluated mask");
            // Strictly lower, so ties keep the smaller mask id
            if pen < min_penalty {
                min_penalty = pen;
                best = Some(mask);
            }
        }
        let best = best.ok_or(QRError::InvalidMaskingPattern(0))?;
        debug!(mask = *best, penalty = min_penalty, "Selected mask");
        Ok(best)
    }

    fn make_impl(&mut self, ver: Version, test: bool, mask: MaskPattern) -> QRResult<()> {
        self.reset_grid(ver);
        self.draw_finder_patterns();
        self.draw_alignment_patterns(ver);
        self.draw_timing_pattern();
        self.draw_format_info(test, mask);
        if *ver >= 7 {
            self.draw_version_info(test, ver);
        }

        let data = match self.data_cache.take() {
            Some(d) => d,
            None => create_data(ver, self.ecl, &self.data_list)?,
        };
        self.map_data(ver, &data, mask);
        self.data_cache = Some(data);
        self.mask = Some(mask);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after make");
        Ok(())
    }

    fn report(&self) {
        let total = self.w * self.w;
        let dark = self.count_dark_modules();
        debug!(
            version = self.ver.map(|v| *v),
            ec_level = ?self.ecl,
            mask = self.mask.map(|m| *m),
            dark,
            light = total - dark,
            balance = dark * 100 / total,
            "QR generated"
        );
    }
}
