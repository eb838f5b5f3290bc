use super::{bitstream::BitStream, metadata::Version};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte = 0b0100,
}

impl Mode {
    pub const INDICATOR_BIT_LEN: usize = 4;

    pub fn indicator(self) -> u32 {
        self as u32
    }

    /// Width of the character count field.
    pub fn char_count_bits(self, version: Version) -> usize {
        match (self, *version) {
            (Self::Byte, 1..=9) => 8,
            (Self::Byte, _) => 16,
        }
    }
}

// Byte segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ByteSegment {
    mode: Mode,
    data: Vec<u8>,
}

impl ByteSegment {
    /// One byte per UTF-16 code unit of `text`, keeping only its low 8 bits.
    ///
    /// Text within U+0000..=U+00FF comes out as ISO-8859-1. Anything else is
    /// truncated, so callers holding non Latin-1 text should go through
    /// [`ByteSegment::from_bytes`] with an explicit encoding instead.
    pub fn from_text(text: &str) -> Self {
        let data = text.encode_utf16().map(|u| u as u8).collect();
        Self { mode: Mode::Byte, data }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { mode: Mode::Byte, data: bytes.to_vec() }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Character count written into the segment header.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write(&self, buffer: &mut BitStream) {
        for &b in &self.data {
            buffer.put(b, 8);
        }
    }

    /// Writes mode indicator, character count and payload.
    pub fn write_with_header(&self, buffer: &mut BitStream, version: Version) {
        let count_bits = self.mode.char_count_bits(version);
        debug_assert!(
            self.len() < 1 << count_bits,
            "Segment length {} overflows {count_bits} bit count field",
            self.len()
        );
        buffer.put(self.mode.indicator(), Mode::INDICATOR_BIT_LEN);
        buffer.put(self.len() as u32, count_bits);
        self.write(buffer);
    }

    pub fn bit_len(&self, version: Version) -> usize {
        Mode::INDICATOR_BIT_LEN + self.mode.char_count_bits(version) + self.len() * 8
    }
}
