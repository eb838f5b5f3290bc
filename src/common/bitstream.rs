use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

// Append-only bit writer backed by a growable byte buffer, most significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Bit index {index} out of bounds for length {}", self.len);
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    /// Appends the low `size` bits of `bits`, most significant first. Higher bits are dropped.
    pub fn put<T: PrimInt>(&mut self, bits: T, size: usize) {
        for i in (0..size).rev() {
            let bit = (bits.unsigned_shr(i as u32) & T::one()) == T::one();
            self.put_bit(bit);
        }
    }

    pub fn put_bit(&mut self, bit: bool) {
        let pos = self.len >> 3;
        if pos >= self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[pos] |= 0b1000_0000 >> (self.len & 7);
        }
        self.len += 1;
    }
}
