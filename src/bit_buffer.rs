/// An appendable sequence of bits, packed big-endian into bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer able to hold `bits` bits without reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            length: 0,
        }
    }

    /// Returns the number of bits written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`len`](Self::len).
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.length, "Bit index out of range");
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    /// Appends the low `len` bits of `val`, most significant first.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0, "Value does not fit in bit length");
        for i in (0..len).rev() {
            self.append_bit((val >> i) & 1 != 0);
        }
    }

    pub fn append_bit(&mut self, bit: bool) {
        let shift = 7 - (self.length & 7);
        if shift == 7 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << shift;
        }
        self.length += 1;
    }

    /// Returns the packed bytes; a partial final byte is zero padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
