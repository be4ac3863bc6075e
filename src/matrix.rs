/// A square grid of modules with a parallel grid of reserved flags.
///
/// Cells are addressed as `(row, col)`, both starting at the top-left corner.
/// Reserved cells belong to function patterns; masking and data placement
/// leave them alone.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitMatrix {
    size: usize,
    modules: Vec<bool>,
    reserved: Vec<bool>,
}

impl BitMatrix {
    /// Creates an all-light matrix with no reserved cells.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "BitMatrix size must be a positive number");
        Self {
            size,
            modules: vec![false; size * size],
            reserved: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the module at `(row, col)` is dark.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[self.index(row, col)]
    }

    /// Sets a module and its reserved flag.
    pub fn set(&mut self, row: usize, col: usize, value: bool, reserved: bool) {
        let i = self.index(row, col);
        self.modules[i] = value;
        self.reserved[i] = reserved;
    }

    /// Flips the module at `(row, col)` when `bit` is set.
    pub fn xor(&mut self, row: usize, col: usize, bit: bool) {
        let i = self.index(row, col);
        self.modules[i] ^= bit;
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[self.index(row, col)]
    }

    /// Returns the number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Iterates over one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = bool> + '_ {
        let start = self.index(row, 0);
        self.modules[start..start + self.size].iter().copied()
    }

    /// Iterates over one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = bool> + '_ {
        assert!(col < self.size, "Column out of range");
        self.modules[col..].iter().step_by(self.size).copied()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size && col < self.size, "Module coordinates out of range");
        row * self.size + col
    }

    /// Builds an unreserved matrix from row-major 0/1 values.
    #[cfg(test)]
    pub(crate) fn from_bits(size: usize, bits: &[u8]) -> Self {
        assert_eq!(bits.len(), size * size);
        let mut matrix = Self::new(size);
        for (cell, &bit) in matrix.modules.iter_mut().zip(bits) {
            *cell = bit == 1;
        }
        matrix
    }

    #[cfg(test)]
    pub(crate) fn to_bits(&self) -> Vec<u8> {
        self.modules.iter().map(|&m| u8::from(m)).collect()
    }
}
