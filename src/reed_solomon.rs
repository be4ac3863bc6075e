use crate::error::{QrError, Result};
use crate::polynomial;

/// Computes Reed-Solomon error correction codewords for a block of data.
///
/// The generator polynomial is built when a degree is set and rebuilt only
/// when the degree changes, so one encoder can serve every block of a symbol.
#[derive(Clone, Debug, Default)]
pub struct ReedSolomonEncoder {
    degree: usize,
    generator: Option<Vec<u8>>,
}

impl ReedSolomonEncoder {
    /// Creates an encoder with no degree set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder producing `degree` codewords per block.
    pub fn with_degree(degree: usize) -> Self {
        let mut rs = Self::new();
        rs.initialize(degree);
        rs
    }

    /// Sets the number of error correction codewords to produce.
    pub fn initialize(&mut self, degree: usize) {
        if self.generator.is_some() && self.degree == degree {
            return;
        }
        self.degree = degree;
        self.generator = Some(polynomial::generator(degree));
    }

    /// Returns exactly `degree` error correction codewords for `data`.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::EncoderNotInitialized`] if no degree was set.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let generator = self.generator.as_ref().ok_or(QrError::EncoderNotInitialized)?;
        let mut padded = Vec::with_capacity(data.len() + self.degree);
        padded.extend_from_slice(data);
        padded.resize(data.len() + self.degree, 0);
        let remainder = polynomial::rem(&padded, generator);

        let mut result = vec![0u8; self.degree - remainder.len()];
        result.extend_from_slice(&remainder);
        Ok(result)
    }
}
