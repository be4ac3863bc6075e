//! Data segments and the four QR encoding modes.

use crate::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};
use crate::kanji::{self, ToSjis};
use crate::qrcode::Version;
use crate::tables;
use core::fmt;
use core::str::FromStr;

/// A segment of data in a QR code, already encoded into its payload bits.
///
/// Segments are immutable and created using factory functions like
/// [`make_numeric`](Self::make_numeric), [`make_alphanumeric`](Self::make_alphanumeric),
/// [`make_bytes`](Self::make_bytes) or [`make_kanji`](Self::make_kanji).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrSegment {
    mode: QrSegmentMode,
    numchars: usize,
    data: Vec<u8>,
    bitlength: usize,
}

impl QrSegment {
    /// Creates a segment for binary data in byte mode.
    pub fn make_bytes(data: &[u8]) -> Self {
        QrSegment::new(QrSegmentMode::Byte, data.len(), data.to_vec(), data.len() * 8)
    }

    /// Creates a segment for a string of decimal digits in numeric mode.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::ModeMismatch`] if `text` contains non-digit characters.
    pub fn make_numeric(text: &str) -> Result<Self> {
        if !QrSegment::is_numeric(text) {
            return Err(mismatch(text, QrSegmentMode::Numeric, None));
        }
        let mut bb = BitBuffer::with_capacity(QrSegmentMode::Numeric.bit_length(text.len()));
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            accumdata = accumdata * 10 + u32::from(b - b'0');
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, accumcount * 3 + 1);
        }
        Ok(QrSegment::from_buffer(QrSegmentMode::Numeric, text.len(), bb))
    }

    /// Creates a segment for alphanumeric text.
    ///
    /// Allowed characters: 0–9, A–Z (uppercase), space, `$`, `%`, `*`, `+`, `-`, `.`, `/`, `:`.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::ModeMismatch`] if `text` contains other characters.
    pub fn make_alphanumeric(text: &str) -> Result<Self> {
        if !QrSegment::is_alphanumeric(text) {
            return Err(mismatch(text, QrSegmentMode::Alphanumeric, None));
        }
        let mut bb = BitBuffer::with_capacity(QrSegmentMode::Alphanumeric.bit_length(text.len()));
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            accumdata = accumdata * 45 + alphanumeric_index(b);
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, 6);
        }
        Ok(QrSegment::from_buffer(QrSegmentMode::Alphanumeric, text.len(), bb))
    }

    /// Creates a segment for double-byte text in Kanji mode.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::ModeMismatch`] if a character has no Kanji mode encoding.
    pub fn make_kanji(text: &str, to_sjis: ToSjis) -> Result<Self> {
        let numchars = text.chars().count();
        let mut bb = BitBuffer::with_capacity(QrSegmentMode::Kanji.bit_length(numchars));
        for c in text.chars() {
            let value = kanji::kanji_value(c, to_sjis)
                .ok_or_else(|| mismatch(text, QrSegmentMode::Kanji, Some(to_sjis)))?;
            bb.append_bits(value.into(), 13);
        }
        Ok(QrSegment::from_buffer(QrSegmentMode::Kanji, numchars, bb))
    }

    pub fn new(mode: QrSegmentMode, numchars: usize, data: Vec<u8>, bitlength: usize) -> Self {
        assert!(bitlength == 0 || (bitlength - 1) / 8 < data.len());
        Self {
            mode,
            numchars,
            data,
            bitlength,
        }
    }

    fn from_buffer(mode: QrSegmentMode, numchars: usize, bb: BitBuffer) -> Self {
        let bitlength = bb.len();
        QrSegment::new(mode, numchars, bb.into_bytes(), bitlength)
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    /// Returns the character count: characters for Numeric, Alphanumeric
    /// and Kanji, bytes for Byte.
    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    /// Returns the length of the payload in bits, excluding the mode and
    /// count headers.
    pub fn bit_length(&self) -> usize {
        self.bitlength
    }

    /// Returns the payload bits packed into bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Appends mode indicator, character count and payload to `bb`.
    pub(crate) fn write_to(&self, bb: &mut BitBuffer, version: Version) {
        bb.append_bits(self.mode.mode_bits(), 4);
        // Count fits the indicator once get_total_bits() has accepted the segment.
        bb.append_bits(self.numchars as u32, self.mode.num_char_count_bits(version));
        for i in 0..self.bitlength {
            let bit: u8 = (self.data[i >> 3] >> (7 - (i & 7))) & 1;
            bb.append_bit(bit == 1);
        }
    }

    /// Returns the number of bits needed to encode the segments at the given
    /// version, or `None` if a segment's character count overflows its
    /// count indicator.
    pub fn get_total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let ccbits: u8 = seg.mode.num_char_count_bits(version);
            if let Some(limit) = (1usize).checked_shl(ccbits.into()) {
                if seg.numchars >= limit {
                    return None;
                }
            }
            result = result.checked_add(4 + usize::from(ccbits))?;
            result = result.checked_add(seg.bitlength)?;
        }
        Some(result)
    }

    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }
}

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn alphanumeric_index(b: u8) -> u32 {
    ALPHANUMERIC_CHARSET.bytes().position(|c| c == b).map_or(0, |i| i as u32)
}

fn mismatch(text: &str, mode: QrSegmentMode, to_sjis: Option<ToSjis>) -> QrError {
    QrError::ModeMismatch {
        data: text.to_string(),
        mode,
        suggested: QrSegmentMode::best_for(text, to_sjis),
    }
}

/// Describes how a segment's data bits are interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QrSegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl QrSegmentMode {
    /// Returns the 4-bit mode indicator.
    pub fn mode_bits(self) -> u32 {
        use QrSegmentMode::*;
        match self {
            Numeric => 0x1,
            Alphanumeric => 0x2,
            Byte => 0x4,
            Kanji => 0x8,
        }
    }

    /// Returns the width of the character count field at the given version.
    pub fn num_char_count_bits(self, ver: Version) -> u8 {
        tables::char_count_bits(self, ver)
    }

    /// Returns the number of payload bits for `numchars` characters.
    pub fn bit_length(self, numchars: usize) -> usize {
        let mul_frac_ceil = |numer: usize, denom: usize| (numchars * numer).div_ceil(denom);
        use QrSegmentMode::*;
        match self {
            Numeric => mul_frac_ceil(10, 3),
            Alphanumeric => mul_frac_ceil(11, 2),
            Byte => numchars * 8,
            Kanji => numchars * 13,
        }
    }

    /// Returns the narrowest mode able to hold all of `text`.
    ///
    /// Kanji is only considered when a Shift-JIS mapping is available.
    pub fn best_for(text: &str, to_sjis: Option<ToSjis>) -> Self {
        if QrSegment::is_numeric(text) {
            QrSegmentMode::Numeric
        } else if QrSegment::is_alphanumeric(text) {
            QrSegmentMode::Alphanumeric
        } else if to_sjis.is_some_and(|f| text.chars().all(|c| kanji::is_kanji(c, f))) {
            QrSegmentMode::Kanji
        } else {
            QrSegmentMode::Byte
        }
    }

    /// Parses a mode name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        use QrSegmentMode::*;
        match name.to_ascii_lowercase().as_str() {
            "numeric" => Some(Numeric),
            "alphanumeric" => Some(Alphanumeric),
            "byte" => Some(Byte),
            "kanji" => Some(Kanji),
            _ => None,
        }
    }
}

impl fmt::Display for QrSegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QrSegmentMode::Numeric => "Numeric",
            QrSegmentMode::Alphanumeric => "Alphanumeric",
            QrSegmentMode::Byte => "Byte",
            QrSegmentMode::Kanji => "Kanji",
        };
        f.write_str(name)
    }
}

impl FromStr for QrSegmentMode {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        QrSegmentMode::from_name(s).ok_or(())
    }
}
