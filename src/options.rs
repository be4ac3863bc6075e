//! Encoder input and options.

use crate::error::{QrError, Result};
use crate::kanji::ToSjis;
use crate::mask::Mask;
use crate::qrcode::{QrCodeEcc, Version};
use crate::segment::QrSegmentMode;

/// Options for [`encode`](crate::encode). Every field is optional.
///
/// # Example
///
/// ```rust
/// use qrmatrix::{EncodeOptions, QrCodeEcc};
///
/// let options = EncodeOptions::new()
///     .version(3)
///     .error_correction_level(QrCodeEcc::Quartile)
///     .mask_pattern(2);
/// assert_eq!(options.ecl(), QrCodeEcc::Quartile);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeOptions {
    version: Option<u32>,
    ecl: QrCodeEcc,
    mask: Option<u8>,
    to_sjis: Option<ToSjis>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a version. `0` selects the smallest version that fits.
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn error_correction_level(mut self, ecl: QrCodeEcc) -> Self {
        self.ecl = ecl;
        self
    }

    /// Sets the level by name (`L`, `m`, `Quartile`, ...). Unknown names
    /// keep the current level.
    pub fn error_correction_level_name(mut self, name: &str) -> Self {
        if let Some(ecl) = QrCodeEcc::from_name(name) {
            self.ecl = ecl;
        }
        self
    }

    /// Forces a mask pattern. Values outside 0–7 leave the choice to the
    /// penalty evaluation.
    pub fn mask_pattern(mut self, mask: u8) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Enables Kanji mode with the given Shift-JIS mapping.
    pub fn to_sjis(mut self, to_sjis: ToSjis) -> Self {
        self.to_sjis = Some(to_sjis);
        self
    }

    pub fn ecl(&self) -> QrCodeEcc {
        self.ecl
    }

    pub fn sjis(&self) -> Option<ToSjis> {
        self.to_sjis
    }

    /// Returns the requested version, `None` for automatic selection.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::VersionOutOfRange`] for versions above 40.
    pub fn resolve_version(&self) -> Result<Option<Version>> {
        match self.version {
            None | Some(0) => Ok(None),
            Some(v) => Version::checked(v).map(Some).ok_or(QrError::VersionOutOfRange(v)),
        }
    }

    /// Returns the forced mask, `None` for automatic selection.
    pub fn resolve_mask(&self) -> Option<Mask> {
        self.mask.and_then(|m| Mask::try_new(m).ok())
    }
}

/// The data to encode: plain text, raw bytes, or explicit segments.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum QrData {
    Text(String),
    Bytes(Vec<u8>),
    Segments(Vec<SegmentInput>),
}

impl From<&str> for QrData {
    fn from(text: &str) -> Self {
        QrData::Text(text.to_string())
    }
}

impl From<String> for QrData {
    fn from(text: String) -> Self {
        QrData::Text(text)
    }
}

impl From<&[u8]> for QrData {
    fn from(bytes: &[u8]) -> Self {
        QrData::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for QrData {
    fn from(bytes: Vec<u8>) -> Self {
        QrData::Bytes(bytes)
    }
}

impl From<Vec<SegmentInput>> for QrData {
    fn from(segments: Vec<SegmentInput>) -> Self {
        QrData::Segments(segments)
    }
}

/// Payload of an explicit segment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SegmentData {
    Text(String),
    Bytes(Vec<u8>),
}

impl SegmentData {
    pub fn is_empty(&self) -> bool {
        match self {
            SegmentData::Text(text) => text.is_empty(),
            SegmentData::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// An explicit segment: its data and, optionally, the mode to encode it in.
/// Without a mode the narrowest mode able to hold the data is used.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SegmentInput {
    data: SegmentData,
    mode: Option<QrSegmentMode>,
}

impl SegmentInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            data: SegmentData::Text(text.into()),
            mode: None,
        }
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: SegmentData::Bytes(bytes.into()),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: QrSegmentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the mode by name; an unknown name means the mode is inferred.
    pub fn with_mode_name(mut self, name: &str) -> Self {
        self.mode = QrSegmentMode::from_name(name);
        self
    }

    pub fn data(&self) -> &SegmentData {
        &self.data
    }

    pub fn mode(&self) -> Option<QrSegmentMode> {
        self.mode
    }
}
