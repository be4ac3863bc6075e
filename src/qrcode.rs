//! QR code encoding.
//!
//! This module holds the symbol type [`QrCode`] and the encoding pipeline:
//! segments are packed into data codewords, split into Reed-Solomon blocks,
//! interleaved, placed around the function patterns and finally masked.

use crate::bit_buffer::BitBuffer;
use crate::error::{QrError, Result};
use crate::mask::{self, Mask};
use crate::matrix::BitMatrix;
use crate::options::{EncodeOptions, SegmentInput};
use crate::placement;
use crate::reed_solomon::ReedSolomonEncoder;
use crate::segment::QrSegment;
use crate::segmenter::Segmenter;
use crate::structure;
use crate::tables;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Covers QR Code Model 2, versions 1 to 40, all four error correction
/// levels and the Numeric, Alphanumeric, Byte and Kanji modes. Instances are
/// immutable after creation.
///
/// # Creation
///
/// - High-level: [`crate::encode`], or [`encode_text`](Self::encode_text) and
///   [`encode_binary`](Self::encode_binary).
/// - Explicit segments: [`encode_inputs`](Self::encode_inputs) or
///   [`encode_segments`](Self::encode_segments).
///
/// # Example
///
/// ```rust
/// use qrmatrix::{EncodeOptions, QrCode, QrCodeEcc};
///
/// let options = EncodeOptions::new().error_correction_level(QrCodeEcc::Low);
/// let qr = QrCode::encode_text("Hello, World!", &options).unwrap();
///
/// println!("Version: {}", qr.version().value());
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,
    ecl: QrCodeEcc,
    mask: Mask,
    modules: BitMatrix,
    segments: Vec<QrSegment>,
}

impl QrCode {
    /// Encodes a text string into a QR code.
    ///
    /// The text is split into the segment sequence with the fewest bits for
    /// the target version. Without a requested version, a rough split picks
    /// the version to optimize for, and the smallest version holding the
    /// optimized segments is used.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::NoInput`] for empty text, and a capacity error if
    /// the text does not fit.
    pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<Self> {
        if text.is_empty() {
            return Err(QrError::NoInput);
        }
        let segmenter = Segmenter::new(options.sjis());
        let target = match options.resolve_version()? {
            Some(version) => version,
            None => {
                let rough = segmenter.raw_split(text)?;
                best_version(&rough, options.ecl()).unwrap_or(Version::MAX)
            }
        };
        let segs = segmenter.optimize(text, target)?;
        Self::encode_segments(segs, options)
    }

    /// Encodes binary data into a QR code, as a single Byte segment.
    pub fn encode_binary(data: &[u8], options: &EncodeOptions) -> Result<Self> {
        if data.is_empty() {
            return Err(QrError::NoInput);
        }
        Self::encode_segments(vec![QrSegment::make_bytes(data)], options)
    }

    /// Encodes explicit segments, inferring the mode of those without one.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::ModeMismatch`] if a segment's content does not fit
    /// its requested mode.
    pub fn encode_inputs(inputs: &[SegmentInput], options: &EncodeOptions) -> Result<Self> {
        let segs = Segmenter::new(options.sjis()).from_inputs(inputs)?;
        Self::encode_segments(segs, options)
    }

    /// Encodes already built segments.
    ///
    /// Uses the requested version if there is one, otherwise the smallest
    /// version that holds the segments.
    ///
    /// # Errors
    ///
    /// - [`QrError::NoInput`] if `segs` is empty.
    /// - [`QrError::VersionTooSmall`] if the requested version cannot hold the data.
    /// - [`QrError::VersionOutOfRange`] if the requested version exceeds 40.
    /// - [`QrError::SegmentTooLong`] or [`QrError::DataOverCapacity`] if no version fits.
    pub fn encode_segments(segs: Vec<QrSegment>, options: &EncodeOptions) -> Result<Self> {
        if segs.is_empty() {
            return Err(QrError::NoInput);
        }
        let ecl = options.ecl();
        let requested = options.resolve_version()?;
        let minimum = best_version(&segs, ecl).ok_or_else(|| capacity_error(&segs, ecl))?;
        let version = match requested {
            Some(v) if v < minimum => {
                return Err(QrError::VersionTooSmall {
                    requested: v.value(),
                    minimum: minimum.value(),
                })
            }
            Some(v) => v,
            None => minimum,
        };

        if cfg!(debug_assertions) && crate::debug::debug_enabled() {
            let modes: Vec<String> = segs
                .iter()
                .map(|s| format!("{}({})", s.mode(), s.num_chars()))
                .collect();
            eprintln!("ENCODE: version {} ecl {:?} segments [{}]", version.value(), ecl, modes.join(", "));
        }

        let datacodewords = encode_segments_to_codewords(&segs, ecl, version);
        let allcodewords = add_ecc_and_interleave(&datacodewords, version, ecl)?;
        Ok(Self::encode_codewords(&allcodewords, ecl, version, options.resolve_mask(), segs))
    }

    // Draws the symbol from the final codeword sequence.
    fn encode_codewords(
        allcodewords: &[u8],
        ecl: QrCodeEcc,
        version: Version,
        msk: Option<Mask>,
        segments: Vec<QrSegment>,
    ) -> Self {
        let mut modules = BitMatrix::new(tables::symbol_size(version));
        structure::place_function_patterns(&mut modules, version);
        placement::place_codewords(&mut modules, allcodewords);

        let msk = msk.unwrap_or_else(|| {
            mask::best_mask(&mut modules, |m, trial| structure::write_format_info(m, ecl, trial))
        });
        if cfg!(debug_assertions) && crate::debug::debug_enabled() {
            eprintln!("ENCODE: mask {}", msk.value());
        }
        mask::apply_mask(msk, &mut modules);
        structure::write_format_info(&mut modules, ecl, msk);
        structure::write_version_info(&mut modules, version);

        Self {
            version,
            ecl,
            mask: msk,
            modules,
            segments,
        }
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.modules.size() as i32
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.modules.get(y as usize, x as usize)
    }

    /// Returns the module grid, addressed by `(row, col)`.
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Returns the segments the data was encoded as.
    pub fn segments(&self) -> &[QrSegment] {
        &self.segments
    }
}

/// Returns the smallest version whose data capacity at `ecl` holds `segs`.
pub fn best_version(segs: &[QrSegment], ecl: QrCodeEcc) -> Option<Version> {
    (Version::MIN.value()..=Version::MAX.value())
        .map(Version::new)
        .find(|&ver| {
            QrSegment::get_total_bits(segs, ver)
                .is_some_and(|bits| bits <= tables::data_capacity_bits(ver, ecl))
        })
}

fn capacity_error(segs: &[QrSegment], ecl: QrCodeEcc) -> QrError {
    match QrSegment::get_total_bits(segs, Version::MAX) {
        None => QrError::SegmentTooLong,
        Some(n) => QrError::DataOverCapacity(n, tables::data_capacity_bits(Version::MAX, ecl)),
    }
}

/// Packs the segments into the data codewords of a version and level:
/// headers and payloads, a terminator of up to four zero bits, zero bits
/// up to a byte boundary, then alternating `0xEC` / `0x11` pad bytes.
///
/// # Panics
///
/// Panics if the segments do not fit the data capacity; see [`best_version`].
pub fn encode_segments_to_codewords(segs: &[QrSegment], ecl: QrCodeEcc, version: Version) -> Vec<u8> {
    let datacapacitybits = tables::data_capacity_bits(version, ecl);
    let mut bb = BitBuffer::with_capacity(datacapacitybits);
    for seg in segs {
        seg.write_to(&mut bb, version);
    }
    assert!(
        bb.len() <= datacapacitybits,
        "Segments need {} bits but version {} holds {}",
        bb.len(),
        version.value(),
        datacapacitybits
    );

    // Add terminator and pad up to a byte if applicable
    let numzerobits = core::cmp::min(4, datacapacitybits - bb.len());
    bb.append_bits(0, numzerobits as u8);
    let numzerobits = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, numzerobits as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in [0xec, 0x11].iter().cycle() {
        if bb.len() >= datacapacitybits {
            break;
        }
        bb.append_bits(padbyte, 8);
    }
    bb.into_bytes()
}

/// Splits data codewords into blocks, appends each block's error correction
/// codewords, and interleaves the result.
///
/// Data codewords are taken column-wise across blocks, then error correction
/// codewords likewise.
pub fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Result<Vec<u8>> {
    assert_eq!(data.len(), tables::num_data_codewords(ver, ecl));
    let layout = tables::block_layout(ver, ecl);
    let rs = ReedSolomonEncoder::with_degree(layout.ecc_len);
    let mut result = vec![0u8; tables::total_codewords(ver)];
    let mut dat: &[u8] = data;
    for i in 0..layout.num_blocks {
        let datlen = layout.data_len(i);
        let ecc = rs.encode(&dat[..datlen])?;
        let mut k = i;
        for (j, &b) in dat[..datlen].iter().enumerate() {
            if j == layout.short_data_len {
                k -= layout.short_blocks;
            }
            result[k] = b;
            k += layout.num_blocks;
        }
        let mut k = data.len() + i;
        for b in ecc {
            result[k] = b;
            k += layout.num_blocks;
        }
        dat = &dat[datlen..];
    }
    debug_assert!(dat.is_empty());
    Ok(result)
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Parses `L`, `M`, `Q`, `H` or the full level names, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        use QrCodeEcc::*;
        match name.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Low),
            "m" | "medium" => Some(Medium),
            "q" | "quartile" => Some(Quartile),
            "h" | "high" => Some(High),
            _ => None,
        }
    }

    /// Returns the table row of this level (0 to 3).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// Returns an unsigned 2-bit integer (in the range 0 to 3).
    pub(crate) fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the version for `ver`, or `None` outside [1, 40].
    pub fn checked(ver: u32) -> Option<Self> {
        let ver = u8::try_from(ver).ok()?;
        (Version::MIN.value()..=Version::MAX.value())
            .contains(&ver)
            .then_some(Self(ver))
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }
}
