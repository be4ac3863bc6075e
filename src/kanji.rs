//! Shift-JIS support for Kanji mode.
//!
//! Kanji mode is only available when the caller supplies a [`ToSjis`]
//! mapping. Without one, double-byte text is encoded in Byte mode.

/// Maps a character to its double-byte Shift-JIS code, or `None` when the
/// character has no double-byte encoding.
pub type ToSjis = fn(char) -> Option<u16>;

/// Returns the 13-bit Kanji mode value of a character, or `None` if the
/// mapping rejects it or its code lies outside the Kanji mode ranges.
pub fn kanji_value(c: char, to_sjis: ToSjis) -> Option<u16> {
    let sjis = to_sjis(c)?;
    let value = match sjis {
        0x8140..=0x9ffc => sjis - 0x8140,
        0xe040..=0xebbf => sjis - 0xc140,
        _ => return None,
    };
    Some((value >> 8) * 0xc0 + (value & 0xff))
}

/// Returns `true` if `c` can be written in Kanji mode.
pub fn is_kanji(c: char, to_sjis: ToSjis) -> bool {
    kanji_value(c, to_sjis).is_some()
}

/// Shift-JIS mapping backed by the `encoding_rs` tables.
#[cfg(feature = "sjis")]
pub fn encoding_rs_to_sjis(c: char) -> Option<u16> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(c.encode_utf8(&mut buf));
    match (had_errors, &*bytes) {
        (false, &[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
        _ => None,
    }
}
