//! Lookup tables and derived capacities from the QR Code Model 2 standard.

use crate::qrcode::{QrCodeEcc, Version};
use crate::segment::QrSegmentMode;

// Index: [ecl.ordinal()][version]
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Character count indicator widths per mode, for versions 1-9, 10-26, 27-40.
static CHAR_COUNT_BITS: [[u8; 3]; 4] = [
    [10, 12, 14], // Numeric
    [9, 11, 13],  // Alphanumeric
    [8, 16, 16],  // Byte
    [8, 10, 12],  // Kanji
];

/// Returns the side length of a symbol, `4 * version + 17`.
pub fn symbol_size(ver: Version) -> usize {
    usize::from(ver.value()) * 4 + 17
}

/// Returns the number of modules left for codewords once every function
/// pattern is drawn, including remainder bits.
pub fn num_raw_data_modules(ver: Version) -> usize {
    let ver = usize::from(ver.value());
    let mut result: usize = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign: usize = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Returns the total number of codewords (data and error correction).
pub fn total_codewords(ver: Version) -> usize {
    num_raw_data_modules(ver) / 8
}

/// Returns the number of error correction codewords in each block.
pub fn ecc_codewords_per_block(ver: Version, ecl: QrCodeEcc) -> usize {
    table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
}

/// Returns the number of error correction blocks.
pub fn num_error_correction_blocks(ver: Version, ecl: QrCodeEcc) -> usize {
    table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

/// Returns the number of data codewords after removing error correction.
pub fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    total_codewords(ver) - ecc_codewords_per_block(ver, ecl) * num_error_correction_blocks(ver, ecl)
}

/// Returns the number of data bits available at this version and level.
pub fn data_capacity_bits(ver: Version, ecl: QrCodeEcc) -> usize {
    num_data_codewords(ver, ecl) * 8
}

/// Returns the width of the character count indicator for a mode.
pub fn char_count_bits(mode: QrSegmentMode, ver: Version) -> u8 {
    let row = match mode {
        QrSegmentMode::Numeric => 0,
        QrSegmentMode::Alphanumeric => 1,
        QrSegmentMode::Byte => 2,
        QrSegmentMode::Kanji => 3,
    };
    CHAR_COUNT_BITS[row][usize::from((ver.value() + 7) / 17)]
}

/// Returns how many characters of a single `mode` segment fit into a symbol.
pub fn char_capacity(ver: Version, ecl: QrCodeEcc, mode: QrSegmentMode) -> usize {
    let usable = data_capacity_bits(ver, ecl) - (4 + usize::from(char_count_bits(mode, ver)));
    match mode {
        QrSegmentMode::Numeric => {
            let full = usable / 10 * 3;
            full + match usable % 10 {
                0..=3 => 0,
                4..=6 => 1,
                _ => 2,
            }
        }
        QrSegmentMode::Alphanumeric => usable / 11 * 2 + usize::from(usable % 11 >= 6),
        QrSegmentMode::Byte => usable / 8,
        QrSegmentMode::Kanji => usable / 13,
    }
}

/// How the codewords of one version and level split into blocks.
///
/// Blocks come in two groups: the first `short_blocks` carry
/// `short_data_len` data codewords, the rest carry one more.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlockLayout {
    pub num_blocks: usize,
    pub short_blocks: usize,
    pub short_data_len: usize,
    pub ecc_len: usize,
}

impl BlockLayout {
    /// Returns the number of data codewords in block `index`.
    pub fn data_len(&self, index: usize) -> usize {
        self.short_data_len + usize::from(index >= self.short_blocks)
    }
}

/// Returns the block layout for a version and level.
pub fn block_layout(ver: Version, ecl: QrCodeEcc) -> BlockLayout {
    let num_blocks = num_error_correction_blocks(ver, ecl);
    let ecc_len = ecc_codewords_per_block(ver, ecl);
    let raw = total_codewords(ver);
    BlockLayout {
        num_blocks,
        short_blocks: num_blocks - raw % num_blocks,
        short_data_len: raw / num_blocks - ecc_len,
        ecc_len,
    }
}

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
    table[ecl.ordinal()][usize::from(ver.value())] as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [QrCodeEcc; 4] = [
        QrCodeEcc::Low,
        QrCodeEcc::Medium,
        QrCodeEcc::Quartile,
        QrCodeEcc::High,
    ];

    fn versions() -> impl Iterator<Item = Version> {
        (1..=40).map(Version::new)
    }

    #[test]
    fn test_symbol_size() {
        assert_eq!(symbol_size(Version::MIN), 21);
        assert_eq!(symbol_size(Version::new(7)), 45);
        assert_eq!(symbol_size(Version::MAX), 177);
    }

    #[test]
    fn test_total_codewords() {
        assert_eq!(total_codewords(Version::new(1)), 26);
        assert_eq!(total_codewords(Version::new(7)), 196);
        assert_eq!(total_codewords(Version::MAX), 3706);
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(num_data_codewords(Version::new(1), QrCodeEcc::Low), 19);
        assert_eq!(num_data_codewords(Version::new(1), QrCodeEcc::Medium), 16);
        assert_eq!(num_data_codewords(Version::new(1), QrCodeEcc::High), 9);
        assert_eq!(num_data_codewords(Version::new(40), QrCodeEcc::Low), 2956);
        assert_eq!(num_data_codewords(Version::new(40), QrCodeEcc::High), 1276);
    }

    #[test]
    fn test_capacity_strictly_increasing() {
        for ecl in LEVELS {
            let mut prev = 0;
            for ver in versions() {
                let cap = data_capacity_bits(ver, ecl);
                assert!(cap > prev, "capacity not increasing at version {}", ver.value());
                prev = cap;
            }
        }
    }

    #[test]
    fn test_char_count_bits() {
        for v in 1..=9 {
            assert_eq!(char_count_bits(QrSegmentMode::Numeric, Version::new(v)), 10);
            assert_eq!(char_count_bits(QrSegmentMode::Byte, Version::new(v)), 8);
        }
        for v in 10..=26 {
            assert_eq!(char_count_bits(QrSegmentMode::Alphanumeric, Version::new(v)), 11);
            assert_eq!(char_count_bits(QrSegmentMode::Kanji, Version::new(v)), 10);
        }
        for v in 27..=40 {
            assert_eq!(char_count_bits(QrSegmentMode::Numeric, Version::new(v)), 14);
            assert_eq!(char_count_bits(QrSegmentMode::Byte, Version::new(v)), 16);
        }
    }

    #[test]
    fn test_char_capacity() {
        let v1 = Version::new(1);
        assert_eq!(char_capacity(v1, QrCodeEcc::Low, QrSegmentMode::Numeric), 41);
        assert_eq!(char_capacity(v1, QrCodeEcc::Low, QrSegmentMode::Alphanumeric), 25);
        assert_eq!(char_capacity(v1, QrCodeEcc::Low, QrSegmentMode::Byte), 17);
        assert_eq!(char_capacity(v1, QrCodeEcc::Low, QrSegmentMode::Kanji), 10);
        assert_eq!(char_capacity(v1, QrCodeEcc::High, QrSegmentMode::Numeric), 17);
        let v40 = Version::MAX;
        assert_eq!(char_capacity(v40, QrCodeEcc::Low, QrSegmentMode::Numeric), 7089);
        assert_eq!(char_capacity(v40, QrCodeEcc::Low, QrSegmentMode::Alphanumeric), 4296);
        assert_eq!(char_capacity(v40, QrCodeEcc::Low, QrSegmentMode::Byte), 2953);
        assert_eq!(char_capacity(v40, QrCodeEcc::Low, QrSegmentMode::Kanji), 1817);
    }

    #[test]
    fn test_block_layout_covers_all_codewords() {
        for ecl in LEVELS {
            for ver in versions() {
                let layout = block_layout(ver, ecl);
                let data: usize = (0..layout.num_blocks).map(|i| layout.data_len(i)).sum();
                assert_eq!(data, num_data_codewords(ver, ecl));
                assert_eq!(data + layout.num_blocks * layout.ecc_len, total_codewords(ver));
            }
        }
    }

    #[test]
    fn test_block_layout_groups() {
        // 5-Q: two blocks of 15 data codewords and two of 16.
        let layout = block_layout(Version::new(5), QrCodeEcc::Quartile);
        assert_eq!(layout.num_blocks, 4);
        assert_eq!(layout.short_blocks, 2);
        assert_eq!(layout.short_data_len, 15);
        assert_eq!(layout.data_len(3), 16);
        assert_eq!(layout.ecc_len, 18);
    }
}
