//! Function patterns: finders, timing lines, alignment patterns, and the
//! format and version information areas.

use crate::mask::Mask;
use crate::matrix::BitMatrix;
use crate::qrcode::{QrCodeEcc, Version};

/// Draws every function pattern of `version` and reserves the format and
/// version information areas.
///
/// Version information does not depend on the mask and is written here.
/// Format information is reserved with light modules until a mask is known.
pub fn place_function_patterns(matrix: &mut BitMatrix, version: Version) {
    let size = matrix.size();
    debug_assert_eq!(size, usize::from(version.value()) * 4 + 17);

    for (row, col) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        draw_finder(matrix, row, col);
    }
    draw_timing(matrix);
    draw_alignment(matrix, version);
    reserve_format_area(matrix);
    write_version_info(matrix, version);
}

// 7x7 finder plus its one-module light separator, clipped to the symbol.
fn draw_finder(matrix: &mut BitMatrix, row: usize, col: usize) {
    let size = matrix.size() as isize;
    for r in -1isize..=7 {
        for c in -1isize..=7 {
            let (y, x) = (row as isize + r, col as isize + c);
            if !(0..size).contains(&y) || !(0..size).contains(&x) {
                continue;
            }
            let dark = ((0..=6).contains(&r) && (c == 0 || c == 6))
                || ((0..=6).contains(&c) && (r == 0 || r == 6))
                || ((2..=4).contains(&r) && (2..=4).contains(&c));
            matrix.set(y as usize, x as usize, dark, true);
        }
    }
}

fn draw_timing(matrix: &mut BitMatrix) {
    let size = matrix.size();
    for i in 8..size - 8 {
        let dark = i % 2 == 0;
        matrix.set(i, 6, dark, true);
        matrix.set(6, i, dark, true);
    }
}

fn draw_alignment(matrix: &mut BitMatrix, version: Version) {
    let positions = alignment_pattern_positions(version);
    let last = positions.len().saturating_sub(1);
    for (i, &row) in positions.iter().enumerate() {
        for (j, &col) in positions.iter().enumerate() {
            // These three would overlap the finder patterns.
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for r in -2isize..=2 {
                for c in -2isize..=2 {
                    let dark = r.abs() == 2 || c.abs() == 2 || (r == 0 && c == 0);
                    let y = (row as isize + r) as usize;
                    let x = (col as isize + c) as usize;
                    matrix.set(y, x, dark, true);
                }
            }
        }
    }
}

/// Returns the centre coordinates of the alignment patterns, ascending.
///
/// Every pairing of two coordinates is a pattern centre, except the three
/// that fall on a finder pattern. Version 1 has none.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let ver = usize::from(version.value());
    if ver == 1 {
        return Vec::new();
    }
    let size = ver * 4 + 17;
    let numalign = ver / 7 + 2;
    let step = if ver == 32 {
        26
    } else {
        ((ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2)) * 2
    };
    let mut result: Vec<usize> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

// Format cells are light until write_format_info() runs. The fixed dark
// module sits next to the lower copy.
fn reserve_format_area(matrix: &mut BitMatrix) {
    for (row, col) in format_cells(matrix.size()).into_iter().flatten() {
        matrix.set(row, col, false, true);
    }
    let size = matrix.size();
    matrix.set(size - 8, 8, true, true);
}

// Positions of format bit i in both copies, indexed by i.
fn format_cells(size: usize) -> [[(usize, usize); 2]; 15] {
    let mut cells = [[(0, 0); 2]; 15];
    for (i, cell) in cells.iter_mut().enumerate() {
        let near = match i {
            0..=5 => (i, 8),
            6 => (7, 8),
            7 => (8, 8),
            8 => (8, 7),
            _ => (8, 14 - i),
        };
        let far = if i < 8 {
            (8, size - 1 - i)
        } else {
            (size - 15 + i, 8)
        };
        *cell = [near, far];
    }
    cells
}

/// Returns the 15-bit format information word for a level and mask:
/// five data bits, ten BCH bits, XORed with `0x5412`.
pub fn format_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = u32::from((ecl.format_bits() << 3) | mask.value());
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// Returns the 18-bit version information word: six data bits followed by
/// twelve BCH bits.
pub fn version_bits(version: Version) -> u32 {
    let ver = u32::from(version.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
    }
    (ver << 12) | rem
}

/// Writes both copies of the format information.
pub fn write_format_info(matrix: &mut BitMatrix, ecl: QrCodeEcc, mask: Mask) {
    let bits = format_bits(ecl, mask);
    for (i, copies) in format_cells(matrix.size()).into_iter().enumerate() {
        let bit = get_bit(bits, i);
        for (row, col) in copies {
            matrix.set(row, col, bit, true);
        }
    }
}

/// Writes both copies of the version information; a no-op below version 7.
pub fn write_version_info(matrix: &mut BitMatrix, version: Version) {
    if version.value() < 7 {
        return;
    }
    let size = matrix.size();
    let bits = version_bits(version);
    for i in 0..18 {
        let bit = get_bit(bits, i);
        let row = i / 3;
        let col = size - 11 + i % 3;
        matrix.set(row, col, bit, true);
        matrix.set(col, row, bit, true);
    }
}

fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    fn placed(ver: u8) -> BitMatrix {
        let version = Version::new(ver);
        let mut m = BitMatrix::new(tables::symbol_size(version));
        place_function_patterns(&mut m, version);
        m
    }

    #[test]
    fn test_unreserved_modules_match_raw_capacity() {
        for ver in 1..=40 {
            let m = placed(ver);
            let size = m.size();
            let free = (0..size)
                .flat_map(|r| (0..size).map(move |c| (r, c)))
                .filter(|&(r, c)| !m.is_reserved(r, c))
                .count();
            assert_eq!(free, tables::num_raw_data_modules(Version::new(ver)), "version {}", ver);
        }
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(Version::new(1)).is_empty());
        assert_eq!(alignment_pattern_positions(Version::new(2)), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(Version::new(7)), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(Version::new(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_pattern_positions(Version::new(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_finder_pattern() {
        let m = placed(1);
        let size = m.size();
        for (row, col) in [(0, 0), (size - 7, 0), (0, size - 7)] {
            assert!(m.get(row, col));
            assert!(m.get(row + 3, col + 3));
            assert!(!m.get(row + 1, col + 1));
            assert!(m.get(row + 6, col + 6));
        }
        // Separators.
        assert!(!m.get(7, 0));
        assert!(!m.get(0, 7));
        assert!(m.is_reserved(7, 7));
        assert!(!m.get(size - 8, 0));
        assert!(m.is_reserved(size - 8, 7));
    }

    #[test]
    fn test_timing_and_dark_module() {
        let m = placed(3);
        let size = m.size();
        for i in 8..size - 8 {
            assert_eq!(m.get(6, i), i % 2 == 0);
            assert_eq!(m.get(i, 6), i % 2 == 0);
        }
        assert!(m.get(size - 8, 8));
        assert!(m.is_reserved(size - 8, 8));
    }

    #[test]
    fn test_alignment_pattern_drawn() {
        let m = placed(2);
        assert!(m.get(18, 18));
        assert!(!m.get(17, 18));
        assert!(m.get(16, 16));
        assert!(m.get(20, 18));
        assert!(m.is_reserved(19, 19));
    }

    #[test]
    fn test_format_bits() {
        // Known words from the standard's format information table.
        assert_eq!(format_bits(QrCodeEcc::Medium, Mask::new(0)), 0x5412);
        assert_eq!(format_bits(QrCodeEcc::Low, Mask::new(0)), 0x77c4);
        assert_eq!(format_bits(QrCodeEcc::High, Mask::new(7)), 0x083b);
        assert_eq!(format_bits(QrCodeEcc::Quartile, Mask::new(1)), 0x3068);
    }

    #[test]
    fn test_version_bits() {
        assert_eq!(version_bits(Version::new(7)), 0x07c94);
        assert_eq!(version_bits(Version::new(21)), 0x15683);
        assert_eq!(version_bits(Version::new(40)), 0x28c69);
    }

    #[test]
    fn test_write_format_info() {
        let mut m = placed(1);
        let size = m.size();
        write_format_info(&mut m, QrCodeEcc::Low, Mask::new(0));
        let bits = format_bits(QrCodeEcc::Low, Mask::new(0));
        for i in 0..15 {
            let [near, far] = format_cells(size)[i];
            assert_eq!(m.get(near.0, near.1), get_bit(bits, i));
            assert_eq!(m.get(far.0, far.1), get_bit(bits, i));
        }
        assert!(m.get(size - 8, 8));
    }

    #[test]
    fn test_version_info_written_from_version_7() {
        let m = placed(6);
        assert!(!m.is_reserved(0, m.size() - 11));

        let m = placed(7);
        let size = m.size();
        let bits = version_bits(Version::new(7));
        for i in 0..18 {
            let (row, col) = (i / 3, size - 11 + i % 3);
            assert!(m.is_reserved(row, col));
            assert_eq!(m.get(row, col), get_bit(bits, i));
            assert_eq!(m.get(col, row), get_bit(bits, i));
        }
    }
}
