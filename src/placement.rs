use crate::matrix::BitMatrix;

/// Writes `codewords` into the unreserved modules in zigzag order.
///
/// Columns are taken in pairs from the right edge, skipping the vertical
/// timing column, alternately upward and downward. Modules left over once
/// the codewords run out (remainder bits) are light.
pub fn place_codewords(matrix: &mut BitMatrix, codewords: &[u8]) {
    let size = matrix.size();
    let total_bits = codewords.len() * 8;
    let mut i: usize = 0;
    let mut right = size - 1;
    let mut upward = true;
    loop {
        for vert in 0..size {
            let row = if upward { size - 1 - vert } else { vert };
            for col in [right, right - 1] {
                if matrix.is_reserved(row, col) {
                    continue;
                }
                let dark = i < total_bits && (codewords[i >> 3] >> (7 - (i & 7))) & 1 == 1;
                matrix.set(row, col, dark, false);
                i += 1;
            }
        }
        upward = !upward;
        if right < 3 {
            break;
        }
        right -= 2;
        if right == 6 {
            right = 5;
        }
    }
    debug_assert!(i >= total_bits, "Codewords do not fit the symbol");
}
