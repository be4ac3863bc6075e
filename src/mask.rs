//! Data masks and the penalty rules used to choose between them.

use crate::error::{QrError, Result};
use crate::matrix::BitMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const PENALTY_N1: usize = 3;
const PENALTY_N2: usize = 3;
const PENALTY_N3: usize = 40;
const PENALTY_N4: usize = 10;

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Every mask, in id order.
    pub const ALL: [Mask; 8] = [
        Mask(0),
        Mask(1),
        Mask(2),
        Mask(3),
        Mask(4),
        Mask(5),
        Mask(6),
        Mask(7),
    ];

    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Creates a mask, failing with [`QrError::InvalidMask`] outside [0, 7].
    pub fn try_new(mask: u8) -> Result<Self> {
        if mask <= 7 {
            Ok(Self(mask))
        } else {
            Err(QrError::InvalidMask(mask))
        }
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` if this mask flips the module at `(row, col)`.
    pub fn inverts(self, row: usize, col: usize) -> bool {
        let (r, c) = (row, col);
        match self.0 {
            0 => (r + c) % 2 == 0,
            1 => r % 2 == 0,
            2 => c % 3 == 0,
            3 => (r + c) % 3 == 0,
            4 => (r / 2 + c / 3) % 2 == 0,
            5 => (r * c) % 2 + (r * c) % 3 == 0,
            6 => ((r * c) % 2 + (r * c) % 3) % 2 == 0,
            7 => ((r * c) % 3 + (r + c) % 2) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

/// XORs every unreserved module selected by `mask`. Applying the same mask
/// twice restores the matrix.
pub fn apply_mask(mask: Mask, matrix: &mut BitMatrix) {
    let size = matrix.size();
    for row in 0..size {
        for col in 0..size {
            if !matrix.is_reserved(row, col) {
                matrix.xor(row, col, mask.inverts(row, col));
            }
        }
    }
}

/// Runs of five or more same-coloured modules in a row or column.
pub fn penalty_n1(matrix: &BitMatrix) -> usize {
    (0..matrix.size())
        .map(|i| run_penalty(matrix.row(i)) + run_penalty(matrix.column(i)))
        .sum()
}

fn run_penalty(line: impl Iterator<Item = bool>) -> usize {
    let score = |run: usize| if run >= 5 { PENALTY_N1 + run - 5 } else { 0 };
    let mut points = 0;
    let mut last: Option<bool> = None;
    let mut run = 0;
    for module in line {
        if last == Some(module) {
            run += 1;
        } else {
            points += score(run);
            last = Some(module);
            run = 1;
        }
    }
    points + score(run)
}

/// Uniformly coloured 2x2 blocks.
pub fn penalty_n2(matrix: &BitMatrix) -> usize {
    let size = matrix.size();
    let mut blocks = 0;
    for row in 0..size.saturating_sub(1) {
        for col in 0..size - 1 {
            let color = matrix.get(row, col);
            if color == matrix.get(row, col + 1)
                && color == matrix.get(row + 1, col)
                && color == matrix.get(row + 1, col + 1)
            {
                blocks += 1;
            }
        }
    }
    blocks * PENALTY_N2
}

/// Finder-like 1:1:3:1:1 patterns with four light modules on one side.
pub fn penalty_n3(matrix: &BitMatrix) -> usize {
    let found: usize = (0..matrix.size())
        .map(|i| finder_like_count(matrix.row(i)) + finder_like_count(matrix.column(i)))
        .sum();
    found * PENALTY_N3
}

fn finder_like_count(line: impl Iterator<Item = bool>) -> usize {
    let mut window: u16 = 0;
    let mut count = 0;
    for (i, module) in line.enumerate() {
        window = ((window << 1) & 0x7ff) | u16::from(module);
        if i >= 10 && (window == 0x5d0 || window == 0x05d) {
            count += 1;
        }
    }
    count
}

/// Deviation of the dark module ratio from one half, in 5% steps.
pub fn penalty_n4(matrix: &BitMatrix) -> usize {
    let total = matrix.size() * matrix.size();
    let dark = matrix.dark_count();
    let steps = (dark * 20).div_ceil(total);
    steps.abs_diff(10) * PENALTY_N4
}

/// Returns the sum of the four penalty rules.
pub fn penalty_score(matrix: &BitMatrix) -> usize {
    penalty_n1(matrix) + penalty_n2(matrix) + penalty_n3(matrix) + penalty_n4(matrix)
}

/// Returns the mask with the lowest penalty; the lowest id wins ties.
///
/// `setup_format` runs before each trial so the format information reflects
/// the mask being scored. On return the matrix holds no mask, but its format
/// area may hold a trial's bits.
pub fn best_mask<F>(matrix: &mut BitMatrix, setup_format: F) -> Mask
where
    F: Fn(&mut BitMatrix, Mask) + Sync,
{
    select(matrix, setup_format)
}

#[cfg(not(feature = "parallel"))]
fn select<F>(matrix: &mut BitMatrix, setup_format: F) -> Mask
where
    F: Fn(&mut BitMatrix, Mask) + Sync,
{
    let mut best = Mask(0);
    let mut lowest = usize::MAX;
    for mask in Mask::ALL {
        setup_format(matrix, mask);
        apply_mask(mask, matrix);
        let penalty = penalty_score(matrix);
        // Undoes the mask due to XOR
        apply_mask(mask, matrix);
        trace_penalty(mask, penalty);
        if penalty < lowest {
            lowest = penalty;
            best = mask;
        }
    }
    best
}

// Each trial works on its own copy; the matrix itself is left untouched.
#[cfg(feature = "parallel")]
fn select<F>(matrix: &mut BitMatrix, setup_format: F) -> Mask
where
    F: Fn(&mut BitMatrix, Mask) + Sync,
{
    let base: &BitMatrix = matrix;
    Mask::ALL
        .par_iter()
        .map(|&mask| {
            let mut trial = base.clone();
            setup_format(&mut trial, mask);
            apply_mask(mask, &mut trial);
            let penalty = penalty_score(&trial);
            trace_penalty(mask, penalty);
            (penalty, mask)
        })
        .min()
        .map_or(Mask(0), |(_, mask)| mask)
}

fn trace_penalty(mask: Mask, penalty: usize) {
    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!("MASK: pattern {} penalty {}", mask.value(), penalty);
    }
}
