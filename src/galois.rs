//! Arithmetic over GF(256) with the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.

use crate::error::{QrError, Result};

const PRIMITIVE: u16 = 0x11d;

// Doubled so that exp[log(a) + log(b)] never needs a modulo.
static EXP_TABLE: [u8; 512] = build_exp_table();
static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        table[i] = table[i - 255];
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns alpha^i. The exponent is cyclic with period 255.
pub fn exp(i: usize) -> u8 {
    EXP_TABLE[i % 255]
}

/// Returns the discrete logarithm of `x`, in the range [0, 254].
///
/// # Errors
///
/// Returns [`QrError::LogOfZero`] when `x` is zero.
pub fn log(x: u8) -> Result<u8> {
    if x == 0 {
        return Err(QrError::LogOfZero);
    }
    Ok(LOG_TABLE[usize::from(x)])
}

/// Multiplies two field elements.
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP_TABLE[usize::from(LOG_TABLE[usize::from(a)]) + usize::from(LOG_TABLE[usize::from(b)])]
}

/// Divides `a` by a non-zero `b`.
pub fn div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "Division by zero");
    if a == 0 {
        return 0;
    }
    let la = usize::from(LOG_TABLE[usize::from(a)]);
    let lb = usize::from(LOG_TABLE[usize::from(b)]);
    EXP_TABLE[la + 255 - lb]
}
