//! Polynomials over GF(256), coefficients ordered highest degree first.

use crate::galois;

/// Multiplies two polynomials.
///
/// The product has `p1.len() + p2.len() - 1` coefficients; an empty operand
/// yields an empty product.
pub fn mul(p1: &[u8], p2: &[u8]) -> Vec<u8> {
    if p1.is_empty() || p2.is_empty() {
        return Vec::new();
    }
    let mut coeff = vec![0u8; p1.len() + p2.len() - 1];
    for (i, &a) in p1.iter().enumerate() {
        for (j, &b) in p2.iter().enumerate() {
            coeff[i + j] ^= galois::mul(a, b);
        }
    }
    coeff
}

/// Returns the remainder of `dividend / divisor` with leading zero
/// coefficients stripped.
///
/// # Panics
///
/// Panics if the divisor is empty or has a zero leading coefficient.
pub fn rem(dividend: &[u8], divisor: &[u8]) -> Vec<u8> {
    assert!(
        divisor.first().is_some_and(|&c| c != 0),
        "Divisor must have a non-zero leading coefficient"
    );
    let lead = divisor[0];
    let mut result = dividend.to_vec();
    let mut offset = 0;
    skip_zeros(&result, &mut offset);
    while result.len() - offset >= divisor.len() {
        let factor = galois::div(result[offset], lead);
        for (i, &d) in divisor.iter().enumerate() {
            result[offset + i] ^= galois::mul(d, factor);
        }
        skip_zeros(&result, &mut offset);
    }
    result.split_off(offset)
}

fn skip_zeros(poly: &[u8], offset: &mut usize) {
    while *offset < poly.len() && poly[*offset] == 0 {
        *offset += 1;
    }
}

/// Builds the Reed-Solomon generator polynomial
/// `(x - a^0)(x - a^1)...(x - a^(degree-1))`.
pub fn generator(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        poly = mul(&poly, &[1, galois::exp(i)]);
    }
    poly
}
