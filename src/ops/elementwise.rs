#[cfg(feature = "simd")]
use std::simd::{f64x4, Simd};

/// Writes `a[i] * b[i]` into `output[i]` for every index of `output`.
///
/// The element count is `output.len()`. Plain IEEE 754 multiplication is
/// used throughout, so NaN, infinities and signed zeros propagate as usual.
///
/// # Panics
///
/// Panics if `a` or `b` holds fewer elements than `output`.
pub fn multiply_buffers(a: &[f64], b: &[f64], output: &mut [f64]) {
    let n = output.len();
    assert!(
        a.len() >= n,
        "left operand has {} elements, expected at least {}",
        a.len(),
        n
    );
    assert!(
        b.len() >= n,
        "right operand has {} elements, expected at least {}",
        b.len(),
        n
    );

    #[cfg(feature = "simd")]
    multiply_simd(&a[..n], &b[..n], output);

    #[cfg(not(feature = "simd"))]
    multiply_scalar(&a[..n], &b[..n], output);
}

/// Allocating form of [`multiply_buffers`].
///
/// # Panics
///
/// Panics if `a` and `b` differ in length.
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "operands must have the same length");
    let mut output = vec![0.0; a.len()];
    multiply_buffers(a, b, &mut output);
    output
}

#[cfg(not(feature = "simd"))]
fn multiply_scalar(a: &[f64], b: &[f64], output: &mut [f64]) {
    for ((out, &x), &y) in output.iter_mut().zip(a).zip(b) {
        *out = x * y;
    }
}

#[cfg(feature = "simd")]
fn multiply_simd(a: &[f64], b: &[f64], output: &mut [f64]) {
    let chunks = output.len() / 4;
    let remainder = output.len() % 4;

    // Process 4 elements at a time using SIMD
    for i in 0..chunks {
        let offset = i * 4;
        let va: f64x4 = Simd::from_slice(&a[offset..offset + 4]);
        let vb: f64x4 = Simd::from_slice(&b[offset..offset + 4]);
        (va * vb).copy_to_slice(&mut output[offset..offset + 4]);
    }

    let start = chunks * 4;
    for i in start..start + remainder {
        output[i] = a[i] * b[i];
    }
}
