//! C ABI entry points of the shared library.
//!
//! Both symbols take `(a, b, result, n)` and write `result[i] = a[i] * b[i]`
//! for `i` in `0..n`. Nothing is returned and nothing can be reported back to
//! the caller, so violated preconditions end in a panic, which aborts the
//! process at the `extern "C"` boundary.

use std::mem::size_of;
use std::slice;

use crate::ops::elementwise::multiply_buffers;

/// Element-wise product of two `f64` buffers.
///
/// `n == 0` is a no-op and the pointers are not inspected at all.
///
/// # Safety
///
/// For `n > 0`, `a` and `b` must each be valid for reads of `n` consecutive
/// `f64` values and `result` must be valid for writes of `n` values. A
/// non-null pointer to a shorter buffer cannot be detected and is undefined
/// behavior. `result` may overlap the inputs; overlapping buffers are
/// processed strictly in index order.
///
/// # Panics
///
/// Panics (and therefore aborts) if any pointer is null while `n > 0`.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ElementwiseCombine(
    a: *const f64,
    b: *const f64,
    result: *mut f64,
    n: usize,
) {
    combine_raw(a, b, result, n);
}

/// Same operation as [`ElementwiseCombine`], exported under the name the
/// managed `MultiDimArray` wrapper imports.
///
/// The name suggests addition but the operation is, and always has been, a
/// multiplication. Callers relying on this symbol get the product.
///
/// # Safety
///
/// See [`ElementwiseCombine`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn Add(a: *const f64, b: *const f64, result: *mut f64, n: usize) {
    combine_raw(a, b, result, n);
}

unsafe fn combine_raw(a: *const f64, b: *const f64, result: *mut f64, n: usize) {
    if n == 0 {
        return;
    }
    assert!(!a.is_null(), "ElementwiseCombine: `a` is null with n = {}", n);
    assert!(!b.is_null(), "ElementwiseCombine: `b` is null with n = {}", n);
    assert!(
        !result.is_null(),
        "ElementwiseCombine: `result` is null with n = {}",
        n
    );

    if overlaps(result, a, n) || overlaps(result, b, n) {
        // Shared and exclusive slices over the same memory are not allowed,
        // so aliased calls stay on raw pointers.
        for i in 0..n {
            let product = *a.add(i) * *b.add(i);
            *result.add(i) = product;
        }
        return;
    }

    let a = slice::from_raw_parts(a, n);
    let b = slice::from_raw_parts(b, n);
    let result = slice::from_raw_parts_mut(result, n);
    multiply_buffers(a, b, result);
}

fn overlaps(out: *const f64, input: *const f64, n: usize) -> bool {
    let bytes = n.saturating_mul(size_of::<f64>());
    let out_start = out as usize;
    let in_start = input as usize;
    out_start < in_start.saturating_add(bytes) && in_start < out_start.saturating_add(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use std::thread;

    #[test]
    fn multiplies_into_result() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let mut result = [0.0; 3];

        unsafe { ElementwiseCombine(a.as_ptr(), b.as_ptr(), result.as_mut_ptr(), 3) };

        assert_eq!(result, [4.0, 10.0, 18.0]);
    }

    #[test]
    fn add_symbol_multiplies() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let mut result = [0.0; 3];

        unsafe { Add(a.as_ptr(), b.as_ptr(), result.as_mut_ptr(), 3) };

        assert_eq!(result, [4.0, 10.0, 18.0]);
    }

    #[test]
    fn zero_length_leaves_result_untouched() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let mut result = [7.0, 8.0];

        unsafe { ElementwiseCombine(a.as_ptr(), b.as_ptr(), result.as_mut_ptr(), 0) };

        assert_eq!(result, [7.0, 8.0]);
    }

    #[test]
    fn zero_length_accepts_null_pointers() {
        unsafe { ElementwiseCombine(ptr::null(), ptr::null(), ptr::null_mut(), 0) };
    }

    #[test]
    #[should_panic(expected = "`a` is null")]
    fn null_left_operand_panics() {
        let b = [1.0; 3];
        let mut out = [0.0; 3];
        unsafe { combine_raw(ptr::null(), b.as_ptr(), out.as_mut_ptr(), 3) };
    }

    #[test]
    #[should_panic(expected = "`b` is null")]
    fn null_right_operand_panics() {
        let a = [1.0; 3];
        let mut out = [0.0; 3];
        unsafe { combine_raw(a.as_ptr(), ptr::null(), out.as_mut_ptr(), 3) };
    }

    #[test]
    #[should_panic(expected = "`result` is null")]
    fn null_result_panics() {
        let a = [1.0; 3];
        let b = [1.0; 3];
        unsafe { combine_raw(a.as_ptr(), b.as_ptr(), ptr::null_mut(), 3) };
    }

    #[test]
    fn special_values_follow_ieee() {
        let a = [f64::INFINITY, 0.0, -1.0];
        let b = [0.0, 5.0, 0.0];
        let mut result = [1.0; 3];

        unsafe { ElementwiseCombine(a.as_ptr(), b.as_ptr(), result.as_mut_ptr(), 3) };

        assert!(result[0].is_nan());
        assert_eq!(result[1], 0.0);
        assert!(result[2] == 0.0 && result[2].is_sign_negative());
    }

    #[test]
    fn reads_only_the_first_n_elements() {
        let a = [2.0, 2.0, 2.0, 2.0];
        let b = [3.0, 3.0, 3.0, 3.0];
        let mut result = [0.0; 4];

        unsafe { ElementwiseCombine(a.as_ptr(), b.as_ptr(), result.as_mut_ptr(), 2) };

        assert_eq!(result, [6.0, 6.0, 0.0, 0.0]);
    }

    #[test]
    fn in_place_squares() {
        let mut values = [1.0, -2.0, 3.0, 0.5, 4.0];
        let p = values.as_mut_ptr();

        unsafe { ElementwiseCombine(p, p, p, values.len()) };

        assert_eq!(values, [1.0, 4.0, 9.0, 0.25, 16.0]);
    }

    #[test]
    fn in_place_into_left_operand() {
        let mut a = [1.0, 2.0, 3.0];
        let b = [10.0, 20.0, 30.0];
        let p = a.as_mut_ptr();

        unsafe { ElementwiseCombine(p, b.as_ptr(), p, 3) };

        assert_eq!(a, [10.0, 40.0, 90.0]);
    }

    #[test]
    fn shifted_overlap_runs_in_index_order() {
        let mut buf = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ones = [1.0; 4];
        let base = buf.as_mut_ptr();

        // result[i] aliases a[i + 1]; each write feeds the next read.
        unsafe { ElementwiseCombine(base, ones.as_ptr(), base.add(1), 4) };

        assert_eq!(buf, [1.0; 5]);
    }

    #[test]
    fn overlap_detection() {
        let buf = [0.0f64; 8];
        let p = buf.as_ptr();

        assert!(overlaps(p, p, 4));
        assert!(unsafe { overlaps(p.add(3), p, 4) });
        assert!(!unsafe { overlaps(p.add(4), p, 4) });
        assert!(!unsafe { overlaps(p, p.add(4), 4) });
    }

    #[test]
    fn disjoint_buffers_from_many_threads() {
        let a: Vec<f64> = (0..4096).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..4096).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        let mut result = vec![0.0; 4096];

        thread::scope(|scope| {
            for ((a, b), out) in a
                .chunks(512)
                .zip(b.chunks(512))
                .zip(result.chunks_mut(512))
            {
                scope.spawn(move || unsafe {
                    ElementwiseCombine(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), out.len())
                });
            }
        });

        for i in 0..4096 {
            assert_eq!(result[i], a[i] * b[i]);
        }
    }
}
