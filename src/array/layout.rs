use serde::{Deserialize, Serialize};

use super::error::{ArrayError, Result};

/// How a multi-dimensional index maps onto the flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryOrder {
    /// Last axis is contiguous (C order).
    #[default]
    RowMajor,
    /// First axis is contiguous (Fortran order).
    ColumnMajor,
}

/// Number of elements described by `shape`.
///
/// An empty shape describes an empty array. Every listed dimension must be
/// positive and the product must fit in `usize`.
pub fn element_count(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Ok(0);
    }
    shape.iter().enumerate().try_fold(1usize, |acc, (axis, &size)| {
        if size == 0 {
            return Err(ArrayError::InvalidDimension { axis, size });
        }
        acc.checked_mul(size).ok_or(ArrayError::SizeOverflow)
    })
}

/// Element strides for `shape` laid out in `order`.
pub fn compute_strides(shape: &[usize], order: MemoryOrder) -> Vec<usize> {
    let rank = shape.len();
    let mut strides = vec![1; rank];
    if rank == 0 {
        return strides;
    }

    match order {
        MemoryOrder::RowMajor => {
            for i in (0..rank - 1).rev() {
                strides[i] = strides[i + 1] * shape[i + 1];
            }
        }
        MemoryOrder::ColumnMajor => {
            for i in 1..rank {
                strides[i] = strides[i - 1] * shape[i - 1];
            }
        }
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_elements() {
        assert_eq!(element_count(&[]).unwrap(), 0);
        assert_eq!(element_count(&[7]).unwrap(), 7);
        assert_eq!(element_count(&[2, 3, 4]).unwrap(), 24);
    }

    #[test]
    fn rejects_zero_dimension() {
        assert_eq!(
            element_count(&[3, 0, 2]),
            Err(ArrayError::InvalidDimension { axis: 1, size: 0 })
        );
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            element_count(&[usize::MAX, 2]),
            Err(ArrayError::SizeOverflow)
        );
    }

    #[test]
    fn row_major_strides() {
        assert_eq!(compute_strides(&[2, 3, 4], MemoryOrder::RowMajor), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[5], MemoryOrder::RowMajor), vec![1]);
    }

    #[test]
    fn column_major_strides() {
        assert_eq!(compute_strides(&[2, 3, 4], MemoryOrder::ColumnMajor), vec![1, 2, 6]);
    }

    #[test]
    fn empty_shape_has_no_strides() {
        assert!(compute_strides(&[], MemoryOrder::RowMajor).is_empty());
        assert!(compute_strides(&[], MemoryOrder::ColumnMajor).is_empty());
    }
}
