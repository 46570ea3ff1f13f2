use std::mem::size_of;
use std::ops::{Index, IndexMut};

use super::error::{ArrayError, Result};
use super::layout::{compute_strides, element_count, MemoryOrder};
use crate::ops::elementwise::multiply_buffers;

/// Dense n-dimensional array backed by one contiguous buffer.
///
/// The shape is fixed at construction (up to [`reshape`](Self::reshape),
/// which keeps the element count). Indexing goes through the strides of the
/// current [`MemoryOrder`], so switching the order reinterprets the buffer
/// without moving any data.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDimArray<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    order: MemoryOrder,
    user_initialized: bool,
}

impl<T: Copy + Default> MultiDimArray<T> {
    /// Allocates a default-filled array. An empty `shape` gives an empty array.
    pub fn new(shape: &[usize]) -> Result<Self> {
        let len = element_count(shape)?;
        Self::checked_num_bytes(len)?;
        Ok(Self::from_parts(vec![T::default(); len], shape.to_vec()))
    }

    /// Takes ownership of `data`, which must hold exactly as many elements as
    /// `shape` describes.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected = element_count(shape)?;
        if data.len() != expected {
            return Err(ArrayError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(data, shape.to_vec()))
    }

    fn from_parts(data: Vec<T>, shape: Vec<usize>) -> Self {
        let order = MemoryOrder::default();
        Self {
            strides: compute_strides(&shape, order),
            data,
            shape,
            order,
            user_initialized: false,
        }
    }

    // Allocations are limited to `isize::MAX` bytes.
    fn checked_num_bytes(len: usize) -> Result<usize> {
        len.checked_mul(size_of::<T>())
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(ArrayError::SizeOverflow)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Size of the buffer in bytes.
    pub fn num_bytes(&self) -> usize {
        // Bounded by the allocation that already exists.
        self.data.len() * size_of::<T>()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn order(&self) -> MemoryOrder {
        self.order
    }

    pub fn set_order(&mut self, order: MemoryOrder) {
        self.order = order;
        self.strides = compute_strides(&self.shape, order);
    }

    /// Size of dimension `axis`.
    pub fn get_length(&self, axis: usize) -> Result<usize> {
        self.shape
            .get(axis)
            .copied()
            .ok_or(ArrayError::AxisOutOfRange {
                axis,
                rank: self.rank(),
            })
    }

    /// Replaces the shape with one describing the same number of elements.
    pub fn reshape(&mut self, shape: &[usize]) -> Result<()> {
        let expected = element_count(shape)?;
        if expected != self.len() {
            return Err(ArrayError::LengthMismatch {
                expected,
                actual: self.len(),
            });
        }
        self.shape = shape.to_vec();
        self.strides = compute_strides(&self.shape, self.order);
        Ok(())
    }

    /// Fills every element with `value`. Allowed once per array.
    pub fn init_value(&mut self, value: T) -> Result<()> {
        if self.is_empty() {
            return Err(ArrayError::EmptyArray);
        }
        if self.user_initialized {
            return Err(ArrayError::AlreadyInitialized);
        }
        self.data.fill(value);
        self.user_initialized = true;
        Ok(())
    }

    pub fn is_user_initialized(&self) -> bool {
        self.user_initialized
    }

    /// Flat buffer offset of `indices`.
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.rank() {
            return Err(ArrayError::RankMismatch {
                expected: self.rank(),
                actual: indices.len(),
            });
        }

        let mut offset = 0;
        for (axis, ((&index, &size), &stride)) in indices
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .enumerate()
        {
            if index >= size {
                return Err(ArrayError::IndexOutOfBounds { axis, index, size });
            }
            offset += index * stride;
        }
        Ok(offset)
    }

    pub fn get(&self, indices: &[usize]) -> Result<T> {
        if self.is_empty() {
            return Err(ArrayError::EmptyArray);
        }
        let offset = self.offset_of(indices)?;
        Ok(self.data[offset])
    }

    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        if self.is_empty() {
            return Err(ArrayError::EmptyArray);
        }
        let offset = self.offset_of(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Elements in buffer order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl MultiDimArray<f64> {
    /// Element-wise product with `rhs` into a new array of the same shape and
    /// order.
    pub fn combine(&self, rhs: &MultiDimArray<f64>) -> Result<MultiDimArray<f64>> {
        if self.shape != rhs.shape {
            return Err(ArrayError::ShapeMismatch {
                lhs: self.shape.clone(),
                rhs: rhs.shape.clone(),
            });
        }
        if self.order != rhs.order {
            return Err(ArrayError::OrderMismatch {
                lhs: self.order,
                rhs: rhs.order,
            });
        }

        let mut result = MultiDimArray::new(&self.shape)?;
        result.set_order(self.order);
        multiply_buffers(&self.data, &rhs.data, &mut result.data);
        Ok(result)
    }
}

impl<T: Copy + Default, const N: usize> Index<[usize; N]> for MultiDimArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        match self.offset_of(&indices) {
            Ok(offset) if offset < self.data.len() => &self.data[offset],
            Ok(_) => panic!("{}", ArrayError::EmptyArray),
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Copy + Default, const N: usize> IndexMut<[usize; N]> for MultiDimArray<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        match self.offset_of(&indices) {
            Ok(offset) if offset < self.data.len() => &mut self.data[offset],
            Ok(_) => panic!("{}", ArrayError::EmptyArray),
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T> IntoIterator for &'a MultiDimArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
