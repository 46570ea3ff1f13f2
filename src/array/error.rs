use std::fmt;

use super::layout::MemoryOrder;

pub type Result<T> = std::result::Result<T, ArrayError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// A dimension of zero was supplied.
    InvalidDimension { axis: usize, size: usize },
    /// The element count overflows `usize` or the byte size exceeds
    /// `isize::MAX`.
    SizeOverflow,
    /// A buffer or reshape target does not hold the required element count.
    LengthMismatch { expected: usize, actual: usize },
    /// The number of indices differs from the array rank.
    RankMismatch { expected: usize, actual: usize },
    /// An index is not below the size of its dimension.
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        size: usize,
    },
    /// An axis number is not below the rank.
    AxisOutOfRange { axis: usize, rank: usize },
    /// `init_value` was called a second time.
    AlreadyInitialized,
    /// Element access on an array that holds no data.
    EmptyArray,
    /// Operands of `combine` differ in shape.
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },
    /// Operands of `combine` differ in memory order.
    OrderMismatch { lhs: MemoryOrder, rhs: MemoryOrder },
    /// A JSON descriptor could not be parsed or applied.
    Descriptor(String),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::InvalidDimension { axis, size } => write!(
                f,
                "dimension {} has size {}; all dimensions must be greater than 0",
                axis, size
            ),
            ArrayError::SizeOverflow => write!(f, "array size exceeds the addressable limit"),
            ArrayError::LengthMismatch { expected, actual } => write!(
                f,
                "shape describes {} elements but the data holds {}",
                expected, actual
            ),
            ArrayError::RankMismatch { expected, actual } => write!(
                f,
                "expected {} indices, got {}",
                expected, actual
            ),
            ArrayError::IndexOutOfBounds { axis, index, size } => write!(
                f,
                "index {} (value = {}) is out of bounds for dimension size {}",
                axis, index, size
            ),
            ArrayError::AxisOutOfRange { axis, rank } => {
                write!(f, "axis {} is out of range for rank {}", axis, rank)
            }
            ArrayError::AlreadyInitialized => write!(f, "the array has already been initialized"),
            ArrayError::EmptyArray => write!(f, "the array holds no data"),
            ArrayError::ShapeMismatch { lhs, rhs } => {
                write!(f, "shapes {:?} and {:?} differ", lhs, rhs)
            }
            ArrayError::OrderMismatch { lhs, rhs } => {
                write!(f, "memory orders {:?} and {:?} differ", lhs, rhs)
            }
            ArrayError::Descriptor(message) => write!(f, "invalid array descriptor: {}", message),
        }
    }
}

impl std::error::Error for ArrayError {}

impl From<serde_json::Error> for ArrayError {
    fn from(e: serde_json::Error) -> Self {
        ArrayError::Descriptor(e.to_string())
    }
}
