mod descriptor;
mod error;
mod layout;
mod multi_dim;

pub use descriptor::ArrayDescriptor;
pub use error::{ArrayError, Result};
pub use layout::{compute_strides, element_count, MemoryOrder};
pub use multi_dim::MultiDimArray;
