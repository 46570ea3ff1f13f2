#![cfg_attr(feature = "simd", feature(portable_simd))]

pub mod array;
pub mod ffi;
pub mod ops;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use array::{ArrayDescriptor, ArrayError, MemoryOrder, MultiDimArray};
pub use ops::elementwise::{multiply, multiply_buffers};
