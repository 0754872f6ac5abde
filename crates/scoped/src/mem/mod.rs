//! Memory guards
//!
//! Guards over raw heap allocations and heap objects. These are the leaf
//! guards of the crate: they depend on nothing but an allocator.

pub mod buffer;
pub mod object;
pub mod string;

pub use buffer::{GlobalAllocator, RawAllocator, ScopedBuf};
pub use object::ScopedPtr;
pub use string::ScopedStr;
