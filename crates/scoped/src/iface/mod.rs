//! Reference-counted interface guards
//!
//! Guards over interface objects whose lifetime is governed by their own
//! reference count. The guard holds exactly one counted reference and
//! releases exactly that reference on drop; the object itself decides when
//! it dies.

pub mod guard;
pub mod runtime;

pub use guard::{CreateError, InterfaceGuard, QueryGuard};
pub use runtime::{ClassId, Interface, InterfaceRuntime, Query};
