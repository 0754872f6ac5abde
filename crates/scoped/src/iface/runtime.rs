//! Interface runtime seams
//!
//! The traits the interface guards call into: the counted-reference release
//! operation, class-keyed instantiation, and the capability query.

use std::fmt;
use std::ptr::NonNull;

/// Identity of an instantiable interface class, analogous to a 128-bit
/// class GUID.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub u128);

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({:#034x})", self.0)
    }
}

/// A reference-counted interface object.
///
/// Each owner holds one counted reference and gives it up through
/// [`release`](Interface::release); the object destroys itself when the
/// count reaches zero. The guards in this crate never increment the count —
/// every pointer handed to them must already be an owned reference.
pub trait Interface {
    /// Drop one counted reference.
    fn release(&self);
}

/// Class-keyed instantiation facility for interface objects of type `T`.
pub trait InterfaceRuntime<T: Interface> {
    /// Instantiate `class`, returning an already-owned reference, or `None`
    /// when instantiation fails.
    fn create_instance(&self, class: ClassId) -> Option<NonNull<T>>;
}

/// Capability query: asks an object whether it supports the related
/// interface `T`.
///
/// On success the implementation returns a NEW owned reference to `T`; the
/// queried object's own reference count is otherwise left untouched, so the
/// caller's ownership of the source is unaffected either way.
pub trait Query<T: Interface> {
    /// Perform the query; `None` when the capability is unsupported.
    fn query_interface(&self) -> Option<NonNull<T>>;
}
