//! Drawing subsystem seam
//!
//! The trait and handle types the drawing guards operate through. The
//! subsystem must already be initialized (see [`crate::runtime`]) before any
//! handle it minted is wrapped in a guard; the guards borrow the subsystem,
//! so it necessarily outlives them.

use std::fmt;

/// Handle to a drawing object (font, pen, brush and the like).
///
/// A non-pointer handle: plain value, compared against
/// [`ObjectHandle::NULL`] rather than a null pointer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub usize);

impl ObjectHandle {
    /// The "no object" handle.
    pub const NULL: ObjectHandle = ObjectHandle(0);
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NULL {
            f.write_str("ObjectHandle::NULL")
        } else {
            write!(f, "ObjectHandle({:#x})", self.0)
        }
    }
}

/// Handle to a drawing context.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContextHandle(pub usize);

/// The drawing subsystem the guards release handles against.
pub trait DrawSystem {
    /// Destroy a drawing object. Must tolerate [`ObjectHandle::NULL`] as a
    /// no-op; the object guard destroys unconditionally.
    fn destroy_object(&self, object: ObjectHandle);

    /// Destroy a drawing context.
    fn destroy_context(&self, context: ContextHandle);

    /// Install `object` as `context`'s active selection, returning the
    /// previously selected object.
    fn select(&self, context: ContextHandle, object: ObjectHandle) -> ObjectHandle;
}
