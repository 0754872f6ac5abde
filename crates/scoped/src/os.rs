//! Kernel handle guard
//!
//! Wraps a handle minted by an OS handle table. Handle tables distinguish
//! two reserved values: the null handle and a separate "invalid" sentinel
//! that some APIs return instead of null. Both mean "no resource" and both
//! must be tolerated by the close operation.

use std::fmt;

/// A kernel object handle value.
///
/// Two reserved values never name a real resource: [`RawHandle::NULL`] and
/// the sentinel [`RawHandle::INVALID`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(pub usize);

impl RawHandle {
    /// The null handle.
    pub const NULL: RawHandle = RawHandle(0);

    /// The distinguished "invalid" sentinel some APIs return instead of
    /// null.
    pub const INVALID: RawHandle = RawHandle(usize::MAX);

    /// True when the value is neither null nor the invalid sentinel.
    pub const fn is_valid(self) -> bool {
        self.0 != Self::NULL.0 && self.0 != Self::INVALID.0
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NULL => f.write_str("RawHandle::NULL"),
            Self::INVALID => f.write_str("RawHandle::INVALID"),
            Self(value) => write!(f, "RawHandle({value:#x})"),
        }
    }
}

/// The OS handle table this crate closes handles against.
pub trait HandleTable {
    /// Close `handle`, releasing the kernel object's reference.
    ///
    /// Must be a no-op for [`RawHandle::NULL`] and [`RawHandle::INVALID`];
    /// the guard closes unconditionally and relies on this tolerance.
    fn close(&self, handle: RawHandle);
}

/// Scope-bound owner of a kernel handle.
///
/// The destructor always attempts the close, without checking validity
/// first; the sentinel tolerance is part of the [`HandleTable`] contract.
pub struct ScopedHandle<'t, S: HandleTable> {
    table: &'t S,
    handle: RawHandle,
}

impl<'t, S: HandleTable> ScopedHandle<'t, S> {
    /// Take ownership of `handle`, which may be null or the invalid
    /// sentinel.
    pub fn new(table: &'t S, handle: RawHandle) -> Self {
        Self { table, handle }
    }

    /// Non-owning view of the handle. The caller must not close it.
    pub fn get(&self) -> RawHandle {
        self.handle
    }

    /// True when the held value names a usable resource.
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }
}

impl<S: HandleTable> Drop for ScopedHandle<'_, S> {
    fn drop(&mut self) {
        log::trace!("closing {:?}", self.handle);
        self.table.close(self.handle);
    }
}
