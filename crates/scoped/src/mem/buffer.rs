//! Generic buffer guard over a raw heap allocation
//!
//! `ScopedBuf<T>` owns a raw allocation of `len` elements and frees it
//! exactly once when the guard is dropped. The guard manages storage only:
//! it never runs element destructors and does no bounds checking, so it is
//! intended for plain-data element types filled in by the caller.
//!
//! The allocator is a trait seam ([`RawAllocator`]). Production code uses the
//! zero-sized [`GlobalAllocator`]; tests substitute a recording allocator to
//! observe release calls.

use std::alloc::{self, handle_alloc_error, Layout};
use std::mem;
use std::ptr;

/// Allocator seam used by [`ScopedBuf`].
///
/// Implementations must satisfy the usual pairing rule: a pointer passed to
/// [`deallocate`](RawAllocator::deallocate) was returned by
/// [`allocate`](RawAllocator::allocate) on the same allocator with the same
/// layout. Deallocating a null pointer must be a safe no-op.
pub trait RawAllocator {
    /// Allocate `layout` bytes, returning null on failure or for zero-size
    /// layouts.
    fn allocate(&self, layout: Layout) -> *mut u8;

    /// Release an allocation previously made with the same layout.
    ///
    /// # Safety
    /// `ptr` must be null or an allocation obtained from `allocate` on this
    /// allocator with `layout`, not released before.
    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);
}

/// The process global allocator, as a [`RawAllocator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalAllocator;

impl RawAllocator for GlobalAllocator {
    fn allocate(&self, layout: Layout) -> *mut u8 {
        if layout.size() == 0 {
            return ptr::null_mut();
        }
        unsafe { alloc::alloc(layout) }
    }

    unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
        if ptr.is_null() || layout.size() == 0 {
            return;
        }
        alloc::dealloc(ptr, layout);
    }
}

/// Scope-bound owner of a raw heap allocation of `len` elements of `T`.
///
/// At most one live guard owns a given allocation. Replacing the contents
/// with [`set`](ScopedBuf::set) frees the previous allocation first;
/// [`steal`](ScopedBuf::steal) transfers the allocation out and turns the
/// destructor into a no-op for it.
pub struct ScopedBuf<T, A: RawAllocator = GlobalAllocator> {
    ptr: *mut T,
    len: usize,
    alloc: A,
}

impl<T> ScopedBuf<T> {
    /// An empty guard owning nothing. Dropping it is a no-op.
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            alloc: GlobalAllocator,
        }
    }

    /// Allocate `len` elements of uninitialized storage from the global
    /// allocator and own the result. A zero `len` yields an empty guard.
    pub fn alloc(len: usize) -> Self {
        Self::alloc_in(len, GlobalAllocator)
    }

    /// Adopt an allocation made with the global allocator.
    ///
    /// # Safety
    /// `ptr` must be null, or an allocation of exactly `len` elements of `T`
    /// obtained from the global allocator and not owned elsewhere.
    pub unsafe fn from_raw(ptr: *mut T, len: usize) -> Self {
        Self::from_raw_in(ptr, len, GlobalAllocator)
    }
}

impl<T, A: RawAllocator> ScopedBuf<T, A> {
    /// An empty guard bound to a specific allocator.
    pub fn empty_in(alloc: A) -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            alloc,
        }
    }

    /// Allocate `len` elements of uninitialized storage from `alloc` and own
    /// the result.
    ///
    /// # Panics
    /// Panics if the total size overflows a `Layout`; aborts on allocation
    /// failure, matching global-allocator convention.
    pub fn alloc_in(len: usize, alloc: A) -> Self {
        if len == 0 || mem::size_of::<T>() == 0 {
            return Self::empty_in(alloc);
        }
        let layout = Layout::array::<T>(len).expect("buffer layout overflow");
        let ptr = alloc.allocate(layout).cast::<T>();
        if ptr.is_null() {
            handle_alloc_error(layout);
        }
        Self { ptr, len, alloc }
    }

    /// Adopt an allocation made with `alloc`.
    ///
    /// # Safety
    /// Same contract as [`ScopedBuf::from_raw`], against `alloc`.
    pub unsafe fn from_raw_in(ptr: *mut T, len: usize, alloc: A) -> Self {
        Self { ptr, len, alloc }
    }

    /// Release the current allocation, then take ownership of `ptr`.
    ///
    /// The old allocation is freed before the new one is adopted; the new
    /// one is never touched.
    ///
    /// # Safety
    /// Same contract as [`ScopedBuf::from_raw_in`].
    pub unsafe fn set(&mut self, ptr: *mut T, len: usize) {
        self.release();
        self.ptr = ptr;
        self.len = len;
    }

    /// Non-owning view of the allocation. The caller must not free it.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Number of elements the allocation was made for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the guard owns nothing.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_null()
    }

    /// Transfer the allocation out of the guard.
    ///
    /// The guard becomes empty and its destructor a no-op for the returned
    /// allocation; freeing it is now the caller's sole responsibility.
    pub fn steal(&mut self) -> (*mut T, usize) {
        let out = (self.ptr, self.len);
        self.ptr = ptr::null_mut();
        self.len = 0;
        out
    }

    fn release(&mut self) {
        let ptr = mem::replace(&mut self.ptr, ptr::null_mut());
        let len = mem::take(&mut self.len);
        if ptr.is_null() || len == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // The layout was validated when the allocation was made.
        if let Ok(layout) = Layout::array::<T>(len) {
            unsafe { self.alloc.deallocate(ptr.cast::<u8>(), layout) };
        }
    }
}

impl<T, A: RawAllocator> Drop for ScopedBuf<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
