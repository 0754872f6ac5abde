//! String-buffer guard
//!
//! `ScopedStr` specializes the buffer guard for UTF-8 text and adds
//! `set_copy`, the one operation in the crate that allocates as a side
//! effect of setting: it deep-copies the source into a fresh buffer instead
//! of aliasing it.

use std::ptr;
use std::slice;
use std::str;

use crate::mem::buffer::ScopedBuf;

/// Scope-bound owner of a heap-allocated UTF-8 string buffer.
///
/// Invariant: the owned buffer always holds the exact bytes of the `&str` it
/// was copied from, so the borrowed view is valid UTF-8 by construction.
pub struct ScopedStr {
    buf: ScopedBuf<u8>,
}

impl ScopedStr {
    /// An empty guard owning no buffer.
    pub const fn empty() -> Self {
        Self {
            buf: ScopedBuf::empty(),
        }
    }

    /// Allocate a fresh copy of `source` and own it.
    pub fn from_copy(source: &str) -> Self {
        let mut out = Self::empty();
        out.set_copy(Some(source));
        out
    }

    /// Release the current buffer, then deep-copy `source` into a fresh
    /// allocation. `None` (and a zero-length source) leaves the guard empty.
    pub fn set_copy(&mut self, source: Option<&str>) {
        // Assigning a fresh guard releases the previous buffer.
        self.buf = ScopedBuf::empty();
        let Some(text) = source else { return };
        if text.is_empty() {
            return;
        }
        let copy = ScopedBuf::alloc(text.len());
        unsafe { ptr::copy_nonoverlapping(text.as_ptr(), copy.as_ptr(), text.len()) };
        self.buf = copy;
    }

    /// Borrowed view of the owned text; `None` when the guard is empty.
    pub fn as_str(&self) -> Option<&str> {
        if self.buf.is_empty() {
            return None;
        }
        let bytes = unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.buf.len()) };
        // Copied verbatim from a &str, so the bytes are valid UTF-8.
        Some(unsafe { str::from_utf8_unchecked(bytes) })
    }

    /// Non-owning view of the underlying buffer.
    pub fn as_ptr(&self) -> *const u8 {
        self.buf.as_ptr()
    }

    /// True when the guard owns no buffer.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Transfer the buffer out of the guard; see [`ScopedBuf::steal`].
    pub fn steal(&mut self) -> (*mut u8, usize) {
        self.buf.steal()
    }
}

impl Default for ScopedStr {
    fn default() -> Self {
        Self::empty()
    }
}
