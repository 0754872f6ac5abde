//! # Scoped
//!
//! Scope-bound resource guards: small wrapper types that tie the lifetime of
//! an externally owned resource (heap buffers, heap objects, OS handles,
//! reference-counted interface pointers, drawing objects and contexts,
//! process-wide subsystem activations) to the lifetime of a lexical scope,
//! releasing the resource exactly once no matter how the scope is left.
//!
//! ## Design
//!
//! The crate implements no resource of its own. Every resource-owning
//! subsystem (an allocator, a kernel handle table, an interface runtime, a
//! drawing subsystem, the global runtime start/stop APIs) appears here as a
//! trait; guards are generic over those traits and *borrow* the subsystem, so
//! the borrow checker proves that a subsystem outlives every guard minted
//! from it.
//!
//! Guards are never `Clone`: ownership of the underlying resource moves with
//! the guard value, and the explicit `detach`/`steal` operations hand the
//! resource back out, turning the guard's destructor into a no-op.
//!
//! ## Quick Start
//!
//! ```
//! use scoped::mem::ScopedStr;
//!
//! let mut title = ScopedStr::empty();
//! title.set_copy(Some("quarterly report"));
//! assert_eq!(title.as_str(), Some("quarterly report"));
//!
//! // Replacing the contents releases the previous buffer first.
//! title.set_copy(None);
//! assert!(title.as_str().is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod draw;
pub mod iface;
pub mod mem;
pub mod os;
pub mod runtime;
pub mod sync;


/// Common imports for guard users
pub mod prelude {
    pub use crate::{
        draw::{DrawSystem, ScopedContext, ScopedDrawObject, ScopedSelect},
        iface::{InterfaceGuard, QueryGuard},
        mem::{ScopedBuf, ScopedPtr, ScopedStr},
        os::{RawHandle, ScopedHandle},
        runtime::{Canvas2dToken, LinkingToken, ObjectModelToken},
        sync::ScopedLock,
    };
}
