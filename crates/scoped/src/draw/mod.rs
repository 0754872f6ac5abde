//! Drawing-subsystem guards
//!
//! Guards over the handles a 2-D drawing subsystem mints: drawing objects
//! (fonts, pens, brushes), drawing contexts, and the select-into-context
//! operation with restore-on-exit semantics.

pub mod context;
pub mod object;
pub mod system;

pub use context::{ScopedContext, ScopedSelect};
pub use object::ScopedDrawObject;
pub use system::{ContextHandle, DrawSystem, ObjectHandle};
