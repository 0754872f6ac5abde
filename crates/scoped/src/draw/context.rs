//! Device-context guard and the paired select guard
//!
//! `ScopedContext` owns a drawing context; `ScopedSelect` installs a
//! drawing object into such a context and restores the previous selection
//! when its scope ends. The select guard borrows the context guard, so a
//! selection can never outlive its context.

use crate::draw::system::{ContextHandle, DrawSystem, ObjectHandle};

/// Scope-bound owner of a drawing context.
pub struct ScopedContext<'s, S: DrawSystem> {
    system: &'s S,
    context: ContextHandle,
}

impl<'s, S: DrawSystem> ScopedContext<'s, S> {
    /// Take ownership of `context`.
    pub fn new(system: &'s S, context: ContextHandle) -> Self {
        Self { system, context }
    }

    /// Non-owning view of the context handle.
    pub fn get(&self) -> ContextHandle {
        self.context
    }
}

impl<S: DrawSystem> Drop for ScopedContext<'_, S> {
    fn drop(&mut self) {
        self.system.destroy_context(self.context);
    }
}

/// Installs a drawing object into a context for the guard's scope.
///
/// Construction selects `object` and remembers whatever was selected
/// before; destruction reinstalls that previous selection. The guard never
/// owns or destroys the drawing object itself — it only restores the
/// context's prior state.
pub struct ScopedSelect<'c, 's, S: DrawSystem> {
    context: &'c ScopedContext<'s, S>,
    previous: ObjectHandle,
}

impl<'c, 's, S: DrawSystem> ScopedSelect<'c, 's, S> {
    /// Select `object` into `context`, remembering the previous selection.
    pub fn new(context: &'c ScopedContext<'s, S>, object: ObjectHandle) -> Self {
        let previous = context.system.select(context.context, object);
        Self { context, previous }
    }

    /// The object that was selected before this guard took over.
    pub fn previous(&self) -> ObjectHandle {
        self.previous
    }
}

impl<S: DrawSystem> Drop for ScopedSelect<'_, '_, S> {
    fn drop(&mut self) {
        self.context
            .system
            .select(self.context.context, self.previous);
    }
}
