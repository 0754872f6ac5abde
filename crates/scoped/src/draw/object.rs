//! Graphics-object guard

use crate::draw::system::{DrawSystem, ObjectHandle};

/// Scope-bound owner of a drawing object.
///
/// Dropping the guard destroys the object through the subsystem's generic
/// destroy operation, without a validity check — tolerating
/// [`ObjectHandle::NULL`] is part of the [`DrawSystem`] contract.
pub struct ScopedDrawObject<'s, S: DrawSystem> {
    system: &'s S,
    object: ObjectHandle,
}

impl<'s, S: DrawSystem> ScopedDrawObject<'s, S> {
    /// Take ownership of `object`.
    pub fn new(system: &'s S, object: ObjectHandle) -> Self {
        Self { system, object }
    }

    /// Non-owning view of the handle. The caller must not destroy it.
    pub fn get(&self) -> ObjectHandle {
        self.object
    }
}

impl<S: DrawSystem> Drop for ScopedDrawObject<'_, S> {
    fn drop(&mut self) {
        self.system.destroy_object(self.object);
    }
}
