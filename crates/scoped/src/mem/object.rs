//! Heap-object guard
//!
//! `ScopedPtr<T>` owns zero or one heap object and destroys it when the
//! guard is dropped. Reassignment destroys the previous object first;
//! `detach` hands ownership back out.

use std::ops::{Deref, DerefMut};

/// Scope-bound owner of a single heap object.
pub struct ScopedPtr<T> {
    obj: Option<Box<T>>,
}

impl<T> ScopedPtr<T> {
    /// An empty guard. Dropping it destroys nothing.
    pub const fn empty() -> Self {
        Self { obj: None }
    }

    /// Take ownership of an existing heap object.
    pub fn new(obj: Box<T>) -> Self {
        Self { obj: Some(obj) }
    }

    /// Destroy the currently owned object (if any), then own `obj`.
    pub fn set(&mut self, obj: Box<T>) {
        self.obj = Some(obj);
    }

    /// Transfer ownership out. The guard becomes empty and its destructor a
    /// no-op for the returned object.
    pub fn detach(&mut self) -> Option<Box<T>> {
        self.obj.take()
    }

    /// Non-owning access to the object.
    pub fn get(&self) -> Option<&T> {
        self.obj.as_deref()
    }

    /// Non-owning mutable access to the object.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.obj.as_deref_mut()
    }

    /// True when the guard owns nothing.
    pub fn is_empty(&self) -> bool {
        self.obj.is_none()
    }
}

impl<T> Default for ScopedPtr<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for ScopedPtr<T> {
    type Target = T;

    /// Pointer-like access to the owned object.
    ///
    /// # Panics
    /// Panics when the guard is empty; use [`get`](ScopedPtr::get) when
    /// emptiness is a possibility.
    fn deref(&self) -> &T {
        self.obj.as_deref().expect("dereferenced an empty ScopedPtr")
    }
}

impl<T> DerefMut for ScopedPtr<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.obj
            .as_deref_mut()
            .expect("dereferenced an empty ScopedPtr")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct DropProbe {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropProbe {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn probe(drops: &Rc<Cell<usize>>) -> Box<DropProbe> {
        Box::new(DropProbe {
            drops: Rc::clone(drops),
        })
    }

    #[test]
    fn drop_destroys_owned_object_once() {
        let drops = Rc::new(Cell::new(0));
        drop(ScopedPtr::new(probe(&drops)));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn empty_guard_drop_destroys_nothing() {
        let drops = Rc::new(Cell::new(0));
        let guard: ScopedPtr<DropProbe> = ScopedPtr::empty();
        drop(guard);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn set_destroys_previous_object_first() {
        let old_drops = Rc::new(Cell::new(0));
        let new_drops = Rc::new(Cell::new(0));

        let mut guard = ScopedPtr::new(probe(&old_drops));
        guard.set(probe(&new_drops));
        assert_eq!(old_drops.get(), 1);
        assert_eq!(new_drops.get(), 0);

        drop(guard);
        assert_eq!(old_drops.get(), 1);
        assert_eq!(new_drops.get(), 1);
    }

    #[test]
    fn detach_disarms_the_destructor() {
        let drops = Rc::new(Cell::new(0));
        let mut guard = ScopedPtr::new(probe(&drops));

        let stolen = guard.detach().expect("guard was populated");
        assert!(guard.is_empty());
        drop(guard);
        assert_eq!(drops.get(), 0);

        drop(stolen);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn deref_reaches_the_object() {
        let mut guard = ScopedPtr::new(Box::new(41));
        *guard += 1;
        assert_eq!(*guard, 42);
        assert_eq!(guard.get(), Some(&42));
    }
}
