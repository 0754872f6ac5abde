//! Guards owning one counted interface reference
//!
//! [`InterfaceGuard`] is the direct owner: it adopts references that are
//! already owned and releases the one it holds on drop. [`QueryGuard`] adds
//! construction by capability query against an unrelated interface.

use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use thiserror::Error;

use crate::iface::runtime::{ClassId, Interface, InterfaceRuntime, Query};

/// Failure modes of [`InterfaceGuard::create`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateError {
    /// The guard already owns a reference. Creating into an occupied guard
    /// is a contract violation; debug builds assert on it.
    #[error("guard already owns an interface reference")]
    AlreadyOwned,

    /// The runtime refused to instantiate the class.
    #[error("interface instantiation failed")]
    InstantiationFailed,
}

/// Scope-bound owner of one counted reference to an interface object.
///
/// The guard never increments a reference count: every pointer that enters
/// through [`adopt`](InterfaceGuard::adopt) or [`set`](InterfaceGuard::set)
/// must already be an owned reference, handed over by the caller. Dropping
/// the guard releases the reference it owns; the object's own count decides
/// whether the object dies.
pub struct InterfaceGuard<T: Interface> {
    ptr: Option<NonNull<T>>,
}

impl<T: Interface> InterfaceGuard<T> {
    /// An empty guard. Dropping it releases nothing.
    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    /// Take ownership of an already-owned reference.
    ///
    /// # Safety
    /// `ptr` must be an owned counted reference to a live object, and must
    /// stay valid until this guard (or a later owner) releases it.
    pub unsafe fn adopt(ptr: NonNull<T>) -> Self {
        Self { ptr: Some(ptr) }
    }

    /// Release the currently owned reference (if any), then own `ptr`.
    ///
    /// The reference count is never incremented here; `None` simply empties
    /// the guard.
    ///
    /// # Safety
    /// Same contract as [`adopt`](InterfaceGuard::adopt) for a `Some` value.
    pub unsafe fn set(&mut self, ptr: Option<NonNull<T>>) {
        self.release_owned();
        self.ptr = ptr;
    }

    /// Instantiate `class` into an empty guard.
    ///
    /// Fails with [`CreateError::AlreadyOwned`] on an occupied guard without
    /// touching the existing reference (and asserts in debug builds, since
    /// that is a programmer error), or with
    /// [`CreateError::InstantiationFailed`] when the runtime refuses.
    pub fn create<R: InterfaceRuntime<T>>(
        &mut self,
        runtime: &R,
        class: ClassId,
    ) -> Result<(), CreateError> {
        debug_assert!(self.ptr.is_none(), "create on an occupied interface guard");
        if self.ptr.is_some() {
            log::warn!("create refused for {class:?}: guard already owns a reference");
            return Err(CreateError::AlreadyOwned);
        }
        match runtime.create_instance(class) {
            Some(ptr) => {
                self.ptr = Some(ptr);
                Ok(())
            }
            None => Err(CreateError::InstantiationFailed),
        }
    }

    /// Non-owning access to the interface.
    pub fn get(&self) -> Option<&T> {
        self.ptr.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// True when the guard owns nothing.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Transfer the owned reference out. The guard becomes empty and its
    /// destructor a no-op for the returned pointer.
    pub fn detach(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// The owned slot itself, for APIs that populate an out-parameter.
    ///
    /// Writing an owned reference over an already-populated slot leaks that
    /// reference; avoiding that is the caller's responsibility, exactly as
    /// with a raw out-parameter.
    pub fn slot(&mut self) -> &mut Option<NonNull<T>> {
        &mut self.ptr
    }

    fn release_owned(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            unsafe { ptr.as_ref() }.release();
        }
    }
}

impl<T: Interface> Default for InterfaceGuard<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interface> Drop for InterfaceGuard<T> {
    fn drop(&mut self) {
        self.release_owned();
    }
}

/// Interface guard constructible by capability query.
///
/// Behaves exactly like [`InterfaceGuard`] (it derefs to one) and adds
/// [`from_source`](QueryGuard::from_source): query a related capability on
/// an unrelated interface and own the resulting reference only on success.
pub struct QueryGuard<T: Interface> {
    inner: InterfaceGuard<T>,
}

impl<T: Interface> QueryGuard<T> {
    /// An empty guard.
    pub const fn empty() -> Self {
        Self {
            inner: InterfaceGuard::empty(),
        }
    }

    /// Query `source` for the capability `T`.
    ///
    /// On success the guard owns the fresh reference the query returned; on
    /// failure it stays empty. The source's own ownership is untouched
    /// either way.
    pub fn from_source<S: Query<T>>(source: &S) -> Self {
        match source.query_interface() {
            // The query contract hands over a new owned reference.
            Some(ptr) => Self {
                inner: unsafe { InterfaceGuard::adopt(ptr) },
            },
            None => Self::empty(),
        }
    }
}

impl<T: Interface> Default for QueryGuard<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interface> Deref for QueryGuard<T> {
    type Target = InterfaceGuard<T>;

    fn deref(&self) -> &InterfaceGuard<T> {
        &self.inner
    }
}

impl<T: Interface> DerefMut for QueryGuard<T> {
    fn deref_mut(&mut self) -> &mut InterfaceGuard<T> {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Interface object with an externally visible reference count. Tests
    /// keep the object on the stack and watch the count instead of letting
    /// it self-destruct.
    #[derive(Default)]
    struct MockObject {
        refs: Cell<isize>,
    }

    impl MockObject {
        fn with_refs(refs: isize) -> Self {
            Self {
                refs: Cell::new(refs),
            }
        }

        fn grant_ref(&self) -> NonNull<MockObject> {
            self.refs.set(self.refs.get() + 1);
            NonNull::from(self)
        }
    }

    impl Interface for MockObject {
        fn release(&self) {
            self.refs.set(self.refs.get() - 1);
        }
    }

    /// Runtime that instantiates "classes" by granting references to a
    /// pre-built object.
    struct MockRuntime<'a> {
        known_class: ClassId,
        object: &'a MockObject,
    }

    impl<'a> InterfaceRuntime<MockObject> for MockRuntime<'a> {
        fn create_instance(&self, class: ClassId) -> Option<NonNull<MockObject>> {
            (class == self.known_class).then(|| self.object.grant_ref())
        }
    }

    /// Source object whose capability query may or may not succeed.
    struct MockSource<'a> {
        refs: Cell<isize>,
        target: Option<&'a MockObject>,
    }

    impl<'a> Query<MockObject> for MockSource<'a> {
        fn query_interface(&self) -> Option<NonNull<MockObject>> {
            self.target.map(MockObject::grant_ref)
        }
    }

    const CLASS: ClassId = ClassId(0x5c09ed);

    #[test]
    fn drop_releases_the_adopted_reference_once() {
        let object = MockObject::with_refs(1);
        {
            let guard = unsafe { InterfaceGuard::adopt(NonNull::from(&object)) };
            assert!(!guard.is_empty());
            assert_eq!(object.refs.get(), 1);
        }
        assert_eq!(object.refs.get(), 0);
    }

    #[test]
    fn empty_guard_drop_releases_nothing() {
        let guard: InterfaceGuard<MockObject> = InterfaceGuard::empty();
        drop(guard);
    }

    #[test]
    fn set_releases_old_without_touching_new() {
        let old = MockObject::with_refs(1);
        let new = MockObject::with_refs(1);

        let mut guard = unsafe { InterfaceGuard::adopt(NonNull::from(&old)) };
        unsafe { guard.set(Some(NonNull::from(&new))) };
        assert_eq!(old.refs.get(), 0);
        assert_eq!(new.refs.get(), 1);

        drop(guard);
        assert_eq!(new.refs.get(), 0);
    }

    #[test]
    fn create_populates_an_empty_guard() {
        let object = MockObject::default();
        let runtime = MockRuntime {
            known_class: CLASS,
            object: &object,
        };

        let mut guard = InterfaceGuard::empty();
        guard.create(&runtime, CLASS).expect("class is known");
        assert!(!guard.is_empty());
        assert_eq!(object.refs.get(), 1);

        drop(guard);
        assert_eq!(object.refs.get(), 0);
    }

    #[test]
    fn create_reports_instantiation_failure_and_stays_empty() {
        let object = MockObject::default();
        let runtime = MockRuntime {
            known_class: CLASS,
            object: &object,
        };

        let mut guard = InterfaceGuard::empty();
        let result = guard.create(&runtime, ClassId(0xdead));
        assert_eq!(result, Err(CreateError::InstantiationFailed));
        assert!(guard.is_empty());
        assert_eq!(object.refs.get(), 0);
    }

    #[test]
    #[cfg_attr(
        debug_assertions,
        should_panic(expected = "create on an occupied interface guard")
    )]
    fn create_refuses_an_occupied_guard() {
        let owned = MockObject::with_refs(1);
        let other = MockObject::default();
        let runtime = MockRuntime {
            known_class: CLASS,
            object: &other,
        };

        let mut guard = unsafe { InterfaceGuard::adopt(NonNull::from(&owned)) };
        // Release builds refuse without altering the existing reference.
        let result = guard.create(&runtime, CLASS);
        assert_eq!(result, Err(CreateError::AlreadyOwned));
        assert_eq!(owned.refs.get(), 1);
        assert_eq!(other.refs.get(), 0);
        assert!(std::ptr::eq(
            guard.get().expect("still populated"),
            &owned
        ));
    }

    #[test]
    fn detach_disarms_the_destructor() {
        let object = MockObject::with_refs(1);
        let mut guard = unsafe { InterfaceGuard::adopt(NonNull::from(&object)) };

        let stolen = guard.detach().expect("guard was populated");
        assert!(guard.is_empty());
        drop(guard);
        assert_eq!(object.refs.get(), 1);

        unsafe { stolen.as_ref() }.release();
        assert_eq!(object.refs.get(), 0);
    }

    #[test]
    fn slot_accepts_an_out_parameter_write() {
        let object = MockObject::default();
        let mut guard: InterfaceGuard<MockObject> = InterfaceGuard::empty();

        // Simulate an API populating the guard through its out-slot.
        *guard.slot() = Some(object.grant_ref());
        assert!(!guard.is_empty());

        drop(guard);
        assert_eq!(object.refs.get(), 0);
    }

    #[test]
    fn query_success_owns_a_distinct_reference() {
        let target = MockObject::default();
        let source = MockSource {
            refs: Cell::new(1),
            target: Some(&target),
        };

        let guard = QueryGuard::from_source(&source);
        assert!(!guard.is_empty());
        // New reference on the target; the source's own count is untouched.
        assert_eq!(target.refs.get(), 1);
        assert_eq!(source.refs.get(), 1);

        drop(guard);
        assert_eq!(target.refs.get(), 0);
    }

    #[test]
    fn query_failure_leaves_the_guard_empty() {
        let source = MockSource {
            refs: Cell::new(1),
            target: None,
        };

        let guard: QueryGuard<MockObject> = QueryGuard::from_source(&source);
        assert!(guard.is_empty());
        assert_eq!(source.refs.get(), 1);
    }

    #[test]
    fn query_guard_supports_create_through_deref() {
        let object = MockObject::default();
        let runtime = MockRuntime {
            known_class: CLASS,
            object: &object,
        };

        let mut guard: QueryGuard<MockObject> = QueryGuard::empty();
        guard.create(&runtime, CLASS).expect("class is known");
        assert!(!guard.is_empty());

        drop(guard);
        assert_eq!(object.refs.get(), 0);
    }
}
