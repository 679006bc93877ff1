//! Shared handles to live models.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::attributes::AttributeMap;
use crate::entity::Model;
use crate::store::{ObjectStore, StoreResult};

/// Shared, lockable reference to a live model.
///
/// The storage table and the code that created a model hold clones of the same
/// handle, so mutations made through one are visible through the other.
pub struct Handle<M: ?Sized>(Arc<RwLock<M>>);

/// Type-erased handle, as kept in the storage table.
pub type SharedModel = Handle<dyn Model>;

impl<M: Model> Handle<M> {
    pub fn new(model: M) -> Self {
        Self(Arc::new(RwLock::new(model)))
    }

    /// Clone this handle as a [`SharedModel`].
    pub fn erase(&self) -> SharedModel {
        let inner: Arc<RwLock<dyn Model>> = self.0.clone();
        Handle(inner)
    }
}

impl<M: Model + ?Sized> Handle<M> {
    pub fn read(&self) -> RwLockReadGuard<'_, M> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access. Release the guard before anything flushes the store.
    pub fn write(&self) -> RwLockWriteGuard<'_, M> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn key(&self) -> String {
        self.read().key()
    }

    pub fn to_dict(&self) -> AttributeMap {
        self.read().to_dict()
    }

    /// Set `updated_at` to now, then flush the whole store.
    ///
    /// ```compile_fail
    /// use hbnb_core::{BaseModel, Handle, ObjectStore};
    /// fn save_with_argument(model: &Handle<BaseModel>, store: &dyn ObjectStore) {
    ///     model.save(store, None::<()>).unwrap();
    /// }
    /// ```
    pub fn save(&self, store: &dyn ObjectStore) -> StoreResult<()> {
        self.write().base_mut().touch();
        store.flush()
    }

    /// True when both handles point at the same model.
    pub fn ptr_eq<N: ?Sized>(&self, other: &Handle<N>) -> bool {
        Arc::as_ptr(&self.0).cast::<()>() == Arc::as_ptr(&other.0).cast::<()>()
    }
}

impl SharedModel {
    /// Run `f` against the model if it is an `M`.
    pub fn inspect<M: Model, R>(&self, f: impl FnOnce(&M) -> R) -> Option<R> {
        let guard = self.read();
        guard.as_any().downcast_ref::<M>().map(f)
    }

    /// Run `f` against the model mutably if it is an `M`.
    pub fn update<M: Model, R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        let mut guard = self.write();
        guard.as_any_mut().downcast_mut::<M>().map(f)
    }
}

impl<M: ?Sized> Clone for Handle<M> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<M: Model + ?Sized> core::fmt::Debug for Handle<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Handle").field(&&*self.read()).finish()
    }
}
