use std::sync::Arc;

use accessor::Patchable;
use executor::{PatchError, Patcher};
use parking_lot::{RwLock, RwLockReadGuard};
use patch_op::PatchOperation;

/// A value shared between threads that is patched under a write lock.
///
/// Readers never observe a half-applied patch: each call to [`SharedTarget::patch`] holds the
/// lock for the whole operation list. Operations that succeeded before a failure still
/// remain applied, as with [`Patcher::apply`].
#[derive(Debug)]
pub struct SharedTarget<T> {
    value: Arc<RwLock<T>>,
    patcher: Patcher,
}

impl<T> Clone for SharedTarget<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            patcher: self.patcher.clone(),
        }
    }
}

impl<T: Patchable> SharedTarget<T> {
    pub fn new(value: T) -> Self {
        Self::with_patcher(value, Patcher::default())
    }

    pub fn with_patcher(value: T, patcher: Patcher) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            patcher,
        }
    }

    pub fn patch(
        &self,
        ops: impl IntoIterator<Item = PatchOperation>,
    ) -> Result<(), PatchError> {
        let mut value = self.value.write();
        let res = self.patcher.apply(ops, &mut *value);
        if let Err(err) = &res {
            tracing::debug!(error = %err, "shared patch failed");
        }
        res
    }

    /// Like [`SharedTarget::patch`], but leaves the value untouched unless every
    /// operation succeeds.
    pub fn patch_atomic(
        &self,
        ops: impl IntoIterator<Item = PatchOperation>,
    ) -> Result<(), PatchError>
    where
        T: Clone,
    {
        let mut value = self.value.write();
        self.patcher.apply_atomic(ops, &mut *value)
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.value.read()
    }

    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.value.read().clone()
    }

    pub fn into_inner(self) -> Result<T, Self> {
        let patcher = self.patcher;
        Arc::try_unwrap(self.value)
            .map(RwLock::into_inner)
            .map_err(|value| Self { value, patcher })
    }
}
