use std::sync::{Arc, RwLock};

/// Handle to the record shared by every task of one run.
///
/// Access goes through closures so a lock is never held across an `.await`.
pub struct SharedContext<C> {
  inner: Arc<RwLock<C>>,
}

impl<C> SharedContext<C> {
  pub fn new(value: C) -> Self {
    Self {
      inner: Arc::new(RwLock::new(value)),
    }
  }

  /// Read from the context.
  pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
    let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
    f(&guard)
  }

  /// Mutate the context.
  pub fn update<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
    let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
  }

  /// Clone the current value out of the context.
  pub fn snapshot(&self) -> C
  where
    C: Clone,
  {
    self.read(C::clone)
  }
}

impl<C> Clone for SharedContext<C> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<C: Default> Default for SharedContext<C> {
  fn default() -> Self {
    Self::new(C::default())
  }
}

impl<C: std::fmt::Debug> std::fmt::Debug for SharedContext<C> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.read(|value| f.debug_tuple("SharedContext").field(value).finish())
  }
}
