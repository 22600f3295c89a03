//! Generic versioned config store.
//!
//! `ConfigStore<T>` wraps `Arc<RwLock<T>>` so the server can swap the
//! configuration on SIGHUP while request handlers keep reading it. Each
//! update bumps a version counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, RwLockReadGuard};

/// A shared, versioned configuration store.
pub struct ConfigStore<T> {
    inner: Arc<ConfigStoreInner<T>>,
}

struct ConfigStoreInner<T> {
    data: RwLock<T>,
    version: AtomicU64,
}

impl<T> ConfigStore<T> {
    /// Create a new `ConfigStore` with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(ConfigStoreInner {
                data: RwLock::new(initial),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the stored value, returning the new version.
    pub async fn update(&self, value: T) -> u64 {
        let mut guard = self.inner.data.write().await;
        *guard = value;
        self.inner.version.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Read the current value.
    pub async fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.data.read().await
    }
}

impl<T: Clone> ConfigStore<T> {
    /// Clone the current value so no lock is held across I/O.
    pub async fn snapshot(&self) -> T {
        self.inner.data.read().await.clone()
    }
}

impl<T> Clone for ConfigStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_is_visible_through_clones() {
        let store = ConfigStore::new(1u32);

        let clone = store.clone();
        assert_eq!(clone.update(2).await, 1);
        assert_eq!(store.update(3).await, 2);
        assert_eq!(clone.update(2).await, 3);

        assert_eq!(*store.read().await, 2);
        assert_eq!(store.snapshot().await, 2);
    }
}
