//! Scoped scratch-buffer pool.
//!
//! Encode and decode need a transient buffer of `n` words. Buffers are
//! drawn from a [`MemoryPool`] through a [`MemoryPoolHandle`] and returned
//! automatically when the [`PoolBuffer`] guard drops, on every exit path
//! including errors. A handle can also be deliberately
//! [uninitialized](MemoryPoolHandle::uninitialized); operations that
//! receive one reject it instead of allocating.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::error::{Error, Result};

/// Freelist-backed pool of `u64` scratch buffers.
#[derive(Debug, Default)]
pub struct MemoryPool {
    free: Mutex<Vec<Vec<u64>>>,
}

impl MemoryPool {
    fn take(&self, len: usize) -> Vec<u64> {
        let mut buf = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();
        buf.clear();
        buf.resize(len, 0);
        buf
    }

    fn put(&self, buf: Vec<u64>) {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(buf);
    }

    /// Number of buffers currently parked in the freelist.
    pub fn free_count(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Cheap, cloneable reference to a [`MemoryPool`], or the distinguished
/// uninitialized handle.
#[derive(Clone, Debug)]
pub struct MemoryPoolHandle {
    pool: Option<Arc<MemoryPool>>,
}

impl MemoryPoolHandle {
    /// Handle to the process-wide shared pool.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<Arc<MemoryPool>> = OnceLock::new();
        Self {
            pool: Some(Arc::clone(GLOBAL.get_or_init(Default::default))),
        }
    }

    /// Handle to a fresh pool not shared with anyone else.
    pub fn new() -> Self {
        Self {
            pool: Some(Arc::new(MemoryPool::default())),
        }
    }

    /// The distinguished handle that points at no pool. Any operation
    /// asked to allocate through it fails with
    /// [`Error::InvalidArgument`].
    pub fn uninitialized() -> Self {
        Self { pool: None }
    }

    /// Whether this handle points at a pool.
    pub fn is_initialized(&self) -> bool {
        self.pool.is_some()
    }

    /// Borrow a zero-filled buffer of exactly `len` words.
    pub fn acquire(&self, len: usize) -> Result<PoolBuffer> {
        let pool = self
            .pool
            .as_ref()
            .ok_or(Error::InvalidArgument("memory pool handle is uninitialized"))?;
        Ok(PoolBuffer {
            data: pool.take(len),
            pool: Arc::clone(pool),
        })
    }

    /// The underlying pool, if initialized.
    pub fn pool(&self) -> Option<&Arc<MemoryPool>> {
        self.pool.as_ref()
    }
}

impl Default for MemoryPoolHandle {
    fn default() -> Self {
        Self::global()
    }
}

/// RAII guard over a pooled buffer; returns the storage to its pool on
/// drop.
#[derive(Debug)]
pub struct PoolBuffer {
    data: Vec<u64>,
    pool: Arc<MemoryPool>,
}

impl Deref for PoolBuffer {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.data
    }
}

impl DerefMut for PoolBuffer {
    fn deref_mut(&mut self) -> &mut [u64] {
        &mut self.data
    }
}

impl Drop for PoolBuffer {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_zeroed() {
        let handle = MemoryPoolHandle::new();
        {
            let mut buf = handle.acquire(16).unwrap();
            buf.iter_mut().for_each(|v| *v = 99);
        }
        // Reacquired storage must come back zeroed even when recycled.
        let buf = handle.acquire(16).unwrap();
        assert!(buf.iter().all(|&v| v == 0));
        assert_eq!(buf.len(), 16);
    }

    #[test]
    fn test_buffer_returns_to_pool_on_drop() {
        let handle = MemoryPoolHandle::new();
        let pool = Arc::clone(handle.pool().unwrap());
        assert_eq!(pool.free_count(), 0);
        {
            let _a = handle.acquire(8).unwrap();
            let _b = handle.acquire(8).unwrap();
            assert_eq!(pool.free_count(), 0);
        }
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_uninitialized_handle_rejected() {
        let handle = MemoryPoolHandle::uninitialized();
        assert!(!handle.is_initialized());
        assert!(matches!(
            handle.acquire(8),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_global_handle_is_shared() {
        let a = MemoryPoolHandle::global();
        let b = MemoryPoolHandle::global();
        assert!(Arc::ptr_eq(a.pool().unwrap(), b.pool().unwrap()));
        assert!(a.is_initialized());
    }
}
