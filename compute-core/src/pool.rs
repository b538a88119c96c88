//! Memory pool selection.
//!
//! The binding layer never allocates through a pool itself. It only forwards
//! the caller's choice to the kernel engine.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A memory pool a dispatch call can allocate from.
pub trait MemoryPool: fmt::Debug + Send + Sync {
    /// Allocator backend name, e.g. `"system"`.
    fn backend_name(&self) -> &str;
    /// Bytes currently allocated.
    fn bytes_allocated(&self) -> usize;
    /// Peak bytes allocated.
    fn max_memory(&self) -> usize;
}

/// Pool backed by the global allocator, tracking usage with atomics.
#[derive(Debug, Default)]
pub struct SystemPool {
    allocated: AtomicUsize,
    peak: AtomicUsize,
}

impl SystemPool {
    /// A fresh pool with no recorded usage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an allocation of `bytes`.
    pub fn record_alloc(&self, bytes: usize) {
        let now = self.allocated.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.peak.fetch_max(now, Ordering::Relaxed);
    }

    /// Record a release of `bytes`.
    pub fn record_free(&self, bytes: usize) {
        // Saturate rather than wrap on unbalanced frees.
        let _ = self
            .allocated
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                Some(cur.saturating_sub(bytes))
            });
    }
}

impl MemoryPool for SystemPool {
    fn backend_name(&self) -> &str {
        "system"
    }

    fn bytes_allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    fn max_memory(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

static DEFAULT_POOL: OnceLock<SystemPool> = OnceLock::new();

/// The process-wide default pool, used when a call names none.
pub fn default_memory_pool() -> &'static SystemPool {
    DEFAULT_POOL.get_or_init(SystemPool::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_peak_usage() {
        let pool = SystemPool::new();
        pool.record_alloc(64);
        pool.record_alloc(32);
        pool.record_free(64);
        assert_eq!(pool.bytes_allocated(), 32);
        assert_eq!(pool.max_memory(), 96);
        pool.record_free(1000);
        assert_eq!(pool.bytes_allocated(), 0);
    }

    #[test]
    fn default_pool_is_shared() {
        let a: *const SystemPool = default_memory_pool();
        let b: *const SystemPool = default_memory_pool();
        assert_eq!(a, b);
    }
}
