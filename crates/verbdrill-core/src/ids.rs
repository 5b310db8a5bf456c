//! Identifier allocation for verb records.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Hands out identifiers for new verb records.
pub trait IdAllocator: Send + Sync {
    /// Produce an identifier not handed out before.
    fn allocate(&self) -> String;
}

/// UUID v4 allocator used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn allocate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic allocator for tests: `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequentialAllocator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialAllocator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdAllocator for SequentialAllocator {
    fn allocate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
