// src/engine/limiter.rs
// =============================================================================
// Bounds how many workers run at the same time.
//
// A tokio Semaphore with a fixed number of permits. acquire() hands out an
// owned Slot; the slot gives its permit back when it is dropped, so a worker
// cannot forget to release it, whether it returns early on an error or
// unwinds from a panic.
// =============================================================================

use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone)]
pub struct Limiter {
    slots: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of the concurrency budget. Released on drop.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl Limiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free.
    ///
    /// Only fails if the semaphore was closed, which this crate never does.
    pub async fn acquire(&self) -> Result<Slot, AcquireError> {
        let permit = Arc::clone(&self.slots).acquire_owned().await?;
        Ok(Slot { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held by workers.
    pub fn in_use(&self) -> usize {
        self.capacity - self.slots.available_permits()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is RAII?
//    - "Resource Acquisition Is Initialization"
//    - A value owns a resource and gives it back in its Drop implementation
//    - OwnedSemaphorePermit returns its permit when dropped, so Slot does too
//
// 2. Why acquire_owned instead of acquire?
//    - acquire() returns a permit that borrows the semaphore
//    - A spawned task must be 'static, so it can't hold a borrow
//    - acquire_owned() works on Arc<Semaphore> and the permit keeps its own Arc
// -----------------------------------------------------------------------------
