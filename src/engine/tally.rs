// src/engine/tally.rs
// =============================================================================
// The single shared total.
//
// Key functionality:
// - add(): the only way to change the total, serialized by a tokio Mutex so
//   workers finishing at the same moment never lose an update
// - finish(): the one and only read, done by the dispatcher after the barrier
//   has joined every worker. At that point no writer is left, so the Arc is
//   unwrapped and the value is taken without locking
// =============================================================================

use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct Tally {
    total: Mutex<u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, count: u64) {
        let mut total = self.total.lock().await;
        *total += count;
    }

    /// Final read once no writer can remain.
    pub fn into_total(self) -> u64 {
        self.total.into_inner()
    }

    /// Consumes the last handle. If a clone is unexpectedly still alive,
    /// falls back to a locked read instead of failing.
    pub async fn finish(shared: Arc<Self>) -> u64 {
        match Arc::try_unwrap(shared) {
            Ok(tally) => tally.into_total(),
            Err(shared) => {
                tracing::warn!("tally still shared after drain, reading under lock");
                let total = *shared.total.lock().await;
                total
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_adds_are_exact() {
        let tally = Arc::new(Tally::new());

        let mut handles = Vec::new();
        for i in 0..100u64 {
            let tally = Arc::clone(&tally);
            handles.push(tokio::spawn(async move {
                tally.add(i).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(Tally::finish(tally).await, (0..100).sum::<u64>());
    }

    #[tokio::test]
    async fn test_finish_with_live_clone() {
        let tally = Arc::new(Tally::new());
        tally.add(7).await;
        let _extra = Arc::clone(&tally);

        assert_eq!(Tally::finish(tally).await, 7);
    }
}
