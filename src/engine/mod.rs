// src/engine/mod.rs
// =============================================================================
// The bounded-concurrency execution engine.
//
// Submodules:
// - limiter: counting semaphore, at most N workers in flight
// - tally: the shared total, mutated under a lock
// - worker: fetch one URL, count the word, report, release
// - dispatch: reads lines, spawns workers, waits for all of them
//
// Only Engine is exported; everything else is wiring between the pieces.
// =============================================================================

mod dispatch;
mod limiter;
mod tally;
mod worker;

pub use dispatch::Engine;
