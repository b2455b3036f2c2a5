//! Batch evaluation of game records
//!
//! The runner plays every record out under perfect play, keeps running
//! win/loss/draw counters and reports them as a [`BatchSummary`].

pub mod observers;
pub mod runner;
pub mod summary;

pub use observers::{GameObservation, JsonlObserver, ProgressObserver};
pub use runner::{BatchConfig, BatchRunner};
pub use summary::BatchSummary;

pub use crate::ports::Observer;
