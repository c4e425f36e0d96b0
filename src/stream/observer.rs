//! Progress reporting for streaming operations.
//!
//! Callers inject an [`Observer`] into each operation instead of reaching
//! for shared global callbacks. Any `FnMut(f64)` closure is an observer;
//! types that also care about stage transitions implement [`Observer::stage`].

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{Processing, Stage};

pub trait Observer {
    /// Fraction of the input processed so far, in `0.0..=1.0`.
    fn progress(&mut self, fraction: f64);

    /// Called on every stage transition.
    fn stage(&mut self, _stage: Stage) {}
}

impl<F: FnMut(f64)> Observer for F {
    #[inline]
    fn progress(&mut self, fraction: f64) {
        self(fraction);
    }
}

/// Observer that ignores everything.
pub struct Silent;

impl Observer for Silent {
    #[inline]
    fn progress(&mut self, _fraction: f64) {}
}

/// Drives the stage machine of one operation and forwards it to an observer.
pub(crate) struct Tracker<O> {
    observer: O,
    stage: Stage,
    processing: Processing,
}

impl<O: Observer> Tracker<O> {
    pub(crate) fn new(observer: O, processing: Processing) -> Self {
        Self { observer, stage: Stage::Idle, processing }
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        debug!(operation = %self.processing, from = %self.stage, to = %stage, "stage transition");
        self.stage = stage;
        self.observer.stage(stage);
    }

    pub(crate) fn progress(&mut self, processed: u64, total: u64) {
        let fraction = if total == 0 { 1.0 } else { (processed as f64 / total as f64).clamp(0.0, 1.0) };
        self.observer.progress(fraction);
    }

    /// Moves to `Done` or `Failed` depending on `result`.
    pub(crate) fn finish<T>(mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.enter(Stage::Done),
            Err(e) => {
                warn!(operation = %self.processing, stage = %self.stage, error = %e, "operation failed");
                self.enter(Stage::Failed);
            }
        }
        result
    }
}
