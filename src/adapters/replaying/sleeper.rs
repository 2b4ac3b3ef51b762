//! Sleeper that returns immediately, so replays skip poll intervals.

use std::time::Duration;

use crate::ports::clock::{SleepFuture, Sleeper};

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        tracing::trace!(?duration, "skipping sleep during replay");
        Box::pin(std::future::ready(()))
    }
}
