use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default frame period, roughly one 60 Hz rendering frame.
pub const FRAME_MS: u64 = 16;

/// Rendering-frame clock of the sampling loop.
///
/// The first frame fires one period after creation, never at the install instant.
/// Late frames are skipped rather than replayed in a burst.
#[derive(Debug)]
pub struct FrameClock {
    cadence: Interval,
    frame: u64,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut cadence = interval_at(Instant::now() + period, period);
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { cadence, frame: 0 }
    }

    /// Waits for the next frame and returns its 1-based number.
    pub async fn next_frame(&mut self) -> u64 {
        self.cadence.tick().await;
        self.frame += 1;
        self.frame
    }

    /// Frames delivered so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }
}
