//! Frame pacing.
//!
//! [`FramePacer`] decides when the next frame is due. In [`FramePacing::Fixed`] mode the full
//! delay is waited after each frame's work, so frames drift later as render time grows. In
//! [`FramePacing::Adaptive`] mode the delay is measured from the start of the frame on the
//! monotonic clock, so work time is subtracted from the wait.

use crate::config::FramePacing;
use std::time::{Duration, Instant};

/// Tracks the deadline of the next frame.
#[derive(Debug, Clone)]
pub struct FramePacer {
    delay: Duration,
    pacing: FramePacing,
    next_frame: Instant,
}

impl FramePacer {
    /// Creates a pacer whose first frame is due at `now`.
    pub fn new(delay: Duration, pacing: FramePacing, now: Instant) -> Self {
        Self {
            delay,
            pacing,
            next_frame: now,
        }
    }

    /// Whether a frame should be drawn at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Instant the next frame is due.
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// Schedules the next frame after a frame that ran from `started` to `finished`.
    pub fn frame_done(&mut self, started: Instant, finished: Instant) {
        self.next_frame = match self.pacing {
            FramePacing::Fixed => finished + self.delay,
            FramePacing::Adaptive => (started + self.delay).max(finished),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_is_due_immediately() {
        let now = Instant::now();
        let pacer = FramePacer::new(DELAY, FramePacing::Fixed, now);
        assert!(pacer.is_due(now));
    }

    #[test]
    fn test_fixed_pacing_adds_work_time() {
        let start = Instant::now();
        let end = start + Duration::from_millis(5);
        let mut pacer = FramePacer::new(DELAY, FramePacing::Fixed, start);
        pacer.frame_done(start, end);

        assert_eq!(pacer.deadline(), start + Duration::from_millis(21));
        assert!(!pacer.is_due(start + Duration::from_millis(16)));
    }

    #[test]
    fn test_adaptive_pacing_subtracts_work_time() {
        let start = Instant::now();
        let end = start + Duration::from_millis(5);
        let mut pacer = FramePacer::new(DELAY, FramePacing::Adaptive, start);
        pacer.frame_done(start, end);

        assert_eq!(pacer.deadline(), start + DELAY);
        assert!(pacer.is_due(start + DELAY));
    }

    #[test]
    fn test_adaptive_overrun_is_due_right_away() {
        let start = Instant::now();
        let end = start + Duration::from_millis(40);
        let mut pacer = FramePacer::new(DELAY, FramePacing::Adaptive, start);
        pacer.frame_done(start, end);

        assert_eq!(pacer.deadline(), end);
    }
}
