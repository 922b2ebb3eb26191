use std::time::Duration;

/// Turns toolkit frame timestamps (monotonic microseconds) into time since the first frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    origin_us: Option<i64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&mut self, frame_time_us: i64) -> Duration {
        let origin = *self.origin_us.get_or_insert(frame_time_us);
        Duration::from_micros(frame_time_us.saturating_sub(origin).max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_time_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(5_000_000), Duration::ZERO);
        assert_eq!(clock.elapsed(5_016_667), Duration::from_micros(16_667));
    }

    #[test]
    fn test_never_runs_backwards_past_origin() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(1_000), Duration::ZERO);
        assert_eq!(clock.elapsed(500), Duration::ZERO);
        assert_eq!(clock.elapsed(2_001_000), Duration::from_secs(2));
    }
}
