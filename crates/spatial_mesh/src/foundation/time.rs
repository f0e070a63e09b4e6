//! Tick timing utilities

use crate::sensing::Timestamp;

/// Deterministic tick clock
///
/// Advances by a fixed step per tick and reports elapsed time as a sensing
/// [`Timestamp`] in milliseconds. Used by scripted sensing sources and hosts
/// that replay scans, where wall-clock time would make runs irreproducible.
#[derive(Debug, Clone)]
pub struct TickClock {
    step_seconds: f32,
    total_seconds: f64,
    tick_count: u64,
}

impl TickClock {
    /// Create a clock that advances `step_seconds` per tick
    pub fn new(step_seconds: f32) -> Self {
        Self {
            step_seconds,
            total_seconds: 0.0,
            tick_count: 0,
        }
    }

    /// Advance one tick and return the delta time in seconds
    pub fn tick(&mut self) -> f32 {
        self.total_seconds += f64::from(self.step_seconds);
        self.tick_count += 1;
        self.step_seconds
    }

    /// Get the time since the last tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.step_seconds
    }

    /// Get the number of ticks elapsed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Current time as a sensing timestamp (milliseconds)
    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.total_seconds * 1000.0)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        // 72 Hz, a common headset refresh rate
        Self::new(1.0 / 72.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = TickClock::new(0.5);
        let t0 = clock.now();
        clock.tick();
        let t1 = clock.now();
        clock.tick();
        let t2 = clock.now();

        assert!(t0 < t1 && t1 < t2);
        assert_eq!(clock.tick_count(), 2);
        assert_eq!(t2, Timestamp::from_millis(1000.0));
    }
}
