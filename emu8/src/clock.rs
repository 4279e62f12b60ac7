use std::time::Duration;

/// Turns elapsed wall-clock time into a whole number of ticks at a fixed frequency,
/// carrying the remainder forward so no time is lost between calls.
pub struct Clock {
    period: Duration,
    accumulated: Duration,
}

impl Clock {
    pub fn new(hz: u32) -> Self {
        Clock {
            period: Duration::from_secs(1) / hz.max(1),
            accumulated: Duration::from_secs(0),
        }
    }

    /// How many ticks are due after `elapsed` more time has passed
    pub fn ticks(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            ticks += 1;
        }
        ticks
    }

    /// Drops any time that hasn't turned into a tick yet
    pub fn reset(&mut self) {
        self.accumulated = Duration::from_secs(0);
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_over_one_second() {
        let mut clock = Clock::new(60);
        let ticks: u32 = (0..1000)
            .map(|_| clock.ticks(Duration::from_millis(1)))
            .sum();
        assert_eq!(ticks, 60);
    }

    #[test]
    fn test_carries_remainder() {
        let mut clock = Clock::new(10);
        assert_eq!(clock.ticks(Duration::from_millis(150)), 1);
        assert_eq!(clock.ticks(Duration::from_millis(50)), 1);
        assert_eq!(clock.ticks(Duration::from_millis(99)), 0);
    }

    #[test]
    fn test_long_stall_catches_up() {
        let mut clock = Clock::new(500);
        assert_eq!(clock.ticks(Duration::from_secs(2)), 1000);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::new(10);
        clock.ticks(Duration::from_millis(99));
        clock.reset();
        assert_eq!(clock.ticks(Duration::from_millis(99)), 0);
        assert_eq!(clock.period(), Duration::from_millis(100));
    }
}
