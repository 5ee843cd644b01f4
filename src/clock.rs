//! # Simulation Clock
//!
//! [`SimulationClock`] tracks elapsed simulation time and whether the simulation is running.
//! [`FixedTimestep`] turns the irregular wall-clock gaps between redraws into a whole number of
//! fixed-period ticks.

use web_time::Duration;

/// Elapsed simulation time plus a running/paused flag. Starts paused at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    time: f32,
    running: bool,
}

impl SimulationClock {
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Advances the clock by `dt` seconds. A paused clock does not move.
    pub fn advance(&mut self, dt: f32) {
        if self.running {
            self.time += dt;
        }
    }
}

/// Accumulates wall-clock time and releases it in fixed-period ticks.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    period: Duration,
    accumulated: Duration,
    max_ticks: u32,
}

impl FixedTimestep {
    /// Longest burst of catch-up ticks released by a single [`advance`](Self::advance).
    pub const DEFAULT_MAX_TICKS: u32 = 8;

    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            max_ticks: Self::DEFAULT_MAX_TICKS,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` and returns the number of whole ticks now due.
    ///
    /// After a long stall (window drag, breakpoint) the backlog beyond `max_ticks` is dropped
    /// instead of being replayed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut ticks = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            ticks += 1;
            if ticks == self.max_ticks {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_zero() {
        let clock = SimulationClock::default();
        assert!(!clock.is_running());
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut clock = SimulationClock::default();
        clock.advance(0.015);
        assert_eq!(clock.time(), 0.0);

        clock.toggle();
        clock.advance(0.015);
        clock.toggle();
        clock.advance(0.015);
        assert_eq!(clock.time(), 0.015);
    }

    #[test]
    fn reset_keeps_running_state() {
        let mut clock = SimulationClock::default();
        clock.toggle();
        clock.advance(1.25);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert!(clock.is_running());
    }

    #[test]
    fn timestep_carries_remainder() {
        let mut step = FixedTimestep::new(Duration::from_millis(15));
        assert_eq!(step.advance(Duration::from_millis(10)), 0);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
        assert_eq!(step.advance(Duration::from_millis(45)), 3);
    }

    #[test]
    fn timestep_drops_long_backlog() {
        let mut step = FixedTimestep::new(Duration::from_millis(15));
        assert_eq!(step.advance(Duration::from_secs(10)), FixedTimestep::DEFAULT_MAX_TICKS);
        assert_eq!(step.advance(Duration::from_millis(5)), 0);
    }

    #[test]
    fn zero_period_is_clamped() {
        let step = FixedTimestep::new(Duration::ZERO);
        assert_eq!(step.period(), Duration::from_millis(1));
    }
}
