//! Demo Mode - Simulated ventilation session
//!
//! Generates plausible manual readings for trying out the tracker without a CO2 meter.
//! Simulates a stuffy room being aired: the level decays exponentially toward the outdoor
//! baseline with a little meter noise, sampled every few minutes.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use thiserror::Error;

use crate::error::ReadingError;
use crate::reading::Measurement;
use crate::session::Session;
use crate::time::{WallClock, MINUTES_PER_DAY};

/// Typical outdoor CO2 level
const OUTDOOR_BASELINE_PPM: f64 = 420.0;

/// Errors while filling a session with simulated readings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    /// The next reading would be a full day or more after the first one
    #[error("Demo session would exceed 24 hours after {generated} readings")]
    SpanExceeded {
        /// Readings already added to the session
        generated: usize,
    },

    /// The session rejected a simulated reading
    #[error(transparent)]
    Reading(#[from] ReadingError),
}

/// Demo simulator producing (wall clock, ppm) readings
pub struct DemoSimulator {
    /// Minutes since midnight of the first reading
    start_minutes: u32,
    /// Minutes since midnight of the next reading, not wrapped
    clock_minutes: u32,
    /// Current true (noise-free) level
    level_ppm: f64,
    /// Air exchange rate, per minute
    decay_per_minute: f64,
    rng: StdRng,
}

impl Default for DemoSimulator {
    fn default() -> Self {
        Self::from_rng(StdRng::from_entropy(), WallClock::from_minutes_since_midnight(19 * 60))
    }
}

impl DemoSimulator {
    /// Create a simulator starting at `start`
    pub fn new(start: WallClock) -> Self {
        Self::from_rng(StdRng::from_entropy(), start)
    }

    /// Deterministic simulator for reproducible runs
    pub fn with_seed(seed: u64, start: WallClock) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), start)
    }

    fn from_rng(mut rng: StdRng, start: WallClock) -> Self {
        let level_ppm = rng.gen_range(1000.0..1600.0);
        let decay_per_minute = rng.gen_range(0.02..0.06);
        let start_minutes = start.minutes_since_midnight();
        Self {
            start_minutes,
            clock_minutes: start_minutes,
            level_ppm,
            decay_per_minute,
            rng,
        }
    }

    /// Next reading; the clock wraps past midnight
    pub fn next_reading(&mut self) -> (WallClock, u32) {
        let clock = WallClock::from_minutes_since_midnight(self.clock_minutes);
        let noise: f64 = self.rng.gen_range(-10.0..10.0);
        let ppm = (self.level_ppm + noise).round().max(1.0) as u32;

        let step = self.rng.gen_range(2..=6);
        self.clock_minutes += step;
        let excess = self.level_ppm - OUTDOOR_BASELINE_PPM;
        self.level_ppm =
            OUTDOOR_BASELINE_PPM + excess * (-self.decay_per_minute * f64::from(step)).exp();

        (clock, ppm)
    }

    /// Minutes between the first reading and the next one
    pub fn span_minutes(&self) -> u32 {
        self.clock_minutes - self.start_minutes
    }

    /// Feed `count` readings into `session` through the text entry path
    ///
    /// Stops with [`DemoError::SpanExceeded`] before a reading that would land 24 hours or
    /// more after the first. Readings added before that point stay in the session.
    pub fn fill(
        &mut self,
        session: &mut Session,
        count: usize,
    ) -> Result<Vec<Measurement>, DemoError> {
        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            if self.span_minutes() >= MINUTES_PER_DAY {
                return Err(DemoError::SpanExceeded {
                    generated: added.len(),
                });
            }
            let (clock, ppm) = self.next_reading();
            added.push(session.submit_reading(&clock.to_string(), &ppm.to_string())?);
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_levels_fall() {
        let start = WallClock::new(20, 0).unwrap();
        let mut sim = DemoSimulator::with_seed(7, start);
        let readings: Vec<_> = (0..20).map(|_| sim.next_reading()).collect();

        assert_eq!(readings[0].0, start);
        let first = readings.first().unwrap().1;
        let last = readings.last().unwrap().1;
        assert!(last < first, "{last} should be below {first}");
        assert!(readings.iter().all(|(_, ppm)| *ppm > 0));
    }

    #[test]
    fn test_demo_is_reproducible() {
        let start = WallClock::new(8, 30).unwrap();
        let mut a = DemoSimulator::with_seed(42, start);
        let mut b = DemoSimulator::with_seed(42, start);
        for _ in 0..10 {
            assert_eq!(a.next_reading(), b.next_reading());
        }
    }

    fn elapsed(session: &Session) -> Vec<u32> {
        session.measurements().iter().map(|m| m.elapsed_minutes()).collect()
    }

    #[test]
    fn test_fill_stops_before_a_full_day() {
        let mut session = Session::default();
        let mut sim = DemoSimulator::with_seed(3, WallClock::new(19, 0).unwrap());

        let err = sim.fill(&mut session, 800).unwrap_err();
        let DemoError::SpanExceeded { generated } = &err else {
            panic!("expected SpanExceeded, got {err:?}");
        };

        let minutes = elapsed(&session);
        assert_eq!(minutes.len(), *generated);
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]), "{minutes:?}");
        assert!(*minutes.last().unwrap() < MINUTES_PER_DAY);
    }

    #[test]
    fn test_fill_within_a_day() {
        let mut session = Session::default();
        let mut sim = DemoSimulator::with_seed(11, WallClock::new(23, 30).unwrap());

        // At most 6 minutes per step keeps 200 readings inside 1200 minutes
        let added = sim.fill(&mut session, 200).unwrap();
        assert_eq!(added.len(), 200);

        let minutes = elapsed(&session);
        assert!(minutes.windows(2).all(|w| w[0] < w[1]), "{minutes:?}");
        assert_eq!(added[199].elapsed_minutes(), minutes[199]);
    }
}
