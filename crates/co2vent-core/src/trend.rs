//! Two-point rate of change

use crate::error::ReadingError;
use crate::reading::Measurement;

/// Outcome of comparing two readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateEstimate {
    /// Concentration is falling at this many ppm per minute (always negative)
    Decreasing(f64),
    /// Flat or rising; nothing to project
    NotDecreasing,
}

/// Signed rate in ppm/minute from `a` to `b`
///
/// Fails with [`ReadingError::DegenerateInterval`] when both readings share an elapsed minute.
pub fn signed_rate(a: &Measurement, b: &Measurement) -> Result<f64, ReadingError> {
    let dt = f64::from(b.elapsed_minutes()) - f64::from(a.elapsed_minutes());
    if dt == 0.0 {
        return Err(ReadingError::DegenerateInterval {
            elapsed_minutes: b.elapsed_minutes(),
        });
    }
    let dc = f64::from(b.concentration_ppm()) - f64::from(a.concentration_ppm());
    Ok(dc / dt)
}

/// Estimate the rate from the earlier reading `a` to the later reading `b`
pub fn estimate_rate(a: &Measurement, b: &Measurement) -> Result<RateEstimate, ReadingError> {
    let rate = signed_rate(a, b)?;
    if rate >= 0.0 {
        Ok(RateEstimate::NotDecreasing)
    } else {
        Ok(RateEstimate::Decreasing(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::WallClock;

    fn m(elapsed: u32, ppm: u32) -> Measurement {
        Measurement::new(WallClock::from_minutes_since_midnight(elapsed), elapsed, ppm)
    }

    #[test]
    fn test_decreasing_rate() {
        assert_eq!(
            estimate_rate(&m(0, 1000), &m(10, 800)),
            Ok(RateEstimate::Decreasing(-20.0))
        );
    }

    #[test]
    fn test_flat_and_rising_are_not_decreasing() {
        assert_eq!(
            estimate_rate(&m(0, 900), &m(5, 950)),
            Ok(RateEstimate::NotDecreasing)
        );
        assert_eq!(
            estimate_rate(&m(0, 900), &m(5, 900)),
            Ok(RateEstimate::NotDecreasing)
        );
    }

    #[test]
    fn test_same_minute_is_degenerate() {
        assert_eq!(
            estimate_rate(&m(7, 900), &m(7, 850)),
            Err(ReadingError::DegenerateInterval { elapsed_minutes: 7 })
        );
    }
}
