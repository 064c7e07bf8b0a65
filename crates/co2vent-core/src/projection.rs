//! Linear projection toward the target concentration
//!
//! The projection is a single straight segment anchored at the latest reading and ending
//! at the target, extrapolated from the rate between the two most recent readings. It is
//! recomputed from scratch whenever the readings change; nothing is merged with earlier
//! projections.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReadingError;
use crate::reading::{Measurement, ProjectedPoint};
use crate::trend::{estimate_rate, RateEstimate};

/// Default target concentration (the upper bound of "Ideal")
pub const DEFAULT_TARGET_PPM: f64 = 550.0;

/// Falling trend that will reach the target in positive time
#[derive(Debug, Clone, Copy, PartialEq)]
struct Descent {
    /// ppm/minute, negative
    rate: f64,
    minutes_to_target: f64,
}

impl Descent {
    fn time_to_target(&self) -> TimeToTarget {
        TimeToTarget {
            minutes: self.minutes_to_target.round() as u32,
            rate_per_hour: -self.rate * 60.0,
        }
    }
}

/// Why the latest readings do or do not yield a projection
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionOutcome {
    /// Falling toward the target
    Projected(TimeToTarget),
    /// Fewer than two readings
    TooFewReadings,
    /// The two latest readings share an elapsed minute
    Degenerate(ReadingError),
    /// Flat or rising
    NotDecreasing,
    /// Falling, but already at or below the target
    AtOrBelowTarget,
}

fn descent(
    latest: &Measurement,
    previous: &Measurement,
    target: f64,
) -> Result<Descent, ProjectionOutcome> {
    let rate = match estimate_rate(previous, latest) {
        Ok(RateEstimate::Decreasing(rate)) => rate,
        Ok(RateEstimate::NotDecreasing) => return Err(ProjectionOutcome::NotDecreasing),
        Err(e) => {
            debug!("No projection: {e}");
            return Err(ProjectionOutcome::Degenerate(e));
        }
    };

    let minutes_to_target = (target - f64::from(latest.concentration_ppm())) / rate;
    if minutes_to_target <= 0.0 {
        return Err(ProjectionOutcome::AtOrBelowTarget);
    }

    Ok(Descent {
        rate,
        minutes_to_target,
    })
}

/// Classify the two most recent entries of a reading sequence
pub fn projection_outcome(measurements: &[Measurement], target: f64) -> ProjectionOutcome {
    match measurements {
        [.., previous, latest] => match descent(latest, previous, target) {
            Ok(d) => ProjectionOutcome::Projected(d.time_to_target()),
            Err(outcome) => outcome,
        },
        _ => ProjectionOutcome::TooFewReadings,
    }
}

/// Build the projected segment from `latest` to `target`
///
/// Returns an empty vector when the level is flat or rising, when both readings share an
/// elapsed minute, or when the target has already been reached.
pub fn build_projection(
    latest: &Measurement,
    previous: &Measurement,
    target: f64,
) -> Vec<ProjectedPoint> {
    let Ok(d) = descent(latest, previous, target) else {
        return Vec::new();
    };

    let end_minute = f64::from(latest.elapsed_minutes()) + d.minutes_to_target;
    debug!(
        rate = d.rate,
        end_minute,
        "Projected {} ppm reached at minute {}",
        target,
        end_minute.round()
    );

    vec![
        ProjectedPoint::from(latest),
        ProjectedPoint::new(end_minute.round(), target),
    ]
}

/// Projection from the two most recent entries of a reading sequence
pub fn project_latest(measurements: &[Measurement], target: f64) -> Vec<ProjectedPoint> {
    match measurements {
        [.., previous, latest] => build_projection(latest, previous, target),
        _ => Vec::new(),
    }
}

/// Remaining time and current ventilation speed, for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeToTarget {
    /// Whole minutes until the target is reached at the current rate
    pub minutes: u32,
    /// Concentration drop per hour (positive while falling)
    pub rate_per_hour: f64,
}

/// Time until `latest` falls to `target`, if it is above target and falling
pub fn estimate_time_to_target(
    latest: &Measurement,
    previous: &Measurement,
    target: f64,
) -> Option<TimeToTarget> {
    if f64::from(latest.concentration_ppm()) <= target {
        return None;
    }

    descent(latest, previous, target)
        .ok()
        .map(|d| d.time_to_target())
}

/// [`estimate_time_to_target`] over the two most recent entries of a reading sequence
pub fn time_to_target(measurements: &[Measurement], target: f64) -> Option<TimeToTarget> {
    match measurements {
        [.., previous, latest] => estimate_time_to_target(latest, previous, target),
        _ => None,
    }
}
