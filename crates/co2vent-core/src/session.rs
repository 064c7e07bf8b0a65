//! Ventilation session
//!
//! Owns the ordered measurement sequence and the projection derived from it. Every
//! accepted reading runs validate -> normalize -> append -> recompute as one step; a
//! rejected reading leaves the session exactly as it was.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ReadingError;
use crate::projection::{
    project_latest, projection_outcome, time_to_target, ProjectionOutcome, TimeToTarget,
    DEFAULT_TARGET_PPM,
};
use crate::reading::{parse_concentration, Measurement, ProjectedPoint};
use crate::settings::Settings;
use crate::status::{AirQuality, StatusThresholds};
use crate::time::{elapsed_from_origin, WallClock};

/// A point handed to the chart consumer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Elapsed minutes
    pub x: f64,
    /// Concentration in ppm
    pub y: f64,
}

impl From<&Measurement> for ChartPoint {
    fn from(m: &Measurement) -> Self {
        Self {
            x: f64::from(m.elapsed_minutes()),
            y: f64::from(m.concentration_ppm()),
        }
    }
}

impl From<&ProjectedPoint> for ChartPoint {
    fn from(p: &ProjectedPoint) -> Self {
        Self {
            x: p.elapsed_minutes,
            y: p.concentration_ppm,
        }
    }
}

/// Measured and projected series for charting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Logged readings in chronological order
    pub measured: Vec<ChartPoint>,
    /// Projected segment, empty when no projection applies
    pub projected: Vec<ChartPoint>,
}

/// One row of the readings table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Time of day the reading was taken
    pub wall_clock: WallClock,
    /// Minutes since the first reading
    pub elapsed_minutes: u32,
    /// Reading in ppm
    pub concentration_ppm: u32,
    /// Air quality tier of the reading
    pub status: AirQuality,
    /// Display label of `status`
    pub status_label: &'static str,
}

/// In-memory logging session
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    measurements: Vec<Measurement>,
    projection: Vec<ProjectedPoint>,
    target_ppm: f64,
    thresholds: StatusThresholds,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_PPM)
    }
}

impl Session {
    /// Create an empty session projecting toward `target_ppm`
    pub fn new(target_ppm: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            measurements: Vec::new(),
            projection: Vec::new(),
            target_ppm,
            thresholds: StatusThresholds::default(),
        }
    }

    /// Create an empty session using the target and thresholds from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            thresholds: settings.thresholds,
            ..Self::new(settings.target_ppm)
        }
    }

    /// Identifier of the current session, renewed on reset
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Concentration the projection aims for
    pub fn target_ppm(&self) -> f64 {
        self.target_ppm
    }

    /// Tier bounds used for status labels
    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    /// Change the target and recompute the projection
    pub fn set_target_ppm(&mut self, target_ppm: f64) {
        self.target_ppm = target_ppm;
        self.recompute();
    }

    /// Validate and append a reading entered as text
    ///
    /// Both fields are validated before anything is changed.
    pub fn submit_reading(
        &mut self,
        wall_clock: &str,
        concentration: &str,
    ) -> Result<Measurement, ReadingError> {
        let parsed = WallClock::parse(wall_clock)
            .and_then(|clock| parse_concentration(concentration).map(|ppm| (clock, ppm)));

        match parsed {
            Ok((clock, ppm)) => Ok(self.record(clock, ppm)),
            Err(e) => {
                warn!("Rejected reading ({wall_clock:?}, {concentration:?}): {e}");
                Err(e)
            }
        }
    }

    /// Append an already validated reading
    pub fn record(&mut self, wall_clock: WallClock, concentration_ppm: u32) -> Measurement {
        let elapsed = elapsed_from_origin(wall_clock, &self.measurements);

        if let Some(last) = self.measurements.last() {
            if elapsed < last.elapsed_minutes() {
                warn!(
                    "Reading at {} (minute {}) is earlier than the previous reading (minute {})",
                    wall_clock,
                    elapsed,
                    last.elapsed_minutes()
                );
            }
        }

        let measurement = Measurement::new(wall_clock, elapsed, concentration_ppm);
        self.measurements.push(measurement);
        debug!(
            "Recorded {} ppm at {} (minute {})",
            concentration_ppm, wall_clock, elapsed
        );

        self.recompute();
        measurement
    }

    fn recompute(&mut self) {
        self.projection = project_latest(&self.measurements, self.target_ppm);
    }

    /// Clear all readings; the next reading becomes a new time origin
    pub fn reset(&mut self) {
        info!(
            "Resetting session {} ({} readings)",
            self.id,
            self.measurements.len()
        );
        self.measurements.clear();
        self.projection.clear();
        self.id = Uuid::new_v4();
    }

    /// All readings, oldest first
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Current projected segment (empty when no projection applies)
    pub fn projection(&self) -> &[ProjectedPoint] {
        &self.projection
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&Measurement> {
        self.measurements.last()
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether no reading has been logged since creation or reset
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Tier of the latest reading
    pub fn latest_status(&self) -> Option<AirQuality> {
        self.latest()
            .map(|m| self.thresholds.classify(f64::from(m.concentration_ppm())))
    }

    /// Remaining time to the target at the current rate
    pub fn time_to_target(&self) -> Option<TimeToTarget> {
        time_to_target(&self.measurements, self.target_ppm)
    }

    /// Whether the latest readings give a projection, and why not if they don't
    pub fn projection_outcome(&self) -> ProjectionOutcome {
        projection_outcome(&self.measurements, self.target_ppm)
    }

    /// Series for the chart consumer
    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            measured: self.measurements.iter().map(ChartPoint::from).collect(),
            projected: self.projection.iter().map(ChartPoint::from).collect(),
        }
    }

    /// Rows for the readings table, in chronological order
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.measurements
            .iter()
            .map(|m| {
                let status = self.thresholds.classify(f64::from(m.concentration_ppm()));
                TableRow {
                    wall_clock: m.wall_clock(),
                    elapsed_minutes: m.elapsed_minutes(),
                    concentration_ppm: m.concentration_ppm(),
                    status,
                    status_label: status.label(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_basic() {
        let mut session = Session::default();
        assert!(session.is_empty());

        session.submit_reading("10:00", "1000").unwrap();
        session.submit_reading("10:10", "800").unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.projection().len(), 2);
        assert_eq!(session.latest_status(), Some(AirQuality::Good));
    }

    #[test]
    fn test_rejected_reading_keeps_state() {
        let mut session = Session::default();
        session.submit_reading("10:00", "1000").unwrap();
        let before = session.chart_series();

        assert!(session.submit_reading("10:5", "900").is_err());
        assert!(session.submit_reading("10:05", "n/a").is_err());
        assert_eq!(session.chart_series(), before);
    }

    #[test]
    fn test_reset_renews_id() {
        let mut session = Session::default();
        let id = session.id();
        session.submit_reading("08:00", "900").unwrap();
        session.reset();
        assert_ne!(session.id(), id);
        assert!(session.is_empty());
    }
}
