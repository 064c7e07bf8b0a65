use co2vent_core::demo::DemoSimulator;
use co2vent_core::error::ReadingError;
use co2vent_core::projection::ProjectionOutcome;
use co2vent_core::session::{ChartPoint, Session};
use co2vent_core::settings::Settings;
use co2vent_core::status::{AirQuality, StatusThresholds};
use co2vent_core::time::WallClock;
use pretty_assertions::assert_eq;

fn point(x: f64, y: f64) -> ChartPoint {
    ChartPoint { x, y }
}

#[test]
fn test_first_submission_is_origin() {
    let mut session = Session::default();
    let first = session.submit_reading("21:15", "1350").unwrap();
    assert_eq!(first.elapsed_minutes(), 0);
    assert!(session.projection().is_empty());
}

#[test]
fn test_chart_series_after_two_readings() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();

    let series = session.chart_series();
    assert_eq!(series.measured, vec![point(0.0, 1000.0), point(10.0, 800.0)]);
    assert_eq!(series.projected, vec![point(10.0, 800.0), point(23.0, 550.0)]);
}

#[test]
fn test_chart_series_is_idempotent() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();
    assert_eq!(session.chart_series(), session.chart_series());
}

#[test]
fn test_projection_uses_only_latest_pair() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();
    assert!(!session.projection().is_empty());

    // Rising again: the earlier projection is dropped, not merged
    session.submit_reading("10:15", "850").unwrap();
    assert!(session.projection().is_empty());
    assert!(session.time_to_target().is_none());

    session.submit_reading("10:20", "750").unwrap();
    let series = session.chart_series();
    assert_eq!(series.projected, vec![point(20.0, 750.0), point(30.0, 550.0)]);
}

#[test]
fn test_time_to_target() {
    let mut session = Session::default();
    assert!(session.time_to_target().is_none());

    session.submit_reading("10:00", "1000").unwrap();
    assert!(session.time_to_target().is_none());

    session.submit_reading("10:10", "800").unwrap();
    let ttt = session.time_to_target().unwrap();
    assert_eq!(ttt.minutes, 13);
    assert_eq!(ttt.rate_per_hour, 1200.0);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    let before = session.table_rows();

    assert_eq!(
        session.submit_reading("10:5", "900"),
        Err(ReadingError::InvalidFormat("10:5".to_string()))
    );
    assert_eq!(
        session.submit_reading("10:05", ""),
        Err(ReadingError::InvalidNumber(String::new()))
    );
    assert_eq!(
        session.submit_reading("10:05", "lots"),
        Err(ReadingError::InvalidNumber("lots".to_string()))
    );
    assert_eq!(session.table_rows(), before);
}

#[test]
fn test_same_minute_reading_is_kept_without_projection() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();
    session.submit_reading("10:10", "790").unwrap();

    assert_eq!(session.len(), 3);
    assert!(session.projection().is_empty());
}

#[test]
fn test_earlier_reading_is_kept_in_entry_order() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:20", "800").unwrap();
    let late = session.submit_reading("10:10", "700").unwrap();

    assert_eq!(late.elapsed_minutes(), 10);
    assert_eq!(session.len(), 3);
    let minutes: Vec<u32> = session.measurements().iter().map(|m| m.elapsed_minutes()).collect();
    assert_eq!(minutes, vec![0, 20, 10]);

    // (20, 800) -> (10, 700) reads as rising
    assert!(session.projection().is_empty());
    assert_eq!(session.projection_outcome(), ProjectionOutcome::NotDecreasing);
    assert_eq!(session.time_to_target(), None);
}

#[test]
fn test_projection_outcome_reasons() {
    let mut session = Session::default();
    assert_eq!(session.projection_outcome(), ProjectionOutcome::TooFewReadings);

    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();
    let ProjectionOutcome::Projected(ttt) = session.projection_outcome() else {
        panic!("expected a projection");
    };
    assert_eq!(Some(ttt), session.time_to_target());

    session.submit_reading("10:10", "700").unwrap();
    assert_eq!(
        session.projection_outcome(),
        ProjectionOutcome::Degenerate(ReadingError::DegenerateInterval { elapsed_minutes: 10 })
    );

    session.submit_reading("10:20", "500").unwrap();
    assert_eq!(session.projection_outcome(), ProjectionOutcome::AtOrBelowTarget);
}

#[test]
fn test_table_rows() {
    let mut session = Session::default();
    session.submit_reading("23:50", "1100").unwrap();
    session.submit_reading("00:10", "700").unwrap();

    let rows = session.table_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].wall_clock, WallClock::new(23, 50).unwrap());
    assert_eq!(rows[0].status_label, "Poor");
    assert_eq!(rows[1].elapsed_minutes, 20);
    assert_eq!(rows[1].concentration_ppm, 700);
    assert_eq!(rows[1].status, AirQuality::Good);
}

#[test]
fn test_reset_starts_new_origin() {
    let mut session = Session::default();
    session.submit_reading("10:00", "1000").unwrap();
    session.submit_reading("10:10", "800").unwrap();

    session.reset();
    let series = session.chart_series();
    assert!(series.measured.is_empty());
    assert!(series.projected.is_empty());

    let m = session.submit_reading("11:30", "900").unwrap();
    assert_eq!(m.elapsed_minutes(), 0);
}

#[test]
fn test_settings_drive_target_and_status() {
    let settings = Settings {
        target_ppm: 600.0,
        thresholds: StatusThresholds {
            ideal_max: 600.0,
            good_max: 900.0,
            concerning_max: 1200.0,
        },
        ..Default::default()
    };
    let mut session = Session::from_settings(&settings);
    session.submit_reading("09:00", "1400").unwrap();
    session.submit_reading("09:06", "1100").unwrap();

    assert_eq!(session.latest_status(), Some(AirQuality::Concerning));
    assert_eq!(session.chart_series().projected.last(), Some(&point(16.0, 600.0)));

    session.set_target_ppm(550.0);
    assert_eq!(session.chart_series().projected.last(), Some(&point(17.0, 550.0)));
}

#[test]
fn test_demo_readings_are_accepted() {
    let mut session = Session::default();
    let mut sim = DemoSimulator::with_seed(3, WallClock::new(23, 40).unwrap());
    let recorded = sim.fill(&mut session, 15).unwrap();

    assert_eq!(recorded.len(), 15);
    assert_eq!(session.measurements()[0].elapsed_minutes(), 0);
    assert!(session
        .measurements()
        .windows(2)
        .all(|w| w[0].elapsed_minutes() < w[1].elapsed_minutes()));
}
