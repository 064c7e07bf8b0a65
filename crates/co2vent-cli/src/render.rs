//! Terminal output

use std::io::{self, Write};

use serde::Serialize;

use co2vent_core::projection::{ProjectionOutcome, TimeToTarget};
use co2vent_core::session::{ChartSeries, Session, TableRow};
use co2vent_core::status::AirQuality;

#[derive(Serialize)]
struct JsonReport<'a> {
    target_ppm: f64,
    status: Option<AirQuality>,
    time_to_target: Option<TimeToTarget>,
    rows: &'a [TableRow],
    chart: ChartSeries,
}

/// Print the table and summary, or the JSON report when `json` is set
pub fn report<W: Write>(session: &Session, out: &mut W, json: bool) -> io::Result<()> {
    if json {
        return write_json(session, out);
    }
    write_table(&session.table_rows(), out)?;
    write_summary(session, out)
}

pub fn write_json<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let rows = session.table_rows();
    let report = JsonReport {
        target_ppm: session.target_ppm(),
        status: session.latest_status(),
        time_to_target: session.time_to_target(),
        rows: &rows,
        chart: session.chart_series(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

pub fn write_table<W: Write>(rows: &[TableRow], out: &mut W) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No readings yet.");
    }
    writeln!(out, "{:<6} {:>8} {:>8}  {}", "Time", "Minute", "ppm", "Status")?;
    for row in rows {
        writeln!(
            out,
            "{:<6} {:>8} {:>8}  {}",
            row.wall_clock.to_string(),
            row.elapsed_minutes,
            row.concentration_ppm,
            row.status_label
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    if let Some(status) = session.latest_status() {
        writeln!(out, "Status: {status}")?;
    }
    let target = session.target_ppm();
    match session.projection_outcome() {
        ProjectionOutcome::Projected(ttt) => writeln!(
            out,
            "{} ppm in ~{} min (falling {:.0} ppm/h)",
            target, ttt.minutes, ttt.rate_per_hour
        ),
        ProjectionOutcome::TooFewReadings => Ok(()),
        ProjectionOutcome::Degenerate(e) => writeln!(out, "No projection: {e}"),
        ProjectionOutcome::NotDecreasing => writeln!(out, "No projection: level is not falling"),
        ProjectionOutcome::AtOrBelowTarget => writeln!(out, "Target of {target} ppm reached"),
    }
}
