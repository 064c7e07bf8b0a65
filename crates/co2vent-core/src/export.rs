//! Session export
//!
//! Writes the readings table as CSV or a full session snapshot as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::projection::TimeToTarget;
use crate::reading::Measurement;
use crate::session::{ChartSeries, Session, TableRow};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated readings table
    Csv,
    /// Pretty-printed session snapshot
    Json,
}

impl ExportFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Everything a session currently shows, frozen at export time
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Identifier of the exported session
    pub session_id: Uuid,
    /// RFC 3339 export time
    pub exported_at: String,
    /// Target used for the projection
    pub target_ppm: f64,
    /// Readings, oldest first
    pub measurements: Vec<Measurement>,
    /// Measured and projected series
    pub chart: ChartSeries,
    /// Remaining time to target, if falling toward it
    pub time_to_target: Option<TimeToTarget>,
}

impl SessionSnapshot {
    /// Snapshot the current state of `session`
    pub fn capture(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            exported_at: Utc::now().to_rfc3339(),
            target_ppm: session.target_ppm(),
            measurements: session.measurements().to_vec(),
            chart: session.chart_series(),
            time_to_target: session.time_to_target(),
        }
    }
}

/// Write table rows to a CSV file
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[TableRow]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Time,Elapsed (min),CO2 (ppm),Status")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{}",
            row.wall_clock, row.elapsed_minutes, row.concentration_ppm, row.status_label
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a snapshot as pretty JSON
pub fn write_json<P: AsRef<Path>>(path: P, snapshot: &SessionSnapshot) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writeln!(writer)?;
    writer.flush()
}

/// Export `session` in the format implied by the extension of `path`
pub fn export_session<P: AsRef<Path>>(path: P, session: &Session) -> io::Result<ExportFormat> {
    let path = path.as_ref();
    let format = ExportFormat::from_extension(path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unsupported export extension: {}", path.display()),
        )
    })?;

    match format {
        ExportFormat::Csv => write_csv(path, &session.table_rows())?,
        ExportFormat::Json => write_json(path, &SessionSnapshot::capture(session))?,
    }
    Ok(format)
}
