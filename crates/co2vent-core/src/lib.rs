//! # co2vent Core Library
//!
//! Core functionality for tracking CO2 levels while airing a room.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Strict "HH:MM" parsing and elapsed-time normalization across midnight
//! - Two-point rate of change between the latest readings
//! - Linear projection to a target concentration and time-to-target
//! - Air quality classification
//! - An in-memory session with chart and table outputs
//! - Settings, CSV/JSON export and a demo simulator
//!
//! ## Example
//!
//! ```rust
//! use co2vent_core::session::Session;
//!
//! let mut session = Session::default();
//! session.submit_reading("21:00", "1000").unwrap();
//! session.submit_reading("21:10", "800").unwrap();
//!
//! let series = session.chart_series();
//! assert_eq!(series.measured.len(), 2);
//! assert_eq!(series.projected.last().map(|p| p.x), Some(23.0));
//! ```

pub mod demo;
pub mod error;
pub mod export;
pub mod projection;
pub mod reading;
pub mod session;
pub mod settings;
pub mod status;
pub mod time;
pub mod trend;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::demo::{DemoError, DemoSimulator};
    pub use crate::error::ReadingError;
    pub use crate::export::{export_session, ExportFormat, SessionSnapshot};
    pub use crate::projection::{
        build_projection, estimate_time_to_target, ProjectionOutcome, TimeToTarget,
        DEFAULT_TARGET_PPM,
    };
    pub use crate::reading::{Measurement, ProjectedPoint};
    pub use crate::session::{ChartPoint, ChartSeries, Session, TableRow};
    pub use crate::settings::{Settings, SettingsError};
    pub use crate::status::{classify, AirQuality, StatusThresholds};
    pub use crate::time::{normalize, WallClock};
    pub use crate::trend::{estimate_rate, RateEstimate};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
