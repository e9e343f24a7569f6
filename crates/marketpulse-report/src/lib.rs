//! Output sinks for the MarketPulse pipelines: CSV export and the chart
//! rendering seam.
//!
//! Export is a pure side-effecting sink: UTF-8, comma-delimited, header row
//! from the row type's canonical column names, overwriting any existing
//! file. Chart rendering is an external collaborator behind [`ChartSink`];
//! the shipped implementation only summarizes to the log.

pub mod chart;
pub mod error;
pub mod export;

pub use chart::{ChartSink, LogChartSink};
pub use error::ReportError;
pub use export::{render_csv, write_csv};
