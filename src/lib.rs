pub mod analyzers;
pub mod coerce;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod session;
pub mod thresholds;

pub use analyzers::aggregate::aggregate;
pub use analyzers::types::{GroupSummary, Report, Summary};
pub use error::ReportError;
pub use thresholds::{ThresholdSet, normalize};
