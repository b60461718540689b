//! GetInsights - descriptive, distributional, and relational statistics
//! over tabular data, shaped for interactive charts.
//!
//! - **data**: values, records, datasets, date detection, CSV/spreadsheet loading
//! - **processing**: column classification, summaries, skewness, correlation, chart projection
//! - **state**: the active dataset and memoized results
//! - **report**: one bundle of every result for a renderer

pub mod data;
pub mod processing;
pub mod report;
pub mod state;

pub use data::{load_file, Dataset, LoadError, Record, Value};
pub use processing::{
    classify, project, ChartType, Classification, CorrelationMatrix, SeriesDescriptor, SkewnessStats,
    SummaryStats,
};
pub use report::{DatasetReport, ProjectionRequest};
pub use state::{ColumnAnalysis, Workspace};
