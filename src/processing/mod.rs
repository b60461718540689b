pub mod classify;
pub mod correlation;
pub mod projection;
pub mod skewness;
pub mod statistics;

pub use classify::{classify, Classification, ColumnKind, DefaultSelection};
pub use correlation::{pearson, Correlation, CorrelationMatrix, Heatmap};
pub use projection::{project, ChartType, DrawMode, Series, SeriesDescriptor};
pub use skewness::{histogram_bin_count, NormalCurve, SkewDirection, Skewness, SkewnessStats};
pub use statistics::SummaryStats;
