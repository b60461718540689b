pub mod cache;
pub mod workspace;

pub use cache::{AnalysisCache, CacheStats, ProjectionKey};
pub use workspace::{ColumnAnalysis, Workspace};
