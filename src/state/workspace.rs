use std::sync::Arc;
use serde::Serialize;
use crate::data::Dataset;
use crate::processing::{
    classify, project, ChartType, Classification, CorrelationMatrix, NormalCurve, SeriesDescriptor,
    SkewnessStats, SummaryStats,
};
use crate::state::cache::{AnalysisCache, CacheStats, ProjectionKey};

/// Outcome of a column-level query, covering the states a view must render
/// instead of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "result", rename_all = "snake_case")]
pub enum ColumnAnalysis<T> {
    Ready(T),
    /// The dataset has no numeric columns at all.
    NoNumericColumns,
    /// The selected field is not one of the numeric columns.
    NotNumeric(String),
    /// The column has no values left after dropping missing cells.
    Empty,
}

impl<T> ColumnAnalysis<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ColumnAnalysis::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            ColumnAnalysis::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ColumnAnalysis<U> {
        match self {
            ColumnAnalysis::Ready(v) => ColumnAnalysis::Ready(f(v)),
            ColumnAnalysis::NoNumericColumns => ColumnAnalysis::NoNumericColumns,
            ColumnAnalysis::NotNumeric(field) => ColumnAnalysis::NotNumeric(field),
            ColumnAnalysis::Empty => ColumnAnalysis::Empty,
        }
    }
}

/// The loaded dataset, its classification, and memoized results.
#[derive(Debug)]
pub struct Workspace {
    dataset: Arc<Dataset>,
    classification: Classification,
    cache: AnalysisCache,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_dataset(Dataset::from_records(Vec::new()))
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        let classification = classify(&dataset);
        Self {
            dataset: Arc::new(dataset),
            classification,
            cache: AnalysisCache::new(),
        }
    }

    /// Swap in a new dataset. The classification is rebuilt and every
    /// memoized result is dropped.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        tracing::info!(
            "Replacing dataset: {} rows, {} columns",
            dataset.len(),
            dataset.headers().len()
        );
        self.classification = classify(&dataset);
        self.dataset = Arc::new(dataset);
        self.cache.invalidate();
    }

    pub fn clear(&mut self) {
        self.replace_dataset(Dataset::from_records(Vec::new()));
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn summary(&mut self, field: &str) -> ColumnAnalysis<SummaryStats> {
        if let Some(blocked) = self.check_numeric(field) {
            return blocked;
        }
        let dataset = Arc::clone(&self.dataset);
        let stats = self.cache.summary(dataset.id(), field, || {
            tracing::debug!("Computing summary for {field:?}");
            SummaryStats::compute(&dataset.numeric_column(field))
        });
        stats.map_or(ColumnAnalysis::Empty, ColumnAnalysis::Ready)
    }

    pub fn skewness(&mut self, field: &str) -> ColumnAnalysis<SkewnessStats> {
        if let Some(blocked) = self.check_numeric(field) {
            return blocked;
        }
        let dataset = Arc::clone(&self.dataset);
        let stats = self.cache.skewness(dataset.id(), field, || {
            tracing::debug!("Computing skewness for {field:?}");
            SkewnessStats::compute(&dataset.numeric_column(field))
        });
        stats.map_or(ColumnAnalysis::Empty, ColumnAnalysis::Ready)
    }

    pub fn normal_curve(&mut self, field: &str) -> ColumnAnalysis<NormalCurve> {
        self.skewness(field).map(|stats| NormalCurve::fit(&stats))
    }

    pub fn correlation(&mut self) -> ColumnAnalysis<CorrelationMatrix> {
        if !self.classification.has_numeric() {
            return ColumnAnalysis::NoNumericColumns;
        }
        let dataset = Arc::clone(&self.dataset);
        let fields = &self.classification.numeric_fields;
        ColumnAnalysis::Ready(
            self.cache
                .correlation(dataset.id(), || CorrelationMatrix::compute(&dataset, fields)),
        )
    }

    pub fn projection(
        &mut self,
        chart_type: ChartType,
        x_field: Option<&str>,
        y_field: Option<&str>,
    ) -> SeriesDescriptor {
        let key = ProjectionKey {
            chart_type,
            x_field: x_field.map(str::to_string),
            y_field: y_field.map(str::to_string),
        };
        let dataset = Arc::clone(&self.dataset);
        self.cache.projection(dataset.id(), key, || {
            project(chart_type, &dataset, x_field, y_field)
        })
    }

    fn check_numeric<T>(&self, field: &str) -> Option<ColumnAnalysis<T>> {
        if !self.classification.has_numeric() {
            Some(ColumnAnalysis::NoNumericColumns)
        } else if !self.classification.is_numeric(field) {
            Some(ColumnAnalysis::NotNumeric(field.to_string()))
        } else {
            None
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
