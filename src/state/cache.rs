use std::collections::HashMap;
use std::hash::Hash;
use serde::Serialize;
use crate::data::DatasetId;
use crate::processing::{ChartType, CorrelationMatrix, SeriesDescriptor, SkewnessStats, SummaryStats};

/// Chart selection a projection was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionKey {
    pub chart_type: ChartType,
    pub x_field: Option<String>,
    pub y_field: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoized analysis results keyed by dataset identity and selection.
///
/// Entries are never updated in place. Replacing the dataset must be
/// followed by `invalidate`.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    summaries: HashMap<(DatasetId, String), Option<SummaryStats>>,
    skewness: HashMap<(DatasetId, String), Option<SkewnessStats>>,
    correlations: HashMap<DatasetId, CorrelationMatrix>,
    projections: HashMap<(DatasetId, ProjectionKey), SeriesDescriptor>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(
        &mut self,
        dataset: DatasetId,
        field: &str,
        compute: impl FnOnce() -> Option<SummaryStats>,
    ) -> Option<SummaryStats> {
        let key = (dataset, field.to_string());
        memoize(&mut self.summaries, &mut self.hits, &mut self.misses, key, compute)
    }

    pub fn skewness(
        &mut self,
        dataset: DatasetId,
        field: &str,
        compute: impl FnOnce() -> Option<SkewnessStats>,
    ) -> Option<SkewnessStats> {
        let key = (dataset, field.to_string());
        memoize(&mut self.skewness, &mut self.hits, &mut self.misses, key, compute)
    }

    pub fn correlation(
        &mut self,
        dataset: DatasetId,
        compute: impl FnOnce() -> CorrelationMatrix,
    ) -> CorrelationMatrix {
        memoize(&mut self.correlations, &mut self.hits, &mut self.misses, dataset, compute)
    }

    pub fn projection(
        &mut self,
        dataset: DatasetId,
        key: ProjectionKey,
        compute: impl FnOnce() -> SeriesDescriptor,
    ) -> SeriesDescriptor {
        memoize(&mut self.projections, &mut self.hits, &mut self.misses, (dataset, key), compute)
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        let dropped = self.len();
        self.summaries.clear();
        self.skewness.clear();
        self.correlations.clear();
        self.projections.clear();
        tracing::debug!("Analysis cache invalidated ({dropped} entries dropped)");
    }

    pub fn len(&self) -> usize {
        self.summaries.len() + self.skewness.len() + self.correlations.len() + self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len(),
        }
    }
}

fn memoize<K: Eq + Hash, V: Clone>(
    map: &mut HashMap<K, V>,
    hits: &mut u64,
    misses: &mut u64,
    key: K,
    compute: impl FnOnce() -> V,
) -> V {
    if let Some(v) = map.get(&key) {
        *hits += 1;
        return v.clone();
    }
    *misses += 1;
    let value = compute();
    map.insert(key, value.clone());
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};

    #[test]
    fn second_lookup_is_a_hit() {
        let ds = Dataset::from_records(vec![Record::new().with("v", 1.0)]);
        let mut cache = AnalysisCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            cache.summary(ds.id(), "v", || {
                calls += 1;
                SummaryStats::compute(&ds.numeric_column("v"))
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 1, entries: 1 });
    }

    #[test]
    fn keys_separate_datasets_and_fields() {
        let a = Dataset::from_records(vec![Record::new().with("v", 1.0).with("w", 2.0)]);
        let b = Dataset::from_records(vec![Record::new().with("v", 5.0)]);
        let mut cache = AnalysisCache::new();
        let sa = cache.summary(a.id(), "v", || SummaryStats::compute(&a.numeric_column("v")));
        let sw = cache.summary(a.id(), "w", || SummaryStats::compute(&a.numeric_column("w")));
        let sb = cache.summary(b.id(), "v", || SummaryStats::compute(&b.numeric_column("v")));
        assert_eq!(sa.unwrap().min, 1.0);
        assert_eq!(sw.unwrap().min, 2.0);
        assert_eq!(sb.unwrap().min, 5.0);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn invalidate_empties_the_cache() {
        let ds = Dataset::from_records(vec![Record::new().with("v", 1.0)]);
        let mut cache = AnalysisCache::new();
        cache.correlation(ds.id(), || CorrelationMatrix::compute(&ds, &["v".to_string()]));
        assert!(!cache.is_empty());
        cache.invalidate();
        assert!(cache.is_empty());
    }
}
