use std::collections::HashMap;
use serde::Serialize;

/// Multiplier applied to the IQR when placing the outlier fence.
pub const FENCE_FACTOR: f64 = 1.5;

/// Five-number summary and spread for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    pub mean: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
    /// Most frequent values, ascending. Empty when every value is unique.
    pub modes: Vec<f64>,
    /// Values outside the fence, ascending, duplicates kept.
    pub outliers: Vec<f64>,
}

impl SummaryStats {
    /// Compute the summary of `values`. Returns `None` for an empty slice.
    ///
    /// Quartiles are order statistics picked by floor rank (`sorted[n/4]`,
    /// `sorted[n/2]`, `sorted[3n/4]`) with no interpolation, even for even n.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = sorted_copy(values);
        let n = sorted.len();

        let min = sorted[0];
        let max = sorted[n - 1];
        let q1 = sorted[n / 4];
        let median = median_order_statistic(&sorted);
        let q3 = sorted[(3 * n) / 4];
        let iqr = q3 - q1;

        let (mean, std_dev) = mean_and_std_dev(&sorted);

        let lower = q1 - FENCE_FACTOR * iqr;
        let upper = q3 + FENCE_FACTOR * iqr;
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower || v > upper)
            .collect();

        Some(SummaryStats {
            count: n,
            min,
            q1,
            median,
            q3,
            max,
            iqr,
            mean,
            std_dev,
            modes: modes(&sorted),
            outliers,
        })
    }

    /// Outlier fence `(q1 - 1.5 iqr, q3 + 1.5 iqr)`.
    pub fn fence(&self) -> (f64, f64) {
        (self.q1 - FENCE_FACTOR * self.iqr, self.q3 + FENCE_FACTOR * self.iqr)
    }

    pub fn has_modes(&self) -> bool {
        !self.modes.is_empty()
    }

    /// Up to `limit` modes, plus whether more were left out.
    pub fn mode_preview(&self, limit: usize) -> (&[f64], bool) {
        let shown = self.modes.len().min(limit);
        (&self.modes[..shown], self.modes.len() > limit)
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        let modes = if self.modes.is_empty() {
            "N/A (all unique)".to_string()
        } else {
            join_numbers(&self.modes)
        };
        let (lower, upper) = self.fence();
        format!(
            "{}:\n  Count: {}\n  Min: {:.3}\n  Q1: {:.3}\n  Median: {:.3}\n  Q3: {:.3}\n  Max: {:.3}\n  IQR: {:.3}\n  Mean: {:.3}\n  Std Dev: {:.3}\n  Mode(s): {}\n  Outliers: {} outside [{:.3}, {:.3}]\n",
            label,
            self.count,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
            self.iqr,
            self.mean,
            self.std_dev,
            modes,
            self.outliers.len(),
            lower,
            upper
        )
    }
}

/// Ascending copy of `values`.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// The element at index `floor(n/2)` of an ascending slice. For even n this
/// is the upper of the two central values; nothing is averaged.
pub fn median_order_statistic(sorted: &[f64]) -> f64 {
    sorted[sorted.len() / 2]
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `sqrt(sum((x - mean)^2) / n)`, no Bessel correction.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean and population standard deviation of an ascending slice.
///
/// A constant slice is detected from its ends, not from the computed
/// variance: its mean is the value itself and its deviation exactly 0.
/// Summing values such as 0.1 would otherwise leave rounding residue.
pub fn mean_and_std_dev(sorted: &[f64]) -> (f64, f64) {
    if is_constant(sorted) {
        return (sorted[0], 0.0);
    }
    let mean = mean(sorted);
    (mean, population_std_dev(sorted, mean))
}

/// True when every element of an ascending slice is the same value.
pub fn is_constant(sorted: &[f64]) -> bool {
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => first == last,
        _ => false,
    }
}

/// Values sharing the highest frequency, ascending. Empty when that
/// frequency is 1 (every value unique).
pub fn modes(values: &[f64]) -> Vec<f64> {
    let mut frequency: HashMap<u64, (f64, usize)> = HashMap::new();
    let mut max_freq = 0usize;
    for &v in values {
        // -0.0 and 0.0 are the same value here.
        let v = if v == 0.0 { 0.0 } else { v };
        let entry = frequency.entry(v.to_bits()).or_insert((v, 0));
        entry.1 += 1;
        max_freq = max_freq.max(entry.1);
    }
    if max_freq <= 1 {
        return Vec::new();
    }

    let mut modes: Vec<f64> = frequency
        .into_values()
        .filter(|&(_, count)| count == max_freq)
        .map(|(v, _)| v)
        .collect();
    modes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    modes
}

fn join_numbers(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v}")).collect::<Vec<_>>().join(", ")
}
