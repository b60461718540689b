//! Distribution shape of a numeric column: central tendency, Pearson's
//! second skewness coefficient, and a normal curve fitted for overlay on a
//! frequency histogram.

use serde::Serialize;
use crate::processing::statistics::{mean_and_std_dev, modes, sorted_copy};

/// Number of x samples along the fitted normal curve.
pub const CURVE_SAMPLES: usize = 100;

/// |skewness| above this is reported as skewed.
pub const SKEW_THRESHOLD: f64 = 0.5;

/// Histogram bins for `n` values: `max(10, floor(sqrt(n)))`.
///
/// Histogram projections and the normal-curve scaling both use this.
pub fn histogram_bin_count(n: usize) -> usize {
    ((n as f64).sqrt().floor() as usize).max(10)
}

/// Pearson's second skewness coefficient, or the marker for a column with
/// no spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Skewness {
    Coefficient(f64),
    /// Standard deviation is zero; the coefficient is undefined.
    ZeroVariance,
}

impl Skewness {
    /// Numeric value for display; `ZeroVariance` reads as 0.
    pub fn value(&self) -> f64 {
        match self {
            Skewness::Coefficient(v) => *v,
            Skewness::ZeroVariance => 0.0,
        }
    }

    pub fn direction(&self) -> SkewDirection {
        SkewDirection::classify(self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewDirection {
    Positive,
    Negative,
    Symmetric,
}

impl SkewDirection {
    pub fn classify(skewness: f64) -> Self {
        if skewness > SKEW_THRESHOLD {
            SkewDirection::Positive
        } else if skewness < -SKEW_THRESHOLD {
            SkewDirection::Negative
        } else {
            SkewDirection::Symmetric
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkewDirection::Positive => "Positively skewed (right)",
            SkewDirection::Negative => "Negatively skewed (left)",
            SkewDirection::Symmetric => "Approximately symmetric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkewnessStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Interpolated median: the average of the two central values for even n.
    pub median: f64,
    pub std_dev: f64,
    pub modes: Vec<f64>,
    pub all_unique: bool,
    pub skewness: Skewness,
}

impl SkewnessStats {
    /// Returns `None` for an empty slice.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        let n = sorted.len();

        let (mean, std_dev) = mean_and_std_dev(&sorted);
        let median = median_interpolated(&sorted);
        let modes = modes(&sorted);

        let skewness = if std_dev == 0.0 {
            Skewness::ZeroVariance
        } else {
            Skewness::Coefficient(3.0 * (mean - median) / std_dev)
        };

        Some(SkewnessStats {
            count: n,
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
            std_dev,
            all_unique: modes.is_empty(),
            modes,
            skewness,
        })
    }

    pub fn direction(&self) -> SkewDirection {
        self.skewness.direction()
    }
}

/// Median of an ascending slice, averaging the two central values when the
/// length is even.
pub fn median_interpolated(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Gaussian density `N(mean, std)` at `x`.
pub fn normal_pdf(x: f64, mean: f64, std: f64) -> f64 {
    (1.0 / (std * (2.0 * std::f64::consts::PI).sqrt())) * (-0.5 * ((x - mean) / std).powi(2)).exp()
}

/// A point marker drawn above the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
}

/// Normal curve scaled to histogram counts, with markers for the mean,
/// median, and modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bin_count: usize,
    pub mean_marker: Marker,
    pub median_marker: Marker,
    pub mode_markers: Vec<Marker>,
}

impl NormalCurve {
    /// Fit the overlay for a column. A zero-variance column is drawn with a
    /// unit standard deviation so the density stays finite.
    pub fn fit(stats: &SkewnessStats) -> Self {
        let n = stats.count as f64;
        let (min, max) = (stats.min, stats.max);
        let std = if stats.std_dev == 0.0 { 1.0 } else { stats.std_dev };
        let bin_count = histogram_bin_count(stats.count);
        let scale = n * (max - min) / bin_count as f64;

        let last = (CURVE_SAMPLES - 1) as f64;
        let x: Vec<f64> = (0..CURVE_SAMPLES)
            .map(|i| min + (max - min) * i as f64 / last)
            .collect();
        let density: Vec<f64> = x.iter().map(|&xi| normal_pdf(xi, stats.mean, std)).collect();
        let peak = density.iter().copied().fold(f64::NEG_INFINITY, f64::max) * scale;
        let y = density.iter().map(|d| d * scale).collect();

        let mode_markers = if stats.all_unique {
            Vec::new()
        } else {
            stats
                .modes
                .iter()
                .map(|&m| Marker { x: m, y: peak * 1.15 })
                .collect()
        };

        NormalCurve {
            x,
            y,
            bin_count,
            mean_marker: Marker { x: stats.mean, y: peak * 1.1 },
            median_marker: Marker { x: stats.median, y: peak * 1.05 },
            mode_markers,
        }
    }
}
