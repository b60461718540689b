use serde::Serialize;
use crate::data::Dataset;
use crate::processing::classify::is_numeric_field;

/// Pearson's r for one pair of columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Correlation {
    Coefficient(f64),
    /// One of the columns has no variance (or there are no rows).
    ZeroDenominator,
}

impl Correlation {
    /// Matrix entry for this pair; `ZeroDenominator` reads as 0.
    pub fn value(&self) -> f64 {
        match self {
            Correlation::Coefficient(r) => *r,
            Correlation::ZeroDenominator => 0.0,
        }
    }
}

/// Pearson correlation by the sum-of-products formula. Pairs beyond the
/// shorter slice are ignored.
///
/// A side whose values are all equal has no variance, whatever rounding the
/// sums pick up, so it is reported as `ZeroDenominator` before any sum is
/// taken. A denominator that still comes out non-positive or non-finite is
/// treated the same way.
pub fn pearson(x: &[f64], y: &[f64]) -> Correlation {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    if n == 0 || all_equal(x) || all_equal(y) {
        return Correlation::ZeroDenominator;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }
    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let spread_x = n * sum_x2 - sum_x * sum_x;
    let spread_y = n * sum_y2 - sum_y * sum_y;
    let denominator = (spread_x * spread_y).sqrt();
    if !(spread_x > 0.0 && spread_y > 0.0) || !denominator.is_finite() || denominator == 0.0 {
        return Correlation::ZeroDenominator;
    }
    Correlation::Coefficient((numerator / denominator).clamp(-1.0, 1.0))
}

fn all_equal(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Square, symmetric matrix of Pearson coefficients over numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    fields: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// Heatmap-ready view of a correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
    pub zmin: f64,
    pub zmax: f64,
}

impl CorrelationMatrix {
    /// Correlate every pair of `fields`. The diagonal is fixed at 1 even for
    /// constant columns; off-diagonal zero denominators read as 0.
    ///
    /// Only fields holding a number in every row take part, so the columns
    /// stay row-aligned. Any other field is left out of the matrix.
    pub fn compute(dataset: &Dataset, fields: &[String]) -> Self {
        let fields: Vec<String> = fields
            .iter()
            .filter(|f| {
                let numeric = is_numeric_field(dataset, f);
                if !numeric {
                    tracing::debug!("Leaving non-numeric field {f:?} out of the correlation matrix");
                }
                numeric
            })
            .cloned()
            .collect();
        let columns: Vec<Vec<f64>> = fields.iter().map(|f| dataset.numeric_column(f)).collect();
        let k = columns.len();

        let mut values = vec![vec![0.0f64; k]; k];
        for i in 0..k {
            values[i][i] = 1.0;
            for j in (i + 1)..k {
                let r = pearson(&columns[i], &columns[j]).value();
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        tracing::debug!("Computed {k}x{k} correlation matrix over {} rows", dataset.len());

        CorrelationMatrix { fields, values,
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Coefficient between two named columns.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.fields.iter().position(|f| f == a)?;
        let j = self.fields.iter().position(|f| f == b)?;
        self.get(i, j)
    }

    pub fn heatmap(&self) -> Heatmap {
        Heatmap {
            x: self.fields.clone(),
            y: self.fields.clone(),
            z: self.values.clone(),
            zmin: -1.0,
            zmax: 1.0,
        }
    }
}
