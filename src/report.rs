use std::fmt;
use serde::Serialize;
use crate::processing::{
    ChartType, Classification, CorrelationMatrix, SeriesDescriptor, SkewDirection, SkewnessStats,
    SummaryStats,
};
use crate::state::{ColumnAnalysis, Workspace};

/// Text shown when there is nothing numeric to analyse.
pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns available for analysis.";

/// Chart the caller wants projected alongside the statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRequest {
    pub chart_type: ChartType,
    pub x_field: Option<String>,
    pub y_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub field: String,
    pub summary: SummaryStats,
    pub skewness: SkewnessStats,
    pub direction: SkewDirection,
}

/// Everything the rendering side needs for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub rows: usize,
    pub classification: Classification,
    pub columns: Vec<ColumnReport>,
    pub correlation: Option<CorrelationMatrix>,
    pub projection: Option<SeriesDescriptor>,
    pub notices: Vec<String>,
}

impl DatasetReport {
    /// Analyse `columns` (every numeric column when `None`) and project the
    /// requested chart.
    pub fn build(
        workspace: &mut Workspace,
        columns: Option<&[String]>,
        projection: Option<&ProjectionRequest>,
    ) -> Self {
        let classification = workspace.classification().clone();
        let selected: Vec<String> = match columns {
            Some(fields) => fields.to_vec(),
            None => classification.numeric_fields.clone(),
        };

        let mut notices = Vec::new();
        let mut column_reports = Vec::new();
        for field in &selected {
            match (workspace.summary(field), workspace.skewness(field)) {
                (ColumnAnalysis::Ready(summary), ColumnAnalysis::Ready(skewness)) => {
                    column_reports.push(ColumnReport {
                        field: field.clone(),
                        direction: skewness.direction(),
                        summary,
                        skewness,
                    });
                }
                (ColumnAnalysis::NoNumericColumns, _) => {
                    if !notices.iter().any(|n| n == NO_NUMERIC_COLUMNS) {
                        notices.push(NO_NUMERIC_COLUMNS.to_string());
                    }
                }
                (ColumnAnalysis::NotNumeric(f), _) => {
                    notices.push(format!("Column {f:?} is not numeric; skipped."));
                }
                _ => notices.push(format!("Column {field:?} has no values.")),
            }
        }

        let correlation = match workspace.correlation() {
            ColumnAnalysis::Ready(m) => Some(m),
            _ => {
                if !notices.iter().any(|n| n == NO_NUMERIC_COLUMNS) {
                    notices.push(NO_NUMERIC_COLUMNS.to_string());
                }
                None
            }
        };

        let projection = projection.map(|req| {
            let descriptor =
                workspace.projection(req.chart_type, req.x_field.as_deref(), req.y_field.as_deref());
            if descriptor.is_empty() {
                notices.push(format!(
                    "{} needs {} field(s); nothing to draw.",
                    req.chart_type.label(),
                    if req.chart_type.requires_y() { "x and y" } else { "an x" }
                ));
            }
            descriptor
        });

        DatasetReport {
            rows: workspace.dataset().len(),
            classification,
            columns: column_reports,
            correlation,
            projection,
            notices,
        }
    }

    /// Plain-text rendering; same as the `Display` output.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.classification;
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Columns: {}", c.headers.join(", "))?;
        writeln!(f, "Numeric: {}", list_or_none(&c.numeric_fields))?;
        writeln!(f, "Date-like: {}", list_or_none(&c.date_fields))?;
        writeln!(f)?;

        for col in &self.columns {
            f.write_str(&col.summary.report(&col.field))?;
            writeln!(
                f,
                "  Median (interpolated): {:.3}\n  Skewness: {:.3} ({})",
                col.skewness.median,
                col.skewness.skewness.value(),
                col.direction.label()
            )?;
            writeln!(f)?;
        }

        if let Some(m) = &self.correlation {
            writeln!(f, "Correlation matrix:")?;
            let width = m.fields().iter().map(|name| name.len()).max().unwrap_or(0).max(7);
            write!(f, "{:width$}", "")?;
            for name in m.fields() {
                write!(f, " {name:>width$}")?;
            }
            writeln!(f)?;
            for (name, row) in m.fields().iter().zip(m.rows()) {
                write!(f, "{name:width$}")?;
                for r in row {
                    write!(f, " {r:>width$.3}")?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }

        if let Some(p) = &self.projection {
            writeln!(f, "{} ({} series)", p.title, p.series.len())?;
            for s in &p.series {
                let points = s.x.len().max(s.y.len()).max(s.values.len());
                writeln!(f, "  {}: {} points", s.name, points)?;
            }
            writeln!(f)?;
        }

        for notice in &self.notices {
            writeln!(f, "Note: {notice}")?;
        }
        Ok(())
    }
}

fn list_or_none(fields: &[String]) -> String {
    if fields.is_empty() {
        "(none)".to_string()
    } else {
        fields.join(", ")
    }
}
