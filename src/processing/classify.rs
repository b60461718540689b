use serde::Serialize;
use crate::data::datetime::is_date_like;
use crate::data::{Dataset, Value};

/// How a field is treated by the analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
}

/// Field lists derived from one dataset. Rebuilt whenever the dataset changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub headers: Vec<String>,
    pub numeric_fields: Vec<String>,
    pub date_fields: Vec<String>,
}

/// Columns picked when nothing has been selected yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefaultSelection {
    /// Column for the summary and skewness views.
    pub analysis_column: Option<String>,
    pub x_field: Option<String>,
    pub y_field: Option<String>,
}

/// Label every header as numeric, date-like, or neither.
pub fn classify(dataset: &Dataset) -> Classification {
    let headers = dataset.headers().to_vec();
    let numeric_fields: Vec<String> = headers
        .iter()
        .filter(|h| is_numeric_field(dataset, h))
        .cloned()
        .collect();
    let date_fields: Vec<String> = headers
        .iter()
        .filter(|h| is_date_field(dataset, h))
        .cloned()
        .collect();

    tracing::debug!(
        "Classified {} columns: {} numeric, {} date-like",
        headers.len(),
        numeric_fields.len(),
        date_fields.len()
    );

    Classification {
        headers,
        numeric_fields,
        date_fields,
    }
}

/// True iff every row holds a finite number for `field`. A single missing
/// cell disqualifies the column.
pub fn is_numeric_field(dataset: &Dataset, field: &str) -> bool {
    dataset
        .rows()
        .iter()
        .all(|r| r.get(field).as_number().is_some())
}

/// True iff the dataset has rows and every cell of `field` is an ISO date
/// string or an already decoded date.
pub fn is_date_field(dataset: &Dataset, field: &str) -> bool {
    !dataset.is_empty()
        && dataset.rows().iter().all(|r| {
            let v = r.get(field);
            matches!(v, Value::Date(_)) || is_date_like(v)
        })
}

impl Classification {
    pub fn kind_of(&self, field: &str) -> Option<ColumnKind> {
        if !self.headers.iter().any(|h| h == field) {
            return None;
        }
        if self.is_numeric(field) {
            Some(ColumnKind::Numeric)
        } else if self.date_fields.iter().any(|h| h == field) {
            Some(ColumnKind::Date)
        } else {
            Some(ColumnKind::Categorical)
        }
    }

    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_fields.iter().any(|h| h == field)
    }

    pub fn has_numeric(&self) -> bool {
        !self.numeric_fields.is_empty()
    }

    /// First numeric column for analysis; x is the first header, y the second
    /// numeric column (or the first when there is only one).
    pub fn default_selection(&self) -> DefaultSelection {
        DefaultSelection {
            analysis_column: self.numeric_fields.first().cloned(),
            x_field: self.headers.first().cloned(),
            y_field: self
                .numeric_fields
                .get(1)
                .or_else(|| self.numeric_fields.first())
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new()
                .with("city", "Oslo")
                .with("temp", "4.5")
                .with("day", "2024-01-01")
                .with("rain", 1.0),
            Record::new()
                .with("city", "Rome")
                .with("temp", 14.0)
                .with("day", "2024-01-02")
                .with("rain", "n/a"),
            Record::new().with("city", "Lima").with("temp", -2.0).with("day", "2024-01-03"),
        ])
    }

    #[test]
    fn splits_numeric_date_and_categorical() {
        let c = classify(&dataset());
        assert_eq!(c.headers, vec!["city", "temp", "day", "rain"]);
        assert_eq!(c.numeric_fields, vec!["temp"]);
        assert_eq!(c.date_fields, vec!["day"]);
        assert_eq!(c.kind_of("city"), Some(ColumnKind::Categorical));
        assert_eq!(c.kind_of("temp"), Some(ColumnKind::Numeric));
        assert_eq!(c.kind_of("day"), Some(ColumnKind::Date));
        assert_eq!(c.kind_of("nope"), None);
    }

    #[test]
    fn missing_or_text_cells_disqualify_numeric() {
        let ds = dataset();
        assert!(!is_numeric_field(&ds, "rain"));
    }

    #[test]
    fn empty_dataset_has_nothing_numeric() {
        let c = classify(&Dataset::from_records(Vec::new()));
        assert!(!c.has_numeric());
        assert_eq!(c.default_selection(), DefaultSelection::default());
    }

    #[test]
    fn default_selection_prefers_second_numeric_for_y() {
        let ds = Dataset::from_records(vec![Record::new()
            .with("label", "a")
            .with("x", 1.0)
            .with("y", 2.0)]);
        let sel = classify(&ds).default_selection();
        assert_eq!(sel.analysis_column.as_deref(), Some("x"));
        assert_eq!(sel.x_field.as_deref(), Some("label"));
        assert_eq!(sel.y_field.as_deref(), Some("y"));
    }
}
