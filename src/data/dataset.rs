use serde::Serialize;
use crate::data::value::Value;

static MISSING: Value = Value::Missing;

static NEXT_DATASET_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

fn next_dataset_id() -> DatasetId {
    DatasetId(NEXT_DATASET_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
}

/// Identity of a loaded dataset. Every `Dataset` built gets a fresh id,
/// so derived results can be keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DatasetId(u64);

/// One row: field name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, replacing an earlier value under the same name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Value of `field`, or `Missing` when the record does not carry it.
    pub fn get(&self, field: &str) -> &Value {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, v)| v)
            .unwrap_or(&MISSING)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn coerce(self) -> Self {
        Self {
            fields: self.fields.into_iter().map(|(k, v)| (k, v.coerce())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// An immutable table of records.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    id: DatasetId,
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, applying numeric coercion to every cell once.
    /// Headers are the keys of the first record, in order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let rows: Vec<Record> = records.into_iter().map(Record::coerce).collect();
        let headers = rows
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            id: next_dataset_id(),
            headers,
            rows,
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of `field` in row order, `Missing` where absent.
    pub fn column(&self, field: &str) -> Vec<&Value> {
        self.rows.iter().map(|r| r.get(field)).collect()
    }

    /// Finite numbers of `field` in row order; missing and non-numeric cells are dropped.
    pub fn numeric_column(&self, field: &str) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.get(field).as_number()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new().with("name", "a").with("score", "10"),
            Record::new().with("score", 12.5).with("name", "b").with("extra", "x"),
            Record::new().with("name", "c"),
        ])
    }

    #[test]
    fn headers_come_from_first_record() {
        let ds = sample();
        assert_eq!(ds.headers(), &["name".to_string(), "score".to_string()]);
        assert!(!ds.has_field("extra"));
    }

    #[test]
    fn absent_fields_read_as_missing() {
        let ds = sample();
        assert_eq!(ds.rows()[2].get("score"), &Value::Missing);
        assert_eq!(ds.column("score").len(), 3);
    }

    #[test]
    fn numeric_strings_are_coerced_on_build() {
        let ds = sample();
        assert_eq!(ds.rows()[0].get("score"), &Value::Number(10.0));
        assert_eq!(ds.numeric_column("score"), vec![10.0, 12.5]);
    }

    #[test]
    fn insert_replaces_existing_field() {
        let r = Record::new().with("a", 1.0).with("a", 2.0);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("a"), &Value::Number(2.0));
    }

    #[test]
    fn every_dataset_gets_a_new_id() {
        assert_ne!(sample().id(), sample().id());
    }

    #[test]
    fn empty_dataset_has_no_headers() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.headers().is_empty());
    }
}
