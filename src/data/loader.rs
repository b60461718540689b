use std::io::Read;
use std::path::Path;
use thiserror::Error;
use crate::data::dataset::{Dataset, Record};
use crate::data::value::Value;

/// Failure to turn a file into a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),
}

/// Load a CSV or spreadsheet file into a dataset.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(std::fs::File::open(path)?)?,
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => load_workbook(path)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };

    tracing::info!(
        "Loaded {:?}: {} rows, {} columns",
        path,
        dataset.len(),
        dataset.headers().len()
    );
    Ok(dataset)
}

/// Read comma-separated text. The first row names the fields; empty cells are
/// left out of their record. Input that is not UTF-8 is read as Latin-1.
pub fn load_csv_reader<R: Read>(mut source: R) -> Result<Dataset, LoadError> {
    let mut content = Vec::new();
    source.read_to_end(&mut content)?;
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("CSV input is not UTF-8, decoding as Latin-1");
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
                .collect(),
        );
    }

    Ok(rows_to_dataset(
        rows.into_iter()
            .map(|row| row.into_iter().map(|cell| cell.map(Value::Text)).collect())
            .collect(),
    ))
}

fn load_workbook(path: &Path) -> Result<Dataset, LoadError> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoSheets)?;
    tracing::debug!("Reading sheet {sheet_name:?}");

    let range = workbook.worksheet_range(&sheet_name)?;

    let rows: Vec<Vec<Option<Value>>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    Data::String(s) if s.is_empty() => None,
                    Data::String(s) => Some(Value::Text(s.clone())),
                    Data::Float(f) => Some(Value::Number(*f)),
                    Data::Int(i) => Some(Value::Number(*i as f64)),
                    Data::Bool(b) => Some(Value::Text(b.to_string())),
                    Data::DateTime(dt) => match dt.as_datetime() {
                        Some(naive) => Some(Value::Date(naive)),
                        None => Some(Value::Number(dt.as_f64())),
                    },
                    Data::DateTimeIso(s) => Some(Value::Text(s.clone())),
                    Data::DurationIso(s) => Some(Value::Text(s.clone())),
                    Data::Error(e) => Some(Value::Text(format!("{e:?}"))),
                })
                .collect()
        })
        .collect();

    Ok(rows_to_dataset(rows))
}

/// First row becomes field names; each later non-blank row becomes a record.
fn rows_to_dataset(mut rows: Vec<Vec<Option<Value>>>) -> Dataset {
    if rows.is_empty() {
        return Dataset::from_records(Vec::new());
    }
    let header_cells = rows.remove(0);
    let names = header_names(&header_cells);

    let records: Vec<Record> = rows
        .into_iter()
        .filter(|row| row.iter().any(Option::is_some))
        .map(|row| {
            row.into_iter()
                .zip(names.iter())
                .filter_map(|(cell, name)| cell.map(|v| (name.clone(), v)))
                .collect()
        })
        .collect();

    Dataset::from_records(records)
}

/// Field names from a header row. Blank headers become `__EMPTY`, and
/// repeated names get a `_1`, `_2`, ... suffix.
fn header_names(cells: &[Option<Value>]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(cells.len());
    for cell in cells {
        let base = match cell {
            Some(Value::Text(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(v)) => format!("{v}"),
            Some(Value::Date(dt)) => dt.to_string(),
            _ => "__EMPTY".to_string(),
        };
        let mut name = base.clone();
        let mut suffix = 0;
        while names.contains(&name) {
            suffix += 1;
            name = format!("{base}_{suffix}");
        }
        names.push(name);
    }
    names
}
