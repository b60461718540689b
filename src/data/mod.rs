pub mod dataset;
pub mod datetime;
pub mod loader;
pub mod value;

pub use dataset::{Dataset, DatasetId, Record};
pub use loader::{load_csv_reader, load_file, LoadError};
pub use value::Value;
