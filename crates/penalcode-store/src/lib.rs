//! Storage boundary: reads raw offense collections and registry files, writes
//! the cleaned set, the rejection report, and (optionally) Parquet.

mod error;
pub use error::StoreError;

mod json;
pub use json::{
    CLEANED_FILE, OutputPaths, REPORT_FILE, read_cleaned, read_offenses, read_registry, write_json,
    write_outputs,
};

#[cfg(feature = "parquet")]
mod columnar;
#[cfg(feature = "parquet")]
pub use columnar::write_cleaned_parquet;
