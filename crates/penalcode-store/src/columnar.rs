//! Parquet export of the cleaned offense set.

use std::fs::File;
use std::path::Path;

use parquet::arrow::ArrowWriter;
use penalcode_core::CleanedOffense;
use penalcode_core::schema::cleaned_to_batch;
use tracing::info;

use crate::StoreError;

/// Write cleaned offenses to a Parquet file. Returns the number of rows written.
pub fn write_cleaned_parquet(path: &Path, records: &[CleanedOffense]) -> Result<usize, StoreError> {
    let batch = cleaned_to_batch(records)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    info!(rows = batch.num_rows(), path = %path.display(), "wrote cleaned parquet");
    Ok(batch.num_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, BooleanArray};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use penalcode_core::{Pipeline, RawOffense, ReferenceRegistry};
    use tempfile::TempDir;

    fn batches_in(path: &Path) -> Vec<RecordBatch> {
        ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap())
            .unwrap()
            .build()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn raw(class: &str, section: &str) -> RawOffense {
        RawOffense {
            name: Some(format!("Offense {section}")),
            class: Some(class.into()),
            statute_location_id: Some(section.into()),
            ..Default::default()
        }
    }

    #[test]
    fn parquet_roundtrip_row_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cleaned.parquet");
        let output = Pipeline::new(ReferenceRegistry::builtin())
            .run([raw("D", "120.05"), raw("A Misd", "120.00"), raw("B", "999.99")]);

        let rows = write_cleaned_parquet(&path, &output.cleaned).unwrap();
        assert_eq!(rows, 2);

        let batches = batches_in(&path);
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);

        let vfo = batches[0]
            .column_by_name("vfo")
            .unwrap()
            .as_any()
            .downcast_ref::<BooleanArray>()
            .unwrap();
        assert!(vfo.value(0));
        assert!(!vfo.value(1));
        assert_eq!(vfo.null_count(), 0);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let result = write_cleaned_parquet(Path::new("/nonexistent/dir/cleaned.parquet"), &[]);
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
