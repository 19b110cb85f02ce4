//! Arrow schema for the cleaned offense set.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::offense::CleanedOffense;

/// Schema for cleaned offenses, one row per offense.
pub fn cleaned_schema() -> Schema {
    Schema::new(vec![
        Field::new("name", DataType::Utf8, true),
        Field::new("class", DataType::Utf8, false),
        Field::new("statute_location_id", DataType::Utf8, false),
        Field::new("offense_level", DataType::Utf8, true),
        Field::new("classification_description", DataType::Utf8, true),
        Field::new("vfo", DataType::Boolean, false),
        Field::new("vfo_legal_basis", DataType::Utf8, true),
        Field::new(
            "vfo_notes",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            true,
        ),
    ])
}

/// Build a single RecordBatch from cleaned offenses.
///
/// Fields outside the fixed schema (`extra`) are not exported.
pub fn cleaned_to_batch(records: &[CleanedOffense]) -> Result<RecordBatch, ArrowError> {
    let name = StringArray::from_iter(records.iter().map(|r| r.name.as_deref()));
    let class = StringArray::from_iter_values(records.iter().map(|r| r.class.as_str()));
    let section =
        StringArray::from_iter_values(records.iter().map(|r| r.statute_location_id.as_str()));
    let level = StringArray::from_iter(records.iter().map(|r| r.offense_level.as_deref()));
    let description = StringArray::from_iter(
        records
            .iter()
            .map(|r| r.classification_description.as_deref()),
    );
    let vfo = BooleanArray::from(records.iter().map(|r| r.vfo).collect::<Vec<_>>());
    let basis = StringArray::from_iter(records.iter().map(|r| r.vfo_legal_basis.as_deref()));

    let mut notes = ListBuilder::new(StringBuilder::new());
    for r in records {
        match &r.vfo_notes {
            Some(items) => {
                for item in items {
                    notes.values().append_value(item);
                }
                notes.append(true);
            }
            None => notes.append(false),
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(name),
        Arc::new(class),
        Arc::new(section),
        Arc::new(level),
        Arc::new(description),
        Arc::new(vfo),
        Arc::new(basis),
        Arc::new(notes.finish()),
    ];

    RecordBatch::try_new(Arc::new(cleaned_schema()), columns)
}
