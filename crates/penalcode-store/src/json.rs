//! JSON files: raw offense input, registry configuration, cleaned output and
//! the rejection report.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use penalcode_core::{CleanedOffense, PipelineOutput, RawOffense, ReferenceRegistry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::StoreError;

/// File name of the cleaned offense set inside an output directory.
pub const CLEANED_FILE: &str = "cleaned_offenses.json";

/// File name of the rejection report inside an output directory.
pub const REPORT_FILE: &str = "offense_cleanup_report.json";

/// Where [`write_outputs`] put its two files.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub cleaned: PathBuf,
    pub report: PathBuf,
}

/// Read a JSON array of raw offense records.
pub fn read_offenses(path: &Path) -> Result<Vec<RawOffense>, StoreError> {
    let offenses: Vec<RawOffense> = read_json(path)?;
    info!(count = offenses.len(), path = %path.display(), "read raw offenses");
    Ok(offenses)
}

/// Read a JSON array of cleaned offense records (the output of a previous run).
pub fn read_cleaned(path: &Path) -> Result<Vec<CleanedOffense>, StoreError> {
    let offenses: Vec<CleanedOffense> = read_json(path)?;
    info!(count = offenses.len(), path = %path.display(), "read cleaned offenses");
    Ok(offenses)
}

/// Read a registry file (`validSections`, `vfoSections`, `canonicalClasses`).
pub fn read_registry(path: &Path) -> Result<ReferenceRegistry, StoreError> {
    let registry: ReferenceRegistry = read_json(path)?;
    info!(
        path = %path.display(),
        valid = registry.valid_sections().count(),
        vfo = registry.vfo_sections().count(),
        classes = registry.canonical_classes().len(),
        "loaded reference registry"
    );
    Ok(registry)
}

/// Write a value as pretty-printed JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the cleaned set and rejection report into `dir`, creating it if needed.
pub fn write_outputs(dir: &Path, output: &PipelineOutput) -> Result<OutputPaths, StoreError> {
    std::fs::create_dir_all(dir)?;
    let paths = OutputPaths {
        cleaned: dir.join(CLEANED_FILE),
        report: dir.join(REPORT_FILE),
    };

    write_json(&paths.cleaned, &output.cleaned)?;
    write_json(&paths.report, &output.rejected)?;
    info!(
        cleaned = output.cleaned.len(),
        rejected = output.rejected.len(),
        dir = %dir.display(),
        "wrote cleanup outputs"
    );
    Ok(paths)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|source| StoreError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
