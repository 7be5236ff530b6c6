//! CSV export of the books found by a lookup.

use std::path::{Path, PathBuf};

use shelf_logging::shelf_info;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub title: String,
    pub author: String,
    pub call_number: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("export path has no file name: {0}")]
    NoFileName(String),
}

/// Writes `rows` to `path`, replacing any existing file.
pub fn export_csv(path: &Path, rows: &[ExportRow]) -> Result<ExportSummary, ExportError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::NoFileName(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Title", "Author", "Call Number", "Link"])?;
    for row in rows {
        writer.write_record([&row.title, &row.author, &row.call_number, &row.link])?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;

    let output_path = AtomicFileWriter::new(dir).write(filename, buffer)?;
    shelf_info!("Wrote {} books to {:?}", rows.len(), output_path);
    Ok(ExportSummary {
        row_count: rows.len(),
        output_path,
    })
}
