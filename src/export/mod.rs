pub mod docx_export;
pub mod json_export;
pub mod text_export;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::core::model::PageDocument;

pub use docx_export::DocxExporter;
pub use json_export::JsonExporter;
pub use text_export::TextExporter;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
    Docx,
}

pub trait Exporter {
    /// Writes the document and returns the path of the created file.
    fn export(&self, document: &PageDocument) -> Result<PathBuf>;
}

/// Writes `data` to `dir/file_name` through a temp file in the same
/// directory, so a failed export never leaves a half-written file behind.
pub(crate) fn write_atomically(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(file_name);

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(&path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = data.len(), "exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_atomically(dir.path(), "out.txt", b"first")?;
        let path = write_atomically(dir.path(), "out.txt", b"second")?;
        assert_eq!(fs::read_to_string(path)?, "second");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
