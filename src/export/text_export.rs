use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::PageDocument;
use crate::export::{write_atomically, Exporter};

#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for TextExporter {
    fn export(&self, document: &PageDocument) -> Result<PathBuf> {
        let mut text = document.text().to_string();
        text.push('\n');
        write_atomically(&self.out_dir, "extracted_text.txt", text.as_bytes())
    }
}
