use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::PageDocument;
use crate::export::{write_atomically, Exporter};

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, document: &PageDocument) -> Result<PathBuf> {
        let data = serde_json::to_string_pretty(document)?;
        write_atomically(&self.out_dir, "document.json", data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::{AssembledLine, Reconstruction};
    use std::fs;

    #[test]
    fn round_trips_lines_and_result() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let document = PageDocument {
            source: Some("scan.png".to_string()),
            script: "devanagari".to_string(),
            detection_count: 2,
            lines: vec![AssembledLine {
                text: "नमस्ते दुनिया".to_string(),
                bbox: BBox::new(0.25, 0.125, 0.75, 0.25),
            }],
            result: Reconstruction::Text("नमस्ते दुनिया".to_string()),
        };
        let path = JsonExporter::new(dir.path().to_path_buf()).export(&document)?;
        let parsed: PageDocument = serde_json::from_str(&fs::read_to_string(path)?)?;
        assert_eq!(parsed.source.as_deref(), Some("scan.png"));
        assert_eq!(parsed.script, "devanagari");
        assert_eq!(parsed.lines, document.lines);
        assert_eq!(parsed.result, document.result);
        Ok(())
    }
}
