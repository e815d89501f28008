use std::io::{Cursor, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::model::PageDocument;
use crate::export::{write_atomically, Exporter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Minimal WordprocessingML package: one Word paragraph per text paragraph,
/// line breaks inside a paragraph kept as `<w:br/>`.
#[derive(Debug, Clone)]
pub struct DocxExporter {
    out_dir: PathBuf,
}

impl DocxExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    fn document_xml(text: &str) -> String {
        let mut body = String::new();
        for paragraph in text.split("\n\n") {
            body.push_str("<w:p><w:r><w:rPr><w:rFonts w:cs=\"Mangal\"/><w:lang w:bidi=\"hi-IN\"/></w:rPr>");
            for (idx, line) in paragraph.split('\n').enumerate() {
                if idx > 0 {
                    body.push_str("<w:br/>");
                }
                body.push_str("<w:t xml:space=\"preserve\">");
                body.push_str(&escape(line));
                body.push_str("</w:t>");
            }
            body.push_str("</w:r></w:p>");
        }
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        )
    }

    fn package(text: &str) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("word/document.xml", Self::document_xml(text)),
        ];
        for (name, data) in parts {
            writer
                .start_file(name, options)
                .with_context(|| format!("failed to start docx part {name}"))?;
            writer.write_all(data.as_bytes())?;
        }
        let cursor = writer.finish().context("failed to finish docx archive")?;
        Ok(cursor.into_inner())
    }
}

impl Exporter for DocxExporter {
    fn export(&self, document: &PageDocument) -> Result<PathBuf> {
        let bytes = Self::package(document.text())?;
        write_atomically(&self.out_dir, "extracted_text.docx", &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Reconstruction;
    use std::fs::File;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn splits_paragraphs_and_escapes_text() {
        let xml = DocxExporter::document_xml("पहला <अनुच्छेद>\nजारी\n\nदूसरा & अंतिम");
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert_eq!(xml.matches("<w:br/>").count(), 1);
        assert!(xml.contains("पहला &lt;अनुच्छेद&gt;"));
        assert!(xml.contains("दूसरा &amp; अंतिम"));
    }

    #[test]
    fn writes_readable_package() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let document = PageDocument {
            source: None,
            script: "devanagari".to_string(),
            detection_count: 1,
            lines: vec![],
            result: Reconstruction::Text("नमस्ते । दुनिया".to_string()),
        };
        let path = DocxExporter::new(dir.path().to_path_buf()).export(&document)?;

        let mut archive = ZipArchive::new(File::open(path)?)?;
        assert!(archive.by_name("[Content_Types].xml").is_ok());
        let mut xml = String::new();
        archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
        assert!(xml.contains("नमस्ते । दुनिया"));
        Ok(())
    }
}
