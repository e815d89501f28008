use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cleanup::{normalize_text, ScriptCleaner};
use crate::core::config::ReflowConfig;
use crate::core::error::{ReflowError, Result};
use crate::core::model::{AssembledLine, Detection, PageDocument, Reconstruction};
use crate::export::{DocxExporter, ExportFormat, Exporter, JsonExporter, TextExporter};
use crate::layout::{assemble_line, cluster_lines, compose_paragraphs};
use crate::script::{ScriptProfile, DEVANAGARI};

/// Runs the full detections-to-text pipeline for one page.
///
/// Holds no state between calls; the same instance can process any number
/// of pages.
#[derive(Debug, Clone)]
pub struct TextReconstructor {
    config: ReflowConfig,
    profile: &'static ScriptProfile,
}

impl TextReconstructor {
    pub fn new(config: ReflowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            profile: &DEVANAGARI,
        })
    }

    pub fn with_profile(mut self, profile: &'static ScriptProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Rejects detections whose geometry or confidence would poison the
    /// gap statistics.
    pub fn validate(detections: &[Detection]) -> Result<()> {
        for (index, det) in detections.iter().enumerate() {
            if let Some(reason) = det.bbox.degeneracy() {
                return Err(ReflowError::DegenerateGeometry {
                    index,
                    text: det.text.clone(),
                    bbox: det.bbox,
                    reason,
                });
            }
            if !det.confidence.is_finite() || !(0.0..=1.0).contains(&det.confidence) {
                return Err(ReflowError::InvalidConfidence {
                    index,
                    text: det.text.clone(),
                    confidence: det.confidence,
                });
            }
        }
        Ok(())
    }

    /// Validates, clusters and assembles detections into ordered lines.
    pub fn assemble(&self, detections: &[Detection]) -> Result<Vec<AssembledLine>> {
        Self::validate(detections)?;
        let lines = cluster_lines(detections, self.config.line_y_threshold);
        let assembled: Vec<AssembledLine> = lines
            .iter()
            .filter_map(|line| assemble_line(line, self.profile))
            .collect();
        debug!(
            script = self.profile.name,
            detections = detections.len(),
            lines = assembled.len(),
            "clustered detections into lines"
        );
        Ok(assembled)
    }

    pub fn reconstruct(&self, detections: &[Detection]) -> Result<Reconstruction> {
        if detections.is_empty() {
            warn!("no detections supplied");
            return Ok(Reconstruction::NoData);
        }
        let lines = self.assemble(detections)?;
        Ok(self.finish(&lines))
    }

    /// Like [`reconstruct`](Self::reconstruct) but keeps the intermediate
    /// lines for reporting.
    pub fn build_document(
        &self,
        detections: &[Detection],
        source: Option<String>,
    ) -> Result<PageDocument> {
        if detections.is_empty() {
            warn!("no detections supplied");
            return Ok(PageDocument {
                source,
                script: self.profile.name.to_string(),
                detection_count: 0,
                lines: Vec::new(),
                result: Reconstruction::NoData,
            });
        }
        let lines = self.assemble(detections)?;
        let result = self.finish(&lines);
        Ok(PageDocument {
            source,
            script: self.profile.name.to_string(),
            detection_count: detections.len(),
            lines,
            result,
        })
    }

    fn finish(&self, lines: &[AssembledLine]) -> Reconstruction {
        if lines.iter().all(|line| line.text.is_empty()) {
            warn!("every line was emptied by the script allow-list");
            return Reconstruction::NoText;
        }

        let composed = compose_paragraphs(lines, &self.config, self.profile);
        let cleaned = ScriptCleaner::from_config(self.profile, &self.config).clean(&composed);
        let normalized = normalize_text(&cleaned, self.profile);
        debug!(
            composed_chars = composed.chars().count(),
            cleaned_chars = cleaned.chars().count(),
            output_lines = normalized.lines().count(),
            "composed and cleaned text"
        );

        if normalized.trim().is_empty() {
            warn!(
                script = self.profile.name,
                mode = ?self.config.script_mode,
                "no text left after cleanup"
            );
            Reconstruction::NoText
        } else {
            Reconstruction::Text(normalized)
        }
    }
}

/// Writes `document` in each requested format into `output`.
pub fn export_document(
    document: &PageDocument,
    output: &Path,
    formats: &[ExportFormat],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = match format {
            ExportFormat::Text => TextExporter::new(output.to_path_buf()).export(document)?,
            ExportFormat::Json => JsonExporter::new(output.to_path_buf()).export(document)?,
            ExportFormat::Docx => DocxExporter::new(output.to_path_buf()).export(document)?,
        };
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ScriptMode;
    use crate::core::geometry::BBox;
    use crate::core::model::{NO_DATA_PLACEHOLDER, NO_TEXT_PLACEHOLDER};
    use pretty_assertions::assert_eq;

    fn det(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> Detection {
        Detection::new(text, BBox::new(x0, y0, x1, y1), 0.9)
    }

    fn reconstructor(mode: ScriptMode) -> TextReconstructor {
        TextReconstructor::new(ReflowConfig::default().with_script_mode(mode)).unwrap()
    }

    #[test]
    fn empty_input_yields_no_data_placeholder() {
        let result = reconstructor(ScriptMode::ScriptOnly).reconstruct(&[]).unwrap();
        assert_eq!(result, Reconstruction::NoData);
        assert_eq!(result.as_str(), NO_DATA_PLACEHOLDER);
        assert!(!result.as_str().is_empty());
    }

    #[test]
    fn symbols_only_yield_no_text_placeholder() {
        let dets = vec![det("@@@", 0.1, 0.1, 0.2, 0.12), det("###", 0.1, 0.5, 0.2, 0.52)];
        let result = reconstructor(ScriptMode::Mixed).reconstruct(&dets).unwrap();
        assert_eq!(result, Reconstruction::NoText);
        assert_eq!(result.to_string(), NO_TEXT_PLACEHOLDER);
    }

    #[test]
    fn latin_only_page_is_no_text_in_script_only_mode() {
        let dets = vec![det("Hello world", 0.1, 0.1, 0.5, 0.12)];
        let result = reconstructor(ScriptMode::ScriptOnly).reconstruct(&dets).unwrap();
        assert_eq!(result, Reconstruction::NoText);
    }

    #[test]
    fn rejects_out_of_range_bbox_with_index() {
        let dets = vec![det("ठीक", 0.1, 0.1, 0.2, 0.12), det("गलत", 0.1, 0.2, 1.5, 0.22)];
        let err = reconstructor(ScriptMode::ScriptOnly)
            .reconstruct(&dets)
            .unwrap_err();
        match err {
            ReflowError::DegenerateGeometry { index, text, .. } => {
                assert_eq!(index, 1);
                assert_eq!(text, "गलत");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_nan_geometry() {
        let dets = vec![det("क", f32::NAN, 0.1, 0.2, 0.12)];
        let err = reconstructor(ScriptMode::Mixed).reconstruct(&dets).unwrap_err();
        assert!(matches!(err, ReflowError::DegenerateGeometry { index: 0, .. }));
    }

    #[test]
    fn rejects_invalid_confidence() {
        let mut bad = det("क", 0.1, 0.1, 0.2, 0.12);
        bad.confidence = 1.5;
        let err = reconstructor(ScriptMode::Mixed).reconstruct(&[bad]).unwrap_err();
        assert!(matches!(err, ReflowError::InvalidConfidence { index: 0, .. }));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ReflowConfig {
            paragraph_gap_ratio: f32::INFINITY,
            ..ReflowConfig::default()
        };
        assert!(TextReconstructor::new(config).is_err());
    }

    #[test]
    fn reconstructs_single_paragraph() {
        let dets = vec![
            det("दुनिया", 0.3, 0.10, 0.5, 0.12),
            det("नमस्ते", 0.1, 0.10, 0.28, 0.12),
        ];
        let result = reconstructor(ScriptMode::ScriptOnly).reconstruct(&dets).unwrap();
        assert_eq!(result, Reconstruction::Text("नमस्ते दुनिया".to_string()));
    }

    #[test]
    fn ocr_pipes_and_colons_become_dandas_and_visarga() {
        let dets = vec![
            det("दु:ख||", 0.6, 0.1, 0.8, 0.12),
            det("यह सही है|", 0.1, 0.1, 0.5, 0.12),
        ];
        let result = reconstructor(ScriptMode::ScriptOnly).reconstruct(&dets).unwrap();
        assert_eq!(result.as_str(), "यह सही है । दुःख ॥");
    }

    #[test]
    fn custom_profile_changes_allow_list() {
        static WITH_PERIOD: ScriptProfile = ScriptProfile {
            name: "devanagari-latin-period",
            generic_punctuation: &[',', '!', '?', '"', '\'', '-', '.'],
            ..DEVANAGARI
        };
        let dets = vec![det("Done. ठीक", 0.1, 0.1, 0.5, 0.12)];

        let plain = reconstructor(ScriptMode::Mixed).reconstruct(&dets).unwrap();
        assert_eq!(plain.as_str(), "Done ठीक");

        let custom = reconstructor(ScriptMode::Mixed)
            .with_profile(&WITH_PERIOD)
            .build_document(&dets, None)
            .unwrap();
        assert_eq!(custom.text(), "Done . ठीक");
        assert_eq!(custom.script, "devanagari-latin-period");
    }

    #[test]
    fn document_keeps_assembled_lines() {
        let dets = vec![
            det("एक", 0.1, 0.09, 0.2, 0.11),
            det("दो", 0.3, 0.10, 0.4, 0.12),
            det("तीन", 0.1, 0.49, 0.2, 0.51),
        ];
        let doc = reconstructor(ScriptMode::ScriptOnly)
            .build_document(&dets, Some("page.png".into()))
            .unwrap();
        assert_eq!(doc.detection_count, 3);
        assert_eq!(doc.script, "devanagari");
        let texts: Vec<&str> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["एक दो", "तीन"]);
        assert!(!doc.result.is_empty());
    }
}
