use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// Shown when the OCR collaborator produced no detections at all.
pub const NO_DATA_PLACEHOLDER: &str = "⚠️ No OCR data found.";

/// Shown when every detection was scrubbed away by the script filters.
pub const NO_TEXT_PLACEHOLDER: &str = "⚠️ No recognizable text found.";

/// One recognized word or phrase as reported by the OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub text: String,
    pub bbox: BBox,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl Detection {
    pub fn new(text: impl Into<String>, bbox: BBox, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }

    /// Raw detection texts in input order, one per line.
    ///
    /// This is what a caller shows when reconstruction fails.
    pub fn raw_text_fallback(detections: &[Detection]) -> String {
        detections
            .iter()
            .map(|d| d.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Detections that share one horizontal band, in clustering order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub members: Vec<&'a Detection>,
}

impl<'a> Line<'a> {
    pub fn bbox(&self) -> Option<BBox> {
        BBox::mean(self.members.iter().map(|d| &d.bbox))
    }
}

/// A line after word ordering and scrubbing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssembledLine {
    pub text: String,
    pub bbox: BBox,
}

/// Outcome of a reconstruction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Reconstruction {
    Text(String),
    NoData,
    NoText,
}

impl Reconstruction {
    /// Display text, substituting the placeholders for empty outcomes.
    pub fn as_str(&self) -> &str {
        match self {
            Reconstruction::Text(text) => text,
            Reconstruction::NoData => NO_DATA_PLACEHOLDER,
            Reconstruction::NoText => NO_TEXT_PLACEHOLDER,
        }
    }

    /// True for both placeholder outcomes.
    pub fn is_empty(&self) -> bool {
        !matches!(self, Reconstruction::Text(_))
    }
}

impl fmt::Display for Reconstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the exporters need about one processed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Name of the script profile the page was cleaned with.
    #[serde(default)]
    pub script: String,
    pub detection_count: usize,
    pub lines: Vec<AssembledLine>,
    pub result: Reconstruction,
}

impl PageDocument {
    pub fn text(&self) -> &str {
        self.result.as_str()
    }
}
