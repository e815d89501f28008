pub mod bridge;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::model::Detection;

pub use bridge::OcrBridge;

/// Anything that turns an image into normalized word detections.
///
/// The reconstruction core never owns an OCR engine; callers hand it the
/// output of one of these.
pub trait DetectionSource {
    fn detect(&self, image_path: &Path) -> Result<Vec<Detection>>;
}

/// Reads a JSON array of already-normalized detections.
pub fn load_detections(path: &Path) -> Result<Vec<Detection>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read detections file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse detections file {}", path.display()))
}
