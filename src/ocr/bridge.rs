use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::geometry::BBox;
use crate::core::model::Detection;
use crate::ocr::DetectionSource;

/// One raw EasyOCR result: a pixel-space polygon, text and score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    #[serde(rename = "box")]
    pub polygon: Vec<[f32; 2]>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    0.5
}

impl OcrToken {
    /// Bounding rectangle of the polygon, normalized by the image size.
    pub fn to_detection(&self, width: u32, height: u32) -> Option<Detection> {
        let text = self.text.trim();
        if text.is_empty() || self.polygon.is_empty() {
            return None;
        }
        let xs = self.polygon.iter().map(|p| p[0]);
        let ys = self.polygon.iter().map(|p| p[1]);
        let x0 = xs.clone().fold(f32::INFINITY, f32::min);
        let x1 = xs.fold(f32::NEG_INFINITY, f32::max);
        let y0 = ys.clone().fold(f32::INFINITY, f32::min);
        let y1 = ys.fold(f32::NEG_INFINITY, f32::max);
        Some(Detection::new(
            text,
            BBox::from_pixels(x0, y0, x1, y1, width, height),
            self.confidence.clamp(0.0, 1.0),
        ))
    }
}

/// Runs an external OCR script that prints EasyOCR results as JSON.
///
/// The script is invoked as `python3 <script> --image <path> --lang <langs>`
/// and must print an array of `{"text", "box": [[x, y]; 4], "confidence"}`.
#[derive(Debug, Clone)]
pub struct OcrBridge {
    python: PathBuf,
    script_path: PathBuf,
    lang: String,
}

impl OcrBridge {
    pub fn new(script_path: PathBuf) -> Self {
        Self {
            python: PathBuf::from("python3"),
            script_path,
            lang: "hi,en".to_string(),
        }
    }

    pub fn with_python(mut self, python: PathBuf) -> Self {
        self.python = python;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    pub fn run(&self, image_path: &Path) -> Result<Vec<OcrToken>> {
        let output = Command::new(&self.python)
            .arg(&self.script_path)
            .arg("--image")
            .arg(image_path)
            .arg("--lang")
            .arg(&self.lang)
            .output()
            .with_context(|| "failed to invoke OCR bridge script")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR bridge failed: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_tokens(&stdout)
    }
}

pub fn parse_tokens(json: &str) -> Result<Vec<OcrToken>> {
    serde_json::from_str(json).with_context(|| "failed to parse OCR JSON response")
}

/// Normalizes tokens against the image size; zero-sized images are refused.
pub fn tokens_to_detections(tokens: &[OcrToken], width: u32, height: u32) -> Result<Vec<Detection>> {
    if width == 0 || height == 0 {
        anyhow::bail!("image has zero size ({width}x{height})");
    }
    Ok(tokens
        .iter()
        .filter_map(|token| token.to_detection(width, height))
        .collect())
}

impl DetectionSource for OcrBridge {
    fn detect(&self, image_path: &Path) -> Result<Vec<Detection>> {
        let (width, height) = image::image_dimensions(image_path)
            .with_context(|| format!("failed to read image size of {}", image_path.display()))?;
        let tokens = self.run(image_path)?;
        tracing::debug!(tokens = tokens.len(), width, height, "OCR bridge returned tokens");
        tokens_to_detections(&tokens, width, height)
    }
}
