//! Text-level stages: script cleanup and Unicode normalization.

pub mod normalizer;
pub mod script_cleaner;

pub use normalizer::normalize_text;
pub use script_cleaner::ScriptCleaner;
