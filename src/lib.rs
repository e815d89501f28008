pub mod cleanup;
pub mod core;
pub mod export;
pub mod layout;
pub mod logging;
pub mod ocr;
pub mod pipeline;
pub mod script;

pub use crate::core::config::{ReflowConfig, ScriptMode};
pub use crate::core::error::ReflowError;
pub use crate::core::model::{Detection, PageDocument, Reconstruction};
pub use pipeline::TextReconstructor;
