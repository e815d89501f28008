pub mod profile;

pub use profile::{ScriptProfile, DEVANAGARI};
