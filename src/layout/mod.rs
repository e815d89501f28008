//! Geometry-driven stages: detections to lines, lines to composed text.

pub mod assemble;
pub mod cluster;
pub mod compose;

pub use assemble::assemble_line;
pub use cluster::cluster_lines;
pub use compose::compose_paragraphs;
