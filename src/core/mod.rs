//! Core module - deterministic analysis engine and configuration

pub mod analyze;
pub mod config;
pub mod hash;
pub mod labels;
pub mod sequence;
pub mod stats;
pub mod synth;

pub use analyze::analyze;
pub use config::Config;
pub use hash::{content_hash, HASH_WINDOW};
pub use labels::{build_face_labels, LABELED_FACE_SPAN};
pub use sequence::SeededSequence;
pub use stats::{analysis_id, processing_time, statistics, to_base36};
pub use synth::synthesize;
