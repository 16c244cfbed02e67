//! featsynth: deterministic machining feature analysis
//!
//! Turns the text of a CAD exchange payload (STEP, STL, ...) into a
//! reproducible feature analysis: a list of machining features, a face
//! label map and summary statistics. The same text always yields the
//! same result.

pub mod cli;
pub mod core;
pub mod entities;
pub mod payload;
pub mod request;
