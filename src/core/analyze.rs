//! Analysis entry point
//!
//! Pure and synchronous: the same text and parameters always produce the
//! same result, and calls share no state.

use tracing::debug;

use crate::core::hash::content_hash;
use crate::core::labels::build_face_labels;
use crate::core::stats::{analysis_id, processing_time, statistics};
use crate::core::synth::synthesize;
use crate::entities::analysis::{AnalysisMetadata, AnalysisParams, AnalysisResult, MODEL_VERSION};

/// Produce the full analysis for a document
pub fn analyze(text: &str, params: &AnalysisParams) -> AnalysisResult {
    let seed = content_hash(text);
    let features = synthesize(seed);
    let face_labels = build_face_labels(&features);
    let statistics = statistics(&features);

    let metadata = AnalysisMetadata {
        analysis_id: analysis_id(text),
        model_version: MODEL_VERSION.to_string(),
        processing_time: processing_time(text),
        confidence_threshold: params.effective_threshold(),
    };

    debug!(
        analysis_id = %metadata.analysis_id,
        features = statistics.total_features,
        "analysis complete"
    );

    AnalysisResult {
        features,
        metadata,
        statistics,
        face_labels,
    }
}
