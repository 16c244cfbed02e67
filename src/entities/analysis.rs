//! Analysis result entity - the full output of one analysis run

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::entities::feature::{Feature, FeatureType};

/// Model tag reported in every analysis
pub const MODEL_VERSION: &str = "AAGNet-synthetic-v1";

/// Threshold reported when the caller does not supply one
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Whether a threshold lies in [0, 1]; NaN never does
pub fn is_valid_threshold(threshold: f64) -> bool {
    (0.0..=1.0).contains(&threshold)
}

/// Caller-supplied analysis parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Minimum confidence of interest, echoed in the metadata
    #[serde(
        alias = "confidenceThreshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_threshold: Option<f64>,
}

impl AnalysisParams {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            confidence_threshold: Some(threshold),
        }
    }

    /// The threshold to report, falling back to the default
    pub fn effective_threshold(&self) -> f64 {
        self.confidence_threshold
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

/// Label assigned to a face index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceLabel {
    /// Face claimed by a synthesized feature
    Feature(FeatureType),
    /// Unclaimed face
    Stock,
}

impl FaceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceLabel::Feature(t) => t.as_str(),
            FaceLabel::Stock => "stock",
        }
    }

    pub fn is_stock(&self) -> bool {
        matches!(self, FaceLabel::Stock)
    }
}

impl std::fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FaceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisMetadata {
    /// "analysis_" + base-36 content hash
    pub analysis_id: String,

    pub model_version: String,

    /// Synthetic processing time in milliseconds
    pub processing_time: u32,

    pub confidence_threshold: f64,
}

/// Summary statistics over the feature list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_features: usize,

    /// Occurrences per feature type (only types that occur)
    pub feature_types: BTreeMap<FeatureType, usize>,

    /// Mean confidence, 0 when there are no features
    pub average_confidence: f64,
}

/// Complete analysis output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub features: Vec<Feature>,

    pub metadata: AnalysisMetadata,

    pub statistics: Statistics,

    /// Face index to label; covers at least 0..50
    pub face_labels: BTreeMap<u32, FaceLabel>,
}

impl AnalysisResult {
    /// Features at or above the reported confidence threshold
    pub fn confident_features(&self) -> impl Iterator<Item = &Feature> {
        let threshold = self.metadata.confidence_threshold;
        self.features
            .iter()
            .filter(move |f| f.confidence >= threshold)
    }
}
