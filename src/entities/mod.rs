//! Entity type definitions

pub mod analysis;
pub mod feature;

pub use analysis::{
    AnalysisMetadata, AnalysisParams, AnalysisResult, FaceLabel, Statistics,
    DEFAULT_CONFIDENCE_THRESHOLD, MODEL_VERSION,
};
pub use feature::{
    BoundingBox, Dimensions, Extent, Feature, FeatureType, MachiningParameters, Point3, ToolType,
    UnknownFeatureType,
};
