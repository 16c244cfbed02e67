//! Analysis identifiers, processing time and summary statistics

use std::collections::BTreeMap;

use crate::core::hash::content_hash;
use crate::entities::analysis::Statistics;
use crate::entities::feature::Feature;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Shortest reported processing time (ms)
pub const MIN_PROCESSING_TIME: u32 = 800;

/// Width of the processing time band (ms)
const PROCESSING_TIME_SPAN: u32 = 1500;

/// Render a value in lowercase base 36
pub fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Analysis identifier: "analysis_" + base-36 content hash
pub fn analysis_id(text: &str) -> String {
    format!("analysis_{}", to_base36(content_hash(text)))
}

/// Synthetic processing time in [800, 2299] ms
///
/// Hashes the text with a "processing" suffix; since only the hash window
/// counts, long documents ignore the suffix.
pub fn processing_time(text: &str) -> u32 {
    let hash = content_hash(&format!("{}processing", text));
    MIN_PROCESSING_TIME + hash % PROCESSING_TIME_SPAN
}

/// Count, per-type occurrences and mean confidence
pub fn statistics(features: &[Feature]) -> Statistics {
    let mut feature_types = BTreeMap::new();
    for feature in features {
        *feature_types.entry(feature.feature_type).or_insert(0) += 1;
    }

    let average_confidence = if features.is_empty() {
        0.0
    } else {
        features.iter().map(|f| f.confidence).sum::<f64>() / features.len() as f64
    };

    Statistics {
        total_features: features.len(),
        feature_types,
        average_confidence,
    }
}
