//! Face label map construction

use std::collections::BTreeMap;

use crate::entities::analysis::FaceLabel;
use crate::entities::feature::Feature;

/// Face indices always present in the label map (0..50)
pub const LABELED_FACE_SPAN: u32 = 50;

/// Map every face id to the type of the feature that owns it
///
/// Later features overwrite earlier ones on collision. Indices below
/// [`LABELED_FACE_SPAN`] that no feature claims are labeled stock; ids above
/// the span appear only when a feature owns them.
pub fn build_face_labels(features: &[Feature]) -> BTreeMap<u32, FaceLabel> {
    let mut labels = BTreeMap::new();

    for feature in features {
        for &face in &feature.face_ids {
            labels.insert(face, FaceLabel::Feature(feature.feature_type));
        }
    }

    for face in 0..LABELED_FACE_SPAN {
        labels.entry(face).or_insert(FaceLabel::Stock);
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::synth::synthesize;
    use crate::entities::feature::FeatureType;

    #[test]
    fn test_empty_features_all_stock() {
        let labels = build_face_labels(&[]);
        assert_eq!(labels.len(), 50);
        assert!(labels.values().all(|l| l.is_stock()));
    }

    #[test]
    fn test_claimed_faces_carry_feature_type() {
        let features = synthesize(96354);
        let labels = build_face_labels(&features);

        assert_eq!(labels[&0], FaceLabel::Feature(FeatureType::Round));
        assert_eq!(labels[&31], FaceLabel::Feature(FeatureType::BlindHole));
        assert_eq!(labels[&2], FaceLabel::Stock);
        // feature_7 owns 70..=72, beyond the always-labeled span
        assert_eq!(labels[&72], FaceLabel::Feature(FeatureType::BlindHole));
        assert!(!labels.contains_key(&73));
    }

    #[test]
    fn test_stock_iff_unclaimed() {
        for seed in 0..300u32 {
            let features = synthesize(seed);
            let labels = build_face_labels(&features);

            for face in 0..LABELED_FACE_SPAN {
                let claimed = features.iter().any(|f| f.face_ids.contains(&face));
                let label = labels.get(&face).expect("face in span must be labeled");
                assert_eq!(label.is_stock(), !claimed, "seed {} face {}", seed, face);
            }
        }
    }

    #[test]
    fn test_later_feature_wins_collision() {
        let mut features = synthesize(96354);
        features[1].face_ids = vec![0];
        let labels = build_face_labels(&features);
        assert_eq!(labels[&0], FaceLabel::Feature(features[1].feature_type));
    }
}
