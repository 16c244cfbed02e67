//! Feature synthesis
//!
//! Every value is drawn from one [`SeededSequence`] in a fixed order. Each
//! dimension branch draws exactly its own number of values; adding, removing
//! or reordering a draw shifts every feature that follows.

use tracing::debug;

use crate::core::sequence::SeededSequence;
use crate::entities::feature::{
    BoundingBox, Dimensions, Extent, Feature, FeatureType, MachiningParameters, Point3,
    CHAMFER_ANGLE,
};

/// Fewest features an analysis produces
pub const MIN_FEATURES: usize = 4;

/// Number of distinct feature counts above the minimum (4..=8)
const FEATURE_COUNT_SPAN: usize = 5;

/// Synthesize the ordered feature list for a seed
pub fn synthesize(seed: u32) -> Vec<Feature> {
    let mut seq = SeededSequence::new(seed);
    let count = seq.next_index(FEATURE_COUNT_SPAN) + MIN_FEATURES;

    debug!(seed, count, "synthesizing features");

    (0..count).map(|index| synthesize_feature(&mut seq, index)).collect()
}

fn synthesize_feature(seq: &mut SeededSequence, index: usize) -> Feature {
    let feature_type = draw_feature_type(seq);
    let confidence = seq.next_in(0.75, 0.24);
    let position = draw_point(seq);
    let dimensions = draw_dimensions(seq, feature_type);
    let machining_parameters = draw_machining_parameters(seq, feature_type);
    let face_ids = face_ids_for(index);
    let bounding_box = draw_bounding_box(seq);

    Feature {
        id: Feature::label(index),
        feature_type,
        confidence,
        position,
        dimensions,
        machining_parameters,
        face_ids,
        bounding_box,
    }
}

fn draw_feature_type(seq: &mut SeededSequence) -> FeatureType {
    let index = seq.next_index(FeatureType::ALL.len());
    // next_value() < 1 keeps the index in range
    FeatureType::ALL[index.min(FeatureType::ALL.len() - 1)]
}

/// Point within the 100 x 80 x 25 working envelope
fn draw_point(seq: &mut SeededSequence) -> Point3 {
    let x = seq.next_centered(100.0);
    let y = seq.next_centered(80.0);
    let z = seq.next_centered(25.0);
    Point3::new(x, y, z)
}

fn draw_dimensions(seq: &mut SeededSequence, feature_type: FeatureType) -> Dimensions {
    match feature_type {
        FeatureType::ThroughHole => Dimensions::ThroughHole {
            diameter: seq.next_in(5.0, 15.0),
            depth: Extent::Through,
        },
        FeatureType::BlindHole => {
            let diameter = seq.next_in(5.0, 15.0);
            let depth = seq.next_in(10.0, 20.0);
            Dimensions::BlindHole { diameter, depth }
        }
        FeatureType::RectangularPocket => {
            let width = seq.next_in(10.0, 30.0);
            let height = seq.next_in(8.0, 20.0);
            let depth = seq.next_in(5.0, 15.0);
            Dimensions::RectangularPocket {
                width,
                height,
                depth,
            }
        }
        FeatureType::CircularEndPocket => {
            let diameter = seq.next_in(8.0, 20.0);
            let depth = seq.next_in(5.0, 15.0);
            Dimensions::CircularEndPocket { diameter, depth }
        }
        FeatureType::Chamfer => Dimensions::Chamfer {
            width: seq.next_in(1.0, 3.0),
            angle: CHAMFER_ANGLE,
        },
        FeatureType::RectangularThroughSlot => {
            let width = seq.next_in(5.0, 15.0);
            let height = seq.next_in(8.0, 20.0);
            Dimensions::RectangularThroughSlot {
                width,
                height,
                depth: Extent::Through,
            }
        }
        FeatureType::TriangularPassage => Dimensions::TriangularPassage {
            side_length: seq.next_in(10.0, 15.0),
            depth: Extent::Through,
        },
        FeatureType::Round => Dimensions::Round {
            radius: seq.next_in(1.0, 5.0),
        },
    }
}

fn draw_machining_parameters(
    seq: &mut SeededSequence,
    feature_type: FeatureType,
) -> MachiningParameters {
    let tool_diameter = seq.next_in(2.0, 10.0);
    let spindle_speed = seq.next_in(1000.0, 4000.0);
    let feed_rate = seq.next_in(100.0, 500.0);
    let cutting_depth = seq.next_in(0.5, 2.0);

    MachiningParameters {
        tool_type: feature_type.tool_type(),
        tool_diameter,
        spindle_speed,
        feed_rate,
        cutting_depth,
    }
}

/// Faces owned by the feature at `index`: 2 to 4 ids starting at index * 10
pub fn face_ids_for(index: usize) -> Vec<u32> {
    let base = (index * 10) as u32;
    let count = (index % 3) as u32 + 2;
    (0..count).map(|j| base + j).collect()
}

fn draw_bounding_box(seq: &mut SeededSequence) -> BoundingBox {
    let center = draw_point(seq);
    let size_x = seq.next_in(5.0, 20.0);
    let size_y = seq.next_in(5.0, 15.0);
    let size_z = seq.next_in(2.0, 10.0);
    BoundingBox::centered(center, Point3::new(size_x, size_y, size_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::content_hash;

    #[test]
    fn test_face_ids_pattern() {
        assert_eq!(face_ids_for(0), vec![0, 1]);
        assert_eq!(face_ids_for(1), vec![10, 11, 12]);
        assert_eq!(face_ids_for(2), vec![20, 21, 22, 23]);
        assert_eq!(face_ids_for(3), vec![30, 31]);
        assert_eq!(face_ids_for(7), vec![70, 71, 72]);
    }

    #[test]
    fn test_feature_count_in_range() {
        for seed in (0..5000u32).step_by(7) {
            let features = synthesize(seed);
            assert!(
                (4..=8).contains(&features.len()),
                "seed {} gave {} features",
                seed,
                features.len()
            );
        }
    }

    #[test]
    fn test_confidence_in_range() {
        for seed in (0..2000u32).step_by(3) {
            for feat in synthesize(seed) {
                assert!(feat.confidence >= 0.75 && feat.confidence < 0.99);
            }
        }
    }

    #[test]
    fn test_dimensions_match_feature_type() {
        for seed in 0..500u32 {
            for feat in synthesize(seed) {
                assert_eq!(feat.dimensions.feature_type(), feat.feature_type);
                assert_eq!(
                    feat.machining_parameters.tool_type,
                    feat.feature_type.tool_type()
                );
            }
        }
    }

    #[test]
    fn test_ids_follow_generation_order() {
        let features = synthesize(content_hash("bracket.step"));
        for (i, feat) in features.iter().enumerate() {
            assert_eq!(feat.id, format!("feature_{}", i));
            assert_eq!(feat.face_ids, face_ids_for(i));
        }
    }

    #[test]
    fn test_parameter_ranges() {
        for seed in (0..3000u32).step_by(11) {
            for feat in synthesize(seed) {
                let mp = &feat.machining_parameters;
                assert!(mp.tool_diameter >= 2.0 && mp.tool_diameter < 12.0);
                assert!(mp.spindle_speed >= 1000.0 && mp.spindle_speed < 5000.0);
                assert!(mp.feed_rate >= 100.0 && mp.feed_rate < 600.0);
                assert!(mp.cutting_depth >= 0.5 && mp.cutting_depth < 2.5);

                assert!(feat.position.x.abs() <= 50.0);
                assert!(feat.position.y.abs() <= 40.0);
                assert!(feat.position.z.abs() <= 12.5);

                let size = feat.bounding_box.size();
                assert!(size.x >= 5.0 - 1e-9 && size.x < 25.0 + 1e-9);
                assert!(size.y >= 5.0 - 1e-9 && size.y < 20.0 + 1e-9);
                assert!(size.z >= 2.0 - 1e-9 && size.z < 12.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_seed_96354_pinned() {
        let features = synthesize(96354);
        assert_eq!(features.len(), 8);

        let types: Vec<FeatureType> = features.iter().map(|f| f.feature_type).collect();
        assert_eq!(
            types,
            vec![
                FeatureType::Round,
                FeatureType::Round,
                FeatureType::Round,
                FeatureType::BlindHole,
                FeatureType::TriangularPassage,
                FeatureType::RectangularThroughSlot,
                FeatureType::ThroughHole,
                FeatureType::BlindHole,
            ]
        );

        let first = &features[0];
        assert_eq!(first.confidence, 0.9770216049382716);
        assert_eq!(
            first.position,
            Point3::new(-25.556412894375857, 16.74862825788752, 11.217849794238683)
        );
        assert_eq!(
            first.dimensions,
            Dimensions::Round {
                radius: 2.000793038408779
            }
        );
        assert_eq!(first.machining_parameters.tool_diameter, 10.86531207133059);
        assert_eq!(first.machining_parameters.spindle_speed, 4352.314814814815);
        assert_eq!(first.machining_parameters.feed_rate, 190.67215363511662);
        assert_eq!(first.machining_parameters.cutting_depth, 2.289446159122085);
        assert_eq!(
            first.bounding_box.min,
            Point3::new(-58.86355452674897, -0.7780135459533604, -10.089141803840878)
        );
        assert_eq!(
            first.bounding_box.max,
            Point3::new(-34.99961419753086, 17.523555384087793, -7.380851337448559)
        );
    }
}
