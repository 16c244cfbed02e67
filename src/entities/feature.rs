//! Feature entity - Synthesized machining features

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Machining feature classification
///
/// The variant order is fixed: the synthesizer maps a drawn index onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    ThroughHole,
    BlindHole,
    RectangularPocket,
    CircularEndPocket,
    Chamfer,
    RectangularThroughSlot,
    TriangularPassage,
    Round,
}

impl FeatureType {
    /// All feature types in generation order
    pub const ALL: [FeatureType; 8] = [
        FeatureType::ThroughHole,
        FeatureType::BlindHole,
        FeatureType::RectangularPocket,
        FeatureType::CircularEndPocket,
        FeatureType::Chamfer,
        FeatureType::RectangularThroughSlot,
        FeatureType::TriangularPassage,
        FeatureType::Round,
    ];

    /// Look up a type by its generation index (0..8)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::ThroughHole => "through_hole",
            FeatureType::BlindHole => "blind_hole",
            FeatureType::RectangularPocket => "rectangular_pocket",
            FeatureType::CircularEndPocket => "circular_end_pocket",
            FeatureType::Chamfer => "chamfer",
            FeatureType::RectangularThroughSlot => "rectangular_through_slot",
            FeatureType::TriangularPassage => "triangular_passage",
            FeatureType::Round => "round",
        }
    }

    /// Cutting tool used to machine this feature type
    pub fn tool_type(&self) -> ToolType {
        match self {
            FeatureType::ThroughHole | FeatureType::BlindHole => ToolType::Drill,
            FeatureType::RectangularPocket
            | FeatureType::CircularEndPocket
            | FeatureType::RectangularThroughSlot
            | FeatureType::TriangularPassage => ToolType::EndMill,
            FeatureType::Chamfer => ToolType::ChamferMill,
            FeatureType::Round => ToolType::BallEndMill,
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for a feature type tag outside the known set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feature type '{0}'")]
pub struct UnknownFeatureType(pub String);

impl FromStr for FeatureType {
    type Err = UnknownFeatureType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFeatureType(s.to_string()))
    }
}

/// Cutting tool classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Drill,
    EndMill,
    BallEndMill,
    ChamferMill,
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolType::Drill => write!(f, "drill"),
            ToolType::EndMill => write!(f, "end_mill"),
            ToolType::BallEndMill => write!(f, "ball_end_mill"),
            ToolType::ChamferMill => write!(f, "chamfer_mill"),
        }
    }
}

/// Depth marker for features that cut all the way through the stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    Through,
}

/// Fixed chamfer angle in degrees
pub const CHAMFER_ANGLE: f64 = 45.0;

/// Type-specific dimensions (mm)
///
/// Serialized without a tag; the owning feature's `type` says which shape it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dimensions {
    ThroughHole { diameter: f64, depth: Extent },
    BlindHole { diameter: f64, depth: f64 },
    RectangularPocket { width: f64, height: f64, depth: f64 },
    CircularEndPocket { diameter: f64, depth: f64 },
    Chamfer { width: f64, angle: f64 },
    RectangularThroughSlot { width: f64, height: f64, depth: Extent },
    TriangularPassage { side_length: f64, depth: Extent },
    Round { radius: f64 },
}

impl Dimensions {
    /// The feature type this dimension shape belongs to
    pub fn feature_type(&self) -> FeatureType {
        match self {
            Dimensions::ThroughHole { .. } => FeatureType::ThroughHole,
            Dimensions::BlindHole { .. } => FeatureType::BlindHole,
            Dimensions::RectangularPocket { .. } => FeatureType::RectangularPocket,
            Dimensions::CircularEndPocket { .. } => FeatureType::CircularEndPocket,
            Dimensions::Chamfer { .. } => FeatureType::Chamfer,
            Dimensions::RectangularThroughSlot { .. } => FeatureType::RectangularThroughSlot,
            Dimensions::TriangularPassage { .. } => FeatureType::TriangularPassage,
            Dimensions::Round { .. } => FeatureType::Round,
        }
    }

    /// Compact one-line rendering for tables (e.g. "d=12.50 x through")
    pub fn summary(&self) -> String {
        match self {
            Dimensions::ThroughHole { diameter, .. } => format!("d={:.2} x through", diameter),
            Dimensions::BlindHole { diameter, depth } => format!("d={:.2} x {:.2}", diameter, depth),
            Dimensions::RectangularPocket {
                width,
                height,
                depth,
            } => format!("{:.2} x {:.2} x {:.2}", width, height, depth),
            Dimensions::CircularEndPocket { diameter, depth } => {
                format!("d={:.2} x {:.2}", diameter, depth)
            }
            Dimensions::Chamfer { width, angle } => format!("{:.2} @ {}deg", width, angle),
            Dimensions::RectangularThroughSlot { width, height, .. } => {
                format!("{:.2} x {:.2} x through", width, height)
            }
            Dimensions::TriangularPassage { side_length, .. } => {
                format!("side={:.2} x through", side_length)
            }
            Dimensions::Round { radius } => format!("r={:.2}", radius),
        }
    }
}

/// A point in model space (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Build a box centered at `center` with full extents `size`
    pub fn centered(center: Point3, size: Point3) -> Self {
        Self {
            min: Point3::new(
                center.x - size.x / 2.0,
                center.y - size.y / 2.0,
                center.z - size.z / 2.0,
            ),
            max: Point3::new(
                center.x + size.x / 2.0,
                center.y + size.y / 2.0,
                center.z + size.z / 2.0,
            ),
        }
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn size(&self) -> Point3 {
        Point3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Suggested machining parameters for a feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachiningParameters {
    pub tool_type: ToolType,

    /// Tool diameter (mm)
    pub tool_diameter: f64,

    /// Spindle speed (rpm)
    pub spindle_speed: f64,

    /// Feed rate (mm/min)
    pub feed_rate: f64,

    /// Depth of cut per pass (mm)
    pub cutting_depth: f64,
}

/// A synthesized machining feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Sequence label (feature_<index>)
    pub id: String,

    #[serde(rename = "type")]
    pub feature_type: FeatureType,

    /// Confidence in [0.75, 0.99)
    pub confidence: f64,

    pub position: Point3,

    pub dimensions: Dimensions,

    pub machining_parameters: MachiningParameters,

    /// Face indices owned by this feature
    pub face_ids: Vec<u32>,

    pub bounding_box: BoundingBox,
}

impl Feature {
    /// Label for the feature at `index` in generation order
    pub fn label(index: usize) -> String {
        format!("feature_{}", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_type_order_is_fixed() {
        assert_eq!(FeatureType::from_index(0), Some(FeatureType::ThroughHole));
        assert_eq!(FeatureType::from_index(4), Some(FeatureType::Chamfer));
        assert_eq!(FeatureType::from_index(7), Some(FeatureType::Round));
        assert_eq!(FeatureType::from_index(8), None);
    }

    #[test]
    fn test_feature_type_parse_roundtrip() {
        for t in FeatureType::ALL {
            assert_eq!(t.as_str().parse::<FeatureType>().unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_feature_type_rejected() {
        let err = "boss".parse::<FeatureType>().unwrap_err();
        assert_eq!(err, UnknownFeatureType("boss".to_string()));
        assert_eq!(err.to_string(), "unknown feature type 'boss'");
    }

    #[test]
    fn test_tool_type_lookup() {
        assert_eq!(FeatureType::ThroughHole.tool_type(), ToolType::Drill);
        assert_eq!(FeatureType::BlindHole.tool_type(), ToolType::Drill);
        assert_eq!(FeatureType::RectangularPocket.tool_type(), ToolType::EndMill);
        assert_eq!(FeatureType::Chamfer.tool_type(), ToolType::ChamferMill);
        assert_eq!(FeatureType::Round.tool_type(), ToolType::BallEndMill);
    }

    #[test]
    fn test_bounding_box_centered() {
        let bbox = BoundingBox::centered(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 2.0));
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, 2.0));
        assert_eq!(bbox.max, Point3::new(3.0, 5.0, 4.0));
        assert_eq!(bbox.center(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.size(), Point3::new(4.0, 6.0, 2.0));
    }

    #[test]
    fn test_through_dimensions_serialize_marker() {
        let dims = Dimensions::ThroughHole {
            diameter: 10.0,
            depth: Extent::Through,
        };
        let json = serde_json::to_string(&dims).unwrap();
        assert_eq!(json, r#"{"diameter":10.0,"depth":"through"}"#);
        assert_eq!(dims.feature_type(), FeatureType::ThroughHole);
    }

    #[test]
    fn test_feature_serializes_type_key() {
        let feat = Feature {
            id: Feature::label(3),
            feature_type: FeatureType::Round,
            confidence: 0.8,
            position: Point3::default(),
            dimensions: Dimensions::Round { radius: 2.0 },
            machining_parameters: MachiningParameters {
                tool_type: ToolType::BallEndMill,
                tool_diameter: 4.0,
                spindle_speed: 2000.0,
                feed_rate: 300.0,
                cutting_depth: 1.0,
            },
            face_ids: vec![30, 31],
            bounding_box: BoundingBox::default(),
        };

        let yaml = serde_yml::to_string(&feat).unwrap();
        assert!(yaml.contains("id: feature_3"));
        assert!(yaml.contains("type: round"));
        assert!(yaml.contains("tool_type: ball_end_mill"));
        assert!(yaml.contains("radius: 2.0"));
    }

    #[test]
    fn test_dimension_summary() {
        assert_eq!(Dimensions::Round { radius: 2.5 }.summary(), "r=2.50");
        assert_eq!(
            Dimensions::Chamfer {
                width: 1.5,
                angle: CHAMFER_ANGLE
            }
            .summary(),
            "1.50 @ 45deg"
        );
    }
}
