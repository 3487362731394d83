use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// The shape families the classifier can tell apart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
    Pentagon,
    Star,
}

/// Axis-aligned pixel bounds, inclusive of both edge columns/rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Build from inclusive min/max extents
    pub fn from_extents(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Midpoint of the extreme pixel coordinates
    pub fn center(&self) -> Center {
        let max_x = self.x + self.width - 1;
        let max_y = self.y + self.height - 1;
        Center {
            x: (self.x as f64 + max_x as f64) / 2.0,
            y: (self.y as f64 + max_y as f64) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Center {
    pub x: f64,
    pub y: f64,
}

/// One classified foreground region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectedShape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    pub center: Center,
    /// Exact foreground pixel count of the region
    pub area: u32,
}

/// Output of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Shapes in discovery order (row-major position of each region's first pixel)
    pub shapes: Vec<DetectedShape>,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
    /// Cut point used by the binarizer
    pub threshold: u8,
    pub processing_time_ms: f64,
}

impl DetectionResult {
    /// Largest shape by area; the earliest discovered wins a tie
    pub fn largest_shape(&self) -> Option<&DetectedShape> {
        self.shapes
            .iter()
            .fold(None, |best: Option<&DetectedShape>, shape| match best {
                Some(b) if b.area >= shape.area => Some(b),
                _ => Some(shape),
            })
    }

    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }
}
