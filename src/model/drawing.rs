//! Vector drawings.

use super::{Point, Rect, Rgb};
use serde::{Deserialize, Serialize};

/// One drawing primitive, in absolute page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathItem {
    /// Straight segment between two points.
    Line(Point, Point),
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Cubic Bezier: start, two control points, end.
    Curve(Point, Point, Point, Point),
    /// Rotated or skewed rectangle given by its four corners.
    Quad([Point; 4]),
}

/// A painted path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    pub items: Vec<PathItem>,
    /// Stroke colour, absent when the path is not stroked.
    pub stroke: Option<Rgb>,
    /// Fill colour, absent when the path is not filled.
    pub fill: Option<Rgb>,
    /// Stroke width in page pixels.
    pub width: Option<f32>,
}

impl Drawing {
    pub fn new(items: Vec<PathItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: Rgb) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}
