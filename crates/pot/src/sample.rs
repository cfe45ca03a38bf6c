//! Decoded sample data model.

use serde::{Deserialize, Serialize};

use crate::normalize::BoundingBox;

/// One pen position, in tablet units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// A pen-down path: points in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl<P: Into<Point>> FromIterator<P> for Stroke {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Stroke {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One handwritten character sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Class identifier as stored in the stream, after byte-order repair.
    pub label_code: u16,
    /// Glyph decoded from `label_code`.
    pub label_text: char,
    /// Stroke count claimed by the record header. Advisory only.
    pub declared_stroke_count: u16,
    /// Strokes in drawing order.
    pub strokes: Vec<Stroke>,
}

impl Sample {
    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// Extent of all points, or `None` for a sample without points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.strokes)
    }

    /// Label rendered as lowercase `0x` hex, the key used for class files.
    pub fn label_hex(&self) -> String {
        label_hex(self.label_code)
    }
}

/// Renders a label code as lowercase `0x` hex without padding (`0x41`, `0xb0a1`).
pub fn label_hex(code: u16) -> String {
    format!("{code:#x}")
}
