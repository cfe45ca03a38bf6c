//! Bounding-box normalization of sample coordinates.

use crate::sample::{Point, Stroke};

/// Axis-aligned extent of a set of points, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u16,
    pub min_y: u16,
    pub max_x: u16,
    pub max_y: u16,
}

impl BoundingBox {
    /// Extent of every point in `strokes`, or `None` if there are no points.
    pub fn of(strokes: &[Stroke]) -> Option<Self> {
        let mut points = strokes.iter().flat_map(Stroke::iter);
        let first = points.next()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> u16 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u16 {
        self.max_y - self.min_y
    }
}

/// Left-aligns a sample and flips its vertical axis.
///
/// Every point maps to `(x - min_x, max_y - y)`, with the extremes taken over
/// the whole sample. The result has `min x == 0` and `min y == 0`, and stroke
/// and point order is unchanged. A sample without points comes back as is.
///
/// ```
/// use casia_pot::normalize::normalize;
/// use casia_pot::Stroke;
///
/// let pairs: [(u16, u16); 2] = [(1234, 2345), (1240, 2300)];
/// let out = normalize(&[pairs.into_iter().collect::<Stroke>()]);
/// let expected: [(u16, u16); 2] = [(0, 0), (6, 45)];
/// assert_eq!(out, vec![expected.into_iter().collect::<Stroke>()]);
/// ```
pub fn normalize(strokes: &[Stroke]) -> Vec<Stroke> {
    let Some(bounds) = BoundingBox::of(strokes) else {
        return strokes.to_vec();
    };
    strokes
        .iter()
        .map(|stroke| {
            stroke
                .iter()
                .map(|p| Point::new(p.x - bounds.min_x, bounds.max_y - p.y))
                .collect()
        })
        .collect()
}
