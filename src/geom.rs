//! Points, quads and bounding boxes.
//!
//! Coordinates are plain `f64` pixels. The same types describe both image
//! space (natural pixels of a raster asset) and viewport space (CSS pixels of
//! the screen); which one a value lives in is up to the caller.

use core::fmt;

use num_traits::Float;

/// A 2D point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Corner triples whose cross product is below this fraction of the squared
/// extent count as collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Four corners in a fixed winding order: top-left, top-right,
/// bottom-right, bottom-left.
///
/// The order is part of the contract. Corner `i` of a destination quad is
/// paired with corner `i` of the canonical source rectangle when solving a
/// homography, so reordering corners mirrors or rotates the warp.
///
/// ```text
///     0 ──────── 1
///     │          │
///     │          │
///     3 ──────── 2
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    corners: [Point; 4],
}

impl Quad {
    /// Create a quad from its corners in TL, TR, BR, BL order.
    pub const fn new(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Self {
        Self {
            corners: [top_left, top_right, bottom_right, bottom_left],
        }
    }

    /// Create a quad from a corner array already in TL, TR, BR, BL order.
    pub const fn from_corners(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned rectangle `[x, x + width] × [y, y + height]`.
    pub const fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        )
    }

    /// Corners in TL, TR, BR, BL order.
    pub const fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub const fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub const fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub const fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub const fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    /// Apply `f` to every corner, preserving order.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            corners: [
                f(self.corners[0]),
                f(self.corners[1]),
                f(self.corners[2]),
                f(self.corners[3]),
            ],
        }
    }

    /// Axis-aligned bounding box of the four corners.
    pub fn bounds(&self) -> Bounds {
        let first = self.corners[0];
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &self.corners[1..] {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    /// Signed shoelace area. Positive for clockwise corners in a y-down
    /// coordinate system, zero when the corners are collinear or coincident.
    pub fn signed_area(&self) -> f64 {
        let c = &self.corners;
        let mut twice = 0.0;
        for i in 0..4 {
            let p = c[i];
            let q = c[(i + 1) % 4];
            twice += p.x * q.y - q.x * p.y;
        }
        twice / 2.0
    }

    /// Whether some three corners are collinear or coincident, so no
    /// projective map from a rectangle can reach this quad.
    ///
    /// Collinearity is tested relative to the quad's extent, so the answer
    /// does not depend on where or how large the quad is.
    pub fn is_degenerate(&self) -> bool {
        let b = self.bounds();
        let extent = b.width().max(b.height());
        let tolerance = COLLINEAR_EPSILON * extent * extent;
        let c = &self.corners;
        (0..4).any(|skip| {
            let [p, q, r] = match skip {
                0 => [c[1], c[2], c[3]],
                1 => [c[0], c[2], c[3]],
                2 => [c[0], c[1], c[3]],
                _ => [c[0], c[1], c[2]],
            };
            let cross = (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
            !(Float::abs(cross) > tolerance)
        })
    }
}

impl TryFrom<&[Point]> for Quad {
    type Error = QuadError;

    fn try_from(points: &[Point]) -> Result<Self, Self::Error> {
        match points {
            [tl, tr, br, bl] => Ok(Self::new(*tl, *tr, *br, *bl)),
            _ => Err(QuadError::CornerCount(points.len())),
        }
    }
}

impl From<[Point; 4]> for Quad {
    fn from(corners: [Point; 4]) -> Self {
        Self::from_corners(corners)
    }
}

/// Quad construction error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuadError {
    /// A quad needs exactly four corners; this many were supplied.
    CornerCount(usize),
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CornerCount(n) => write!(f, "a quad needs exactly 4 corners, got {n}"),
        }
    }
}

impl core::error::Error for QuadError {}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "std"))]
    use alloc::{string::ToString, vec::Vec};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn quad_from_four_points() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        let q = Quad::try_from(points.as_slice()).unwrap();
        assert_eq!(q.top_left(), Point::new(0.0, 0.0));
        assert_eq!(q.top_right(), Point::new(10.0, 0.0));
        assert_eq!(q.bottom_right(), Point::new(10.0, 5.0));
        assert_eq!(q.bottom_left(), Point::new(0.0, 5.0));
    }

    #[test]
    fn quad_rejects_wrong_corner_count() {
        let three = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(Quad::try_from(three.as_slice()), Err(QuadError::CornerCount(3)));

        let five = pts(&[(0.0, 0.0); 5]);
        assert_eq!(Quad::try_from(five.as_slice()), Err(QuadError::CornerCount(5)));

        assert_eq!(Quad::try_from(&[][..]), Err(QuadError::CornerCount(0)));
    }

    #[test]
    fn corner_count_error_message() {
        let msg = QuadError::CornerCount(3).to_string();
        assert!(msg.contains("exactly 4"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn bounds_of_skewed_quad() {
        let q = Quad::new(
            Point::new(62.0, 561.0),
            Point::new(244.0, 607.0),
            Point::new(244.0, 937.0),
            Point::new(62.0, 943.0),
        );
        let b = q.bounds();
        assert_eq!(b.min_x, 62.0);
        assert_eq!(b.min_y, 561.0);
        assert_eq!(b.max_x, 244.0);
        assert_eq!(b.max_y, 943.0);
        assert_eq!(b.width(), 182.0);
        assert_eq!(b.height(), 382.0);
    }

    #[test]
    fn map_preserves_order() {
        let q = Quad::rect(0.0, 0.0, 2.0, 1.0);
        let shifted = q.map(|p| Point::new(p.x + 10.0, p.y + 20.0));
        assert_eq!(shifted.top_left(), Point::new(10.0, 20.0));
        assert_eq!(shifted.top_right(), Point::new(12.0, 20.0));
        assert_eq!(shifted.bottom_right(), Point::new(12.0, 21.0));
        assert_eq!(shifted.bottom_left(), Point::new(10.0, 21.0));
    }

    #[test]
    fn signed_area_rect_and_collinear() {
        assert_eq!(Quad::rect(0.0, 0.0, 4.0, 3.0).signed_area(), 12.0);
        let line = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        );
        assert_eq!(line.signed_area(), 0.0);
    }

    #[test]
    fn degenerate_quads() {
        assert!(!Quad::rect(0.0, 0.0, 4.0, 3.0).is_degenerate());
        let billboard = Quad::new(
            Point::new(62.0, 561.0),
            Point::new(244.0, 607.0),
            Point::new(244.0, 937.0),
            Point::new(62.0, 943.0),
        );
        assert!(!billboard.is_degenerate());

        // Slanted line with a non-representable direction.
        let slanted = Quad::new(
            Point::new(13.3, 7.7),
            Point::new(13.77, 7.783),
            Point::new(14.381, 7.8909),
            Point::new(14.757, 7.9573),
        );
        assert!(slanted.is_degenerate());

        let p = Point::new(3.0, 4.0);
        assert!(Quad::new(p, p, p, p).is_degenerate());

        // Three corners on one edge is enough.
        let triangle = Quad::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        );
        assert!(triangle.is_degenerate());
    }

    #[test]
    fn degeneracy_is_scale_invariant() {
        let small = Quad::new(
            Point::new(0.001, 0.002),
            Point::new(0.004, 0.001),
            Point::new(0.005, 0.006),
            Point::new(0.0, 0.004),
        );
        assert!(!small.is_degenerate());
        let large = small.map(|p| Point::new(p.x * 1e6 + 5e5, p.y * 1e6));
        assert!(!large.is_degenerate());
    }

    #[test]
    fn bounds_contains() {
        let outer = Quad::rect(0.0, 0.0, 10.0, 10.0).bounds();
        let inner = Quad::rect(2.0, 2.0, 3.0, 3.0).bounds();
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }
}
