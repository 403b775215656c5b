//! Quad-to-quad projective transforms.
//!
//! A homography maps `(x, y)` to `(u, v)` with
//!
//! ```text
//!     u = (a·x + b·y + c) / (g·x + h·y + 1)
//!     v = (d·x + e·y + f) / (g·x + h·y + 1)
//! ```
//!
//! Stored row-major as
//!
//! ```text
//!     [ a b c ]
//!     [ d e f ]
//!     [ g h 1 ]
//! ```
//!
//! Four point correspondences give eight linear equations in the eight
//! unknowns `a..h`, solved with [`crate::solve::solve`].

use num_traits::Float;

use crate::geom::{Point, Quad};
use crate::solve::{Solution, solve};

/// Below this the homogeneous `w` of a mapped point counts as zero.
const W_EPSILON: f64 = 1e-12;

/// 2D projective transform with the bottom-right coefficient fixed at 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Homography {
    /// Row-major 3×3 coefficients.
    pub m: [[f64; 3]; 3],
}

impl Homography {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Build from the eight free coefficients `[a, b, c, d, e, f, g, h]`.
    pub const fn from_coefficients(c: [f64; 8]) -> Self {
        Self {
            m: [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], 1.0]],
        }
    }

    /// Solve the transform taking each corner of `src` to the matching
    /// corner of `dst`.
    ///
    /// Never fails. Degenerate input (collinear or coincident corners)
    /// yields a finite but collapsed transform; see [`solve`].
    pub fn from_quads(src: &Quad, dst: &Quad) -> Self {
        Self::solve_quads(src, dst).0
    }

    /// Solve the transform taking the rectangle `[0, width] × [0, height]`
    /// onto `dst`, corner for corner.
    ///
    /// ```
    /// use coverwarp::{Homography, Point, Quad};
    ///
    /// let dst = Quad::rect(100.0, 100.0, 200.0, 200.0);
    /// let h = Homography::from_rect(200.0, 200.0, &dst);
    /// let p = h.map_point(Point::new(200.0, 200.0)).unwrap();
    /// assert!((p.x - 300.0).abs() < 1e-9 && (p.y - 300.0).abs() < 1e-9);
    /// ```
    pub fn from_rect(width: f64, height: f64, dst: &Quad) -> Self {
        Self::from_quads(&Quad::rect(0.0, 0.0, width, height), dst)
    }

    /// Solve and also report whether the linear system was singular.
    pub(crate) fn solve_quads(src: &Quad, dst: &Quad) -> (Self, Solution<8>) {
        let mut a = [[0.0_f64; 8]; 8];
        let mut b = [0.0_f64; 8];

        for (i, (s, d)) in src.corners().iter().zip(dst.corners()).enumerate() {
            let (x, y) = (s.x, s.y);
            let (u, v) = (d.x, d.y);

            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y];
            b[2 * i] = u;

            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y];
            b[2 * i + 1] = v;
        }

        let solution = solve(a, b);
        (Self::from_coefficients(solution.values), solution)
    }

    /// The eight free coefficients `[a, b, c, d, e, f, g, h]`.
    pub fn coefficients(&self) -> [f64; 8] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1],
        ]
    }

    /// Map a point through the transform.
    ///
    /// Returns `None` when the point lands on the line at infinity (the
    /// homogeneous `w` is zero or non-finite).
    pub fn map_point(&self, p: Point) -> Option<Point> {
        let m = &self.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if !w.is_finite() || Float::abs(w) < W_EPSILON {
            return None;
        }
        let out = Point::new(x / w, y / w);
        out.is_finite().then_some(out)
    }

    /// Determinant of the 3×3 matrix. Zero for transforms that collapse
    /// the plane onto a line or point.
    pub fn determinant(&self) -> f64 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.m;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}
