//! Warping a rectangular panel onto a destination quad.
//!
//! The panel is a `width × height` rectangle anchored at its top-left corner
//! (a rendering layer with `transform-origin: 0 0`). [`project_overlay`]
//! sizes the panel from the quad's bounding box, solves the homography from
//! the panel's corners to the quad, and embeds it in a column-major 4×4
//! matrix for a 3D transform primitive such as CSS `matrix3d()`.
//!
//! # Example
//!
//! ```
//! use coverwarp::{Quad, project_overlay};
//!
//! let g = project_overlay(&Quad::rect(100.0, 100.0, 200.0, 200.0));
//! assert_eq!((g.width, g.height), (200.0, 200.0));
//! assert_eq!(
//!     g.matrix.to_string(),
//!     "matrix3d(1,0,0,0,0,1,0,0,0,0,1,0,100,100,0,1)"
//! );
//! ```

use core::fmt;

use num_traits::Float;

use crate::geom::{Point, Quad};
use crate::homography::Homography;

/// Smallest panel width. Keeps the solve well away from a zero-width source
/// rectangle when the destination quad is tiny or degenerate.
pub const MIN_PANEL_WIDTH: f64 = 200.0;
/// Smallest panel height.
pub const MIN_PANEL_HEIGHT: f64 = 120.0;
/// Decimal places kept in [`Matrix3d`] entries.
pub const MATRIX_DECIMALS: u32 = 10;

const ROUNDING_SCALE: f64 = 1e10;

/// Everything needed to render a rectangular panel as the destination quad.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayGeometry {
    /// Panel width in pixels (at least [`MIN_PANEL_WIDTH`]).
    pub width: f64,
    /// Panel height in pixels (at least [`MIN_PANEL_HEIGHT`]).
    pub height: f64,
    /// Unrounded panel-to-quad transform.
    pub homography: Homography,
    /// Rounded 4×4 form of `homography`.
    pub matrix: Matrix3d,
    /// Three or more corners of the destination quad are collinear or
    /// coincident, or the solve hit an exactly-zero pivot. The transform is
    /// still finite but collapses the panel.
    pub degenerate: bool,
}

impl OverlayGeometry {
    /// Where the panel's corners land under the rounded matrix, in TL, TR,
    /// BR, BL order. `None` if a corner maps to infinity.
    pub fn projected_corners(&self) -> Option<Quad> {
        let panel = Quad::rect(0.0, 0.0, self.width, self.height);
        let c = panel.corners();
        Some(Quad::new(
            self.matrix.map_point(c[0])?,
            self.matrix.map_point(c[1])?,
            self.matrix.map_point(c[2])?,
            self.matrix.map_point(c[3])?,
        ))
    }
}

/// Compute the panel size and transform that make a rectangle render as
/// `dest`.
///
/// Never fails: a collinear or coincident `dest` produces a finite matrix
/// flagged as [`degenerate`](OverlayGeometry::degenerate). The result is a
/// pure function of `dest`, bit for bit.
pub fn project_overlay(dest: &Quad) -> OverlayGeometry {
    let bounds = dest.bounds();
    let width = MIN_PANEL_WIDTH.max(bounds.width());
    let height = MIN_PANEL_HEIGHT.max(bounds.height());

    let source = Quad::rect(0.0, 0.0, width, height);
    let (homography, solution) = Homography::solve_quads(&source, dest);
    let degenerate = dest.is_degenerate() || !solution.is_exact();
    if degenerate {
        debug!(width, height, "degenerate overlay quad");
    }

    OverlayGeometry {
        width,
        height,
        homography,
        matrix: Matrix3d::from_homography(&homography),
        degenerate,
    }
}

/// Column-major 4×4 matrix with a 2D homography embedded in the x/y/w rows
/// and columns and an identity z axis:
///
/// ```text
///     [ a  b  0  c ]
///     [ d  e  0  f ]
///     [ 0  0  1  0 ]
///     [ g  h  0  1 ]
/// ```
///
/// stored as `[a, d, 0, g, b, e, 0, h, 0, 0, 1, 0, c, f, 0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix3d {
    pub m: [f64; 16],
}

impl Matrix3d {
    /// Embed `h`, rounding every entry to [`MATRIX_DECIMALS`] places.
    pub fn from_homography(h: &Homography) -> Self {
        let [[a, b, c], [d, e, f], [g, h2, i]] = h.m;
        let m = [
            a, d, 0.0, g, //
            b, e, 0.0, h2, //
            0.0, 0.0, 1.0, 0.0, //
            c, f, 0.0, i,
        ];
        Self {
            m: m.map(round_entry),
        }
    }

    /// Recover the 3×3 homography (rounded coefficients).
    pub fn to_homography(&self) -> Homography {
        let m = &self.m;
        Homography {
            m: [[m[0], m[4], m[12]], [m[1], m[5], m[13]], [m[3], m[7], m[15]]],
        }
    }

    /// Map a point on the z = 0 plane the way a renderer applies the matrix.
    pub fn map_point(&self, p: Point) -> Option<Point> {
        self.to_homography().map_point(p)
    }
}

impl fmt::Display for Matrix3d {
    /// CSS `matrix3d(...)` function syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("matrix3d(")?;
        for (i, v) in self.m.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

/// Round to [`MATRIX_DECIMALS`] places, folding `-0` into `0`.
fn round_entry(v: f64) -> f64 {
    let r = Float::round(v * ROUNDING_SCALE) / ROUNDING_SCALE;
    if r == 0.0 { 0.0 } else { r }
}
