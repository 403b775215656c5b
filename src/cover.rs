//! Cover-fit mapping from image pixels to viewport pixels.
//!
//! Models how a raster image is shown under a "cover" policy (CSS
//! `object-fit: cover`): scale uniformly until both axes fill the viewport,
//! position the overflow according to a [`Gravity`], crop whatever spills
//! out. Points authored in the image's natural pixel space can then be
//! projected onto the screen.
//!
//! # Example
//!
//! ```
//! use coverwarp::{Point, cover_transform};
//!
//! // 2000×500 panorama in a 1000×500 viewport: height fills, width overflows.
//! let t = cover_transform(1000.0, 500.0, 2000.0, 500.0).unwrap();
//! assert_eq!(t.scale, 1.0);
//! assert_eq!(t.offset_x, -500.0);
//! assert_eq!(t.offset_y, 0.0);
//!
//! assert_eq!(t.map_point(Point::new(500.0, 250.0)), Point::new(0.0, 250.0));
//! ```

use crate::geom::{Bounds, Point, Quad};

/// Where the scaled image sits when one axis overflows the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gravity {
    /// Center on both axes; overflow is cropped equally from both sides.
    #[default]
    Center,
    /// Position by fraction. `(0.0, 0.0)` keeps the top-left edge visible,
    /// `(1.0, 1.0)` keeps the bottom-right edge visible.
    Percentage(f64, f64),
}

/// Cover-fit specification for a viewport.
///
/// ```
/// use coverwarp::{Cover, Gravity};
///
/// let t = Cover::new(1000.0, 500.0)
///     .gravity(Gravity::Percentage(0.0, 0.0))
///     .compute(2000.0, 500.0)
///     .unwrap();
/// assert_eq!(t.offset_x, 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cover {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub gravity: Gravity,
}

impl Cover {
    /// Cover the given viewport, centered.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            gravity: Gravity::Center,
        }
    }

    /// Set gravity for positioning the cropped overflow.
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Compute the transform for an image of the given natural size.
    ///
    /// Returns `None` while the image size is unknown (zero, negative or
    /// non-finite, as reported before the asset has decoded) or when the
    /// viewport itself has no usable area. Callers skip the geometry update
    /// and retry on the next load or resize.
    pub fn compute(&self, image_width: f64, image_height: f64) -> Option<CoverTransform> {
        let (vw, vh) = (self.viewport_width, self.viewport_height);
        if !is_positive(image_width) || !is_positive(image_height) {
            debug!(image_width, image_height, "cover transform unavailable: image size unknown");
            return None;
        }
        if !is_positive(vw) || !is_positive(vh) {
            debug!(vw, vh, "cover transform unavailable: empty viewport");
            return None;
        }

        let scale = (vw / image_width).max(vh / image_height);
        let spare_x = vw - image_width * scale;
        let spare_y = vh - image_height * scale;
        let (offset_x, offset_y) = match self.gravity {
            Gravity::Center => (spare_x / 2.0, spare_y / 2.0),
            Gravity::Percentage(x, y) => (spare_x * fraction(x), spare_y * fraction(y)),
        };

        Some(CoverTransform {
            scale,
            offset_x,
            offset_y,
        })
    }
}

/// Uniform scale plus offset: `viewport = image * scale + offset`.
///
/// Recomputed whenever the viewport or the image changes; it carries no
/// identity beyond its three numbers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoverTransform {
    /// Always the larger of the two axis ratios, so the image covers the
    /// viewport on both axes.
    pub scale: f64,
    /// Horizontal placement of the image's left edge. Negative when cropped.
    pub offset_x: f64,
    /// Vertical placement of the image's top edge. Negative when cropped.
    pub offset_y: f64,
}

impl CoverTransform {
    /// Project a point from image pixels to viewport pixels.
    pub fn map_point(&self, p: Point) -> Point {
        Point {
            x: self.offset_x + p.x * self.scale,
            y: self.offset_y + p.y * self.scale,
        }
    }

    /// Project every corner of a quad, preserving corner order.
    pub fn map_quad(&self, quad: &Quad) -> Quad {
        quad.map(|p| self.map_point(p))
    }

    /// Project a point from viewport pixels back to image pixels.
    pub fn unmap_point(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.offset_x) / self.scale,
            y: (p.y - self.offset_y) / self.scale,
        }
    }

    /// Where the whole image lands in viewport pixels (including cropped parts).
    pub fn displayed_bounds(&self, image_width: f64, image_height: f64) -> Bounds {
        let tl = self.map_point(Point::new(0.0, 0.0));
        let br = self.map_point(Point::new(image_width, image_height));
        Bounds {
            min_x: tl.x,
            min_y: tl.y,
            max_x: br.x,
            max_y: br.y,
        }
    }

    /// The part of the image, in image pixels, that stays on screen.
    pub fn visible_region(&self, viewport_width: f64, viewport_height: f64) -> Bounds {
        let tl = self.unmap_point(Point::new(0.0, 0.0));
        let br = self.unmap_point(Point::new(viewport_width, viewport_height));
        Bounds {
            min_x: tl.x,
            min_y: tl.y,
            max_x: br.x,
            max_y: br.y,
        }
    }
}

/// Centered cover transform for the given viewport and image natural size.
///
/// Shorthand for `Cover::new(vw, vh).compute(iw, ih)`.
pub fn cover_transform(
    viewport_width: f64,
    viewport_height: f64,
    image_width: f64,
    image_height: f64,
) -> Option<CoverTransform> {
    Cover::new(viewport_width, viewport_height).compute(image_width, image_height)
}

/// Project a point from image pixels to viewport pixels.
pub fn map_point(p: Point, transform: &CoverTransform) -> Point {
    transform.map_point(p)
}

/// Project a quad from image pixels to viewport pixels.
pub fn map_quad(quad: &Quad, transform: &CoverTransform) -> Quad {
    transform.map_quad(quad)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn fraction(v: f64) -> f64 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "std"))]
    use num_traits::Float;

    #[test]
    fn panorama_in_wide_viewport() {
        let t = cover_transform(1000.0, 500.0, 2000.0, 500.0).unwrap();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, -500.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn portrait_image_crops_vertically() {
        // 500×1000 into 1000×500 → width constrains, scale 2, 1500px spill.
        let t = cover_transform(1000.0, 500.0, 500.0, 1000.0).unwrap();
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.offset_x, 0.0);
        assert_eq!(t.offset_y, -750.0);
    }

    #[test]
    fn same_aspect_has_no_offset() {
        let t = cover_transform(800.0, 600.0, 400.0, 300.0).unwrap();
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.offset_x, 0.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn unknown_image_size_is_unavailable() {
        assert!(cover_transform(1000.0, 500.0, 0.0, 500.0).is_none());
        assert!(cover_transform(1000.0, 500.0, 2000.0, 0.0).is_none());
        assert!(cover_transform(1000.0, 500.0, 0.0, 0.0).is_none());
        assert!(cover_transform(1000.0, 500.0, f64::NAN, 500.0).is_none());
        assert!(cover_transform(1000.0, 500.0, 2000.0, f64::INFINITY).is_none());
        assert!(cover_transform(1000.0, 500.0, -10.0, 500.0).is_none());
    }

    #[test]
    fn empty_viewport_is_unavailable() {
        assert!(cover_transform(0.0, 500.0, 2000.0, 500.0).is_none());
        assert!(cover_transform(1000.0, f64::NAN, 2000.0, 500.0).is_none());
    }

    #[test]
    fn scale_is_max_ratio_and_image_covers_viewport() {
        let sizes = [1.0, 3.0, 17.0, 320.0, 1000.0, 1366.0, 1920.0, 4096.0];
        for &vw in &sizes {
            for &vh in &sizes {
                for &iw in &sizes {
                    for &ih in &sizes {
                        let t = cover_transform(vw, vh, iw, ih).unwrap();
                        assert_eq!(t.scale, (vw / iw).max(vh / ih));
                        assert!(t.scale.is_finite() && t.offset_x.is_finite());

                        let shown = t.displayed_bounds(iw, ih);
                        let eps = 1e-9 * vw.max(vh).max(iw * t.scale).max(ih * t.scale);
                        assert!(shown.min_x <= eps && shown.min_y <= eps);
                        assert!(shown.max_x >= vw - eps && shown.max_y >= vh - eps);
                        let touches_x = (shown.width() - vw).abs() <= eps;
                        let touches_y = (shown.height() - vh).abs() <= eps;
                        assert!(
                            touches_x || touches_y,
                            "{vw}x{vh} / {iw}x{ih}: image must touch the viewport on one axis"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn gravity_top_left_and_bottom_right() {
        let tl = Cover::new(1000.0, 500.0)
            .gravity(Gravity::Percentage(0.0, 0.0))
            .compute(2000.0, 500.0)
            .unwrap();
        assert_eq!((tl.offset_x, tl.offset_y), (0.0, 0.0));

        let br = Cover::new(1000.0, 500.0)
            .gravity(Gravity::Percentage(1.0, 1.0))
            .compute(2000.0, 500.0)
            .unwrap();
        assert_eq!((br.offset_x, br.offset_y), (-1000.0, 0.0));
    }

    #[test]
    fn gravity_out_of_range_is_clamped() {
        let t = Cover::new(1000.0, 500.0)
            .gravity(Gravity::Percentage(3.0, -1.0))
            .compute(2000.0, 500.0)
            .unwrap();
        assert_eq!(t.offset_x, -1000.0);

        let nan = Cover::new(1000.0, 500.0)
            .gravity(Gravity::Percentage(f64::NAN, 0.0))
            .compute(2000.0, 500.0)
            .unwrap();
        assert_eq!(nan.offset_x, -500.0);
    }

    #[test]
    fn map_point_and_quad() {
        let t = CoverTransform {
            scale: 0.5,
            offset_x: -20.0,
            offset_y: 10.0,
        };
        assert_eq!(map_point(Point::new(100.0, 40.0), &t), Point::new(30.0, 30.0));

        let q = Quad::rect(0.0, 0.0, 100.0, 40.0);
        let m = map_quad(&q, &t);
        assert_eq!(m.top_left(), Point::new(-20.0, 10.0));
        assert_eq!(m.top_right(), Point::new(30.0, 10.0));
        assert_eq!(m.bottom_right(), Point::new(30.0, 30.0));
        assert_eq!(m.bottom_left(), Point::new(-20.0, 30.0));
    }

    #[test]
    fn unmap_inverts_map() {
        let t = cover_transform(1280.0, 720.0, 1024.0, 1024.0).unwrap();
        let p = Point::new(244.0, 607.0);
        let back = t.unmap_point(t.map_point(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn visible_region_of_panorama() {
        let t = cover_transform(1000.0, 500.0, 2000.0, 500.0).unwrap();
        let r = t.visible_region(1000.0, 500.0);
        assert_eq!(r.min_x, 500.0);
        assert_eq!(r.max_x, 1500.0);
        assert_eq!(r.min_y, 0.0);
        assert_eq!(r.max_y, 500.0);
    }
}
