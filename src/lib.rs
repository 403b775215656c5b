//! Cover-fit image mapping and perspective-correct overlay panels.
//!
//! Pure geometry: no pixel operations, no DOM, `no_std` compatible. Quads
//! authored in a background image's natural pixels are pushed through the
//! image's cover-fit transform into viewport pixels, then a rectangular
//! panel is warped onto each projected quad with a homography emitted as a
//! CSS `matrix3d()`.
//!
//! # Modules
//!
//! - [`geom`] — Points, quads and bounding boxes
//! - [`cover`] — Cover-fit transform from image to viewport pixels
//! - [`solve`] — Small dense linear solver with pivot substitution
//! - [`homography`] — Quad-to-quad projective transforms
//! - [`overlay`] — Panel sizing and the `matrix3d` embedding
//! - [`table`] — Named quads projected as a frame (`alloc`)
//! - [`query`] — Text form of an overlay table (`query` feature)
//! - [`countdown`] — Countdown to the next local midnight
//! - [`sequence`] — Presentation phases around the countdown target
//! - [`rotation`] — Carousel index and sprite animation timing
//! - [`svg`] — SVG visualization (`svg` feature)
//!
//! # Example
//!
//! ```
//! use coverwarp::{Point, Quad, cover_transform, project_overlay};
//!
//! let cover = cover_transform(1280.0, 720.0, 1024.0, 1024.0).unwrap();
//! let billboard = Quad::new(
//!     Point::new(62.0, 561.0),
//!     Point::new(244.0, 607.0),
//!     Point::new(244.0, 937.0),
//!     Point::new(62.0, 943.0),
//! );
//! let geometry = project_overlay(&cover.map_quad(&billboard));
//! assert!(!geometry.degenerate);
//! assert!(geometry.matrix.to_string().starts_with("matrix3d("));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

/// Debug-level event, compiled out without the `tracing` feature.
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    }};
}

pub mod countdown;
pub mod cover;
pub mod geom;
pub mod homography;
pub mod overlay;
#[cfg(feature = "query")]
pub mod query;
pub mod rotation;
pub mod sequence;
pub mod solve;
#[cfg(feature = "svg")]
pub mod svg;
#[cfg(feature = "alloc")]
pub mod table;

pub use cover::{Cover, CoverTransform, Gravity, cover_transform, map_point, map_quad};
pub use geom::{Bounds, Point, Quad, QuadError};
pub use homography::Homography;
pub use overlay::{
    MIN_PANEL_HEIGHT, MIN_PANEL_WIDTH, Matrix3d, OverlayGeometry, project_overlay,
};
#[cfg(feature = "alloc")]
pub use table::{OverlayTable, ProjectedOverlay};
