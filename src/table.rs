//! Named quads authored in image-pixel space, projected per frame.
//!
//! A table is the designer-facing layout resource: each entry names a region
//! of the background image (a billboard, a screen, a window) by its four
//! corners in the image's natural pixels. On every image load or viewport
//! resize the whole table is pushed through one cover transform and one
//! homography per entry.
//!
//! ```
//! use coverwarp::OverlayTable;
//!
//! let table = OverlayTable::billboards();
//! let frame = table.project(1280.0, 720.0, 1024.0, 1024.0).unwrap();
//! assert_eq!(frame.len(), 2);
//! assert_eq!(frame[0].name, "left");
//!
//! // Before the background has decoded there is nothing to project.
//! assert!(table.project(1280.0, 720.0, 0.0, 0.0).is_none());
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::cover::{Cover, CoverTransform};
use crate::geom::{Point, Quad};
use crate::overlay::{OverlayGeometry, project_overlay};

/// Ordered list of named quads in image-pixel space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayTable {
    entries: Vec<(String, Quad)>,
}

impl OverlayTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock pair of billboards: a left panel leaning away from the
    /// viewer and a right panel leaning the other way.
    pub fn billboards() -> Self {
        Self::new()
            .with(
                "left",
                Quad::new(
                    Point::new(62.0, 561.0),
                    Point::new(244.0, 607.0),
                    Point::new(244.0, 937.0),
                    Point::new(62.0, 943.0),
                ),
            )
            .with(
                "right",
                Quad::new(
                    Point::new(780.0, 607.0),
                    Point::new(967.0, 560.0),
                    Point::new(967.0, 944.0),
                    Point::new(781.0, 938.0),
                ),
            )
    }

    /// Add or replace an entry, builder style.
    pub fn with(mut self, name: impl Into<String>, quad: Quad) -> Self {
        self.insert(name, quad);
        self
    }

    /// Add an entry, or replace the quad of an existing entry with the same
    /// name in place. Returns the previous quad.
    pub fn insert(&mut self, name: impl Into<String>, quad: Quad) -> Option<Quad> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(core::mem::replace(existing, quad)),
            None => {
                self.entries.push((name, quad));
                None
            }
        }
    }

    /// Look up a quad by name.
    pub fn get(&self, name: &str) -> Option<&Quad> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, q)| q)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quad)> {
        self.entries.iter().map(|(n, q)| (n.as_str(), q))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Project every entry for a viewport and background image size.
    ///
    /// Returns `None` while the cover transform is unavailable (image not
    /// decoded yet); the caller keeps the previous frame's geometry.
    pub fn project(
        &self,
        viewport_width: f64,
        viewport_height: f64,
        image_width: f64,
        image_height: f64,
    ) -> Option<Vec<ProjectedOverlay>> {
        let transform =
            Cover::new(viewport_width, viewport_height).compute(image_width, image_height)?;
        Some(self.project_with(&transform))
    }

    /// Project every entry through an already computed cover transform.
    pub fn project_with(&self, transform: &CoverTransform) -> Vec<ProjectedOverlay> {
        self.entries
            .iter()
            .map(|(name, quad)| {
                let quad = transform.map_quad(quad);
                ProjectedOverlay {
                    name: name.clone(),
                    quad,
                    geometry: project_overlay(&quad),
                }
            })
            .collect()
    }
}

/// One table entry after projection.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedOverlay {
    /// Entry name from the table.
    pub name: String,
    /// Destination quad in viewport pixels.
    pub quad: Quad,
    /// Panel size and transform that render onto `quad`.
    pub geometry: OverlayGeometry,
}
