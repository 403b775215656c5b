//! SVG visualization of an overlay table and its projection.
//!
//! Renders a vertical pair of annotated panels: the table's quads over the
//! background image in image pixels, then the viewport with the cover-fitted
//! image outline and every projected quad.
//!
//! # Example
//!
//! ```
//! use coverwarp::{OverlayTable, svg::render_overlay_svg};
//!
//! let svg = render_overlay_svg(&OverlayTable::billboards(), 1280.0, 720.0, 1024.0, 1024.0);
//! assert!(svg.contains("Viewport  1280×720"));
//! ```

use crate::cover::cover_transform;
use crate::geom::{Bounds, Quad};
use crate::table::OverlayTable;

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
const PANEL_GAP: f64 = 50.0;
const MARGIN_X: f64 = 50.0;
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// One panel of the visualization.
struct Step {
    label: String,
    /// Panel extent in source units.
    width: f64,
    height: f64,
    /// Image outline in panel units, when it differs from the panel itself.
    image: Option<Bounds>,
    quads: Vec<(String, Quad)>,
    annotation: String,
}

/// Render a complete SVG document showing `table` in image space and
/// projected into a `viewport_width × viewport_height` viewport.
///
/// When the cover transform is unavailable only the image panel is drawn,
/// with a note in place of the viewport.
pub fn render_overlay_svg(
    table: &OverlayTable,
    viewport_width: f64,
    viewport_height: f64,
    image_width: f64,
    image_height: f64,
) -> String {
    let steps = build_steps(table, viewport_width, viewport_height, image_width, image_height);
    render_steps(&steps)
}

fn build_steps(
    table: &OverlayTable,
    viewport_width: f64,
    viewport_height: f64,
    image_width: f64,
    image_height: f64,
) -> Vec<Step> {
    let mut steps = Vec::new();
    let transform = cover_transform(viewport_width, viewport_height, image_width, image_height);

    steps.push(Step {
        label: format!("Image  {}×{}", image_width, image_height),
        width: image_width,
        height: image_height,
        image: None,
        quads: table
            .iter()
            .map(|(name, quad)| (String::from(name), *quad))
            .collect(),
        annotation: if transform.is_some() {
            format!("{} quad(s)", table.len())
        } else {
            String::from("cover unavailable, nothing projected")
        },
    });

    if let Some(t) = transform {
        let frame = table.project_with(&t);
        let degenerate = frame.iter().filter(|p| p.geometry.degenerate).count();
        steps.push(Step {
            label: format!("Viewport  {}×{}", viewport_width, viewport_height),
            width: viewport_width,
            height: viewport_height,
            image: Some(t.displayed_bounds(image_width, image_height)),
            quads: frame.into_iter().map(|p| (p.name, p.quad)).collect(),
            annotation: if degenerate > 0 {
                format!("scale {:.3}, {} degenerate", t.scale, degenerate)
            } else {
                format!("scale {:.3}, offset ({:.1}, {:.1})", t.scale, t.offset_x, t.offset_y)
            },
        });
    }

    steps
}

/// Scale to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(width: f64, height: f64) -> (f64, f64, f64) {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return (MAX_PANEL_W, MAX_PANEL_H, 1.0);
    }
    let scale = (MAX_PANEL_W / width).min(MAX_PANEL_H / height);
    (width * scale, height * scale, scale)
}

fn render_steps(steps: &[Step]) -> String {
    let total_h = MARGIN_TOP * 2.0
        + steps.len() as f64 * (LABEL_H + MAX_PANEL_H)
        + steps.len().saturating_sub(1) as f64 * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .name { font-size: 10px; fill: #1d4f7c; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .image { fill: none; stroke: #999; stroke-width: 1; stroke-dasharray: 4,2; }
  .quad { fill: #6ba3d6; fill-opacity: 0.6; stroke: #2c6faa; stroke-width: 1.5; }
  .arrow { stroke: #666; stroke-width: 1.5; fill: none; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .name { fill: #9cc8ee; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .image { stroke: #777; }
    .quad { fill: #3a72a4; stroke: #5a9fd4; }
    .arrow { stroke: #888; }
  }
</style>
"##,
    );

    let mut y = MARGIN_TOP;
    let center_x = total_w / 2.0;

    for (i, step) in steps.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&step.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (sw, sh, scale) = scale_to_fit(step.width, step.height);
        let panel_x = center_x - sw / 2.0;
        let panel_y = y;

        svg.push_str(&format!(
            r#"<clipPath id="panel{i}"><rect x="{panel_x:.1}" y="{panel_y:.1}" width="{sw:.1}" height="{sh:.1}"/></clipPath>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect x="{panel_x:.1}" y="{panel_y:.1}" width="{sw:.1}" height="{sh:.1}" class="outer" rx="2"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(r#"<g clip-path="url(#panel{i})">"#));
        svg.push('\n');

        // Cover overflows the viewport; only the visible part is drawn.
        if let Some(b) = &step.image {
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="image"/>"#,
                panel_x + b.min_x * scale,
                panel_y + b.min_y * scale,
                b.width() * scale,
                b.height() * scale
            ));
            svg.push('\n');
        }

        for (name, quad) in &step.quads {
            let points: Vec<String> = quad
                .corners()
                .iter()
                .map(|p| format!("{:.1},{:.1}", panel_x + p.x * scale, panel_y + p.y * scale))
                .collect();
            svg.push_str(&format!(
                r#"<polygon points="{}" class="quad"/>"#,
                points.join(" ")
            ));
            svg.push('\n');

            let tl = quad.top_left();
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="name">{}</text>"#,
                panel_x + tl.x * scale + 2.0,
                panel_y + tl.y * scale - 3.0,
                escape_xml(name)
            ));
            svg.push('\n');
        }

        svg.push_str("</g>\n");

        if !step.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                panel_y + sh + 14.0,
                escape_xml(&step.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H;

        if i < steps.len() - 1 {
            svg.push_str(&format!(
                r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" class="arrow"/>"#,
                center_x,
                y + 8.0,
                center_x,
                y + PANEL_GAP - 8.0
            ));
            svg.push('\n');
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn svg_shows_both_panels() {
        let svg = render_overlay_svg(&OverlayTable::billboards(), 1280.0, 720.0, 1024.0, 1024.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("Image  1024×1024"));
        assert!(svg.contains("Viewport  1280×720"));
        assert!(svg.contains("scale 1.250"));
        // Two quads per panel.
        assert_eq!(svg.matches("<polygon").count(), 4);
        assert_eq!(svg.matches(r#"class="image""#).count(), 1);
    }

    #[test]
    fn svg_without_cover_shows_image_only() {
        let svg = render_overlay_svg(&OverlayTable::billboards(), 1280.0, 720.0, 0.0, 0.0);
        assert!(svg.contains("Image"));
        assert!(!svg.contains("Viewport"));
        assert!(svg.contains("cover unavailable"));
        assert_eq!(svg.matches("<polygon").count(), 2);
    }

    #[test]
    fn svg_notes_degenerate_quads() {
        let p = Point::new(10.0, 10.0);
        let table = OverlayTable::new().with("dot", Quad::new(p, p, p, p));
        let svg = render_overlay_svg(&table, 100.0, 100.0, 100.0, 100.0);
        assert!(svg.contains("1 degenerate"));
    }

    #[test]
    fn svg_escapes_names() {
        let table = OverlayTable::new().with("a<b>&c", Quad::rect(0.0, 0.0, 10.0, 10.0));
        let svg = render_overlay_svg(&table, 100.0, 100.0, 100.0, 100.0);
        assert!(svg.contains("a&lt;b&gt;&amp;c"));
        assert!(!svg.contains("a<b>"));
    }

    #[test]
    fn svg_empty_table() {
        let svg = render_overlay_svg(&OverlayTable::new(), 100.0, 100.0, 100.0, 100.0);
        assert!(svg.contains("0 quad(s)"));
        assert!(!svg.contains("<polygon"));
    }
}
