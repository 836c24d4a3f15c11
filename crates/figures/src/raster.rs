//! PNG output for scenes.
//!
//! A scene is serialized to an SVG document in pixel coordinates, then
//! rasterized with resvg into a tiny-skia pixmap.

use crate::scene::{HAlign, Item, Scene, Shape, VAlign};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use csscolorparser::Color;
use deck_core::{Error, Result};
use quick_xml::escape::escape;
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, LazyLock};

const SANS_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";
const MONO_FAMILY: &str = "DejaVu Sans Mono, Liberation Mono, Courier New, monospace";

/// Line height as a multiple of the font size.
const LINE_SPACING: f64 = 1.2;

/// Maps data coordinates to SVG pixel coordinates.
struct Mapper {
    sx: f64,
    sy: f64,
    height: f64,
    px_per_pt: f64,
}

impl Mapper {
    fn new(scene: &Scene) -> Self {
        let (sx, sy) = scene.scale();
        Self {
            sx,
            sy,
            height: scene.height,
            px_per_pt: scene.pt_to_px(1.0),
        }
    }

    fn x(&self, x: f64) -> f64 {
        x * self.sx
    }

    fn y(&self, y: f64) -> f64 {
        (self.height - y) * self.sy
    }

    fn pt(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }

    /// Top-left corner and size in pixels of a data-unit box.
    fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
        (self.x(x), self.y(y + h), w * self.sx, h * self.sy)
    }

    fn points(&self, points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|&(x, y)| format!("{:.2},{:.2}", self.x(x), self.y(y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn rgb(color: &Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// `fill`/`stroke` attributes, folding colour alpha into the opacity.
fn paint_attrs(item: &Item, mapper: &Mapper) -> String {
    let mut attrs = String::new();
    match &item.fill {
        Some(fill) => {
            let _ = write!(
                attrs,
                r#" fill="{}" fill-opacity="{:.3}""#,
                rgb(fill),
                fill.a as f64 * item.alpha
            );
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &item.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}" stroke-linejoin="round" stroke-linecap="round""#,
            rgb(stroke),
            stroke.a as f64 * item.alpha,
            mapper.pt(item.stroke_width_pt)
        );
        if item.dashed {
            let dash = mapper.pt(item.stroke_width_pt.max(1.0) * 3.5);
            let _ = write!(attrs, r#" stroke-dasharray="{:.2} {:.2}""#, dash, dash * 0.6);
        }
    }
    attrs
}

/// Serialize a scene to an SVG document sized in pixels.
pub fn to_svg(scene: &Scene) -> String {
    let mapper = Mapper::new(scene);
    let (width, height) = scene.pixel_size();

    let mut defs = String::new();
    let mut body = String::new();
    let mut gradient_id = 0;

    for item in scene.ordered() {
        match &item.shape {
            Shape::Rect { x, y, w, h } => {
                let (px, py, pw, ph) = mapper.rect(*x, *y, *w, *h);
                let _ = write!(
                    body,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}/>"#,
                    px,
                    py,
                    pw,
                    ph,
                    paint_attrs(item, &mapper)
                );
            }
            Shape::RoundBox {
                x,
                y,
                w,
                h,
                radius,
                pad,
            } => {
                let (px, py, pw, ph) = mapper.rect(x - pad, y - pad, w + 2.0 * pad, h + 2.0 * pad);
                let rx = (radius * mapper.sx).min(pw / 2.0);
                let ry = (radius * mapper.sy).min(ph / 2.0);
                let _ = write!(
                    body,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" ry="{:.2}"{}/>"#,
                    px,
                    py,
                    pw,
                    ph,
                    rx,
                    ry,
                    paint_attrs(item, &mapper)
                );
            }
            Shape::Circle { cx, cy, r } => {
                let _ = write!(
                    body,
                    r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}"{}/>"#,
                    mapper.x(*cx),
                    mapper.y(*cy),
                    r * mapper.sx,
                    r * mapper.sy,
                    paint_attrs(item, &mapper)
                );
            }
            Shape::Marker { x, y, radius_pt } => {
                let _ = write!(
                    body,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}"{}/>"#,
                    mapper.x(*x),
                    mapper.y(*y),
                    mapper.pt(*radius_pt),
                    paint_attrs(item, &mapper)
                );
            }
            Shape::Polygon { points } => {
                let _ = write!(
                    body,
                    r#"<polygon points="{}"{}/>"#,
                    mapper.points(points),
                    paint_attrs(item, &mapper)
                );
            }
            Shape::Polyline { points } => {
                let _ = write!(
                    body,
                    r#"<polyline points="{}"{}/>"#,
                    mapper.points(points),
                    paint_attrs(item, &mapper)
                );
            }
            Shape::Arrow {
                from,
                to,
                head_width,
                head_length,
            } => body.push_str(&arrow_svg(item, &mapper, *from, *to, *head_width, *head_length)),
            Shape::Gradient {
                x,
                y,
                w,
                h,
                top,
                bottom,
            } => {
                gradient_id += 1;
                let _ = write!(
                    defs,
                    r#"<linearGradient id="grad{id}" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{}" stop-opacity="{:.3}"/><stop offset="1" stop-color="{}" stop-opacity="{:.3}"/></linearGradient>"#,
                    rgb(top),
                    top.a as f64 * item.alpha,
                    rgb(bottom),
                    bottom.a as f64 * item.alpha,
                    id = gradient_id
                );
                let (px, py, pw, ph) = mapper.rect(*x, *y, *w, *h);
                let _ = write!(
                    body,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="url(#grad{})"/>"#,
                    px, py, pw, ph, gradient_id
                );
            }
            Shape::Text { x, y, text } => body.push_str(&text_svg(item, &mapper, *x, *y, text)),
            Shape::Image { path, x, y, w, h } => {
                let (px, py, pw, ph) = mapper.rect(*x, *y, *w, *h);
                match image_data_uri(path, pw, ph) {
                    Ok(uri) => {
                        let _ = write!(
                            body,
                            r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="none" opacity="{:.3}" xlink:href="{}"/>"#,
                            px, py, pw, ph, item.alpha, uri
                        );
                    }
                    Err(e) => {
                        log::warn!("Could not embed image {}: {}", path.display(), e);
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default();
                        let _ = write!(
                            body,
                            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#f2f2f2" stroke="#999999" stroke-dasharray="8 6"/><text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="#666666" text-anchor="middle">{}</text>"##,
                            px,
                            py,
                            pw,
                            ph,
                            px + pw / 2.0,
                            py + ph / 2.0,
                            SANS_FAMILY,
                            mapper.pt(12.0),
                            escape(format!("[Image: {}]", name).as_str())
                        );
                    }
                }
            }
        }
    }

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{}</defs>", defs);
    }
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" fill-opacity="{:.3}"/>"#,
        width,
        height,
        rgb(&scene.background),
        scene.background.a
    );
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

fn arrow_svg(
    item: &Item,
    mapper: &Mapper,
    from: (f64, f64),
    to: (f64, f64),
    head_width: f64,
    head_length: f64,
) -> String {
    let (x1, y1) = (mapper.x(from.0), mapper.y(from.1));
    let (x2, y2) = (mapper.x(to.0), mapper.y(to.1));
    let (dx, dy) = (x2 - x1, y2 - y1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return String::new();
    }
    let (ux, uy) = (dx / length, dy / length);
    let head_len = (head_length * mapper.sx).min(length);
    let half_width = head_width * mapper.sx / 2.0;
    let (bx, by) = (x2 - ux * head_len, y2 - uy * head_len);

    let color = item
        .stroke
        .as_ref()
        .or(item.fill.as_ref())
        .map(rgb)
        .unwrap_or_else(|| "#000000".to_string());

    let mut svg = String::new();
    if head_len < length {
        let _ = write!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}"/>"#,
            x1,
            y1,
            bx,
            by,
            color,
            item.alpha,
            mapper.pt(item.stroke_width_pt)
        );
    }
    let _ = write!(
        svg,
        r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
        x2,
        y2,
        bx - uy * half_width,
        by + ux * half_width,
        bx + uy * half_width,
        by - ux * half_width,
        color,
        item.alpha
    );
    svg
}

fn text_svg(item: &Item, mapper: &Mapper, x: f64, y: f64, text: &str) -> String {
    let font = &item.font;
    let size = mapper.pt(font.size_pt);
    let line_height = size * LINE_SPACING;
    let lines: Vec<&str> = text.split('\n').collect();
    let block = (lines.len() - 1) as f64 * line_height;

    let px = mapper.x(x);
    let py = mapper.y(y);
    let first_baseline = match font.valign {
        VAlign::Top => py + size * 0.8,
        VAlign::Center => py - block / 2.0 + size * 0.35,
        VAlign::Baseline => py,
        VAlign::Bottom => py - block - size * 0.2,
    };
    let anchor = match font.halign {
        HAlign::Left => "start",
        HAlign::Center => "middle",
        HAlign::Right => "end",
    };
    let fill = item
        .fill
        .as_ref()
        .map(|c| (rgb(c), c.a as f64 * item.alpha))
        .unwrap_or_else(|| ("#000000".to_string(), item.alpha));

    let mut svg = format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" fill-opacity="{:.3}" text-anchor="{}""#,
        px,
        first_baseline,
        if font.monospace { MONO_FAMILY } else { SANS_FAMILY },
        size,
        fill.0,
        fill.1,
        anchor
    );
    if font.bold {
        svg.push_str(r#" font-weight="bold""#);
    }
    if font.italic {
        svg.push_str(r#" font-style="italic""#);
    }
    if font.rotation != 0.0 {
        let _ = write!(svg, r#" transform="rotate({:.2} {:.2} {:.2})""#, -font.rotation, px, py);
    }
    svg.push('>');
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        let _ = write!(
            svg,
            r#"<tspan x="{:.2}" dy="{:.2}" xml:space="preserve">{}</tspan>"#,
            px,
            dy,
            escape(*line)
        );
    }
    svg.push_str("</text>");
    svg
}

/// Load an image, resize it to the target pixel box and encode as PNG.
fn image_data_uri(path: &Path, width: f64, height: f64) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let img = image::open(path).map_err(|e| Error::ImageError(e.to_string()))?;
    let resized = img.resize_exact(
        width.round().max(1.0) as u32,
        height.round().max(1.0) as u32,
        image::imageops::FilterType::Triangle,
    );
    let mut bytes = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| Error::ImageError(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
}

/// System fonts, loaded once per process.
static FONT_DB: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        log::warn!("No system fonts found; text will not be drawn");
    }
    Arc::new(db)
});

/// Rasterize a scene into PNG bytes.
pub fn render_png_bytes(scene: &Scene) -> Result<Vec<u8>> {
    let svg = to_svg(scene);
    let options = usvg::Options {
        fontdb: Arc::clone(&FONT_DB),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| Error::RenderError(format!("Failed to parse SVG: {}", e)))?;

    let (width, height) = scene.pixel_size();
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::RenderError(format!("Invalid canvas size {}x{}", width, height)))?;
    resvg::render(&tree, usvg::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::RenderError(format!("Failed to encode PNG: {}", e)))
}

/// Rasterize a scene and write it to `path`, creating parent directories.
pub fn render_png(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = render_png_bytes(scene)?;
    std::fs::write(path, bytes)?;
    log::debug!("Rendered {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(4.0, 3.0).with_dpi(20.0);
        scene.gradient(0.0, 0.0, 4.0, 3.0, "#141f52", "#804f9e").z(0);
        scene.rect(0.0, 0.0, 4.0, 1.0).fill("#1b1737").z(1);
        scene.round_box(0.5, 1.5, 2.0, 1.0, 0.2).fill("#0e1e48").stroke("#9af2ff", 1.4).z(2);
        scene.circle(3.0, 2.5, 0.3).fill("#ffe39a").alpha(0.75);
        scene.arrow((0.5, 0.5), (3.5, 0.5), 0.2, 0.3).color("#b0fbff");
        scene
    }

    #[test]
    fn test_svg_flips_y_axis() {
        let mut scene = Scene::new(10.0, 7.5).with_dpi(10.0);
        scene.rect(0.0, 0.0, 10.0, 1.0).fill("#ff0000");
        let svg = to_svg(&scene);
        // bottom strip of a 75px-tall canvas starts at y = 65
        assert!(svg.contains(r##"<rect x="0.00" y="65.00" width="100.00" height="10.00" fill="#ff0000""##));
    }

    #[test]
    fn test_svg_text_attributes() {
        let mut scene = Scene::new(10.0, 7.5);
        scene
            .text(5.0, 7.0, "Tom & Jerry\nsecond")
            .size(20.0)
            .bold()
            .align(HAlign::Center, VAlign::Top)
            .fill("#003366");
        let svg = to_svg(&scene);
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert_eq!(svg.matches("<tspan").count(), 2);
    }

    #[test]
    fn test_dashed_stroke() {
        let mut scene = Scene::new(10.0, 7.5).with_dpi(72.0);
        scene.line(0.0, 1.0, 10.0, 1.0).color("red").line_width(2.0).dashed();
        scene.line(0.0, 2.0, 10.0, 2.0).color("red");
        let svg = to_svg(&scene);
        assert_eq!(svg.matches("stroke-dasharray=\"7.00 4.20\"").count(), 1);
    }

    #[test]
    fn test_svg_gradient_defs() {
        let svg = to_svg(&sample_scene());
        assert!(svg.contains("<defs><linearGradient id=\"grad1\""));
        assert!(svg.contains("url(#grad1)"));
    }

    #[test]
    fn test_missing_image_placeholder() {
        let mut scene = Scene::new(10.0, 7.5).with_dpi(10.0);
        scene.image("/no/such/chart.png", 1.0, 0.5, 8.0, 5.5);
        let svg = to_svg(&scene);
        assert!(svg.contains("[Image: chart.png]"));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn test_embedded_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.png");
        image::RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let mut scene = Scene::new(10.0, 7.5).with_dpi(10.0);
        scene.image(&path, 1.0, 0.5, 8.0, 5.5);
        let svg = to_svg(&scene);
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_render_png_writes_image_of_expected_size() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/scene.png");
        render_png(&sample_scene(), &out).unwrap();

        let (w, h) = image::image_dimensions(&out).unwrap();
        assert_eq!((w, h), (80, 60));
    }

    #[test]
    fn test_render_colours_bottom_strip() {
        let mut scene = Scene::new(4.0, 4.0).with_dpi(10.0);
        scene.rect(0.0, 0.0, 4.0, 2.0).fill("#ff0000");
        let bytes = render_png_bytes(&scene).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(20, 35).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(20, 5).0, [255, 255, 255, 255]);
    }
}
