//! Drawing model for figures.
//!
//! A [`Scene`] is a plotting-axis style canvas: coordinates are data units
//! with `y` growing upward, line widths and font sizes are in points. Items
//! are drawn in ascending z-order, ties in insertion order.

use csscolorparser::Color;
use std::path::PathBuf;

/// Parse a CSS colour literal, falling back to black.
pub fn paint(css: &str) -> Color {
    csscolorparser::parse(css).unwrap_or_else(|_| {
        log::warn!("Invalid colour {:?}, using black", css);
        Color::new(0.0, 0.0, 0.0, 1.0)
    })
}

/// Linear blend between two colours, `t` in `[0, 1]`.
pub fn mix(a: &Color, b: &Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0) as f32;
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// Font settings, used by text items only.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size_pt: 10.0,
            bold: false,
            italic: false,
            monospace: false,
            halign: HAlign::Left,
            valign: VAlign::Baseline,
            rotation: 0.0,
        }
    }
}

/// Geometry of a drawable item.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// Rectangle with rounded corners; `pad` grows the box on every side.
    RoundBox {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        pad: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    /// Scatter marker whose radius is in points, independent of the axis.
    Marker {
        x: f64,
        y: f64,
        radius_pt: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    Polyline {
        points: Vec<(f64, f64)>,
    },
    /// Straight arrow with a filled triangular head ending at `to`.
    Arrow {
        from: (f64, f64),
        to: (f64, f64),
        head_width: f64,
        head_length: f64,
    },
    /// Vertical gradient from `top` to `bottom` colour.
    Gradient {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        top: Color,
        bottom: Color,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
    /// Raster image file stretched over the given extent.
    Image {
        path: PathBuf,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

impl Shape {
    /// Axis-aligned bounds `(xmin, ymin, xmax, ymax)` in data units.
    ///
    /// Markers and text report their anchor point.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Rect { x, y, w, h }
            | Shape::Gradient { x, y, w, h, .. }
            | Shape::Image { x, y, w, h, .. } => (*x, *y, x + w, y + h),
            Shape::RoundBox { x, y, w, h, pad, .. } => (x - pad, y - pad, x + w + pad, y + h + pad),
            Shape::Circle { cx, cy, r } => (cx - r, cy - r, cx + r, cy + r),
            Shape::Marker { x, y, .. } | Shape::Text { x, y, .. } => (*x, *y, *x, *y),
            Shape::Polygon { points } | Shape::Polyline { points } => points_bounds(points),
            Shape::Arrow { from, to, .. } => points_bounds(&[*from, *to]),
        }
    }
}

fn points_bounds(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    )
}

/// A shape with its paint and z-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub shape: Shape,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width_pt: f64,
    /// Opacity applied to fill and stroke.
    pub alpha: f64,
    /// Stroke drawn as dashes.
    pub dashed: bool,
    pub z: i32,
    pub font: Font,
}

impl Item {
    fn new(shape: Shape) -> Self {
        let (fill, stroke) = match shape {
            Shape::Polyline { .. } => (None, Some(paint("#000000"))),
            _ => (Some(paint("#000000")), None),
        };
        Self {
            shape,
            fill,
            stroke,
            stroke_width_pt: 1.0,
            alpha: 1.0,
            dashed: false,
            z: 0,
            font: Font::default(),
        }
    }

    pub fn fill(&mut self, css: &str) -> &mut Self {
        self.fill = Some(paint(css));
        self
    }

    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.fill = Some(color);
        self
    }

    pub fn no_fill(&mut self) -> &mut Self {
        self.fill = None;
        self
    }

    /// Fill and stroke in the same colour, like a solid patch.
    pub fn color(&mut self, css: &str) -> &mut Self {
        let color = paint(css);
        if matches!(self.shape, Shape::Polyline { .. }) {
            self.stroke = Some(color);
        } else {
            self.fill = Some(color);
        }
        self
    }

    pub fn stroke(&mut self, css: &str, width_pt: f64) -> &mut Self {
        self.stroke = Some(paint(css));
        self.stroke_width_pt = width_pt;
        self
    }

    pub fn line_width(&mut self, width_pt: f64) -> &mut Self {
        self.stroke_width_pt = width_pt;
        self
    }

    pub fn alpha(&mut self, alpha: f64) -> &mut Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn dashed(&mut self) -> &mut Self {
        self.dashed = true;
        self
    }

    pub fn z(&mut self, z: i32) -> &mut Self {
        self.z = z;
        self
    }

    pub fn size(&mut self, size_pt: f64) -> &mut Self {
        self.font.size_pt = size_pt;
        self
    }

    pub fn bold(&mut self) -> &mut Self {
        self.font.bold = true;
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.font.italic = true;
        self
    }

    pub fn monospace(&mut self) -> &mut Self {
        self.font.monospace = true;
        self
    }

    pub fn align(&mut self, halign: HAlign, valign: VAlign) -> &mut Self {
        self.font.halign = halign;
        self.font.valign = valign;
        self
    }

    pub fn ha(&mut self, halign: HAlign) -> &mut Self {
        self.font.halign = halign;
        self
    }

    pub fn va(&mut self, valign: VAlign) -> &mut Self {
        self.font.valign = valign;
        self
    }

    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.font.rotation = degrees;
        self
    }
}

/// A figure ready to be rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Data-unit extent along x, starting at 0.
    pub width: f64,
    /// Data-unit extent along y, starting at 0.
    pub height: f64,
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub background: Color,
    items: Vec<Item>,
}

impl Scene {
    /// A `width × height` canvas, one inch per data unit, at 150 dpi.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            width_in: width,
            height_in: height,
            dpi: 150.0,
            background: paint("#ffffff"),
            items: Vec::new(),
        }
    }

    pub fn with_size_inches(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in;
        self.height_in = height_in;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_background(mut self, css: &str) -> Self {
        self.background = paint(css);
        self
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as u32,
            (self.height_in * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Pixels per data unit along x and y.
    pub fn scale(&self) -> (f64, f64) {
        let (w, h) = self.pixel_size();
        (w as f64 / self.width, h as f64 / self.height)
    }

    /// Points to pixels at this scene's resolution.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    pub fn push(&mut self, shape: Shape) -> &mut Item {
        self.items.push(Item::new(shape));
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Item {
        self.push(Shape::Rect { x, y, w, h })
    }

    pub fn round_box(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) -> &mut Item {
        self.push(Shape::RoundBox {
            x,
            y,
            w,
            h,
            radius,
            pad: 0.0,
        })
    }

    /// Rounded box grown by `pad` on every side.
    pub fn padded_box(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, pad: f64) -> &mut Item {
        self.push(Shape::RoundBox {
            x,
            y,
            w,
            h,
            radius,
            pad,
        })
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) -> &mut Item {
        self.push(Shape::Circle { cx, cy, r })
    }

    /// Scatter marker; `area_pt2` follows the plotting convention of a
    /// marker size given as area in square points.
    pub fn marker(&mut self, x: f64, y: f64, area_pt2: f64) -> &mut Item {
        self.push(Shape::Marker {
            x,
            y,
            radius_pt: area_pt2.max(0.0).sqrt() / 2.0,
        })
    }

    pub fn polygon(&mut self, points: Vec<(f64, f64)>) -> &mut Item {
        self.push(Shape::Polygon { points })
    }

    pub fn polyline(&mut self, points: Vec<(f64, f64)>) -> &mut Item {
        self.push(Shape::Polyline { points })
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Item {
        self.polyline(vec![(x1, y1), (x2, y2)])
    }

    pub fn arrow(&mut self, from: (f64, f64), to: (f64, f64), head_width: f64, head_length: f64) -> &mut Item {
        self.push(Shape::Arrow {
            from,
            to,
            head_width,
            head_length,
        })
    }

    pub fn gradient(&mut self, x: f64, y: f64, w: f64, h: f64, top: &str, bottom: &str) -> &mut Item {
        self.push(Shape::Gradient {
            x,
            y,
            w,
            h,
            top: paint(top),
            bottom: paint(bottom),
        })
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>) -> &mut Item {
        self.push(Shape::Text {
            x,
            y,
            text: text.into(),
        })
    }

    pub fn image(&mut self, path: impl Into<PathBuf>, x: f64, y: f64, w: f64, h: f64) -> &mut Item {
        self.push(Shape::Image {
            path: path.into(),
            x,
            y,
            w,
            h,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in drawing order.
    pub fn ordered(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_key(|item| item.z);
        items
    }

    /// Every text string in the scene, in insertion order.
    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match &item.shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether every item lies inside the canvas, allowing `margin` data
    /// units of overhang.
    pub fn within_bounds(&self, margin: f64) -> bool {
        self.items.iter().all(|item| {
            let (x0, y0, x1, y1) = item.shape.bounds();
            x0 >= -margin && y0 >= -margin && x1 <= self.width + margin && y1 <= self.height + margin
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_parses_hex_and_names() {
        assert_eq!(paint("#ff0000").to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(paint("white").to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(paint("not a colour").to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_mix() {
        let mid = mix(&paint("#000000"), &paint("#ffffff"), 0.5);
        let [r, g, b, _] = mid.to_rgba8();
        assert!((127..=128).contains(&r) && r == g && g == b);
    }

    #[test]
    fn test_builder_sets_style() {
        let mut scene = Scene::new(10.0, 7.5);
        scene.rect(0.0, 0.0, 10.0, 1.1).fill("#1b1737").alpha(0.95).z(2);
        scene.text(5.0, 7.0, "Title").size(20.0).bold().ha(HAlign::Center).z(11);

        let items = scene.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].z, 2);
        assert!((items[0].alpha - 0.95).abs() < 1e-9);
        assert!(items[1].font.bold);
        assert_eq!(items[1].font.halign, HAlign::Center);
        assert_eq!(scene.texts(), vec!["Title"]);
    }

    #[test]
    fn test_ordered_is_stable_by_z() {
        let mut scene = Scene::new(1.0, 1.0);
        scene.text(0.0, 0.0, "a").z(5);
        scene.text(0.0, 0.0, "b").z(1);
        scene.text(0.0, 0.0, "c").z(5);
        let order: Vec<&str> = scene
            .ordered()
            .iter()
            .filter_map(|i| match &i.shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_polyline_colour_sets_stroke() {
        let mut scene = Scene::new(1.0, 1.0);
        let item = scene.line(0.0, 0.0, 1.0, 1.0).color("#88f2ff");
        assert!(item.fill.is_none());
        assert_eq!(item.stroke.as_ref().map(|c| c.to_rgba8()), Some([0x88, 0xf2, 0xff, 255]));
    }

    #[test]
    fn test_pixel_size_and_scale() {
        let scene = Scene::new(10.0, 7.5);
        assert_eq!(scene.pixel_size(), (1500, 1125));
        assert_eq!(scene.scale(), (150.0, 150.0));
        assert_eq!(scene.pt_to_px(72.0), 150.0);
    }

    #[test]
    fn test_within_bounds() {
        let mut scene = Scene::new(10.0, 7.5);
        scene.padded_box(0.55, 5.5, 8.9, 1.35, 0.12, 0.05);
        assert!(scene.within_bounds(0.0));
        scene.circle(9.9, 7.4, 0.5);
        assert!(!scene.within_bounds(0.0));
        assert!(scene.within_bounds(0.5));
    }

    #[test]
    fn test_marker_radius_from_area() {
        let mut scene = Scene::new(1.0, 1.0);
        scene.marker(0.5, 0.5, 16.0);
        assert_eq!(
            scene.items()[0].shape,
            Shape::Marker {
                x: 0.5,
                y: 0.5,
                radius_pt: 2.0
            }
        );
    }
}
