//! Slide image styles.
//!
//! Every slide of a markdown document becomes one 10 × 7.5 inch PNG named
//! `slide_NNN.png`. The plain style reproduces the slide text, the
//! illustrated styles (`jetsons`, `flat`) draw a themed scene around the
//! slide title and a few key points.

mod flat;
mod jetsons;
mod plain;

pub use flat::flat_scene;
pub use jetsons::jetsons_scene;
pub use plain::plain_scene;

use crate::raster::render_png;
use crate::scene::Scene;
use deck_core::{Error, Result, SlideDigest, SlideParser};
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Slide width in inches (and data units) of every style.
pub const SLIDE_WIDTH: f64 = 10.0;
/// Slide height in inches (and data units) of every style.
pub const SLIDE_HEIGHT: f64 = 7.5;

/// Title given to sections without any heading by the illustrated styles.
pub const ILLUSTRATED_FALLBACK_TITLE: &str = "Class 4 Slide";

/// How slide images are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideStyle {
    /// Title and wrapped body text, or the slide's own picture.
    #[default]
    Plain,
    /// Retro-futuristic city at night with a themed content panel.
    Jetsons,
    /// Light flat-cartoon desk scene with key-point and chart cards.
    Flat,
}

impl SlideStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideStyle::Plain => "plain",
            SlideStyle::Jetsons => "jetsons",
            SlideStyle::Flat => "flat",
        }
    }

    /// Whether the style draws from slide digests rather than full slides.
    pub fn is_illustrated(&self) -> bool {
        !matches!(self, SlideStyle::Plain)
    }
}

impl fmt::Display for SlideStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(SlideStyle::Plain),
            "jetsons" => Ok(SlideStyle::Jetsons),
            "flat" | "cartoon" => Ok(SlideStyle::Flat),
            other => Err(Error::ConfigError(format!(
                "Unknown slide style '{}' (expected plain, jetsons or flat)",
                other
            ))),
        }
    }
}

/// `slide_NNN.png`, the name shared with the sectioned decks.
pub fn slide_file_name(number: usize) -> String {
    format!("slide_{:03}.png", number)
}

/// Renders markdown slides to PNG files in one style.
#[derive(Debug, Clone)]
pub struct SlideArtist {
    style: SlideStyle,
    /// Directory slide image paths are resolved against.
    base_dir: PathBuf,
}

impl SlideArtist {
    pub fn new(style: SlideStyle) -> Self {
        Self {
            style,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn style(&self) -> SlideStyle {
        self.style
    }

    /// Build the scene of every slide, in document order.
    pub fn scenes(&self, markdown: &str) -> Result<Vec<(usize, Scene)>> {
        let scenes: Vec<(usize, Scene)> = if self.style.is_illustrated() {
            illustrated_parser()
                .digest_all(markdown)
                .iter()
                .map(|digest| (digest.number, self.digest_scene(digest)))
                .collect()
        } else {
            SlideParser::new()
                .parse_deck(markdown)
                .iter()
                .map(|slide| (slide.number, plain_scene(slide, &self.base_dir)))
                .collect()
        };

        if scenes.is_empty() {
            return Err(Error::MarkdownError("No slides found in document".to_string()));
        }
        Ok(scenes)
    }

    /// Build the scene of one 1-based slide.
    pub fn scene(&self, markdown: &str, number: usize) -> Result<Scene> {
        if self.style.is_illustrated() {
            let digest = illustrated_parser().digest_one(markdown, number)?;
            return Ok(self.digest_scene(&digest));
        }

        let slides = SlideParser::new().parse_deck(markdown);
        match number.checked_sub(1).and_then(|idx| slides.get(idx)) {
            Some(slide) => Ok(plain_scene(slide, &self.base_dir)),
            None => Err(Error::SlideOutOfRange {
                requested: number,
                available: slides.len(),
            }),
        }
    }

    /// Render every slide into `out_dir`, returning the written paths.
    pub fn render_all(&self, markdown: &str, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir)?;

        let scenes = self.scenes(markdown)?;
        let total = scenes.len();
        log::info!("Rendering {} slides in {} style", total, self.style);

        let mut paths = Vec::with_capacity(total);
        for (idx, (number, scene)) in scenes.iter().enumerate() {
            let path = out_dir.join(slide_file_name(*number));
            render_png(scene, &path)?;
            paths.push(path);

            let done = idx + 1;
            if done % 10 == 0 || done == total {
                log::info!("Rendered {}/{} slides", done, total);
            }
        }
        Ok(paths)
    }

    /// Render one 1-based slide to `out_path`.
    pub fn render_one(&self, markdown: &str, number: usize, out_path: impl AsRef<Path>) -> Result<PathBuf> {
        let scene = self.scene(markdown, number)?;
        let out_path = out_path.as_ref();
        render_png(&scene, out_path)?;
        Ok(out_path.to_path_buf())
    }

    fn digest_scene(&self, digest: &SlideDigest) -> Scene {
        match self.style {
            SlideStyle::Flat => flat_scene(digest),
            _ => jetsons_scene(digest),
        }
    }
}

/// Render every slide of `markdown` as `slide_NNN.png` files in `out_dir`.
pub fn render_slide_images(
    markdown: &str,
    style: SlideStyle,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    SlideArtist::new(style).render_all(markdown, out_dir)
}

fn illustrated_parser() -> SlideParser {
    SlideParser::new().with_fallback_title(ILLUSTRATED_FALLBACK_TITLE)
}

/// A blank slide-sized canvas.
fn slide_canvas(dpi: f64) -> Scene {
    Scene::new(SLIDE_WIDTH, SLIDE_HEIGHT).with_dpi(dpi)
}

/// Seed mixing the slide number and title length, so every slide of a deck
/// gets its own but reproducible decoration.
fn slide_seed(number: usize, title: &str, number_factor: u64, title_factor: u64) -> u64 {
    number as u64 * number_factor + title.chars().count() as u64 * title_factor
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

// Small chart glyphs shared by the illustrated styles.

fn bar_chart<R: Rng>(scene: &mut Scene, rng: &mut R, x0: f64, y0: f64, w: f64, h: f64, color: &str) {
    let bars = rng.gen_range(5..9);
    let bw = w / (bars as f64 + 1.0);
    for i in 0..bars {
        let bh = rng.gen_range(0.2..0.95) * h;
        scene
            .rect(x0 + i as f64 * bw + 0.05, y0, bw * 0.65, bh)
            .fill(color)
            .alpha(0.8)
            .z(12);
    }
}

fn line_chart<R: Rng>(scene: &mut Scene, rng: &mut R, x0: f64, y0: f64, w: f64, h: f64, color: &str) {
    const POINTS: usize = 14;
    let step = (w - 0.1) / (POINTS - 1) as f64;
    let points: Vec<(f64, f64)> = (0..POINTS)
        .map(|i| (x0 + 0.05 + step * i as f64, y0 + rng.gen_range(0.15..0.92) * h))
        .collect();
    for &(x, y) in &points {
        scene.marker(x, y, 10.0).fill("#efffff").z(13);
    }
    scene.polyline(points).color(color).line_width(2.0).z(12);
}

fn heatmap<R: Rng>(scene: &mut Scene, rng: &mut R, x0: f64, y0: f64, w: f64, h: f64, rows: usize, cols: usize) {
    let cw = w / cols as f64;
    let ch = h / rows as f64;
    for r in 0..rows {
        for c in 0..cols {
            let v: f32 = rng.gen();
            let color = csscolorparser::Color::new(0.25 + 0.65 * v, 0.35, 0.85 - 0.5 * v, 1.0);
            scene
                .rect(x0 + c as f64 * cw, y0 + r as f64 * ch, cw - 0.01, ch - 0.01)
                .fill_color(color)
                .alpha(0.9)
                .z(12);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = "# Class 4 – Exploratory Data Visualization\nWelcome to the session on exploring data before modelling.\n\n---\n\n## Slide 1 – Histograms\n- Show the **distribution** shape\n- Watch for skew\n\n---\n\n## Slide 2 – Missing Data\n- MCAR vs MAR vs MNAR\n- Imputation choices\n";

    #[test]
    fn test_style_from_str() {
        assert_eq!("plain".parse::<SlideStyle>().unwrap(), SlideStyle::Plain);
        assert_eq!("Jetsons".parse::<SlideStyle>().unwrap(), SlideStyle::Jetsons);
        assert_eq!("flat".parse::<SlideStyle>().unwrap(), SlideStyle::Flat);
        assert!(matches!("neon".parse::<SlideStyle>(), Err(Error::ConfigError(_))));
        assert_eq!(SlideStyle::Flat.to_string(), "flat");
    }

    #[test]
    fn test_slide_file_name() {
        assert_eq!(slide_file_name(7), "slide_007.png");
        assert_eq!(slide_file_name(123), "slide_123.png");
    }

    #[test]
    fn test_plain_skips_header_section() {
        let scenes = SlideArtist::new(SlideStyle::Plain).scenes(DOC).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].0, 1);
    }

    #[test]
    fn test_illustrated_numbers_every_section() {
        let scenes = SlideArtist::new(SlideStyle::Jetsons).scenes(DOC).unwrap();
        assert_eq!(scenes.len(), 3);
        assert!(scenes[0].1.texts().contains(&"Class 4 – Exploratory Data Visualization"));
        assert!(scenes[2].1.texts().contains(&"Slide 03"));
    }

    #[test]
    fn test_scene_out_of_range() {
        for style in [SlideStyle::Plain, SlideStyle::Flat] {
            let err = SlideArtist::new(style).scene(DOC, 9).unwrap_err();
            assert!(matches!(err, Error::SlideOutOfRange { requested: 9, .. }));
        }
        let err = SlideArtist::new(SlideStyle::Plain).scene(DOC, 0).unwrap_err();
        assert!(matches!(err, Error::SlideOutOfRange { .. }));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = SlideArtist::new(SlideStyle::Plain).scenes("no slides here").unwrap_err();
        assert!(matches!(err, Error::MarkdownError(_)));
    }

    #[test]
    fn test_render_all_writes_numbered_files() {
        let dir = TempDir::new().unwrap();
        let artist = SlideArtist::new(SlideStyle::Plain);
        let paths = artist.render_all(DOC, dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(dir.path().join("slide_001.png").exists());
        assert!(dir.path().join("slide_002.png").exists());

        let (w, h) = image::image_dimensions(&paths[0]).unwrap();
        assert_eq!((w, h), (1500, 1125));
    }

    #[test]
    fn test_render_one() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("slide_002_flat.png");
        let path = SlideArtist::new(SlideStyle::Flat).render_one(DOC, 2, &out).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_slide_seed() {
        assert_eq!(slide_seed(2, "abc", 7919, 101), 2 * 7919 + 3 * 101);
        assert_eq!(slide_seed(1, "é", 2029, 97), 2029 + 97);
    }

    #[test]
    fn test_chart_glyphs_stay_in_their_box() {
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let mut rng = SmallRng::seed_from_u64(3);
        let mut scene = slide_canvas(150.0);
        bar_chart(&mut scene, &mut rng, 1.0, 1.0, 4.0, 2.0, "#79dbff");
        line_chart(&mut scene, &mut rng, 5.0, 1.0, 4.0, 2.0, "#ffb866");
        heatmap(&mut scene, &mut rng, 1.0, 4.0, 3.0, 2.0, 4, 4);
        for item in scene.items() {
            let (x0, y0, x1, y1) = item.shape.bounds();
            assert!(x0 >= 1.0 && x1 <= 9.0 + 1e-9, "{:?}", item.shape);
            assert!(y0 >= 1.0 && y1 <= 6.0 + 1e-9, "{:?}", item.shape);
        }
    }
}
