//! Flat cartoon illustrated slides.

use super::{slide_canvas, slide_seed};
use crate::scene::Scene;
use deck_core::clean::ellipsize;
use deck_core::{detect_theme, SlideDigest};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const INK: &str = "#1b3552";
const ACCENT: &str = "#2b7db3";
const MUTED: &str = "#58708a";
const PALE_EDGE: &str = "#9ac4e8";
const CLOUD_EDGE: &str = "#cfe6ff";

const TITLE_MAX_CHARS: usize = 60;
const POINT_MAX_CHARS: usize = 72;
const MAX_POINTS: usize = 4;

/// Draw a slide digest as a light desk scene with key points and a chart card.
pub fn flat_scene(digest: &SlideDigest) -> Scene {
    let mut rng = SmallRng::seed_from_u64(slide_seed(digest.number, &digest.title, 2029, 97));
    let mut scene = slide_canvas(180.0);

    scene.gradient(0.0, 0.0, 10.0, 7.5, "#f7fcff", "#d6f2ff").z(0);
    cloud(&mut scene, 2.0, 6.7, 1.0);
    cloud(&mut scene, 7.7, 6.9, 0.9);
    scene
        .circle(8.9, 5.6, 0.75)
        .fill("#ffd6a0")
        .stroke("#f2a65a", 2.5)
        .alpha(0.95)
        .z(1);

    desk(&mut scene, &mut rng);

    let theme = detect_theme(&digest.title, &digest.points, &digest.text);

    scene
        .padded_box(0.7, 5.25, 8.6, 1.6, 0.2, 0.05)
        .fill("#ffffff")
        .stroke(PALE_EDGE, 3.0)
        .z(9);
    scene
        .text(1.0, 6.55, format!("Slide {:02}", digest.number))
        .size(11.0)
        .color(ACCENT)
        .bold()
        .z(10);
    scene
        .text(1.0, 6.15, ellipsize(&digest.title, TITLE_MAX_CHARS))
        .size(22.0)
        .color(INK)
        .bold()
        .z(10);
    scene
        .text(1.0, 5.75, "Cartoon-style slide image")
        .size(10.5)
        .color(MUTED)
        .z(10);

    scene
        .padded_box(0.7, 1.6, 5.0, 3.4, 0.18, 0.05)
        .fill("#ffffff")
        .stroke(CLOUD_EDGE, 2.5)
        .z(8);
    scene
        .text(0.95, 4.75, "Key points")
        .size(12.0)
        .bold()
        .color(ACCENT)
        .z(10);

    let mut y = 4.35;
    for point in digest.points.iter().take(MAX_POINTS) {
        scene
            .text(1.0, y, format!("• {}", ellipsize(point, POINT_MAX_CHARS)))
            .size(10.2)
            .color(INK)
            .z(10);
        y -= 0.42;
    }
    if digest.points.is_empty() {
        scene
            .text(1.0, y, "• (No bullets detected, showing the title only)")
            .size(10.2)
            .color(MUTED)
            .z(10);
    }

    scene
        .text(6.0, 4.85, format!("Theme: {}", theme))
        .size(11.0)
        .bold()
        .color(ACCENT)
        .z(10);
    magnifier(&mut scene, 6.6, 4.0, 1.0);
    chart_card(&mut scene, 7.1, 2.0, 2.6, 2.1, &mut rng);

    scene
        .padded_box(6.0, 5.25, 3.3, 0.5, 0.18, 0.03)
        .fill("#dff1ff")
        .stroke(PALE_EDGE, 2.0)
        .z(9);
    scene.text(6.15, 5.5, "Exploration mode").size(10.0).color(INK).z(10);

    scene.text(0.7, 0.25, "MIS 6380 • Class 4").size(9.5).color(MUTED).z(10);

    scene
}

fn cloud(scene: &mut Scene, x: f64, y: f64, s: f64) {
    for (dx, dy, r) in [(0.0, 0.0, 0.35), (0.35, 0.08, 0.28), (-0.32, 0.06, 0.26), (0.12, 0.18, 0.22)] {
        scene
            .circle(x + dx * s, y + dy * s, r * s)
            .fill("#ffffff")
            .stroke(CLOUD_EDGE, 2.0)
            .z(2);
    }
    scene
        .padded_box(x - 0.62 * s, y - 0.22 * s, 1.28 * s, 0.42 * s, 0.2, 0.02)
        .fill("#ffffff")
        .stroke(CLOUD_EDGE, 2.0)
        .z(2);
}

fn desk(scene: &mut Scene, rng: &mut SmallRng) {
    scene.rect(0.0, 0.0, 10.0, 1.35).fill("#ffdfb8").stroke("#e9b27b", 2.5).z(3);
    scene.rect(0.0, 1.25, 10.0, 0.10).fill("#ffd6a0").z(4);

    // monitor stand
    scene
        .padded_box(6.8, 1.05, 1.7, 0.3, 0.08, 0.02)
        .fill("#7bd3ff")
        .stroke(ACCENT, 2.2)
        .z(5);

    // sticky note
    scene
        .padded_box(1.0, 0.55, 1.35, 0.85, 0.08, 0.03)
        .fill("#fff3a6")
        .stroke("#e0c75a", 2.0)
        .z(6);
    scene.text(1.15, 1.15, "EDA").size(14.0).bold().color("#6b5b00").z(7);
    scene.line(1.15, 1.02, 2.2, 1.02).color("#6b5b00").line_width(2.0).z(7);

    // mug
    scene
        .padded_box(2.7, 0.48, 0.55, 0.62, 0.12, 0.02)
        .fill("#ffffff")
        .stroke(PALE_EDGE, 2.0)
        .z(6);
    scene.circle(3.26, 0.78, 0.17).no_fill().stroke(PALE_EDGE, 2.0).z(6);
    scene.rect(2.78, 0.92, 0.40, 0.08).fill("#ff9bb3").alpha(0.9).z(7);

    // paper with a mini chart
    scene
        .padded_box(4.0, 0.55, 1.7, 0.95, 0.06, 0.02)
        .fill("#ffffff")
        .stroke(PALE_EDGE, 2.0)
        .z(6);
    let points: Vec<(f64, f64)> = (0..7)
        .map(|i| (4.2 + 1.3 * i as f64 / 6.0, 0.75 + rng.gen_range(0.05..0.65)))
        .collect();
    for &(x, y) in &points {
        scene.marker(x, y, 18.0).fill("#ff6b8f").z(8);
    }
    scene.polyline(points).color(ACCENT).line_width(2.2).z(7);
}

fn magnifier(scene: &mut Scene, x: f64, y: f64, s: f64) {
    scene.circle(x, y, 0.42 * s).fill("#ffffff").stroke(ACCENT, 3.0).z(8);
    scene.circle(x, y, 0.30 * s).fill("#dff1ff").alpha(0.9).z(8);
    scene
        .padded_box(x + 0.30 * s, y - 0.55 * s, 0.18 * s, 0.62 * s, 0.09, 0.02)
        .fill("#ff6b8f")
        .stroke("#b33856", 2.5)
        .z(8);
}

fn chart_card(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64, rng: &mut SmallRng) {
    scene
        .padded_box(x, y, w, h, 0.12, 0.03)
        .fill("#ffffff")
        .stroke(PALE_EDGE, 2.5)
        .z(7);

    let bars = 6;
    let bw = w / (bars as f64 + 1.0);
    for i in 0..bars {
        let bh = rng.gen_range(0.2..0.85) * (h - 0.35);
        scene
            .rect(x + 0.15 + i as f64 * bw, y + 0.18, bw * 0.6, bh)
            .fill("#7bd3ff")
            .stroke(ACCENT, 1.6)
            .z(8);
    }
    scene
        .line(x + 0.18, y + h - 0.22, x + w - 0.18, y + h - 0.22)
        .color(CLOUD_EDGE)
        .line_width(3.0)
        .z(8);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(number: usize, title: &str, points: &[&str]) -> SlideDigest {
        SlideDigest {
            number,
            title: title.to_string(),
            points: points.iter().map(|p| p.to_string()).collect(),
            text: format!("## {}", title),
        }
    }

    #[test]
    fn test_flat_layout_texts() {
        let d = digest(12, "Correlation Heatmaps", &["Read the diagonal", "Watch the scale"]);
        let scene = flat_scene(&d);
        let texts = scene.texts();
        assert!(texts.contains(&"Slide 12"));
        assert!(texts.contains(&"Correlation Heatmaps"));
        assert!(texts.contains(&"Key points"));
        assert!(texts.contains(&"• Read the diagonal"));
        assert!(texts.contains(&"Theme: correlation"));
        assert!(texts.contains(&"Exploration mode"));
        assert!(texts.contains(&"MIS 6380 • Class 4"));
    }

    #[test]
    fn test_points_capped_and_ellipsized() {
        let long = "x".repeat(100);
        let d = digest(1, "Many", &["a", "b", "c", "d", "e", &long]);
        let scene = flat_scene(&d);
        let bullets: Vec<&str> = scene.texts().into_iter().filter(|t| t.starts_with("• ")).collect();
        assert_eq!(bullets, vec!["• a", "• b", "• c", "• d"]);

        let d = digest(1, "Long", &[&long]);
        let scene = flat_scene(&d);
        let bullet = scene.texts().into_iter().find(|t| t.starts_with("• x")).unwrap();
        assert_eq!(bullet.chars().count(), 2 + POINT_MAX_CHARS);
    }

    #[test]
    fn test_no_points_fallback() {
        let scene = flat_scene(&digest(1, "Title Only", &[]));
        assert!(scene.texts().iter().any(|t| t.contains("No bullets detected")));
    }

    #[test]
    fn test_higher_resolution() {
        let scene = flat_scene(&digest(1, "Any", &[]));
        assert_eq!(scene.pixel_size(), (1800, 1350));
    }
}
