//! Retro-futuristic illustrated slides.

use super::{bar_chart, heatmap, line_chart, pick, slide_canvas, slide_seed};
use crate::scene::{HAlign, Scene, VAlign};
use deck_core::clean::ellipsize;
use deck_core::{detect_theme, SlideDigest, Theme};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const PANEL_TEXT: &str = "#e5fcff";
const BUILDING_COLORS: [&str; 4] = ["#2d2f64", "#413a84", "#30407c", "#275d86"];
const CAR_COLORS: [&str; 4] = ["#ff7ea9", "#6fe3ff", "#ffd166", "#b18cff"];

/// Draw a slide digest as a night-time city scene with a themed panel.
pub fn jetsons_scene(digest: &SlideDigest) -> Scene {
    let mut rng = SmallRng::seed_from_u64(slide_seed(digest.number, &digest.title, 7919, 101));
    let mut scene = slide_canvas(150.0);

    sky(&mut scene, &mut rng);

    let moon_x = rng.gen_range(7.4..9.2);
    let moon_y = rng.gen_range(5.7..6.8);
    let moon_r = rng.gen_range(0.35..0.55);
    scene.circle(moon_x, moon_y, moon_r).fill("#ffe39a").alpha(0.75).z(2);

    retro_city(&mut scene, &mut rng);

    let theme = detect_theme(&digest.title, &digest.points, &digest.text);

    for _ in 0..3 {
        let x = rng.gen_range(0.8..8.3);
        let y = rng.gen_range(3.0..5.2);
        let scale = rng.gen_range(0.8..1.2);
        let color = pick(&mut rng, &CAR_COLORS);
        flying_car(&mut scene, x, y, scale, color);
    }

    scene
        .padded_box(0.55, 5.5, 8.9, 1.35, 0.12, 0.05)
        .fill("#11183d")
        .stroke("#98f6ff", 1.8)
        .alpha(0.82)
        .z(10);
    scene
        .text(0.85, 6.28, format!("Slide {:02}", digest.number))
        .size(10.0)
        .color("#a6fbff")
        .bold()
        .va(VAlign::Center)
        .z(11);
    scene
        .text(0.85, 5.93, ellipsize(&digest.title, 80))
        .size(20.0)
        .color("#f4feff")
        .bold()
        .va(VAlign::Center)
        .z(11);

    theme_content(&mut scene, theme, &digest.points, &mut rng);
    keyword_chips(&mut scene, &digest.points);

    scene
}

fn sky(scene: &mut Scene, rng: &mut SmallRng) {
    scene.gradient(0.0, 0.0, 10.0, 7.5, "#141f52", "#804d9e").z(0);

    for _ in 0..120 {
        let x = rng.gen_range(0.2..9.8);
        let y = rng.gen_range(3.5..7.3);
        let size = rng.gen_range(5.0..22.0);
        scene.marker(x, y, size).fill("#f4f8ff").alpha(0.8).z(1);
    }
}

fn retro_city(scene: &mut Scene, rng: &mut SmallRng) {
    scene.rect(0.0, 0.0, 10.0, 1.1).fill("#1b1737").alpha(0.95).z(2);
    scene.rect(0.0, 1.0, 10.0, 0.15).fill("#73d6ff").alpha(0.45).z(3);

    let mut x = 0.3;
    while x < 9.7 {
        let bw: f64 = rng.gen_range(0.4..0.9);
        let bh: f64 = rng.gen_range(0.8..2.3);
        let color = pick(rng, &BUILDING_COLORS);
        scene.rect(x, 1.1, bw, bh).fill(color).alpha(0.92).z(4);

        let dome_r = bw * rng.gen_range(0.25..0.45);
        scene.circle(x + bw / 2.0, 1.1 + bh, dome_r).fill("#7fe3ff").alpha(0.55).z(5);

        let windows = (bh / 0.35).max(2.0) as usize;
        for i in 0..windows {
            let wy = 1.25 + i as f64 * 0.32;
            if wy < 1.1 + bh - 0.15 {
                scene.rect(x + 0.08, wy, bw - 0.16, 0.05).fill("#a4f7ff").alpha(0.6).z(6);
            }
        }

        x += bw + rng.gen_range(0.12..0.25);
    }

    let rail: Vec<(f64, f64)> = (0..200)
        .map(|i| {
            let rx = 10.0 * i as f64 / 199.0;
            (rx, 2.7 + 0.35 * (rx * 0.7).sin())
        })
        .collect();
    scene.polyline(rail).color("#88f2ff").line_width(3.0).alpha(0.8).z(6);
}

fn flying_car(scene: &mut Scene, x: f64, y: f64, s: f64, color: &str) {
    scene
        .padded_box(x, y, 0.9 * s, 0.28 * s, 0.12, 0.02)
        .fill(color)
        .stroke("#f7ffff", 1.2)
        .alpha(0.95)
        .z(8);
    scene
        .polygon(vec![
            (x + 0.15 * s, y + 0.28 * s),
            (x + 0.55 * s, y + 0.48 * s),
            (x + 0.75 * s, y + 0.28 * s),
        ])
        .fill("#d2f8ff")
        .stroke("#f7ffff", 1.0)
        .alpha(0.9)
        .z(9);
    scene
        .line(x - 0.55 * s, y + 0.12 * s, x, y + 0.12 * s)
        .color("#8cf7ff")
        .line_width(2.0)
        .alpha(0.7)
        .z(7);
}

fn caption(scene: &mut Scene, x: f64, y: f64, text: &str) {
    scene.text(x, y, text).size(10.0).color(PANEL_TEXT).z(13);
}

fn small_card(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64, fill: &str, radius: f64) {
    scene
        .padded_box(x, y, w, h, radius, 0.02)
        .fill(fill)
        .stroke("#9cf8ff", 1.0)
        .alpha(0.9)
        .z(12);
}

fn theme_content(scene: &mut Scene, theme: Theme, points: &[String], rng: &mut SmallRng) {
    scene
        .padded_box(0.55, 1.25, 8.9, 4.05, 0.14, 0.04)
        .fill("#0e1e48")
        .stroke("#9af2ff", 1.4)
        .alpha(0.84)
        .z(9);
    scene
        .text(0.9, 4.95, format!("Content Theme: {}", theme.title_case()))
        .size(10.5)
        .color("#9ef8ff")
        .bold()
        .z(13);

    match theme {
        Theme::Distribution => {
            bar_chart(scene, rng, 0.95, 1.75, 3.8, 2.2, "#79dbff");
            line_chart(scene, rng, 5.2, 1.75, 3.8, 2.2, "#ffb866");
            caption(scene, 1.0, 4.5, "Histograms / KDE / Skewness");
        }
        Theme::Correlation => {
            heatmap(scene, rng, 1.0, 1.7, 3.9, 2.5, 6, 6);
            line_chart(scene, rng, 5.25, 1.8, 3.7, 1.0, "#a8ff8b");
            bar_chart(scene, rng, 5.25, 3.1, 3.7, 1.1, "#bfa2ff");
            caption(scene, 1.0, 4.5, "Correlation Matrix / Pair Relationships");
        }
        Theme::Missing => {
            heatmap(scene, rng, 1.0, 1.7, 4.2, 2.5, 8, 10);
            for (i, label) in ["MCAR", "MAR", "MNAR"].iter().enumerate() {
                let dy = i as f64 * 0.8;
                small_card(scene, 5.6, 3.8 - dy, 3.3, 0.55, "#273777", 0.08);
                scene.text(5.75, 4.08 - dy, *label).size(10.0).color("#f1ffff").bold().z(13);
            }
            caption(scene, 1.0, 4.5, "Missingness Patterns / Imputation");
        }
        Theme::Outlier => {
            bar_chart(scene, rng, 0.95, 1.75, 4.0, 2.2, "#9be7ff");
            for i in 0..65 {
                let x = 5.4 + 3.6 * i as f64 / 64.0;
                let y = 2.8 + 0.45 * (x * 1.5).sin() + rng.gen_range(-0.12..0.12);
                scene.marker(x, y, 10.0).fill("#d9f7ff").alpha(0.8).z(12);
            }
            scene.marker(8.6, 3.9, 24.0).fill("#ff6b8f").z(13);
            scene.marker(8.8, 4.2, 24.0).fill("#ff6b8f").z(13);
            caption(scene, 5.3, 4.5, "IQR / Z-score Outlier Flags");
        }
        Theme::Comparison => {
            bar_chart(scene, rng, 1.0, 1.75, 3.8, 2.2, "#8be7af");
            bar_chart(scene, rng, 5.2, 1.75, 3.8, 2.2, "#87d8ff");
            caption(scene, 1.0, 4.5, "Group Comparison / Categorical Analysis");
        }
        Theme::Workflow => {
            let nodes = [(1.0, "Data"), (2.8, "Quality"), (4.6, "EDA"), (6.4, "Features"), (8.2, "Model")];
            let y = 3.7;
            for (i, (x, label)) in nodes.iter().enumerate() {
                scene
                    .padded_box(*x, y, 1.2, 0.6, 0.08, 0.02)
                    .fill("#2e4f86")
                    .stroke("#a8fbff", 1.1)
                    .alpha(0.9)
                    .z(12);
                scene
                    .text(x + 0.6, y + 0.3, *label)
                    .size(9.2)
                    .color("#f4ffff")
                    .align(HAlign::Center, VAlign::Center)
                    .z(13);
                if i + 1 < nodes.len() {
                    scene
                        .arrow((x + 1.25, y + 0.3), (x + 1.8, y + 0.3), 0.08, 0.1)
                        .fill("#b0fbff")
                        .stroke("#b0fbff", 1.0)
                        .z(13);
                }
            }
            caption(scene, 1.0, 2.3, "Question-driven iterative workflow");
        }
        Theme::Exercise => {
            for i in 0..4 {
                let x = 1.0 + i as f64 * 2.05;
                small_card(scene, x, 2.1, 1.8, 1.8, "#233e79", 0.1);
                bar_chart(scene, rng, x + 0.1, 2.25, 1.5, 1.3, "#ffc178");
            }
            caption(scene, 1.0, 4.5, "Hands-on mini analysis challenges");
        }
        Theme::Code => {
            scene.rect(0.95, 1.75, 8.0, 2.45).fill("#09162f").alpha(0.95).z(12);
            let code = [
                "import pandas as pd",
                "import seaborn as sns",
                "corr = df.corr()",
                "sns.heatmap(corr)",
                "plt.show()",
            ];
            for (i, line) in code.iter().enumerate() {
                scene
                    .text(1.15, 3.95 - i as f64 * 0.45, *line)
                    .size(9.3)
                    .color("#87f7c5")
                    .monospace()
                    .z(13);
            }
            caption(scene, 1.0, 4.5, "Python EDA implementation");
        }
        Theme::Summary | Theme::Assignment => {
            for i in 0..5 {
                let y = 4.1 - i as f64 * 0.5;
                scene.circle(1.2, y, 0.05).fill("#8af6ff").z(13);
                scene.line(1.35, y, 8.9, y).color("#7fe1ff").alpha(0.65).z(12);
            }
            caption(scene, 1.0, 4.5, "Key points / deliverables");
        }
        Theme::General => {
            line_chart(scene, rng, 1.0, 1.75, 4.0, 2.2, "#95e5ff");
            bar_chart(scene, rng, 5.1, 1.75, 3.8, 2.2, "#ffc578");
            caption(scene, 1.0, 4.5, "General EDA Concepts");
        }
    }

    let mut y = 1.55;
    for point in points.iter().take(2) {
        scene
            .text(0.95, y, format!("• {}", ellipsize(point, 85)))
            .size(9.3)
            .color("#e7feff")
            .z(13);
        y -= 0.28;
    }
}

fn keyword_chips(scene: &mut Scene, points: &[String]) {
    let chip_y = 5.0;
    let mut x = 0.8;
    for point in points.iter().take(3) {
        let text = ellipsize(point, 44);
        let w = (0.42 + 0.07 * text.chars().count() as f64).min(3.6);
        scene
            .padded_box(x, chip_y, w, 0.42, 0.10, 0.02)
            .fill("#1f2f62")
            .stroke("#9cf5ff", 1.0)
            .alpha(0.78)
            .z(10);
        scene
            .text(x + 0.11, chip_y + 0.21, text)
            .size(8.8)
            .color("#dffcff")
            .va(VAlign::Center)
            .z(11);
        x += w + 0.16;
        if x > 9.0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    fn digest(number: usize, title: &str, points: &[&str], text: &str) -> SlideDigest {
        SlideDigest {
            number,
            title: title.to_string(),
            points: points.iter().map(|p| p.to_string()).collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_scene_is_reproducible() {
        let d = digest(4, "Histograms and KDE", &["Shape first"], "## Histograms and KDE");
        assert_eq!(jetsons_scene(&d), jetsons_scene(&d));

        let other = digest(5, "Histograms and KDE", &["Shape first"], "## Histograms and KDE");
        assert_ne!(jetsons_scene(&d), jetsons_scene(&other));
    }

    #[test]
    fn test_title_panel_and_theme_label() {
        let d = digest(
            7,
            "Missing Data Patterns",
            &["MCAR is random", "Imputation matters"],
            "## Missing Data Patterns\n- MCAR is random\n- Imputation matters",
        );
        let scene = jetsons_scene(&d);
        let texts = scene.texts();
        assert!(texts.contains(&"Slide 07"));
        assert!(texts.contains(&"Missing Data Patterns"));
        assert!(texts.contains(&"Content Theme: Missing"));
        assert!(texts.contains(&"MNAR"));
        assert!(texts.contains(&"• MCAR is random"));
        assert!(texts.contains(&"Missingness Patterns / Imputation"));
    }

    #[test]
    fn test_long_title_is_ellipsized() {
        let title = "A".repeat(120);
        let scene = jetsons_scene(&digest(1, &title, &[], &title));
        let drawn = scene.texts().into_iter().find(|t| t.starts_with("AAA")).unwrap();
        assert_eq!(drawn.chars().count(), 80);
        assert!(drawn.ends_with("..."));
    }

    #[test]
    fn test_chips_limited_to_three() {
        let d = digest(2, "Overview", &["one", "two", "three", "four"], "");
        let scene = jetsons_scene(&d);
        let chips = scene
            .items()
            .iter()
            .filter(|i| i.z == 11 && matches!(i.shape, Shape::Text { y, .. } if (y - 5.21).abs() < 1e-9))
            .count();
        assert_eq!(chips, 3);
    }

    #[test]
    fn test_code_theme_uses_monospace() {
        let d = digest(3, "Python Code Walkthrough", &[], "import pandas");
        let scene = jetsons_scene(&d);
        assert!(scene.items().iter().any(|i| i.font.monospace));
        assert!(scene.texts().contains(&"Content Theme: Code"));
    }

    #[test]
    fn test_city_stays_on_canvas() {
        let scene = jetsons_scene(&digest(9, "General", &[], ""));
        assert!(scene.within_bounds(1.0));
    }
}
