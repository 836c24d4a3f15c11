//! Plain text slides.

use super::slide_canvas;
use crate::scene::{HAlign, Scene, VAlign};
use deck_core::clean::{clean_markup, wrap_words};
use deck_core::Slide;
use std::path::Path;

const TITLE_COLOR: &str = "#003366";
const LINE_HEIGHT: f64 = 0.25;
const TEXT_TOP: f64 = 6.2;
const TEXT_BOTTOM: f64 = 0.5;
const MAX_SOURCE_LINES: usize = 25;

/// Draw a slide as its title over either its local picture or its text.
///
/// The picture fills the extent `[1, 9] × [0.5, 6]`; when the file is
/// missing the text is drawn instead.
pub fn plain_scene(slide: &Slide, base_dir: &Path) -> Scene {
    let mut scene = slide_canvas(150.0);

    scene
        .text(5.0, 7.0, clean_markup(&slide.title))
        .size(20.0)
        .bold()
        .color(TITLE_COLOR)
        .align(HAlign::Center, VAlign::Top);

    match slide.image.as_ref().filter(|img| !img.is_remote()) {
        Some(img) => {
            let path = base_dir.join(&img.path);
            if path.is_file() {
                scene.image(path, 1.0, 0.5, 8.0, 5.5);
            } else {
                log::warn!("Image not found for slide {}: {}", slide.number, path.display());
                add_text_content(&mut scene, &slide.body);
            }
        }
        None => add_text_content(&mut scene, &slide.body),
    }

    scene
}

struct LineStyle {
    x: f64,
    size: f64,
    step: f64,
    heading: bool,
}

fn add_text_content(scene: &mut Scene, body: &str) {
    let mut y = TEXT_TOP;

    for line in body.lines().take(MAX_SOURCE_LINES) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            y -= LINE_HEIGHT * 0.5;
            continue;
        }

        let cleaned = clean_markup(line);
        let indent = line.len() - line.trim_start().len();
        let (text, width, style) = if trimmed.starts_with('-') {
            let item = cleaned.strip_prefix('-').unwrap_or(&cleaned).trim();
            if indent >= 2 {
                (format!("◦ {}", item), 65, LineStyle { x: 1.2, size: 10.0, step: LINE_HEIGHT, heading: false })
            } else {
                (format!("• {}", item), 70, LineStyle { x: 0.8, size: 11.0, step: LINE_HEIGHT, heading: false })
            }
        } else if trimmed.starts_with('#') {
            (
                cleaned.replace('#', "").trim().to_string(),
                70,
                LineStyle { x: 5.0, size: 13.0, step: LINE_HEIGHT * 1.2, heading: true },
            )
        } else {
            (cleaned, 75, LineStyle { x: 0.8, size: 11.0, step: LINE_HEIGHT, heading: false })
        };

        for wrapped in wrap_words(&text, width) {
            let item = scene.text(style.x, y, wrapped).size(style.size).va(VAlign::Top);
            if style.heading {
                item.bold().color(TITLE_COLOR).ha(HAlign::Center);
            }
            y -= style.step;
        }

        if y < TEXT_BOTTOM {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;
    use deck_core::SlideParser;
    use tempfile::TempDir;

    fn slide(section: &str) -> Slide {
        SlideParser::new().parse_slide(section, 1).unwrap()
    }

    #[test]
    fn test_text_slide_layout() {
        let s = slide("## Slide 4 – Encoding\n### Channels\n- **Position** first\n  - then length\nPlain words here\n");
        let scene = plain_scene(&s, Path::new("."));
        let texts = scene.texts();
        assert_eq!(
            texts,
            vec!["Slide 4 – Encoding", "Channels", "• Position first", "◦ then length", "Plain words here"]
        );

        let items = scene.items();
        assert!(items[1].font.bold && items[1].font.halign == HAlign::Center);
        assert_eq!(items[3].font.size_pt, 10.0);
        match &items[3].shape {
            Shape::Text { x, .. } => assert_eq!(*x, 1.2),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_long_body_stops_at_bottom() {
        let body: String = (0..40).map(|i| format!("- item number {}\n", i)).collect();
        let s = slide(&format!("## Long\n{}", body));
        let scene = plain_scene(&s, Path::new("."));
        // title plus at most 25 source lines
        assert!(scene.len() <= 26);
        assert!(scene.within_bounds(0.0));
    }

    #[test]
    fn test_wraps_long_lines() {
        let long = "word ".repeat(40);
        let s = slide(&format!("## Wrap\n{}", long));
        let scene = plain_scene(&s, Path::new("."));
        assert!(scene.texts().len() > 2);
        assert!(scene.texts()[1..].iter().all(|t| t.chars().count() <= 75));
    }

    #[test]
    fn test_local_image_replaces_text() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]))
            .save(dir.path().join("images/chart.png"))
            .unwrap();

        let s = slide("## Chart\n![Chart](images/chart.png)\n- ignored text\n");
        let scene = plain_scene(&s, dir.path());
        assert_eq!(scene.texts(), vec!["Chart"]);
        assert!(matches!(
            scene.items()[1].shape,
            Shape::Image { x, y, w, h, .. } if (x, y, w, h) == (1.0, 0.5, 8.0, 5.5)
        ));
    }

    #[test]
    fn test_missing_image_falls_back_to_text() {
        let s = slide("## Chart\n![Chart](images/absent.png)\n- shown instead\n");
        let scene = plain_scene(&s, Path::new("/nonexistent"));
        assert_eq!(scene.texts(), vec!["Chart", "• shown instead"]);
    }
}
