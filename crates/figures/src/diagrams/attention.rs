//! Attention, visual search and grouping diagrams.

use super::panel::Panel;
use super::{caption, heading, tile, tinted};
use crate::scene::{HAlign, Scene, VAlign};
use deck_core::Result;
use rand::rngs::SmallRng;
use rand::Rng;

const BLUE: &str = "#2E86AB";
const RED: &str = "#E63946";
const GREEN: &str = "#27AE60";
const WARN: &str = "#E74C3C";

/// Full-width banner with a bold centered message.
fn banner(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64, edge: &str, fill: &str, text: &str, ink: &str) {
    scene.rect(x, y, w, h).fill(fill).alpha(0.8).stroke(edge, 2.0).z(1);
    scene
        .text(x + w / 2.0, y + h / 2.0, text)
        .size(11.0)
        .bold()
        .color(ink)
        .align(HAlign::Center, VAlign::Center)
        .z(2);
}

pub fn data_decision_pipeline(_rng: &mut SmallRng) -> Result<Scene> {
    let stages = [
        (1.0, "Raw\nData", "#6C8EAD", "▤"),
        (4.0, "AI Model\n(Compute)", "#457B9D", "⚙"),
        (7.5, "Visualization\n(Interface)", RED, "◔"),
        (11.0, "Human\nDecision", BLUE, "☺"),
    ];

    let mut scene = Scene::new(14.0, 5.8);
    heading(&mut scene, 7.0, 5.35, "Data to Decision Pipeline: Visualization as Interface", 16.0);

    for (x, label, color, icon) in stages {
        tile(&mut scene, x - 0.8, 1.5, 1.6, 2.0, color, 0.2);
        scene
            .text(x, 3.0, icon)
            .size(28.0)
            .color(color)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(x, 2.2, label)
            .size(11.0)
            .bold()
            .color(color)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
    for (from, to) in [(2.2, 3.2), (5.0, 6.5), (8.6, 10.0)] {
        scene.arrow((from, 2.5), (to, 2.5), 0.25, 0.3).fill("#666666").line_width(3.0);
    }

    banner(
        &mut scene,
        2.0,
        0.2,
        10.0,
        0.8,
        RED,
        "#FFE5E5",
        "If visualization fails, the entire system fails at the decision layer",
        RED,
    );
    Ok(scene)
}

pub fn visual_processing_pathways(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(12.0, 10.6).with_size_inches(12.0, 8.5);
    heading(&mut scene, 6.0, 10.1, "Two Pathways of Visual Processing", 16.0);

    tile(&mut scene, 5.0, 8.0, 2.0, 1.0, "#666666", 0.3);
    scene
        .text(6.0, 8.5, "Visual\nStimulus")
        .size(11.0)
        .bold()
        .align(HAlign::Center, VAlign::Center)
        .z(1);
    scene.arrow((6.0, 7.8), (6.0, 7.1), 0.3, 0.2).fill("#666666").line_width(2.0);
    scene.line(6.0, 7.1, 6.0, 6.8).color("black").line_width(3.0);
    scene.line(6.0, 6.8, 3.0, 6.3).color("black").line_width(2.0);
    scene.line(6.0, 6.8, 9.0, 6.3).color("black").line_width(2.0);

    let pathways = [
        (
            3.0,
            "#2ECC71",
            GREEN,
            "PREATTENTIVE",
            "Early Vision",
            "✓ Parallel processing\n✓ Fast (< 200ms)\n✓ Automatic\n✓ Detects features",
        ),
        (
            9.0,
            WARN,
            "#C0392B",
            "ATTENTIVE",
            "Late Vision",
            "⚠ Serial processing\n⚠ Slow (requires focus)\n⚠ Conscious effort\n⚠ Integrates meaning",
        ),
    ];
    for (cx, edge, ink, title, subtitle, details) in pathways {
        scene
            .padded_box(cx - 2.0, 3.5, 4.0, 2.5, 0.15, 0.15)
            .fill_color(tinted(edge, 0.15))
            .stroke(edge, 3.0);
        scene.text(cx, 5.5, title).size(13.0).bold().color(ink).ha(HAlign::Center).z(1);
        scene.text(cx, 5.0, subtitle).size(11.0).italic().ha(HAlign::Center).z(1);
        scene
            .text(cx, 4.55, details)
            .size(9.0)
            .align(HAlign::Center, VAlign::Top)
            .z(1);
        scene.arrow((cx, 3.3), (cx, 2.6), 0.3, 0.2).fill(ink).line_width(2.0);
    }

    tile(&mut scene, 4.5, 1.0, 3.0, 1.5, "#9B59B6", 0.2);
    scene
        .text(6.0, 1.75, "Perception &\nUnderstanding")
        .size(12.0)
        .bold()
        .color("#8E44AD")
        .align(HAlign::Center, VAlign::Center)
        .z(1);

    banner(
        &mut scene,
        1.0,
        0.1,
        10.0,
        0.6,
        "#2ECC71",
        "#D5F4E6",
        "Design Principle: Use preattentive features for critical information",
        GREEN,
    );
    Ok(scene)
}

pub fn attention_limits(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 6.8);
    heading(&mut scene, 5.0, 6.4, "Visual Attention is Limited", 16.0);

    scene
        .circle(5.0, 3.0, 1.5)
        .fill_color(tinted("#FFC107", 0.3))
        .stroke("#FFC107", 3.0);
    scene
        .text(5.0, 3.0, "◉\nFocus")
        .size(14.0)
        .bold()
        .align(HAlign::Center, VAlign::Center)
        .z(1);

    let peripheral = [
        (2.0, 5.0, "▤"),
        (8.0, 5.0, "◔"),
        (1.5, 2.0, "▥"),
        (8.5, 2.0, "◎"),
        (3.0, 1.4, "✦"),
        (7.0, 1.4, "⚙"),
        (1.0, 4.0, "▢"),
        (9.0, 4.0, "▣"),
    ];
    for (x, y, icon) in peripheral {
        scene
            .text(x, y, icon)
            .size(20.0)
            .alpha(0.3)
            .align(HAlign::Center, VAlign::Center);
    }

    banner(
        &mut scene,
        2.0,
        0.2,
        6.0,
        0.8,
        WARN,
        "#FFE5E5",
        "Attention Capacity: Only 3-4 objects simultaneously",
        WARN,
    );

    let implications = [
        "✗ Cannot attend to everything",
        "✗ Selective and focused",
        "→ Priority must be encoded visually",
    ];
    for (i, text) in implications.iter().enumerate() {
        let y = 5.6 - i as f64 * 0.42;
        scene
            .padded_box(3.3, y - 0.16, 3.4, 0.32, 0.08, 0.0)
            .fill("white")
            .alpha(0.7)
            .stroke("#999999", 0.8)
            .z(2);
        scene
            .text(5.0, y, *text)
            .size(10.0)
            .align(HAlign::Center, VAlign::Center)
            .z(3);
    }
    Ok(scene)
}

pub fn selective_attention(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 10.8).with_size_inches(10.0, 8.6);
    heading(&mut scene, 5.0, 10.35, "Visual Attention is Limited", 16.0);

    scene
        .circle(5.0, 5.0, 2.0)
        .fill_color(tinted("#FFC107", 0.3))
        .stroke("#FFC107", 4.0);
    scene
        .text(5.0, 5.0, "FOCUS\nArea")
        .size(14.0)
        .bold()
        .align(HAlign::Center, VAlign::Center)
        .z(1);

    let items = [
        (2.0, 8.0, "Chart"),
        (8.0, 8.0, "Graph"),
        (1.5, 5.0, "Data"),
        (8.5, 5.0, "Metric"),
        (2.0, 2.0, "Value"),
        (8.0, 2.0, "KPI"),
        (1.0, 7.0, "Info"),
        (9.0, 7.0, "Stats"),
        (1.0, 3.0, "Fig"),
        (9.0, 3.0, "Plot"),
    ];
    for (x, y, label) in items {
        scene
            .padded_box(x - 0.4, y - 0.2, 0.8, 0.4, 0.1, 0.0)
            .fill("lightgray")
            .alpha(0.3);
        scene
            .text(x, y, label)
            .size(10.0)
            .alpha(0.3)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }

    banner(
        &mut scene,
        1.0,
        0.3,
        8.0,
        0.9,
        WARN,
        "#FFE5E5",
        "Attention Capacity: Only 3-4 objects simultaneously",
        WARN,
    );
    Ok(scene)
}

pub fn change_blindness(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(21.0, 9.0).with_size_inches(14.0, 6.0);

    for (idx, x0) in [0.0, 11.0].into_iter().enumerate() {
        let after = idx == 1;
        let title = if after { "Dashboard - After" } else { "Dashboard - Before" };
        scene
            .text(x0 + 5.0, 8.3, title)
            .size(14.0)
            .bold()
            .ha(HAlign::Center);

        let charts = [
            (1.0, 5.5, "steelblue", "Chart 1\n$2.5M"),
            (6.0, 5.5, "green", "Chart 2\n$3.1M"),
            (6.0, 3.0, "purple", "Chart 4\n$2.2M"),
        ];
        for (x, y, color, label) in charts {
            scene.rect(x0 + x, y, 3.0, 1.5).fill(color).alpha(0.3);
            scene
                .text(x0 + x + 1.5, y + 0.75, label)
                .size(10.0)
                .align(HAlign::Center, VAlign::Center)
                .z(1);
        }

        if after {
            scene
                .rect(x0 + 1.0, 3.0, 3.0, 1.5)
                .fill_color(tinted("red", 0.5))
                .stroke("red", 3.0);
            scene
                .text(x0 + 2.5, 3.75, "Chart 3\n$0.9M")
                .size(10.0)
                .bold()
                .align(HAlign::Center, VAlign::Center)
                .z(1);
            scene.arrow((x0 + 2.5, 7.0), (x0 + 2.5, 4.7), 0.2, 0.25).fill("red").line_width(2.0).z(2);
            scene
                .text(x0 + 2.5, 7.05, "CHANGED!")
                .size(11.0)
                .bold()
                .color("red")
                .align(HAlign::Center, VAlign::Bottom)
                .z(2);
        } else {
            scene.rect(x0 + 1.0, 3.0, 3.0, 1.5).fill("orange").alpha(0.3);
            scene
                .text(x0 + 2.5, 3.75, "Chart 3\n$1.8M")
                .size(10.0)
                .align(HAlign::Center, VAlign::Center)
                .z(1);
        }
    }

    caption(
        &mut scene,
        10.5,
        0.6,
        "Without directed attention, users often miss significant changes",
    );
    Ok(scene)
}

pub fn inattentional_blindness(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 10.0).with_size_inches(10.0, 8.0);
    heading(&mut scene, 5.0, 9.5, "Inattentional Blindness", 16.0);

    tile(&mut scene, 1.0, 6.0, 3.5, 2.5, BLUE, 0.2);
    scene.text(2.75, 7.8, "TASK").size(12.0).bold().color(BLUE).ha(HAlign::Center).z(1);
    scene
        .text(2.75, 7.45, "Count the\npasses")
        .size(10.0)
        .align(HAlign::Center, VAlign::Top)
        .z(1);
    for (x, y) in [(1.5, 6.5), (2.5, 6.8), (3.5, 6.5), (4.0, 7.2)] {
        scene.circle(x, y, 0.15).fill("steelblue").alpha(0.7).z(1);
    }

    tile(&mut scene, 5.5, 6.0, 3.5, 2.5, RED, 0.2);
    scene
        .text(7.25, 7.8, "UNEXPECTED")
        .size(12.0)
        .bold()
        .color(RED)
        .ha(HAlign::Center)
        .z(1);
    scene
        .text(7.25, 7.45, "Gorilla walks\nthrough scene")
        .size(10.0)
        .align(HAlign::Center, VAlign::Top)
        .z(1);
    scene
        .text(7.25, 6.4, "50% MISS THIS!")
        .size(11.0)
        .bold()
        .color(RED)
        .ha(HAlign::Center)
        .z(1);

    scene.rect(1.5, 3.5, 7.0, 1.5).fill("#F5F5F5").alpha(0.9).stroke("#666666", 2.0);
    scene
        .text(5.0, 4.5, "Lesson for Visualization:")
        .size(12.0)
        .bold()
        .ha(HAlign::Center)
        .z(1);
    scene
        .text(5.0, 3.9, "Users focused on one task will miss other information")
        .size(10.0)
        .ha(HAlign::Center)
        .z(1);

    banner(
        &mut scene,
        1.5,
        1.5,
        7.0,
        1.2,
        "#2ECC71",
        "#D5F4E6",
        "Make critical information impossible to miss",
        GREEN,
    );
    Ok(scene)
}

/// Scattered search items; circles or squares of half-size `r`.
fn search_items(scene: &mut Scene, rng: &mut SmallRng, area: &Panel, count: usize, r: f64, color: &str, square: bool) {
    for _ in 0..count {
        let (x, y) = area.map(rng.gen_range(0.5..9.5), rng.gen_range(0.5..5.5));
        let item = if square {
            scene.rect(x - r, y - r, 2.0 * r, 2.0 * r)
        } else {
            scene.circle(x, y, r)
        };
        item.fill(color).alpha(0.75).stroke(color, 1.0);
    }
}

pub fn feature_search_easy(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 7.2);
    heading(
        &mut scene,
        5.0,
        6.6,
        "FEATURE SEARCH: Find the Red Circle\n(Uses color only - FAST!)",
        14.0,
    );
    let area = Panel::new(0.0, 0.0, 10.0, 6.0).with_x_range(0.0, 10.0).with_y_range(0.0, 6.0);

    search_items(&mut scene, rng, &area, 50, 0.25, "steelblue", false);
    scene.circle(5.0, 3.0, 0.25).fill(RED).stroke("darkred", 2.0).z(2);
    scene.arrow((7.0, 4.5), (5.3, 3.2), 0.18, 0.25).fill(RED).line_width(3.0).z(3);
    scene.text(7.5, 4.7, "Found instantly!").size(12.0).bold().color(RED).z(3);

    scene
        .padded_box(3.2, 0.05, 3.6, 0.32, 0.1, 0.0)
        .fill("lightgreen")
        .alpha(0.7)
        .z(3);
    scene
        .text(5.0, 0.21, "< 200ms to find the red circle")
        .size(11.0)
        .italic()
        .align(HAlign::Center, VAlign::Center)
        .z(4);
    Ok(scene)
}

pub fn conjunction_search_difficult(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 7.2);
    heading(
        &mut scene,
        5.0,
        6.6,
        "CONJUNCTION SEARCH: Find the Red Square\n(Requires color AND shape - SLOW!)",
        14.0,
    );
    let area = Panel::new(0.0, 0.0, 10.0, 6.0).with_x_range(0.0, 10.0).with_y_range(0.0, 6.0);

    search_items(&mut scene, rng, &area, 15, 0.25, RED, false);
    search_items(&mut scene, rng, &area, 15, 0.25, "steelblue", true);
    search_items(&mut scene, rng, &area, 15, 0.25, "steelblue", false);
    scene.rect(4.75, 2.75, 0.5, 0.5).fill(RED).stroke("darkred", 3.0).z(2);
    scene.arrow((7.0, 4.5), (5.3, 3.2), 0.18, 0.25).fill("orange").line_width(3.0).z(3);
    scene.text(7.5, 4.7, "Takes time to find!").size(12.0).bold().color("orange").z(3);

    scene
        .padded_box(1.6, 0.05, 6.8, 0.32, 0.1, 0.0)
        .fill("lightyellow")
        .alpha(0.7)
        .z(3);
    scene
        .text(5.0, 0.21, "Much slower - requires checking color AND shape together")
        .size(11.0)
        .italic()
        .align(HAlign::Center, VAlign::Center)
        .z(4);
    Ok(scene)
}

pub fn preattentive_comparison(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(21.0, 8.4).with_size_inches(16.0, 6.4);
    heading(
        &mut scene,
        10.5,
        8.0,
        "Why Preattentive Features Matter in Visualization",
        14.0,
    );

    let left = Panel::new(0.0, 0.0, 10.0, 6.0).with_x_range(0.0, 10.0).with_y_range(0.0, 6.0);
    let right = Panel::new(11.0, 0.0, 10.0, 6.0).with_x_range(0.0, 10.0).with_y_range(0.0, 6.0);

    scene
        .text(5.0, 6.9, "EASY: Feature Search\n(Single feature - color)")
        .size(12.0)
        .bold()
        .color("green")
        .align(HAlign::Center, VAlign::Center);
    search_items(&mut scene, rng, &left, 40, 0.2, "steelblue", false);
    scene.circle(5.0, 3.0, 0.2).fill(RED).stroke("darkred", 2.0).z(2);
    scene
        .text(5.0, 0.5, "✓ Preattentive\n< 200ms")
        .size(10.0)
        .bold()
        .color("green")
        .align(HAlign::Center, VAlign::Center)
        .z(3);

    scene
        .text(16.0, 6.9, "DIFFICULT: Conjunction Search\n(Multiple features - color AND shape)")
        .size(12.0)
        .bold()
        .color("red")
        .align(HAlign::Center, VAlign::Center);
    search_items(&mut scene, rng, &right, 12, 0.2, RED, false);
    search_items(&mut scene, rng, &right, 12, 0.2, "steelblue", true);
    search_items(&mut scene, rng, &right, 12, 0.2, "steelblue", false);
    let (tx, ty) = right.map(5.0, 3.0);
    scene.rect(tx - 0.2, ty - 0.2, 0.4, 0.4).fill(RED).stroke("darkred", 2.0).z(2);
    scene
        .text(16.0, 0.5, "✗ Requires Attention\nMuch slower")
        .size(10.0)
        .bold()
        .color("red")
        .align(HAlign::Center, VAlign::Center)
        .z(3);
    Ok(scene)
}

pub fn gestalt_overview(_rng: &mut SmallRng) -> Result<Scene> {
    let principles = [
        ("Proximity", "Objects close together\nare grouped"),
        ("Similarity", "Similar objects\nare grouped"),
        ("Enclosure", "Enclosed objects\nare grouped"),
        ("Connection", "Connected objects\nare grouped"),
        ("Continuity", "Smooth paths\nare grouped"),
        ("Closure", "We complete\nincomplete shapes"),
    ];

    let mut scene = Scene::new(14.0, 10.4);
    heading(&mut scene, 7.0, 10.0, "Gestalt Principles of Grouping", 16.0);
    let panels = Panel::tiled(0.3, 0.2, 13.4, 9.0, 2, 3, 0.6, 0.7);

    for (idx, ((title, desc), panel)) in principles.iter().zip(&panels).enumerate() {
        let p = panel.with_x_range(0.0, 10.0).with_y_range(0.0, 10.0);
        // panels are square enough that one scale serves both axes
        let unit = p.w / 10.0;
        p.title(&mut scene, title, 12.0);

        match idx {
            0 => {
                for group in 0..3 {
                    for i in 0..3 {
                        for j in 0..3 {
                            let (x, y) = p.map(1.5 + group as f64 * 3.0 + i as f64 * 0.4, 5.0 + j as f64 * 0.4);
                            scene.circle(x, y, 0.15 * unit).fill(BLUE);
                        }
                    }
                }
            }
            1 => {
                for i in 0..5 {
                    for j in 0..4 {
                        let color = if i % 2 == 0 { BLUE } else { RED };
                        let (x, y) = p.map(2.0 + i as f64 * 1.5, 4.0 + j as f64 * 1.2);
                        scene.circle(x, y, 0.2 * unit).fill(color);
                    }
                }
            }
            2 => {
                for (x0, color) in [(1.0, BLUE), (5.5, RED)] {
                    let (rx, ry) = p.map(x0, 4.0);
                    scene
                        .rect(rx, ry, 3.5 * unit, 3.0 * p.h / 10.0)
                        .fill_color(tinted(color, 0.1))
                        .stroke(color, 2.0);
                    for i in 0..4 {
                        let (x, y) = p.map(x0 + 1.5 + (i % 2) as f64, 5.5 + (i / 2) as f64);
                        scene.circle(x, y, 0.2 * unit).fill(color).z(1);
                    }
                }
            }
            3 => {
                let points: Vec<(f64, f64)> = [(2.0, 5.0), (3.0, 6.0), (4.0, 5.5), (5.0, 6.5)]
                    .iter()
                    .map(|&(x, y)| p.map(x, y))
                    .collect();
                scene.polyline(points.clone()).color(BLUE).line_width(2.0);
                for (x, y) in points {
                    scene.marker(x, y, 100.0).fill(BLUE).z(1);
                }
                for x in [6.5, 8.0] {
                    let (cx, cy) = p.map(x, 5.5);
                    scene.circle(cx, cy, 0.3 * unit).fill("#CCCCCC");
                }
            }
            4 => {
                let arc = |from: f64, to: f64| -> Vec<(f64, f64)> {
                    (0..=50)
                        .map(|k| {
                            let t = from + (to - from) * k as f64 / 50.0;
                            p.map(3.0 + 2.0 * t.cos(), 5.0 + 2.0 * t.sin())
                        })
                        .collect()
                };
                let pi = std::f64::consts::PI;
                scene.polyline(arc(0.0, pi)).color(BLUE).line_width(3.0);
                scene.polyline(arc(pi, 2.0 * pi)).color(RED).line_width(3.0);
            }
            _ => {
                let points: Vec<(f64, f64)> = (0..=50)
                    .map(|k| {
                        let t = 1.5 * std::f64::consts::PI * k as f64 / 50.0;
                        p.map(5.0 + 2.0 * t.cos(), 5.0 + 2.0 * t.sin())
                    })
                    .collect();
                scene.polyline(points).color(BLUE).line_width(4.0);
            }
        }

        let (dx, dy) = p.map(5.0, 2.0);
        scene
            .text(dx, dy, *desc)
            .size(9.0)
            .italic()
            .align(HAlign::Center, VAlign::Center);
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_conjunction_has_one_red_square() {
        let scene = conjunction_search_difficult(&mut rng()).unwrap();
        let red = [0xE6, 0x39, 0x46, 255];
        let red_squares = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Rect { .. }))
            .filter(|i| i.fill.as_ref().map(|c| c.to_rgba8()) == Some(red))
            .count();
        let red_circles = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Circle { .. }))
            .filter(|i| i.fill.as_ref().map(|c| c.to_rgba8()) == Some(red))
            .count();
        assert_eq!(red_squares, 1);
        assert_eq!(red_circles, 15);
    }

    #[test]
    fn test_feature_search_distractors_stay_in_area() {
        let scene = feature_search_easy(&mut rng()).unwrap();
        for item in scene.items() {
            if let Shape::Circle { cx, cy, .. } = item.shape {
                assert!((0.5..=9.5).contains(&cx) && (0.5..=5.5).contains(&cy));
            }
        }
    }

    #[test]
    fn test_change_blindness_marks_the_change() {
        let scene = change_blindness(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.contains(&"Chart 3\n$1.8M"));
        assert!(texts.contains(&"Chart 3\n$0.9M"));
        assert_eq!(texts.iter().filter(|t| **t == "CHANGED!").count(), 1);
    }

    #[test]
    fn test_gestalt_overview_has_six_principles() {
        let scene = gestalt_overview(&mut rng()).unwrap();
        let texts = scene.texts();
        for name in ["Proximity", "Similarity", "Enclosure", "Connection", "Continuity", "Closure"] {
            assert!(texts.contains(&name));
        }
        assert!(scene.within_bounds(0.1));
    }

    #[test]
    fn test_pipeline_layouts_fit() {
        let builders: [fn(&mut SmallRng) -> Result<Scene>; 5] = [
            data_decision_pipeline,
            visual_processing_pathways,
            attention_limits,
            selective_attention,
            inattentional_blindness,
        ];
        for build in builders {
            assert!(build(&mut rng()).unwrap().within_bounds(0.2));
        }
    }
}
