//! Visual encoding diagrams: which channels carry which data types.

use super::palette::{blues, gray};
use super::panel::{pie, Panel};
use super::{caption, heading};
use crate::scene::{HAlign, Scene, VAlign};
use deck_core::Result;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

const BLUE: &str = "#2E86AB";
const RED: &str = "#E63946";
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Corners of a `w × h` rectangle centred on `(cx, cy)` and turned by
/// `degrees` counter-clockwise.
fn turned_rect(cx: f64, cy: f64, w: f64, h: f64, degrees: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [(-w, -h), (w, -h), (w, h), (-w, h)]
        .iter()
        .map(|&(dx, dy)| {
            let (dx, dy) = (dx / 2.0, dy / 2.0);
            (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
        })
        .collect()
}

pub fn ordinal_data(_rng: &mut SmallRng) -> Result<Scene> {
    let levels = [
        ("High School", 25.0, "#E8F4F8"),
        ("Bachelor's", 35.0, "#A8DADC"),
        ("Master's", 28.0, "#457B9D"),
        ("PhD", 12.0, "#1D3557"),
    ];

    let mut scene = Scene::new(10.0, 6.6).with_size_inches(10.0, 6.6);
    let panel = Panel::new(2.0, 1.3, 7.4, 4.2)
        .with_x_range(0.0, 40.0)
        .with_y_range(-0.6, 3.6);
    panel.title(
        &mut scene,
        "Ordinal Data: Education Level\n(Sequential Color Encoding)",
        14.0,
    );

    let labels: Vec<&str> = levels.iter().map(|(name, _, _)| *name).collect();
    for (i, (_, value, color)) in levels.iter().enumerate() {
        panel
            .hbar(&mut scene, i as f64, 0.8, *value)
            .fill(color)
            .stroke("black", 1.5)
            .z(1);
        scene
            .text(panel.map_x(value + 1.0), panel.map_y(i as f64), format!("{}%", value))
            .size(11.0)
            .bold()
            .va(VAlign::Center);
    }
    panel.category_y_labels(&mut scene, &labels);
    panel.x_axis(&mut scene, 5);
    panel.x_label(&mut scene, "Percentage of Employees");

    scene
        .text(5.0, 0.3, "Note: Sequential colors match ordinal progression")
        .size(10.0)
        .italic()
        .color("#666666")
        .ha(HAlign::Center);
    Ok(scene)
}

pub fn quantitative_encodings(_rng: &mut SmallRng) -> Result<Scene> {
    let data = [45.0, 65.0, 55.0, 80.0, 50.0];
    let labels = ["A", "B", "C", "D", "E"];

    let mut scene = Scene::new(12.0, 10.0);
    heading(&mut scene, 6.0, 9.55, "Quantitative Data Encodings", 16.0);
    let panels = Panel::tiled(1.0, 0.6, 10.6, 7.9, 2, 2, 1.2, 1.5);

    let position = panels[0].with_x_range(-0.6, 4.6).with_y_range(0.0, 90.0);
    for (i, v) in data.iter().enumerate() {
        position.vbar(&mut scene, i as f64, 0.8, 0.0, *v).fill(BLUE).alpha(0.7);
    }
    position.category_labels(&mut scene, &labels, 0.0);
    position.y_axis(&mut scene, 4);
    position.y_label(&mut scene, "Value");
    position
        .title(&mut scene, "Position on Common Scale\n(BEST for comparison)", 11.0)
        .bold()
        .color("green");

    let length = panels[1].with_x_range(0.0, 90.0).with_y_range(-0.6, 4.6);
    for (i, v) in data.iter().enumerate() {
        length.hbar(&mut scene, i as f64, 0.8, *v).fill("#457B9D").alpha(0.7);
    }
    length.category_y_labels(&mut scene, &labels);
    length.x_axis(&mut scene, 4);
    length.x_label(&mut scene, "Value");
    length.title(&mut scene, "Length\n(Good for comparison)", 11.0).bold();

    let area = panels[2].with_x_range(-1.0, 5.0).with_y_range(-1.0, 2.0);
    let unit = area.w / 6.0;
    for (i, v) in data.iter().enumerate() {
        let (cx, cy) = area.map(i as f64, 0.3);
        let radius = (v / std::f64::consts::PI).sqrt() * 0.3 * unit;
        scene.circle(cx, cy, radius).fill("#A8DADC").alpha(0.7).stroke("black", 1.0);
        let (lx, ly) = area.map(i as f64, -0.8);
        scene.text(lx, ly, labels[i]).size(10.0).ha(HAlign::Center);
    }
    area.title(&mut scene, "Area\n(Difficult to compare precisely)", 11.0)
        .bold()
        .color("orange");

    let intensity = panels[3].with_x_range(-0.6, 4.6).with_y_range(0.0, 1.2);
    for (i, v) in data.iter().enumerate() {
        intensity
            .vbar(&mut scene, i as f64, 0.8, 0.0, 1.0)
            .fill_color(blues(v / 100.0));
    }
    intensity.category_labels(&mut scene, &labels, 0.0);
    intensity
        .title(&mut scene, "Color Intensity\n(Poor for precise comparison)", 11.0)
        .bold()
        .color("red");
    Ok(scene)
}

pub fn time_series(_rng: &mut SmallRng) -> Result<Scene> {
    let sales_2024 = [45.0, 48.0, 52.0, 49.0, 55.0, 58.0, 54.0, 57.0, 62.0, 59.0, 65.0, 68.0];
    let sales_2025 = [47.0, 51.0, 56.0, 54.0, 60.0, 65.0, 62.0, 66.0, 72.0, 69.0, 75.0, 80.0];
    let xs: Vec<f64> = (0..12).map(f64::from).collect();

    let mut scene = Scene::new(12.0, 6.0);
    let panel = Panel::new(1.2, 1.0, 10.4, 4.2)
        .with_x_range(-0.5, 11.5)
        .with_y_range(40.0, 90.0);
    panel.title(&mut scene, "Temporal Data: Monthly Sales Trends", 14.0).bold();

    for t in super::nice_ticks(40.0, 90.0, 5) {
        let y = panel.map_y(t);
        scene
            .line(panel.x, y, panel.x + panel.w, y)
            .color("#b0b0b0")
            .alpha(0.3)
            .dashed()
            .z(-1);
    }
    for (ys, color, square) in [(&sales_2024, "#6C8EAD", false), (&sales_2025, RED, true)] {
        panel.series(&mut scene, &xs, ys).color(color).line_width(2.5);
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let (px, py) = panel.map(x, y);
            if square {
                let half = 0.045;
                scene.rect(px - half, py - half, 2.0 * half, 2.0 * half).fill(color).z(3);
            } else {
                scene.marker(px, py, 36.0).fill(color).z(3);
            }
        }
    }
    panel.category_labels(&mut scene, &MONTHS, 0.0);
    panel.y_axis(&mut scene, 5);
    panel.x_label(&mut scene, "Month");
    panel.y_label(&mut scene, "Sales ($K)");
    panel.legend_at(&mut scene, panel.x + 1.3, panel.y + panel.h - 0.1, &[("2024", "#6C8EAD"), ("2025", RED)]);

    let (tx, ty) = panel.map(9.0, 85.0);
    let (ax, ay) = panel.map(11.0, 80.0);
    scene.arrow((tx + 0.9, ty - 0.05), (ax, ay + 0.05), 0.1, 0.15).fill(RED).line_width(2.0);
    scene.text(tx, ty, "Strong Growth").size(11.0).bold().color(RED);
    Ok(scene)
}

pub fn bertin_variables(_rng: &mut SmallRng) -> Result<Scene> {
    let variables = [
        ("Position", 12.0, "x, y coordinates"),
        ("Size", 10.5, "length, area, volume"),
        ("Value", 9.0, "lightness/darkness"),
        ("Texture", 7.5, "pattern, grain"),
        ("Color", 6.0, "hue"),
        ("Orientation", 4.5, "angle, direction"),
        ("Shape", 3.0, "form, symbol"),
    ];

    let mut scene = Scene::new(12.0, 14.0).with_size_inches(12.0, 10.0);
    heading(&mut scene, 6.0, 13.3, "Bertin's Visual Variables (1967)", 16.0);

    for (i, (name, y, desc)) in variables.iter().enumerate() {
        let y = *y;
        scene
            .padded_box(1.0, y - 0.6, 10.0, 1.2, 0.1, 0.1)
            .fill("#E8F4F8")
            .alpha(0.5)
            .stroke(BLUE, 2.0);
        scene
            .text(2.0, y, format!("{}. {}", i + 1, name))
            .size(13.0)
            .bold()
            .va(VAlign::Center)
            .z(1);
        scene
            .text(9.0, y, *desc)
            .size(10.0)
            .italic()
            .color("#666666")
            .va(VAlign::Center)
            .z(1);

        match *name {
            "Position" => {
                for (x, dy) in [(4.5, 0.0), (5.5, 0.3), (6.5, 0.0)] {
                    scene.marker(x, y + dy, 64.0).fill(BLUE).z(2);
                }
            }
            "Size" => {
                for (j, size) in [6.0, 10.0, 14.0].iter().enumerate() {
                    scene.marker(5.0 + j as f64 * 0.6, y, size * size).fill(BLUE).z(2);
                }
            }
            "Value" => {
                for (j, alpha) in [0.3, 0.6, 0.9].iter().enumerate() {
                    scene.circle(5.0 + j as f64 * 0.6, y, 0.15).fill(BLUE).alpha(*alpha).z(2);
                }
            }
            "Texture" => {
                for j in 0..3 {
                    let x0 = 4.8 + j as f64 * 0.6;
                    scene.rect(x0, y - 0.15, 0.3, 0.3).fill(BLUE).alpha(0.5).z(2);
                    for k in 1..4 {
                        let t = k as f64 * 0.075;
                        let line = match j {
                            0 => scene.line(x0, y - 0.15 + t, x0 + t, y - 0.15),
                            1 => scene.line(x0 + t, y + 0.15, x0, y + 0.15 - t),
                            _ => scene.line(x0 + t, y - 0.05, x0 + t + 0.01, y - 0.05),
                        };
                        line.color("black").line_width(0.8).z(3);
                    }
                }
            }
            "Color" => {
                for (j, color) in [RED, "#F18F01", BLUE].iter().enumerate() {
                    scene.circle(5.0 + j as f64 * 0.6, y, 0.15).fill(color).z(2);
                }
            }
            "Orientation" => {
                for (j, angle) in [0.0, 45.0, 90.0].iter().enumerate() {
                    let corners = turned_rect(5.1 + j as f64 * 0.6, y - 0.05, 0.4, 0.1, *angle);
                    scene.polygon(corners).fill(BLUE).z(2);
                }
            }
            _ => {
                scene.marker(5.0, y, 144.0).fill(BLUE).z(2);
                scene.rect(5.5, y - 0.1, 0.2, 0.2).fill(BLUE).z(2);
                scene
                    .polygon(vec![(6.1, y - 0.1), (6.3, y - 0.1), (6.2, y + 0.12)])
                    .fill(BLUE)
                    .z(2);
            }
        }
    }

    scene.rect(1.0, 0.5, 10.0, 1.0).fill("#F5F5F5").alpha(0.9).stroke("#666666", 2.0);
    scene
        .text(6.0, 1.0, "Not all variables are equally effective for all data types")
        .size(11.0)
        .italic()
        .align(HAlign::Center, VAlign::Center)
        .z(1);
    Ok(scene)
}

pub fn cleveland_mcgill(_rng: &mut SmallRng) -> Result<Scene> {
    let values = [30.0, 70.0];
    let colors = ["#CCCCCC", BLUE];

    let mut scene = Scene::new(14.0, 5.6);
    heading(
        &mut scene,
        7.0,
        5.2,
        "Cleveland & McGill's Graphical Perception Study (1984)",
        14.0,
    );

    let bars = Panel::new(1.0, 1.0, 3.2, 3.0)
        .with_x_range(-0.6, 1.6)
        .with_y_range(0.0, 100.0);
    for (i, (v, color)) in values.iter().zip(colors).enumerate() {
        bars.vbar(&mut scene, i as f64, 0.6, 0.0, *v).fill(color);
    }
    bars.category_labels(&mut scene, &["A", "B"], 0.0);
    bars.y_axis(&mut scene, 5);
    bars.y_label(&mut scene, "Value");
    bars.title(&mut scene, "Position on Common Scale\n(Most Accurate)", 11.0)
        .bold()
        .color("green");

    pie(&mut scene, 7.0, 2.5, 1.5, &values, &colors, 90.0);
    scene
        .text(7.0, 4.12, "Angle (Pie Chart)\n(Less Accurate)")
        .size(11.0)
        .bold()
        .color("orange")
        .align(HAlign::Center, VAlign::Bottom);

    for (i, (v, color)) in values.iter().zip(colors).enumerate() {
        let radius = (v / std::f64::consts::PI).sqrt() * 0.3;
        scene
            .circle(10.6 + i as f64 * 1.9, 2.5, radius)
            .fill(color)
            .stroke("black", 2.0);
    }
    scene
        .text(11.55, 4.12, "Area (Bubbles)\n(Least Accurate)")
        .size(11.0)
        .bold()
        .color("red")
        .align(HAlign::Center, VAlign::Bottom);

    scene
        .text(7.0, 0.15, "Question: \"What percentage is the smaller of the larger?\"")
        .size(11.0)
        .bold()
        .ha(HAlign::Center);
    Ok(scene)
}

pub fn color_perception(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(12.0, 10.0);
    heading(&mut scene, 6.0, 9.55, "Why Color is Weak for Quantitative Data", 16.0);
    let panels = Panel::tiled(0.5, 0.3, 11.0, 8.0, 2, 2, 1.0, 1.4);

    let steps: Vec<Vec<f64>> = (0..10)
        .map(|r| (0..10).map(|c| (r * 10 + c) as f64 / 99.0).collect())
        .collect();
    panels[0].cells(&mut scene, &steps, gray, |_| None);
    panels[0].title(
        &mut scene,
        "Non-Linear Perception\n(Equal steps look unequal)",
        11.0,
    );

    let context = panels[1].with_x_range(0.0, 10.0).with_y_range(0.0, 10.0);
    for (outer, outer_x) in [("black", 1.0), ("white", 6.0)] {
        let (x, y) = context.map(outer_x, 3.0);
        let (sx, sy) = (context.w / 10.0, context.h / 10.0);
        scene
            .rect(x, y, 3.0 * sx, 4.0 * sy)
            .fill(outer)
            .stroke("black", 1.0);
        scene
            .rect(x + sx, y + sy, sx, 2.0 * sy)
            .fill("gray")
            .z(1);
    }
    context.title(&mut scene, "Context Dependency\n(Same gray looks different)", 11.0);

    let normal = ["#E63946", "#F18F01", "#00B894", "#0984E3", "#6C5CE7"];
    let deuteranopia = ["#C49B6C", "#C49B6C", "#00B894", "#0984E3", "#6C5CE7"];
    for (panel, colors, title) in [
        (panels[2], normal, "Normal Vision\n(5 distinct colors)"),
        (panels[3], deuteranopia, "Deuteranopia (8% of males)\n(Red & orange look similar)"),
    ] {
        let bars = panel.with_x_range(-0.6, 4.6).with_y_range(0.0, 1.2);
        for (i, color) in colors.iter().enumerate() {
            bars.vbar(&mut scene, i as f64, 0.8, 0.0, 1.0).fill(color);
        }
        bars.frame(&mut scene);
        bars.title(&mut scene, title, 11.0).bold();
    }
    Ok(scene)
}

pub fn matplotlib_anatomy(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(12.0, 8.0);
    heading(&mut scene, 6.0, 7.55, "Matplotlib Anatomy", 16.0);

    let panel = Panel::new(1.4, 1.2, 10.0, 5.2)
        .with_x_range(-1.5, 10.5)
        .with_y_range(-1.7, 1.6);
    let xs: Vec<f64> = (0..100).map(|i| i as f64 * 10.0 / 99.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    panel.grid(&mut scene, 6);
    panel.series(&mut scene, &xs, &ys).color("blue");
    panel.axes(&mut scene, 6);
    panel.x_label(&mut scene, "X Axis");
    panel.y_label(&mut scene, "Y Axis");
    panel.title(&mut scene, "Axes Title", 13.0);
    panel.legend(&mut scene, &[("Sample Data", "blue")]);

    let notes = [
        ("Figure\n(entire canvas)", (1.0, 0.8), (1.5, 1.2)),
        ("Axes\n(plot area)", (5.0, 0.0), (7.0, -0.5)),
        ("X-Axis", (5.0, -1.2), (2.0, -1.5)),
        ("Y-Axis", (-0.3, 0.0), (-1.0, 0.5)),
        ("Line\n(Artist)", (8.0, 8.0_f64.sin()), (6.0, 0.7)),
        ("Title", (5.0, 1.2), (3.0, 1.4)),
        ("Legend", (9.0, 0.9), (8.5, 0.5)),
    ];
    for (label, target, origin) in notes {
        let (tx, ty) = panel.map(target.0, target.1);
        let (ox, oy) = panel.map(origin.0, origin.1);
        scene.arrow((ox, oy), (tx, ty), 0.1, 0.15).fill("red").line_width(2.0).z(6);
        let lines = label.lines().count() as f64;
        let width = label.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64 * 0.09;
        scene
            .padded_box(ox - width / 2.0, oy - 0.1 * lines, width, 0.2 * lines, 0.08, 0.06)
            .fill("yellow")
            .alpha(0.7)
            .z(7);
        scene
            .text(ox, oy, label)
            .size(10.0)
            .bold()
            .align(HAlign::Center, VAlign::Center)
            .z(8);
    }
    Ok(scene)
}

/// Deliberately cluttered dashboard for the critique exercise.
pub fn bad_visualization_exercise(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(12.0, 8.6).with_background("#E8F4F8");
    for i in 0..20 {
        for j in 0..15 {
            scene
                .circle(i as f64 * 0.6, j as f64 * 0.6, 0.1)
                .fill("lightblue")
                .alpha(0.1);
        }
    }
    scene
        .padded_box(1.0, 7.65, 10.0, 0.6, 0.1, 0.1)
        .fill("lightyellow")
        .alpha(0.8)
        .stroke("darkblue", 3.0)
        .z(4);
    scene
        .text(
            6.0,
            7.95,
            "COMPREHENSIVE QUARTERLY BUSINESS INTELLIGENCE DASHBOARD\nGenerated on 2025-12-31 | Version 3.2 | FOR MANAGEMENT REVIEW ONLY",
        )
        .size(14.0)
        .bold()
        .color("darkblue")
        .align(HAlign::Center, VAlign::Center)
        .z(5);

    let panels = Panel::tiled(0.8, 0.7, 10.6, 6.0, 2, 2, 1.4, 1.2);

    // exploded rainbow pie with a drop shadow
    let values = [15.0, 12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 17.0];
    let rainbow = [
        "#FF0000", "#FF7F00", "#FFFF00", "#00FF00", "#0000FF", "#4B0082", "#9400D3", "#FF1493",
        "#00CED1", "#FFD700",
    ];
    let (cx, cy) = (panels[0].x + panels[0].w / 2.0, panels[0].y + panels[0].h / 2.0);
    scene.circle(cx + 0.08, cy - 0.08, 1.1).fill("gray").alpha(0.5);
    let mids = pie(&mut scene, cx, cy, 1.1, &values, &rainbow, 45.0);
    let total: f64 = values.iter().sum();
    for (i, mid) in mids.iter().enumerate() {
        let (sin, cos) = mid.to_radians().sin_cos();
        scene
            .text(cx + 1.3 * cos, cy + 1.3 * sin, format!("Product {}", (b'A' + i as u8) as char))
            .size(6.0)
            .rotate(25.0)
            .align(HAlign::Center, VAlign::Center)
            .z(2);
        scene
            .text(cx + 0.7 * cos, cy + 0.7 * sin, format!("{:.1}%", values[i] / total * 100.0))
            .size(7.0)
            .bold()
            .color("white")
            .align(HAlign::Center, VAlign::Center)
            .z(2);
    }
    scene
        .text(
            cx,
            panels[0].y + panels[0].h + 0.05,
            "Q4 2025 Sales Performance Dashboard Analytics Report\nMulti-Category Revenue Distribution Analysis",
        )
        .size(9.0)
        .bold()
        .color("darkblue")
        .align(HAlign::Center, VAlign::Bottom)
        .z(3);

    // truncated dual-axis lines
    let revenue = [98.0, 99.0, 97.0, 102.0, 101.0, 103.0];
    let costs = [50.0, 52.0, 51.0, 53.0, 54.0, 52.0];
    let xs: Vec<f64> = (0..6).map(f64::from).collect();
    let left = panels[1].with_x_range(-0.5, 5.5).with_y_range(95.0, 105.0);
    let right = panels[1].with_x_range(-0.5, 5.5).with_y_range(40.0, 60.0);
    left.background(&mut scene, "#FFF5E1");
    for t in super::nice_ticks(95.0, 105.0, 5) {
        left.hline(&mut scene, t).color("purple").line_width(2.0).alpha(0.5).dashed().z(0);
    }
    left.series(&mut scene, &xs, &revenue).color("red").line_width(5.0).dashed();
    for (&x, &y) in xs.iter().zip(&revenue) {
        let (px, py) = left.map(x, y);
        scene.text(px, py, "★").size(20.0).color("red").align(HAlign::Center, VAlign::Center).z(3);
    }
    right.series(&mut scene, &xs, &costs).color("green");
    for (&x, &y) in xs.iter().zip(&costs) {
        let (px, py) = right.map(x, y);
        scene.polygon(turned_rect(px, py, 0.14, 0.14, 45.0)).fill("green").z(3);
    }
    left.category_labels(&mut scene, &MONTHS[..6], 0.0);
    left.y_axis(&mut scene, 5);
    left.y_label(&mut scene, "Revenue ($K)");
    for t in super::nice_ticks(40.0, 60.0, 5) {
        scene
            .text(right.x + right.w + 0.08, right.map_y(t), format!("{}", t))
            .size(8.0)
            .color("green")
            .va(VAlign::Center);
    }
    left.legend_at(&mut scene, left.x + 1.3, left.y + left.h - 0.05, &[("Revenue ($K)", "red")]);
    right.legend(&mut scene, &[("Costs ($K)", "green")]);
    left.title(&mut scene, "Revenue vs Cost Trend Analysis\n***IMPORTANT***", 10.0);

    // shadowed bars with rotated labels
    let regions = ["North", "South", "East", "West", "Central", "International", "Online", "Retail"];
    let sales = [45.0, 52.0, 38.0, 61.0, 44.0, 55.0, 48.0, 50.0];
    let bars = panels[2].with_x_range(-0.6, 7.6).with_y_range(0.0, 70.0);
    bars.background(&mut scene, "#FFEBCD");
    for (i, v) in sales.iter().enumerate() {
        let at = i as f64;
        bars.vbar(&mut scene, at - 0.05, 0.8, 0.0, *v).fill("gray").alpha(0.3).z(0);
        bars.vbar(&mut scene, at, 0.8, 0.0, *v)
            .fill("steelblue")
            .alpha(0.6)
            .stroke("black", 2.0);
        let (px, py) = bars.map(at, v + 1.0);
        scene
            .text(px, py, format!("${}K", v))
            .size(7.0)
            .bold()
            .color("darkred")
            .rotate(30.0)
            .align(HAlign::Center, VAlign::Bottom);
    }
    bars.category_labels(&mut scene, &regions, 45.0);
    bars.y_axis(&mut scene, 4);
    bars.y_label(&mut scene, "Sales Performance Metrics (K$)");
    bars.title(&mut scene, "Regional Sales Comparison Q4\n(Preliminary Data - Subject to Change)", 9.0);

    // unlabeled multi-encoding scatter
    let scatter = panels[3].with_x_range(0.0, 100.0).with_y_range(0.0, 100.0);
    scatter.background(&mut scene, "#F0F8FF");
    scatter.grid(&mut scene, 5);
    let palette = ["red", "blue", "green", "yellow", "purple"];
    for _ in 0..100 {
        let (x, y) = (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        let color = palette.choose(rng).copied().unwrap_or("red");
        let (px, py) = scatter.map(x, y);
        scene
            .marker(px, py, rng.gen_range(0.0..200.0))
            .fill(color)
            .alpha(0.6)
            .stroke("black", 2.0)
            .z(2);
    }
    scatter.axes(&mut scene, 5);
    scatter.x_label(&mut scene, "Metric 1");
    scatter.y_label(&mut scene, "Metric 2");
    scatter.title(&mut scene, "Correlation Analysis\n(Confidential)", 9.0);
    let (px, py) = scatter.map(50.0, 90.0);
    scene.text(px, py, "Peak Region").size(8.0).color("red").z(4);
    let (px, py) = scatter.map(10.0, 10.0);
    scene.text(px, py, "Low Activity").size(8.0).color("blue").z(4);

    caption(&mut scene, 6.0, 0.05, "How many problems can you find?");
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
    fn test_turned_rect() {
        let corners = turned_rect(0.0, 0.0, 2.0, 1.0, 90.0);
        assert!((corners[0].0 - 0.5).abs() < 1e-9);
        assert!((corners[0].1 + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordinal_bars_use_sequential_colors() {
        let scene = ordinal_data(&mut rng()).unwrap();
        let fills: Vec<[u8; 4]> = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Rect { .. }))
            .filter_map(|i| i.fill.as_ref().map(|c| c.to_rgba8()))
            .collect();
        assert_eq!(fills.len(), 4);
        // each level darker than the last
        let lightness: Vec<u32> = fills.iter().map(|c| c[0] as u32 + c[1] as u32 + c[2] as u32).collect();
        assert!(lightness.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_bertin_lists_seven_variables() {
        let scene = bertin_variables(&mut rng()).unwrap();
        let numbered = scene
            .texts()
            .iter()
            .filter(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()) && t.contains(". "))
            .count();
        assert_eq!(numbered, 7);
    }

    #[test]
    fn test_bad_visualization_has_ten_slices() {
        let scene = bad_visualization_exercise(&mut rng()).unwrap();
        let products = scene.texts().iter().filter(|t| t.starts_with("Product ")).count();
        assert_eq!(products, 10);
        assert!(scene.texts().contains(&"17.0%"));
    }

    #[test]
    fn test_time_series_labels_every_month() {
        let scene = time_series(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(MONTHS.iter().all(|m| texts.contains(m)));
        assert!(texts.contains(&"Strong Growth"));
    }
}
