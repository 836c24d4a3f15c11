//! Visual perception and encoding diagrams.

use super::panel::Panel;
use super::{caption, heading, tinted};
use crate::scene::{HAlign, Scene, VAlign};
use deck_core::Result;
use rand::rngs::SmallRng;
use rand::Rng;

const BLUE: &str = "#2E86AB";
const RED: &str = "#E63946";
const ORANGE: &str = "#F18F01";
const PLUM: &str = "#A23B72";

pub fn preattentive_popout(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 10.8).with_size_inches(7.5, 8.1);
    heading(&mut scene, 5.0, 10.35, "Preattentive Pop-Out: Find the Red Circle", 14.0);

    for _ in 0..50 {
        let x = rng.gen_range(0.5..9.5);
        let y = rng.gen_range(0.5..9.5);
        scene.circle(x, y, 0.2).fill("steelblue").alpha(0.7);
    }
    scene.circle(5.0, 5.0, 0.2).fill(RED).alpha(0.9).z(1);
    Ok(scene)
}

pub fn gestalt_proximity(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 3.8);
    heading(&mut scene, 5.0, 3.45, "Gestalt Principle: Proximity", 14.0);

    for group in 0..3 {
        let x_offset = 1.2 + group as f64 * 3.5;
        for row in 0..3 {
            for col in 0..3 {
                scene
                    .circle(x_offset + col as f64 * 0.3, row as f64 * 0.3 + 1.0, 0.1)
                    .fill(BLUE)
                    .alpha(0.8);
            }
        }
    }

    caption(&mut scene, 5.0, 0.2, "Objects close together are perceived as grouped");
    Ok(scene)
}

pub fn gestalt_similarity(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 3.8);
    heading(&mut scene, 5.0, 3.45, "Gestalt Principle: Similarity", 14.0);

    for row in 0..4 {
        for col in 0..12 {
            let color = if col % 2 == 0 { BLUE } else { RED };
            scene
                .circle(0.6 + col as f64 * 0.8, row as f64 * 0.6 + 0.5, 0.2)
                .fill(color)
                .alpha(0.8);
        }
    }

    caption(&mut scene, 5.0, 0.1, "Similar objects are perceived as related");
    Ok(scene)
}

pub fn gestalt_enclosure(rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 4.8);
    heading(&mut scene, 5.0, 4.4, "Gestalt Principle: Enclosure & Common Region", 14.0);

    for (x0, label, color) in [(1.0, "Group A", BLUE), (6.0, "Group B", RED)] {
        scene
            .rect(x0, 1.0, 3.0, 2.0)
            .fill_color(tinted(color, 0.1))
            .stroke(color, 2.0);
        scene
            .text(x0 + 1.5, 3.3, label)
            .size(12.0)
            .bold()
            .color(color)
            .ha(HAlign::Center);
        for _ in 0..6 {
            let x = rng.gen_range(x0 + 0.2..x0 + 2.8);
            let y = rng.gen_range(1.2..2.8);
            scene.circle(x, y, 0.15).fill(color).alpha(0.8).z(1);
        }
    }

    caption(&mut scene, 5.0, 0.3, "Enclosure creates strong grouping");
    Ok(scene)
}

pub fn gestalt_connection(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 4.8);
    heading(&mut scene, 5.0, 4.4, "Gestalt Principle: Connection", 14.0);

    let groups: [&[(f64, f64)]; 3] = [
        &[(1.0, 2.0), (2.0, 3.0), (3.0, 2.5)],
        &[(5.0, 1.5), (6.0, 2.5), (7.0, 2.0)],
        &[(8.0, 3.0), (9.0, 2.0)],
    ];
    for points in groups {
        scene.polyline(points.to_vec()).color(BLUE).line_width(3.0).alpha(0.7);
        for &(x, y) in points {
            // 15 pt markers, given as area
            scene.marker(x, y, 225.0).fill(BLUE).alpha(0.7);
        }
    }

    for x in [4.0, 7.5] {
        scene.circle(x, 1.0, 0.3).fill("#CCCCCC").alpha(0.7);
    }

    caption(&mut scene, 5.0, 0.3, "Connected elements are perceived as groups");
    Ok(scene)
}

pub fn cognitive_load_balance(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(10.0, 11.0).with_size_inches(10.0, 6.6);
    heading(&mut scene, 5.0, 10.4, "Cognitive Load Balance", 16.0);

    scene.rect(2.0, 1.0, 6.0, 7.0).fill("white").stroke("black", 3.0);
    scene
        .text(5.0, 8.5, "Total Cognitive Capacity (Fixed)")
        .size(13.0)
        .bold()
        .ha(HAlign::Center);

    let bands = [
        (6.0, 2.0, "#A8DADC", "Intrinsic Load\n(Necessary)", "black", None),
        (3.5, 2.5, RED, "Extraneous Load\n(MINIMIZE!)", "white", Some("✗")),
        (1.0, 2.5, "#457B9D", "Germane Load\n(MAXIMIZE!)", "white", Some("✓")),
    ];
    for (y, h, fill, label, ink, mark) in bands {
        scene
            .rect(2.0, y, 6.0, h)
            .fill(fill)
            .stroke("black", 2.0)
            .alpha(0.7)
            .z(1);
        scene
            .text(5.0, y + h / 2.0, label)
            .size(11.0)
            .bold()
            .color(ink)
            .align(HAlign::Center, VAlign::Center)
            .z(2);
        if let Some(mark) = mark {
            scene
                .text(8.5, y + h / 2.0, mark)
                .size(20.0)
                .bold()
                .va(VAlign::Center)
                .z(2);
        }
    }
    Ok(scene)
}

pub fn encoding_effectiveness(_rng: &mut SmallRng) -> Result<Scene> {
    let encodings = [
        ("Position on common scale", 95.0, "#1D3557"),
        ("Position on non-aligned scale", 85.0, "#2E5266"),
        ("Length", 75.0, "#457B9D"),
        ("Angle / Slope", 65.0, "#6C8EAD"),
        ("Area", 50.0, "#A8DADC"),
        ("Volume", 35.0, "#C8E7ED"),
        ("Color intensity", 30.0, "#E8F4F8"),
    ];

    let mut scene = Scene::new(10.0, 8.0);
    heading(
        &mut scene,
        5.0,
        7.45,
        "Visual Encoding Effectiveness\n(Most → Least Effective)",
        14.0,
    );

    let rows = encodings.len() as f64;
    let panel = Panel::new(3.7, 1.0, 5.6, 5.6)
        .with_x_range(0.0, 100.0)
        .with_y_range(-0.5, rows - 0.5);

    for (i, (name, accuracy, color)) in encodings.iter().enumerate() {
        // most effective on top
        let row = rows - 1.0 - i as f64;
        panel
            .hbar(&mut scene, row, 0.8, *accuracy)
            .fill(color)
            .stroke("black", 1.5)
            .z(1);
        scene
            .text(panel.x - 0.12, panel.map_y(row), *name)
            .size(11.0)
            .align(HAlign::Right, VAlign::Center);
        scene
            .text(panel.map_x(accuracy + 2.0), panel.map_y(row), format!("{}%", accuracy))
            .size(10.0)
            .bold()
            .va(VAlign::Center);
    }

    panel.x_axis(&mut scene, 5);
    panel.x_label(&mut scene, "Relative Accuracy");
    scene
        .text(0.35, panel.map_y(rows - 1.0), "★")
        .size(20.0)
        .color("#F4A261")
        .align(HAlign::Center, VAlign::Center);
    Ok(scene)
}

pub fn data_types(_rng: &mut SmallRng) -> Result<Scene> {
    let types = [
        ("Nominal", 7.5, RED, "Categories\nNo order", "Product types"),
        ("Ordinal", 5.5, ORANGE, "Ordered categories\nUnequal intervals", "Satisfaction: Low → High"),
        ("Quantitative", 3.5, BLUE, "Numerical\nMagnitude matters", "Revenue: $1M, $2M"),
        ("Temporal", 1.5, PLUM, "Time-based\nSequential", "Daily sales"),
    ];

    let mut scene = Scene::new(10.0, 11.0).with_size_inches(12.0, 8.8);
    heading(&mut scene, 5.0, 10.4, "Four Fundamental Data Types", 16.0);

    for (name, y, color, desc, example) in types {
        scene
            .padded_box(1.0, y - 0.6, 8.0, 1.2, 0.1, 0.1)
            .fill_color(tinted(color, 0.2))
            .stroke(color, 3.0);
        scene
            .text(2.0, y, name)
            .size(14.0)
            .bold()
            .color(color)
            .va(VAlign::Center)
            .z(1);
        scene.text(4.5, y, desc).size(10.0).va(VAlign::Center).z(1);
        scene
            .text(7.2, y, example)
            .size(9.0)
            .italic()
            .color("#666666")
            .va(VAlign::Center)
            .z(1);
    }
    Ok(scene)
}

pub fn grammar_layers(_rng: &mut SmallRng) -> Result<Scene> {
    let layers = [
        ("7. Facets", 8.5, RED),
        ("6. Coordinate System", 7.5, ORANGE),
        ("5. Scales", 6.5, "#FFC857"),
        ("4. Statistical Transform", 5.5, BLUE),
        ("3. Geometric Objects", 4.5, "#457B9D"),
        ("2. Aesthetic Mappings", 3.5, PLUM),
        ("1. Data", 2.5, "#1D3557"),
    ];

    let mut scene = Scene::new(10.0, 11.0).with_size_inches(10.0, 8.8);
    heading(&mut scene, 5.0, 10.3, "Grammar of Graphics: Layered Structure", 16.0);

    for (name, y, color) in layers {
        scene
            .rect(2.0, y - 0.4, 6.0, 0.8)
            .fill(color)
            .stroke("black", 2.0)
            .alpha(0.7);
        scene
            .text(5.0, y, name)
            .size(12.0)
            .bold()
            .color("white")
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }

    for tip in [8.5, 2.5] {
        scene
            .arrow((1.0, 5.5), (1.0, tip), 0.25, 0.3)
            .fill("#666666")
            .line_width(3.0);
    }
    scene
        .text(0.5, 5.5, "Build\nUp")
        .size(11.0)
        .bold()
        .align(HAlign::Center, VAlign::Center)
        .rotate(90.0);
    Ok(scene)
}

pub fn data_task_encoding(_rng: &mut SmallRng) -> Result<Scene> {
    let boxes: [(f64, &str, &str, &[&str]); 3] = [
        (1.0, "Data Type", BLUE, &["Nominal", "Ordinal", "Quantitative", "Temporal"]),
        (5.0, "User Task", ORANGE, &["Compare", "Find trend", "Identify outliers"]),
        (9.0, "Visual Encoding", RED, &["Position", "Length", "Color", "Shape"]),
    ];

    let mut scene = Scene::new(12.0, 4.8);
    heading(&mut scene, 6.0, 4.4, "Data × Task × Encoding Framework", 16.0);

    for (x, label, color, examples) in boxes {
        scene
            .padded_box(x, 2.0, 2.0, 1.5, 0.1, 0.1)
            .fill_color(tinted(color, 0.2))
            .stroke(color, 3.0);
        scene
            .text(x + 1.0, 3.4, label)
            .size(13.0)
            .bold()
            .color(color)
            .align(HAlign::Center, VAlign::Top)
            .z(1);
        scene
            .text(x + 1.0, 2.95, examples.join("\n"))
            .size(9.0)
            .color("#333333")
            .align(HAlign::Center, VAlign::Top)
            .z(1);
    }

    for (x, sign) in [(4.0, "+"), (8.0, "=")] {
        scene
            .text(x, 2.75, sign)
            .size(24.0)
            .bold()
            .align(HAlign::Center, VAlign::Center);
    }

    scene
        .text(6.0, 0.5, "Always match all three components for effective visualization")
        .size(11.0)
        .italic()
        .color("#666666")
        .ha(HAlign::Center);
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
    fn test_popout_has_one_red_target() {
        let scene = preattentive_popout(&mut rng()).unwrap();
        let circles: Vec<_> = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Circle { .. }))
            .collect();
        assert_eq!(circles.len(), 51);
        let red = circles
            .iter()
            .filter(|i| i.fill.as_ref().map(|c| c.to_rgba8()) == Some([0xE6, 0x39, 0x46, 255]))
            .count();
        assert_eq!(red, 1);
    }

    #[test]
    fn test_proximity_groups_of_nine() {
        let scene = gestalt_proximity(&mut rng()).unwrap();
        let dots = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Circle { .. }))
            .count();
        assert_eq!(dots, 27);
        assert!(scene.within_bounds(0.0));
    }

    #[test]
    fn test_enclosure_dots_inside_their_box() {
        let scene = gestalt_enclosure(&mut rng()).unwrap();
        for item in scene.items() {
            if let Shape::Circle { cx, cy, .. } = item.shape {
                let inside_a = (1.0..4.0).contains(&cx);
                let inside_b = (6.0..9.0).contains(&cx);
                assert!(inside_a || inside_b);
                assert!((1.0..3.0).contains(&cy));
            }
        }
    }

    #[test]
    fn test_encoding_ranking_order() {
        let scene = encoding_effectiveness(&mut rng()).unwrap();
        let texts = scene.texts();
        let first = texts.iter().position(|t| *t == "Position on common scale").unwrap();
        let last = texts.iter().position(|t| *t == "Color intensity").unwrap();
        assert!(first < last);
        assert!(texts.contains(&"95%"));
        assert!(texts.contains(&"Relative Accuracy"));
    }

    #[test]
    fn test_framework_lists_examples() {
        let scene = data_task_encoding(&mut rng()).unwrap();
        assert!(scene.texts().contains(&"Compare\nFind trend\nIdentify outliers"));
        assert!(scene.within_bounds(0.2));
    }

    #[test]
    fn test_text_diagrams_stay_on_canvas() {
        let builders: [fn(&mut SmallRng) -> Result<Scene>; 6] = [
            gestalt_similarity,
            gestalt_connection,
            cognitive_load_balance,
            data_types,
            grammar_layers,
            preattentive_popout,
        ];
        for build in builders {
            assert!(build(&mut rng()).unwrap().within_bounds(0.1));
        }
    }
}
