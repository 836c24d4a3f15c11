//! Exploratory data analysis diagrams.

use super::palette::{coolwarm, SET3};
use super::panel::Panel;
use super::{block, caption, heading, tile, tinted};
use crate::scene::{HAlign, Scene, VAlign};
use crate::stats::{self, Histogram};
use deck_core::clean::wrap_words;
use deck_core::Result;
use rand::rngs::SmallRng;
use rand::Rng;

pub fn eda_cycle(_rng: &mut SmallRng) -> Result<Scene> {
    let stages = [
        ("1. Question", "#3498db", 90.0_f64),
        ("2. Explore", "#2ecc71", 0.0),
        ("3. Analyze", "#e74c3c", -90.0),
        ("4. Refine", "#f39c12", -180.0),
    ];
    let (cx, cy, radius, node) = (5.0, 5.0, 3.0, 0.8);

    let mut scene = Scene::new(10.0, 10.0).with_size_inches(8.0, 8.0);
    heading(&mut scene, 5.0, 9.4, "The EDA Cycle", 16.0);

    let centers: Vec<(f64, f64)> = stages
        .iter()
        .map(|(_, _, angle)| {
            let rad = angle.to_radians();
            (cx + radius * rad.cos(), cy + radius * rad.sin())
        })
        .collect();

    for (i, (label, color, _)) in stages.iter().enumerate() {
        let (x, y) = centers[i];
        scene.circle(x, y, node).fill(color).stroke("black", 2.0).alpha(0.85).z(2);
        scene
            .text(x, y, *label)
            .size(11.0)
            .bold()
            .color("white")
            .align(HAlign::Center, VAlign::Center)
            .z(3);

        // chord to the next stage, trimmed to the circle edges
        let (nx, ny) = centers[(i + 1) % centers.len()];
        let (dx, dy) = (nx - x, ny - y);
        let len = (dx * dx + dy * dy).sqrt();
        let trim = (node + 0.1) / len;
        scene
            .arrow(
                (x + dx * trim, y + dy * trim),
                (nx - dx * trim, ny - dy * trim),
                0.2,
                0.3,
            )
            .fill("#555555")
            .line_width(2.0)
            .z(1);
    }

    scene
        .text(cx, cy, "Iterative\nProcess")
        .size(14.0)
        .bold()
        .color("#555555")
        .align(HAlign::Center, VAlign::Center);
    Ok(scene)
}

pub fn eda_workflow(_rng: &mut SmallRng) -> Result<Scene> {
    let stages = [
        "Business\nQuestion",
        "Data\nCollection",
        "Data\nCleaning",
        "EDA",
        "Modeling",
        "Evaluation",
        "Deployment",
    ];
    const EDA: usize = 3;
    let stage_x = |i: usize| 1.0 + 2.0 * i as f64;

    let mut scene = Scene::new(14.0, 8.0).with_size_inches(14.0, 6.0);
    heading(&mut scene, 7.0, 6.8, "Where EDA Fits in the Analytics Workflow", 16.0);

    for (i, label) in stages.iter().enumerate() {
        let x = stage_x(i);
        if i == EDA {
            scene
                .padded_box(x - 0.75, 2.4, 1.5, 1.2, 0.15, 0.05)
                .fill("#fdebd0")
                .stroke("#e74c3c", 3.0)
                .z(1);
        } else {
            scene
                .rect(x - 0.75, 2.4, 1.5, 1.2)
                .fill("#ecf0f1")
                .stroke("#34495e", 1.5)
                .z(1);
        }
        let text = scene
            .text(x, 3.0, *label)
            .size(10.0)
            .align(HAlign::Center, VAlign::Center)
            .z(2);
        if i == EDA {
            text.bold().size(13.0).color("#c0392b");
        }

        if i + 1 < stages.len() {
            scene
                .arrow((x + 0.8, 3.0), (stage_x(i + 1) - 0.8, 3.0), 0.15, 0.15)
                .fill("#34495e")
                .line_width(1.5);
        }
    }

    scene
        .text(stage_x(EDA), 4.4, "Understand the data\nbefore modeling it")
        .size(10.0)
        .italic()
        .color("#c0392b")
        .ha(HAlign::Center);

    let feedback = [
        (EDA, EDA - 1, "#3498db", "Data issues found"),
        (EDA + 1, EDA, "#2ecc71", "New questions"),
    ];
    for (from, to, color, label) in feedback {
        let (x0, x1) = (stage_x(from), stage_x(to));
        scene.arrow((x0, 1.9), (x1, 1.9), 0.15, 0.2).fill(color).line_width(2.0);
        scene.arrow((x1, 1.9), (x0, 1.9), 0.15, 0.2).fill(color).line_width(2.0);
        scene
            .text((x0 + x1) / 2.0, 1.55, label)
            .size(9.0)
            .color(color)
            .align(HAlign::Center, VAlign::Top);
    }

    caption(&mut scene, 7.0, 0.4, "EDA shapes every later step and is revisited often");
    Ok(scene)
}

pub fn distribution_shapes(rng: &mut SmallRng) -> Result<Scene> {
    const N: usize = 1000;
    let samples = [
        ("Normal (Symmetric)", stats::normal(rng, 0.0, 1.0, N)?, "steelblue"),
        ("Right-Skewed (Exponential)", stats::exponential(rng, 2.0, N)?, "coral"),
        (
            "Left-Skewed",
            stats::exponential(rng, 2.0, N)?.into_iter().map(|v| 10.0 - v).collect::<Vec<f64>>(),
            "lightgreen",
        ),
        ("Bimodal", stats::bimodal(rng, -2.0, 2.0, 0.7, N)?, "plum"),
        ("Uniform", stats::uniform(rng, 0.0, 10.0, N), "gold"),
        ("Heavy-Tailed (Pareto)", stats::pareto(rng, 1.5, N)?, "lightcoral"),
    ];

    let mut scene = Scene::new(15.0, 10.0);
    heading(&mut scene, 7.5, 9.65, "Common Distribution Shapes", 16.0);

    for (i, (title, values, color)) in samples.iter().enumerate() {
        let (row, col) = (i / 3, i % 3);
        let hist = Histogram::new(values, 30);
        let panel = Panel::new(0.9 + col as f64 * 5.0, 0.8 + (1 - row) as f64 * 4.6, 3.8, 3.2)
            .fit_histogram(&hist);
        panel.histogram(&mut scene, &hist, color);
        panel.x_axis(&mut scene, 5);
        panel.y_axis(&mut scene, 4);
        panel.title(&mut scene, title, 11.0);
        if col == 0 {
            panel.y_label(&mut scene, "Frequency");
        }
    }
    Ok(scene)
}

const HOUSING_COLUMNS: [&str; 5] = ["price", "sqft", "bedrooms", "age", "distance"];

fn housing_correlations(rng: &mut SmallRng) -> Result<Vec<Vec<f64>>> {
    const N: usize = 200;
    let sqft = stats::normal(rng, 2000.0, 500.0, N)?;
    let bedrooms: Vec<f64> = (0..N).map(|_| rng.gen_range(1..=5) as f64).collect();
    let age = stats::uniform(rng, 0.0, 50.0, N);
    let distance = stats::uniform(rng, 1.0, 30.0, N);
    let noise = stats::normal(rng, 0.0, 20.0, N)?;
    let price: Vec<f64> = (0..N)
        .map(|i| sqft[i] * 0.15 + bedrooms[i] * 20.0 - age[i] * 0.5 + noise[i])
        .collect();
    Ok(stats::correlation_matrix(&[price, sqft, bedrooms, age, distance]))
}

/// Annotated correlation grid; `keep(row, col)` masks cells out.
fn matrix_panel(
    scene: &mut Scene,
    x: f64,
    y: f64,
    cell: f64,
    matrix: &[Vec<f64>],
    title: &str,
    keep: impl Fn(usize, usize) -> bool,
) {
    let n = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        let cy = y + (n - 1 - i) as f64 * cell;
        for (j, &r) in row.iter().enumerate() {
            if !keep(i, j) {
                continue;
            }
            let cx = x + j as f64 * cell;
            scene
                .rect(cx, cy, cell, cell)
                .fill_color(coolwarm(r))
                .stroke("white", 1.0)
                .z(1);
            scene
                .text(cx + cell / 2.0, cy + cell / 2.0, format!("{:.2}", r))
                .size(8.0)
                .color(if r.abs() > 0.6 { "white" } else { "black" })
                .align(HAlign::Center, VAlign::Center)
                .z(2);
        }
    }

    for (k, name) in HOUSING_COLUMNS.iter().enumerate() {
        scene
            .text(x - 0.08, y + (n - 1 - k) as f64 * cell + cell / 2.0, *name)
            .size(8.0)
            .align(HAlign::Right, VAlign::Center);
        scene
            .text(x + k as f64 * cell + cell / 2.0, y - 0.08, *name)
            .size(8.0)
            .align(HAlign::Right, VAlign::Top)
            .rotate(45.0);
    }

    scene
        .text(x + n as f64 * cell / 2.0, y + n as f64 * cell + 0.15, title)
        .size(11.0)
        .bold()
        .align(HAlign::Center, VAlign::Bottom);
}

pub fn correlation_heatmap(rng: &mut SmallRng) -> Result<Scene> {
    let matrix = housing_correlations(rng)?;
    let strong: Vec<Vec<f64>> = matrix
        .iter()
        .map(|row| row.iter().map(|&r| if r.abs() < 0.5 { 0.0 } else { r }).collect())
        .collect();

    let mut scene = Scene::new(18.0, 6.2);
    let cell = 0.9;
    matrix_panel(&mut scene, 1.3, 1.0, cell, &matrix, "Basic Correlation Matrix", |_, _| true);
    matrix_panel(
        &mut scene,
        7.3,
        1.0,
        cell,
        &matrix,
        "Lower Triangle (No Redundancy)",
        |i, j| j < i,
    );
    matrix_panel(
        &mut scene,
        13.3,
        1.0,
        cell,
        &strong,
        "Strong Correlations Only (|r| ≥ 0.5)",
        |_, _| true,
    );
    Ok(scene)
}

const ANSCOMBE_X: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
const ANSCOMBE_X4: [f64; 11] = [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 19.0, 8.0, 8.0, 8.0];
const ANSCOMBE_Y: [[f64; 11]; 4] = [
    [8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
    [9.14, 8.14, 8.74, 8.77, 9.26, 8.10, 6.13, 3.10, 9.13, 7.26, 4.74],
    [7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73],
    [6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.50, 5.56, 7.91, 6.89],
];

fn anscombe_title(name: &str, xs: &[f64], ys: &[f64]) -> String {
    format!(
        "Dataset {}\nr = {:.2}, mean(x) = {:.1}, mean(y) = {:.2}",
        name,
        stats::pearson(xs, ys),
        stats::mean(xs),
        stats::mean(ys)
    )
}

pub fn anscombes_quartet(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(12.0, 10.0);
    heading(
        &mut scene,
        6.0,
        9.55,
        "Anscombe's Quartet: Same Statistics, Different Stories",
        15.0,
    );

    for (i, (name, ys)) in ["I", "II", "III", "IV"].iter().zip(ANSCOMBE_Y.iter()).enumerate() {
        let xs: &[f64] = if i == 3 { &ANSCOMBE_X4 } else { &ANSCOMBE_X };
        let (row, col) = (i / 2, i % 2);
        let panel = Panel::new(0.9 + col as f64 * 5.9, 0.8 + (1 - row) as f64 * 4.5, 4.6, 3.2)
            .with_x_range(2.0, 20.0)
            .with_y_range(2.0, 14.0);

        panel.grid(&mut scene, 5);
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let (px, py) = panel.map(x, y);
            scene
                .marker(px, py, 80.0)
                .fill("steelblue")
                .stroke("black", 0.8)
                .alpha(0.8)
                .z(2);
        }

        let (slope, intercept) = stats::linear_fit(xs, ys);
        let (x0, y0) = panel.map(2.0, slope * 2.0 + intercept);
        let (x1, y1) = panel.map(20.0, slope * 20.0 + intercept);
        scene.line(x0, y0, x1, y1).color("red").line_width(2.0).alpha(0.8).z(1);

        panel.x_axis(&mut scene, 5);
        panel.y_axis(&mut scene, 5);
        panel.title(&mut scene, &anscombe_title(name, xs, ys), 10.0);
    }
    Ok(scene)
}

pub fn missing_data_types(_rng: &mut SmallRng) -> Result<Scene> {
    let kinds = [
        (
            "MCAR",
            "Missing Completely at Random",
            7.0,
            "#2ecc71",
            "Survey pages lost when a server crashed",
            "Less data but no bias. Dropping rows is acceptable",
        ),
        (
            "MAR",
            "Missing at Random",
            4.5,
            "#f39c12",
            "Older customers skip the online questions",
            "Bias unless the related variable is used to impute",
        ),
        (
            "MNAR",
            "Missing Not at Random",
            2.0,
            "#e74c3c",
            "High earners decline to report their income",
            "Biased results. Needs domain knowledge to handle",
        ),
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "Three Types of Missing Data", 16.0);
    for (x, label) in [(6.5, "Example:"), (10.5, "Impact:")] {
        scene
            .text(x, 8.4, label)
            .size(12.0)
            .bold()
            .ha(HAlign::Center);
    }

    for (short, long, y, color, example, impact) in kinds {
        scene
            .padded_box(0.6, y - 0.8, 3.8, 1.6, 0.15, 0.05)
            .fill_color(tinted(color, 0.25))
            .stroke(color, 3.0);
        scene
            .text(2.5, y + 0.25, short)
            .size(16.0)
            .bold()
            .color(color)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(2.5, y - 0.35, long)
            .size(9.5)
            .align(HAlign::Center, VAlign::Center)
            .z(1);

        for (x, text) in [(6.5, example), (10.5, impact)] {
            scene
                .padded_box(x - 1.8, y - 0.7, 3.6, 1.4, 0.1, 0.05)
                .fill("#f8f9fa")
                .stroke(color, 1.5);
            scene
                .text(x, y, wrap_words(text, 26).join("\n"))
                .size(10.0)
                .align(HAlign::Center, VAlign::Center)
                .z(1);
        }
    }

    caption(&mut scene, 7.0, 0.5, "Always ask why values are missing before choosing a fix");
    Ok(scene)
}

pub fn task_viz_matrix(_rng: &mut SmallRng) -> Result<Scene> {
    let pairs = [
        ("Distribution", "Histogram/Box Plot"),
        ("Comparison", "Side-by-side Plots"),
        ("Relationship", "Scatter Plot"),
        ("Composition", "Stacked Bars"),
        ("Ranking", "Horizontal Bars"),
        ("Deviation", "Bar + Reference"),
        ("Correlation", "Heatmap"),
        ("Time", "Line Chart"),
    ];

    let mut scene = Scene::new(7.0, 9.6).with_size_inches(12.0, 8.0);
    heading(&mut scene, 3.5, 8.7, "EDA Task → Visualization Mapping", 16.0);

    for (i, (task, viz)) in pairs.iter().enumerate() {
        let y = 7.5 - i as f64;
        let color = SET3[(i * (SET3.len() - 1)) / (pairs.len() - 1)];
        scene
            .padded_box(0.5, y - 0.3, 2.0, 0.6, 0.05, 0.05)
            .fill(color)
            .stroke("black", 2.0);
        scene
            .text(1.5, y, *task)
            .size(11.0)
            .bold()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene.arrow((2.6, y), (3.3, y), 0.15, 0.1).fill("gray").line_width(2.0);
        scene
            .padded_box(3.3, y - 0.3, 3.0, 0.6, 0.05, 0.05)
            .fill("lightgreen")
            .stroke("darkgreen", 1.5);
        scene
            .text(4.8, y, *viz)
            .size(10.0)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
    Ok(scene)
}

pub fn data_quality_issues(_rng: &mut SmallRng) -> Result<Scene> {
    let issues = [
        ("Missing Values", "Nulls, NaN, -999", "#e74c3c", 2.0, 7.0),
        ("Duplicates", "Exact or near-duplicates", "#3498db", 6.0, 7.0),
        ("Inconsistencies", "Mixed formats, typos", "#9b59b6", 10.0, 7.0),
        ("Outliers", "Errors vs. extremes", "#f39c12", 2.0, 4.5),
        ("Skewed Distributions", "Need transformation", "#2ecc71", 6.0, 4.5),
        ("Imbalanced Classes", "Majority dominance", "#e67e22", 10.0, 4.5),
        ("Data Leakage", "Future information", "#c0392b", 4.0, 2.0),
        ("Encoding Issues", "Wrong data types", "#16a085", 8.0, 2.0),
    ];

    let mut scene = Scene::new(12.0, 10.0);
    heading(&mut scene, 6.0, 9.3, "Common Data Quality Issues", 18.0);
    for (issue, desc, color, x, y) in issues {
        tile(&mut scene, x - 1.3, y - 0.6, 2.6, 1.2, color, 0.3);
        scene
            .text(x, y + 0.25, issue)
            .size(11.0)
            .bold()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(x, y - 0.15, desc)
            .size(9.0)
            .italic()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
    Ok(scene)
}

/// Labelled box, arrow, and the recommended view for each row.
fn mapping_rows(scene: &mut Scene, rows: &[(&str, &str, &str)], ys: &[f64]) {
    for (&(kind, viz, color), &y) in rows.iter().zip(ys) {
        tile(scene, 1.0, y - 0.4, 2.5, 0.8, color, 0.3);
        scene
            .text(2.25, y, kind)
            .size(11.0)
            .bold()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene.arrow((3.6, y), (4.95, y), 0.2, 0.15).fill("gray").line_width(2.0);
        scene
            .padded_box(5.0, y - 0.4, 3.0, 0.8, 0.1, 0.1)
            .fill("lightgreen")
            .stroke("darkgreen", 2.0);
        scene
            .text(6.5, y, viz)
            .size(10.0)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
}

pub fn bivariate_matrix(_rng: &mut SmallRng) -> Result<Scene> {
    let rows = [
        ("Numeric vs\nNumeric", "Scatter Plot", "#3498db"),
        ("Numeric vs\nCategorical", "Box/Violin Plot", "#2ecc71"),
        ("Categorical vs\nCategorical", "Heatmap/Stacked Bars", "#e74c3c"),
        ("Numeric vs\nTime", "Line Chart", "#f39c12"),
    ];
    let mut scene = Scene::new(9.0, 8.0).with_size_inches(12.0, 8.0);
    heading(
        &mut scene,
        4.5,
        7.3,
        "Bivariate Analysis: Choosing the Right Visualization",
        16.0,
    );
    mapping_rows(&mut scene, &rows, &[5.5, 4.0, 2.5, 1.0]);
    Ok(scene)
}

pub fn missing_data_handling(_rng: &mut SmallRng) -> Result<Scene> {
    let strategies = [
        (
            "Delete Rows",
            "< 5% missing\n+ MCAR",
            "Quick & simple\nNo bias if MCAR",
            "Loss of data\nOnly if truly random",
            "#3498db",
        ),
        (
            "Delete Columns",
            "> 50% missing",
            "Removes problematic\nvariables",
            "Loss of information",
            "#2ecc71",
        ),
        (
            "Mean/Median\nImputation",
            "5-50% missing\nSymmetric/Skewed",
            "Simple\nPreserves sample size",
            "Reduces variance\nDistorts relationships",
            "#f39c12",
        ),
        (
            "KNN Imputation",
            "Similar observations\nexist",
            "Uses local patterns\nMore accurate",
            "Computationally\nexpensive",
            "#9b59b6",
        ),
        (
            "Create Missing\nIndicator",
            "Always!",
            "Captures missingness\nas feature",
            "Adds dimensionality",
            "#e74c3c",
        ),
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "Missing Data Handling Strategies", 18.0);

    for (i, (method, when, pros, cons, color)) in strategies.iter().enumerate() {
        let y = 8.0 - i as f64 * 1.7;
        tile(&mut scene, 0.5, y - 0.7, 13.0, 1.4, color, 0.2);
        scene
            .text(0.8, y, *method)
            .size(12.0)
            .bold()
            .color(color)
            .va(VAlign::Center)
            .z(1);
        for (x, label, ink, body) in [
            (3.5, "When:", "black", when),
            (6.5, "✓ Pros:", "green", pros),
            (10.0, "✗ Cons:", "red", cons),
        ] {
            scene.text(x, y + 0.4, label).size(10.0).bold().color(ink).va(VAlign::Center).z(1);
            block(&mut scene, x, y + 0.15, body, 9.0);
        }
    }
    Ok(scene)
}

pub fn eda_workflow_template(_rng: &mut SmallRng) -> Result<Scene> {
    let steps = [
        ("1. Data Overview", "Shape, types, memory\nFirst few rows", "#3498db"),
        ("2. Quality Check", "Missing, duplicates\nInconsistencies", "#2ecc71"),
        ("3. Univariate", "Distributions, outliers\nSkewness, modality", "#f39c12"),
        ("4. Bivariate", "Relationships, correlations\nGroup differences", "#e74c3c"),
        (
            "5. Missing Data",
            "Patterns, type (MCAR/MAR/MNAR)\nImputation strategy",
            "#9b59b6",
        ),
        ("6. Key Findings", "Patterns discovered\nData quality issues", "#1abc9c"),
        ("7. Recommendations", "Transformations needed\nFeatures to engineer", "#34495e"),
    ];

    let mut scene = Scene::new(12.0, 14.0).with_size_inches(10.0, 11.7);
    heading(&mut scene, 6.0, 13.3, "Complete EDA Workflow Template", 18.0);

    for (i, (step, details, color)) in steps.iter().enumerate() {
        let y = 12.0 - i as f64 * 1.8;
        scene
            .padded_box(1.0, y - 0.7, 10.0, 1.4, 0.15, 0.05)
            .fill_color(tinted(color, 0.3))
            .stroke(color, 3.0);
        scene.text(2.0, y + 0.4, *step).size(14.0).bold().color(color).va(VAlign::Center).z(1);
        block(&mut scene, 2.0, y + 0.05, details, 10.0);
        if i + 1 < steps.len() {
            scene.arrow((6.0, y - 0.8), (6.0, y - 1.1), 0.3, 0.15).fill("gray").line_width(3.0);
        }
    }
    Ok(scene)
}

pub fn eda_best_practices(_rng: &mut SmallRng) -> Result<Scene> {
    let dos = [
        "Start simple → Go deeper",
        "Visualize everything",
        "Question assumptions",
        "Document findings",
        "Think about domain",
        "Use multiple views",
        "Iterate and refine",
    ];
    let donts = [
        "Skip EDA phase",
        "P-hack for significance",
        "Ignore outliers",
        "Use defaults blindly",
        "Over-automate",
        "Forget to document",
        "Rush to modeling",
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "EDA Best Practices", 18.0);

    for (x0, title, ink, fill, items) in [
        (0.5, "✓ DO:", "green", "lightgreen", &dos),
        (7.5, "✗ DON'T:", "red", "lightcoral", &donts),
    ] {
        let cx = x0 + 3.0;
        scene.text(cx, 8.5, title).size(14.0).bold().color(ink).align(HAlign::Center, VAlign::Center);
        for (i, item) in items.iter().enumerate() {
            let y = 7.8 - i as f64 * 0.9;
            scene
                .padded_box(x0, y - 0.3, 6.0, 0.6, 0.05, 0.05)
                .fill_color(tinted(fill, 0.3))
                .stroke(ink, 2.0);
            scene
                .text(cx, y, *item)
                .size(11.0)
                .align(HAlign::Center, VAlign::Center)
                .z(1);
        }
    }
    Ok(scene)
}

pub fn common_eda_mistakes(_rng: &mut SmallRng) -> Result<Scene> {
    let mistakes = [
        ("Data Leakage", "Using future information\nin features", "Inflated performance", "#e74c3c"),
        (
            "Ignoring Cardinality",
            "Too many unique categories\nfor one-hot encoding",
            "Curse of dimensionality",
            "#e67e22",
        ),
        ("Class Imbalance", "Not checking target\ndistribution", "Biased models", "#f39c12"),
        ("Analysis Paralysis", "Exploring forever\nwithout conclusions", "Wasted time", "#9b59b6"),
        ("Confirmation Bias", "Only looking for\nsupporting patterns", "Missed insights", "#3498db"),
        (
            "Over-interpreting Noise",
            "Finding patterns in\nrandom variation",
            "False discoveries",
            "#2ecc71",
        ),
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "Common EDA Mistakes to Avoid", 18.0);

    for (i, (mistake, description, impact, color)) in mistakes.iter().enumerate() {
        let x = if i % 2 == 0 { 3.0 } else { 10.0 };
        let y = 7.8 - (i / 2) as f64 * 2.4;
        scene
            .padded_box(x - 2.3, y - 0.8, 4.6, 1.6, 0.15, 0.05)
            .fill_color(tinted(color, 0.2))
            .stroke(color, 3.0);
        scene
            .text(x, y + 0.5, *mistake)
            .size(12.0)
            .bold()
            .color(color)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(x, y + 0.05, *description)
            .size(9.0)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(x, y - 0.55, format!("⚠ {}", impact))
            .size(9.0)
            .italic()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
    Ok(scene)
}

pub fn data_type_eda(_rng: &mut SmallRng) -> Result<Scene> {
    let kinds = [
        (
            "Time Series",
            "Trend, seasonality, cycles\nRolling statistics\nAutocorrelation",
            "#3498db",
        ),
        ("Text Data", "Length distribution\nWord frequency\nN-grams", "#2ecc71"),
        (
            "Images",
            "Dimension distribution\nColor histograms\nSample visualization",
            "#e74c3c",
        ),
        ("Categorical", "Frequency tables\nCardinality check\nRare categories", "#f39c12"),
        ("Numeric", "Distribution shape\nOutliers\nSkewness", "#9b59b6"),
        ("Mixed Types", "Type consistency\nRelationships\nEncoding strategy", "#1abc9c"),
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "EDA for Different Data Types", 18.0);

    for (i, (kind, analysis, color)) in kinds.iter().enumerate() {
        let x = if i % 2 == 0 { 3.5 } else { 10.5 };
        let y = 7.0 - (i / 2) as f64 * 2.5;
        scene
            .padded_box(x - 2.8, y - 1.0, 5.6, 2.0, 0.15, 0.05)
            .fill_color(tinted(color, 0.2))
            .stroke(color, 3.0);
        scene
            .text(x, y + 0.6, *kind)
            .size(13.0)
            .bold()
            .color(color)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene
            .text(x, y - 0.25, *analysis)
            .size(9.0)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
    }
    Ok(scene)
}

pub fn eda_to_features(_rng: &mut SmallRng) -> Result<Scene> {
    let mappings = [
        ("Skewness\nDetected", "Log/Box-Cox\nTransformation", "#3498db"),
        ("Missing\nPatterns", "Create Missing\nIndicator Features", "#2ecc71"),
        ("Outliers\nFound", "Capping or\nRobust Scaling", "#e74c3c"),
        ("Temporal\nPatterns", "Extract Time\nFeatures", "#f39c12"),
        ("High\nCorrelation", "Create Interaction\nTerms", "#9b59b6"),
        ("Category\nEffects", "Target/Frequency\nEncoding", "#1abc9c"),
    ];

    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.3, "From EDA Insights to Feature Engineering", 18.0);

    for (i, (insight, action, color)) in mappings.iter().enumerate() {
        let x0 = if i % 2 == 0 { 1.5 } else { 8.0 };
        let y = 7.5 - (i / 2) as f64 * 2.5;
        tile(&mut scene, x0, y - 0.5, 2.0, 1.0, color, 0.3).line_width(2.0);
        scene
            .text(x0 + 1.0, y, *insight)
            .size(10.0)
            .bold()
            .align(HAlign::Center, VAlign::Center)
            .z(1);
        scene.arrow((x0 + 2.1, y), (x0 + 2.95, y), 0.2, 0.15).fill(color).line_width(2.0);
        scene
            .padded_box(x0 + 3.0, y - 0.5, 2.0, 1.0, 0.1, 0.1)
            .fill_color(tinted("lightgreen", 0.4))
            .stroke("darkgreen", 2.0);
        scene
            .text(x0 + 4.0, y, *action)
            .size(10.0)
            .align(HAlign::Center, VAlign::Center)
            .z(1);
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
    fn test_cycle_stages_on_circle() {
        let scene = eda_cycle(&mut rng()).unwrap();
        let circles: Vec<(f64, f64)> = scene
            .items()
            .iter()
            .filter_map(|i| match i.shape {
                Shape::Circle { cx, cy, .. } => Some((cx, cy)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 4);
        for (x, y) in circles {
            let d = ((x - 5.0).powi(2) + (y - 5.0).powi(2)).sqrt();
            assert!((d - 3.0).abs() < 1e-9);
        }
        assert!(scene.texts().contains(&"Iterative\nProcess"));
    }

    #[test]
    fn test_workflow_stages_and_feedback() {
        let scene = eda_workflow(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.contains(&"EDA"));
        assert!(texts.contains(&"Data issues found"));
        assert!(texts.contains(&"New questions"));
        assert!(scene.within_bounds(0.1));
    }

    #[test]
    fn test_distribution_panels() {
        let scene = distribution_shapes(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.contains(&"Bimodal"));
        assert!(texts.contains(&"Heavy-Tailed (Pareto)"));
        let bars = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Rect { .. }))
            .count();
        assert_eq!(bars, 6 * 30);
    }

    #[test]
    fn test_housing_price_tracks_sqft() {
        let matrix = housing_correlations(&mut rng()).unwrap();
        assert_eq!(matrix.len(), 5);
        assert!((matrix[0][0] - 1.0).abs() < 1e-9);
        assert!(matrix[0][1] > 0.8);
        assert!(matrix[0][4].abs() < 0.3);
    }

    #[test]
    fn test_lower_triangle_masks_diagonal() {
        let scene = correlation_heatmap(&mut rng()).unwrap();
        let cells = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Rect { .. }))
            .count();
        // 25 + 10 + 25
        assert_eq!(cells, 60);
    }

    #[test]
    fn test_anscombe_shared_statistics() {
        for (i, ys) in ANSCOMBE_Y.iter().enumerate() {
            let xs: &[f64] = if i == 3 { &ANSCOMBE_X4 } else { &ANSCOMBE_X };
            let title = anscombe_title("X", xs, ys);
            assert!(title.contains("r = 0.82"), "{}", title);
            assert!(title.contains("mean(x) = 9.0"), "{}", title);
            assert!(title.contains("mean(y) = 7.50"), "{}", title);
        }
    }

    #[test]
    fn test_missing_types_layout() {
        let scene = missing_data_types(&mut rng()).unwrap();
        let texts = scene.texts();
        for label in ["MCAR", "MAR", "MNAR", "Example:", "Impact:"] {
            assert!(texts.contains(&label));
        }
        assert!(scene.within_bounds(0.0));
    }

    #[test]
    fn test_task_matrix_pairs_each_task() {
        let scene = task_viz_matrix(&mut rng()).unwrap();
        let arrows = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Arrow { .. }))
            .count();
        assert_eq!(arrows, 8);
        assert!(scene.texts().contains(&"Heatmap"));
    }

    #[test]
    fn test_workflow_template_links_steps() {
        let scene = eda_workflow_template(&mut rng()).unwrap();
        let arrows = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Arrow { .. }))
            .count();
        assert_eq!(arrows, 6);
        assert!(scene.texts().contains(&"7. Recommendations"));
    }

    #[test]
    fn test_card_layouts_fit_canvas() {
        let builders: [fn(&mut SmallRng) -> Result<Scene>; 7] = [
            data_quality_issues,
            bivariate_matrix,
            missing_data_handling,
            eda_best_practices,
            common_eda_mistakes,
            data_type_eda,
            eda_to_features,
        ];
        for build in builders {
            assert!(build(&mut rng()).unwrap().within_bounds(0.1));
        }
    }

    #[test]
    fn test_best_practices_balance() {
        let scene = eda_best_practices(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.contains(&"✓ DO:") && texts.contains(&"✗ DON'T:"));
        let boxes = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::RoundBox { .. }))
            .count();
        assert_eq!(boxes, 14);
    }
}
