//! Worked-example figures for the perception and EDA exercises.

use super::eda_charts::{canvas, colorbar, hist_panel, note_panel};
use super::palette::{jet, normalize, rdbu_r, viridis, TAB10};
use super::panel::Panel;
use super::{heading, tinted};
use crate::scene::{HAlign, Scene, VAlign};
use crate::stats::{self, Histogram};
use chrono::{Duration, NaiveDate};
use csscolorparser::Color;
use deck_core::{Error, Result};
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::Rng;

const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Bold label on a tinted rounded box, centred on `(x, y)`.
fn section_label(scene: &mut Scene, x: f64, y: f64, text: &str, color: &str) {
    let w = text.chars().count() as f64 * 0.1 + 0.2;
    scene
        .padded_box(x - w / 2.0, y - 0.13, w, 0.26, 0.08, 0.06)
        .fill_color(tinted(color, 0.5))
        .z(4);
    scene
        .text(x, y, text)
        .size(11.0)
        .bold()
        .align(HAlign::Center, VAlign::Center)
        .z(5);
}

/// Whole dollars with thousands separators.
fn dollars(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < -0.5 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

/// One half of the redesign figure: a headline, a checklist and a task note.
fn checklist(
    scene: &mut Scene,
    top: f64,
    title: &str,
    title_color: &str,
    (mark, items, item_color): (&str, &[&str], &str),
    (note, note_fill): (&str, &str),
) {
    scene
        .text(7.0, top - 0.25, title)
        .size(16.0)
        .bold()
        .color(title_color)
        .align(HAlign::Center, VAlign::Top);
    for (i, item) in items.iter().enumerate() {
        scene
            .text(7.0, top - 1.25 - i as f64 * 0.5, format!("{} {}", mark, item))
            .size(11.0)
            .color(item_color)
            .ha(HAlign::Center);
    }
    let w = note.chars().count() as f64 * 0.1 + 0.4;
    scene
        .padded_box(7.0 - w / 2.0, top - 4.15, w, 0.35, 0.1, 0.08)
        .fill_color(tinted(note_fill, 0.8))
        .z(-1);
    scene
        .text(7.0, top - 3.98, note)
        .size(12.0)
        .italic()
        .align(HAlign::Center, VAlign::Center);
}

pub fn exercise2_redesign_challenge(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(14.0, 10.0);
    checklist(
        &mut scene,
        10.0,
        "BEFORE: High Cognitive Load Dashboard",
        "black",
        (
            "✗",
            &[
                "Everything same size and color",
                "No visual hierarchy",
                "Too many metrics competing for attention",
                "Cluttered legends and labels",
                "Inconsistent time periods",
            ],
            "darkred",
        ),
        ("Task: Identify sources of extraneous load", "lightyellow"),
    );
    checklist(
        &mut scene,
        5.0,
        "AFTER: Low Cognitive Load Dashboard",
        "darkgreen",
        (
            "✓",
            &[
                "Top 3-5 metrics prominently displayed",
                "Clear visual hierarchy",
                "Simple, clean charts",
                "Direct labeling (no legend hunting)",
                "Consistent time periods and scales",
            ],
            "darkgreen",
        ),
        ("Goal: Apply Gestalt principles and reduce extraneous load", "lightgreen"),
    );
    Ok(scene)
}

pub fn exercise3_grammar_example(_rng: &mut SmallRng) -> Result<Scene> {
    let sales: [(&str, [f64; 4], &str); 3] = [
        ("A", [45.0, 52.0, 48.0, 55.0], "#2E86AB"),
        ("B", [50.0, 58.0, 53.0, 62.0], "#A23B72"),
        ("C", [48.0, 55.0, 51.0, 60.0], "#F18F01"),
    ];
    let (mut scene, panels) = canvas(
        "Exercise 3: Build a Grammar-Based Plot\nDecomposing a Visualization",
        14.0,
        10.0,
        2,
        2,
    );
    let layers = [
        (
            "1. DATA",
            "Structured Format:",
            "• Quarter (Temporal)\n• Sales (Quantitative)\n• Product (Nominal)\n• Region (Nominal)",
            false,
            "Each row = observation\nEach column = variable",
        ),
        (
            "2. AESTHETICS",
            "Map data to visuals:",
            "x = Quarter\ny = Sales\ncolor = Product\nmarker = ○ (circle)",
            true,
            "Task: Show sales trends\nby product over time",
        ),
        (
            "3. GEOM + STATS",
            "Visual marks:",
            "geom = line + point\nstat = identity\n\nWhy?\n• Lines show trends\n• Points show data values",
            true,
            "",
        ),
    ];
    for ((title, lead, body, mono, note), panel) in layers.iter().zip(&panels) {
        let (left, top) = (panel.x + panel.w * 0.1, panel.y + panel.h);
        scene
            .text(panel.x + panel.w / 2.0, top, *title)
            .size(14.0)
            .bold()
            .color("#003366")
            .align(HAlign::Center, VAlign::Top);
        scene
            .text(left, top - 0.7, *lead)
            .size(11.0)
            .bold()
            .align(HAlign::Left, VAlign::Top);
        let item = scene
            .text(left, top - 1.1, *body)
            .size(10.0)
            .align(HAlign::Left, VAlign::Top);
        if *mono {
            item.monospace();
        }
        if !note.is_empty() {
            scene
                .text(left, panel.y + 0.1, *note)
                .size(9.0)
                .italic()
                .align(HAlign::Left, VAlign::Bottom);
        }
    }

    let chart = panels[3].with_x_range(-0.3, 3.3).with_y_range(40.0, 65.0);
    let quarters: Vec<f64> = (0..4).map(f64::from).collect();
    let mut legend = Vec::new();
    for (product, values, color) in &sales {
        chart.series(&mut scene, &quarters, values).color(color).line_width(2.0);
        chart.scatter(&mut scene, &quarters, values, 40.0, color, 1.0);
        legend.push((*product, *color));
    }
    chart.category_labels(&mut scene, &QUARTERS, 0.0);
    chart.y_axis(&mut scene, 5);
    chart.legend(&mut scene, &legend);
    chart.x_label(&mut scene, "Quarter");
    chart.y_label(&mut scene, "Sales (K$)");
    chart
        .title(&mut scene, "4. FINAL RESULT", 14.0)
        .bold()
        .color("#003366");
    Ok(scene)
}

/// Position of a temperature on a diverging scale whose midpoint is 0°C,
/// for readings in -10..40°C.
fn zero_centred(celsius: f64) -> f64 {
    if celsius < 0.0 {
        0.5 * normalize(celsius, -10.0, 0.0)
    } else {
        0.5 + 0.5 * normalize(celsius, 0.0, 40.0)
    }
}

/// Diverging colour for a linear position along -10..40°C.
fn temperature_diverging(t: f64) -> Color {
    rdbu_r(zero_centred(-10.0 + 50.0 * t))
}

pub fn exercise4_color_palette(rng: &mut SmallRng) -> Result<Scene> {
    let readings = stats::normal(rng, 15.0, 15.0, 120)?;
    let grid: Vec<Vec<f64>> = readings.chunks(12).map(<[f64]>::to_vec).collect();

    let mut scene = Scene::new(15.0, 5.5);
    heading(
        &mut scene,
        7.5,
        5.1,
        "Exercise 4: Color Palette Selection for Temperature Data (-10°C to +40°C)",
        14.0,
    );
    let panels = Panel::tiled(0.8, 0.7, 13.4, 3.4, 1, 3, 0.9, 0.0);
    let maps: [(fn(f64) -> Color, &str, &str); 3] = [
        (jet, "✗ BAD: Rainbow (Jet)\nNon-perceptual, false boundaries", "darkred"),
        (viridis, "⚠ BETTER: Viridis\nPerceptual but no meaningful zero", "orange"),
        (temperature_diverging, "✓ BEST: Diverging (RdBu_r)\nCentered at 0°C", "darkgreen"),
    ];
    for ((cmap, title, title_color), panel) in maps.iter().zip(panels) {
        let panel = Panel {
            w: panel.w - 0.8,
            ..panel
        };
        panel.cells(&mut scene, &grid, |v| cmap(normalize(v, -10.0, 40.0)), |_| None);
        colorbar(&mut scene, &panel, *cmap, -10.0, 40.0, "Temperature (°C)");
        panel.frame(&mut scene);
        panel.title(&mut scene, title, 11.0).color(title_color);
        panel.x_label(&mut scene, "Month");
        panel.y_label(&mut scene, "Location");
    }
    Ok(scene)
}

pub fn exercise5_preattentive_highlighting(_rng: &mut SmallRng) -> Result<Scene> {
    let products = ["Product A", "Product B", "Product C", "Product D", "Product E"];
    let quarters: [[f64; 5]; 4] = [
        [45.0, 52.0, 38.0, 48.0, 42.0],
        [48.0, 55.0, 41.0, 50.0, 45.0],
        [50.0, 58.0, 43.0, 52.0, 47.0],
        [62.0, 68.0, 55.0, 65.0, 60.0],
    ];
    let width = 0.2;

    let mut scene = Scene::new(14.0, 6.0);
    heading(&mut scene, 7.0, 5.6, "Exercise 5: Preattentive Highlighting - Make Q4 Pop Out!", 14.0);
    let panels = Panel::tiled(1.0, 0.9, 12.6, 3.9, 1, 2, 1.2, 0.0);

    for (highlight, panel) in [false, true].into_iter().zip(panels) {
        let chart = panel.with_x_range(-0.6, 4.6).with_y_range(0.0, 75.0);
        let mut legend = Vec::new();
        for (q, values) in quarters.iter().enumerate() {
            let (color, alpha) = match (highlight, q) {
                (false, _) => ("steelblue", 0.7),
                (true, 3) => ("#E63946", 0.9),
                (true, _) => ("#CCCCCC", 0.6),
            };
            let offset = (q as f64 - 1.5) * width;
            for (i, v) in values.iter().enumerate() {
                chart
                    .vbar(&mut scene, i as f64 + offset, width, 0.0, *v)
                    .fill(color)
                    .alpha(alpha);
                if highlight && q == 3 {
                    let (px, py) = chart.map(i as f64 + offset, v + 1.0);
                    scene
                        .text(px, py, format!("{:.0}", v))
                        .size(9.0)
                        .bold()
                        .color("#E63946")
                        .align(HAlign::Center, VAlign::Bottom);
                }
            }
            legend.push((QUARTERS[q], color));
        }
        chart.category_labels(&mut scene, &products, 0.0);
        chart.y_axis(&mut scene, 5);
        chart.legend(&mut scene, &legend);
        chart.x_label(&mut scene, "Product");
        chart.y_label(&mut scene, "Sales (K$)");
        let (title, color) = if highlight {
            ("✓ WITH Preattentive Highlighting\n(Q4 immediately visible!)", "darkgreen")
        } else {
            ("✗ WITHOUT Preattentive Highlighting\n(Q4 blends in)", "darkred")
        };
        chart.title(&mut scene, title, 11.0).color(color);
    }
    Ok(scene)
}

pub fn exercise1_distribution(rng: &mut SmallRng) -> Result<Scene> {
    let amounts = stats::lognormal(rng, 3.0, 1.0, 10_000)?;
    let (_, median, _) = stats::quartiles(&amounts);
    let (lo, hi) = stats::min_max(&amounts).unwrap_or((0.0, 1.0));
    let (mut scene, panels) = canvas("Exercise 1: Distribution Diagnosis - Example Solution", 12.0, 10.0, 2, 2);

    let hist = hist_panel(&mut scene, panels[0], &amounts, 50, "steelblue");
    hist.vline(&mut scene, stats::mean(&amounts)).color("red").line_width(2.0).dashed();
    hist.vline(&mut scene, median).color("green").line_width(2.0).dashed();
    hist.legend(&mut scene, &[("Mean", "red"), ("Median", "green")]);
    hist.title(&mut scene, "Original Distribution", 11.0);
    hist.x_label(&mut scene, "Transaction Amount ($)");
    hist.y_label(&mut scene, "Frequency");

    let spread = (hi - lo) * 0.05;
    let boxes = panels[1].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    boxes.boxplot(&mut scene, 0.0, 0.5, &amounts, "#dddddd");
    boxes.y_axis(&mut scene, 5);
    boxes.y_label(&mut scene, "Transaction Amount ($)");
    boxes.title(&mut scene, "Box Plot\n(Shows outliers)", 11.0);

    let (theoretical, ordered): (Vec<f64>, Vec<f64>) = stats::qq_points(&amounts).into_iter().unzip();
    let qq = panels[2].fit_points(&theoretical, &ordered, 0.05);
    qq.scatter(&mut scene, &theoretical, &ordered, 8.0, "steelblue", 0.8);
    let (slope, intercept) = stats::linear_fit(&theoretical, &ordered);
    qq.fit_line(&mut scene, slope, intercept);
    qq.axes(&mut scene, 5);
    qq.x_label(&mut scene, "Theoretical quantiles");
    qq.y_label(&mut scene, "Ordered Values");
    qq.title(&mut scene, "Q-Q Plot\n(Not normal)", 11.0);

    let logged: Vec<f64> = amounts.iter().map(|v| v.ln()).collect();
    let log_hist = hist_panel(&mut scene, panels[3], &logged, 50, "coral");
    log_hist.title(&mut scene, &format!("Log Transformed\nSkew: {:.2}", stats::skewness(&logged)), 11.0);
    log_hist.x_label(&mut scene, "Log(Amount)");
    log_hist.y_label(&mut scene, "Frequency");
    Ok(scene)
}

/// Days of 2024 with a known revenue spike and the reason for it.
const SPIKES: [(usize, f64, &str); 5] = [
    (0, 120_000.0, "New Year"),
    (60, 90_000.0, "Valentine's"),
    (180, 110_000.0, "Summer Sale"),
    (334, 150_000.0, "Black Friday"),
    (359, 130_000.0, "Christmas"),
];

/// A year of daily revenue around $50k with holiday spikes.
fn holiday_revenue(rng: &mut SmallRng) -> Result<Vec<f64>> {
    let mut revenue = stats::normal(rng, 50_000.0, 5000.0, 365)?;
    for (day, value, _) in SPIKES {
        revenue[day] = value;
    }
    Ok(revenue)
}

/// Indices outside the 1.5 × IQR fences.
fn iqr_outliers(values: &[f64]) -> Vec<usize> {
    let (lower, upper) = stats::iqr_bounds(values);
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v < lower || **v > upper)
        .map(|(i, _)| i)
        .collect()
}

pub fn exercise2_outliers(rng: &mut SmallRng) -> Result<Scene> {
    let revenue = holiday_revenue(rng)?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .ok_or_else(|| Error::ConfigError("Invalid start date".to_string()))?;
    let days: Vec<f64> = (0..revenue.len()).map(|d| d as f64).collect();
    let outliers = iqr_outliers(&revenue);
    let (lo, hi) = stats::min_max(&revenue).unwrap_or((0.0, 1.0));
    let spread = (hi - lo) * 0.05;

    let (mut scene, panels) = canvas("Exercise 2: Outlier Investigation - Example Solution", 14.0, 10.0, 2, 2);

    let series = panels[0]
        .with_x_range(0.0, days.len() as f64)
        .with_y_range(lo - spread, hi + spread);
    series.series(&mut scene, &days, &revenue).color("#1f77b4").alpha(0.6);
    let (ox, oy): (Vec<f64>, Vec<f64>) = outliers.iter().map(|&d| (days[d], revenue[d])).unzip();
    series.scatter(&mut scene, &ox, &oy, 100.0, "red", 1.0);
    series.y_axis(&mut scene, 5);
    for month in (1..=12).step_by(2) {
        let first = NaiveDate::from_ymd_opt(2024, month, 1)
            .ok_or_else(|| Error::ConfigError(format!("Invalid month {}", month)))?;
        let offset = (first - start).num_days() as f64;
        scene
            .text(series.map_x(offset), series.y - 0.08, first.format("%Y-%m").to_string())
            .size(8.0)
            .align(HAlign::Right, VAlign::Top)
            .rotate(45.0);
    }
    scene.line(series.x, series.y, series.x + series.w, series.y).color("#333333");
    series.legend(&mut scene, &[("Outliers", "red")]);
    series.y_label(&mut scene, "Revenue ($)");
    series.title(&mut scene, "Revenue Over Time (Outliers Marked)", 11.0);

    let boxes = panels[1].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    boxes.boxplot(&mut scene, 0.0, 0.5, &revenue, "#dddddd");
    boxes.y_axis(&mut scene, 5);
    boxes.y_label(&mut scene, "Revenue ($)");
    boxes.title(&mut scene, "Box Plot", 11.0);

    let mut ranked = outliers.clone();
    ranked.sort_by(|a, b| revenue[*b].total_cmp(&revenue[*a]));
    let mut table = vec!["Date          Revenue      Reason".to_string(), "─".repeat(36)];
    for &day in ranked.iter().take(4) {
        let reason = SPIKES
            .iter()
            .find(|(d, _, _)| *d == day)
            .map_or("Unexplained", |(_, _, r)| *r);
        let date = start + Duration::days(day as i64);
        table.push(format!("{}  {:<11}  {}", date.format("%Y-%m-%d"), dollars(revenue[day]), reason));
    }
    table.push(String::new());
    table.push("Decision: KEEP - Legitimate spikes".to_string());
    note_panel(&mut scene, &panels[2], "Outlier Dates:", &table.join("\n"), 9.0);

    scene
        .text(panels[3].x + panels[3].w / 2.0, panels[3].y + panels[3].h, "Recommendation:")
        .size(14.0)
        .bold()
        .align(HAlign::Center, VAlign::Top);
    scene
        .text(
            panels[3].x + 0.3,
            panels[3].y + panels[3].h - 0.5,
            "✓ Keep outliers in dataset\n\nReasons:\n• Outliers coincide with major holidays\n• Values are legitimate sales spikes\n• Removing would lose business insights\n• Important for forecasting seasonal peaks\n\nAction:\n• Create 'is_holiday' feature\n• Use robust models (e.g., tree-based)\n• Track separately for reporting",
        )
        .size(10.0)
        .align(HAlign::Left, VAlign::Top);
    Ok(scene)
}

/// Direction and strength of a correlation, e.g. "Strong -".
fn strength(r: f64) -> String {
    let level = match r.abs() {
        a if a > 0.5 => "Strong",
        a if a > 0.3 => "Moderate",
        _ => "Weak",
    };
    format!("{} {}", level, if r < 0.0 { "-" } else { "+" })
}

pub fn exercise3_relationships(rng: &mut SmallRng) -> Result<Scene> {
    let n = 500;
    let sqft = stats::normal(rng, 2000.0, 500.0, n)?;
    let bedrooms: Vec<f64> = (0..n).map(|_| rng.gen_range(1..6) as f64).collect();
    let age: Vec<f64> = (0..n).map(|_| rng.gen_range(0..50) as f64).collect();
    let distance = stats::uniform(rng, 0.0, 30.0, n);
    let noise = stats::normal(rng, 0.0, 30_000.0, n)?;
    let price: Vec<f64> = (0..n)
        .map(|i| sqft[i] * 150.0 + bedrooms[i] * 20_000.0 - age[i] * 1000.0 - distance[i] * 3000.0 + noise[i])
        .collect();

    let names = ["price", "sqft", "bedrooms", "age", "distance_to_city"];
    let columns = vec![price.clone(), sqft.clone(), bedrooms.clone(), age.clone(), distance.clone()];
    let matrix = stats::correlation_matrix(&columns);
    let lower: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &r)| if j < i { r } else { f64::NAN })
                .collect()
        })
        .collect();

    let (mut scene, panels) = canvas("Exercise 3: Relationship Mapping - Example Solution", 14.0, 12.0, 2, 2);

    let heat = panels[0];
    heat.cells(
        &mut scene,
        &lower,
        |r| {
            if r.is_nan() {
                tinted("white", 0.0)
            } else {
                super::palette::coolwarm(r)
            }
        },
        |r| (!r.is_nan()).then(|| format!("{:.2}", r)),
    );
    let (cw, ch) = (heat.w / 5.0, heat.h / 5.0);
    for (k, name) in names.iter().enumerate() {
        scene
            .text(heat.x + (k as f64 + 0.5) * cw, heat.y - 0.06, *name)
            .size(8.0)
            .align(HAlign::Right, VAlign::Top)
            .rotate(45.0);
        scene
            .text(heat.x - 0.06, heat.y + heat.h - (k as f64 + 0.5) * ch, *name)
            .size(8.0)
            .align(HAlign::Right, VAlign::Center);
    }
    heat.title(&mut scene, "Correlation Heatmap", 11.0);

    let pairs = [
        (&sqft, panels[1], "#1f77b4", "Price vs. Sqft", "Square Feet"),
        (&distance, panels[2], "coral", "Price vs. Distance", "Distance to City (miles)"),
    ];
    for (xs, panel, color, title, x_label) in pairs {
        let fitted = panel.fit_points(xs, &price, 0.05);
        fitted.scatter(&mut scene, xs, &price, 20.0, color, 0.5);
        let (slope, intercept) = stats::linear_fit(xs, &price);
        fitted.fit_line(&mut scene, slope, intercept);
        fitted.axes(&mut scene, 5);
        fitted.title(&mut scene, &format!("{} (r = {:.3})", title, stats::pearson(xs, &price)), 11.0);
        fitted.x_label(&mut scene, x_label);
        fitted.y_label(&mut scene, "Price ($)");
    }

    let row = |rank: usize, label: &str, xs: &[f64]| {
        let r = stats::pearson(xs, &price);
        format!("{}. {:<11} r = {:.3} ({})", rank, label, r, strength(r))
    };
    let findings = [
        "Top Correlations with Price:".to_string(),
        row(1, "Sqft:", &sqft),
        row(2, "Distance:", &distance),
        row(3, "Bedrooms:", &bedrooms),
        row(4, "Age:", &age),
        String::new(),
        "Recommendations:".to_string(),
        "• Sqft is strongest predictor".to_string(),
        "• Location matters (distance effect)".to_string(),
        "• Consider sqft × location interaction".to_string(),
        "• Age effect is minimal".to_string(),
        "• All relationships are linear".to_string(),
    ];
    note_panel(&mut scene, &panels[3], "Key Findings:", &findings.join("\n"), 9.0);
    Ok(scene)
}

const SURVEY_COLUMNS: [&str; 6] = ["Q1", "Q2_optional", "Q3", "Q4_income", "Q5", "age"];
const INCOME: usize = 3;

/// Standard-normal survey answers with income skipped by younger
/// respondents and two questions losing values at random.
fn survey_with_gaps(rng: &mut SmallRng, n: usize) -> Result<Vec<[Option<f64>; 6]>> {
    let values = stats::normal(rng, 0.0, 1.0, n * SURVEY_COLUMNS.len())?;
    let mut rows: Vec<[Option<f64>; 6]> = values
        .chunks(SURVEY_COLUMNS.len())
        .map(|chunk| {
            let mut row = [None; 6];
            for (cell, v) in row.iter_mut().zip(chunk) {
                *cell = Some(*v);
            }
            row
        })
        .collect();
    for row in rows.iter_mut() {
        if row[5].is_some_and(|age| age < -0.5) {
            row[INCOME] = None;
        }
    }
    for (column, count) in [(1, 100), (4, 50)] {
        for i in index::sample(rng, n, count.min(n)) {
            rows[i][column] = None;
        }
    }
    Ok(rows)
}

/// Distance over the columns both rows answered, scaled up for the
/// columns either one skipped.
fn nan_euclidean(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let shared: Vec<f64> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some((x.as_ref()? - y.as_ref()?).powi(2)))
        .collect();
    if shared.is_empty() {
        return None;
    }
    let weight = a.len() as f64 / shared.len() as f64;
    Some((weight * shared.iter().sum::<f64>()).sqrt())
}

/// `column` with gaps filled by the mean of the `k` nearest rows that
/// answered it.
fn knn_fill(rows: &[[Option<f64>; 6]], column: usize, k: usize) -> Vec<f64> {
    let donors: Vec<&[Option<f64>; 6]> = rows.iter().filter(|r| r[column].is_some()).collect();
    let fallback = stats::mean(&donors.iter().filter_map(|r| r[column]).collect::<Vec<_>>());
    rows.iter()
        .map(|row| {
            row[column].unwrap_or_else(|| {
                let mut near: Vec<(f64, f64)> = donors
                    .iter()
                    .filter_map(|d| Some((nan_euclidean(row, *d)?, d[column]?)))
                    .collect();
                near.sort_by(|a, b| a.0.total_cmp(&b.0));
                let picked: Vec<f64> = near.iter().take(k).map(|(_, v)| *v).collect();
                if picked.is_empty() {
                    fallback
                } else {
                    stats::mean(&picked)
                }
            })
        })
        .collect()
}

pub fn exercise4_missing_data(rng: &mut SmallRng) -> Result<Scene> {
    let n = 500;
    let rows = survey_with_gaps(rng, n)?;
    let missing_pct: Vec<f64> = (0..SURVEY_COLUMNS.len())
        .map(|c| rows.iter().filter(|r| r[c].is_none()).count() as f64 / n as f64 * 100.0)
        .collect();

    let (mut scene, panels) = canvas("Exercise 4: Missing Data Detective - Example Solution", 16.0, 10.0, 2, 3);

    let pattern: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| r.iter().map(|v| if v.is_none() { 1.0 } else { 0.0 }).collect())
        .collect();
    panels[0].cells(
        &mut scene,
        &pattern,
        |v| crate::scene::paint(if v > 0.5 { "darkred" } else { "lightblue" }),
        |_| None,
    );
    panels[0].title(&mut scene, "Missing Data Pattern\n(Red = Missing)", 11.0);
    panels[0].x_label(&mut scene, "Questions");

    let bars = panels[1].with_x_range(0.0, 45.0).with_y_range(-0.6, 5.6);
    for (i, v) in missing_pct.iter().enumerate() {
        bars.hbar(&mut scene, i as f64, 0.8, *v).fill("coral").stroke("black", 1.0);
        scene
            .text(bars.map_x(v + 1.0), bars.map_y(i as f64), format!("{:.1}%", v))
            .size(8.0)
            .va(VAlign::Center);
    }
    bars.category_y_labels(&mut scene, &SURVEY_COLUMNS);
    bars.x_axis(&mut scene, 5);
    bars.x_label(&mut scene, "Missing (%)");
    bars.title(&mut scene, "Missing Data by Question", 11.0);

    let (reported, skipped): (Vec<f64>, Vec<f64>) = {
        let split = |present: bool| -> Vec<f64> {
            rows.iter()
                .filter(|r| r[INCOME].is_some() == present)
                .filter_map(|r| r[5])
                .collect()
        };
        (split(true), split(false))
    };
    overlaid_histograms(
        &mut scene,
        panels[2],
        &[(&reported, "Reported Income"), (&skipped, "Missing Income")],
    );
    panels[2].title(&mut scene, "Age Distribution\nby Income Reporting", 11.0);
    panels[2].x_label(&mut scene, "Age (normalized)");

    let observed: Vec<f64> = rows.iter().filter_map(|r| r[INCOME]).collect();
    let income_mean = stats::mean(&observed);
    let by_mean: Vec<f64> = rows.iter().map(|r| r[INCOME].unwrap_or(income_mean)).collect();
    let by_knn = knn_fill(&rows, INCOME, 5);
    overlaid_histograms(
        &mut scene,
        panels[3],
        &[(&observed, "Original"), (&by_mean, "Mean Imp"), (&by_knn, "KNN Imp")],
    );
    panels[3].title(&mut scene, "Q4_income: Imputation Comparison", 11.0);

    let diagnosis = format!(
        "Missingness Analysis:\n\nQ2_optional:  {:.0}% missing (MCAR)\n  • Random pattern\n  • Safe to delete or impute\n\nQ4_income:    ~{:.0}% missing (MAR)\n  • Related to age\n  • Younger respondents skip\n  • Use KNN imputation\n\nQ5:           {:.0}% missing (MCAR)\n  • Random pattern\n  • Mean imputation OK",
        missing_pct[1], missing_pct[INCOME], missing_pct[4]
    );
    note_panel(&mut scene, &panels[4], "Diagnosis:", &diagnosis, 9.0);
    note_panel(
        &mut scene,
        &panels[5],
        "Recommendation:",
        "Strategy:\n\n1. Q2_optional (MCAR)\n   → Drop column if not critical\n   → OR mean imputation\n\n2. Q4_income (MAR)\n   → KNN imputation (k=5)\n   → Create missing indicator\n   → Preserves relationships\n\n3. Q5 (MCAR)\n   → Mean imputation\n   → Low impact on analysis\n\nResult: KNN preserves\ndistributions best!",
        9.0,
    );
    Ok(scene)
}

/// Several 20-bin histograms on shared ranges with a legend.
fn overlaid_histograms(scene: &mut Scene, panel: Panel, groups: &[(&Vec<f64>, &str)]) {
    let all: Vec<f64> = groups.iter().flat_map(|(v, _)| v.iter().copied()).collect();
    let (lo, hi) = stats::min_max(&all).unwrap_or((0.0, 1.0));
    let hists: Vec<Histogram> = groups.iter().map(|(v, _)| Histogram::new(v, 20)).collect();
    let peak = hists.iter().map(Histogram::max_count).max().unwrap_or(1).max(1);
    let fitted = panel.with_x_range(lo, hi).with_y_range(0.0, peak as f64 * 1.05);
    let mut legend = Vec::new();
    for (i, (hist, (_, label))) in hists.iter().zip(groups).enumerate() {
        let color = TAB10[i % TAB10.len()];
        fitted.histogram(scene, hist, color);
        legend.push((*label, color));
    }
    fitted.axes(scene, 5);
    fitted.legend(scene, &legend);
}

pub fn exercise5_eda_report(_rng: &mut SmallRng) -> Result<Scene> {
    let mut scene = Scene::new(14.0, 10.0);
    heading(&mut scene, 7.0, 9.55, "Exercise 5: Mini EDA Report - Example Structure", 16.0);
    scene
        .text(7.0, 8.6, "Employee Attrition Analysis")
        .size(18.0)
        .bold()
        .ha(HAlign::Center);
    scene
        .text(7.0, 8.05, "A Comprehensive EDA Report")
        .size(12.0)
        .italic()
        .ha(HAlign::Center);

    let sections = [
        (
            "1. DATA OVERVIEW",
            "lightblue",
            "• Rows: 1,470\n• Features: 35\n• Target: Attrition (16%)\n• Missing: None\n• Duplicates: None\n• Data Types:\n  - Numeric: 26\n  - Categorical: 9",
        ),
        (
            "2. DATA QUALITY",
            "lightgreen",
            "✓ No missing values\n✓ No duplicates\n✓ Consistent formats\n✓ Logical value ranges\n\n⚠ Issues found:\n• Salary highly skewed\n• Employee count = 1\n  (constant, drop)\n• Over18 = 'Y' always\n  (constant, drop)",
        ),
        (
            "3. KEY FINDINGS",
            "lightyellow",
            "1. Attrition Rate: 16%\n   (237 of 1,470 left)\n\n2. Top Predictors:\n   • Overtime (54% leave)\n   • Low job satisfaction\n   • Distance from home\n   • Years at company\n\n3. Patterns:\n   • Young employees leave\n   • Sales has highest rate\n   • Recent hires risky",
        ),
    ];
    let middle = Panel::tiled(0.6, 4.2, 12.8, 3.4, 1, 3, 0.6, 0.0);
    for ((title, color, body), panel) in sections.iter().zip(&middle) {
        section_label(&mut scene, panel.x + panel.w / 2.0, panel.y + panel.h, title, color);
        scene
            .text(panel.x + 0.3, panel.y + panel.h - 0.35, *body)
            .size(8.0)
            .align(HAlign::Left, VAlign::Top);
    }

    let bottom = Panel::tiled(1.4, 0.7, 12.0, 2.6, 1, 3, 1.4, 0.0);
    let outcomes = [("Stayed", 1233.0, "lightgreen"), ("Left", 237.0, "coral")];
    let total: f64 = outcomes.iter().map(|(_, v, _)| v).sum();
    let bars = bottom[0].with_x_range(-0.6, 1.6).with_y_range(0.0, 1500.0);
    for (i, (_, count, color)) in outcomes.iter().enumerate() {
        bars.vbar(&mut scene, i as f64, 0.8, 0.0, *count).fill(color).stroke("black", 1.0);
        let (px, py) = bars.map(i as f64, count + 30.0);
        scene
            .text(px, py, format!("{:.0}\n({:.1}%)", count, count / total * 100.0))
            .size(8.0)
            .align(HAlign::Center, VAlign::Bottom);
    }
    bars.category_labels(&mut scene, &["Stayed", "Left"], 0.0);
    bars.y_axis(&mut scene, 4);
    bars.y_label(&mut scene, "Count");
    bars.title(&mut scene, "Attrition Distribution", 10.0).bold();

    let predictors = [("Overtime", 0.45), ("JobSat", -0.38), ("Distance", 0.28), ("Years", -0.25), ("Age", -0.22)];
    let corr = bottom[1].with_x_range(-0.5, 0.55).with_y_range(-0.6, 4.6);
    for (i, (_, r)) in predictors.iter().enumerate() {
        corr.hbar_signed(&mut scene, i as f64, 0.8, *r)
            .fill(if *r > 0.0 { "red" } else { "green" })
            .stroke("black", 1.0);
    }
    corr.vline(&mut scene, 0.0).color("black").line_width(0.5);
    let labels: Vec<&str> = predictors.iter().map(|(name, _)| *name).collect();
    corr.category_y_labels(&mut scene, &labels);
    corr.x_axis(&mut scene, 4);
    corr.x_label(&mut scene, "Correlation with Attrition");
    corr.title(&mut scene, "Top Predictors", 10.0).bold();

    let rec = bottom[2];
    section_label(&mut scene, rec.x + rec.w / 2.0, rec.y + rec.h + 0.1, "4. RECOMMENDATIONS", "lightcoral");
    scene
        .text(
            rec.x,
            rec.y + rec.h - 0.2,
            "Data Preparation:\n• Drop constant columns\n• Log-transform salary\n• Create age groups\n• Encode categoricals\n\nFeatures to Engineer:\n• Overtime flag\n• Satisfaction score\n• Tenure buckets\n• Distance categories\n\nNext Steps:\n• Build predictive model\n• Focus on high-risk groups\n• Test interventions",
        )
        .size(7.0)
        .align(HAlign::Left, VAlign::Top);
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(150_000.4), "$150,000");
        assert_eq!(dollars(999.0), "$999");
        assert_eq!(dollars(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn test_zero_centred_midpoint() {
        assert_eq!(zero_centred(-10.0), 0.0);
        assert_eq!(zero_centred(0.0), 0.5);
        assert_eq!(zero_centred(40.0), 1.0);
        assert!((zero_centred(20.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_holiday_spikes_are_outliers() {
        let revenue = holiday_revenue(&mut rng()).unwrap();
        let outliers = iqr_outliers(&revenue);
        for (day, _, reason) in SPIKES {
            assert!(outliers.contains(&day), "{} not flagged", reason);
        }
    }

    #[test]
    fn test_survey_gaps() {
        let rows = survey_with_gaps(&mut rng(), 500).unwrap();
        let missing = |c: usize| rows.iter().filter(|r| r[c].is_none()).count();
        assert_eq!(missing(1), 100);
        assert_eq!(missing(4), 50);
        assert_eq!(missing(0), 0);
        for row in &rows {
            let young = row[5].is_some_and(|a| a < -0.5);
            assert_eq!(row[INCOME].is_none(), young);
        }
    }

    #[test]
    fn test_nan_euclidean_scales_for_gaps() {
        let a = [Some(0.0), None, Some(3.0)];
        let b = [Some(4.0), Some(1.0), None];
        // one shared column of three
        assert!((nan_euclidean(&a, &b).unwrap() - (3.0f64 * 16.0).sqrt()).abs() < 1e-12);
        assert_eq!(nan_euclidean(&[None, Some(1.0)], &[Some(1.0), None]), None);
    }

    #[test]
    fn test_knn_fill_keeps_observed() {
        let rows = survey_with_gaps(&mut rng(), 200).unwrap();
        let filled = knn_fill(&rows, INCOME, 5);
        assert_eq!(filled.len(), rows.len());
        for (row, v) in rows.iter().zip(&filled) {
            if let Some(original) = row[INCOME] {
                assert_eq!(original, *v);
            }
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(strength(0.81), "Strong +");
        assert_eq!(strength(-0.42), "Moderate -");
        assert_eq!(strength(-0.1), "Weak -");
    }

    #[test]
    fn test_redesign_has_five_points_each() {
        let scene = exercise2_redesign_challenge(&mut rng()).unwrap();
        let texts = scene.texts();
        assert_eq!(texts.iter().filter(|t| t.starts_with("✗ ")).count(), 5);
        assert_eq!(texts.iter().filter(|t| t.starts_with("✓ ")).count(), 5);
    }

    #[test]
    fn test_eda_report_shares() {
        let scene = exercise5_eda_report(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.contains(&"1233\n(83.9%)"));
        assert!(texts.contains(&"237\n(16.1%)"));
    }

    #[test]
    fn test_highlighting_labels_only_q4() {
        let scene = exercise5_preattentive_highlighting(&mut rng()).unwrap();
        let red = crate::scene::paint("#E63946").to_rgba8();
        let labels: Vec<&str> = scene
            .items()
            .iter()
            .filter(|i| i.fill.as_ref().map(|c| c.to_rgba8()) == Some(red))
            .filter_map(|i| match &i.shape {
                crate::scene::Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["62", "68", "55", "65", "60"]);
    }
}
