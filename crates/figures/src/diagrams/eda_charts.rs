//! Statistical chart grids for the EDA lecture: distributions, outliers,
//! relationships and missing data, drawn from seeded synthetic samples.

use super::palette::{blues, coolwarm, plasma, viridis, ylorrd, TAB10};
use super::panel::{pie, Panel};
use super::heading;
use crate::scene::{HAlign, Scene, VAlign};
use crate::stats::{self, Histogram};
use csscolorparser::Color;
use deck_core::Result;
use rand::rngs::SmallRng;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashMap;

const DEPARTMENTS: [&str; 3] = ["Engineering", "Sales", "Marketing"];

/// Scene with a heading and a `rows × cols` grid of chart panels below it.
pub(super) fn canvas(title: &str, width: f64, height: f64, rows: usize, cols: usize) -> (Scene, Vec<Panel>) {
    let mut scene = Scene::new(width, height);
    heading(&mut scene, width / 2.0, height - 0.5, title, 16.0);
    let panels = Panel::tiled(1.0, 0.9, width - 1.4, height - 2.6, rows, cols, 1.1, 1.5);
    (scene, panels)
}

/// Histogram of `values` fitted into `panel`, with axes.
pub(super) fn hist_panel(scene: &mut Scene, panel: Panel, values: &[f64], bins: usize, color: &str) -> Panel {
    let hist = Histogram::new(values, bins);
    let panel = panel.fit_histogram(&hist);
    panel.histogram(scene, &hist, color);
    panel.axes(scene, 5);
    panel
}

/// Vertical colour scale to the right of `panel`.
pub(super) fn colorbar(scene: &mut Scene, panel: &Panel, cmap: fn(f64) -> Color, lo: f64, hi: f64, label: &str) {
    let (x, steps) = (panel.x + panel.w + 0.15, 32);
    let step_h = panel.h / steps as f64;
    for i in 0..steps {
        let t = (i as f64 + 0.5) / steps as f64;
        scene
            .rect(x, panel.y + i as f64 * step_h, 0.15, step_h * 1.02)
            .fill_color(cmap(t))
            .z(1);
    }
    for (v, y) in [(lo, panel.y), (hi, panel.y + panel.h)] {
        scene
            .text(x + 0.2, y, format!("{:.0}", v))
            .size(7.0)
            .va(VAlign::Center);
    }
    scene
        .text(x + 0.6, panel.y + panel.h / 2.0, label)
        .size(8.0)
        .align(HAlign::Center, VAlign::Bottom)
        .rotate(90.0);
}

/// Panel narrowed to leave room for a colour bar.
fn with_colorbar_room(panel: Panel) -> Panel {
    Panel {
        w: panel.w - 0.7,
        ..panel
    }
}

/// Scatter where each point carries its own size and colour.
fn scatter_encoded(
    scene: &mut Scene,
    panel: &Panel,
    xs: &[f64],
    ys: &[f64],
    area: impl Fn(usize) -> f64,
    color: impl Fn(usize) -> Color,
    alpha: f64,
) {
    for (i, (&vx, &vy)) in xs.iter().zip(ys).enumerate() {
        let (px, py) = panel.map(vx, vy);
        if panel.contains(px, py) {
            scene.marker(px, py, area(i)).fill_color(color(i)).alpha(alpha).z(2);
        }
    }
}

/// Monospaced note block in the top-left of an empty panel.
pub(super) fn note_panel(scene: &mut Scene, panel: &Panel, title: &str, body: &str, size_pt: f64) {
    scene
        .text(panel.x + panel.w / 2.0, panel.y + panel.h, title)
        .size(12.0)
        .bold()
        .align(HAlign::Center, VAlign::Top);
    scene
        .text(panel.x + 0.1, panel.y + panel.h - 0.4, body)
        .size(size_pt)
        .monospace()
        .align(HAlign::Left, VAlign::Top);
}

/// Hexagonal bin counts coloured by `cmap`, in scene units so hexagons
/// stay regular whatever the data aspect.
fn hexbin(scene: &mut Scene, panel: &Panel, xs: &[f64], ys: &[f64], gridsize: usize, cmap: fn(f64) -> Color) {
    let width = panel.w / gridsize.max(1) as f64;
    let side = width / 3f64.sqrt();
    let row_h = 1.5 * side;
    let centre = |row: i64, col: i64| {
        let offset = if row.rem_euclid(2) == 1 { width / 2.0 } else { 0.0 };
        (panel.x + col as f64 * width + offset, panel.y + row as f64 * row_h)
    };

    let mut counts: HashMap<(i64, i64), usize> = HashMap::new();
    for (&vx, &vy) in xs.iter().zip(ys) {
        let (px, py) = panel.map(vx, vy);
        if !panel.contains(px, py) {
            continue;
        }
        let base = ((py - panel.y) / row_h).round() as i64;
        let mut best = ((0, 0), f64::INFINITY);
        for row in base - 1..=base + 1 {
            let offset = if row.rem_euclid(2) == 1 { width / 2.0 } else { 0.0 };
            let col = ((px - panel.x - offset) / width).round() as i64;
            let (cx, cy) = centre(row, col);
            let d = (cx - px).powi(2) + (cy - py).powi(2);
            if d < best.1 {
                best = ((row, col), d);
            }
        }
        *counts.entry(best.0).or_default() += 1;
    }

    let peak = counts.values().copied().max().unwrap_or(1) as f64;
    let mut cells: Vec<_> = counts.into_iter().collect();
    cells.sort();
    for ((row, col), count) in cells {
        let (cx, cy) = centre(row, col);
        let hexagon = (0..6)
            .map(|k| {
                let a = (30.0 + 60.0 * k as f64).to_radians();
                (cx + side * a.cos(), cy + side * a.sin())
            })
            .collect();
        scene.polygon(hexagon).fill_color(cmap(count as f64 / peak)).z(1);
    }
}

pub fn distribution_viz_comparison(rng: &mut SmallRng) -> Result<Scene> {
    let data = stats::exponential(rng, 2.0, 1000)?;
    let (lo, hi) = stats::min_max(&data).unwrap_or((0.0, 1.0));
    let (mut scene, panels) = canvas("Choosing the Right Distribution Visualization", 15.0, 10.0, 2, 3);

    let hist = hist_panel(&mut scene, panels[0], &data, 30, "steelblue");
    hist.title(&mut scene, "Histogram\n✓ Shows shape clearly\n⚠ Bin width sensitive", 10.0);
    hist.y_label(&mut scene, "Frequency");

    let grid = stats::linspace(lo, hi, 200);
    let density = stats::kde(&data, &grid);
    let peak = density.iter().copied().fold(0.0_f64, f64::max);
    let kde = panels[1].with_x_range(lo, hi).with_y_range(0.0, peak * 1.1);
    kde.density(&mut scene, &grid, &density, "coral");
    kde.axes(&mut scene, 5);
    kde.title(&mut scene, "KDE\n✓ Smooth curve\n⚠ Can oversmooth", 10.0);

    let spread = (hi - lo) * 0.05;
    let boxes = panels[2].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    boxes.boxplot(&mut scene, 0.0, 0.5, &data, "#dddddd");
    boxes.y_axis(&mut scene, 5);
    boxes.title(&mut scene, "Box Plot\n✓ Shows quartiles & outliers\n✗ Hides shape", 10.0);

    let violin = panels[3].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    violin.violin(&mut scene, 0.0, 0.45, &data, "#1f77b4");
    violin.y_axis(&mut scene, 5);
    violin.title(&mut scene, "Violin Plot\n✓ Combines box + KDE\n✓ Best for groups", 10.0);

    let (xs, ps): (Vec<f64>, Vec<f64>) = stats::ecdf(&data).into_iter().unzip();
    let ecdf = panels[4].with_x_range(lo, hi).with_y_range(0.0, 1.05);
    ecdf.series(&mut scene, &xs, &ps).color("green");
    ecdf.axes(&mut scene, 5);
    ecdf.y_label(&mut scene, "Cumulative Probability");
    ecdf.title(&mut scene, "ECDF\n✓ Shows exact percentiles\n⚠ Less intuitive", 10.0);

    note_panel(
        &mut scene,
        &panels[5],
        "Key Takeaways:",
        "• Histogram: Quick overview\n• KDE: Smooth visualization\n• Box: Outlier detection\n• Violin: Group comparison\n• ECDF: Precise percentiles",
        10.0,
    );
    Ok(scene)
}

pub fn univariate_numeric(rng: &mut SmallRng) -> Result<Scene> {
    // thousands of dollars
    let price: Vec<f64> = stats::lognormal(rng, 12.0, 0.5, 1000)?
        .into_iter()
        .map(|p| p / 1000.0)
        .collect();
    let (mean, (_, median, _)) = (stats::mean(&price), stats::quartiles(&price));
    let (lo, hi) = stats::min_max(&price).unwrap_or((0.0, 1.0));
    let (mut scene, panels) = canvas("Univariate Analysis: House Prices", 12.0, 10.0, 2, 2);

    let hist = hist_panel(&mut scene, panels[0], &price, 50, "steelblue");
    hist.vline(&mut scene, mean).color("red").line_width(2.0).dashed();
    hist.vline(&mut scene, median).color("green").line_width(2.0).dashed();
    let mean_label = format!("Mean: ${:.0}K", mean);
    let median_label = format!("Median: ${:.0}K", median);
    hist.legend(&mut scene, &[(mean_label.as_str(), "red"), (median_label.as_str(), "green")]);
    hist.title(&mut scene, "Histogram with Central Tendency", 10.0);
    hist.x_label(&mut scene, "Price ($K)");
    hist.y_label(&mut scene, "Frequency");

    let spread = (hi - lo) * 0.05;
    let boxes = panels[1].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    boxes.boxplot(&mut scene, 0.0, 0.5, &price, "#dddddd");
    boxes.y_axis(&mut scene, 5);
    boxes.y_label(&mut scene, "Price ($K)");
    boxes.title(&mut scene, &format!("Box Plot\nSkewness: {:.2}", stats::skewness(&price)), 10.0);

    let hist = Histogram::new(&price, 50);
    let overlay = panels[2].fit_histogram(&hist);
    overlay.histogram(&mut scene, &hist, "lightblue");
    let grid = stats::linspace(lo, hi, 200);
    let scale = price.len() as f64 * hist.bin_width();
    let counts: Vec<f64> = stats::kde(&price, &grid).iter().map(|d| d * scale).collect();
    overlay.series(&mut scene, &grid, &counts).color("red");
    overlay.axes(&mut scene, 5);
    overlay.legend(&mut scene, &[("KDE", "red")]);
    overlay.title(&mut scene, "Histogram + KDE", 10.0);
    overlay.x_label(&mut scene, "Price ($K)");
    overlay.y_label(&mut scene, "Count");

    let (theoretical, ordered): (Vec<f64>, Vec<f64>) = stats::qq_points(&price).into_iter().unzip();
    let qq = panels[3].fit_points(&theoretical, &ordered, 0.05);
    qq.scatter(&mut scene, &theoretical, &ordered, 10.0, "steelblue", 0.8);
    let (slope, intercept) = stats::linear_fit(&theoretical, &ordered);
    qq.fit_line(&mut scene, slope, intercept);
    qq.axes(&mut scene, 5);
    qq.title(&mut scene, "Q-Q Plot (Normality Check)", 10.0);
    qq.x_label(&mut scene, "Theoretical quantiles");
    qq.y_label(&mut scene, "Ordered Values");
    Ok(scene)
}

pub fn skewness_transformations(rng: &mut SmallRng) -> Result<Scene> {
    let skewed = stats::exponential(rng, 2.0, 1000)?;
    let logged: Vec<f64> = skewed.iter().map(|v| v.ln_1p()).collect();
    let rooted: Vec<f64> = skewed.iter().map(|v| v.sqrt()).collect();
    let shifted: Vec<f64> = skewed.iter().map(|v| v + 1.0).collect();
    let (boxcox, lambda) = stats::boxcox(&shifted)?;

    let (mut scene, panels) = canvas("Transforming Skewed Data", 12.0, 10.0, 2, 2);
    let views = [
        (&skewed, "coral", format!("Original\nSkewness: {:.2}", stats::skewness(&skewed))),
        (&logged, "steelblue", format!("Log Transform\nSkewness: {:.2}", stats::skewness(&logged))),
        (
            &rooted,
            "lightgreen",
            format!("Square Root Transform\nSkewness: {:.2}", stats::skewness(&rooted)),
        ),
        (
            &boxcox,
            "plum",
            format!("Box-Cox Transform\nλ={:.2}, Skew: {:.2}", lambda, stats::skewness(&boxcox)),
        ),
    ];
    for (i, (values, color, title)) in views.iter().enumerate() {
        let panel = hist_panel(&mut scene, panels[i], values, 30, color);
        panel.title(&mut scene, title, 10.0);
        if i % 2 == 0 {
            panel.y_label(&mut scene, "Frequency");
        }
        if i >= 2 {
            panel.x_label(&mut scene, "Transformed Value");
        }
    }
    Ok(scene)
}

pub fn univariate_categorical(_rng: &mut SmallRng) -> Result<Scene> {
    let segments = ["Premium", "Standard", "Basic", "Trial", "Enterprise"];
    let counts = [250.0, 450.0, 300.0, 150.0, 100.0];
    let total: f64 = counts.iter().sum();
    let percentages: Vec<f64> = counts.iter().map(|c| c / total * 100.0).collect();

    let mut scene = Scene::new(15.0, 5.6);
    heading(&mut scene, 7.5, 5.15, "Univariate Analysis: Customer Segments", 16.0);
    let panels = Panel::tiled(1.3, 0.8, 13.2, 3.6, 1, 3, 1.6, 0.0);

    let bars = panels[0].with_x_range(0.0, 520.0).with_y_range(-0.6, 4.6);
    for (i, v) in counts.iter().enumerate() {
        bars.hbar(&mut scene, i as f64, 0.8, *v).fill("steelblue").stroke("black", 1.0);
        scene
            .text(bars.map_x(v + 10.0), bars.map_y(i as f64), format!("{}", v))
            .size(8.0)
            .va(VAlign::Center);
    }
    bars.category_y_labels(&mut scene, &segments);
    bars.x_axis(&mut scene, 5);
    bars.x_label(&mut scene, "Count");
    bars.title(&mut scene, "Count Plot", 11.0);

    let (cx, cy, r) = (panels[1].x + panels[1].w / 2.0, panels[1].y + panels[1].h / 2.0, 1.4);
    let mids = pie(&mut scene, cx, cy, r, &counts, &TAB10[..5], 90.0);
    for ((mid, name), pct) in mids.iter().zip(segments).zip(&percentages) {
        let (sin, cos) = mid.to_radians().sin_cos();
        let outside = if cos >= 0.0 { HAlign::Left } else { HAlign::Right };
        scene
            .text(cx + 1.12 * r * cos, cy + 1.12 * r * sin, name)
            .size(8.0)
            .align(outside, VAlign::Center);
        scene
            .text(cx + 0.6 * r * cos, cy + 0.6 * r * sin, format!("{:.1}%", pct))
            .size(8.0)
            .align(HAlign::Center, VAlign::Center)
            .z(2);
    }
    panels[1].title(&mut scene, "Pie Chart (if ≤5 categories)", 11.0);

    let share = panels[2].with_x_range(0.0, 45.0).with_y_range(-0.6, 4.6);
    for (i, v) in percentages.iter().enumerate() {
        share.hbar(&mut scene, i as f64, 0.8, *v).fill("coral").stroke("black", 1.0);
        scene
            .text(share.map_x(v + 1.0), share.map_y(i as f64), format!("{:.1}%", v))
            .size(8.0)
            .va(VAlign::Center);
    }
    share.category_y_labels(&mut scene, &segments);
    share.x_axis(&mut scene, 5);
    share.x_label(&mut scene, "Percentage (%)");
    share.title(&mut scene, "Percentage Distribution", 11.0);
    Ok(scene)
}

pub fn outlier_detection(rng: &mut SmallRng) -> Result<Scene> {
    let mut values = stats::normal(rng, 50.0, 10.0, 950)?;
    values.extend(stats::uniform(rng, 100.0, 150.0, 50));
    let (lower, upper) = stats::iqr_bounds(&values);
    let (mean, sd) = (stats::mean(&values), stats::pop_std_dev(&values));
    let (lo, hi) = stats::min_max(&values).unwrap_or((0.0, 1.0));
    let index: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

    let (mut scene, panels) = canvas("Outlier Detection Methods", 15.0, 10.0, 2, 3);

    let spread = (hi - lo) * 0.05;
    let boxes = panels[0].with_x_range(-1.0, 1.0).with_y_range(lo - spread, hi + spread);
    boxes.boxplot(&mut scene, 0.0, 0.5, &values, "#dddddd");
    scene
        .text(boxes.map_x(0.3), boxes.map_y(upper), format!("Upper: {:.0}", upper))
        .size(8.0)
        .va(VAlign::Bottom);
    boxes.y_axis(&mut scene, 5);
    boxes.y_label(&mut scene, "Value");
    boxes.title(&mut scene, "Box Plot (IQR Method)", 10.0);

    let bounded = hist_panel(&mut scene, panels[1], &values, 30, "#1f77b4");
    for bound in [lower, upper] {
        bounded.vline(&mut scene, bound).color("red").dashed();
    }
    bounded.legend(&mut scene, &[("IQR bounds", "red")]);
    bounded.title(&mut scene, "Histogram with IQR Bounds", 10.0);

    let z: Vec<f64> = values.iter().map(|v| ((v - mean) / sd).abs()).collect();
    let zmax = z.iter().copied().fold(0.0_f64, f64::max);
    let zpanel = panels[2].with_x_range(0.0, values.len() as f64).with_y_range(0.0, zmax * 1.05);
    zpanel.scatter(&mut scene, &index, &z, 10.0, "#1f77b4", 0.5);
    zpanel.hline(&mut scene, 3.0).color("red").dashed();
    zpanel.axes(&mut scene, 5);
    zpanel.legend(&mut scene, &[("|z| = 3", "red")]);
    zpanel.y_label(&mut scene, "|Z-score|");
    zpanel.title(&mut scene, "Z-Score Method", 10.0);

    let pct = hist_panel(&mut scene, panels[3], &values, 30, "#1f77b4");
    for q in [0.01, 0.99] {
        pct.vline(&mut scene, stats::quantile(&values, q)).color("red").line_width(2.0).dashed();
    }
    pct.title(&mut scene, "Percentile Method (1%, 99%)", 10.0);

    let indexed = panels[4]
        .with_x_range(0.0, values.len() as f64)
        .with_y_range(lo - spread, hi + spread);
    indexed.scatter(&mut scene, &index, &values, 10.0, "#1f77b4", 0.5);
    for bound in [lower, upper] {
        indexed.hline(&mut scene, bound).color("red").dashed();
    }
    indexed.axes(&mut scene, 5);
    indexed.x_label(&mut scene, "Index");
    indexed.title(&mut scene, "Index Plot", 10.0);

    let logged: Vec<f64> = values.iter().map(|v| v.ln_1p()).collect();
    let log_panel = hist_panel(&mut scene, panels[5], &logged, 30, "lightgreen");
    log_panel.x_label(&mut scene, "Log(Value + 1)");
    log_panel.title(&mut scene, "Log-Transformed View", 10.0);
    Ok(scene)
}

pub fn scatter_variations(rng: &mut SmallRng) -> Result<Scene> {
    let xs: Vec<f64> = stats::normal(rng, 0.0, 2.0, 200)?;
    let noise = stats::normal(rng, 0.0, 1.0, 200)?;
    let ys: Vec<f64> = xs.iter().zip(&noise).map(|(x, e)| x * 0.8 + e).collect();
    let groups: Vec<usize> = (0..200).map(|_| rng.gen_range(0..3)).collect();
    let sizes = stats::uniform(rng, 10.0, 100.0, 200);

    let (mut scene, panels) = canvas("Scatter Plot Variations", 12.0, 10.0, 2, 2);
    let fitted: Vec<Panel> = panels
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let p = if i == 3 { with_colorbar_room(*p) } else { *p };
            p.fit_points(&xs, &ys, 0.05)
        })
        .collect();

    fitted[0].scatter(&mut scene, &xs, &ys, 50.0, "steelblue", 0.6);
    fitted[0].title(&mut scene, "Basic Scatter Plot", 10.0);

    fitted[1].scatter(&mut scene, &xs, &ys, 50.0, "steelblue", 0.6);
    let (slope, intercept) = stats::linear_fit(&xs, &ys);
    fitted[1].fit_line(&mut scene, slope, intercept);
    let r_label = format!("r = {:.2}", stats::pearson(&xs, &ys));
    fitted[1].legend(&mut scene, &[(r_label.as_str(), "red")]);
    fitted[1].title(&mut scene, "With Regression Line", 10.0);

    let group_colors = ["red", "green", "blue"];
    scatter_encoded(
        &mut scene,
        &fitted[2],
        &xs,
        &ys,
        |_| 50.0,
        |i| crate::scene::paint(group_colors[groups[i]]),
        0.6,
    );
    fitted[2].legend(&mut scene, &[("Group A", "red"), ("Group B", "green"), ("Group C", "blue")]);
    fitted[2].title(&mut scene, "Color-Coded by Category", 10.0);

    scatter_encoded(
        &mut scene,
        &fitted[3],
        &xs,
        &ys,
        |i| sizes[i],
        |i| viridis(super::palette::normalize(sizes[i], 10.0, 100.0)),
        0.6,
    );
    colorbar(&mut scene, &fitted[3], viridis, 10.0, 100.0, "Size Variable");
    fitted[3].title(&mut scene, "Size & Color Encoding", 10.0);

    for panel in &fitted {
        panel.axes(&mut scene, 5);
        panel.x_label(&mut scene, "Variable X");
        panel.y_label(&mut scene, "Variable Y");
    }
    Ok(scene)
}

pub fn overplotting_solutions(rng: &mut SmallRng) -> Result<Scene> {
    let n = 5000;
    let xs = stats::normal(rng, 0.0, 1.0, n)?;
    let noise = stats::normal(rng, 0.0, 1.0, n)?;
    let ys: Vec<f64> = xs.iter().zip(&noise).map(|(x, e)| x * 0.5 + e).collect();

    let (mut scene, panels) = canvas("Dealing with Overplotting", 15.0, 10.0, 2, 3);
    let panels: Vec<Panel> = panels
        .into_iter()
        .map(|p| p.with_x_range(-4.0, 4.0).with_y_range(-4.5, 4.5))
        .collect();

    panels[0].scatter(&mut scene, &xs, &ys, 10.0, "#1f77b4", 1.0);
    panels[0].title(&mut scene, "✗ Overplotted\n(Cannot see density)", 10.0);
    panels[1].scatter(&mut scene, &xs, &ys, 10.0, "#1f77b4", 0.1);
    panels[1].title(&mut scene, "✓ Alpha Transparency", 10.0);
    panels[2].scatter(&mut scene, &xs, &ys, 1.0, "#1f77b4", 0.5);
    panels[2].title(&mut scene, "✓ Smaller Points", 10.0);

    hexbin(&mut scene, &panels[3], &xs, &ys, 30, blues);
    panels[3].title(&mut scene, "✓ Hexbin", 10.0);

    // density from a coarse 2D histogram
    let bins = 40;
    let cell = |v: f64, lo: f64, hi: f64| (((v - lo) / (hi - lo) * bins as f64) as usize).min(bins - 1);
    let mut grid = vec![0usize; bins * bins];
    let keys: Vec<Option<usize>> = xs
        .iter()
        .zip(&ys)
        .map(|(&x, &y)| {
            let inside = (-4.0..4.0).contains(&x) && (-4.5..4.5).contains(&y);
            inside.then(|| cell(x, -4.0, 4.0) * bins + cell(y, -4.5, 4.5))
        })
        .collect();
    for key in keys.iter().flatten() {
        grid[*key] += 1;
    }
    let peak = grid.iter().copied().max().unwrap_or(1).max(1) as f64;
    scatter_encoded(
        &mut scene,
        &panels[4],
        &xs,
        &ys,
        |_| 1.0,
        |i| viridis(keys[i].map_or(0.0, |k| grid[k] as f64 / peak)),
        1.0,
    );
    panels[4].title(&mut scene, "✓ 2D Density Color", 10.0);

    let sample: Vec<usize> = index::sample(rng, n, 1000).into_iter().collect();
    let sx: Vec<f64> = sample.iter().map(|&i| xs[i]).collect();
    let sy: Vec<f64> = sample.iter().map(|&i| ys[i]).collect();
    panels[5].scatter(&mut scene, &sx, &sy, 20.0, "#1f77b4", 0.5);
    panels[5].title(&mut scene, &format!("✓ Random Sample\n({} of {} points)", sample.len(), n), 10.0);

    for panel in &panels {
        panel.axes(&mut scene, 4);
    }
    Ok(scene)
}

pub fn group_comparison(rng: &mut SmallRng) -> Result<Scene> {
    let groups = [
        stats::normal(rng, 65.0, 10.0, 100)?,
        stats::normal(rng, 70.0, 12.0, 100)?,
        stats::normal(rng, 62.0, 8.0, 100)?,
    ];
    let colors = ["blue", "red", "green"];
    let all: Vec<f64> = groups.iter().flatten().copied().collect();
    let (lo, hi) = stats::min_max(&all).unwrap_or((0.0, 1.0));
    let spread = (hi - lo) * 0.05;

    let (mut scene, panels) = canvas("Comparing Groups: Numeric vs Categorical", 15.0, 10.6, 2, 3);
    let categorical: Vec<Panel> = panels[..3]
        .iter()
        .map(|p| p.with_x_range(-0.6, 2.6).with_y_range(lo - spread, hi + spread))
        .collect();

    for (i, values) in groups.iter().enumerate() {
        categorical[0].boxplot(&mut scene, i as f64, 0.5, values, "#dddddd");
        categorical[1].violin(&mut scene, i as f64, 0.4, values, TAB10[0]);
        let jitter = stats::normal(rng, i as f64, 0.04, values.len())?;
        categorical[2].scatter(&mut scene, &jitter, values, 20.0, TAB10[i], 0.3);
    }
    for (panel, title) in categorical.iter().zip(["Box Plots", "Violin Plots", "Strip Plot"]) {
        panel.category_labels(&mut scene, &DEPARTMENTS, 45.0);
        panel.y_axis(&mut scene, 5);
        panel.y_label(&mut scene, "Salary (K$)");
        panel.title(&mut scene, title, 10.0);
    }

    let overlap = Histogram::new(&all, 20);
    let peak = groups
        .iter()
        .map(|g| Histogram::new(g, 20).max_count())
        .max()
        .unwrap_or(1);
    let hist = panels[3]
        .with_x_range(lo, hi)
        .with_y_range(0.0, peak as f64 * 1.1);
    for (values, color) in groups.iter().zip(colors) {
        hist.histogram(&mut scene, &Histogram::new(values, overlap.counts.len()), color);
    }
    hist.axes(&mut scene, 5);
    hist.legend(&mut scene, &[("Engineering", "blue"), ("Sales", "red"), ("Marketing", "green")]);
    hist.x_label(&mut scene, "Salary (K$)");
    hist.title(&mut scene, "Overlapping Histograms", 10.0);

    let grid = stats::linspace(30.0, 100.0, 200);
    let densities: Vec<Vec<f64>> = groups.iter().map(|g| stats::kde(g, &grid)).collect();
    let top = densities.iter().flatten().copied().fold(0.0_f64, f64::max);
    let kde = panels[4].with_x_range(30.0, 100.0).with_y_range(0.0, top * 1.1);
    for (density, color) in densities.iter().zip(colors) {
        kde.density(&mut scene, &grid, density, color);
    }
    kde.axes(&mut scene, 5);
    kde.legend(&mut scene, &[("Engineering", "blue"), ("Sales", "red"), ("Marketing", "green")]);
    kde.x_label(&mut scene, "Salary (K$)");
    kde.title(&mut scene, "KDE Overlay", 10.0);

    let means: Vec<f64> = groups.iter().map(|g| stats::mean(g)).collect();
    let bars = panels[5].with_x_range(-0.6, 2.6).with_y_range(0.0, 85.0);
    for (i, (m, color)) in means.iter().zip(colors).enumerate() {
        bars.vbar(&mut scene, i as f64, 0.8, 0.0, *m).fill(color).alpha(0.7);
        let (px, py) = bars.map(i as f64, m + 1.0);
        scene.text(px, py, format!("{:.1}", m)).size(9.0).align(HAlign::Center, VAlign::Bottom);
    }
    bars.category_labels(&mut scene, &DEPARTMENTS, 45.0);
    bars.y_axis(&mut scene, 5);
    bars.y_label(&mut scene, "Mean Salary (K$)");
    bars.title(&mut scene, "Mean Comparison", 10.0);
    Ok(scene)
}

/// Product by segment counts; segments in sorted order.
fn product_segments(rng: &mut SmallRng) -> [[usize; 3]; 3] {
    // columns: Basic, Premium, Standard
    let mut table = [[0usize; 3]; 3];
    for row in table.iter_mut() {
        for _ in 0..100 {
            let u: f64 = rng.gen();
            let column = if u < 0.3 {
                1
            } else if u < 0.8 {
                2
            } else {
                0
            };
            row[column] += 1;
        }
    }
    table
}

pub fn categorical_relationships(rng: &mut SmallRng) -> Result<Scene> {
    let products = ["Product A", "Product B", "Product C"];
    let segments = ["Basic", "Premium", "Standard"];
    let colors = ["#3498db", "#2ecc71", "#e74c3c"];
    let table = product_segments(rng);
    let legend: Vec<(&str, &str)> = segments.iter().copied().zip(colors).collect();

    let (mut scene, panels) = canvas("Categorical vs Categorical Relationships", 14.0, 12.0, 2, 2);

    let tallest = table.iter().flatten().copied().max().unwrap_or(1) as f64;
    let grouped = panels[0].with_x_range(-0.6, 2.6).with_y_range(0.0, tallest * 1.15);
    for (i, row) in table.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            let at = i as f64 + (j as f64 - 1.0) * 0.25;
            grouped.vbar(&mut scene, at, 0.25, 0.0, count as f64).fill(colors[j]);
        }
    }
    grouped.legend(&mut scene, &legend);
    grouped.title(&mut scene, "Grouped Bar Chart", 11.0);

    let stacked = panels[1].with_x_range(-0.6, 2.6).with_y_range(0.0, 110.0);
    for (i, row) in table.iter().enumerate() {
        let mut base = 0.0;
        for (j, &count) in row.iter().enumerate() {
            let top = base + count as f64;
            stacked.vbar(&mut scene, i as f64, 0.5, base, top).fill(colors[j]);
            base = top;
        }
    }
    stacked.legend(&mut scene, &legend);
    stacked.title(&mut scene, "Stacked Bar Chart", 11.0);

    for panel in [&grouped, &stacked] {
        panel.category_labels(&mut scene, &products, 45.0);
        panel.y_axis(&mut scene, 5);
        panel.x_label(&mut scene, "Product");
        panel.y_label(&mut scene, "Count");
    }

    let counts: Vec<Vec<f64>> = table
        .iter()
        .map(|row| row.iter().map(|&c| c as f64).collect())
        .collect();
    let (lo, hi) = stats::min_max(&counts.concat()).unwrap_or((0.0, 1.0));
    panels[2].cells(
        &mut scene,
        &counts,
        |v| ylorrd(super::palette::normalize(v, lo, hi)),
        |v| Some(format!("{:.0}", v)),
    );
    panels[2].title(&mut scene, "Heatmap (Counts)", 11.0);

    let shares: Vec<Vec<f64>> = counts
        .iter()
        .map(|row| {
            let total: f64 = row.iter().sum();
            row.iter().map(|c| c / total.max(1.0)).collect()
        })
        .collect();
    panels[3].cells(&mut scene, &shares, blues, |v| Some(format!("{:.2}%", v * 100.0)));
    panels[3].title(&mut scene, "Heatmap (Proportions by Row)", 11.0);

    for panel in &panels[2..] {
        let (cw, ch) = (panel.w / 3.0, panel.h / 3.0);
        for (k, segment) in segments.iter().enumerate() {
            scene
                .text(panel.x + (k as f64 + 0.5) * cw, panel.y - 0.08, *segment)
                .size(8.0)
                .align(HAlign::Center, VAlign::Top);
        }
        for (k, product) in products.iter().enumerate() {
            scene
                .text(panel.x - 0.08, panel.y + panel.h - (k as f64 + 0.5) * ch, *product)
                .size(8.0)
                .align(HAlign::Right, VAlign::Center);
        }
        panel.x_label(&mut scene, "Customer Segment");
    }
    Ok(scene)
}

pub fn correlation_interpretation(rng: &mut SmallRng) -> Result<Scene> {
    let strengths = [
        (0.95, "Strong Positive\nr = 0.95"),
        (0.65, "Moderate Positive\nr = 0.65"),
        (0.25, "Weak Positive\nr = 0.25"),
        (0.0, "No Correlation\nr = 0.00"),
        (-0.25, "Weak Negative\nr = -0.25"),
        (-0.65, "Moderate Negative\nr = -0.65"),
        (-0.95, "Strong Negative\nr = -0.95"),
    ];
    let xs = stats::linspace(0.0, 10.0, 100);
    let (mut scene, panels) = canvas("Correlation Interpretation Guide", 15.0, 12.0, 3, 3);

    for ((r, title), panel) in strengths.iter().zip(&panels) {
        let noise = stats::normal(rng, 0.0, 1.0, xs.len())?;
        let ys: Vec<f64> = xs
            .iter()
            .zip(&noise)
            .map(|(x, e)| {
                let y = x + e * 5.0 * (1.0 - f64::abs(*r));
                if *r < 0.0 {
                    -y
                } else {
                    y
                }
            })
            .collect();
        let fitted = panel.fit_points(&xs, &ys, 0.05);
        fitted.scatter(&mut scene, &xs, &ys, 30.0, "#1f77b4", 0.6);
        let (slope, intercept) = stats::linear_fit(&xs, &ys);
        fitted.fit_line(&mut scene, slope, intercept);
        fitted.frame(&mut scene);
        fitted.title(&mut scene, title, 10.0).bold();
    }

    let curve_x = stats::linspace(-3.0, 3.0, 100);
    let noise = stats::normal(rng, 0.0, 2.0, curve_x.len())?;
    let curve_y: Vec<f64> = curve_x.iter().zip(&noise).map(|(x, e)| x * x + e).collect();
    let curve = panels[7].fit_points(&curve_x, &curve_y, 0.05);
    curve.scatter(&mut scene, &curve_x, &curve_y, 30.0, "purple", 0.6);
    curve.frame(&mut scene);
    curve
        .title(&mut scene, "Non-Linear\n(r ≈ 0, but strong relationship!)", 10.0)
        .bold();

    note_panel(
        &mut scene,
        &panels[8],
        "Interpretation Guidelines:",
        "|r| > 0.7: Strong\n0.4 < |r| < 0.7: Moderate\n0.2 < |r| < 0.4: Weak\n|r| < 0.2: Very weak",
        10.0,
    );
    scene
        .text(
            panels[8].x + 0.1,
            panels[8].y + panels[8].h * 0.3,
            "⚠ Correlation ≠ Causation\n⚠ Only measures LINEAR",
        )
        .size(9.0)
        .bold()
        .color("red")
        .align(HAlign::Left, VAlign::Top);
    Ok(scene)
}

pub fn pair_plot(rng: &mut SmallRng) -> Result<Scene> {
    let n = 150;
    let a: Vec<f64> = stats::normal(rng, 5.0, 2.0, n)?;
    let b_noise = stats::normal(rng, 0.0, 2.0, n)?;
    let c = stats::normal(rng, 3.0, 1.5, n)?;
    let t_noise = stats::normal(rng, 0.0, 3.0, n)?;
    let b: Vec<f64> = a.iter().zip(&b_noise).map(|(a, e)| a * 1.5 + e).collect();
    let target: Vec<f64> = (0..n).map(|i| a[i] * 2.0 + c[i] * 1.5 + t_noise[i]).collect();
    let columns = [("Feature_A", &a), ("Feature_B", &b), ("Feature_C", &c), ("Target", &target)];

    let mut scene = Scene::new(12.0, 12.0);
    heading(&mut scene, 6.0, 11.55, "Pair Plot: All Pairwise Relationships", 16.0);
    let panels = Panel::tiled(1.2, 1.0, 10.5, 10.0, 4, 4, 0.25, 0.25);

    for (i, (row_name, row)) in columns.iter().enumerate() {
        for (j, (col_name, col)) in columns.iter().enumerate() {
            let panel = panels[i * 4 + j];
            let panel = if i == j {
                let hist = Histogram::new(row, 15);
                let fitted = panel.fit_histogram(&hist);
                fitted.histogram(&mut scene, &hist, "steelblue");
                fitted
            } else {
                let fitted = panel.fit_points(col, row, 0.05);
                fitted.scatter(&mut scene, col, row, 20.0, "#1f77b4", 0.5);
                fitted
            };
            panel.frame(&mut scene);
            if i == 3 {
                panel.x_axis(&mut scene, 4);
                panel.x_label(&mut scene, col_name);
            }
            if j == 0 {
                panel.y_axis(&mut scene, 4);
                panel.y_label(&mut scene, row_name);
            }
        }
    }
    Ok(scene)
}

pub fn multivariate_encoding(rng: &mut SmallRng) -> Result<Scene> {
    let n = 200;
    let xs = stats::normal(rng, 0.0, 2.0, n)?;
    let ys = stats::normal(rng, 0.0, 2.0, n)?;
    let sizes = stats::uniform(rng, 20.0, 200.0, n);
    let shades = stats::uniform(rng, 0.0, 100.0, n);
    let groups: Vec<usize> = (0..n).map(|_| rng.gen_range(0..3)).collect();

    let (mut scene, panels) = canvas("Multivariate Visualization Techniques", 14.0, 12.0, 2, 2);
    let color_panel = with_colorbar_room(panels[0]).fit_points(&xs, &ys, 0.05);
    let size_panel = with_colorbar_room(panels[1]).fit_points(&xs, &ys, 0.05);
    let group_panel = panels[2].fit_points(&xs, &ys, 0.05);

    scatter_encoded(&mut scene, &color_panel, &xs, &ys, |_| 50.0, |i| viridis(shades[i] / 100.0), 0.6);
    colorbar(&mut scene, &color_panel, viridis, 0.0, 100.0, "Color Variable");
    color_panel.title(&mut scene, "Color Encoding\n(3 variables: x, y, color)", 10.0);

    scatter_encoded(&mut scene, &size_panel, &xs, &ys, |i| sizes[i], |i| plasma(shades[i] / 100.0), 0.6);
    colorbar(&mut scene, &size_panel, plasma, 0.0, 100.0, "Color Var");
    size_panel.title(&mut scene, "Color + Size Encoding\n(4 variables!)", 10.0);

    let group_colors = ["red", "green", "blue"];
    scatter_encoded(
        &mut scene,
        &group_panel,
        &xs,
        &ys,
        |_| 50.0,
        |i| crate::scene::paint(group_colors[groups[i]]),
        0.6,
    );
    group_panel.legend(&mut scene, &[("Category A", "red"), ("Category B", "green"), ("Category C", "blue")]);
    group_panel.title(&mut scene, "Category Encoding\n(3 variables: x, y, category)", 10.0);

    for panel in [&color_panel, &size_panel, &group_panel] {
        panel.axes(&mut scene, 5);
        panel.x_label(&mut scene, "Variable X");
        panel.y_label(&mut scene, "Variable Y");
    }

    note_panel(
        &mut scene,
        &panels[3],
        "Visual Encoding Channels:",
        "Position (x, y):     2 variables\nColor (hue):         1 variable (categorical/continuous)\nSize:                1 variable (continuous)\nShape:               1 variable (categorical, max 5-6)\nTransparency:        1 variable (continuous)\nFacets/subplots:     1-2 variables (categorical)\n\n⚠ Don't overload!\nLimit to 3-4 encoding channels max\nToo many = cognitive overload",
        8.0,
    );
    Ok(scene)
}

/// `rows × cols` missingness mask with random, blocked and periodic gaps.
fn missing_mask(rng: &mut SmallRng, rows: usize) -> Vec<[bool; 8]> {
    let mut mask = vec![[false; 8]; rows];
    let random_gaps = [(0, 15), (1, 20), (3, 25), (5, 30), (6, 10), (7, 35)];
    for (column, count) in random_gaps {
        for row in index::sample(rng, rows, count.min(rows)) {
            mask[row][column] = true;
        }
    }
    for row in mask.iter_mut().take(70.min(rows)).skip(50) {
        row[2] = true;
    }
    for row in mask.iter_mut().step_by(5) {
        row[4] = true;
    }
    mask
}

pub fn missing_data_visualization(rng: &mut SmallRng) -> Result<Scene> {
    let rows = 100;
    let mask = missing_mask(rng, rows);
    let names: Vec<String> = (1..=8).map(|i| format!("Var_{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let missing: Vec<usize> = (0..8).map(|c| mask.iter().filter(|r| r[c]).count()).collect();
    let pct: Vec<f64> = missing.iter().map(|&m| m as f64 / rows as f64 * 100.0).collect();

    let (mut scene, panels) = canvas("Visualizing Missing Data Patterns", 16.0, 10.6, 2, 3);
    let flag = |gap: bool| if gap { 1.0 } else { 0.0 };
    let state_color = |v: f64| crate::scene::paint(if v > 0.5 { "darkred" } else { "lightblue" });

    let pattern: Vec<Vec<f64>> = mask.iter().map(|r| r.iter().map(|&m| flag(m)).collect()).collect();
    panels[0].cells(&mut scene, &pattern, state_color, |_| None);
    panels[0].title(&mut scene, "Missing Data Pattern\n(Red = Missing)", 10.0);
    panels[0].x_label(&mut scene, "Variables");

    let bars = panels[1].with_x_range(0.0, 45.0).with_y_range(-0.6, 7.6);
    for (i, v) in pct.iter().enumerate() {
        bars.hbar(&mut scene, i as f64, 0.8, *v).fill("coral").stroke("black", 1.0);
        scene
            .text(bars.map_x(v + 1.0), bars.map_y(i as f64), format!("{:.1}%", v))
            .size(7.0)
            .va(VAlign::Center);
    }
    bars.category_y_labels(&mut scene, &name_refs);
    bars.x_axis(&mut scene, 5);
    bars.x_label(&mut scene, "Missing (%)");
    bars.title(&mut scene, "Missing Data by Variable", 10.0);

    let indicators: Vec<Vec<f64>> = (0..8)
        .map(|c| mask.iter().map(|r| flag(r[c])).collect())
        .collect();
    let correlations = stats::correlation_matrix(&indicators);
    panels[2].cells(&mut scene, &correlations, coolwarm, |v| Some(format!("{:.2}", v)));
    panels[2].title(&mut scene, "Missingness Correlation\n(Do variables miss together?)", 10.0);

    let per_row: Vec<usize> = mask.iter().map(|r| r.iter().filter(|m| **m).count()).collect();
    let mut tally = [0usize; 4];
    for &k in &per_row {
        tally[k.min(3)] += 1;
    }
    let tallest = tally.iter().copied().max().unwrap_or(1) as f64;
    let rows_panel = panels[3].with_x_range(0.0, 4.0).with_y_range(0.0, tallest * 1.1);
    for (k, &count) in tally.iter().enumerate() {
        rows_panel
            .vbar(&mut scene, k as f64 + 0.5, 1.0, 0.0, count as f64)
            .fill("steelblue")
            .alpha(0.7)
            .stroke("black", 0.5);
    }
    rows_panel.axes(&mut scene, 4);
    rows_panel.x_label(&mut scene, "Number of Missing Values per Row");
    rows_panel.y_label(&mut scene, "Count of Rows");
    rows_panel.title(&mut scene, "Missing Data per Row", 10.0);

    let first: Vec<Vec<f64>> = pattern.iter().take(30).cloned().collect();
    panels[4].cells(
        &mut scene,
        &first,
        |v| crate::scene::paint(if v > 0.5 { "red" } else { "lightblue" }),
        |_| None,
    );
    let col_w = panels[4].w / 8.0;
    for (i, name) in names.iter().enumerate() {
        scene
            .text(panels[4].x + (i as f64 + 0.5) * col_w, panels[4].y - 0.06, name.as_str())
            .size(7.0)
            .align(HAlign::Right, VAlign::Top)
            .rotate(45.0);
    }
    panels[4].y_label(&mut scene, "Rows");
    panels[4].title(&mut scene, "Missing Data Matrix\n(First 30 rows)", 10.0);

    let table = panels[5];
    let headers = ["Variable", "Missing_Count", "Missing_%"];
    let (cell_w, cell_h) = (table.w / 3.0, table.h / 9.0);
    for row in 0..9 {
        let y = table.y + table.h - (row as f64 + 1.0) * cell_h;
        for col in 0..3 {
            let text = match (row, col) {
                (0, c) => headers[c].to_string(),
                (r, 0) => names[r - 1].clone(),
                (r, 1) => missing[r - 1].to_string(),
                (r, _) => format!("{:.1}", pct[r - 1]),
            };
            let x = table.x + col as f64 * cell_w;
            scene.rect(x, y, cell_w, cell_h).fill("white").stroke("black", 0.8);
            scene
                .text(x + cell_w / 2.0, y + cell_h / 2.0, text)
                .size(8.0)
                .align(HAlign::Center, VAlign::Center)
                .z(1);
        }
    }
    table.title(&mut scene, "Missing Data Summary", 10.0);
    Ok(scene)
}

/// Each gap filled with the mean of its five nearest observed neighbours by
/// position.
fn neighbour_impute(values: &[Option<f64>]) -> Vec<f64> {
    let observed: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.unwrap_or_else(|| {
                let mut near: Vec<&(usize, f64)> = observed.iter().collect();
                near.sort_by_key(|(j, _)| j.abs_diff(i));
                let picked: Vec<f64> = near.iter().take(5).map(|(_, v)| *v).collect();
                stats::mean(&picked)
            })
        })
        .collect()
}

pub fn imputation_comparison(rng: &mut SmallRng) -> Result<Scene> {
    let original = stats::normal(rng, 50.0, 15.0, 300)?;
    let mut gappy: Vec<Option<f64>> = original.iter().copied().map(Some).collect();
    for i in index::sample(rng, original.len(), 60) {
        gappy[i] = None;
    }
    let observed: Vec<f64> = gappy.iter().flatten().copied().collect();
    let observed_mean = stats::mean(&observed);
    let (_, observed_median, _) = stats::quartiles(&observed);

    let fill_with = |value: f64| -> Vec<f64> { gappy.iter().map(|v| v.unwrap_or(value)).collect() };
    let by_mean = fill_with(observed_mean);
    let by_median = fill_with(observed_median);
    let by_sampling: Vec<f64> = gappy
        .iter()
        .map(|v| v.unwrap_or_else(|| observed.choose(rng).copied().unwrap_or(observed_mean)))
        .collect();
    let by_neighbours = neighbour_impute(&gappy);

    let (mut scene, panels) = canvas("Comparing Imputation Methods", 15.0, 10.6, 2, 3);
    let views = [
        (&original, "steelblue", format!("Original (Complete)\nMean: {:.1}", stats::mean(&original))),
        (
            &by_mean,
            "coral",
            format!("Mean Imputation\nMean: {:.1}\n⚠ Reduces variance", stats::mean(&by_mean)),
        ),
        (&by_median, "lightgreen", format!("Median Imputation\nMean: {:.1}", stats::mean(&by_median))),
        (
            &by_sampling,
            "plum",
            format!("Random Sampling\nMean: {:.1}\n✓ Preserves distribution", stats::mean(&by_sampling)),
        ),
        (
            &by_neighbours,
            "gold",
            format!("KNN-like Imputation\nMean: {:.1}\n✓ Uses local patterns", stats::mean(&by_neighbours)),
        ),
    ];
    for (i, (values, color, title)) in views.iter().enumerate() {
        let panel = hist_panel(&mut scene, panels[i], values, 30, color);
        panel.vline(&mut scene, stats::mean(values)).color("red").line_width(2.0).dashed();
        if i == 0 {
            panel.legend(&mut scene, &[("True mean", "red")]);
        }
        panel.title(&mut scene, title, 10.0);
    }

    let line = |name: &str, values: &[f64]| {
        format!("{:<15}{:.1} (Std: {:.1})", name, stats::mean(values), stats::pop_std_dev(values))
    };
    let summary = [
        "Method Comparison:".to_string(),
        String::new(),
        format!("Original Mean: {:.1}", stats::mean(&original)),
        format!("Original Std:  {:.1}", stats::pop_std_dev(&original)),
        String::new(),
        line("Mean Imp:", &by_mean),
        line("Median Imp:", &by_median),
        line("Random Imp:", &by_sampling),
        line("KNN Imp:", &by_neighbours),
        String::new(),
        "Best for distribution: Random".to_string(),
        "Best for relationships: KNN".to_string(),
        "Fastest: Mean/Median".to_string(),
    ]
    .join("\n");
    scene
        .text(panels[5].x + 0.1, panels[5].y + panels[5].h, summary)
        .size(9.0)
        .monospace()
        .align(HAlign::Left, VAlign::Top);
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
    fn test_hexbin_counts_every_point() {
        let mut scene = Scene::new(4.0, 4.0);
        let panel = Panel::new(0.5, 0.5, 3.0, 3.0).with_x_range(0.0, 1.0).with_y_range(0.0, 1.0);
        let xs = [0.1, 0.1, 0.1, 0.9];
        let ys = [0.1, 0.1, 0.1, 0.9];
        hexbin(&mut scene, &panel, &xs, &ys, 10, blues);
        let hexes: Vec<_> = scene
            .items()
            .iter()
            .filter(|i| matches!(&i.shape, Shape::Polygon { points } if points.len() == 6))
            .collect();
        assert_eq!(hexes.len(), 2);
        // the fuller cell is darkest
        let darkest = hexes
            .iter()
            .filter(|i| i.fill.as_ref().map(|c| c.to_rgba8()) == Some(blues(1.0).to_rgba8()))
            .count();
        assert_eq!(darkest, 1);
    }

    #[test]
    fn test_neighbour_impute_uses_nearby_values() {
        let values = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0), Some(200.0)];
        let filled = neighbour_impute(&values);
        assert_eq!(filled.len(), values.len());
        // neighbours at indices 1, 3, 0, 4 and 5
        assert!((filled[2] - 3.6).abs() < 1e-9);
        assert_eq!(filled[0], 1.0);
    }

    #[test]
    fn test_missing_mask_patterns() {
        let mask = missing_mask(&mut rng(), 100);
        let count = |c: usize| mask.iter().filter(|r| r[c]).count();
        assert_eq!(count(0), 15);
        assert_eq!(count(7), 35);
        assert_eq!(count(4), 20);
        assert!(mask[50..70].iter().all(|r| r[2]));
    }

    #[test]
    fn test_product_segments_sum_per_product() {
        let table = product_segments(&mut rng());
        for row in table {
            assert_eq!(row.iter().sum::<usize>(), 100);
            // Standard is the most likely segment
            assert!(row[2] > row[0]);
        }
    }

    #[test]
    fn test_skewness_titles_report_reduction() {
        let scene = skewness_transformations(&mut rng()).unwrap();
        let texts = scene.texts();
        assert!(texts.iter().any(|t| t.starts_with("Original\nSkewness: ")));
        assert!(texts.iter().any(|t| t.starts_with("Box-Cox Transform\nλ=")));
    }

    #[test]
    fn test_overplotting_sample_size() {
        let scene = overplotting_solutions(&mut rng()).unwrap();
        assert!(scene.texts().contains(&"✓ Random Sample\n(1000 of 5000 points)"));
    }

    #[test]
    fn test_pair_plot_diagonal_histograms() {
        let scene = pair_plot(&mut rng()).unwrap();
        let bars = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, Shape::Rect { .. }))
            .count();
        // 4 diagonal histograms of 15 bins plus 16 frames
        assert_eq!(bars, 4 * 15 + 16);
    }

    #[test]
    fn test_imputation_summary_lists_methods() {
        let scene = imputation_comparison(&mut rng()).unwrap();
        let summary = scene
            .texts()
            .into_iter()
            .find(|t| t.starts_with("Method Comparison:"))
            .unwrap();
        for method in ["Mean Imp:", "Median Imp:", "Random Imp:", "KNN Imp:"] {
            assert!(summary.contains(method));
        }
    }
}
