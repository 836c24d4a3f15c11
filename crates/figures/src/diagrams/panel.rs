//! Plot panels: a rectangular region of a scene with its own data ranges.

use crate::scene::{HAlign, Item, Scene, VAlign};
use crate::stats::{self, Histogram};
use csscolorparser::Color;

const AXIS_COLOR: &str = "#333333";
const TICK_LENGTH: f64 = 0.06;

/// A chart area placed at `(x, y, w, h)` in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Panel {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
    }

    pub fn with_x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = (lo, if hi > lo { hi } else { lo + 1.0 });
        self
    }

    pub fn with_y_range(mut self, lo: f64, hi: f64) -> Self {
        self.y_range = (lo, if hi > lo { hi } else { lo + 1.0 });
        self
    }

    pub fn map_x(&self, v: f64) -> f64 {
        self.x + (v - self.x_range.0) / (self.x_range.1 - self.x_range.0) * self.w
    }

    pub fn map_y(&self, v: f64) -> f64 {
        self.y + (v - self.y_range.0) / (self.y_range.1 - self.y_range.0) * self.h
    }

    pub fn map(&self, vx: f64, vy: f64) -> (f64, f64) {
        (self.map_x(vx), self.map_y(vy))
    }

    /// Bottom spine with ticks and tick labels.
    pub fn x_axis(&self, scene: &mut Scene, max_ticks: usize) {
        scene
            .line(self.x, self.y, self.x + self.w, self.y)
            .color(AXIS_COLOR)
            .line_width(1.0)
            .z(3);
        let ticks = nice_ticks(self.x_range.0, self.x_range.1, max_ticks);
        let step = tick_step(&ticks);
        for t in ticks {
            let tx = self.map_x(t);
            scene.line(tx, self.y, tx, self.y - TICK_LENGTH).color(AXIS_COLOR).z(3);
            scene
                .text(tx, self.y - TICK_LENGTH * 1.5, tick_label(t, step))
                .size(8.0)
                .color(AXIS_COLOR)
                .align(HAlign::Center, VAlign::Top)
                .z(3);
        }
    }

    /// Left spine with ticks and tick labels.
    pub fn y_axis(&self, scene: &mut Scene, max_ticks: usize) {
        scene
            .line(self.x, self.y, self.x, self.y + self.h)
            .color(AXIS_COLOR)
            .line_width(1.0)
            .z(3);
        let ticks = nice_ticks(self.y_range.0, self.y_range.1, max_ticks);
        let step = tick_step(&ticks);
        for t in ticks {
            let ty = self.map_y(t);
            scene.line(self.x, ty, self.x - TICK_LENGTH, ty).color(AXIS_COLOR).z(3);
            scene
                .text(self.x - TICK_LENGTH * 1.5, ty, tick_label(t, step))
                .size(8.0)
                .color(AXIS_COLOR)
                .align(HAlign::Right, VAlign::Center)
                .z(3);
        }
    }

    /// Light grid lines at the tick positions.
    pub fn grid(&self, scene: &mut Scene, max_ticks: usize) {
        for t in nice_ticks(self.x_range.0, self.x_range.1, max_ticks) {
            let tx = self.map_x(t);
            scene.line(tx, self.y, tx, self.y + self.h).color("#b0b0b0").alpha(0.3).z(-1);
        }
        for t in nice_ticks(self.y_range.0, self.y_range.1, max_ticks) {
            let ty = self.map_y(t);
            scene.line(self.x, ty, self.x + self.w, ty).color("#b0b0b0").alpha(0.3).z(-1);
        }
    }

    /// Centered title just above the panel; multi-line titles grow upward.
    pub fn title<'a>(&self, scene: &'a mut Scene, text: &str, size_pt: f64) -> &'a mut Item {
        scene
            .text(self.x + self.w / 2.0, self.y + self.h + 0.12, text)
            .size(size_pt)
            .align(HAlign::Center, VAlign::Bottom)
    }

    pub fn x_label(&self, scene: &mut Scene, text: &str) {
        scene
            .text(self.x + self.w / 2.0, self.y - 0.38, text)
            .size(10.0)
            .align(HAlign::Center, VAlign::Top);
    }

    pub fn y_label(&self, scene: &mut Scene, text: &str) {
        scene
            .text(self.x - 0.55, self.y + self.h / 2.0, text)
            .size(10.0)
            .align(HAlign::Center, VAlign::Bottom)
            .rotate(90.0);
    }

    /// Horizontal bar from zero to `value`, centered on `at` with the given
    /// thickness in data units.
    pub fn hbar<'a>(&self, scene: &'a mut Scene, at: f64, thickness: f64, value: f64) -> &'a mut Item {
        let x0 = self.map_x(0.0_f64.max(self.x_range.0));
        let y0 = self.map_y(at - thickness / 2.0);
        let y1 = self.map_y(at + thickness / 2.0);
        scene.rect(x0, y0, self.map_x(value) - x0, y1 - y0)
    }

    /// Filled histogram bars; the panel ranges should cover the histogram.
    pub fn histogram(&self, scene: &mut Scene, hist: &Histogram, color: &str) {
        for (i, &count) in hist.counts.iter().enumerate() {
            let x0 = self.map_x(hist.edges[i]);
            let x1 = self.map_x(hist.edges[i + 1]);
            let y0 = self.map_y(0.0);
            scene
                .rect(x0, y0, x1 - x0, self.map_y(count as f64) - y0)
                .fill(color)
                .alpha(0.7)
                .stroke("#000000", 0.5)
                .z(1);
        }
    }

    /// Panel fitted to a histogram with some headroom above the tallest bar.
    pub fn fit_histogram(self, hist: &Histogram) -> Self {
        let lo = hist.edges.first().copied().unwrap_or(0.0);
        let hi = hist.edges.last().copied().unwrap_or(1.0);
        self.with_x_range(lo, hi)
            .with_y_range(0.0, hist.max_count().max(1) as f64 * 1.05)
    }
}

impl Panel {
    /// `rows × cols` equally sized panels filling `(x, y, w, h)`, row-major
    /// from the top-left, with `gap_x`/`gap_y` between neighbours.
    pub fn tiled(x: f64, y: f64, w: f64, h: f64, rows: usize, cols: usize, gap_x: f64, gap_y: f64) -> Vec<Panel> {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let pw = (w - gap_x * (cols - 1) as f64) / cols as f64;
        let ph = (h - gap_y * (rows - 1) as f64) / rows as f64;
        let mut panels = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let px = x + col as f64 * (pw + gap_x);
                let py = y + (rows - 1 - row) as f64 * (ph + gap_y);
                panels.push(Panel::new(px, py, pw, ph));
            }
        }
        panels
    }

    /// Ranges covering the points with a fractional margin on every side.
    pub fn fit_points(self, xs: &[f64], ys: &[f64], margin: f64) -> Self {
        let (x0, x1) = stats::min_max(xs).unwrap_or((0.0, 1.0));
        let (y0, y1) = stats::min_max(ys).unwrap_or((0.0, 1.0));
        let (dx, dy) = ((x1 - x0) * margin, (y1 - y0) * margin);
        self.with_x_range(x0 - dx, x1 + dx).with_y_range(y0 - dy, y1 + dy)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x - 1e-9 && px <= self.x + self.w + 1e-9 && py >= self.y - 1e-9 && py <= self.y + self.h + 1e-9
    }

    /// Both spines with ticks.
    pub fn axes(&self, scene: &mut Scene, max_ticks: usize) {
        self.x_axis(scene, max_ticks);
        self.y_axis(scene, max_ticks);
    }

    /// Plain rectangle around the panel, for axes without ticks.
    pub fn frame(&self, scene: &mut Scene) {
        scene
            .rect(self.x, self.y, self.w, self.h)
            .no_fill()
            .stroke(AXIS_COLOR, 0.8)
            .z(3);
    }

    /// Fill the plotting area, behind everything else in it.
    pub fn background(&self, scene: &mut Scene, css: &str) {
        scene.rect(self.x, self.y, self.w, self.h).fill(css).z(-2);
    }

    /// Scatter markers; points outside the ranges are dropped.
    pub fn scatter(&self, scene: &mut Scene, xs: &[f64], ys: &[f64], area_pt2: f64, color: &str, alpha: f64) {
        for (&vx, &vy) in xs.iter().zip(ys) {
            let (px, py) = self.map(vx, vy);
            if self.contains(px, py) {
                scene.marker(px, py, area_pt2).fill(color).alpha(alpha).z(2);
            }
        }
    }

    /// Connected line through the points.
    pub fn series<'a>(&self, scene: &'a mut Scene, xs: &[f64], ys: &[f64]) -> &'a mut Item {
        let points = xs.iter().zip(ys).map(|(&vx, &vy)| self.map(vx, vy)).collect();
        scene.polyline(points).line_width(2.0).z(2)
    }

    /// Straight fitted line across the x range.
    pub fn fit_line<'a>(&self, scene: &'a mut Scene, slope: f64, intercept: f64) -> &'a mut Item {
        let (lo, hi) = self.x_range;
        let ys = [slope * lo + intercept, slope * hi + intercept];
        let (y_lo, y_hi) = self.y_range;
        let clamp = |v: f64| v.clamp(y_lo, y_hi);
        let (x0, y0) = self.map(lo, clamp(ys[0]));
        let (x1, y1) = self.map(hi, clamp(ys[1]));
        scene.line(x0, y0, x1, y1).color("red").line_width(2.0).dashed().z(3)
    }

    /// Vertical reference line at data `x`.
    pub fn vline<'a>(&self, scene: &'a mut Scene, vx: f64) -> &'a mut Item {
        let px = self.map_x(vx);
        scene.line(px, self.y, px, self.y + self.h).line_width(1.5).z(3)
    }

    /// Horizontal reference line at data `y`.
    pub fn hline<'a>(&self, scene: &'a mut Scene, vy: f64) -> &'a mut Item {
        let py = self.map_y(vy);
        scene.line(self.x, py, self.x + self.w, py).line_width(1.5).z(3)
    }

    /// Vertical bar from `base` to `value`, centered on `at`.
    pub fn vbar<'a>(&self, scene: &'a mut Scene, at: f64, width: f64, base: f64, value: f64) -> &'a mut Item {
        let x0 = self.map_x(at - width / 2.0);
        let x1 = self.map_x(at + width / 2.0);
        let (lo, hi) = if value >= base { (base, value) } else { (value, base) };
        let y0 = self.map_y(lo);
        scene.rect(x0, y0, x1 - x0, self.map_y(hi) - y0).z(1)
    }

    /// Horizontal bar from zero, negative values extend left.
    pub fn hbar_signed<'a>(&self, scene: &'a mut Scene, at: f64, thickness: f64, value: f64) -> &'a mut Item {
        let zero = self.map_x(0.0);
        let end = self.map_x(value);
        let y0 = self.map_y(at - thickness / 2.0);
        let y1 = self.map_y(at + thickness / 2.0);
        scene.rect(zero.min(end), y0, (end - zero).abs(), y1 - y0).z(1)
    }

    /// Box-and-whisker plot at `at`, whiskers to the last points inside
    /// the Tukey fences, points beyond them drawn as fliers.
    pub fn boxplot(&self, scene: &mut Scene, at: f64, width: f64, values: &[f64], color: &str) {
        if values.is_empty() {
            return;
        }
        let (q1, median, q3) = stats::quartiles(values);
        let (lo_fence, hi_fence) = stats::iqr_bounds(values);
        let inside = values.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence);
        let (lo_whisker, hi_whisker) = inside.fold((q1, q3), |(lo, hi), v| (lo.min(v), hi.max(v)));

        self.vbar(scene, at, width, q1, q3).fill(color).alpha(0.8).stroke("#000000", 1.0);
        let half = width / 2.0;
        let (mx0, my) = self.map(at - half, median);
        let mx1 = self.map_x(at + half);
        scene.line(mx0, my, mx1, my).color("#ff7f0e").line_width(2.0).z(3);

        let cx = self.map_x(at);
        let cap0 = self.map_x(at - half / 2.0);
        let cap1 = self.map_x(at + half / 2.0);
        for (from, to) in [(q1, lo_whisker), (q3, hi_whisker)] {
            let (y0, y1) = (self.map_y(from), self.map_y(to));
            scene.line(cx, y0, cx, y1).color("#000000").line_width(1.0).z(2);
            scene.line(cap0, y1, cap1, y1).color("#000000").line_width(1.0).z(2);
        }
        for &v in values.iter().filter(|v| **v < lo_fence || **v > hi_fence) {
            let py = self.map_y(v);
            if self.contains(cx, py) {
                scene.marker(cx, py, 16.0).no_fill().stroke("#000000", 0.8).z(2);
            }
        }
    }

    /// Mirrored kernel density outline at `at`; `half_width` is the widest
    /// point in data units.
    pub fn violin(&self, scene: &mut Scene, at: f64, half_width: f64, values: &[f64], color: &str) {
        let Some((lo, hi)) = stats::min_max(values) else {
            return;
        };
        let grid = stats::linspace(lo, hi, 80);
        let density = stats::kde(values, &grid);
        let peak = density.iter().copied().fold(0.0_f64, f64::max).max(1e-12);
        let mut points: Vec<(f64, f64)> = grid
            .iter()
            .zip(&density)
            .map(|(&v, &d)| self.map(at + d / peak * half_width, v))
            .collect();
        points.extend(
            grid.iter()
                .zip(&density)
                .rev()
                .map(|(&v, &d)| self.map(at - d / peak * half_width, v)),
        );
        scene.polygon(points).fill(color).alpha(0.5).stroke(color, 1.0).z(1);

        let (_, median, _) = stats::quartiles(values);
        let (x0, y0) = self.map(at - half_width * 0.4, median);
        scene.line(x0, y0, self.map_x(at + half_width * 0.4), y0).color("#000000").line_width(1.5).z(2);
        let (x0, y0) = self.map(at, lo);
        scene.line(x0, y0, x0, self.map_y(hi)).color("#000000").line_width(0.8).z(2);
    }

    /// Density curve with a translucent fill down to zero.
    pub fn density(&self, scene: &mut Scene, xs: &[f64], ds: &[f64], color: &str) {
        let mut area: Vec<(f64, f64)> = xs.iter().zip(ds).map(|(&vx, &d)| self.map(vx, d)).collect();
        if let (Some(first), Some(last)) = (xs.first(), xs.last()) {
            area.push(self.map(*last, 0.0));
            area.push(self.map(*first, 0.0));
        }
        scene.polygon(area).fill(color).alpha(0.25).z(1);
        self.series(scene, xs, ds).color(color);
    }

    /// Category names under positions `0..labels.len()`.
    pub fn category_labels(&self, scene: &mut Scene, labels: &[&str], rotation: f64) {
        for (i, label) in labels.iter().enumerate() {
            let px = self.map_x(i as f64);
            let item = scene.text(px, self.y - TICK_LENGTH * 1.5, *label).size(8.0).color(AXIS_COLOR);
            if rotation == 0.0 {
                item.align(HAlign::Center, VAlign::Top);
            } else {
                item.align(HAlign::Right, VAlign::Top).rotate(rotation);
            }
        }
        scene
            .line(self.x, self.y, self.x + self.w, self.y)
            .color(AXIS_COLOR)
            .line_width(1.0)
            .z(3);
    }

    /// Category names beside positions `0..labels.len()` on the y axis.
    pub fn category_y_labels(&self, scene: &mut Scene, labels: &[&str]) {
        for (i, label) in labels.iter().enumerate() {
            scene
                .text(self.x - TICK_LENGTH * 1.5, self.map_y(i as f64), *label)
                .size(8.0)
                .color(AXIS_COLOR)
                .align(HAlign::Right, VAlign::Center);
        }
        scene
            .line(self.x, self.y, self.x, self.y + self.h)
            .color(AXIS_COLOR)
            .line_width(1.0)
            .z(3);
    }

    /// Colour swatches with labels in the top-right corner.
    pub fn legend(&self, scene: &mut Scene, entries: &[(&str, &str)]) {
        self.legend_at(scene, self.x + self.w - 0.08, self.y + self.h - 0.08, entries);
    }

    /// Legend whose top-right corner sits at `(right, top)`.
    pub fn legend_at(&self, scene: &mut Scene, right: f64, top: f64, entries: &[(&str, &str)]) {
        let row = 0.2;
        let longest = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) as f64;
        let width = 0.35 + longest * 0.065;
        let left = right - width;
        scene
            .rect(left, top - row * entries.len() as f64 - 0.06, width, row * entries.len() as f64 + 0.06)
            .fill("white")
            .alpha(0.85)
            .stroke("#cccccc", 0.6)
            .z(6);
        for (i, (label, color)) in entries.iter().enumerate() {
            let cy = top - 0.03 - row * (i as f64 + 0.5);
            scene.rect(left + 0.06, cy - 0.05, 0.16, 0.1).fill(color).z(7);
            scene
                .text(left + 0.28, cy, *label)
                .size(7.5)
                .va(VAlign::Center)
                .z(7);
        }
    }

    /// Colour grid for `matrix`, row 0 at the top; `label` annotates cells.
    pub fn cells(
        &self,
        scene: &mut Scene,
        matrix: &[Vec<f64>],
        color: impl Fn(f64) -> Color,
        label: impl Fn(f64) -> Option<String>,
    ) {
        let rows = matrix.len();
        let cols = matrix.iter().map(Vec::len).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return;
        }
        let (cw, ch) = (self.w / cols as f64, self.h / rows as f64);
        for (i, row) in matrix.iter().enumerate() {
            let cy = self.y + (rows - 1 - i) as f64 * ch;
            for (j, &v) in row.iter().enumerate() {
                let cx = self.x + j as f64 * cw;
                scene.rect(cx, cy, cw, ch).fill_color(color(v)).z(1);
                if let Some(text) = label(v) {
                    scene
                        .text(cx + cw / 2.0, cy + ch / 2.0, text)
                        .size(8.0)
                        .align(HAlign::Center, VAlign::Center)
                        .z(2);
                }
            }
        }
    }
}

/// Pie wedges centred on `(cx, cy)`, starting at `start_deg` and running
/// clockwise. Returns the mid-angle of each wedge in degrees.
pub fn pie(scene: &mut Scene, cx: f64, cy: f64, r: f64, values: &[f64], colors: &[&str], start_deg: f64) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = start_deg;
    let mut mids = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        let sweep = v / total * 360.0;
        let steps = (sweep / 4.0).ceil().max(2.0) as usize;
        let mut points = vec![(cx, cy)];
        points.extend((0..=steps).map(|k| {
            let a = (angle - sweep * k as f64 / steps as f64).to_radians();
            (cx + r * a.cos(), cy + r * a.sin())
        }));
        let color = colors.get(i % colors.len().max(1)).copied().unwrap_or("#888888");
        scene.polygon(points).fill(color).stroke("white", 1.0).z(1);
        mids.push(angle - sweep / 2.0);
        angle -= sweep;
    }
    mids
}

/// Round tick positions covering `[lo, hi]`, at most about `max_ticks`.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    if !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
        return vec![lo];
    }
    let raw = (hi - lo) / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        r if r <= 1.0 => 1.0,
        r if r <= 2.0 => 2.0,
        r if r <= 5.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let mut ticks = Vec::new();
    let mut t = (lo / step).ceil() * step;
    while t <= hi + step * 1e-9 {
        ticks.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
        t += step;
    }
    ticks
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Tick label with just enough decimals for the step.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()).max(0.0) as usize
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        let panel = Panel::new(1.0, 2.0, 4.0, 2.0)
            .with_x_range(0.0, 100.0)
            .with_y_range(-1.0, 1.0);
        assert_eq!(panel.map(0.0, -1.0), (1.0, 2.0));
        assert_eq!(panel.map(100.0, 1.0), (5.0, 4.0));
        assert_eq!(panel.map_x(50.0), 3.0);
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        let panel = Panel::new(0.0, 0.0, 1.0, 1.0).with_x_range(3.0, 3.0);
        assert_eq!(panel.x_range, (3.0, 4.0));
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 4), vec![0.0, 0.5, 1.0]);
        assert_eq!(nice_ticks(-3.2, 3.2, 6), vec![-2.0, 0.0, 2.0]);
        assert_eq!(nice_ticks(2.0, 2.0, 5), vec![2.0]);
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(20.0, 20.0), "20");
        assert_eq!(tick_label(0.5, 0.5), "0.5");
        assert_eq!(tick_label(0.25, 0.05), "0.25");
    }

    #[test]
    fn test_histogram_bars_fill_panel() {
        let hist = Histogram::new(&[0.0, 1.0, 1.0, 2.0], 2);
        let panel = Panel::new(1.0, 1.0, 4.0, 3.0).fit_histogram(&hist);
        let mut scene = Scene::new(6.0, 5.0);
        panel.histogram(&mut scene, &hist, "steelblue");
        assert_eq!(scene.len(), 2);
        let (x0, y0, x1, y1) = scene.items()[1].shape.bounds();
        assert!((x0 - 3.0).abs() < 1e-9 && (x1 - 5.0).abs() < 1e-9);
        assert!((y0 - 1.0).abs() < 1e-9 && y1 < 4.0);
    }

    #[test]
    fn test_grid_layout() {
        let panels = Panel::tiled(0.0, 0.0, 10.0, 5.0, 2, 3, 1.0, 1.0);
        assert_eq!(panels.len(), 6);
        // first panel is top-left
        assert_eq!((panels[0].x, panels[0].y), (0.0, 3.0));
        assert!((panels[5].x - 22.0 / 3.0).abs() < 1e-9);
        assert_eq!(panels[5].y, 0.0);
        assert!((panels[0].w - 8.0 / 3.0).abs() < 1e-9);
        assert!((panels[0].h - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_boxplot_flags_fliers() {
        let panel = Panel::new(0.0, 0.0, 2.0, 4.0)
            .with_x_range(-1.0, 1.0)
            .with_y_range(0.0, 120.0);
        let mut scene = Scene::new(2.0, 4.0);
        let mut values: Vec<f64> = (1..=20).map(f64::from).collect();
        values.push(100.0);
        panel.boxplot(&mut scene, 0.0, 0.6, &values, "#cccccc");
        let fliers = scene
            .items()
            .iter()
            .filter(|i| matches!(i.shape, crate::scene::Shape::Marker { .. }))
            .count();
        assert_eq!(fliers, 1);
    }

    #[test]
    fn test_pie_wedges_cover_circle() {
        let mut scene = Scene::new(4.0, 4.0);
        let mids = pie(&mut scene, 2.0, 2.0, 1.0, &[30.0, 70.0], &["#ccc", "#2E86AB"], 90.0);
        assert_eq!(scene.len(), 2);
        assert!((mids[0] - 36.0).abs() < 1e-9);
        assert!((mids[1] + 144.0).abs() < 1e-9);
        assert!(scene.within_bounds(0.0));
    }

    #[test]
    fn test_scatter_drops_points_outside() {
        let panel = Panel::new(1.0, 1.0, 2.0, 2.0);
        let mut scene = Scene::new(4.0, 4.0);
        panel.scatter(&mut scene, &[0.5, 2.0], &[0.5, 0.5], 10.0, "red", 1.0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_hbar() {
        let panel = Panel::new(2.0, 0.0, 5.0, 7.0)
            .with_x_range(0.0, 100.0)
            .with_y_range(-0.5, 6.5);
        let mut scene = Scene::new(10.0, 8.0);
        panel.hbar(&mut scene, 6.0, 0.8, 50.0);
        let (x0, y0, x1, y1) = scene.items()[0].shape.bounds();
        assert!((x0 - 2.0).abs() < 1e-9 && (x1 - 4.5).abs() < 1e-9);
        assert!((y0 - 6.1).abs() < 1e-9 && (y1 - 6.9).abs() < 1e-9);
    }
}
