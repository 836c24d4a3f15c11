//! Colour maps for heatmaps and colour-encoded scatters.

use crate::scene::{mix, paint};
use csscolorparser::Color;

const VIRIDIS: [&str; 5] = ["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"];
const PLASMA: [&str; 5] = ["#0d0887", "#7e03a8", "#cc4778", "#f89540", "#f0f921"];
const BLUES: [&str; 5] = ["#f7fbff", "#c6dbef", "#6baed6", "#2171b5", "#08306b"];
const JET: [&str; 7] = ["#00007f", "#0000ff", "#00ffff", "#7fff7f", "#ffff00", "#ff0000", "#7f0000"];
const RDBU_R: [&str; 5] = ["#053061", "#4393c3", "#f7f7f7", "#d6604d", "#67001f"];
const YLORRD: [&str; 5] = ["#ffffcc", "#fed976", "#fd8d3c", "#e31a1c", "#800026"];

/// Twelve soft qualitative colours.
pub const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#d9d9d9",
    "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Default categorical cycle.
pub const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf",
];

/// Piecewise-linear ramp through evenly spaced stops, `t` in `[0, 1]`.
fn ramp(stops: &[&str], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let last = stops.len().saturating_sub(1);
    if last == 0 {
        return paint(stops.first().copied().unwrap_or("#000000"));
    }
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last - 1);
    mix(&paint(stops[i]), &paint(stops[i + 1]), pos - i as f64)
}

pub fn viridis(t: f64) -> Color {
    ramp(&VIRIDIS, t)
}

pub fn plasma(t: f64) -> Color {
    ramp(&PLASMA, t)
}

pub fn blues(t: f64) -> Color {
    ramp(&BLUES, t)
}

pub fn jet(t: f64) -> Color {
    ramp(&JET, t)
}

pub fn rdbu_r(t: f64) -> Color {
    ramp(&RDBU_R, t)
}

pub fn ylorrd(t: f64) -> Color {
    ramp(&YLORRD, t)
}

pub fn gray(t: f64) -> Color {
    ramp(&["#000000", "#ffffff"], t)
}

/// Diverging blue, grey, red map for `r` in `[-1, 1]`.
pub fn coolwarm(r: f64) -> Color {
    ramp(&["#3b4cc0", "#dddddd", "#b40426"], (r + 1.0) / 2.0)
}

/// Position of `v` within `[lo, hi]`, clamped to `[0, 1]`.
pub fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(viridis(0.0).to_rgba8(), paint("#440154").to_rgba8());
        assert_eq!(viridis(1.0).to_rgba8(), paint("#fde725").to_rgba8());
        assert_eq!(jet(0.5).to_rgba8(), paint("#7fff7f").to_rgba8());
        assert_eq!(gray(f64::NAN).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_coolwarm_ends() {
        assert_eq!(coolwarm(-1.0).to_rgba8(), paint("#3b4cc0").to_rgba8());
        assert_eq!(coolwarm(0.0).to_rgba8(), paint("#dddddd").to_rgba8());
        assert_eq!(coolwarm(1.0).to_rgba8(), paint("#b40426").to_rgba8());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(15.0, -10.0, 40.0), 0.5);
        assert_eq!(normalize(90.0, -10.0, 40.0), 1.0);
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
    }
}
