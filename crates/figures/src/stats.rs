//! Small statistics toolkit for synthetic figures and datasets.

use deck_core::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Exp, LogNormal, Normal, Pareto, Uniform};

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// The last bin is closed on the right, so the maximum is counted.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = min_max(values).unwrap_or((0.0, 1.0));
        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
        let width = (hi - lo) / bins as f64;

        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self { edges, counts }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Pearson correlation coefficient; 0 when either series is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let (mx, my) = (mean(xs), mean(ys));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    sxy / (sxx * syy).sqrt()
}

/// Pairwise Pearson correlations of the given columns.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    columns
        .iter()
        .enumerate()
        .map(|(i, a)| {
            columns
                .iter()
                .enumerate()
                .map(|(j, b)| if i == j { 1.0 } else { pearson(a, b) })
                .collect()
        })
        .collect()
}

/// Least-squares line `y = slope * x + intercept`.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let (mx, my) = (mean(xs), mean(ys));
    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    if sxx == 0.0 {
        return (0.0, my);
    }
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let slope = sxy / sxx;
    (slope, my - slope * mx)
}

/// Linearly interpolated quantile, `q` in `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, q)
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
        }
    }
}

/// First quartile, median and third quartile.
pub fn quartiles(values: &[f64]) -> (f64, f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    (
        quantile_sorted(&sorted, 0.25),
        quantile_sorted(&sorted, 0.5),
        quantile_sorted(&sorted, 0.75),
    )
}

/// Tukey fences `(Q1 - 1.5 IQR, Q3 + 1.5 IQR)`.
pub fn iqr_bounds(values: &[f64]) -> (f64, f64) {
    let (q1, _, q3) = quartiles(values);
    let iqr = q3 - q1;
    (q1 - 1.5 * iqr, q3 + 1.5 * iqr)
}

/// Population standard deviation (n denominator).
pub fn pop_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Fisher-Pearson skewness coefficient, biased like the common default.
pub fn skewness(values: &[f64]) -> f64 {
    let sd = pop_std_dev(values);
    if sd == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| ((v - m) / sd).powi(3)).sum::<f64>() / values.len() as f64
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated at `at`.
pub fn kde(values: &[f64], at: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let sd = std_dev(values);
    if values.is_empty() || sd == 0.0 {
        return vec![0.0; at.len()];
    }
    let bw = sd * n.powf(-0.2);
    let norm = 1.0 / (n * bw * (2.0 * std::f64::consts::PI).sqrt());
    at.iter()
        .map(|x| {
            values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => (0..n).map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64).collect(),
    }
}

/// Sorted values paired with their cumulative fraction.
pub fn ecdf(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, (i + 1) as f64 / n))
        .collect()
}

/// Inverse of the standard normal CDF (Acklam's rational approximation).
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e1,
        2.209460984245205e2,
        -2.759285104469687e2,
        1.383577518672690e2,
        -3.066479806614716e1,
        2.506628277459239,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e1,
        1.615858368580409e2,
        -1.556989798598866e2,
        6.680131188771972e1,
        -1.328068155288572e1,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-3,
        -3.223964580411365e-1,
        -2.400758277161838,
        -2.549732539343734,
        4.374664141464968,
        2.938163982698783,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-3,
        3.224671290700398e-1,
        2.445134137142996,
        3.754408661907416,
    ];
    let p = p.clamp(1e-12, 1.0 - 1e-12);
    let low = 0.02425;
    if p < low {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - low {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -normal_quantile(1.0 - p)
    }
}

/// Normal probability plot points: theoretical quantile against ordered value.
pub fn qq_points(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, v)| (normal_quantile((i as f64 + 0.625) / (n + 0.25)), v))
        .collect()
}

fn boxcox_with(values: &[f64], lambda: f64) -> Vec<f64> {
    values
        .iter()
        .map(|v| {
            if lambda.abs() < 1e-9 {
                v.ln()
            } else {
                (v.powf(lambda) - 1.0) / lambda
            }
        })
        .collect()
}

fn boxcox_log_likelihood(values: &[f64], lambda: f64) -> f64 {
    let n = values.len() as f64;
    let transformed = boxcox_with(values, lambda);
    let var = pop_std_dev(&transformed).powi(2);
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    -n / 2.0 * var.ln() + (lambda - 1.0) * log_sum
}

/// Box-Cox transform of positive data, with lambda chosen by maximum
/// likelihood over `[-2, 2]`.
pub fn boxcox(values: &[f64]) -> Result<(Vec<f64>, f64)> {
    if values.iter().any(|v| *v <= 0.0) {
        return Err(Error::ConfigError("Box-Cox needs strictly positive data".to_string()));
    }
    let golden = (5f64.sqrt() - 1.0) / 2.0;
    let (mut lo, mut hi) = (-2.0_f64, 2.0_f64);
    for _ in 0..80 {
        let a = hi - golden * (hi - lo);
        let b = lo + golden * (hi - lo);
        if boxcox_log_likelihood(values, a) < boxcox_log_likelihood(values, b) {
            lo = a;
        } else {
            hi = b;
        }
    }
    let lambda = (lo + hi) / 2.0;
    Ok((boxcox_with(values, lambda), lambda))
}

fn draw<D: Distribution<f64>, R: Rng>(dist: D, rng: &mut R, n: usize) -> Vec<f64> {
    dist.sample_iter(rng).take(n).collect()
}

pub fn normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64, n: usize) -> Result<Vec<f64>> {
    let dist = Normal::new(mean, std_dev)
        .map_err(|e| Error::ConfigError(format!("Invalid normal parameters: {}", e)))?;
    Ok(draw(dist, rng, n))
}

/// Exponential samples with the given mean (scale).
pub fn exponential<R: Rng>(rng: &mut R, scale: f64, n: usize) -> Result<Vec<f64>> {
    let dist = Exp::new(1.0 / scale)
        .map_err(|e| Error::ConfigError(format!("Invalid exponential scale: {}", e)))?;
    Ok(draw(dist, rng, n))
}

pub fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64, n: usize) -> Vec<f64> {
    draw(Uniform::new(low, high), rng, n)
}

pub fn lognormal<R: Rng>(rng: &mut R, mu: f64, sigma: f64, n: usize) -> Result<Vec<f64>> {
    let dist = LogNormal::new(mu, sigma)
        .map_err(|e| Error::ConfigError(format!("Invalid lognormal parameters: {}", e)))?;
    Ok(draw(dist, rng, n))
}

/// Lomax (Pareto II) samples starting at zero, a heavy right tail.
pub fn pareto<R: Rng>(rng: &mut R, shape: f64, n: usize) -> Result<Vec<f64>> {
    let dist = Pareto::new(1.0, shape)
        .map_err(|e| Error::ConfigError(format!("Invalid Pareto shape: {}", e)))?;
    Ok(draw(dist, rng, n).into_iter().map(|v| v - 1.0).collect())
}

/// Equal mixture of two normals, for bimodal shapes.
pub fn bimodal<R: Rng>(rng: &mut R, left: f64, right: f64, std_dev: f64, n: usize) -> Result<Vec<f64>> {
    let mut values = normal(rng, left, std_dev, n / 2)?;
    values.extend(normal(rng, right, std_dev, n - n / 2)?);
    Ok(values)
}

/// Clamp and round to `decimals` places, the way exported columns are tidied.
pub fn tidy(value: f64, lo: f64, hi: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value.clamp(lo, hi) * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_histogram_counts_everything() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0, 2.0];
        let hist = Histogram::new(&values, 4);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.counts, vec![1, 1, 1, 3]);
        assert_eq!(hist.total(), values.len());
        assert_eq!(hist.max_count(), 3);
        assert!((hist.bin_width() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_input() {
        let hist = Histogram::new(&[3.0, 3.0, 3.0], 5);
        assert_eq!(hist.total(), 3);
        assert!(hist.edges[0] < 3.0 && *hist.edges.last().unwrap() > 3.0);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert!((std_dev(&values) - 2.138_089_935).abs() < 1e-6);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[1.0]), 0.0);
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&xs, &[1.0, 1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_correlation_matrix_is_symmetric() {
        let cols = vec![vec![1.0, 2.0, 3.0], vec![3.0, 1.0, 2.0], vec![1.0, 3.0, 2.0]];
        let m = correlation_matrix(&cols);
        for i in 0..3 {
            assert_eq!(m[i][i], 1.0);
            for j in 0..3 {
                assert!((m[i][j] - m[j][i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_linear_fit() {
        let (slope, intercept) = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]);
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let (q1, median, q3) = quartiles(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        assert_eq!((q1, median, q3), (2.0, 3.0, 4.0));
        assert!((quantile(&[1.0, 2.0, 3.0, 4.0], 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_samplers_are_seeded() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(normal(&mut a, 0.0, 1.0, 10).unwrap(), normal(&mut b, 0.0, 1.0, 10).unwrap());

        let mut rng = SmallRng::seed_from_u64(7);
        let exp = exponential(&mut rng, 2.0, 2000).unwrap();
        assert!(exp.iter().all(|v| *v >= 0.0));
        assert!((mean(&exp) - 2.0).abs() < 0.3);
        assert!(pareto(&mut rng, 1.5, 100).unwrap().iter().all(|v| *v >= 0.0));
        assert!(uniform(&mut rng, 0.0, 10.0, 100).iter().all(|v| (0.0..10.0).contains(v)));
        assert_eq!(bimodal(&mut rng, -2.0, 2.0, 0.5, 101).unwrap().len(), 101);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(normal(&mut rng, 0.0, -1.0, 5).is_err());
        assert!(pareto(&mut rng, 0.0, 5).is_err());
    }

    #[test]
    fn test_skewness_sign() {
        assert!(skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]) > 1.0);
        assert!(skewness(&[-10.0, -2.0, -1.0, -1.0, -1.0]) < -1.0);
        assert!(skewness(&[1.0, 2.0, 3.0]).abs() < 1e-12);
        assert_eq!(skewness(&[4.0, 4.0]), 0.0);
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let values = normal(&mut rng, 0.0, 1.0, 500).unwrap();
        let grid = linspace(-6.0, 6.0, 601);
        let step = grid[1] - grid[0];
        let area: f64 = kde(&values, &grid).iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 0.01, "{}", area);
    }

    #[test]
    fn test_ecdf_and_linspace() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(ecdf(&[3.0, 1.0]), vec![(1.0, 0.5), (3.0, 1.0)]);
    }

    #[test]
    fn test_normal_quantile() {
        assert!(normal_quantile(0.5).abs() < 1e-9);
        assert!((normal_quantile(0.975) - 1.959964).abs() < 1e-5);
        assert!((normal_quantile(0.01) + 2.326348).abs() < 1e-5);
    }

    #[test]
    fn test_boxcox_reduces_skew() {
        let mut rng = SmallRng::seed_from_u64(42);
        let values: Vec<f64> = exponential(&mut rng, 2.0, 1000)
            .unwrap()
            .into_iter()
            .map(|v| v + 1.0)
            .collect();
        let (transformed, lambda) = boxcox(&values).unwrap();
        assert!(lambda < 1.0 && lambda > -2.0);
        assert!(skewness(&transformed).abs() < skewness(&values).abs() / 2.0);
        assert!(boxcox(&[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_iqr_bounds() {
        let (lo, hi) = iqr_bounds(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!((lo, hi), (-1.0, 7.0));
    }

    #[test]
    fn test_tidy() {
        assert_eq!(tidy(101.26, 40.0, 100.0, 1), 100.0);
        assert_eq!(tidy(75.26, 40.0, 100.0, 1), 75.3);
    }
}
