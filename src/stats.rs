//! Aggregate statistics over load series.
//!
//! Pure, total functions over fully-populated in-memory data. Every
//! statistic is recomputed from scratch per invocation; nothing is cached.

use std::cmp::Ordering;
use std::fmt;

/// Error computing a statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// The input series has no points.
    EmptySeries,
    /// A denominator collapsed to zero; the named statistic is undefined.
    UndefinedStatistic(&'static str),
    /// Percentile outside `0..=100`.
    InvalidPercentile(f32),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySeries => write!(f, "statistics error: series is empty"),
            Self::UndefinedStatistic(name) => {
                write!(f, "statistics error: {name} is undefined (zero denominator)")
            }
            Self::InvalidPercentile(p) => {
                write!(f, "statistics error: percentile {p} outside 0..=100")
            }
        }
    }
}

impl std::error::Error for StatsError {}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

fn sorted(series: &[f32]) -> Vec<f32> {
    let mut s = series.to_vec();
    s.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    s
}

/// Arithmetic mean.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] for an empty input.
pub fn mean(series: &[f32]) -> Result<f32, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    Ok(series.iter().sum::<f32>() / series.len() as f32)
}

/// Population standard deviation.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] for an empty input.
pub fn std_dev(series: &[f32]) -> Result<f32, StatsError> {
    let m = mean(series)?;
    let variance =
        series.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / series.len() as f32;
    Ok(variance.sqrt())
}

/// Smallest value.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] for an empty input.
pub fn minimum(series: &[f32]) -> Result<f32, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    Ok(series.iter().copied().fold(f32::INFINITY, f32::min))
}

/// Largest value.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] for an empty input.
pub fn maximum(series: &[f32]) -> Result<f32, StatsError> {
    if series.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    Ok(series.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

/// Idle-load baseline: 95% of the series minimum.
///
/// # Errors
///
/// Returns [`StatsError::EmptySeries`] for an empty input.
pub fn idle_baseline(series: &[f32]) -> Result<f32, StatsError> {
    Ok(minimum(series)? * 0.95)
}

/// The `p`-th percentile with linear interpolation between ranks.
///
/// # Errors
///
/// Returns [`StatsError::InvalidPercentile`] for `p` outside `0..=100` and
/// [`StatsError::EmptySeries`] for an empty input.
pub fn percentile(series: &[f32], p: f32) -> Result<f32, StatsError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(StatsError::InvalidPercentile(p));
    }
    if series.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    let s = sorted(series);
    let rank = p / 100.0 * (s.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Ok(s[lo]);
    }
    let frac = rank - lo as f32;
    Ok(s[lo] + (s[hi] - s[lo]) * frac)
}

/// Per-point peak and valley markers from percentile thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentileFlags {
    /// `true` where the value exceeds the high-percentile threshold.
    pub peak: Vec<bool>,
    /// `true` where the value falls below the low-percentile threshold.
    pub valley: Vec<bool>,
}

/// Flags points above the `p_hi`-th percentile and below the `p_lo`-th.
///
/// Comparisons are strict, so a flat series produces no flags.
///
/// # Errors
///
/// Propagates [`percentile`] errors for either threshold.
pub fn percentile_flags(
    series: &[f32],
    p_hi: f32,
    p_lo: f32,
) -> Result<PercentileFlags, StatsError> {
    let hi = percentile(series, p_hi)?;
    let lo = percentile(series, p_lo)?;
    Ok(PercentileFlags {
        peak: series.iter().map(|&v| v > hi).collect(),
        valley: series.iter().map(|&v| v < lo).collect(),
    })
}

/// Indices of the `k` largest values, ties kept in original order.
///
/// `k` larger than the series length returns all indices.
pub fn top_k(series: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..series.len()).collect();
    // sort_by is stable: equal values keep ascending index order.
    indices.sort_by(|&a, &b| {
        series[b]
            .partial_cmp(&series[a])
            .unwrap_or(Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// Indices of the `k` smallest values, ties kept in original order.
///
/// `k` larger than the series length returns all indices.
pub fn bottom_k(series: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..series.len()).collect();
    indices.sort_by(|&a, &b| {
        series[a]
            .partial_cmp(&series[b])
            .unwrap_or(Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// Simulated power factor: mean load over perturbed apparent power.
///
/// `real / (real + perturbation_kw)`, rounded to two decimals.
///
/// # Errors
///
/// Returns [`StatsError::UndefinedStatistic`] when the apparent power is
/// zero, and [`StatsError::EmptySeries`] for an empty input.
pub fn power_factor(series: &[f32], perturbation_kw: f32) -> Result<f32, StatsError> {
    let real = mean(series)?;
    let apparent = real + perturbation_kw;
    if apparent == 0.0 {
        return Err(StatsError::UndefinedStatistic("power factor"));
    }
    Ok(round2(real / apparent))
}

/// Coefficient of variation: `std / mean × 100`, rounded to two decimals.
///
/// # Errors
///
/// Returns [`StatsError::UndefinedStatistic`] when the mean is zero, and
/// [`StatsError::EmptySeries`] for an empty input.
pub fn coefficient_of_variation(series: &[f32]) -> Result<f32, StatsError> {
    let m = mean(series)?;
    if m == 0.0 {
        return Err(StatsError::UndefinedStatistic("coefficient of variation"));
    }
    Ok(round2(std_dev(series)? / m * 100.0))
}

/// Read-only summary statistics over one load series.
///
/// Computed post-hoc from the finished Total Load series so the report and
/// the chart always describe the same data.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    /// Mean load (kW).
    pub mean_kw: f32,
    /// Population standard deviation (kW).
    pub std_dev_kw: f32,
    /// Minimum load (kW).
    pub min_kw: f32,
    /// Maximum load (kW).
    pub max_kw: f32,
    /// Idle baseline: 95% of the minimum (kW).
    pub idle_baseline_kw: f32,
    /// High-percentile peak threshold (kW).
    pub peak_threshold_kw: f32,
    /// Low-percentile valley threshold (kW).
    pub valley_threshold_kw: f32,
    /// Number of points above the peak threshold.
    pub peak_count: usize,
    /// Number of points below the valley threshold.
    pub valley_count: usize,
    /// Simulated power factor (dimensionless, 2 decimals).
    pub power_factor: f32,
    /// Coefficient of variation (%, 2 decimals).
    pub coefficient_of_variation_pct: f32,
}

impl AggregateStats {
    /// Computes the full summary for one series.
    ///
    /// # Arguments
    ///
    /// * `series` - The series to summarize (typically Total Load)
    /// * `peak_percentile` - High threshold percentile (e.g. 90.0)
    /// * `valley_percentile` - Low threshold percentile (e.g. 10.0)
    /// * `pf_perturbation_kw` - Apparent-power perturbation for the power factor
    ///
    /// # Errors
    ///
    /// Propagates any [`StatsError`] from the underlying statistics.
    pub fn from_series(
        series: &[f32],
        peak_percentile: f32,
        valley_percentile: f32,
        pf_perturbation_kw: f32,
    ) -> Result<Self, StatsError> {
        let flags = percentile_flags(series, peak_percentile, valley_percentile)?;
        Ok(Self {
            mean_kw: mean(series)?,
            std_dev_kw: std_dev(series)?,
            min_kw: minimum(series)?,
            max_kw: maximum(series)?,
            idle_baseline_kw: idle_baseline(series)?,
            peak_threshold_kw: percentile(series, peak_percentile)?,
            valley_threshold_kw: percentile(series, valley_percentile)?,
            peak_count: flags.peak.iter().filter(|&&p| p).count(),
            valley_count: flags.valley.iter().filter(|&&v| v).count(),
            power_factor: power_factor(series, pf_perturbation_kw)?,
            coefficient_of_variation_pct: coefficient_of_variation(series)?,
        })
    }
}

impl fmt::Display for AggregateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Summary ---")?;
        writeln!(f, "Mean load:           {:.2} kW", self.mean_kw)?;
        writeln!(f, "Std deviation:       {:.2} kW", self.std_dev_kw)?;
        writeln!(
            f,
            "Min / Max:           {:.2} / {:.2} kW",
            self.min_kw, self.max_kw
        )?;
        writeln!(f, "Idle baseline:       {:.2} kW", self.idle_baseline_kw)?;
        writeln!(
            f,
            "Peak threshold:      {:.2} kW ({} points above)",
            self.peak_threshold_kw, self.peak_count
        )?;
        writeln!(
            f,
            "Valley threshold:    {:.2} kW ({} points below)",
            self.valley_threshold_kw, self.valley_count
        )?;
        writeln!(f, "Power factor:        {:.2}", self.power_factor)?;
        write!(
            f,
            "Coeff. of variation: {:.2}%",
            self.coefficient_of_variation_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_baseline_is_95_pct_of_min() {
        let baseline = idle_baseline(&[10.0, 20.0, 30.0]);
        assert_eq!(baseline, Ok(9.5));
    }

    #[test]
    fn top_k_picks_largest_index() {
        assert_eq!(top_k(&[10.0, 20.0, 30.0], 1), vec![2]);
    }

    #[test]
    fn flat_series_has_zero_cv() {
        let cv = coefficient_of_variation(&[100.0, 100.0, 100.0]);
        assert_eq!(cv, Ok(0.0));
    }

    #[test]
    fn mean_and_std_dev() {
        // Mean = 5.0, variance = 4.0, std_dev = 2.0
        let series = [3.0, 7.0, 3.0, 7.0];
        assert_eq!(mean(&series), Ok(5.0));
        assert_eq!(std_dev(&series), Ok(2.0));
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&series, 0.0), Ok(1.0));
        assert_eq!(percentile(&series, 50.0), Ok(3.0));
        assert_eq!(percentile(&series, 100.0), Ok(5.0));
        // rank 3.6 → between 4.0 and 5.0
        let p90 = percentile(&series, 90.0).expect("valid percentile");
        assert!((p90 - 4.6).abs() < 1e-5);
    }

    #[test]
    fn percentile_out_of_range_rejected() {
        assert_eq!(
            percentile(&[1.0], 101.0),
            Err(StatsError::InvalidPercentile(101.0))
        );
        assert_eq!(
            percentile(&[1.0], -0.5),
            Err(StatsError::InvalidPercentile(-0.5))
        );
    }

    #[test]
    fn flags_mark_strict_extremes() {
        let series = [1.0, 2.0, 3.0, 4.0, 100.0];
        let flags = percentile_flags(&series, 90.0, 10.0).expect("valid percentiles");
        assert_eq!(flags.peak, vec![false, false, false, false, true]);
        assert_eq!(flags.valley, vec![true, false, false, false, false]);
    }

    #[test]
    fn flat_series_produces_no_flags() {
        let flags = percentile_flags(&[5.0; 8], 90.0, 10.0).expect("valid percentiles");
        assert!(flags.peak.iter().all(|&p| !p));
        assert!(flags.valley.iter().all(|&v| !v));
    }

    #[test]
    fn top_and_bottom_k_disjoint_when_2k_fits() {
        let series = [5.0, 1.0, 9.0, 3.0, 7.0, 2.0];
        let top = top_k(&series, 3);
        let bottom = bottom_k(&series, 3);
        for i in &top {
            assert!(!bottom.contains(i), "index {i} in both top and bottom");
        }
    }

    #[test]
    fn ties_keep_original_order() {
        let series = [5.0, 1.0, 5.0, 5.0];
        assert_eq!(top_k(&series, 2), vec![0, 2]);
        let series = [2.0, 1.0, 1.0, 3.0];
        assert_eq!(bottom_k(&series, 2), vec![1, 2]);
    }

    #[test]
    fn k_beyond_length_returns_everything() {
        assert_eq!(top_k(&[1.0, 2.0], 10).len(), 2);
        assert_eq!(bottom_k(&[], 3), Vec::<usize>::new());
    }

    #[test]
    fn power_factor_rounds_to_two_decimals() {
        // real = 100, apparent = 125 → 0.8
        let pf = power_factor(&[100.0, 100.0], 25.0);
        assert_eq!(pf, Ok(0.8));
        // real = 100, apparent = 103 → 0.970873... → 0.97
        let pf = power_factor(&[100.0], 3.0);
        assert_eq!(pf, Ok(0.97));
    }

    #[test]
    fn zero_apparent_power_is_undefined() {
        let pf = power_factor(&[10.0, 10.0], -10.0);
        assert_eq!(pf, Err(StatsError::UndefinedStatistic("power factor")));
    }

    #[test]
    fn zero_mean_cv_is_undefined() {
        let cv = coefficient_of_variation(&[-1.0, 1.0]);
        assert_eq!(
            cv,
            Err(StatsError::UndefinedStatistic("coefficient of variation"))
        );
    }

    #[test]
    fn empty_series_rejected_everywhere() {
        assert_eq!(mean(&[]), Err(StatsError::EmptySeries));
        assert_eq!(std_dev(&[]), Err(StatsError::EmptySeries));
        assert_eq!(minimum(&[]), Err(StatsError::EmptySeries));
        assert_eq!(idle_baseline(&[]), Err(StatsError::EmptySeries));
        assert_eq!(percentile(&[], 50.0), Err(StatsError::EmptySeries));
        assert_eq!(power_factor(&[], 20.0), Err(StatsError::EmptySeries));
    }

    #[test]
    fn aggregate_stats_happy_path() {
        let series = [90.0, 100.0, 110.0, 120.0, 200.0];
        let stats = AggregateStats::from_series(&series, 90.0, 10.0, 20.0)
            .expect("stats should compute");
        assert_eq!(stats.min_kw, 90.0);
        assert_eq!(stats.max_kw, 200.0);
        assert_eq!(stats.idle_baseline_kw, 90.0 * 0.95);
        assert_eq!(stats.peak_count, 1);
        assert_eq!(stats.valley_count, 1);
        assert!(stats.power_factor > 0.0 && stats.power_factor < 1.0);
    }

    #[test]
    fn aggregate_stats_display_lists_power_factor() {
        let series = [90.0, 100.0, 110.0];
        let stats = AggregateStats::from_series(&series, 90.0, 10.0, 20.0)
            .expect("stats should compute");
        let report = stats.to_string();
        assert!(report.contains("Power factor"));
        assert!(report.contains("Idle baseline"));
    }
}
