//! One parameterized pass from configuration to table and statistics.
//!
//! This is the collapse of the original per-variant scripts: every chart
//! resolution, hour range, department selection, and drill-down choice flows
//! through [`build_profile`] with a [`ProfileConfig`].

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};

use crate::config::{ConfigError, ProfileConfig};
use crate::series::{Department, NormalSeries, gaussian_noise};
use crate::stats::{self, AggregateStats, StatsError};
use crate::table::{LoadTable, TOTAL_LOAD, TableError};
use crate::timeline::{TimeIndex, TimeRangeError};

/// Seed offset for the power-factor perturbation RNG so it never collides
/// with a department stream.
const PF_SEED_OFFSET: u64 = 97;

/// Seed stride between equipment units within one department.
const UNIT_SEED_STRIDE: u64 = 101;

/// Apparent-power perturbation distribution (kW).
const PF_PERTURBATION_MEAN_KW: f32 = 20.0;
const PF_PERTURBATION_STD_KW: f32 = 5.0;

/// Error building a profile from a configuration.
#[derive(Debug)]
pub enum BuildError {
    /// Configuration field failed to parse.
    Config(ConfigError),
    /// Hour range rejected by the time index builder.
    Time(TimeRangeError),
    /// Series insertion violated a table invariant.
    Table(TableError),
    /// A statistic was undefined for the generated data.
    Stats(StatsError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => e.fmt(f),
            Self::Time(e) => e.fmt(f),
            Self::Table(e) => e.fmt(f),
            Self::Stats(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TimeRangeError> for BuildError {
    fn from(e: TimeRangeError) -> Self {
        Self::Time(e)
    }
}

impl From<TableError> for BuildError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<StatsError> for BuildError {
    fn from(e: StatsError) -> Self {
        Self::Stats(e)
    }
}

/// Top/bottom extreme indices for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesExtremes {
    /// Series name.
    pub name: String,
    /// Indices of the largest values, stable order.
    pub peaks: Vec<usize>,
    /// Indices of the smallest values, stable order.
    pub valleys: Vec<usize>,
}

/// Equipment drill-down table for one department.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentBreakdown {
    /// The department this breakdown belongs to.
    pub department: Department,
    /// Per-unit series plus their [`TOTAL_LOAD`] sum.
    pub table: LoadTable,
}

/// A complete built profile: table, statistics, extremes, and drill-down.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    /// Department series plus the [`TOTAL_LOAD`] column.
    pub table: LoadTable,
    /// Summary statistics over Total Load.
    pub stats: AggregateStats,
    /// Per-series top/bottom markers, in table order.
    pub extremes: Vec<SeriesExtremes>,
    /// Equipment breakdown per department (empty unless drill-down enabled).
    pub drilldown: Vec<DepartmentBreakdown>,
}

/// Deterministic apparent-power perturbation for the power factor.
///
/// Drawn from normal(20 kW, 5 kW) on a dedicated stream derived from the
/// master seed, so the reported power factor is reproducible per seed.
fn pf_perturbation_kw(seed: u64) -> f32 {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(PF_SEED_OFFSET));
    PF_PERTURBATION_MEAN_KW + gaussian_noise(&mut rng, PF_PERTURBATION_STD_KW)
}

/// Builds the full profile for a validated configuration.
///
/// Generates one series per selected department (master seed plus the
/// department offset), appends Total Load, computes the aggregate summary
/// and per-series extremes, and, when enabled, the equipment drill-down.
/// Each call recomputes everything from scratch.
///
/// # Errors
///
/// Returns a [`BuildError`] if the configuration fails to parse, the hour
/// range is empty, or a statistic is undefined for the generated data.
pub fn build_profile(cfg: &ProfileConfig) -> Result<LoadProfile, BuildError> {
    let date = cfg.date()?;
    let interval = cfg.interval()?;
    let departments = cfg.selected_departments()?;
    let p = &cfg.profile;

    let index = TimeIndex::build(date, p.start_hour, p.end_hour, interval)?;
    let len = index.len();

    let mut table = LoadTable::new(index.clone());
    for dept in &departments {
        let params = cfg.department_params(*dept);
        let seed = p.seed.wrapping_add(dept.seed_offset());
        let mut generator = NormalSeries::new(params.mean_kw, params.std_kw, seed);
        table.insert(dept.as_str(), generator.generate(len))?;
    }

    let total = table.total_load();
    let stats = AggregateStats::from_series(
        &total,
        cfg.stats.peak_percentile,
        cfg.stats.valley_percentile,
        pf_perturbation_kw(p.seed),
    )?;
    table.insert(TOTAL_LOAD, total)?;

    let k = cfg.stats.extreme_count;
    let extremes = table
        .iter()
        .map(|(name, values)| SeriesExtremes {
            name: name.to_string(),
            peaks: stats::top_k(values, k),
            valleys: stats::bottom_k(values, k),
        })
        .collect();

    let mut drilldown = Vec::new();
    if p.drilldown {
        for dept in &departments {
            drilldown.push(build_breakdown(cfg, *dept, &index)?);
        }
    }

    log::info!(
        "built load profile: {} rows x {} series ({} drill-down tables)",
        table.len(),
        table.num_series(),
        drilldown.len()
    );

    Ok(LoadProfile {
        table,
        stats,
        extremes,
        drilldown,
    })
}

/// Generates the per-unit table for one department's drill-down.
fn build_breakdown(
    cfg: &ProfileConfig,
    department: Department,
    index: &TimeIndex,
) -> Result<DepartmentBreakdown, BuildError> {
    let params = cfg.department_params(department);
    let dept_seed = cfg.profile.seed.wrapping_add(department.seed_offset());

    let mut table = LoadTable::new(index.clone());
    for (i, unit) in department.equipment().iter().enumerate() {
        let unit_params = unit.load_params(params);
        let seed = dept_seed.wrapping_add((i as u64 + 1) * UNIT_SEED_STRIDE);
        let mut generator = NormalSeries::new(unit_params.mean_kw, unit_params.std_kw, seed);
        table.insert(unit.name, generator.generate(index.len()))?;
    }
    table.push_total()?;

    Ok(DepartmentBreakdown { department, table })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_profile_has_24_rows_and_total() {
        let profile = build_profile(&ProfileConfig::daily()).expect("daily should build");
        assert_eq!(profile.table.len(), 24);
        // 4 departments + Total Load
        assert_eq!(profile.table.num_series(), 5);
        assert!(profile.table.get(TOTAL_LOAD).is_some());
    }

    #[test]
    fn same_config_reproduces_identical_profile() {
        let cfg = ProfileConfig::daily();
        let a = build_profile(&cfg).expect("first build");
        let b = build_profile(&cfg).expect("second build");
        assert_eq!(a.table, b.table);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.extremes, b.extremes);
    }

    #[test]
    fn seed_changes_the_data() {
        let mut cfg = ProfileConfig::daily();
        let a = build_profile(&cfg).expect("build seed 42");
        cfg.profile.seed = 43;
        let b = build_profile(&cfg).expect("build seed 43");
        assert_ne!(a.table, b.table);
    }

    #[test]
    fn total_is_sum_of_departments_at_every_row() {
        let profile = build_profile(&ProfileConfig::daily()).expect("daily should build");
        let total = profile.table.get(TOTAL_LOAD).map(<[f32]>::to_vec);
        let mut expected = vec![0.0_f32; profile.table.len()];
        for (name, values) in profile.table.iter() {
            if name == TOTAL_LOAD {
                continue;
            }
            for (acc, v) in expected.iter_mut().zip(values) {
                *acc += v;
            }
        }
        assert_eq!(total, Some(expected));
    }

    #[test]
    fn subset_selection_shrinks_table() {
        let mut cfg = ProfileConfig::daily();
        cfg.departments.selected = vec!["DRI".to_string(), "BF".to_string()];
        let profile = build_profile(&cfg).expect("subset should build");
        assert_eq!(profile.table.num_series(), 3);
        assert!(profile.table.get("Sintering").is_none());
    }

    #[test]
    fn extremes_cover_every_series_with_k_indices() {
        let cfg = ProfileConfig::daily();
        let profile = build_profile(&cfg).expect("daily should build");
        assert_eq!(profile.extremes.len(), profile.table.num_series());
        for e in &profile.extremes {
            assert_eq!(e.peaks.len(), cfg.stats.extreme_count);
            assert_eq!(e.valleys.len(), cfg.stats.extreme_count);
        }
    }

    #[test]
    fn drilldown_off_by_default() {
        let profile = build_profile(&ProfileConfig::daily()).expect("daily should build");
        assert!(profile.drilldown.is_empty());
    }

    #[test]
    fn drilldown_builds_one_table_per_department() {
        let profile =
            build_profile(&ProfileConfig::evening_peak()).expect("evening_peak should build");
        assert_eq!(profile.drilldown.len(), 4);
        for breakdown in &profile.drilldown {
            let units = breakdown.department.equipment().len();
            // units + Total Load
            assert_eq!(breakdown.table.num_series(), units + 1);
            assert_eq!(breakdown.table.len(), profile.table.len());
        }
    }

    #[test]
    fn inverted_hours_surface_time_error() {
        let mut cfg = ProfileConfig::daily();
        cfg.profile.start_hour = 20;
        cfg.profile.end_hour = 4;
        let err = build_profile(&cfg);
        assert!(matches!(err, Err(BuildError::Time(_))));
    }

    #[test]
    fn unparseable_date_surfaces_config_error() {
        let mut cfg = ProfileConfig::daily();
        cfg.profile.date = "June 15".to_string();
        let err = build_profile(&cfg);
        assert!(matches!(err, Err(BuildError::Config(_))));
    }

    #[test]
    fn pf_perturbation_deterministic_per_seed() {
        assert_eq!(pf_perturbation_kw(42), pf_perturbation_kw(42));
        assert_ne!(pf_perturbation_kw(42), pf_perturbation_kw(43));
    }
}
