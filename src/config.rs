//! TOML-based profile configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::series::{Department, LoadParams};
use crate::timeline::SamplingInterval;

/// Top-level profile configuration parsed from TOML.
///
/// All fields have defaults matching the full-day hourly profile. Load from
/// TOML with [`ProfileConfig::from_toml_file`] or use
/// [`ProfileConfig::daily`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Date, hour range, sampling, and seed.
    #[serde(default)]
    pub profile: ProfileSection,
    /// Department selection and per-department load parameters.
    #[serde(default)]
    pub departments: DepartmentsSection,
    /// Aggregation thresholds.
    #[serde(default)]
    pub stats: StatsSection,
}

/// Date, hour range, sampling, and seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSection {
    /// Profiled calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// First profiled hour (0-23).
    pub start_hour: u8,
    /// Last profiled hour, inclusive (0-23, >= start_hour).
    pub end_hour: u8,
    /// Sampling interval: `"hourly"` or `"quarter_hour"`.
    pub interval: String,
    /// Master random seed.
    pub seed: u64,
    /// Whether to generate the per-equipment drill-down tables.
    pub drilldown: bool,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            date: "2023-01-01".to_string(),
            start_hour: 0,
            end_hour: 23,
            interval: "hourly".to_string(),
            seed: 42,
            drilldown: false,
        }
    }
}

/// Department selection and per-department load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepartmentsSection {
    /// Departments included in the profile, in chart order.
    pub selected: Vec<String>,
    /// Sinter plant load distribution.
    pub sintering: LoadParams,
    /// Pellet plant load distribution.
    pub pelletizing: LoadParams,
    /// DRI plant load distribution.
    pub dri: LoadParams,
    /// Blast furnace load distribution.
    pub blast_furnace: LoadParams,
}

impl Default for DepartmentsSection {
    fn default() -> Self {
        Self {
            selected: Department::ALL.iter().map(|d| d.as_str().to_string()).collect(),
            sintering: Department::Sintering.default_load(),
            pelletizing: Department::Pelletizing.default_load(),
            dri: Department::Dri.default_load(),
            blast_furnace: Department::BlastFurnace.default_load(),
        }
    }
}

/// Aggregation thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsSection {
    /// Percentile above which a point counts as a peak.
    pub peak_percentile: f32,
    /// Percentile below which a point counts as a valley.
    pub valley_percentile: f32,
    /// How many top/bottom points to mark per series.
    pub extreme_count: usize,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            peak_percentile: 90.0,
            valley_percentile: 10.0,
            extreme_count: 3,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"profile.start_hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ProfileConfig {
    /// Returns the full-day hourly profile (the classic 24-point chart).
    pub fn daily() -> Self {
        Self {
            profile: ProfileSection::default(),
            departments: DepartmentsSection::default(),
            stats: StatsSection::default(),
        }
    }

    /// Returns the intraday preset: full day at 15-minute resolution.
    pub fn intraday() -> Self {
        Self {
            profile: ProfileSection {
                interval: "quarter_hour".to_string(),
                ..ProfileSection::default()
            },
            ..Self::daily()
        }
    }

    /// Returns the evening-peak preset: 16:00-22:00 at 15-minute resolution
    /// with the equipment drill-down enabled.
    pub fn evening_peak() -> Self {
        Self {
            profile: ProfileSection {
                start_hour: 16,
                end_hour: 22,
                interval: "quarter_hour".to_string(),
                drilldown: true,
                ..ProfileSection::default()
            },
            ..Self::daily()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["daily", "intraday", "evening_peak"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "daily" => Ok(Self::daily()),
            "intraday" => Ok(Self::intraday()),
            "evening_peak" => Ok(Self::evening_peak()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Parsed profile date.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `profile.date` is not `YYYY-MM-DD`.
    pub fn date(&self) -> Result<NaiveDate, ConfigError> {
        NaiveDate::parse_from_str(&self.profile.date, "%Y-%m-%d").map_err(|e| ConfigError {
            field: "profile.date".to_string(),
            message: format!("\"{}\" is not a YYYY-MM-DD date: {e}", self.profile.date),
        })
    }

    /// Parsed sampling interval.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `profile.interval` names no known interval.
    pub fn interval(&self) -> Result<SamplingInterval, ConfigError> {
        SamplingInterval::from_name(&self.profile.interval).ok_or_else(|| ConfigError {
            field: "profile.interval".to_string(),
            message: format!(
                "must be \"hourly\" or \"quarter_hour\", got \"{}\"",
                self.profile.interval
            ),
        })
    }

    /// Parsed department selection in configured order.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on the first unknown department name.
    pub fn selected_departments(&self) -> Result<Vec<Department>, ConfigError> {
        self.departments
            .selected
            .iter()
            .map(|name| {
                Department::from_name(name).ok_or_else(|| ConfigError {
                    field: "departments.selected".to_string(),
                    message: format!(
                        "unknown department \"{name}\", known: Sintering, Pelletizing, DRI, BF"
                    ),
                })
            })
            .collect()
    }

    /// Load distribution parameters for one department.
    pub fn department_params(&self, department: Department) -> LoadParams {
        match department {
            Department::Sintering => self.departments.sintering,
            Department::Pelletizing => self.departments.pelletizing,
            Department::Dri => self.departments.dri,
            Department::BlastFurnace => self.departments.blast_furnace,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.profile;

        if let Err(e) = self.date() {
            errors.push(e);
        }
        for (field, hour) in [
            ("profile.start_hour", p.start_hour),
            ("profile.end_hour", p.end_hour),
        ] {
            if hour > 23 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be <= 23".into(),
                });
            }
        }
        if p.start_hour > p.end_hour {
            errors.push(ConfigError {
                field: "profile.start_hour".into(),
                message: "must be <= profile.end_hour".into(),
            });
        }
        if let Err(e) = self.interval() {
            errors.push(e);
        }

        let d = &self.departments;
        if d.selected.is_empty() {
            errors.push(ConfigError {
                field: "departments.selected".into(),
                message: "must name at least one department".into(),
            });
        }
        if let Err(e) = self.selected_departments() {
            errors.push(e);
        }
        let mut seen = Vec::new();
        for name in &d.selected {
            if seen.contains(&name) {
                errors.push(ConfigError {
                    field: "departments.selected".into(),
                    message: format!("department \"{name}\" listed more than once"),
                });
            }
            seen.push(name);
        }
        for (field, params) in [
            ("departments.sintering", d.sintering),
            ("departments.pelletizing", d.pelletizing),
            ("departments.dri", d.dri),
            ("departments.blast_furnace", d.blast_furnace),
        ] {
            if !params.mean_kw.is_finite() {
                errors.push(ConfigError {
                    field: format!("{field}.mean_kw"),
                    message: "must be finite".into(),
                });
            }
            if !params.std_kw.is_finite() || params.std_kw < 0.0 {
                errors.push(ConfigError {
                    field: format!("{field}.std_kw"),
                    message: "must be finite and >= 0".into(),
                });
            }
        }

        let s = &self.stats;
        for (field, pct) in [
            ("stats.peak_percentile", s.peak_percentile),
            ("stats.valley_percentile", s.valley_percentile),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0.0, 100.0]".into(),
                });
            }
        }
        if s.valley_percentile >= s.peak_percentile {
            errors.push(ConfigError {
                field: "stats.valley_percentile".into(),
                message: "must be < stats.peak_percentile".into(),
            });
        }
        if s.extreme_count == 0 {
            errors.push(ConfigError {
                field: "stats.extreme_count".into(),
                message: "must be >= 1".into(),
            });
        }

        errors
    }
}
