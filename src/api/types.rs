//! API response and query types.
//!
//! Core structs stay serde-free; the API maps them into dedicated records
//! so the wire contract can evolve independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::AggregateStats;

/// Profile overview: configuration echo, statistics, and series names.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Profiled date (`YYYY-MM-DD`).
    pub date: String,
    /// First profiled hour.
    pub start_hour: u8,
    /// Last profiled hour, inclusive.
    pub end_hour: u8,
    /// Sampling interval name.
    pub interval: String,
    /// Master random seed.
    pub seed: u64,
    /// Number of rows in the table.
    pub rows: usize,
    /// Series names in table order.
    pub series: Vec<String>,
    /// Summary statistics over Total Load.
    pub stats: StatsRecord,
}

/// Serializable mirror of [`AggregateStats`].
#[derive(Debug, Serialize)]
pub struct StatsRecord {
    /// Mean load (kW).
    pub mean_kw: f32,
    /// Population standard deviation (kW).
    pub std_dev_kw: f32,
    /// Minimum load (kW).
    pub min_kw: f32,
    /// Maximum load (kW).
    pub max_kw: f32,
    /// Idle baseline (kW).
    pub idle_baseline_kw: f32,
    /// Peak threshold (kW).
    pub peak_threshold_kw: f32,
    /// Valley threshold (kW).
    pub valley_threshold_kw: f32,
    /// Points above the peak threshold.
    pub peak_count: usize,
    /// Points below the valley threshold.
    pub valley_count: usize,
    /// Simulated power factor.
    pub power_factor: f32,
    /// Coefficient of variation (%).
    pub coefficient_of_variation_pct: f32,
}

impl From<&AggregateStats> for StatsRecord {
    fn from(s: &AggregateStats) -> Self {
        Self {
            mean_kw: s.mean_kw,
            std_dev_kw: s.std_dev_kw,
            min_kw: s.min_kw,
            max_kw: s.max_kw,
            idle_baseline_kw: s.idle_baseline_kw,
            peak_threshold_kw: s.peak_threshold_kw,
            valley_threshold_kw: s.valley_threshold_kw,
            peak_count: s.peak_count,
            valley_count: s.valley_count,
            power_factor: s.power_factor,
            coefficient_of_variation_pct: s.coefficient_of_variation_pct,
        }
    }
}

/// Range filter for `/series` (both bounds inclusive, by row index).
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// First row index to include.
    pub from: Option<usize>,
    /// Last row index to include.
    pub to: Option<usize>,
}

/// One row of the load table.
#[derive(Debug, Serialize)]
pub struct SeriesRecord {
    /// Row index.
    pub row: usize,
    /// Timestamp (`YYYY-MM-DD HH:MM`).
    pub timestamp: String,
    /// Load per series name (kW).
    pub loads: BTreeMap<String, f32>,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}
