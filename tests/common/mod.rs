//! Shared test fixtures for integration tests.

use loadprofile::config::ProfileConfig;
use loadprofile::profile::{LoadProfile, build_profile};

/// Default full-day hourly configuration (seed 42, all four departments).
pub fn daily_config() -> ProfileConfig {
    ProfileConfig::daily()
}

/// Builds a profile, panicking with context on failure.
pub fn build(cfg: &ProfileConfig) -> LoadProfile {
    build_profile(cfg).expect("profile should build from a valid config")
}
