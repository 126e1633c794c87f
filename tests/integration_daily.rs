//! Integration tests for the default full-day profile.

mod common;

use loadprofile::io::export::write_csv;
use loadprofile::stats;
use loadprofile::table::TOTAL_LOAD;

#[test]
fn daily_profile_has_24_rows() {
    let profile = common::build(&common::daily_config());
    assert_eq!(profile.table.len(), 24);
    assert_eq!(profile.table.num_series(), 5);
}

#[test]
fn repeated_builds_reproduce_identical_total_load() {
    let cfg = common::daily_config();
    let a = common::build(&cfg);
    let b = common::build(&cfg);
    assert_eq!(a.table.get(TOTAL_LOAD), b.table.get(TOTAL_LOAD));
    assert_eq!(a.stats, b.stats);
}

#[test]
fn total_load_is_exact_department_sum() {
    let profile = common::build(&common::daily_config());
    let total = profile.table.get(TOTAL_LOAD).map(<[f32]>::to_vec);

    let mut expected = vec![0.0_f32; profile.table.len()];
    for name in ["Sintering", "Pelletizing", "DRI", "BF"] {
        let series = profile.table.get(name).map(<[f32]>::to_vec);
        assert!(series.is_some(), "{name} missing from table");
        for (acc, v) in expected.iter_mut().zip(series.iter().flatten()) {
            *acc += v;
        }
    }
    assert_eq!(total, Some(expected));
}

#[test]
fn idle_baseline_is_exactly_95_pct_of_min() {
    let profile = common::build(&common::daily_config());
    let total = profile.table.get(TOTAL_LOAD).map(<[f32]>::to_vec);
    let min = stats::minimum(total.as_deref().unwrap_or(&[]));
    assert_eq!(
        Ok(profile.stats.idle_baseline_kw),
        min.map(|m| m * 0.95)
    );
}

#[test]
fn summary_values_are_finite() {
    let profile = common::build(&common::daily_config());
    let s = &profile.stats;
    assert!(s.mean_kw.is_finite());
    assert!(s.std_dev_kw.is_finite());
    assert!(s.idle_baseline_kw.is_finite());
    assert!(s.peak_threshold_kw.is_finite());
    assert!(s.valley_threshold_kw.is_finite());
    assert!(s.power_factor.is_finite());
    assert!(s.coefficient_of_variation_pct.is_finite());
    // Four departments around 750 kW combined keep the mean well positive.
    assert!(s.mean_kw > 0.0);
    assert!(s.power_factor > 0.0);
}

#[test]
fn extreme_markers_are_disjoint_per_series() {
    let profile = common::build(&common::daily_config());
    for e in &profile.extremes {
        assert_eq!(e.peaks.len(), 3, "{}", e.name);
        assert_eq!(e.valleys.len(), 3, "{}", e.name);
        for i in &e.peaks {
            assert!(!e.valleys.contains(i), "{}: index {i} in both sets", e.name);
        }
    }
}

#[test]
fn csv_export_is_deterministic() {
    let cfg = common::daily_config();
    let a = common::build(&cfg);
    let b = common::build(&cfg);

    let mut out_a = Vec::new();
    write_csv(&a.table, &mut out_a).expect("first export should succeed");
    let mut out_b = Vec::new();
    write_csv(&b.table, &mut out_b).expect("second export should succeed");

    assert_eq!(out_a, out_b);
}

#[test]
fn csv_export_has_header_and_row_per_timestamp() {
    let profile = common::build(&common::daily_config());
    let mut out = Vec::new();
    write_csv(&profile.table, &mut out).expect("export should succeed");

    let csv = String::from_utf8(out).expect("csv output should be valid UTF-8");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,Sintering,Pelletizing,DRI,BF,Total Load")
    );
    assert_eq!(lines.count(), 24);
}

#[test]
fn seed_override_changes_every_series() {
    let mut cfg = common::daily_config();
    let a = common::build(&cfg);
    cfg.profile.seed = 7;
    let b = common::build(&cfg);
    for name in ["Sintering", "Pelletizing", "DRI", "BF", TOTAL_LOAD] {
        assert_ne!(a.table.get(name), b.table.get(name), "{name} unchanged");
    }
}
