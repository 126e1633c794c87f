//! Color constants and auto-scaling helpers for the dashboard.

use ratatui::style::Color;

use crate::table::TOTAL_LOAD;

/// Total Load line color.
pub const TOTAL_COLOR: Color = Color::LightRed;
/// Idle baseline marker color.
pub const BASELINE_COLOR: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Status notice color.
pub const NOTICE_FG: Color = Color::Yellow;

/// Line colors for non-total series, assigned by column position.
const SERIES_COLORS: [Color; 6] = [
    Color::Gray,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Green,
    Color::Cyan,
];

/// Color for the series at column `idx`, total column included.
pub fn series_color(name: &str, idx: usize) -> Color {
    if name == TOTAL_LOAD {
        TOTAL_COLOR
    } else {
        SERIES_COLORS[idx % SERIES_COLORS.len()]
    }
}

/// Computes Y-axis bounds across all charted series with 10% padding.
pub fn auto_bounds_y(datasets: &[Vec<(f64, f64)>]) -> [f64; 2] {
    let all = datasets.iter().flatten().map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_always_gets_total_color() {
        assert_eq!(series_color(TOTAL_LOAD, 3), TOTAL_COLOR);
        assert_ne!(series_color("Sintering", 0), TOTAL_COLOR);
    }

    #[test]
    fn bounds_pad_the_data_range() {
        let data = vec![vec![(0.0, 100.0), (1.0, 200.0)]];
        let [lo, hi] = auto_bounds_y(&data);
        assert!(lo < 100.0 && hi > 200.0);
    }

    #[test]
    fn empty_data_gets_fallback_bounds() {
        assert_eq!(auto_bounds_y(&[]), [-1.0, 1.0]);
    }
}
