//! Dashboard application state and rebuild logic.

use crate::config::ProfileConfig;
use crate::profile::{LoadProfile, build_profile};
use crate::series::Department;
use crate::table::LoadTable;
use crate::timeline::SamplingInterval;

/// Dashboard state: the working configuration plus the profile built from it.
///
/// Filter controls mutate the configuration and call [`App::rebuild`]; the
/// profile is always a fresh, complete recomputation of the current filters.
pub struct App {
    /// Working configuration, mutated by the filter controls.
    pub config: ProfileConfig,
    /// Pristine copy used by the reset control.
    initial: ProfileConfig,
    /// Profile built from the current configuration.
    pub profile: Option<LoadProfile>,
    /// Message for the status line when a rebuild or control is refused.
    pub notice: Option<String>,
    /// Whether the chart shows the equipment drill-down.
    pub drilldown_view: bool,
    /// Which selected department's breakdown is charted.
    pub drilldown_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app and builds the initial profile.
    pub fn new(config: ProfileConfig) -> Self {
        let mut app = Self {
            initial: config.clone(),
            config,
            profile: None,
            notice: None,
            drilldown_view: false,
            drilldown_idx: 0,
            quit: false,
        };
        app.rebuild();
        app
    }

    /// Rebuilds the profile from the current configuration.
    ///
    /// A failed rebuild keeps the previous profile on screen and surfaces
    /// the error in the status line.
    pub fn rebuild(&mut self) {
        match build_profile(&self.config) {
            Ok(profile) => {
                self.profile = Some(profile);
                self.notice = None;
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
        self.clamp_drilldown_idx();
    }

    /// Adds or removes a department from the selection and rebuilds.
    ///
    /// Removing the last selected department is refused.
    pub fn toggle_department(&mut self, department: Department) {
        let name = department.as_str();
        let selected = &mut self.config.departments.selected;
        if let Some(pos) = selected.iter().position(|n| n == name) {
            if selected.len() == 1 {
                self.notice = Some("at least one department must stay selected".to_string());
                return;
            }
            selected.remove(pos);
        } else {
            // Re-insert in canonical chart order.
            let chosen: Vec<String> = Department::ALL
                .iter()
                .map(|d| d.as_str().to_string())
                .filter(|n| selected.contains(n) || n == name)
                .collect();
            *selected = chosen;
        }
        self.rebuild();
    }

    /// Whether a department is currently selected.
    pub fn is_selected(&self, department: Department) -> bool {
        self.config
            .departments
            .selected
            .iter()
            .any(|n| n == department.as_str())
    }

    /// Moves the start hour by `delta`, clamped to `0..=end_hour`.
    pub fn shift_start_hour(&mut self, delta: i8) {
        let p = &mut self.config.profile;
        let next = p.start_hour.saturating_add_signed(delta).min(p.end_hour);
        if next != p.start_hour {
            p.start_hour = next;
            self.rebuild();
        }
    }

    /// Moves the end hour by `delta`, clamped to `start_hour..=23`.
    pub fn shift_end_hour(&mut self, delta: i8) {
        let p = &mut self.config.profile;
        let next = p
            .end_hour
            .saturating_add_signed(delta)
            .clamp(p.start_hour, 23);
        if next != p.end_hour {
            p.end_hour = next;
            self.rebuild();
        }
    }

    /// Switches between hourly and quarter-hour sampling.
    pub fn toggle_interval(&mut self) {
        let next = match SamplingInterval::from_name(&self.config.profile.interval) {
            Some(SamplingInterval::Hourly) => SamplingInterval::QuarterHour,
            _ => SamplingInterval::Hourly,
        };
        self.config.profile.interval = next.as_str().to_string();
        self.rebuild();
    }

    /// Toggles the equipment drill-down view.
    ///
    /// Turning the view on also enables breakdown generation in the config
    /// so the rebuild produces the per-unit tables.
    pub fn toggle_drilldown(&mut self) {
        self.drilldown_view = !self.drilldown_view;
        self.config.profile.drilldown = self.drilldown_view;
        self.rebuild();
    }

    /// Advances the drill-down to the next department with a breakdown.
    pub fn cycle_drilldown_department(&mut self) {
        let count = self.profile.as_ref().map_or(0, |p| p.drilldown.len());
        if count > 0 {
            self.drilldown_idx = (self.drilldown_idx + 1) % count;
        }
    }

    /// Restores the configuration the dashboard started with.
    pub fn reset(&mut self) {
        self.config = self.initial.clone();
        self.drilldown_view = self.config.profile.drilldown;
        self.drilldown_idx = 0;
        self.rebuild();
    }

    /// The table currently charted: a department breakdown in drill-down
    /// view, the main table otherwise.
    pub fn chart_table(&self) -> Option<&LoadTable> {
        let profile = self.profile.as_ref()?;
        if self.drilldown_view {
            profile
                .drilldown
                .get(self.drilldown_idx)
                .map(|b| &b.table)
                .or(Some(&profile.table))
        } else {
            Some(&profile.table)
        }
    }

    /// Title for the chart block.
    pub fn chart_title(&self) -> String {
        if self.drilldown_view {
            if let Some(b) = self
                .profile
                .as_ref()
                .and_then(|p| p.drilldown.get(self.drilldown_idx))
            {
                return format!(" {} Equipment ", b.department);
            }
        }
        let p = &self.config.profile;
        format!(
            " Load Profile {} ({}:00 to {}:00) ",
            p.date, p.start_hour, p.end_hour
        )
    }

    fn clamp_drilldown_idx(&mut self) {
        let count = self.profile.as_ref().map_or(0, |p| p.drilldown.len());
        if count == 0 {
            self.drilldown_idx = 0;
        } else if self.drilldown_idx >= count {
            self.drilldown_idx = count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(ProfileConfig::daily())
    }

    #[test]
    fn initial_build_succeeds() {
        let app = app();
        assert!(app.profile.is_some());
        assert!(app.notice.is_none());
    }

    #[test]
    fn toggle_department_removes_and_restores() {
        let mut app = app();
        app.toggle_department(Department::Dri);
        assert!(!app.is_selected(Department::Dri));
        let cols = app.profile.as_ref().map(|p| p.table.num_series());
        assert_eq!(cols, Some(4)); // 3 departments + Total Load

        app.toggle_department(Department::Dri);
        assert!(app.is_selected(Department::Dri));
        // Canonical order restored, not append order.
        let names: Vec<String> = app.config.departments.selected.clone();
        assert_eq!(names, vec!["Sintering", "Pelletizing", "DRI", "BF"]);
    }

    #[test]
    fn last_department_cannot_be_removed() {
        let mut app = app();
        for dept in [
            Department::Sintering,
            Department::Pelletizing,
            Department::Dri,
        ] {
            app.toggle_department(dept);
        }
        app.toggle_department(Department::BlastFurnace);
        assert!(app.is_selected(Department::BlastFurnace));
        assert!(app.notice.is_some());
    }

    #[test]
    fn hour_shifts_clamp_and_rebuild() {
        let mut app = app();
        app.shift_start_hour(-1);
        assert_eq!(app.config.profile.start_hour, 0);

        app.shift_start_hour(5);
        assert_eq!(app.config.profile.start_hour, 5);
        let rows = app.profile.as_ref().map(|p| p.table.len());
        assert_eq!(rows, Some(19)); // hours 5..=23

        app.shift_end_hour(5);
        assert_eq!(app.config.profile.end_hour, 23);
    }

    #[test]
    fn start_cannot_pass_end() {
        let mut app = app();
        app.shift_end_hour(-20);
        assert_eq!(app.config.profile.end_hour, 3);
        app.shift_start_hour(10);
        assert_eq!(app.config.profile.start_hour, 3);
    }

    #[test]
    fn interval_toggle_changes_resolution() {
        let mut app = app();
        app.toggle_interval();
        assert_eq!(app.config.profile.interval, "quarter_hour");
        let rows = app.profile.as_ref().map(|p| p.table.len());
        assert_eq!(rows, Some(93));
    }

    #[test]
    fn drilldown_toggle_generates_breakdowns() {
        let mut app = app();
        app.toggle_drilldown();
        assert!(app.drilldown_view);
        let breakdowns = app.profile.as_ref().map(|p| p.drilldown.len());
        assert_eq!(breakdowns, Some(4));

        app.cycle_drilldown_department();
        assert_eq!(app.drilldown_idx, 1);
    }

    #[test]
    fn chart_table_follows_view() {
        let mut app = app();
        let main_cols = app.chart_table().map(LoadTable::num_series);
        assert_eq!(main_cols, Some(5));

        app.toggle_drilldown();
        let drill_cols = app.chart_table().map(LoadTable::num_series);
        // 3 units + Total Load
        assert_eq!(drill_cols, Some(4));
    }

    #[test]
    fn reset_restores_initial_filters() {
        let mut app = app();
        app.shift_start_hour(8);
        app.toggle_interval();
        app.toggle_department(Department::BlastFurnace);
        app.reset();
        assert_eq!(app.config.profile.start_hour, 0);
        assert_eq!(app.config.profile.interval, "hourly");
        assert!(app.is_selected(Department::BlastFurnace));
    }
}
