//! Dashboard layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Paragraph};

use crate::series::Department;
use crate::table::TOTAL_LOAD;

use super::runtime::App;
use super::style;

/// Renders the full dashboard frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(7), // stats panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_stats(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: date, hour range, interval, and department toggles.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.config.profile;

    let mut toggles = String::new();
    for (i, dept) in Department::ALL.iter().enumerate() {
        let mark = if app.is_selected(*dept) { "x" } else { " " };
        toggles.push_str(&format!(" {}[{mark}]{}", i + 1, dept.as_str()));
    }

    let header = Line::from(vec![
        Span::styled(
            " LOAD PROFILE ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {} {:02}:00-{:02}:00 {} seed={} |{toggles}",
            p.date, p.start_hour, p.end_hour, p.interval, p.seed,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Load chart: every series of the active table plus the idle baseline.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let Some(table) = app.chart_table() else {
        let msg = Paragraph::new("  no profile built yet")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    };

    // Convert series to f64 data points for the chart
    let names: Vec<String> = table.names().map(str::to_string).collect();
    let mut series_data: Vec<Vec<(f64, f64)>> = table
        .iter()
        .map(|(_, values)| {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, f64::from(v)))
                .collect()
        })
        .collect();

    let baseline: Vec<(f64, f64)> = app
        .profile
        .as_ref()
        .map(|profile| {
            let y = f64::from(profile.stats.idle_baseline_kw);
            (0..table.len()).map(|i| (i as f64, y)).collect()
        })
        .unwrap_or_default();

    series_data.push(baseline);
    let y_bounds = style::auto_bounds_y(&series_data);

    let x_hi = (table.len().saturating_sub(1)).max(1) as f64;

    let mut datasets: Vec<Dataset> = names
        .iter()
        .zip(&series_data)
        .enumerate()
        .map(|(idx, (name, points))| {
            let marker = if name == TOTAL_LOAD {
                symbols::Marker::Braille
            } else {
                symbols::Marker::Dot
            };
            Dataset::default()
                .name(name.clone())
                .marker(marker)
                .style(Style::default().fg(style::series_color(name, idx)))
                .data(points)
        })
        .collect();

    if let Some(baseline) = series_data.last() {
        datasets.push(
            Dataset::default()
                .name("Idle Baseline")
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(style::BASELINE_COLOR))
                .data(baseline),
        );
    }

    let y_label_lo = format!("{:.0}", y_bounds[0]);
    let y_label_hi = format!("{:.0}", y_bounds[1]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(app.chart_title())
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("sample")
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{}", x_hi as usize)]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![y_label_lo, y_label_hi]),
        );

    frame.render_widget(chart, area);
}

/// Summary panel with the aggregate statistics and any status notice.
fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = if let Some(profile) = &app.profile {
        let s = &profile.stats;
        vec![
            Line::from(format!(
                "  mean={:.2} kW  std={:.2} kW  min={:.2}  max={:.2}",
                s.mean_kw, s.std_dev_kw, s.min_kw, s.max_kw,
            )),
            Line::from(format!(
                "  idle baseline={:.2} kW  peaks>{:.2} ({})  valleys<{:.2} ({})",
                s.idle_baseline_kw,
                s.peak_threshold_kw,
                s.peak_count,
                s.valley_threshold_kw,
                s.valley_count,
            )),
            Line::from(format!(
                "  power factor={:.2}  coeff. of variation={:.2}%",
                s.power_factor, s.coefficient_of_variation_pct,
            )),
        ]
    } else {
        vec![Line::from("  no profile built")]
    };

    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(
            format!("  {notice}"),
            Style::default().fg(style::NOTICE_FG),
        )));
    }

    let block = Block::default().title(" Total Load Summary ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Left/Right:Start hour  Up/Down:End hour  1-4:Departments  \
         i:Interval  e:Equipment  Tab:Next dept  r:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
