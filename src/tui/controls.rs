//! Keyboard input handling for the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::series::Department;

use super::runtime::App;

/// Maps a key event to a filter action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Left => app.shift_start_hour(-1),
        KeyCode::Right => app.shift_start_hour(1),
        KeyCode::Down => app.shift_end_hour(-1),
        KeyCode::Up => app.shift_end_hour(1),
        KeyCode::Char('1') => app.toggle_department(Department::Sintering),
        KeyCode::Char('2') => app.toggle_department(Department::Pelletizing),
        KeyCode::Char('3') => app.toggle_department(Department::Dri),
        KeyCode::Char('4') => app.toggle_department(Department::BlastFurnace),
        KeyCode::Char('i') => app.toggle_interval(),
        KeyCode::Char('e') => app.toggle_drilldown(),
        KeyCode::Tab => app.cycle_drilldown_department(),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}
