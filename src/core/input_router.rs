//! Input routing for the chart
//!
//! Routes keyboard and mouse input to a ChartAction:
//! - keys go through the configured chart keybinds
//! - left clicks go through the hit target under the pointer

use crate::config::ChartKeybinds;
use crate::core::{ChartAction, ChartTarget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

/// Route a key event to a ChartAction
pub fn route_input(key: KeyEvent, keybinds: &ChartKeybinds) -> ChartAction {
    // Ctrl+C always quits, whatever the keybinds say
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return ChartAction::Quit;
    }

    keybinds.resolve_action(key)
}

/// Route a mouse event given what (if anything) is under the pointer
pub fn route_mouse(kind: MouseEventKind, target: Option<ChartTarget>) -> ChartAction {
    match (kind, target) {
        (MouseEventKind::Down(MouseButton::Left), Some(target)) => target.action(),
        _ => ChartAction::None,
    }
}
