//! Shared action vocabulary for the chart.
//!
//! Translates raw `KeyEvent`s and textual keybinds into semantic
//! `ChartAction`s so keyboard and mouse input end up on the same code path.

use crate::data::ToothPosition;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All possible chart actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartAction {
    // Cursor navigation
    MoveLeft,
    MoveRight,
    MoveUp,   // Switch to the upper jaw
    MoveDown, // Switch to the lower jaw
    Home,
    End,

    // State changes
    ToggleCursor,            // Toggle the tooth under the cursor
    Toggle(ToothPosition),   // Toggle a specific tooth (mouse click)
    Reset,

    Quit,

    // No action (key not bound)
    None,
}

impl ChartAction {
    /// True if the action replaces the tooth state
    pub fn mutates_state(&self) -> bool {
        matches!(
            self,
            ChartAction::ToggleCursor | ChartAction::Toggle(_) | ChartAction::Reset
        )
    }
}

/// Clickable things on the rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTarget {
    Tooth(ToothPosition),
    ResetButton,
}

impl ChartTarget {
    pub fn action(self) -> ChartAction {
        match self {
            ChartTarget::Tooth(position) => ChartAction::Toggle(position),
            ChartTarget::ResetButton => ChartAction::Reset,
        }
    }
}

/// Convert KeyEvent to string representation for matching against keybinds
pub fn key_event_to_string(key: KeyEvent) -> String {
    let mut parts = Vec::new();

    // Add modifiers
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    // Add key code
    let key_str = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => {
            // For letter keys with Shift, use uppercase
            if key.modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_lowercase() {
                c.to_ascii_uppercase().to_string()
            } else {
                c.to_string()
            }
        }
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            // BackTab is usually Shift+Tab, so remove Shift from parts if present
            parts.retain(|p| *p != "Shift");
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return String::new(), // Unrecognized key
    };

    parts.push(&key_str);
    parts.join("+")
}

/// Parse a keybind string into components for comparison
pub fn normalize_keybind(s: &str) -> String {
    let parts: Vec<&str> = s.split('+').collect();
    let mut modifiers = Vec::new();
    let mut key = "";

    for part in parts {
        match part.trim() {
            "Ctrl" | "Control" => modifiers.push("Ctrl"),
            "Shift" => modifiers.push("Shift"),
            "Alt" => modifiers.push("Alt"),
            k => key = k,
        }
    }

    // Sort modifiers for consistent comparison
    modifiers.sort();
    modifiers.push(key);
    modifiers.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::teeth::Quadrant;

    #[test]
    fn test_key_event_to_string() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_string(key), "Ctrl+r");

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_string(key), "Shift+Up");

        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key_event_to_string(key), "Space");

        let key = KeyEvent::new(KeyCode::Null, KeyModifiers::NONE);
        assert_eq!(key_event_to_string(key), "");
    }

    #[test]
    fn test_normalize_keybind() {
        assert_eq!(normalize_keybind("Ctrl+s"), "Ctrl+s");
        assert_eq!(normalize_keybind("Control+A"), "Ctrl+A");
        assert_eq!(normalize_keybind("Shift+Ctrl+Left"), "Ctrl+Shift+Left");
        assert_eq!(normalize_keybind("Space"), "Space");
    }

    #[test]
    fn test_targets_map_to_actions() {
        let position = ToothPosition::new(Quadrant::LowerRight, 4).unwrap();
        assert_eq!(
            ChartTarget::Tooth(position).action(),
            ChartAction::Toggle(position)
        );
        assert_eq!(ChartTarget::ResetButton.action(), ChartAction::Reset);
        assert!(ChartAction::Reset.mutates_state());
        assert!(!ChartAction::MoveLeft.mutates_state());
    }
}
