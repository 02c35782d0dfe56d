//! Chart keybind validator
//!
//! Validates that every chart action has a keybind assigned
//! and checks for duplicate bindings.

use crate::config::ChartKeybinds;
use crate::core::chart_actions::normalize_keybind;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    MissingCriticalBinding {
        action: String,
        field: String,
        default: String,
    },
    DuplicateBinding {
        keybind: String,
        actions: Vec<String>,
    },
}

impl ValidationIssue {
    pub fn severity(&self) -> ValidationSeverity {
        match self {
            ValidationIssue::MissingCriticalBinding { .. } => ValidationSeverity::Error,
            ValidationIssue::DuplicateBinding { .. } => ValidationSeverity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::MissingCriticalBinding {
                action,
                field,
                default,
            } => {
                format!(
                    "Action '{}' has no keybind! Field '{}' is empty. Default: {}",
                    action, field, default
                )
            }
            ValidationIssue::DuplicateBinding { keybind, actions } => {
                format!(
                    "Keybind '{}' is assigned to multiple actions: {}",
                    keybind,
                    actions.join(", ")
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Warning))
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Error))
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Warning))
            .collect()
    }
}

/// (display name, field name, current value, default) for every chart binding
fn bindings(keybinds: &ChartKeybinds) -> Vec<(&'static str, &'static str, &str, &'static str)> {
    let defaults = ChartKeybinds::DEFAULTS;
    vec![
        ("Move Left", "move_left", keybinds.move_left.as_str(), defaults.move_left),
        ("Move Right", "move_right", keybinds.move_right.as_str(), defaults.move_right),
        ("Move Up", "move_up", keybinds.move_up.as_str(), defaults.move_up),
        ("Move Down", "move_down", keybinds.move_down.as_str(), defaults.move_down),
        ("Home", "home", keybinds.home.as_str(), defaults.home),
        ("End", "end", keybinds.end.as_str(), defaults.end),
        ("Toggle Tooth", "toggle", keybinds.toggle.as_str(), defaults.toggle),
        ("Reset Chart", "reset", keybinds.reset.as_str(), defaults.reset),
        ("Quit", "quit", keybinds.quit.as_str(), defaults.quit),
    ]
}

/// Validate chart keybinds configuration
pub fn validate_keybinds(keybinds: &ChartKeybinds) -> ValidationResult {
    let mut issues = Vec::new();

    // Bindings the chart cannot be driven without
    for (action, field, value, default) in bindings(keybinds) {
        if matches!(
            field,
            "toggle" | "reset" | "quit" | "move_left" | "move_right" | "move_up" | "move_down"
        ) && value.trim().is_empty()
        {
            issues.push(ValidationIssue::MissingCriticalBinding {
                action: action.to_string(),
                field: field.to_string(),
                default: default.to_string(),
            });
        }
    }

    check_duplicates(&mut issues, keybinds);

    ValidationResult { issues }
}

/// Check for duplicate keybind assignments
fn check_duplicates(issues: &mut Vec<ValidationIssue>, keybinds: &ChartKeybinds) {
    let mut keybind_map: HashMap<String, Vec<String>> = HashMap::new();

    for (_, field, value, _) in bindings(keybinds) {
        if !value.trim().is_empty() {
            keybind_map
                .entry(normalize_keybind(value))
                .or_default()
                .push(field.to_string());
        }
    }

    let mut duplicates: Vec<_> = keybind_map
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .collect();
    duplicates.sort();

    for (keybind, actions) in duplicates {
        issues.push(ValidationIssue::DuplicateBinding { keybind, actions });
    }
}

/// Auto-fix validation issues by restoring defaults
pub fn auto_fix_keybinds(keybinds: &mut ChartKeybinds, issues: &[ValidationIssue]) -> usize {
    let mut fixed_count = 0;

    for issue in issues {
        if let ValidationIssue::MissingCriticalBinding { field, default, .. } = issue {
            let slot = match field.as_str() {
                "move_left" => &mut keybinds.move_left,
                "move_right" => &mut keybinds.move_right,
                "move_up" => &mut keybinds.move_up,
                "move_down" => &mut keybinds.move_down,
                "toggle" => &mut keybinds.toggle,
                "reset" => &mut keybinds.reset,
                "quit" => &mut keybinds.quit,
                _ => continue,
            };
            *slot = default.clone();
            fixed_count += 1;
        }
    }

    fixed_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keybinds() {
        let keybinds = ChartKeybinds::default();
        let result = validate_keybinds(&keybinds);
        assert!(result.is_valid());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_missing_critical_binding() {
        let mut keybinds = ChartKeybinds::default();
        keybinds.toggle = String::new();

        let result = validate_keybinds(&keybinds);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].message().contains("toggle"));
    }

    #[test]
    fn test_empty_optional_binding_is_allowed() {
        let mut keybinds = ChartKeybinds::default();
        keybinds.home = String::new();
        assert!(validate_keybinds(&keybinds).is_valid());
    }

    #[test]
    fn test_duplicate_binding_is_warning() {
        let mut keybinds = ChartKeybinds::default();
        keybinds.reset = "q".to_string();

        let result = validate_keybinds(&keybinds);
        assert!(result.is_valid());
        assert!(result.has_warnings());
        match result.warnings()[0] {
            ValidationIssue::DuplicateBinding { keybind, actions } => {
                assert_eq!(keybind, "q");
                assert_eq!(actions.len(), 2);
            }
            other => panic!("unexpected issue: {:?}", other),
        }
    }

    #[test]
    fn test_auto_fix() {
        let mut keybinds = ChartKeybinds::default();
        keybinds.quit = String::new();
        keybinds.reset = " ".to_string();

        let result = validate_keybinds(&keybinds);
        assert_eq!(result.errors().len(), 2);

        let fixed = auto_fix_keybinds(&mut keybinds, &result.issues);
        assert_eq!(fixed, 2);
        assert_eq!(keybinds.quit, "q");
        assert_eq!(keybinds.reset, "r");

        let result2 = validate_keybinds(&keybinds);
        assert!(result2.is_valid());
    }

    #[test]
    fn test_blank_jaw_moves_are_critical_and_fixed() {
        let mut keybinds = ChartKeybinds::default();
        keybinds.move_up = String::new();
        keybinds.move_down = "  ".to_string();

        let result = validate_keybinds(&keybinds);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 2);

        let fixed = auto_fix_keybinds(&mut keybinds, &result.issues);
        assert_eq!(fixed, 2);
        assert_eq!(keybinds.move_up, "Up");
        assert_eq!(keybinds.move_down, "Down");
        assert!(validate_keybinds(&keybinds).is_valid());
    }
}
