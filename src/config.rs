//! Configuration loader plus strongly typed settings structures.
//!
//! The chart reads a single `config.toml` from the data directory
//! (`~/.dental-chart` or `$DENTAL_CHART_DIR`). Defaults are embedded in the
//! binary and extracted on first run; every field also has a serde default so
//! partial files keep working.

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod keybind_validator;

// Embed entire directory - automatically includes all files
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

// Keep embedded default config for fallback
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Top-level configuration object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub colors: ChartColors,
    #[serde(default)]
    pub keybinds: ChartKeybinds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_border")]
    pub show_border: bool,
    #[serde(default = "default_border_style")]
    pub border_style: String, // "single", "double", "rounded", "thick"
    #[serde(default)]
    pub border_sides: BorderSides,
    #[serde(default = "default_content_align")]
    pub content_align: String,
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64, // Event poll timeout in milliseconds
    #[serde(default = "default_missing_glyph")]
    pub missing_glyph: String,
    #[serde(default = "default_present_glyph")]
    pub present_glyph: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_border: default_show_border(),
            border_style: default_border_style(),
            border_sides: BorderSides::default(),
            content_align: default_content_align(),
            poll_timeout_ms: default_poll_timeout_ms(),
            missing_glyph: default_missing_glyph(),
            present_glyph: default_present_glyph(),
        }
    }
}

fn default_show_border() -> bool {
    true
}

fn default_border_style() -> String {
    "rounded".to_string()
}

fn default_content_align() -> String {
    "top".to_string()
}

fn default_poll_timeout_ms() -> u64 {
    16
}

fn default_missing_glyph() -> String {
    "●".to_string()
}

fn default_present_glyph() -> String {
    " ".to_string()
}

/// Chart colors as "#rrggbb" strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartColors {
    #[serde(default = "default_missing_color")]
    pub missing: String,
    #[serde(default = "default_present_color")]
    pub present: String,
    #[serde(default = "default_cursor_color")]
    pub cursor: String,
    #[serde(default = "default_border_color")]
    pub border: String,
    #[serde(default = "default_label_color")]
    pub label: String,
    #[serde(default = "default_number_color")]
    pub number: String,
    #[serde(default = "default_count_color")]
    pub count: String,
    #[serde(default = "default_combinations_color")]
    pub combinations: String,
    #[serde(default)]
    pub background: Option<String>, // None = transparent
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            missing: default_missing_color(),
            present: default_present_color(),
            cursor: default_cursor_color(),
            border: default_border_color(),
            label: default_label_color(),
            number: default_number_color(),
            count: default_count_color(),
            combinations: default_combinations_color(),
            background: None,
        }
    }
}

fn default_missing_color() -> String {
    "#dc2626".to_string()
}

fn default_present_color() -> String {
    "#9ca3af".to_string()
}

fn default_cursor_color() -> String {
    "#facc15".to_string()
}

fn default_border_color() -> String {
    "#3b82f6".to_string()
}

fn default_label_color() -> String {
    "#e5e7eb".to_string()
}

fn default_number_color() -> String {
    "#9ca3af".to_string()
}

fn default_count_color() -> String {
    "#ef4444".to_string()
}

fn default_combinations_color() -> String {
    "#60a5fa".to_string()
}

/// Keyboard bindings for the chart, in `key_event_to_string` format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartKeybinds {
    #[serde(default = "default_move_left")]
    pub move_left: String,
    #[serde(default = "default_move_right")]
    pub move_right: String,
    #[serde(default = "default_move_up")]
    pub move_up: String,
    #[serde(default = "default_move_down")]
    pub move_down: String,
    #[serde(default = "default_home")]
    pub home: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_toggle")]
    pub toggle: String,
    #[serde(default = "default_reset")]
    pub reset: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

/// Built-in keybinds, shared by serde defaults and the validator's auto-fix
pub struct KeybindDefaults {
    pub move_left: &'static str,
    pub move_right: &'static str,
    pub move_up: &'static str,
    pub move_down: &'static str,
    pub home: &'static str,
    pub end: &'static str,
    pub toggle: &'static str,
    pub reset: &'static str,
    pub quit: &'static str,
}

impl ChartKeybinds {
    pub const DEFAULTS: KeybindDefaults = KeybindDefaults {
        move_left: "Left",
        move_right: "Right",
        move_up: "Up",
        move_down: "Down",
        home: "Home",
        end: "End",
        toggle: "Space",
        reset: "r",
        quit: "q",
    };

    /// Resolve a key event to a chart action
    pub fn resolve_action(
        &self,
        key: crossterm::event::KeyEvent,
    ) -> crate::core::ChartAction {
        use crate::core::chart_actions::{key_event_to_string, normalize_keybind};
        use crate::core::ChartAction;

        let key_str = key_event_to_string(key);
        if key_str.is_empty() {
            return ChartAction::None;
        }
        let key_str = normalize_keybind(&key_str);

        let bound = |binding: &String| {
            !binding.trim().is_empty() && normalize_keybind(binding) == key_str
        };

        // First match wins when the same key is bound twice
        if bound(&self.quit) {
            ChartAction::Quit
        } else if bound(&self.toggle) {
            ChartAction::ToggleCursor
        } else if bound(&self.reset) {
            ChartAction::Reset
        } else if bound(&self.move_left) {
            ChartAction::MoveLeft
        } else if bound(&self.move_right) {
            ChartAction::MoveRight
        } else if bound(&self.move_up) {
            ChartAction::MoveUp
        } else if bound(&self.move_down) {
            ChartAction::MoveDown
        } else if bound(&self.home) {
            ChartAction::Home
        } else if bound(&self.end) {
            ChartAction::End
        } else {
            ChartAction::None
        }
    }
}

impl Default for ChartKeybinds {
    fn default() -> Self {
        Self {
            move_left: default_move_left(),
            move_right: default_move_right(),
            move_up: default_move_up(),
            move_down: default_move_down(),
            home: default_home(),
            end: default_end(),
            toggle: default_toggle(),
            reset: default_reset(),
            quit: default_quit(),
        }
    }
}

fn default_move_left() -> String {
    ChartKeybinds::DEFAULTS.move_left.to_string()
}
fn default_move_right() -> String {
    ChartKeybinds::DEFAULTS.move_right.to_string()
}
fn default_move_up() -> String {
    ChartKeybinds::DEFAULTS.move_up.to_string()
}
fn default_move_down() -> String {
    ChartKeybinds::DEFAULTS.move_down.to_string()
}
fn default_home() -> String {
    ChartKeybinds::DEFAULTS.home.to_string()
}
fn default_end() -> String {
    ChartKeybinds::DEFAULTS.end.to_string()
}
fn default_toggle() -> String {
    ChartKeybinds::DEFAULTS.toggle.to_string()
}
fn default_reset() -> String {
    ChartKeybinds::DEFAULTS.reset.to_string()
}
fn default_quit() -> String {
    ChartKeybinds::DEFAULTS.quit.to_string()
}

/// Border sides configuration - which borders to show
/// Serializes to/from array of strings in TOML: ["left", "right", "top", "bottom"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BorderSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for BorderSides {
    fn default() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

// Convert from TOML array format ["left", "right"] to BorderSides struct
impl From<Vec<String>> for BorderSides {
    fn from(sides: Vec<String>) -> Self {
        let mut border = Self {
            top: false,
            bottom: false,
            left: false,
            right: false,
        };

        for side in sides {
            match side.to_lowercase().as_str() {
                "top" => border.top = true,
                "bottom" => border.bottom = true,
                "left" => border.left = true,
                "right" => border.right = true,
                _ => {} // Ignore unknown sides
            }
        }

        border
    }
}

// Convert from BorderSides struct to TOML array format
impl From<BorderSides> for Vec<String> {
    fn from(border: BorderSides) -> Self {
        let mut sides = Vec::new();
        if border.top {
            sides.push("top".to_string());
        }
        if border.bottom {
            sides.push("bottom".to_string());
        }
        if border.left {
            sides.push("left".to_string());
        }
        if border.right {
            sides.push("right".to_string());
        }
        sides
    }
}

/// Parse border sides configuration into ratatui Borders bitflags
pub fn parse_border_sides(sides: &BorderSides) -> ratatui::widgets::Borders {
    use ratatui::widgets::Borders;

    let mut borders = Borders::empty();
    if sides.top {
        borders |= Borders::TOP;
    }
    if sides.bottom {
        borders |= Borders::BOTTOM;
    }
    if sides.left {
        borders |= Borders::LEFT;
    }
    if sides.right {
        borders |= Borders::RIGHT;
    }

    if borders.is_empty() {
        Borders::ALL // Fallback if somehow all are false
    } else {
        borders
    }
}

/// Content alignment of the chart within the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAlign {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ContentAlign {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "top-left" | "topleft" => ContentAlign::TopLeft,
            "top" | "top-center" | "topcenter" => ContentAlign::Top,
            "top-right" | "topright" => ContentAlign::TopRight,
            "left" | "center-left" | "centerleft" => ContentAlign::Left,
            "center" => ContentAlign::Center,
            "right" | "center-right" | "centerright" => ContentAlign::Right,
            "bottom-left" | "bottomleft" => ContentAlign::BottomLeft,
            "bottom" | "bottom-center" | "bottomcenter" => ContentAlign::Bottom,
            "bottom-right" | "bottomright" => ContentAlign::BottomRight,
            _ => ContentAlign::Top,
        }
    }

    /// Calculate offset for rendering content within a larger area
    /// Returns (row_offset, col_offset)
    pub fn calculate_offset(
        &self,
        content_width: u16,
        content_height: u16,
        area_width: u16,
        area_height: u16,
    ) -> (u16, u16) {
        let row_offset = match self {
            ContentAlign::TopLeft | ContentAlign::Top | ContentAlign::TopRight => 0,
            ContentAlign::Left | ContentAlign::Center | ContentAlign::Right => {
                (area_height.saturating_sub(content_height)) / 2
            }
            ContentAlign::BottomLeft | ContentAlign::Bottom | ContentAlign::BottomRight => {
                area_height.saturating_sub(content_height)
            }
        };

        let col_offset = match self {
            ContentAlign::TopLeft | ContentAlign::Left | ContentAlign::BottomLeft => 0,
            ContentAlign::Top | ContentAlign::Center | ContentAlign::Bottom => {
                (area_width.saturating_sub(content_width)) / 2
            }
            ContentAlign::TopRight | ContentAlign::Right | ContentAlign::BottomRight => {
                area_width.saturating_sub(content_width)
            }
        };

        (row_offset, col_offset)
    }
}

impl Config {
    /// Load `config.toml` from the data directory, extracting defaults first
    ///
    /// Falls back to the embedded defaults when no home directory can be found.
    pub fn load() -> Result<Self> {
        match Self::base_dir() {
            Ok(dir) => Self::load_from_dir(&dir),
            Err(e) => {
                tracing::warn!("No data directory ({}), using built-in config", e);
                Self::embedded_default()
            }
        }
    }

    /// Load `config.toml` from `dir`, extracting defaults there if missing
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::extract_defaults(dir)?;
        Self::load_from_path(&dir.join("config.toml"))
    }

    /// Load a config file from an explicit path (no defaults extraction)
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let mut config = Self::parse(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        config.fix_keybinds();
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Configuration compiled into the binary
    pub fn embedded_default() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG).context("Embedded default config is invalid")
    }

    /// Validate keybinds, restoring defaults for missing critical bindings
    fn fix_keybinds(&mut self) {
        let validation = keybind_validator::validate_keybinds(&self.keybinds);
        if validation.has_errors() {
            tracing::warn!(
                "Keybind validation found {} errors",
                validation.errors().len()
            );
            for error in validation.errors() {
                tracing::warn!("  {}", error.message());
            }

            let fixed = keybind_validator::auto_fix_keybinds(&mut self.keybinds, &validation.issues);
            if fixed > 0 {
                tracing::info!("Auto-fixed {} keybind issues", fixed);
            }
        }
        if validation.has_warnings() {
            for warning in validation.warnings() {
                tracing::warn!("Keybind warning: {}", warning.message());
            }
        }
    }

    /// Get the base data directory (~/.dental-chart/)
    /// Can be overridden with DENTAL_CHART_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("DENTAL_CHART_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".dental-chart"))
    }

    /// Get path to config.toml in the data directory
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Write every embedded default file into `dir` unless it already exists
    fn extract_defaults(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).context(format!("Failed to create data directory {:?}", dir))?;

        for file in DEFAULTS_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid default filename")?;
            let target = dir.join(filename);

            if !target.exists() {
                fs::write(&target, file.contents())
                    .context(format!("Failed to write {}", filename))?;
                tracing::info!("Extracted {} to {:?}", filename, target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_serde_defaults() {
        let embedded = Config::embedded_default().expect("embedded config parses");
        let empty = Config::parse("").expect("empty config parses");

        assert_eq!(embedded.ui.border_style, empty.ui.border_style);
        assert_eq!(embedded.ui.poll_timeout_ms, empty.ui.poll_timeout_ms);
        assert_eq!(embedded.colors.missing, empty.colors.missing);
        assert_eq!(embedded.keybinds.toggle, "Space");
        assert_eq!(embedded.keybinds.quit, empty.keybinds.quit);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r##"
            [ui]
            content_align = "center"
            border_sides = ["top", "bottom"]

            [colors]
            missing = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.ui.content_align, "center");
        assert!(config.ui.show_border);
        assert_eq!(
            config.ui.border_sides,
            BorderSides {
                top: true,
                bottom: true,
                left: false,
                right: false
            }
        );
        assert_eq!(config.colors.missing, "#ff0000");
        assert_eq!(config.colors.cursor, default_cursor_color());
        assert_eq!(config.keybinds.reset, "r");
    }

    #[test]
    fn test_load_from_dir_extracts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();

        assert!(dir.path().join("config.toml").exists());
        assert_eq!(config.keybinds.toggle, "Space");
    }

    #[test]
    fn test_load_keeps_existing_file_and_fixes_keybinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[keybinds]\nquit = \"\"\nreset = \"x\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.keybinds.reset, "x");
        assert_eq!(config.keybinds.quit, "q");
    }

    #[test]
    fn test_load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[ui\nshow_border = yes").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_border_sides_round_trip_strings() {
        let sides = BorderSides::from(vec!["LEFT".to_string(), "bogus".to_string()]);
        assert!(sides.left && !sides.top && !sides.right && !sides.bottom);
        let names: Vec<String> = sides.into();
        assert_eq!(names, vec!["left".to_string()]);
    }

    #[test]
    fn test_parse_border_sides_falls_back_to_all() {
        use ratatui::widgets::Borders;
        let none = BorderSides {
            top: false,
            bottom: false,
            left: false,
            right: false,
        };
        assert_eq!(parse_border_sides(&none), Borders::ALL);
        assert_eq!(parse_border_sides(&BorderSides::default()), Borders::ALL);
    }

    #[test]
    fn test_content_align_offsets() {
        assert_eq!(ContentAlign::parse("center"), ContentAlign::Center);
        assert_eq!(ContentAlign::parse("nonsense"), ContentAlign::Top);
        assert_eq!(ContentAlign::Center.calculate_offset(10, 4, 20, 10), (3, 5));
        assert_eq!(ContentAlign::BottomRight.calculate_offset(10, 4, 20, 10), (6, 10));
        // Content larger than the area never underflows
        assert_eq!(ContentAlign::Center.calculate_offset(30, 20, 20, 10), (0, 0));
    }
}
