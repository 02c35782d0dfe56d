//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, hit-testing
//! and cleanup, so the main loop never touches ratatui directly.

pub mod events;
pub mod tui;

use crate::core::{ChartCore, ChartTarget};
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum. Empty if nothing arrived
    /// within the poll timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current chart state
    ///
    /// Called after events have been applied, so the summary read from
    /// `core` always matches its tooth state.
    fn render(&mut self, core: &ChartCore) -> Result<()>;

    /// What is drawn at the given screen cell in the last rendered frame
    fn hit_test(&self, x: u16, y: u16) -> Option<ChartTarget>;

    /// Cleanup and shutdown the frontend
    ///
    /// Restores the terminal before the application exits.
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal size
    ///
    /// # Returns
    /// - `(width, height)` tuple
    fn size(&self) -> (u16, u16);
}
