//! Core chart logic layer
//!
//! This module contains state management and input routing.
//! NO imports from frontend/ or rendering code.
//! Core updates data structures in the data layer, frontends read and render.

pub mod app_core;
pub mod chart_actions;
pub mod input_router;

pub use app_core::{ChartCore, ChartSummary};
pub use chart_actions::{ChartAction, ChartTarget};
