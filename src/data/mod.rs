//! Data layer - Pure state without UI coupling
//!
//! This module contains the tooth chart state as plain data.
//! NO imports from frontend/ or any rendering code.

pub mod teeth;

pub use teeth::{Jaw, ToothPosition, ToothState, TEETH_PER_QUADRANT};
