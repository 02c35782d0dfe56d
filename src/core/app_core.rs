//! Core chart state - frontend-agnostic
//!
//! `ChartCore` owns the tooth state and everything derived from it. All
//! mutations go through [`ChartCore::apply`], which swaps in the new state and
//! recomputes the summary before returning, so a frontend rendering after any
//! call always sees matching values.

use crate::combinatorics::{missing_tooth_patterns, DENTITION_SIZE};
use crate::config::Config;
use crate::core::{ChartAction, ChartTarget};
use crate::core::input_router;
use crate::data::{Jaw, ToothPosition, ToothState, TEETH_PER_QUADRANT};
use crossterm::event::{KeyEvent, MouseEventKind};

/// Values derived from a `ToothState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSummary {
    /// Number of slots flagged missing
    pub missing_count: usize,
    /// C(28, missing_count)
    pub combinations: u128,
}

impl ChartSummary {
    pub fn from_state(state: &ToothState) -> Self {
        let missing_count = state.missing_count();
        Self {
            missing_count,
            combinations: missing_tooth_patterns(missing_count),
        }
    }

    /// More slots marked than the dentition has teeth (third molars included)
    pub fn exceeds_dentition(&self) -> bool {
        self.missing_count as i64 > DENTITION_SIZE
    }
}

/// Chart application core
pub struct ChartCore {
    /// Application configuration
    pub config: Config,

    state: ToothState,
    summary: ChartSummary,

    /// Tooth under the keyboard cursor
    cursor: ToothPosition,

    /// Application running flag
    pub running: bool,

    /// Set whenever something visible changed since the last render
    pub needs_render: bool,

    /// Status bar text
    pub status_text: String,
}

impl ChartCore {
    pub fn new(config: Config) -> Self {
        let state = ToothState::new();
        Self {
            config,
            state,
            summary: ChartSummary::from_state(&state),
            cursor: ToothPosition::FIRST,
            running: true,
            needs_render: true,
            status_text: String::new(),
        }
    }

    pub fn state(&self) -> &ToothState {
        &self.state
    }

    pub fn summary(&self) -> ChartSummary {
        self.summary
    }

    pub fn cursor(&self) -> ToothPosition {
        self.cursor
    }

    /// Handle a key press through the configured keybinds
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = input_router::route_input(key, &self.config.keybinds);
        self.apply(action);
    }

    /// Handle a mouse event; `target` is whatever the frontend found under the pointer
    pub fn handle_mouse(
        &mut self,
        kind: MouseEventKind,
        target: Option<ChartTarget>,
    ) {
        let action = input_router::route_mouse(kind, target);
        self.apply(action);
    }

    /// Apply one action; derived values are current when this returns
    pub fn apply(&mut self, action: ChartAction) {
        if action.mutates_state() {
            tracing::debug!(?action, "Applying chart action");
        }

        match action {
            ChartAction::MoveLeft => self.move_cursor_column(-1),
            ChartAction::MoveRight => self.move_cursor_column(1),
            ChartAction::MoveUp => self.move_cursor_jaw(Jaw::Upper),
            ChartAction::MoveDown => self.move_cursor_jaw(Jaw::Lower),
            ChartAction::Home => self.set_cursor_column(0),
            ChartAction::End => self.set_cursor_column(TEETH_PER_QUADRANT * 2 - 1),
            ChartAction::ToggleCursor => self.toggle(self.cursor),
            ChartAction::Toggle(position) => {
                self.cursor = position;
                self.toggle(position);
            }
            ChartAction::Reset => {
                self.replace_state(ToothState::reset());
                self.status_text = "リセットしました / Chart reset".to_string();
                tracing::info!("Chart reset");
            }
            ChartAction::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            ChartAction::None => {}
        }
    }

    fn toggle(&mut self, position: ToothPosition) {
        let quadrant = position.quadrant();
        let Some(next) = self
            .state
            .toggle_at(quadrant.jaw(), quadrant.side(), position.index())
        else {
            return;
        };
        let now_missing = next.is_missing(position);
        self.replace_state(next);

        self.status_text = if now_missing {
            format!("{} marked missing", position)
        } else {
            format!("{} marked present", position)
        };
    }

    /// Swap in a new state and recompute its summary
    fn replace_state(&mut self, next: ToothState) {
        self.state = next;
        self.summary = ChartSummary::from_state(&self.state);
        self.needs_render = true;
        tracing::debug!(
            missing = self.summary.missing_count,
            combinations = %self.summary.combinations,
            "Tooth state replaced"
        );
    }

    fn move_cursor_column(&mut self, delta: isize) {
        let column = self.cursor.display_column() as isize + delta;
        let max = (TEETH_PER_QUADRANT * 2 - 1) as isize;
        self.set_cursor_column(column.clamp(0, max) as usize);
    }

    fn set_cursor_column(&mut self, column: usize) {
        if let Some(position) = ToothPosition::from_display(self.cursor.quadrant().jaw(), column) {
            self.move_cursor_to(position);
        }
    }

    fn move_cursor_jaw(&mut self, jaw: Jaw) {
        if let Some(position) = ToothPosition::from_display(jaw, self.cursor.display_column()) {
            self.move_cursor_to(position);
        }
    }

    fn move_cursor_to(&mut self, position: ToothPosition) {
        if position != self.cursor {
            self.cursor = position;
            self.needs_render = true;
        }
    }
}
