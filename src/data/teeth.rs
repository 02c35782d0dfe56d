//! Tooth-state store
//!
//! One "missing" flag per tooth slot, kept in a single flat array of
//! 4 quadrants x 8 positions. Updates never mutate in place: every operation
//! returns a fresh `ToothState` so the owner can swap it in and recompute
//! anything derived from it.

use std::fmt;

/// Number of tooth slots in one quadrant
pub const TEETH_PER_QUADRANT: usize = 8;

/// Total number of tooth slots on the chart (4 quadrants x 8)
pub const TOOTH_SLOTS: usize = TEETH_PER_QUADRANT * 4;

/// Upper or lower jaw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jaw {
    Upper,
    Lower,
}

/// Patient side (patient's right is drawn on the viewer's left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Right,
    Left,
}

/// The four anatomical tooth groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

impl Quadrant {
    /// All quadrants in storage order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::UpperLeft,
        Quadrant::LowerRight,
        Quadrant::LowerLeft,
    ];

    pub fn new(jaw: Jaw, side: Side) -> Self {
        match (jaw, side) {
            (Jaw::Upper, Side::Right) => Quadrant::UpperRight,
            (Jaw::Upper, Side::Left) => Quadrant::UpperLeft,
            (Jaw::Lower, Side::Right) => Quadrant::LowerRight,
            (Jaw::Lower, Side::Left) => Quadrant::LowerLeft,
        }
    }

    pub fn jaw(self) -> Jaw {
        match self {
            Quadrant::UpperRight | Quadrant::UpperLeft => Jaw::Upper,
            Quadrant::LowerRight | Quadrant::LowerLeft => Jaw::Lower,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Quadrant::UpperRight | Quadrant::LowerRight => Side::Right,
            Quadrant::UpperLeft | Quadrant::LowerLeft => Side::Left,
        }
    }

    /// FDI quadrant digit (UR=1, UL=2, LL=3, LR=4)
    pub fn fdi_digit(self) -> u8 {
        match self {
            Quadrant::UpperRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::LowerLeft => 3,
            Quadrant::LowerRight => 4,
        }
    }

    /// Short clinical label, e.g. "UR"
    pub fn short_label(self) -> &'static str {
        match self {
            Quadrant::UpperRight => "UR",
            Quadrant::UpperLeft => "UL",
            Quadrant::LowerRight => "LR",
            Quadrant::LowerLeft => "LL",
        }
    }

    fn storage_index(self) -> usize {
        match self {
            Quadrant::UpperRight => 0,
            Quadrant::UpperLeft => 1,
            Quadrant::LowerRight => 2,
            Quadrant::LowerLeft => 3,
        }
    }
}

/// A single tooth slot: quadrant plus on-screen index (0 = leftmost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToothPosition {
    quadrant: Quadrant,
    index: u8,
}

impl ToothPosition {
    /// Upper right third molar, the viewer's top-left slot
    pub const FIRST: ToothPosition = ToothPosition {
        quadrant: Quadrant::UpperRight,
        index: 0,
    };

    /// Returns None if `index` is outside 0..8
    pub fn new(quadrant: Quadrant, index: usize) -> Option<Self> {
        if index < TEETH_PER_QUADRANT {
            Some(Self {
                quadrant,
                index: index as u8,
            })
        } else {
            None
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Tooth number within the quadrant, counted from the midline (1..=8)
    ///
    /// Right quadrants are drawn 8..1 and left quadrants 1..8, so index 0
    /// is the third molar on the right and the central incisor on the left.
    pub fn tooth_number(&self) -> u8 {
        match self.quadrant.side() {
            Side::Right => TEETH_PER_QUADRANT as u8 - self.index,
            Side::Left => self.index + 1,
        }
    }

    /// Two-digit FDI notation ("18", "21", ...)
    pub fn fdi_code(&self) -> u8 {
        self.quadrant.fdi_digit() * 10 + self.tooth_number()
    }

    /// Column on the 16-wide display row (0 = viewer's far left)
    pub fn display_column(&self) -> usize {
        match self.quadrant.side() {
            Side::Right => self.index(),
            Side::Left => TEETH_PER_QUADRANT + self.index(),
        }
    }

    /// Position at `column` (0..16) of the given jaw's display row
    pub fn from_display(jaw: Jaw, column: usize) -> Option<Self> {
        if column < TEETH_PER_QUADRANT {
            Self::new(Quadrant::new(jaw, Side::Right), column)
        } else {
            Self::new(
                Quadrant::new(jaw, Side::Left),
                column - TEETH_PER_QUADRANT,
            )
        }
    }

    /// Every slot, quadrant by quadrant, left to right
    pub fn all() -> impl Iterator<Item = ToothPosition> {
        Quadrant::ALL.into_iter().flat_map(|quadrant| {
            (0..TEETH_PER_QUADRANT as u8).map(move |index| ToothPosition { quadrant, index })
        })
    }

    fn flat_index(&self) -> usize {
        self.quadrant.storage_index() * TEETH_PER_QUADRANT + self.index()
    }
}

impl fmt::Display for ToothPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} ({})",
            self.quadrant.short_label(),
            self.tooth_number(),
            self.fdi_code()
        )
    }
}

/// Missing-tooth flags for the whole chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ToothState {
    missing: [bool; TOOTH_SLOTS],
}

impl ToothState {
    /// All teeth present
    pub fn new() -> Self {
        Self::default()
    }

    /// All-false state; resetting an already clear chart is a no-op
    pub fn reset() -> Self {
        Self::default()
    }

    /// Copy of this state with the flag at `position` flipped
    #[must_use]
    pub fn toggled(self, position: ToothPosition) -> Self {
        let mut next = self;
        let slot = position.flat_index();
        next.missing[slot] = !next.missing[slot];
        next
    }

    /// Toggle addressed by jaw, side and index, as emitted by the chart grid
    #[must_use]
    pub fn toggle_at(self, jaw: Jaw, side: Side, index: usize) -> Option<Self> {
        ToothPosition::new(Quadrant::new(jaw, side), index).map(|position| self.toggled(position))
    }

    pub fn is_missing(&self, position: ToothPosition) -> bool {
        self.missing[position.flat_index()]
    }

    pub fn missing_count(&self) -> usize {
        self.missing.iter().filter(|missing| **missing).count()
    }

    pub fn iter_missing(&self) -> impl Iterator<Item = ToothPosition> + '_ {
        ToothPosition::all().filter(move |position| self.is_missing(*position))
    }

    pub fn is_empty(&self) -> bool {
        self.missing_count() == 0
    }
}
