use std::fmt;

use log::debug;
use thiserror::Error;

use crate::registry::EntryId;

/// User intents that move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementAction {
    /// Tap on a picker thumbnail
    Pick(EntryId),
    /// Tap on the cancel button
    Cancel,
    /// Tap on the confirm button
    Confirm,
}

/// Which half of the cycle the UI is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Picker visible, nothing selected
    Idle,
    /// Confirm/cancel visible for the selected entry
    Selecting(EntryId),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Selecting(id) => write!(f, "SELECTING({})", id),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{action:?} is not valid while {phase}")]
    InvalidTransition {
        phase: Phase,
        action: PlacementAction,
    },
}

/// Selected / confirmed slots driving the picker and the placement side effect
///
/// `placement_mode_active` is derived from `selected`, so the two can never
/// disagree. `confirmed` is written only by [`PlacementAction::Confirm`] and
/// cleared only by [`take_confirmed`](Self::take_confirmed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementState {
    selected: Option<EntryId>,
    confirmed: Option<EntryId>,
}

impl PlacementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    pub fn confirmed(&self) -> Option<EntryId> {
        self.confirmed
    }

    /// True while the confirm/cancel panel replaces the picker
    pub fn placement_mode_active(&self) -> bool {
        self.selected.is_some()
    }

    pub fn phase(&self) -> Phase {
        match self.selected {
            Some(id) => Phase::Selecting(id),
            None => Phase::Idle,
        }
    }

    /// Applies one transition; rejected actions leave the state untouched
    pub fn apply(&mut self, action: PlacementAction) -> Result<(), PlacementError> {
        let phase = self.phase();

        match (phase, action) {
            (Phase::Idle, PlacementAction::Pick(id)) => {
                self.selected = Some(id);
            }
            (Phase::Selecting(_), PlacementAction::Cancel) => {
                self.selected = None;
            }
            (Phase::Selecting(id), PlacementAction::Confirm) => {
                // Overwrites an unconsumed confirmation.
                self.confirmed = Some(id);
                self.selected = None;
            }
            _ => return Err(PlacementError::InvalidTransition { phase, action }),
        }

        debug!("Placement {:?}: {} -> {}", action, phase, self.phase());
        Ok(())
    }

    /// Consumes the pending confirmation
    pub fn take_confirmed(&mut self) -> Option<EntryId> {
        self.confirmed.take()
    }
}
