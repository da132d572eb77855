use crate::constants::effect_settings::{DIRTY_HOLD_SECS, FOAMING_HOLD_SECS, RINSE_HOLD_SECS};

/// Exterior cleaning condition, read by the particle simulations and the
/// material opacity interpolators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WashState {
    #[default]
    Clean,
    Dirty,
    Foaming,
    Rinsing,
}

/// Timed cleaning cycle: clean -> dirty -> foaming -> rinsing -> clean.
///
/// Deliberately a pure value driven by a single time-in-state accumulator
/// advanced with the frame delta, so the whole cycle is deterministic and
/// testable without wall-clock waits. Entry to dirty is immediate on start;
/// every later transition is purely timer driven.
#[derive(Debug, Clone, Copy, Default)]
pub struct WashSequence {
    state: WashState,
    time_in_state: f32,
}

impl WashSequence {
    pub fn state(&self) -> WashState {
        self.state
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Begin the cycle. Idempotent while foam or rinse is already running so
    /// a repeated selection cannot stack overlapping timer chains.
    pub fn start(&mut self) -> bool {
        match self.state {
            WashState::Foaming | WashState::Rinsing => false,
            WashState::Clean | WashState::Dirty => {
                self.state = WashState::Dirty;
                self.time_in_state = 0.0;
                true
            }
        }
    }

    /// Abandon the cycle: snap to clean immediately and drop any pending
    /// transition, so partial foam or dirt never outlives the selection.
    pub fn cancel(&mut self) {
        self.state = WashState::Clean;
        self.time_in_state = 0.0;
    }

    /// Advance by one frame delta. Returns the new state when a transition
    /// fired this frame. At most one transition fires per call, so states are
    /// never skipped even for oversized deltas.
    pub fn advance(&mut self, dt: f32) -> Option<WashState> {
        self.time_in_state += dt;

        let next = match self.state {
            WashState::Clean => None,
            WashState::Dirty if self.time_in_state >= DIRTY_HOLD_SECS => Some(WashState::Foaming),
            WashState::Foaming if self.time_in_state >= FOAMING_HOLD_SECS => {
                Some(WashState::Rinsing)
            }
            WashState::Rinsing if self.time_in_state >= RINSE_HOLD_SECS => Some(WashState::Clean),
            _ => None,
        };

        if let Some(state) = next {
            self.state = state;
            self.time_in_state = 0.0;
        }
        next
    }
}
