use bevy::prelude::*;

pub mod sequence;

pub use sequence::{WashSequence, WashState};

use crate::engine::EngineSet;

/// Resource wrapping the pure wash sequence core.
#[derive(Resource, Default)]
pub struct WashController(pub WashSequence);

/// Event fired whenever the wash sequence enters a new state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WashStateChanged(pub WashState);

pub struct WashPlugin;

impl Plugin for WashPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WashController>()
            .add_event::<WashStateChanged>()
            .add_systems(Update, advance_wash_sequence.in_set(EngineSet::Sequence));
    }
}

/// Advance the sequence by the frame delta. Runs before all particle spawn
/// decisions so a transition is never visually one frame late.
pub fn advance_wash_sequence(
    mut controller: ResMut<WashController>,
    mut changed: EventWriter<WashStateChanged>,
    time: Res<Time>,
) {
    if let Some(state) = controller.0.advance(time.delta_secs()) {
        info!("Wash sequence entered {:?}", state);
        changed.write(WashStateChanged(state));
    }
}
