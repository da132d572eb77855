use bevy::prelude::*;

use crate::engine::quality::QualitySettings;
use crate::engine::rig::RigBuilt;

/// Staged startup: the engine sits in `Loading` until the device has been
/// profiled and the vehicle rig exists, passes through `RigReady` once the
/// pivots are built, and settles in `Running` for the rest of the session.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    RigReady,
    Running,
}

pub fn transition_to_rig_ready(
    settings: Option<Res<QualitySettings>>,
    rig_built: Res<RigBuilt>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if settings.is_some() && rig_built.built && *state.get() == AppState::Loading {
        println!("→ Vehicle rig built, transitioning to RigReady state");
        next_state.set(AppState::RigReady);
    }
}

pub fn transition_to_running(
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if *state.get() == AppState::RigReady {
        println!("→ Engine configured, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
