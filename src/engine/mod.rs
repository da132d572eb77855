use bevy::prelude::*;

pub mod camera;
pub mod core;
pub mod effects;
pub mod quality;
pub mod rig;
pub mod scene;
pub mod shell;
pub mod wash;

/// Frame ordering for the engine: sequence/state decisions first, then spawn
/// decisions, then integration, then transform/material presentation. Keeps a
/// state change from being visually one frame late.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSet {
    Sequence,
    Spawn,
    Integrate,
    Present,
}
