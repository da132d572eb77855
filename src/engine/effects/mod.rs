use bevy::prelude::*;

pub mod collision;
pub mod dirt;
pub mod foam;
pub mod pet_hair;
pub mod pool;
pub mod rinse;
pub mod sparkle;
pub mod splats;

pub use collision::WorldAabb;
pub use pool::{Particle, ParticlePool};
pub use splats::SplatEvent;

use crate::engine::EngineSet;
use crate::engine::quality::QualitySettings;

/// Move a single fade scalar toward its target at a constant rate. Every
/// accumulation layer shares one of these instead of per-item aging, so a
/// whole layer costs one interpolation per frame.
pub fn fade_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = rate * dt;
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SplatEvent>()
            .add_systems(
                Update,
                (
                    foam::setup_foam.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<foam::FoamSim>)),
                    ),
                    rinse::setup_rinse.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<rinse::RinseSim>)),
                    ),
                    splats::setup_splats.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<splats::SplatLayer>)),
                    ),
                    dirt::setup_dirt.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<dirt::DirtLayer>)),
                    ),
                    sparkle::setup_sparkle.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<sparkle::SparkleState>)),
                    ),
                    pet_hair::setup_hair.run_if(
                        resource_exists::<QualitySettings>
                            .and(not(resource_exists::<pet_hair::HairLayer>)),
                    ),
                ),
            )
            .add_systems(
                Update,
                (
                    foam::spawn_foam.run_if(resource_exists::<foam::FoamSim>),
                    rinse::spawn_rinse.run_if(resource_exists::<rinse::RinseSim>),
                )
                    .in_set(EngineSet::Spawn),
            )
            .add_systems(
                Update,
                (
                    foam::integrate_foam.run_if(resource_exists::<foam::FoamSim>),
                    rinse::integrate_rinse.run_if(resource_exists::<rinse::RinseSim>),
                )
                    .in_set(EngineSet::Integrate),
            )
            .add_systems(
                Update,
                (
                    foam::present_foam.run_if(resource_exists::<foam::FoamSim>),
                    rinse::present_rinse.run_if(resource_exists::<rinse::RinseSim>),
                    splats::attach_splat_anchor.run_if(resource_exists::<splats::SplatLayer>),
                    splats::handle_splat_events.run_if(resource_exists::<splats::SplatLayer>),
                    splats::fade_splats.run_if(resource_exists::<splats::SplatLayer>),
                    dirt::scatter_dirt.run_if(resource_exists::<dirt::DirtLayer>),
                    dirt::fade_dirt.run_if(resource_exists::<dirt::DirtLayer>),
                    sparkle::update_sparkle_fields.run_if(resource_exists::<sparkle::SparkleState>),
                    pet_hair::fade_hair.run_if(resource_exists::<pet_hair::HairLayer>),
                )
                    .in_set(EngineSet::Present),
            );
    }
}
