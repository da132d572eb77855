use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::pool::{Particle, ParticlePool};
use super::splats::SplatEvent;
use crate::constants::effect_settings::{
    FOAM_AIM_JITTER, FOAM_BROAD_PHASE_MARGIN, FOAM_BUOYANCY, FOAM_DAMPING_PER_SECOND,
    FOAM_EMITTER_ORIGIN, FOAM_LIFE_SECS, FOAM_MAX_TRAVEL, FOAM_PARTICLE_SIZE,
    FOAM_SPAWNS_PER_FRAME, FOAM_SPEED, FOAM_SPEED_JITTER,
};
use crate::engine::quality::QualitySettings;
use crate::engine::rig::DoorBounds;
use crate::engine::wash::{WashController, WashState};

/// Marker on the render entities bound to foam pool slots.
#[derive(Component)]
pub struct FoamParticle;

/// Foam spray simulation: one fixed pool, active only while the wash
/// sequence is foaming.
#[derive(Resource)]
pub struct FoamSim {
    pub pool: ParticlePool,
    rng: StdRng,
}

pub fn setup_foam(
    mut commands: Commands,
    settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.97, 0.98, 1.0, 0.9),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let entities = (0..settings.foam_pool_size)
        .map(|_| {
            commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_scale(Vec3::ZERO),
                    FoamParticle,
                ))
                .id()
        })
        .collect();

    commands.insert_resource(FoamSim {
        pool: ParticlePool::with_entities(entities),
        rng: StdRng::seed_from_u64(0xf0a3),
    });
    info!("Foam pool ready ({} slots)", settings.foam_pool_size);
}

/// Spawn a bounded number of particles per frame, aimed at the live
/// world-space door bounds. The bounds are recomputed every frame upstream,
/// so a mid-animation or idle-bobbing door is still hit where it actually is.
pub fn spawn_foam(
    mut sim: ResMut<FoamSim>,
    controller: Res<WashController>,
    door_bounds: Res<DoorBounds>,
) {
    if controller.0.state() != WashState::Foaming {
        return;
    }
    // No door meshes (asset missing or still loading): render nothing.
    let Some(door) = door_bounds.0 else {
        return;
    };

    let sim = &mut *sim;
    for _ in 0..FOAM_SPAWNS_PER_FRAME {
        let target = Vec3::new(
            door.center().x,
            sim.rng.gen_range(door.min.y..=door.max.y),
            sim.rng.gen_range(door.min.z..=door.max.z),
        ) + Vec3::new(
            0.0,
            sim.rng.gen_range(-FOAM_AIM_JITTER..=FOAM_AIM_JITTER),
            sim.rng.gen_range(-FOAM_AIM_JITTER..=FOAM_AIM_JITTER),
        );

        let speed = FOAM_SPEED + sim.rng.gen_range(-FOAM_SPEED_JITTER..=FOAM_SPEED_JITTER);
        let direction = (target - FOAM_EMITTER_ORIGIN).normalize_or_zero();

        sim.pool.spawn(Particle {
            position: FOAM_EMITTER_ORIGIN,
            previous_position: FOAM_EMITTER_ORIGIN,
            velocity: direction * speed,
            remaining_life: FOAM_LIFE_SECS,
            max_life: FOAM_LIFE_SECS,
            size: FOAM_PARTICLE_SIZE * sim.rng.gen_range(0.7..=1.3),
        });
    }
}

/// Explicit Euler step with damped velocity and slight buoyancy, then the
/// broad/narrow phase collision test against the door bounds. A hit emits a
/// splat event and terminates the particle: stick-and-die, never bounce.
pub fn integrate_foam(
    mut sim: ResMut<FoamSim>,
    door_bounds: Res<DoorBounds>,
    mut splat_events: EventWriter<SplatEvent>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let door = door_bounds.0;
    let broad = door.map(|d| d.expanded(FOAM_BROAD_PHASE_MARGIN));

    for slot in sim.pool.iter_mut() {
        let p = &mut slot.particle;
        if !p.alive() {
            continue;
        }

        p.previous_position = p.position;
        p.velocity *= (1.0 - FOAM_DAMPING_PER_SECOND * dt).max(0.0);
        p.velocity.y += FOAM_BUOYANCY * dt;
        p.position += p.velocity * dt;
        p.remaining_life -= dt;

        // Fly-away culling: past the travel radius or below the floor the
        // particle can never produce a visible splat.
        if p.position.distance(FOAM_EMITTER_ORIGIN) > FOAM_MAX_TRAVEL || p.position.y < 0.0 {
            p.remaining_life = 0.0;
            continue;
        }

        if let (Some(door), Some(broad)) = (door, broad) {
            if broad.overlaps_segment(p.previous_position, p.position) {
                if let Some((point, normal)) = door.segment_hit(p.previous_position, p.position) {
                    splat_events.write(SplatEvent {
                        world_point: point,
                        world_normal: normal,
                    });
                    p.remaining_life = 0.0;
                }
            }

            // Past the door's far side without a hit: kill rather than let
            // the spray drift through the cabin.
            if p.position.x < door.min.x - FOAM_BROAD_PHASE_MARGIN {
                p.remaining_life = 0.0;
            }
        }
    }
}

pub fn present_foam(sim: Res<FoamSim>, mut transforms: Query<&mut Transform, With<FoamParticle>>) {
    for slot in sim.pool.iter() {
        let Ok(mut transform) = transforms.get_mut(slot.entity) else {
            continue;
        };
        let p = &slot.particle;
        if p.alive() {
            transform.translation = p.position;
            transform.scale = Vec3::splat(p.size * p.life_fraction().sqrt());
        } else {
            transform.scale = Vec3::ZERO;
        }
    }
}
