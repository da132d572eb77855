use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::pool::{Particle, ParticlePool};
use crate::constants::effect_settings::{
    RINSE_AIM_JITTER, RINSE_DAMPING_PER_SECOND, RINSE_EMITTER_ORIGIN, RINSE_GRAVITY,
    RINSE_LIFE_SECS, RINSE_MAX_TRAVEL, RINSE_PARTICLE_SIZE, RINSE_SPAWNS_PER_FRAME, RINSE_SPEED,
    RINSE_SPEED_JITTER,
};
use crate::engine::quality::QualitySettings;
use crate::engine::rig::DoorBounds;
use crate::engine::wash::{WashController, WashState};

#[derive(Component)]
pub struct RinseParticle;

/// Water rinse: the same spawn and aim logic as the foam spray, but purely
/// decorative wash-off. Gravity instead of buoyancy, and no collision or
/// sticking.
#[derive(Resource)]
pub struct RinseSim {
    pub pool: ParticlePool,
    rng: StdRng,
}

pub fn setup_rinse(
    mut commands: Commands,
    settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.62, 0.78, 0.95, 0.7),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let entities = (0..settings.rinse_pool_size)
        .map(|_| {
            commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_scale(Vec3::ZERO),
                    RinseParticle,
                ))
                .id()
        })
        .collect();

    commands.insert_resource(RinseSim {
        pool: ParticlePool::with_entities(entities),
        rng: StdRng::seed_from_u64(0x4a11),
    });
    info!("Rinse pool ready ({} slots)", settings.rinse_pool_size);
}

pub fn spawn_rinse(
    mut sim: ResMut<RinseSim>,
    controller: Res<WashController>,
    door_bounds: Res<DoorBounds>,
) {
    if controller.0.state() != WashState::Rinsing {
        return;
    }
    let Some(door) = door_bounds.0 else {
        return;
    };

    let sim = &mut *sim;
    for _ in 0..RINSE_SPAWNS_PER_FRAME {
        let target = Vec3::new(
            door.center().x,
            sim.rng.gen_range(door.min.y..=door.max.y),
            sim.rng.gen_range(door.min.z..=door.max.z),
        ) + Vec3::new(
            0.0,
            sim.rng.gen_range(-RINSE_AIM_JITTER..=RINSE_AIM_JITTER),
            sim.rng.gen_range(-RINSE_AIM_JITTER..=RINSE_AIM_JITTER),
        );

        let speed = RINSE_SPEED + sim.rng.gen_range(-RINSE_SPEED_JITTER..=RINSE_SPEED_JITTER);
        let direction = (target - RINSE_EMITTER_ORIGIN).normalize_or_zero();

        sim.pool.spawn(Particle {
            position: RINSE_EMITTER_ORIGIN,
            previous_position: RINSE_EMITTER_ORIGIN,
            velocity: direction * speed,
            remaining_life: RINSE_LIFE_SECS,
            max_life: RINSE_LIFE_SECS,
            size: RINSE_PARTICLE_SIZE * sim.rng.gen_range(0.7..=1.3),
        });
    }
}

pub fn integrate_rinse(mut sim: ResMut<RinseSim>, time: Res<Time>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for slot in sim.pool.iter_mut() {
        let p = &mut slot.particle;
        if !p.alive() {
            continue;
        }

        p.previous_position = p.position;
        p.velocity *= (1.0 - RINSE_DAMPING_PER_SECOND * dt).max(0.0);
        p.velocity.y -= RINSE_GRAVITY * dt;
        p.position += p.velocity * dt;
        p.remaining_life -= dt;

        if p.position.distance(RINSE_EMITTER_ORIGIN) > RINSE_MAX_TRAVEL || p.position.y < 0.0 {
            p.remaining_life = 0.0;
        }
    }
}

pub fn present_rinse(
    sim: Res<RinseSim>,
    mut transforms: Query<&mut Transform, With<RinseParticle>>,
) {
    for slot in sim.pool.iter() {
        let Ok(mut transform) = transforms.get_mut(slot.entity) else {
            continue;
        };
        let p = &slot.particle;
        if p.alive() {
            transform.translation = p.position;
            transform.scale = Vec3::splat(p.size * p.life_fraction());
        } else {
            transform.scale = Vec3::ZERO;
        }
    }
}
