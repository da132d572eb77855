//! Unit tests for the fixed-capacity particle pool.
//!
//! Tests cover:
//! - Slot count staying at capacity regardless of spawn volume
//! - Ring cursor overwriting the oldest slot on overflow
//! - Live count tracking only particles with remaining life
//! - Life fraction shaping used to shrink particles out

use bevy::math::Vec3;
use vehicle_render_engine::engine::effects::{Particle, ParticlePool};

fn particle_with_life(life: f32, size: f32) -> Particle {
    Particle {
        position: Vec3::ZERO,
        previous_position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        remaining_life: life,
        max_life: life.max(0.001),
        size,
    }
}

#[test]
fn pool_never_exceeds_capacity() {
    let mut pool = ParticlePool::new(16);
    assert_eq!(pool.capacity(), 16);

    for _ in 0..1000 {
        pool.spawn(particle_with_life(1.0, 0.1));
        assert_eq!(pool.capacity(), 16);
        assert!(pool.live_count() <= pool.capacity());
    }
    assert_eq!(pool.live_count(), 16);
}

#[test]
fn all_slots_start_dead() {
    let pool = ParticlePool::new(8);
    assert_eq!(pool.live_count(), 0);
    for slot in pool.iter() {
        assert!(!slot.particle.alive());
    }
}

#[test]
fn spawn_overwrites_the_oldest_slot() {
    let mut pool = ParticlePool::new(3);

    pool.spawn(particle_with_life(1.0, 0.1));
    pool.spawn(particle_with_life(1.0, 0.2));
    pool.spawn(particle_with_life(1.0, 0.3));

    // The fourth spawn wraps around and replaces the first slot written.
    pool.spawn(particle_with_life(1.0, 0.4));

    let sizes: Vec<f32> = pool.iter().map(|s| s.particle.size).collect();
    assert_eq!(sizes, vec![0.4, 0.2, 0.3]);
}

#[test]
fn live_count_ignores_expired_particles() {
    let mut pool = ParticlePool::new(4);
    pool.spawn(particle_with_life(1.0, 0.1));
    pool.spawn(particle_with_life(1.0, 0.1));
    assert_eq!(pool.live_count(), 2);

    // Expire one particle in place, the way the integrators do.
    for slot in pool.iter_mut() {
        if slot.particle.alive() {
            slot.particle.remaining_life = 0.0;
            break;
        }
    }
    assert_eq!(pool.live_count(), 1);
}

#[test]
fn empty_pool_spawn_is_a_safe_no_op() {
    let mut pool = ParticlePool::new(0);
    pool.spawn(particle_with_life(1.0, 0.1));
    assert_eq!(pool.capacity(), 0);
    assert_eq!(pool.live_count(), 0);
}

#[test]
fn life_fraction_is_clamped_to_unit_range() {
    let mut particle = particle_with_life(2.0, 0.1);
    assert!((particle.life_fraction() - 1.0).abs() < f32::EPSILON);

    particle.remaining_life = 1.0;
    assert!((particle.life_fraction() - 0.5).abs() < f32::EPSILON);

    particle.remaining_life = -0.5;
    assert_eq!(particle.life_fraction(), 0.0);
    assert!(!particle.alive());

    particle.remaining_life = 5.0;
    assert_eq!(particle.life_fraction(), 1.0);
}
