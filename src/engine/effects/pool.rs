use bevy::prelude::*;

/// A single simulated point entity. Owned exclusively by its simulation's
/// pool and never shared across simulations.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub previous_position: Vec3,
    pub velocity: Vec3,
    pub remaining_life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            previous_position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            remaining_life: 0.0,
            max_life: 1.0,
            size: 0.0,
        }
    }

    pub fn alive(&self) -> bool {
        self.remaining_life > 0.0
    }

    /// Fraction of lifetime remaining, used to shrink particles out instead
    /// of popping them.
    pub fn life_fraction(&self) -> f32 {
        (self.remaining_life / self.max_life).clamp(0.0, 1.0)
    }
}

/// One pool slot: the simulated particle plus the render entity it drives.
/// Dead slots keep their entity and are hidden by writing zero scale.
pub struct ParticleSlot {
    pub entity: Entity,
    pub particle: Particle,
}

/// Fixed-capacity particle pool. Every slot exists for the pool's whole
/// lifetime; spawning overwrites the oldest slot via a ring cursor, so the
/// pool never allocates after construction and never grows.
pub struct ParticlePool {
    slots: Vec<ParticleSlot>,
    cursor: usize,
}

impl ParticlePool {
    /// Pool with placeholder render entities, for contexts (and tests) that
    /// only exercise the simulation side.
    pub fn new(capacity: usize) -> Self {
        Self::with_entities(vec![Entity::PLACEHOLDER; capacity])
    }

    /// Pool bound to pre-spawned render entities, one per slot.
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        let slots = entities
            .into_iter()
            .map(|entity| ParticleSlot {
                entity,
                particle: Particle::dead(),
            })
            .collect();
        Self { slots, cursor: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.particle.alive()).count()
    }

    /// Write a particle into the next ring slot, overwriting whatever was
    /// there. Returns the render entity bound to the slot.
    pub fn spawn(&mut self, particle: Particle) -> Entity {
        if self.slots.is_empty() {
            return Entity::PLACEHOLDER;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.slots[index].particle = particle;
        self.slots[index].entity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ParticleSlot> {
        self.slots.iter_mut()
    }
}
