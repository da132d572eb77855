use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::fade_toward;
use crate::constants::effect_settings::{
    SPLAT_FADE_IN_PER_SECOND, SPLAT_FADE_OUT_PER_SECOND, SPLAT_RINSE_GRACE_SECS,
    SPLAT_SIZE_MAX, SPLAT_SIZE_MIN, SPLAT_SURFACE_OFFSET,
};
use crate::engine::quality::QualitySettings;
use crate::engine::rig::{DoorPivot, reparent_preserving_world};
use crate::engine::wash::{WashController, WashState};

/// Foam collision hit, in world space.
#[derive(Event, Debug, Clone, Copy)]
pub struct SplatEvent {
    pub world_point: Vec3,
    pub world_normal: Vec3,
}

/// A persistent accumulation mark in the anchor's local space.
#[derive(Debug, Clone, Copy)]
pub struct Splat {
    pub local_position: Vec3,
    pub local_orientation: Quat,
    pub size: f32,
}

/// Convert a world-space hit into the accumulator's local space and orient a
/// quad to the surface normal.
pub fn splat_from_hit(
    anchor_world: &GlobalTransform,
    world_point: Vec3,
    world_normal: Vec3,
    size: f32,
) -> Splat {
    let inverse = anchor_world.affine().inverse();
    let local_position = inverse.transform_point3(world_point);
    let local_normal = inverse.transform_vector3(world_normal).normalize_or_zero();
    Splat {
        local_position,
        local_orientation: Quat::from_rotation_arc(Vec3::Z, local_normal),
        size,
    }
}

/// Entity whose local space holds the accumulated splats. Starts free
/// standing and is re-parented under the door pivot once the rig exists, so
/// splats ride along with the opening door.
#[derive(Component)]
pub struct SplatAnchor;

/// Fixed ring of oriented decal quads plus one shared opacity scalar. All
/// splats share identical current opacity through a single material, one
/// interpolation per frame instead of per-splat aging.
#[derive(Resource)]
pub struct SplatLayer {
    pub anchor: Entity,
    quads: Vec<Entity>,
    cursor: usize,
    pub alpha: f32,
    material: Handle<StandardMaterial>,
    attached: bool,
    rng: StdRng,
}

impl SplatLayer {
    pub fn capacity(&self) -> usize {
        self.quads.len()
    }

    /// Next ring slot, overwrite-oldest. No deletion tracking is needed.
    /// `None` when the layer has zero capacity.
    fn next_quad(&mut self) -> Option<Entity> {
        if self.quads.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.quads.len();
        Some(self.quads[index])
    }
}

pub fn setup_splats(
    mut commands: Commands,
    settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Rectangle::new(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    let anchor = commands
        .spawn((Transform::IDENTITY, Visibility::default(), SplatAnchor))
        .id();

    let quads = (0..settings.splat_capacity)
        .map(|_| {
            commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_scale(Vec3::ZERO),
                    ChildOf(anchor),
                ))
                .id()
        })
        .collect();

    commands.insert_resource(SplatLayer {
        anchor,
        quads,
        cursor: 0,
        alpha: 0.0,
        material,
        attached: false,
        rng: StdRng::seed_from_u64(0x51a7),
    });
}

/// Once the door pivot exists, move the anchor under it (world pose
/// preserved) so accumulated foam follows the door surface.
pub fn attach_splat_anchor(
    mut commands: Commands,
    mut layer: ResMut<SplatLayer>,
    pivots: Query<(Entity, &GlobalTransform), With<DoorPivot>>,
    anchors: Query<&GlobalTransform, With<SplatAnchor>>,
) {
    if layer.attached {
        return;
    }
    let Ok((pivot, pivot_world)) = pivots.single() else {
        return;
    };
    let Ok(anchor_world) = anchors.get(layer.anchor) else {
        return;
    };

    reparent_preserving_world(&mut commands, layer.anchor, pivot, pivot_world, anchor_world);
    layer.attached = true;
}

pub fn handle_splat_events(
    mut events: EventReader<SplatEvent>,
    mut layer: ResMut<SplatLayer>,
    anchors: Query<&GlobalTransform, With<SplatAnchor>>,
    mut transforms: Query<&mut Transform>,
) {
    if events.is_empty() {
        return;
    }
    let Ok(anchor_world) = anchors.get(layer.anchor) else {
        events.clear();
        return;
    };

    for event in events.read() {
        let size = layer.rng.gen_range(SPLAT_SIZE_MIN..=SPLAT_SIZE_MAX);
        let splat = splat_from_hit(anchor_world, event.world_point, event.world_normal, size);

        let Some(quad) = layer.next_quad() else {
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(quad) else {
            continue;
        };
        // Lift the quad off the surface slightly so it never z-fights the
        // door paint.
        let lift = splat.local_orientation * Vec3::Z * SPLAT_SURFACE_OFFSET;
        transform.translation = splat.local_position + lift;
        transform.rotation = splat.local_orientation;
        transform.scale = Vec3::splat(splat.size);
    }
}

/// Single-scalar fade for the whole layer: toward one while foaming (fast)
/// and for a short grace window into rinsing (so foam does not vanish the
/// instant rinsing starts), toward zero otherwise (slow).
pub fn fade_splats(
    mut layer: ResMut<SplatLayer>,
    controller: Res<WashController>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
) {
    let (target, rate) = match controller.0.state() {
        WashState::Foaming => (1.0, SPLAT_FADE_IN_PER_SECOND),
        WashState::Rinsing if controller.0.time_in_state() < SPLAT_RINSE_GRACE_SECS => {
            (1.0, SPLAT_FADE_IN_PER_SECOND)
        }
        _ => (0.0, SPLAT_FADE_OUT_PER_SECOND),
    };

    layer.alpha = fade_toward(layer.alpha, target, rate, time.delta_secs());

    if let Some(material) = materials.get_mut(&layer.material) {
        material.base_color = material.base_color.with_alpha(layer.alpha);
    }
}
