use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::collision::{WorldAabb, world_corners};
use super::fade_toward;
use crate::constants::effect_settings::{
    DIRT_DECAL_COUNT, DIRT_FADE_IN_PER_SECOND, DIRT_FADE_OUT_PER_SECOND, DIRT_MAX_ALPHA,
    DIRT_SCATTER_SEED, DIRT_SIZE_MAX, DIRT_SIZE_MIN,
};
use crate::engine::quality::QualitySettings;
use crate::engine::rig::BodyPanel;
use crate::engine::scene::VehicleRoot;
use crate::engine::wash::{WashController, WashState};

/// Dirt overlay on the vehicle flanks: decal quads scattered once over the
/// body bounds, faded as a layer by the wash state. Same single-scalar
/// pattern as the foam splats.
#[derive(Resource)]
pub struct DirtLayer {
    material: Handle<StandardMaterial>,
    mesh: Handle<Mesh>,
    pub alpha: f32,
    scattered: bool,
}

pub fn setup_dirt(
    mut commands: Commands,
    _settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.32, 0.26, 0.18, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    commands.insert_resource(DirtLayer {
        material,
        mesh: meshes.add(Rectangle::new(1.0, 1.0)),
        alpha: 0.0,
        scattered: false,
    });
}

/// Scatter dirt decals over the body side panels once their bounds are
/// known. Decals are parented to the vehicle root so they follow the idle
/// bob. Until the model loads this does nothing and the overlay stays empty.
pub fn scatter_dirt(
    mut commands: Commands,
    mut layer: ResMut<DirtLayer>,
    panels: Query<(&GlobalTransform, &Aabb), With<BodyPanel>>,
    roots: Query<(Entity, &GlobalTransform), With<VehicleRoot>>,
) {
    if layer.scattered {
        return;
    }
    let Ok((root, root_world)) = roots.single() else {
        return;
    };

    let corners = panels.iter().flat_map(|(transform, aabb)| {
        world_corners(transform, aabb)
    });
    let Some(body) = WorldAabb::from_points(corners) else {
        return;
    };

    let root_inverse = root_world.affine().inverse();
    let mut rng = ChaCha8Rng::seed_from_u64(DIRT_SCATTER_SEED);

    for i in 0..DIRT_DECAL_COUNT {
        // Alternate the two flanks; the lower half of the body catches the
        // grime.
        let on_driver_side = i % 2 == 0;
        let x = if on_driver_side { body.max.x } else { body.min.x };
        let y = rng.gen_range(body.min.y..=body.min.y + (body.max.y - body.min.y) * 0.55);
        let z = rng.gen_range(body.min.z..=body.max.z);

        let world_point = Vec3::new(x, y, z);
        let outward = if on_driver_side { Vec3::X } else { Vec3::NEG_X };

        let local_point = root_inverse.transform_point3(world_point + outward * 0.01);
        let rotation = Quat::from_rotation_arc(Vec3::Z, outward)
            * Quat::from_rotation_z(rng.gen_range(0.0..std::f32::consts::TAU));
        let size = rng.gen_range(DIRT_SIZE_MIN..=DIRT_SIZE_MAX);

        commands.spawn((
            Mesh3d(layer.mesh.clone()),
            MeshMaterial3d(layer.material.clone()),
            Transform {
                translation: local_point,
                rotation,
                scale: Vec3::splat(size),
            },
            ChildOf(root),
        ));
    }

    layer.scattered = true;
    info!("Dirt overlay scattered ({} decals)", DIRT_DECAL_COUNT);
}

pub fn fade_dirt(
    mut layer: ResMut<DirtLayer>,
    controller: Res<WashController>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
) {
    let (target, rate) = match controller.0.state() {
        WashState::Dirty | WashState::Foaming => (DIRT_MAX_ALPHA, DIRT_FADE_IN_PER_SECOND),
        WashState::Rinsing | WashState::Clean => (0.0, DIRT_FADE_OUT_PER_SECOND),
    };

    layer.alpha = fade_toward(layer.alpha, target, rate, time.delta_secs());

    if let Some(material) = materials.get_mut(&layer.material) {
        material.base_color = material.base_color.with_alpha(layer.alpha);
    }
}
