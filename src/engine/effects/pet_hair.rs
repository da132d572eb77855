use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::fade_toward;
use crate::constants::effect_settings::{
    HAIR_FADE_IN_PER_SECOND, HAIR_FADE_OUT_PER_SECOND, HAIR_FLOOR_CENTER, HAIR_FLOOR_HALF,
    HAIR_SCATTER_SEED, HAIR_STRAND_LENGTH, HAIR_STRAND_WIDTH,
};
use crate::engine::quality::QualitySettings;

/// Pet hair accumulation: instanced thin strand primitives scattered
/// procedurally across the interior floor footprint, shown and hidden with
/// the same single-scalar fade the splat layer uses.
#[derive(Resource)]
pub struct HairLayer {
    material: Handle<StandardMaterial>,
    pub alpha: f32,
    pub active: bool,
}

pub fn setup_hair(
    mut commands: Commands,
    settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let strand_mesh = meshes.add(Cuboid::new(
        HAIR_STRAND_WIDTH,
        HAIR_STRAND_LENGTH,
        HAIR_STRAND_WIDTH,
    ));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.42, 0.33, 0.24, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let mut rng = ChaCha8Rng::seed_from_u64(HAIR_SCATTER_SEED);

    for _ in 0..settings.hair_strand_count {
        let position = HAIR_FLOOR_CENTER
            + Vec3::new(
                rng.gen_range(-1.0..=1.0) * HAIR_FLOOR_HALF.x,
                0.0,
                rng.gen_range(-1.0..=1.0) * HAIR_FLOOR_HALF.z,
            );
        // Strands lie mostly flat with a random yaw and a slight curl up.
        let rotation = Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU))
            * Quat::from_rotation_x(rng.gen_range(1.25..1.55));

        commands.spawn((
            Mesh3d(strand_mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform {
                translation: position,
                rotation,
                scale: Vec3::ONE,
            },
        ));
    }

    commands.insert_resource(HairLayer {
        material,
        alpha: 0.0,
        active: false,
    });
    info!("Pet hair layer ready ({} strands)", settings.hair_strand_count);
}

/// Fade in while the interior condition is dirty (the pet hair add-on is
/// active), out otherwise.
pub fn fade_hair(
    mut layer: ResMut<HairLayer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
) {
    let (target, rate) = if layer.active {
        (1.0, HAIR_FADE_IN_PER_SECOND)
    } else {
        (0.0, HAIR_FADE_OUT_PER_SECOND)
    };

    layer.alpha = fade_toward(layer.alpha, target, rate, time.delta_secs());

    if let Some(material) = materials.get_mut(&layer.material) {
        material.base_color = material.base_color.with_alpha(layer.alpha);
    }
}
