use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::fade_toward;
use crate::constants::effect_settings::{
    ENGINE_SPARKLE_VOLUME_CENTER, ENGINE_SPARKLE_VOLUME_HALF, FOG_FADE_PER_SECOND, FOG_MAX_ALPHA,
    HEADLIGHT_SPARKLE_VOLUME_CENTER, HEADLIGHT_SPARKLE_VOLUME_HALF, HEADLIGHT_VIEWER_OFFSET,
    SPARKLE_NOISE_GATE, SPARKLE_POINT_SIZE, SPARKLE_POWER_CURVE, SPARKLE_SCATTER_SEED,
    SPARKLE_TWINKLE_SPEED,
};
use crate::engine::camera::view_rig::ShowcaseCamera;
use crate::engine::quality::QualitySettings;

/// Which sparkle field a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkleFieldId {
    EngineBay,
    Headlight,
}

/// One static point of a sparkle field. The point cloud is scattered once;
/// only its per-frame twinkle intensity changes.
#[derive(Component)]
pub struct SparklePoint {
    pub field: SparkleFieldId,
    pub phase: f32,
    pub base_position: Vec3,
}

/// Shared fade state for both sparkle fields. The sparkle intensity is gated
/// by the paired fog opacity so the glitter and the grime read as one
/// surface condition.
#[derive(Resource)]
pub struct SparkleState {
    pub engine_active: bool,
    pub headlight_active: bool,
    pub engine_fog_alpha: f32,
    pub headlight_fog_alpha: f32,
    engine_fog_material: Handle<StandardMaterial>,
    headlight_fog_material: Handle<StandardMaterial>,
}

impl SparkleState {
    pub fn fade_for(&self, field: SparkleFieldId) -> f32 {
        match field {
            SparkleFieldId::EngineBay => self.engine_fog_alpha / FOG_MAX_ALPHA,
            SparkleFieldId::Headlight => self.headlight_fog_alpha / FOG_MAX_ALPHA,
        }
    }
}

/// Cheap hash noise in [0, 1], stable for a given input.
pub fn hash_noise(x: f32) -> f32 {
    ((x.sin() * 43758.547).fract()).abs()
}

/// Stochastic twinkle intensity: a thresholded noise gate times a
/// power-curved sine, per point via its random phase. Deterministic for a
/// given time and phase.
pub fn twinkle(time: f32, phase: f32) -> f32 {
    let gate = if hash_noise(time * 0.7 + phase * 13.7) > SPARKLE_NOISE_GATE {
        1.0
    } else {
        0.0
    };
    let wave = (time * SPARKLE_TWINKLE_SPEED + phase)
        .sin()
        .max(0.0)
        .powf(SPARKLE_POWER_CURVE);
    gate * wave
}

pub fn setup_sparkle(
    mut commands: Commands,
    settings: Res<QualitySettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let point_mesh = meshes.add(Rectangle::new(1.0, 1.0));
    let point_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.98, 0.85),
        emissive: LinearRgba::rgb(2.0, 1.9, 1.4),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    let fog_mesh = meshes.add(Rectangle::new(1.0, 1.0));
    let engine_fog_material = materials.add(fog_material());
    let headlight_fog_material = materials.add(fog_material());

    let mut rng = ChaCha8Rng::seed_from_u64(SPARKLE_SCATTER_SEED);

    scatter_field(
        &mut commands,
        &mut rng,
        SparkleFieldId::EngineBay,
        ENGINE_SPARKLE_VOLUME_CENTER,
        ENGINE_SPARKLE_VOLUME_HALF,
        settings.sparkle_points_per_field,
        &point_mesh,
        &point_material,
    );
    scatter_field(
        &mut commands,
        &mut rng,
        SparkleFieldId::Headlight,
        HEADLIGHT_SPARKLE_VOLUME_CENTER,
        HEADLIGHT_SPARKLE_VOLUME_HALF,
        settings.sparkle_points_per_field,
        &point_mesh,
        &point_material,
    );

    // Fog quads sit over each volume and carry the opacity the sparkle fade
    // follows.
    commands.spawn((
        Mesh3d(fog_mesh.clone()),
        MeshMaterial3d(engine_fog_material.clone()),
        Transform {
            translation: ENGINE_SPARKLE_VOLUME_CENTER,
            rotation: Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            scale: Vec3::new(
                ENGINE_SPARKLE_VOLUME_HALF.x * 2.2,
                ENGINE_SPARKLE_VOLUME_HALF.z * 2.2,
                1.0,
            ),
        },
    ));
    commands.spawn((
        Mesh3d(fog_mesh),
        MeshMaterial3d(headlight_fog_material.clone()),
        Transform {
            translation: HEADLIGHT_SPARKLE_VOLUME_CENTER,
            scale: Vec3::new(
                HEADLIGHT_SPARKLE_VOLUME_HALF.x * 2.2,
                HEADLIGHT_SPARKLE_VOLUME_HALF.y * 2.2,
                1.0,
            ),
            ..default()
        },
    ));

    commands.insert_resource(SparkleState {
        engine_active: false,
        headlight_active: false,
        engine_fog_alpha: 0.0,
        headlight_fog_alpha: 0.0,
        engine_fog_material,
        headlight_fog_material,
    });
}

fn fog_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(0.45, 0.42, 0.38, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}

#[allow(clippy::too_many_arguments)]
fn scatter_field(
    commands: &mut Commands,
    rng: &mut ChaCha8Rng,
    field: SparkleFieldId,
    center: Vec3,
    half: Vec3,
    count: usize,
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
) {
    for _ in 0..count {
        let offset = Vec3::new(
            rng.gen_range(-1.0..=1.0) * half.x,
            rng.gen_range(-1.0..=1.0) * half.y,
            rng.gen_range(-1.0..=1.0) * half.z,
        );
        let position = center + offset;

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position).with_scale(Vec3::ZERO),
            SparklePoint {
                field,
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                base_position: position,
            },
        ));
    }
}

/// Advance both fog opacities toward their targets, then drive every point's
/// twinkle scale. Headlight points stay camera facing with a small
/// viewer-ward offset so they never z-fight the lens geometry.
pub fn update_sparkle_fields(
    mut state: ResMut<SparkleState>,
    mut points: Query<(&SparklePoint, &mut Transform)>,
    cameras: Query<&GlobalTransform, With<ShowcaseCamera>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let engine_target = if state.engine_active { FOG_MAX_ALPHA } else { 0.0 };
    let headlight_target = if state.headlight_active { FOG_MAX_ALPHA } else { 0.0 };

    state.engine_fog_alpha =
        fade_toward(state.engine_fog_alpha, engine_target, FOG_FADE_PER_SECOND, dt);
    state.headlight_fog_alpha = fade_toward(
        state.headlight_fog_alpha,
        headlight_target,
        FOG_FADE_PER_SECOND,
        dt,
    );

    if let Some(material) = materials.get_mut(&state.engine_fog_material) {
        material.base_color = material.base_color.with_alpha(state.engine_fog_alpha);
    }
    if let Some(material) = materials.get_mut(&state.headlight_fog_material) {
        material.base_color = material.base_color.with_alpha(state.headlight_fog_alpha);
    }

    let camera_world = cameras.single().ok();
    let now = time.elapsed_secs();

    for (point, mut transform) in &mut points {
        let intensity = twinkle(now, point.phase) * state.fade_for(point.field);
        transform.scale = Vec3::splat(SPARKLE_POINT_SIZE * intensity);

        if point.field == SparkleFieldId::Headlight {
            if let Some(camera) = camera_world {
                let to_camera =
                    (camera.translation() - point.base_position).normalize_or_zero();
                transform.translation =
                    point.base_position + to_camera * HEADLIGHT_VIEWER_OFFSET;
                transform.look_at(camera.translation(), Vec3::Y);
            }
        }
    }
}
