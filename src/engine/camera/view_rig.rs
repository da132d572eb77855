use bevy::asset::RenderAssetUsages;
use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};

use super::{CameraPose, ViewId};
use crate::constants::effect_settings::{CAMERA_FOLLOW_RATE, ORBIT_RADIANS_PER_SECOND};
use crate::constants::render_settings::BASE_FOV_RADIANS;
use crate::constants::view_poses::pose_for;
use crate::engine::quality::QualitySettings;

/// Marker for the single showcase camera.
#[derive(Component)]
pub struct ShowcaseCamera;

/// Resource holding the camera rig state. The live camera is driven toward
/// the active view's pose every frame; switching views only retargets, it
/// never resets interpolation progress.
#[derive(Resource)]
pub struct ViewRig {
    pub view: ViewId,
    /// Smoothed aim point, interpolated separately from the camera position
    /// so look-at changes are as damped as travel.
    pub current_look: Vec3,
    /// Idle orbit phase. Persists across view changes so returning home
    /// resumes the orbit where it left off instead of snapping.
    pub orbit_angle: f32,
}

impl Default for ViewRig {
    fn default() -> Self {
        let pose = pose_for(ViewId::Home);
        Self {
            view: ViewId::Home,
            current_look: pose.look_at,
            orbit_angle: 0.0,
        }
    }
}

impl ViewRig {
    /// Retarget the rig to a named view.
    pub fn set_view(&mut self, view: ViewId) {
        self.view = view;
    }

    pub fn active_pose(&self) -> CameraPose {
        pose_for(self.view)
    }
}

/// Idle orbit runs if and only if the home view is active.
pub fn orbit_active(view: ViewId) -> bool {
    view == ViewId::Home
}

/// Exponential damped approach used for every camera channel. The factor is
/// clamped so large frame deltas cannot overshoot the target.
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).min(1.0)
}

pub fn spawn_view_camera(
    mut commands: Commands,
    settings: Option<Res<QualitySettings>>,
    mut images: ResMut<Assets<Image>>,
) {
    let pose = pose_for(ViewId::Home);
    let (msaa, environment_map_size) = match settings {
        Some(ref s) => (
            if s.msaa_enabled { Msaa::Sample4 } else { Msaa::Off },
            s.environment_map_size,
        ),
        None => (Msaa::Off, 256),
    };

    // Reflections on the paintwork come from a generated showroom cubemap at
    // tier resolution.
    let environment_map = images.add(environment_map_image(environment_map_size));

    commands.spawn((
        Camera3d::default(),
        msaa,
        Projection::Perspective(PerspectiveProjection {
            fov: BASE_FOV_RADIANS,
            ..default()
        }),
        EnvironmentMapLight {
            diffuse_map: environment_map.clone(),
            specular_map: environment_map,
            intensity: 400.0,
            ..default()
        },
        Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
        ShowcaseCamera,
    ));
}

/// Six-face showroom gradient cubemap: bright overhead falling off toward a
/// dark floor, matching the lighting rig's tone.
fn environment_map_image(size: u32) -> Image {
    let mut data = Vec::with_capacity((size * size * 4 * 6) as usize);
    let denom = (size - 1).max(1) as f32;

    for _face in 0..6 {
        for y in 0..size {
            let t = y as f32 / denom;
            let r = (36.0 + 150.0 * (1.0 - t)) as u8;
            let g = (40.0 + 160.0 * (1.0 - t)) as u8;
            let b = (48.0 + 180.0 * (1.0 - t)) as u8;
            for _x in 0..size {
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
    }

    let mut image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    image
}

/// Drive the live camera toward the active view pose with damped
/// interpolation, applying the idle orbit around the subject while home.
pub fn update_view_camera(
    mut rig: ResMut<ViewRig>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<ShowcaseCamera>>,
    time: Res<Time>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    let pose = rig.active_pose();
    let dt = time.delta_secs();

    let target_pos = if orbit_active(rig.view) {
        rig.orbit_angle += ORBIT_RADIANS_PER_SECOND * dt;
        orbit_position(&pose, rig.orbit_angle)
    } else {
        pose.position
    };

    let t = damp_factor(CAMERA_FOLLOW_RATE, dt);
    transform.translation = transform.translation.lerp(target_pos, t);
    rig.current_look = rig.current_look.lerp(pose.look_at, t);

    let look = rig.current_look;
    transform.look_at(look, Vec3::Y);

    if let Projection::Perspective(ref mut perspective) = *projection {
        let target_fov = BASE_FOV_RADIANS / pose.zoom;
        perspective.fov += (target_fov - perspective.fov) * t;
    }
}

/// Rotate the home pose offset around the look-at point by the orbit phase.
pub fn orbit_position(pose: &CameraPose, angle: f32) -> Vec3 {
    let offset = pose.position - pose.look_at;
    let rotated = Quat::from_rotation_y(angle) * offset;
    pose.look_at + rotated
}
