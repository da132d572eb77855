use bevy::asset::RenderAssetUsages;
use bevy::pbr::DirectionalLightShadowMap;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

pub mod vehicle;

pub use vehicle::{VehicleAssets, VehicleRoot};

use crate::engine::EngineSet;
use crate::engine::quality::{QualitySettings, sample_device_signals};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                vehicle::spawn_vehicle,
                setup_scene.after(sample_device_signals),
            ),
        )
        .add_systems(Update, vehicle::idle_bob.in_set(EngineSet::Present));
    }
}

/// Lighting, floor and contact shadow, sized by the session quality tier.
fn setup_scene(
    mut commands: Commands,
    settings: Option<Res<QualitySettings>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    println!("=== VEHICLE SHOWCASE RENDER ENGINE ===");

    let (shadow_map_size, contact_shadow_size) = match settings {
        Some(ref s) => (s.shadow_map_size, s.contact_shadow_size),
        None => (1024, 128),
    };

    commands.insert_resource(DirectionalLightShadowMap {
        size: shadow_map_size,
    });
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.93, 1.0),
        brightness: 220.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            0.9,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));

    // Showroom floor.
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(24.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.12, 0.13, 0.15),
            perceptual_roughness: 0.35,
            metallic: 0.1,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));

    // Soft contact shadow under the vehicle, generated at tier resolution.
    let shadow_image = images.add(contact_shadow_image(contact_shadow_size));
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(5.6, 3.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(shadow_image),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.012, 0.0)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));
}

/// Radial falloff texture for the contact shadow quad.
fn contact_shadow_image(size: u32) -> Image {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    let half = size as f32 * 0.5;

    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 - half) / half;
            let dy = (y as f32 - half) / half;
            let r = (dx * dx + dy * dy).sqrt().min(1.0);
            let alpha = ((1.0 - r).powi(2) * 200.0) as u8;
            data.extend_from_slice(&[0, 0, 0, alpha]);
        }
    }

    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}
