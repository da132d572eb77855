use bevy::prelude::*;

use crate::constants::effect_settings::{IDLE_BOB_AMPLITUDE, IDLE_BOB_FREQUENCY};

/// Root entity of the showcased vehicle. The glTF scene instance spawns
/// underneath it; every rig query walks up to this marker.
#[derive(Component)]
pub struct VehicleRoot;

/// Handles for the vehicle model.
#[derive(Resource)]
pub struct VehicleAssets {
    pub scene: Handle<Scene>,
}

const VEHICLE_SCENE_PATH: &str = "models/sedan.glb";

/// Kick off the vehicle load and spawn its root. A missing or broken asset
/// leaves the root empty: the camera, RPC layer and ambient effects keep
/// running and mesh-dependent effects simply render nothing.
pub fn spawn_vehicle(mut commands: Commands, asset_server: Res<AssetServer>) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(VEHICLE_SCENE_PATH));

    commands.spawn((
        SceneRoot(scene.clone()),
        Transform::IDENTITY,
        Visibility::default(),
        VehicleRoot,
    ));
    commands.insert_resource(VehicleAssets { scene });

    println!("Loading vehicle scene: {}", VEHICLE_SCENE_PATH);
}

/// Gentle idle float of the whole vehicle while showcased. This is why the
/// door bounds must be resampled every frame rather than cached.
pub fn idle_bob(mut roots: Query<&mut Transform, With<VehicleRoot>>, time: Res<Time>) {
    let Ok(mut transform) = roots.single_mut() else {
        return;
    };
    let phase = time.elapsed_secs() * IDLE_BOB_FREQUENCY * std::f32::consts::TAU;
    transform.translation.y = IDLE_BOB_AMPLITUDE * phase.sin();
}
