//! Headless ECS tests for the one-shot rig builder.
//!
//! Tests cover:
//! - Exactly one pivot per animated group, no matter how often the build
//!   system re-runs
//! - Door meshes re-parenting under the door pivot
//! - The guard not being consumed before any vehicle mesh exists
//! - Open angles requested before the rig exists landing on the pivots
//!   once they are built

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use vehicle_render_engine::constants::effect_settings::DOOR_OPEN_RADIANS;
use vehicle_render_engine::engine::rig::{
    DoorPivot, HoodPivot, PartClass, PartManifest, PivotGroup, PivotTargets, RigBuilt, build_rig,
    sync_pivot_targets,
};
use vehicle_render_engine::engine::scene::VehicleRoot;

fn test_app() -> App {
    let mut app = App::new();
    app.init_resource::<RigBuilt>()
        .init_resource::<PivotTargets>()
        .insert_resource(Assets::<PartManifest>::default())
        .add_systems(
            Update,
            (
                build_rig.run_if(|built: Res<RigBuilt>| !built.built),
                sync_pivot_targets,
            )
                .chain(),
        );
    app
}

fn spawn_root(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((Transform::IDENTITY, GlobalTransform::IDENTITY, VehicleRoot))
        .id()
}

fn spawn_mesh(app: &mut App, root: Entity, name: &str, min: Vec3, max: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Name::new(name.to_string()),
            Mesh3d(Handle::default()),
            Transform::IDENTITY,
            GlobalTransform::IDENTITY,
            Aabb::from_min_max(min, max),
            ChildOf(root),
        ))
        .id()
}

fn count_pivots(app: &mut App, class: PartClass) -> usize {
    app.world_mut()
        .query::<&PivotGroup>()
        .iter(app.world())
        .filter(|p| p.class == class)
        .count()
}

#[test]
fn repeated_updates_build_exactly_one_pivot_per_group() {
    let mut app = test_app();
    let root = spawn_root(&mut app);
    spawn_mesh(
        &mut app,
        root,
        "hood_outer",
        Vec3::new(-0.7, 0.9, 0.8),
        Vec3::new(0.7, 1.1, 2.3),
    );
    spawn_mesh(
        &mut app,
        root,
        "door_left_shell",
        Vec3::new(0.8, 0.2, -0.9),
        Vec3::new(0.95, 1.3, 0.5),
    );

    for _ in 0..5 {
        app.update();
    }

    assert!(app.world().resource::<RigBuilt>().built);
    assert_eq!(count_pivots(&mut app, PartClass::Hood), 1);
    assert_eq!(count_pivots(&mut app, PartClass::DoorLeft), 1);
}

#[test]
fn door_mesh_reparents_under_the_door_pivot() {
    let mut app = test_app();
    let root = spawn_root(&mut app);
    let door = spawn_mesh(
        &mut app,
        root,
        "door_left_shell",
        Vec3::new(0.8, 0.2, -0.9),
        Vec3::new(0.95, 1.3, 0.5),
    );

    app.update();
    app.update();

    let parent = app.world().get::<ChildOf>(door).unwrap().parent();
    assert!(
        app.world().get::<DoorPivot>(parent).is_some(),
        "door mesh should hang off the door pivot"
    );

    // The hood group matched nothing; its pivot still exists and is inert.
    let hood_pivots: Vec<&PivotGroup> = app
        .world_mut()
        .query_filtered::<&PivotGroup, With<HoodPivot>>()
        .iter(app.world())
        .collect();
    assert_eq!(hood_pivots.len(), 1);
    assert_eq!(hood_pivots[0].target_angle, 0.0);
}

#[test]
fn target_set_before_the_rig_exists_opens_the_door_after_build() {
    let mut app = test_app();

    // The booking UI picks the interior service while the vehicle model is
    // still loading: only the target resource records the wish.
    app.world_mut().resource_mut::<PivotTargets>().door_angle = DOOR_OPEN_RADIANS;
    app.update();

    let root = spawn_root(&mut app);
    spawn_mesh(
        &mut app,
        root,
        "door_left_shell",
        Vec3::new(0.8, 0.2, -0.9),
        Vec3::new(0.95, 1.3, 0.5),
    );

    app.update();
    app.update();

    let pivot = app
        .world_mut()
        .query_filtered::<&PivotGroup, With<DoorPivot>>()
        .single(app.world())
        .unwrap();
    assert_eq!(pivot.target_angle, DOOR_OPEN_RADIANS);
}

#[test]
fn guard_is_not_consumed_before_meshes_exist() {
    let mut app = test_app();
    spawn_root(&mut app);

    // The scene instance has not produced meshes yet; the builder must keep
    // waiting instead of rigging an empty vehicle.
    app.update();
    assert!(!app.world().resource::<RigBuilt>().built);
    assert_eq!(count_pivots(&mut app, PartClass::Hood), 0);

    let root = app
        .world_mut()
        .query_filtered::<Entity, With<VehicleRoot>>()
        .single(app.world())
        .unwrap();
    spawn_mesh(
        &mut app,
        root,
        "bonnet",
        Vec3::new(-0.7, 0.9, 0.8),
        Vec3::new(0.7, 1.1, 2.3),
    );

    app.update();
    app.update();
    assert!(app.world().resource::<RigBuilt>().built);
    assert_eq!(count_pivots(&mut app, PartClass::Hood), 1);
}
