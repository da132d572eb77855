use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use std::collections::HashMap;

pub mod classifier;
pub mod pivot;

pub use classifier::{PartClass, PartManifest, classify};
pub use pivot::{
    DoorPivot, HoodPivot, PivotGroup, PivotTargets, hinge_for, local_preserving_world,
    reparent_preserving_world, sync_pivot_targets,
};

use crate::engine::EngineSet;
use crate::engine::effects::WorldAabb;
use crate::engine::effects::collision::world_corners;
use crate::engine::scene::VehicleRoot;

/// Guard flag: the rig is built exactly once per scene, no matter how many
/// times the build system is re-run by later triggers.
#[derive(Resource, Default)]
pub struct RigBuilt {
    pub built: bool,
}

/// Handle to the authored part classification manifest.
#[derive(Resource, Default)]
pub struct PartManifestHandle(pub Handle<PartManifest>);

/// Left-door meshes, tracked for live bounds and foam targeting.
#[derive(Component)]
pub struct DoorPanel;

/// Unclassified body shell meshes, used as the dirt overlay footprint.
#[derive(Component)]
pub struct BodyPanel;

/// Live world-space bounding box of the door panels, recomputed every frame
/// because the door may be mid-animation or idle-bobbing.
#[derive(Resource, Default)]
pub struct DoorBounds(pub Option<WorldAabb>);

/// Only these groups get a pivot; the right door is classified but its rig
/// stays disabled.
const ANIMATED_CLASSES: &[PartClass] = &[PartClass::Hood, PartClass::DoorLeft];

pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RigBuilt>()
            .init_resource::<DoorBounds>()
            .init_resource::<PivotTargets>()
            .add_systems(Startup, load_part_manifest)
            .add_systems(
                Update,
                (
                    build_rig.run_if(|built: Res<RigBuilt>| !built.built),
                    (update_door_bounds, pivot::sync_pivot_targets).in_set(EngineSet::Sequence),
                    pivot::animate_pivots.in_set(EngineSet::Present),
                ),
            );
    }
}

fn load_part_manifest(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(PartManifestHandle(
        asset_server.load("config/part_manifest.json"),
    ));
}

/// Scan the spawned vehicle mesh graph once, classify every leaf mesh, and
/// re-parent the animatable groups under synthetic pivots positioned at
/// hinge points computed from the group bounds. World-space appearance is
/// preserved across the re-parenting.
#[allow(clippy::too_many_arguments)]
pub fn build_rig(
    mut commands: Commands,
    mut rig_built: ResMut<RigBuilt>,
    manifest_handle: Option<Res<PartManifestHandle>>,
    manifests: Res<Assets<PartManifest>>,
    roots: Query<(Entity, &GlobalTransform), With<VehicleRoot>>,
    meshes: Query<(Entity, Option<&Name>, &ChildOf, &GlobalTransform, &Aabb), With<Mesh3d>>,
    parents: Query<&ChildOf>,
    names: Query<&Name>,
) {
    let Ok((root, root_world)) = roots.single() else {
        return;
    };

    let manifest = manifest_handle.and_then(|handle| manifests.get(&handle.0));

    let mut groups: HashMap<PartClass, Vec<(Entity, GlobalTransform, Aabb)>> = HashMap::new();
    let mut scanned = 0_usize;

    for (entity, name, child_of, transform, aabb) in &meshes {
        if !is_descendant_of(entity, root, &parents) {
            continue;
        }
        scanned += 1;

        let parent_name = names.get(child_of.parent()).ok().map(|n| n.as_str());
        let own_name = name.map(|n| n.as_str()).unwrap_or("");
        let class = classify(own_name, parent_name, manifest);

        match class {
            PartClass::DoorLeft => {
                commands.entity(entity).insert(DoorPanel);
            }
            PartClass::Unclassified => {
                commands.entity(entity).insert(BodyPanel);
            }
            _ => {}
        }

        groups
            .entry(class)
            .or_default()
            .push((entity, *transform, *aabb));
    }

    // The scene instance has not finished spawning yet; try again next frame
    // without consuming the guard.
    if scanned == 0 {
        return;
    }

    let root_inverse = root_world.affine().inverse();

    for &class in ANIMATED_CLASSES {
        let members = groups.remove(&class).unwrap_or_default();

        // Group bounds in vehicle-root space, so hinge placement is stable
        // regardless of where the scene shell put the vehicle.
        let local_corners = members.iter().flat_map(|(_, transform, aabb)| {
            world_corners(transform, aabb)
                .into_iter()
                .map(|c| root_inverse.transform_point3(c))
        });
        let bounds =
            WorldAabb::from_points(local_corners).unwrap_or(WorldAabb::from_center_half(
                Vec3::ZERO,
                Vec3::ZERO,
            ));

        let (hinge, axis) = hinge_for(class, &bounds);

        let mut pivot_commands = commands.spawn((
            Transform::from_translation(hinge),
            Visibility::default(),
            PivotGroup::new(class, axis),
            Name::new(match class {
                PartClass::Hood => "pivot_hood",
                PartClass::DoorLeft => "pivot_door_left",
                _ => "pivot",
            }),
            ChildOf(root),
        ));
        match class {
            PartClass::Hood => {
                pivot_commands.insert(HoodPivot);
            }
            PartClass::DoorLeft => {
                pivot_commands.insert(DoorPivot);
            }
            _ => {}
        }
        let pivot = pivot_commands.id();

        // Unmatched group: the pivot exists and animating it is a no-op.
        if members.is_empty() {
            warn!("No meshes classified as {:?}; pivot created empty", class);
        }

        let pivot_world = root_world.mul_transform(Transform::from_translation(hinge));
        for (entity, mesh_world, _) in &members {
            reparent_preserving_world(&mut commands, *entity, pivot, &pivot_world, mesh_world);
        }

        info!("Pivot for {:?} rigged with {} meshes", class, members.len());
    }

    rig_built.built = true;
}

/// Recompute the door panels' world bounds from their live transforms.
pub fn update_door_bounds(
    mut bounds: ResMut<DoorBounds>,
    panels: Query<(&GlobalTransform, &Aabb), With<DoorPanel>>,
) {
    let corners = panels
        .iter()
        .flat_map(|(transform, aabb)| world_corners(transform, aabb));
    bounds.0 = WorldAabb::from_points(corners);
}

fn is_descendant_of(entity: Entity, root: Entity, parents: &Query<&ChildOf>) -> bool {
    let mut current = entity;
    for _ in 0..64 {
        let Ok(child_of) = parents.get(current) else {
            return false;
        };
        if child_of.parent() == root {
            return true;
        }
        current = child_of.parent();
    }
    false
}
