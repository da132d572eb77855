use bevy::prelude::*;

use super::classifier::PartClass;
use crate::constants::effect_settings::{PIVOT_DAMPING_RATE, VEHICLE_FORWARD};
use crate::engine::camera::view_rig::damp_factor;
use crate::engine::effects::WorldAabb;

/// Synthetic transform node a rigid sub-assembly rotates around. Created
/// once at rig build time and kept for the scene's lifetime.
#[derive(Component)]
pub struct PivotGroup {
    pub class: PartClass,
    pub axis: Vec3,
    pub current_angle: f32,
    pub target_angle: f32,
}

impl PivotGroup {
    pub fn new(class: PartClass, axis: Vec3) -> Self {
        Self {
            class,
            axis,
            current_angle: 0.0,
            target_angle: 0.0,
        }
    }
}

/// Marker for the left-door pivot so other layers (splat anchor) can attach.
#[derive(Component)]
pub struct DoorPivot;

/// Marker for the hood pivot.
#[derive(Component)]
pub struct HoodPivot;

/// Desired open angles for the animated groups. The shell writes these on
/// selection changes; the rig applies them to the live pivots every frame.
/// Decoupling the two means a selection made while the vehicle is still
/// loading lands on the rig once it exists instead of being dropped.
#[derive(Resource, Default)]
pub struct PivotTargets {
    pub hood_angle: f32,
    pub door_angle: f32,
}

/// Copy the desired angles onto whatever pivots currently exist.
pub fn sync_pivot_targets(targets: Res<PivotTargets>, mut pivots: Query<&mut PivotGroup>) {
    for mut pivot in &mut pivots {
        let target = match pivot.class {
            PartClass::Hood => targets.hood_angle,
            PartClass::DoorLeft => targets.door_angle,
            _ => continue,
        };
        if pivot.target_angle != target {
            pivot.target_angle = target;
        }
    }
}

/// Hinge placement computed from the group's combined bounds instead of
/// per-asset calibration, expressed against the documented `VEHICLE_FORWARD`
/// convention (nose toward +Z, driver side +X).
pub fn hinge_for(class: PartClass, bounds: &WorldAabb) -> (Vec3, Vec3) {
    let center = bounds.center();
    let half_forward = (bounds.max - center).dot(VEHICLE_FORWARD);
    let lateral = Vec3::Y.cross(VEHICLE_FORWARD);
    match class {
        // Hood swings up about its windshield-side top edge, the rearmost
        // edge of the group along the forward axis.
        PartClass::Hood => {
            let mut hinge = center - VEHICLE_FORWARD * half_forward;
            hinge.y = bounds.max.y;
            (hinge, lateral)
        }
        // Doors swing about the vertical edge at their forward side.
        PartClass::DoorLeft | PartClass::DoorRight => {
            (center + VEHICLE_FORWARD * half_forward, Vec3::Y)
        }
        PartClass::Excluded | PartClass::Unclassified => (center, Vec3::Y),
    }
}

/// Compute the local transform that keeps `child_world` unchanged when the
/// entity becomes a child of `parent_world`.
pub fn local_preserving_world(
    parent_world: &GlobalTransform,
    child_world: &GlobalTransform,
) -> Transform {
    let relative = parent_world.affine().inverse() * child_world.affine();
    Transform::from_matrix(Mat4::from(relative))
}

/// Re-parent `child` under `parent` without altering its world-space pose.
pub fn reparent_preserving_world(
    commands: &mut Commands,
    child: Entity,
    parent: Entity,
    parent_world: &GlobalTransform,
    child_world: &GlobalTransform,
) {
    let local = local_preserving_world(parent_world, child_world);
    commands.entity(child).insert((ChildOf(parent), local));
}

/// Ease every pivot's current angle toward its target and apply the rotation
/// about the stored axis. An empty pivot group is a harmless no-op here.
pub fn animate_pivots(mut pivots: Query<(&mut PivotGroup, &mut Transform)>, time: Res<Time>) {
    let t = damp_factor(PIVOT_DAMPING_RATE, time.delta_secs());
    for (mut pivot, mut transform) in &mut pivots {
        let delta = pivot.target_angle - pivot.current_angle;
        if delta.abs() > 1.0e-4 {
            pivot.current_angle += delta * t;
        } else {
            pivot.current_angle = pivot.target_angle;
        }
        transform.rotation = Quat::from_axis_angle(pivot.axis, pivot.current_angle);
    }
}
