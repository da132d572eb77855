//! Unit tests for hinge placement and world-preserving re-parenting.
//!
//! Tests cover:
//! - Hood and door hinge points derived from group bounds
//! - Local transform computation that keeps a child's world pose fixed
//!   when it moves under a new parent

use bevy::math::{Quat, Vec3};
use bevy::transform::components::{GlobalTransform, Transform};
use vehicle_render_engine::engine::effects::WorldAabb;
use vehicle_render_engine::engine::rig::{PartClass, hinge_for, local_preserving_world};

#[test]
fn hood_hinges_at_the_windshield_side_top_edge() {
    // Nose toward +Z: the windshield side of the hood is its minimum-Z edge.
    let bounds = WorldAabb {
        min: Vec3::new(-0.7, 0.9, 0.8),
        max: Vec3::new(0.7, 1.1, 2.3),
    };
    let (hinge, axis) = hinge_for(PartClass::Hood, &bounds);
    assert_eq!(hinge, Vec3::new(0.0, 1.1, 0.8));
    assert_eq!(axis, Vec3::X);
}

#[test]
fn doors_hinge_on_the_vertical_forward_edge() {
    let bounds = WorldAabb {
        min: Vec3::new(0.8, 0.2, -0.9),
        max: Vec3::new(0.95, 1.3, 0.5),
    };

    let (hinge, axis) = hinge_for(PartClass::DoorLeft, &bounds);
    assert_eq!(hinge, Vec3::new(0.875, 0.75, 0.5));
    assert_eq!(axis, Vec3::Y);

    // Both doors share the hinge rule; side only affects which meshes belong.
    let (right_hinge, right_axis) = hinge_for(PartClass::DoorRight, &bounds);
    assert_eq!(right_hinge, hinge);
    assert_eq!(right_axis, axis);
}

#[test]
fn non_animated_classes_get_a_neutral_hinge() {
    let bounds = WorldAabb {
        min: Vec3::new(-1.0, 0.0, -2.0),
        max: Vec3::new(1.0, 1.0, 2.0),
    };
    let (hinge, axis) = hinge_for(PartClass::Unclassified, &bounds);
    assert_eq!(hinge, bounds.center());
    assert_eq!(axis, Vec3::Y);
}

#[test]
fn reparenting_local_transform_preserves_world_pose() {
    let parent_world = GlobalTransform::from(
        Transform::from_translation(Vec3::new(0.0, 1.1, 0.8))
            .with_rotation(Quat::from_rotation_x(-0.3)),
    );
    let child_world = GlobalTransform::from(
        Transform::from_translation(Vec3::new(0.2, 1.0, 1.6))
            .with_rotation(Quat::from_rotation_y(0.15)),
    );

    let local = local_preserving_world(&parent_world, &child_world);
    let recomposed = parent_world.mul_transform(local);

    let expected = child_world.translation();
    let actual = recomposed.translation();
    assert!((expected - actual).length() < 1.0e-5);

    // Rotation must survive as well, checked through a transformed probe.
    let probe = Vec3::new(0.3, -0.2, 0.7);
    let expected_probe = child_world.transform_point(probe);
    let actual_probe = recomposed.transform_point(probe);
    assert!((expected_probe - actual_probe).length() < 1.0e-5);
}

#[test]
fn identity_parent_yields_the_child_world_as_local() {
    let child_world = GlobalTransform::from(Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    let local = local_preserving_world(&GlobalTransform::IDENTITY, &child_world);
    assert!((local.translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1.0e-6);
}
