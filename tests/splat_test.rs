//! Unit tests for foam splat placement.
//!
//! Tests cover:
//! - World-to-anchor-local conversion round-tripping exactly
//! - Quad orientation aligning +Z with the hit surface normal
//! - Placement staying correct under a rotated and translated anchor

use bevy::math::{Quat, Vec3};
use bevy::transform::components::{GlobalTransform, Transform};
use vehicle_render_engine::engine::effects::splats::splat_from_hit;

const EPSILON: f32 = 1.0e-4;

fn assert_close(a: Vec3, b: Vec3) {
    assert!(
        (a - b).length() < EPSILON,
        "expected {b:?}, got {a:?}"
    );
}

#[test]
fn identity_anchor_keeps_world_coordinates() {
    let anchor = GlobalTransform::IDENTITY;
    let splat = splat_from_hit(&anchor, Vec3::new(0.4, 1.2, -0.3), Vec3::X, 0.2);

    assert_close(splat.local_position, Vec3::new(0.4, 1.2, -0.3));
    assert_close(splat.local_orientation * Vec3::Z, Vec3::X);
    assert_eq!(splat.size, 0.2);
}

#[test]
fn hit_point_round_trips_through_a_transformed_anchor() {
    let anchor = GlobalTransform::from(
        Transform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_y(0.7)),
    );
    let world_point = Vec3::new(-0.5, 1.1, 2.4);
    let world_normal = Vec3::new(1.0, 0.0, 0.0);

    let splat = splat_from_hit(&anchor, world_point, world_normal, 0.15);

    // Mapping the stored local position back through the anchor must land on
    // the original world hit exactly; the mark may never drift off the panel.
    assert_close(anchor.transform_point(splat.local_position), world_point);
}

#[test]
fn quad_normal_tracks_the_surface_normal_in_world_space() {
    let anchor = GlobalTransform::from(
        Transform::from_translation(Vec3::new(0.3, 0.9, -1.2))
            .with_rotation(Quat::from_rotation_z(0.4) * Quat::from_rotation_y(-1.1)),
    );
    let world_normal = Vec3::new(0.0, 0.0, -1.0);

    let splat = splat_from_hit(&anchor, Vec3::new(0.1, 0.8, 0.0), world_normal, 0.2);

    let local_facing = splat.local_orientation * Vec3::Z;
    let world_facing = anchor
        .affine()
        .transform_vector3(local_facing)
        .normalize();
    assert_close(world_facing, world_normal);
}

#[test]
fn anchor_rotation_changes_local_but_not_world_placement() {
    let world_point = Vec3::new(0.7, 0.6, 1.9);
    let plain = GlobalTransform::IDENTITY;
    let rotated = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(1.3)));

    let splat_plain = splat_from_hit(&plain, world_point, Vec3::Y, 0.2);
    let splat_rotated = splat_from_hit(&rotated, world_point, Vec3::Y, 0.2);

    // Different local coordinates under different anchors...
    assert!((splat_plain.local_position - splat_rotated.local_position).length() > 0.1);

    // ...but identical world placement once mapped back.
    assert_close(
        plain.transform_point(splat_plain.local_position),
        rotated.transform_point(splat_rotated.local_position),
    );
}
