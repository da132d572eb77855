//! Unit tests for the view camera rig.
//!
//! Tests cover:
//! - Damped interpolation factor clamping and convergence
//! - Idle orbit gating to the home view only
//! - Orbit geometry preserving the distance to the subject
//! - Symbolic view identifier parsing with its default fallback

use bevy::math::Vec3;
use vehicle_render_engine::constants::view_poses::pose_for;
use vehicle_render_engine::engine::camera::view_rig::{damp_factor, orbit_position};
use vehicle_render_engine::engine::camera::{ViewId, ViewRig, orbit_active};

#[test]
fn damp_factor_is_clamped_for_large_deltas() {
    // A hitched frame must land exactly on target, never overshoot past it.
    assert_eq!(damp_factor(3.5, 10.0), 1.0);
    assert_eq!(damp_factor(100.0, 1.0), 1.0);
}

#[test]
fn damp_factor_scales_with_the_delta() {
    let slow = damp_factor(3.5, 1.0 / 240.0);
    let fast = damp_factor(3.5, 1.0 / 30.0);
    assert!(slow > 0.0 && slow < fast && fast < 1.0);
}

#[test]
fn repeated_damped_steps_converge_on_the_target() {
    let target = Vec3::new(5.4, 1.6, 1.8);
    let mut position = Vec3::new(4.6, 2.2, 5.2);

    let t = damp_factor(3.5, 1.0 / 60.0);
    for _ in 0..600 {
        position = position.lerp(target, t);
    }
    assert!((position - target).length() < 1.0e-3);
}

#[test]
fn orbit_runs_only_on_the_home_view() {
    assert!(orbit_active(ViewId::Home));
    assert!(!orbit_active(ViewId::Exterior));
    assert!(!orbit_active(ViewId::Interior));
    assert!(!orbit_active(ViewId::Engine));
    assert!(!orbit_active(ViewId::Default));
}

#[test]
fn orbit_position_preserves_distance_to_the_subject() {
    let pose = pose_for(ViewId::Home);
    let radius = (pose.position - pose.look_at).length();

    for i in 0..32 {
        let angle = i as f32 * 0.4;
        let orbited = orbit_position(&pose, angle);
        assert!(((orbited - pose.look_at).length() - radius).abs() < 1.0e-3);
        // The orbit is about the vertical axis, so height never changes.
        assert!((orbited.y - pose.position.y).abs() < 1.0e-4);
    }
}

#[test]
fn orbit_position_at_zero_angle_is_the_authored_pose() {
    let pose = pose_for(ViewId::Home);
    assert!((orbit_position(&pose, 0.0) - pose.position).length() < 1.0e-5);
}

#[test]
fn view_rig_retargets_without_resetting_orbit_phase() {
    let mut rig = ViewRig::default();
    assert_eq!(rig.view, ViewId::Home);

    rig.orbit_angle = 1.7;
    rig.set_view(ViewId::Engine);
    assert_eq!(rig.view, ViewId::Engine);
    assert_eq!(rig.orbit_angle, 1.7);

    // Returning home must resume the orbit where it left off.
    rig.set_view(ViewId::Home);
    assert_eq!(rig.orbit_angle, 1.7);
}

#[test]
fn view_identifiers_round_trip() {
    for view in [
        ViewId::Home,
        ViewId::Interior,
        ViewId::InteriorDetail,
        ViewId::Engine,
        ViewId::Exterior,
        ViewId::Paint,
        ViewId::PaintDetail,
        ViewId::FrontWheel,
        ViewId::InteriorFloor,
        ViewId::Default,
    ] {
        assert_eq!(ViewId::from_string(view.as_str()), view);
    }
}

#[test]
fn unknown_view_identifier_falls_back_to_default() {
    assert_eq!(ViewId::from_string("trunk"), ViewId::Default);
    assert_eq!(ViewId::from_string(""), ViewId::Default);

    let pose = pose_for(ViewId::Default);
    let home = pose_for(ViewId::Home);
    assert_eq!(pose.position, home.position);
}

#[test]
fn every_named_view_has_a_distinct_pose() {
    let views = [
        ViewId::Home,
        ViewId::Interior,
        ViewId::InteriorDetail,
        ViewId::Engine,
        ViewId::Exterior,
        ViewId::Paint,
        ViewId::PaintDetail,
        ViewId::FrontWheel,
        ViewId::InteriorFloor,
    ];
    for (i, a) in views.iter().enumerate() {
        for b in views.iter().skip(i + 1) {
            assert_ne!(
                pose_for(*a).position,
                pose_for(*b).position,
                "{a:?} and {b:?} share a camera position"
            );
        }
    }
}
