//! Unit tests for the swept segment-vs-AABB collision used by the foam spray.
//!
//! Tests cover:
//! - WorldAabb construction from point sets
//! - Broad-phase segment overlap rejection
//! - Narrow-phase slab test entry points and face normals
//! - Segments starting inside the box counting as misses

use bevy::math::Vec3;
use vehicle_render_engine::engine::effects::WorldAabb;

fn unit_box() -> WorldAabb {
    WorldAabb::from_center_half(Vec3::ZERO, Vec3::ONE)
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn from_points_bounds_every_input() {
    let points = [
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(-3.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, 7.0),
    ];
    let aabb = WorldAabb::from_points(points).unwrap();
    assert_eq!(aabb.min, Vec3::new(-3.0, -2.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 7.0));
    for p in points {
        assert!(aabb.contains(p));
    }
}

#[test]
fn from_points_is_none_for_empty_input() {
    assert_eq!(WorldAabb::from_points(std::iter::empty()), None);
}

#[test]
fn expanded_grows_symmetrically() {
    let aabb = unit_box().expanded(0.25);
    assert_eq!(aabb.min, Vec3::splat(-1.25));
    assert_eq!(aabb.max, Vec3::splat(1.25));
    assert_eq!(aabb.center(), Vec3::ZERO);
}

// =============================================================================
// BROAD PHASE
// =============================================================================

#[test]
fn broad_phase_rejects_distant_segments() {
    let aabb = unit_box();
    assert!(!aabb.overlaps_segment(Vec3::new(5.0, 0.0, 0.0), Vec3::new(8.0, 0.0, 0.0)));
    assert!(!aabb.overlaps_segment(Vec3::new(0.0, 2.5, 0.0), Vec3::new(0.0, 9.0, 0.0)));
}

#[test]
fn broad_phase_accepts_crossing_segments() {
    let aabb = unit_box();
    assert!(aabb.overlaps_segment(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)));
    assert!(aabb.overlaps_segment(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.6, 0.6, 0.6)));
}

// =============================================================================
// NARROW PHASE
// =============================================================================

#[test]
fn head_on_hit_returns_entry_face_point_and_normal() {
    let aabb = unit_box();
    let (point, normal) = aabb
        .segment_hit(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0))
        .expect("segment crosses the -X face");
    assert!((point - Vec3::new(-1.0, 0.0, 0.0)).length() < 1.0e-5);
    assert_eq!(normal, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn hit_from_above_reports_top_face_normal() {
    let aabb = unit_box();
    let (point, normal) = aabb
        .segment_hit(Vec3::new(0.2, 3.0, 0.1), Vec3::new(0.2, 0.0, 0.1))
        .expect("segment crosses the +Y face");
    assert!((point - Vec3::new(0.2, 1.0, 0.1)).length() < 1.0e-5);
    assert_eq!(normal, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn segment_stopping_short_of_the_box_misses() {
    let aabb = unit_box();
    assert_eq!(
        aabb.segment_hit(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0)),
        None
    );
}

#[test]
fn broad_phase_overlap_can_still_be_a_narrow_phase_miss() {
    // A diagonal segment whose own bounding box overlaps the target while the
    // segment itself clips past the corner. Exactly the case the two-phase
    // split exists for.
    let aabb = WorldAabb {
        min: Vec3::ZERO,
        max: Vec3::ONE,
    };
    let from = Vec3::new(2.0, 0.5, 0.5);
    let to = Vec3::new(0.5, 2.0, 0.5);
    assert!(aabb.overlaps_segment(from, to));
    assert_eq!(aabb.segment_hit(from, to), None);
}

#[test]
fn segment_starting_inside_has_no_entry_face() {
    let aabb = unit_box();
    assert_eq!(
        aabb.segment_hit(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)),
        None
    );
}

#[test]
fn axis_parallel_segment_outside_slab_misses() {
    let aabb = unit_box();
    // Parallel to X but two units above the box: the degenerate-axis early
    // exit has to reject it.
    assert_eq!(
        aabb.segment_hit(Vec3::new(-3.0, 2.0, 0.0), Vec3::new(3.0, 2.0, 0.0)),
        None
    );
}
