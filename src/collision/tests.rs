//! Collision domain: tests for body volumes and validity queries.

use approx::assert_relative_eq;
use bevy::math::Vec3A;
use bevy::prelude::*;
use rstest::rstest;

use super::{CollisionOracle, intersects, obstacle_from_corners};

fn pillar_oracle() -> CollisionOracle {
    // 2x2 pillar centred on the origin, tall enough to block any body.
    CollisionOracle::new(
        vec![obstacle_from_corners(
            Vec3::new(-1.0, -5.0, -1.0),
            Vec3::new(1.0, 5.0, 1.0),
        )],
        1.8,
    )
}

// -----------------------------------------------------------------------------
// Box intersection
// -----------------------------------------------------------------------------

#[test]
fn test_intersects_overlapping_boxes() {
    let a = obstacle_from_corners(Vec3::ZERO, Vec3::splat(2.0));
    let b = obstacle_from_corners(Vec3::splat(1.0), Vec3::splat(3.0));
    assert!(intersects(&a, &b));
    assert!(intersects(&b, &a));
}

#[test]
fn test_intersects_disjoint_boxes() {
    let a = obstacle_from_corners(Vec3::ZERO, Vec3::splat(1.0));
    let b = obstacle_from_corners(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
    assert!(!intersects(&a, &b));
}

#[test]
fn test_intersects_touching_faces_counts_as_overlap() {
    let a = obstacle_from_corners(Vec3::ZERO, Vec3::splat(1.0));
    let b = obstacle_from_corners(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(intersects(&a, &b));
}

#[test]
fn test_obstacle_from_corners_orders_extents() {
    let aabb = obstacle_from_corners(Vec3::new(3.0, 1.0, -2.0), Vec3::new(-1.0, 4.0, 2.0));
    assert_eq!(aabb.min, Vec3A::new(-1.0, 1.0, -2.0));
    assert_eq!(aabb.max, Vec3A::new(3.0, 4.0, 2.0));
}

// -----------------------------------------------------------------------------
// Position validity
// -----------------------------------------------------------------------------

#[test]
fn test_body_volume_extends_up_from_feet() {
    let oracle = CollisionOracle::default();
    let body = oracle.body_volume(Vec3::new(5.0, 0.5, -2.0), 0.6);
    assert_relative_eq!(body.min.x, 4.4, epsilon = 1e-5);
    assert_relative_eq!(body.min.y, 0.5);
    assert_relative_eq!(body.min.z, -2.6, epsilon = 1e-5);
    assert_relative_eq!(body.max.x, 5.6, epsilon = 1e-5);
    assert_relative_eq!(body.max.y, 0.5 + oracle.body_height());
    assert_relative_eq!(body.max.z, -1.4, epsilon = 1e-5);
}

#[rstest]
#[case(Vec3::new(0.0, 0.0, 0.0), false)]
#[case(Vec3::new(1.5, 0.0, 0.0), false)]
#[case(Vec3::new(1.7, 0.0, 0.0), true)]
#[case(Vec3::new(0.0, 0.0, -3.0), true)]
#[case(Vec3::new(0.0, 6.0, 0.0), true)]
fn test_is_valid_position_against_pillar(#[case] point: Vec3, #[case] expected: bool) {
    assert_eq!(pillar_oracle().is_valid_position(point, 0.6), expected);
}

#[test]
fn test_empty_oracle_accepts_far_out_of_bounds_points() {
    let oracle = CollisionOracle::default();
    assert!(oracle.is_valid_position(Vec3::splat(1.0e6), 0.6));
}

#[test]
fn test_non_finite_point_is_invalid() {
    let oracle = CollisionOracle::default();
    assert!(!oracle.is_valid_position(Vec3::new(f32::NAN, 0.0, 0.0), 0.6));
}

#[test]
fn test_rebuild_replaces_obstacles() {
    let mut oracle = pillar_oracle();
    oracle.rebuild(Vec::new());
    assert!(oracle.obstacles().is_empty());
    assert!(oracle.is_valid_position(Vec3::ZERO, 0.6));
}

// -----------------------------------------------------------------------------
// Segment sweeps
// -----------------------------------------------------------------------------

#[test]
fn test_segment_through_pillar_is_blocked() {
    let oracle = pillar_oracle();
    assert!(!oracle.is_segment_clear(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0), 0.6));
}

#[test]
fn test_segment_beside_pillar_is_clear() {
    let oracle = pillar_oracle();
    assert!(oracle.is_segment_clear(Vec3::new(-5.0, 0.0, 3.0), Vec3::new(5.0, 0.0, 3.0), 0.6));
}

#[test]
fn test_zero_length_segment_checks_endpoint() {
    let oracle = pillar_oracle();
    assert!(oracle.is_segment_clear(Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0), 0.6));
    assert!(!oracle.is_segment_clear(Vec3::ZERO, Vec3::ZERO, 0.6));
}
