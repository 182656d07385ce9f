//! Static obstacle index answering point and volume validity queries.

use bevy::math::Vec3A;
use bevy::math::bounding::{Aabb3d, IntersectsVolume};
use bevy::prelude::*;

/// Standing height of the body volume used for validity checks.
pub const DEFAULT_BODY_HEIGHT: f32 = 1.8;

/// Smallest spacing between samples when sweeping a segment.
const MIN_SAMPLE_SPACING: f32 = 0.05;
/// Upper bound on samples per segment sweep.
const MAX_SEGMENT_SAMPLES: usize = 1024;

/// Axis-aligned overlap test. Touching faces count as overlapping.
pub fn intersects(a: &Aabb3d, b: &Aabb3d) -> bool {
    a.intersects(b)
}

/// Build an obstacle box from its corners, in either order.
pub fn obstacle_from_corners(a: Vec3, b: Vec3) -> Aabb3d {
    Aabb3d {
        min: Vec3A::from(a.min(b)),
        max: Vec3A::from(a.max(b)),
    }
}

/// Static scene obstacles for the current level.
///
/// Volumes are supplied once per level load and never mutated while the
/// level runs, so every query is a pure read.
#[derive(Resource, Debug, Clone)]
pub struct CollisionOracle {
    obstacles: Vec<Aabb3d>,
    body_height: f32,
}

impl Default for CollisionOracle {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_BODY_HEIGHT)
    }
}

impl CollisionOracle {
    pub fn new(obstacles: Vec<Aabb3d>, body_height: f32) -> Self {
        Self {
            obstacles,
            body_height: body_height.max(0.0),
        }
    }

    /// Replace every obstacle with a fresh set.
    pub fn rebuild(&mut self, obstacles: impl IntoIterator<Item = Aabb3d>) {
        self.obstacles.clear();
        self.obstacles.extend(obstacles);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &[Aabb3d] {
        &self.obstacles
    }

    pub fn body_height(&self) -> f32 {
        self.body_height
    }

    /// Box occupied by a body standing at `point`: `radius` out on the
    /// planar axes, `body_height` up from the feet.
    pub fn body_volume(&self, point: Vec3, radius: f32) -> Aabb3d {
        let radius = radius.max(0.0);
        Aabb3d {
            min: Vec3A::new(point.x - radius, point.y, point.z - radius),
            max: Vec3A::new(point.x + radius, point.y + self.body_height, point.z + radius),
        }
    }

    /// True iff a body of `radius` at `point` overlaps no obstacle.
    pub fn is_valid_position(&self, point: Vec3, radius: f32) -> bool {
        if !point.is_finite() {
            return false;
        }
        let body = self.body_volume(point, radius);
        !self.obstacles.iter().any(|obstacle| intersects(&body, obstacle))
    }

    /// Sweep a body from `from` to `to`, checking validity at evenly spaced
    /// samples no further apart than half the radius. The start point is
    /// not checked; callers validate it separately.
    pub fn is_segment_clear(&self, from: Vec3, to: Vec3, radius: f32) -> bool {
        let length = from.distance(to);
        if !length.is_finite() {
            return false;
        }
        let spacing = (radius * 0.5).max(MIN_SAMPLE_SPACING);
        let samples = ((length / spacing).ceil() as usize).clamp(1, MAX_SEGMENT_SAMPLES);

        (1..=samples).all(|i| {
            let t = i as f32 / samples as f32;
            self.is_valid_position(from.lerp(to, t), radius)
        })
    }
}
