//! Bounded greedy path search over the collision oracle.
//!
//! Each step tries the straight heading to the goal first, then randomly
//! deviated headings whose spread widens with every rejected sample, then
//! the last heading that worked. Cheap enough to rerun every second per
//! entity; concave obstacles may leave the route short of the goal.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::collision::CollisionOracle;
use crate::content::NavigationConfig;

/// Tuning for a single search.
#[derive(Debug, Clone, Copy)]
pub struct PathParams {
    pub step_length: f32,
    pub max_iterations: u32,
    pub samples_per_step: u32,
    pub body_radius: f32,
}

impl From<&NavigationConfig> for PathParams {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            step_length: config.step_length,
            max_iterations: config.max_iterations,
            samples_per_step: config.samples_per_step,
            body_radius: config.body_radius,
        }
    }
}

impl Default for PathParams {
    fn default() -> Self {
        Self::from(&NavigationConfig::default())
    }
}

/// Compute a coarse obstacle-avoiding route from `from` toward `to`.
///
/// Returns an empty route when the start is not a valid position or when the
/// goal is already within one step. Waypoints stay at the height of `from`.
/// Every consecutive pair of points, starting at `from`, is clear under
/// [`CollisionOracle::is_segment_clear`]. When the goal is not reached within
/// the iteration budget the prefix ending nearest the goal is returned.
pub fn find_path<R: Rng + ?Sized>(
    oracle: &CollisionOracle,
    from: Vec3,
    to: Vec3,
    params: &PathParams,
    rng: &mut R,
) -> Vec<Vec3> {
    let radius = params.body_radius;
    let step_length = params.step_length.max(f32::EPSILON);
    if !oracle.is_valid_position(from, radius) || !to.is_finite() {
        return Vec::new();
    }

    let goal = Vec3::new(to.x, from.y, to.z);
    if from.distance(goal) <= step_length {
        return Vec::new();
    }

    let mut waypoints = Vec::new();
    let mut current = from;
    let mut heading: Option<Vec3> = None;
    let mut best = (from.distance(goal), 0usize);
    let mut reached = false;

    for _ in 0..params.max_iterations {
        let remaining = goal - current;
        if remaining.length() <= step_length && oracle.is_segment_clear(current, goal, radius) {
            waypoints.push(goal);
            reached = true;
            break;
        }

        let straight = remaining.normalize_or_zero();
        let Some(direction) = choose_step(oracle, current, straight, heading, params, rng)
        else {
            break;
        };

        current += direction * step_length;
        heading = Some(direction);
        waypoints.push(current);

        let distance = current.distance(goal);
        if distance < best.0 {
            best = (distance, waypoints.len());
        }
    }

    if !reached {
        waypoints.truncate(best.1);
    }
    waypoints
}

/// Pick the heading for the next step out of `current`, or `None` if every
/// candidate is blocked.
fn choose_step<R: Rng + ?Sized>(
    oracle: &CollisionOracle,
    current: Vec3,
    straight: Vec3,
    heading: Option<Vec3>,
    params: &PathParams,
    rng: &mut R,
) -> Option<Vec3> {
    let step = params.step_length;
    let radius = params.body_radius;
    let is_clear = |direction: Vec3| oracle.is_segment_clear(current, current + direction * step, radius);

    if straight != Vec3::ZERO && is_clear(straight) {
        return Some(straight);
    }

    let samples = params.samples_per_step.max(1);
    for sample in 1..=samples {
        let spread = PI * sample as f32 / samples as f32;
        let angle = rng.random_range(-spread..=spread);
        let candidate = Quat::from_rotation_y(angle) * straight;
        if candidate != Vec3::ZERO && is_clear(candidate) {
            return Some(candidate);
        }
    }

    heading.filter(|&previous| is_clear(previous))
}
