use bevy::prelude::*;

/// Waypoints from a single path search plus how far along them the owner is.
///
/// The cursor only ever moves forward. Callers throw the whole path away and
/// search again rather than rewinding it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec3>,
    cursor: usize,
}

impl Path {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            cursor: 0,
        }
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The waypoint currently being walked toward.
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.cursor).copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    /// Consume every waypoint already within `reach` of `position` and return
    /// the next one still ahead.
    pub fn advance(&mut self, position: Vec3, reach: f32) -> Option<Vec3> {
        while let Some(waypoint) = self.current() {
            if position.distance(waypoint) > reach {
                break;
            }
            self.cursor += 1;
        }
        self.current()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
    }
}
