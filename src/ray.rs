use crate::scene::Item;
use glam::Vec3;

/// The ray data type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// A ray starting `epsilon` along `direction` from `point`, so it does not
    /// immediately hit the surface it leaves.
    pub fn offset(point: Vec3, direction: Vec3, epsilon: f32) -> Self {
        Self::new(point + direction * epsilon, direction)
    }

    pub fn point_at_parameter(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// The closest item along a ray and the world-space point where it was hit.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub t: f32,
    pub point: Vec3,
    pub item: &'a Item,
}
