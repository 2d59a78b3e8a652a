//! This module is full of primitives that all impl Intersect

mod plane;
mod sphere;

pub use plane::*;
pub use sphere::*;

use crate::ray::Ray;
use glam::Vec3;

/// Computes whether a ray intersects the implementor
pub trait Intersect: Send + Sync {
    /// Distance along the ray to the nearest intersection in front of its origin.
    /// The ray direction is expected to be normalized.
    fn intersection(&self, ray: &Ray) -> Option<f32>;

    /// Surface normal at `point`, facing the side `ray` arrives from where that matters.
    fn normal(&self, ray: &Ray, point: Vec3) -> Vec3;
}
