use crate::{primitives::Intersect, ray::Ray};
use glam::Vec3;

/// An infinite plane through `center` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub center: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub const fn new(center: Vec3, normal: Vec3) -> Self {
        Self { center, normal }
    }
}

impl Intersect for Plane {
    fn intersection(&self, ray: &Ray) -> Option<f32> {
        let t = self.normal.dot(self.center - ray.origin) / self.normal.dot(ray.direction);

        // Parallel rays give inf or NaN
        if t.is_finite() && t > 0.0 {
            Some(t)
        } else {
            None
        }
    }

    fn normal(&self, _ray: &Ray, _point: Vec3) -> Vec3 {
        self.normal
    }
}
