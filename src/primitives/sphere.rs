use crate::{primitives::Intersect, ray::Ray};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() < self.radius * self.radius
    }

    /// Both roots of the ray/sphere quadratic, nearest first, or None if the
    /// line misses the sphere or its closest approach lies behind the origin.
    pub fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        let to_center = self.center - ray.origin;
        let projection = ray.direction.dot(to_center);

        // Behind
        if projection < 0.0 {
            return None;
        }

        let discriminant =
            projection * projection - to_center.length_squared() + self.radius * self.radius;
        if discriminant < 0.0 {
            return None;
        }

        let discriminant = f32::sqrt(discriminant);
        Some((projection - discriminant, projection + discriminant))
    }
}

impl Intersect for Sphere {
    fn intersection(&self, ray: &Ray) -> Option<f32> {
        let (close, further) = self.roots(ray)?;
        // The far root covers rays starting inside the sphere
        let t = if close > 0.0 { close } else { further };

        if t > 0.0 {
            Some(t)
        } else {
            None
        }
    }

    fn normal(&self, ray: &Ray, point: Vec3) -> Vec3 {
        if self.contains(ray.origin) {
            (self.center - point).normalize()
        } else {
            (point - self.center).normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(vec3(0.0, 0.0, 5.0), 1.0)
    }

    #[test]
    fn roots_are_symmetric_about_the_center_projection() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let (close, further) = sphere.roots(&ray).unwrap();

        assert!((close - 4.0).abs() < 1e-6);
        assert!((further - 6.0).abs() < 1e-6);
        assert!(((close + further) / 2.0 - 5.0).abs() < 1e-6);
        assert_eq!(sphere.intersection(&ray), Some(close));
    }

    #[test]
    fn origin_inside_uses_far_root() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(vec3(0.0, 0.0, 4.5), Vec3::Z);
        let t = sphere.intersection(&ray).unwrap();

        assert!((t - 1.5).abs() < 1e-6);
        let point = ray.point_at_parameter(t);
        // Inward normal while inside
        assert!(sphere.normal(&ray, point).abs_diff_eq(-Vec3::Z, 1e-6));
    }

    #[test]
    fn outward_normal_from_outside() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let point = ray.point_at_parameter(sphere.intersection(&ray).unwrap());
        assert!(sphere.normal(&ray, point).abs_diff_eq(-Vec3::Z, 1e-6));

        let side = Ray::new(vec3(3.0, 0.0, 5.0), -Vec3::X);
        let point = side.point_at_parameter(sphere.intersection(&side).unwrap());
        assert!(sphere.normal(&side, point).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn sphere_behind_is_rejected() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(sphere.roots(&ray).is_none());
        assert!(sphere.intersection(&ray).is_none());
    }

    #[test]
    fn ray_passing_beside_misses() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(vec3(1.5, 0.0, 0.0), Vec3::Z);
        assert!(sphere.intersection(&ray).is_none());
    }

    #[test]
    fn tangent_ray_touches_once() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(vec3(1.0, 0.0, 0.0), Vec3::Z);
        let (close, further) = sphere.roots(&ray).unwrap();
        assert_eq!(close, further);
    }
}
