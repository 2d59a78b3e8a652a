use crate::{
    math::{cot, right_of, up_of},
    random::Lcg48,
    ray::Ray,
    scene::Scene,
    settings::RenderSettings,
    transport::{trace, RenderStack, Traced},
};
use glam::{vec3, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Animation frames per unit of camera travel along the X axis
const DOLLY_FRAMES_PER_UNIT: f32 = 40.0;

/// A pinhole camera that dollies along the X axis as the animation advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Horizontal field of view in radians
    pub h_fov: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 1.25, -2.5),
            look_at: vec3(0.0, 0.5, 0.5),
            h_fov: FRAC_PI_2 * 0.9,
        }
    }
}

impl CameraRig {
    pub fn position_at(&self, animation: i32) -> Vec3 {
        self.position + Vec3::X * (animation as f32 / DOLLY_FRAMES_PER_UNIT)
    }

    /// The primary ray through pixel (x, y) and the vectors spanning one pixel.
    /// Row 0 is the top of the image.
    pub fn viewport(&self, x: u32, y: u32, width: u32, height: u32, animation: i32) -> Viewport {
        let origin = self.position_at(animation);
        let forward = (self.look_at - origin).normalize();
        let distance = cot(self.h_fov / 2.0) / 2.0 * width as f32;

        let horizontal = right_of(forward);
        let vertical = -up_of(forward, horizontal);

        // Pixel offsets from the image center, in whole pixels
        let dx = (i64::from(x) - i64::from(width / 2)) as f32;
        let dy = (i64::from(y) - i64::from(height / 2)) as f32;

        Viewport {
            ray: Ray::new(origin, forward * distance + horizontal * dx + vertical * dy),
            horizontal,
            vertical,
        }
    }
}

/// Per pixel camera ray and its jitter basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub ray: Ray,
    pub horizontal: Vec3,
    pub vertical: Vec3,
}

impl Viewport {
    /// The ray for antialiasing sample `index`. Sample 0 is the exact pixel
    /// center, the rest are jittered by up to half a pixel on both axes. Two
    /// draws are taken for every sample so the sequence does not depend on it.
    pub fn sample(&self, index: u32, rng: &mut Lcg48) -> Ray {
        let h_error = self.horizontal * (rng.uniform() - 0.5);
        let v_error = self.vertical * (rng.uniform() - 0.5);

        let direction = if index == 0 {
            self.ray.direction
        } else {
            self.ray.direction + h_error + v_error
        };

        Ray::new(self.ray.origin, direction.normalize())
    }
}

/// Averages `settings.pixel_runs` traced samples of a viewport.
pub fn sample_pixel(
    scene: &Scene,
    settings: &RenderSettings,
    viewport: &Viewport,
    stack: &mut RenderStack,
    rng: &mut Lcg48,
) -> Traced {
    let mut total = Traced::default();

    for index in 0..settings.pixel_runs {
        let ray = viewport.sample(index, rng);
        let traced = trace(scene, settings, ray, stack, rng);
        total.color += traced.color;
        total.rays += traced.rays;
    }

    total.color *= 1.0 / settings.pixel_runs as f32;
    total
}
