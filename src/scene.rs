use crate::{
    camera::CameraRig,
    material::{Surface, SurfacePoint},
    primitives::{Intersect, Plane, Sphere},
    ray::{Hit, Ray},
};
use glam::{vec3, Vec3};
use lazy_static::lazy_static;

/// A spherical area light. It is also an ordinary visible sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub sphere: Sphere,
    pub surface: Surface,
    /// Emitted radiance, only used when the light is the target of illumination
    pub light: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Item {
    Sphere { sphere: Sphere, surface: Surface },
    Light(Light),
    Checker { plane: Plane, surface: Surface },
}

impl Item {
    pub const fn sphere(center: Vec3, radius: f32, surface: Surface) -> Self {
        Item::Sphere {
            sphere: Sphere::new(center, radius),
            surface,
        }
    }

    pub const fn light(center: Vec3, radius: f32, light: Vec3) -> Self {
        Item::Light(Light {
            sphere: Sphere::new(center, radius),
            surface: Surface::light(),
            light,
        })
    }

    pub const fn checker(center: Vec3, normal: Vec3, surface: Surface) -> Self {
        Item::Checker {
            plane: Plane::new(center, normal),
            surface,
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, Item::Light(_))
    }

    pub fn surface(&self) -> &Surface {
        match self {
            Item::Sphere { surface, .. } | Item::Checker { surface, .. } => surface,
            Item::Light(light) => &light.surface,
        }
    }

    /// Material values at `point`; only the checker varies across its surface.
    pub fn surface_at(&self, point: Vec3) -> SurfacePoint {
        match self {
            Item::Checker { surface, .. } => SurfacePoint::checker(surface, point),
            _ => SurfacePoint::uniform(self.surface()),
        }
    }

    fn shape(&self) -> &dyn Intersect {
        match self {
            Item::Sphere { sphere, .. } => sphere,
            Item::Light(light) => &light.sphere,
            Item::Checker { plane, .. } => plane,
        }
    }
}

impl Intersect for Item {
    fn intersection(&self, ray: &Ray) -> Option<f32> {
        self.shape().intersection(ray)
    }

    fn normal(&self, ray: &Ray, point: Vec3) -> Vec3 {
        self.shape().normal(ray, point)
    }
}

/// Read-only scene data shared by every pixel of a frame.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: CameraRig,
    items: Vec<Item>,
    lights: Vec<Light>,
}

impl Scene {
    /// The lights list is derived from the items so every light is also visible.
    pub fn new(camera: CameraRig, items: Vec<Item>) -> Self {
        let lights = items
            .iter()
            .filter_map(|item| match item {
                Item::Light(light) => Some(*light),
                _ => None,
            })
            .collect();

        Self {
            camera,
            items,
            lights,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Brute force scan for the item nearest to the ray origin.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;
        let mut closest_distance2 = f32::INFINITY;

        for item in &self.items {
            if let Some(t) = item.intersection(ray) {
                let distance2 = (ray.direction * t).length_squared();
                if distance2 != 0.0 && distance2 < closest_distance2 {
                    closest_distance2 = distance2;
                    closest = Some(Hit {
                        t,
                        point: ray.point_at_parameter(t),
                        item,
                    });
                }
            }
        }

        closest
    }

    /// Three spheres (one glass), a checkered floor and four area lights.
    pub fn reference() -> Self {
        const DIM: f32 = 0.5;
        const INTENSITY: f32 = 0.5;

        let lights = [
            Item::light(
                vec3(3.0, 3.0, -4.0),
                1.0,
                vec3(DIM + 0.25, DIM + 0.25, DIM) * INTENSITY,
            ),
            Item::light(
                vec3(0.0, 3.0, 0.0),
                1.0,
                vec3(DIM, DIM, DIM + 0.1) * INTENSITY,
            ),
            Item::light(
                vec3(-3.0, 3.0, 0.0),
                1.0,
                vec3(DIM, DIM + 0.2, DIM) * INTENSITY,
            ),
            Item::light(vec3(3.0, 2.5, 3.0), 1.0, Vec3::splat(DIM * 0.5 * INTENSITY)),
        ];

        let glass = Surface::new(Vec3::splat(0.02), Vec3::splat(0.15), 0.05, 1.9, 100);
        let red = Surface::new(vec3(0.5, 0.0, 0.0), vec3(0.5, 0.0, 0.0), 0.4, 0.0, 100);
        let blue = Surface::new(vec3(0.0, 0.0, 0.9), vec3(0.5, 0.0, 0.0), 0.4, 0.0, 100);
        let floor = Surface::new(Vec3::ONE, Vec3::splat(0.5), 0.4, 0.0, 100);

        let mut items = vec![
            Item::sphere(vec3(1.0, 1.0, -0.8), 0.5, glass),
            Item::sphere(vec3(-1.0, 1.0, 3.0), 1.0, red),
            Item::sphere(vec3(-9.0, 1.0, 5.0), 1.0, blue),
            Item::checker(Vec3::ZERO, Vec3::Y, floor),
        ];
        items.extend_from_slice(&lights);

        Self::new(CameraRig::default(), items)
    }
}

lazy_static! {
    /// The compiled-in scene rendered by the binary
    pub static ref REFERENCE_SCENE: Scene = Scene::reference();
}
