//! Local shading of a single ray: diffuse and specular lighting from every
//! light with soft shadows, plus the reflection and refraction rays it spawns.

use crate::{
    math::{reflect, refract, right_of, up_of},
    primitives::Intersect,
    random::Lcg48,
    ray::Ray,
    scene::{Light, Scene},
    settings::{RenderSettings, RAY_EPSILON},
    transport::StackEntry,
};
use glam::Vec3;
use smallvec::SmallVec;

/// Color contributed by one stack entry and the child rays it spawned.
#[derive(Clone, Debug, Default)]
pub struct Shaded {
    pub color: Vec3,
    pub children: SmallVec<[StackEntry; 2]>,
}

/// Light gathered at a point before it is tinted by the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lighting {
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl std::ops::AddAssign for Lighting {
    fn add_assign(&mut self, other: Self) {
        self.diffuse += other.diffuse;
        self.specular += other.specular;
    }
}

/// Scales a light's emission by the alignment factors and the fraction of
/// shadow rays that reached it.
pub fn lit(
    emission: Vec3,
    diffuse_factor: f32,
    specular_factor: f32,
    specular_roughness: i32,
    fraction: f32,
) -> Lighting {
    let mut lighting = Lighting::default();
    if fraction <= 0.0 {
        return lighting;
    }

    if diffuse_factor > 0.0 {
        lighting.diffuse = emission * (diffuse_factor * fraction);
    }
    if specular_factor > 0.0 {
        lighting.specular = emission * (fraction * specular_factor.powi(specular_roughness));
    }

    lighting
}

/// Fraction of `runs` rays from `from` toward points jittered over the light's
/// disk whose closest hit is a light.
pub fn shadow_fraction(
    scene: &Scene,
    light: &Light,
    point: Vec3,
    from: Vec3,
    runs: u32,
    rng: &mut Lcg48,
) -> f32 {
    if runs == 0 {
        return 0.0;
    }

    let to_light = light.sphere.center - point;
    let forward = to_light.normalize();
    let right = right_of(forward);
    let up = up_of(forward, right);
    let radius = light.sphere.radius;

    let mut reached = 0;
    for _ in 0..runs {
        let r = rng.uniform() * 2.0 - 1.0;
        let u = rng.uniform() * f32::sqrt(1.0 - r * r);
        let direction = (to_light + right * (r * radius) + up * (u * radius)).normalize();

        // Any light counts, not only the one aimed at
        let hit = scene.closest_hit(&Ray::new(from, direction));
        if hit.map_or(false, |hit| hit.item.is_light()) {
            reached += 1;
        }
    }

    reached as f32 / runs as f32
}

/// Shades the closest hit along `entry.ray`. Children are returned, not traced.
pub fn shade(
    scene: &Scene,
    settings: &RenderSettings,
    entry: &StackEntry,
    rng: &mut Lcg48,
) -> Shaded {
    let ray = entry.ray;
    let hit = match scene.closest_hit(&ray) {
        Some(hit) => hit,
        None => return Shaded::default(),
    };

    let point = hit.point;
    let surface = hit.item.surface_at(point);
    let normal = hit.item.normal(&ray, point);
    let reflection = Ray::offset(point, reflect(ray.direction, normal), RAY_EPSILON);

    let mut lighting = Lighting::default();
    if !surface.is_dark() {
        for light in scene.lights() {
            let to_light = (light.sphere.center - point).normalize();
            let diffuse_factor = normal.dot(to_light);
            let specular_factor = reflection.direction.dot(to_light);

            if diffuse_factor > 0.0 || specular_factor > 0.0 {
                let fraction = shadow_fraction(
                    scene,
                    light,
                    point,
                    reflection.origin,
                    settings.shadow_runs,
                    rng,
                );
                lighting += lit(
                    light.light,
                    diffuse_factor,
                    specular_factor,
                    surface.specular_roughness,
                    fraction,
                );
            }
        }
    }

    let color = (lighting.diffuse * surface.diffuse + lighting.specular * surface.specular)
        * entry.magnitude;

    let mut children = SmallVec::new();
    if entry.depth > 0 {
        if surface.refraction != 0.0 {
            let refracted = refract(
                ray.direction,
                normal,
                entry.refractive_index,
                surface.refraction,
            )
            .filter(|direction| direction.length_squared() > 0.0);

            if let Some(direction) = refracted {
                children.push(StackEntry {
                    depth: entry.depth - 1,
                    ray: Ray::offset(point, direction, RAY_EPSILON),
                    magnitude: entry.magnitude,
                    refractive_index: surface.refraction,
                });
            }
        }

        if surface.reflection > 0.0 {
            children.push(StackEntry {
                depth: entry.depth - 1,
                ray: reflection,
                magnitude: entry.magnitude * surface.reflection,
                refractive_index: entry.refractive_index,
            });
        }
    }

    Shaded { color, children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{camera::CameraRig, material::Surface, scene::Item};
    use glam::vec3;

    fn matte(color: Vec3) -> Surface {
        Surface::new(color, Vec3::ZERO, 0.0, 0.0, 100)
    }

    fn entry(ray: Ray, depth: u32) -> StackEntry {
        StackEntry::primary(ray, depth)
    }

    // A matte sphere at the origin lit by one light straight above it
    fn lamp_scene(surface: Surface) -> Scene {
        Scene::new(
            CameraRig::default(),
            vec![
                Item::sphere(Vec3::ZERO, 1.0, surface),
                Item::light(vec3(0.0, 5.0, 0.0), 0.5, Vec3::ONE),
            ],
        )
    }

    #[test]
    fn miss_is_black_and_childless() {
        let scene = Scene::reference();
        let mut rng = Lcg48::new(0);
        let shaded = shade(
            &scene,
            &RenderSettings::default(),
            &entry(Ray::new(vec3(0.0, 5.0, 10.0), Vec3::Y), 6),
            &mut rng,
        );

        assert_eq!(shaded.color, Vec3::ZERO);
        assert!(shaded.children.is_empty());
        // No shadow rays were drawn
        assert_eq!(rng, Lcg48::new(0));
    }

    #[test]
    fn matte_sphere_under_light_is_diffuse_only() {
        let scene = lamp_scene(matte(vec3(0.8, 0.4, 0.2)));
        let mut rng = Lcg48::new(7);
        let ray = Ray::new(vec3(0.0, 3.0, 0.0), -Vec3::Y);
        let shaded = shade(&scene, &RenderSettings::default(), &entry(ray, 6), &mut rng);

        // Top of the sphere faces the light head on and nothing blocks it
        assert!(shaded.color.abs_diff_eq(vec3(0.8, 0.4, 0.2), 1e-5));
        assert!(shaded.children.is_empty());
    }

    #[test]
    fn magnitude_scales_local_color() {
        let scene = lamp_scene(matte(Vec3::ONE));
        let ray = Ray::new(vec3(0.0, 3.0, 0.0), -Vec3::Y);
        let mut weak = entry(ray, 0);
        weak.magnitude = 0.25;

        let shaded = shade(&scene, &RenderSettings::default(), &weak, &mut Lcg48::new(1));
        assert!(shaded.color.abs_diff_eq(Vec3::splat(0.25), 1e-5));
    }

    #[test]
    fn occluded_light_contributes_nothing() {
        let scene = Scene::new(
            CameraRig::default(),
            vec![
                Item::sphere(Vec3::ZERO, 1.0, matte(Vec3::ONE)),
                // Blocker between the sphere and the light
                Item::sphere(vec3(0.0, 3.0, 0.0), 1.5, matte(Vec3::ZERO)),
                Item::light(vec3(0.0, 6.0, 0.0), 0.5, Vec3::ONE),
            ],
        );
        let ray = Ray::new(vec3(0.0, 1.2, 1.0), vec3(0.0, -0.2, -1.0).normalize());
        let shaded = shade(&scene, &RenderSettings::default(), &entry(ray, 0), &mut Lcg48::new(3));

        assert_eq!(shaded.color, Vec3::ZERO);
    }

    #[test]
    fn reflective_surface_spawns_weighted_reflection() {
        let mirror = Surface::new(Vec3::ZERO, Vec3::ZERO, 0.4, 0.0, 100);
        let scene = lamp_scene(mirror);
        let ray = Ray::new(vec3(0.0, 3.0, 0.0), -Vec3::Y);
        let shaded = shade(&scene, &RenderSettings::default(), &entry(ray, 6), &mut Lcg48::new(0));

        assert_eq!(shaded.children.len(), 1);
        let child = shaded.children[0];
        assert_eq!(child.depth, 5);
        assert!((child.magnitude - 0.4).abs() < 1e-6);
        assert_eq!(child.refractive_index, 1.0);
        assert!(child.ray.direction.abs_diff_eq(Vec3::Y, 1e-6));
        assert!(child.ray.origin.y > 1.0);
    }

    #[test]
    fn glass_spawns_refraction_then_reflection() {
        let glass = Surface::new(Vec3::ZERO, Vec3::ZERO, 0.05, 1.9, 100);
        let scene = lamp_scene(glass);
        let ray = Ray::new(vec3(0.0, 3.0, 0.0), -Vec3::Y);
        let shaded = shade(&scene, &RenderSettings::default(), &entry(ray, 6), &mut Lcg48::new(0));

        assert_eq!(shaded.children.len(), 2);
        let refraction = shaded.children[0];
        assert_eq!(refraction.refractive_index, 1.9);
        assert_eq!(refraction.magnitude, 1.0);
        assert!(refraction.ray.direction.abs_diff_eq(-Vec3::Y, 1e-6));
        // Started just inside the sphere
        assert!(refraction.ray.origin.y < 1.0);

        let reflection = shaded.children[1];
        assert!((reflection.magnitude - 0.05).abs() < 1e-6);
    }

    #[test]
    fn depth_zero_spawns_nothing() {
        let glass = Surface::new(Vec3::ZERO, Vec3::ZERO, 0.05, 1.9, 100);
        let scene = lamp_scene(glass);
        let ray = Ray::new(vec3(0.0, 3.0, 0.0), -Vec3::Y);
        let shaded = shade(&scene, &RenderSettings::default(), &entry(ray, 0), &mut Lcg48::new(0));

        assert!(shaded.children.is_empty());
    }

    #[test]
    fn more_shadow_hits_never_dim_a_light() {
        let emission = vec3(0.4, 0.5, 0.6);
        let mut previous = Lighting::default();

        for hits in 0..=6 {
            let fraction = hits as f32 / 6.0;
            let current = lit(emission, 0.7, 0.9, 20, fraction);

            assert!(current.diffuse.cmpge(previous.diffuse).all());
            assert!(current.specular.cmpge(previous.specular).all());
            previous = current;
        }
    }

    #[test]
    fn backfacing_factors_are_ignored() {
        let lighting = lit(Vec3::ONE, -0.5, 0.5, 1, 1.0);
        assert_eq!(lighting.diffuse, Vec3::ZERO);
        assert!(lighting.specular.abs_diff_eq(Vec3::splat(0.5), 1e-6));
    }

    #[test]
    fn unobstructed_light_is_fully_visible() {
        let scene = lamp_scene(matte(Vec3::ONE));
        let light = scene.lights()[0];
        let point = vec3(0.0, 1.0, 0.0);
        let from = point + Vec3::Y * RAY_EPSILON;
        let fraction = shadow_fraction(&scene, &light, point, from, 6, &mut Lcg48::new(11));

        assert_eq!(fraction, 1.0);
    }
}
