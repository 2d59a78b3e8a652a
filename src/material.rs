use glam::Vec3;

/// Surface description attached to every scene item.
///
/// Reflection and refraction are fixed coefficients, not derived from the
/// angle of incidence. A `refraction` of zero marks an opaque surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub reflection: f32,
    pub refraction: f32,
    pub specular_roughness: i32,
}

impl Surface {
    pub const fn new(
        diffuse: Vec3,
        specular: Vec3,
        reflection: f32,
        refraction: f32,
        specular_roughness: i32,
    ) -> Self {
        Self {
            diffuse,
            specular,
            reflection,
            refraction,
            specular_roughness,
        }
    }

    /// Lights are only ever lit by themselves, so they carry no reflectance.
    pub const fn light() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, 100)
    }

    pub fn is_refractive(&self) -> bool {
        self.refraction != 0.0
    }

    pub fn is_reflective(&self) -> bool {
        self.reflection > 0.0
    }
}

/// Material values resolved at a single point of an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub reflection: f32,
    pub refraction: f32,
    pub specular_roughness: i32,
}

impl SurfacePoint {
    pub fn uniform(surface: &Surface) -> Self {
        Self {
            diffuse: surface.diffuse,
            specular: surface.specular,
            reflection: surface.reflection,
            refraction: surface.refraction,
            specular_roughness: surface.specular_roughness,
        }
    }

    /// Checkerboard: the "off" tiles lose their diffuse color.
    pub fn checker(surface: &Surface, point: Vec3) -> Self {
        let mut resolved = Self::uniform(surface);
        if !checker_on(point) {
            resolved.diffuse = Vec3::ZERO;
        }
        resolved
    }

    /// True when the point reflects no light at all, so lighting can be skipped.
    pub fn is_dark(&self) -> bool {
        self.diffuse.length_squared() == 0.0 && self.specular.length_squared() == 0.0
    }
}

// Unit tiles on the xz plane. Negative coordinates are shifted by one so the
// tile straddling zero is not twice as wide.
pub fn checker_on(point: Vec3) -> bool {
    let tile = |c: f32| c as i32 + if c < 0.0 { 1 } else { 0 };
    (tile(point.x) + tile(point.z)) % 2 != 0
}
