use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

// Reflect vector v around normal n
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

// Refract unit vector v through a surface with normal n, going from a medium with
// index n_from into one with index n_to. None on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, n_from: f32, n_to: f32) -> Option<Vec3> {
    let ratio = n_from / n_to;
    let cos_from = -n.dot(v);
    let sin_from2 = 1.0 - cos_from * cos_from;
    let cos_to2 = 1.0 - ratio * ratio * sin_from2;

    if cos_to2 < 0.0 {
        return None;
    }

    Some(v * ratio + n * (ratio * cos_from - f32::sqrt(cos_to2)))
}

pub fn cot(theta: f32) -> f32 {
    f32::tan(FRAC_PI_2 - theta)
}

/// Unit vector orthogonal to `forward` and to the world up axis.
/// Falls back to the world X axis when `forward` is parallel to up.
pub fn right_of(forward: Vec3) -> Vec3 {
    let right = Vec3::Y.cross(forward);

    if right.length_squared() == 0.0 {
        Vec3::X
    } else {
        right.normalize()
    }
}

pub fn up_of(forward: Vec3, right: Vec3) -> Vec3 {
    forward.cross(right)
}
