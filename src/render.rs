//! Per-frame dispatch: one independent computation per pixel, spread over
//! rows with rayon, writing BGRA bytes.

use crate::{
    camera::sample_pixel,
    random::Lcg48,
    scene::Scene,
    settings::RenderSettings,
    transport::{RenderStack, Traced},
};
use glam::Vec3;
use rayon::prelude::*;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

pub const BYTES_PER_PIXEL: usize = 4;

/// What the host asks for on every dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Drives the camera dolly
    pub animation: i32,
}

impl Frame {
    pub fn new(width: u32, height: u32, animation: i32) -> Self {
        Self {
            width,
            height,
            animation,
        }
    }

    /// Linear pixel index, also the pixel's RNG seed
    pub fn pixel_index(&self, x: u32, y: u32) -> u64 {
        u64::from(y) * u64::from(self.width) + u64::from(x)
    }

    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderStats {
    pub rays: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn rays_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.rays as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Color of pixel (x, y), a pure function of the scene, settings, frame and coordinates.
///
/// `settings` are expected to pass [`RenderSettings::validate`]. Deeper trees
/// still render, but the work grows as `2^max_depth` per sample.
pub fn render_pixel(
    scene: &Scene,
    settings: &RenderSettings,
    frame: &Frame,
    x: u32,
    y: u32,
) -> Traced {
    let mut stack = RenderStack::for_settings(settings);
    render_pixel_on(scene, settings, frame, x, y, &mut stack)
}

/// `render_pixel` with a caller supplied stack, which must be empty.
fn render_pixel_on(
    scene: &Scene,
    settings: &RenderSettings,
    frame: &Frame,
    x: u32,
    y: u32,
    stack: &mut RenderStack,
) -> Traced {
    let mut rng = Lcg48::new(frame.pixel_index(x, y));
    let viewport = scene
        .camera
        .viewport(x, y, frame.width, frame.height, frame.animation);

    sample_pixel(scene, settings, &viewport, stack, &mut rng)
}

/// Channels are clamped to [0, 1] before scaling. Byte order is BGRA.
pub fn to_bgra(color: Vec3) -> [u8; 4] {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [byte(color.z), byte(color.y), byte(color.x), 255]
}

/// Fills `buffer` (row-major BGRA, `frame.buffer_len()` bytes) with the frame.
/// Same precondition on `settings` as [`render_pixel`].
pub fn render_into(
    scene: &Scene,
    settings: &RenderSettings,
    frame: &Frame,
    buffer: &mut [u8],
) -> RenderStats {
    assert_eq!(buffer.len(), frame.buffer_len(), "buffer does not match frame size");

    let ray_count = AtomicU64::new(0);
    let start = Instant::now();
    let row_len = frame.width as usize * BYTES_PER_PIXEL;

    if row_len > 0 {
        buffer
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                let mut row_rays = 0;
                let mut stack = RenderStack::for_settings(settings);
                row.chunks_mut(BYTES_PER_PIXEL)
                    .enumerate()
                    .for_each(|(x, pixel)| {
                        let (x, y) = (x as u32, y as u32);
                        let traced = render_pixel_on(scene, settings, frame, x, y, &mut stack);
                        pixel.copy_from_slice(&to_bgra(traced.color));
                        row_rays += u64::from(traced.rays);
                    });

                ray_count.fetch_add(row_rays, Ordering::Relaxed);
            });
    }

    RenderStats {
        rays: ray_count.load(Ordering::Relaxed),
        elapsed: start.elapsed(),
    }
}

/// Renders a whole frame into a freshly allocated BGRA buffer.
pub fn render(scene: &Scene, settings: &RenderSettings, frame: &Frame) -> (Vec<u8>, RenderStats) {
    let mut buffer = vec![0u8; frame.buffer_len()];
    let stats = render_into(scene, settings, frame, &mut buffer);
    (buffer, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn bytes_are_bgra() {
        assert_eq!(to_bgra(vec3(1.0, 0.5, 0.0)), [0, 127, 255, 255]);
    }

    #[test]
    fn black_is_opaque_black() {
        assert_eq!(to_bgra(Vec3::ZERO), [0, 0, 0, 255]);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(to_bgra(vec3(1.7, -0.2, 3.0)), [255, 0, 255, 255]);
    }

    #[test]
    fn pixel_index_is_row_major() {
        let frame = Frame::new(7, 5, 0);
        assert_eq!(frame.pixel_index(0, 0), 0);
        assert_eq!(frame.pixel_index(3, 2), 17);
        assert_eq!(frame.buffer_len(), 7 * 5 * 4);
    }

    #[test]
    fn shared_stack_gives_the_same_pixels() {
        let scene = Scene::reference();
        let settings = RenderSettings {
            pixel_runs: 3,
            ..RenderSettings::default()
        };
        let frame = Frame::new(24, 16, 0);
        let mut stack = RenderStack::for_settings(&settings);

        for y in (0..frame.height).step_by(3) {
            for x in 0..frame.width {
                let shared = render_pixel_on(&scene, &settings, &frame, x, y, &mut stack);
                assert_eq!(shared, render_pixel(&scene, &settings, &frame, x, y));
                assert!(stack.is_empty());
            }
        }
    }

    #[test]
    fn rays_per_second_handles_zero_time() {
        assert_eq!(RenderStats::default().rays_per_second(), 0.0);
        let stats = RenderStats {
            rays: 500,
            elapsed: Duration::from_millis(250),
        };
        assert!((stats.rays_per_second() - 2000.0).abs() < 1e-9);
    }
}
