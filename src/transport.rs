//! Expands a primary ray into its reflection/refraction tree without recursion.
//!
//! Each popped entry is shaded and its children are pushed back onto a bounded
//! LIFO stack. Contributions are purely additive, so the traversal order only
//! changes how deep the stack gets, never the resulting color.

use crate::{
    random::Lcg48,
    ray::Ray,
    scene::Scene,
    settings::RenderSettings,
    shading::shade,
};
use glam::Vec3;

/// A ray waiting to be shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackEntry {
    /// Remaining bounces this ray may spawn
    pub depth: u32,
    pub ray: Ray,
    /// Attenuation accumulated over previous reflections
    pub magnitude: f32,
    /// Index of the medium the ray travels through
    pub refractive_index: f32,
}

impl StackEntry {
    /// A camera ray in vacuum at full strength.
    pub fn primary(ray: Ray, depth: u32) -> Self {
        Self {
            depth,
            ray,
            magnitude: 1.0,
            refractive_index: 1.0,
        }
    }
}

/// Bounded LIFO of pending rays. Overflowing it is a logic error and panics.
///
/// Storage grows on demand: a depth-first walk holds at most `max_depth + 2`
/// entries, far below the bound.
#[derive(Debug)]
pub struct RenderStack {
    entries: Vec<StackEntry>,
    capacity: usize,
}

impl RenderStack {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn for_settings(settings: &RenderSettings) -> Self {
        Self::bounded(settings.stack_capacity())
    }

    pub fn push(&mut self, entry: StackEntry) {
        assert!(
            self.entries.len() < self.capacity,
            "render stack overflow (capacity {})",
            self.capacity
        );
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries the backing storage currently has room for
    pub fn allocated(&self) -> usize {
        self.entries.capacity()
    }
}

/// Accumulated color of a ray tree and how many rays it took.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Traced {
    pub color: Vec3,
    pub rays: u32,
}

/// Traces `ray` and everything it spawns, up to `settings.max_depth` bounces.
pub fn trace(
    scene: &Scene,
    settings: &RenderSettings,
    ray: Ray,
    stack: &mut RenderStack,
    rng: &mut Lcg48,
) -> Traced {
    debug_assert!(stack.is_empty());
    stack.push(StackEntry::primary(ray, settings.max_depth));

    let mut traced = Traced::default();
    while let Some(entry) = stack.pop() {
        let shaded = shade(scene, settings, &entry, rng);
        traced.color += shaded.color;
        traced.rays += 1;

        for child in shaded.children {
            stack.push(child);
        }
    }

    traced
}
