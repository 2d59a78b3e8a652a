use anyhow::ensure;
use serde::Deserialize;

/// Offset applied to spawned rays so they do not re-hit the surface they leave
pub const RAY_EPSILON: f32 = 0.001;

/// Deepest reflection/refraction tree `validate` accepts
pub const MAX_SUPPORTED_DEPTH: u32 = 16;

/// Sampling and recursion limits of the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Stochastic shadow rays cast toward each light
    pub shadow_runs: u32,
    /// Antialiasing samples per pixel
    pub pixel_runs: u32,
    /// Reflection/refraction depth
    pub max_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_runs: 6,
            pixel_runs: 15,
            max_depth: 6,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.pixel_runs > 0, "settings.pixel_runs must be at least 1");
        ensure!(self.shadow_runs > 0, "settings.shadow_runs must be at least 1");
        ensure!(
            self.max_depth <= MAX_SUPPORTED_DEPTH,
            "settings.max_depth must be at most {}",
            MAX_SUPPORTED_DEPTH
        );

        Ok(())
    }

    /// Every shading step may push two children, so a full binary tree of
    /// depth `max_depth` fits. Saturates at `usize::MAX`.
    pub fn stack_capacity(&self) -> usize {
        1usize
            .checked_shl(self.max_depth.saturating_add(1))
            .unwrap_or(usize::MAX)
    }

    /// Upper bound on the number of rays one primary ray can expand into.
    /// Saturates at `u32::MAX`.
    pub fn max_rays_per_sample(&self) -> u32 {
        1u32.checked_shl(self.max_depth.saturating_add(1))
            .map_or(u32::MAX, |rays| rays - 1)
    }
}
