//! A small ray tracer for a fixed scene of spheres, spherical area lights and
//! a checkered floor.
//!
//! Every pixel is an independent computation: the host asks for a [`Frame`]
//! and gets back a BGRA buffer. Reflection and refraction are expanded with an
//! explicit bounded stack instead of recursion, and all stochastic sampling
//! (soft shadows, antialiasing) draws from a per-pixel [`Lcg48`] seeded with
//! the pixel index, so a frame renders identically on any number of threads.

pub mod camera;
pub mod cli;
pub mod config;
pub mod logger;
pub mod material;
pub mod math;
pub mod output;
pub mod primitives;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod settings;
pub mod shading;
pub mod transport;

pub use camera::{CameraRig, Viewport};
pub use random::Lcg48;
pub use ray::Ray;
pub use render::{render, render_into, render_pixel, to_bgra, Frame, RenderStats};
pub use scene::{Item, Light, Scene, REFERENCE_SCENE};
pub use settings::RenderSettings;
