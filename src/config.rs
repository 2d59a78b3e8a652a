use crate::{render::Frame, settings::RenderSettings};
use anyhow::{ensure, Context};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Host side settings, read from a TOML file. Every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    /// Animation index of the first frame
    pub animation: i32,
    /// Number of consecutive frames to render
    pub frames: u32,
    /// Size of the rayon pool, all cores when absent
    pub threads: Option<usize>,
    pub settings: RenderSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1800,
            height: 1000,
            output: PathBuf::from("output.png"),
            animation: 0,
            frames: 1,
            threads: None,
            settings: RenderSettings::default(),
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "width and height must be positive"
        );
        ensure!(self.frames > 0, "frames must be at least 1");
        self.settings.validate()?;
        ensure!(
            !self.output.as_os_str().is_empty(),
            "output path must not be empty"
        );
        if let Some(threads) = self.threads {
            ensure!(threads > 0, "threads must be at least 1");
        }

        Ok(())
    }

    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        (0..self.frames).map(move |offset| {
            Frame::new(self.width, self.height, self.animation + offset as i32)
        })
    }

    /// A single frame goes to `output` as is. Sequences get the animation
    /// index appended to the file stem.
    pub fn output_path(&self, animation: i32) -> PathBuf {
        if self.frames <= 1 {
            return self.output.clone();
        }

        let stem = self
            .output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("frame"));
        let extension = self
            .output
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("png"));

        self.output
            .with_file_name(format!("{}_{:04}.{}", stem, animation, extension))
    }
}
