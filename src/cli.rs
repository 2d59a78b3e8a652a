use crate::config::RenderConfig;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG: &str = "render.toml";

/// How chatty the renderer is on stderr. `quiet` silences even errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    /// Resolved config and per-frame ray statistics
    Progress,
    /// Also thread pool sizing and written files
    Detail,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Progress => LevelFilter::Info,
            Verbosity::Detail => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders the built-in scene to PNG. Flags override the config file.
#[derive(Debug, Parser)]
#[command(name = "raytrace")]
#[command(about = "Renders a small sphere scene with soft shadows, reflection and refraction")]
pub struct Args {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Animation index of the first frame
    #[arg(short, long, allow_negative_numbers = true)]
    pub animation: Option<i32>,

    /// Number of consecutive frames to render
    #[arg(short, long)]
    pub frames: Option<u32>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Worker threads, all cores by default
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Log verbosity, `RUST_LOG` overrides it per module
    #[arg(short, long, value_enum, default_value_t = Verbosity::Progress)]
    pub verbosity: Verbosity,
}

impl Args {
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(animation) = self.animation {
            config.animation = animation;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "raytrace",
            "--output",
            "frame.png",
            "--animation",
            "-12",
            "--width",
            "64",
        ]);
        let mut config = RenderConfig::default();
        args.apply(&mut config);

        assert_eq!(config.output, PathBuf::from("frame.png"));
        assert_eq!(config.animation, -12);
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 1000);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let args = Args::parse_from(["raytrace"]);
        let mut config = RenderConfig::default();
        args.apply(&mut config);

        assert_eq!(config, RenderConfig::default());
        assert_eq!(args.verbosity, Verbosity::Progress);
    }

    #[test]
    fn verbosity_names_map_to_log_levels() {
        let args = Args::parse_from(["raytrace", "--verbosity", "quiet"]);
        assert_eq!(args.verbosity.level_filter(), LevelFilter::Off);

        let args = Args::parse_from(["raytrace", "-v", "detail"]);
        assert_eq!(args.verbosity.level_filter(), LevelFilter::Debug);
    }
}
