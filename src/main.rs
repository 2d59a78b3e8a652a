use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use raytrace::{
    cli::{Args, DEFAULT_CONFIG},
    config::RenderConfig,
    logger::init_logger,
    output::save_bgra_png,
    render, Scene, REFERENCE_SCENE,
};
use std::path::Path;

fn load_config(args: &Args) -> anyhow::Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            RenderConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => RenderConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbosity.level_filter());

    let config = load_config(&args)?;
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build the render thread pool")?;
    }
    debug!("Rendering on {} threads", rayon::current_num_threads());
    info!(
        "Resolution {}x{}, {} frame(s) from animation {}, {:?}",
        config.width, config.height, config.frames, config.animation, config.settings
    );

    let scene: &Scene = &REFERENCE_SCENE;
    for frame in config.frames() {
        let (buffer, stats) = render(scene, &config.settings, &frame);
        info!(
            "Frame {}: time elapsed {:.2?}, total rays {:.2}M, rays per second {:.2}M",
            frame.animation,
            stats.elapsed,
            stats.rays as f64 / 1_000_000.0,
            stats.rays_per_second() / 1_000_000.0
        );

        let path = config.output_path(frame.animation);
        save_bgra_png(&path, &buffer, frame.width, frame.height)?;
        info!("Saved {}", path.display());
    }

    Ok(())
}
