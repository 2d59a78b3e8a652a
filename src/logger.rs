use log::LevelFilter;

/// Sends the host's progress lines to stderr at `level`. A `RUST_LOG` set in
/// the environment is applied on top, so single modules can be raised or muted.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}
