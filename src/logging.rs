use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use std::sync::Once;

/// How much gets logged and whether it is colored.
///
/// With no `env_filter`, `RUST_LOG` decides, and failing that only `info` and above are shown.
/// Filters take the usual `env_logger` form, e.g. `"hello_triangle::shader=debug"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Sends the crate's diagnostics (startup failures, shader and link logs) to stdout.
///
/// Only the first call configures anything.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        builder.target(Target::Stdout);

        // Another logger may already be installed when embedded.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
