use std::sync::Once;

/// Logger options.
///
/// `env_filter` uses `env_logger` directives, e.g.
/// `"easel_engine=debug,wgpu_core=warn"`. Without it `RUST_LOG` is read.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger. Only the first call has an
/// effect; window threads share the logger installed here.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }
        builder.write_style(config.write_style);

        // A logger installed by the host application wins.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
