use std::sync::Once;

static INIT: Once = Once::new();

/// Sets up `env_logger`. `RUST_LOG` wins over `level` when present.
pub fn init_logging(level: log::LevelFilter) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(filter) => {
                builder.parse_filters(&filter);
            }
            Err(_) => {
                builder.filter_level(level);
            }
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
