use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the `debug` switch.
pub fn init_logger(json_mode: bool, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("sdf_param=debug,physics_check=debug")
        } else {
            EnvFilter::new("sdf_param=info,physics_check=info")
        }
    });

    if json_mode {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
