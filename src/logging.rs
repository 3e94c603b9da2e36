use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "unlocode2openclimate=debug"
    } else {
        "unlocode2openclimate=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
