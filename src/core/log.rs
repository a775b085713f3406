// Logging goes to stderr; stdout only carries the answer
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is unset. Rate failures are warnings, so they
/// show even without `--verbose`.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "fxcall=debug" } else { "fxcall=warn" }
}

/// `RUST_LOG` wins when it is set and parses; otherwise the crate logs at
/// `warn`, or `debug` with `--verbose`.
pub fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    let default = default_directive(verbose);
    env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose, env_directives.as_deref()))
        .init();
}
