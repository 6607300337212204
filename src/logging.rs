//! Logger setup for the binary. Library code only uses the `log` facade.

use env_logger::Env;

/// Install a global logger. With `NAME_SEARCH_TRACING=1` records flow through a
/// `tracing` fmt subscriber; otherwise a plain `env_logger` is used. Both honour
/// `RUST_LOG` and default to `info`.
pub fn init_logging() {
    let flag = std::env::var("NAME_SEARCH_TRACING").ok();
    if tracing_requested(flag.as_deref()) {
        init_tracing_from_env();
    } else {
        // Logs go to stderr so stdout stays clean for JSON output.
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(env_logger::Target::Stderr)
            .try_init();
    }
}

fn tracing_requested(flag: Option<&str>) -> bool {
    flag.map(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn init_tracing_from_env() {
    // Bridge log:: macros into tracing
    let _ = tracing_log::LogTracer::init();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("tracing subscriber installed");
    }
}
