use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber so diagnostics never mix with stdout output.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on debug events
/// from both crates and the default is warnings only.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "fincalc_core=debug,fincalc_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from a test harness) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
