use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins; otherwise `--verbose`
/// selects debug output for the zenith crates.
pub fn setup_logging(verbose: bool) {
    let default = if verbose {
        "zenith_manager=debug,zenith_dialog=debug,zenith_applist=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
