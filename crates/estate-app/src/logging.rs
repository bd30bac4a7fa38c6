use tracing_subscriber::EnvFilter;

/// Human-readable logs on a terminal, JSON lines under cron/CI or when asked.
/// Logs go to stderr so stdout carries only the summary.
pub fn init(force_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = force_json || !atty::is(atty::Stream::Stderr);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
