use tracing::Level;

/// Install the fmt subscriber on stderr so stdout stays free for results.
/// `verbose` lowers the threshold from WARN to DEBUG. Safe to call twice.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
