use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Picks the filter directive: `--verbose` wins, then `RUST_LOG`, then the
/// configured level, then `info`.
fn directive(verbose: bool, rust_log: Option<String>, config_level: &str) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or_else(|| Some(config_level.trim().to_string()).filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "info".to_string())
}

/// Installs the stderr subscriber. Stdout is left to the rendered output.
pub fn init(verbose: bool, config_level: &str) {
    let directive = directive(verbose, std::env::var("RUST_LOG").ok(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_precedence() {
        assert_eq!(directive(true, Some("warn".into()), "error"), "debug");
        assert_eq!(directive(false, Some("warn".into()), "error"), "warn");
        assert_eq!(directive(false, Some("  ".into()), "error"), "error");
        assert_eq!(directive(false, None, ""), "info");
    }
}
