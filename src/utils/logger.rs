use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How log lines are rendered. Results go to stdout, so logs always go to
/// stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One short line per event for a terminal.
    Compact,
    /// One JSON object per line, for CloudWatch.
    Json,
}

/// `RUST_LOG` wins; otherwise only this crate logs, at debug with `--verbose`.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "interest_calc=debug,warn"
    } else {
        "interest_calc=info,warn"
    }
}

pub fn init(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        // engine and amounts are already fields on each event
        LogFormat::Compact => registry.with(layer.compact()).init(),
        // Lambda stamps each line itself
        LogFormat::Json => registry.with(layer.without_time().json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(directives.starts_with("interest_calc="));
            assert!(directives.parse::<EnvFilter>().is_ok());
        }
        assert!(default_directives(true).contains("debug"));
    }
}
