use std::env;

use tracing::Level;
use tracing_subscriber::EnvFilter;

const LEVEL_ENV: &str = "DROIDSHELF_LOG";

/// Installs the global `tracing` subscriber.
///
/// A set `RUST_LOG` is used as-is. Otherwise `DROIDSHELF_LOG` picks the
/// level for this crate's own target (defaults to `info`).
pub(crate) fn init_logging() {
    let level = default_level(env::var(LEVEL_ENV).ok().as_deref());
    let filter = build_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_filter(rust_log: Option<&str>, level: Level) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("droidshelf={}", level)))
}

fn default_level(value: Option<&str>) -> Level {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn default_level_parses_known_names() {
        assert_eq!(default_level(Some("debug")), Level::DEBUG);
        assert_eq!(default_level(Some(" WARN ")), Level::WARN);
        assert_eq!(default_level(Some("trace")), Level::TRACE);
    }

    #[test]
    fn default_level_falls_back_to_info() {
        assert_eq!(default_level(None), Level::INFO);
        assert_eq!(default_level(Some("loud")), Level::INFO);
    }

    #[test]
    fn rust_log_directives_are_kept() {
        let filter = build_filter(Some("droidshelf=debug"), Level::INFO);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn crate_level_applies_without_rust_log() {
        let filter = build_filter(None, Level::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let blank = build_filter(Some("  "), Level::TRACE);
        assert_eq!(blank.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
