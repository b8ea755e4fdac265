//! Log output for applications using einarray
//!
//! The library crates only emit `tracing` events: `debug` for bound reduction
//! plans and einsum runs, `trace` for parsing, broadcasting and elementwise
//! calls. [`init_tracing`] prints them through `tracing-subscriber`.
//!
//! The filter comes from the argument, then `RUST_LOG`, then `warn`.
//! `EINARRAY_LOG_FORMAT=json` switches to one JSON object per event.

use anyhow::{anyhow, Result};

/// Output format for [`init_tracing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human-readable events
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Format named by `EINARRAY_LOG_FORMAT`; anything but `json` is text.
    pub fn from_env() -> Self {
        match std::env::var("EINARRAY_LOG_FORMAT") {
            Ok(s) if s.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn filter_directive(filter: Option<&str>) -> String {
    filter
        .map(str::to_string)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string())
}

/// Install a global subscriber. Fails on a malformed filter or when a global
/// subscriber is already set.
#[cfg(feature = "tracing")]
pub fn init_tracing(filter: Option<&str>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let directive = filter_directive(filter);
    let env_filter = EnvFilter::try_new(&directive)?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let format = LogFormat::from_env();
    let installed = match format {
        LogFormat::Text => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow!("cannot install subscriber: {e}"))?;

    tracing::debug!(?format, filter = %directive, "tracing initialized");
    Ok(())
}

/// Without the `tracing` feature only the filter is checked for emptiness.
#[cfg(not(feature = "tracing"))]
pub fn init_tracing(filter: Option<&str>) -> Result<()> {
    if filter_directive(filter).trim().is_empty() {
        return Err(anyhow!("empty log filter"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_wins() {
        assert_eq!(filter_directive(Some("einarray_exec=debug")), "einarray_exec=debug");
        assert!(!filter_directive(None).is_empty());
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn test_stub_accepts_filters() {
        assert!(init_tracing(Some("info")).is_ok());
        assert!(init_tracing(Some("  ")).is_err());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_bad_filter_rejected() {
        assert!(init_tracing(Some("einarray=notalevel")).is_err());
    }
}
