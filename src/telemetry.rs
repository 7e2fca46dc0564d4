//! Opt-in `tracing` subscriber setup for the `word_scatter` binary and hosts
//! that do not bring their own.

/// Directive used when `RUST_LOG` is unset: chart and loader events at
/// `info`, everything else (HTTP stack included) at `warn`.
pub const DEFAULT_LOG_DIRECTIVES: &str = "warn,word_scatter=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_DIRECTIVES`].
///
/// Returns `false` without the `telemetry` feature, or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with(DEFAULT_LOG_DIRECTIVES)
}

/// Same as [`init_default_tracing`] with caller-chosen fallback directives.
#[must_use]
pub fn init_tracing_with(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
