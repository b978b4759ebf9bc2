//! Tracing setup helpers.
//!
//! The library itself only emits `tracing` events; wiring a subscriber is
//! left to the host. The CLI (and any embedder that wants a quick default)
//! can call `init_default_tracing`.

/// Initializes a default `tracing` subscriber when the `telemetry` feature
/// is enabled. Returns `true` on success, `false` when the feature is off or
/// a global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
