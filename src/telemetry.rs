//! Telemetry helpers for applications embedding `plot-rs`.
//!
//! The core only emits `tracing` events (layout iterations, recovered range
//! and data issues, tracker hits). Installing a subscriber stays the host's
//! decision: call `init_default_tracing` or wire your own.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `true` when the subscriber was installed, `false` when the
/// `telemetry` feature is disabled or a global subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn tracing_init_is_a_noop_without_the_feature() {
        assert!(!super::init_default_tracing());
    }
}
