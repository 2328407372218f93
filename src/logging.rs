// ============================================================================
// Logging
// Subscriber setup for binaries and demos (feature "logging")
// ============================================================================
//
// The library itself only emits tracing events:
// - TRACE on every exact fallback of a filtered predicate
// - DEBUG when a checked operation surfaces a domain error

use tracing::Level;

/// Install a formatting subscriber that prints events at `level` and above.
///
/// # Errors
/// Fails if a global subscriber has already been installed.
pub fn init(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
}
