//! Process-wide logging setup shared by the hbnb binaries.

/// Install the JSON log subscriber.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_DIRECTIVE);
}

/// Subscriber configuration (filters, output).
pub mod tracing;
