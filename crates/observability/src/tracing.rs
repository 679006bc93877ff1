//! JSON logs on stderr, filtered by `RUST_LOG`.
//!
//! Log records never touch stdout. `hbnb` prints one rendered object per
//! stdout line, so piping its output (`hbnb Place | grep Loft`) only ever
//! sees objects while the JSON records stay on stderr.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber: one JSON object per event on stderr, with
/// wall-clock timestamps and no module target.
///
/// `RUST_LOG` wins when it parses; otherwise `default_directive` applies.
/// Returns false if a global subscriber was already set.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init("debug");
        assert!(!init("debug"));
        crate::init();
    }
}
