//! Logging and observability
//!
//! Tracing setup for the binary and the JSONL render history.

pub mod history;

pub use history::{RenderEntry, RenderHistory};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Events go to stderr so rendered reports on stdout stay clean. The level
/// comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
