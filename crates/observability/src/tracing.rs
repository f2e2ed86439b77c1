//! Tracing/logging initialization.
//!
//! JSON lines on stdout, one object per event, filtered by `RUST_LOG`.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber with `default_filter` as fallback.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    json_subscriber(filter, std::io::stdout).try_init().is_ok()
}

/// The subscriber `init` installs, writing to `writer` and filtered by
/// `filter` only (`RUST_LOG` is not consulted).
pub fn subscriber_with_writer<W>(
    filter: &str,
    writer: W,
) -> impl ::tracing::Subscriber + Send + Sync + use<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    json_subscriber(EnvFilter::new(filter), writer)
}

fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl ::tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_current_span(true)
        .with_target(false)
        .with_writer(writer)
        .finish()
}
