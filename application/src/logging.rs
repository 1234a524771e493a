//! Logging setup of the application.
//!
//! Standard output is reserved for the command result, so every log line is
//! written into a single diagnostic writer.

use std::sync::OnceLock;

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::filter_fn, fmt::MakeWriter, registry::LookupSpan, Layer,
};

/// [`Level`] logged if none is configured.
pub const DEFAULT_LEVEL: Level = Level::WARN;

/// Creates a [`Layer`] writing every event not more verbose than the `level`
/// into the provided `writer`.
///
/// [`DEFAULT_LEVEL`] is used until the `level` is set.
pub fn layer<S, W>(
    writer: W,
    level: &'static OnceLock<Level>,
) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(writer)
        .with_filter(filter_fn(move |meta| {
            meta.is_span()
                || level.get().copied().unwrap_or(DEFAULT_LEVEL) >= *meta.level()
        }))
}
