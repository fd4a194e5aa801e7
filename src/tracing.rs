//! Tracing subscriber setup for applications embedding the binder.
//!
//! Binding emits `debug` events per bound route and `warn` events for
//! classes without routes; this module wires up a formatted subscriber
//! for hosts that don't bring their own.

use tracing_subscriber::{
    Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

pub use tracing::level_filters::LevelFilter;

/// Initializes the global tracing subscriber with formatted output.
pub fn init_tracing(level: LevelFilter) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_filter(level),
        )
        .init();
}
