//! Error taxonomy for binding and dispatch.
//!
//! Everything that can go wrong here is either a startup-time failure
//! (configuration or discovery) or a structural invariant violation at
//! dispatch. Malformed request values are *not* errors: extraction falls
//! back to the declared default instead, so route methods stay total
//! functions of well-typed inputs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required annotation option is missing or structurally invalid,
    /// e.g. a `Query` without a `type` or a whole-body `Post` without an
    /// `alias`. Raised while callbacks are built, never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A route class failed to load or carries a malformed declaration.
    /// Startup binding aborts; nothing from the broken file is registered.
    #[error("discovery error: {0}")]
    Discovery(String),

    /// A stage callback ran before the route's `initialize` constructed
    /// its per-request instance. This cannot happen under normal binding
    /// and always indicates a structural bug, so it surfaces loudly.
    #[error("no handler instance for route class {0:?}")]
    MissingInstance(String),

    /// An opaque failure raised by a route-handler method. The pipeline
    /// is expected to route it to its own error stages.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}
