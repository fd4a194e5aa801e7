//! The staged-pipeline boundary.
//!
//! The pipeline itself (transport, routing-pattern matching, stage
//! sequencing) lives outside this crate. What the binder needs from it is
//! one operation: accept a callback for a `(stage, path)` pair and invoke
//! it, in declared stage order, for every matching request.

use futures_util::future::BoxFuture;

use crate::{class::StageOutput, context::RequestCtx, error::Error, stage::Stage};

/// A registered per-stage callback. Invoked with the current request's
/// context; the returned output is forwarded to the pipeline opaquely.
pub type StageCallback =
    Box<dyn for<'a> Fn(&'a mut RequestCtx) -> BoxFuture<'a, Result<StageOutput, Error>> + Send + Sync>;

/// Registration surface consumed from the external pipeline.
pub trait Pipeline {
    fn register(&mut self, stage: Stage, path: &str, callback: StageCallback);
}

/// Wraps a synchronous extraction closure as a [`StageCallback`]. Most of
/// the callbacks this crate registers do no async work of their own, and
/// third-party annotation kinds usually don't either.
pub fn sync_callback<F>(f: F) -> StageCallback
where
    F: Fn(&mut RequestCtx) -> Result<StageOutput, Error> + Send + Sync + 'static,
{
    Box::new(move |ctx: &mut RequestCtx| -> BoxFuture<'_, Result<StageOutput, Error>> {
        let result = f(ctx);
        Box::pin(std::future::ready(result))
    })
}
