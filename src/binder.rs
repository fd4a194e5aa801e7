//! The lifecycle stage binder.
//!
//! This is where the dispatch table is built: for every descriptor the
//! source yields, the binder registers, keyed by the declared path, the
//! instance-constructing `initialize` callback, the route-option seeding
//! callback, one dispatch callback per implemented lifecycle stage, and
//! whatever callbacks the auxiliary annotations contribute.
//! Everything is a plain closure capturing `Arc`s built at startup; no
//! runtime code generation, no reflection.
//!
//! # Examples
//!
//! ```rust
//! use remora::{annotation::HandlerRegistry, binder::Options, source::StaticSource};
//! use remora::testing::TestPipeline;
//!
//! # async fn example(source: StaticSource) -> Result<(), remora::Error> {
//! let registry = HandlerRegistry::new();
//! let mut pipeline = TestPipeline::default();
//! let bound = remora::attach(&mut pipeline, &source, &registry, &Options::default()).await?;
//! println!("bound {} routes", bound.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::{Map, Value};

use crate::{
    annotation::HandlerRegistry,
    class::{Args, RouteClass, StageOutput, StageSpec},
    context::RequestCtx,
    descriptor::{RouteDescriptor, build_descriptors},
    error::Error,
    instances::{construct_callback, seed_callback},
    pipeline::{Pipeline, StageCallback},
    source::ClassSource,
    stage::Stage,
};

/// Binding configuration.
///
/// `files` is forwarded to the class source as its discovery pattern.
/// `parameters` are forwarded verbatim as the second constructor argument
/// to every route class. Deserializable so hosts can lift it straight
/// out of their own configuration files.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    pub files: String,
    pub parameters: Map<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            files: "routes/**".to_owned(),
            parameters: Map::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(mut self, pattern: impl Into<String>) -> Self {
        self.files = pattern.into();
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Binds every class the source yields, after yielding one tick so other
/// plugins can register their own annotation kinds first. There is no
/// timeout on that window: a registration that never happens simply
/// isn't seen.
pub async fn attach<P: Pipeline>(
    pipeline: &mut P,
    source: &dyn ClassSource,
    registry: &HandlerRegistry,
    options: &Options,
) -> Result<Vec<RouteDescriptor>, Error> {
    tokio::task::yield_now().await;
    bind(pipeline, source, registry, options)
}

/// The synchronous body of [`attach`]: loads classes, builds descriptors
/// and registers their callbacks. Any discovery or configuration error
/// aborts the whole call; nothing from a broken file is registered.
pub fn bind<P: Pipeline>(
    pipeline: &mut P,
    source: &dyn ClassSource,
    registry: &HandlerRegistry,
    options: &Options,
) -> Result<Vec<RouteDescriptor>, Error> {
    let classes = source.load(&options.files)?;
    let parameters = Arc::new(options.parameters.clone());

    let mut bound = Vec::new();
    for declaration in &classes {
        for descriptor in build_descriptors(declaration)? {
            bind_descriptor(pipeline, registry, &parameters, &descriptor)?;
            bound.push(descriptor);
        }
    }
    Ok(bound)
}

fn bind_descriptor<P: Pipeline>(
    pipeline: &mut P,
    registry: &HandlerRegistry,
    parameters: &Arc<Map<String, Value>>,
    descriptor: &RouteDescriptor,
) -> Result<(), Error> {
    // Build every callback before touching the pipeline; a descriptor
    // that fails validation must not end up half bound.
    let mut callbacks: Vec<(Stage, StageCallback)> = Vec::new();
    callbacks.push((
        Stage::Initialize,
        construct_callback(Arc::clone(&descriptor.class), Arc::clone(parameters)),
    ));
    callbacks.push((Stage::Initialize, seed_callback(descriptor.options.clone())));
    for spec in descriptor.class.stages() {
        callbacks.push((spec.stage, dispatch_callback(Arc::clone(&descriptor.class), spec)));
    }
    for decl in descriptor.annotations.iter() {
        let handler = registry.get(decl.kind()).ok_or_else(|| {
            Error::Discovery(format!(
                "no handler registered for annotation kind {:?} on class {:?}",
                decl.kind(),
                descriptor.class.id()
            ))
        })?;
        callbacks.extend(handler.callbacks(decl, &descriptor.class)?);
    }

    for (stage, callback) in callbacks {
        pipeline.register(stage, &descriptor.path, callback);
    }
    tracing::debug!(
        method = %descriptor.method,
        path = %descriptor.path,
        class = descriptor.class.id(),
        "bound route"
    );
    Ok(())
}

/// Synthesizes the pipeline callback for one implemented lifecycle
/// stage: resolve the declared parameter names against the request,
/// look up the shared per-request instance by class identity, forward
/// the call and return its output opaquely. A missing instance violates
/// the construction invariant and surfaces as an error, on the
/// `error`/`aftererror` path too.
fn dispatch_callback(class: Arc<RouteClass>, spec: &StageSpec) -> StageCallback {
    let stage = spec.stage;
    let params = Arc::clone(&spec.params);
    Box::new(
        move |ctx: &mut RequestCtx| -> BoxFuture<'_, Result<StageOutput, Error>> {
            let class = Arc::clone(&class);
            let params = Arc::clone(&params);
            Box::pin(async move {
                let args = Args::new(
                    params
                        .iter()
                        .map(|name| (name.clone(), ctx.resolve(name)))
                        .collect(),
                );
                let instance = ctx
                    .instances
                    .get_mut(class.id())
                    .ok_or_else(|| Error::MissingInstance(class.id().to_owned()))?;
                instance.call(stage, args).await
            })
        },
    )
}
