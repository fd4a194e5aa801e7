//! Route classes and their per-request handler instances.
//!
//! A [`RouteClass`] is the static description of one annotated route
//! handler: a unique source identity, a constructor, and the list of
//! lifecycle stages its handler implements together with the names of the
//! parameters each stage method expects. There is no runtime reflection;
//! the descriptor list supplied here is what the binder uses to resolve
//! named request values into positional arguments.
//!
//! # Examples
//!
//! ```rust
//! use remora::class::{Args, RouteClass, RouteHandler, StageOutput};
//! use remora::error::Error;
//! use remora::stage::Stage;
//!
//! struct PageRoute;
//!
//! #[async_trait::async_trait]
//! impl RouteHandler for PageRoute {
//!     async fn call(&mut self, stage: Stage, args: Args) -> Result<StageOutput, Error> {
//!         match stage {
//!             Stage::Process => Ok(StageOutput::Json(
//!                 serde_json::json!({ "page": args.get("page") }),
//!             )),
//!             _ => Ok(StageOutput::Empty),
//!         }
//!     }
//! }
//!
//! let class = RouteClass::new("routes/page", |_ctx, _params| Box::new(PageRoute))
//!     .stage(Stage::Process, &["page"]);
//! assert!(class.implements(Stage::Process));
//! ```

use std::{fmt, sync::Arc};

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{context::RequestCtx, error::Error, stage::Stage};

/// Ordered, named arguments resolved for one stage invocation.
///
/// Order follows the stage's declared parameter list, so handlers may
/// treat the arguments positionally or look them up by name.
#[derive(Debug, Clone, Default)]
pub struct Args(Vec<(String, Value)>);

impl Args {
    pub(crate) fn new(pairs: Vec<(String, Value)>) -> Self {
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Opaque return value of a stage method, forwarded untouched to the
/// pipeline. How (and whether) it is rendered into a response is the
/// pipeline's business.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    Empty,
    Text(String),
    Json(Value),
    Bytes(Bytes),
}

impl StageOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, StageOutput::Empty)
    }
}

impl From<()> for StageOutput {
    fn from(_: ()) -> Self {
        StageOutput::Empty
    }
}

impl From<String> for StageOutput {
    fn from(text: String) -> Self {
        StageOutput::Text(text)
    }
}

impl From<&str> for StageOutput {
    fn from(text: &str) -> Self {
        StageOutput::Text(text.to_owned())
    }
}

impl From<Value> for StageOutput {
    fn from(value: Value) -> Self {
        StageOutput::Json(value)
    }
}

impl From<Bytes> for StageOutput {
    fn from(bytes: Bytes) -> Self {
        StageOutput::Bytes(bytes)
    }
}

/// A per-request route-handler instance.
///
/// One instance is constructed per in-flight request and shared by every
/// stage callback bound to the route. `call` receives the stage being run
/// and the arguments resolved per the class's [`StageSpec`] for it.
#[async_trait::async_trait]
pub trait RouteHandler: Send {
    async fn call(&mut self, stage: Stage, args: Args) -> Result<StageOutput, Error>;
}

/// Which lifecycle method a class implements and the parameter names its
/// signature declares, in order.
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub stage: Stage,
    pub params: Arc<[String]>,
}

type Constructor = Box<dyn Fn(&RequestCtx, &Map<String, Value>) -> Box<dyn RouteHandler> + Send + Sync>;

/// Static description of an annotated route-handler class.
pub struct RouteClass {
    id: String,
    constructor: Constructor,
    stages: Vec<StageSpec>,
}

impl RouteClass {
    /// Creates a class with its source identity and constructor. The
    /// constructor receives the request context and the externally
    /// configured parameter map, once per request.
    pub fn new<F>(id: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&RequestCtx, &Map<String, Value>) -> Box<dyn RouteHandler> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            constructor: Box::new(constructor),
            stages: Vec::new(),
        }
    }

    /// Declares that the handler implements `stage` with the given
    /// parameter names. Declaration order is preserved.
    pub fn stage(mut self, stage: Stage, params: &[&str]) -> Self {
        self.stages.push(StageSpec {
            stage,
            params: params.iter().map(|p| (*p).to_owned()).collect(),
        });
        self
    }

    /// Unique identity of the class, the analog of its source file path.
    /// Per-request instances are keyed by it.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn implements(&self, stage: Stage) -> bool {
        self.stages.iter().any(|s| s.stage == stage)
    }

    pub(crate) fn construct(
        &self,
        ctx: &RequestCtx,
        parameters: &Map<String, Value>,
    ) -> Box<dyn RouteHandler> {
        (self.constructor)(ctx, parameters)
    }
}

impl fmt::Debug for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteClass")
            .field("id", &self.id)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}
