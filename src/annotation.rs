//! Annotation declarations and the pluggable handler registry.
//!
//! Every piece of metadata attached to a route class arrives as an
//! [`AnnotationDecl`]: a kind, an optional primary value (the
//! annotation's first positional argument, usually a field name) and the
//! remaining named options. The parser boundary has already stripped its
//! own bookkeeping keys, so `options` only carries what the author wrote.
//!
//! Kinds are open-ended. A [`MetadataHandler`] owns the rule for turning
//! one declaration of its kind into lifecycle callbacks, and the
//! [`HandlerRegistry`] maps kind names to handlers. The registry accepts
//! registrations up to the moment binding runs and is treated as closed
//! afterwards.
//!
//! # Examples
//!
//! ```rust
//! use remora::annotation::{AnnotationDecl, HandlerRegistry};
//!
//! let decl = AnnotationDecl::with_primary("Query", "page")
//!     .option("type", "int")
//!     .option("default", 1);
//! assert_eq!(decl.kind(), "Query");
//! assert_eq!(decl.primary(), Some("page"));
//!
//! let registry = HandlerRegistry::new();
//! assert!(registry.get("Query").is_some());
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use serde_json::{Map, Value};

use crate::{
    class::RouteClass,
    error::Error,
    handlers,
    pipeline::StageCallback,
    stage::Stage,
};

/// One parsed metadata declaration, immutable once parsed.
#[derive(Debug, Clone)]
pub struct AnnotationDecl {
    kind: String,
    primary: Option<String>,
    options: Map<String, Value>,
}

impl AnnotationDecl {
    /// A declaration without a primary value, e.g. a whole-body `Post`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            primary: None,
            options: Map::new(),
        }
    }

    /// A declaration whose first positional argument is `primary`.
    pub fn with_primary(kind: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            primary: Some(primary.into()),
            options: Map::new(),
        }
    }

    /// Adds a named option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn option_value(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// The declared default, `Null` when unspecified.
    pub fn default_value(&self) -> Value {
        self.options
            .get("default")
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// The parameter name a value is stored under: the `alias` option
    /// when present, otherwise `fallback` (usually the field name).
    pub fn param_name(&self, fallback: &str) -> String {
        self.option_str("alias")
            .map(str::to_owned)
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Callbacks an annotation contributes, keyed by stage.
pub type StageCallbacks = Vec<(Stage, StageCallback)>;

/// Owner of one annotation kind.
///
/// Given a declaration of its kind and the route class it is attached
/// to, a handler produces the lifecycle callbacks that realize the
/// declaration. Required-option validation happens here, at bind time;
/// a declaration that fails it never gets registered.
pub trait MetadataHandler: Send + Sync {
    fn kind(&self) -> &'static str;

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        class: &RouteClass,
    ) -> Result<StageCallbacks, Error>;
}

/// Kind-name to handler mapping, populated at startup.
///
/// Registration takes `&self` so plugins can add their own kinds while
/// the binder is parked on its deferral tick.
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<&'static str, Arc<dyn MetadataHandler>>>,
}

impl HandlerRegistry {
    /// A registry preloaded with the built-in kinds: `Query`, `Header`,
    /// `Cookie`, `Post` and `ContentType`.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(handlers::query::Query);
        registry.register(handlers::header::Header);
        registry.register(handlers::cookie::Cookie);
        registry.register(handlers::post::Post);
        registry.register(handlers::content_type::ContentType);
        registry
    }

    pub fn empty() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for its kind, replacing any previous handler
    /// of the same kind.
    pub fn register<H: MetadataHandler + 'static>(&self, handler: H) {
        self.register_arc(Arc::new(handler));
    }

    pub fn register_arc(&self, handler: Arc<dyn MetadataHandler>) {
        self.handlers
            .write()
            .expect("handler registry poisoned")
            .insert(handler.kind(), handler);
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn MetadataHandler>> {
        self.handlers
            .read()
            .expect("handler registry poisoned")
            .get(kind)
            .cloned()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self
            .handlers
            .read()
            .expect("handler registry poisoned")
            .keys()
            .copied()
            .collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
