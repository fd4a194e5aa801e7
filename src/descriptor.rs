//! Route descriptors: the resolved binding between a verb+path and the
//! class that implements it.
//!
//! A class carries one or more routing declarations
//! (`@Route("GET /page")`) plus auxiliary annotations. Building splits
//! the two: each routing declaration becomes its own [`RouteDescriptor`],
//! and all descriptors of a class share the same auxiliary-declaration
//! list and class reference, so `GET /x` and `POST /x` on one class are
//! handled by the same code and the same per-request instance.

use std::sync::Arc;

use http::Method;
use serde_json::{Map, Value};

use crate::{
    annotation::AnnotationDecl, class::RouteClass, error::Error, source::ClassDeclaration,
};

/// Kind name of the routing declaration.
pub const ROUTE_KIND: &str = "Route";

/// One declared `(HTTP verb, path)` pair and everything bound with it.
/// Built once at startup; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub class: Arc<RouteClass>,
    pub method: Method,
    pub path: String,
    /// Extra options on the routing declaration itself; seeded into the
    /// parameter store at `initialize`.
    pub options: Map<String, Value>,
    /// Auxiliary declarations, shared across all descriptors of a class.
    pub annotations: Arc<Vec<AnnotationDecl>>,
}

/// Splits a class's declarations into routing and auxiliary ones and
/// produces one descriptor per routing declaration.
///
/// Malformed routing declarations are discovery errors: binding must not
/// partially register a broken file. A class without any routing
/// declaration yields no descriptors.
pub fn build_descriptors(declaration: &ClassDeclaration) -> Result<Vec<RouteDescriptor>, Error> {
    let class = &declaration.class;
    let (routes, auxiliary): (Vec<_>, Vec<_>) = declaration
        .declarations
        .iter()
        .partition(|decl| decl.kind() == ROUTE_KIND);
    let annotations = Arc::new(auxiliary.into_iter().cloned().collect::<Vec<_>>());

    let mut descriptors = Vec::with_capacity(routes.len());
    for route in routes {
        let spec = route.primary().ok_or_else(|| {
            Error::Discovery(format!(
                "route declaration on class {:?} has no verb and path",
                class.id()
            ))
        })?;
        let (verb, path) = spec.split_once(' ').ok_or_else(|| {
            Error::Discovery(format!(
                "route declaration {spec:?} on class {:?} is not of the form \"VERB /path\"",
                class.id()
            ))
        })?;
        let method = Method::from_bytes(verb.as_bytes()).map_err(|_| {
            Error::Discovery(format!(
                "invalid HTTP method {verb:?} on class {:?}",
                class.id()
            ))
        })?;
        let path = path.trim();
        if !path.starts_with('/') {
            return Err(Error::Discovery(format!(
                "route path {path:?} on class {:?} must start with a slash",
                class.id()
            )));
        }
        descriptors.push(RouteDescriptor {
            class: Arc::clone(class),
            method,
            path: path.to_owned(),
            options: route.options().clone(),
            annotations: Arc::clone(&annotations),
        });
    }

    if descriptors.is_empty() {
        tracing::warn!(class = class.id(), "route class declares no routes");
    }
    Ok(descriptors)
}
