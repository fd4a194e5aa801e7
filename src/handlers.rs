//! Built-in metadata annotation kinds.
//!
//! Each submodule owns exactly one kind and its rule for turning a
//! declaration into lifecycle callbacks. Third-party kinds implement
//! [`crate::annotation::MetadataHandler`] the same way and register on
//! the [`crate::annotation::HandlerRegistry`].

use crate::{annotation::AnnotationDecl, coerce::ParamType, error::Error};

/// Response content-type tagging.
pub mod content_type;

/// Typed cookie-field extraction.
pub mod cookie;

/// Raw header extraction.
pub mod header;

/// Typed body-field and whole-body extraction.
pub mod post;

/// Typed query-field extraction.
pub mod query;

/// Resolves the mandatory `type` option of a declaration.
pub(crate) fn required_type(decl: &AnnotationDecl, kind: &str) -> Result<ParamType, Error> {
    let name = decl.option_str("type").ok_or_else(|| {
        Error::Configuration(format!("the {kind} annotation must have a type option"))
    })?;
    ParamType::parse(name).ok_or_else(|| {
        Error::Configuration(format!("unknown type {name:?} on {kind} annotation"))
    })
}

/// Resolves the mandatory primary value (the annotated field name).
pub(crate) fn required_field(decl: &AnnotationDecl, kind: &str) -> Result<String, Error> {
    decl.primary()
        .map(str::to_owned)
        .ok_or_else(|| Error::Configuration(format!("the {kind} annotation must name a field")))
}
