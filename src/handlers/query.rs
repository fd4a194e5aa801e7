//! The `Query` annotation: typed extraction of one query-string field.
//!
//! `@Query("page", type="int", default=1)` reads the `page` query field
//! at `initialize`, casts it to a number, and stores the result (or the
//! default on absence/mismatch) under `page`, or under `alias` when one
//! is given, for later stages to consume by name.

use crate::{
    annotation::{AnnotationDecl, MetadataHandler, StageCallbacks},
    class::{RouteClass, StageOutput},
    coerce::ParamType,
    error::Error,
    handlers::{required_field, required_type},
    pipeline::sync_callback,
    stage::Stage,
};

pub struct Query;

impl MetadataHandler for Query {
    fn kind(&self) -> &'static str {
        "Query"
    }

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        _class: &RouteClass,
    ) -> Result<StageCallbacks, Error> {
        let field = required_field(decl, "Query")?;
        let ty = required_type(decl, "Query")?;
        // Use the path type for strings. Strings are confusing when not
        // used in paths, as they cannot contain slashes.
        let ty = if ty == ParamType::Str { ParamType::Path } else { ty };
        let default = decl.default_value();
        let name = decl.param_name(&field);

        Ok(vec![(
            Stage::Initialize,
            sync_callback(move |ctx| {
                let value = ctx.query_value(&field, ty, &default);
                ctx.set_parameter(name.clone(), value);
                Ok(StageOutput::Empty)
            }),
        )])
    }
}
