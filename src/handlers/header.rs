//! The `Header` annotation: raw extraction of one request header.
//!
//! Headers are passed through without type coercion; an absent header
//! resolves to the declared default (`Null` when unspecified).

use serde_json::Value;

use crate::{
    annotation::{AnnotationDecl, MetadataHandler, StageCallbacks},
    class::{RouteClass, StageOutput},
    error::Error,
    handlers::required_field,
    pipeline::sync_callback,
    stage::Stage,
};

pub struct Header;

impl MetadataHandler for Header {
    fn kind(&self) -> &'static str {
        "Header"
    }

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        _class: &RouteClass,
    ) -> Result<StageCallbacks, Error> {
        let field = required_field(decl, "Header")?;
        let default = decl.default_value();
        let name = decl.param_name(&field);

        Ok(vec![(
            Stage::Initialize,
            sync_callback(move |ctx| {
                let value = ctx
                    .header_value(&field)
                    .map(|v| Value::String(v.to_owned()))
                    .unwrap_or_else(|| default.clone());
                ctx.set_parameter(name.clone(), value);
                Ok(StageOutput::Empty)
            }),
        )])
    }
}
