//! The `Post` annotation: typed extraction from the parsed request body.
//!
//! Two modes. Field mode (`@Post("num", type="int", alias="number")`)
//! reads one body field and coerces it like Query does. Whole-body mode
//! (no field named) stores the entire parsed body unmodified and
//! requires an `alias` to name it.

use serde_json::Value;

use crate::{
    annotation::{AnnotationDecl, MetadataHandler, StageCallbacks},
    class::{RouteClass, StageOutput},
    coerce,
    error::Error,
    handlers::required_type,
    pipeline::sync_callback,
    stage::Stage,
};

pub struct Post;

impl MetadataHandler for Post {
    fn kind(&self) -> &'static str {
        "Post"
    }

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        _class: &RouteClass,
    ) -> Result<StageCallbacks, Error> {
        let callback = match decl.primary() {
            Some(field) => {
                let field = field.to_owned();
                let ty = required_type(decl, "Post")?;
                let default = decl.default_value();
                let name = decl.param_name(&field);
                sync_callback(move |ctx| {
                    let raw = ctx
                        .body()
                        .and_then(|body| body.get(&field))
                        .and_then(coerce::stringify);
                    let value = coerce::validate(raw.as_deref(), ty, &default);
                    ctx.set_parameter(name.clone(), value);
                    Ok(StageOutput::Empty)
                })
            }
            None => {
                let name = decl.option_str("alias").map(str::to_owned).ok_or_else(|| {
                    Error::Configuration(
                        "the Post annotation must have an alias option when bound to the full body"
                            .into(),
                    )
                })?;
                sync_callback(move |ctx| {
                    let value = ctx.body().cloned().unwrap_or(Value::Null);
                    ctx.set_parameter(name.clone(), value);
                    Ok(StageOutput::Empty)
                })
            }
        };

        Ok(vec![(Stage::Initialize, callback)])
    }
}
