//! The `Cookie` annotation: typed extraction of one cookie value.

use crate::{
    annotation::{AnnotationDecl, MetadataHandler, StageCallbacks},
    class::{RouteClass, StageOutput},
    coerce::ParamType,
    error::Error,
    handlers::{required_field, required_type},
    pipeline::sync_callback,
    stage::Stage,
};

pub struct Cookie;

impl MetadataHandler for Cookie {
    fn kind(&self) -> &'static str {
        "Cookie"
    }

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        _class: &RouteClass,
    ) -> Result<StageCallbacks, Error> {
        let field = required_field(decl, "Cookie")?;
        let ty = required_type(decl, "Cookie")?;
        // Same string-to-path translation as Query; cookie values may
        // contain anything.
        let ty = if ty == ParamType::Str { ParamType::Path } else { ty };
        let default = decl.default_value();
        let name = decl.param_name(&field);

        Ok(vec![(
            Stage::Initialize,
            sync_callback(move |ctx| {
                let value = ctx.cookie_value(&field, ty, &default);
                ctx.set_parameter(name.clone(), value);
                Ok(StageOutput::Empty)
            }),
        )])
    }
}
