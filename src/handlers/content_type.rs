//! The `ContentType` annotation: response mime-type tagging.
//!
//! For every stage the class implements among `process` and `error`, the
//! response the class produces at that stage is tagged with the declared
//! mime type. The tag lives on the request context, so it applies
//! whenever the pipeline renders that stage's output, regardless of
//! callback order within the stage.

use mime::Mime;

use crate::{
    annotation::{AnnotationDecl, MetadataHandler, StageCallbacks},
    class::{RouteClass, StageOutput},
    error::Error,
    pipeline::sync_callback,
    stage::Stage,
};

pub struct ContentType;

impl MetadataHandler for ContentType {
    fn kind(&self) -> &'static str {
        "ContentType"
    }

    fn callbacks(
        &self,
        decl: &AnnotationDecl,
        class: &RouteClass,
    ) -> Result<StageCallbacks, Error> {
        let raw = decl.primary().ok_or_else(|| {
            Error::Configuration("the ContentType annotation must name a mime type".into())
        })?;
        let mime: Mime = raw.parse().map_err(|_| {
            Error::Configuration(format!("invalid mime type {raw:?} on ContentType annotation"))
        })?;

        let mut callbacks = StageCallbacks::new();
        for stage in [Stage::Process, Stage::Error] {
            if class.implements(stage) {
                let mime = mime.clone();
                callbacks.push((
                    stage,
                    sync_callback(move |ctx| {
                        ctx.set_content_type(mime.clone());
                        Ok(StageOutput::Empty)
                    }),
                ));
            }
        }
        Ok(callbacks)
    }
}
