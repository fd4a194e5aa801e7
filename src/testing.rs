//! Test double for the staged pipeline.
//!
//! [`TestPipeline`] records registrations exactly as a real pipeline
//! would accept them and can drive one request context through the
//! declared stage order: the non-error stages in sequence, switching to
//! the `error`/`aftererror` stages as soon as a callback fails. Paths
//! are matched by string equality; routing-pattern matching belongs to
//! the real pipeline, not to this harness.
//!
//! ```rust,ignore
//! let mut pipeline = TestPipeline::default();
//! remora::bind(&mut pipeline, &source, &registry, &Options::default())?;
//! let mut ctx = RequestCtx::new(Method::GET, "/page").with_query("page", "123");
//! let outcome = pipeline.run(&mut ctx).await;
//! assert!(outcome.error.is_none());
//! ```

use crate::{
    class::StageOutput,
    context::RequestCtx,
    error::Error,
    pipeline::{Pipeline, StageCallback},
    stage::Stage,
};

struct Registration {
    stage: Stage,
    path: String,
    callback: StageCallback,
}

/// Result of driving one request to completion.
#[derive(Debug)]
pub struct RunOutcome {
    /// The last non-empty stage output, the analog of the rendered
    /// response body.
    pub output: StageOutput,
    /// The first callback failure, if any. Error stages have already run
    /// when this is set.
    pub error: Option<Error>,
}

#[derive(Default)]
pub struct TestPipeline {
    registrations: Vec<Registration>,
}

impl Pipeline for TestPipeline {
    fn register(&mut self, stage: Stage, path: &str, callback: StageCallback) {
        self.registrations.push(Registration {
            stage,
            path: path.to_owned(),
            callback,
        });
    }
}

impl TestPipeline {
    /// How many callbacks are registered for a `(stage, path)` pair.
    pub fn registered(&self, stage: Stage, path: &str) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.stage == stage && r.path == path)
            .count()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Runs the callbacks of a single stage for the context's path, in
    /// registration order. Returns the last non-empty output.
    pub async fn run_stage(
        &self,
        stage: Stage,
        ctx: &mut RequestCtx,
    ) -> Result<StageOutput, Error> {
        let path = ctx.path().to_owned();
        let mut output = StageOutput::Empty;
        for registration in self
            .registrations
            .iter()
            .filter(|r| r.stage == stage && r.path == path)
        {
            match (registration.callback)(ctx).await? {
                StageOutput::Empty => {}
                produced => output = produced,
            }
        }
        Ok(output)
    }

    /// Drives a request through the full stage sequence. On the first
    /// failure the error stages run with the same context (and thus the
    /// same per-request instances); the original error is what the
    /// outcome reports, and a secondary failure inside an error stage is
    /// swallowed by the harness.
    pub async fn run(&self, ctx: &mut RequestCtx) -> RunOutcome {
        let mut output = StageOutput::Empty;
        for stage in Stage::ALL {
            if stage.is_error_stage() {
                continue;
            }
            match self.run_stage(stage, ctx).await {
                Ok(StageOutput::Empty) => {}
                Ok(produced) => output = produced,
                Err(error) => {
                    let error_output = self.run_error_stages(ctx).await;
                    return RunOutcome {
                        output: error_output,
                        error: Some(error),
                    };
                }
            }
        }
        RunOutcome {
            output,
            error: None,
        }
    }

    async fn run_error_stages(&self, ctx: &mut RequestCtx) -> StageOutput {
        let mut output = StageOutput::Empty;
        for stage in [Stage::Error, Stage::AfterError] {
            match self.run_stage(stage, ctx).await {
                Ok(StageOutput::Empty) | Err(_) => {}
                Ok(produced) => output = produced,
            }
        }
        output
    }
}
