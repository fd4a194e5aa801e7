use std::fmt;

/// One phase in the fixed sequence a staged pipeline runs for a matched
/// route. The declaration order below is the invocation contract; a route
/// class may implement any subset of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Initialize,
    Authentication,
    Authorisation,
    Prevalidation,
    Preprocess,
    Postvalidation,
    Process,
    Postprocess,
    After,
    Error,
    AfterError,
}

impl Stage {
    /// Every stage, in invocation order.
    pub const ALL: [Stage; 11] = [
        Stage::Initialize,
        Stage::Authentication,
        Stage::Authorisation,
        Stage::Prevalidation,
        Stage::Preprocess,
        Stage::Postvalidation,
        Stage::Process,
        Stage::Postprocess,
        Stage::After,
        Stage::Error,
        Stage::AfterError,
    ];

    /// Wire name of the stage, as it appears in route-class metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Initialize => "initialize",
            Stage::Authentication => "authentication",
            Stage::Authorisation => "authorisation",
            Stage::Prevalidation => "prevalidation",
            Stage::Preprocess => "preprocess",
            Stage::Postvalidation => "postvalidation",
            Stage::Process => "process",
            Stage::Postprocess => "postprocess",
            Stage::After => "after",
            Stage::Error => "error",
            Stage::AfterError => "aftererror",
        }
    }

    /// Resolves a wire name back to a stage. Unrecognized names are not
    /// stages and yield `None`.
    pub fn from_name(name: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Whether this stage only runs once the pipeline has switched to its
    /// failure path.
    pub fn is_error_stage(&self) -> bool {
        matches!(self, Stage::Error | Stage::AfterError)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
