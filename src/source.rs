//! The route-class discovery boundary.
//!
//! File-system scanning and annotation parsing are external
//! collaborators; what binding needs from them is a list of classes with
//! their parsed declarations, filtered by the configured pattern.
//! [`StaticSource`] is the built-in source: classes registered in memory
//! at startup, with identities matched against the pattern the way a
//! file scanner would match paths.

use std::sync::Arc;

use crate::{annotation::AnnotationDecl, class::RouteClass, error::Error};

/// One discovered class together with everything parsed off of it.
#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    pub class: Arc<RouteClass>,
    pub declarations: Vec<AnnotationDecl>,
}

/// Produces class declarations matching a pattern. A load failure is a
/// discovery error and aborts startup binding.
pub trait ClassSource: Send + Sync {
    fn load(&self, pattern: &str) -> Result<Vec<ClassDeclaration>, Error>;
}

/// In-memory class registry.
#[derive(Default)]
pub struct StaticSource {
    entries: Vec<ClassDeclaration>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class with its declarations, builder-style.
    pub fn declare(mut self, class: RouteClass, declarations: Vec<AnnotationDecl>) -> Self {
        self.add(Arc::new(class), declarations);
        self
    }

    pub fn add(&mut self, class: Arc<RouteClass>, declarations: Vec<AnnotationDecl>) {
        self.entries.push(ClassDeclaration {
            class,
            declarations,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClassSource for StaticSource {
    fn load(&self, pattern: &str) -> Result<Vec<ClassDeclaration>, Error> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| Error::Discovery(format!("invalid file pattern {pattern:?}: {e}")))?;
        Ok(self
            .entries
            .iter()
            .filter(|entry| pattern.matches(entry.class.id()))
            .cloned()
            .collect())
    }
}
