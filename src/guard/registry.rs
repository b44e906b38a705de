// Entity registry - maps each governed kind to its write pipeline

use std::collections::HashMap;
use std::sync::Arc;

use super::comment_thread::CommentThreadValidator;
use super::enrollment::EnrollmentValidator;
use super::follow::FollowGuard;
use super::hooks::WriteHook;
use super::news_derivation::NewsDerivation;
use super::rating::RatingAggregator;
use crate::entities::EntityKind;

/// Kind -> ordered hook pipeline. Built once at process start and
/// read-only afterwards; `apply` calls share it freely.
#[derive(Default)]
pub struct EntityRegistry {
    pipelines: HashMap<EntityKind, Vec<Arc<dyn WriteHook>>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard pipeline for every governed kind.
    ///
    /// Pipeline order is fixed: validators run before any derivation, and
    /// each kind currently carries exactly one hook.
    pub fn with_default_pipelines() -> Self {
        let mut registry = Self::new();
        registry.register(EntityKind::Comment, Arc::new(CommentThreadValidator));
        registry.register(EntityKind::Enrollment, Arc::new(EnrollmentValidator));
        registry.register(EntityKind::Follow, Arc::new(FollowGuard));
        registry.register(EntityKind::Course, Arc::new(RatingAggregator));
        registry.register(EntityKind::News, Arc::new(NewsDerivation));
        registry
    }

    /// Append a hook to a kind's pipeline.
    pub fn register(&mut self, kind: EntityKind, hook: Arc<dyn WriteHook>) {
        self.pipelines.entry(kind).or_default().push(hook);
    }

    pub fn pipeline(&self, kind: EntityKind) -> Option<&[Arc<dyn WriteHook>]> {
        self.pipelines.get(&kind).map(Vec::as_slice)
    }
}
