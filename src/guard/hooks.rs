// Write hook contract - the unit a pipeline is built from

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::DomainResult;
use crate::storage::EntityStore;
use crate::entities::Document;

/// Whether the pending write creates a new document or replaces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Create,
    Update,
}

/// Per-write context handed to every hook in the pipeline.
///
/// `changed` is the caller's declaration of which fields differ from the
/// stored version; on create, every populated field counts as changed.
#[derive(Debug, Clone)]
pub struct WriteContext {
    pub operation: WriteOperation,
    changed: HashSet<String>,
}

impl WriteContext {
    pub fn create() -> Self {
        Self {
            operation: WriteOperation::Create,
            changed: HashSet::new(),
        }
    }

    pub fn update() -> Self {
        Self {
            operation: WriteOperation::Update,
            changed: HashSet::new(),
        }
    }

    /// Mark a field as modified by this write.
    pub fn with_changed(mut self, field: &str) -> Self {
        self.changed.insert(field.to_string());
        self
    }

    /// True if the caller marked `field` as modified. On create every
    /// field is considered modified.
    pub fn modified(&self, field: &str) -> bool {
        self.operation == WriteOperation::Create || self.changed.contains(field)
    }
}

/// One step of a write pipeline.
///
/// Validators decide and must leave `doc` untouched; derivation hooks may
/// rewrite derived fields in place. A returned error aborts the write
/// before the store is involved.
#[async_trait]
pub trait WriteHook: Send + Sync {
    /// Hook name for log lines.
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        doc: &mut Document,
        ctx: &WriteContext,
        store: &dyn EntityStore,
    ) -> DomainResult<()>;
}
