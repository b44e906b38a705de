// In-memory reference store used by tests and demos.
// Index checks and the commit happen under one write lock, so duplicate
// commits lose atomically the way a production store's unique index would.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{EntityStore, Filter, StoreError, StoreResult, UniqueIndex};
use crate::entities::{Document, EntityKind};

#[derive(Default)]
struct Tables {
    documents: HashMap<(EntityKind, i64), Document>,
    // Unique secondary indexes, value = owning document id
    enrollment_pairs: HashMap<(i64, i64), i64>,
    follow_edges: HashMap<(i64, i64), i64>,
    news_slugs: HashMap<String, i64>,
}

/// A `HashMap`-backed document store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get(&self, kind: EntityKind, id: i64) -> StoreResult<Option<Document>> {
        let tables = self.tables.read().await;
        Ok(tables.documents.get(&(kind, id)).cloned())
    }

    async fn find_one(&self, filter: Filter) -> StoreResult<Option<Document>> {
        let tables = self.tables.read().await;
        let hit = match filter {
            Filter::EnrollmentPair { course_id, user_id } => tables
                .enrollment_pairs
                .get(&(course_id, user_id))
                .map(|id| (EntityKind::Enrollment, *id)),
            Filter::FollowEdge {
                follower_id,
                following_id,
            } => tables
                .follow_edges
                .get(&(follower_id, following_id))
                .map(|id| (EntityKind::Follow, *id)),
            Filter::NewsSlug(slug) => tables
                .news_slugs
                .get(&slug)
                .map(|id| (EntityKind::News, *id)),
        };
        Ok(hit.and_then(|key| tables.documents.get(&key).cloned()))
    }

    async fn upsert(&self, doc: Document) -> StoreResult<Document> {
        let mut tables = self.tables.write().await;
        let key = (doc.kind(), doc.id());

        // Check the relevant unique index before touching anything.
        match &doc {
            Document::Enrollment(e) => {
                if let Some(&owner) = tables.enrollment_pairs.get(&(e.course_id, e.user_id)) {
                    if owner != e.id {
                        return Err(StoreError::UniqueViolation(UniqueIndex::EnrollmentPair));
                    }
                }
            }
            Document::Follow(f) => {
                if let Some(&owner) = tables.follow_edges.get(&(f.follower_id, f.following_id)) {
                    if owner != f.id {
                        return Err(StoreError::UniqueViolation(UniqueIndex::FollowEdge));
                    }
                }
            }
            Document::News(n) => {
                if let Some(&owner) = tables.news_slugs.get(&n.slug) {
                    if owner != n.id {
                        return Err(StoreError::UniqueViolation(UniqueIndex::NewsSlug));
                    }
                }
            }
            Document::Comment(_) | Document::Course(_) => {}
        }

        // Drop index entries owned by a previous version of this document.
        if let Some(previous) = tables.documents.get(&key).cloned() {
            match previous {
                Document::Enrollment(e) => {
                    tables.enrollment_pairs.remove(&(e.course_id, e.user_id));
                }
                Document::Follow(f) => {
                    tables.follow_edges.remove(&(f.follower_id, f.following_id));
                }
                Document::News(n) => {
                    tables.news_slugs.remove(&n.slug);
                }
                _ => {}
            }
        }

        match &doc {
            Document::Enrollment(e) => {
                tables.enrollment_pairs.insert((e.course_id, e.user_id), e.id);
            }
            Document::Follow(f) => {
                tables.follow_edges.insert((f.follower_id, f.following_id), f.id);
            }
            Document::News(n) => {
                tables.news_slugs.insert(n.slug.clone(), n.id);
            }
            _ => {}
        }

        tables.documents.insert(key, doc.clone());
        Ok(doc)
    }
}
