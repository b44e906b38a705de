// Governed entity types - the documents the write guard sits in front of

pub mod comment;
pub mod course;
pub mod enrollment;
pub mod follow;
pub mod news;

pub use comment::{Comment, ResourceKind};
pub use course::{Course, Rating};
pub use enrollment::Enrollment;
pub use follow::Follow;
pub use news::News;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant for the governed entity kinds. Registry key and log label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Comment,
    Enrollment,
    Course,
    Follow,
    News,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Comment => "comment",
            EntityKind::Enrollment => "enrollment",
            EntityKind::Course => "course",
            EntityKind::Follow => "follow",
            EntityKind::News => "news",
        };
        write!(f, "{}", name)
    }
}

/// A governed entity in transit through the write path.
///
/// The interceptor and store move `Document`s; each hook matches on the
/// variant it governs and leaves the rest alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Document {
    Comment(Comment),
    Enrollment(Enrollment),
    Course(Course),
    Follow(Follow),
    News(News),
}

impl Document {
    pub fn kind(&self) -> EntityKind {
        match self {
            Document::Comment(_) => EntityKind::Comment,
            Document::Enrollment(_) => EntityKind::Enrollment,
            Document::Course(_) => EntityKind::Course,
            Document::Follow(_) => EntityKind::Follow,
            Document::News(_) => EntityKind::News,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Document::Comment(c) => c.id,
            Document::Enrollment(e) => e.id,
            Document::Course(c) => c.id,
            Document::Follow(f) => f.id,
            Document::News(n) => n.id,
        }
    }
}
