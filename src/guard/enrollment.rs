// Enrollment rules: one per (course, user), sane dates, bounded progress.

use async_trait::async_trait;

use super::hooks::{WriteContext, WriteHook, WriteOperation};
use crate::entities::{Document, Enrollment};
use crate::error::{DomainError, DomainResult};
use crate::storage::{EntityStore, Filter};

/// Validates a pending enrollment write. Checks run in a fixed order and
/// the first failure wins.
pub struct EnrollmentValidator;

impl EnrollmentValidator {
    pub async fn validate(
        candidate: &Enrollment,
        operation: WriteOperation,
        store: &dyn EntityStore,
    ) -> DomainResult<()> {
        // Fast-path duplicate rejection; the store's unique index remains
        // the source of truth under concurrency.
        if operation == WriteOperation::Create {
            let existing = store
                .find_one(Filter::EnrollmentPair {
                    course_id: candidate.course_id,
                    user_id: candidate.user_id,
                })
                .await
                .map_err(super::storage_unavailable)?;
            if existing.is_some() {
                return Err(DomainError::DuplicateEnrollment {
                    course_id: candidate.course_id,
                    user_id: candidate.user_id,
                });
            }
        }

        if let Some(completed_at) = candidate.completed_at {
            if completed_at < candidate.enrolled_at {
                return Err(DomainError::InvalidCompletionOrder);
            }
        }

        if !(0.0..=100.0).contains(&candidate.progress) {
            return Err(DomainError::ProgressOutOfRange(candidate.progress));
        }

        Ok(())
    }
}

#[async_trait]
impl WriteHook for EnrollmentValidator {
    fn name(&self) -> &'static str {
        "enrollment_validator"
    }

    async fn run(
        &self,
        doc: &mut Document,
        ctx: &WriteContext,
        store: &dyn EntityStore,
    ) -> DomainResult<()> {
        if let Document::Enrollment(enrollment) = doc {
            Self::validate(enrollment, ctx.operation, store).await?;
        }
        Ok(())
    }
}
