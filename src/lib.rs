// writeguard - write-time invariant enforcement for content-platform
// entities. Sits between application code and the document store: every
// create/update of a governed entity runs its validator/derivation
// pipeline before the store sees it.

// Governed entity types
pub mod entities;

// Validators, derivations, registry, and the write interceptor
pub mod guard;

// Storage collaborator seam and the in-memory reference store
pub mod storage;

// Common error types
pub mod error;

// Re-exports for convenience
pub use error::{DomainError, DomainResult};
pub use guard::{EntityRegistry, WriteContext, WriteInterceptor, WriteOperation};
