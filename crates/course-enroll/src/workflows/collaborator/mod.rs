//! Reference implementation of the course API (`/courses`, `/categories`,
//! `/applications`) backed by in-memory stores, for local runs and integration tests.

pub mod repository;
pub mod router;


pub use repository::{ApplicationRepository, InMemoryApplicationRepository, RepositoryError};
pub use router::{collaborator_router, CollaboratorState};
