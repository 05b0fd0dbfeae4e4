//! Per-session borrowing assessments.
//!
//! A session holds exactly one submitted profile and the result derived from it. Each new
//! submission replaces both; sessions never see each other's state.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{Assessment, RepositoryError, SessionId, SessionRecord, SessionRepository};
pub use router::borrowing_router;
pub use service::{BorrowingService, BorrowingServiceError};
