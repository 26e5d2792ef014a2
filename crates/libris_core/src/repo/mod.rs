//! Repository layer abstractions and storage backends.
//!
//! # Responsibility
//! - Define the read-only query contract the services depend on.
//! - Isolate SQLite details from query orchestration.
//!
//! # Invariants
//! - Both backends return the same results for the same dataset.
//! - Storage failures surface as `RepoError::StorageUnavailable`; an empty
//!   result is never an error.

pub mod library_repo;
pub mod memory_repo;
