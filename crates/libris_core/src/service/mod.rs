//! Library query services.
//!
//! # Responsibility
//! - Turn the fixed business questions about authors and books into
//!   repository queries.
//! - Stay storage-agnostic: services are generic over `LibraryRepository`.
//!
//! # Invariants
//! - Every call reads fresh data; nothing is cached between calls.
//! - Repository errors are propagated unchanged.

pub mod author_service;
pub mod book_service;
