//! Book record.
//!
//! # Invariants
//! - `title` is non-empty and free of NUL characters.
//! - `price_cents` and `quantity_published` are non-negative.
//! - `author_id` references an existing author (checked by the repository).

use super::author::AuthorId;
use super::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type BookId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Calendar date, persisted as `YYYY-MM-DD`.
    pub publish_date: NaiveDate,
    /// Price in minor currency units.
    pub price_cents: i64,
    pub quantity_published: i64,
    pub author_id: AuthorId,
}

impl Book {
    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.is_empty() {
            return Err(ModelValidationError::EmptyTitle(self.id));
        }
        if self.title.contains('\0') {
            return Err(ModelValidationError::NulInTitle(self.id));
        }
        if self.price_cents < 0 {
            return Err(ModelValidationError::NegativePrice(self.id));
        }
        if self.quantity_published < 0 {
            return Err(ModelValidationError::NegativeQuantity(self.id));
        }
        Ok(())
    }

    /// Title length in characters, the unit SQLite `length()` uses for text.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }

    /// Total value of the print run: price times quantity published.
    ///
    /// Widened to `i128` so no pair of valid `i64` inputs can overflow.
    pub fn published_cost(&self) -> i128 {
        i128::from(self.price_cents) * i128::from(self.quantity_published)
    }
}
