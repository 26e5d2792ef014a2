//! Author record.

use serde::{Deserialize, Serialize};

/// Stable, ordered author identifier assigned by the writer side.
pub type AuthorId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub surname: String,
}

impl Author {
    pub fn new(id: AuthorId, name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
        }
    }

    /// Returns `"name surname"`, skipping blank parts.
    pub fn display_name(&self) -> String {
        [self.name.trim(), self.surname.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
