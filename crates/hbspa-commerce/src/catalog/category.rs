//! Category records.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

impl Category {
    /// Create a category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
