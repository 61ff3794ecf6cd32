//! Item categories

use serde::{Deserialize, Serialize};

use super::NamedEntity;

/// A category items are grouped under.
///
/// Equality is structural over all fields; the ingestion pipeline rejects a
/// category record that is equal to one already loaded. Hashable so it can
/// key the per-category grouping report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl NamedEntity for Category {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Category::new(1, "Food", "Edible goods");
        let b = Category::new(1, "Food", "Edible goods");
        let c = Category::new(1, "Food", "Different description");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
