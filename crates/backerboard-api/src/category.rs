use serde::{Deserialize, Serialize};

/// A discovery category. Subcategories carry their parent's id so pager
/// styling can group them under the root category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub parent_id: Option<u64>,
}

impl Category {
    pub fn root(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn child(id: u64, name: impl Into<String>, parent_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }

    /// The id styling groups by: the parent's for a subcategory, else our own.
    pub fn root_id(&self) -> u64 {
        self.parent_id.unwrap_or(self.id)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_id() {
        let art = Category::root(1, "Art");
        assert_eq!(art.root_id(), 1);
        assert!(art.is_root());

        let documentary = Category::child(53, "Documentary", 30);
        assert_eq!(documentary.root_id(), 30);
        assert!(!documentary.is_root());
    }
}
