//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,

    /// Accent color for navigation, as CSS.
    pub color: Option<String>,

    /// Parent category. Set on subcategories only.
    pub parent: Option<CategoryUuid>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CategoryRecord {
    /// Whether this is a top-level category.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A top-level category with its subcategories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTree {
    pub category: CategoryRecord,
    pub subcategories: Vec<CategoryRecord>,
}
