use serde::{Deserialize, Serialize};

/// A catalog image as served by `GET /api/product-images`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub path: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl ProductImage {
    /// Exact, case-sensitive category match. Uncategorised images never match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}
