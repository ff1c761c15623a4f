use serde::{Deserialize, Serialize};

use crate::model::Category;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_category(category: Category) -> Self {
        Self {
            category: Some(category),
        }
    }

    pub fn matches(&self, product: &crate::model::Product) -> bool {
        match self.category {
            Some(category) => product.category == Some(category),
            None => true,
        }
    }
}
