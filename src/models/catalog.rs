//! Catalog value types held by the caches.

use serde::{Deserialize, Serialize};

pub type ProductId = u64;
pub type CategoryId = u64;
pub type InventoryId = u64;

// == Category ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            image_url: None,
        }
    }

    /// Lookup key used by the by-name store: trimmed and lowercased.
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

// == Product ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            category: None,
            image_url: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Group key for the by-category index; `None` for uncategorized products.
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }
}

// == Inventory ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: InventoryId,
    #[serde(default)]
    pub product: Option<Product>,
    pub quantity: i32,
}

impl Inventory {
    pub fn new(id: InventoryId, quantity: i32) -> Self {
        Self {
            id,
            product: None,
            quantity,
        }
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product.as_ref().map(|product| product.id)
    }
}
