// 🗃️ Catalog Store - read-only brands, categories and products
//
// The whole data set is built once (mock data or a JSON data file) and never
// mutated afterwards. Every lookup is a plain find/filter over a small Vec.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// RECORDS
// ============================================================================

/// A product brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// URL of the brand logo (unset in the mock data)
    #[serde(default)]
    pub logo: Option<String>,
}

/// A product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Ids of the child categories
    #[serde(default)]
    pub children: Vec<String>,
}

/// A product, referencing its brand and categories by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub brand: String,
}

impl Brand {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Brand {
            id: id.into(),
            slug: slugify(&name),
            name,
            logo: None,
        }
    }
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Category {
            id: id.into(),
            slug: slugify(&name),
            name,
            children: Vec::new(),
        }
    }
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        categories: Vec<String>,
        brand: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Product {
            id: id.into(),
            slug: slugify(&name),
            name,
            categories,
            brand: brand.into(),
        }
    }
}

/// Lowercase the name and join words with `-` ("Camisa Polo" → "camisa-polo")
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

// ============================================================================
// STORE
// ============================================================================

/// In-memory catalog. Immutable once constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    brands: Vec<Brand>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Store {
    /// Build a store from explicit collections.
    ///
    /// Fails if an id appears twice within the same collection.
    pub fn new(brands: Vec<Brand>, categories: Vec<Category>, products: Vec<Product>) -> Result<Self> {
        let store = Store {
            brands,
            categories,
            products,
        };
        store.check_unique_ids()?;
        Ok(store)
    }

    /// The built-in demo data set
    ///
    /// - Brands: Nike (b_0), Brinks (b_1)
    /// - Categories: camisetas (c_0), brinquedos (c_1)
    /// - Products: Camisa Polo (p_0), Bola Vermelha (p_1)
    pub fn with_mock_data() -> Self {
        let brands = ["Nike", "Brinks"]
            .iter()
            .enumerate()
            .map(|(i, name)| Brand::new(format!("b_{}", i), *name))
            .collect();

        let categories = ["camisetas", "brinquedos"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category::new(format!("c_{}", i), *name))
            .collect();

        let products = ["Camisa Polo", "Bola Vermelha"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Product::new(
                    format!("p_{}", i),
                    *name,
                    vec![format!("c_{}", i)],
                    format!("b_{}", i),
                )
            })
            .collect();

        let store = Store {
            brands,
            categories,
            products,
        };
        tracing::debug!(
            brands = store.brands.len(),
            categories = store.categories.len(),
            products = store.products.len(),
            "mock catalog built"
        );
        store
    }

    /// Parse a data set from JSON: `{ "brands": [...], "categories": [...], "products": [...] }`
    ///
    /// Missing slugs are derived from the name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut store: Store = serde_json::from_str(json).context("Invalid catalog JSON")?;

        for brand in store.brands.iter_mut().filter(|b| b.slug.is_empty()) {
            brand.slug = slugify(&brand.name);
        }
        for category in store.categories.iter_mut().filter(|c| c.slug.is_empty()) {
            category.slug = slugify(&category.name);
        }
        for product in store.products.iter_mut().filter(|p| p.slug.is_empty()) {
            product.slug = slugify(&product.name);
        }

        store.check_unique_ids()?;
        Ok(store)
    }

    /// Load a data set from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {:?}", path))?;
        let store = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load catalog file {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            brands = store.brands.len(),
            categories = store.categories.len(),
            products = store.products.len(),
            "catalog loaded"
        );
        Ok(store)
    }

    fn check_unique_ids(&self) -> Result<()> {
        check_unique("brand", self.brands.iter().map(|b| b.id.as_str()))?;
        check_unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        check_unique("product", self.products.iter().map(|p| p.id.as_str()))?;
        Ok(())
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// Find a brand by id (None when unknown)
    pub fn get_brand(&self, id: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == id)
    }

    /// Find a product by id (None when unknown)
    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find a category by id (None when unknown)
    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories whose id is in `ids`, in store order.
    ///
    /// Unknown ids are skipped and repeated ids do not repeat categories.
    pub fn get_categories<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| ids.iter().any(|id| id.as_ref() == category.id))
            .collect()
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(anyhow!("Duplicate {} id: {}", kind, id));
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
