// 🔗 Node resolution - global id → record, record → type
//
// Records are a tagged sum type, so mapping a record back to its exposed
// type is a single exhaustive match.

use crate::global_id::{GlobalId, GlobalIdError};
use crate::store::{Brand, Category, Product, Store};

pub const BRAND_TYPE: &str = "Brand";
pub const CATEGORY_TYPE: &str = "Category";
pub const PRODUCT_TYPE: &str = "Product";

/// Any record reachable through a global id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Brand(Brand),
    Category(Category),
    Product(Product),
}

impl Record {
    /// Exposed type name of this record
    pub fn type_name(&self) -> &'static str {
        match self {
            Record::Brand(_) => BRAND_TYPE,
            Record::Category(_) => CATEGORY_TYPE,
            Record::Product(_) => PRODUCT_TYPE,
        }
    }

    pub fn local_id(&self) -> &str {
        match self {
            Record::Brand(brand) => &brand.id,
            Record::Category(category) => &category.id,
            Record::Product(product) => &product.id,
        }
    }

    pub fn global_id(&self) -> GlobalId {
        GlobalId::new(self.type_name(), self.local_id())
    }
}

impl Store {
    /// Look up a record by type name and local id.
    ///
    /// Unknown type names and unknown ids both yield None.
    pub fn fetch(&self, type_name: &str, local_id: &str) -> Option<Record> {
        match type_name {
            BRAND_TYPE => self.get_brand(local_id).cloned().map(Record::Brand),
            CATEGORY_TYPE => self.get_category(local_id).cloned().map(Record::Category),
            PRODUCT_TYPE => self.get_product(local_id).cloned().map(Record::Product),
            _ => None,
        }
    }

    /// Resolve an opaque global id. Malformed ids are an error, misses are None.
    pub fn resolve_node(&self, global_id: &str) -> Result<Option<Record>, GlobalIdError> {
        let id = GlobalId::decode(global_id).map_err(|e| {
            tracing::debug!(global_id, error = %e, "rejected global id");
            e
        })?;
        Ok(self.fetch(id.type_name(), id.local_id()))
    }
}
