// 🕸️ GraphQL Schema - Relay node interface, connections and the query root
//
// Every resolver is a passthrough to the Store, which lives in the schema
// data and is shared by every request.

use crate::connection::{connection_from_slice, ConnectionArgs, ConnectionError, PageInfo};
use crate::global_id::to_global_id;
use crate::node::{Record, BRAND_TYPE, CATEGORY_TYPE, PRODUCT_TYPE};
use crate::store::{Brand, Category, Product, Store};
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Interface, Object, Result, Schema, ServerError, SimpleObject, ID,
};
use std::fmt::Display;

pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema around an already constructed store
pub fn build_schema(store: Store) -> CatalogSchema {
    tracing::debug!(
        brands = store.brands().len(),
        categories = store.categories().len(),
        products = store.products().len(),
        "building catalog schema"
    );

    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .finish()
}

// ============================================================================
// NODE INTERFACE
// ============================================================================

/// An object with an ID
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The id of the object."))]
pub enum Node {
    Brand(Brand),
    Category(Category),
    Product(Product),
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        match record {
            Record::Brand(brand) => Node::Brand(brand),
            Record::Category(category) => Node::Category(category),
            Record::Product(product) => Node::Product(product),
        }
    }
}

// ============================================================================
// CONNECTIONS
// ============================================================================

/// An edge in a connection.
#[derive(SimpleObject)]
pub struct CategoryEdge {
    /// The item at the end of the edge
    pub node: Category,
    /// A cursor for use in pagination
    pub cursor: String,
}

/// A connection to a list of items.
#[derive(SimpleObject)]
pub struct CategoryConnection {
    /// A list of edges.
    pub edges: Vec<CategoryEdge>,
    /// Information to aid in pagination.
    pub page_info: PageInfo,
}

fn category_connection(
    store: &Store,
    ids: &[String],
    args: ConnectionArgs,
) -> std::result::Result<CategoryConnection, ConnectionError> {
    let categories: Vec<Category> = store.get_categories(ids).into_iter().cloned().collect();
    let connection = connection_from_slice(&categories, &args)?;

    Ok(CategoryConnection {
        page_info: connection.page_info,
        edges: connection
            .edges
            .into_iter()
            .map(|edge| CategoryEdge {
                node: edge.node,
                cursor: edge.cursor,
            })
            .collect(),
    })
}

/// Record `err` against the current field and resolve it to null.
///
/// Returning the error instead would null the parent object as well.
fn null_with_error<T>(ctx: &Context<'_>, err: impl Display) -> Option<T> {
    ctx.add_error(ServerError::new(err.to_string(), Some(ctx.item.pos)));
    None
}

// ============================================================================
// OBJECT TYPES
// ============================================================================

/// A product brand
#[Object]
impl Brand {
    /// The ID of an object
    async fn id(&self) -> ID {
        ID(to_global_id(BRAND_TYPE, &self.id))
    }

    /// The slug of the brand
    async fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }

    /// The name of the brand
    async fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    /// The URL to the brand logo
    async fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }
}

/// A product category
#[Object]
impl Category {
    /// The ID of an object
    async fn id(&self) -> ID {
        ID(to_global_id(CATEGORY_TYPE, &self.id))
    }

    /// The slug of the category
    async fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }

    /// The name of the category
    async fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    /// Children category
    async fn children(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        first: Option<i32>,
        before: Option<String>,
        last: Option<i32>,
    ) -> Result<Option<CategoryConnection>> {
        let store = ctx.data::<Store>()?;
        let args = ConnectionArgs {
            first,
            after,
            last,
            before,
        };
        Ok(match category_connection(store, &self.children, args) {
            Ok(connection) => Some(connection),
            Err(e) => null_with_error(ctx, e),
        })
    }
}

/// A product
#[Object]
impl Product {
    /// The ID of an object
    async fn id(&self) -> ID {
        ID(to_global_id(PRODUCT_TYPE, &self.id))
    }

    /// The slug of the product
    async fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str())
    }

    /// The name of the product
    async fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    /// Product categories
    async fn categories(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        first: Option<i32>,
        before: Option<String>,
        last: Option<i32>,
    ) -> Result<Option<CategoryConnection>> {
        let store = ctx.data::<Store>()?;
        let args = ConnectionArgs {
            first,
            after,
            last,
            before,
        };
        Ok(match category_connection(store, &self.categories, args) {
            Ok(connection) => Some(connection),
            Err(e) => null_with_error(ctx, e),
        })
    }

    /// Product brand
    async fn brand(&self, ctx: &Context<'_>) -> Result<Option<Brand>> {
        let store = ctx.data::<Store>()?;
        Ok(store.get_brand(&self.brand).cloned())
    }
}

// ============================================================================
// QUERY ROOT
// ============================================================================

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Fetches an object given its ID
    async fn node(&self, ctx: &Context<'_>, #[graphql(desc = "The ID of an object")] id: ID) -> Result<Option<Node>> {
        let store = ctx.data::<Store>()?;
        Ok(match store.resolve_node(&id) {
            Ok(record) => record.map(Node::from),
            Err(e) => null_with_error(ctx, e),
        })
    }

    /// Fetches a product by its local id (e.g. "p_0"), not by global ID
    async fn product(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Product>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let store = ctx.data::<Store>()?;
        Ok(store.get_product(&id).cloned())
    }
}
