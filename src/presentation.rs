// 🖼️ Presentation - the product route and its text rendering
//
// The route asks for exactly the fields the product view displays; the view
// prints a heading followed by the JSON it received.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::schema::CatalogSchema;
use anyhow::{anyhow, Result};
use async_graphql::{Request, Variables};
use serde_json::{json, Value};

pub const HEADING: &str = "Product";

/// Fields rendered by the product view
pub const PRODUCT_FRAGMENT: &str = r#"fragment ProductFragment on Product {
  id
  name
  categories(first: $first) {
    edges {
      node {
        name
      }
    }
  }
  brand {
    name
  }
}"#;

const PRODUCT_ROOT: &str = r#"query ProductQuery($productId: ID, $first: Int) {
  product(id: $productId) {
    ...ProductFragment
  }
}"#;

// ============================================================================
// ROUTE
// ============================================================================

/// Fetches one product (by local id) with the view's fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRoute {
    pub product_id: String,
    pub page_size: i32,
}

impl ProductRoute {
    pub fn new(product_id: impl Into<String>) -> Self {
        ProductRoute {
            product_id: product_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn query() -> String {
        format!("{}\n\n{}", PRODUCT_ROOT, PRODUCT_FRAGMENT)
    }

    pub fn request(&self) -> Request {
        Request::new(Self::query())
            .operation_name("ProductQuery")
            .variables(Variables::from_json(json!({
                "productId": self.product_id,
                "first": self.page_size,
            })))
    }

    /// Run the route against a schema and return the view's props
    pub async fn fetch_props(&self, schema: &CatalogSchema) -> Result<Value> {
        let response = schema.execute(self.request()).await;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
            return Err(anyhow!("ProductQuery failed: {}", messages.join("; ")));
        }

        Ok(response.data.into_json()?)
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// Heading plus a two-space indented JSON dump of `props`
pub fn render_text(props: &Value) -> String {
    let dump = serde_json::to_string_pretty(props).unwrap_or_else(|_| props.to_string());
    format!("{}\n\n{}\n", HEADING, dump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::build_schema;
    use crate::store::Store;

    #[tokio::test]
    async fn test_fetch_props_for_known_product() {
        let schema = build_schema(Store::with_mock_data());
        let props = ProductRoute::new("p_0").fetch_props(&schema).await.unwrap();

        assert_eq!(
            props,
            json!({
                "product": {
                    "id": "UHJvZHVjdDpwXzA=",
                    "name": "Camisa Polo",
                    "categories": { "edges": [{ "node": { "name": "camisetas" } }] },
                    "brand": { "name": "Nike" }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_props_unknown_product() {
        let schema = build_schema(Store::with_mock_data());
        let props = ProductRoute::new("p_9").fetch_props(&schema).await.unwrap();

        assert_eq!(props, json!({ "product": null }));
    }

    #[tokio::test]
    async fn test_page_size_limits_categories() {
        let store = Store::from_json_str(
            r#"{
                "brands": [{ "id": "b_0", "name": "Nike" }],
                "categories": [
                    { "id": "c_0", "name": "camisetas" },
                    { "id": "c_1", "name": "esportes" }
                ],
                "products": [{ "id": "p_0", "name": "Camisa Polo", "categories": ["c_0", "c_1"], "brand": "b_0" }]
            }"#,
        )
        .unwrap();
        let schema = build_schema(store);

        let props = ProductRoute::new("p_0").with_page_size(1).fetch_props(&schema).await.unwrap();
        assert_eq!(props["product"]["categories"]["edges"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_props_surfaces_errors() {
        let schema = build_schema(Store::with_mock_data());
        let err = ProductRoute::new("p_0").with_page_size(-1).fetch_props(&schema).await.unwrap_err();

        assert!(err.to_string().contains("ProductQuery failed"));
    }

    #[test]
    fn test_render_text() {
        let props = json!({ "product": { "name": "Camisa Polo", "brand": { "name": "Nike" } } });
        let text = render_text(&props);

        assert!(text.starts_with("Product\n\n{\n"));
        assert!(text.contains("  \"product\": {\n"));
        assert!(text.contains("    \"name\": \"Camisa Polo\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_render_null_product() {
        let text = render_text(&json!({ "product": null }));
        assert_eq!(text, "Product\n\n{\n  \"product\": null\n}\n");
    }

    #[test]
    fn test_route_query_is_valid_graphql() {
        let query = ProductRoute::query();
        assert!(async_graphql::parser::parse_query(&query).is_ok());
    }
}
