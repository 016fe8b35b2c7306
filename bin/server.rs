// Relay Catalog - Web Server
// GraphQL over HTTP with Axum, plus a plain-text product page

use anyhow::{Context, Result};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use relay_catalog::{build_schema, logging, render_text, CatalogConfig, CatalogSchema, ProductRoute};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    schema: CatalogSchema,
    page_size: i32,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /graphql - Execute a GraphQL request
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner();
    tracing::info!(
        operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
        "graphql request"
    );

    let response = state.schema.execute(request).await;
    if response.is_err() {
        tracing::warn!(errors = response.errors.len(), "graphql request returned errors");
    }
    response.into()
}

/// GET /graphql - GraphiQL explorer
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// GET /product/:id - Product view rendered as text
async fn product_page(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let route = ProductRoute::new(id).with_page_size(state.page_size);

    match route.fetch_props(&state.schema).await {
        Ok(props) => (StatusCode::OK, render_text(&props)).into_response(),
        Err(e) => {
            tracing::error!(product_id = %route.product_id, error = %e, "product page failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/product/:id", get(product_page))
        .route("/api/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = CatalogConfig::from_env()?;
    logging::init(&config.log_filter);

    println!("🌐 Relay Catalog - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let store = config.load_store()?;
    let state = AppState {
        schema: build_schema(store),
        page_size: config.page_size,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    println!("\n🚀 Server running on http://{}", config.bind_addr);
    println!("   GraphQL:  http://{}/graphql", config.bind_addr);
    println!("   Product:  http://{}/product/p_0", config.bind_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use relay_catalog::Store;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            schema: build_schema(Store::with_mock_data()),
            page_size: 10,
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"success":true,"data":"OK"}"#);
    }

    #[tokio::test]
    async fn test_graphql_post() {
        let request = Request::post("/graphql")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"query":"{ product(id: \"p_1\") { name brand { name } } }"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["data"]["product"]["name"], "Bola Vermelha");
        assert_eq!(body["data"]["product"]["brand"]["name"], "Brinks");
    }

    #[tokio::test]
    async fn test_product_page() {
        let response = app()
            .oneshot(Request::get("/product/p_0").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_string(response).await;
        assert!(text.starts_with("Product\n\n"));
        assert!(text.contains("Camisa Polo"));
    }

    #[tokio::test]
    async fn test_graphiql_page() {
        let response = app()
            .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("graphiql"));
    }
}
