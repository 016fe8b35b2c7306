// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

use relay_catalog::{build_schema, logging, render_text, CatalogConfig, CatalogSchema, ProductRoute};

const DEFAULT_PRODUCT: &str = "p_0";

#[tokio::main]
async fn main() -> Result<()> {
    let config = CatalogConfig::from_env()?;
    logging::init(&config.log_filter);

    let store = config.load_store()?;
    let schema = build_schema(store);

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("schema") => println!("{}", schema.sdl()),
        Some("query") => {
            let query = args.get(2).context("Usage: relay-catalog query '<graphql>'")?;
            run_query(&schema, query).await?;
        }
        Some("product") => {
            let id = args.get(2).map(String::as_str).unwrap_or(DEFAULT_PRODUCT);
            run_product(&schema, &config, id).await?;
        }
        Some("ui") => {
            let id = args.get(2).map(String::as_str).unwrap_or(DEFAULT_PRODUCT);
            run_ui_mode(&schema, &config, id).await?;
        }
        None => run_ui_mode(&schema, &config, DEFAULT_PRODUCT).await?,
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            eprintln!("   Commands: schema | query '<graphql>' | product [id] | ui [id]");
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn run_query(schema: &CatalogSchema, query: &str) -> Result<()> {
    let response = schema.execute(query).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_product(schema: &CatalogSchema, config: &CatalogConfig, id: &str) -> Result<()> {
    let props = ProductRoute::new(id)
        .with_page_size(config.page_size)
        .fetch_props(schema)
        .await?;
    print!("{}", render_text(&props));
    Ok(())
}

#[cfg(feature = "tui")]
async fn run_ui_mode(schema: &CatalogSchema, config: &CatalogConfig, id: &str) -> Result<()> {
    println!("🖥️  Loading product {}...", id);

    let props = ProductRoute::new(id)
        .with_page_size(config.page_size)
        .fetch_props(schema)
        .await?;

    let mut app = ui::App::new(id, &props);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_schema: &CatalogSchema, _config: &CatalogConfig, _id: &str) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the product as text: relay-catalog product [id]");
    std::process::exit(1);
}
