//! Operational CLI: one-off scrapes and mapping inspection, against the
//! same config/env the server uses.

use clap::{Parser, Subcommand};
use propex_core::FieldMap;
use propex_fetch::RenderClient;

#[derive(Debug, Parser)]
#[command(name = "propex-cli")]
#[command(about = "Listing extraction command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a listing URL and print the result envelope as JSON.
    Scrape { url: String },
    /// List stored domain mappings.
    Mappings,
    /// Show the stored mapping for one domain.
    Mapping { domain: String },
    /// Set the mapping for a domain from a JSON object of raw -> normalized names.
    SetMapping { domain: String, field_map: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { url } => run_scrape(&url).await,
        Commands::Mappings => run_list_mappings().await,
        Commands::Mapping { domain } => run_get_mapping(&domain).await,
        Commands::SetMapping { domain, field_map } => run_set_mapping(&domain, &field_map).await,
    }
}

async fn run_scrape(url: &str) -> anyhow::Result<()> {
    let config = propex_core::load_app_config()?;
    let renderer = RenderClient::new(
        &config.renderer_url,
        config.renderer_token.as_deref(),
        &config.render_user_agent,
        config.render_nav_timeout_secs,
        config.render_settle_ms,
    )?;

    let outcome = propex_scraper::scrape(&renderer, url).await;
    if let Some(note) = &outcome.error {
        tracing::warn!(domain = %outcome.domain, note, "scrape finished with a diagnostic");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn run_list_mappings() -> anyhow::Result<()> {
    let pool = propex_db::connect_pool_from_env().await?;
    let rows = propex_db::list_mappings(&pool).await?;

    if rows.is_empty() {
        println!("no mappings stored");
        return Ok(());
    }
    for row in rows {
        println!(
            "{}  ({} entries, updated {})",
            row.domain,
            row.field_map.0.len(),
            row.updated_at
        );
    }
    Ok(())
}

async fn run_get_mapping(domain: &str) -> anyhow::Result<()> {
    let pool = propex_db::connect_pool_from_env().await?;
    match propex_db::get_mapping(&pool, domain).await? {
        Some(row) => println!("{}", serde_json::to_string_pretty(&row.field_map.0)?),
        None => println!("no mapping stored for domain: {domain}"),
    }
    Ok(())
}

async fn run_set_mapping(domain: &str, field_map_json: &str) -> anyhow::Result<()> {
    let field_map: FieldMap = serde_json::from_str(field_map_json)
        .map_err(|e| anyhow::anyhow!("field_map must be a JSON object of strings: {e}"))?;

    let pool = propex_db::connect_pool_from_env().await?;
    let row = propex_db::upsert_mapping(&pool, domain, &field_map).await?;
    println!(
        "saved mapping for {} ({} entries)",
        row.domain,
        row.field_map.0.len()
    );
    Ok(())
}
