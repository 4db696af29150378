use anyhow::Context;
use clap::Parser;
use scoft_eligibility::adapters::open_source;
use scoft_eligibility::app::{self, AppState};
use scoft_eligibility::core::ConfigProvider;
use scoft_eligibility::domain::model::TableSchema;
use scoft_eligibility::utils::logger::{self, LogSettings};
use scoft_eligibility::utils::validation::Validate;
use scoft_eligibility::{CliConfig, EligibilityService, TableCache};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config.display(), e);
            eprintln!("💡 Make sure the file is valid TOML");
            std::process::exit(1);
        }
    };

    logger::init_logger(&LogSettings {
        verbose: cli.verbose,
        json: config.logging.json,
        level: config.logging.level.as_deref(),
        error_log: config.logging.error_log.as_deref(),
    })
    .context("initializing logging")?;

    tracing::info!("Starting scoft-eligibility");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let directory = Arc::new(config.departments());
    let schema = TableSchema::new(config.catalog_sheet(), &directory);
    let cache = Arc::new(
        TableCache::new(open_source(config.workbook_path()), schema)
            .reload_interval(config.reload_interval()),
    );

    // Warm the cache; the service still starts if the workbook is unreadable.
    let warm = Arc::clone(&cache);
    match tokio::task::spawn_blocking(move || warm.tables()).await? {
        Ok(tables) => tracing::info!(
            "📁 Loaded {} online courses from {}",
            tables.catalog().len(),
            config.workbook_path().display()
        ),
        Err(e) => tracing::warn!("Starting without course data: {}", e),
    }

    let state = AppState::new(EligibilityService::new(cache, directory));

    let address = config.bind_address();
    tracing::info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;

    app::serve(listener, state).await?;
    Ok(())
}
