mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xinbot_chat::{ChatEngine, EngineOptions};
use xinbot_core::catalog::Catalog;
use xinbot_core::config::{expand_path, Config};
use xinbot_core::taxonomy::{Taxonomy, TaxonomyHandle};
use xinbot_geo::{NominatimClient, PointStore};
use xinbot_lang::TranslationClient;
use xinbot_vector::SimilarityClient;

#[derive(Parser)]
#[command(name = "xinbot-server", about = "心快活 course recommendation chat API")]
struct Cli {
    /// HTTP port
    #[arg(long, default_value = "8000")]
    port: u16,
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_engine(config: &Config) -> anyhow::Result<(Arc<ChatEngine>, Option<PathBuf>)> {
    let units_file: Option<String> = config.get("data.units_file").ok();
    let catalog = match units_file {
        Some(f) => Catalog::load_file(&expand_path(f))?,
        None => {
            let dir: String = config
                .get("data.units_dir")
                .unwrap_or_else(|_| "data".to_string());
            Catalog::load_dir(&expand_path(dir))?
        }
    };
    tracing::info!("catalog ready ({} units)", catalog.len());

    let keywords_file: Option<PathBuf> = config
        .get::<String>("data.keywords_file")
        .ok()
        .map(expand_path);
    let taxonomy = match &keywords_file {
        Some(p) => Taxonomy::from_path(p)?,
        None => Taxonomy::builtin(),
    };

    let points_file: String = config
        .get("data.points_file")
        .unwrap_or_else(|_| "data/xin_points.json".to_string());
    let points = match PointStore::load(&expand_path(&points_file)) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("service points unavailable ({points_file}): {e:#}");
            PointStore::empty()
        }
    };

    let timeout = Duration::from_secs(config.get("services.timeout_secs").unwrap_or(5u64));
    let mut opts = EngineOptions::default();
    if let Ok(page_size) = config.get::<usize>("search.page_size") {
        opts.page_size = page_size;
    }
    if let Ok(model) = config.get::<String>("search.default_model") {
        opts.default_model = model;
    }

    let mut engine = ChatEngine::new(
        Arc::new(catalog),
        Arc::new(TaxonomyHandle::new(taxonomy)),
        points,
        opts,
    );

    let geocode_url: String = config
        .get("services.geocode_url")
        .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());
    engine = engine.with_geocoder(Arc::new(NominatimClient::new(&geocode_url, timeout)?));

    if let Ok(url) = config.get::<String>("services.similarity_url") {
        engine = engine.with_similarity(Arc::new(SimilarityClient::new(&url, timeout)?));
        tracing::info!("similarity service: {url}");
    } else {
        tracing::info!("no similarity service configured, lexical-only ranking");
    }

    if let Ok(url) = config.get::<String>("services.translate_url") {
        engine = engine.with_language(Arc::new(TranslationClient::new(&url, timeout)?));
        tracing::info!("translation service: {url}");
    }

    Ok((Arc::new(engine), keywords_file))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = Config::load()?;
    let (engine, keywords_file) = build_engine(&config)?;

    let app = routes::router(routes::AppState {
        engine,
        keywords_file,
    });

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("xinbot server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
