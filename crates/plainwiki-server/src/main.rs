use anyhow::{Context, Result};
use plainwiki_config::Config;
use plainwiki_engine::{PageController, PageStore, io};
use plainwiki_server::{MiniJinjaRenderer, build_router};
use std::{env, path::PathBuf, process, sync::Arc};

/// Resolve the configuration from the optional CLI argument or the
/// user's config file, falling back to defaults
fn resolve_config() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => {
            let config_path = Config::config_path();
            log::info!("Config path: {}", config_path.display());
            match Config::load()? {
                Some(config) => Ok(config),
                None => {
                    log::info!("No config file found, using defaults");
                    Ok(Config::default())
                }
            }
        }
        2 => {
            let config_path = PathBuf::from(&args[1]);
            log::info!("Using config from CLI argument: {}", config_path.display());
            Config::load_from_path(&config_path)?
                .with_context(|| format!("Config file not found: {}", config_path.display()))
        }
        _ => {
            eprintln!("Usage: {} [config-file]", args[0]);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("plainwiki starting up!");

    let config = resolve_config()?;

    if !config.pages_path.exists() {
        log::info!(
            "Pages directory doesn't exist, creating: {}",
            config.pages_path.display()
        );
        std::fs::create_dir_all(&config.pages_path).with_context(|| {
            format!(
                "Failed to create pages directory {}",
                config.pages_path.display()
            )
        })?;
    }
    io::validate_pages_dir(&config.pages_path)?;
    log::info!("Serving pages from {}", config.pages_path.display());

    let renderer = MiniJinjaRenderer::from_config(config.templates_path.as_deref())?;
    let controller = Arc::new(PageController::new(
        PageStore::new(&config.pages_path),
        renderer,
    ));
    let app = build_router(controller);

    let listener = tokio::net::TcpListener::bind(&config.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_address))?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
