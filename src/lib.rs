pub mod admin;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer};

use cli::{Cli, Commands};
pub use config::Config;
use state::SharedState;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config, prometheus_handle).await,

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("• config.toml already exists");
            }
            Ok(())
        }

        Commands::CreateUser {
            username,
            password,
            staff,
            bio,
        } => {
            let state = SharedState::new(config).await?;
            cli::cmd_create_user(&state, &username, password, staff, &bio).await
        }

        Commands::SetBio { username, bio } => {
            let state = SharedState::new(config).await?;
            cli::cmd_set_bio(&state, &username, &bio).await
        }

        Commands::Demo => {
            let state = SharedState::new(config).await?;
            cli::cmd_demo(&state).await
        }

        Commands::Admin => {
            cli::cmd_admin();
            Ok(())
        }

        Commands::Courses => {
            let state = SharedState::new(config).await?;
            cli::cmd_list_courses(&state).await
        }

        Commands::Publish { slug, hide } => {
            let state = SharedState::new(config).await?;
            cli::cmd_publish_course(&state, &slug, hide).await
        }

        Commands::Posts => {
            let state = SharedState::new(config).await?;
            cli::cmd_list_posts(&state).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = if config.general.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "lectern")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Lectern v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = config.bind_addr();
    let state = web::create_app_state_from_config(config, prometheus_handle).await?;
    state
        .store()
        .ping()
        .await
        .context("Database is not reachable")?;

    let app = web::router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
