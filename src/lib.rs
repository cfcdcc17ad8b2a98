pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::{Config, ConfigSource};
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config, source: ConfigSource) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);
    source.log();

    if cli.command.as_ref().is_some_and(Commands::requires_valid_config) {
        config.validate()?;
    }

    match cli.command {
        Some(Commands::InitConfig) => cli::cmd_init_config(),

        Some(Commands::Serve { port }) => {
            let prometheus_handle = init_metrics(&config)?;
            let state = SharedState::new(config)?;
            cli::cmd_serve(state, port, prometheus_handle).await
        }

        Some(Commands::Record {
            term,
            movie_id,
            poster_path,
        }) => {
            let state = SharedState::new(config)?;
            let term = term.join(" ");
            cli::cmd_record(&state, &term, movie_id, poster_path.as_deref()).await
        }

        Some(Commands::Trending) => {
            let state = SharedState::new(config)?;
            cli::cmd_trending(&state).await
        }

        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}
