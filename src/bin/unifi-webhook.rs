use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, builder::BoolishValueParser};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use unifi_webhook::{
    AppState, SharedState, api,
    config::{AppConfig, UnifiConfig},
    endpoint::DomainFilter,
    provider::UnifiProvider,
    unifi::UnifiClient,
};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Controller base URL (e.g. https://192.168.1.1)
    #[arg(long, env = "UNIFI_HOST", value_name = "URL")]
    unifi_host: String,
    /// Controller username
    #[arg(long, env = "UNIFI_USER", value_name = "USER")]
    unifi_user: String,
    /// Controller password
    #[arg(long, env = "UNIFI_PASS", value_name = "PASSWORD", hide_env_values = true)]
    unifi_pass: String,
    /// Controller site identifier
    #[arg(long, env = "UNIFI_SITE", value_name = "SITE", default_value = "default")]
    unifi_site: String,
    /// Accept invalid TLS certificates from the controller
    #[arg(long, env = "UNIFI_SKIP_TLS_VERIFY", value_parser = BoolishValueParser::new())]
    unifi_skip_tls_verify: bool,
    /// Use the external controller path layout instead of the UniFi OS proxy
    #[arg(long, env = "UNIFI_EXTERNAL_CONTROLLER", value_parser = BoolishValueParser::new())]
    unifi_external_controller: bool,
    /// Domain to manage (repeat or comma-separate for multiple values)
    #[arg(long, env = "DOMAIN_FILTER", value_name = "DOMAIN", value_delimiter = ',')]
    domain_filter: Vec<String>,
    /// Domain to leave alone even when included
    #[arg(long, env = "EXCLUDE_DOMAINS", value_name = "DOMAIN", value_delimiter = ',')]
    exclude_domains: Vec<String>,
    /// Listen address for the webhook server
    #[arg(long, env = "SERVER_LISTEN", value_name = "ADDR", default_value = "0.0.0.0:8888")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let unifi_config = build_unifi_config(&cli)?;
    let config = build_app_config(&cli)?;
    let state = init_shared_state(&unifi_config, config).await?;

    let app = api::create_router(state);

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind to {}", cli.listen))?;

    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    Ok(())
}

async fn init_shared_state(unifi_config: &UnifiConfig, config: AppConfig) -> Result<SharedState> {
    let client = UnifiClient::connect(unifi_config)
        .await
        .with_context(|| format!("failed to log in to {}", unifi_config.host))?;
    info!(host = %unifi_config.host, site = %unifi_config.site, "logged in to controller");

    let provider = UnifiProvider::new(client, config.domain_filter.clone());

    Ok(Arc::new(AppState {
        config,
        provider: Box::new(provider),
    }))
}

fn build_unifi_config(cli: &Cli) -> Result<UnifiConfig> {
    let host = cli.unifi_host.trim().trim_end_matches('/');
    if !(host.starts_with("https://") || host.starts_with("http://")) {
        bail!("--unifi-host must be an http(s) URL, got '{host}'");
    }
    if cli.unifi_site.trim().is_empty() {
        bail!("--unifi-site cannot be empty");
    }

    Ok(UnifiConfig {
        host: host.to_string(),
        user: cli.unifi_user.clone(),
        password: cli.unifi_pass.clone(),
        site: cli.unifi_site.trim().to_string(),
        skip_tls_verify: cli.unifi_skip_tls_verify,
        external_controller: cli.unifi_external_controller,
    })
}

fn build_app_config(cli: &Cli) -> Result<AppConfig> {
    let domain_filter = DomainFilter::new(&cli.domain_filter, &cli.exclude_domains)
        .context("invalid domain filter")?;

    Ok(AppConfig { domain_filter })
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
