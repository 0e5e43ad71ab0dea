use number_classify::api::{start_server, AppState};
use number_classify::config::AppConfig;
use number_classify::facts::create_fact_fetcher;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::init()?;

    let fact_fetcher = create_fact_fetcher(&config.facts)?;
    if fact_fetcher.is_some() {
        info!(
            "Fun facts enabled via {} (timeout {}ms)",
            config.facts.base_url, config.facts.timeout_ms
        );
    } else {
        info!("Fun facts disabled");
    }

    let addr = config.api_addr()?;
    start_server(AppState::new(fact_fetcher), addr).await?;

    Ok(())
}
