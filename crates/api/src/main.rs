use anyhow::Context;

use contractkit_api::{ApiConfig, AppServices, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("reading configuration")?;
    contractkit_observability::init(config.log_format);

    let services = AppServices::in_memory();
    if config.seed {
        contractkit_parties::seed_people(services.people.as_ref())
            .await
            .context("seeding sample people")?;
    }

    let app = build_app(&config.api_prefix, services);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %config.api_prefix,
        "listening"
    );

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
