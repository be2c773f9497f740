use storefront_models::{
    config::AppConfig,
    db::{create_orm_conn, create_schema},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config).await?;
    create_schema(&orm).await?;
    tracing::info!(database_url = %config.database_url, "schema ready");
    Ok(())
}
