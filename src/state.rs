use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, db::create_orm_conn};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
}

impl AppState {
    /// Connect to the configured database and make sure every table exists.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let orm = create_orm_conn(config).await?;
        crate::db::create_schema(&orm).await?;
        Ok(Self { orm })
    }
}
