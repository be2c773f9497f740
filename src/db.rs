use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
};

use crate::{
    config::AppConfig,
    entity::{Categories, ItemCategories, Items, OrderDetails, Orders, Users},
};

/// Create a SeaORM connection.
pub async fn create_orm_conn(config: &AppConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(config.sql_logging);
    let conn = Database::connect(options).await?;
    tracing::debug!(backend = ?conn.get_database_backend(), "database connected");
    Ok(conn)
}

/// Creates every table from the entity definitions, parents before children.
pub async fn create_schema(conn: &DatabaseConnection) -> Result<()> {
    create_table(conn, Items).await?;
    create_table(conn, Categories).await?;
    create_table(conn, ItemCategories).await?;
    create_table(conn, Users).await?;
    create_table(conn, Orders).await?;
    create_table(conn, OrderDetails).await?;
    Ok(())
}

async fn create_table<E>(conn: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt)).await?;
    tracing::debug!(table = %table, "table ensured");
    Ok(())
}
