use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;

pub type DbPool = Pool<Sqlite>;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseInitError {
    #[error("Failed to connect to SQLite: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),
}

pub async fn init_db(database_url: &str) -> Result<DbPool, DatabaseInitError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
