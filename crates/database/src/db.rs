use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Creates a database connection
///
/// Statement logging from sqlx is switched off; the importers emit their own progress.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    Database::connect(options).await
}
