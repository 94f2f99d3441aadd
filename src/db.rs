use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

// Natural keys only: the unique indexes are the authoritative guard
// behind the application-level check-then-act reads.
const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        employee_id TEXT NOT NULL PRIMARY KEY,
        full_name   TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        department  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        employee_id TEXT NOT NULL,
        date        TEXT NOT NULL,
        status      TEXT NOT NULL,
        UNIQUE (employee_id, date)
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)"#,
];

/// Connect the process-wide pool and apply the schema. Called once at
/// startup; the pool is dropped at shutdown.
pub async fn init_db(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    apply_schema(&pool).await?;
    info!(database_url, "Connected to database");
    Ok(pool)
}

pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
