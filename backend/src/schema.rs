use tracing::{error, info};

use crate::error::{DirectoryError, DirectoryResult};
use crate::queries::{Queries, ADMINS_TABLE, VOTES_TABLE};
use crate::store::Store;

const CREATE_ADMINS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS adminslist (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        auth TEXT NOT NULL UNIQUE,
        contact TEXT,
        likes INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
        dislikes INTEGER NOT NULL DEFAULT 0 CHECK (dislikes >= 0)
    )"#;

const CREATE_VOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS adminslist_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        "user" TEXT NOT NULL,
        admin TEXT NOT NULL,
        direction INTEGER NOT NULL CHECK (direction IN (0, 1)),
        CONSTRAINT user_admin_vote UNIQUE ("user", admin)
    )"#;

fn create_statement(table: &str) -> DirectoryResult<&'static str> {
    match table {
        ADMINS_TABLE => Ok(CREATE_ADMINS_TABLE),
        VOTES_TABLE => Ok(CREATE_VOTES_TABLE),
        other => Err(DirectoryError::Schema(format!("Unknown table: {other}"))),
    }
}

/// Creates whichever of the directory tables are missing, all in one
/// transaction. Returns how many tables this call created.
pub async fn ensure_tables(store: &Store) -> DirectoryResult<usize> {
    let schema_error = |e: DirectoryError| {
        error!("Schema bootstrap failed: {}", e);
        DirectoryError::Schema(e.to_string())
    };

    let mut tx = store.begin().await.map_err(schema_error)?;
    let mut created = 0;

    for table in [ADMINS_TABLE, VOTES_TABLE] {
        if Queries::table_exists(&mut *tx, table).await.map_err(schema_error)? {
            continue;
        }

        let statement = create_statement(table).map_err(schema_error)?;
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| schema_error(e.into()))?;
        info!("Created table {}", table);
        created += 1;
    }

    tx.commit().await.map_err(|e| schema_error(e.into()))?;
    Ok(created)
}
