//! One-time import of the deprecated `wishlist` table.
//!
//! Databases created by the older deployment keep their entries in a
//! `wishlist` table without a `bought` column. On startup those rows are
//! copied into `wishes` and the old table is renamed so the import never
//! runs twice.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use log::info;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use wishlist_core::constants::{DEFAULT_CURRENCY, DEFAULT_OWNER, UNTITLED_WISH};
use wishlist_core::Result;

const LEGACY_TABLE: &str = "wishlist";
const IMPORTED_TABLE: &str = "wishlist_legacy_imported";

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn table_exists(conn: &mut SqliteConnection, name: &str) -> QueryResult<bool> {
    let found = diesel::sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(name)
    .get_result::<TableCount>(conn)?;
    Ok(found.count > 0)
}

/// Copies rows from the legacy `wishlist` table into `wishes`.
///
/// Returns the number of rows imported; 0 when there is no legacy table.
pub fn import_legacy_wishlist(pool: &DbPool) -> Result<usize> {
    let mut conn = get_connection(pool)?;

    let imported = conn
        .immediate_transaction::<_, StorageError, _>(|conn| {
            if !table_exists(conn, LEGACY_TABLE)? {
                return Ok(None);
            }

            let copied = diesel::sql_query(format!(
                "INSERT INTO wishes (title, description, price, currency, image, link, owner, bought, created_at)
                 SELECT COALESCE(NULLIF(TRIM(title), ''), '{untitled}'),
                        COALESCE(description, ''),
                        price,
                        COALESCE(NULLIF(TRIM(currency), ''), '{currency}'),
                        COALESCE(image, ''),
                        COALESCE(link, ''),
                        COALESCE(NULLIF(TRIM(owner), ''), '{owner}'),
                        0,
                        COALESCE(created_at, CURRENT_TIMESTAMP)
                 FROM {LEGACY_TABLE}
                 ORDER BY id",
                untitled = UNTITLED_WISH,
                currency = DEFAULT_CURRENCY,
                owner = DEFAULT_OWNER,
            ))
            .execute(conn)?;

            diesel::sql_query(format!(
                "ALTER TABLE {LEGACY_TABLE} RENAME TO {IMPORTED_TABLE}"
            ))
            .execute(conn)?;

            Ok(Some(copied))
        })?;

    match imported {
        Some(count) => {
            info!(
                "Imported {} row(s) from legacy table '{}' (renamed to '{}')",
                count, LEGACY_TABLE, IMPORTED_TABLE
            );
            Ok(count)
        }
        None => Ok(0),
    }
}
