use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Executor, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::api::PlaceStore;
use crate::entities::Place;
use crate::error::{
    invalid_input_error, malformed_record_error, not_found_error, storage_error, Error,
};

/// Place records live in a single KV-style table; the full record is JSON in
/// the `data` column and the id is duplicated as the key in string form.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    #[tracing::instrument(name = "SqliteStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS places (id TEXT PRIMARY KEY, data TEXT NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PlaceStore for SqliteStore {
    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_row = conn
            .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = ?").bind(id.to_string()))
            .await?;

        let row = maybe_row.ok_or_else(not_found_error)?;
        let data: String = row.try_get("data")?;

        // A record missing any field fails the whole lookup; partial data is
        // never returned.
        let place: Place = serde_json::from_str(&data).map_err(malformed_record_error)?;

        if place.id != id || !place.coordinates.is_valid() {
            return Err(malformed_record_error(&data));
        }

        Ok(place)
    }

    #[tracing::instrument(skip_all, fields(id = %place.id))]
    async fn insert_place(&self, place: &Place) -> Result<(), Error> {
        if !place.coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        let data = serde_json::to_string(place).map_err(storage_error)?;
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO places (id, data) VALUES (?, ?)")
                .bind(place.id.to_string())
                .bind(data),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(id = %place.id))]
    async fn update_place(&self, place: &Place) -> Result<(), Error> {
        if !place.coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        let data = serde_json::to_string(place).map_err(storage_error)?;
        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(
                sqlx::query("UPDATE places SET data = ? WHERE id = ?")
                    .bind(data)
                    .bind(place.id.to_string()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_place(&self, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(sqlx::query("DELETE FROM places WHERE id = ?").bind(id.to_string()))
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error());
        }

        Ok(())
    }
}

#[test]
fn new_store() {
    use tokio_test::block_on;

    block_on(SqliteStore::new("sqlite::memory:", 1)).unwrap();
}
