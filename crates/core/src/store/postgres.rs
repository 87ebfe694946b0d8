use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::{ArtworkStore, StoreError, StoreResult};
use crate::artwork::{Artwork, ArtworkFields, ArtworkId, ArtworkPatch};
use crate::mutation::{FavoriteAction, InsertResult, UpdateResult};
use crate::query::filter::{ArtworkFilter, ORDER_BY_NEWEST};

const SELECT_ARTWORKS: &str = "SELECT id, content, likes, favorites, created_at FROM artworks";

const SELECT_ARTWORK_BY_ID: &str =
    "SELECT id, content, likes, favorites, created_at FROM artworks WHERE id = $1";

const INSERT_ARTWORK: &str = "INSERT INTO artworks (id, content, likes, favorites, created_at) \
     VALUES ($1, $2, $3, $4, $5)";

/// Database row of the `artworks` table.
#[derive(Debug, sqlx::FromRow)]
struct ArtworkRow {
    id: Uuid,
    content: Value,
    likes: i64,
    favorites: Vec<String>,
    created_at: DateTime<Utc>,
}

impl ArtworkRow {
    fn into_artwork(self) -> StoreResult<Artwork> {
        let id = ArtworkId::from(self.id);
        let fields: ArtworkFields = serde_json::from_value(self.content)
            .map_err(|source| StoreError::Corrupt { id, source })?;
        Ok(Artwork {
            id,
            fields,
            likes: u64::try_from(self.likes).unwrap_or_default(),
            favorites: self.favorites,
            created_at: self.created_at,
        })
    }
}

/// Single-row update that reports how many rows matched `id` and how many
/// were actually changed. `$1` is always the artwork id.
fn counted_update(set: &str, changes: &str) -> String {
    format!(
        "WITH matched AS (SELECT id FROM artworks WHERE id = $1), \
         changed AS (UPDATE artworks SET {set} WHERE id = $1 AND {changes} RETURNING id) \
         SELECT (SELECT COUNT(*) FROM matched) AS matched_count, \
         (SELECT COUNT(*) FROM changed) AS modified_count"
    )
}

fn to_update_result((matched, modified): (i64, i64)) -> UpdateResult {
    UpdateResult::new(
        u64::try_from(matched).unwrap_or_default(),
        u64::try_from(modified).unwrap_or_default(),
    )
}

/// PostgreSQL-backed artwork store. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgArtworkStore {
    pool: PgPool,
}

impl PgArtworkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Whether `lower()` folds non-ASCII letters in this database. Listing
    /// search relies on it to match the in-memory backend.
    pub async fn unicode_case_folding(&self) -> StoreResult<bool> {
        let folds: bool = sqlx::query_scalar("SELECT lower('ÉTÉ À Ø') = 'été à ø'")
            .fetch_one(&self.pool)
            .await?;
        Ok(folds)
    }
}

#[async_trait]
impl ArtworkStore for PgArtworkStore {
    async fn list(&self, filter: &ArtworkFilter) -> StoreResult<Vec<Artwork>> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_ARTWORKS);
        filter.push_where(&mut qb);
        qb.push(ORDER_BY_NEWEST);
        debug!(sql = qb.sql(), "listing artworks");

        let rows: Vec<ArtworkRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(ArtworkRow::into_artwork).collect()
    }

    async fn get(&self, id: &ArtworkId) -> StoreResult<Option<Artwork>> {
        let row: Option<ArtworkRow> = sqlx::query_as(SELECT_ARTWORK_BY_ID)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(ArtworkRow::into_artwork).transpose()
    }

    async fn insert(&self, artwork: Artwork) -> StoreResult<InsertResult> {
        let Artwork {
            id,
            fields,
            likes,
            favorites,
            created_at,
        } = artwork;
        sqlx::query(INSERT_ARTWORK)
            .bind(*id.as_uuid())
            .bind(Value::Object(fields.to_object()))
            .bind(i64::try_from(likes).unwrap_or(i64::MAX))
            .bind(favorites)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
        Ok(InsertResult::new(id))
    }

    async fn like(&self, id: &ArtworkId) -> StoreResult<UpdateResult> {
        let sql = counted_update("likes = likes + 1", "TRUE");
        let counts = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(to_update_result(counts))
    }

    async fn favorite(
        &self,
        id: &ArtworkId,
        user: &str,
        action: FavoriteAction,
    ) -> StoreResult<UpdateResult> {
        // The change predicates are re-checked against the latest row version
        // when a concurrent writer got there first, so add stays idempotent.
        let sql = match action {
            FavoriteAction::Add => counted_update(
                "favorites = array_append(favorites, $2)",
                "NOT ($2 = ANY(favorites))",
            ),
            FavoriteAction::Remove => counted_update(
                "favorites = array_remove(favorites, $2)",
                "$2 = ANY(favorites)",
            ),
        };
        let counts = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(user)
            .fetch_one(&self.pool)
            .await?;
        Ok(to_update_result(counts))
    }

    async fn update(&self, id: &ArtworkId, patch: &ArtworkPatch) -> StoreResult<UpdateResult> {
        let sql = counted_update(
            "content = content || $2::jsonb",
            "content IS DISTINCT FROM content || $2::jsonb",
        );
        let counts = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(Value::Object(patch.to_object()))
            .fetch_one(&self.pool)
            .await?;
        Ok(to_update_result(counts))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
