//! Artwork persistence.
//!
//! [`ArtworkStore`] is the single seam between the HTTP layer and the
//! document store. [`PgArtworkStore`] keeps artworks in PostgreSQL with the
//! caller-owned fields in a JSONB column; [`MemoryArtworkStore`] keeps them in
//! process with the same semantics.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::artwork::{Artwork, ArtworkId, ArtworkPatch};
use crate::mutation::{FavoriteAction, InsertResult, UpdateResult};
use crate::query::ArtworkFilter;

pub use memory::MemoryArtworkStore;
pub use postgres::PgArtworkStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("stored artwork {id} is not a valid document: {source}")]
    Corrupt {
        id: ArtworkId,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ArtworkStore: Send + Sync + 'static {
    /// Artworks matching `filter`, newest first. Unbounded.
    async fn list(&self, filter: &ArtworkFilter) -> StoreResult<Vec<Artwork>>;

    /// Look up by id regardless of visibility.
    async fn get(&self, id: &ArtworkId) -> StoreResult<Option<Artwork>>;

    async fn insert(&self, artwork: Artwork) -> StoreResult<InsertResult>;

    /// Add one like. An unknown id is not an error.
    async fn like(&self, id: &ArtworkId) -> StoreResult<UpdateResult>;

    /// Add `user` to the favorites set (at most once) or remove every
    /// occurrence of it.
    async fn favorite(
        &self,
        id: &ArtworkId,
        user: &str,
        action: FavoriteAction,
    ) -> StoreResult<UpdateResult>;

    /// Shallow merge of `patch` into the stored fields.
    async fn update(&self, id: &ArtworkId, patch: &ArtworkPatch) -> StoreResult<UpdateResult>;

    /// Backend liveness check.
    async fn ping(&self) -> StoreResult<()>;
}
