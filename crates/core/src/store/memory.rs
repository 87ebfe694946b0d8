use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ArtworkStore, StoreResult};
use crate::artwork::{Artwork, ArtworkId, ArtworkPatch};
use crate::mutation::{FavoriteAction, InsertResult, UpdateResult};
use crate::query::filter::{newest_first, ArtworkFilter};

/// In-process artwork store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtworkStore {
    artworks: Arc<RwLock<HashMap<ArtworkId, Artwork>>>,
}

impl MemoryArtworkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtworkStore for MemoryArtworkStore {
    async fn list(&self, filter: &ArtworkFilter) -> StoreResult<Vec<Artwork>> {
        let artworks = self.artworks.read().await;
        let mut found: Vec<Artwork> = artworks
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        found.sort_by(newest_first);
        Ok(found)
    }

    async fn get(&self, id: &ArtworkId) -> StoreResult<Option<Artwork>> {
        Ok(self.artworks.read().await.get(id).cloned())
    }

    async fn insert(&self, artwork: Artwork) -> StoreResult<InsertResult> {
        let id = artwork.id;
        self.artworks.write().await.insert(id, artwork);
        Ok(InsertResult::new(id))
    }

    async fn like(&self, id: &ArtworkId) -> StoreResult<UpdateResult> {
        let mut artworks = self.artworks.write().await;
        let Some(artwork) = artworks.get_mut(id) else {
            return Ok(UpdateResult::unmatched());
        };
        artwork.likes = artwork.likes.saturating_add(1);
        Ok(UpdateResult::new(1, 1))
    }

    async fn favorite(
        &self,
        id: &ArtworkId,
        user: &str,
        action: FavoriteAction,
    ) -> StoreResult<UpdateResult> {
        let mut artworks = self.artworks.write().await;
        let Some(artwork) = artworks.get_mut(id) else {
            return Ok(UpdateResult::unmatched());
        };
        let changed = match action {
            FavoriteAction::Add => {
                if artwork.favorites.iter().any(|f| f == user) {
                    false
                } else {
                    artwork.favorites.push(user.to_string());
                    true
                }
            }
            FavoriteAction::Remove => {
                let before = artwork.favorites.len();
                artwork.favorites.retain(|f| f != user);
                artwork.favorites.len() != before
            }
        };
        Ok(UpdateResult::new(1, u64::from(changed)))
    }

    async fn update(&self, id: &ArtworkId, patch: &ArtworkPatch) -> StoreResult<UpdateResult> {
        let mut artworks = self.artworks.write().await;
        let Some(artwork) = artworks.get_mut(id) else {
            return Ok(UpdateResult::unmatched());
        };
        let before = artwork.fields.clone();
        artwork.fields.apply(patch);
        Ok(UpdateResult::new(1, u64::from(artwork.fields != before)))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
