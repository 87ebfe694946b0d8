//! Artwork identifier.
//!
//! Identifiers are UUIDv7 values generated by the service at creation time,
//! so they sort roughly by creation order. On the wire they are the plain
//! hyphenated string form.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid artwork id `{0}`")]
pub struct InvalidArtworkId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(Uuid);

impl ArtworkId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an identifier taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, InvalidArtworkId> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| InvalidArtworkId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ArtworkId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for ArtworkId {
    type Err = InvalidArtworkId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
