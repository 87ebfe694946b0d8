//! Authorization seam for artwork updates.
//!
//! No identity is read from requests yet, so every caller is
//! [`Caller::Anonymous`] and the shipped policy admits everyone.

use thiserror::Error;

use crate::artwork::ArtworkId;

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User { email: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("caller may not modify artwork {0}")]
pub struct AccessDenied(pub ArtworkId);

pub trait UpdatePolicy: Send + Sync + 'static {
    fn authorize_update(&self, caller: &Caller, id: &ArtworkId) -> Result<(), AccessDenied>;
}

/// Admits every caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl UpdatePolicy for AllowAll {
    fn authorize_update(&self, _caller: &Caller, _id: &ArtworkId) -> Result<(), AccessDenied> {
        Ok(())
    }
}
