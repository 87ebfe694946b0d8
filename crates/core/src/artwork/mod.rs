pub mod id;
pub mod model;
pub mod validate;

pub use id::{ArtworkId, InvalidArtworkId};
pub use model::{Artwork, ArtworkFields, ArtworkPatch, Visibility};
pub use validate::ValidationError;
