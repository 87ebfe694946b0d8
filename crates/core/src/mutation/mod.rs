pub mod types;

pub use types::{FavoriteAction, FavoriteRequest, InsertResult, UpdateResult};
