pub mod filter;

pub use filter::ArtworkFilter;
