//! Domain library for the artwork gallery service: the artwork model,
//! request validation, the listing query translator, and storage backends.

pub mod access;
pub mod artwork;
pub mod mutation;
pub mod query;
pub mod store;
