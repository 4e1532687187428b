//! # Data Loader Crate
//!
//! This crate handles loading and indexing the rating dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, RatingStore, id aliases)
//! - **parser**: Parse `movie_id,user_id,score` files into Rust structs
//! - **store**: Build the frozen two-way index from parsed records
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{parser, RatingStore};
//! use std::path::Path;
//!
//! let ratings = parser::load_ratings(Path::new("data/train.txt"))?;
//! let store = RatingStore::from_ratings(ratings);
//!
//! let (users, movies, count) = store.counts();
//! println!("Indexed {} ratings from {} users over {} movies", count, users, movies);
//! ```
//!
//! Ingestion is a single finite pass: the builder owns the indices while
//! records arrive, then `build()` freezes them. Everything downstream gets
//! read-only access.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use store::RatingStoreBuilder;
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    Score,
    // Core types
    Rating,
    RatingStore,
};
