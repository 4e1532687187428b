//! Core domain types for the rating dataset.
//!
//! The dataset is a sparse user/movie rating matrix, held twice: once keyed
//! by user and once keyed by movie. Both views are built in the same
//! ingestion pass and stay consistent for the lifetime of the store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// A rating score, nominally in [1.0, 5.0]
pub type Score = f64;

// =============================================================================
// Rating
// =============================================================================

/// A single rating record: one user's score for one movie.
///
/// Records are immutable once ingested; the store never mutates or deletes
/// them after the build step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub score: Score,
}

// =============================================================================
// RatingStore - The Frozen Two-Way Index
// =============================================================================

/// Immutable two-way index over all ingested ratings.
///
/// `user_index` maps each user to the movies it rated; `movie_index` is the
/// structural mirror, mapping each movie to the users who rated it. Every
/// (user, movie, score) present in one index is present in the other with
/// the same score.
///
/// A `RatingStore` is produced by [`crate::RatingStoreBuilder::build`] and is
/// read-only from that point on, so it can be shared across prediction
/// workers without any locking.
#[derive(Debug)]
pub struct RatingStore {
    pub(crate) user_index: HashMap<UserId, HashMap<MovieId, Score>>,
    pub(crate) movie_index: HashMap<MovieId, HashMap<UserId, Score>>,

    /// Mean of every score in the store, computed once at build time
    pub(crate) global_average: Score,
    pub(crate) rating_count: usize,
}

impl RatingStore {
    /// Get all ratings made by a user, keyed by movie
    ///
    /// Returns `None` if the user never appeared in the training data.
    pub fn user_ratings(&self, user_id: UserId) -> Option<&HashMap<MovieId, Score>> {
        self.user_index.get(&user_id)
    }

    /// Get all ratings received by a movie, keyed by user
    pub fn movie_ratings(&self, movie_id: MovieId) -> Option<&HashMap<UserId, Score>> {
        self.movie_index.get(&movie_id)
    }

    /// Whether the user appeared in the training data
    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_index.contains_key(&user_id)
    }

    /// Whether the movie appeared in the training data
    pub fn contains_movie(&self, movie_id: MovieId) -> bool {
        self.movie_index.contains_key(&movie_id)
    }

    /// Mean of all scores across every (user, movie) pair in the store.
    ///
    /// 0.0 for an empty store; downstream sanitization clamps anything built
    /// on top of that into the valid rating range.
    pub fn global_average(&self) -> Score {
        self.global_average
    }

    /// Get counts for reporting/validation: (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.user_index.len(), self.movie_index.len(), self.rating_count)
    }
}
