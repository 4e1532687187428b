//! Building the two-way rating index.
//!
//! Ingestion follows a builder-then-freeze lifecycle:
//!
//! 1. A [`RatingStoreBuilder`] owns the indices while records are inserted.
//! 2. `build()` consumes the builder, computes the global average, and
//!    returns an immutable [`RatingStore`].
//!
//! Nothing mutates the store after the freeze, which is what makes the
//! prediction phase embarrassingly parallel.

use crate::error::{DataLoadError, Result};
use crate::types::{MovieId, Rating, RatingStore, Score, UserId};
use std::collections::HashMap;

/// Accumulates ratings into the user and movie indices before the freeze.
#[derive(Debug, Default)]
pub struct RatingStoreBuilder {
    user_index: HashMap<UserId, HashMap<MovieId, Score>>,
    movie_index: HashMap<MovieId, HashMap<UserId, Score>>,
}

impl RatingStoreBuilder {
    /// Creates a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rating into both indices.
    ///
    /// Both updates are plain map upserts performed back to back, so a
    /// record can never land in one index without the other. A duplicate
    /// (user, movie) pair overwrites the earlier score in both indices:
    /// last write wins.
    pub fn insert(&mut self, rating: Rating) {
        self.user_index
            .entry(rating.user_id)
            .or_default()
            .insert(rating.movie_id, rating.score);

        self.movie_index
            .entry(rating.movie_id)
            .or_default()
            .insert(rating.user_id, rating.score);
    }

    /// Freeze the indices into an immutable [`RatingStore`].
    ///
    /// The global average is computed here, once, as a running sum over the
    /// user index. An empty builder yields a store with a 0.0 global
    /// average.
    pub fn build(self) -> RatingStore {
        let (sum, count) = self
            .user_index
            .values()
            .flat_map(|movies| movies.values())
            .fold((0.0, 0usize), |(sum, count), &score| (sum + score, count + 1));

        let global_average = if count > 0 { sum / count as Score } else { 0.0 };

        RatingStore {
            user_index: self.user_index,
            movie_index: self.movie_index,
            global_average,
            rating_count: count,
        }
    }
}

impl RatingStore {
    /// Build a store directly from a batch of parsed ratings
    pub fn from_ratings(ratings: impl IntoIterator<Item = Rating>) -> Self {
        let mut builder = RatingStoreBuilder::new();
        for rating in ratings {
            builder.insert(rating);
        }
        builder.build()
    }

    /// Validate index integrity.
    ///
    /// Checks that every (user, movie, score) reachable through the user
    /// index is reachable through the movie index with the same score, and
    /// vice versa. The builder maintains this invariant by construction;
    /// the check runs after loading as a guard against future regressions.
    pub fn validate(&self) -> Result<()> {
        for (&user_id, movies) in &self.user_index {
            for (&movie_id, score) in movies {
                match self.movie_index.get(&movie_id).and_then(|users| users.get(&user_id)) {
                    Some(mirrored) if mirrored == score => {}
                    _ => return Err(DataLoadError::InconsistentIndex {
                        user: user_id,
                        movie: movie_id,
                    }),
                }
            }
        }

        for (&movie_id, users) in &self.movie_index {
            for (&user_id, score) in users {
                match self.user_index.get(&user_id).and_then(|movies| movies.get(&movie_id)) {
                    Some(mirrored) if mirrored == score => {}
                    _ => return Err(DataLoadError::InconsistentIndex {
                        user: user_id,
                        movie: movie_id,
                    }),
                }
            }
        }

        Ok(())
    }
}
