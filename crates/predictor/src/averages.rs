//! Average engine: streaming means over the rating store.
//!
//! All means are computed as a running sum and count, never by
//! materializing the score collection first. The global average is the one
//! exception in location only: the store precomputes it once at freeze time
//! (see `data_loader::store`), since it covers every rating and is needed
//! by every cold-start fallback.

use crate::error::{PredictorError, Result};
use data_loader::{MovieId, RatingStore, Score, UserId};

/// Mean over a stream of scores; 0.0 for an empty stream.
pub(crate) fn mean<'a>(scores: impl IntoIterator<Item = &'a Score>) -> Score {
    let (sum, count) = scores
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), &score| (sum + score, count + 1));

    if count > 0 { sum / count as Score } else { 0.0 }
}

/// Mean of all scores the user has given.
///
/// Fails with `UnknownEntity` if the user never appeared in training data.
pub fn user_average(store: &RatingStore, user_id: UserId) -> Result<Score> {
    store
        .user_ratings(user_id)
        .map(|movies| mean(movies.values()))
        .ok_or(PredictorError::UnknownEntity {
            entity: "user",
            id: user_id,
        })
}

/// Mean of all scores the movie has received.
///
/// Fails with `UnknownEntity` if the movie never appeared in training data.
pub fn movie_average(store: &RatingStore, movie_id: MovieId) -> Result<Score> {
    store
        .movie_ratings(movie_id)
        .map(|users| mean(users.values()))
        .ok_or(PredictorError::UnknownEntity {
            entity: "movie",
            id: movie_id,
        })
}
