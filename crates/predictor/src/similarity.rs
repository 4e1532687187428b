//! Similarity engine: Pearson correlation between two users.
//!
//! ## Algorithm
//! 1. Intersect the movie sets of users i and j
//! 2. Compute each user's mean over exactly that intersection (the local
//!    mean, not the user's global average)
//! 3. Center both score sequences and accumulate the deviation products
//! 4. `similarity = numerator / sqrt(var_i * var_j)`, reported only when
//!    both numerator and denominator are positive, otherwise 0
//!
//! The intersection is walked by probing j's map with i's keys, so the two
//! score sequences are always paired by the same movie. Two streaming
//! passes, no intermediate vectors.

use data_loader::{RatingStore, Score, UserId};

/// Pearson similarity between users `i` and `j`, restricted to the movies
/// both have rated.
///
/// Returns 0.0 when either user is unknown, the intersection is empty, the
/// restricted ratings have zero variance, or the correlation is negative —
/// only positive similarity carries weight downstream.
pub fn similarity(store: &RatingStore, i: UserId, j: UserId) -> Score {
    let (Some(ratings_i), Some(ratings_j)) = (store.user_ratings(i), store.user_ratings(j)) else {
        return 0.0;
    };

    // Pass 1: local means over the commonly-rated movies
    let mut sum_i = 0.0;
    let mut sum_j = 0.0;
    let mut common = 0usize;
    for (movie_id, &score_i) in ratings_i {
        if let Some(&score_j) = ratings_j.get(movie_id) {
            sum_i += score_i;
            sum_j += score_j;
            common += 1;
        }
    }
    if common == 0 {
        return 0.0;
    }
    let mean_i = sum_i / common as Score;
    let mean_j = sum_j / common as Score;

    // Pass 2: centered products
    let mut numerator = 0.0;
    let mut var_i = 0.0;
    let mut var_j = 0.0;
    for (movie_id, &score_i) in ratings_i {
        if let Some(&score_j) = ratings_j.get(movie_id) {
            let dev_i = score_i - mean_i;
            let dev_j = score_j - mean_j;
            numerator += dev_i * dev_j;
            var_i += dev_i * dev_i;
            var_j += dev_j * dev_j;
        }
    }

    let denominator = (var_i * var_j).sqrt();
    if numerator <= 0.0 || denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
