//! Predictor: cold-start branching plus similarity-weighted aggregation.
//!
//! ## Algorithm
//! 1. Unknown user and unknown movie: fall back to the global average
//! 2. Unknown user only: fall back to the movie's average
//! 3. Unknown movie only: fall back to the user's average
//! 4. Warm path: for every user j who rated the target movie, weight j's
//!    deviation from its own mean by the Pearson similarity w_ij, then add
//!    the normalized sum to the target user's average
//!
//! Every branch ends in sanitization: NaN becomes the global average, the
//! magnitude is clamped into [1, 5], and the result is rounded to two
//! decimals. `predict` therefore never fails.

use crate::averages;
use crate::similarity::similarity;
use data_loader::{MovieId, RatingStore, Score, UserId};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Produces sanitized rating estimates from a frozen rating store
pub struct Predictor {
    /// Shared reference to the rating store (read-only, so no Mutex needed)
    store: Arc<RatingStore>,
}

impl Predictor {
    /// Create a predictor over a frozen store
    pub fn new(store: Arc<RatingStore>) -> Self {
        Self { store }
    }

    /// Estimate the rating `user_id` would give `movie_id`.
    ///
    /// Pure over the frozen store: the same pair always yields the same
    /// estimate. Unknown users and movies are expected inputs, not errors.
    #[instrument(skip(self))]
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> Score {
        let raw = self.raw_estimate(user_id, movie_id);
        let sanitized = sanitize(raw, self.store.global_average());
        debug!(
            "Predicted {:.2} for user {} on movie {}",
            sanitized, user_id, movie_id
        );
        sanitized
    }

    /// The unsanitized estimate: cold-start branches, then the warm path.
    fn raw_estimate(&self, user_id: UserId, movie_id: MovieId) -> Score {
        let store = self.store.as_ref();
        let global = store.global_average();

        match (store.user_ratings(user_id), store.movie_ratings(movie_id)) {
            // Nothing known about either side
            (None, None) => global,

            // New user: average of the movie's existing ratings
            (None, Some(_)) => averages::movie_average(store, movie_id).unwrap_or(global),

            // New movie: average of the user's existing ratings
            (Some(_), None) => averages::user_average(store, user_id).unwrap_or(global),

            // Warm path: similarity-weighted deviations over the movie's raters
            (Some(_), Some(raters)) => {
                let user_mean = averages::user_average(store, user_id).unwrap_or(global);

                let (weighted_sum, weight_total) = raters
                    .par_iter()
                    .fold(
                        || (0.0, 0.0),
                        |(mut weighted_sum, mut weight_total), (&neighbor, &neighbor_score)| {
                            let w = similarity(store, user_id, neighbor);
                            // Movie-index entries always mirror into the user index
                            let neighbor_mean =
                                averages::user_average(store, neighbor).unwrap_or(global);

                            weighted_sum += w * (neighbor_score - neighbor_mean);
                            weight_total += w.abs();
                            (weighted_sum, weight_total)
                        },
                    )
                    .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));

                // No informative neighbors: keep the user's own mean
                let denominator = if weight_total == 0.0 { 1.0 } else { weight_total };
                user_mean + weighted_sum / denominator
            }
        }
    }
}

/// Sanitize a raw estimate into a reportable rating.
///
/// NaN is replaced by `fallback` before clamping. Magnitudes below 1 snap
/// to 1, magnitudes above 5 snap to 5, and the survivor is rounded to two
/// decimal places.
fn sanitize(value: Score, fallback: Score) -> Score {
    let mut value = if value.is_nan() { fallback } else { value };

    if value.abs() < 1.0 {
        value = 1.0;
    } else if value.abs() > 5.0 {
        value = 5.0;
    }

    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    fn rating(movie_id: u32, user_id: u32, score: Score) -> Rating {
        Rating { movie_id, user_id, score }
    }

    /// Users {1, 2}, movies {10, 20}; user 1 averages 3.5, user 2 averages
    /// 4.5, movie 10 averages 4.5, movie 20 averages 3.5, global 4.0.
    fn create_test_store() -> Arc<RatingStore> {
        Arc::new(RatingStore::from_ratings([
            rating(10, 1, 4.0),
            rating(10, 2, 5.0),
            rating(20, 1, 3.0),
            rating(20, 2, 4.0),
        ]))
    }

    #[test]
    fn test_cold_start_unknown_user_and_movie() {
        let predictor = Predictor::new(create_test_store());
        assert_eq!(predictor.predict(99, 999), 4.0);
    }

    #[test]
    fn test_cold_start_unknown_user() {
        let predictor = Predictor::new(create_test_store());
        // Movie 10 average
        assert_eq!(predictor.predict(99, 10), 4.5);
    }

    #[test]
    fn test_cold_start_unknown_movie() {
        let predictor = Predictor::new(create_test_store());
        // User 1 average
        assert_eq!(predictor.predict(1, 999), 3.5);
    }

    #[test]
    fn test_warm_path_hand_computed() {
        // Raters of movie 20: user 1 (self, w = 1) and user 2 (w = 1 over
        // the shared movies). Both deviations are -0.5, weights sum to 2:
        // 3.5 + (-1.0 / 2) = 3.0
        let predictor = Predictor::new(create_test_store());
        assert_eq!(predictor.predict(1, 20), 3.0);
    }

    #[test]
    fn test_warm_path_zero_weights_keeps_user_mean() {
        // The only overlap between users 1 and 2 is a single movie, so
        // every similarity is 0 and the weight denominator substitutes 1
        let store = Arc::new(RatingStore::from_ratings([
            rating(1, 1, 4.0),
            rating(2, 1, 4.0),
            rating(1, 2, 5.0),
            rating(3, 2, 3.0),
        ]));
        let predictor = Predictor::new(store);

        // predict(1, 3): warm, but sum |w| = 0 -> user 1 mean
        assert_eq!(predictor.predict(1, 3), 4.0);
    }

    #[test]
    fn test_empty_store_prediction_clamps_to_one() {
        // Global average of an empty store is 0.0; |0| < 1 snaps to 1.0
        let predictor = Predictor::new(Arc::new(RatingStore::from_ratings([])));
        assert_eq!(predictor.predict(1, 1), 1.0);
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let predictor = Predictor::new(create_test_store());
        let first = predictor.predict(1, 20);
        let second = predictor.predict(1, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prediction_always_in_range() {
        let predictor = Predictor::new(create_test_store());
        for user_id in [1, 2, 99] {
            for movie_id in [10, 20, 999] {
                let p = predictor.predict(user_id, movie_id);
                assert!((1.0..=5.0).contains(&p.abs()), "out of range: {}", p);
            }
        }
    }

    #[test]
    fn test_sanitize_rounds_in_range_values() {
        assert_eq!(sanitize(3.456, 0.0), 3.46);
        assert_eq!(sanitize(4.5, 0.0), 4.5);
        assert_eq!(sanitize(1.0, 0.0), 1.0);
        assert_eq!(sanitize(5.0, 0.0), 5.0);
    }

    #[test]
    fn test_sanitize_clamps_magnitude() {
        assert_eq!(sanitize(0.2, 0.0), 1.0);
        assert_eq!(sanitize(-0.2, 0.0), 1.0);
        assert_eq!(sanitize(7.3, 0.0), 5.0);
        assert_eq!(sanitize(-7.3, 0.0), 5.0);
    }

    #[test]
    fn test_sanitize_negative_in_range_passes_through() {
        // Magnitude clamping only: -3 has |.| within [1, 5]
        assert_eq!(sanitize(-3.0, 0.0), -3.0);
        assert_eq!(sanitize(-4.567, 0.0), -4.57);
    }

    #[test]
    fn test_sanitize_nan_falls_back_then_clamps() {
        assert_eq!(sanitize(Score::NAN, 4.0), 4.0);
        // Fallback itself is still subject to clamping
        assert_eq!(sanitize(Score::NAN, 0.0), 1.0);
    }
}
