//! # Evaluation Crate
//!
//! Feeds test records through the predictor and reports aggregate accuracy.
//!
//! Test pairs are independent once the store is frozen, so the sweep runs
//! on Rayon workers; the prediction rows come back in input order. Error
//! sums are accumulated as running totals, never as materialized error
//! vectors.
//!
//! This crate computes and renders; it never opens files. The binary owns
//! paths and file handles and passes any `io::Write` sink in.

use data_loader::{MovieId, Rating, Score, UserId};
use predictor::Predictor;
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// One prediction row: the test pair and its sanitized estimate
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prediction {
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub predicted: Score,
}

/// Aggregate accuracy over a full test set.
///
/// Both metrics are rounded to two decimals for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EvaluationReport {
    pub mean_absolute_error: f64,
    pub root_mean_squared_error: f64,
    pub count: usize,
}

/// Predict every test record and accumulate the error metrics.
///
/// The returned predictions are in the same order as `test_set`.
pub fn evaluate(predictor: &Predictor, test_set: &[Rating]) -> (Vec<Prediction>, EvaluationReport) {
    let scored: Vec<(Prediction, f64, f64)> = test_set
        .par_iter()
        .map(|record| {
            let predicted = predictor.predict(record.user_id, record.movie_id);
            let error = record.score - predicted;
            let prediction = Prediction {
                movie_id: record.movie_id,
                user_id: record.user_id,
                predicted,
            };
            (prediction, error.abs(), error * error)
        })
        .collect();

    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut predictions = Vec::with_capacity(scored.len());
    for (prediction, abs_error, sq_error) in scored {
        abs_sum += abs_error;
        sq_sum += sq_error;
        predictions.push(prediction);
    }

    let count = predictions.len();
    let report = if count == 0 {
        EvaluationReport {
            mean_absolute_error: 0.0,
            root_mean_squared_error: 0.0,
            count: 0,
        }
    } else {
        EvaluationReport {
            mean_absolute_error: round2(abs_sum / count as f64),
            root_mean_squared_error: round2((sq_sum / count as f64).sqrt()),
            count,
        }
    };

    debug!("Evaluated {} test records", count);
    (predictions, report)
}

/// Render prediction rows as `movie_id,user_id,score` lines, in order.
pub fn write_predictions<W: Write>(writer: &mut W, predictions: &[Prediction]) -> io::Result<()> {
    for prediction in predictions {
        writeln!(
            writer,
            "{},{},{:.2}",
            prediction.movie_id, prediction.user_id, prediction.predicted
        )?;
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RatingStore;
    use std::sync::Arc;

    fn rating(movie_id: u32, user_id: u32, score: Score) -> Rating {
        Rating { movie_id, user_id, score }
    }

    fn create_test_predictor() -> Predictor {
        let store = Arc::new(RatingStore::from_ratings([
            rating(10, 1, 4.0),
            rating(10, 2, 5.0),
            rating(20, 1, 3.0),
            rating(20, 2, 4.0),
        ]));
        Predictor::new(store)
    }

    #[test]
    fn test_predictions_preserve_input_order() {
        let predictor = create_test_predictor();
        let test_set = vec![
            rating(20, 1, 4.0),
            rating(10, 2, 5.0),
            rating(999, 99, 2.0),
        ];

        let (predictions, _) = evaluate(&predictor, &test_set);

        let pairs: Vec<(u32, u32)> = predictions.iter().map(|p| (p.movie_id, p.user_id)).collect();
        assert_eq!(pairs, vec![(20, 1), (10, 2), (999, 99)]);
    }

    #[test]
    fn test_empty_test_set() {
        let predictor = create_test_predictor();
        let (predictions, report) = evaluate(&predictor, &[]);

        assert!(predictions.is_empty());
        assert_eq!(report.count, 0);
        assert_eq!(report.mean_absolute_error, 0.0);
        assert_eq!(report.root_mean_squared_error, 0.0);
    }

    #[test]
    fn test_write_predictions_format() {
        let predictions = vec![
            Prediction { movie_id: 20, user_id: 1, predicted: 3.0 },
            Prediction { movie_id: 10, user_id: 2, predicted: 4.25 },
        ];

        let mut sink = Vec::new();
        write_predictions(&mut sink, &predictions).unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), "20,1,3.00\n10,2,4.25\n");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.456), 3.46);
        assert_eq!(round2(0.7071), 0.71);
        assert_eq!(round2(2.0), 2.0);
    }
}
