//! Parser for rating data files.
//!
//! Training and test files share one format: one record per line,
//! `movie_id,user_id,score`, comma-separated. The score may carry trailing
//! whitespace or a newline. Empty lines are skipped; any other malformed
//! line (wrong field count, non-numeric field) aborts the whole load — a
//! corrupted dataset must never feed the similarity statistics.

use crate::error::{DataLoadError, Result};
use crate::types::Rating;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a ratings file from disk
pub fn load_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = File::open(path)?;
    parse_ratings(BufReader::new(file), &path.display().to_string())
}

/// Load the training and test files in parallel.
///
/// The two files are independent, so the reads run on separate Rayon
/// workers; either failure aborts the load.
pub fn load_train_test(train: &Path, test: &Path) -> Result<(Vec<Rating>, Vec<Rating>)> {
    let (train, test) = rayon::join(|| load_ratings(train), || load_ratings(test));
    Ok((train?, test?))
}

/// Parse `movie_id,user_id,score` records from any buffered reader.
///
/// `file` is only used to label errors.
pub fn parse_ratings<R: BufRead>(reader: R, file: &str) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue; // Skip empty lines
        }

        // Split by ","
        let fields: Vec<&str> = trimmed.split(',').collect();
        if fields.len() != 3 {
            return Err(DataLoadError::FieldCountMismatch {
                file: file.to_string(),
                expected: 3,
                found: fields.len(),
                line: line_no,
            });
        }

        // Convert to appropriate types
        let movie_id = fields[0].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;
        let user_id = fields[1].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid userId: {}", e),
        })?;
        let score = fields[2].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid score: {}", e),
        })?;

        ratings.push(Rating {
            movie_id,
            user_id,
            score,
        });
    }

    Ok(ratings)
}
