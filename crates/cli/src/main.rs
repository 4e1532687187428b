use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{parser, MovieId, RatingStore, UserId};
use evaluation::{evaluate, write_predictions};
use predictor::Predictor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// ReelRate - Movie Rating Prediction
#[derive(Parser)]
#[command(name = "reel-rate")]
#[command(about = "Movie rating prediction using user-based collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the training ratings file (movie_id,user_id,score per line)
    #[arg(short, long)]
    train: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the full test set and report MAE/RMSE
    Evaluate {
        /// Path to the test ratings file (movie_id,user_id,actual_score per line)
        #[arg(long)]
        test: PathBuf,

        /// Where to write the predicted rows
        #[arg(long, default_value = "predictions.txt")]
        output: PathBuf,

        /// Also print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict the rating for a single (user, movie) pair
    Predict {
        /// User ID to predict for
        #[arg(long)]
        user_id: UserId,

        /// Movie ID to predict
        #[arg(long)]
        movie_id: MovieId,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cli { train, command } = Cli::parse();

    // Dispatch to appropriate command handler
    match command {
        Commands::Evaluate { test, output, json } => {
            handle_evaluate(&train, &test, &output, json)
        }
        Commands::Predict { user_id, movie_id } => handle_predict(&train, user_id, movie_id),
    }
}

/// Load the training file, build and validate the frozen store
fn build_store(train: &Path) -> Result<Arc<RatingStore>> {
    let ratings = parser::load_ratings(train).context("Failed to load training ratings")?;
    let store = Arc::new(RatingStore::from_ratings(ratings));
    store.validate().context("Rating index failed validation")?;
    Ok(store)
}

/// Handle the 'evaluate' command
fn handle_evaluate(train: &Path, test: &Path, output: &Path, json: bool) -> Result<()> {
    println!("Reading {} and {}...", train.display(), test.display());
    let start = Instant::now();
    let (train_ratings, test_ratings) =
        parser::load_train_test(train, test).context("Failed to load rating data")?;
    println!(
        "{} Loaded {} training and {} test records in {:?}",
        "✓".green(),
        train_ratings.len(),
        test_ratings.len(),
        start.elapsed()
    );

    let store = Arc::new(RatingStore::from_ratings(train_ratings));
    store.validate().context("Rating index failed validation")?;
    let (users, movies, count) = store.counts();
    println!(
        "{} Indexed {} ratings from {} users over {} movies",
        "✓".green(),
        count,
        users,
        movies
    );

    let predictor = Predictor::new(store);
    let start = Instant::now();
    let (predictions, report) = evaluate(&predictor, &test_ratings);
    println!(
        "{} Evaluated {} test records in {:?}",
        "✓".green(),
        report.count,
        start.elapsed()
    );

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_predictions(&mut writer, &predictions)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} Wrote predictions to {}", "✓".green(), output.display());

    println!();
    println!("{}", "Evaluation summary:".bold().blue());
    println!("Mean Absolute Error: {:.2}", report.mean_absolute_error);
    println!("Root Mean Squared Error: {:.2}", report.root_mean_squared_error);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(train: &Path, user_id: UserId, movie_id: MovieId) -> Result<()> {
    println!("Reading {}...", train.display());
    let start = Instant::now();
    let store = build_store(train)?;
    let (users, movies, count) = store.counts();
    println!(
        "{} Indexed {} ratings from {} users over {} movies in {:?}",
        "✓".green(),
        count,
        users,
        movies,
        start.elapsed()
    );

    let predictor = Predictor::new(store);
    let estimate = predictor.predict(user_id, movie_id);
    println!(
        "Predicted rating for user {} on movie {}: {}",
        user_id,
        movie_id,
        format!("{:.2}", estimate).bold().green()
    );

    Ok(())
}
