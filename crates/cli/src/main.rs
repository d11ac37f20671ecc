use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::MovieCatalog;
use recommender::{MovieRecommendation, RecommendOutcome, RecommendationEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CineMatch - find movies similar to one you like
#[derive(Parser)]
#[command(name = "cine-match")]
#[command(about = "Movie recommender using cosine similarity over user ratings", long_about = None)]
struct Cli {
    /// Path to the directory containing movies.csv and ratings.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Number of recommendations to return
    #[arg(short, long, default_value = "5")]
    count: usize,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load data and fit the model (this may take a moment)
    println!("Loading rating dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        MovieCatalog::load_from_files(&cli.data_dir)
            .context("Failed to load the rating dataset")?,
    );
    let engine = RecommendationEngine::fit(catalog.clone())
        .context("Failed to fit the recommendation engine")?;
    let (movies, ratings) = catalog.counts();
    println!(
        "{} Loaded {} movies and {} ratings in {:?}",
        "✓".green(),
        movies,
        ratings,
        start.elapsed()
    );

    // One interactive query: prompt, recommend, print, exit
    let title = prompt_for_title()?;
    match engine.recommend(&title, cli.count)? {
        RecommendOutcome::Recommendations(recs) => print_recommendations(&title, &recs),
        RecommendOutcome::TitleNotFound { query } => {
            println!(
                "{}",
                format!("No movie matching '{}' was found. Check the title and try again.", query)
                    .yellow()
            );
        }
        RecommendOutcome::NoRatings { title } => {
            println!(
                "{}",
                format!("'{}' has no ratings yet, so there is nothing to compare it against.", title)
                    .yellow()
            );
        }
    }

    Ok(())
}

/// Ask the user for a movie title on stdin
fn prompt_for_title() -> Result<String> {
    print!("Enter a movie you like: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the movie title")?;

    Ok(line.trim().to_string())
}

/// Helper function to format and print recommendations
fn print_recommendations(query: &str, recommendations: &[MovieRecommendation]) {
    println!();
    println!(
        "{}",
        format!("Movies similar to '{}':", query).bold().blue()
    );
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - distance: {:.3} (avg {:.1}, {} ratings)",
            (rank + 1).to_string().green(),
            rec.title,
            rec.distance,
            rec.avg_rating,
            rec.rating_count
        );
    }
}
