use anyhow::{Context, Result};
use catalog::{CatalogId, CatalogStore};
use clap::{Parser, Subcommand};
use colored::Colorize;
use server::{Config, RecommendationService, RecommendedMovie};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// SimRecs - similarity-matrix movie recommendation lookup
#[derive(Parser)]
#[command(name = "sim-recs")]
#[command(about = "Movie recommendations from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Path to the directory containing movies.dat and similarity.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movies similar to a title
    Recommend {
        /// Exact movie title to look up (case-sensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Also resolve poster URLs from the TMDB API
        #[arg(long)]
        posters: bool,
    },

    /// Search for titles by substring
    Search {
        /// Title fragment to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List every title in the catalog
    Titles,

    /// Run benchmark to test ranking performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // One-time startup load; any failure here is fatal
    println!("Loading catalog artifacts from {}...", cli.data_dir.display());
    let start = Instant::now();
    let store = Arc::new(
        CatalogStore::load_from_files(&cli.data_dir)
            .context("Failed to load catalog artifacts")?,
    );
    println!("{} Loaded {} movies in {:?}", "✓".green(), store.len(), start.elapsed());

    let config = Config::from_env().context("Failed to load configuration")?;
    let service = RecommendationService::new(store.clone(), &config)
        .context("Failed to build recommendation service")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            posters,
        } => handle_recommend(service, title, limit, posters).await?,
        Commands::Search { title } => handle_search(&store, title)?,
        Commands::Titles => handle_titles(&store),
        Commands::Benchmark { requests } => handle_benchmark(service, &store, requests).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: RecommendationService,
    title: String,
    limit: usize,
    posters: bool,
) -> Result<()> {
    if posters {
        let recs = service.recommend_with_posters(&title, limit).await?;
        print_recommendations_with_posters(&title, &recs);
    } else {
        let recs = service.recommend(&title, limit)?;
        println!("{}", format!("Movies similar to '{}':", title).bold().blue());
        for (i, rec) in recs.iter().enumerate() {
            println!(
                "{}. {} (catalog id {}) - Score: {:.3}",
                (i + 1).to_string().green(),
                rec.title,
                rec.catalog_id,
                rec.score
            );
        }
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &Arc<CatalogStore>, title: String) -> Result<()> {
    let title_lower = title.to_lowercase();
    let mut matches: Vec<(CatalogId, String, usize)> = Vec::new();

    for row in 0..store.len() {
        if let Some(movie) = store.movie(row) {
            let movie_title_lower = movie.title.to_lowercase();

            if movie_title_lower == title_lower {
                // Exact match
                matches.push((movie.catalog_id, movie.title.clone(), 0));
            } else if movie_title_lower.contains(&title_lower) {
                // Substring match
                matches.push((movie.catalog_id, movie.title.clone(), 1));
            }
        }
    }

    // Sort by relevance (exact match first, then contains), then title
    matches.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.1.cmp(&b.1)));

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (catalog_id, movie_title, _) in matches.iter().take(20) {
        println!("{}: {}", catalog_id, movie_title);
    }
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(store: &Arc<CatalogStore>) {
    println!("{}", "Catalog titles:".bold().blue());
    for title in store.titles() {
        println!("{}", title);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: RecommendationService,
    store: &Arc<CatalogStore>,
    requests: usize,
) -> Result<()> {
    let titles: Vec<String> = store.titles().map(|t| t.to_string()).collect();
    if titles.is_empty() {
        anyhow::bail!("Catalog is empty, nothing to benchmark");
    }

    // Pick a random known title per request
    let picks: Vec<String> = (0..requests)
        .map(|_| titles[rand::random::<u32>() as usize % titles.len()].clone())
        .collect();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for title in picks {
        let service = service.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            service.recommend(&title, 10)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations with artwork
fn print_recommendations_with_posters(title: &str, recs: &[RecommendedMovie]) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    for (i, rec) in recs.iter().enumerate() {
        println!(
            "{}. {} (catalog id {}) - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.catalog_id,
            rec.score
        );
        println!("   Poster: {}", rec.poster_url);
    }
}
