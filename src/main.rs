//! Review Insights - customer review analysis pipeline
//!
//! Runs the cleaning, sentiment and insights stages over CSV artifacts and
//! prints the dashboard metrics for the final dataset.
//!
//! # Examples
//!
//! ```bash
//! review-insights run
//! review-insights clean --input data/reviews.csv --all
//! review-insights dashboard --sentiment negative --max-rating 2
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use review_insights::utils::format_thousands;
use review_insights::{
    load_config, sample_reviews, DashboardFilter, DashboardMetrics, Pipeline, PipelineConfig,
    ReviewLoader, SentimentCategory,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "review-insights")]
#[command(about = "Sentiment and topic insights from customer reviews", version)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample, deduplicate and normalize the raw reviews
    Clean {
        /// Raw review CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cleaned review CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of reviews to sample
        #[arg(short, long, conflicts_with = "all")]
        sample_size: Option<usize>,

        /// Keep every review instead of sampling
        #[arg(long)]
        all: bool,
    },

    /// Score sentiment and write statistics
    Sentiment {
        /// Cleaned review CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Scored review CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Categorize reviews, extract topics and write the executive summary
    Insights {
        /// Scored review CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Final review CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run all stages in order
    Run,

    /// Print metrics for a filtered view of the final dataset
    Dashboard {
        /// Final review CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sentiment categories to include (repeatable, default all)
        #[arg(long = "sentiment")]
        sentiments: Vec<SentimentCategory>,

        /// Lowest star rating to include
        #[arg(long, default_value = "1")]
        min_rating: u8,

        /// Highest star rating to include
        #[arg(long, default_value = "5")]
        max_rating: u8,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Number of sample reviews to show
        #[arg(long, default_value = "5")]
        samples: usize,

        /// Only sample reviews of this sentiment
        #[arg(long)]
        sample_sentiment: Option<SentimentCategory>,

        /// Seed for picking sample reviews
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// Load the configuration file and apply command line overrides
fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = resolve_config(&cli)?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            sample_size,
            all,
        } => {
            if let Some(path) = input {
                config.paths.raw_input = path;
            }
            if let Some(path) = output {
                config.paths.clean = path;
            }
            if all {
                config.cleaning.sample_size = None;
            } else if sample_size.is_some() {
                config.cleaning.sample_size = sample_size;
            }
            config.validate()?;

            let report = Pipeline::new(config).clean().context("Cleaning failed")?;
            println!("\nCleaning Summary");
            println!("================");
            println!("Input reviews:      {}", format_thousands(report.input_count));
            println!("After sampling:     {}", format_thousands(report.sampled_count));
            println!("Missing removed:    {}", format_thousands(report.removed_missing));
            println!("Duplicates removed: {}", format_thousands(report.removed_duplicates));
            println!("Too short removed:  {}", format_thousands(report.removed_short));
            println!("Final reviews:      {}", format_thousands(report.final_count));
            if report.final_count > 0 {
                println!("Average length:     {:.0} characters", report.average_length);
                println!("\nRating Distribution");
                for (rating, count) in report.rating_distribution() {
                    println!("  {rating} stars: {}", format_thousands(count));
                }
            }
        }

        Commands::Sentiment { input, output } => {
            if let Some(path) = input {
                config.paths.clean = path;
            }
            if let Some(path) = output {
                config.paths.with_sentiment = path;
            }

            let stats = Pipeline::new(config).score().context("Sentiment scoring failed")?;
            println!("\nSentiment Distribution");
            println!("======================");
            for category in SentimentCategory::ALL {
                println!(
                    "{:<9} {:>7} ({:.1}%)",
                    category.to_string(),
                    format_thousands(stats.count(category)),
                    stats.percentage(category)
                );
            }
            println!("\nAverage rating: {:.2}", stats.average_rating);
            let words: Vec<&str> = stats
                .top_negative_words
                .iter()
                .take(10)
                .map(|w| w.word.as_str())
                .collect();
            if !words.is_empty() {
                println!("Top negative words: {}", words.join(", "));
            }
        }

        Commands::Insights { input, output } => {
            if let Some(path) = input {
                config.paths.with_sentiment = path;
            }
            if let Some(path) = output {
                config.paths.final_output = path;
            }

            let outcome = Pipeline::new(config).insights().context("Insights failed")?;
            if !outcome.topics.is_empty() {
                println!("\nDISCOVERED TOPICS");
                println!("=================");
                println!("{}", outcome.topics);
            }
            println!("\nEXECUTIVE SUMMARY");
            println!("=================");
            println!("{}", outcome.summary);
        }

        Commands::Run => {
            let outcome = Pipeline::new(config).run().context("Pipeline failed")?;
            println!("\nEXECUTIVE SUMMARY");
            println!("=================");
            println!("{}", outcome.insights.summary);
        }

        Commands::Dashboard {
            input,
            sentiments,
            min_rating,
            max_rating,
            from,
            to,
            samples,
            sample_sentiment,
            seed,
        } => {
            let path = input.unwrap_or_else(|| config.paths.final_output.clone());
            let table = ReviewLoader::load_reviews(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            info!("Loaded {} reviews", format_thousands(table.len()));

            let mut filter = DashboardFilter::new()
                .with_rating_range(min_rating, max_rating)
                .with_date_range(from, to);
            if !sentiments.is_empty() {
                filter = filter.with_sentiments(sentiments);
            }
            let filtered = filter.apply(&table);
            let metrics = DashboardMetrics::compute(&table.records, &filtered);
            print_metrics(&metrics);

            println!("\nExecutive Summary");
            println!("=================");
            match std::fs::read_to_string(&config.paths.summary) {
                Ok(summary) => println!("{summary}"),
                Err(_) => warn!(
                    "Executive summary not found at {}, run the insights stage first",
                    config.paths.summary.display()
                ),
            }

            let picks = sample_reviews(&filtered, sample_sentiment, samples, seed);
            if picks.is_empty() {
                println!("\nNo reviews match the current filters");
            } else {
                println!("\nSample Reviews");
                println!("==============");
                for pick in picks {
                    let sentiment = pick.sentiment.map_or("-".to_string(), |s| s.to_string());
                    println!("[{}/5 {}] {}", pick.rating, sentiment, pick.text);
                    if let Some(topic) = pick.topic {
                        println!("  Category: {topic}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_metrics(metrics: &DashboardMetrics) {
    let opt = |value: Option<f64>, precision: usize| {
        value.map_or("n/a".to_string(), |v| format!("{v:.precision$}"))
    };

    println!("\nKey Metrics");
    println!("===========");
    println!(
        "Total reviews:      {} ({} from total)",
        format_thousands(metrics.filtered_reviews),
        metrics.count_delta
    );
    println!(
        "Average rating:     {}/5 ({} vs overall)",
        opt(metrics.average_rating, 2),
        opt(metrics.rating_delta, 2)
    );
    println!("Positive sentiment: {}%", opt(metrics.positive_pct, 1));
    println!("Negative sentiment: {}%", opt(metrics.negative_pct, 1));
    println!("Avg words/review:   {}", opt(metrics.average_word_count, 0));
    println!("Avg sentiment:      {}", opt(metrics.average_compound, 2));
    if let Some(rating) = metrics.most_common_rating {
        println!("Most common rating: {rating}/5");
    }

    println!("\nSentiment Distribution");
    for (sentiment, count) in &metrics.sentiment_distribution {
        println!("  {:<8} {}", sentiment.to_string(), format_thousands(*count));
    }

    println!("\nRating Distribution");
    for (rating, count) in &metrics.rating_distribution {
        println!("  {rating} stars: {}", format_thousands(*count));
    }

    if !metrics.top_topics.is_empty() {
        println!("\nTop Customer Topics");
        for (topic, count) in &metrics.top_topics {
            println!("  {topic}: {}", format_thousands(*count));
        }
    }

    if !metrics.sentiment_trend.is_empty() {
        println!("\nSentiment Trend");
        for point in &metrics.sentiment_trend {
            println!("  {} {:<8} {}", point.year_month, point.sentiment.to_string(), point.count);
        }
    }
}
