//! # Pipeline
//!
//! Runs the three stages over the artifacts named in the configuration.
//! Each stage reads the previous stage's file, computes everything in
//! memory and only then writes its own artifacts.

use crate::data::{CleaningReport, ReviewLoader};
use crate::error::{Error, Result};
use crate::insights::{categorize_table, topic_counts, ExecutiveSummary, TopicCategory, TopicReport};
use crate::sentiment::{SentimentCategory, SentimentScorer, SentimentStats};
use crate::utils::{format_thousands, PipelineConfig};
use tracing::{debug, info, warn};

/// Results of the insights stage
#[derive(Debug, Clone)]
pub struct InsightsOutcome {
    pub topics: TopicReport,
    pub summary: ExecutiveSummary,
    /// Category counts over all reviews, most frequent first
    pub categories: Vec<(TopicCategory, usize)>,
}

/// Results of a full run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub cleaning: CleaningReport,
    pub stats: SentimentStats,
    pub insights: InsightsOutcome,
}

/// Stage runner bound to a configuration
pub struct Pipeline {
    config: PipelineConfig,
    scorer: SentimentScorer,
}

impl Pipeline {
    /// Create a pipeline with the built-in sentiment models
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            scorer: SentimentScorer::new(),
        }
    }

    /// Replace the sentiment scorer
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stage 1: raw input → cleaned reviews
    pub fn clean(&self) -> Result<CleaningReport> {
        let paths = &self.config.paths;
        info!("Loading raw reviews from {}", paths.raw_input.display());
        let raw = ReviewLoader::load_raw(&paths.raw_input)?;
        info!("Loaded {} reviews", format_thousands(raw.len()));
        if !raw.has_time {
            warn!("Input has no Time column, skipping date features");
        }

        let (table, report) = self.config.cleaning.cleaner().clean(raw);
        if report.sampled_count < report.input_count {
            info!("Sampled {} reviews", format_thousands(report.sampled_count));
        }
        debug!(
            missing = report.removed_missing,
            duplicates = report.removed_duplicates,
            short = report.removed_short,
            "Cleaning removals"
        );
        info!(
            "Kept {} reviews ({} removed)",
            format_thousands(report.final_count),
            format_thousands(report.removed_total())
        );
        if table.is_empty() {
            warn!("No reviews survived cleaning");
        } else {
            info!("Average review length: {:.0} characters", report.average_length);
            for (rating, count) in report.rating_distribution() {
                debug!("{rating} stars: {}", format_thousands(count));
            }
        }

        ReviewLoader::save_reviews(&table, &paths.clean)?;
        info!("Saved cleaned reviews to {}", paths.clean.display());
        Ok(report)
    }

    /// Stage 2: cleaned reviews → sentiment columns and statistics
    pub fn score(&self) -> Result<SentimentStats> {
        let paths = &self.config.paths;
        let table = ReviewLoader::load_reviews(&paths.clean)?;
        let (valence, pattern) = self.scorer.model_names();
        info!(
            "Scoring {} reviews with {valence} and {pattern}",
            format_thousands(table.len())
        );

        let scored = self.scorer.score(table);
        let stats = SentimentStats::compute(&scored.records)?;

        for category in SentimentCategory::ALL {
            info!(
                "{category}: {} ({:.1}%)",
                format_thousands(stats.count(category)),
                stats.percentage(category)
            );
        }
        info!("Average rating: {:.2}", stats.average_rating);
        if let Some(top) = stats.top_negative_words.first() {
            debug!("Most common negative word: {} ({})", top.word, top.count);
        }

        ReviewLoader::save_reviews(&scored, &paths.with_sentiment)?;
        ReviewLoader::save_json(&stats, &paths.stats)?;
        info!(
            "Saved scored reviews to {} and statistics to {}",
            paths.with_sentiment.display(),
            paths.stats.display()
        );
        Ok(stats)
    }

    /// Stage 3: scored reviews → topic categories, topic report and summary
    pub fn insights(&self) -> Result<InsightsOutcome> {
        let paths = &self.config.paths;
        let table = ReviewLoader::load_reviews(&paths.with_sentiment)?;
        info!("Loaded {} scored reviews", format_thousands(table.len()));
        if !table.is_empty() && !table.is_scored() {
            return Err(Error::MissingColumn("sentiment_category".to_string()));
        }

        let topics = TopicReport::from_table(&table);
        if topics.negative_count == 0 {
            warn!("No negative reviews found, topic report is empty");
        } else {
            info!(
                "Extracted {} topics from {} negative reviews",
                topics.findings.len(),
                format_thousands(topics.negative_count)
            );
        }

        let table = categorize_table(table);
        let categories = topic_counts(&table);
        for (topic, count) in &categories {
            debug!(
                "{topic}: {} ({:.1}%)",
                format_thousands(*count),
                *count as f64 / table.len() as f64 * 100.0
            );
        }

        let summary = ExecutiveSummary::from_records(&table.records)?;

        ReviewLoader::save_text(&topics.to_string(), &paths.topics)?;
        ReviewLoader::save_text(&summary.to_string(), &paths.summary)?;
        ReviewLoader::save_reviews(&table, &paths.final_output)?;
        info!(
            "Saved topics to {}, summary to {} and final dataset to {}",
            paths.topics.display(),
            paths.summary.display(),
            paths.final_output.display()
        );

        Ok(InsightsOutcome {
            topics,
            summary,
            categories,
        })
    }

    /// Run all three stages in order
    pub fn run(&self) -> Result<RunOutcome> {
        let cleaning = self.clean()?;
        let stats = self.score()?;
        let insights = self.insights()?;
        info!("Pipeline complete");
        Ok(RunOutcome {
            cleaning,
            stats,
            insights,
        })
    }
}
