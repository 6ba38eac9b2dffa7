//! Integration tests for Review Insights

use review_insights::{
    // Data
    ReviewCleaner, ReviewLoader, ReviewRecord, ReviewTable,
    // Sentiment
    SentimentCategory, SentimentScorer, SentimentScores, SentimentSignal, SentimentStats,
    // Insights
    categorize, categorize_table, extract_topics, summarize, TopicCategory, TopicReport,
    // Dashboard
    sample_reviews, DashboardFilter, DashboardMetrics,
    // Pipeline
    Error, Pipeline, PipelineConfig,
};

fn scored(text: &str, rating: u8, category: SentimentCategory) -> ReviewRecord {
    ReviewRecord::new(text, rating).with_scores(SentimentScores {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
        polarity: 0.0,
        subjectivity: 0.0,
        category,
    })
}

mod cleaning {
    use super::*;

    #[test]
    fn test_every_row_removed() {
        let csv = "\
Id,Score,Text
1,,a long enough review that has no score
2,4,short text here
3,5,short text here
";
        let raw = ReviewLoader::read_raw(csv.as_bytes()).unwrap();
        let (table, report) = ReviewCleaner::new().clean(raw);

        assert!(table.is_empty());
        assert_eq!(report.removed_missing, 1);
        assert_eq!(report.removed_duplicates, 1);
        assert_eq!(report.removed_short, 1);
        assert_eq!(report.final_count, 0);

        let err = summarize(&table.records).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn test_cleaned_text_invariants() {
        let csv = "\
Score,Text
5,\"  Great Coffee, Would Buy Again  \"
4,\"great coffee, would buy again\"
3,\"  SOME MORE TEXT THAT IS LONG ENOUGH\"
";
        let raw = ReviewLoader::read_raw(csv.as_bytes()).unwrap();
        let (table, _) = ReviewCleaner::new().clean(raw);

        assert_eq!(table.len(), 2);
        for record in &table {
            assert!(record.text.chars().count() > 20);
            assert_eq!(record.text, record.text.trim());
            assert_eq!(record.text, record.text.to_lowercase());
        }
        assert_ne!(table.records[0].text, table.records[1].text);
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let mut csv = String::from("Score,Text\n");
        for i in 0..50 {
            csv.push_str(&format!("4,review number {i} with plenty of text\n"));
        }
        let cleaner = ReviewCleaner::new().with_sample_size(Some(10)).with_seed(42);

        let first = cleaner.clean(ReviewLoader::read_raw(csv.as_bytes()).unwrap()).0;
        let second = cleaner.clean(ReviewLoader::read_raw(csv.as_bytes()).unwrap()).0;
        assert_eq!(first.len(), 10);
        assert_eq!(first, second);
    }
}

mod sentiment {
    use super::*;

    #[test]
    fn test_scorer_labels() {
        let scorer = SentimentScorer::new();
        assert_eq!(
            scorer.score_text("this coffee is great, i love the rich flavor").category,
            SentimentCategory::Positive
        );
        assert_eq!(
            scorer.score_text("awful taste, stale and bland. waste of money").category,
            SentimentCategory::Negative
        );
        assert_eq!(
            scorer.score_text("the package contains twelve cans of soup").category,
            SentimentCategory::Neutral
        );
    }

    #[test]
    fn test_scores_in_range() {
        let scorer = SentimentScorer::new();
        for text in [
            "ABSOLUTELY the best coffee I have ever had!!!",
            "not good, not bad, just kind of there",
            "the worst, most disgusting and horrible purchase ever",
        ] {
            let s = scorer.score_text(text);
            assert!((-1.0..=1.0).contains(&s.compound), "{text}");
            assert!((-1.0..=1.0).contains(&s.polarity), "{text}");
            assert!((0.0..=1.0).contains(&s.subjectivity), "{text}");
            assert!((s.positive + s.negative + s.neutral - 1.0).abs() < 0.01, "{text}");
        }
    }

    #[test]
    fn test_mock_models() {
        let scorer = SentimentScorer::with_models(
            |text: &str| SentimentSignal::new(if text.contains("refund") { -0.5 } else { 0.5 }),
            |_: &str| SentimentSignal::new(0.0),
        );
        let table = scorer.score(ReviewTable::from_records(vec![
            ReviewRecord::new("i want a refund for this one", 1),
            ReviewRecord::new("would order this again soon", 5),
        ]));
        let stats = SentimentStats::compute(&table.records).unwrap();
        assert_eq!(stats.count(SentimentCategory::Negative), 1);
        assert_eq!(stats.count(SentimentCategory::Positive), 1);
        assert_eq!(stats.top_negative_words[0].word, "want");
    }
}

mod insights {
    use super::*;

    #[test]
    fn test_categorize_priority_and_case() {
        assert_eq!(
            categorize("shipping took forever and the quality is poor"),
            TopicCategory::ShippingDelivery
        );
        assert_eq!(categorize("SHIPPING delay"), categorize("shipping delay"));
        assert_eq!(categorize("no keyword in this one"), TopicCategory::Other);
    }

    #[test]
    fn test_topic_report_limits() {
        let records = vec![
            scored("bad quality, late shipping, refund refused", 1, SentimentCategory::Negative),
            scored("too expensive and the box was crushed", 1, SentimentCategory::Negative),
            scored("stale taste, bad value", 2, SentimentCategory::Negative),
            scored("excellent, will buy again", 5, SentimentCategory::Positive),
        ];
        let table = ReviewTable::from_records(records);
        let report = TopicReport::from_table(&table);

        assert_eq!(report.negative_count, 3);
        assert!(report.findings.len() <= 5);
        assert!(report.findings.iter().all(|f| f.prevalence > 0.0));
        assert!(report
            .findings
            .windows(2)
            .all(|w| w[0].prevalence >= w[1].prevalence));
        for line in report.to_string().lines().filter(|l| l.starts_with("Prevalence")) {
            let value = line.trim_start_matches("Prevalence: ").trim_end_matches('%');
            assert_eq!(value.split('.').nth(1).map(str::len), Some(1), "{line}");
        }
    }

    #[test]
    fn test_no_negatives_gives_empty_report() {
        let records = vec![scored("excellent, will buy again", 5, SentimentCategory::Positive)];
        let report = extract_topics(records.iter().filter(|r| r.is_negative()));
        assert!(report.is_empty());
    }

    #[test]
    fn test_summary_distribution() {
        let mut records = Vec::new();
        for _ in 0..60 {
            records.push(scored("lovely coffee with a rich aroma", 5, SentimentCategory::Positive));
        }
        for _ in 0..30 {
            records.push(scored("arrived late and the box was crushed", 2, SentimentCategory::Negative));
        }
        for _ in 0..10 {
            records.push(scored("it is a can of coffee beans", 4, SentimentCategory::Neutral));
        }
        let table = categorize_table(ReviewTable::from_records(records));

        let text = summarize(&table.records).unwrap();
        assert!(text.starts_with("Analysis of 100 customer reviews"));
        assert!(text.contains("60% expressing positive sentiment, 30% negative, and 10% neutral"));
        assert!(text.contains("4.00 out of 5"));
        assert!(text.contains("Shipping/Delivery (100% of negative reviews)"));
    }
}

mod dashboard {
    use super::*;

    #[test]
    fn test_filtered_metrics() {
        let table = ReviewTable::from_records(vec![
            scored("lovely coffee with a rich aroma", 5, SentimentCategory::Positive),
            scored("arrived late and the box was crushed", 1, SentimentCategory::Negative),
            scored("it is a can of coffee beans", 3, SentimentCategory::Neutral),
        ]);
        let filtered = DashboardFilter::new()
            .with_sentiments([SentimentCategory::Negative, SentimentCategory::Neutral])
            .apply(&table);
        let metrics = DashboardMetrics::compute(&table.records, &filtered);

        assert_eq!(metrics.filtered_reviews, 2);
        assert_eq!(metrics.count_delta, -1);
        assert_eq!(metrics.average_rating, Some(2.0));
        assert_eq!(metrics.rating_delta, Some(-1.0));
        assert_eq!(metrics.positive_pct, Some(0.0));
        assert_eq!(metrics.negative_pct, Some(50.0));
    }

    #[test]
    fn test_samples_for_one_sentiment() {
        let table = ReviewTable::from_records(vec![
            scored("lovely coffee with a rich aroma", 5, SentimentCategory::Positive),
            scored("arrived late and the box was crushed", 1, SentimentCategory::Negative),
            scored("it is a can of coffee beans", 3, SentimentCategory::Neutral),
            scored("stale beans and a torn bag, sadly", 2, SentimentCategory::Negative),
        ]);
        let filtered = DashboardFilter::new().apply(&table);

        let picks = sample_reviews(&filtered, Some(SentimentCategory::Negative), 5, 42);
        assert_eq!(picks.len(), 2);
        assert!(picks
            .iter()
            .all(|p| p.sentiment == Some(SentimentCategory::Negative)));

        let all = sample_reviews(&filtered, None, 5, 42);
        assert_eq!(all.len(), 4);
    }
}

mod pipeline {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const RAW: &str = "\
Id,ProductId,Score,Time,Text
1,B001,5,1303862400,\"This coffee is great, I love the rich flavor\"
2,B002,1,1303862400,\"Terrible product, arrived late and the box was crushed\"
3,B003,1,1306454400,\"Awful taste, stale and bland. Waste of money\"
4,B004,3,1306454400,The package contains twelve cans of soup
5,B005,4,1306454400,\"This coffee is great, I love the rich flavor\"
6,B006,,1306454400,\"No score on this one at all, sadly\"
7,B007,5,1306454400,Too short
";

    fn config_in(dir: &std::path::Path) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.paths.raw_input = dir.join("reviews.csv");
        config.paths.clean = dir.join("data/reviews_clean.csv");
        config.paths.with_sentiment = dir.join("data/reviews_with_sentiment.csv");
        config.paths.final_output = dir.join("data/reviews_final.csv");
        config.paths.stats = dir.join("outputs/sentiment_stats.json");
        config.paths.topics = dir.join("outputs/topics_analysis.txt");
        config.paths.summary = dir.join("outputs/executive_summary.txt");
        config.cleaning.sample_size = None;
        config
    }

    #[test]
    fn test_full_run() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.paths.raw_input, RAW).unwrap();

        let outcome = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(outcome.cleaning.input_count, 7);
        assert_eq!(outcome.cleaning.final_count, 4);
        assert_eq!(outcome.cleaning.rating_counts, [2, 0, 1, 0, 1]);
        assert_eq!(outcome.stats.total_reviews, 4);
        assert_eq!(outcome.stats.count(SentimentCategory::Positive), 1);
        assert_eq!(outcome.stats.count(SentimentCategory::Negative), 2);
        assert_eq!(outcome.stats.count(SentimentCategory::Neutral), 1);

        let stats: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&config.paths.stats).unwrap()).unwrap();
        assert_eq!(stats["total_reviews"], 4);
        assert_eq!(stats["sentiment_distribution"]["Negative"]["count"], 2);
        assert_eq!(stats["average_rating"], 2.5);

        let topics = fs::read_to_string(&config.paths.topics).unwrap();
        assert!(topics.starts_with("TOPIC 1: Product Quality\n"));
        assert_eq!(topics.matches("TOPIC ").count(), 5);

        let summary = fs::read_to_string(&config.paths.summary).unwrap();
        assert!(summary.starts_with("Analysis of 4 customer reviews reveals a rating average of 2.50"));
        assert!(summary.contains("25% expressing positive sentiment, 50% negative, and 25% neutral"));
        assert!(summary.contains("Shipping/Delivery (100% of negative reviews)"));

        let final_csv = fs::read_to_string(&config.paths.final_output).unwrap();
        let header = final_csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Id,ProductId,Score,Time,Text,Date,Year,Month,YearMonth,review_length,word_count,\
             vader_compound,vader_pos,vader_neg,vader_neu,textblob_polarity,\
             textblob_subjectivity,sentiment_category,ai_category"
        );

        let table = ReviewLoader::load_reviews(&config.paths.final_output).unwrap();
        let topics: Vec<Option<TopicCategory>> = table.iter().map(|r| r.topic).collect();
        assert_eq!(
            topics,
            vec![
                Some(TopicCategory::TasteFlavor),
                Some(TopicCategory::ShippingDelivery),
                Some(TopicCategory::ShippingDelivery),
                Some(TopicCategory::ShippingDelivery),
            ]
        );
        assert_eq!(table.records[0].text, "this coffee is great, i love the rich flavor");
        assert_eq!(table.records[0].time.unwrap().year_month(), "2011-04");
    }

    #[test]
    fn test_run_with_mock_scorer() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.paths.raw_input, RAW).unwrap();

        let scorer = SentimentScorer::with_models(
            |text: &str| SentimentSignal::new(if text.contains("coffee") { 0.9 } else { -0.9 }),
            |_: &str| SentimentSignal::new(0.0),
        );
        let pipeline = Pipeline::new(config).with_scorer(scorer);
        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome.stats.count(SentimentCategory::Positive), 1);
        assert_eq!(outcome.stats.count(SentimentCategory::Negative), 3);
        assert_eq!(outcome.stats.count(SentimentCategory::Neutral), 0);

        let summary = fs::read_to_string(&pipeline.config().paths.summary).unwrap();
        assert!(summary.contains("25% expressing positive sentiment, 75% negative, and 0% neutral"));
    }

    #[test]
    fn test_empty_clean_stops_at_scoring() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(
            &config.paths.raw_input,
            "Score,Text\n,a long enough review without a score\n4,too short\n",
        )
        .unwrap();

        let err = Pipeline::new(config.clone()).run().unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
        assert!(config.paths.clean.exists());
        assert!(!config.paths.stats.exists());
        assert!(!config.paths.with_sentiment.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let err = Pipeline::new(config).clean().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_insights_requires_sentiment() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            &config.paths.with_sentiment,
            "Score,Text\n4,a perfectly ordinary review text\n",
        )
        .unwrap();

        let err = Pipeline::new(config.clone()).insights().unwrap_err();
        assert!(err.is_schema_error());
        assert!(!config.paths.summary.exists());
    }
}
