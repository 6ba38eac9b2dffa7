//! # Artifact IO
//!
//! Loading and saving of the pipeline's CSV, JSON and text artifacts.
//!
//! Every save goes through a temporary sibling file that is renamed into
//! place once fully written, so a failed stage never leaves a truncated
//! artifact for the next stage to pick up.

use super::record::{
    columns, parse_rating, parse_timestamp, RawReview, RawTable, ReviewRecord, ReviewTable,
    TimeFeatures,
};
use crate::error::{Error, Result};
use crate::insights::TopicCategory;
use crate::sentiment::{SentimentCategory, SentimentScores};
use csv::{ReaderBuilder, StringRecord, Writer};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Loader for review artifacts
pub struct ReviewLoader;

impl ReviewLoader {
    /// Load the raw input CSV
    pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<RawTable> {
        let file = File::open(path.as_ref())?;
        Self::read_raw(file)
    }

    /// Read raw input rows from any reader
    ///
    /// `Text` and `Score` columns are required; `Time` is optional.
    pub fn read_raw<R: Read>(reader: R) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let columns: Vec<String> = headers.iter().map(String::from).collect();

        let text_index = require_column(&columns, columns::TEXT)?;
        let score_index = require_column(&columns, columns::SCORE)?;
        let time_index = find_column(&columns, columns::TIME);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let fields = aligned_fields(&record, columns.len());

            let text = Some(fields[text_index].clone()).filter(|t| !t.is_empty());
            let rating = parse_rating(&fields[score_index]);
            let timestamp = time_index.and_then(|i| parse_timestamp(&fields[i]));

            rows.push(RawReview {
                fields,
                text,
                rating,
                timestamp,
            });
        }

        Ok(RawTable {
            columns,
            text_index,
            has_time: time_index.is_some(),
            rows,
        })
    }

    /// Load a cleaned, scored or categorized artifact
    pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<ReviewTable> {
        let file = File::open(path.as_ref())?;
        Self::read_reviews(file)
    }

    /// Read an intermediate artifact from any reader
    ///
    /// Derived columns are parsed back into typed fields; all other columns
    /// are carried through untouched.
    pub fn read_reviews<R: Read>(reader: R) -> Result<ReviewTable> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let all: Vec<String> = headers.iter().map(String::from).collect();

        let passthrough: Vec<usize> = (0..all.len())
            .filter(|&i| !columns::is_derived(&all[i]))
            .collect();
        let columns: Vec<String> = passthrough.iter().map(|&i| all[i].clone()).collect();

        let text_index = require_column(&all, columns::TEXT)?;
        let score_index = require_column(&all, columns::SCORE)?;
        let time_index = find_column(&all, columns::TIME);
        let date_index = find_column(&all, columns::DATE);
        let length_index = find_column(&all, columns::REVIEW_LENGTH);
        let words_index = find_column(&all, columns::WORD_COUNT);
        let topic_index = find_column(&all, columns::AI_CATEGORY);
        let sentiment_indices = SentimentColumns::locate(&all)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let cells = aligned_fields(&record, all.len());

            let text = cells[text_index].clone();
            let rating = parse_rating(&cells[score_index]).ok_or_else(|| {
                Error::invalid_value(columns::SCORE, row, &cells[score_index])
            })?;

            let mut review = ReviewRecord::new(text, rating);
            review.fields = passthrough.iter().map(|&i| cells[i].clone()).collect();
            review.timestamp = time_index.and_then(|i| parse_timestamp(&cells[i]));
            review.time = match date_index {
                Some(i) if !cells[i].is_empty() => Some(
                    TimeFeatures::parse(&cells[i])
                        .ok_or_else(|| Error::invalid_value(columns::DATE, row, &cells[i]))?,
                ),
                _ => review.timestamp.and_then(TimeFeatures::from_timestamp),
            };
            if let Some(i) = length_index {
                review.review_length = parse_cell(&cells[i], columns::REVIEW_LENGTH, row)?;
            }
            if let Some(i) = words_index {
                review.word_count = parse_cell(&cells[i], columns::WORD_COUNT, row)?;
            }
            if let Some(indices) = &sentiment_indices {
                review.scores = indices.parse(&cells, row)?;
            }
            if let Some(i) = topic_index {
                if !cells[i].is_empty() {
                    let topic: TopicCategory = cells[i]
                        .parse()
                        .map_err(|_| Error::invalid_value(columns::AI_CATEGORY, row, &cells[i]))?;
                    review.topic = Some(topic);
                }
            }
            records.push(review);
        }

        let has_time = time_index.is_some() || date_index.is_some();
        Ok(ReviewTable {
            columns,
            has_time,
            records,
        })
    }

    /// Save a review table as CSV
    pub fn save_reviews<P: AsRef<Path>>(table: &ReviewTable, path: P) -> Result<()> {
        write_atomically(path.as_ref(), |file| Self::write_reviews(table, file))
    }

    /// Write a review table as CSV to any writer
    ///
    /// Pass-through columns come first in their original order (with the
    /// normalized text substituted into `Text`), followed by the derived
    /// columns each stage has added.
    pub fn write_reviews<W: Write>(table: &ReviewTable, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        let text_index = table.columns.iter().position(|c| c == columns::TEXT);
        let scored = table.is_scored();
        let categorized = table.is_categorized();

        let mut header: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        if text_index.is_none() {
            header.push(columns::TEXT);
            header.push(columns::SCORE);
        }
        if table.has_time {
            header.extend(columns::TIME_FEATURES);
        }
        header.push(columns::REVIEW_LENGTH);
        header.push(columns::WORD_COUNT);
        if scored {
            header.extend(columns::SENTIMENT);
        }
        if categorized {
            header.push(columns::AI_CATEGORY);
        }
        writer.write_record(&header)?;

        for record in &table.records {
            let mut row: Vec<String> = Vec::with_capacity(header.len());
            match text_index {
                Some(index) => {
                    row.extend(record.fields.iter().cloned());
                    row.resize(table.columns.len(), String::new());
                    row[index] = record.text.clone();
                }
                None => {
                    row.extend(record.fields.iter().cloned());
                    row.resize(table.columns.len(), String::new());
                    row.push(record.text.clone());
                    row.push(record.rating.to_string());
                }
            }
            if table.has_time {
                match &record.time {
                    Some(time) => {
                        row.push(time.date_string());
                        row.push(time.year().to_string());
                        row.push(time.month().to_string());
                        row.push(time.year_month());
                    }
                    None => row.extend(std::iter::repeat(String::new()).take(4)),
                }
            }
            row.push(record.review_length.to_string());
            row.push(record.word_count.to_string());
            if scored {
                match &record.scores {
                    Some(s) => {
                        row.push(s.compound.to_string());
                        row.push(s.positive.to_string());
                        row.push(s.negative.to_string());
                        row.push(s.neutral.to_string());
                        row.push(s.polarity.to_string());
                        row.push(s.subjectivity.to_string());
                        row.push(s.category.to_string());
                    }
                    None => row.extend(std::iter::repeat(String::new()).take(7)),
                }
            }
            if categorized {
                row.push(record.topic.map(|t| t.to_string()).unwrap_or_default());
            }
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Save any serializable value as pretty JSON
    pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
        write_atomically(path.as_ref(), |file| {
            serde_json::to_writer_pretty(&mut *file, value)?;
            Ok(())
        })
    }

    /// Save a plain-text report
    pub fn save_text<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
        write_atomically(path.as_ref(), |file| {
            file.write_all(text.as_bytes())?;
            Ok(())
        })
    }
}

/// Positions of the seven sentiment columns
struct SentimentColumns {
    compound: usize,
    positive: usize,
    negative: usize,
    neutral: usize,
    polarity: usize,
    subjectivity: usize,
    category: Option<usize>,
}

impl SentimentColumns {
    /// `None` when the artifact has not been scored yet
    fn locate(all: &[String]) -> Result<Option<Self>> {
        let Some(compound) = find_column(all, columns::VADER_COMPOUND) else {
            return Ok(None);
        };
        Ok(Some(Self {
            compound,
            positive: require_column(all, columns::VADER_POS)?,
            negative: require_column(all, columns::VADER_NEG)?,
            neutral: require_column(all, columns::VADER_NEU)?,
            polarity: require_column(all, columns::TEXTBLOB_POLARITY)?,
            subjectivity: require_column(all, columns::TEXTBLOB_SUBJECTIVITY)?,
            category: find_column(all, columns::SENTIMENT_CATEGORY),
        }))
    }

    fn parse(&self, cells: &[String], row: usize) -> Result<Option<SentimentScores>> {
        if cells[self.compound].is_empty() {
            return Ok(None);
        }
        let compound: f64 = parse_cell(&cells[self.compound], columns::VADER_COMPOUND, row)?;
        let category = match self.category {
            Some(i) if !cells[i].is_empty() => cells[i]
                .parse::<SentimentCategory>()
                .map_err(|_| Error::invalid_value(columns::SENTIMENT_CATEGORY, row, &cells[i]))?,
            _ => SentimentCategory::from_compound(compound),
        };
        Ok(Some(SentimentScores {
            compound,
            positive: parse_cell(&cells[self.positive], columns::VADER_POS, row)?,
            negative: parse_cell(&cells[self.negative], columns::VADER_NEG, row)?,
            neutral: parse_cell(&cells[self.neutral], columns::VADER_NEU, row)?,
            polarity: parse_cell(&cells[self.polarity], columns::TEXTBLOB_POLARITY, row)?,
            subjectivity: parse_cell(
                &cells[self.subjectivity],
                columns::TEXTBLOB_SUBJECTIVITY,
                row,
            )?,
            category,
        }))
    }
}

fn find_column(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c == name)
}

fn require_column(columns: &[String], name: &str) -> Result<usize> {
    find_column(columns, name).ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Pad or truncate a CSV record to the header width
fn aligned_fields(record: &StringRecord, width: usize) -> Vec<String> {
    let mut fields: Vec<String> = record.iter().take(width).map(String::from).collect();
    fields.resize(width, String::new());
    fields
}

fn parse_cell<T: std::str::FromStr>(value: &str, column: &str, row: usize) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_value(column, row, value))
}

/// Write to `path.tmp`, then rename over `path`
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    let outcome = File::create(&tmp)
        .map_err(Error::from)
        .and_then(|mut file| {
            write(&mut file)?;
            file.sync_all()?;
            Ok(())
        });
    match outcome {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RAW: &str = "\
Id,ProductId,Score,Time,Summary,Text
1,B001,5,1303862400,Great,\"  This coffee is GREAT, will buy again  \"
2,B002,,1303862400,Meh,missing score here for sure
3,B003,2,,Bad,\"Arrived late and the box was crushed\"
";

    #[test]
    fn test_read_raw() {
        let table = ReviewLoader::read_raw(RAW.as_bytes()).unwrap();
        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.text_index, 5);
        assert!(table.has_time);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].rating, Some(5));
        assert_eq!(table.rows[0].timestamp, Some(1_303_862_400));
        assert_eq!(table.rows[1].rating, None);
        assert_eq!(table.rows[2].timestamp, None);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Id,Summary,Text\n1,Great,some text\n";
        let err = ReviewLoader::read_raw(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Score"));
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_save_and_load_reviews() {
        let mut first = ReviewRecord::new("this coffee is great, will buy again", 5)
            .with_timestamp(1_303_862_400)
            .with_topic(TopicCategory::TasteFlavor);
        first.fields = vec!["1".into(), "5".into(), "1303862400".into(), "old".into()];
        first.scores = Some(SentimentScores {
            compound: 0.6249,
            positive: 0.361,
            negative: 0.0,
            neutral: 0.639,
            polarity: 0.8,
            subjectivity: 0.75,
            category: SentimentCategory::Positive,
        });
        let mut second = ReviewRecord::new("arrived late and the box was crushed", 2);
        second.fields = vec!["3".into(), "2".into(), String::new(), "old".into()];

        let table = ReviewTable {
            columns: vec!["Id".into(), "Score".into(), "Time".into(), "Text".into()],
            has_time: true,
            records: vec![first, second],
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("reviews.csv");
        ReviewLoader::save_reviews(&table, &path).unwrap();
        assert!(!dir.path().join("nested").join("reviews.csv.tmp").exists());

        let loaded = ReviewLoader::load_reviews(&path).unwrap();
        assert_eq!(loaded.columns, table.columns);
        assert!(loaded.has_time);
        assert_eq!(loaded.records[0].text, "this coffee is great, will buy again");
        assert_eq!(loaded.records[0].fields[3], "this coffee is great, will buy again");
        assert_eq!(loaded.records[0].time, table.records[0].time);
        assert_eq!(loaded.records[0].scores, table.records[0].scores);
        assert_eq!(loaded.records[0].topic, Some(TopicCategory::TasteFlavor));
        assert_eq!(loaded.records[1].time, None);
        assert_eq!(loaded.records[1].scores, None);
        assert_eq!(loaded.records[1].topic, None);
        assert_eq!(loaded.records[1].review_length, table.records[1].review_length);
    }

    #[test]
    fn test_header_order() {
        let table = ReviewTable {
            columns: vec!["Text".into(), "Score".into()],
            has_time: false,
            records: vec![{
                let mut r = ReviewRecord::new("a perfectly ordinary review text", 3);
                r.fields = vec!["raw".into(), "3".into()];
                r
            }],
        };
        let mut out = Vec::new();
        ReviewLoader::write_reviews(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "Text,Score,review_length,word_count");
    }

    #[test]
    fn test_invalid_derived_value() {
        let csv = "Text,Score,review_length,word_count\nsome review text here,4,abc,4\n";
        let err = ReviewLoader::read_reviews(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref column, .. } if column == "review_length"));
    }

    #[test]
    fn test_save_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        ReviewLoader::save_text("hello", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }
}
