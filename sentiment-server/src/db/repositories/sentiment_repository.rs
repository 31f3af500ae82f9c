use anyhow::{Context, Result};
use rusqlite::types::Value;
use std::collections::HashMap;

use sentiment_types::{
    AirlineSentiment, NegativeReason, Sentiment, SentimentStats, TweetData,
};

use crate::db::Dataset;
use crate::stats::{percentage, sentiment_score};

/// Page size used when the caller does not supply one
pub const DEFAULT_TWEET_LIMIT: i64 = 50;

/// Number of reasons returned by the negative-reason ranking
pub const TOP_REASON_LIMIT: i64 = 10;

/// Filters and page window for tweet listing.
///
/// `limit` and `offset` go into the query as given, without clamping.
#[derive(Debug, Clone)]
pub struct TweetFilter {
    pub airline: Option<String>,
    pub sentiment: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for TweetFilter {
    fn default() -> Self {
        Self {
            airline: None,
            sentiment: None,
            limit: DEFAULT_TWEET_LIMIT,
            offset: 0,
        }
    }
}

/// Per-label counters; labels outside the known three are dropped
#[derive(Debug, Default, Clone, Copy)]
struct SentimentCounts {
    positive: i64,
    negative: i64,
    neutral: i64,
}

impl SentimentCounts {
    fn record(&mut self, label: Option<&str>, count: i64) {
        match label.and_then(Sentiment::parse) {
            Some(Sentiment::Positive) => self.positive += count,
            Some(Sentiment::Negative) => self.negative += count,
            Some(Sentiment::Neutral) => self.neutral += count,
            None => {}
        }
    }

    fn total(&self) -> i64 {
        self.positive + self.negative + self.neutral
    }
}

/// Highest count first, ties by reason name, at most `limit` entries
fn rank_reasons(mut reasons: Vec<(String, i64)>, limit: usize) -> Vec<(String, i64)> {
    reasons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    reasons.truncate(limit);
    reasons
}

/// Aggregation queries over the tweets dataset
pub struct SentimentRepository {
    dataset: Dataset,
}

impl SentimentRepository {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Dataset-wide sentiment counts and percentages
    pub fn overview(&self) -> Result<SentimentStats> {
        let conn = self.dataset.open()?;

        let total: i64 = conn
            .query_row("SELECT COUNT(*) AS total FROM Tweets", [], |row| {
                row.get("total")
            })
            .context("Failed to count tweets")?;

        let mut stmt = conn.prepare(
            "SELECT airline_sentiment, COUNT(*) AS count
             FROM Tweets
             GROUP BY airline_sentiment",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>("airline_sentiment")?,
                    row.get::<_, i64>("count")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to group tweets by sentiment")?;

        let mut counts = SentimentCounts::default();
        for (label, count) in rows {
            counts.record(label.as_deref(), count);
        }

        tracing::debug!(
            total,
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            "Computed sentiment overview"
        );

        Ok(SentimentStats {
            total_tweets: total,
            positive: counts.positive,
            negative: counts.negative,
            neutral: counts.neutral,
            positive_percentage: percentage(counts.positive, total),
            negative_percentage: percentage(counts.negative, total),
            neutral_percentage: percentage(counts.neutral, total),
        })
    }

    /// Sentiment breakdown per airline, busiest airline first
    pub fn airline_breakdown(&self) -> Result<Vec<AirlineSentiment>> {
        let conn = self.dataset.open()?;
        let mut stmt = conn.prepare(
            "SELECT airline, airline_sentiment, COUNT(*) AS count
             FROM Tweets
             WHERE airline IS NOT NULL
             GROUP BY airline, airline_sentiment
             ORDER BY airline",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>("airline")?,
                    row.get::<_, Option<String>>("airline_sentiment")?,
                    row.get::<_, i64>("count")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to group tweets by airline")?;

        // Keep airlines in the order the grouping pass produced them
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut grouped: Vec<(String, SentimentCounts)> = Vec::new();
        for (airline, label, count) in rows {
            let slot = match index.get(&airline) {
                Some(&slot) => slot,
                None => {
                    index.insert(airline.clone(), grouped.len());
                    grouped.push((airline, SentimentCounts::default()));
                    grouped.len() - 1
                }
            };
            grouped[slot].1.record(label.as_deref(), count);
        }

        let mut breakdown: Vec<AirlineSentiment> = grouped
            .into_iter()
            .map(|(airline, counts)| {
                let total = counts.total();
                AirlineSentiment {
                    airline,
                    total_tweets: total,
                    positive: counts.positive,
                    negative: counts.negative,
                    neutral: counts.neutral,
                    sentiment_score: sentiment_score(counts.positive, counts.negative, total),
                }
            })
            .collect();

        // Stable: equal totals stay in grouping order
        breakdown.sort_by(|a, b| b.total_tweets.cmp(&a.total_tweets));

        Ok(breakdown)
    }

    /// Most frequent negative reasons with their share of all negative tweets
    pub fn negative_reasons(&self) -> Result<Vec<NegativeReason>> {
        let conn = self.dataset.open()?;
        let negative = Sentiment::Negative.as_str();

        let mut stmt = conn.prepare(
            "SELECT negativereason, COUNT(*) AS count
             FROM Tweets
             WHERE airline_sentiment = ?1
               AND negativereason IS NOT NULL
               AND negativereason != ''
             GROUP BY negativereason",
        )?;

        let grouped = stmt
            .query_map([negative], |row| {
                Ok((
                    row.get::<_, String>("negativereason")?,
                    row.get::<_, i64>("count")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to group negative reasons")?;
        let ranked = rank_reasons(grouped, TOP_REASON_LIMIT as usize);

        // Denominator includes negative tweets without a reason
        let total_negative: i64 = conn
            .query_row(
                "SELECT COUNT(*) AS total FROM Tweets WHERE airline_sentiment = ?1",
                [negative],
                |row| row.get("total"),
            )
            .context("Failed to count negative tweets")?;

        Ok(ranked
            .into_iter()
            .map(|(reason, count)| NegativeReason {
                percentage: percentage(count, total_negative),
                reason,
                count,
            })
            .collect())
    }

    /// Page of tweets matching the filter, highest id first
    pub fn tweets(&self, filter: &TweetFilter) -> Result<Vec<TweetData>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        // Empty strings count as "no filter"
        if let Some(airline) = filter.airline.as_deref().filter(|a| !a.is_empty()) {
            conditions.push("airline = ?");
            params.push(Value::Text(airline.to_string()));
        }
        if let Some(sentiment) = filter.sentiment.as_deref().filter(|s| !s.is_empty()) {
            conditions.push("airline_sentiment = ?");
            params.push(Value::Text(sentiment.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        params.push(Value::Integer(filter.limit));
        params.push(Value::Integer(filter.offset));

        let query = format!(
            "SELECT tweet_id, airline, airline_sentiment, airline_sentiment_confidence,
                    text, tweet_created, tweet_location, negativereason
             FROM Tweets
             {}
             ORDER BY tweet_id DESC
             LIMIT ? OFFSET ?",
            where_clause
        );

        tracing::debug!(?filter, "Listing tweets");

        let conn = self.dataset.open()?;
        let mut stmt = conn.prepare(&query)?;

        let tweets = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                Ok(TweetData {
                    tweet_id: row.get("tweet_id")?,
                    airline: row.get("airline")?,
                    sentiment: row.get("airline_sentiment")?,
                    confidence: row
                        .get::<_, Option<f64>>("airline_sentiment_confidence")?
                        .unwrap_or(0.0),
                    text: row.get::<_, Option<String>>("text")?.unwrap_or_default(),
                    created: row
                        .get::<_, Option<String>>("tweet_created")?
                        .unwrap_or_default(),
                    location: row.get("tweet_location")?,
                    negative_reason: row.get("negativereason")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list tweets")?;

        Ok(tweets)
    }

    /// Every distinct airline name, ascending
    pub fn airlines(&self) -> Result<Vec<String>> {
        let conn = self.dataset.open()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT airline FROM Tweets WHERE airline IS NOT NULL ORDER BY airline",
        )?;

        let airlines = stmt
            .query_map([], |row| row.get::<_, String>("airline"))?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list airlines")?;

        Ok(airlines)
    }
}
