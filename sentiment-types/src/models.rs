use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// Dataset-wide sentiment counts and percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total_tweets: i64,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineSentiment {
    pub airline: String,
    pub total_tweets: i64,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
    /// (positive - negative) / total, in [-1, 1]
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeReason {
    pub reason: String,
    pub count: i64,
    /// Share of all negative tweets, including those without a reason
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetData {
    pub tweet_id: i64,
    pub airline: String,
    pub sentiment: String,
    pub confidence: f64,
    pub text: String,
    pub created: String,
    pub location: Option<String>,
    pub negative_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlinesList {
    pub airlines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    #[serde(with = "datetime_format")]
    pub timestamp: DateTime<Utc>,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_data_keeps_null_location() {
        let tweet = TweetData {
            tweet_id: 7,
            airline: "Delta".to_string(),
            sentiment: "neutral".to_string(),
            confidence: 0.0,
            text: String::new(),
            created: String::new(),
            location: None,
            negative_reason: None,
        };

        let value = serde_json::to_value(&tweet).unwrap();
        assert!(value["location"].is_null());
        assert!(value["negative_reason"].is_null());
        assert_eq!(value["text"], "");
    }

    #[test]
    fn test_status_check_timestamp_format() {
        let check = StatusCheck {
            id: Uuid::new_v4(),
            client_name: "probe".to_string(),
            timestamp: "2024-02-01T10:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&check).unwrap();
        assert!(json.contains("2024-02-01T10:00:00+00:00"));

        let back: StatusCheck = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp, check.timestamp);
    }
}
