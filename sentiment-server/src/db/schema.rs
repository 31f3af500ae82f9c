/// SQL schema for the status log database
pub const STATUS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS status_checks (
    id TEXT PRIMARY KEY,
    client_name TEXT NOT NULL,
    timestamp TEXT NOT NULL
);
"#;

/// Layout of the externally populated tweets relation.
///
/// The server only ever reads this table; the DDL exists so fixtures and
/// tooling can build datasets with the same shape.
pub const TWEETS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Tweets (
    tweet_id INTEGER PRIMARY KEY,
    airline_sentiment TEXT,
    airline_sentiment_confidence REAL,
    negativereason TEXT,
    negativereason_confidence REAL,
    airline TEXT,
    name TEXT,
    retweet_count INTEGER,
    text TEXT,
    tweet_created TEXT,
    tweet_location TEXT,
    user_timezone TEXT
);
"#;
