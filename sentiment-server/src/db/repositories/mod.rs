mod sentiment_repository;
mod status_repository;

pub use sentiment_repository::{SentimentRepository, TweetFilter, DEFAULT_TWEET_LIMIT, TOP_REASON_LIMIT};
pub use status_repository::{SqliteStatusStore, StatusStore, STATUS_LIST_CAP};
