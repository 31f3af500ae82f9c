use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    api::ApiResult,
    db::repositories::{SentimentRepository, TweetFilter, DEFAULT_TWEET_LIMIT},
    state::AppState,
};
use sentiment_types::{AirlineSentiment, AirlinesList, NegativeReason, SentimentStats, TweetData};

#[derive(Debug, Deserialize)]
pub struct GetTweetsQuery {
    #[serde(default)]
    airline: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_TWEET_LIMIT
}

impl From<GetTweetsQuery> for TweetFilter {
    fn from(query: GetTweetsQuery) -> Self {
        TweetFilter {
            airline: query.airline,
            sentiment: query.sentiment,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

fn repository(state: &AppState) -> SentimentRepository {
    SentimentRepository::new(state.dataset.clone())
}

/// GET /sentiment/overview - Dataset-wide sentiment statistics
pub async fn get_overview(State(state): State<AppState>) -> ApiResult<Json<SentimentStats>> {
    let stats = repository(&state).overview()?;
    Ok(Json(stats))
}

/// GET /sentiment/airlines - Sentiment breakdown per airline
pub async fn get_airlines(State(state): State<AppState>) -> ApiResult<Json<Vec<AirlineSentiment>>> {
    let breakdown = repository(&state).airline_breakdown()?;
    Ok(Json(breakdown))
}

/// GET /sentiment/negative-reasons - Top negative reasons
pub async fn get_negative_reasons(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NegativeReason>>> {
    let reasons = repository(&state).negative_reasons()?;
    Ok(Json(reasons))
}

/// GET /sentiment/tweets - Tweets with optional airline/sentiment filters
pub async fn get_tweets(
    State(state): State<AppState>,
    Query(query): Query<GetTweetsQuery>,
) -> ApiResult<Json<Vec<TweetData>>> {
    let filter = TweetFilter::from(query);
    let tweets = repository(&state).tweets(&filter)?;
    Ok(Json(tweets))
}

/// GET /sentiment/airlines/list - All airline names
pub async fn get_airlines_list(State(state): State<AppState>) -> ApiResult<Json<AirlinesList>> {
    let airlines = repository(&state).airlines()?;
    Ok(Json(AirlinesList { airlines }))
}
