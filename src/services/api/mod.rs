//! Remote API abstraction
//!
//! The feed and match list only talk to the web application through these
//! traits. Every call returns an explicit `AppResult`; callers decide whether
//! a failure is logged, surfaced, or ignored.
use crate::{
    error::AppResult,
    models::{Candidate, InteractionKind, InteractionOutcome, InteractionRecord, UserId},
};

pub mod http;
pub mod request_id;

pub use http::HttpApiClient;

/// Calls backing the recommendation feed
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// `GET /api/check_recommendations`
    ///
    /// Returns the batch the server already computed for this user, or an
    /// empty list when a fresh one must be generated.
    async fn check_recommendations(&self) -> AppResult<Vec<Candidate>>;

    /// `POST /api/recommendations`
    ///
    /// The server consumes `interactions` and excludes `seen_user_ids` from the
    /// new batch.
    async fn fetch_recommendations(
        &self,
        seen_user_ids: &[UserId],
        interactions: &[InteractionRecord],
    ) -> AppResult<Vec<Candidate>>;

    /// `POST /record_interaction`
    async fn record_interaction(
        &self,
        recommendation_id: UserId,
        interaction_type: InteractionKind,
    ) -> AppResult<InteractionOutcome>;

    /// `POST /report`
    async fn report(&self, reported_user_id: UserId, reason: &str) -> AppResult<()>;

    /// `GET /images/{id}`, resolved to the final (presigned) URL after redirects
    async fn image_url(&self, user_id: UserId) -> AppResult<String>;
}

/// Calls backing the matches list
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MatchesApi: Send + Sync {
    /// `GET /api/matches`
    async fn fetch_matches(&self) -> AppResult<Vec<Candidate>>;

    /// `POST /report_match`
    async fn report_match(&self, reported_user_id: UserId, reason: &str) -> AppResult<()>;

    /// `POST /remove_match`
    async fn remove_match(&self, user_id: UserId) -> AppResult<()>;
}
