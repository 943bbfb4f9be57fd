//! reqwest-backed client for the roommate-matching web application
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    Client as HttpClient, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        Candidate, FetchRequest, InteractionKind, InteractionOutcome, InteractionRecord,
        RemoveMatchRequest, ReportRequest, UserId,
    },
    services::api::{
        request_id::{make_span_with_request_id, RequestId},
        MatchesApi, RecommendationApi,
    },
};

#[derive(Clone)]
pub struct HttpApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpApiClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// `session_cookie` is sent on every request; the server rejects
    /// unauthenticated calls with 401.
    pub fn new(base_url: &str, session_cookie: Option<&str>) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| AppError::InvalidInput(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http_client = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and fails on any non-2xx status
    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> AppResult<Response> {
        let request_id = RequestId::new();
        let span = make_span_with_request_id(&request_id, method, path);

        async move {
            let response = request_id.attach(request).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = %status, body = %body, "API request failed");
                return Err(AppError::ExternalApi(format!(
                    "API returned status {}: {}",
                    status, body
                )));
            }

            tracing::debug!(status = %response.status(), "API request succeeded");
            Ok(response)
        }
        .instrument(span)
        .await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> AppResult<T> {
        let response = self.send(request, method, path).await?;
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl RecommendationApi for HttpApiClient {
    async fn check_recommendations(&self) -> AppResult<Vec<Candidate>> {
        let path = "/api/check_recommendations";
        let candidates: Vec<Candidate> = self
            .send_json(self.http_client.get(self.url(path)), "GET", path)
            .await?;

        tracing::info!(results = candidates.len(), "Existing recommendations checked");

        Ok(candidates)
    }

    async fn fetch_recommendations(
        &self,
        seen_user_ids: &[UserId],
        interactions: &[InteractionRecord],
    ) -> AppResult<Vec<Candidate>> {
        let path = "/api/recommendations";
        let body = FetchRequest {
            seen_user_ids,
            interactions,
        };
        let candidates: Vec<Candidate> = self
            .send_json(self.http_client.post(self.url(path)).json(&body), "POST", path)
            .await?;

        tracing::info!(
            seen = seen_user_ids.len(),
            interactions = interactions.len(),
            results = candidates.len(),
            "Recommendation batch fetched"
        );

        Ok(candidates)
    }

    async fn record_interaction(
        &self,
        recommendation_id: UserId,
        interaction_type: InteractionKind,
    ) -> AppResult<InteractionOutcome> {
        let path = "/record_interaction";
        let body = InteractionRecord {
            recommendation_id,
            interaction_type,
        };

        self.send_json(self.http_client.post(self.url(path)).json(&body), "POST", path)
            .await
    }

    async fn report(&self, reported_user_id: UserId, reason: &str) -> AppResult<()> {
        let path = "/report";
        let body = ReportRequest {
            reported_user_id,
            reason: reason.to_string(),
        };

        self.send(self.http_client.post(self.url(path)).json(&body), "POST", path)
            .await?;
        Ok(())
    }

    async fn image_url(&self, user_id: UserId) -> AppResult<String> {
        let path = format!("/images/{}", user_id);
        let response = self
            .send(self.http_client.get(self.url(&path)), "GET", &path)
            .await?;

        // Redirects are followed, so the final URL is the presigned one
        Ok(response.url().to_string())
    }
}

#[async_trait::async_trait]
impl MatchesApi for HttpApiClient {
    async fn fetch_matches(&self) -> AppResult<Vec<Candidate>> {
        let path = "/api/matches";
        let matches: Vec<Candidate> = self
            .send_json(self.http_client.get(self.url(path)), "GET", path)
            .await?;

        tracing::info!(results = matches.len(), "Matches fetched");

        Ok(matches)
    }

    async fn report_match(&self, reported_user_id: UserId, reason: &str) -> AppResult<()> {
        let path = "/report_match";
        let body = ReportRequest {
            reported_user_id,
            reason: reason.to_string(),
        };

        self.send(self.http_client.post(self.url(path)).json(&body), "POST", path)
            .await?;
        Ok(())
    }

    async fn remove_match(&self, user_id: UserId) -> AppResult<()> {
        let path = "/remove_match";
        let body = RemoveMatchRequest { id: user_id };

        self.send(self.http_client.post(self.url(path)).json(&body), "POST", path)
            .await?;
        Ok(())
    }
}
