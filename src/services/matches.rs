use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Candidate, CandidateView, UserId},
    services::api::MatchesApi,
};

/// The user's mutual matches, as listed on the matches page
pub struct MatchList {
    api: Arc<dyn MatchesApi>,
    matches: Vec<Candidate>,
}

impl MatchList {
    pub fn new(api: Arc<dyn MatchesApi>) -> Self {
        Self {
            api,
            matches: Vec::new(),
        }
    }

    /// Replaces the local list with the server's
    pub async fn load(&mut self) -> AppResult<Vec<CandidateView>> {
        self.matches = self.api.fetch_matches().await?;
        tracing::info!(matches = self.matches.len(), "Matches loaded");
        Ok(self.cards())
    }

    /// One card per match, with the same features and budget gauge as the feed
    pub fn cards(&self) -> Vec<CandidateView> {
        self.matches.iter().map(CandidateView::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Unmatches `user_id`. The card only disappears once the server agrees.
    pub async fn remove(&mut self, user_id: UserId) -> AppResult<()> {
        self.api.remove_match(user_id).await?;
        self.matches.retain(|m| m.id != user_id);
        tracing::info!(user_id, remaining = self.matches.len(), "Match removed");
        Ok(())
    }

    /// Reports a match. The card is hidden straight away, whatever the server says.
    ///
    /// Returns whether any matches remain.
    pub async fn report(&mut self, user_id: UserId, reason: &str) -> bool {
        self.matches.retain(|m| m.id != user_id);

        if let Err(e) = self.api.report_match(user_id, reason).await {
            tracing::error!(user_id, error = %e, "Error submitting match report");
        }

        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::api::MockMatchesApi};
    use serde_json::json;

    fn matched(id: UserId, name: &str) -> Candidate {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "features": { "Cooking": true },
            "rent_filter": [800, 1200]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_builds_cards() {
        let mut api = MockMatchesApi::new();
        api.expect_fetch_matches()
            .returning(|| Ok(vec![matched(1, "Sam"), matched(2, "Kai")]));

        let mut list = MatchList::new(Arc::new(api));
        let cards = tokio_test::assert_ok!(list.load().await);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Sam");
        assert_eq!(cards[0].features.interests, vec!["Cooking"]);
        assert_eq!(cards[1].upper_limit, "£1200");
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_card() {
        let mut api = MockMatchesApi::new();
        api.expect_fetch_matches()
            .returning(|| Ok(vec![matched(1, "Sam")]));
        api.expect_remove_match()
            .withf(|id| *id == 1)
            .returning(|_| Err(AppError::ExternalApi("down".to_string())));

        let mut list = MatchList::new(Arc::new(api));
        list.load().await.unwrap();

        tokio_test::assert_err!(list.remove(1).await);
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_success_drops_card() {
        let mut api = MockMatchesApi::new();
        api.expect_fetch_matches()
            .returning(|| Ok(vec![matched(1, "Sam"), matched(2, "Kai")]));
        api.expect_remove_match().returning(|_| Ok(()));

        let mut list = MatchList::new(Arc::new(api));
        list.load().await.unwrap();
        tokio_test::assert_ok!(list.remove(2).await);

        assert_eq!(list.cards().iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn test_report_hides_card_and_reports_remaining() {
        let mut api = MockMatchesApi::new();
        api.expect_fetch_matches()
            .returning(|| Ok(vec![matched(1, "Sam"), matched(2, "Kai")]));
        api.expect_report_match()
            .times(2)
            .returning(|_, _| Err(AppError::ExternalApi("down".to_string())));

        let mut list = MatchList::new(Arc::new(api));
        list.load().await.unwrap();

        assert!(list.report(1, "rude").await);
        assert!(!list.report(2, "rude").await);
        assert!(list.is_empty());
    }
}
