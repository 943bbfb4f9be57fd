use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A user's verdict on a displayed candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Liked,
    Disliked,
    Superliked,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Liked => "liked",
            InteractionKind::Disliked => "disliked",
            InteractionKind::Superliked => "superliked",
        }
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the locally buffered interaction log.
///
/// Also the body of `POST /record_interaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub recommendation_id: i64,
    pub interaction_type: InteractionKind,
}

/// Response of `POST /record_interaction`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InteractionOutcome {
    /// Set when the other user already liked us back
    #[serde(default, rename = "match")]
    pub is_match: bool,
}

/// Body of `POST /api/recommendations`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest<'a> {
    pub seen_user_ids: &'a [i64],
    pub interactions: &'a [InteractionRecord],
}

/// Body of `POST /report` and `POST /report_match`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub reported_user_id: i64,
    pub reason: String,
}

/// Body of `POST /remove_match`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMatchRequest {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_format() {
        let record = InteractionRecord {
            recommendation_id: 42,
            interaction_type: InteractionKind::Superliked,
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "recommendationId": 42, "interactionType": "superliked" })
        );
    }

    #[test]
    fn test_fetch_request_wire_format() {
        let seen = [1, 2];
        let interactions = [InteractionRecord {
            recommendation_id: 2,
            interaction_type: InteractionKind::Disliked,
        }];
        let request = FetchRequest {
            seen_user_ids: &seen,
            interactions: &interactions,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "seenUserIds": [1, 2],
                "interactions": [{ "recommendationId": 2, "interactionType": "disliked" }]
            })
        );
    }

    #[test]
    fn test_outcome_missing_match_defaults_false() {
        let outcome: InteractionOutcome = serde_json::from_value(json!({})).unwrap();
        assert!(!outcome.is_match);

        let outcome: InteractionOutcome =
            serde_json::from_value(json!({ "match": true })).unwrap();
        assert!(outcome.is_match);
    }
}
