pub mod candidate;
pub mod features;
pub mod interaction;

pub use candidate::{BudgetGauge, Candidate, CandidateView, DateRange, RentRange};
pub use features::{categorize, FeatureBuckets, FeatureCategory};
pub use interaction::{
    FetchRequest, InteractionKind, InteractionOutcome, InteractionRecord, RemoveMatchRequest,
    ReportRequest,
};

/// Identifier of a user on the matching service
pub type UserId = i64;

/// Number of candidates the server returns per full batch
pub const BATCH_SIZE: usize = 30;

/// Photo shown when a candidate's own image cannot be resolved
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "/static/images/default-profile.jpg";
