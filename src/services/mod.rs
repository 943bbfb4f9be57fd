pub mod api;
pub mod feed;
pub mod matches;

pub use feed::{FeedController, FeedOptions, FeedSnapshot, FetchState};
pub use matches::MatchList;
