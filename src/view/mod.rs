//! Presentation port
//!
//! The feed controller never touches concrete UI elements. It pushes view
//! models and state changes through [`FeedPresenter`]; an adapter turns them
//! into whatever the front end draws.
use crate::models::{CandidateView, DateRange, UserId};

pub mod console;

pub use console::ConsolePresenter;

/// The three interaction buttons, bound to the candidate on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionBinding {
    pub candidate_id: UserId,
    pub candidate_name: String,
}

pub trait FeedPresenter: Send + Sync {
    /// Like / dislike / superlike enabled state
    fn set_interactions_enabled(&self, enabled: bool);

    /// Hide the feed and show the "no recommendations" message
    fn show_empty_state(&self);

    /// Text, feature bubbles and budget gauge of a candidate
    fn show_candidate(&self, view: &CandidateView);

    fn bind_interactions(&self, binding: &InteractionBinding);

    fn show_profile_image(&self, candidate_id: UserId, url: &str);

    /// Move-in window on the calendar widget
    fn update_calendar(&self, range: &DateRange);

    /// Candidate's isochrone, intersected with ours on the map widget
    fn update_map(&self, geo: &serde_json::Value);

    /// Mutual like notification
    fn show_match(&self, candidate_name: &str);

    /// "Thank you" acknowledgement after a report
    fn show_report_acknowledged(&self);
}
