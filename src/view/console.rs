use crate::{
    models::{CandidateView, DateRange, UserId},
    view::{FeedPresenter, InteractionBinding},
};

/// Renders the feed as plain text on stdout
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }

    fn bubbles(features: &[String]) -> String {
        if features.is_empty() {
            "-".to_string()
        } else {
            features.join(", ")
        }
    }
}

impl FeedPresenter for ConsolePresenter {
    fn set_interactions_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "Interaction buttons toggled");
    }

    fn show_empty_state(&self) {
        println!("\nNo recommendations right now. Check back later.");
    }

    fn show_candidate(&self, view: &CandidateView) {
        println!("\n{} ({}) - {}", view.name, view.age, view.city);
        println!("  {}", view.bio);
        println!("  University: {}", view.university);
        println!("  Profession: {}", view.profession);
        println!("  Staying:    {}", view.duration);
        println!("  Budget:     {} - {}", view.lower_limit, view.upper_limit);
        println!("  About me:   {}", Self::bubbles(&view.features.about_me));
        println!("  Lifestyle:  {}", Self::bubbles(&view.features.lifestyle));
        println!("  Interests:  {}", Self::bubbles(&view.features.interests));
    }

    fn bind_interactions(&self, binding: &InteractionBinding) {
        println!(
            "  [l]ike / [d]islike / [s]uperlike {} - [r]eport <reason> - [q]uit",
            binding.candidate_name
        );
    }

    fn show_profile_image(&self, _candidate_id: UserId, url: &str) {
        println!("  Photo:      {}", url);
    }

    fn update_calendar(&self, range: &DateRange) {
        let fmt = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        println!("  Moving:     {} to {}", fmt(range.start), fmt(range.end));
    }

    fn update_map(&self, geo: &serde_json::Value) {
        tracing::debug!(has_geo = !geo.is_null(), "Map intersection updated");
    }

    fn show_match(&self, candidate_name: &str) {
        println!("\n*** You and {} have liked each other. ***", candidate_name);
    }

    fn show_report_acknowledged(&self) {
        println!("\nThank you, your report has been submitted.");
    }
}
