//! Recommendation feed controller
//!
//! Owns the candidate queue, the cursor into it, the session's seen list and
//! the buffered interaction log. Decides at every step whether to show the
//! next candidate, fetch a new batch, or fall back to the empty state.
use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::task::JoinHandle;

use crate::{
    models::{
        Candidate, CandidateView, InteractionKind, InteractionRecord, UserId, BATCH_SIZE,
        DEFAULT_PLACEHOLDER_IMAGE_URL,
    },
    services::api::RecommendationApi,
    storage::{load_json, save_json, KeyValueStore, StorageKey},
    view::{FeedPresenter, InteractionBinding},
};

/// Explicit initialisation parameters for a feed session
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Shown when a candidate's photo cannot be resolved
    pub placeholder_image_url: String,
    /// Full batch size; reaching the end of a batch this size triggers a prefetch
    pub batch_size: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
            batch_size: BATCH_SIZE,
        }
    }
}

/// Reentrancy guard for batch fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
}

#[derive(Debug)]
struct FeedState {
    queue: Vec<Candidate>,
    cursor: usize,
    seen: Vec<UserId>,
    interactions: Vec<InteractionRecord>,
    fetch: FetchState,
    current: Option<InteractionBinding>,
}

/// Point-in-time copy of the feed state
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub queue: Vec<UserId>,
    pub cursor: usize,
    pub seen: Vec<UserId>,
    pub interactions: Vec<InteractionRecord>,
    pub fetch: FetchState,
    pub current: Option<InteractionBinding>,
}

enum Step {
    Empty,
    Show { candidate: Candidate, prefetch: bool },
    Exhausted,
}

struct Inner {
    api: Arc<dyn RecommendationApi>,
    store: Arc<dyn KeyValueStore>,
    presenter: Arc<dyn FeedPresenter>,
    options: FeedOptions,
    state: Mutex<FeedState>,
    /// Prefetches, photo lookups and reports still running
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// Cheap to clone; clones share the same feed
#[derive(Clone)]
pub struct FeedController {
    inner: Arc<Inner>,
}

impl FeedController {
    /// Creates the feed, restoring any interaction log left in `store`
    pub fn new(
        api: Arc<dyn RecommendationApi>,
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn FeedPresenter>,
        options: FeedOptions,
    ) -> Self {
        let interactions =
            match load_json::<Vec<InteractionRecord>>(store.as_ref(), &StorageKey::Interactions) {
                Ok(Some(records)) => records,
                Ok(None) => Vec::new(),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored interactions unreadable, starting empty");
                    Vec::new()
                }
            };

        tracing::debug!(restored = interactions.len(), "Feed created");

        Self {
            inner: Arc::new(Inner {
                api,
                store,
                presenter,
                options,
                state: Mutex::new(FeedState {
                    queue: Vec::new(),
                    cursor: 0,
                    seen: Vec::new(),
                    interactions,
                    fetch: FetchState::Idle,
                    current: None,
                }),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn presenter(&self) -> &dyn FeedPresenter {
        self.inner.presenter.as_ref()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state();
        FeedSnapshot {
            queue: state.queue.iter().map(|c| c.id).collect(),
            cursor: state.cursor,
            seen: state.seen.clone(),
            interactions: state.interactions.clone(),
            fetch: state.fetch,
            current: state.current.clone(),
        }
    }

    /// Startup: adopt the batch the server already computed, or fetch a new one
    pub async fn check_and_load_recommendations(&self) {
        match self.inner.api.check_recommendations().await {
            Ok(batch) if batch.is_empty() => {
                tracing::info!("No stored recommendations, generating a new batch");
                self.fetch_recommendations().await;
            }
            Ok(batch) => {
                tracing::info!(batch_size = batch.len(), "Adopting stored recommendations");
                {
                    let mut state = self.state();
                    state.queue = batch;
                    state.cursor = 0;
                }
                self.load_next_recommendation().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to check stored recommendations");
            }
        }
    }

    /// Advances the feed: next candidate, refetch, or empty state
    pub async fn load_next_recommendation(&self) {
        if !self.show_next() {
            self.fetch_recommendations().await;
        }
    }

    /// Returns `false` when the batch is used up and a refetch is due
    fn show_next(&self) -> bool {
        let step = {
            let mut state = self.state();
            if state.queue.is_empty() {
                Step::Empty
            } else if state.cursor < state.queue.len() {
                let candidate = state.queue[state.cursor].clone();
                state.seen.push(candidate.id);
                let prefetch = state.cursor == state.queue.len() - 1
                    && state.queue.len() == self.inner.options.batch_size
                    && state.fetch == FetchState::Idle;
                state.cursor += 1;
                Step::Show {
                    candidate,
                    prefetch,
                }
            } else {
                Step::Exhausted
            }
        };

        match step {
            Step::Empty => {
                tracing::info!("No recommendations to show");
                self.presenter().show_empty_state();
                true
            }
            Step::Show {
                candidate,
                prefetch,
            } => {
                if prefetch {
                    self.spawn_prefetch();
                }
                self.display_recommendation(&candidate);
                true
            }
            Step::Exhausted => false,
        }
    }

    /// Blocking refresh: replaces the batch, then shows its first candidate
    pub async fn fetch_recommendations(&self) {
        let (seen, interactions) = {
            let mut state = self.state();
            state.fetch = FetchState::Fetching;
            (state.seen.clone(), state.interactions.clone())
        };
        self.presenter().set_interactions_enabled(false);

        if self.replace_batch(&seen, &interactions).await {
            self.show_next();
        }

        self.finish_fetch();
    }

    /// Background refresh at a batch boundary; the candidate on screen stays.
    ///
    /// No-op while another fetch is in flight.
    pub async fn fetch_recommendations_early(&self) {
        let (seen, interactions) = {
            let mut state = self.state();
            if state.fetch == FetchState::Fetching {
                tracing::debug!("Fetch already in flight, skipping prefetch");
                return;
            }
            state.fetch = FetchState::Fetching;
            (state.seen.clone(), state.interactions.clone())
        };
        self.presenter().set_interactions_enabled(false);

        self.replace_batch(&seen, &interactions).await;

        self.finish_fetch();
    }

    fn spawn_prefetch(&self) {
        tracing::debug!("Last candidate of a full batch shown, prefetching");
        let controller = self.clone();
        self.spawn_background(async move { controller.fetch_recommendations_early().await });
    }

    fn spawn_background<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut tasks = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    /// Waits for every background task started so far
    pub async fn settle(&self) {
        loop {
            let handles = {
                let mut tasks = self
                    .inner
                    .tasks
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *tasks)
            };
            if handles.is_empty() {
                break;
            }

            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::error!(error = %e, "Background task failed");
                }
            }
        }
    }

    /// Requests a batch and installs it. Returns whether it succeeded.
    async fn replace_batch(&self, seen: &[UserId], interactions: &[InteractionRecord]) -> bool {
        match self.inner.api.fetch_recommendations(seen, interactions).await {
            Ok(batch) => {
                tracing::info!(batch_size = batch.len(), seen = seen.len(), "New batch installed");
                let mut state = self.state();
                state.queue = batch;
                state.cursor = 0;
                state.interactions.clear();
                self.persist_interactions(&state.interactions);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch recommendations");
                false
            }
        }
    }

    fn finish_fetch(&self) {
        self.state().fetch = FetchState::Idle;
        self.presenter().set_interactions_enabled(true);
    }

    fn persist_interactions(&self, interactions: &[InteractionRecord]) {
        if let Err(e) = save_json(
            self.inner.store.as_ref(),
            &StorageKey::Interactions,
            interactions,
        ) {
            tracing::warn!(error = %e, "Failed to persist interactions");
        }
    }

    /// Logs the verdict locally, sends it, and advances on success
    pub async fn record_interaction(
        &self,
        candidate_id: UserId,
        candidate_name: &str,
        kind: InteractionKind,
    ) {
        self.presenter().set_interactions_enabled(false);
        {
            let mut state = self.state();
            state.interactions.push(InteractionRecord {
                recommendation_id: candidate_id,
                interaction_type: kind,
            });
            self.persist_interactions(&state.interactions);
        }

        match self.inner.api.record_interaction(candidate_id, kind).await {
            Ok(outcome) => {
                tracing::info!(candidate_id, kind = %kind, matched = outcome.is_match, "Interaction recorded");
                if outcome.is_match {
                    self.presenter().show_match(candidate_name);
                }
                self.load_next_recommendation().await;
            }
            Err(e) => {
                tracing::error!(candidate_id, kind = %kind, error = %e, "Error recording interaction");
            }
        }

        self.presenter().set_interactions_enabled(true);
    }

    /// Presses one of the bound interaction buttons.
    ///
    /// Returns `false` when no candidate is on screen.
    pub async fn interact(&self, kind: InteractionKind) -> bool {
        let binding = self.state().current.clone();
        match binding {
            Some(binding) => {
                self.record_interaction(binding.candidate_id, &binding.candidate_name, kind)
                    .await;
                true
            }
            None => false,
        }
    }

    /// Reports the candidate on screen and moves past them without waiting
    /// for the report to land.
    ///
    /// Returns `false` when no candidate is on screen.
    pub async fn report_candidate(&self, reason: &str) -> bool {
        let Some(binding) = self.state().current.clone() else {
            return false;
        };

        let api = self.inner.api.clone();
        let reason = reason.to_string();
        self.spawn_background(async move {
            let candidate_id = binding.candidate_id;
            match api.report(candidate_id, &reason).await {
                Ok(()) => tracing::info!(candidate_id, "Report submitted"),
                Err(e) => tracing::error!(candidate_id, error = %e, "Error submitting report"),
            }
        });

        self.load_next_recommendation().await;
        self.presenter().show_report_acknowledged();
        true
    }

    /// Pushes one candidate to the presentation layer.
    ///
    /// The photo is looked up in the background and only shown if the
    /// candidate is still on screen when it arrives.
    pub fn display_recommendation(&self, candidate: &Candidate) {
        let view = CandidateView::from(candidate);
        let binding = InteractionBinding {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
        };
        self.state().current = Some(binding.clone());

        let presenter = self.presenter();
        presenter.show_candidate(&view);
        presenter.bind_interactions(&binding);
        presenter.update_calendar(&view.move_in);
        presenter.update_map(&candidate.geo);

        let controller = self.clone();
        let candidate_id = candidate.id;
        self.spawn_background(async move { controller.load_profile_image(candidate_id).await });
    }

    async fn load_profile_image(&self, candidate_id: UserId) {
        let url = match self.inner.api.image_url(candidate_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(candidate_id, error = %e, "Failed to load profile image");
                self.inner.options.placeholder_image_url.clone()
            }
        };

        let on_screen = self
            .state()
            .current
            .as_ref()
            .is_some_and(|b| b.candidate_id == candidate_id);
        if on_screen {
            self.presenter().show_profile_image(candidate_id, &url);
        } else {
            tracing::debug!(candidate_id, "Candidate no longer shown, dropping profile image");
        }
    }
}
