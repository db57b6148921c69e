//! Pure view-model for the desktop UI.
//!
//! [`ClientState`] holds everything the UI renders and changes exclusively
//! through [`ClientState::apply`], so the whole presentation logic is
//! testable without a network or a window system.

use std::time::{Duration, Instant};

use promptstash_types::Prompt;

use crate::worker::AppEvent;

/// How long the per-item "Copied!" marker stays visible.
pub const COPIED_WINDOW: Duration = Duration::from_secs(2);

/// Connectivity indicator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// No poll has completed yet.
    Unknown,
    Connected,
    Disconnected,
}

/// Prompt list states.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// Initial fetch still running.
    Loading,
    /// A fetch completed; zero or more prompts, newest first.
    Loaded(Vec<Prompt>),
    /// The initial fetch failed before anything was shown.
    Failed,
}

/// Everything the UI renders.
#[derive(Debug)]
pub struct ClientState {
    pub connectivity: Connectivity,
    pub list: ListState,
    /// User-visible error line; cleared by the next successful mutation.
    pub error: Option<String>,
    /// Which prompt currently shows the "Copied!" marker, and since when.
    copied: Option<(i64, Instant)>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            connectivity: Connectivity::Unknown,
            list: ListState::Loading,
            error: None,
            copied: None,
        }
    }

    /// Fold a worker event into the state.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Status { connected } => {
                self.connectivity = if connected {
                    Connectivity::Connected
                } else {
                    Connectivity::Disconnected
                };
            }

            AppEvent::ListLoaded { prompts } => {
                self.list = ListState::Loaded(prompts);
            }

            AppEvent::ListFailed => {
                // Keep whatever is already on screen if a load has succeeded
                // before; only the very first fetch flips to Failed.
                if matches!(self.list, ListState::Loading) {
                    self.list = ListState::Failed;
                }
                self.error = Some("Could not load prompts. Is the backend running?".to_owned());
            }

            AppEvent::Created { prompt } => {
                self.error = None;
                match &mut self.list {
                    ListState::Loaded(prompts) => prompts.insert(0, prompt),
                    // The create landed even though no list is shown yet;
                    // make the new prompt visible anyway.
                    _ => self.list = ListState::Loaded(vec![prompt]),
                }
            }

            AppEvent::CreateFailed => {
                self.error = Some("Failed to save prompt.".to_owned());
            }

            AppEvent::Deleted { id } => {
                self.error = None;
                if let ListState::Loaded(prompts) = &mut self.list {
                    prompts.retain(|p| p.id != id);
                }
            }

            AppEvent::DeleteFailed { .. } => {
                self.error = Some("Failed to delete prompt.".to_owned());
            }
        }
    }

    /// Record that `id`'s content reached the clipboard.
    pub fn mark_copied(&mut self, id: i64) {
        self.copied = Some((id, Instant::now()));
    }

    /// Whether the "Copied!" marker should be shown for `id` right now.
    pub fn is_copied(&self, id: i64) -> bool {
        match self.copied {
            Some((copied_id, at)) => copied_id == id && at.elapsed() < COPIED_WINDOW,
            None => false,
        }
    }

    /// Expire the marker once its window has passed.
    ///
    /// Returns the remaining window while a marker is active so the UI can
    /// schedule a repaint for the exact moment it should disappear.
    pub fn tick_copied(&mut self) -> Option<Duration> {
        let (_, at) = self.copied?;
        let elapsed = at.elapsed();
        if elapsed >= COPIED_WINDOW {
            self.copied = None;
            None
        } else {
            Some(COPIED_WINDOW - elapsed)
        }
    }

    /// Submit is allowed only when the backend is connected and the draft is
    /// not blank.
    pub fn can_submit(&self, draft: &str) -> bool {
        self.connectivity == Connectivity::Connected && !draft.trim().is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn prompt(id: i64, content: &str) -> Prompt {
        Prompt {
            id,
            content: content.to_owned(),
            created_at: "2024-05-01T10:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn connectivity_starts_unknown_then_follows_polls() {
        let mut state = ClientState::new();
        assert_eq!(state.connectivity, Connectivity::Unknown);

        state.apply(AppEvent::Status { connected: true });
        assert_eq!(state.connectivity, Connectivity::Connected);

        state.apply(AppEvent::Status { connected: false });
        assert_eq!(state.connectivity, Connectivity::Disconnected);
    }

    #[test]
    fn created_prompts_go_to_the_front() {
        let mut state = ClientState::new();
        state.apply(AppEvent::ListLoaded { prompts: vec![prompt(1, "old")] });
        state.apply(AppEvent::Created { prompt: prompt(2, "new") });

        let ListState::Loaded(prompts) = &state.list else {
            panic!("list should be loaded");
        };
        assert_eq!(prompts.iter().map(|p| p.id).collect::<Vec<_>>(), [2, 1]);
    }

    #[test]
    fn create_while_list_failed_still_shows_the_prompt() {
        let mut state = ClientState::new();
        state.apply(AppEvent::ListFailed);
        assert_eq!(state.list, ListState::Failed);
        assert!(state.error.is_some());

        state.apply(AppEvent::Created { prompt: prompt(1, "first") });
        assert_eq!(state.list, ListState::Loaded(vec![prompt(1, "first")]));
        assert_eq!(state.error, None);
    }

    #[test]
    fn delete_removes_by_id_and_clears_error() {
        let mut state = ClientState::new();
        state.apply(AppEvent::ListLoaded { prompts: vec![prompt(1, "a"), prompt(2, "b")] });
        state.apply(AppEvent::CreateFailed);
        assert!(state.error.is_some());

        state.apply(AppEvent::Deleted { id: 1 });
        assert_eq!(state.list, ListState::Loaded(vec![prompt(2, "b")]));
        assert_eq!(state.error, None);
    }

    #[test]
    fn failed_delete_keeps_the_list_and_surfaces_an_error() {
        let mut state = ClientState::new();
        state.apply(AppEvent::ListLoaded { prompts: vec![prompt(1, "keep")] });

        state.apply(AppEvent::DeleteFailed { id: 1 });
        assert!(matches!(&state.list, ListState::Loaded(p) if p.len() == 1));
        assert_eq!(state.error.as_deref(), Some("Failed to delete prompt."));
    }

    #[test]
    fn late_list_failure_keeps_loaded_items() {
        let mut state = ClientState::new();
        state.apply(AppEvent::ListLoaded { prompts: vec![prompt(1, "keep")] });

        state.apply(AppEvent::ListFailed);
        assert!(matches!(&state.list, ListState::Loaded(p) if p.len() == 1));
        assert!(state.error.is_some());
    }

    #[test]
    fn copied_marker_tracks_one_item_at_a_time() {
        let mut state = ClientState::new();
        state.mark_copied(3);
        assert!(state.is_copied(3));
        assert!(!state.is_copied(4));

        state.mark_copied(4);
        assert!(!state.is_copied(3));
        assert!(state.is_copied(4));

        // Marker still inside its window; tick reports the remaining time.
        assert!(state.tick_copied().is_some());
    }

    #[test]
    fn can_submit_requires_connection_and_content() {
        let mut state = ClientState::new();
        assert!(!state.can_submit("hello"));

        state.apply(AppEvent::Status { connected: true });
        assert!(state.can_submit("hello"));
        assert!(!state.can_submit("   "));
        assert!(!state.can_submit(""));

        state.apply(AppEvent::Status { connected: false });
        assert!(!state.can_submit("hello"));
    }
}
