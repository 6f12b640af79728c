//! Navigation state - visited-page history and the displayed listing
//!
//! History is newest-first: index 0 is the most recently pushed page and
//! stepping "back" moves toward higher indices. Every fetch is issued as a
//! [`FetchRequest`] carrying a sequence token; only the latest issued request
//! may change the state when it resolves.

use crate::classify::ClassifiedListing;
use app_fs::FsError;

/// Contents of the current page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Listing {
    /// No fetch has succeeded yet
    #[default]
    NotLoaded,
    Loaded(ClassifiedListing),
}

impl Listing {
    pub fn loaded(&self) -> Option<&ClassifiedListing> {
        match self {
            Listing::Loaded(listing) => Some(listing),
            Listing::NotLoaded => None,
        }
    }
}

/// What a resolved fetch does to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    /// Drop forward history and push the path as page 0
    Push,
    /// Move the cursor to an existing history index
    Page(usize),
}

/// A directory fetch issued by the navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: u64,
    pub path: String,
    pub target: FetchTarget,
}

/// Result of handing a resolved fetch back to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request was issued meanwhile
    Stale,
    /// The fetch failed; previous state kept
    Failed,
}

/// Navigation state for the file browser
#[derive(Debug, Default)]
pub struct NavigationState {
    history: Vec<String>,
    page: usize,
    listing: Listing,

    /// Token of the most recently issued request
    issued: u64,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Path of the displayed page, once something has loaded
    pub fn current_path(&self) -> Option<&str> {
        self.history.get(self.page).map(String::as_str)
    }

    /// Whether stepping by `count` stays inside the history
    pub fn can_step(&self, count: isize) -> bool {
        self.step_target(count).is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.can_step(1)
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_step(-1)
    }

    /// Whether `token` belongs to the latest issued request
    pub fn is_latest(&self, token: u64) -> bool {
        token == self.issued
    }

    /// Request navigation to a new path
    pub fn navigate_to(&mut self, path: impl Into<String>) -> FetchRequest {
        self.issue(path.into(), FetchTarget::Push)
    }

    /// Request a step through history; `None` when out of range
    pub fn go_back(&mut self, count: isize) -> Option<FetchRequest> {
        let target = self.step_target(count)?;
        let path = self.history[target].clone();
        Some(self.issue(path, FetchTarget::Page(target)))
    }

    /// Apply a resolved fetch
    pub fn complete(
        &mut self,
        request: FetchRequest,
        result: Result<ClassifiedListing, FsError>,
    ) -> FetchOutcome {
        if !self.is_latest(request.token) {
            tracing::debug!(
                "Discarding stale listing for {} (token {}, latest {})",
                request.path,
                request.token,
                self.issued
            );
            return FetchOutcome::Stale;
        }

        let listing = match result {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", request.path, e);
                return FetchOutcome::Failed;
            }
        };

        match request.target {
            FetchTarget::Push => {
                // Entries before the cursor are forward history
                let forward = self.page.min(self.history.len());
                self.history.drain(..forward);
                self.history.insert(0, request.path);
                self.page = 0;
            }
            FetchTarget::Page(index) => {
                if index >= self.history.len() {
                    return FetchOutcome::Stale;
                }
                self.page = index;
            }
        }

        self.listing = Listing::Loaded(listing);
        tracing::debug!("Page {} of {}: {:?}", self.page, self.history.len(), self.current_path());
        FetchOutcome::Applied
    }

    fn issue(&mut self, path: String, target: FetchTarget) -> FetchRequest {
        self.issued += 1;
        tracing::debug!("Fetch #{} for {} ({:?})", self.issued, path, target);
        FetchRequest {
            token: self.issued,
            path,
            target,
        }
    }

    fn step_target(&self, count: isize) -> Option<usize> {
        let target = (self.page as isize).checked_add(count)?;
        if target >= 0 && (target as usize) < self.history.len() {
            Some(target as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_fs::DirectoryEntry;

    fn listing_of(name: &str) -> ClassifiedListing {
        ClassifiedListing {
            files: vec![DirectoryEntry::new(name, format!("/x/{}", name), false)],
            ..Default::default()
        }
    }

    fn visit(state: &mut NavigationState, path: &str) {
        let request = state.navigate_to(path);
        assert_eq!(state.complete(request, Ok(listing_of(path))), FetchOutcome::Applied);
    }

    fn step(state: &mut NavigationState, count: isize) {
        let request = state.go_back(count).expect("step in range");
        assert_eq!(state.complete(request, Ok(listing_of("step"))), FetchOutcome::Applied);
    }

    fn assert_page_in_bounds(state: &NavigationState) {
        if !state.history().is_empty() {
            assert!(state.page() < state.history().len());
        }
    }

    #[test]
    fn test_starts_not_loaded() {
        let state = NavigationState::new();
        assert!(state.history().is_empty());
        assert_eq!(state.listing(), &Listing::NotLoaded);
        assert_eq!(state.current_path(), None);
        assert!(!state.can_go_back());
        assert!(!state.can_go_forward());
    }

    #[test]
    fn test_navigate_pushes_front() {
        let mut state = NavigationState::new();
        visit(&mut state, "/home");
        visit(&mut state, "/home/a");

        assert_eq!(state.history(), ["/home/a", "/home"]);
        assert_eq!(state.page(), 0);
        assert_eq!(state.current_path(), Some("/home/a"));
        assert_eq!(state.listing().loaded(), Some(&listing_of("/home/a")));
    }

    #[test]
    fn test_navigate_drops_forward_history() {
        let mut state = NavigationState::new();
        visit(&mut state, "/home");
        visit(&mut state, "/home/a");
        step(&mut state, 1);
        assert_eq!(state.page(), 1);
        assert_eq!(state.current_path(), Some("/home"));

        visit(&mut state, "/home/b");
        assert_eq!(state.history(), ["/home/b", "/home"]);
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_forward_history_dropped_from_deep_page() {
        let mut state = NavigationState::new();
        for path in ["/a", "/b", "/c", "/d"] {
            visit(&mut state, path);
        }
        step(&mut state, 2);
        assert_eq!(state.current_path(), Some("/b"));

        visit(&mut state, "/e");
        assert_eq!(state.history(), ["/e", "/b", "/a"]);
        assert_page_in_bounds(&state);
    }

    #[test]
    fn test_out_of_range_step_is_noop() {
        let mut state = NavigationState::new();
        visit(&mut state, "/home");
        visit(&mut state, "/home/a");

        assert!(state.go_back(-1).is_none());
        assert!(state.go_back(2).is_none());
        assert!(state.go_back(isize::MIN).is_none());
        assert_eq!(state.page(), 0);
        assert_eq!(state.listing().loaded(), Some(&listing_of("/home/a")));

        step(&mut state, 1);
        assert!(state.go_back(1).is_none());
        step(&mut state, -1);
        assert_eq!(state.current_path(), Some("/home/a"));
    }

    #[test]
    fn test_failed_fetch_keeps_state() {
        let mut state = NavigationState::new();
        visit(&mut state, "/home");

        let request = state.navigate_to("/root");
        let outcome = state.complete(request, Err(FsError::AccessDenied("/root".into())));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(state.history(), ["/home"]);
        assert_eq!(state.listing().loaded(), Some(&listing_of("/home")));
    }

    #[test]
    fn test_stale_fetch_discarded() {
        let mut state = NavigationState::new();
        let slow = state.navigate_to("/slow");
        let fast = state.navigate_to("/fast");

        assert_eq!(state.complete(fast, Ok(listing_of("fast"))), FetchOutcome::Applied);
        assert_eq!(state.complete(slow, Ok(listing_of("slow"))), FetchOutcome::Stale);

        assert_eq!(state.history(), ["/fast"]);
        assert_eq!(state.listing().loaded(), Some(&listing_of("fast")));
    }

    #[test]
    fn test_step_superseded_by_navigation() {
        let mut state = NavigationState::new();
        visit(&mut state, "/a");
        visit(&mut state, "/b");

        let back = state.go_back(1).unwrap();
        let nav = state.navigate_to("/c");
        assert_eq!(state.complete(back, Ok(listing_of("a"))), FetchOutcome::Stale);
        assert_eq!(state.page(), 0);
        assert_eq!(state.complete(nav, Ok(listing_of("c"))), FetchOutcome::Applied);
        assert_eq!(state.history(), ["/c", "/b", "/a"]);
    }

    #[test]
    fn test_page_invariant_over_mixed_sequence() {
        let mut state = NavigationState::new();
        let script: [(&str, isize); 10] = [
            ("/1", 0),
            ("/2", 0),
            ("/3", 0),
            ("", 2),
            ("", -1),
            ("/4", 0),
            ("", 5),
            ("", 1),
            ("", -3),
            ("/5", 0),
        ];

        for (path, count) in script {
            if path.is_empty() {
                if let Some(request) = state.go_back(count) {
                    state.complete(request, Ok(ClassifiedListing::default()));
                }
            } else {
                visit(&mut state, path);
                assert_eq!(state.page(), 0);
                assert_eq!(state.history()[0], path);
            }
            assert_page_in_bounds(&state);
        }
    }
}
