//! File browser model - drives navigation against the directory service
//!
//! All mutations happen on the owner's thread: operations spawn background
//! fetches and `poll` applies whatever has finished.

use crate::address_bar::AddressBar;
use crate::classify::{classify, ClassifiedListing};
use crate::navigation::{FetchOutcome, FetchRequest, NavigationState};
use crate::tasks::{deadline_after, Spawner, TaskQueue};
use app_fs::{with_trailing_separator, DirectoryEntry, DirectoryService, Launcher, SpecialDirectory};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Finished background work for the browser
#[derive(Debug)]
pub enum BrowserEvent {
    StartDirectory(app_fs::Result<String>),
    SpecialDirectories(Vec<String>),
    Fetched(FetchRequest, app_fs::Result<ClassifiedListing>),
    AddressChecked { candidate: String, exists: bool },
}

/// List and classify a directory
pub async fn fetch_listing(
    directories: &dyn DirectoryService,
    path: &str,
) -> app_fs::Result<ClassifiedListing> {
    directories.list_directory(path).await.map(classify)
}

/// Navigation, address bar and listing for the single browser pane
pub struct FileBrowserModel {
    navigation: NavigationState,
    address: AddressBar,
    directories: Arc<dyn DirectoryService>,
    launcher: Arc<dyn Launcher>,
    tasks: TaskQueue<BrowserEvent>,
}

impl FileBrowserModel {
    pub fn new(
        directories: Arc<dyn DirectoryService>,
        launcher: Arc<dyn Launcher>,
        spawner: Spawner,
    ) -> Self {
        Self {
            navigation: NavigationState::new(),
            address: AddressBar::new(),
            directories,
            launcher,
            tasks: TaskQueue::new(spawner),
        }
    }

    /// Resolve the start directory and the autocomplete shortcuts
    pub fn start(&mut self, start_directory: SpecialDirectory) {
        tracing::info!("Starting browser in {} directory", start_directory.label());

        let directories = self.directories.clone();
        self.tasks.spawn(async move {
            BrowserEvent::StartDirectory(directories.special_directory(start_directory).await)
        });

        let directories = self.directories.clone();
        self.tasks.spawn(async move {
            let lookups = SpecialDirectory::ALL.map(|kind| directories.special_directory(kind));
            let paths = join_all(lookups)
                .await
                .into_iter()
                .filter_map(|result| match result {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::debug!("Skipping shortcut: {}", e);
                        None
                    }
                })
                .collect();
            BrowserEvent::SpecialDirectories(paths)
        });
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn address(&self) -> &AddressBar {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut AddressBar {
        &mut self.address
    }

    /// Split borrow for views that edit the address while reading history
    pub fn view_parts(&mut self) -> (&NavigationState, &mut AddressBar) {
        (&self.navigation, &mut self.address)
    }

    /// Autocomplete candidates for the address bar
    pub fn suggestions(&self) -> Vec<String> {
        self.address.suggestions(self.navigation.history())
    }

    pub fn is_busy(&self) -> bool {
        !self.tasks.is_idle()
    }

    pub fn navigate_to(&mut self, path: impl Into<String>) {
        let request = self.navigation.navigate_to(path);
        self.fetch(request);
    }

    /// Step through history; positive counts go back, negative forward
    pub fn go_back(&mut self, count: isize) -> bool {
        match self.navigation.go_back(count) {
            Some(request) => {
                self.fetch(request);
                true
            }
            None => false,
        }
    }

    /// Navigate to the parent of the current page
    pub fn back_out(&mut self) {
        let Some(current) = self.navigation.current_path() else {
            return;
        };
        let joined = self.directories.join_path(current, "..");
        let parent = self.directories.normalize_path(&joined);
        self.navigate_to(parent);
    }

    /// Enter a container, hand anything else to the default application
    pub fn open_entry(&mut self, entry: &DirectoryEntry) {
        if entry.is_container {
            self.navigate_to(entry.path.clone());
        } else {
            self.launcher.open_with_default(&entry.path);
        }
    }

    /// The address field lost focus: validate the typed path
    pub fn commit_address(&mut self) {
        let current = self.navigation.current_path().map(str::to_string);
        self.address.editing_path = false;

        let Some(text) = self.address.pending_commit(current.as_deref()) else {
            return;
        };

        if text.trim().is_empty() {
            self.address.revert(current.as_deref());
            return;
        }

        let candidate = match self.resolve_address(&text, current.as_deref()) {
            Some(candidate) => candidate,
            None => {
                self.address.revert(current.as_deref());
                return;
            }
        };
        // A trailing separator only resolves for directories
        let probe = with_trailing_separator(&candidate);
        let directories = self.directories.clone();

        self.tasks.spawn(async move {
            let exists = directories.path_exists(&probe).await;
            BrowserEvent::AddressChecked { candidate, exists }
        });
    }

    /// Normalize typed text into a rooted path, relative text hanging off `current`
    fn resolve_address(&self, text: &str, current: Option<&str>) -> Option<String> {
        let candidate = if Path::new(text).has_root() {
            self.directories.normalize_path(text)
        } else {
            let joined = self.directories.join_path(current?, text);
            self.directories.normalize_path(&joined)
        };
        (Path::new(&candidate).has_root() && Some(candidate.as_str()) != current).then_some(candidate)
    }

    /// Apply every finished background result; true if anything changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.tasks.try_next() {
            self.handle(event);
            changed = true;
        }
        changed
    }

    /// Block until all background work (including work it triggers) is applied
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = deadline_after(timeout);
        while !self.tasks.is_idle() {
            match self.tasks.next_before(deadline) {
                Some(event) => self.handle(event),
                None => return false,
            }
        }
        true
    }

    fn fetch(&mut self, request: FetchRequest) {
        let directories = self.directories.clone();
        self.tasks.spawn(async move {
            let result = fetch_listing(directories.as_ref(), &request.path).await;
            BrowserEvent::Fetched(request, result)
        });
    }

    fn handle(&mut self, event: BrowserEvent) {
        match event {
            BrowserEvent::StartDirectory(Ok(path)) => self.navigate_to(path),
            BrowserEvent::StartDirectory(Err(e)) => {
                tracing::warn!("Start directory unavailable: {}", e);
            }
            BrowserEvent::SpecialDirectories(paths) => {
                tracing::debug!("Resolved {} shortcut directories", paths.len());
                self.address.set_defaults(paths);
            }
            BrowserEvent::Fetched(request, result) => {
                if self.navigation.complete(request, result) != FetchOutcome::Stale {
                    if let Some(current) = self.navigation.current_path() {
                        let current = current.to_string();
                        self.address.set_path(&current);
                    }
                }
            }
            BrowserEvent::AddressChecked { candidate, exists } => {
                if exists {
                    self.navigate_to(candidate);
                } else {
                    tracing::debug!("Address {} is not a directory, reverting", candidate);
                    let current = self.navigation.current_path().map(str::to_string);
                    self.address.revert(current.as_deref());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Listing;
    use app_fs::FsError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    const WAIT: Duration = Duration::from_secs(5);

    /// In-memory directory tree
    #[derive(Default)]
    struct FakeDirectories {
        tree: HashMap<String, Vec<DirectoryEntry>>,
        delays: HashMap<String, Duration>,
        specials: HashMap<SpecialDirectory, String>,
    }

    impl FakeDirectories {
        fn with_dir(mut self, path: &str, children: &[(&str, bool)]) -> Self {
            let entries = children
                .iter()
                .map(|(name, container)| {
                    let child = if path == "/" {
                        format!("/{}", name)
                    } else {
                        format!("{}/{}", path, name)
                    };
                    DirectoryEntry::new(*name, child, *container)
                })
                .collect();
            self.tree.insert(path.to_string(), entries);
            self
        }

        fn with_special(mut self, kind: SpecialDirectory, path: &str) -> Self {
            self.specials.insert(kind, path.to_string());
            self
        }

        fn with_delay(mut self, path: &str, delay: Duration) -> Self {
            self.delays.insert(path.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl DirectoryService for FakeDirectories {
        async fn list_directory(&self, path: &str) -> app_fs::Result<Vec<DirectoryEntry>> {
            if let Some(delay) = self.delays.get(path) {
                tokio::time::sleep(*delay).await;
            }
            self.tree
                .get(path)
                .cloned()
                .ok_or_else(|| FsError::NotFound(path.to_string()))
        }

        async fn path_exists(&self, path: &str) -> bool {
            let trimmed = path.trim_end_matches(['/', '\\']);
            let key = if trimmed.is_empty() { "/" } else { trimmed };
            self.tree.contains_key(key)
        }

        async fn special_directory(&self, kind: SpecialDirectory) -> app_fs::Result<String> {
            self.specials
                .get(&kind)
                .cloned()
                .ok_or_else(|| FsError::SpecialDirectoryUnavailable(kind.label().into()))
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
    }

    impl Launcher for RecordingLauncher {
        fn open_with_default(&self, path: &str) {
            self.opened.lock().push(path.to_string());
        }
    }

    fn sample_tree() -> FakeDirectories {
        FakeDirectories::default()
            .with_dir("/", &[("home", true)])
            .with_dir("/home", &[("me", true)])
            .with_dir(
                "/home/me",
                &[("Documents", true), ("code", true), ("todo.txt", false)],
            )
            .with_dir("/home/me/Documents", &[("report.pdf", false)])
            .with_dir("/home/me/code", &[])
            .with_special(SpecialDirectory::Documents, "/home/me/Documents")
            .with_special(SpecialDirectory::Home, "/home/me")
    }

    fn model_with(
        runtime: &tokio::runtime::Runtime,
        directories: FakeDirectories,
    ) -> (FileBrowserModel, Arc<RecordingLauncher>) {
        let launcher = Arc::new(RecordingLauncher::default());
        let model = FileBrowserModel::new(
            Arc::new(directories),
            launcher.clone(),
            Spawner::new(runtime.handle().clone()),
        );
        (model, launcher)
    }

    #[test]
    fn test_startup_opens_documents_and_loads_shortcuts() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.start(SpecialDirectory::Documents);
        assert!(model.settle(WAIT));

        let nav = model.navigation();
        assert_eq!(nav.history(), ["/home/me/Documents"]);
        assert_eq!(nav.page(), 0);
        let listing = nav.listing().loaded().unwrap();
        assert_eq!(listing.files.len(), 1);

        assert_eq!(model.address().path_text, "/home/me/Documents");
        // Unresolvable shortcuts are skipped; history already in the defaults is not repeated
        assert_eq!(model.suggestions(), vec!["/home/me/Documents", "/home/me"]);
    }

    #[test]
    fn test_start_directory_unavailable_stays_unloaded() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, FakeDirectories::default());

        model.start(SpecialDirectory::Videos);
        assert!(model.settle(WAIT));

        assert!(model.navigation().history().is_empty());
        assert_eq!(model.navigation().listing(), &Listing::NotLoaded);
    }

    #[test]
    fn test_listing_is_classified() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));

        let listing = model.navigation().listing().loaded().unwrap();
        assert_eq!(listing.binders[0].name, "Documents");
        assert_eq!(listing.folders[0].name, "code");
        assert_eq!(listing.files[0].name, "todo.txt");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_back_out_goes_to_parent() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));
        model.back_out();
        assert!(model.settle(WAIT));

        assert_eq!(model.navigation().history(), ["/home", "/home/me"]);
        assert_eq!(model.navigation().current_path(), Some("/home"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_back_out_at_root_renavigates_root() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/");
        assert!(model.settle(WAIT));
        model.back_out();
        assert!(model.settle(WAIT));

        assert_eq!(model.navigation().history(), ["/", "/"]);
        assert_eq!(model.navigation().page(), 0);
    }

    #[test]
    fn test_history_steps() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home");
        assert!(model.settle(WAIT));
        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));

        assert!(!model.go_back(-1));
        assert!(!model.go_back(2));
        assert!(!model.is_busy());

        assert!(model.go_back(1));
        assert!(model.settle(WAIT));
        assert_eq!(model.navigation().current_path(), Some("/home"));
        assert_eq!(model.address().path_text, "/home");

        assert!(model.go_back(-1));
        assert!(model.settle(WAIT));
        assert_eq!(model.navigation().current_path(), Some("/home/me"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_address_to_missing_path_reverts() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));

        model.address_mut().editing_path = true;
        model.address_mut().path_text = "/does/not/exist".into();
        model.commit_address();
        assert!(model.settle(WAIT));

        assert_eq!(model.address().path_text, "/home/me");
        assert_eq!(model.navigation().history(), ["/home/me"]);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_address_to_existing_directory_navigates() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));

        model.address_mut().editing_path = true;
        model.address_mut().path_text = "/home/me/code/../Documents".into();
        model.commit_address();
        assert!(model.settle(WAIT));

        assert_eq!(model.navigation().current_path(), Some("/home/me/Documents"));
        assert_eq!(model.address().path_text, "/home/me/Documents");
        assert!(!model.address().editing_path);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_relative_address_resolves_against_current_page() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree().with_dir(".", &[]));

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));

        model.address_mut().editing_path = true;
        model.address_mut().path_text = ".".into();
        model.commit_address();
        assert!(model.settle(WAIT));
        assert_eq!(model.navigation().history(), ["/home/me"]);
        assert_eq!(model.address().path_text, "/home/me");

        model.address_mut().editing_path = true;
        model.address_mut().path_text = "code".into();
        model.commit_address();
        assert!(model.settle(WAIT));
        assert_eq!(model.navigation().history(), ["/home/me/code", "/home/me"]);
        assert!(model
            .navigation()
            .history()
            .iter()
            .all(|path| Path::new(path).is_absolute()));
    }

    #[test]
    fn test_unchanged_address_does_nothing() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home");
        assert!(model.settle(WAIT));

        model.address_mut().editing_path = true;
        model.commit_address();
        assert!(!model.is_busy());
        assert!(!model.address().editing_path);
    }

    #[test]
    fn test_open_entry_dispatch() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, launcher) = model_with(&runtime, sample_tree());

        model.navigate_to("/home/me");
        assert!(model.settle(WAIT));
        let listing = model.navigation().listing().loaded().cloned().unwrap();

        model.open_entry(&listing.files[0]);
        assert!(!model.is_busy());
        assert_eq!(*launcher.opened.lock(), vec!["/home/me/todo.txt".to_string()]);

        model.open_entry(&listing.folders[0]);
        assert!(model.settle(WAIT));
        assert_eq!(model.navigation().current_path(), Some("/home/me/code"));
    }

    #[test]
    fn test_slow_fetch_does_not_clobber_newer_page() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let tree = sample_tree().with_delay("/home", Duration::from_millis(200));
        let (mut model, _) = model_with(&runtime, tree);

        model.navigate_to("/home");
        model.navigate_to("/home/me/code");
        assert!(model.settle(WAIT));

        assert_eq!(model.navigation().history(), ["/home/me/code"]);
        let listing = model.navigation().listing().loaded().unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_failed_navigation_keeps_page() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut model, _) = model_with(&runtime, sample_tree());

        model.navigate_to("/home");
        assert!(model.settle(WAIT));
        model.navigate_to("/nowhere");
        assert!(model.settle(WAIT));

        assert_eq!(model.navigation().history(), ["/home"]);
        assert_eq!(model.navigation().listing().loaded().unwrap().folders.len(), 1);
    }
}
