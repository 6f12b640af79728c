//! Address bar text and autocomplete suggestions

/// Editable path field state
#[derive(Debug, Clone, Default)]
pub struct AddressBar {
    /// Current path text for editing
    pub path_text: String,
    /// Is path being edited
    pub editing_path: bool,
    /// Resolved special folders, always offered first
    defaults: Vec<String>,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the displayed path unless the user is typing
    pub fn set_path(&mut self, path: &str) {
        if !self.editing_path {
            self.path_text = path.to_string();
        }
    }

    /// Abandon the edit and show `current` again
    pub fn revert(&mut self, current: Option<&str>) {
        self.editing_path = false;
        self.path_text = current.unwrap_or_default().to_string();
    }

    pub fn set_defaults(&mut self, defaults: Vec<String>) {
        self.defaults = defaults;
    }

    /// Special folders, then history paths that are not already among them
    pub fn suggestions(&self, history: &[String]) -> Vec<String> {
        let mut suggestions = self.defaults.clone();
        suggestions.extend(
            history
                .iter()
                .filter(|path| !self.defaults.contains(path))
                .cloned(),
        );
        suggestions
    }

    /// Suggestions containing the typed text (case-insensitive), minus an exact match
    pub fn matching<'a>(&self, suggestions: &'a [String]) -> Vec<&'a str> {
        let query = self.path_text.to_lowercase();
        suggestions
            .iter()
            .filter(|s| **s != self.path_text && s.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Text to validate when the field loses focus; `None` if unchanged
    pub fn pending_commit(&self, current: Option<&str>) -> Option<String> {
        if Some(self.path_text.as_str()) == current {
            None
        } else {
            Some(self.path_text.clone())
        }
    }
}
