//! Library list and selection state

use host_proto::Library;

/// Libraries known to the host plus the picker state around them
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub libraries: Vec<Library>,

    /// Currently selected library
    pub selected: Option<Library>,

    /// Library whose root path failed validation and awaits repointing
    pub pending_library_id: Option<String>,

    /// Create-library dialog visibility
    pub create_dialog_open: bool,
}

impl LibraryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the library list, keeping the selection if it survives
    pub fn set_libraries(&mut self, libraries: Vec<Library>) {
        if let Some(selected) = &self.selected {
            if !libraries.iter().any(|lib| lib.id == selected.id) {
                self.selected = None;
            }
        }
        self.libraries = libraries;
    }

    /// Select by id; returns the new selection when it changed
    pub fn select(&mut self, library_id: &str) -> Option<Library> {
        if self.selected_id() == Some(library_id) {
            return None;
        }
        let lib = self.libraries.iter().find(|l| l.id == library_id)?.clone();
        self.selected = Some(lib.clone());
        self.pending_library_id = None;
        Some(lib)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|l| l.id.as_str())
    }

    pub fn library(&self, library_id: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.id == library_id)
    }

    /// Mark a library as unreachable (root path missing)
    pub fn mark_pending(&mut self, library_id: String) {
        if self.selected_id() == Some(library_id.as_str()) {
            self.selected = None;
        }
        self.pending_library_id = Some(library_id);
    }

    /// Remove a library registration from the local list
    pub fn remove(&mut self, library_id: &str) {
        self.libraries.retain(|l| l.id != library_id);
        if self.selected_id() == Some(library_id) {
            self.selected = None;
        }
        if self.pending_library_id.as_deref() == Some(library_id) {
            self.pending_library_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(id: &str) -> Library {
        Library {
            id: id.to_string(),
            name: format!("Library {}", id),
            icon: "📷".to_string(),
            color: "#4f6df5".to_string(),
            path: format!("/photos/{}", id),
        }
    }

    #[test]
    fn test_select_changes_once() {
        let mut state = LibraryState::new();
        state.set_libraries(vec![lib("a"), lib("b")]);

        assert!(state.select("a").is_some());
        assert!(state.select("a").is_none(), "re-selecting is a no-op");
        assert!(state.select("missing").is_none());
        assert_eq!(state.selected_id(), Some("a"));
    }

    #[test]
    fn test_set_libraries_drops_vanished_selection() {
        let mut state = LibraryState::new();
        state.set_libraries(vec![lib("a"), lib("b")]);
        state.select("b");

        state.set_libraries(vec![lib("a")]);

        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn test_mark_pending_clears_selection() {
        let mut state = LibraryState::new();
        state.set_libraries(vec![lib("a")]);
        state.select("a");

        state.mark_pending("a".to_string());

        assert_eq!(state.selected_id(), None);
        assert_eq!(state.pending_library_id.as_deref(), Some("a"));

        state.select("a");
        assert_eq!(state.pending_library_id, None, "selecting resolves pending");
    }

    #[test]
    fn test_remove() {
        let mut state = LibraryState::new();
        state.set_libraries(vec![lib("a"), lib("b")]);
        state.select("a");

        state.remove("a");

        assert_eq!(state.libraries.len(), 1);
        assert_eq!(state.selected_id(), None);
    }
}
