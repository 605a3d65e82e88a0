//! Grid selection model
//!
//! Tracks which grid items are selected, supporting plain click,
//! ctrl/cmd-click and shift-range selection. The selection is reconciled
//! against the item list whenever the host refreshes it, so it only ever
//! contains ids that are actually on screen.

use host_proto::Item;

/// Modifier keys active during a grid click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS
    pub command: bool,
    pub shift: bool,
}

/// Multi-select state for the photo grid
///
/// All operations are total over valid inputs; an out-of-bounds index is
/// a caller contract violation, not a recoverable error.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Selected item ids in insertion order
    selected: Vec<String>,

    /// Last interacted index, the anchor for shift-range selection
    anchor: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single item
    pub fn select_single(&mut self, index: usize, id: &str) {
        self.selected.clear();
        self.selected.push(id.to_string());
        self.anchor = Some(index);
    }

    /// Toggle membership of a single item, leaving the rest untouched
    pub fn toggle(&mut self, index: usize, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
        self.anchor = Some(index);
    }

    /// Union every item between the anchor and `target_index` (inclusive,
    /// either direction) into the selection. Ids outside the range stay
    /// selected. Without an anchor this degrades to `select_single`.
    pub fn select_range(&mut self, target_index: usize, items: &[Item]) {
        let anchor = match self.anchor {
            Some(a) => a,
            None => {
                if let Some(item) = items.get(target_index) {
                    self.select_single(target_index, &item.id);
                }
                return;
            }
        };

        let (lo, hi) = (anchor.min(target_index), anchor.max(target_index));
        if lo >= items.len() {
            return;
        }
        for item in &items[lo..=hi.min(items.len() - 1)] {
            if !self.selected.iter().any(|s| s == &item.id) {
                self.selected.push(item.id.clone());
            }
        }
    }

    /// Preserve multi-select when opening a context menu: selecting an
    /// already-selected item is a no-op, anything else becomes the sole
    /// selection.
    pub fn right_click_select(&mut self, index: usize, id: &str) {
        if !self.contains(id) {
            self.select_single(index, id);
        }
    }

    /// Empty the selection and reset the anchor
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Drop ids that are no longer present in the authoritative item list
    pub fn reconcile(&mut self, items: &[Item]) {
        self.selected.retain(|id| items.iter().any(|item| &item.id == id));
    }

    /// Apply the observed UI click semantics: plain click selects, cmd
    /// toggles, shift extends from the anchor (or selects when there is
    /// none).
    pub fn on_item_click(&mut self, index: usize, items: &[Item], mods: ClickModifiers) {
        let id = match items.get(index) {
            Some(item) => item.id.clone(),
            None => return,
        };

        if mods.command {
            self.toggle(index, &id);
        } else if mods.shift && self.anchor.is_some() {
            self.select_range(index, items);
        } else {
            self.select_single(index, &id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            original_name: format!("{}.jpg", id),
            file_type: "image/jpeg".to_string(),
            file_size: 1024,
            width: Some(640),
            height: Some(480),
            checksum: "0".repeat(16),
            is_favorite: false,
            is_screenshot: false,
            is_screen_recording: false,
            live_video: None,
            created_at: Utc::now(),
        }
    }

    fn items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| item(id)).collect()
    }

    #[test]
    fn test_select_single_replaces() {
        let list = items(&["a", "b", "c"]);
        let mut sel = SelectionState::new();

        sel.select_single(0, &list[0].id);
        sel.select_single(2, &list[2].id);

        assert_eq!(sel.ids(), &["c".to_string()]);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn test_toggle_is_involution() {
        let list = items(&["a", "b"]);
        let mut sel = SelectionState::new();
        sel.select_single(0, &list[0].id);

        sel.toggle(1, "b");
        assert!(sel.contains("a") && sel.contains("b"));

        sel.toggle(1, "b");
        assert_eq!(sel.ids(), &["a".to_string()]);
    }

    #[test]
    fn test_range_is_symmetric() {
        let list = items(&["a", "b", "c", "d"]);

        let mut forward = SelectionState::new();
        forward.select_single(1, "b");
        forward.select_range(3, &list);

        let mut backward = SelectionState::new();
        backward.select_single(3, "d");
        backward.select_range(1, &list);

        let mut f: Vec<_> = forward.ids().to_vec();
        let mut b: Vec<_> = backward.ids().to_vec();
        f.sort();
        b.sort();
        assert_eq!(f, b);
        assert_eq!(f, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_range_preserves_outside_selection() {
        let list = items(&["a", "b", "c", "d", "e"]);
        let mut sel = SelectionState::new();

        sel.toggle(4, "e");
        sel.toggle(0, "a");
        sel.select_range(2, &list);

        assert!(sel.contains("e"), "ids outside the range are kept");
        assert!(sel.contains("a") && sel.contains("b") && sel.contains("c"));
        assert!(!sel.contains("d"));
    }

    #[test]
    fn test_range_without_anchor_selects_single() {
        let list = items(&["a", "b", "c"]);
        let mut sel = SelectionState::new();

        sel.select_range(1, &list);

        assert_eq!(sel.ids(), &["b".to_string()]);
        assert_eq!(sel.anchor(), Some(1));
    }

    #[test]
    fn test_reconcile_drops_missing_ids() {
        let list = items(&["a", "b", "c", "d"]);
        let mut sel = SelectionState::new();
        sel.select_single(0, "a");
        sel.select_range(2, &list);
        sel.toggle(3, "d");
        assert_eq!(sel.len(), 4);

        sel.reconcile(&items(&["a", "c"]));

        assert_eq!(sel.len(), 2);
        assert!(sel.contains("a") && sel.contains("c"));
    }

    #[test]
    fn test_right_click_preserves_multi_select() {
        let list = items(&["a", "b", "c"]);
        let mut sel = SelectionState::new();
        sel.select_single(0, "a");
        sel.select_range(2, &list);

        sel.right_click_select(1, "b");
        assert_eq!(sel.len(), 3, "context click on selected item is a no-op");

        sel.clear();
        sel.right_click_select(1, "b");
        assert_eq!(sel.ids(), &["b".to_string()]);
    }

    #[test]
    fn test_plain_click_on_sole_selected_reselects() {
        let list = items(&["a", "b"]);
        let mut sel = SelectionState::new();
        sel.on_item_click(0, &list, ClickModifiers::default());
        sel.on_item_click(0, &list, ClickModifiers::default());

        assert_eq!(sel.ids(), &["a".to_string()], "no toggle-off for plain click");
    }

    #[test]
    fn test_shift_click_without_anchor() {
        let list = items(&["a", "b", "c"]);
        let mut sel = SelectionState::new();

        sel.on_item_click(2, &list, ClickModifiers { command: false, shift: true });

        assert_eq!(sel.ids(), &["c".to_string()]);
    }

    #[test]
    fn test_clear_resets_anchor() {
        let list = items(&["a", "b", "c"]);
        let mut sel = SelectionState::new();
        sel.on_item_click(1, &list, ClickModifiers::default());

        sel.clear();

        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
    }

    #[test]
    fn test_click_sequence() {
        // [A,B,C,D]: single(0) -> range(0..2) -> toggle(3) -> reconcile([A,C])
        let list = items(&["a", "b", "c", "d"]);
        let mut sel = SelectionState::new();

        sel.select_single(0, "a");
        assert_eq!(sel.ids(), &["a".to_string()]);
        assert_eq!(sel.anchor(), Some(0));

        sel.select_range(2, &list);
        assert_eq!(sel.len(), 3);

        sel.toggle(3, "d");
        assert_eq!(sel.len(), 4);

        sel.reconcile(&items(&["a", "c"]));
        let mut ids: Vec<_> = sel.ids().to_vec();
        ids.sort();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
