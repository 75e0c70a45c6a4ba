//! Single-selection list synchronizer.
//!
//! Tracks the selected pack by id, not by position: after a list reload the
//! selected row is found again by id, or nothing is selected if the id is gone.
//! Every operation is synchronous and in-memory.

use crate::list::diff::{diff_lists, ListDiff};
use crate::list::entry::SelectableEntry;
use crate::list::renderer::ListRenderer;
use log::debug;

/// Callback fired with the newly selected id (`None` for system icons)
pub type SelectionCallback = Box<dyn FnMut(Option<String>) + Send>;

pub struct SelectableList {
    entries: Vec<SelectableEntry>,
    /// Id of the checked entry
    checked_id: Option<String>,
    /// Index of the checked entry, `None` if the id matches no row
    checked_index: Option<usize>,
    renderer: Box<dyn ListRenderer>,
    on_select: Option<SelectionCallback>,
}

impl SelectableList {
    pub fn new(renderer: Box<dyn ListRenderer>) -> Self {
        Self {
            entries: Vec::new(),
            checked_id: None,
            checked_index: None,
            renderer,
            on_select: None,
        }
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(Option<String>) + Send + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Set the selection target without notifying the renderer
    pub fn set_initial_selection(&mut self, id: Option<String>) {
        self.checked_id = id;
        self.checked_index = resolve_index(&self.entries, self.checked_id.as_deref());
    }

    /// Replace the list and report the rows that need redrawing.
    ///
    /// The selected row is the one whose id equals the selection id; a `None`
    /// selection picks row 0, where the sentinel lives.
    pub fn submit_list(&mut self, entries: Vec<SelectableEntry>) -> ListDiff {
        let new_index = resolve_index(&entries, self.checked_id.as_deref());
        let diff = diff_lists(&self.entries, self.checked_index, &entries, new_index);

        debug!(
            "pack list replaced: {} rows, selected {:?} -> {:?}",
            entries.len(),
            self.checked_index,
            new_index
        );

        self.entries = entries;
        self.checked_index = new_index;
        self.renderer.list_updated(&diff);
        diff
    }

    /// Handle the user activating row `index`.
    ///
    /// Returns false, and notifies nobody, when the row is already selected or
    /// does not exist.
    pub fn select_by_user_tap(&mut self, index: usize) -> bool {
        if self.checked_index == Some(index) {
            return false;
        }
        let Some(entry) = self.entries.get(index) else {
            debug!("ignoring tap on missing row {index}");
            return false;
        };

        let id = entry.id.clone();
        let previous = self.checked_index.replace(index);
        self.checked_id = id.clone();

        if let Some(previous) = previous {
            self.renderer.item_changed(previous);
        }
        self.renderer.item_changed(index);

        if let Some(callback) = self.on_select.as_mut() {
            callback(id);
        }
        true
    }

    pub fn entries(&self) -> &[SelectableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.checked_index
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.checked_id.as_deref()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.checked_index == Some(index)
    }
}

/// Row for `id`: the first row for a pack id, row 0 for system icons
fn resolve_index(entries: &[SelectableEntry], id: Option<&str>) -> Option<usize> {
    match id {
        Some(id) => entries
            .iter()
            .position(|entry| entry.id.as_deref() == Some(id)),
        None if entries.is_empty() => None,
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::entry::{build_entry_list, IconHandle};
    use crate::list::renderer::tests::RecordingRenderer;
    use crate::list::renderer::ListEvent;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn packs() -> Vec<SelectableEntry> {
        build_entry_list(
            "System icons",
            IconHandle::new("default"),
            vec![
                SelectableEntry::new("com.a", "Alpha", IconHandle::new("a")),
                SelectableEntry::new("com.b", "Beta", IconHandle::new("b")),
            ],
        )
    }

    fn list_with_recorder() -> (SelectableList, RecordingRenderer, Arc<Mutex<Vec<Option<String>>>>) {
        let recorder = RecordingRenderer::default();
        let mut list = SelectableList::new(Box::new(recorder.clone()));
        let selections = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&selections);
        list.set_on_select(move |id| sink.lock().push(id));
        (list, recorder, selections)
    }

    #[test]
    fn test_initial_selection_does_not_render() {
        let (mut list, recorder, _) = list_with_recorder();
        list.set_initial_selection(Some("com.b".to_string()));
        assert!(recorder.take().is_empty());
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_submit_selects_matching_row() {
        let (mut list, recorder, _) = list_with_recorder();
        list.set_initial_selection(Some("com.b".to_string()));
        list.submit_list(packs());

        assert_eq!(list.selected_index(), Some(2));
        assert!(list.entries()[0].is_sentinel());
        assert!(!list.is_selected(1));

        let events = recorder.take();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], ListEvent::Updated(diff) if diff.new_selected == Some(2)));
    }

    #[test]
    fn test_none_selection_picks_sentinel() {
        let (mut list, _, _) = list_with_recorder();
        list.submit_list(packs());
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_unknown_selection_selects_nothing() {
        let (mut list, _, _) = list_with_recorder();
        list.set_initial_selection(Some("com.uninstalled".to_string()));
        list.submit_list(packs());

        assert_eq!(list.selected_index(), None);
        assert!((0..list.len()).all(|i| !list.is_selected(i)));
    }

    #[test]
    fn test_tap_notifies_old_and_new_rows() {
        let (mut list, recorder, selections) = list_with_recorder();
        list.set_initial_selection(Some("com.b".to_string()));
        list.submit_list(packs());
        recorder.take();

        assert!(list.select_by_user_tap(1));

        assert_eq!(
            recorder.take(),
            vec![ListEvent::ItemChanged(2), ListEvent::ItemChanged(1)]
        );
        assert_eq!(*selections.lock(), vec![Some("com.a".to_string())]);
        assert_eq!(list.selected_id(), Some("com.a"));
    }

    #[test]
    fn test_retap_is_silent() {
        let (mut list, recorder, selections) = list_with_recorder();
        list.submit_list(packs());
        recorder.take();

        assert!(!list.select_by_user_tap(0));
        assert!(recorder.take().is_empty());
        assert!(selections.lock().is_empty());
    }

    #[test]
    fn test_tap_from_no_selection_notifies_single_row() {
        let (mut list, recorder, selections) = list_with_recorder();
        list.set_initial_selection(Some("com.gone".to_string()));
        list.submit_list(packs());
        recorder.take();

        assert!(list.select_by_user_tap(0));
        assert_eq!(recorder.take(), vec![ListEvent::ItemChanged(0)]);
        assert_eq!(*selections.lock(), vec![None]);
    }

    #[test]
    fn test_out_of_range_tap_is_ignored() {
        let (mut list, recorder, selections) = list_with_recorder();
        list.submit_list(packs());
        recorder.take();

        assert!(!list.select_by_user_tap(17));
        assert!(recorder.take().is_empty());
        assert!(selections.lock().is_empty());
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_follows_id_across_reload() {
        let (mut list, _, _) = list_with_recorder();
        list.set_initial_selection(Some("com.b".to_string()));
        list.submit_list(packs());

        let mut reloaded = packs();
        reloaded.insert(1, SelectableEntry::new("com.0", "Aardvark", IconHandle::new("0")));
        let diff = list.submit_list(reloaded);

        assert_eq!(list.selected_index(), Some(3));
        assert_eq!(diff.inserted, vec![1]);
        assert!(diff.changed.is_empty());
    }
}
