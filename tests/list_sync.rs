use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use iconpack::list::{
    build_entry_list, diff_lists, ChannelRenderer, IconHandle, ListEvent, SelectableEntry,
};
use iconpack::selection::SYSTEM_ICONS_LABEL;
use iconpack::SelectableList;

fn pack(id: &str, label: &str) -> SelectableEntry {
    SelectableEntry::new(id, label, IconHandle::new(format!("{id}.png")))
}

fn entries(candidates: Vec<SelectableEntry>) -> Vec<SelectableEntry> {
    build_entry_list(SYSTEM_ICONS_LABEL, IconHandle::default(), candidates)
}

fn channel_list() -> (SelectableList, UnboundedReceiver<ListEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SelectableList::new(Box::new(ChannelRenderer::new(tx))), rx)
}

fn drain(rx: &mut UnboundedReceiver<ListEvent>) -> Vec<ListEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn submit_marks_selected_row_behind_sentinel() {
    let (mut list, mut rx) = channel_list();
    list.set_initial_selection(Some("com.b".to_string()));

    list.submit_list(entries(vec![pack("com.a", "Alpha"), pack("com.b", "Beta")]));

    assert!(list.entries()[0].is_sentinel());
    assert_eq!(list.selected_index(), Some(2));
    assert!(list.is_selected(2));
    assert!(!list.is_selected(1));
    assert!(!list.is_selected(0));

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1, "one notification per submit");
    match &events[0] {
        ListEvent::Updated(diff) => {
            assert_eq!(diff.inserted, vec![0, 1, 2]);
            assert_eq!(diff.new_selected, Some(2));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn tap_reports_exactly_old_and_new_rows() {
    let (mut list, mut rx) = channel_list();
    list.set_initial_selection(Some("com.b".to_string()));
    list.submit_list(entries(vec![pack("com.a", "Alpha"), pack("com.b", "Beta")]));
    drain(&mut rx);

    let picked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&picked);
    list.set_on_select(move |id| sink.lock().push(id));

    assert!(list.select_by_user_tap(1));

    assert_eq!(
        drain(&mut rx),
        vec![ListEvent::ItemChanged(2), ListEvent::ItemChanged(1)]
    );
    assert_eq!(*picked.lock(), vec![Some("com.a".to_string())]);
    assert_eq!(list.selected_id(), Some("com.a"));
}

#[test]
fn repeated_tap_is_silent() {
    let (mut list, mut rx) = channel_list();
    list.submit_list(entries(vec![pack("com.a", "Alpha")]));
    drain(&mut rx);

    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    list.set_on_select(move |_| *counter.lock() += 1);

    assert!(list.select_by_user_tap(1));
    assert!(!list.select_by_user_tap(1));
    assert!(!list.select_by_user_tap(7));

    assert_eq!(*calls.lock(), 1);
    assert_eq!(drain(&mut rx).len(), 2);
}

#[test]
fn tapping_sentinel_reports_system_icons() {
    let (mut list, mut rx) = channel_list();
    list.set_initial_selection(Some("com.a".to_string()));
    list.submit_list(entries(vec![pack("com.a", "Alpha")]));
    drain(&mut rx);

    let picked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&picked);
    list.set_on_select(move |id| sink.lock().push(id));

    assert!(list.select_by_user_tap(0));
    assert_eq!(*picked.lock(), vec![None]);
    assert_eq!(list.selected_index(), Some(0));
}

#[test]
fn selection_follows_id_across_reloads() {
    let (mut list, mut rx) = channel_list();
    list.set_initial_selection(Some("com.c".to_string()));
    list.submit_list(entries(vec![pack("com.c", "Gamma")]));
    assert_eq!(list.selected_index(), Some(1));

    list.submit_list(entries(vec![
        pack("com.c", "Gamma"),
        pack("com.a", "Alpha"),
        pack("com.b", "Beta"),
    ]));
    assert_eq!(list.selected_index(), Some(3));

    // the selected pack was uninstalled
    list.submit_list(entries(vec![pack("com.a", "Alpha")]));
    assert_eq!(list.selected_index(), None);
    assert_eq!(list.selected_id(), Some("com.c"));

    assert_eq!(drain(&mut rx).len(), 3);
}

#[test]
fn diff_is_usable_without_renderer() {
    let old = entries(vec![pack("com.a", "Alpha")]);
    let new = entries(vec![pack("com.a", "Alpha"), pack("com.b", "Beta")]);

    let diff = diff_lists(&old, Some(1), &new, Some(1));

    assert_eq!(diff.inserted, vec![2]);
    assert!(diff.changed.is_empty());
    assert!(diff.removed.is_empty());
}

fn candidate_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-e]{1,2}", 0..8).prop_map(|ids| ids.into_iter().collect())
}

proptest! {
    #[test]
    fn at_most_one_row_is_selected(
        reloads in prop::collection::vec(candidate_ids(), 1..5),
        selected in prop::option::of("[a-e]{1,2}"),
        taps in prop::collection::vec(0usize..10, 0..6),
    ) {
        let (mut list, _rx) = channel_list();
        list.set_initial_selection(selected);
        let mut taps = taps.into_iter();

        for ids in reloads {
            list.submit_list(entries(
                ids.iter().map(|id| pack(id, &id.to_uppercase())).collect(),
            ));
            prop_assert!(list.entries()[0].is_sentinel());

            // the checked row, if any, is the one carrying the tracked id
            let marked: Vec<usize> = (0..list.len()).filter(|&i| list.is_selected(i)).collect();
            let expected: Vec<usize> = list
                .entries()
                .iter()
                .position(|entry| entry.id.as_deref() == list.selected_id())
                .into_iter()
                .collect();
            prop_assert_eq!(marked, expected);

            if let Some(tap) = taps.next() {
                list.select_by_user_tap(tap);
                let marked = (0..list.len()).filter(|&i| list.is_selected(i)).count();
                prop_assert!(marked <= 1);
                if tap < list.len() {
                    prop_assert!(list.is_selected(tap));
                }
            }
        }
    }

    #[test]
    fn diff_accounts_for_every_row(
        old_ids in candidate_ids(),
        new_ids in candidate_ids(),
    ) {
        let old = entries(old_ids.iter().map(|id| pack(id, id)).collect());
        let new = entries(new_ids.iter().map(|id| pack(id, id)).collect());

        let diff = diff_lists(&old, Some(0), &new, Some(0));
        let kept = diff.retained_pairs(old.len(), new.len());

        // every old row is either kept, moved or removed
        prop_assert_eq!(kept.len() + diff.moved.len() + diff.removed.len(), old.len());
        // every new row is either kept, moved or inserted
        prop_assert_eq!(kept.len() + diff.moved.len() + diff.inserted.len(), new.len());
        for (from, to) in kept {
            prop_assert_eq!(&old[from].id, &new[to].id);
        }
    }
}
