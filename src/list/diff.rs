//! Row-level diff between two entry lists.
//!
//! Items are matched by id along a longest common subsequence, so a row that
//! merely shifted because something was inserted above it is not reported.
//! Ids that fall outside the subsequence but exist on both sides become moves.
//! Matched rows (including moved ones) are reported as changed when their
//! content differs or their selected state flipped.

use crate::list::entry::SelectableEntry;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A row that kept its identity but changed position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// Minimal description of what a renderer must redraw.
///
/// `removed` and `moved.from` index the old list; `inserted`, `changed` and
/// `moved.to` index the new list. All vectors are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDiff {
    pub removed: Vec<usize>,
    pub inserted: Vec<usize>,
    pub moved: Vec<Move>,
    pub changed: Vec<usize>,
    pub old_selected: Option<usize>,
    pub new_selected: Option<usize>,
}

impl ListDiff {
    /// True when nothing needs redrawing
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.inserted.is_empty()
            && self.moved.is_empty()
            && self.changed.is_empty()
    }

    /// New-list rows that must be drawn again
    pub fn dirty_rows(&self) -> BTreeSet<usize> {
        self.inserted
            .iter()
            .copied()
            .chain(self.changed.iter().copied())
            .chain(self.moved.iter().map(|m| m.to))
            .collect()
    }

    /// `(old, new)` index pairs of rows that kept their relative order.
    ///
    /// Together with `moved` this is every row present on both sides; a
    /// renderer can carry those rows over and rebuild only `dirty_rows`.
    pub fn retained_pairs(&self, old_len: usize, new_len: usize) -> Vec<(usize, usize)> {
        let gone: BTreeSet<usize> = self
            .removed
            .iter()
            .copied()
            .chain(self.moved.iter().map(|m| m.from))
            .collect();
        let arrived: BTreeSet<usize> = self
            .inserted
            .iter()
            .copied()
            .chain(self.moved.iter().map(|m| m.to))
            .collect();

        let old_kept = (0..old_len).filter(|i| !gone.contains(i));
        let new_kept = (0..new_len).filter(|j| !arrived.contains(j));
        old_kept.zip(new_kept).collect()
    }
}

/// Diff `old` against `new`, given the selected index on each side.
pub fn diff_lists(
    old: &[SelectableEntry],
    old_selected: Option<usize>,
    new: &[SelectableEntry],
    new_selected: Option<usize>,
) -> ListDiff {
    let matched = common_subsequence(old, new);

    let mut old_matched = vec![false; old.len()];
    let mut new_matched = vec![false; new.len()];
    for &(i, j) in &matched {
        old_matched[i] = true;
        new_matched[j] = true;
    }

    // Unmatched old rows, grouped by id, in order
    let mut leftovers: HashMap<Option<&str>, VecDeque<usize>> = HashMap::new();
    for (i, entry) in old.iter().enumerate() {
        if !old_matched[i] {
            leftovers.entry(entry.id.as_deref()).or_default().push_back(i);
        }
    }

    let mut diff = ListDiff {
        old_selected,
        new_selected,
        ..ListDiff::default()
    };

    let mut pairs = matched;
    for (j, entry) in new.iter().enumerate() {
        if new_matched[j] {
            continue;
        }
        let from = leftovers
            .get_mut(&entry.id.as_deref())
            .and_then(VecDeque::pop_front);
        match from {
            Some(from) => {
                diff.moved.push(Move { from, to: j });
                pairs.push((from, j));
            }
            None => diff.inserted.push(j),
        }
    }

    diff.removed = leftovers.into_values().flatten().collect();
    diff.removed.sort_unstable();

    for (i, j) in pairs {
        let was_selected = old_selected == Some(i);
        let is_selected = new_selected == Some(j);
        if old[i] != new[j] || was_selected != is_selected {
            diff.changed.push(j);
        }
    }
    diff.changed.sort_unstable();

    diff
}

/// Index pairs of a longest common subsequence of ids, in increasing order.
fn common_subsequence(old: &[SelectableEntry], new: &[SelectableEntry]) -> Vec<(usize, usize)> {
    let (n, m) = (old.len(), new.len());
    let width = m + 1;
    // lengths[i * width + j] = LCS length of old[i..] and new[j..]
    let mut lengths = vec![0u32; (n + 1) * width];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i * width + j] = if old[i].same_item(&new[j]) {
                lengths[(i + 1) * width + j + 1] + 1
            } else {
                lengths[(i + 1) * width + j].max(lengths[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(lengths[0] as usize);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i].same_item(&new[j]) {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[(i + 1) * width + j] >= lengths[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}
