use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use iconpack::list::{
    build_entry_list, diff_lists, IconHandle, ListDiff, ListRenderer, SelectableEntry,
};
use iconpack::SelectableList;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 3] = [50, 200, 800];

fn candidates(count: usize) -> Vec<SelectableEntry> {
    (0..count)
        .map(|i| {
            SelectableEntry::new(
                format!("org.pack{i:04}"),
                format!("Pack {i:04}"),
                IconHandle::new(format!("/packs/{i}/icon.png")),
            )
        })
        .collect()
}

fn entry_list(candidates: Vec<SelectableEntry>) -> Vec<SelectableEntry> {
    build_entry_list("System icons", IconHandle::default(), candidates)
}

/// Simulate a reinstall pass: a few packs removed, a few added, a few renamed
fn churn(base: &[SelectableEntry], rng: &mut ChaCha8Rng) -> Vec<SelectableEntry> {
    let mut next: Vec<SelectableEntry> = base
        .iter()
        .filter(|_| rng.gen_bool(0.95))
        .cloned()
        .collect();
    for entry in next.iter_mut() {
        if rng.gen_bool(0.05) {
            entry.label.push_str(" (updated)");
        }
    }
    for i in 0..base.len() / 20 {
        next.push(SelectableEntry::new(
            format!("org.new{i:04}"),
            format!("New {i:04}"),
            IconHandle::default(),
        ));
    }
    next
}

struct NullRenderer;

impl ListRenderer for NullRenderer {
    fn list_updated(&mut self, diff: &ListDiff) {
        black_box(diff);
    }

    fn item_changed(&mut self, index: usize) {
        black_box(index);
    }
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_lists");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for size in SIZES {
        let base = candidates(size);
        let old = entry_list(base.clone());
        let churned = entry_list(churn(&base, &mut rng));

        let mut shuffled_base = base.clone();
        shuffled_base.shuffle(&mut rng);
        // build_entry_list re-sorts, so shuffle after building to get real moves
        let mut shuffled = entry_list(shuffled_base);
        shuffled[1..].shuffle(&mut rng);

        group.bench_with_input(BenchmarkId::new("identical", size), &old, |b, old| {
            b.iter(|| diff_lists(black_box(old), Some(1), black_box(old), Some(1)))
        });
        group.bench_with_input(BenchmarkId::new("churn", size), &churned, |b, new| {
            b.iter(|| diff_lists(black_box(&old), Some(1), black_box(new), Some(1)))
        });
        group.bench_with_input(BenchmarkId::new("shuffled", size), &shuffled, |b, new| {
            b.iter(|| diff_lists(black_box(&old), Some(1), black_box(new), Some(1)))
        });
    }
    group.finish();
}

fn bench_submit_and_tap(c: &mut Criterion) {
    let mut group = c.benchmark_group("selectable_list");

    for size in SIZES {
        let lists = [entry_list(candidates(size)), entry_list(candidates(size + 10))];

        group.bench_with_input(BenchmarkId::new("submit", size), &lists, |b, lists| {
            let mut list = SelectableList::new(Box::new(NullRenderer));
            list.set_initial_selection(Some("org.pack0001".to_string()));
            let mut flip = 0;
            b.iter(|| {
                flip ^= 1;
                list.submit_list(black_box(lists[flip].clone()))
            })
        });

        group.bench_with_input(BenchmarkId::new("tap", size), &lists[0], |b, entries| {
            let mut list = SelectableList::new(Box::new(NullRenderer));
            list.submit_list(entries.clone());
            let mut index = 0;
            b.iter(|| {
                index = (index + 1) % entries.len();
                list.select_by_user_tap(black_box(index))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff, bench_submit_and_tap);
criterion_main!(benches);
