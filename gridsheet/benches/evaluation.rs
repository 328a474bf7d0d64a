/// Measures the two costs a user perceives when editing a sheet:
/// 1) The edit itself (graph rewiring plus cache invalidation).
/// 2) The first read after the edit, which re-evaluates the dirtied chain.
///
/// The dependency chain is the worst case for invalidation: every cell
/// depends on the one before it, so an edit at the head dirties everything.
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use gridsheet::position::Position;
use gridsheet::Sheet;

const CHAIN_LENGTHS: [isize; 3] = [10, 100, 1_000];

fn build_chain(length: isize) -> Sheet {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").unwrap();

    for row in 1..length {
        let previous = Position::new(row - 1, 0);
        sheet
            .set_cell(Position::new(row, 0), &format!("={}+1", previous))
            .unwrap();
    }

    sheet
}

fn edit_chain_head(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("edit_chain_head");

    for &length in CHAIN_LENGTHS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |bencher, &length| {
            bencher.iter_batched(
                || {
                    let sheet = build_chain(length);
                    // Populate every cache so the edit has something to dirty.
                    let _ = sheet.cell_value(Position::new(length - 1, 0));
                    sheet
                },
                |mut sheet| {
                    sheet.set_cell(Position::new(0, 0), "2").unwrap();
                    sheet
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn reevaluate_chain(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("reevaluate_chain");

    for &length in CHAIN_LENGTHS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |bencher, &length| {
            bencher.iter_batched(
                || {
                    let mut sheet = build_chain(length);
                    let _ = sheet.cell_value(Position::new(length - 1, 0));
                    sheet.set_cell(Position::new(0, 0), "2").unwrap();
                    sheet
                },
                |sheet| {
                    let value = sheet.cell_value(Position::new(length - 1, 0)).unwrap();
                    (sheet, value)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = evaluation;
    config = Criterion::default();
    targets = edit_chain_head, reevaluate_chain
}
criterion_main!(evaluation);
