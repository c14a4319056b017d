use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dashboard_grid::config::GridSettings;
use dashboard_grid::dashboard::{Dashboard, DashboardGrid};
use dashboard_grid::geometry::compute_layout;
use dashboard_grid::layout_dump::LayoutDump;
use dashboard_grid::placement::find_best_new_position;
use dashboard_grid::position::TilePosition;
use dashboard_grid::scaling::default_self_scaling_types;
use dashboard_grid::tile::{QueryTile, TileContent, TileItemHolder, VisualizationType};
use std::hint::black_box;

// Rows of three 16-column tiles on a 48-column grid, with every fourth row
// leaving its right third empty.
fn dense_dashboard(rows: usize) -> Dashboard {
    let mut items = Vec::new();
    for row in 0..rows {
        let per_row = if row % 4 == 3 { 2 } else { 3 };
        for col in 0..per_row {
            let id = format!("t{row}-{col}");
            let position =
                TilePosition::new(col as i64 * 16, row as i64 * 6, 16, 6).expect("valid position");
            let content = TileContent::Query(QueryTile {
                query: format!("query_{row}_{col}"),
                visualization: if col == 1 {
                    VisualizationType::Map
                } else {
                    VisualizationType::Bar
                },
                title: None,
            });
            items.push(TileItemHolder::new(id, position, content));
        }
    }
    Dashboard::new("bench", "Bench", DashboardGrid::default(), items).expect("valid dashboard")
}

fn bench_find_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_new_position");
    for rows in [4usize, 32, 256] {
        let board = dense_dashboard(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &board, |b, board| {
            let source = &board.items()[board.items().len() / 2];
            b.iter(|| {
                let placement = find_best_new_position(black_box(board.items()), source, 48)
                    .expect("placement failed");
                black_box(placement.index);
            });
        });
    }
    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_tile");
    for rows in [4usize, 32, 256] {
        let board = dense_dashboard(rows);
        let source = board.items()[0].id.clone();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &board, |b, board| {
            b.iter(|| {
                let next = board.clone_tile(black_box(&source)).expect("clone failed");
                black_box(next.items().len());
            });
        });
    }
    group.finish();
}

fn bench_layout_dump(c: &mut Criterion) {
    let board = dense_dashboard(64);
    let settings = GridSettings::default();
    let self_scaling = default_self_scaling_types();
    c.bench_function("layout_dump_64_rows", |b| {
        b.iter(|| {
            let grid = compute_layout(&settings, 1200.0, black_box(794.0), false);
            let dump = LayoutDump::from_dashboard(&board, &grid, &self_scaling, false)
                .expect("dump failed");
            black_box(dump.tiles.len());
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_find_position, bench_clone, bench_layout_dump
);
criterion_main!(benches);
