use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tinymines_core::*;

fn bench_create_level(c: &mut Criterion) {
    let mut board = Board::default();

    c.bench_function("create_level_12x8_10", |b| {
        b.iter(|| {
            board.increment_seed();
            board.create_level(black_box(10));
        })
    });
}

fn bench_full_cascade(c: &mut Criterion) {
    // one mine in the far corner, so the first reveal opens everything else
    c.bench_function("uncover_full_cascade", |b| {
        b.iter(|| {
            let mut board = Board::default();
            board
                .create_level_from_mines(&[(MAX_COLS - 1, MAX_ROWS - 1)])
                .unwrap();
            black_box(board.uncover_cells(0, 0))
        })
    });
}

fn bench_cursor(c: &mut Criterion) {
    let mut board = Board::default();
    board.create_level(10);

    c.bench_function("set_cursor_position", |b| {
        b.iter(|| board.set_cursor_position(black_box(3), black_box(4)))
    });
}

criterion_group!(benches, bench_create_level, bench_full_cascade, bench_cursor);
criterion_main!(benches);
