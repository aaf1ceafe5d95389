use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use blockfall::core::{Board, GameState};
use blockfall::types::{InputState, PieceKind, RotateDirection};

fn bench_update(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let input = InputState::new(false, true);

    c.bench_function("game_update_16ms", |b| {
        b.iter(|| {
            state.update(black_box(16), input);
            if state.game_over() {
                state = GameState::new(12345);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_lines())
        })
    });
}

fn bench_lock_and_spawn(c: &mut Criterion) {
    c.bench_function("hard_drop_lock_spawn", |b| {
        b.iter_batched(
            || GameState::new(12345),
            |mut state| {
                state.hard_drop();
                state
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut dx = 1;

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            if !state.move_piece(black_box(dx)) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(black_box(RotateDirection::Clockwise));
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_line_clear,
    bench_lock_and_spawn,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
