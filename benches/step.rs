use criterion::{black_box, criterion_group, criterion_main, Criterion};
use padlife::seed::random_grid;
use padlife::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn soup(rows: usize, cols: usize) -> Board {
  let mut rng = SmallRng::seed_from_u64(0x5eed);
  Board::new(&random_grid(rows, cols, 0.35, &mut rng)).unwrap()
}

fn step_benchmark(c: &mut Criterion) {
  let board = soup(512, 512);

  c.bench_function("512x512 soup 100 generations", |b| b.iter(|| {
    let mut uni = Universe::new(board.clone());
    uni.simulate(black_box(100));
  }));

  c.bench_function("512x512 soup 100 generations parallel", |b| b.iter(|| {
    let stepper = Stepper::for_board(&board).parallel(true);
    let mut uni = Universe::with_stepper(board.clone(), stepper);
    uni.simulate(black_box(100));
  }));
}

criterion_group!(benches, step_benchmark);
criterion_main!(benches);
