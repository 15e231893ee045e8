use ndarray::Array2;
use padlife::*;
use proptest::collection::vec;
use proptest::prelude::*;

fn grids() -> impl Strategy<Value = Array2<u8>> {
  (2usize..12, 2usize..12).prop_flat_map(|(rows, cols)| {
    vec(0u8..=1, rows * cols)
      .prop_map(move |cells| Array2::from_shape_vec((rows, cols), cells).unwrap())
  })
}

proptest! {
  #[test]
  fn stays_binary_with_dead_border(grid in grids(), generations in 0usize..20) {
    let mut uni = Universe::new(Board::new(&grid).unwrap());
    for _ in 0..generations {
      uni.step();
      prop_assert!(uni.board().cells().iter().all(|&c| c == DEAD || c == ALIVE));
      prop_assert!(uni.board().border_is_dead());
    }
    prop_assert_eq!(uni.board().shape(), grid.dim());
  }

  #[test]
  fn single_steps_compose(grid in grids(), generations in 0usize..20) {
    let board = Board::new(&grid).unwrap();
    let mut stepped = Universe::new(board.clone());
    for _ in 0..generations {
      stepped.simulate(1);
    }
    prop_assert_eq!(stepped.board(), &run(board, generations));
  }

  #[test]
  fn deterministic(grid in grids(), generations in 0usize..20) {
    let board = Board::new(&grid).unwrap();
    prop_assert_eq!(run(board.clone(), generations), run(board, generations));
  }

  #[test]
  fn parallel_agrees(grid in grids(), generations in 1usize..10) {
    let board = Board::new(&grid).unwrap();
    let stepper = Stepper::for_board(&board).parallel(true);
    let mut uni = Universe::with_stepper(board.clone(), stepper);
    uni.simulate(generations);
    prop_assert_eq!(uni.board(), &run(board, generations));
  }

  #[test]
  fn counts_match_windows(grid in grids()) {
    let mut board = Board::new(&grid).unwrap();
    let before = board.clone();
    let mut stepper = Stepper::for_board(&board);
    stepper.step(&mut board);
    for ((r, c), &n) in stepper.counts().indexed_iter() {
      prop_assert_eq!(n, before.neighbors(r, c));
      let status = before.get(r, c).unwrap();
      prop_assert_eq!(board.get(r, c), Some(GAME_OF_LIFE.next(status, n)));
    }
  }

  #[test]
  fn rle_preserves_board(grid in grids()) {
    let board = Board::new(&grid).unwrap();
    let text = padlife::rle::write(&board);
    prop_assert_eq!(Board::new(&padlife::rle::read(&text).unwrap()).unwrap(), board);
  }

  #[test]
  fn rle_truncated_input_is_an_error(grid in grids(), cut in any::<prop::sample::Index>()) {
    let text = padlife::rle::write(&Board::new(&grid).unwrap());
    let end = text.find('!').unwrap();
    let cut = cut.index(end);
    prop_assert!(padlife::rle::read(&text[..cut]).is_err());
  }

  #[test]
  fn rle_mutated_input_keeps_header_size(
    grid in grids(),
    pick in any::<prop::sample::Index>(),
    replacement in prop::sample::select(vec!['b', 'o', '$', '!', '0', '7', '9', 'z'])
  ) {
    let text = padlife::rle::write(&Board::new(&grid).unwrap());
    let body = text.find('\n').unwrap() + 1;
    let i = body + pick.index(text.len() - body);
    let mut mutated = text.clone();
    mutated.replace_range(i..i + 1, &replacement.to_string());
    if let Ok(decoded) = padlife::rle::read(&mutated) {
      prop_assert_eq!(decoded.dim(), grid.dim());
    }
  }

  #[test]
  fn rejects_other_values(grid in grids(), value in 2i64..100, pick in any::<prop::sample::Index>()) {
    let mut grid = grid.mapv(i64::from);
    let (rows, cols) = grid.dim();
    let i = pick.index(rows * cols);
    grid[[i / cols, i % cols]] = value;
    prop_assert_eq!(
      Board::new(&grid),
      Err(InvalidBoardError::InvalidValue { row: i / cols, col: i % cols, value })
    );
  }
}
