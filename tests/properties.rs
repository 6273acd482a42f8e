//! Property tests over random small positions.

use proptest::prelude::*;

use nogo_solver::board::{Board, Color};
use nogo_solver::position::Position;
use nogo_solver::solver::{Solver, SolverConfig};
use nogo_solver::symmetry::Symmetry;
use nogo_solver::transposition::{Entry, TranspositionTable};

/// Build a position by trying each (cell, color) pair in order and keeping
/// only the legal ones.
fn build(size: usize, moves: &[(usize, bool)], white_to_play: bool) -> Position {
    let mut pos = Position::new(size);
    for &(index, black) in moves {
        let index = index % (size * size);
        let pt = pos.pt(index / size + 1, index % size + 1);
        let color = if black { Color::Black } else { Color::White };
        let _ = pos.play(pt, color);
    }
    pos.to_play = if white_to_play { Color::White } else { Color::Black };
    pos
}

fn small_position() -> impl Strategy<Value = Position> {
    (
        2usize..=3,
        prop::collection::vec((0usize..9, any::<bool>()), 0..8),
        any::<bool>(),
    )
        .prop_map(|(size, moves, white)| build(size, &moves, white))
}

fn solve(pos: &Position) -> Entry {
    Solver::new(pos.clone(), SolverConfig::default())
        .solve()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fingerprint_matches_grid_encoding(pos in small_position(), seed in any::<u64>()) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let tt = TranspositionTable::with_rng(pos.size, &mut rng);
        prop_assert_eq!(tt.code(&pos), tt.code(&pos.clone()));
        prop_assert_eq!(tt.code(&pos), tt.code_2d(&Board::from(&pos)));
    }

    #[test]
    fn winning_move_is_legal_and_wins(pos in small_position()) {
        let entry = solve(&pos);
        let mover = pos.to_play;
        if entry.win {
            let mv = entry.mv.unwrap();
            prop_assert!(pos.is_legal(mv, mover));
            let mut next = pos.clone();
            next.play(mv, mover).unwrap();
            prop_assert!(!solve(&next).win);
        } else {
            prop_assert_eq!(entry.mv, None);
        }
    }

    #[test]
    fn no_legal_move_is_a_loss(pos in small_position()) {
        if !pos.has_legal_move(pos.to_play) {
            prop_assert_eq!(solve(&pos), Entry::LOSS);
        }
    }

    #[test]
    fn verdict_is_invariant_under_symmetry(pos in small_position()) {
        let verdict = solve(&pos).win;
        let board = Board::from(&pos);
        for sym in Symmetry::ALL {
            let image = Position::from_board(&sym.apply(&board), pos.to_play);
            let entry = solve(&image);
            prop_assert_eq!(entry.win, verdict, "{:?}", sym);
            if let Some(mv) = entry.mv {
                prop_assert!(image.is_legal(mv, image.to_play));
            }
        }
    }

    #[test]
    fn solve_leaves_position_untouched(pos in small_position()) {
        let mut solver = Solver::new(pos.clone(), SolverConfig::default());
        solver.solve().unwrap();
        prop_assert_eq!(solver.position(), &pos);
    }
}
