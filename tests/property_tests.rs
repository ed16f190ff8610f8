//! Property tests for search bookkeeping.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use uct_engine::games::{Board, Nim, TicTacToe};
use uct_engine::mcts::{search, MCTSTree, SearchConfig, StopReason, UctSearch};
use uct_engine::rules::GameState;

/// Play `choices` from the empty board, each one indexing into the current
/// legal moves, stopping early if the game ends.
fn board_from(choices: &[usize]) -> Board {
    let mut board = Board::new();
    for &choice in choices {
        if board.is_terminal().unwrap() {
            break;
        }
        let moves = board.legal_moves().unwrap();
        board = board.apply_move(&moves[choice % moves.len()]).unwrap();
    }
    board
}

/// No node has two children for the same move, and no move is both
/// expanded and still waiting.
fn assert_no_duplicate_expansion(tree: &MCTSTree<Board>) {
    for (id, node) in tree.iter() {
        let mut seen = FxHashSet::default();
        for (_, child) in tree.children(id) {
            let mv = child.move_from_parent.unwrap();
            assert!(seen.insert(mv), "{id}: move {mv} expanded twice");
        }
        for mv in &node.unexpanded {
            assert!(!seen.contains(mv), "{id}: move {mv} both expanded and pending");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_iteration_budget_is_exact(
        choices in prop::collection::vec(0usize..9, 0..6),
        iterations in 1i64..300,
        seed in any::<u64>(),
    ) {
        let board = board_from(&choices);
        prop_assume!(!board.is_terminal().unwrap());

        let game = TicTacToe::new();
        let config = SearchConfig::budget(0.0, iterations).with_seed(seed);
        let mut search = UctSearch::new(&game, &board, config).unwrap();
        let report = search.run().unwrap();

        prop_assert_eq!(report.stats.iterations, iterations as u64);
        prop_assert_eq!(report.stats.stop_reason, StopReason::IterationLimit);
        prop_assert_eq!(search.tree().root_node().visits as i64, iterations);
        prop_assert!(board.legal_moves().unwrap().contains(&report.best_move));
    }

    #[test]
    fn prop_tree_stays_consistent(
        choices in prop::collection::vec(0usize..9, 0..5),
        iterations in 1i64..400,
        seed in any::<u64>(),
    ) {
        let board = board_from(&choices);
        prop_assume!(!board.is_terminal().unwrap());

        let game = TicTacToe::new();
        let config = SearchConfig::budget(0.0, iterations).with_seed(seed);
        let mut search = UctSearch::new(&game, &board, config).unwrap();
        search.run().unwrap();

        let tree = search.tree();
        prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
        assert_no_duplicate_expansion(tree);

        for (_, node) in tree.iter() {
            let total: f64 = node.score_sums.as_slice().iter().sum();
            // Win/loss pays 1.0 in total and a draw pays 0.5 + 0.5.
            prop_assert!((total - node.visits as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_same_seed_same_tree(
        players in 1usize..6,
        stones in 1u32..20,
        seed in any::<u64>(),
    ) {
        let game = Nim::new(players, stones);
        let config = SearchConfig::budget(0.0, 120).with_seed(seed);

        let mut a = UctSearch::new(&game, &game.initial_state(), config.clone()).unwrap();
        let mut b = UctSearch::new(&game, &game.initial_state(), config).unwrap();
        let ra = a.run().unwrap();
        let rb = b.run().unwrap();

        prop_assert_eq!(ra.best_move, rb.best_move);
        prop_assert_eq!(a.root_visits(), b.root_visits());
        prop_assert_eq!(a.tree().len(), b.tree().len());
    }

    #[test]
    fn prop_any_time_budget_returns_legal_move(
        seconds in prop::sample::select(vec![-1.0, 0.0, 1e-9, 1e30, f64::MAX, f64::INFINITY]),
        iterations in 1i64..60,
        choices in prop::collection::vec(0usize..9, 0..6),
        seed in any::<u64>(),
    ) {
        let board = board_from(&choices);
        prop_assume!(!board.is_terminal().unwrap());

        let config = SearchConfig::budget(seconds, iterations).with_seed(seed);
        // Must not panic for any budget.
        let limit = config.time_limit();
        prop_assert!(limit.is_none() || seconds == 1e-9);

        let report = search(&TicTacToe::new(), &board, &config).unwrap();
        prop_assert!(board.legal_moves().unwrap().contains(&report.best_move));
        prop_assert!(report.stats.iterations >= 1);
        prop_assert!(report.stats.iterations <= iterations as u64);
    }

    #[test]
    fn prop_probabilities_sum_to_one(
        stones in 2u32..25,
        iterations in 1i64..200,
        seed in any::<u64>(),
    ) {
        let game = Nim::new(2, stones);
        let config = SearchConfig::budget(0.0, iterations).with_seed(seed);
        let mut search = UctSearch::new(&game, &game.initial_state(), config).unwrap();
        search.run().unwrap();

        let total: f64 = search.action_probabilities().iter().map(|(_, p)| p).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
