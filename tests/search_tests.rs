//! UCT integration tests using the reference games.

use std::time::{Duration, Instant};

use uct_engine::games::{Board, Nim, TicTacToe};
use uct_engine::mcts::{search, select_action, select_action_with, SearchConfig, StopReason, UctSearch};
use uct_engine::rules::GameState;
use uct_engine::SearchError;

fn seeded(iterations: i64, seed: u64) -> SearchConfig {
    SearchConfig::budget(0.0, iterations).with_seed(seed)
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_returns_legal_move_from_empty_board() {
    let game = TicTacToe::new();
    let board = Board::new();

    let mv = select_action(&game, &board, 0.0, 200).unwrap();

    assert!(board.legal_moves().unwrap().contains(&mv));
}

#[test]
fn test_single_legal_move() {
    let game = TicTacToe::new();
    // Only cell 8 is free.
    let board = Board::parse("XOX XOO OX.").unwrap();

    let mv = select_action_with(&game, &board, &seeded(3, 1)).unwrap();
    assert_eq!(mv, 8);
}

#[test]
fn test_terminal_root_is_rejected() {
    let game = TicTacToe::new();
    let board = Board::parse("XXX OO. ...").unwrap();

    assert!(matches!(
        select_action(&game, &board, 0.0, 100),
        Err(SearchError::TerminalRoot)
    ));
}

#[test]
fn test_one_iteration_expands_one_child() {
    let game = TicTacToe::new();
    let mut search = UctSearch::new(&game, &Board::new(), seeded(1, 77)).unwrap();

    let report = search.run().unwrap();

    let tree = search.tree();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.root_node().children.len(), 1);
    assert_eq!(tree.root_node().unexpanded.len(), 8);
    assert_eq!(report.stats.simulations, 1);

    let (_, child) = tree.children(tree.root()).next().unwrap();
    assert_eq!(child.move_from_parent, Some(report.best_move));
}

// =============================================================================
// Playing Strength Tests
// =============================================================================

#[test]
fn test_takes_immediate_win() {
    let game = TicTacToe::new();
    // X to move, top row open at 2.
    let board = Board::parse("XX. OO. ...").unwrap();

    let mv = select_action_with(&game, &board, &seeded(2000, 5)).unwrap();
    assert_eq!(mv, 2);
}

#[test]
fn test_blocks_opponent_threat() {
    let game = TicTacToe::new();
    // X to move; O threatens the top row at 2 and X has no win.
    let board = Board::parse("OO. X.. X..").unwrap();

    let mv = select_action_with(&game, &board, &seeded(5000, 9)).unwrap();
    assert_eq!(mv, 2);
}

#[test]
fn test_two_player_nim_strategy() {
    // The winning take leaves a multiple of four.
    for (stones, take) in [(5, 1), (6, 2), (7, 3)] {
        let game = Nim::new(2, stones);
        let mv = select_action_with(&game, &game.initial_state(), &seeded(3000, 21)).unwrap();
        assert_eq!(mv, take, "heap of {stones}");
    }
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_iteration_budget() {
    let game = TicTacToe::new();
    let report = search(&game, &Board::new(), &seeded(250, 3)).unwrap();

    assert_eq!(report.stats.iterations, 250);
    assert_eq!(report.stats.stop_reason, StopReason::IterationLimit);
}

#[test]
fn test_time_budget() {
    let game = TicTacToe::new();
    let config = SearchConfig::budget(0.05, 0).with_seed(8);

    let start = Instant::now();
    let report = search(&game, &Board::new(), &config).unwrap();

    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(report.stats.iterations >= 1);
    assert_eq!(report.stats.stop_reason, StopReason::TimeLimit);
}

#[test]
fn test_tiny_time_budget_still_moves() {
    let game = TicTacToe::new();
    let board = Board::new();

    let mv = select_action(&game, &board, 1e-9, 0).unwrap();
    assert!(board.legal_moves().unwrap().contains(&mv));
}

#[test]
fn test_extreme_budgets_return_legal_moves() {
    let game = TicTacToe::new();
    let board = Board::parse("X.. .O. ...").unwrap();

    for seconds in [-1.0, 0.0, 1e-9, 1e30, f64::INFINITY] {
        let mv = select_action(&game, &board, seconds, 50).unwrap();
        assert!(board.legal_moves().unwrap().contains(&mv), "max_seconds {seconds}");
    }
}

#[test]
fn test_max_iterations_with_time_limit() {
    let game = TicTacToe::new();
    let config = SearchConfig::budget(0.05, i64::MAX).with_seed(13);

    let report = search(&game, &Board::new(), &config).unwrap();

    assert!(report.stats.iterations >= 1);
    assert_eq!(report.stats.stop_reason, StopReason::TimeLimit);
}

#[test]
fn test_first_limit_reached_wins() {
    let game = TicTacToe::new();
    let config = SearchConfig::budget(30.0, 40).with_seed(2);

    let report = search(&game, &Board::new(), &config).unwrap();

    assert_eq!(report.stats.iterations, 40);
    assert_eq!(report.stats.stop_reason, StopReason::IterationLimit);
}

// =============================================================================
// Tree Consistency Tests
// =============================================================================

#[test]
fn test_root_visits_equal_iterations() {
    let game = TicTacToe::new();
    let mut search = UctSearch::new(&game, &Board::new(), seeded(500, 4)).unwrap();
    search.run().unwrap();

    let tree = search.tree();
    assert_eq!(tree.root_node().visits, 500);
    let child_visits: u32 = tree.children(tree.root()).map(|(_, c)| c.visits).sum();
    assert_eq!(child_visits, 500);
    tree.check_invariants().unwrap();
}

#[test]
fn test_node_states_match_their_moves() {
    let game = TicTacToe::new();
    let mut search = UctSearch::new(&game, &Board::new(), seeded(400, 6)).unwrap();
    search.run().unwrap();

    let tree = search.tree();
    for (id, node) in tree.iter() {
        for (_, child) in tree.children(id) {
            let mv = child.move_from_parent.unwrap();
            assert_eq!(node.state.apply_move(&mv).unwrap(), child.state);
        }
    }
}

#[test]
fn test_root_state_is_not_modified() {
    let game = TicTacToe::new();
    let board = Board::parse("X.. .O. ...").unwrap();
    let before = board.clone();

    select_action_with(&game, &board, &seeded(300, 12)).unwrap();

    assert_eq!(board, before);
}

#[test]
fn test_tree_stats() {
    let game = TicTacToe::new();
    let mut search = UctSearch::new(&game, &Board::new(), seeded(300, 10)).unwrap();
    let report = search.run().unwrap();

    let stats = search.tree().stats();
    assert_eq!(stats.node_count as u64, report.stats.nodes_expanded + 1);
    assert_eq!(stats.expanded_children, stats.node_count - 1);
    assert_eq!(stats.max_depth, report.stats.max_depth);
    assert!(stats.branching_factor() >= 1.0);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_deterministic_with_seed() {
    let game = TicTacToe::new();
    let board = Board::parse("X.. ... ...").unwrap();

    let mut first = UctSearch::new(&game, &board, seeded(800, 12345)).unwrap();
    let mut second = UctSearch::new(&game, &board, seeded(800, 12345)).unwrap();

    let a = first.run().unwrap();
    let b = second.run().unwrap();

    assert_eq!(a.best_move, b.best_move);
    assert_eq!(first.root_visits(), second.root_visits());
    assert_eq!(first.tree().len(), second.tree().len());
}

#[test]
fn test_different_seeds_explore_differently() {
    let game = TicTacToe::new();

    let mut a = UctSearch::new(&game, &Board::new(), seeded(1, 1)).unwrap();
    let mut b = UctSearch::new(&game, &Board::new(), seeded(1, 2)).unwrap();

    // The shuffled move order differs for almost every pair of seeds.
    let order_a = a.tree().root_node().unexpanded.clone();
    let order_b = b.tree().root_node().unexpanded.clone();
    assert_ne!(order_a, order_b);

    a.run().unwrap();
    b.run().unwrap();
}
