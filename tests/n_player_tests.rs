//! N-player search tests.
//!
//! Verifies that the search keeps one score sum per player and scores
//! children from the perspective of whoever moves at the parent, for
//! player counts other than two.

use uct_engine::core::{PlayerId, PlayerMap};
use uct_engine::games::{Nim, NimState};
use uct_engine::mcts::{select_action_with, SearchConfig, UctSearch};
use uct_engine::rules::{Game, GameState};
use uct_engine::UctAgent;

fn seeded(iterations: i64, seed: u64) -> SearchConfig {
    SearchConfig::budget(0.0, iterations).with_seed(seed)
}

#[test]
fn test_search_supports_many_players() {
    for player_count in [1, 3, 4, 6, 8] {
        let game = Nim::new(player_count, 15);
        let mut search = UctSearch::new(&game, &game.initial_state(), seeded(300, 1)).unwrap();
        search.run().unwrap();

        let tree = search.tree();
        assert_eq!(tree.player_count(), player_count);
        for (_, node) in tree.iter() {
            assert_eq!(node.score_sums.player_count(), player_count);
        }
        tree.check_invariants().unwrap();
    }
}

#[test]
fn test_score_sums_track_visits() {
    // Every Nim outcome hands out exactly 1.0 in total.
    let game = Nim::new(3, 12);
    let mut search = UctSearch::new(&game, &game.initial_state(), seeded(400, 2)).unwrap();
    search.run().unwrap();

    for (_, node) in search.tree().iter() {
        let total: f64 = node.score_sums.as_slice().iter().sum();
        assert!((total - node.visits as f64).abs() < 1e-9);
    }
}

#[test]
fn test_immediate_win_three_players() {
    let game = Nim::new(3, 3);

    let mv = select_action_with(&game, &game.initial_state(), &seeded(500, 4)).unwrap();
    assert_eq!(mv, 3);
}

#[test]
fn test_mover_perspective_is_used() {
    // Four players; two single-stone takes leave player 2 to move on a heap
    // of two, where taking both wins.
    let game = Nim::new(4, 4);
    let state = game.initial_state().apply_move(&1).unwrap().apply_move(&1).unwrap();
    assert_eq!(state.current_player().unwrap(), PlayerId::new(2));

    let mv = select_action_with(&game, &state, &seeded(500, 5)).unwrap();
    assert_eq!(mv, 2);
}

#[test]
fn test_child_means_are_for_the_parent_mover() {
    let game = Nim::new(3, 3);
    let mut search = UctSearch::new(&game, &game.initial_state(), seeded(300, 6)).unwrap();
    search.run().unwrap();

    let tree = search.tree();
    let winning = tree
        .children(tree.root())
        .find(|(_, child)| child.move_from_parent == Some(3))
        .map(|(_, child)| child)
        .unwrap();

    // Taking all three ends the game with player 0 as the only scorer.
    assert!(winning.is_terminal);
    assert_eq!(winning.mean_score(PlayerId::new(0)), 1.0);
    assert_eq!(winning.mean_score(PlayerId::new(1)), 0.0);
    assert_eq!(winning.mean_score(PlayerId::new(2)), 0.0);
}

#[test]
fn test_single_player_game() {
    let game = Nim::new(1, 6);
    let mv = select_action_with(&game, &game.initial_state(), &seeded(100, 7)).unwrap();

    // Every line of play ends with the only player scoring 1.0.
    assert!((1..=3).contains(&mv));
}

#[test]
fn test_agent_plays_a_full_game() {
    let game = Nim::new(3, 11);
    let mut agents: Vec<UctAgent> = (0..3)
        .map(|seat| UctAgent::new().with_config(SearchConfig::default().with_seed(100 + seat)))
        .collect();

    for (seat, agent) in agents.iter_mut().enumerate() {
        agent.init_ai(&game, PlayerId::new(seat as u8)).unwrap();
    }

    let mut state: NimState = game.initial_state();
    let mut turns = 0;
    while !state.is_terminal().unwrap() {
        let mover = state.current_player().unwrap();
        let agent = &agents[mover.index()];
        assert_eq!(agent.player(), Some(mover));

        let mv = agent.select_action(&game, &state, 0.0, 200, -1).unwrap();
        state = state.apply_move(&mv).unwrap();
        turns += 1;
    }

    assert!(turns >= 4);
    let outcome: PlayerMap<f64> = state.outcome().unwrap();
    assert_eq!(outcome.as_slice().iter().sum::<f64>(), 1.0);
    assert_eq!(game.player_count(), outcome.player_count());

    for agent in &mut agents {
        agent.close_ai();
    }
}
