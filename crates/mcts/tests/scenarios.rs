//! Hand-built games checking the decisions and failure modes of the search.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::time::Duration;
use uct_core::{Game, SearchError};
use uct_mcts::{
    decide,
    games::{TicTacToe, TicTacToeAction, TicTacToeState},
    Mcts, MctsConfig, RandomRollout, SelectionMetric,
};

/// One-ply game: the root offers `moves`, each ending the game at once.
/// Moves listed in `winning` win for player 0, the rest lose.
#[derive(Clone)]
struct OnePly {
    moves: Vec<char>,
    winning: Vec<char>,
}

impl Game for OnePly {
    type State = Option<char>;
    type Action = char;
    type Player = u8;

    fn initial_state(&self) -> Self::State {
        None
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        match state {
            None => self.moves.clone(),
            Some(_) => Vec::new(),
        }
    }

    fn apply(&self, _state: &Self::State, action: Self::Action) -> Self::State {
        Some(action)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.is_some()
    }

    fn current_player(&self, _state: &Self::State) -> Self::Player {
        0
    }

    fn points_values(&self, state: &Self::State) -> HashMap<Self::Player, f32> {
        let won = state.map_or(false, |m| self.winning.contains(&m));
        let score = if won { 1.0 } else { -1.0 };
        HashMap::from([(0, score), (1, -score)])
    }
}

/// Scores nobody: every terminal state is missing the searching player.
struct Unscored;

impl Game for Unscored {
    type State = bool;
    type Action = u8;
    type Player = u8;

    fn initial_state(&self) -> Self::State {
        false
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if *state {
            Vec::new()
        } else {
            vec![0]
        }
    }

    fn apply(&self, _state: &Self::State, _action: Self::Action) -> Self::State {
        true
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        *state
    }

    fn current_player(&self, _state: &Self::State) -> Self::Player {
        0
    }

    fn points_values(&self, _state: &Self::State) -> HashMap<Self::Player, f32> {
        HashMap::from([(1, 1.0)])
    }
}

/// Claims the game goes on after the first move but offers nothing to play.
struct DeadEnd;

impl Game for DeadEnd {
    type State = u8;
    type Action = u8;
    type Player = u8;

    fn initial_state(&self) -> Self::State {
        0
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if *state == 0 {
            vec![1]
        } else {
            Vec::new()
        }
    }

    fn apply(&self, _state: &Self::State, action: Self::Action) -> Self::State {
        action
    }

    fn is_terminal(&self, _state: &Self::State) -> bool {
        false
    }

    fn current_player(&self, _state: &Self::State) -> Self::Player {
        0
    }

    fn points_values(&self, _state: &Self::State) -> HashMap<Self::Player, f32> {
        HashMap::new()
    }
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_single_winning_move_with_budget_one() {
    let game = OnePly {
        moves: vec!['a'],
        winning: vec!['a'],
    };

    let action = decide(&game, &None, MctsConfig::with_simulations(1), rng(0)).unwrap();
    assert_eq!(action, 'a');
}

#[test]
fn test_winning_move_beats_losing_move() {
    let game = OnePly {
        moves: vec!['l', 'w'],
        winning: vec!['w'],
    };

    for simulations in [2, 3, 10, 100] {
        let action =
            decide(&game, &None, MctsConfig::with_simulations(simulations), rng(1)).unwrap();
        assert_eq!(action, 'w', "budget {}", simulations);
    }
}

#[test]
fn test_win_rate_metric_picks_winning_move() {
    let game = OnePly {
        moves: vec!['l', 'w', 'x'],
        winning: vec!['w'],
    };
    let config = MctsConfig::with_simulations(30).with_selection_metric(SelectionMetric::WinRate);

    let mut mcts = Mcts::new(config, RandomRollout::seeded(5));
    let result = mcts.search(&game, &None).unwrap();

    assert_eq!(result.best_action, 'w');
    let w = result.child(&'w').unwrap();
    assert_eq!(w.wins, w.visits);
    assert_eq!(result.child(&'l').unwrap().wins, 0);
}

#[test]
fn test_ties_go_to_first_child() {
    // Nothing wins, so every child has zero wins
    let game = OnePly {
        moves: vec!['c', 'a', 'b'],
        winning: vec![],
    };

    let action = decide(&game, &None, MctsConfig::with_simulations(9), rng(2)).unwrap();
    assert_eq!(action, 'c');
}

#[test]
fn test_budget_one_expands_single_child() {
    let game = OnePly {
        moves: vec!['a', 'b', 'c'],
        winning: vec!['b'],
    };
    let mut mcts = Mcts::new(MctsConfig::with_simulations(1), RandomRollout::seeded(0));

    let result = mcts.search(&game, &None).unwrap();

    assert_eq!(result.children.len(), 1);
    assert_eq!(result.best_action, 'a');
    assert_eq!(mcts.tree().root().untried_actions(), &['b', 'c']);
}

#[test]
fn test_takes_immediate_win_at_tictactoe() {
    let game = TicTacToe;
    // X . .      X to move; 2 completes the top row
    // . O .
    // . . O   after X at 1
    let state = TicTacToeState::from_moves(&[0, 4, 1, 8]);
    assert!(!game.is_terminal(&state));

    for seed in 0..5 {
        let action = decide(&game, &state, MctsConfig::with_simulations(1000), rng(seed)).unwrap();
        assert_eq!(action, TicTacToeAction(2), "seed {}", seed);
    }
}

#[test]
fn test_opponent_replies_are_ranked_by_own_wins() {
    let game = TicTacToe;
    // X O .      X to move; O threatens 1-4-7
    // . O .
    // . . X
    let state = TicTacToeState::from_moves(&[0, 4, 8, 1]);
    let mut mcts = Mcts::new(MctsConfig::with_simulations(1000), RandomRollout::seeded(0));

    let result = mcts.search(&game, &state).unwrap();
    assert!(game.legal_actions(&state).contains(&result.best_action));

    // Skipping the block still earns wins, because O is not assumed to punish it
    let corner = result.child(&TicTacToeAction(6)).unwrap();
    assert!(corner.wins > 0);

    let tree = mcts.tree();
    let corner_id = tree.root().child(TicTacToeAction(6)).unwrap();
    let corner_node = tree.get(corner_id).unwrap();
    let finish = tree
        .get(corner_node.child(TicTacToeAction(7)).unwrap())
        .unwrap();
    assert_eq!(finish.wins(), 0);

    let busiest_reply = corner_node
        .children()
        .iter()
        .map(|(_, id)| tree.get(*id).unwrap().visits())
        .max()
        .unwrap();
    assert!(finish.visits() < busiest_reply);
}

#[test]
fn test_tree_is_rebuilt_for_every_search() {
    let game = TicTacToe;
    let mut mcts = Mcts::new(MctsConfig::with_simulations(50), RandomRollout::seeded(9));

    mcts.search(&game, &game.initial_state()).unwrap();
    let state = TicTacToeState::from_moves(&[4]);
    let result = mcts.search(&game, &state).unwrap();

    assert_eq!(result.root_visits, 50);
    assert_eq!(mcts.tree().root().visits(), 50);
    assert!(result.child(&TicTacToeAction(4)).is_none());
}

#[test]
fn test_render_shows_root_stats() {
    let game = OnePly {
        moves: vec!['w'],
        winning: vec!['w'],
    };
    let mut mcts = Mcts::new(MctsConfig::with_simulations(3), RandomRollout::seeded(0));
    mcts.search(&game, &None).unwrap();

    let dump = mcts.tree().render(1, 2);
    assert_eq!(dump, "[root] 3/3 untried=0\n  ['w'] 3/3 untried=0\n");
}

#[test]
fn test_time_limit_still_runs_one_simulation() {
    let game = TicTacToe;
    let config = MctsConfig::with_simulations(1_000_000).with_time_limit(Duration::ZERO);
    let mut mcts = Mcts::new(config, RandomRollout::seeded(4));

    let result = mcts.search(&game, &game.initial_state()).unwrap();

    assert_eq!(result.simulations, 1);
    assert_eq!(result.root_visits, 1);
}

#[test]
fn test_missing_score_is_reported() {
    let err = decide(&Unscored, &false, MctsConfig::with_simulations(3), rng(0)).unwrap_err();
    assert_eq!(err, SearchError::MissingScore("0".to_string()));
    assert!(err.is_oracle_error());
}

#[test]
fn test_dead_end_is_reported() {
    let err = decide(&DeadEnd, &0, MctsConfig::with_simulations(3), rng(0)).unwrap_err();
    assert_eq!(err, SearchError::NoLegalActions);
}

#[test]
fn test_terminal_root_is_reported() {
    let game = OnePly {
        moves: vec!['a'],
        winning: vec!['a'],
    };
    let err = decide(&game, &Some('a'), MctsConfig::default(), rng(0)).unwrap_err();
    assert_eq!(err, SearchError::TerminalRoot);
}

#[test]
fn test_zero_budget_is_reported() {
    let game = OnePly {
        moves: vec!['a'],
        winning: vec!['a'],
    };
    let err = decide(&game, &None, MctsConfig::with_simulations(0), rng(0)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfig(_)));
}

#[test]
fn test_config_from_partial_json() {
    let config: MctsConfig = serde_json::from_str(r#"{"num_simulations": 50}"#).unwrap();
    assert_eq!(config.num_simulations, 50);
    assert!((config.exploration_constant - 2.0).abs() < 1e-6);
    assert_eq!(config.selection_metric, SelectionMetric::Wins);

    let config: MctsConfig = serde_json::from_str(
        r#"{"exploration_constant": 1.5, "selection_metric": "win_rate"}"#,
    )
    .unwrap();
    assert_eq!(config.num_simulations, 100);
    assert_eq!(config.selection_metric, SelectionMetric::WinRate);
}

#[test]
fn test_config_json_roundtrip_keeps_time_limit() {
    let config = MctsConfig::with_simulations(10).with_time_limit(Duration::from_millis(250));
    let json = serde_json::to_string(&config).unwrap();
    let parsed: MctsConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}
