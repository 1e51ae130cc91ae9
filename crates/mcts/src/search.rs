//! Monte Carlo Tree Search implementation.
//!
//! Plain UCT: every simulation selects a leaf with the UCB1 formula, expands
//! one untried action, plays the rest of the game out with the rollout
//! policy and backpropagates a win/loss for the searching player.

use crate::{
    config::{MctsConfig, SelectionMetric},
    node::{Node, NodeId},
    rollout::{RandomRollout, RolloutPolicy},
    tree::Tree,
};
use log::{debug, trace};
use rand::Rng;
use std::marker::PhantomData;
use std::time::Instant;
use uct_core::{Game, Result, SearchError};

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildStats<A> {
    /// Action leading to the child.
    pub action: A,
    /// Simulations that went through the child.
    pub visits: u32,
    /// Simulations through the child won by the searching player.
    pub wins: u32,
}

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<A> {
    /// Action picked by the configured selection metric.
    pub best_action: A,

    /// Root children in expansion order.
    pub children: Vec<ChildStats<A>>,

    /// Number of simulations completed.
    pub simulations: usize,

    /// Visits recorded at the root. Equals `simulations`.
    pub root_visits: u32,

    /// Number of nodes in the tree.
    pub tree_size: usize,
}

impl<A> SearchResult<A> {
    /// Stats of the child reached by `action`, if it was expanded.
    pub fn child(&self, action: &A) -> Option<&ChildStats<A>>
    where
        A: PartialEq,
    {
        self.children.iter().find(|c| c.action == *action)
    }
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Generic over:
/// - `G`: The game being played
/// - `P`: The rollout policy used in the simulation phase
pub struct Mcts<G: Game, P: RolloutPolicy<G>> {
    config: MctsConfig,
    rollout: P,
    tree: Tree<G::Action>,
    _game: PhantomData<G>,
}

impl<G, P> Mcts<G, P>
where
    G: Game,
    P: RolloutPolicy<G>,
{
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, rollout: P) -> Self {
        Self {
            config,
            rollout,
            tree: Tree::new(Vec::new()),
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Tree built by the last search.
    pub fn tree(&self) -> &Tree<G::Action> {
        &self.tree
    }

    /// Run the search and return only the chosen action.
    pub fn decide(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        self.search(game, state).map(|result| result.best_action)
    }

    /// Run MCTS from the given state, returning search results.
    ///
    /// # Errors
    /// Fails on an invalid configuration, on a terminal root and whenever
    /// the game breaks its contract (no legal actions in a live position,
    /// no score for the searching player).
    pub fn search(&mut self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        self.config.validate()?;

        let player = game.current_player(state);
        if game.is_terminal(state) {
            return Err(SearchError::TerminalRoot);
        }
        let root_actions = game.legal_actions(state);
        if root_actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        self.tree.reset(root_actions);

        debug!(
            "searching for {:?}: {} simulations, c = {}",
            player, self.config.num_simulations, self.config.exploration_constant
        );

        let started = Instant::now();
        let mut simulations = 0;
        while simulations < self.config.num_simulations {
            if let Some(limit) = self.config.time_limit {
                if simulations > 0 && started.elapsed() >= limit {
                    debug!("time limit reached after {} simulations", simulations);
                    break;
                }
            }
            self.simulate(game, state, player)?;
            simulations += 1;
        }

        let result = self.extract_results(simulations)?;
        debug!(
            "best action {:?} after {} simulations ({} nodes, {:?})",
            result.best_action,
            simulations,
            result.tree_size,
            started.elapsed()
        );
        Ok(result)
    }

    /// Run a single simulation: select -> expand -> rollout -> backpropagate.
    fn simulate(&mut self, game: &G, root_state: &G::State, player: G::Player) -> Result<()> {
        let (leaf, leaf_state) = self.select(game, NodeId::ROOT, root_state.clone())?;

        // A fully expanded leaf is terminal: roll out from it directly.
        let (node, state) = if self.tree.get(leaf)?.is_fully_expanded() {
            (leaf, leaf_state)
        } else {
            self.expand(game, leaf, &leaf_state)?
        };

        let terminal = self.rollout.rollout(game, state)?;
        let won = Self::is_win(game, &terminal, player)?;
        trace!(
            "simulation from node {} (depth {}): won = {}",
            node.index(),
            self.tree.depth(node)?,
            won
        );

        self.backpropagate(node, won)
    }

    /// Walk down from `start` until a node with untried actions or a
    /// terminal state, returning that node with the state it represents.
    fn select(&self, game: &G, start: NodeId, state: G::State) -> Result<(NodeId, G::State)> {
        let mut current = start;
        let mut state = state;

        loop {
            let node = self.tree.get(current)?;
            if !node.is_fully_expanded() || game.is_terminal(&state) {
                return Ok((current, state));
            }

            let legal_actions = game.legal_actions(&state);
            let (action, child) = self.select_child(current, &legal_actions)?;
            state = game.apply(&state, action);
            current = child;
        }
    }

    /// Select the child maximizing UCB1 among the currently legal actions.
    ///
    /// UCB(a) = wins / visits + c * sqrt(ln(N_parent) / visits)
    ///
    /// Unvisited children score infinity, so each child is tried once before
    /// any is revisited. Ties go to the first action in oracle order.
    fn select_child(
        &self,
        node_id: NodeId,
        legal_actions: &[G::Action],
    ) -> Result<(G::Action, NodeId)> {
        if legal_actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let node = self.tree.get(node_id)?;
        let log_parent_visits = (node.visits().max(1) as f32).ln();
        let c = self.config.exploration_constant;

        let mut best: Option<(G::Action, NodeId)> = None;
        let mut best_ucb = f32::NEG_INFINITY;

        for &action in legal_actions {
            let child_id = node
                .child(action)
                .ok_or_else(|| SearchError::MissingChild(format!("{:?}", action)))?;
            let child = self.tree.get(child_id)?;

            let ucb = if child.visits() == 0 {
                f32::INFINITY
            } else {
                let n = child.visits() as f32;
                child.win_rate() + c * (log_parent_visits / n).sqrt()
            };

            if best.is_none() || ucb > best_ucb {
                best_ucb = ucb;
                best = Some((action, child_id));
            }
        }

        best.ok_or(SearchError::NoLegalActions)
    }

    /// Expand the next untried action of `node_id`.
    ///
    /// Returns the new child and the state it represents.
    fn expand(
        &mut self,
        game: &G,
        node_id: NodeId,
        state: &G::State,
    ) -> Result<(NodeId, G::State)> {
        let action = self
            .tree
            .get(node_id)?
            .next_untried()
            .ok_or(SearchError::FullyExpanded)?;

        let next_state = game.apply(state, action);
        let child_actions = if game.is_terminal(&next_state) {
            Vec::new()
        } else {
            let actions = game.legal_actions(&next_state);
            if actions.is_empty() {
                return Err(SearchError::NoLegalActions);
            }
            actions
        };

        // Only commit once the child is known to be valid.
        self.tree.get_mut(node_id)?.take_untried();
        let child_id = self
            .tree
            .add(Node::new(Some(node_id), Some(action), child_actions));
        self.tree.get_mut(node_id)?.add_child(action, child_id);

        Ok((child_id, next_state))
    }

    /// Record the simulation outcome on every node from `node_id` up to and
    /// including the root.
    fn backpropagate(&mut self, node_id: NodeId, won: bool) -> Result<()> {
        let mut current = Some(node_id);

        while let Some(id) = current {
            let node = self.tree.get_mut(id)?;
            node.record(won);
            current = node.parent();
        }

        Ok(())
    }

    fn is_win(game: &G, terminal: &G::State, player: G::Player) -> Result<bool> {
        let points = game.points_values(terminal);
        let score = points
            .get(&player)
            .copied()
            .ok_or_else(|| SearchError::MissingScore(format!("{:?}", player)))?;
        Ok(score > 0.0)
    }

    /// Pick the root child by the configured metric and collect root stats.
    fn extract_results(&self, simulations: usize) -> Result<SearchResult<G::Action>> {
        let root = self.tree.root();

        let children = root
            .children()
            .iter()
            .map(|&(action, id)| {
                let child = self.tree.get(id)?;
                Ok(ChildStats {
                    action,
                    visits: child.visits(),
                    wins: child.wins(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best: Option<(&ChildStats<G::Action>, f32)> = None;
        for stats in &children {
            let score = match self.config.selection_metric {
                SelectionMetric::Wins => stats.wins as f32,
                SelectionMetric::WinRate if stats.visits == 0 => 0.0,
                SelectionMetric::WinRate => stats.wins as f32 / stats.visits as f32,
            };
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((stats, score));
            }
        }
        let best_action = best.map(|(stats, _)| stats.action).ok_or(SearchError::NoChildren)?;

        Ok(SearchResult {
            best_action,
            children,
            simulations,
            root_visits: root.visits(),
            tree_size: self.tree.len(),
        })
    }
}

/// Run a UCT search with uniform random rollouts driven by `rng`.
///
/// Builds a fresh tree, discards it afterwards and returns the chosen action.
pub fn decide<G, R>(game: &G, state: &G::State, config: MctsConfig, rng: R) -> Result<G::Action>
where
    G: Game,
    R: Rng,
{
    Mcts::new(config, RandomRollout::new(rng)).decide(game, state)
}
