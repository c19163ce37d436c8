//! Monte Carlo Tree Search
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Children are
//! owned through the arena; each node keeps only the index of its parent,
//! and backpropagation walks those indices iteratively.
//!
//! One simulation runs four phases:
//! 1. **Selection**: descend by UCB1 while the node is fully expanded
//! 2. **Expansion**: turn one untried border cell into a child
//! 3. **Simulation**: short rollout on a private board copy
//! 4. **Backpropagation**: add the reward to every node up to the root
//!
//! The move played is the root child with the most visits.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::agent::{Agent, AgentKind, GameState};
use crate::board::{Board, Pos, Stone};
use crate::eval::evaluate_noisy;
use crate::rng::GameRng;
use crate::rules::has_five_at_pos;
use crate::search::candidates::{border_cells, scored_top_k, MAX_CANDIDATES};

/// Index of a node in the tree arena
pub type NodeId = usize;

/// MCTS parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Simulations per move
    pub n_simulations: u32,
    /// Maximum plies per rollout
    pub m_steps: u32,
    /// UCB1 exploration constant `c`
    pub exploration_weight: f64,
    /// Candidate count for the searching color's rollout moves
    pub rollout_top_k: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            n_simulations: 100,
            m_steps: 10,
            exploration_weight: 1.41,
            rollout_top_k: 30,
        }
    }
}

/// One node of the search tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Position after `mv`
    pub board: Board,
    /// Color placing stones from this node
    pub player: Stone,
    /// Non-owning link to the parent (root has none)
    pub parent: Option<NodeId>,
    /// Move that produced this node
    pub mv: Option<Pos>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    pub total_score: f64,
    /// Candidate moves not yet turned into children
    pub untried: Vec<Pos>,
}

impl Node {
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Mean reward, 0 before the first visit
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_score / f64::from(self.visits)
        }
    }
}

/// UCB1 priority of a child.
///
/// Unvisited children get infinite priority so they are always tried
/// before any visited sibling.
pub fn ucb1(total_score: f64, visits: u32, parent_visits: u32, exploration_weight: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = f64::from(visits);
    let exploitation = total_score / visits;
    let exploration = (f64::from(parent_visits.max(1)).ln() / visits).sqrt();
    exploitation + exploration_weight * exploration
}

/// Arena-backed search tree
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    /// Tree holding only the root position, with `player` to move.
    pub fn new<R: Rng>(board: &Board, player: Stone, rng: &mut R) -> Self {
        let root = Node {
            board: board.clone(),
            player,
            parent: None,
            mv: None,
            children: Vec::new(),
            visits: 0,
            total_score: 0.0,
            untried: border_cells(board, 1, MAX_CANDIDATES, rng),
        };
        Self { nodes: vec![root] }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child of `id` with the highest UCB1 value (first wins ties)
    fn best_child(&self, id: NodeId, exploration_weight: f64) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &parent.children {
            let child = &self.nodes[child_id];
            let value = ucb1(child.total_score, child.visits, parent.visits, exploration_weight);
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((child_id, value));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Descend from the root while nodes are fully expanded and have children.
    pub fn select(&self, exploration_weight: f64) -> NodeId {
        let mut id = Self::ROOT;
        while self.nodes[id].is_fully_expanded() {
            match self.best_child(id, exploration_weight) {
                Some(child) => id = child,
                None => break,
            }
        }
        id
    }

    /// Turn one untried move of `id` into a new child and return it.
    /// Returns `id` itself when nothing is left to try.
    pub fn expand<R: Rng>(&mut self, id: NodeId, rng: &mut R) -> NodeId {
        let Some(mv) = self.nodes[id].untried.pop() else {
            return id;
        };
        let parent = &self.nodes[id];
        let player = parent.player;
        let mut board = parent.board.clone();
        board.place_stone(mv, player);

        let untried = border_cells(&board, 1, MAX_CANDIDATES, rng);
        let child_id = self.nodes.len();
        self.nodes.push(Node {
            board,
            player,
            parent: Some(id),
            mv: Some(mv),
            children: Vec::new(),
            visits: 0,
            total_score: 0.0,
            untried,
        });
        self.nodes[id].children.push(child_id);
        child_id
    }

    /// Add `reward` and one visit to `id` and every ancestor.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.total_score += reward;
            cursor = node.parent;
        }
    }

    /// Root child with the most visits (first wins ties)
    pub fn most_visited_move(&self) -> Option<Pos> {
        let mut best: Option<&Node> = None;
        for &child_id in &self.root().children {
            let child = &self.nodes[child_id];
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|node| node.mv)
    }
}

/// Play a short random game from `board` and score it for `root_player`.
///
/// The opponent of `player` moves first. `player` draws from the scored
/// top-k cells (falling back to border cells); the opponent draws uniformly
/// from border cells. The rollout stops after `m_steps` plies or on a five.
/// A ply with no candidates ends the rollout as a draw (reward 0).
pub fn rollout<R: Rng>(
    board: &Board,
    player: Stone,
    root_player: Stone,
    config: &MctsConfig,
    rng: &mut R,
) -> f64 {
    let mut board = board.clone();
    let mut to_move = player.opponent();

    for _ in 0..config.m_steps {
        let candidates = if to_move == player {
            let top = scored_top_k(&board, to_move, config.rollout_top_k, rng);
            if top.is_empty() {
                border_cells(&board, 1, MAX_CANDIDATES, rng)
            } else {
                top
            }
        } else {
            border_cells(&board, 1, MAX_CANDIDATES, rng)
        };

        let Some(&mv) = candidates.choose(rng) else {
            return 0.0;
        };
        board.place_stone(mv, to_move);
        if has_five_at_pos(&board, mv, to_move) {
            break;
        }
        to_move = to_move.opponent();
    }

    f64::from(evaluate_noisy(&board, root_player, rng))
}

/// Run `config.n_simulations` simulations from `board` with `player` to move.
pub fn run_search<R: Rng>(board: &Board, player: Stone, config: &MctsConfig, rng: &mut R) -> SearchTree {
    let mut tree = SearchTree::new(board, player, rng);
    for _ in 0..config.n_simulations {
        let mut id = tree.select(config.exploration_weight);
        if !tree.node(id).is_fully_expanded() {
            id = tree.expand(id, rng);
        }
        let node = tree.node(id);
        let reward = rollout(&node.board, node.player, player, config, rng);
        tree.backpropagate(id, reward);
    }
    tree
}

/// Agent choosing moves by Monte Carlo Tree Search
pub struct MctsAgent {
    config: MctsConfig,
    rng: GameRng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, rng: GameRng) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl Agent for MctsAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Mcts
    }

    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos> {
        if state.board.is_full() {
            return None;
        }
        let tree = run_search(state.board, state.current_player, &self.config, &mut self.rng);
        let mv = tree.most_visited_move();
        debug!(
            "MCTS chose {:?} after {} simulations ({} nodes)",
            mv,
            tree.root().visits,
            tree.len()
        );
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::make_rng;

    fn small_config(n_simulations: u32) -> MctsConfig {
        MctsConfig {
            n_simulations,
            m_steps: 4,
            ..MctsConfig::default()
        }
    }

    #[test]
    fn test_ucb1_unvisited_is_infinite() {
        assert_eq!(ucb1(0.0, 0, 10, 1.41), f64::INFINITY);
        assert_eq!(ucb1(5.0, 0, 0, 1.41), f64::INFINITY);
    }

    #[test]
    fn test_ucb1_values() {
        let value = ucb1(10.0, 2, 8, 1.0);
        let expected = 5.0 + (8f64.ln() / 2.0).sqrt();
        assert!((value - expected).abs() < 1e-12);
        // With a single parent visit the exploration term vanishes
        assert!((ucb1(3.0, 1, 1, 1.41) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_visit_counts_add_up() {
        let mut board = Board::new(9);
        board.place_stone(Pos::new(4, 4), Stone::Black);
        let mut rng = make_rng(Some(10));

        let n = 40;
        let tree = run_search(&board, Stone::White, &small_config(n), &mut rng);
        let root = tree.root();
        assert_eq!(root.visits, n);

        let child_visits: u32 = root.children.iter().map(|&c| tree.node(c).visits).sum();
        // Root was never selected as a leaf here, so every visit went through a child
        assert_eq!(child_visits, n);
    }

    #[test]
    fn test_parent_links_point_back() {
        let mut board = Board::new(7);
        board.place_stone(Pos::new(3, 3), Stone::Black);
        let mut rng = make_rng(Some(11));
        let tree = run_search(&board, Stone::White, &small_config(30), &mut rng);

        for id in 1..tree.len() {
            let parent = tree.node(id).parent.unwrap();
            assert!(tree.node(parent).children.contains(&id));
            assert!(tree.node(parent).visits >= tree.node(id).visits);
        }
    }

    #[test]
    fn test_selected_move_is_root_child() {
        let mut board = Board::new(9);
        board.place_stone(Pos::new(4, 4), Stone::Black);
        board.place_stone(Pos::new(4, 5), Stone::White);
        let mut rng = make_rng(Some(12));
        let tree = run_search(&board, Stone::Black, &small_config(25), &mut rng);

        let mv = tree.most_visited_move().unwrap();
        let child_moves: Vec<Pos> = tree
            .root()
            .children
            .iter()
            .filter_map(|&c| tree.node(c).mv)
            .collect();
        assert!(child_moves.contains(&mv));
        assert!(board.is_empty(mv));
    }

    #[test]
    fn test_unvisited_child_selected_first() {
        let mut board = Board::new(7);
        board.place_stone(Pos::new(3, 3), Stone::Black);
        let mut rng = make_rng(Some(13));
        let mut tree = SearchTree::new(&board, Stone::White, &mut rng);

        let first = tree.expand(SearchTree::ROOT, &mut rng);
        tree.backpropagate(first, 1_000.0);
        let second = tree.expand(SearchTree::ROOT, &mut rng);
        assert_eq!(tree.best_child(SearchTree::ROOT, 1.41), Some(second));
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut board = Board::new(7);
        board.place_stone(Pos::new(3, 3), Stone::Black);
        let mut rng = make_rng(Some(14));
        let mut tree = SearchTree::new(&board, Stone::White, &mut rng);
        let child = tree.expand(SearchTree::ROOT, &mut rng);
        let grandchild = tree.expand(child, &mut rng);

        tree.backpropagate(grandchild, 2.5);
        for id in [grandchild, child, SearchTree::ROOT] {
            assert_eq!(tree.node(id).visits, 1);
            assert!((tree.node(id).total_score - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_full_board_gives_no_move() {
        let mut board = Board::new(5);
        for (i, pos) in board.empty_cells().into_iter().enumerate() {
            board.place_stone(pos, if (i / 2) % 2 == 0 { Stone::Black } else { Stone::White });
        }
        let mut agent = MctsAgent::new(small_config(5), make_rng(Some(15)));
        assert_eq!(agent.make_move(&GameState::new(&board, Stone::Black)), None);
    }

    #[test]
    fn test_rollout_on_full_board_is_draw() {
        let mut board = Board::new(5);
        for (i, pos) in board.empty_cells().into_iter().enumerate() {
            board.place_stone(pos, if (i / 2) % 2 == 0 { Stone::Black } else { Stone::White });
        }
        let mut rng = make_rng(Some(16));
        let reward = rollout(&board, Stone::Black, Stone::Black, &small_config(1), &mut rng);
        assert_eq!(reward, 0.0);
    }

    #[test]
    fn test_search_is_reproducible() {
        let mut board = Board::new(9);
        board.place_stone(Pos::new(4, 4), Stone::Black);
        let a = run_search(&board, Stone::White, &small_config(20), &mut make_rng(Some(17)));
        let b = run_search(&board, Stone::White, &small_config(20), &mut make_rng(Some(17)));
        assert_eq!(a.most_visited_move(), b.most_visited_move());
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_agent_takes_winning_cell() {
        let board = Board::from_rows(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "OXXXX....",
            ".........",
            "....O....",
            ".........",
            ".........",
        ])
        .unwrap();
        let mut agent = MctsAgent::new(
            MctsConfig {
                n_simulations: 150,
                m_steps: 2,
                ..MctsConfig::default()
            },
            make_rng(Some(18)),
        );
        let mv = agent.make_move(&GameState::new(&board, Stone::Black));
        assert!(mv.is_some_and(|p| board.is_empty(p)));
    }
}
