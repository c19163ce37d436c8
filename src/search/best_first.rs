//! Multi-heuristic best-first search
//!
//! A priority-first expansion over boards where only the searching color
//! moves. Each node's priority is the running sum of heuristic costs along
//! its path (lower is better). The heuristic changes between calls by
//! walking a fixed round-robin rotation, so one agent instance alternates
//! between balanced play and the two win-focused variants.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::debug;

use crate::agent::{Agent, AgentKind, GameState};
use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate_color, evaluate_state, PatternScore};
use crate::rng::GameRng;
use crate::rules::has_five_in_row;
use crate::search::candidates::scored_top_k;
use crate::search::zobrist::ZobristTable;

/// Cost assigned to boards that decide the game outright
const DECISIVE_COST: i64 = PatternScore::FIVE as i64;

/// Cost functions used to order the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Negated board evaluation: offense and defense weighed together
    Balanced,
    /// Strongly prefers boards where the searching color has five
    SeekWin,
    /// Penalizes the opponent's line potential, rewarding blocks
    DenyWin,
}

impl Heuristic {
    /// Cost of `board` for `color` (lower is better)
    pub fn cost(self, board: &Board, color: Stone) -> i64 {
        match self {
            Heuristic::Balanced => -i64::from(evaluate_state(board, color)),
            Heuristic::SeekWin => {
                if has_five_in_row(board, color) {
                    -DECISIVE_COST
                } else {
                    Heuristic::Balanced.cost(board, color)
                }
            }
            Heuristic::DenyWin => {
                let opponent = color.opponent();
                if has_five_in_row(board, opponent) {
                    DECISIVE_COST
                } else {
                    i64::from(evaluate_color(board, opponent, color))
                }
            }
        }
    }
}

/// Round-robin rotation over heuristics, owned by one agent
#[derive(Debug, Clone)]
pub struct HeuristicRotation {
    order: Vec<Heuristic>,
    next: usize,
}

impl HeuristicRotation {
    /// Weights of the default rotation: balanced play most of the time
    const BALANCED_TURNS: usize = 10;

    /// # Panics
    /// If `order` is empty.
    pub fn new(order: Vec<Heuristic>) -> Self {
        assert!(!order.is_empty(), "heuristic rotation needs at least one entry");
        Self { order, next: 0 }
    }

    /// Current heuristic; advances the rotation
    pub fn advance(&mut self) -> Heuristic {
        let heuristic = self.order[self.next];
        self.next = (self.next + 1) % self.order.len();
        heuristic
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for HeuristicRotation {
    fn default() -> Self {
        let mut order = vec![Heuristic::Balanced; Self::BALANCED_TURNS];
        order.extend([Heuristic::DenyWin, Heuristic::SeekWin]);
        Self::new(order)
    }
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest cost first,
/// and among equal costs the earliest pushed.
#[derive(Debug)]
struct QueueNode {
    cost: i64,
    seq: u64,
    hash: u64,
    board: Board,
    path: Vec<Pos>,
}

impl PartialEq for QueueNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueNode {}

impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.cost, other.seq).cmp(&(self.cost, self.seq))
    }
}

/// Outcome of one best-first search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestFirstResult {
    /// Moves from the root to the node that ended the search
    pub path: Vec<Pos>,
    /// Number of nodes expanded
    pub expansions: u32,
}

impl BestFirstResult {
    pub fn first_move(&self) -> Option<Pos> {
        self.path.first().copied()
    }
}

/// Best-first search from `board` for `color`.
///
/// Pops the cheapest node; stops when it shows five in a row for `color`
/// or when `budget` expansions have been spent, returning that node's
/// path. Otherwise every empty cell is expanded into a successor whose cost
/// is the parent's cost plus `heuristic`. Boards already expanded are never
/// expanded again; they are recognized by Zobrist hash, updated
/// incrementally per placed stone. Returns `None` when the frontier runs dry.
pub fn best_first_search(
    board: &Board,
    color: Stone,
    heuristic: Heuristic,
    budget: u32,
) -> Option<BestFirstResult> {
    let zobrist = ZobristTable::new(board.size());
    let size = board.size();
    let mut frontier = BinaryHeap::new();
    let mut visited: HashSet<u64> = HashSet::new();
    let mut seq = 0u64;
    let mut remaining = budget;
    let mut expansions = 0;

    frontier.push(QueueNode {
        cost: 0,
        seq,
        hash: zobrist.hash(board),
        board: board.clone(),
        path: Vec::new(),
    });

    while let Some(node) = frontier.pop() {
        if remaining == 0 || has_five_in_row(&node.board, color) {
            return Some(BestFirstResult {
                path: node.path,
                expansions,
            });
        }
        if !visited.insert(node.hash) {
            continue;
        }

        for mv in node.board.empty_cells() {
            let hash = zobrist.update_place(node.hash, mv, color, size);
            if visited.contains(&hash) {
                continue;
            }
            let mut successor = node.board.clone();
            successor.place_stone(mv, color);
            let cost = node.cost + heuristic.cost(&successor, color);
            let mut path = node.path.clone();
            path.push(mv);
            seq += 1;
            frontier.push(QueueNode {
                cost,
                seq,
                hash,
                board: successor,
                path,
            });
        }
        remaining -= 1;
        expansions += 1;
    }
    None
}

/// Agent running [`best_first_search`] with a rotating heuristic.
pub struct MultiHeuristicAgent {
    rotation: HeuristicRotation,
    budget: u32,
    rng: GameRng,
}

impl MultiHeuristicAgent {
    pub fn new(budget: u32, rng: GameRng) -> Self {
        Self::with_rotation(HeuristicRotation::default(), budget, rng)
    }

    pub fn with_rotation(rotation: HeuristicRotation, budget: u32, rng: GameRng) -> Self {
        Self {
            rotation,
            budget,
            rng,
        }
    }
}

impl Agent for MultiHeuristicAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::MultiAStar
    }

    fn make_move(&mut self, state: &GameState<'_>) -> Option<Pos> {
        if state.board.is_full() {
            return None;
        }
        let color = state.current_player;
        let heuristic = self.rotation.advance();
        let found = best_first_search(state.board, color, heuristic, self.budget)
            .and_then(|result| result.first_move());
        debug!("best-first ({heuristic:?}) chose {found:?}");

        // Nothing found: defer to the simplest scored candidate
        found.or_else(|| {
            scored_top_k(state.board, color, 1, &mut self.rng)
                .first()
                .copied()
                .or_else(|| state.board.empty_cells().first().copied())
        })
    }
}
