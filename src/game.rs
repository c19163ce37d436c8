//! Headless turn driver
//!
//! Alternates two agents from Black on a fresh board until one completes
//! five in a row or the board fills, and reports the game as a
//! serializable [`GameRecord`]. Each move made while the opponent had a
//! cell completing five counts as a block when it takes that cell and as a
//! missed block otherwise.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentKind, GameState};
use crate::board::{Board, Pos, Stone};
use crate::rules::{has_five_at_pos, winning_cells};

/// Final result of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Stone> for Winner {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Winner::Black,
            Stone::White => Winner::White,
            Stone::Empty => Winner::Draw,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Black => write!(f, "black"),
            Winner::White => write!(f, "white"),
            Winner::Draw => write!(f, "draw"),
        }
    }
}

/// One placed stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Stone,
    pub pos: Pos,
}

/// Summary of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: Winner,
    /// Strategy of the winning side; absent for a draw
    pub winner_kind: Option<AgentKind>,
    pub moves_black: u32,
    pub moves_white: u32,
    pub blocks_black: u32,
    pub blocks_white: u32,
    pub missed_blocks_black: u32,
    pub missed_blocks_white: u32,
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    fn new() -> Self {
        Self {
            winner: Winner::Draw,
            winner_kind: None,
            moves_black: 0,
            moves_white: 0,
            blocks_black: 0,
            blocks_white: 0,
            missed_blocks_black: 0,
            missed_blocks_white: 0,
            moves: Vec::new(),
        }
    }

    fn note_block(&mut self, color: Stone, blocked: bool) {
        let counter = match (color, blocked) {
            (Stone::Black, true) => &mut self.blocks_black,
            (Stone::Black, false) => &mut self.missed_blocks_black,
            (_, true) => &mut self.blocks_white,
            (_, false) => &mut self.missed_blocks_white,
        };
        *counter += 1;
    }
}

/// Runs games between two agents on `board_size` boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    board_size: usize,
}

impl Match {
    pub fn new(board_size: usize) -> Self {
        Self { board_size }
    }

    /// Play one game to completion and return it with its final board.
    ///
    /// A move onto an occupied cell is rejected: the turn passes without a
    /// stone. An agent reporting no move ends the game as a draw. Both
    /// agents are told the final board through [`Agent::game_over`].
    pub fn play(&self, black: &mut dyn Agent, white: &mut dyn Agent) -> (GameRecord, Board) {
        let mut board = Board::new(self.board_size);
        let kinds = [black.kind(), white.kind()];
        let mut record = GameRecord::new();
        // Every cell filled plus one rejected move per cell
        let max_turns = board.total_cells() * 2;

        let mut color = Stone::Black;
        for turn in 0..max_turns {
            if board.is_full() {
                break;
            }
            let side = usize::from(color == Stone::White);
            let agent: &mut dyn Agent = if side == 0 { &mut *black } else { &mut *white };
            let state = GameState::new(&board, color).with_opponent(kinds[1 - side]);

            let Some(pos) = agent.make_move(&state) else {
                warn!("{} ({color}) found no move on turn {turn}", kinds[side]);
                break;
            };
            let threats = winning_cells(&board, color.opponent());
            if !threats.is_empty() {
                record.note_block(color, threats.contains(&pos));
            }
            if !board.place_stone(pos, color) {
                warn!("{} ({color}) played occupied cell {pos}, turn skipped", kinds[side]);
                color = color.opponent();
                continue;
            }

            debug!("turn {turn}: {color} {pos}");
            record.moves.push(MoveRecord { color, pos });
            match color {
                Stone::Black => record.moves_black += 1,
                _ => record.moves_white += 1,
            }
            if has_five_at_pos(&board, pos, color) {
                record.winner = Winner::from(color);
                record.winner_kind = Some(kinds[side]);
                break;
            }
            color = color.opponent();
        }

        black.game_over(&board);
        white.game_over(&board);
        info!(
            "game over: {} after {} moves",
            record.winner,
            record.moves.len()
        );
        (record, board)
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(crate::board::DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomAgent;
    use crate::rng::make_rng;

    /// Plays a fixed list of moves, then repeats the last one
    struct Scripted {
        moves: Vec<Pos>,
        next: usize,
        saw_game_over: bool,
    }

    impl Scripted {
        fn new(moves: &[(u8, u8)]) -> Self {
            Self {
                moves: moves.iter().map(|&(r, c)| Pos::new(r, c)).collect(),
                next: 0,
                saw_game_over: false,
            }
        }
    }

    impl Agent for Scripted {
        fn kind(&self) -> AgentKind {
            AgentKind::Random
        }

        fn make_move(&mut self, _state: &GameState<'_>) -> Option<Pos> {
            let mv = self.moves.get(self.next).or(self.moves.last()).copied();
            self.next += 1;
            mv
        }

        fn game_over(&mut self, _board: &Board) {
            self.saw_game_over = true;
        }
    }

    #[test]
    fn test_black_wins_with_five() {
        let mut black = Scripted::new(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
        let mut white = Scripted::new(&[(4, 0), (4, 1), (4, 2), (4, 3), (3, 3)]);
        let (record, board) = Match::new(7).play(&mut black, &mut white);

        assert_eq!(record.winner, Winner::Black);
        assert_eq!(record.winner_kind, Some(AgentKind::Random));
        assert_eq!(record.moves_black, 5);
        assert_eq!(record.moves_white, 4);
        assert_eq!(board.count(Stone::Black), 5);
        assert!(black.saw_game_over && white.saw_game_over);
    }

    #[test]
    fn test_block_is_counted() {
        let mut black = Scripted::new(&[(6, 0), (6, 2), (6, 4), (5, 6), (0, 4), (3, 3)]);
        let mut white = Scripted::new(&[(0, 0), (0, 1), (0, 2), (0, 3), (4, 0)]);
        let (record, _) = Match::new(7).play(&mut black, &mut white);

        assert_eq!(record.blocks_black, 1);
        assert_eq!(record.missed_blocks_black, 0);
        assert_eq!(record.blocks_white, 0);
        assert_eq!(record.missed_blocks_white, 0);
        assert_eq!(record.winner, Winner::Draw);
    }

    #[test]
    fn test_missed_block_is_counted() {
        let mut black = Scripted::new(&[(6, 0), (6, 2), (6, 4), (5, 6), (3, 3)]);
        let mut white = Scripted::new(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
        let (record, _) = Match::new(7).play(&mut black, &mut white);

        assert_eq!(record.missed_blocks_black, 1);
        assert_eq!(record.blocks_black, 0);
        assert_eq!(record.winner, Winner::White);
        assert_eq!(record.moves_white, 5);
    }

    #[test]
    fn test_occupied_move_skips_turn() {
        let mut black = Scripted::new(&[(2, 2), (3, 3), (4, 4)]);
        // White repeats the cell Black already holds
        let mut white = Scripted::new(&[(2, 2)]);
        let (record, board) = Match::new(5).play(&mut black, &mut white);

        assert_eq!(record.moves_white, 0);
        assert_eq!(board.count(Stone::White), 0);
        assert!(record.moves.iter().all(|m| m.color == Stone::Black));
    }

    #[test]
    fn test_random_game_terminates() {
        let mut black = RandomAgent::new(make_rng(Some(1)));
        let mut white = RandomAgent::new(make_rng(Some(2)));
        let (record, board) = Match::new(5).play(&mut black, &mut white);

        assert_eq!(
            record.moves.len(),
            (record.moves_black + record.moves_white) as usize
        );
        assert_eq!(board.stone_count() as usize, record.moves.len());
        if record.winner == Winner::Draw {
            assert!(board.is_full());
        }
    }

    #[test]
    fn test_record_serializes() {
        let mut record = GameRecord::new();
        record.moves_black = 1;
        record.missed_blocks_white = 2;
        record.moves.push(MoveRecord {
            color: Stone::Black,
            pos: Pos::new(2, 2),
        });
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"winner\":\"draw\""));
        assert!(json.contains("\"missed_blocks_white\":2"));
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
