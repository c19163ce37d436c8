use gomoku::agent::{build_agent, AgentSpec};
use gomoku::config::MatchConfig;
use gomoku::learning::{canonical_key, ValueTable};
use gomoku::search::ZobristTable;
use gomoku::{Agent, AgentKind, Board, GameState, Match, Pos, Stone, Winner};

fn small_spec(kind: AgentKind) -> AgentSpec {
    let mut spec = AgentSpec::of(kind.key());
    match kind {
        AgentKind::Minimax | AgentKind::Expectimax => spec.depth = Some(1),
        AgentKind::AlphaBeta => spec.depth = Some(2),
        AgentKind::MultiAStar => spec.depth = Some(2),
        AgentKind::Mcts => {
            spec.n_simulations = Some(20);
            spec.m_steps = Some(4);
        }
        AgentKind::QLearning => spec.table_path = Some("/nonexistent/dir/q.json".into()),
        AgentKind::Random => {}
    }
    spec
}

fn assert_consistent(board: &Board, record: &gomoku::GameRecord) {
    assert_eq!(board.stone_count() as usize, record.moves.len());
    assert_eq!(board.count(Stone::Black), record.moves_black);
    assert_eq!(board.count(Stone::White), record.moves_white);
    match record.winner {
        Winner::Draw => assert!(record.winner_kind.is_none()),
        _ => assert!(record.winner_kind.is_some()),
    }
}

#[test]
fn every_agent_finishes_a_game_against_random() {
    for (i, kind) in AgentKind::ALL.into_iter().enumerate() {
        let seed = Some(100 + i as u64);
        let mut agent = build_agent(&small_spec(kind), 6, seed).unwrap();
        let mut random = build_agent(&AgentSpec::of("random"), 6, seed.map(|s| s + 50)).unwrap();

        let (record, board) = Match::new(6).play(agent.as_mut(), random.as_mut());
        assert_consistent(&board, &record);
        if record.winner == Winner::Draw {
            assert!(board.is_full(), "{kind} stopped early without a winner");
        }
    }
}

#[test]
fn seeded_games_replay_exactly() {
    let config = MatchConfig {
        board_size: 7,
        games: 1,
        seed: Some(2024),
        black: small_spec(AgentKind::Mcts),
        white: AgentSpec::of("random"),
    };
    let play = || {
        let mut black = build_agent(&config.black, 7, config.agent_seed(0, 0)).unwrap();
        let mut white = build_agent(&config.white, 7, config.agent_seed(0, 1)).unwrap();
        Match::new(7).play(black.as_mut(), white.as_mut()).0
    };
    assert_eq!(play(), play());
}

#[test]
fn searchers_take_an_immediate_win() {
    let board = Board::from_rows(&[
        ".......",
        ".......",
        "OOOO...",
        ".......",
        ".XXXX..",
        ".......",
        ".......",
    ])
    .unwrap();
    for kind in [AgentKind::Minimax, AgentKind::AlphaBeta, AgentKind::Expectimax] {
        let spec = AgentSpec {
            depth: Some(1),
            ..AgentSpec::of(kind.key())
        };
        let mut agent = build_agent(&spec, 7, Some(1)).unwrap();
        let mv = agent.make_move(&GameState::new(&board, Stone::Black)).unwrap();
        assert!(
            mv == Pos::new(4, 0) || mv == Pos::new(4, 5),
            "{kind} played {mv}"
        );
    }
}

#[test]
fn learning_agent_persists_between_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trained").join("q_table.json");
    let spec = AgentSpec {
        learning: Some(true),
        table_path: Some(path.clone()),
        ..AgentSpec::of("qlearning")
    };

    let mut learner = build_agent(&spec, 5, Some(9)).unwrap();
    let mut random = build_agent(&AgentSpec::of("random"), 5, Some(10)).unwrap();
    let (record, _) = Match::new(5).play(learner.as_mut(), random.as_mut());
    assert!(record.moves_black > 1);
    learner.save().unwrap();
    assert!(path.exists());

    let table = ValueTable::load_or_empty(&path, 5);
    assert!(!table.is_empty());
}

#[test]
fn canonical_keys_match_for_rotated_boards() {
    let zobrist = ZobristTable::new(9);
    let board = Board::from_rows(&[
        "X........",
        ".O.......",
        ".........",
        "...X.....",
        ".........",
        ".........",
        ".........",
        ".........",
        "........O",
    ])
    .unwrap();
    // Same position turned a quarter clockwise
    let rotated = Board::from_rows(&[
        "........X",
        ".......O.",
        ".........",
        ".....X...",
        ".........",
        ".........",
        ".........",
        ".........",
        "O........",
    ])
    .unwrap();
    assert_eq!(canonical_key(&board, &zobrist), canonical_key(&rotated, &zobrist));
}
