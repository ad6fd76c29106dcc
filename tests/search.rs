// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;

use riff_engine::search::{
    AlphaBeta, BoardEvaluator, EvaluatorConfig, MiniMax, MoveStrategy, SearchConfig, SearchEvent,
    StandardEvaluator,
};
use riff_engine::{Board, BoardBuilder, Color, Move, Piece, PieceKind, Square, Turn};
use Color::*;
use PieceKind::*;
use Square::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Plain minimax value, no extensions.
fn value(evaluator: &StandardEvaluator, board: &Board, depth: u32) -> i32 {
    if depth == 0 || board.is_end_game() {
        return evaluator.evaluate(board, depth);
    }
    let player = board.current_player();
    let values = player
        .legal_moves()
        .iter()
        .map(|mv| player.make_move(*mv))
        .filter(|transition| transition.is_done())
        .map(|transition| value(evaluator, transition.board(), depth - 1));
    let best = match board.turn() {
        White => values.max(),
        Black => values.min(),
    };
    best.unwrap_or_default()
}

fn move_value(board: &Board, mv: Move, depth: u32) -> i32 {
    let next = board.current_player().make_move(mv).into_board();
    value(&StandardEvaluator::default(), &next, depth - 1)
}

fn middle_game() -> Board {
    BoardBuilder::new()
        .place(Piece::new(King, White, G1))
        .place(Piece::new(Rook, White, D1))
        .place(Piece::new(Knight, White, F3))
        .place(Piece::new(Pawn, White, F2))
        .place(Piece::new(Pawn, White, G2))
        .place(Piece::new(Pawn, White, H2))
        .place(Piece::new(King, Black, G8))
        .place(Piece::new(Rook, Black, D8))
        .place(Piece::new(Bishop, Black, C5))
        .place(Piece::new(Pawn, Black, F7))
        .place(Piece::new(Pawn, Black, G7))
        .place(Piece::new(Pawn, Black, E5).with_moved(true))
        .build()
        .unwrap()
}

#[test]
fn test_minimax_and_alpha_beta_agree() {
    init_tracing();
    let config = SearchConfig::default().with_quiescence_factor(0);
    for board in [middle_game(), middle_game().to_builder().move_maker(Black).build().unwrap()] {
        let mut minimax = MiniMax::new(config.clone());
        let mut alpha_beta = AlphaBeta::new(config.clone());
        let a = minimax.execute(&board, 3).unwrap();
        let b = alpha_beta.execute(&board, 3).unwrap();
        assert_eq!(move_value(&board, a, 3), move_value(&board, b, 3));
        assert!(alpha_beta.stats().boards_evaluated < minimax.stats().boards_evaluated);
        assert!(alpha_beta.stats().cutoffs > 0);
    }
}

#[test]
fn test_mate_in_one() {
    init_tracing();
    let board = BoardBuilder::new()
        .place(Piece::new(King, White, G1))
        .place(Piece::new(Rook, White, A1))
        .place(Piece::new(King, Black, G8))
        .place(Piece::new(Pawn, Black, F7))
        .place(Piece::new(Pawn, Black, G7))
        .place(Piece::new(Pawn, Black, H7))
        .build()
        .unwrap();
    for depth in 1..=3 {
        let mv = AlphaBeta::default().execute(&board, depth).unwrap();
        assert_eq!((mv.from(), mv.to()), (A1, A8), "depth {}", depth);
        let mv = MiniMax::default().execute(&board, depth).unwrap();
        assert_eq!((mv.from(), mv.to()), (A1, A8), "depth {}", depth);
    }
}

#[test]
fn test_black_finds_fools_mate() {
    let mut board = Board::standard();
    for (from, to) in [(F2, F3), (E7, E5), (G2, G4)] {
        let mv = board.find_move(from, to).unwrap();
        board = board.current_player().make_move(mv).into_board();
    }
    let mv = AlphaBeta::default().execute(&board, 2).unwrap();
    assert_eq!((mv.from(), mv.to()), (D8, H4));
}

#[test]
fn test_quiescence_extends_checks() {
    let board = BoardBuilder::new()
        .place(Piece::new(King, White, G1))
        .place(Piece::new(Queen, White, D1))
        .place(Piece::new(King, Black, E8))
        .place(Piece::new(Rook, Black, A8))
        .build()
        .unwrap();
    let mut search = AlphaBeta::default();
    search.execute(&board, 2);
    assert!(search.stats().quiescence_count > 0);
    let mut search = AlphaBeta::new(SearchConfig::default().with_quiescence_factor(0));
    search.execute(&board, 2);
    assert_eq!(search.stats().quiescence_count, 0);
}

#[test]
fn test_progress_channel() {
    init_tracing();
    let (tx, rx) = channel();
    let handle = thread::spawn(move || {
        let mut search = AlphaBeta::default().with_events(tx);
        search.execute(&Board::standard(), 2)
    });
    let events: Vec<SearchEvent> = rx.iter().collect();
    let best = handle.join().unwrap();
    assert!(best.is_some());
    assert_eq!(events.len(), 21);
    for (index, event) in events[..20].iter().enumerate() {
        match event {
            SearchEvent::Progress(progress) => {
                assert_eq!(progress.index, index + 1);
                assert_eq!(progress.total, 20);
                assert!(event.to_string().starts_with("AB+MO(2), move: "));
            }
            SearchEvent::Summary(_) => panic!("summary before the last root move"),
        }
    }
    match &events[20] {
        SearchEvent::Summary(summary) => {
            assert_eq!(summary.best, best);
            assert_eq!(summary.color, White);
            assert!(events[20].to_string().contains("SELECTS"));
        }
        SearchEvent::Progress(_) => panic!("missing summary"),
    }
}

#[test]
fn test_cancellation() {
    let stop = Arc::new(AtomicBool::new(true));
    let config = SearchConfig::default().with_stop(stop);
    let mut search = MiniMax::new(config);
    assert!(search.execute(&Board::standard(), 3).is_none());
    assert_eq!(search.stats().boards_evaluated, 0);
}

#[test]
fn test_custom_evaluator() {
    struct Material;
    impl BoardEvaluator for Material {
        fn evaluate(&self, board: &Board, _depth: u32) -> i32 {
            let sum = |color| board.pieces(color).iter().map(|p| p.value()).sum::<i32>();
            sum(White) - sum(Black)
        }
    }
    let board = BoardBuilder::new()
        .place(Piece::new(King, White, A1))
        .place(Piece::new(Bishop, White, B2))
        .place(Piece::new(Rook, Black, G7))
        .place(Piece::new(King, Black, H8))
        .build()
        .unwrap();
    let mut search = AlphaBeta::with_evaluator(Material, SearchConfig::default());
    let mv = search.execute(&board, 1).unwrap();
    assert_eq!((mv.from(), mv.to()), (B2, G7));
    assert!(Material.explain(&board, 0).contains("Final Score"));
}

#[test]
fn test_evaluator_config_from_json() {
    let config: EvaluatorConfig = serde_json::from_str(
        r#"{"check_bonus":50,"checkmate_bonus":10000,"depth_bonus":100,"castle_bonus":60,
            "mobility_multiplier":0,"isolated_pawn_penalty":-10,"doubled_pawn_penalty":-10,
            "doubled_pawns":false}"#,
    )
    .unwrap();
    assert_eq!(config.check_bonus, 50);
    let evaluator = StandardEvaluator::new(config);
    assert_eq!(evaluator.evaluate(&Board::standard(), 0), 0);
}
