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

use std::sync::mpsc::Sender;

use super::{
    order_moves, search_root, BoardEvaluator, MoveStrategy, SearchConfig, SearchCore,
    SearchEvent, SearchStats, StandardEvaluator, TreeSearch,
};
use crate::board::{Board, Move};

/// Minimax with alpha-beta bounds and ordered moves.
#[derive(Debug)]
pub struct AlphaBeta<E = StandardEvaluator> {
    core: SearchCore<E>,
}

impl AlphaBeta<StandardEvaluator> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(StandardEvaluator::default(), config)
    }
}

impl Default for AlphaBeta<StandardEvaluator> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<E: BoardEvaluator> AlphaBeta<E> {
    pub fn with_evaluator(evaluator: E, config: SearchConfig) -> Self {
        Self {
            core: SearchCore::new(evaluator, config),
        }
    }

    /// Sends a `SearchEvent` for every root move and one summary per search.
    pub fn with_events(mut self, events: Sender<SearchEvent>) -> Self {
        self.core.set_events(events);
        self
    }
}

impl<E: BoardEvaluator> TreeSearch for AlphaBeta<E> {
    type Evaluator = E;

    fn core(&mut self) -> &mut SearchCore<E> {
        &mut self.core
    }

    fn max(&mut self, board: &Board, depth: u32, highest: i32, lowest: i32) -> i32 {
        if depth == 0 {
            return self.core.evaluate(board, depth);
        }
        let player = board.current_player();
        let mut current_highest = highest;
        let mut searched = false;
        for mv in order_moves(board, player.legal_moves()) {
            let transition = player.make_move(mv);
            if !transition.is_done() {
                continue;
            }
            searched = true;
            let next_depth = self.core.next_depth(board, depth);
            let value = self.min(transition.board(), next_depth, current_highest, lowest);
            current_highest = current_highest.max(value);
            if lowest <= current_highest {
                self.core.cutoff();
                break;
            }
        }
        if !searched {
            return self.core.evaluate(board, depth);
        }
        current_highest
    }

    fn min(&mut self, board: &Board, depth: u32, highest: i32, lowest: i32) -> i32 {
        if depth == 0 {
            return self.core.evaluate(board, depth);
        }
        let player = board.current_player();
        let mut current_lowest = lowest;
        let mut searched = false;
        for mv in order_moves(board, player.legal_moves()) {
            let transition = player.make_move(mv);
            if !transition.is_done() {
                continue;
            }
            searched = true;
            let next_depth = self.core.next_depth(board, depth);
            let value = self.max(transition.board(), next_depth, highest, current_lowest);
            current_lowest = current_lowest.min(value);
            if current_lowest <= highest {
                self.core.cutoff();
                break;
            }
        }
        if !searched {
            return self.core.evaluate(board, depth);
        }
        current_lowest
    }
}

impl<E: BoardEvaluator + Send> MoveStrategy for AlphaBeta<E> {
    fn name(&self) -> &str {
        "AB+MO"
    }

    fn execute(&mut self, board: &Board, depth: u32) -> Option<Move> {
        search_root(self, "AB+MO", board, depth)
    }

    fn stats(&self) -> &SearchStats {
        self.core.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, Color::*, Piece, PieceKind::*, Square::*};
    use std::sync::mpsc::channel;

    #[test]
    fn test_takes_hanging_queen() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, White, G1))
            .place(Piece::new(Rook, White, D1))
            .place(Piece::new(Queen, Black, D5))
            .place(Piece::new(King, Black, G8))
            .build()
            .unwrap();
        let mut search = AlphaBeta::default();
        let mv = search.execute(&board, 2).unwrap();
        assert_eq!((mv.from(), mv.to()), (D1, D5));
        assert!(search.stats().boards_evaluated > 0);
    }
    #[test]
    fn test_no_move_when_mated() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, Black, H8))
            .place(Piece::new(Queen, White, G7))
            .place(Piece::new(King, White, F6))
            .move_maker(Black)
            .build()
            .unwrap();
        let (tx, rx) = channel();
        let mut search = AlphaBeta::default().with_events(tx);
        assert!(search.execute(&board, 3).is_none());
        // every root move is reported, then the summary
        let events: Vec<SearchEvent> = rx.try_iter().collect();
        assert!(matches!(events.last(), Some(SearchEvent::Summary(summary)) if summary.best.is_none()));
        assert!(events[..events.len() - 1]
            .iter()
            .all(|event| matches!(event, SearchEvent::Progress(p) if !p.status.is_done())));
    }
    #[test]
    fn test_mated_reply_scored_where_found() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, White, G1))
            .place(Piece::new(Rook, White, A1))
            .place(Piece::new(King, Black, G8))
            .place(Piece::new(Pawn, Black, F7))
            .place(Piece::new(Pawn, Black, G7))
            .place(Piece::new(Pawn, Black, H7))
            .build()
            .unwrap();
        let (tx, rx) = channel();
        let mut search = AlphaBeta::default().with_events(tx);
        let mv = search.execute(&board, 3).unwrap();
        assert_eq!((mv.from(), mv.to()), (A1, A8));
        // the mated board is scored with the depth it was reached at
        let mated = board.current_player().make_move(mv).into_board();
        let expected = StandardEvaluator::default().evaluate(&mated, 2);
        let last = rx
            .try_iter()
            .filter_map(|event| match event {
                SearchEvent::Progress(progress) => Some(progress),
                SearchEvent::Summary(_) => None,
            })
            .last()
            .unwrap();
        assert_eq!(last.mv, mv);
        assert_eq!(last.highest, expected);
    }
    #[test]
    fn test_counters_reset() {
        let board = Board::standard();
        let mut search = AlphaBeta::new(SearchConfig::default().with_quiescence_factor(0));
        search.execute(&board, 2);
        let first = *search.stats();
        search.execute(&board, 2);
        assert_eq!(search.stats().boards_evaluated, first.boards_evaluated);
        assert_eq!(search.stats().cutoffs, first.cutoffs);
    }
}
