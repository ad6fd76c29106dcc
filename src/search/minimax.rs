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

/// Exhaustive minimax. Visits every node to the requested depth; the bounds
/// passed in are ignored below the root.
#[derive(Debug)]
pub struct MiniMax<E = StandardEvaluator> {
    core: SearchCore<E>,
}

impl MiniMax<StandardEvaluator> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(StandardEvaluator::default(), config)
    }
}

impl Default for MiniMax<StandardEvaluator> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<E: BoardEvaluator> MiniMax<E> {
    pub fn with_evaluator(evaluator: E, config: SearchConfig) -> Self {
        Self {
            core: SearchCore::new(evaluator, config),
        }
    }

    pub fn with_events(mut self, events: Sender<SearchEvent>) -> Self {
        self.core.set_events(events);
        self
    }
}

impl<E: BoardEvaluator> TreeSearch for MiniMax<E> {
    type Evaluator = E;

    fn core(&mut self) -> &mut SearchCore<E> {
        &mut self.core
    }

    fn max(&mut self, board: &Board, depth: u32, _highest: i32, _lowest: i32) -> i32 {
        if depth == 0 {
            return self.core.evaluate(board, depth);
        }
        let player = board.current_player();
        let mut highest = None;
        for mv in order_moves(board, player.legal_moves()) {
            let transition = player.make_move(mv);
            if transition.is_done() {
                let next_depth = self.core.next_depth(board, depth);
                let value = self.min(transition.board(), next_depth, i32::MIN, i32::MAX);
                highest = highest.max(Some(value));
            }
        }
        match highest {
            Some(value) => value,
            None => self.core.evaluate(board, depth),
        }
    }

    fn min(&mut self, board: &Board, depth: u32, _highest: i32, _lowest: i32) -> i32 {
        if depth == 0 {
            return self.core.evaluate(board, depth);
        }
        let player = board.current_player();
        let mut lowest: Option<i32> = None;
        for mv in order_moves(board, player.legal_moves()) {
            let transition = player.make_move(mv);
            if transition.is_done() {
                let next_depth = self.core.next_depth(board, depth);
                let value = self.max(transition.board(), next_depth, i32::MIN, i32::MAX);
                lowest = Some(lowest.map_or(value, |lowest| lowest.min(value)));
            }
        }
        match lowest {
            // no move left: checkmate or stalemate
            None => self.core.evaluate(board, depth),
            Some(value) => value,
        }
    }
}

impl<E: BoardEvaluator + Send> MoveStrategy for MiniMax<E> {
    fn name(&self) -> &str {
        "MiniMax"
    }

    fn execute(&mut self, board: &Board, depth: u32) -> Option<Move> {
        search_root(self, "MiniMax", board, depth)
    }

    fn stats(&self) -> &SearchStats {
        self.core.stats()
    }
}
