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

use rand::seq::SliceRandom;
use rand::thread_rng;
use std::time::Instant;
use tracing::debug;

use super::{MoveStrategy, SearchStats};
use crate::board::{Board, Move};

/// Picks uniformly among the moves that keep the king safe. Ignores depth.
#[derive(Debug, Default)]
pub struct RandomStrategy {
    stats: SearchStats,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoveStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "Random"
    }

    fn execute(&mut self, board: &Board, _depth: u32) -> Option<Move> {
        let start = Instant::now();
        let moves = board.current_player().playable_moves();
        let picked = moves.choose(&mut thread_rng()).copied();
        self.stats = SearchStats {
            elapsed: start.elapsed(),
            ..SearchStats::default()
        };
        debug!(moves = moves.len(), "random pick");
        picked
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
