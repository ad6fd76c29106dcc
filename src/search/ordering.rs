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

use std::cmp::Reverse;

use crate::board::{Board, Move};

/// Sort key, smallest first: moves from a threatened board, then captures,
/// then castles, then moves of the more valuable piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    threatened: Reverse<bool>,
    attack: Reverse<bool>,
    castle: Reverse<bool>,
    value: Reverse<i32>,
}

impl OrderKey {
    fn new(board: &Board, mv: &Move) -> Self {
        Self {
            threatened: Reverse(board.is_threatened()),
            attack: Reverse(mv.is_attack()),
            castle: Reverse(mv.is_castle()),
            value: Reverse(mv.piece().value()),
        }
    }
}

/// Orders `moves`, all generated on `board`, so the likeliest cutoffs are
/// searched first. The sort is stable.
pub fn order_moves(board: &Board, moves: &[Move]) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_key(|mv| OrderKey::new(board, mv));
    ordered
}
