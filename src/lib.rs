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

//! Chess rules and move search.
//!
//! Boards are immutable and built once, with both sides' candidate moves
//! cached. The rules cover castling, en passant and promotion to any piece,
//! along with check, checkmate and stalemate. Every move can be undone
//! exactly. On top of the rules sit minimax and alpha-beta searches with
//! move ordering and a quiescence extension, scored by an evaluator that
//! weighs material, mobility, king safety and pawn structure. Draws by
//! repetition or the fifty-move rule are not tracked.
//!
//! ```
//! use riff_engine::{Board, Square};
//! use riff_engine::search::{AlphaBeta, MoveStrategy, SearchConfig};
//!
//! let board = Board::standard();
//! let mv = board.find_move(Square::E2, Square::E4).unwrap();
//! let next = board.current_player().make_move(mv).into_board();
//! let reply = AlphaBeta::new(SearchConfig::default()).execute(&next, 2);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod game;
pub mod search;

pub use board::*;
pub use game::{Game, GameError, GameId, GameResult};
