// Copyright 2023 Tobin Edwards
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

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::material::{Color, Piece};
use super::moves::Move;
use super::{Board, Turn};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// The outcome of trying a move. On success it owns the new board; on
/// failure it borrows the board the move was tried on.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    board: Cow<'a, Board>,
    mv: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    fn done(board: Board, mv: Move) -> Self {
        Self {
            board: Cow::Owned(board),
            mv,
            status: MoveStatus::Done,
        }
    }
    fn rejected(board: &'a Board, mv: Move, status: MoveStatus) -> Self {
        Self {
            board: Cow::Borrowed(board),
            mv,
            status,
        }
    }
    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }
    #[inline]
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn into_board(self) -> Board {
        self.board.into_owned()
    }
}

/// One side's view of a board.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    color: Color,
}

impl<'a> Player<'a> {
    #[inline]
    pub fn new(board: &'a Board, color: Color) -> Self {
        Self { board, color }
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }
    #[inline]
    pub fn king(&self) -> &'a Piece {
        self.board.king(self.color)
    }
    #[inline]
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.pieces(self.color)
    }
    #[inline]
    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.board, !self.color)
    }

    /// Every candidate move, castles included. Moves that would leave the
    /// king in check are still present; `make_move` rejects them.
    #[inline]
    pub fn legal_moves(&self) -> &'a [Move] {
        self.board.moves(self.color)
    }

    /// Legal moves with those that expose the king filtered out.
    pub fn playable_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .iter()
            .filter(|mv| self.keeps_king_safe(mv))
            .copied()
            .collect()
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check(self.color)
    }
    #[inline]
    pub fn is_castled(&self) -> bool {
        self.board.is_castled(self.color)
    }

    /// At least one legal move keeps the king out of check. The answer is
    /// cached on the board.
    pub fn has_escape_moves(&self) -> bool {
        *self
            .board
            .escape_cell(self.color)
            .get_or_init(|| self.legal_moves().iter().any(|mv| self.keeps_king_safe(mv)))
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_escape_moves()
    }

    fn keeps_king_safe(&self, mv: &Move) -> bool {
        mv.execute(self.board)
            .map(|next| !next.is_in_check(self.color))
            .unwrap_or(false)
    }

    /// Tries `mv` for this side. The board is never changed: a successful
    /// transition carries the successor, a rejected one the board it was tried on.
    pub fn make_move(&self, mv: Move) -> MoveTransition<'a> {
        if self.board.turn() != self.color || !self.legal_moves().contains(&mv) {
            return MoveTransition::rejected(self.board, mv, MoveStatus::IllegalMove);
        }
        match mv.execute(self.board) {
            Ok(next) if next.is_in_check(self.color) => {
                MoveTransition::rejected(self.board, mv, MoveStatus::LeavesPlayerInCheck)
            }
            Ok(next) => MoveTransition::done(next, mv),
            // only a king capture fails to build
            Err(_) => MoveTransition::rejected(self.board, mv, MoveStatus::IllegalMove),
        }
    }

    /// Reverts `mv`, which this side played to reach the current board.
    pub fn unmake_move(&self, mv: Move) -> MoveTransition<'a> {
        if mv.color() != self.color || self.board.turn() == self.color {
            return MoveTransition::rejected(self.board, mv, MoveStatus::IllegalMove);
        }
        match mv.undo(self.board) {
            Ok(previous) => MoveTransition::done(previous, mv),
            Err(_) => MoveTransition::rejected(self.board, mv, MoveStatus::IllegalMove),
        }
    }
}

impl Turn for Player<'_> {
    fn turn(&self) -> Color {
        self.board.turn()
    }
}
