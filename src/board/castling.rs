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

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::material::Color;
use super::moves::{Move, MoveKind};
use super::square::{File, Mask, Rank, Square};
use super::Board;

use File::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    #[inline]
    pub fn king_src(color: Color) -> Square {
        Square::new(FileE, Rank::back_rank(color))
    }
    #[inline]
    pub fn king_dest(&self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(FileG, Rank::back_rank(color)),
            CastleSide::QueenSide => Square::new(FileC, Rank::back_rank(color)),
        }
    }
    #[inline]
    pub fn rook_src(&self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(FileH, Rank::back_rank(color)),
            CastleSide::QueenSide => Square::new(FileA, Rank::back_rank(color)),
        }
    }
    #[inline]
    pub fn rook_dest(&self, color: Color) -> Square {
        match self {
            CastleSide::KingSide => Square::new(FileF, Rank::back_rank(color)),
            CastleSide::QueenSide => Square::new(FileD, Rank::back_rank(color)),
        }
    }
    /// Squares between king and rook that must be empty.
    pub fn blocking_lane(&self, color: Color) -> Mask {
        let files: &[File] = match self {
            CastleSide::KingSide => &[FileF, FileG],
            CastleSide::QueenSide => &[FileB, FileC, FileD],
        };
        lane(files, color)
    }
    /// Squares the opponent may not attack.
    pub fn attacking_lane(&self, color: Color) -> Mask {
        let files: &[File] = match self {
            CastleSide::KingSide => &[FileF, FileG],
            CastleSide::QueenSide => &[FileC, FileD],
        };
        lane(files, color)
    }
}

fn lane(files: &[File], color: Color) -> Mask {
    let rank = Rank::back_rank(color);
    Mask::from_squares(files.iter().map(|file| Square::new(*file, rank)))
}

/// An opposing pawn directly in front of the king's home square. Castling
/// is refused while it stands there.
pub fn is_king_pawn_trap(board: &Board, color: Color) -> bool {
    CastleSide::king_src(color)
        .offset(color.direction())
        .and_then(|square| board.piece_at(square))
        .is_some_and(|piece| piece.kind().is_pawn() && piece.color() != color)
}

/// Castling moves available to `color`. Needs the board's attack masks, so
/// it runs after the standard moves of both sides are known.
pub fn king_castles(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let king = *board.king(color);
    if king.has_moved()
        || king.square() != CastleSide::king_src(color)
        || board.is_in_check(color)
        || is_king_pawn_trap(board, color)
    {
        return moves;
    }
    let attacks = board.attacks(!color);
    let occupied = board.occupied();
    for side in CastleSide::iter() {
        let rook = match board.piece_at(side.rook_src(color)) {
            Some(rook)
                if rook.kind().is_rook()
                    && rook.color() == color
                    && !rook.has_moved() =>
            {
                *rook
            }
            _ => continue,
        };
        if !(side.blocking_lane(color) & occupied).is_empty()
            || !(side.attacking_lane(color) & attacks).is_empty()
        {
            continue;
        }
        let rook_to = side.rook_dest(color);
        let kind = match side {
            CastleSide::KingSide => MoveKind::CastleKingSide(rook, rook_to),
            CastleSide::QueenSide => MoveKind::CastleQueenSide(rook, rook_to),
        };
        moves.push(Move::new(board, king, side.king_dest(color), kind));
    }
    moves
}
