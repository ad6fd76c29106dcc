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

use super::material::{Color, Piece, PieceKind};
use super::moves::{Move, MoveKind};
use super::square::{Rank, Square};
use super::square::{EIGHTH_COLUMN, FIRST_COLUMN, SECOND_COLUMN, SEVENTH_COLUMN};
use super::Board;

use PieceKind::*;

const KNIGHT_OFFSETS: [isize; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [isize; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_OFFSETS: [isize; 4] = [-9, -7, 7, 9];
const ROOK_OFFSETS: [isize; 4] = [-8, -1, 1, 8];
const QUEEN_OFFSETS: [isize; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

impl Piece {
    /// Candidate moves for this piece on `board`. Moves that would leave
    /// the mover's king in check are included; castles are not (see
    /// `king_castles`).
    pub fn candidate_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        self.calculate_moves(board, &mut moves);
        moves
    }

    pub(super) fn calculate_moves(&self, board: &Board, moves: &mut Vec<Move>) {
        match self.kind() {
            Pawn => pawn_moves(self, board, moves),
            Knight => step_moves(self, board, &KNIGHT_OFFSETS, knight_exclusion, moves),
            Bishop => slide_moves(self, board, &BISHOP_OFFSETS, moves),
            Rook => slide_moves(self, board, &ROOK_OFFSETS, moves),
            Queen => slide_moves(self, board, &QUEEN_OFFSETS, moves),
            King => step_moves(self, board, &KING_OFFSETS, column_exclusion, moves),
        }
    }
}

/// One-square steps toward the a-file or h-file that would wrap around
/// the board edge.
fn column_exclusion(from: Square, offset: isize) -> bool {
    (from.is_in(FIRST_COLUMN) && matches!(offset, -9 | -1 | 7))
        || (from.is_in(EIGHTH_COLUMN) && matches!(offset, -7 | 1 | 9))
}

fn knight_exclusion(from: Square, offset: isize) -> bool {
    (from.is_in(FIRST_COLUMN) && matches!(offset, -17 | -10 | 6 | 15))
        || (from.is_in(SECOND_COLUMN) && matches!(offset, -10 | 6))
        || (from.is_in(SEVENTH_COLUMN) && matches!(offset, -6 | 10))
        || (from.is_in(EIGHTH_COLUMN) && matches!(offset, -15 | -6 | 10 | 17))
}

fn step_moves(
    piece: &Piece,
    board: &Board,
    offsets: &[isize],
    excluded: fn(Square, isize) -> bool,
    moves: &mut Vec<Move>,
) {
    let from = piece.square();
    for &offset in offsets {
        if excluded(from, offset) {
            continue;
        }
        let Some(dest) = from.offset(offset) else {
            continue;
        };
        match board.piece_at(dest) {
            None => moves.push(Move::new(board, *piece, dest, MoveKind::Normal)),
            Some(occupant) if occupant.color() != piece.color() => {
                moves.push(Move::new(board, *piece, dest, MoveKind::Attack(*occupant)))
            }
            Some(_) => {}
        }
    }
}

fn slide_moves(piece: &Piece, board: &Board, offsets: &[isize], moves: &mut Vec<Move>) {
    for &offset in offsets {
        let mut current = piece.square();
        while !column_exclusion(current, offset) {
            let Some(dest) = current.offset(offset) else {
                break;
            };
            match board.piece_at(dest) {
                None => moves.push(Move::new(board, *piece, dest, MoveKind::Normal)),
                Some(occupant) => {
                    if occupant.color() != piece.color() {
                        moves.push(Move::new(board, *piece, dest, MoveKind::Attack(*occupant)));
                    }
                    break;
                }
            }
            current = dest;
        }
    }
}

fn pawn_moves(pawn: &Piece, board: &Board, moves: &mut Vec<Move>) {
    let color = pawn.color();
    let from = pawn.square();
    let direction = color.direction();

    if let Some(dest) = from.offset(direction) {
        if board.is_vacant(dest) {
            if is_promotion_square(dest, color) {
                push_promotions(pawn, board, dest, None, moves);
            } else {
                moves.push(Move::new(board, *pawn, dest, MoveKind::Normal));
            }
            if pawn.on_start_rank() {
                if let Some(jump) = from.offset(2 * direction) {
                    if board.is_vacant(jump) {
                        moves.push(Move::new(board, *pawn, jump, MoveKind::PawnJump));
                    }
                }
            }
        }
    }

    // diagonals: toward the a-file first, then toward the h-file
    let diagonals = match color {
        Color::White => [-9, -7],
        Color::Black => [7, 9],
    };
    for offset in diagonals {
        if column_exclusion(from, offset) {
            continue;
        }
        let Some(dest) = from.offset(offset) else {
            continue;
        };
        match board.piece_at(dest) {
            Some(occupant) if occupant.color() != color => {
                if is_promotion_square(dest, color) {
                    push_promotions(pawn, board, dest, Some(*occupant), moves);
                } else {
                    moves.push(Move::new(board, *pawn, dest, MoveKind::Attack(*occupant)));
                }
            }
            Some(_) => {}
            None => {
                if let Some(target) = en_passant_target(pawn, board, dest) {
                    moves.push(Move::new(board, *pawn, dest, MoveKind::EnPassant(target)));
                }
            }
        }
    }
}

/// The enemy pawn that just double-advanced to the square beside `pawn`
/// and can be captured by moving diagonally to `dest`.
fn en_passant_target(pawn: &Piece, board: &Board, dest: Square) -> Option<Piece> {
    let target = *board.en_passant_pawn()?;
    let beside = Square::new(dest.file(), pawn.square().rank());
    (target.color() != pawn.color() && target.square() == beside).then_some(target)
}

#[inline]
fn is_promotion_square(square: Square, color: Color) -> bool {
    square.rank() == Rank::promotion_rank(color)
}

fn push_promotions(
    pawn: &Piece,
    board: &Board,
    dest: Square,
    captured: Option<Piece>,
    moves: &mut Vec<Move>,
) {
    for kind in PieceKind::PROMOTIONS {
        moves.push(Move::new(board, *pawn, dest, MoveKind::PawnPromotion(captured, kind)));
    }
}
