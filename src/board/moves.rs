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
use std::fmt;

use super::material::{Color, Piece, PieceKind};
use super::square::Square;
use super::{Board, BoardBuilder, BoardError};

/// What sets a move apart from a plain relocation, plus whatever extra
/// pieces applying or reverting it has to touch.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Attack(Piece),
    PawnJump,
    /// Optional captured piece and the kind promoted to.
    PawnPromotion(Option<Piece>, PieceKind),
    EnPassant(Piece),
    /// The castling rook as it stood, and the square it lands on.
    CastleKingSide(Piece, Square),
    CastleQueenSide(Piece, Square),
}

/// A description of a move on a particular board. It carries the moved
/// piece as it stood before the move, along with everything needed to
/// rebuild the board on either side of it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    to: Square,
    kind: MoveKind,
    // en-passant pawn of the board the move was generated on
    en_passant: Option<Piece>,
}

impl Move {
    pub fn new(board: &Board, piece: Piece, to: Square, kind: MoveKind) -> Self {
        Self {
            piece,
            to,
            kind,
            en_passant: board.en_passant_pawn().copied(),
        }
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }
    #[inline]
    pub fn from(&self) -> Square {
        self.piece.square()
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }
    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn captured(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Attack(piece) | MoveKind::EnPassant(piece) => Some(piece),
            MoveKind::PawnPromotion(captured, _) => captured,
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::PawnPromotion(_, kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn is_attack(&self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingSide(..) | MoveKind::CastleQueenSide(..)
        )
    }

    /// The piece that ends up on `to`.
    pub fn landed(&self) -> Piece {
        match self.kind {
            MoveKind::PawnPromotion(_, kind) => self.piece.promoted_to(self.to, kind),
            _ => self.piece.moved_to(self.to),
        }
    }

    fn castle_rook(&self) -> Option<(Piece, Square)> {
        match self.kind {
            MoveKind::CastleKingSide(rook, to) | MoveKind::CastleQueenSide(rook, to) => {
                Some((rook, to))
            }
            _ => None,
        }
    }

    /// Builds the board that follows this move. Everything except the
    /// moved piece, its capture and a castling rook is carried over as is.
    pub fn execute(&self, board: &Board) -> Result<Board, BoardError> {
        let captured = self.captured();
        let rook = self.castle_rook();
        let mut builder = BoardBuilder::new();
        for piece in board.all_pieces() {
            if *piece == self.piece
                || Some(*piece) == captured
                || Some(*piece) == rook.map(|(rook, _)| rook)
            {
                continue;
            }
            builder = builder.place(*piece);
        }
        builder = builder.place(self.landed());
        if let Some((rook, to)) = rook {
            builder = builder.place(rook.moved_to(to));
        }
        let color = self.color();
        let en_passant = match self.kind {
            MoveKind::PawnJump => Some(self.landed()),
            _ => None,
        };
        builder
            .move_maker(!color)
            .en_passant(en_passant)
            .castled(color, board.is_castled(color) || self.is_castle())
            .castled(!color, board.is_castled(!color))
            .last_move(Some(*self))
            .build()
    }

    /// Rebuilds the board this move was played on from the board it
    /// produced. Fails if `board` does not hold the moved piece on `to`.
    pub fn undo(&self, board: &Board) -> Result<Board, BoardError> {
        if board.piece_at(self.to).copied() != Some(self.landed()) {
            return Err(BoardError::MoveMismatch(self.to));
        }
        let rook = self.castle_rook();
        if let Some((rook, to)) = rook {
            if board.piece_at(to).copied() != Some(rook.moved_to(to)) {
                return Err(BoardError::MoveMismatch(to));
            }
        }
        let mut builder = BoardBuilder::new();
        for piece in board.all_pieces() {
            if piece.square() == self.to || rook.is_some_and(|(_, to)| piece.square() == to) {
                continue;
            }
            builder = builder.place(*piece);
        }
        builder = builder.place(self.piece);
        if let Some(captured) = self.captured() {
            builder = builder.place(captured);
        }
        if let Some((rook, _)) = rook {
            builder = builder.place(rook);
        }
        let color = self.color();
        builder
            .move_maker(color)
            .en_passant(self.en_passant)
            .castled(color, board.is_castled(color) && !self.is_castle())
            .castled(!color, board.is_castled(!color))
            .build()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::CastleKingSide(..) => return write!(f, "O-O"),
            MoveKind::CastleQueenSide(..) => return write!(f, "O-O-O"),
            _ => {}
        }
        if self.piece.kind().is_pawn() {
            if self.is_attack() {
                write!(f, "{}x", self.from().file())?;
            }
        } else {
            write!(f, "{}", self.piece.to_string().to_ascii_uppercase())?;
            if self.is_attack() {
                write!(f, "x")?;
            }
        }
        write!(f, "{}", self.to)?;
        if let Some(kind) = self.promotion() {
            let symbol = Piece::new(kind, Color::White, self.to).to_string();
            write!(f, "={}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square::*;
    use crate::board::Turn;
    use Color::*;
    use PieceKind::*;

    #[test]
    fn test_execute_pawn_jump() {
        let board = Board::standard();
        let mv = board.find_move(E2, E4).unwrap();
        let next = mv.execute(&board).unwrap();
        assert_eq!(next.turn(), Black);
        assert!(next.is_vacant(E2));
        let pawn = next.piece_at(E4).copied().unwrap();
        assert!(pawn.has_moved());
        assert_eq!(next.en_passant_pawn(), Some(&pawn));
        assert_eq!(next.last_move(), Some(&mv));
        assert_eq!(next.pieces(White).len(), 16);
    }
    #[test]
    fn test_execute_and_undo_capture() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, White, E1))
            .place(Piece::new(King, Black, E8))
            .place(Piece::new(Rook, White, A1))
            .place(Piece::new(Knight, Black, A7))
            .build()
            .unwrap();
        let mv = board.find_move(A1, A7).unwrap();
        assert_eq!(mv.captured().map(|p| p.kind()), Some(Knight));
        let next = mv.execute(&board).unwrap();
        assert_eq!(next.pieces(Black).len(), 1);
        let back = mv.undo(&next).unwrap();
        assert_eq!(back, board);
        assert_eq!(back.piece_at(A1).map(|p| p.has_moved()), Some(false));
    }
    #[test]
    fn test_undo_requires_landed_piece() {
        let board = Board::standard();
        let mv = board.find_move(G1, F3).unwrap();
        assert_eq!(mv.undo(&board).err(), Some(BoardError::MoveMismatch(F3)));
    }
    #[test]
    fn test_promotion_round_trip() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, White, E1))
            .place(Piece::new(King, Black, H8))
            .place(Piece::new(Pawn, White, B7).with_moved(true))
            .place(Piece::new(Rook, Black, A8))
            .build()
            .unwrap();
        let mv = board.find_promotion(B7, A8, Knight).unwrap();
        let next = mv.execute(&board).unwrap();
        assert_eq!(next.piece_at(A8).map(|p| p.kind()), Some(Knight));
        assert_eq!(next.piece_at(A8).map(|p| p.color()), Some(White));
        assert_eq!(mv.to_string(), "bxa8=N");
        assert_eq!(mv.undo(&next).unwrap(), board);
    }
    #[test]
    fn test_display() {
        let board = Board::standard();
        assert_eq!(board.find_move(G1, F3).unwrap().to_string(), "Nf3");
        assert_eq!(board.find_move(D2, D4).unwrap().to_string(), "d4");
    }
}
