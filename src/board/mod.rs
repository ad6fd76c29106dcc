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

//! Immutable board snapshots.
//!
//! A `Board` is assembled by a `BoardBuilder` and never changes after
//! `build()`. Building a board also computes the candidate moves of both
//! sides, the squares each side attacks, and whether either king is in
//! check, so every `Player` view over the board is a cheap borrow.

use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;
use thiserror::Error;

mod castling;
mod material;
mod moves;
mod pieces;
mod player;
mod square;

pub use castling::*;
pub use material::*;
pub use moves::*;
pub use player::*;
pub use square::*;

use Color::*;
use PieceKind::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("No {0} king on the board")]
    MissingKing(Color),
    #[error("More than one {0} king on the board")]
    DuplicateKing(Color),
    #[error("Square {0} was given two pieces")]
    SquareOccupied(Square),
    #[error("Square {0} does not hold the piece the move left there")]
    MoveMismatch(Square),
}
use BoardError::*;

/// A square as seen by a renderer: empty, or holding a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Occupied(Piece),
}

impl Tile {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied(_))
    }
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Tile::Empty => None,
            Tile::Occupied(piece) => Some(*piece),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pieces: Pair<Vec<Piece>>,
    kings: Pair<Piece>,
    moves: Pair<Vec<Move>>,
    attacks: Pair<Mask>,
    in_check: Pair<bool>,
    castled: Pair<bool>,
    turn: Color,
    en_passant: Option<Piece>,
    last_move: Option<Move>,
    // lazily answered "does this side have a move that keeps its king safe"
    escapes: Pair<OnceCell<bool>>,
}

static STANDARD_BOARD: Lazy<Board> = Lazy::new(|| {
    const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
    let mut builder = BoardBuilder::new();
    for color in Color::iter() {
        for (file, kind) in File::iter().zip(BACK_RANK) {
            builder = builder
                .place(Piece::new(kind, color, Square::new(file, Rank::back_rank(color))))
                .place(Piece::new(Pawn, color, Square::new(file, Rank::pawn_rank(color))));
        }
    }
    // Safety: one king per side and no shared squares
    builder
        .move_maker(White)
        .build()
        .expect("standard position is well formed")
});

impl Board {
    /// The standard starting position with White to move.
    pub fn standard() -> Self {
        STANDARD_BOARD.clone()
    }

    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// A builder holding this board's pieces, side to move, en-passant pawn
    /// and castled flags.
    pub fn to_builder(&self) -> BoardBuilder {
        BoardBuilder {
            squares: self.squares,
            conflict: None,
            move_maker: self.turn,
            en_passant: self.en_passant,
            last_move: self.last_move,
            castled: self.castled,
        }
    }

    #[inline]
    pub fn tile(&self, square: Square) -> Tile {
        match self.squares[square.to_index()] {
            Some(piece) => Tile::Occupied(piece),
            None => Tile::Empty,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.to_index()].as_ref()
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.squares[square.to_index()].is_none()
    }

    #[inline]
    pub fn pieces(&self, color: Color) -> &[Piece] {
        &self.pieces[color]
    }

    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.white().iter().chain(self.pieces.black().iter())
    }

    /// Squares holding a piece of either color.
    pub fn occupied(&self) -> Mask {
        Mask::from_squares(self.all_pieces().map(|piece| piece.square()))
    }

    #[inline]
    pub fn king(&self, color: Color) -> &Piece {
        &self.kings[color]
    }

    /// Candidate moves for `color`, castles included, not yet filtered for
    /// moves that leave the king in check.
    #[inline]
    pub fn moves(&self, color: Color) -> &[Move] {
        &self.moves[color]
    }

    /// Destinations of `color`'s non-castling candidate moves.
    #[inline]
    pub fn attacks(&self, color: Color) -> Mask {
        self.attacks[color]
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.in_check[color]
    }

    #[inline]
    pub fn is_castled(&self, color: Color) -> bool {
        self.castled[color]
    }

    /// The pawn that double-advanced on the previous ply, if any.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant.as_ref()
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn player(&self, color: Color) -> Player<'_> {
        Player::new(self, color)
    }

    #[inline]
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.turn)
    }

    #[inline]
    pub fn white_player(&self) -> Player<'_> {
        self.player(White)
    }

    #[inline]
    pub fn black_player(&self) -> Player<'_> {
        self.player(Black)
    }

    /// Either king is currently attacked.
    pub fn is_threatened(&self) -> bool {
        self.in_check[White] || self.in_check[Black]
    }

    /// The side to move is checkmated or stalemated.
    pub fn is_end_game(&self) -> bool {
        let player = self.current_player();
        player.is_in_checkmate() || player.is_in_stalemate()
    }

    /// Looks up the side to move's move from `from` to `to`. Promotions
    /// resolve to the queen promotion; see `find_promotion` for the others.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.current_player()
            .legal_moves()
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .copied()
    }

    pub fn find_promotion(&self, from: Square, to: Square, kind: PieceKind) -> Option<Move> {
        self.current_player()
            .legal_moves()
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == Some(kind))
            .copied()
    }

    pub(crate) fn escape_cell(&self, color: Color) -> &OnceCell<bool> {
        &self.escapes[color]
    }

    fn standard_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for piece in self.pieces(color) {
            piece.calculate_moves(self, &mut moves);
        }
        moves
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.to_index()]
    }
}

/// Positional equality: same pieces on the same squares, same side to
/// move, same en-passant pawn and castled flags. Cached move lists and
/// `last_move` are derived metadata and take no part.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.turn == other.turn
            && self.en_passant == other.en_passant
            && self.castled == other.castled
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            for file in File::iter() {
                match self.tile(Square::new(file, rank)) {
                    Tile::Occupied(piece) => write!(f, "{:>3}", piece.to_string())?,
                    Tile::Empty => write!(f, "{:>3}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BoardBuilder {
    squares: [Option<Piece>; 64],
    conflict: Option<Square>,
    move_maker: Color,
    en_passant: Option<Piece>,
    last_move: Option<Move>,
    castled: Pair<bool>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            squares: [None; 64],
            conflict: None,
            move_maker: White,
            en_passant: None,
            last_move: None,
            castled: Pair::default(),
        }
    }

    pub fn place(mut self, piece: Piece) -> Self {
        let slot = &mut self.squares[piece.square().to_index()];
        if slot.is_some() && self.conflict.is_none() {
            self.conflict = Some(piece.square());
        }
        *slot = Some(piece);
        self
    }

    pub fn remove(mut self, square: Square) -> Self {
        self.squares[square.to_index()] = None;
        self
    }

    pub fn move_maker(mut self, color: Color) -> Self {
        self.move_maker = color;
        self
    }

    pub fn en_passant(mut self, pawn: Option<Piece>) -> Self {
        self.en_passant = pawn;
        self
    }

    pub fn last_move(mut self, mv: Option<Move>) -> Self {
        self.last_move = mv;
        self
    }

    pub fn castled(mut self, color: Color, castled: bool) -> Self {
        self.castled[color] = castled;
        self
    }

    pub fn build(self) -> Result<Board, BoardError> {
        if let Some(square) = self.conflict {
            return Err(SquareOccupied(square));
        }
        let mut pieces = Pair::new(Vec::with_capacity(16), Vec::with_capacity(16));
        let mut kings: Pair<Option<Piece>> = Pair::default();
        for piece in self.squares.iter().flatten() {
            pieces[piece.color()].push(*piece);
            if piece.kind().is_king() && kings[piece.color()].replace(*piece).is_some() {
                return Err(DuplicateKing(piece.color()));
            }
        }
        let white_king = kings.white().ok_or(MissingKing(White))?;
        let black_king = kings.black().ok_or(MissingKing(Black))?;

        // an en-passant pawn must still be standing where it landed
        let en_passant = self
            .en_passant
            .filter(|pawn| self.squares[pawn.square().to_index()] == Some(*pawn));

        let mut board = Board {
            squares: self.squares,
            pieces,
            kings: Pair::new(white_king, black_king),
            moves: Pair::default(),
            attacks: Pair::default(),
            in_check: Pair::default(),
            castled: self.castled,
            turn: self.move_maker,
            en_passant,
            last_move: self.last_move,
            escapes: Pair::default(),
        };

        let mut standard = Pair::new(board.standard_moves(White), board.standard_moves(Black));
        for color in Color::iter() {
            board.attacks[color] = Mask::from_squares(standard[color].iter().map(|mv| mv.to()));
        }
        for color in Color::iter() {
            let king = board.kings[color].square();
            board.in_check[color] = board.attacks[!color].contains(king);
        }
        for color in Color::iter() {
            let castles = king_castles(&board, color);
            standard[color].extend(castles);
        }
        board.moves = standard;
        Ok(board)
    }
}
