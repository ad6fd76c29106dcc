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
use std::fmt;
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

use super::square::{Rank, Square};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

use Color::{Black, White};

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    #[inline]
    pub const fn opponent(&self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }

    /// Linear index step for a pawn advancing one square.
    #[inline]
    pub const fn direction(&self) -> isize {
        match self {
            White => -8,
            Black => 8,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.opponent()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

impl PieceKind {
    /// Kinds a pawn may promote to, in the order they are offered.
    pub const PROMOTIONS: [PieceKind; 4] = [Queen, Rook, Bishop, Knight];

    pub const fn value(&self) -> i32 {
        match self {
            Pawn => 100,
            Knight => 300,
            Bishop => 330,
            Rook => 500,
            Queen => 900,
            King => 10000,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_rook(&self) -> bool {
        matches!(*self, Rook)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }

    fn symbol(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }
}

/// A piece as it stands on one particular board. Moving a piece never
/// mutates it; the successor board holds a new `Piece` at the destination.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            moved: false,
        }
    }

    #[inline]
    pub const fn with_moved(mut self, moved: bool) -> Self {
        self.moved = moved;
        self
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// The piece after travelling to `to`, flagged as moved.
    #[inline]
    pub fn moved_to(&self, to: Square) -> Self {
        Self {
            square: to,
            moved: true,
            ..*self
        }
    }

    /// The pawn after promoting on `to`.
    #[inline]
    pub fn promoted_to(&self, to: Square, kind: PieceKind) -> Self {
        Self {
            kind,
            square: to,
            moved: true,
            ..*self
        }
    }

    #[inline]
    pub fn on_start_rank(&self) -> bool {
        self.square.rank() == Rank::pawn_rank(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.color {
            White => self.kind.symbol(),
            Black => self.kind.symbol().to_ascii_lowercase(),
        };
        write!(f, "{}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_piece_values_ordered() {
        assert!(Pawn.value() < Knight.value());
        assert!(Knight.value() < Bishop.value());
        assert!(Bishop.value() < Rook.value());
        assert!(Rook.value() < Queen.value());
        assert!(Queen.value() < King.value());
    }
    #[test]
    fn test_moved_to_sets_flag() {
        let pawn = Piece::new(Pawn, White, E2);
        assert!(!pawn.has_moved());
        assert!(pawn.on_start_rank());
        let pawn = pawn.moved_to(E4);
        assert!(pawn.has_moved());
        assert_eq!(pawn.square(), E4);
        assert!(!pawn.on_start_rank());
    }
    #[test]
    fn test_promotion_keeps_color() {
        let queen = Piece::new(Pawn, Black, B2).promoted_to(B1, Queen);
        assert_eq!(queen.kind(), Queen);
        assert_eq!(queen.color(), Black);
        assert_eq!(queen.square(), B1);
        assert_eq!(queen.to_string(), "q");
    }
    #[test]
    fn test_pair_index() {
        let mut pair = Pair::new(1, 2);
        pair[Black] += 5;
        assert_eq!(pair[White], 1);
        assert_eq!(pair[Black], 7);
        assert_eq!(!White, Black);
        assert_eq!(White.direction(), -8);
    }
}
