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
use std::ops::{BitAnd, BitOr, Sub};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::material::Color;

use Color::*;

/// A square on the board. The discriminant is the linear index used by
/// move offsets: `A8` is 0, `H8` is 7, `A1` is 56 and `H1` is 63.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

use Square::{
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
};

pub const NUM_SQUARES: usize = 64;

/// Column exclusion masks. An offset that would wrap a piece from one edge
/// of the board to the other is rejected by testing the source square
/// against these.
pub const FIRST_COLUMN: Mask = File::FileA.to_mask();
pub const SECOND_COLUMN: Mask = File::FileB.to_mask();
pub const SEVENTH_COLUMN: Mask = File::FileG.to_mask();
pub const EIGHTH_COLUMN: Mask = File::FileH.to_mask();

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    #[inline]
    pub const fn is_valid(index: isize) -> bool {
        index >= 0 && index < NUM_SQUARES as isize
    }

    #[inline]
    pub const fn try_from_index(index: isize) -> Option<Self> {
        if Self::is_valid(index) {
            Some(Self::from_index(index as usize))
        } else {
            None
        }
    }

    /// Steps `delta` squares along the linear index. Only checks the
    /// board bounds; callers guard against column wrap with the column
    /// exclusion masks.
    #[inline]
    pub const fn offset(&self, delta: isize) -> Option<Self> {
        Self::try_from_index(self.to_index() as isize + delta)
    }

    #[inline]
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }
    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    #[inline]
    pub const fn file_index(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn rank_index(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.file_index())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.rank_index())
    }
    #[inline]
    pub const fn is_in(&self, mask: Mask) -> bool {
        mask.contains(*self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

use File::{
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [
            FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(u64::from_be_bytes([0x1 << (7 - self.to_index()); 8]))
    }

    /// The files on either side of this one. Edge files have a single neighbor.
    pub fn neighbors(&self) -> impl Iterator<Item = File> {
        let index = self.to_index();
        let left = index.checked_sub(1).map(File::from_index);
        let right = (index < 7).then(|| File::from_index(index + 1));
        left.into_iter().chain(right)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}", VALUES[self.to_index()])
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
}

use Rank::{
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
};

impl Rank {
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn promotion_rank(color: Color) -> Self {
        Self::back_rank(color.opponent())
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [
            Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", 8 - self.to_index())
    }
}

#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .map(|square| square.to_mask())
            .reduce(|m1, m2| m1 | m2)
            .unwrap_or_default()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Sub<Square> for Mask {
    type Output = Self;
    fn sub(self, rhs: Square) -> Self::Output {
        Self(self.0 & !rhs.to_mask().0)
    }
}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Mask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.leading_zeros() as usize);
            self.0 &= !square.to_mask().0;
            return Some(square);
        }
        None
    }
}
