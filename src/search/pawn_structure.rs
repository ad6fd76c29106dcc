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

use strum::IntoEnumIterator;

use super::evaluator::EvaluatorConfig;
use crate::board::{File, Player};

/// Pawn counts per file for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PawnStructure {
    files: [u8; 8],
}

impl PawnStructure {
    pub fn of(player: &Player<'_>) -> Self {
        let mut files = [0; 8];
        player
            .active_pieces()
            .iter()
            .filter(|piece| piece.kind().is_pawn())
            .for_each(|pawn| files[pawn.square().file_index()] += 1);
        Self { files }
    }

    #[inline]
    pub fn on_file(&self, file: File) -> u8 {
        self.files[file.to_index()]
    }

    /// Pawns on files whose neighbors hold none.
    pub fn isolated(&self) -> u32 {
        File::iter()
            .filter(|file| file.neighbors().all(|n| self.on_file(n) == 0))
            .map(|file| self.on_file(file) as u32)
            .sum()
    }

    /// Pawns beyond the first on each file.
    pub fn doubled(&self) -> u32 {
        self.files
            .iter()
            .map(|count| count.saturating_sub(1) as u32)
            .sum()
    }
}

/// Penalty for `player`'s pawn weaknesses. The doubled term is optional.
pub fn pawn_structure_score(player: &Player<'_>, config: &EvaluatorConfig) -> i32 {
    let structure = PawnStructure::of(player);
    let mut score = structure.isolated() as i32 * config.isolated_pawn_penalty;
    if config.doubled_pawns {
        score += structure.doubled() as i32 * config.doubled_pawn_penalty;
    }
    score
}
