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
use std::fmt::Write;

use super::pawn_structure::pawn_structure_score;
use crate::board::{Board, Player};

/// Scores a board from White's point of view: positive favors White.
pub trait BoardEvaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32;

    /// Human readable breakdown of `evaluate`.
    fn explain(&self, board: &Board, depth: u32) -> String {
        format!("Final Score = {}", self.evaluate(board, depth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    pub check_bonus: i32,
    pub checkmate_bonus: i32,
    pub depth_bonus: i32,
    pub castle_bonus: i32,
    pub mobility_multiplier: i32,
    pub isolated_pawn_penalty: i32,
    pub doubled_pawn_penalty: i32,
    pub doubled_pawns: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            check_bonus: 45,
            checkmate_bonus: 10000,
            depth_bonus: 100,
            castle_bonus: 60,
            mobility_multiplier: 1,
            isolated_pawn_penalty: -10,
            doubled_pawn_penalty: -10,
            doubled_pawns: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Terms {
    material: i32,
    mobility: i32,
    check: i32,
    checkmate: i32,
    castled: i32,
    pawns: i32,
}

impl Terms {
    fn total(&self) -> i32 {
        [self.mobility, self.check, self.checkmate, self.castled, self.pawns]
            .into_iter()
            .fold(self.material, i32::saturating_add)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StandardEvaluator {
    config: EvaluatorConfig,
}

impl StandardEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Mates found nearer the root are searched with more depth left and
    /// score higher. Saturates rather than overflowing on deep searches.
    fn depth_bonus(&self, depth: u32) -> i32 {
        if depth == 0 {
            1
        } else {
            let depth = i32::try_from(depth).unwrap_or(i32::MAX);
            self.config.depth_bonus.saturating_mul(depth)
        }
    }

    fn terms(&self, player: &Player<'_>, depth: u32) -> Terms {
        let opponent = player.opponent();
        Terms {
            material: player.active_pieces().iter().map(|p| p.value()).sum(),
            mobility: self.config.mobility_multiplier * player.legal_moves().len() as i32,
            check: if opponent.is_in_check() {
                self.config.check_bonus
            } else {
                0
            },
            checkmate: if opponent.is_in_checkmate() {
                self.config.checkmate_bonus.saturating_mul(self.depth_bonus(depth))
            } else {
                0
            },
            castled: if player.is_castled() {
                self.config.castle_bonus
            } else {
                0
            },
            pawns: pawn_structure_score(player, &self.config),
        }
    }
}

impl BoardEvaluator for StandardEvaluator {
    fn evaluate(&self, board: &Board, depth: u32) -> i32 {
        self.terms(&board.white_player(), depth)
            .total()
            .saturating_sub(self.terms(&board.black_player(), depth).total())
    }

    fn explain(&self, board: &Board, depth: u32) -> String {
        let mut out = String::new();
        for player in [board.white_player(), board.black_player()] {
            let terms = self.terms(&player, depth);
            let _ = writeln!(out, "{} Mobility : {}", player.color(), terms.mobility);
            let threats = terms.check.saturating_add(terms.checkmate);
            let _ = writeln!(out, "{} kingThreats : {}", player.color(), threats);
            let _ = writeln!(out, "{} castle : {}", player.color(), terms.castled);
            let _ = writeln!(out, "{} pieceEval : {}", player.color(), terms.material);
            let _ = writeln!(out, "{} pawnStructure : {}", player.color(), terms.pawns);
            let _ = writeln!(out, "---------------------");
        }
        let _ = write!(out, "Final Score = {}", self.evaluate(board, depth));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, Color::*, Piece, PieceKind::*, Square::*};

    #[test]
    fn test_standard_board_is_even() {
        let evaluator = StandardEvaluator::default();
        assert_eq!(evaluator.evaluate(&Board::standard(), 3), 0);
        assert!(evaluator.explain(&Board::standard(), 3).ends_with("Final Score = 0"));
    }
    #[test]
    fn test_material_and_mobility() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, White, A1))
            .place(Piece::new(Rook, White, D4))
            .place(Piece::new(King, Black, H8))
            .build()
            .unwrap();
        let config = EvaluatorConfig {
            mobility_multiplier: 0,
            ..EvaluatorConfig::default()
        };
        assert_eq!(StandardEvaluator::new(config).evaluate(&board, 0), 500);
        let white = board.white_player().legal_moves().len() as i32;
        let black = board.black_player().legal_moves().len() as i32;
        assert_eq!(StandardEvaluator::default().evaluate(&board, 0), 500 + white - black);
    }
    #[test]
    fn test_checkmate_prefers_shallow() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, Black, H8))
            .place(Piece::new(Queen, White, G7))
            .place(Piece::new(King, White, F6))
            .move_maker(Black)
            .build()
            .unwrap();
        let evaluator = StandardEvaluator::default();
        let leaf = evaluator.evaluate(&board, 0);
        let early = evaluator.evaluate(&board, 2);
        assert_eq!(early - leaf, 10000 * 200 - 10000);
        assert!(leaf > 10000);
    }
    #[test]
    fn test_deep_mate_saturates() {
        let board = BoardBuilder::new()
            .place(Piece::new(King, Black, H8))
            .place(Piece::new(Queen, White, G7))
            .place(Piece::new(King, White, F6))
            .move_maker(Black)
            .build()
            .unwrap();
        let evaluator = StandardEvaluator::default();
        // Black's own terms still come off the saturated mate score
        assert!(evaluator.evaluate(&board, 3000) > i32::MAX - 20_000);
        assert_eq!(evaluator.evaluate(&board, u32::MAX), evaluator.evaluate(&board, 3000));
        let mirrored = BoardBuilder::new()
            .place(Piece::new(King, White, H1))
            .place(Piece::new(Queen, Black, G2))
            .place(Piece::new(King, Black, F3))
            .build()
            .unwrap();
        assert!(evaluator.evaluate(&mirrored, 3000) < -1_000_000_000);
        assert!(evaluator.explain(&board, 3000).contains("Final Score"));
    }
}
