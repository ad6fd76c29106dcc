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

//! A game as a chain of boards. Every accepted move appends the successor
//! board; undo drops the last one.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::board::{Board, Color, Move, MoveStatus, Square, Turn};
use crate::search::MoveStrategy;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
    Resigned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("No legal move from {0} to {1}")]
    NoSuchMove(Square, Square),
    #[error("{0} would leave the king in check")]
    LeavesKingInCheck(Move),
    #[error("No move to undo")]
    NothingToUndo,
    #[error("The game is over")]
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    history: Vec<Board>,
    resigned: Option<Color>,
}

impl Game {
    pub fn new(id: GameId) -> Self {
        Self::from_board(id, Board::standard())
    }

    /// A game starting from `board` rather than the standard position.
    pub fn from_board(id: GameId, board: Board) -> Self {
        Self {
            id,
            history: vec![board],
            resigned: None,
        }
    }

    #[inline]
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board(&self) -> &Board {
        // history always holds the starting board
        &self.history[self.history.len() - 1]
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().skip(1).filter_map(|board| board.last_move())
    }

    /// Plays the side to move's move from `from` to `to`. Promotions
    /// promote to a queen.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Move> {
        let mv = self
            .board()
            .find_move(from, to)
            .ok_or(GameError::NoSuchMove(from, to))?;
        self.play_move(mv)?;
        Ok(mv)
    }

    pub fn play_move(&mut self, mv: Move) -> Result<&Board> {
        if self.result().is_some() {
            return Err(GameError::GameOver.into());
        }
        let transition = self.board().current_player().make_move(mv);
        let next = match transition.status() {
            MoveStatus::Done => transition.into_board(),
            MoveStatus::IllegalMove => {
                return Err(GameError::NoSuchMove(mv.from(), mv.to()).into())
            }
            MoveStatus::LeavesPlayerInCheck => {
                return Err(GameError::LeavesKingInCheck(mv).into())
            }
        };
        info!(game = self.id.0, %mv, ply = self.history.len(), "move played");
        self.history.push(next);
        Ok(self.board())
    }

    /// Takes back the last move and returns it. A resigned game stays
    /// over and refuses with `GameOver`.
    pub fn undo(&mut self) -> Result<Move> {
        if self.resigned.is_some() {
            return Err(GameError::GameOver.into());
        }
        if self.history.len() < 2 {
            return Err(GameError::NothingToUndo.into());
        }
        let mv = self
            .board()
            .last_move()
            .copied()
            .ok_or(GameError::NothingToUndo)?;
        self.history.pop();
        Ok(mv)
    }

    pub fn resign(&mut self, color: Color) -> Result<()> {
        if self.result().is_some() {
            return Err(GameError::GameOver.into());
        }
        self.resigned = Some(color);
        Ok(())
    }

    pub fn result(&self) -> Option<GameResult> {
        if let Some(color) = self.resigned {
            return Some(GameResult::Win(!color, WinReason::Resigned));
        }
        let board = self.board();
        let player = board.current_player();
        if player.is_in_checkmate() {
            Some(GameResult::Win(!board.turn(), WinReason::CheckMate))
        } else if player.is_in_stalemate() {
            Some(GameResult::Draw(DrawReason::StaleMate))
        } else {
            None
        }
    }

    /// Asks `strategy` for a move on the current board. Nothing is played.
    pub fn think(&self, strategy: &mut dyn MoveStrategy, depth: u32) -> Option<Move> {
        if self.result().is_some() {
            return None;
        }
        strategy.execute(self.board(), depth)
    }
}

impl Turn for Game {
    fn turn(&self) -> Color {
        self.board().turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{AlphaBeta, SearchConfig};
    use Square::*;

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new(GameId::new(1));
        game.play(F2, F3).unwrap();
        game.play(E7, E5).unwrap();
        game.play(G2, G4).unwrap();
        game.play(D8, H4).unwrap();
        assert_eq!(game.result(), Some(GameResult::Win(Color::Black, WinReason::CheckMate)));
        assert!(game.play(A2, A3).is_err());
        assert_eq!(game.moves().count(), 4);
    }
    #[test]
    fn test_undo_restores_board() {
        let mut game = Game::new(GameId::new(2));
        assert!(game.undo().is_err());
        game.play(E2, E4).unwrap();
        let mv = game.undo().unwrap();
        assert_eq!((mv.from(), mv.to()), (E2, E4));
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.turn(), Color::White);
    }
    #[test]
    fn test_rejected_moves() {
        let mut game = Game::new(GameId::new(3));
        let err = game.play(E2, E5).unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::NoSuchMove(E2, E5)));
        game.play(E2, E4).unwrap();
        game.play(D7, D6).unwrap();
        game.play(F1, B5).unwrap();
        // Bb5 checks along the opened diagonal
        let err = game.play(A7, A6).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::LeavesKingInCheck(_))
        ));
        game.play(C7, C6).unwrap();
    }
    #[test]
    fn test_resign() {
        let mut game = Game::new(GameId::new(4));
        game.resign(Color::White).unwrap();
        assert_eq!(game.result(), Some(GameResult::Win(Color::Black, WinReason::Resigned)));
        assert!(game.resign(Color::Black).is_err());
    }
    #[test]
    fn test_undo_after_resign_is_refused() {
        let mut game = Game::new(GameId::new(5));
        game.play(E2, E4).unwrap();
        game.resign(Color::Black).unwrap();
        let err = game.undo().unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::GameOver));
        assert_eq!(game.moves().count(), 1);
        assert_eq!(game.result(), Some(GameResult::Win(Color::White, WinReason::Resigned)));
    }
    #[test]
    fn test_think() {
        let game = Game::new(GameId::new(5));
        let mut strategy = AlphaBeta::new(SearchConfig::default());
        let mv = game.think(&mut strategy, 1).unwrap();
        assert!(game.board().current_player().legal_moves().contains(&mv));
    }
}
