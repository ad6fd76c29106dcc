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

//! Move selection.
//!
//! Strategies walk the game tree depth first over immutable boards. White
//! maximizes and Black minimizes the evaluator's score. Each strategy keeps
//! only counters between calls and resets them at the start of `execute`.
//!
//! Progress is reported over an optional `mpsc` channel as `SearchEvent`s,
//! one per root move plus a closing summary. A send that fails because the
//! receiver hung up is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::board::{Board, Color, Move, MoveStatus, Turn};

mod alpha_beta;
mod evaluator;
mod minimax;
mod ordering;
mod pawn_structure;
#[cfg(feature = "random")]
mod random;

pub use alpha_beta::AlphaBeta;
pub use evaluator::{BoardEvaluator, EvaluatorConfig, StandardEvaluator};
pub use minimax::MiniMax;
pub use ordering::order_moves;
pub use pawn_structure::{pawn_structure_score, PawnStructure};
#[cfg(feature = "random")]
pub use random::RandomStrategy;

pub trait MoveStrategy: Send {
    fn name(&self) -> &str;

    /// Picks a move for the side to move on `board`, or `None` when that
    /// side has no move that keeps its king safe.
    fn execute(&mut self, board: &Board, depth: u32) -> Option<Move>;

    /// Counters of the most recent `execute`.
    fn stats(&self) -> &SearchStats;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Extra plies granted per root move when the horizon lands on a
    /// threatened board. Zero turns the extension off.
    pub quiescence_factor: u32,
    /// Checked between root moves. Once set the search returns the best
    /// move found so far.
    #[serde(skip)]
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiescence_factor: 25000,
            stop: None,
        }
    }
}

impl SearchConfig {
    pub fn with_quiescence_factor(mut self, factor: u32) -> Self {
        self.quiescence_factor = factor;
        self
    }
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }
    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|stop| stop.load(Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub boards_evaluated: u64,
    pub cutoffs: u64,
    pub quiescence_count: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Cutoffs as a percentage of boards evaluated, 0 when nothing was
    /// evaluated.
    pub fn prune_percent(&self) -> f64 {
        if self.boards_evaluated == 0 {
            return 0.0;
        }
        100.0 * self.cutoffs as f64 / self.boards_evaluated as f64
    }

    /// Boards evaluated per second.
    pub fn eval_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.boards_evaluated as f64 / secs
    }
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    Progress(MoveProgress),
    Summary(SearchSummary),
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEvent::Progress(progress) => fmt::Display::fmt(progress, f),
            SearchEvent::Summary(summary) => fmt::Display::fmt(summary, f),
        }
    }
}

/// Status of one root move.
#[derive(Debug, Clone)]
pub struct MoveProgress {
    pub strategy: String,
    pub depth: u32,
    /// One based position in the ordered root moves.
    pub index: usize,
    pub total: usize,
    pub mv: Move,
    pub status: MoveStatus,
    pub best: Option<Move>,
    pub highest: i32,
    pub lowest: i32,
    pub quiescence_count: u32,
    pub elapsed: Duration,
}

fn fmt_best(best: Option<Move>) -> String {
    best.map_or_else(|| "none".to_string(), |mv| mv.to_string())
}

impl fmt::Display for MoveProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.status.is_done() {
            return write!(
                f,
                "{}, m: ({}/{}) {} is illegal, best: {}",
                self.strategy,
                self.index,
                self.total,
                self.mv,
                fmt_best(self.best)
            );
        }
        write!(
            f,
            "{}({}), move: ({}/{}) {}, best: {} [high: {} low: {}] quiescenceCount: {}, time: {} ms",
            self.strategy,
            self.depth,
            self.index,
            self.total,
            self.mv,
            fmt_best(self.best),
            self.highest,
            self.lowest,
            self.quiescence_count,
            self.elapsed.as_millis()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub strategy: String,
    pub color: Color,
    pub depth: u32,
    pub best: Option<Move>,
    pub stats: SearchStats,
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} SELECTS {} [#boards evaluated = {}, time taken = {} ms, eval rate = {:.1}, cutoffCount = {}, prune percent = {:.2}%]",
            self.color,
            self.strategy,
            fmt_best(self.best),
            self.stats.boards_evaluated,
            self.stats.elapsed.as_millis(),
            self.stats.eval_rate(),
            self.stats.cutoffs,
            self.stats.prune_percent()
        )
    }
}

/// State shared by the tree-walking strategies.
#[derive(Debug)]
pub(crate) struct SearchCore<E> {
    evaluator: E,
    config: SearchConfig,
    stats: SearchStats,
    // extensions granted below the current root move
    quiescence_count: u32,
    events: Option<Sender<SearchEvent>>,
}

impl<E: BoardEvaluator> SearchCore<E> {
    pub(crate) fn new(evaluator: E, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            stats: SearchStats::default(),
            quiescence_count: 0,
            events: None,
        }
    }

    pub(crate) fn set_events(&mut self, events: Sender<SearchEvent>) {
        self.events = Some(events);
    }

    pub(crate) fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(crate) fn evaluate(&mut self, board: &Board, depth: u32) -> i32 {
        self.stats.boards_evaluated += 1;
        self.evaluator.evaluate(board, depth)
    }

    pub(crate) fn cutoff(&mut self) {
        self.stats.cutoffs += 1;
    }

    /// Depth for the children of `board`. At the last ply a threatened
    /// board earns one more ply while the per-root-move budget lasts.
    pub(crate) fn next_depth(&mut self, board: &Board, depth: u32) -> u32 {
        if depth == 1
            && self.quiescence_count < self.config.quiescence_factor
            && board.is_threatened()
        {
            self.quiescence_count += 1;
            self.stats.quiescence_count += 1;
            return 1;
        }
        depth - 1
    }

    fn send(&self, event: SearchEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

/// The recursive half of a tree-walking strategy.
pub(crate) trait TreeSearch {
    type Evaluator: BoardEvaluator;

    fn core(&mut self) -> &mut SearchCore<Self::Evaluator>;
    fn max(&mut self, board: &Board, depth: u32, highest: i32, lowest: i32) -> i32;
    fn min(&mut self, board: &Board, depth: u32, highest: i32, lowest: i32) -> i32;
}

/// Root move loop shared by the tree-walking strategies. Root moves are
/// searched with the running best as a bound and the loop stops early on a
/// move that mates.
pub(crate) fn search_root<S: TreeSearch>(
    search: &mut S,
    name: &str,
    board: &Board,
    depth: u32,
) -> Option<Move> {
    let start = Instant::now();
    let color = board.turn();
    {
        let core = search.core();
        core.stats = SearchStats::default();
        core.quiescence_count = 0;
    }
    let mut best = None;
    let mut highest = i32::MIN;
    let mut lowest = i32::MAX;
    let player = board.current_player();
    let moves = order_moves(board, player.legal_moves());
    let total = moves.len();
    info!(strategy = name, %color, depth, moves = total, "thinking");

    for (index, mv) in moves.into_iter().enumerate() {
        if search.core().config.is_stopped() {
            debug!(strategy = name, "stopped after {} of {} moves", index, total);
            break;
        }
        let move_start = Instant::now();
        search.core().quiescence_count = 0;
        let transition = player.make_move(mv);
        let mut mates = false;
        if transition.is_done() {
            let next = transition.board();
            let next_depth = depth.saturating_sub(1);
            let value = match color {
                Color::White => search.min(next, next_depth, highest, lowest),
                Color::Black => search.max(next, next_depth, highest, lowest),
            };
            let improves = match color {
                Color::White => value > highest,
                Color::Black => value < lowest,
            };
            if improves {
                match color {
                    Color::White => highest = value,
                    Color::Black => lowest = value,
                }
                best = Some(mv);
                mates = next.player(!color).is_in_checkmate();
            }
            debug!(strategy = name, %mv, value, "root move");
        }
        let core = search.core();
        core.send(SearchEvent::Progress(MoveProgress {
            strategy: name.to_string(),
            depth,
            index: index + 1,
            total,
            mv,
            status: transition.status(),
            best,
            highest,
            lowest,
            quiescence_count: core.quiescence_count,
            elapsed: move_start.elapsed(),
        }));
        if mates {
            break;
        }
    }

    let core = search.core();
    core.stats.elapsed = start.elapsed();
    let stats = core.stats;
    info!(
        strategy = name,
        %color,
        best = %fmt_best(best),
        boards = stats.boards_evaluated,
        cutoffs = stats.cutoffs,
        prune_percent = stats.prune_percent(),
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "selected"
    );
    core.send(SearchEvent::Summary(SearchSummary {
        strategy: name.to_string(),
        color,
        depth,
        best,
        stats,
    }));
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardBuilder, Piece, PieceKind::*, Square::*};
    use Color::*;

    #[test]
    fn test_zero_guarded_ratios() {
        let stats = SearchStats::default();
        assert_eq!(stats.prune_percent(), 0.0);
        assert_eq!(stats.eval_rate(), 0.0);
        let stats = SearchStats {
            boards_evaluated: 200,
            cutoffs: 50,
            quiescence_count: 0,
            elapsed: Duration::from_millis(500),
        };
        assert_eq!(stats.prune_percent(), 25.0);
        assert_eq!(stats.eval_rate(), 400.0);
    }
    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.quiescence_factor, 25000);
        assert!(!config.is_stopped());
        let stop = Arc::new(AtomicBool::new(true));
        let config = config.with_quiescence_factor(0).with_stop(stop);
        assert_eq!(config.quiescence_factor, 0);
        assert!(config.is_stopped());
    }
    #[test]
    fn test_quiescence_budget() {
        let checked = BoardBuilder::new()
            .place(Piece::new(King, White, E1))
            .place(Piece::new(Rook, Black, E5))
            .place(Piece::new(King, Black, A8))
            .build()
            .unwrap();
        let config = SearchConfig::default().with_quiescence_factor(1);
        let mut core = SearchCore::new(StandardEvaluator::default(), config);
        assert_eq!(core.next_depth(&checked, 3), 2);
        assert_eq!(core.next_depth(&checked, 1), 1);
        assert_eq!(core.next_depth(&checked, 1), 0);
        assert_eq!(core.next_depth(&Board::standard(), 1), 0);
        assert_eq!(core.stats().quiescence_count, 1);
    }
}
