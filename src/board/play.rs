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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::castling::castle_moves;
use super::material::{Color, Pair, Piece};
use super::moves::{pseudo_moves, Move, MoveError, MoveOutcome};
use super::position::Position;
use super::safety::{is_attacked, is_safe};
use super::square::{Square, SquareSet};

use GameStatus::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The named side has won.
    Checkmate(Color),
    Stalemate,
}

/// Legal destinations for the piece on `from`, independent of whose
/// turn it is: pseudo-legal shape moves pruned by the king-safety
/// probe, plus castling for an eligible king. Returned as the
/// (quiet moves, captures) pair the selection surface highlights.
pub fn legal_destinations(from: Square, position: &Position) -> (SquareSet, SquareSet) {
    let generated = pseudo_moves(from, position);
    let mut moves = SquareSet::empty();
    let mut captures = SquareSet::empty();
    for to in generated.moves.iter() {
        if is_safe(from, to, position) {
            moves.insert(to);
        }
    }
    for to in generated.captures.iter() {
        if is_safe(from, to, position) {
            captures.insert(to);
        }
    }
    for (landing, _) in castle_moves(from, position) {
        moves.insert(landing);
    }
    (moves, captures)
}

/// Game-end classification for `side`: checkmate when its king is
/// attacked and no piece has a legal move, stalemate when nothing can
/// move but the king is safe. Runs against the opponent of the mover
/// after every applied move.
pub fn classify(side: Color, position: &Position) -> GameStatus {
    let can_move = position.pieces_of(side).any(|(from, _)| {
        let (moves, captures) = legal_destinations(from, position);
        !(moves | captures).is_empty()
    });
    if can_move {
        return Ongoing;
    }
    let in_check = match position.king_square(side) {
        Some(king) => is_attacked(king, !side, position),
        None => false,
    };
    if in_check {
        Checkmate(!side)
    } else {
        Stalemate
    }
}

/// A single game: the one mutable position, whose turn it is, the
/// capture rosters, the applied-move log, and the cached status.
/// `apply_move` is the sole mutator and is atomic — an illegal request
/// is rejected without touching anything.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    turn: Color,
    captured: Pair<Vec<Piece>>,
    history: Vec<Move>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            position: Position::standard(),
            turn: Color::White,
            captured: Pair::default(),
            history: Vec::new(),
            status: Ongoing,
        }
    }

    /// Wholesale re-setup for a fresh game on the same instance.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Status as of the last applied move.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_status(&self, side: Color) -> GameStatus {
        classify(side, &self.position)
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Pieces of `color` that have been captured, in capture order.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color]
    }

    /// Legal destinations for the piece on `from`, empty unless the
    /// piece belongs to the side to move.
    pub fn legal_moves(&self, from: Square) -> (SquareSet, SquareSet) {
        match self.position.piece(from) {
            Some(piece) if piece.color() == self.turn => {
                legal_destinations(from, &self.position)
            }
            _ => (SquareSet::empty(), SquareSet::empty()),
        }
    }

    /// Applies `from` → `to` for the side to move. Rejects anything not
    /// in the legal set as a no-op, so the boundary can safely re-query.
    /// On success the opponent is re-classified and, while the game is
    /// still ongoing, the turn passes.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        if self.status != Ongoing {
            return Err(MoveError::IllegalMove.into());
        }
        let piece = *self.position.piece(from).ok_or(MoveError::EmptySquare)?;
        if piece.color() != self.turn {
            return Err(MoveError::IllegalMove.into());
        }
        let (moves, captures) = legal_destinations(from, &self.position);
        if !(moves | captures).contains(to) {
            return Err(MoveError::IllegalMove.into());
        }

        let outcome = self.position.make_move(from, to);
        if let Some(captured) = outcome.captured {
            self.captured[captured.color()].push(captured);
        }
        self.history.push(Move::new(from, to));
        debug!(
            mover = %piece.kind(),
            %from,
            %to,
            captured = outcome.captured.is_some(),
            castled = outcome.castle_rook_move.is_some(),
            promoted = outcome.promoted,
            "applied move"
        );

        let opponent = !self.turn;
        self.status = classify(opponent, &self.position);
        match self.status {
            Ongoing => self.turn = opponent,
            ended => debug!(status = ?ended, "game over"),
        }
        Ok(outcome)
    }

    /// Move selection for the side to move, delegated to the search
    /// engine. `depth` is the caller's ply bound.
    pub fn best_move(&self, depth: u32) -> Result<Move> {
        let mv = crate::engine::best_move(self.turn, &self.position, depth)?;
        Ok(mv)
    }
}
