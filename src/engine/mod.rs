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

//! Move selection for the automated side: plain depth-limited minimax
//! over scratch positions (no pruning, no transposition table), then a
//! greedy capture pass to break ties, then a uniform random pick among
//! whatever still remains. Both stages are part of the contract — the
//! search keeps the side safe, the greedy pass keeps it hungry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::board::{legal_destinations, Color, Move, Position};

pub mod eval;

use eval::{capture_value, table_value};

#[derive(Error, Debug)]
pub enum EngineError {
    /// The game-end detector should have ended the game before the
    /// search was ever consulted. Not recoverable.
    #[error("{0} has no legal moves; the game should already be over")]
    NoLegalMoves(Color),
}

/// Picks a move for `side`, searching `depth` plies (clamped to at
/// least 1). Ties that survive both selection stages are broken with
/// the thread RNG.
pub fn best_move(side: Color, position: &Position, depth: u32) -> Result<Move, EngineError> {
    select_move(side, position, depth, &mut rand::thread_rng())
}

/// Same search with a seeded RNG, for reproducible games and tests.
pub fn best_move_seeded(
    side: Color,
    position: &Position,
    depth: u32,
    seed: u64,
) -> Result<Move, EngineError> {
    select_move(side, position, depth, &mut StdRng::seed_from_u64(seed))
}

fn select_move<R: Rng>(
    side: Color,
    position: &Position,
    depth: u32,
    rng: &mut R,
) -> Result<Move, EngineError> {
    let depth = depth.max(1);
    let candidates = legal_moves_for(side, position);
    if candidates.is_empty() {
        return Err(EngineError::NoLegalMoves(side));
    }
    debug!(%side, depth, candidates = candidates.len(), "searching");

    let scored: Vec<(Move, i32)> = candidates
        .into_iter()
        .map(|mv| (mv, score_move(position, mv, depth - 1, side)))
        .collect();
    let best = scored.iter().map(|&(_, score)| score).max().unwrap();
    let tied: Vec<Move> = scored
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(mv, _)| mv)
        .collect();

    // greedy pass: among equally safe moves, take the biggest piece on
    // offer right now; with nothing to take, any of them will do
    let best_capture = tied
        .iter()
        .map(|mv| capture_value(position, mv.to))
        .max()
        .unwrap();
    let chosen = if best_capture > 0 {
        *tied
            .iter()
            .find(|mv| capture_value(position, mv.to) == best_capture)
            .unwrap()
    } else {
        tied[rng.gen_range(0..tied.len())]
    };
    debug!(%side, score = best, %chosen, "selected");
    Ok(chosen)
}

/// Every legal move for `side`, in board-scan order. The order is
/// deterministic, which is what makes the greedy stage's first-match
/// rule reproducible.
fn legal_moves_for(side: Color, position: &Position) -> Vec<Move> {
    let mut result = Vec::new();
    for (from, _) in position.pieces_of(side) {
        let (moves, captures) = legal_destinations(from, position);
        for to in (moves | captures).iter() {
            result.push(Move::new(from, to));
        }
    }
    result
}

/// Minimax value of playing `mv`, signed from `engine_side`'s point of
/// view. Each ply contributes the leaf evaluation of its own move —
/// the material standing on the destination plus the mover's
/// positional table weight — and recursion alternates extremum over
/// the reply set on a scratch copy of the position. A side with no
/// replies simply ends the line.
fn score_move(position: &Position, mv: Move, depth: u32, engine_side: Color) -> i32 {
    let mover = position.piece(mv.from).unwrap();
    let side = mover.color();
    let gain = capture_value(position, mv.to) + table_value(mover.kind(), mv.to, side);
    let signed = if side == engine_side { gain } else { -gain };
    if depth == 0 {
        return signed;
    }

    let mut scratch = position.clone();
    scratch.make_move(mv.from, mv.to);
    let opponent = !side;
    let replies = legal_moves_for(opponent, &scratch);
    if replies.is_empty() {
        return signed;
    }
    let scores = replies
        .into_iter()
        .map(|reply| score_move(&scratch, reply, depth - 1, engine_side));
    let extremum = if opponent == engine_side {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    };
    signed + extremum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Game, PieceKind, Square};
    use Color::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        // back-rank mate: White has nothing to play
        let position = Position::empty()
            .with(sq(0, 4), White, PieceKind::King)
            .with(sq(7, 4), Black, PieceKind::King)
            .with(sq(1, 7), Black, PieceKind::Queen)
            .with(sq(0, 0), Black, PieceKind::Rook);
        assert!(matches!(
            best_move_seeded(White, &position, 2, 0),
            Err(EngineError::NoLegalMoves(White))
        ));
    }

    #[test]
    fn test_takes_the_hanging_piece() {
        let position = Position::empty()
            .with(sq(0, 0), White, PieceKind::King)
            .with(sq(7, 7), Black, PieceKind::King)
            .with(sq(3, 3), White, PieceKind::Rook)
            .with(sq(3, 6), Black, PieceKind::Queen);
        let mv = best_move_seeded(White, &position, 1, 0).unwrap();
        assert_eq!(mv, Move::new(sq(3, 3), sq(3, 6)));
    }

    #[test]
    fn test_search_declines_a_defended_pawn() {
        // Ra4xe4 wins a pawn but loses the rook to d5xe4; the free
        // pawn on a5 is the sound capture
        let position = Position::empty()
            .with(sq(0, 7), White, PieceKind::King)
            .with(sq(3, 0), White, PieceKind::Rook)
            .with(sq(7, 7), Black, PieceKind::King)
            .with(sq(4, 0), Black, PieceKind::Pawn)
            .with(sq(3, 4), Black, PieceKind::Pawn)
            .with(sq(4, 3), Black, PieceKind::Pawn);
        let mv = best_move_seeded(White, &position, 2, 0).unwrap();
        assert_ne!(mv, Move::new(sq(3, 0), sq(3, 4)));
        assert_eq!(mv, Move::new(sq(3, 0), sq(4, 0)));
    }

    #[test]
    fn test_strict_winner_ignores_the_rng() {
        let position = Position::empty()
            .with(sq(0, 0), White, PieceKind::King)
            .with(sq(7, 7), Black, PieceKind::King)
            .with(sq(3, 3), White, PieceKind::Rook)
            .with(sq(3, 6), Black, PieceKind::Queen);
        let first = best_move_seeded(White, &position, 1, 1).unwrap();
        let second = best_move_seeded(White, &position, 1, 99).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_tie_break_is_seed_stable() {
        // lone rook, no captures anywhere: the table ties d1/e1/a7
        // (the king sits mid-board where all its own moves score worse)
        let position = Position::empty()
            .with(sq(4, 7), White, PieceKind::King)
            .with(sq(7, 7), Black, PieceKind::King)
            .with(sq(0, 0), White, PieceKind::Rook);
        let first = best_move_seeded(White, &position, 1, 42).unwrap();
        let second = best_move_seeded(White, &position, 1, 42).unwrap();
        assert_eq!(first, second);
        let ties = [sq(0, 3), sq(0, 4), sq(6, 0)];
        assert!(ties.contains(&first.to));
    }

    #[test]
    fn test_plays_a_full_opening_move() {
        let game = Game::new();
        let mv = best_move_seeded(Black, game.position(), 2, 7);
        // it is White's turn; the engine still searches any side asked
        let mv = mv.unwrap();
        let piece = game.position().piece(mv.from).unwrap();
        assert_eq!(piece.color(), Black);

        let mut game = Game::new();
        let white = best_move_seeded(White, game.position(), 2, 7).unwrap();
        game.apply_move(white.from, white.to).unwrap();
        assert_eq!(game.turn(), Black);
    }
}
