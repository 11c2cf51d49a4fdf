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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Piece, PieceKind};
use super::position::Position;
use super::square::{Direction, Offset, Square, SquareSet};

use PieceKind::*;

#[derive(Error, Debug)]
pub enum MoveError {
    #[error("not a legal move")]
    IllegalMove,
    #[error("no piece to move on that square")]
    EmptySquare,
}

/// A requested move: a pair of squares. Moves are descriptions — they
/// carry no board state and mutate nothing until applied.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// What applying a move actually did, as reported to the caller:
/// the displaced piece if any, the rook relocation when the move was
/// a castle, and whether the pawn paths fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    pub castle_rook_move: Option<(Square, Square)>,
    pub promoted: bool,
    pub en_passant: bool,
}

/// The three square sets the generator reports for one piece:
/// quiet destinations, capture destinations, and the squares the piece
/// threatens. `attacked` is deliberately wider than `captures` — it
/// includes occupied squares of either side and the square one step
/// beyond a blocking piece on a ray, because king safety needs to know
/// where an enemy could reach next move, not just what it can take now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceMoves {
    pub moves: SquareSet,
    pub captures: SquareSet,
    pub attacked: SquareSet,
}

impl PieceMoves {
    pub fn destinations(&self) -> SquareSet {
        self.moves | self.captures
    }
}

impl BitOr for PieceMoves {
    type Output = Self;
    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl BitOrAssign for PieceMoves {
    fn bitor_assign(&mut self, rhs: Self) {
        self.moves |= rhs.moves;
        self.captures |= rhs.captures;
        self.attacked |= rhs.attacked;
    }
}

/// Pseudo-legal moves for the piece standing on `from`: movement shape
/// and occupancy only, no king-safety filtering and no castling (both
/// are layered on top). Empty squares generate nothing. Generation is
/// pure — the position is never touched.
pub fn pseudo_moves(from: Square, position: &Position) -> PieceMoves {
    let Some(piece) = position.piece(from) else {
        return PieceMoves::default();
    };
    match piece.kind() {
        Pawn => pawn_moves(*piece, from, position),
        Knight => leaper_moves(*piece, KNIGHT_TARGETS[from], position),
        Bishop => slider_moves(*piece, from, Direction::diagonals(), position),
        Rook => slider_moves(*piece, from, Direction::orthogonals(), position),
        Queen => slider_moves(*piece, from, Direction::iter(), position),
        King => leaper_moves(*piece, KING_TARGETS[from], position),
    }
}

/// The squares the piece on `from` threatens, for the attack test.
/// Same ray/offset walk as `pseudo_moves` but without the move/capture
/// split, and never consulting king safety — this is what keeps the
/// legality filter free of recursion.
pub fn attacked_squares(from: Square, position: &Position) -> SquareSet {
    let Some(piece) = position.piece(from) else {
        return SquareSet::empty();
    };
    match piece.kind() {
        Pawn => SquareSet::from_squares(
            pawn_capture_offsets(*piece)
                .into_iter()
                .filter_map(|offset| from + offset),
        ),
        Knight => KNIGHT_TARGETS[from],
        Bishop => slider_attacks(from, Direction::diagonals(), position),
        Rook => slider_attacks(from, Direction::orthogonals(), position),
        Queen => slider_attacks(from, Direction::iter(), position),
        King => KING_TARGETS[from],
    }
}

fn leaper_moves(piece: Piece, targets: SquareSet, position: &Position) -> PieceMoves {
    let mut result = PieceMoves {
        attacked: targets,
        ..PieceMoves::default()
    };
    for target in targets.iter() {
        match position.piece(target) {
            None => result.moves.insert(target),
            Some(other) if other.color() != piece.color() => result.captures.insert(target),
            Some(_) => {}
        }
    }
    result
}

fn slider_moves<D>(piece: Piece, from: Square, directions: D, position: &Position) -> PieceMoves
where
    D: Iterator<Item = Direction>,
{
    let mut result = PieceMoves::default();
    for direction in directions {
        let offset: Offset = direction.into();
        let mut cursor = from + offset;
        while let Some(square) = cursor {
            result.attacked.insert(square);
            match position.piece(square) {
                None => result.moves.insert(square),
                Some(blocker) => {
                    if blocker.color() != piece.color() {
                        result.captures.insert(square);
                    }
                    // the square shielded by the blocker stays attacked,
                    // so a king cannot hide directly behind it on the ray
                    if let Some(beyond) = square + offset {
                        result.attacked.insert(beyond);
                    }
                    break;
                }
            }
            cursor = square + offset;
        }
    }
    result
}

fn slider_attacks<D>(from: Square, directions: D, position: &Position) -> SquareSet
where
    D: Iterator<Item = Direction>,
{
    let mut attacked = SquareSet::empty();
    for direction in directions {
        let offset: Offset = direction.into();
        let mut cursor = from + offset;
        while let Some(square) = cursor {
            attacked.insert(square);
            if position.is_occupied(square) {
                if let Some(beyond) = square + offset {
                    attacked.insert(beyond);
                }
                break;
            }
            cursor = square + offset;
        }
    }
    attacked
}

fn pawn_capture_offsets(piece: Piece) -> [Offset; 2] {
    let forward = piece.color().forward();
    [Offset::new(forward, -1), Offset::new(forward, 1)]
}

fn pawn_moves(piece: Piece, from: Square, position: &Position) -> PieceMoves {
    let mut result = PieceMoves::default();
    let forward = piece.color().forward();

    // one square forward, or two on the first move; the double step is
    // only open while the single step is, so both squares must be empty
    let single = (from + Offset::new(forward, 0)).filter(|&square| position.is_vacant(square));
    if let Some(square) = single {
        result.moves.insert(square);
        if !piece.has_moved() {
            let double =
                (from + Offset::new(2 * forward, 0)).filter(|&square| position.is_vacant(square));
            if let Some(square) = double {
                result.moves.insert(square);
            }
        }
    }

    for offset in pawn_capture_offsets(piece) {
        let Some(square) = from + offset else {
            continue;
        };
        result.attacked.insert(square);
        if matches!(position.piece(square), Some(other) if other.color() != piece.color()) {
            result.captures.insert(square);
        }
    }

    // en passant: the latch square opened by the opponent's double
    // advance, guarded by the neighbor pawn's own history — exactly one
    // prior move, standing on its fourth rank from home
    if let Some(target) = position.en_passant() {
        for dc in [-1, 1] {
            let Some(beside) = from + Offset::new(0, dc) else {
                continue;
            };
            let neighbor = match position.piece(beside) {
                Some(other) if other.color() != piece.color() => other,
                _ => continue,
            };
            if neighbor.kind().is_pawn()
                && neighbor.moves() == 1
                && neighbor.rank() == 4
                && (from + Offset::new(forward, dc)) == Some(target)
            {
                result.moves.insert(target);
            }
        }
    }

    result
}

static KNIGHT_TARGETS: Lazy<[SquareSet; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(1, 2),
        Offset::new(-1, 2),
        Offset::new(-1, -2),
        Offset::new(1, -2),
    ];
    let mut array = [SquareSet::default(); 64];
    for square in Square::all() {
        array[square] =
            SquareSet::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

pub(super) static KING_TARGETS: Lazy<[SquareSet; 64]> = Lazy::new(|| {
    let mut array = [SquareSet::default(); 64];
    for square in Square::all() {
        array[square] =
            SquareSet::from_squares(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});

#[cfg(test)]
mod tests {
    use crate::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_pawn_first_move_single_and_double() {
        let position = Position::standard();
        let result = pseudo_moves(sq(1, 4), &position);
        assert!(result.moves.contains(sq(2, 4)));
        assert!(result.moves.contains(sq(3, 4)));
        assert_eq!(result.moves.len(), 2);
        assert!(result.captures.is_empty());
    }

    #[test]
    fn test_pawn_double_step_needs_both_squares_empty() {
        let position = Position::standard().with(sq(3, 4), Color::Black, PieceKind::Knight);
        let result = pseudo_moves(sq(1, 4), &position);
        assert!(result.moves.contains(sq(2, 4)));
        assert!(!result.moves.contains(sq(3, 4)));

        let position = Position::standard().with(sq(2, 4), Color::Black, PieceKind::Knight);
        let result = pseudo_moves(sq(1, 4), &position);
        assert!(result.moves.is_empty());
    }

    #[test]
    fn test_pawn_after_first_move_single_only() {
        let mut position = Position::standard();
        position.make_move(sq(1, 4), sq(2, 4));
        let result = pseudo_moves(sq(2, 4), &position);
        assert!(result.moves.contains(sq(3, 4)));
        assert!(!result.moves.contains(sq(4, 4)));
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let position = Position::standard()
            .with(sq(2, 3), Color::Black, PieceKind::Knight)
            .with(sq(2, 4), Color::Black, PieceKind::Knight);
        let result = pseudo_moves(sq(1, 4), &position);
        assert!(result.captures.contains(sq(2, 3)));
        assert!(!result.captures.contains(sq(2, 4)));
        assert!(result.moves.is_empty());
    }

    #[test]
    fn test_pawn_attacks_empty_diagonals() {
        let position = Position::standard();
        let result = pseudo_moves(sq(1, 4), &position);
        assert!(result.attacked.contains(sq(2, 3)));
        assert!(result.attacked.contains(sq(2, 5)));
        assert!(!result.attacked.contains(sq(2, 4)));
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let position = Position::standard();
        let result = pseudo_moves(sq(6, 4), &position);
        assert!(result.moves.contains(sq(5, 4)));
        assert!(result.moves.contains(sq(4, 4)));
    }

    #[test]
    fn test_knight_shape_and_bounds() {
        let position = Position::empty().with(sq(0, 1), Color::White, PieceKind::Knight);
        let result = pseudo_moves(sq(0, 1), &position);
        assert_eq!(result.moves.len(), 3);
        assert!(result.moves.contains(sq(2, 0)));
        assert!(result.moves.contains(sq(2, 2)));
        assert!(result.moves.contains(sq(1, 3)));
    }

    #[test]
    fn test_knight_excludes_own_blocked_squares() {
        let position = Position::standard();
        let result = pseudo_moves(sq(0, 1), &position);
        // d2 holds a white pawn, so only the two forward jumps remain
        assert_eq!(result.moves.len(), 2);
        assert!(result.moves.contains(sq(2, 0)));
        assert!(result.moves.contains(sq(2, 2)));
    }

    #[test]
    fn test_rook_ray_stops_at_blockers() {
        let position = Position::empty()
            .with(sq(3, 3), Color::White, PieceKind::Rook)
            .with(sq(3, 6), Color::Black, PieceKind::Pawn)
            .with(sq(6, 3), Color::White, PieceKind::Pawn);
        let result = pseudo_moves(sq(3, 3), &position);
        assert!(result.moves.contains(sq(3, 5)));
        assert!(result.captures.contains(sq(3, 6)));
        assert!(!result.moves.contains(sq(3, 7)));
        assert!(result.moves.contains(sq(5, 3)));
        assert!(!result.moves.contains(sq(6, 3)));
        assert!(!result.captures.contains(sq(6, 3)));
    }

    #[test]
    fn test_slider_attacks_square_behind_blocker() {
        let position = Position::empty()
            .with(sq(3, 3), Color::White, PieceKind::Rook)
            .with(sq(3, 6), Color::Black, PieceKind::Pawn)
            .with(sq(6, 3), Color::White, PieceKind::Pawn);
        let result = pseudo_moves(sq(3, 3), &position);
        // one step beyond either blocker is still threatened
        assert!(result.attacked.contains(sq(3, 7)));
        assert!(result.attacked.contains(sq(7, 3)));
        // but two steps beyond is not reached
        let attacks = attacked_squares(sq(3, 3), &position);
        assert_eq!(attacks, result.attacked);
    }

    #[test]
    fn test_bishop_diagonals() {
        let position = Position::empty().with(sq(3, 3), Color::White, PieceKind::Bishop);
        let result = pseudo_moves(sq(3, 3), &position);
        assert!(result.moves.contains(sq(0, 0)));
        assert!(result.moves.contains(sq(7, 7)));
        assert!(result.moves.contains(sq(6, 0)));
        assert!(result.moves.contains(sq(0, 6)));
        assert!(!result.moves.contains(sq(3, 4)));
        assert_eq!(result.moves.len(), 13);
    }

    #[test]
    fn test_queen_covers_both_line_shapes() {
        let position = Position::empty().with(sq(3, 3), Color::White, PieceKind::Queen);
        let result = pseudo_moves(sq(3, 3), &position);
        assert_eq!(result.moves.len(), 13 + 14);
    }

    #[test]
    fn test_king_neighborhood() {
        let position = Position::empty().with(sq(0, 4), Color::White, PieceKind::King);
        let result = pseudo_moves(sq(0, 4), &position);
        assert_eq!(result.moves.len(), 5);
        assert_eq!(result.attacked.len(), 5);
    }

    #[test]
    fn test_en_passant_requires_latch_and_neighbor_history() {
        let mut position = Position::standard();
        position.make_move(sq(1, 4), sq(3, 4));
        position.make_move(sq(6, 0), sq(4, 0));
        position.make_move(sq(3, 4), sq(4, 4));
        position.make_move(sq(6, 3), sq(4, 3));
        let result = pseudo_moves(sq(4, 4), &position);
        assert!(result.moves.contains(sq(5, 3)));

        // same shape but with the latch expired: no en passant
        let expired = position.clone().with_en_passant(None);
        let result = pseudo_moves(sq(4, 4), &expired);
        assert!(!result.moves.contains(sq(5, 3)));
    }

    #[test]
    fn test_empty_square_generates_nothing() {
        let position = Position::standard();
        let result = pseudo_moves(sq(4, 4), &position);
        assert_eq!(result, PieceMoves::default());
    }
}
