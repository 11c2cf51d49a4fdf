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

use super::material::Color;
use super::moves::{attacked_squares, KING_TARGETS};
use super::position::Position;
use super::square::Square;

/// Whether `square` is threatened by any piece of `by`. Enemy kings are
/// tested against their fixed 8-square neighborhood directly rather
/// than through move generation, so two kings probing each other's
/// legality can never recurse.
pub fn is_attacked(square: Square, by: Color, position: &Position) -> bool {
    position.pieces_of(by).any(|(from, piece)| {
        if piece.kind().is_king() {
            KING_TARGETS[from].contains(square)
        } else {
            attacked_squares(from, position).contains(square)
        }
    })
}

/// Whether moving the piece on `from` to `to` leaves its own king out
/// of check. The candidate move is probed on a scratch clone — placed
/// at the destination with its origin cleared — so the live position is
/// never touched and a failed probe cannot leak a half-applied state.
pub fn is_safe(from: Square, to: Square, position: &Position) -> bool {
    let mut scratch = position.clone();
    let Some(piece) = scratch.remove(from) else {
        return false;
    };
    let color = piece.color();
    scratch.place(to, piece);
    match scratch.king_square(color) {
        Some(king) => !is_attacked(king, !color, &scratch),
        // no king on the board (fixture positions): nothing to protect
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_rook_attacks_along_open_line() {
        let position = Position::empty().with(sq(3, 0), Color::Black, PieceKind::Rook);
        assert!(is_attacked(sq(3, 7), Color::Black, &position));
        assert!(!is_attacked(sq(4, 7), Color::Black, &position));
    }

    #[test]
    fn test_attack_blocked_by_intervening_piece() {
        let position = Position::empty()
            .with(sq(3, 0), Color::Black, PieceKind::Rook)
            .with(sq(3, 4), Color::White, PieceKind::Knight);
        // the square directly behind the blocker still reads attacked
        assert!(is_attacked(sq(3, 5), Color::Black, &position));
        assert!(!is_attacked(sq(3, 6), Color::Black, &position));
    }

    #[test]
    fn test_king_threat_is_adjacency() {
        let position = Position::empty().with(sq(4, 4), Color::Black, PieceKind::King);
        assert!(is_attacked(sq(4, 5), Color::Black, &position));
        assert!(is_attacked(sq(3, 3), Color::Black, &position));
        assert!(!is_attacked(sq(4, 6), Color::Black, &position));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        let position = Position::empty()
            .with(sq(0, 4), Color::White, PieceKind::King)
            .with(sq(7, 4), Color::Black, PieceKind::King)
            .with(sq(3, 4), Color::White, PieceKind::Bishop)
            .with(sq(6, 4), Color::Black, PieceKind::Rook);
        // the bishop cannot leave the e-file
        assert!(!is_safe(sq(3, 4), sq(4, 5), &position));
        // a rook on the same pin line may slide along it or capture
        let position = position
            .without(sq(3, 4))
            .with(sq(3, 4), Color::White, PieceKind::Rook);
        assert!(is_safe(sq(3, 4), sq(6, 4), &position));
        assert!(is_safe(sq(3, 4), sq(5, 4), &position));
        assert!(!is_safe(sq(3, 4), sq(3, 0), &position));
    }

    #[test]
    fn test_king_cannot_step_behind_checking_rook() {
        let position = Position::empty()
            .with(sq(0, 4), Color::White, PieceKind::King)
            .with(sq(0, 0), Color::Black, PieceKind::Rook);
        // stepping away along the check line stays attacked
        assert!(!is_safe(sq(0, 4), sq(0, 5), &position));
        assert!(is_safe(sq(0, 4), sq(1, 5), &position));
    }

    #[test]
    fn test_probe_restores_position() {
        let position = Position::standard();
        let snapshot = position.clone();
        let _ = is_safe(sq(1, 4), sq(3, 4), &position);
        assert_eq!(position, snapshot);
    }
}
