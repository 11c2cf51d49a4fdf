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

//! Static evaluation: material values and per-kind positional weight
//! tables in centipawns. Tables are written from White's side (index =
//! `row * 8 + col`, row 0 = White's back rank) and mirrored vertically
//! for Black.

use crate::board::{Color, PieceKind, Position, Square};

use PieceKind::*;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        Pawn => 100,
        Knight => 320,
        Bishop => 330,
        Rook => 500,
        Queen => 900,
        King => 20_000,
    }
}

/// Material value of whatever currently stands on `square`, zero for
/// an empty square. This is the "what would this move capture" term of
/// the leaf evaluation and the greedy tie-break.
pub fn capture_value(position: &Position, square: Square) -> i32 {
    position
        .piece(square)
        .map(|piece| piece_value(piece.kind()))
        .unwrap_or(0)
}

/// Positional weight of `kind` standing on `square`, from `color`'s
/// point of view.
pub fn table_value(kind: PieceKind, square: Square, color: Color) -> i32 {
    let table = match kind {
        Pawn => &PAWN_TABLE,
        Knight => &KNIGHT_TABLE,
        Bishop => &BISHOP_TABLE,
        Rook => &ROOK_TABLE,
        Queen => &QUEEN_TABLE,
        King => &KING_TABLE,
    };
    let index = match color {
        Color::White => square.to_index(),
        Color::Black => (7 - square.row()) * 8 + square.col(),
    };
    table[index]
}

const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_TABLE: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_TABLE: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_TABLE: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const QUEEN_TABLE: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

const KING_TABLE: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color::*;

    #[test]
    fn test_tables_mirror_for_black() {
        // a pawn one step from promotion scores the same for each side
        assert_eq!(table_value(Pawn, Square::new(6, 3), White), 50);
        assert_eq!(table_value(Pawn, Square::new(1, 3), Black), 50);
        // and the castled-king corner bonus mirrors too
        assert_eq!(table_value(King, Square::new(0, 6), White), 30);
        assert_eq!(table_value(King, Square::new(7, 6), Black), 30);
    }

    #[test]
    fn test_central_knight_outscores_rim_knight() {
        let center = table_value(Knight, Square::new(3, 3), White);
        let rim = table_value(Knight, Square::new(3, 0), White);
        assert!(center > rim);
    }

    #[test]
    fn test_capture_value_reads_occupant() {
        let position = Position::empty().with(
            Square::new(4, 4),
            Black,
            Queen,
        );
        assert_eq!(capture_value(&position, Square::new(4, 4)), 900);
        assert_eq!(capture_value(&position, Square::new(4, 5)), 0);
    }
}
