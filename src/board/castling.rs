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

use super::position::Position;
use super::safety::is_attacked;
use super::square::Square;

const KING_COL: usize = 4;

/// The rook half of a castle, derived from the king's two-square move:
/// the back-rank row, the corner the rook leaves, and the column it
/// lands on (the square the king skipped over).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleMove {
    pub row: usize,
    pub rook_from_col: usize,
    pub rook_to_col: usize,
}

/// Each wing's fixed geometry: rook corner, king landing column.
const WINGS: [(usize, usize); 2] = [(0, 2), (7, 6)];

/// Castle destinations for the king standing on `from`, with the rook
/// relocation each implies. Empty unless every condition holds: the
/// king is unmoved on its home square and not in check, the wing's
/// rook is unmoved, the lane between them is clear, and neither the
/// square the king crosses nor the one it lands on is attacked.
pub fn castle_moves(from: Square, position: &Position) -> Vec<(Square, CastleMove)> {
    let mut result = Vec::new();
    let Some(king) = position.piece(from) else {
        return result;
    };
    let color = king.color();
    if !king.kind().is_king()
        || king.has_moved()
        || from != Square::new(color.home_row(), KING_COL)
        || is_attacked(from, !color, position)
    {
        return result;
    }
    let row = from.row();
    for (rook_col, king_dest_col) in WINGS {
        let rook_square = Square::new(row, rook_col);
        match position.piece(rook_square) {
            Some(rook) if rook.kind().is_rook() && rook.color() == color && !rook.has_moved() => {}
            _ => continue,
        }
        let (lo, hi) = if rook_col < KING_COL {
            (rook_col + 1, KING_COL)
        } else {
            (KING_COL + 1, rook_col)
        };
        if (lo..hi).any(|col| position.is_occupied(Square::new(row, col))) {
            continue;
        }
        // the king crosses the rook's landing column on either wing
        let crossed_col = (KING_COL + king_dest_col) / 2;
        let crossed = Square::new(row, crossed_col);
        let landing = Square::new(row, king_dest_col);
        if is_attacked(crossed, !color, position) || is_attacked(landing, !color, position) {
            continue;
        }
        result.push((
            landing,
            CastleMove {
                row,
                rook_from_col: rook_col,
                rook_to_col: crossed_col,
            },
        ));
    }
    result
}

/// Rook origin and destination implied by a king's two-square move.
pub(super) fn rook_shift(king_from: Square, king_to: Square) -> (Square, Square) {
    let row = king_from.row();
    let rook_from_col = if king_to.col() > king_from.col() { 7 } else { 0 };
    let rook_to_col = (king_from.col() + king_to.col()) / 2;
    (
        Square::new(row, rook_from_col),
        Square::new(row, rook_to_col),
    )
}
