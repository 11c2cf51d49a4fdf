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
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;

use super::castling::rook_shift;
use super::material::{Color, Piece, PieceKind};
use super::moves::MoveOutcome;
use super::square::{Square, SquareSet};

use PieceKind::*;

/// The 8-by-8 board state. The grid is the sole owner of every piece
/// in play; a square holds at most one piece, and a piece's identity
/// is the slot it sits in. `en_passant` is the capture square opened
/// by the most recent double advance, if any — it survives exactly one
/// ply, because every applied move rewrites it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Position {
    grid: [[Option<Piece>; 8]; 8],
    en_passant: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position {
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            en_passant: None,
        }
    }

    /// All 32 pieces at their standard starting squares.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut position = Self::empty();
        for color in Color::iter() {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                let square = Square::new(color.home_row(), col);
                position.place(square, Piece::new(color, kind, square));
            }
            for col in 0..8 {
                let square = Square::new(color.pawn_row(), col);
                position.place(square, Piece::new(color, Pawn, square));
            }
        }
        position
    }

    /// Builder for tests and fixtures: a fresh, unmoved piece at `square`.
    pub fn with(mut self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.place(square, Piece::new(color, kind, square));
        self
    }

    /// Builder variant that takes a piece as-is, move counter included.
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.place(square, piece);
        self
    }

    pub fn without(mut self, square: Square) -> Self {
        self.remove(square);
        self
    }

    pub fn with_en_passant(mut self, square: Option<Square>) -> Self {
        self.en_passant = square;
        self
    }

    #[inline]
    pub fn piece(&self, square: Square) -> Option<&Piece> {
        self.grid[square.row()][square.col()].as_ref()
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.piece(square).is_none()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece(square).is_some()
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Squares occupied by `color`.
    pub fn occupied_by(&self, color: Color) -> SquareSet {
        SquareSet::from_squares(
            Square::all().filter(|&square| {
                matches!(self.piece(square), Some(piece) if piece.color() == color)
            }),
        )
    }

    pub fn occupied(&self) -> SquareSet {
        SquareSet::from_squares(Square::all().filter(|&square| self.is_occupied(square)))
    }

    /// Every piece of `color` with the square it stands on.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| match self.piece(square) {
            Some(piece) if piece.color() == color => Some((square, *piece)),
            _ => None,
        })
    }

    /// Locates `color`'s king. Exactly one king per side is present in
    /// any position this crate constructs.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&square| {
            matches!(self.piece(square),
                Some(piece) if piece.color() == color && piece.kind().is_king())
        })
    }

    pub(crate) fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.grid[square.row()][square.col()].replace(piece)
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.grid[square.row()][square.col()].take()
    }

    /// Applies an already-validated move, resolving every special-move
    /// side effect exactly once: rook relocation on a castle, removal of
    /// the bypassed pawn on en passant, queen replacement on promotion,
    /// and the one-ply en-passant latch. Callers are responsible for
    /// legality; `Game::apply_move` validates, the search probes clones.
    pub(crate) fn make_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        let mut piece = self.remove(from).unwrap();
        let mut outcome = MoveOutcome::default();

        if piece.kind().is_king() && from.col().abs_diff(to.col()) == 2 {
            let (rook_from, rook_to) = rook_shift(from, to);
            let mut rook = self.remove(rook_from).unwrap();
            rook.record_move(rook_to);
            self.place(rook_to, rook);
            outcome.castle_rook_move = Some((rook_from, rook_to));
        } else if piece.kind().is_pawn() && from.col() != to.col() && self.is_vacant(to) {
            // diagonal pawn move onto an empty square is en passant;
            // the captured pawn sits behind the destination
            let target = Square::new(from.row(), to.col());
            outcome.captured = self.remove(target);
            outcome.en_passant = true;
        }

        piece.record_move(to);
        if let Some(captured) = self.place(to, piece) {
            outcome.captured = Some(captured);
        }

        self.en_passant = if piece.kind().is_pawn() && from.row().abs_diff(to.row()) == 2 {
            Some(Square::new((from.row() + to.row()) / 2, from.col()))
        } else {
            None
        };

        if piece.kind().is_pawn() && to.is_far_rank(piece.color()) {
            // the pawn is replaced, not mutated
            self.place(to, Piece::new(piece.color(), Queen, to));
            outcome.promoted = true;
        }

        outcome
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.grid[index.row()][index.col()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8 {
                match self.piece(Square::new(row, col)) {
                    Some(piece) => write!(f, " {}", piece.glyph())?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}
