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
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};
use std::ops::{Index, IndexMut};
use strum_macros::EnumIter;

use super::material::Color;

use Color::*;

/// A coordinate on the 8-by-8 board. Row 0 is White's back rank and
/// row 7 is Black's. Both components are always in `[0, 7]` — there is
/// no off-board square; offset arithmetic that would leave the board
/// yields `None` instead.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    #[inline]
    pub fn try_new(row: isize, col: isize) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            return Some(Self::new(row as usize, col as usize));
        }
        None
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self::new(index / 8, index % 8)
    }

    #[inline]
    pub const fn row(&self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(&self) -> usize {
        self.col as usize
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        self.row() * 8 + self.col()
    }

    #[inline]
    pub const fn to_set(&self) -> SquareSet {
        SquareSet::new(0x1 << self.to_index())
    }

    /// Distance from `color`'s own back rank, counted from 1. This is
    /// the counter promotion and en-passant timing read; for Black it
    /// is not the algebraic rank.
    #[inline]
    pub const fn rank_from_home(&self, color: Color) -> u8 {
        match color {
            White => self.row + 1,
            Black => 8 - self.row,
        }
    }

    /// True when the square lies on the rank `color`'s pawns promote on.
    #[inline]
    pub const fn is_far_rank(&self, color: Color) -> bool {
        self.rank_from_home(color) == 8
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}{}", FILES[self.col()], self.row + 1)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: isize,
    pub cols: isize,
}

impl Offset {
    pub const fn new(rows: isize, cols: isize) -> Self {
        Self { rows, cols }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        Square::try_new(self.row as isize + rhs.rows, self.col as isize + rhs.cols)
    }
}

impl Add<&Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: &Offset) -> Self::Output {
        self + *rhs
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(
            self.row as isize - rhs.row as isize,
            self.col as isize - rhs.col as isize,
        )
    }
}

/// The eight ray directions a sliding piece can walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    #[inline]
    pub fn is_orthogonal(&self) -> bool {
        matches!(*self, Up | Left | Right | Down)
    }
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        matches!(*self, UpLeft | UpRight | DownLeft | DownRight)
    }
    pub fn orthogonals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(1, -1),
            Up => Self::new(1, 0),
            UpRight => Self::new(1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(-1, -1),
            Down => Self::new(-1, 0),
            DownRight => Self::new(-1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of squares packed into a `u64`, one bit per square
/// (bit index = `row * 8 + col`). The move generator reports its
/// quiet-move, capture and attacked sets in this form.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .map(|square| square.to_set())
            .reduce(|s1, s2| s1 | s2)
            .unwrap_or_default()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_set().0) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.to_set().0;
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !square.to_set().0;
    }

    pub fn iter(&self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            for col in 0..8 {
                let square = Square::new(row, col);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Not for SquareSet {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOr<Square> for SquareSet {
    type Output = Self;
    fn bitor(self, rhs: Square) -> Self {
        Self(self.0 | rhs.to_set().0)
    }
}

impl BitOrAssign<Square> for SquareSet {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_set().0;
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for SquareSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub<Square> for SquareSet {
    type Output = Self;
    fn sub(self, rhs: Square) -> Self::Output {
        Self(self.0 & !rhs.to_set().0)
    }
}

impl Sub for SquareSet {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 & !rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.trailing_zeros() as usize);
            self.0 &= self.0 - 1;
            return Some(square);
        }
        None
    }
}

impl Index<Square> for [SquareSet; 64] {
    type Output = SquareSet;
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.to_index()]
    }
}

impl IndexMut<Square> for [SquareSet; 64] {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.to_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_on_board() {
        let square = Square::new(0, 0);
        assert_eq!(square + Offset::new(1, 1), Some(Square::new(1, 1)));
        assert_eq!(square + Offset::new(-1, 0), None);
        assert_eq!(square + Offset::new(0, -1), None);
        let square = Square::new(7, 7);
        assert_eq!(square + Offset::new(1, 0), None);
        assert_eq!(square + Offset::new(0, 1), None);
    }

    #[test]
    fn test_rank_from_home() {
        assert_eq!(Square::new(0, 4).rank_from_home(White), 1);
        assert_eq!(Square::new(3, 4).rank_from_home(White), 4);
        assert_eq!(Square::new(7, 4).rank_from_home(White), 8);
        assert_eq!(Square::new(7, 4).rank_from_home(Black), 1);
        assert_eq!(Square::new(4, 4).rank_from_home(Black), 4);
        assert_eq!(Square::new(0, 4).rank_from_home(Black), 8);
    }

    #[test]
    fn test_set_insert_remove() {
        let mut set = SquareSet::empty();
        let square = Square::new(3, 5);
        assert!(!set.contains(square));
        set.insert(square);
        assert!(set.contains(square));
        assert_eq!(set.len(), 1);
        set.remove(square);
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_iteration() {
        let squares = [Square::new(0, 0), Square::new(4, 4), Square::new(7, 7)];
        let set = SquareSet::from_squares(squares);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, squares);
    }

    #[test]
    fn test_display_is_algebraic() {
        assert_eq!(Square::new(0, 4).to_string(), "e1");
        assert_eq!(Square::new(3, 4).to_string(), "e4");
        assert_eq!(Square::new(7, 0).to_string(), "a8");
    }
}
