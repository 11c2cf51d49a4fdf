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

//! Chess rules core: the board position and everything that decides
//! what may happen on it.
//!
//! A _game_ owns exactly one mutable position and provides the narrow
//! surface a front end needs to play: query legal destinations for a
//! selected piece, apply a move, and read the resulting status. The
//! following is supported:
//!
//! [x] Standard chess rules on an 8-by-8 board
//! [x] Castling on either wing, with transit-square attack checks
//! [x] En passant, with the one-ply eligibility window
//! [x] Promotion (always to a queen)
//! [x] Checkmate and stalemate detection after every move
//! [x] Capture rosters and an applied-move log
//! [ ] Draw bookkeeping beyond stalemate (repetition, fifty moves)
//! [ ] Under-promotion
//!
//! Some of the key abstractions include:
//!
//! * A `Square` is a (row, col) coordinate, both components in
//!   `[0, 7]`; row 0 is White's back rank. Offset arithmetic is
//!   checked — stepping off the board yields `None`, so no out-of-range
//!   coordinate ever exists to be validated downstream.
//!
//! * A `SquareSet` packs a set of squares into a `u64`, one bit per
//!   square. Generators report quiet moves, captures and attacked
//!   squares as sets; they combine with the usual `|`, `&` and `!`
//!   operators and iterate in board-scan order.
//!
//! * A `Piece` is a color plus a kind, and remembers how often it has
//!   moved and how far it stands from its own back rank. Those two
//!   counters are what castling, en passant and promotion eligibility
//!   read; the grid slot a piece occupies is its identity.
//!
//! * A `Position` is the 8-by-8 grid owning every piece in play, along
//!   with the en-passant latch square. Move generation borrows it
//!   immutably; the only mutations flow through `Game::apply_move`,
//!   and legality probes work on scratch clones.
//!
//! * `Game` is the state machine the presentation layer talks to:
//!   whose turn it is, `legal_moves` for piece selection, `apply_move`
//!   as the sole mutator (illegal requests are rejected as no-ops),
//!   `game_status` classification, and `best_move` for the automated
//!   side, delegated to the [`crate::engine`].

mod castling;
mod material;
mod moves;
mod play;
mod position;
mod safety;
mod square;

pub use castling::*;
pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use safety::*;
pub use square::*;
