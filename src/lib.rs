// This file is part of the fairyfen library.
// Copyright (C) 2026 The fairyfen developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Notation and FEN tooling for chess variants: chess and its fairy
//! relatives, shogi, xiangqi and janggi.
//!
//! # Examples
//!
//! Validate a FEN before trusting it:
//!
//! ```
//! use fairyfen::{validate::{validate_fen, FenValidation}, Variant};
//!
//! let xiangqi = Variant::xiangqi();
//! let validation = validate_fen("4k4/9/9/9/9/9/9/9/4K4/9 w - - 0 1", &xiangqi);
//! assert_eq!(validation.verdict(), FenValidation::Ok);
//! ```
//!
//! Write moves in the notation of the game:
//!
//! ```
//! use fairyfen::{san::{move_to_san, Notation}, uci::UciMove, Fairy, Position, Variant};
//!
//! let mut pos = Fairy::new(Variant::xiangqi())?;
//! let m = "h3e3".parse::<UciMove>()?.to_move(&pos)?;
//! assert_eq!(move_to_san(&mut pos, &m, Notation::XiangqiWxf), "C2=5");
//! assert_eq!(move_to_san(&mut pos, &m, Notation::San), "Che3");
//!
//! # #[derive(Debug)] struct CommonError;
//! # impl From<fairyfen::FromFenError> for CommonError { fn from(_: fairyfen::FromFenError) -> Self { Self } }
//! # impl From<fairyfen::uci::ParseUciError> for CommonError { fn from(_: fairyfen::uci::ParseUciError) -> Self { Self } }
//! # impl From<fairyfen::uci::IllegalUciMoveError> for CommonError { fn from(_: fairyfen::uci::IllegalUciMoveError) -> Self { Self } }
//! # Ok::<_, CommonError>(())
//! ```
//!
//! Detect dead positions:
//!
//! ```
//! use fairyfen::{Color, Fairy, Position, Variant};
//!
//! let pos = Fairy::from_fen(Variant::chess(), "8/8/4k3/8/8/3NK3/8/8 w - - 0 1")?;
//! assert!(pos.has_insufficient_material(Color::White));
//! assert!(pos.has_insufficient_material(Color::Black));
//! # Ok::<_, fairyfen::FromFenError>(())
//! ```
//!
//! Variants are plain data. The built-in ones are listed in
//! [`Variant::NAMES`], and callers can describe their own by filling in
//! the public fields of [`Variant`].
//!
//! The notation functions and the material test work on any type
//! implementing [`Position`]. [`Fairy`] is the implementation that ships
//! with this crate.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for value types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/fairyfen/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod color;
mod m;
mod movegen;
mod position;
mod role;
mod setup;
mod square;
mod types;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod material;
pub mod perft;
pub mod san;
pub mod uci;
pub mod validate;
pub mod variant;

pub use bitboard::Bitboard;
pub use board::Board;
pub use color::{ByColor, Color, ParseColorError};
pub use m::{Gate, Move, MoveList};
pub use position::{
    Fairy, FromFenError, Played, Position, PositionError, PositionErrorKinds,
};
pub use role::{ByRole, Hand, Role, RoleSet};
pub use setup::Setup;
pub use square::{File, ParseSquareError, Rank, Square};
pub use types::{CastlingSide, Piece};
pub use variant::{GameResult, Rules, Variant};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
