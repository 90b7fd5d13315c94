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

use core::num::NonZeroU32;

use crate::{
    bitboard::Bitboard,
    board::Board,
    color::{ByColor, Color},
    role::Hand,
    square::Square,
};

/// A not necessarily legal position.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board, including the original roles of
    /// promoted pieces.
    pub board: Board,

    /// Pieces in hand, for variants with drops or gating.
    pub pockets: Option<ByColor<Hand>>,

    /// Side to move.
    pub turn: Color,

    /// Castling rights in terms of corresponding rook positions.
    pub castling_rights: Bitboard,

    /// Squares of back rank pieces that have not moved yet, so that a
    /// piece from the hand may still be gated in behind them.
    pub gates: Bitboard,

    /// En passant target square.
    pub ep_square: Option<Square>,

    /// Remaining checks in variants like Three-Check.
    pub remaining_checks: Option<ByColor<u32>>,

    /// Number of half-moves since the last
    /// [capture or pawn move](super::Move::is_zeroing()).
    pub halfmoves: u32,

    /// Current move number.
    ///
    /// Starts at 1 and is increased after every black move.
    pub fullmoves: NonZeroU32,
}

impl Setup {
    pub fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            pockets: None,
            turn: Color::White,
            castling_rights: Bitboard::EMPTY,
            gates: Bitboard::EMPTY,
            ep_square: None,
            remaining_checks: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Pieces in the hand of `color`. Empty if the setup has no pockets.
    pub fn hand(&self, color: Color) -> Hand {
        self.pockets
            .as_ref()
            .map_or_else(Hand::default, |pockets| *pockets.get(color))
    }

    pub fn swap_turn(&mut self) {
        self.turn = !self.turn;
        self.ep_square = None;
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup::empty()
    }
}
