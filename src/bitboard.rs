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

//! Sets of squares.

use core::{
    fmt::{self, Write as _},
    iter::FusedIterator,
    ops,
};

use crate::{
    color::Color,
    square::{File, Rank, Square, FILE_NB, RANK_NB, SQUARE_NB},
};

const RANK_1: u128 = (1 << FILE_NB) - 1;

const fn file_a() -> u128 {
    let mut bb = 0;
    let mut rank = 0;
    while rank < RANK_NB {
        bb |= 1 << (rank * FILE_NB);
        rank += 1;
    }
    bb
}

const FILE_A: u128 = file_a();

const fn dark_squares() -> u128 {
    let mut bb = 0;
    let mut i = 0;
    while i < SQUARE_NB {
        let file = i as u32 % FILE_NB;
        let rank = i as u32 / FILE_NB;
        if (file + rank) % 2 == 0 {
            bb |= 1 << i;
        }
        i += 1;
    }
    bb
}

/// A set of squares, represented by a 128 bit integer. Bit `i` is set if
/// the square with index `i` is in the set.
///
/// The set is also an iterator over its squares, from the lowest index to
/// the highest.
///
/// # Examples
///
/// ```
/// use fairyfen::{Bitboard, File, Rank};
///
/// let mask = Bitboard::board(File::H, Rank::EIGHTH);
/// assert_eq!(mask.count(), 64);
/// assert!(mask.contains("h8".parse()?));
/// assert!(!mask.contains("i1".parse()?));
/// # Ok::<_, fairyfen::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Bitboard(pub u128);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    /// All 120 squares of the grid.
    pub const FULL: Bitboard = Bitboard((1 << SQUARE_NB) - 1);

    /// Squares whose file and rank indices have the same parity, `a1`
    /// among them.
    pub const DARK_SQUARES: Bitboard = Bitboard(dark_squares());

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1 << sq.index())
    }

    #[inline]
    pub const fn file(file: File) -> Bitboard {
        Bitboard(FILE_A << file.index())
    }

    #[inline]
    pub const fn rank(rank: Rank) -> Bitboard {
        Bitboard(RANK_1 << (rank.index() * FILE_NB))
    }

    /// The squares of a board with the given last file and last rank.
    pub const fn board(max_file: File, max_rank: Rank) -> Bitboard {
        let width = max_file.index() + 1;
        let row = (1u128 << width) - 1;
        let mut bb = 0;
        let mut rank = 0;
        while rank <= max_rank.index() {
            bb |= row << (rank * FILE_NB);
            rank += 1;
        }
        Bitboard(bb)
    }

    /// Rank at the given distance from the first rank of `color`, on a
    /// board whose last rank is `max_rank`.
    pub fn relative_rank(color: Color, rank: Rank, max_rank: Rank) -> Bitboard {
        Bitboard::rank(color.fold_wb(rank, rank.flip(max_rank)))
    }

    /// Squares on the file of `sq` that are strictly in front of it, from
    /// the point of view of `color`.
    pub fn forward_file(color: Color, sq: Square) -> Bitboard {
        let file = Bitboard::file(sq.file());
        let rank = sq.rank().index();
        match color {
            Color::White => Bitboard(file.0 & !((1 << ((rank + 1) * FILE_NB)) - 1)),
            Color::Black => Bitboard(file.0 & ((1 << (rank * FILE_NB)) - 1)),
        }
    }

    /// Squares on ranks strictly in front of `rank`, from the point of view
    /// of `color`.
    pub fn forward_ranks(color: Color, rank: Rank) -> Bitboard {
        let boundary = match color {
            Color::White => (rank.index() + 1) * FILE_NB,
            Color::Black => rank.index() * FILE_NB,
        };
        let below = Bitboard((1 << boundary) - 1);
        match color {
            Color::White => !below & Bitboard::FULL,
            Color::Black => below,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        self.0 |= 1 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1 << sq.index());
    }

    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= 1 << sq.index();
    }

    #[inline]
    #[must_use]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | 1 << sq.index())
    }

    #[inline]
    #[must_use]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    pub fn first(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::try_new(self.0.trailing_zeros() as usize)
        }
    }

    pub fn last(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::try_new(127 - self.0.leading_zeros() as usize)
        }
    }

    pub fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }

    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.add(sq);
        }
        bb
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..RANK_NB).rev() {
            for file in 0..FILE_NB {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                f.write_char(if self.contains(sq) { '1' } else { '.' })?;
                f.write_char(if file + 1 < FILE_NB { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

macro_rules! bitboard_binop {
    ($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl ops::$trait for Bitboard {
            type Output = Bitboard;

            #[inline]
            fn $fn(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $op rhs.0)
            }
        }

        impl ops::$assign_trait for Bitboard {
            #[inline]
            fn $assign_fn(&mut self, rhs: Bitboard) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };
}

bitboard_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitboard_binop!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitboard_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = self.first();
        self.0 &= self.0.wrapping_sub(1);
        sq
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = Bitboard::count(*self);
        (len, Some(len))
    }

    fn count(self) -> usize {
        Bitboard::count(self)
    }

    fn last(self) -> Option<Square> {
        Bitboard::last(self)
    }
}

impl DoubleEndedIterator for Bitboard {
    fn next_back(&mut self) -> Option<Square> {
        let sq = Bitboard::last(*self)?;
        self.remove(sq);
        Some(sq)
    }
}

impl ExactSizeIterator for Bitboard {}

impl FusedIterator for Bitboard {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_first_last() {
        assert_eq!(Bitboard::from_square(sq("a1")).first(), Some(sq("a1")));
        assert_eq!(Bitboard::from_square(sq("l10")).last(), Some(sq("l10")));
        assert_eq!(Bitboard::EMPTY.with(sq("a1")).with(sq("h1")).last(), Some(sq("h1")));
        assert_eq!(Bitboard::EMPTY.first(), None);
    }

    #[test]
    fn test_file_and_rank() {
        assert_eq!(Bitboard::file(File::C).count(), 10);
        assert_eq!(Bitboard::rank(Rank::TENTH).count(), 12);
        assert!(Bitboard::file(File::C).contains(sq("c10")));
        assert!(Bitboard::rank(Rank::TENTH).contains(sq("l10")));
    }

    #[test]
    fn test_forward_file() {
        let ahead = Bitboard::forward_file(Color::White, sq("e4"));
        assert!(ahead.contains(sq("e5")));
        assert!(ahead.contains(sq("e10")));
        assert!(!ahead.contains(sq("e4")));
        assert!(!ahead.contains(sq("e3")));

        let ahead = Bitboard::forward_file(Color::Black, sq("e4"));
        assert_eq!(ahead.count(), 3);
        assert!(ahead.contains(sq("e1")));
    }

    #[test]
    fn test_forward_ranks() {
        assert_eq!(Bitboard::forward_ranks(Color::White, Rank::EIGHTH).count(), 24);
        assert_eq!(Bitboard::forward_ranks(Color::Black, Rank::THIRD).count(), 24);
    }

    #[test]
    fn test_board() {
        let xiangqi = Bitboard::board(File::I, Rank::TENTH);
        assert_eq!(xiangqi.count(), 90);
        assert_eq!((xiangqi & Bitboard::DARK_SQUARES).count(), 45);
    }

    #[test]
    fn test_iter() {
        let bb = Bitboard::EMPTY.with(sq("c2")).with(sq("a1")).with(sq("b10"));
        assert_eq!(bb.collect::<Vec<_>>(), [sq("a1"), sq("c2"), sq("b10")]);
        assert_eq!(bb.rev().next(), Some(sq("b10")));
    }
}
