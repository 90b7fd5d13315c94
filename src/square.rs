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

use core::{fmt, str::FromStr};
use std::error::Error;

use crate::color::Color;

/// Number of files of the largest supported board.
pub const FILE_NB: u32 = 12;
/// Number of ranks of the largest supported board.
pub const RANK_NB: u32 = 10;
/// Number of squares of the largest supported board.
pub const SQUARE_NB: usize = (FILE_NB * RANK_NB) as usize;

/// A file of the board, `a` to `l`.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const B: File = File(1);
    pub const C: File = File(2);
    pub const D: File = File(3);
    pub const E: File = File(4);
    pub const F: File = File(5);
    pub const G: File = File(6);
    pub const H: File = File(7);
    pub const I: File = File(8);
    pub const J: File = File(9);
    pub const K: File = File(10);
    pub const L: File = File(11);

    /// Gets a file by index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=11`.
    #[track_caller]
    pub const fn new(index: u32) -> File {
        assert!(index < FILE_NB);
        File(index as u8)
    }

    #[inline]
    pub const fn try_new(index: u32) -> Option<File> {
        if index < FILE_NB {
            Some(File(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    pub fn from_char(ch: char) -> Option<File> {
        if ch.is_ascii_lowercase() {
            File::try_new(u32::from(ch) - u32::from('a'))
        } else {
            None
        }
    }

    pub fn char(self) -> char {
        char::from(b'a' + self.0)
    }

    pub fn upper_char(self) -> char {
        char::from(b'A' + self.0)
    }

    #[must_use]
    pub fn offset(self, delta: i32) -> Option<File> {
        u32::try_from(i32::from(self.0) + delta)
            .ok()
            .and_then(File::try_new)
    }

    /// Mirrors the file on a board whose last file is `max_file`.
    #[must_use]
    pub const fn flip(self, max_file: File) -> File {
        File(max_file.0 - self.0)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// A rank of the board, `1` to `10`.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);
    pub const SECOND: Rank = Rank(1);
    pub const THIRD: Rank = Rank(2);
    pub const FOURTH: Rank = Rank(3);
    pub const FIFTH: Rank = Rank(4);
    pub const SIXTH: Rank = Rank(5);
    pub const SEVENTH: Rank = Rank(6);
    pub const EIGHTH: Rank = Rank(7);
    pub const NINTH: Rank = Rank(8);
    pub const TENTH: Rank = Rank(9);

    /// Gets a rank by index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=9`.
    #[track_caller]
    pub const fn new(index: u32) -> Rank {
        assert!(index < RANK_NB);
        Rank(index as u8)
    }

    #[inline]
    pub const fn try_new(index: u32) -> Option<Rank> {
        if index < RANK_NB {
            Some(Rank(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    #[must_use]
    pub fn offset(self, delta: i32) -> Option<Rank> {
        u32::try_from(i32::from(self.0) + delta)
            .ok()
            .and_then(Rank::try_new)
    }

    /// Mirrors the rank on a board whose last rank is `max_rank`.
    #[must_use]
    pub const fn flip(self, max_rank: Rank) -> Rank {
        Rank(max_rank.0 - self.0)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square on a board of up to 12 files and 10 ranks.
///
/// Squares are indexed rank by rank, starting with `a1`, so that the
/// index of a square does not depend on the board size of the variant.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(rank.0 * FILE_NB as u8 + file.0)
    }

    /// Gets a square by index.
    #[inline]
    pub const fn try_new(index: usize) -> Option<Square> {
        if index < SQUARE_NB {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// Parses a square name like `e4` or `i10`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `s` is not a file letter `a` to `l`
    /// followed by a rank number `1` to `10`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fairyfen::{File, Rank, Square};
    ///
    /// let sq = Square::from_ascii(b"i10")?;
    /// assert_eq!(sq, Square::from_coords(File::I, Rank::TENTH));
    /// # Ok::<_, fairyfen::ParseSquareError>(())
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        let (&file, rank) = s.split_first().ok_or(ParseSquareError)?;
        if rank.is_empty() || rank[0] == b'0' {
            return Err(ParseSquareError);
        }
        let file = File::from_char(char::from(file)).ok_or(ParseSquareError)?;
        let rank = btoi::btou::<u32>(rank).map_err(|_| ParseSquareError)?;
        let rank = Rank::try_new(rank - 1).ok_or(ParseSquareError)?;
        Ok(Square::from_coords(file, rank))
    }

    #[inline]
    pub const fn file(self) -> File {
        File(self.0 % FILE_NB as u8)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank(self.0 / FILE_NB as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves the square by a number of files and ranks, if the result is
    /// still within the 12 by 10 grid.
    #[must_use]
    pub fn offset(self, files: i32, ranks: i32) -> Option<Square> {
        Some(Square::from_coords(
            self.file().offset(files)?,
            self.rank().offset(ranks)?,
        ))
    }

    /// Rank of the square from the point of view of `color`, on a board
    /// whose last rank is `max_rank`.
    pub fn relative_rank(self, color: Color, max_rank: Rank) -> Rank {
        color.fold_wb(self.rank(), self.rank().flip(max_rank))
    }

    /// Chebyshev distance, i.e. the number of king steps between squares.
    pub fn distance(self, other: Square) -> u32 {
        self.file()
            .index()
            .abs_diff(other.file().index())
            .max(self.rank().index().abs_diff(other.rank().index()))
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().upper_char(), self.rank())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Square, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in 0..FILE_NB {
            for rank in 0..RANK_NB {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                assert_eq!(sq.file().index(), file);
                assert_eq!(sq.rank().index(), rank);
                assert_eq!(sq.to_string().parse::<Square>().ok(), Some(sq));
            }
        }
    }

    #[test]
    fn test_parse_square() {
        assert!("a0".parse::<Square>().is_err());
        assert!("m1".parse::<Square>().is_err());
        assert!("a11".parse::<Square>().is_err());
        assert!("a01".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert_eq!(
            "l10".parse::<Square>().ok(),
            Some(Square::from_coords(File::L, Rank::TENTH))
        );
    }

    #[test]
    fn test_relative_rank() {
        let sq: Square = "c3".parse().expect("valid square");
        assert_eq!(sq.relative_rank(Color::White, Rank::EIGHTH), Rank::THIRD);
        assert_eq!(sq.relative_rank(Color::Black, Rank::EIGHTH), Rank::SIXTH);
        assert_eq!(sq.relative_rank(Color::Black, Rank::TENTH), Rank::EIGHTH);
    }

    #[test]
    fn test_distance() {
        let d2: Square = "d2".parse().expect("valid square");
        let g3: Square = "g3".parse().expect("valid square");
        assert_eq!(d2.distance(g3), 3);
        assert_eq!(d2.offset(3, 1), Some(g3));
        assert_eq!(d2.offset(-4, 0), None);
    }
}
