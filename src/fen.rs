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

//! Parse and write Forsyth-Edwards-Notation for arbitrary variants.
//!
//! The field layout follows the start FEN of the [`Variant`]: castling and
//! en passant fields are present if the start FEN has them, check counts
//! for check counting variants, and pockets either as a `[...]` suffix of
//! the board or as an extra rank after a `/`.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{fen::Fen, Color, Role, Variant};
//!
//! let shogi = Variant::shogi();
//! let fen = Fen::from_ascii(
//!     b"lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL[Pp] b 3 2",
//!     &shogi,
//! )?;
//! let setup = fen.as_setup();
//! assert_eq!(setup.turn, Color::Black);
//! assert_eq!(setup.hand(Color::White)[Role::ShogiPawn], 1);
//! assert_eq!(setup.halfmoves, 3);
//!
//! assert_eq!(
//!     fen.display(&shogi).to_string(),
//!     "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL[Pp] b 3 2"
//! );
//! # Ok::<_, fairyfen::fen::ParseFenError>(())
//! ```

use core::{
    fmt::{self, Display, Write as _},
    num::NonZeroU32,
};
use std::error::Error;

use crate::{
    bitboard::Bitboard,
    board::Board,
    color::{ByColor, Color},
    role::{Hand, Role},
    setup::Setup,
    square::{File, Rank, Square},
    types::Piece,
    variant::{Rules, Variant},
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidPocket,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidRemainingChecks,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidPocket => "invalid pocket in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidRemainingChecks => "invalid remaining checks in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// Splits the first FEN field into the board and the pocket part.
fn split_pockets<'a>(
    field: &'a [u8],
    variant: &Variant,
) -> Result<(&'a [u8], Option<&'a [u8]>), ParseFenError> {
    if let Some(open) = field.iter().position(|&ch| ch == b'[') {
        let pocket = field[open + 1..]
            .strip_suffix(b"]")
            .ok_or(ParseFenError::InvalidPocket)?;
        return Ok((&field[..open], Some(pocket)));
    }

    let slashes = field.iter().filter(|&&ch| ch == b'/').count();
    if slashes == variant.nb_ranks() as usize {
        if let Some(last) = field.iter().rposition(|&ch| ch == b'/') {
            return Ok((&field[..last], Some(&field[last + 1..])));
        }
    }

    Ok((field, None))
}

fn parse_board(board_part: &[u8], variant: &Variant) -> Option<Board> {
    let mut board = Board::empty();
    let mut rank = variant.max_rank.index();
    let mut file = 0;
    let mut last_placed: Option<Square> = None;
    let mut i = 0;

    while i < board_part.len() {
        let ch = board_part[i];
        match ch {
            b'/' => {
                if file != variant.nb_files() {
                    return None;
                }
                rank = rank.checked_sub(1)?;
                file = 0;
                last_placed = None;
                i += 1;
            }
            b'0'..=b'9' => {
                let run = board_part[i..]
                    .iter()
                    .take_while(|ch| ch.is_ascii_digit())
                    .count();
                file += btoi::btou::<u32>(&board_part[i..i + run]).ok()?;
                if file > variant.nb_files() {
                    return None;
                }
                last_placed = None;
                i += run;
            }
            b'~' => {
                let sq = last_placed.take()?;
                let (piece, _) = board.remove_piece_at(sq)?;
                board.set_piece_at(sq, piece, Some(Role::Pawn));
                i += 1;
            }
            _ => {
                let promoted = ch == b'+';
                if promoted {
                    i += 1;
                }
                let piece = variant.piece_from_char(char::from(*board_part.get(i)?))?;
                let sq = Square::from_coords(File::try_new(file)?, Rank::try_new(rank)?);
                if file >= variant.nb_files() {
                    return None;
                }
                if promoted {
                    let role = variant.promoted_role(piece.role)?;
                    board.set_piece_at(sq, role.of(piece.color), Some(piece.role));
                } else {
                    board.set_piece_at(sq, piece, None);
                }
                file += 1;
                last_placed = Some(sq);
                i += 1;
            }
        }
    }

    (rank == 0 && file == variant.nb_files()).then_some(board)
}

fn parse_pockets(pocket_part: &[u8], variant: &Variant) -> Option<ByColor<Hand>> {
    let mut pockets = ByColor::<Hand>::default();
    for &ch in pocket_part {
        if ch == b'-' {
            continue;
        }
        let piece = variant.piece_from_char(char::from(ch))?;
        let count = &mut pockets.get_mut(piece.color)[piece.role];
        *count = count.checked_add(1)?;
    }
    Some(pockets)
}

/// Reads the castling field into castling rights and gates.
fn parse_castling(
    castling_part: &[u8],
    board: &Board,
    variant: &Variant,
) -> Option<(Bitboard, Bitboard)> {
    let mut castling_rights = Bitboard::EMPTY;
    let mut gates = Bitboard::EMPTY;
    if castling_part == b"-" {
        return Some((castling_rights, gates));
    }
    if !variant.rules.intersects(Rules::CASTLING | Rules::GATING) {
        return None;
    }

    for &ch in castling_part {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let backrank = Bitboard::rank(variant.backrank(color));
        let rooks = board.by_piece(Role::Rook.of(color)) & backrank;
        let king = board.king_of(color).filter(|&k| backrank.contains(k));

        match ch.to_ascii_lowercase() {
            side @ (b'k' | b'q') => {
                let king = king?;
                let rook = if side == b'k' {
                    rooks.filter(|sq| sq.file() > king.file()).last()
                } else {
                    rooks.filter(|sq| sq.file() < king.file()).next()
                }?;
                castling_rights.add(rook);
                if variant.rules.contains(Rules::GATING) {
                    gates.add(king);
                    gates.add(rook);
                }
            }
            lower => {
                let file = File::from_char(char::from(lower)).filter(|&f| f <= variant.max_file)?;
                let sq = Square::from_coords(file, variant.backrank(color));
                if rooks.contains(sq) && variant.rules.contains(Rules::CASTLING) {
                    castling_rights.add(sq);
                } else if variant.rules.contains(Rules::GATING)
                    && board.by_color(color).contains(sq)
                {
                    gates.add(sq);
                } else {
                    return None;
                }
            }
        }
    }

    Some((castling_rights, gates))
}

/// Reads `3+3` (remaining checks) or `+1+2` (checks given, out of three).
fn parse_remaining_checks(part: &[u8]) -> Option<ByColor<u32>> {
    let (given, part) = match part.strip_prefix(b"+") {
        Some(rest) => (true, rest),
        None => (false, part),
    };
    let plus = part.iter().position(|&ch| ch == b'+')?;
    let white = btoi::btou::<u32>(&part[..plus]).ok()?;
    let black = btoi::btou::<u32>(&part[plus + 1..]).ok()?;
    if given {
        Some(ByColor {
            white: 3u32.checked_sub(white)?,
            black: 3u32.checked_sub(black)?,
        })
    } else {
        Some(ByColor { white, black })
    }
}

/// A FEN, parsed into a [`Setup`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fen(pub Setup);

impl Fen {
    /// Parses a FEN for the given variant.
    ///
    /// The parser checks syntax only. The resulting setup may still be
    /// illegal.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the input is not a syntactically valid
    /// FEN of `variant`.
    pub fn from_ascii(fen: &[u8], variant: &Variant) -> Result<Fen, ParseFenError> {
        let mut parts = fen
            .split(|&ch| ch == b' ')
            .filter(|part| !part.is_empty())
            .peekable();

        let mut result = Setup::empty();

        let first = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let (board_part, pocket_part) = split_pockets(first, variant)?;
        result.board = parse_board(board_part, variant).ok_or(ParseFenError::InvalidBoard)?;
        if let Some(pocket_part) = pocket_part {
            result.pockets =
                Some(parse_pockets(pocket_part, variant).ok_or(ParseFenError::InvalidPocket)?);
        } else if variant.has_pockets() {
            result.pockets = Some(ByColor::default());
        }

        result.turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        if variant.fen_field_count() >= 6 {
            if let Some(castling_part) = parts.next() {
                (result.castling_rights, result.gates) =
                    parse_castling(castling_part, &result.board, variant)
                        .ok_or(ParseFenError::InvalidCastling)?;
            }

            match parts.next() {
                Some(b"-") | None => (),
                Some(ep_part) => {
                    let sq =
                        Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?;
                    if !variant.contains(sq) {
                        return Err(ParseFenError::InvalidEpSquare);
                    }
                    result.ep_square = Some(sq);
                }
            }
        }

        if variant.rules.contains(Rules::CHECK_COUNTING) {
            result.remaining_checks = Some(ByColor { white: 3, black: 3 });
            if let Some(checks_part) = parts.next_if(|part| part.contains(&b'+')) {
                result.remaining_checks = Some(
                    parse_remaining_checks(checks_part)
                        .ok_or(ParseFenError::InvalidRemainingChecks)?,
                );
            }
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(halfmoves_part) => {
                result.halfmoves = btoi::btou_saturating(halfmoves_part)
                    .map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
            }
        }

        match parts.next() {
            Some(b"-") | None => (),
            Some(fullmoves_part) => {
                let fullmoves = btoi::btou_saturating(fullmoves_part)
                    .map_err(|_| ParseFenError::InvalidFullmoves)?;
                result.fullmoves = NonZeroU32::new(fullmoves).unwrap_or(NonZeroU32::MIN);
            }
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen(result))
    }

    pub fn from_setup(setup: Setup) -> Fen {
        Fen(setup)
    }

    pub fn as_setup(&self) -> &Setup {
        &self.0
    }

    pub fn into_setup(self) -> Setup {
        self.0
    }

    /// Displays the FEN with the field layout of `variant`.
    pub fn display<'a>(&'a self, variant: &'a Variant) -> FenDisplay<'a> {
        FenDisplay {
            setup: &self.0,
            variant,
        }
    }
}

impl From<Setup> for Fen {
    fn from(setup: Setup) -> Fen {
        Fen(setup)
    }
}

/// Helper returned by [`Fen::display()`].
#[derive(Debug)]
pub struct FenDisplay<'a> {
    setup: &'a Setup,
    variant: &'a Variant,
}

impl FenDisplay<'_> {
    fn fmt_piece(&self, f: &mut fmt::Formatter<'_>, sq: Square, piece: Piece) -> fmt::Result {
        let variant = self.variant;
        match self.setup.board.unpromoted_role_at(sq) {
            Some(unpromoted) if variant.promoted_role(unpromoted) == Some(piece.role) => {
                f.write_char('+')?;
                f.write_char(
                    variant
                        .piece_char(unpromoted.of(piece.color))
                        .unwrap_or('?'),
                )
            }
            Some(_) if variant.distinguishes_promoted() => {
                f.write_char(variant.piece_char(piece).unwrap_or('?'))?;
                f.write_char('~')
            }
            _ => f.write_char(variant.piece_char(piece).unwrap_or('?')),
        }
    }

    fn fmt_board(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.variant.nb_ranks()).rev() {
            let mut empty = 0;
            for file in 0..self.variant.nb_files() {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                match self.setup.board.piece_at(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        self.fmt_piece(f, sq, piece)?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_char('/')?;
            }
        }
        Ok(())
    }

    fn fmt_pockets(&self, f: &mut fmt::Formatter<'_>, pockets: &ByColor<Hand>) -> fmt::Result {
        let start_board = self.variant.start_fen.split(' ').next().unwrap_or_default();
        let bracketed = start_board.contains('[');
        f.write_char(if bracketed { '[' } else { '/' })?;
        let mut any = false;
        for color in Color::ALL {
            for role in Role::ALL.into_iter().rev() {
                if let Some(ch) = self.variant.piece_char(role.of(color)) {
                    for _ in 0..pockets.get(color)[role] {
                        f.write_char(ch)?;
                        any = true;
                    }
                }
            }
        }
        if !any && start_board.ends_with("[-]") {
            f.write_char('-')?;
        }
        if bracketed {
            f.write_char(']')?;
        }
        Ok(())
    }

    fn fmt_castling(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = self.setup;
        let mut empty = true;
        for color in Color::ALL {
            let backrank = Bitboard::rank(self.variant.backrank(color));
            let king = setup.board.king_of(color).filter(|&k| backrank.contains(k));
            let rooks = setup.board.by_piece(Role::Rook.of(color)) & backrank;
            let rights = setup.castling_rights & backrank & setup.board.by_color(color);
            let mut covered = Bitboard::EMPTY;

            for rook in rights.rev() {
                let ch = match king {
                    Some(king)
                        if king.file() < rook.file()
                            && rooks.filter(|sq| sq.file() > king.file()).last() == Some(rook) =>
                    {
                        covered.add(king);
                        'k'
                    }
                    Some(king)
                        if rook.file() < king.file()
                            && rooks.filter(|sq| sq.file() < king.file()).next() == Some(rook) =>
                    {
                        covered.add(king);
                        'q'
                    }
                    _ => rook.file().char(),
                };
                covered.add(rook);
                f.write_char(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
                empty = false;
            }

            if self.variant.rules.contains(Rules::GATING) {
                for sq in setup.gates & backrank & !covered {
                    let ch = sq.file().char();
                    f.write_char(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
                    empty = false;
                }
            }
        }
        if empty {
            f.write_char('-')?;
        }
        Ok(())
    }
}

impl Display for FenDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = self.setup;
        self.fmt_board(f)?;
        if let Some(ref pockets) = setup.pockets {
            self.fmt_pockets(f, pockets)?;
        }
        write!(f, " {}", setup.turn.char())?;
        if self.variant.fen_field_count() >= 6 {
            f.write_char(' ')?;
            self.fmt_castling(f)?;
            match setup.ep_square {
                Some(sq) => write!(f, " {sq}")?,
                None => f.write_str(" -")?,
            }
        }
        if self.variant.rules.contains(Rules::CHECK_COUNTING) {
            let checks = setup.remaining_checks.unwrap_or(ByColor { white: 3, black: 3 });
            write!(f, " {}+{}", checks.white, checks.black)?;
        }
        write!(f, " {} {}", setup.halfmoves, setup.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn roundtrip(variant: &Variant, fen: &str) {
        let parsed = Fen::from_ascii(fen.as_bytes(), variant).expect("valid fen");
        assert_eq!(parsed.display(variant).to_string(), fen);
    }

    #[test]
    fn test_start_positions() {
        for name in Variant::NAMES {
            let variant = Variant::from_uci(name).expect("built-in variant");
            let fen = Fen::from_ascii(variant.start_fen.as_bytes(), &variant)
                .unwrap_or_else(|err| panic!("{name}: {err}"));
            let written = fen.display(&variant).to_string();
            let reparsed = Fen::from_ascii(written.as_bytes(), &variant).expect("reparse");
            assert_eq!(fen, reparsed, "{name}: {written}");
        }
    }

    #[test]
    fn test_chess_roundtrip() {
        let chess = Variant::chess();
        roundtrip(&chess, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        roundtrip(&chess, "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3");
    }

    #[test]
    fn test_chess960_castling() {
        let chess960 = Variant::chess960();
        let fen = Fen::from_ascii(b"1rk1r3/8/8/8/8/8/8/1RK1R3 w BEbe - 0 1", &chess960)
            .expect("valid fen");
        assert_eq!(
            fen.as_setup().castling_rights,
            Bitboard::from_square(sq("b1"))
                | Bitboard::from_square(sq("e1"))
                | Bitboard::from_square(sq("b8"))
                | Bitboard::from_square(sq("e8"))
        );
        assert_eq!(
            fen.display(&chess960).to_string(),
            "1rk1r3/8/8/8/8/8/8/1RK1R3 w KQkq - 0 1"
        );
    }

    #[test]
    fn test_crazyhouse_promoted() {
        let crazyhouse = Variant::crazyhouse();
        let fen = "r1bqk2r/pppp1ppp/8/8/8/8/PPPP1PPP/RNBQK1NR~[Bnp] b KQkq - 0 6";
        let parsed = Fen::from_ascii(fen.as_bytes(), &crazyhouse).expect("valid fen");
        assert_eq!(parsed.as_setup().board.unpromoted_role_at(sq("h1")), Some(Role::Pawn));
        assert_eq!(parsed.as_setup().hand(Color::Black)[Role::Knight], 1);
        roundtrip(&crazyhouse, fen);
    }

    #[test]
    fn test_shogi_promoted() {
        let shogi = Variant::shogi();
        let fen = "lnsgkgsnl/1r5b1/pppppp+Ppp/9/9/9/PPPPPP1PP/1B5R1/LNSGKGSNL[P] w 0 1";
        let parsed = Fen::from_ascii(fen.as_bytes(), &shogi).expect("valid fen");
        let board = &parsed.as_setup().board;
        assert_eq!(board.piece_at(sq("g7")), Some(Role::Gold.of(Color::White)));
        assert_eq!(board.unpromoted_role_at(sq("g7")), Some(Role::ShogiPawn));
        roundtrip(&shogi, fen);
    }

    #[test]
    fn test_slash_pockets() {
        let crazyhouse = Variant::crazyhouse();
        let fen = Fen::from_ascii(
            b"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/Pp w KQkq - 0 1",
            &crazyhouse,
        )
        .expect("valid fen");
        assert_eq!(fen.as_setup().hand(Color::White)[Role::Pawn], 1);
        assert_eq!(fen.as_setup().hand(Color::Black)[Role::Pawn], 1);
    }

    #[test]
    fn test_seirawan_gates() {
        let seirawan = Variant::seirawan();
        let fen = Fen::from_ascii(seirawan.start_fen.as_bytes(), &seirawan).expect("valid fen");
        assert_eq!(fen.as_setup().gates.count(), 16);
        assert_eq!(fen.as_setup().castling_rights.count(), 4);
        assert_eq!(
            fen.display(&seirawan).to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[EHeh] w KQBCDFGkqbcdfg - 0 1"
        );
    }

    #[test]
    fn test_remaining_checks() {
        let three_check = Variant::three_check();
        let fen = Fen::from_ascii(
            b"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - +1+2 0 1",
            &three_check,
        )
        .expect("valid fen");
        assert_eq!(fen.as_setup().remaining_checks, Some(ByColor { white: 2, black: 1 }));
    }

    #[test]
    fn test_invalid() {
        let chess = Variant::chess();
        for (fen, err) in [
            ("", ParseFenError::InvalidFen),
            ("8/8/8/8/8/8/8/9 w - - 0 1", ParseFenError::InvalidBoard),
            ("8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("8/8/8/8/8/8/8/7x w - - 0 1", ParseFenError::InvalidBoard),
            ("4k3/8/8/8/8/8/8/4K3 x - - 0 1", ParseFenError::InvalidTurn),
            ("4k3/8/8/8/8/8/8/4K3 w K - 0 1", ParseFenError::InvalidCastling),
            ("4k3/8/8/8/8/8/8/4K3 w - e9 0 1", ParseFenError::InvalidEpSquare),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", ParseFenError::InvalidHalfmoveClock),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 1", ParseFenError::InvalidFen),
        ] {
            assert_eq!(Fen::from_ascii(fen.as_bytes(), &chess), Err(err), "{fen}");
        }
    }
}
