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

//! Structural validation of FEN strings.
//!
//! [`validate_fen()`] checks a FEN against the geometry and piece set of a
//! [`Variant`] before any attempt is made to build a position from it. It
//! does not check whether the position could arise in a game.
//!
//! # Examples
//!
//! ```
//! use fairyfen::{validate::{validate_fen, FenValidation}, Variant};
//!
//! let chess = Variant::chess();
//! assert!(validate_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1", &chess).is_ok());
//!
//! let validation = validate_fen("8/8/8/3kK3/8/8/8/8 w - - 0 1", &chess);
//! assert_eq!(validation.verdict(), FenValidation::TouchingKings);
//! assert_eq!(validation.verdict().code(), -9);
//! ```

use core::fmt::{self, Write as _};
use std::error::Error;

use crate::{
    color::{ByColor, Color},
    role::Role,
    variant::{Rules, Variant},
};

/// Characters with a structural meaning in the board field.
const SPECIAL_CHARS: &str = "/+~[]-";

/// Outcome of [`validate_fen()`].
///
/// Every failure cause has its own negative code, so that callers can map
/// codes to their own messages. [`FenValidation::InvalidCheckCount`] only
/// occurs in check counting variants such as `3check`, and
/// [`FenValidation::InvalidCountingRule`] only in variants with a counting
/// limit such as `makruk`.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum FenValidation {
    InvalidCountingRule = -14,
    InvalidCheckCount = -13,
    MissingSpaceDelim = -12,
    InvalidNbParts = -11,
    InvalidChar = -10,
    TouchingKings = -9,
    InvalidBoardGeometry = -8,
    InvalidPocketInfo = -7,
    InvalidSideToMove = -6,
    InvalidCastlingInfo = -5,
    InvalidEnPassantSq = -4,
    InvalidNumberOfKings = -3,
    InvalidHalfMoveCounter = -2,
    InvalidMoveCounter = -1,
    Empty = 0,
    Ok = 1,
}

impl FenValidation {
    /// All verdicts, ordered by code.
    pub const ALL: [FenValidation; 16] = [
        FenValidation::InvalidCountingRule,
        FenValidation::InvalidCheckCount,
        FenValidation::MissingSpaceDelim,
        FenValidation::InvalidNbParts,
        FenValidation::InvalidChar,
        FenValidation::TouchingKings,
        FenValidation::InvalidBoardGeometry,
        FenValidation::InvalidPocketInfo,
        FenValidation::InvalidSideToMove,
        FenValidation::InvalidCastlingInfo,
        FenValidation::InvalidEnPassantSq,
        FenValidation::InvalidNumberOfKings,
        FenValidation::InvalidHalfMoveCounter,
        FenValidation::InvalidMoveCounter,
        FenValidation::Empty,
        FenValidation::Ok,
    ];

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Gets the verdict with the given code.
    ///
    /// # Examples
    ///
    /// ```
    /// use fairyfen::validate::FenValidation;
    ///
    /// assert_eq!(FenValidation::from_code(-3), Some(FenValidation::InvalidNumberOfKings));
    /// assert_eq!(FenValidation::from_code(2), None);
    /// ```
    pub fn from_code(code: i32) -> Option<FenValidation> {
        FenValidation::ALL
            .into_iter()
            .find(|verdict| verdict.code() == code)
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, FenValidation::Ok)
    }

    const fn description(self) -> &'static str {
        match self {
            FenValidation::InvalidCountingRule => "invalid counting rule state",
            FenValidation::InvalidCheckCount => "invalid check count",
            FenValidation::MissingSpaceDelim => "missing space delimiter",
            FenValidation::InvalidNbParts => "invalid number of fen parts",
            FenValidation::InvalidChar => "invalid character",
            FenValidation::TouchingKings => "touching kings",
            FenValidation::InvalidBoardGeometry => "invalid board geometry",
            FenValidation::InvalidPocketInfo => "invalid pocket info",
            FenValidation::InvalidSideToMove => "invalid side to move",
            FenValidation::InvalidCastlingInfo => "invalid castling info",
            FenValidation::InvalidEnPassantSq => "invalid en passant square",
            FenValidation::InvalidNumberOfKings => "invalid number of kings",
            FenValidation::InvalidHalfMoveCounter => "invalid halfmove counter",
            FenValidation::InvalidMoveCounter => "invalid move counter",
            FenValidation::Empty => "empty fen",
            FenValidation::Ok => "valid fen",
        }
    }
}

impl fmt::Display for FenValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Verdict of [`validate_fen()`], with a human readable diagnostic for
/// every rejection.
///
/// The diagnostic is meant for people. Programs should look at the
/// [verdict](Validation::verdict) only.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Validation {
    verdict: FenValidation,
    diagnostic: Option<String>,
}

impl Validation {
    fn ok() -> Validation {
        Validation {
            verdict: FenValidation::Ok,
            diagnostic: None,
        }
    }

    #[inline]
    pub fn verdict(&self) -> FenValidation {
        self.verdict
    }

    /// Explanation of the rejection. `None` for valid FENs.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.verdict.is_ok()
    }

    /// Converts to a `Result`, so that validation can be chained with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFen`] for every verdict other than
    /// [`FenValidation::Ok`], including [`FenValidation::Empty`].
    pub fn into_result(self) -> Result<(), InvalidFen> {
        match self.verdict {
            FenValidation::Ok => Ok(()),
            verdict => Err(InvalidFen {
                verdict,
                diagnostic: self.diagnostic.unwrap_or_default(),
            }),
        }
    }
}

/// A FEN rejected by [`validate_fen()`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InvalidFen {
    verdict: FenValidation,
    diagnostic: String,
}

impl InvalidFen {
    fn new(verdict: FenValidation, diagnostic: impl Into<String>) -> InvalidFen {
        InvalidFen {
            verdict,
            diagnostic: diagnostic.into(),
        }
    }

    #[inline]
    pub fn verdict(&self) -> FenValidation {
        self.verdict
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

impl fmt::Display for InvalidFen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.verdict, self.diagnostic)
    }
}

impl Error for InvalidFen {}

/// A square of a [`CharBoard`], counted from zero. Rank 0 is the first
/// rank of white.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CharSquare {
    pub rank: u32,
    pub file: u32,
}

impl CharSquare {
    pub const fn new(rank: u32, file: u32) -> CharSquare {
        CharSquare { rank, file }
    }

    /// Square of the euclidean distance. At most 2 for adjacent squares.
    pub const fn distance_squared(self, other: CharSquare) -> u32 {
        let ranks = self.rank.abs_diff(other.rank);
        let files = self.file.abs_diff(other.file);
        ranks * ranks + files * files
    }
}

/// Piece letters of a FEN board field, laid out on a grid of the size of
/// the variant board.
///
/// The grid knows nothing about piece movement, so that geometric checks
/// can be made on boards the engine could not represent.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CharBoard {
    nb_ranks: u32,
    nb_files: u32,
    cells: Vec<Option<char>>,
}

impl CharBoard {
    pub fn new(nb_ranks: u32, nb_files: u32) -> CharBoard {
        CharBoard {
            nb_ranks,
            nb_files,
            cells: vec![None; (nb_ranks * nb_files) as usize],
        }
    }

    /// Replays a FEN board field onto an empty grid of the size of the
    /// `variant` board. Pockets after `[` are skipped. For variants with
    /// pockets, a pocket section after an additional `/` is skipped as
    /// well.
    ///
    /// # Errors
    ///
    /// Fails with [`FenValidation::InvalidBoardGeometry`] if a rank does
    /// not have exactly the width of the board or if the number of ranks
    /// is wrong.
    ///
    /// # Examples
    ///
    /// ```
    /// use fairyfen::{validate::{CharBoard, CharSquare}, Variant};
    ///
    /// let board = CharBoard::from_board_field(
    ///     "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR",
    ///     &Variant::capablanca(),
    /// )?;
    /// assert_eq!(board.get(CharSquare::new(0, 2)), Some('A'));
    /// assert_eq!(board.find('k'), Some(CharSquare::new(7, 5)));
    /// # Ok::<_, fairyfen::validate::InvalidFen>(())
    /// ```
    pub fn from_board_field(field: &str, variant: &Variant) -> Result<CharBoard, InvalidFen> {
        let mut board = CharBoard::new(variant.nb_ranks(), variant.nb_files());
        let nb_ranks = board.nb_ranks;
        let nb_files = board.nb_files;

        let mut rank = 0;
        let mut file = 0;
        let mut run: u32 = 0;
        let mut pocket_follows = false;

        for ch in field.chars() {
            if ch == ' ' || ch == '[' {
                break;
            }
            if let Some(digit) = ch.to_digit(10) {
                // Multi-digit runs like "10" or "12".
                let width = run
                    .checked_mul(9)
                    .and_then(|n| n.checked_add(digit))
                    .and_then(|n| n.checked_add(file))
                    .unwrap_or(u32::MAX);
                if width > nb_files {
                    return Err(rank_width(rank, width, nb_files));
                }
                file = width;
                run = run * 10 + digit;
                continue;
            }
            run = 0;

            if ch == '/' {
                if file != nb_files {
                    return Err(rank_width(rank, file, nb_files));
                }
                rank += 1;
                if rank == nb_ranks {
                    pocket_follows = true;
                    break;
                }
                file = 0;
            } else if !SPECIAL_CHARS.contains(ch) {
                if file >= nb_files {
                    return Err(InvalidFen::new(
                        FenValidation::InvalidBoardGeometry,
                        format!("piece '{ch}' on rank {} exceeds the board width of {nb_files}", rank + 1),
                    ));
                }
                board.set(CharSquare::new(nb_ranks - 1 - rank, file), ch);
                file += 1;
            }
        }

        if pocket_follows {
            if !variant.has_pockets() {
                return Err(InvalidFen::new(
                    FenValidation::InvalidBoardGeometry,
                    format!("expected {nb_ranks} ranks, found more"),
                ));
            }
        } else if rank + 1 != nb_ranks {
            return Err(InvalidFen::new(
                FenValidation::InvalidBoardGeometry,
                format!("expected {nb_ranks} ranks, found {}", rank + 1),
            ));
        } else if file != nb_files {
            return Err(rank_width(rank, file, nb_files));
        }

        Ok(board)
    }

    #[inline]
    pub fn nb_ranks(&self) -> u32 {
        self.nb_ranks
    }

    #[inline]
    pub fn nb_files(&self) -> u32 {
        self.nb_files
    }

    fn index(&self, sq: CharSquare) -> Option<usize> {
        (sq.rank < self.nb_ranks && sq.file < self.nb_files)
            .then(|| (sq.rank * self.nb_files + sq.file) as usize)
    }

    pub fn get(&self, sq: CharSquare) -> Option<char> {
        self.index(sq).and_then(|i| self.cells[i])
    }

    /// Puts a letter on a square. Squares off the grid are ignored.
    pub fn set(&mut self, sq: CharSquare, ch: char) {
        if let Some(i) = self.index(sq) {
            self.cells[i] = Some(ch);
        }
    }

    fn squares(&self) -> impl Iterator<Item = CharSquare> + '_ {
        (0..self.nb_ranks).flat_map(move |rank| (0..self.nb_files).map(move |file| CharSquare::new(rank, file)))
    }

    /// Finds all squares with the letter `ch`, rank by rank from the first
    /// rank of white.
    pub fn find_all(&self, ch: char) -> impl Iterator<Item = CharSquare> + '_ {
        self.squares().filter(move |&sq| self.get(sq) == Some(ch))
    }

    /// Finds the first square with the letter `ch`.
    pub fn find(&self, ch: char) -> Option<CharSquare> {
        self.find_all(ch).next()
    }

    pub fn is_on_rank(&self, ch: char, rank: u32) -> bool {
        (0..self.nb_files).any(|file| self.get(CharSquare::new(rank, file)) == Some(ch))
    }
}

impl fmt::Display for CharBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.nb_ranks).rev() {
            for file in 0..self.nb_files {
                f.write_char(self.get(CharSquare::new(rank, file)).unwrap_or('.'))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

fn rank_width(rank: u32, width: u32, nb_files: u32) -> InvalidFen {
    InvalidFen::new(
        FenValidation::InvalidBoardGeometry,
        format!("rank {} has width {width}, expected {nb_files}", rank + 1),
    )
}

fn color_name(color: Color) -> &'static str {
    color.fold_wb("white", "black")
}

fn cased(ch: char, color: Color) -> char {
    color.fold_wb(ch.to_ascii_uppercase(), ch.to_ascii_lowercase())
}

fn check_chars(field: &str, variant: &Variant) -> Result<(), InvalidFen> {
    match field.chars().find(|&ch| {
        !ch.is_ascii_digit() && !SPECIAL_CHARS.contains(ch) && variant.piece_from_char(ch).is_none()
    }) {
        Some(ch) => Err(InvalidFen::new(
            FenValidation::InvalidChar,
            format!("invalid piece character '{ch}'"),
        )),
        None => Ok(()),
    }
}

/// Splits the pocket section of a board field into lowercase letters per
/// color.
fn parse_pockets(field: &str, variant: &Variant) -> Result<ByColor<String>, InvalidFen> {
    let invalid = |diagnostic: &str| InvalidFen::new(FenValidation::InvalidPocketInfo, diagnostic);

    let section = if field.matches('/').count() == variant.nb_ranks() as usize {
        let (_, section) = field.rsplit_once('/').ok_or_else(|| invalid("missing pocket"))?;
        if section.contains(['[', ']']) {
            return Err(invalid("pocket mixes '/' and '[]' style"));
        }
        section
    } else {
        let inner = field
            .strip_suffix(']')
            .ok_or_else(|| invalid("pocket does not end with ']'"))?;
        let (_, section) = inner
            .rsplit_once('[')
            .ok_or_else(|| invalid("pocket opening '[' not found"))?;
        section
    };

    let mut pockets = ByColor::<String>::default();
    for ch in section.chars().filter(|&ch| ch != '-') {
        if variant.piece_from_char(ch).is_none() {
            return Err(InvalidFen::new(
                FenValidation::InvalidPocketInfo,
                format!("invalid pocket piece '{ch}'"),
            ));
        }
        pockets
            .get_mut(Color::from_white(ch.is_ascii_uppercase()))
            .push(ch.to_ascii_lowercase());
    }
    Ok(pockets)
}

fn check_castling(
    field: &str,
    board: &CharBoard,
    kings: &ByColor<CharSquare>,
    variant: &Variant,
) -> Result<(), InvalidFen> {
    let invalid = |diagnostic: String| InvalidFen::new(FenValidation::InvalidCastlingInfo, diagnostic);

    let mut rights = ByColor::<String>::default();
    for ch in field.chars().filter(|&ch| ch != '-') {
        if !ch.is_ascii_alphabetic() {
            return Err(invalid(format!("invalid castling specification '{ch}'")));
        }
        rights
            .get_mut(Color::from_white(ch.is_ascii_uppercase()))
            .push(ch.to_ascii_lowercase());
    }
    if rights.all(|rights| rights.is_empty()) {
        return Ok(());
    }

    let start_field = variant.start_fen.split(' ').next().unwrap_or_default();
    let start = CharBoard::from_board_field(start_field, variant)?;
    let king = variant.char_of(Role::King).unwrap_or('k');
    let rook = variant.char_of(Role::Rook).unwrap_or('r');

    for color in Color::ALL {
        let rights = rights.get(color);
        if rights.is_empty() {
            continue;
        }
        let name = color_name(color);
        let king_start = start
            .find(cased(king, color))
            .ok_or_else(|| invalid(format!("no {name} king in the start position")))?;

        if variant.rules.contains(Rules::CHESS960) {
            for ch in [king, rook] {
                if !board.is_on_rank(cased(ch, color), king_start.rank) {
                    return Err(invalid(format!(
                        "the {name} king and rook must be on rank {} to castle",
                        king_start.rank + 1
                    )));
                }
            }
        } else {
            if *kings.get(color) != king_start {
                return Err(invalid(format!("the {name} king has moved")));
            }
            let rooks: Vec<CharSquare> = start.find_all(cased(rook, color)).collect();
            for (side, right, index) in [("queen side", 'q', 0), ("king side", 'k', 1)] {
                if !rights.contains(right) {
                    continue;
                }
                let in_place = rooks
                    .get(index)
                    .is_some_and(|&sq| board.get(sq) == Some(cased(rook, color)));
                if !in_place {
                    return Err(invalid(format!("the {name} rook on the {side} has moved")));
                }
            }
        }
    }

    Ok(())
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

fn is_counter(field: &str) -> bool {
    field == "-" || is_digits(field)
}

fn is_ep_square(field: &str) -> bool {
    match field.as_bytes() {
        b"-" => true,
        &[file, rank] => !file.is_ascii_digit() && rank.is_ascii_digit(),
        _ => false,
    }
}

/// Remaining checks as `3+3`, or checks given as `+1+2`.
fn is_check_count(field: &str) -> bool {
    let field = field.strip_prefix('+').unwrap_or(field);
    field
        .split_once('+')
        .is_some_and(|(white, black)| is_digits(white) && is_digits(black))
}

fn check(fen: &str, variant: &Variant) -> Result<(), InvalidFen> {
    if fen.is_empty() {
        return Err(InvalidFen::new(FenValidation::Empty, "fen is empty"));
    }
    if !fen.contains(' ') {
        return Err(InvalidFen::new(
            FenValidation::MissingSpaceDelim,
            "fen misses space as delimiter",
        ));
    }

    // A single trailing space does not open another field.
    let parts: Vec<&str> = fen.strip_suffix(' ').unwrap_or(fen).split(' ').collect();
    let expected = variant.fen_field_count();
    if parts.len() < expected || parts.len() > expected + 2 {
        return Err(InvalidFen::new(
            FenValidation::InvalidNbParts,
            format!(
                "expected {expected} to {} fen parts, found {}",
                expected + 2,
                parts.len()
            ),
        ));
    }

    let board_field = parts[0];
    check_chars(board_field, variant)?;
    let board = CharBoard::from_board_field(board_field, variant)?;

    let pockets = if variant.has_pockets() {
        parse_pockets(board_field, variant)?
    } else {
        ByColor::default()
    };

    if let Some(king) = variant.char_of(Role::King) {
        if variant.piece_types().contains(Role::King) && variant.extinction.is_none() {
            for color in Color::ALL {
                let count = board_field.chars().filter(|&ch| ch == cased(king, color)).count();
                if count != 1 {
                    return Err(InvalidFen::new(
                        FenValidation::InvalidNumberOfKings,
                        format!(
                            "invalid number of {} kings: expected 1, found {count}",
                            color_name(color)
                        ),
                    ));
                }
            }

            if !pockets.any(|pocket| pocket.contains(king)) {
                if let (Some(white), Some(black)) = (
                    board.find(cased(king, Color::White)),
                    board.find(cased(king, Color::Black)),
                ) {
                    if white.distance_squared(black) <= 2 {
                        return Err(InvalidFen::new(
                            FenValidation::TouchingKings,
                            format!("kings are next to each other\n{board}"),
                        ));
                    }

                    if variant.rules.contains(Rules::CASTLING) {
                        let kings = ByColor { white, black };
                        check_castling(parts.get(2).copied().unwrap_or("-"), &board, &kings, variant)?;
                    }
                }
            }
        }
    }

    let turn = parts[1];
    if !matches!(turn.chars().next(), Some('w' | 'b')) {
        return Err(InvalidFen::new(
            FenValidation::InvalidSideToMove,
            format!("invalid side to move '{turn}'"),
        ));
    }

    if variant.rules.contains(Rules::DOUBLE_STEP) && variant.piece_types().contains(Role::Pawn) {
        let ep = parts.get(3).copied().unwrap_or_default();
        if !is_ep_square(ep) {
            return Err(InvalidFen::new(
                FenValidation::InvalidEnPassantSq,
                format!("invalid en passant square '{ep}'"),
            ));
        }
    }

    if variant.rules.contains(Rules::CHECK_COUNTING) {
        let checks = parts.get(4).copied().unwrap_or_default();
        if !is_check_count(checks) {
            return Err(InvalidFen::new(
                FenValidation::InvalidCheckCount,
                format!("invalid check count '{checks}'"),
            ));
        }
    }

    let halfmoves = parts[parts.len() - 2];
    if !is_counter(halfmoves) {
        return Err(InvalidFen::new(
            FenValidation::InvalidHalfMoveCounter,
            format!("invalid halfmove counter '{halfmoves}'"),
        ));
    }

    if let Some(limit) = variant.counting_limit {
        let plies = btoi::btou_saturating::<u32>(halfmoves.as_bytes()).unwrap_or(0);
        if plies > 2 * limit {
            return Err(InvalidFen::new(
                FenValidation::InvalidCountingRule,
                format!("counting at ply {plies} exceeds the limit of {limit} moves"),
            ));
        }
    }

    let fullmoves = parts[parts.len() - 1];
    if !is_counter(fullmoves) {
        return Err(InvalidFen::new(
            FenValidation::InvalidMoveCounter,
            format!("invalid move counter '{fullmoves}'"),
        ));
    }

    Ok(())
}

/// Validates the structure of a FEN for `variant`.
///
/// The checks run in a fixed order and stop at the first failure:
/// layout, board characters, board geometry, pockets, number of kings,
/// touching kings, castling rights, side to move, en passant square,
/// check counts, halfmove counter, counting rule and move counter.
///
/// Rejections are also logged as `tracing` events at debug level.
///
/// # Examples
///
/// ```
/// use fairyfen::{validate::{validate_fen, FenValidation}, Variant};
///
/// let shogi = Variant::shogi();
/// let validation = validate_fen(&shogi.start_fen, &shogi);
/// assert_eq!(validation.verdict(), FenValidation::Ok);
///
/// let validation = validate_fen("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w 0 1", &shogi);
/// assert_eq!(validation.verdict(), FenValidation::InvalidPocketInfo);
/// assert!(validation.diagnostic().is_some());
/// ```
pub fn validate_fen(fen: &str, variant: &Variant) -> Validation {
    match check(fen, variant) {
        Ok(()) => Validation::ok(),
        Err(InvalidFen {
            verdict,
            diagnostic,
        }) => {
            tracing::debug!(
                code = verdict.code(),
                %verdict,
                variant = %variant.name,
                "invalid fen: {diagnostic}"
            );
            Validation {
                verdict,
                diagnostic: Some(diagnostic),
            }
        }
    }
}
