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

use core::{fmt, ops::Deref};
use std::{error::Error, sync::Arc};

use bitflags::bitflags;

use crate::{
    bitboard::Bitboard,
    board::Board,
    color::Color,
    fen::{Fen, ParseFenError},
    m::{Move, MoveList},
    material,
    movegen,
    role::{Hand, Role},
    setup::Setup,
    square::{Rank, Square},
    types::Piece,
    validate::{validate_fen, InvalidFen},
    variant::Variant,
};

bitflags! {
    /// Reasons for a [`Setup`] not being a legal position.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A king is required but missing.
        const MISSING_KING = 1 << 1;

        /// A player has too many kings.
        const TOO_MANY_KINGS = 1 << 2;

        /// There are pawns on a rank they can never stand on.
        const PAWNS_ON_BACKRANK = 1 << 3;

        /// Some castling rights do not correspond to a rook on the back
        /// rank.
        const INVALID_CASTLING_RIGHTS = 1 << 4;

        /// The en passant square is not behind a pawn that could just have
        /// made a double step.
        const INVALID_EP_SQUARE = 1 << 5;

        /// The player not to move is in check.
        const OPPOSITE_CHECK = 1 << 6;
    }
}

/// Error when trying to create a [`Fairy`] from an illegal [`Setup`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    errors: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut reasons = Vec::new();
        for (kind, reason) in [
            (PositionErrorKinds::EMPTY_BOARD, "empty board"),
            (PositionErrorKinds::MISSING_KING, "missing king"),
            (PositionErrorKinds::TOO_MANY_KINGS, "too many kings"),
            (PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
            (PositionErrorKinds::INVALID_CASTLING_RIGHTS, "invalid castling rights"),
            (PositionErrorKinds::INVALID_EP_SQUARE, "invalid ep square"),
            (PositionErrorKinds::OPPOSITE_CHECK, "opposite check"),
        ] {
            if self.errors.contains(kind) {
                reasons.push(reason);
            }
        }
        if reasons.is_empty() {
            f.write_str("unknown reason")
        } else {
            f.write_str(&reasons.join(", "))
        }
    }
}

impl Error for PositionError {}

/// Error when creating a position from a FEN.
#[derive(Clone, Debug)]
pub enum FromFenError {
    /// The FEN was rejected by [`validate_fen()`].
    Invalid(InvalidFen),
    Parse(ParseFenError),
    Position(PositionError),
}

impl fmt::Display for FromFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FromFenError::Invalid(err) => err.fmt(f),
            FromFenError::Parse(err) => err.fmt(f),
            FromFenError::Position(err) => err.fmt(f),
        }
    }
}

impl Error for FromFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FromFenError::Invalid(err) => Some(err),
            FromFenError::Parse(err) => Some(err),
            FromFenError::Position(err) => Some(err),
        }
    }
}

impl From<InvalidFen> for FromFenError {
    fn from(err: InvalidFen) -> FromFenError {
        FromFenError::Invalid(err)
    }
}

impl From<ParseFenError> for FromFenError {
    fn from(err: ParseFenError) -> FromFenError {
        FromFenError::Parse(err)
    }
}

impl From<PositionError> for FromFenError {
    fn from(err: PositionError) -> FromFenError {
        FromFenError::Position(err)
    }
}

/// Queries the notation formatter and the insufficient material detector
/// need from a position.
///
/// [`Fairy`] is the implementation that ships with this crate. Engines can
/// implement the trait for their own position type.
pub trait Position {
    /// The rules of the game.
    fn variant(&self) -> &Variant;

    /// Piece positions on the board.
    fn board(&self) -> &Board;

    /// Side to move.
    fn turn(&self) -> Color;

    /// Pieces in the hand of `color`. Empty for variants without drops.
    fn hand(&self, color: Color) -> Hand;

    fn ep_square(&self) -> Option<Square>;

    /// Castling rights in terms of corresponding rook positions.
    fn castling_rights(&self) -> Bitboard;

    /// Generates all legal moves.
    fn legal_moves(&self) -> MoveList;

    /// Tests if a move could be played if the own king were not in danger.
    fn is_pseudo_legal(&self, m: &Move) -> bool;

    /// Tests a pseudo-legal move for legality.
    fn is_legal(&self, m: &Move) -> bool;

    /// Tests if a legal move checks the opponent.
    fn gives_check(&self, m: &Move) -> bool;

    /// Tests if the side to move is in check.
    fn is_check(&self) -> bool;

    /// Plays a legal move, remembering the previous state.
    fn do_move(&mut self, m: &Move);

    /// Takes back the last move played with [`Position::do_move()`].
    fn undo_move(&mut self);

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board().piece_at(sq)
    }

    /// The piece that makes the move, as it stands before moving.
    fn moved_piece(&self, m: &Move) -> Piece {
        m.from()
            .and_then(|from| self.piece_at(from))
            .unwrap_or_else(|| m.role().of(self.turn()))
    }

    fn is_capture(&self, m: &Move) -> bool {
        m.is_capture()
    }

    /// Squares of the pieces of `color` with the given role.
    fn pieces(&self, color: Color, role: Role) -> Bitboard {
        self.board().by_piece(role.of(color))
    }

    /// Original role of the promoted piece on `sq`.
    fn unpromoted_role_at(&self, sq: Square) -> Option<Role> {
        self.board().unpromoted_role_at(sq)
    }

    /// Squares a piece of the given color and role may stand on.
    fn mobility_region(&self, color: Color, role: Role) -> Bitboard {
        self.variant().mobility_region(color, role)
    }

    /// Tests if `color` can no longer win by any sequence of moves.
    fn has_insufficient_material(&self, color: Color) -> bool
    where
        Self: Sized,
    {
        material::has_insufficient_material(color, self)
    }

    /// Plays a legal move and returns a guard that takes it back when
    /// dropped.
    fn play(&mut self, m: &Move) -> Played<'_, Self>
    where
        Self: Sized,
    {
        self.do_move(m);
        Played { pos: self }
    }
}

/// A position with a move played on it. The move is taken back when the
/// guard goes out of scope.
///
/// # Examples
///
/// ```
/// use fairyfen::{Fairy, Position, Variant};
///
/// let mut pos = Fairy::new(Variant::chess())?;
/// let m = pos.legal_moves()[0];
/// {
///     let after = pos.play(&m);
///     assert_eq!(after.turn(), fairyfen::Color::Black);
/// }
/// assert_eq!(pos.turn(), fairyfen::Color::White);
/// # Ok::<_, fairyfen::FromFenError>(())
/// ```
#[derive(Debug)]
pub struct Played<'a, P: Position> {
    pos: &'a mut P,
}

impl<P: Position> Deref for Played<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> Drop for Played<'_, P> {
    fn drop(&mut self) {
        self.pos.undo_move();
    }
}

/// A position of any [`Variant`], with a history of previous states.
///
/// # Examples
///
/// ```
/// use fairyfen::{Fairy, Position, Variant};
///
/// let pos = Fairy::from_fen(
///     Variant::xiangqi(),
///     "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1",
/// )?;
/// assert_eq!(pos.legal_moves().len(), 44);
/// # Ok::<_, fairyfen::FromFenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Fairy {
    variant: Arc<Variant>,
    setup: Setup,
    history: Vec<Setup>,
}

impl Fairy {
    /// The start position of `variant`.
    ///
    /// # Errors
    ///
    /// Errors if the start FEN of `variant` is not valid.
    pub fn new(variant: impl Into<Arc<Variant>>) -> Result<Fairy, FromFenError> {
        let variant = variant.into();
        let fen = variant.start_fen.clone();
        Fairy::from_fen(variant, &fen)
    }

    /// Validates and parses a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`FromFenError::Invalid`] if [`validate_fen()`] rejects the
    /// input, otherwise the parse or legality error.
    pub fn from_fen(variant: impl Into<Arc<Variant>>, fen: &str) -> Result<Fairy, FromFenError> {
        let variant = variant.into();
        validate_fen(fen, &variant).into_result()?;
        let setup = Fen::from_ascii(fen.as_bytes(), &variant)?.into_setup();
        Fairy::from_setup(variant, setup).map_err(FromFenError::Position)
    }

    /// Checks a setup for consistency with the rules of `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] with all problems found.
    pub fn from_setup(variant: impl Into<Arc<Variant>>, setup: Setup) -> Result<Fairy, PositionError> {
        let variant = variant.into();
        let errors = setup_errors(&variant, &setup);
        if errors.is_empty() {
            Ok(Fairy {
                variant,
                setup,
                history: Vec::new(),
            })
        } else {
            tracing::trace!(?errors, variant = %variant.name, "rejected setup");
            Err(PositionError { errors })
        }
    }

    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn into_setup(self) -> Setup {
        self.setup
    }

    /// Number of moves that can be taken back.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The FEN of the current position, in the field layout of the
    /// variant.
    pub fn fen(&self) -> String {
        Fen::from_setup(self.setup.clone())
            .display(&self.variant)
            .to_string()
    }
}

fn setup_errors(variant: &Variant, setup: &Setup) -> PositionErrorKinds {
    let board = &setup.board;
    let mut errors = PositionErrorKinds::empty();

    if board.occupied().is_empty() {
        errors |= PositionErrorKinds::EMPTY_BOARD;
    }

    if variant.piece_types().contains(Role::King) && variant.extinction.is_none() {
        for color in Color::ALL {
            let kings = board.by_piece(Role::King.of(color)).count()
                + usize::from(setup.hand(color)[Role::King]);
            if kings == 0 {
                errors |= PositionErrorKinds::MISSING_KING;
            } else if kings > 1 {
                errors |= PositionErrorKinds::TOO_MANY_KINGS;
            }
        }
    }

    for color in Color::ALL {
        let last = Bitboard::relative_rank(color, variant.max_rank, variant.max_rank);
        let first = Bitboard::relative_rank(color, Rank::FIRST, variant.max_rank)
            & !*variant.double_step_region.get(color);
        if board.by_piece(Role::Pawn.of(color)).intersects(last | first) {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }
    }

    let backranks = Bitboard::rank(variant.backrank(Color::White))
        | Bitboard::rank(variant.backrank(Color::Black));
    let rooks = board.by_role(Role::Rook) & backranks;
    if (setup.castling_rights & !rooks).any() {
        errors |= PositionErrorKinds::INVALID_CASTLING_RIGHTS;
    }

    if let Some(ep_square) = setup.ep_square {
        let them = !setup.turn;
        let pushed_to = ep_square.offset(0, them.fold_wb(1, -1));
        let pushed_from = ep_square.offset(0, them.fold_wb(-1, 1));
        let valid = board.role_at(ep_square).is_none()
            && pushed_from.is_some_and(|sq| board.role_at(sq).is_none())
            && pushed_to.is_some_and(|sq| board.by_piece(Role::Pawn.of(them)).contains(sq));
        if !valid {
            errors |= PositionErrorKinds::INVALID_EP_SQUARE;
        }
    }

    if movegen::king_attacked(variant, board, !setup.turn) {
        errors |= PositionErrorKinds::OPPOSITE_CHECK;
    }

    errors
}

impl Position for Fairy {
    fn variant(&self) -> &Variant {
        &self.variant
    }

    fn board(&self) -> &Board {
        &self.setup.board
    }

    fn turn(&self) -> Color {
        self.setup.turn
    }

    fn hand(&self, color: Color) -> Hand {
        self.setup.hand(color)
    }

    fn ep_square(&self) -> Option<Square> {
        self.setup.ep_square
    }

    fn castling_rights(&self) -> Bitboard {
        self.setup.castling_rights
    }

    fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        movegen::pseudo_legal_moves(&self.setup, &self.variant, &mut moves);
        moves.retain(|m| movegen::is_safe(&self.setup, &self.variant, m));
        moves
    }

    fn is_pseudo_legal(&self, m: &Move) -> bool {
        let mut moves = MoveList::new();
        movegen::pseudo_legal_moves(&self.setup, &self.variant, &mut moves);
        moves.contains(m)
    }

    fn is_legal(&self, m: &Move) -> bool {
        movegen::is_safe(&self.setup, &self.variant, m)
    }

    fn gives_check(&self, m: &Move) -> bool {
        let mut after = self.setup.clone();
        movegen::play_unchecked(&mut after, &self.variant, m);
        movegen::king_attacked(&self.variant, &after.board, after.turn)
    }

    fn is_check(&self) -> bool {
        movegen::king_attacked(&self.variant, &self.setup.board, self.setup.turn)
    }

    fn do_move(&mut self, m: &Move) {
        self.history.push(self.setup.clone());
        movegen::play_unchecked(&mut self.setup, &self.variant, m);
    }

    fn undo_move(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.setup = previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_positions() {
        for name in Variant::NAMES {
            let variant = Variant::from_uci(name).expect("built-in variant");
            let pos = Fairy::new(variant).unwrap_or_else(|err| panic!("{name}: {err}"));
            assert!(!pos.legal_moves().is_empty(), "{name}");
            assert!(!pos.is_check(), "{name}");
        }
    }

    #[test]
    fn test_position_errors() {
        let chess = Variant::chess();
        for (fen, kinds) in [
            ("4k3/8/8/8/8/8/8/4K2P w - - 0 1", PositionErrorKinds::PAWNS_ON_BACKRANK),
            ("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1", PositionErrorKinds::OPPOSITE_CHECK),
            ("4k3/8/8/8/8/8/8/4K3 w - e6 0 1", PositionErrorKinds::INVALID_EP_SQUARE),
            ("8/8/8/8/8/8/8/4K3 w - - 0 1", PositionErrorKinds::MISSING_KING),
        ] {
            let setup = Fen::from_ascii(fen.as_bytes(), &chess)
                .expect("valid fen")
                .into_setup();
            let err = Fairy::from_setup(chess.clone(), setup).expect_err(fen);
            assert_eq!(err.kinds(), kinds, "{fen}");
        }

        let mut setup = Fen::from_ascii(b"4k3/8/8/8/8/8/8/4K2R w K - 0 1", &chess)
            .expect("valid fen")
            .into_setup();
        setup.castling_rights.add("a1".parse().expect("valid square"));
        let err = Fairy::from_setup(chess, setup).expect_err("rook missing");
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_CASTLING_RIGHTS);
    }

    #[test]
    fn test_do_undo() {
        let mut pos = Fairy::new(Variant::crazyhouse()).expect("valid start position");
        let before = pos.fen();
        let moves = pos.legal_moves();
        for m in &moves {
            pos.do_move(m);
            assert_ne!(pos.fen(), before);
            pos.undo_move();
            assert_eq!(pos.fen(), before);
        }
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn test_played_guard() {
        let mut pos = Fairy::new(Variant::chess()).expect("valid start position");
        let e4 = Move::Normal {
            role: Role::Pawn,
            from: "e2".parse().expect("valid square"),
            capture: None,
            to: "e4".parse().expect("valid square"),
            promotion: None,
            gate: None,
        };
        {
            let after = pos.play(&e4);
            assert_eq!(after.turn(), Color::Black);
            assert_eq!(after.ply(), 1);
        }
        assert_eq!(pos.ply(), 0);
        assert_eq!(pos.turn(), Color::White);
    }

    #[test]
    fn test_gives_check() {
        let pos = Fairy::from_fen(Variant::chess(), "4k3/8/8/8/8/8/8/R3K2R w - - 0 1")
            .expect("valid position");
        let checks: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| pos.gives_check(m))
            .collect();
        assert_eq!(checks.len(), 2);
    }
}
