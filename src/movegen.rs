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

//! Pseudo-legal move generation, move execution and king safety for
//! [`Setup`]s of arbitrary variants.

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    color::Color,
    m::{Gate, Move, MoveList},
    role::Role,
    setup::Setup,
    square::Square,
    types::{CastlingSide, Piece},
    variant::{Rules, Variant},
};

/// Pieces of `attacker` that attack `sq`.
pub(crate) fn attackers_to(variant: &Variant, board: &Board, sq: Square, attacker: Color) -> Bitboard {
    board
        .by_color(attacker)
        .filter(|&from| {
            board
                .piece_at(from)
                .is_some_and(|piece| attacks::attacks(variant, board, piece, from).contains(sq))
        })
        .collect()
}

/// Checks if a king of `color` is attacked, or faces the other king on an
/// open file under the flying general rule.
pub(crate) fn king_attacked(variant: &Variant, board: &Board, color: Color) -> bool {
    for king in board.by_piece(Role::King.of(color)) {
        if attackers_to(variant, board, king, !color).any() {
            return true;
        }
    }

    if variant.rules.contains(Rules::FLYING_GENERAL) {
        if let (Some(ours), Some(theirs)) = (board.king_of(color), board.king_of(!color)) {
            if ours.file() == theirs.file()
                && !attacks::between(ours, theirs).intersects(board.occupied())
            {
                return true;
            }
        }
    }

    false
}

fn push_with_gates(setup: &Setup, variant: &Variant, m: Move, moves: &mut MoveList) {
    moves.push(m);

    let Some(from) = m.from() else { return };
    if !variant.rules.contains(Rules::GATING) || !setup.gates.contains(from) {
        return;
    }
    if let Move::Normal {
        role,
        from,
        capture,
        to,
        promotion,
        gate: None,
    } = m
    {
        for (gated, &count) in setup.hand(setup.turn).iter() {
            if count > 0 {
                moves.push(Move::Normal {
                    role,
                    from,
                    capture,
                    to,
                    promotion,
                    gate: Some(Gate {
                        role: gated,
                        square: from,
                    }),
                });
            }
        }
    }
}

fn gen_drops(setup: &Setup, variant: &Variant, moves: &mut MoveList) {
    if !variant.rules.contains(Rules::PIECE_DROPS) {
        return;
    }

    let us = setup.turn;
    let board = &setup.board;
    let region = *variant.drop_region.get(us) & variant.board_mask() & !board.occupied();

    for (role, &count) in setup.hand(us).iter() {
        if count == 0 {
            continue;
        }
        let mut targets = region;
        match role {
            Role::Pawn => {
                targets &= !Bitboard::rank(variant.backrank(us))
                    & !Bitboard::rank(variant.backrank(!us));
            }
            Role::ShogiPawn | Role::Lance | Role::ShogiKnight => {
                let dead = if role == Role::ShogiKnight { 2 } else { 1 };
                for sq in targets {
                    if sq.relative_rank(us, variant.max_rank).index() + dead > variant.max_rank.index() {
                        targets.remove(sq);
                    }
                }
                if role == Role::ShogiPawn && variant.rules.contains(Rules::SHOGI_DROPS) {
                    for pawn in board.by_piece(role.of(us)) {
                        targets &= !Bitboard::file(pawn.file());
                    }
                }
            }
            _ => (),
        }
        for to in targets {
            moves.push(Move::Drop { role, hand: role, to });
        }
    }
}

fn push_pawn_move(setup: &Setup, variant: &Variant, from: Square, to: Square, moves: &mut MoveList) {
    let capture = setup.board.role_at(to);
    let promotes = !variant.rules.contains(Rules::SITTUYIN_PROMOTION)
        && !variant.promotion_roles.is_empty()
        && variant.promotion_region(setup.turn).contains(to);

    if promotes {
        for promotion in variant.promotion_roles.iter() {
            moves.push(Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion: Some(promotion),
                gate: None,
            });
        }
    } else {
        push_with_gates(
            setup,
            variant,
            Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion: None,
                gate: None,
            },
            moves,
        );
    }
}

fn gen_pawn_moves(setup: &Setup, variant: &Variant, from: Square, moves: &mut MoveList) {
    let us = setup.turn;
    let board = &setup.board;
    let pawn = Role::Pawn.of(us);
    let fwd = us.fold_wb(1, -1);
    let empty = variant.board_mask() & !board.occupied();
    let captures = attacks::attacks(variant, board, pawn, from);

    let mut targets = captures & board.by_color(!us);
    if let Some(single) = from.offset(0, fwd).filter(|&sq| empty.contains(sq)) {
        targets.add(single);
        if variant.rules.contains(Rules::DOUBLE_STEP) && variant.double_step_region.get(us).contains(from) {
            if let Some(double) = single.offset(0, fwd).filter(|&sq| empty.contains(sq)) {
                targets.add(double);
            }
        }
    }
    for to in targets {
        push_pawn_move(setup, variant, from, to, moves);
    }

    if let Some(ep_square) = setup.ep_square {
        if captures.contains(ep_square) && empty.contains(ep_square) {
            moves.push(Move::EnPassant { from, to: ep_square });
        }
    }

    if variant.rules.contains(Rules::SITTUYIN_PROMOTION)
        && variant.promotion_region(us).contains(from)
        && board.by_piece(Role::Fers.of(us)).is_empty()
    {
        let steps = attacks::attacks(variant, board, Role::Fers.of(us), from) & empty;
        for promotion in variant.promotion_roles.iter() {
            for to in steps.with(from) {
                moves.push(Move::Normal {
                    role: Role::Pawn,
                    from,
                    capture: None,
                    to,
                    promotion: Some(promotion),
                    gate: None,
                });
            }
        }
    }
}

/// Checks if a piece arriving on `to` would have no further moves unless
/// promoted.
fn promotion_forced(variant: &Variant, piece: Piece, to: Square) -> bool {
    let rank = to.relative_rank(piece.color, variant.max_rank).index();
    let last = variant.max_rank.index();
    match piece.role {
        Role::ShogiPawn | Role::Lance => rank == last,
        Role::ShogiKnight => rank + 2 > last,
        _ => false,
    }
}

fn gen_piece_moves(setup: &Setup, variant: &Variant, from: Square, piece: Piece, moves: &mut MoveList) {
    let board = &setup.board;
    let targets = (attacks::attacks(variant, board, piece, from) & board.by_color(!piece.color))
        | (attacks::quiets(variant, board, piece, from) & !board.occupied());
    let zone = variant.promotion_zone(piece.color);
    let promotable = board.unpromoted_role_at(from).is_none()
        && variant.promoted_role(piece.role).is_some();

    for to in targets {
        let capture = board.role_at(to);
        let promotes = promotable && (zone.contains(from) || zone.contains(to));
        if promotes {
            moves.push(Move::PiecePromotion {
                role: piece.role,
                from,
                capture,
                to,
            });
        }
        if !promotes || !promotion_forced(variant, piece, to) {
            push_with_gates(
                setup,
                variant,
                Move::Normal {
                    role: piece.role,
                    from,
                    capture,
                    to,
                    promotion: None,
                    gate: None,
                },
                moves,
            );
        }
    }
}

fn gen_castling_moves(setup: &Setup, variant: &Variant, moves: &mut MoveList) {
    if !variant.rules.contains(Rules::CASTLING) {
        return;
    }

    let us = setup.turn;
    let board = &setup.board;
    let backrank = Bitboard::rank(variant.backrank(us));
    let Some(king) = board.king_of(us).filter(|&k| backrank.contains(k)) else {
        return;
    };
    if king_attacked(variant, board, us) {
        return;
    }

    for rook in setup.castling_rights & board.by_piece(Role::Rook.of(us)) & backrank {
        let side = CastlingSide::from_king_side(king < rook);
        let (Some(king_to), Some(rook_to)) = (
            variant.castling_king_to(us, side),
            variant.castling_rook_to(us, side),
        ) else {
            continue;
        };

        let king_path = attacks::between(king, king_to).with(king_to);
        let path = (king_path | attacks::between(rook, rook_to).with(rook_to))
            .without(king)
            .without(rook);
        if path.intersects(board.occupied()) {
            continue;
        }

        let mut without = board.clone();
        without.remove_piece_at(king);
        without.remove_piece_at(rook);
        let mut attacked = false;
        for sq in king_path.without(king) {
            if attackers_to(variant, &without, sq, !us).any() {
                attacked = true;
                break;
            }
        }
        if attacked {
            continue;
        }

        moves.push(Move::Castle {
            king,
            rook,
            gate: None,
        });

        if variant.rules.contains(Rules::GATING) {
            for square in [king, rook] {
                if !setup.gates.contains(square) || square == king_to || square == rook_to {
                    continue;
                }
                for (role, &count) in setup.hand(us).iter() {
                    if count > 0 {
                        moves.push(Move::Castle {
                            king,
                            rook,
                            gate: Some(Gate { role, square }),
                        });
                    }
                }
            }
        }
    }
}

/// Generates all pseudo-legal moves of the side to move.
pub(crate) fn pseudo_legal_moves(setup: &Setup, variant: &Variant, moves: &mut MoveList) {
    moves.clear();

    gen_drops(setup, variant, moves);
    if variant.rules.contains(Rules::MUST_DROP) && !setup.hand(setup.turn).is_empty() {
        return;
    }

    for from in setup.board.by_color(setup.turn) {
        match setup.board.piece_at(from) {
            Some(Piece {
                role: Role::Pawn, ..
            }) => gen_pawn_moves(setup, variant, from, moves),
            Some(piece) => gen_piece_moves(setup, variant, from, piece, moves),
            None => (),
        }
    }

    gen_castling_moves(setup, variant, moves);
}

/// Checks if the side that just moved left its own king safe.
pub(crate) fn is_safe(setup: &Setup, variant: &Variant, m: &Move) -> bool {
    let mut after = setup.clone();
    play_unchecked(&mut after, variant, m);
    !king_attacked(variant, &after.board, setup.turn)
}

fn capture_at(setup: &mut Setup, variant: &Variant, sq: Square) {
    let us = setup.turn;
    if let Some((piece, unpromoted)) = setup.board.remove_piece_at(sq) {
        if variant.rules.contains(Rules::CAPTURES_TO_HAND) {
            let pockets = setup.pockets.get_or_insert_with(Default::default);
            let count = &mut pockets.get_mut(us)[unpromoted.unwrap_or(piece.role)];
            *count = count.saturating_add(1);
        }
    }
    setup.castling_rights.remove(sq);
    setup.gates.remove(sq);
}

fn take_from_hand(setup: &mut Setup, role: Role) {
    let us = setup.turn;
    if let Some(ref mut pockets) = setup.pockets {
        let count = &mut pockets.get_mut(us)[role];
        *count = count.saturating_sub(1);
    }
}

fn vacate(setup: &mut Setup, variant: &Variant, sq: Square) -> Option<Role> {
    let (piece, unpromoted) = setup.board.remove_piece_at(sq)?;
    if piece.role == Role::King {
        setup.castling_rights &= !Bitboard::rank(variant.backrank(piece.color));
    }
    setup.castling_rights.remove(sq);
    setup.gates.remove(sq);
    unpromoted
}

fn put_gate(setup: &mut Setup, gate: Option<Gate>) {
    if let Some(gate) = gate {
        take_from_hand(setup, gate.role);
        setup.board.set_piece_at(gate.square, gate.role.of(setup.turn), None);
    }
}

/// Plays a move without checking legality.
pub(crate) fn play_unchecked(setup: &mut Setup, variant: &Variant, m: &Move) {
    let us = setup.turn;
    setup.ep_square = None;
    setup.halfmoves = if m.is_zeroing() {
        0
    } else {
        setup.halfmoves.saturating_add(1)
    };

    match *m {
        Move::Normal {
            role,
            from,
            capture,
            to,
            promotion,
            gate,
        } => {
            let unpromoted = vacate(setup, variant, from);
            if capture.is_some() {
                capture_at(setup, variant, to);
            }
            match promotion {
                Some(promotion) => setup.board.set_piece_at(
                    to,
                    promotion.of(us),
                    variant.distinguishes_promoted().then_some(role),
                ),
                None => setup.board.set_piece_at(to, role.of(us), unpromoted),
            }
            setup.castling_rights.remove(to);
            setup.gates.remove(to);
            put_gate(setup, gate);

            if role == Role::Pawn && from.rank().index().abs_diff(to.rank().index()) == 2 {
                let skipped = from.offset(0, us.fold_wb(1, -1));
                setup.ep_square = skipped.filter(|&sq| {
                    (attacks::attacks(variant, &setup.board, Role::Pawn.of(us), sq)
                        & setup.board.by_piece(Role::Pawn.of(!us)))
                    .any()
                });
            }
        }
        Move::PiecePromotion {
            role,
            from,
            capture,
            to,
        } => {
            vacate(setup, variant, from);
            if capture.is_some() {
                capture_at(setup, variant, to);
            }
            let promoted = variant.promoted_role(role).unwrap_or(role);
            setup.board.set_piece_at(to, promoted.of(us), Some(role));
        }
        Move::PieceDemotion {
            role,
            from,
            capture,
            to,
        } => {
            let unpromoted = vacate(setup, variant, from).unwrap_or(role);
            if capture.is_some() {
                capture_at(setup, variant, to);
            }
            setup.board.set_piece_at(to, unpromoted.of(us), None);
        }
        Move::EnPassant { from, to } => {
            vacate(setup, variant, from);
            if let Some(captured) = to.offset(0, us.fold_wb(-1, 1)) {
                capture_at(setup, variant, captured);
            }
            setup.board.set_piece_at(to, Role::Pawn.of(us), None);
        }
        Move::Castle { king, rook, gate } => {
            let side = CastlingSide::from_king_side(king < rook);
            vacate(setup, variant, king);
            vacate(setup, variant, rook);
            if let Some(king_to) = variant.castling_king_to(us, side) {
                setup.board.set_piece_at(king_to, Role::King.of(us), None);
            }
            if let Some(rook_to) = variant.castling_rook_to(us, side) {
                setup.board.set_piece_at(rook_to, Role::Rook.of(us), None);
            }
            put_gate(setup, gate);
        }
        Move::Drop { role, hand, to } => {
            take_from_hand(setup, hand);
            setup
                .board
                .set_piece_at(to, role.of(us), (role != hand).then_some(hand));
        }
    }

    if variant.rules.contains(Rules::CHECK_COUNTING) && king_attacked(variant, &setup.board, !us) {
        if let Some(ref mut remaining_checks) = setup.remaining_checks {
            let checks = remaining_checks.get_mut(us);
            *checks = checks.saturating_sub(1);
        }
    }

    if us.is_black() {
        setup.fullmoves = setup.fullmoves.saturating_add(1);
    }
    setup.turn = !us;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn setup(variant: &Variant, fen: &str) -> Setup {
        Fen::from_ascii(fen.as_bytes(), variant)
            .expect("valid fen")
            .into_setup()
    }

    fn legal(variant: &Variant, setup: &Setup) -> Vec<Move> {
        let mut moves = MoveList::new();
        pseudo_legal_moves(setup, variant, &mut moves);
        moves
            .into_iter()
            .filter(|m| is_safe(setup, variant, m))
            .collect()
    }

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_start_position_counts() {
        for (variant, count) in [
            (Variant::chess(), 20),
            (Variant::capablanca(), 28),
            (Variant::xiangqi(), 44),
            (Variant::shogi(), 30),
            (Variant::makruk(), 23),
        ] {
            let start = setup(&variant, &variant.start_fen);
            assert_eq!(legal(&variant, &start).len(), count, "{}", variant.name);
        }
    }

    #[test]
    fn test_castling_through_check() {
        let chess = Variant::chess();
        let pos = setup(&chess, "4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1");
        let moves = legal(&chess, &pos);
        assert!(moves.contains(&Move::Castle {
            king: sq("e1"),
            rook: sq("a1"),
            gate: None
        }));
        assert!(!moves.iter().any(|m| m.castling_side() == Some(CastlingSide::KingSide)));
    }

    #[test]
    fn test_flying_general() {
        let xiangqi = Variant::xiangqi();
        let pos = setup(&xiangqi, "4k4/9/9/9/9/9/9/9/4R4/4K4 w - - 0 1");
        let moves = legal(&xiangqi, &pos);
        assert!(moves
            .iter()
            .all(|m| m.from() != Some(sq("e2")) || m.to().file() == sq("e2").file()));
    }

    #[test]
    fn test_shogi_drop_restrictions() {
        let shogi = Variant::shogi();
        let pos = setup(&shogi, "4k4/9/9/9/9/9/4P4/9/4K4[PN] w 0 1");
        let drops: Vec<Move> = legal(&shogi, &pos)
            .into_iter()
            .filter(Move::is_drop)
            .collect();
        assert!(!drops.iter().any(|m| m.role() == Role::ShogiPawn && m.to().file() == sq("e1").file()));
        assert!(!drops.iter().any(|m| m.role() == Role::ShogiPawn && m.to().rank() == sq("a9").rank()));
        assert!(!drops.iter().any(|m| m.role() == Role::ShogiKnight && m.to().rank() == sq("a8").rank()));
        assert!(drops.contains(&Move::Drop {
            role: Role::ShogiKnight,
            hand: Role::ShogiKnight,
            to: sq("a7")
        }));
    }

    #[test]
    fn test_forced_shogi_promotion() {
        let shogi = Variant::shogi();
        let pos = setup(&shogi, "4k4/P8/9/9/9/9/9/9/4K4[] w 0 1");
        let moves: Vec<Move> = legal(&shogi, &pos)
            .into_iter()
            .filter(|m| m.from() == Some(sq("a8")))
            .collect();
        assert_eq!(
            moves,
            [Move::PiecePromotion {
                role: Role::ShogiPawn,
                from: sq("a8"),
                capture: None,
                to: sq("a9")
            }]
        );
    }

    #[test]
    fn test_captures_to_hand_demote() {
        let shogi = Variant::shogi();
        let mut pos = setup(&shogi, "4k4/9/9/9/9/4+p4/4R4/9/4K4[] w 0 1");
        play_unchecked(
            &mut pos,
            &shogi,
            &Move::Normal {
                role: Role::Rook,
                from: sq("e3"),
                capture: Some(Role::Gold),
                to: sq("e4"),
                promotion: None,
                gate: None,
            },
        );
        assert_eq!(pos.hand(Color::White)[Role::ShogiPawn], 1);
        assert_eq!(pos.hand(Color::White)[Role::Gold], 0);
    }

    #[test]
    fn test_promoted_state_survives_fen() {
        let makruk = Variant::makruk();
        let mut pos = setup(&makruk, "rnsmksnr/8/1ppppppp/8/1p6/P1PPPPPP/RS1N4/3KMSNR b - - 0 3");
        play_unchecked(
            &mut pos,
            &makruk,
            &Move::Normal {
                role: Role::Pawn,
                from: sq("b4"),
                capture: None,
                to: sq("b3"),
                promotion: Some(Role::Fers),
                gate: None,
            },
        );
        assert_eq!(pos.board.unpromoted_role_at(sq("b3")), None);
        let fen = Fen::from_setup(pos.clone()).display(&makruk).to_string();
        assert_eq!(setup(&makruk, &fen), pos, "{fen}");

        let crazyhouse = Variant::crazyhouse();
        let mut pos = setup(&crazyhouse, "4k3/P7/8/8/8/8/8/4K3[] w - - 0 1");
        play_unchecked(
            &mut pos,
            &crazyhouse,
            &Move::Normal {
                role: Role::Pawn,
                from: sq("a7"),
                capture: None,
                to: sq("a8"),
                promotion: Some(Role::Queen),
                gate: None,
            },
        );
        assert_eq!(pos.board.unpromoted_role_at(sq("a8")), Some(Role::Pawn));
        let fen = Fen::from_setup(pos.clone()).display(&crazyhouse).to_string();
        assert!(fen.starts_with("Q~3k3/"), "{fen}");
        assert_eq!(setup(&crazyhouse, &fen), pos, "{fen}");
    }

    #[test]
    fn test_ep_square_only_when_capturable() {
        let chess = Variant::chess();
        let mut pos = setup(&chess, "4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1");
        let double = Move::Normal {
            role: Role::Pawn,
            from: sq("e2"),
            capture: None,
            to: sq("e4"),
            promotion: None,
            gate: None,
        };
        play_unchecked(&mut pos, &chess, &double);
        assert_eq!(pos.ep_square, Some(sq("e3")));
    }

    #[test]
    fn test_seirawan_gating() {
        let seirawan = Variant::seirawan();
        let pos = setup(&seirawan, &seirawan.start_fen);
        let moves = legal(&seirawan, &pos);
        assert!(moves.contains(&Move::Normal {
            role: Role::Knight,
            from: sq("g1"),
            capture: None,
            to: sq("f3"),
            promotion: None,
            gate: Some(Gate {
                role: Role::Archbishop,
                square: sq("g1")
            }),
        }));
        assert_eq!(moves.len(), 20 + 4 * 2);
    }

    #[test]
    fn test_must_drop() {
        let placement = Variant::placement();
        let pos = setup(&placement, &placement.start_fen);
        let moves = legal(&placement, &pos);
        assert!(moves.iter().all(Move::is_drop));
        assert_eq!(moves.len(), 5 * 8);
    }
}
