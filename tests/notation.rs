use std::collections::HashSet;

use fairyfen::{
    san::{move_to_san, Notation},
    uci::UciMove,
    CastlingSide, Fairy, Position, Rules, Variant,
};

fn position(variant: &str, fen: &str) -> Fairy {
    let variant = Variant::from_uci(variant).expect("known variant");
    if fen == "startpos" {
        Fairy::new(variant).expect("valid start position")
    } else {
        Fairy::from_fen(variant, fen).expect("valid position")
    }
}

#[test]
fn test_written_moves() {
    let crazyhouse = "r1bqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR[Nn] w KQkq - 0 1";
    let seirawan = "r3k2r/8/8/8/8/8/8/R3K2R[HEhe] w KQkq - 0 1";
    let castling = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    for (variant, fen, uci, notation, expected) in [
        ("chess", "startpos", "e2e4", Notation::San, "e4"),
        ("chess", "startpos", "e2e4", Notation::Lan, "e2-e4"),
        ("chess", "startpos", "g1f3", Notation::Lan, "Ng1-f3"),
        ("chess", castling, "e1a1", Notation::San, "O-O-O"),
        ("chess", castling, "e1c1", Notation::San, "O-O-O"),
        ("chess", castling, "e1h1", Notation::Lan, "O-O"),
        ("chess", "6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", "a1a8", Notation::San, "Ra8#"),
        ("chess", "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q", Notation::San, "axb8=Q+"),
        ("seirawan", seirawan, "e1h1h", Notation::San, "O-O/He1"),
        ("seirawan", seirawan, "h1e1e", Notation::San, "O-O/Eh1"),
        ("seirawan", seirawan, "e1a1e", Notation::San, "O-O-O/Ee1+"),
        ("crazyhouse", crazyhouse, "N@f3", Notation::San, "N@f3"),
        ("makruk", "8/8/4k3/1P6/8/8/8/4K3 w - - 0 1", "b5b6m", Notation::San, "b6=M"),
        ("shogi", "startpos", "c3c4", Notation::Default, "P-76"),
        ("shogi", "startpos", "c3c4", Notation::ShogiHodges, "P-7f"),
        ("shogi", "startpos", "c3c4", Notation::ShogiHosking, "P76"),
        ("shogi", "startpos", "c3c4", Notation::San, "Pc4"),
        ("shogi", "4k4/9/9/4P4/9/9/9/9/4K4[] w 0 1", "e6e7+", Notation::Default, "P-53+"),
        ("shogi", "4k4/9/9/4P4/9/9/9/9/4K4[] w 0 1", "e6e7", Notation::Default, "P-53="),
        ("xiangqi", "startpos", "h3e3", Notation::XiangqiWxf, "C2=5"),
        ("xiangqi", "startpos", "b1c3", Notation::XiangqiWxf, "H8+7"),
        ("xiangqi", "startpos", "h3e3", Notation::San, "Che3"),
        ("janggi", "startpos", "b1c3", Notation::Janggi, "H02-83"),
    ] {
        let mut pos = position(variant, fen);
        let m = uci
            .parse::<UciMove>()
            .expect("valid uci")
            .to_move(&pos)
            .expect("legal move");
        assert_eq!(
            move_to_san(&mut pos, &m, notation),
            expected,
            "{uci} in {variant} {fen} ({notation})"
        );
    }
}

#[test]
fn test_chess960_castling_with_gate() {
    let mut variant = Variant::seirawan();
    variant.rules |= Rules::CHESS960;
    let mut pos = Fairy::from_fen(variant, "1r3kr1/8/8/8/8/8/8/1R3KR1[HEhe] w BFGbfg - 0 1")
        .expect("valid position");

    let m = "f1b1h"
        .parse::<UciMove>()
        .expect("valid uci")
        .to_move(&pos)
        .expect("legal move");
    assert_eq!(m.castling_side(), Some(CastlingSide::QueenSide));
    assert_eq!(move_to_san(&mut pos, &m, Notation::San), "O-O-O/Hf1");
    assert_eq!(move_to_san(&mut pos, &m, Notation::Lan), "O-O-O/Hf1");
    assert_eq!(UciMove::from_move(&m, pos.variant()).to_string(), "f1b1h");
}

#[test]
fn test_written_moves_are_distinct() {
    for (variant, fen, notations) in [
        ("chess", "startpos", &[Notation::San, Notation::Lan][..]),
        (
            "chess",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &[Notation::San, Notation::Lan],
        ),
        ("chess", "k7/8/3N4/8/8/8/3N1N2/4K3 w - - 0 1", &[Notation::San]),
        ("chess", "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", &[Notation::San]),
        ("capablanca", "startpos", &[Notation::San]),
        ("seirawan", "startpos", &[Notation::San, Notation::Lan]),
        (
            "seirawan",
            "r3k2r/8/8/8/8/8/8/R3K2R[HEhe] w KQkq - 0 1",
            &[Notation::San],
        ),
        (
            "crazyhouse",
            "r1bqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR[Nn] w KQkq - 0 1",
            &[Notation::San],
        ),
        ("placement", "startpos", &[Notation::San]),
        ("sittuyin", "startpos", &[Notation::San]),
        ("makruk", "startpos", &[Notation::San]),
        (
            "shogi",
            "startpos",
            &[
                Notation::ShogiHosking,
                Notation::ShogiHodges,
                Notation::ShogiHodgesNumber,
            ],
        ),
        (
            "shogi",
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[Ss] w 0 1",
            &[Notation::ShogiHodges, Notation::San],
        ),
        ("minishogi", "startpos", &[Notation::Default]),
        ("xiangqi", "startpos", &[Notation::XiangqiWxf, Notation::San]),
        (
            "xiangqi",
            "4k4/9/9/9/9/9/9/R8/9/R2K5 w - - 0 1",
            &[Notation::XiangqiWxf],
        ),
        ("janggi", "startpos", &[Notation::Janggi]),
    ] {
        let mut pos = position(variant, fen);
        let moves = pos.legal_moves();
        assert!(!moves.is_empty(), "{variant} {fen}");

        for &notation in notations {
            let mut seen = HashSet::new();
            for m in &moves {
                let written = move_to_san(&mut pos, m, notation);
                assert!(
                    seen.insert(written.clone()),
                    "{written} is ambiguous in {variant} {fen} ({notation})"
                );
            }
        }
        assert_eq!(pos.ply(), 0);
    }
}

#[test]
fn test_notation_names() {
    for notation in Notation::ALL {
        assert_eq!(notation.to_string().parse::<Notation>().ok(), Some(notation));
    }
    assert_eq!(
        Notation::default_for(&Variant::shogi()),
        Notation::ShogiHodgesNumber
    );
    assert_eq!(Notation::default_for(&Variant::janggi()), Notation::San);
}
