use fairyfen::{Color, Fairy, Position, Variant};
use serde::Deserialize;

#[derive(Deserialize)]
struct Record {
    variant: String,
    fen: String,
    white: bool,
    black: bool,
    comment: String,
}

#[test]
fn test_insufficient_material_suite() {
    let mut reader =
        csv::Reader::from_path("tests/insufficient_material.csv").expect("failed to open test suite");

    for record in reader.deserialize() {
        let record: Record = record.expect("valid record");
        let variant = Variant::from_uci(&record.variant).expect("known variant");
        let pos = Fairy::from_fen(variant, &record.fen).expect("valid position");

        for (color, expected) in [(Color::White, record.white), (Color::Black, record.black)] {
            let computed = pos.has_insufficient_material(color);
            assert_eq!(
                computed,
                expected,
                "
\n
{:?} ({})
{:?}\n
{:?}\n
color={:?}
computed_outcome={:?}
expected_outcome={:?}\n\n",
                record.comment,
                record.variant,
                pos.board(),
                record.fen,
                color,
                computed,
                expected
            );
        }
    }
}

#[test]
fn test_insufficient_material_is_stable() {
    let variant = Variant::from_uci("xiangqi").expect("known variant");
    let mut pos = Fairy::from_fen(variant, "3k5/9/9/9/9/9/9/2B6/4A4/3AK4 w - - 0 1").expect("valid position");
    let moves = pos.legal_moves();
    for m in &moves {
        let after = pos.play(m);
        assert!(after.has_insufficient_material(Color::White));
        assert!(after.has_insufficient_material(Color::Black));
    }
    assert_eq!(pos.ply(), 0);
}
