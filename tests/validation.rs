use fairyfen::{
    validate::{validate_fen, FenValidation},
    Fairy, Variant,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct Record {
    variant: String,
    fen: String,
    code: i32,
    comment: String,
}

#[test]
fn test_fen_validation_suite() {
    let mut reader = csv::Reader::from_path("tests/fen_validation.csv").expect("failed to open test suite");

    for record in reader.deserialize() {
        let record: Record = record.expect("valid record");
        let variant = Variant::from_uci(&record.variant).expect("known variant");
        let expected = FenValidation::from_code(record.code).expect("known code");

        let validation = validate_fen(&record.fen, &variant);
        assert_eq!(
            validation.verdict(),
            expected,
            "{} ({}): {:?} {:?}",
            record.fen,
            record.comment,
            record.variant,
            validation.diagnostic(),
        );
        assert_eq!(validation.is_ok(), expected.is_ok());

        assert_eq!(
            validate_fen(&record.fen, &variant).verdict(),
            validation.verdict(),
            "{} is validated the same way twice",
            record.fen
        );
    }
}

#[test]
fn test_start_positions_are_valid() {
    for name in Variant::NAMES {
        let variant = Variant::from_uci(name).expect("known variant");
        let validation = validate_fen(&variant.start_fen, &variant);
        assert_eq!(validation.verdict(), FenValidation::Ok, "{name}: {:?}", validation.diagnostic());

        let pos = Fairy::new(variant.clone()).expect("valid start position");
        let fen = pos.fen();
        assert!(validate_fen(&fen, &variant).is_ok(), "{name}: {fen}");
    }
}

#[test]
fn test_rejections_explain_themselves() {
    let variant = Variant::chess();
    let validation = validate_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", &variant);
    assert!(!validation.is_ok());
    assert!(validation.diagnostic().is_some_and(|d| !d.is_empty()));

    let err = validation.into_result().expect_err("invalid fen");
    assert_eq!(err.verdict(), FenValidation::InvalidBoardGeometry);
    assert!(!err.to_string().is_empty());

    assert!(validate_fen(&variant.start_fen, &variant).into_result().is_ok());
}

#[test]
fn test_from_fen_validates_first() {
    let err = Fairy::from_fen(Variant::xiangqi(), "4k4/9/9/9/9/9/9/9/9/3K w - - 0 1")
        .expect_err("short rank");
    assert!(matches!(err, fairyfen::FromFenError::Invalid(_)), "{err}");
}
