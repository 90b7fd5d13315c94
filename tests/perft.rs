use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use fairyfen::{perft::perft, Fairy, Variant};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut variant = Variant::chess();
    let mut pos = Fairy::new(variant.clone()).expect("valid start position");

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{line}");

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("variant") => {
                let name = slices.next().expect("missing variant name");
                variant = Variant::from_uci(name).expect("known variant");
            }
            Some("epd") => {
                let fen = slices.next().expect("missing epd");
                pos = Fairy::from_fen(variant.clone(), fen).expect("legal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&mut pos, depth), nodes, "{} at depth {}", pos.fen(), depth);
                }
            }
            _ => {}
        }
    }
}

macro_rules! gen_tests {
    ($($fn_name:ident, $path:tt, $num:expr,)+) => {
        $(
            #[test]
            #[cfg_attr(miri, ignore)]
            fn $fn_name() {
                test_perft_file($path, $num);
            }
        )+
    }
}

gen_tests! {
    test_chess,    "tests/chess.perft",    100_000,
    test_variants, "tests/variants.perft", 100_000,
}
