//! Property tests: the length predictor tracks the printer byte for byte,
//! and printing round-trips through the parser.

use jsondoc::{predict_length, print, JsonDocument, Parser, Value};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::int),
        any::<f64>()
            .prop_filter("finite doubles only", |f| f.is_finite())
            .prop_map(Value::float),
        any::<String>().prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..6)
                .prop_map(|members| Value::Object(members.into_iter().collect())),
        ]
    })
}

proptest! {
    /// The predictor agrees with the printer for any tree, both layouts.
    #[test]
    fn predicted_length_matches_printed_length(value in arb_value()) {
        for pretty in [false, true] {
            let text = print(&value, pretty);
            prop_assert_eq!(predict_length(&value, pretty), text.len());
        }
    }

    /// Printed output parses back to a semantically equal tree.
    #[test]
    fn print_parse_round_trip(value in arb_value()) {
        let text = print(&value, false);
        let back = Parser::parse(&text).unwrap();
        prop_assert_eq!(&back, &value);
        // Pretty output describes the same tree.
        let pretty_back = Parser::parse(&print(&value, true)).unwrap();
        prop_assert_eq!(&pretty_back, &value);
    }

    /// The parser rejects or accepts arbitrary input without panicking,
    /// and anything it accepts reprints to parseable text.
    #[test]
    fn parser_never_panics(text in any::<String>()) {
        if let Ok(value) = Parser::parse(&text) {
            let printed = print(&value, false);
            prop_assert!(Parser::parse(&printed).is_ok());
        }
    }

    /// A document built through paths predicts its own serialization.
    #[test]
    fn document_predicts_its_text(
        key in "[a-z]{1,8}",
        index in 0usize..8,
        value in arb_value(),
    ) {
        let mut doc = JsonDocument::new();
        doc.set(&format!("/{key}/[{index}]"), value).unwrap();
        for pretty in [false, true] {
            prop_assert_eq!(doc.predicted_length(pretty), doc.to_text(pretty).len());
        }
    }
}
