//! Property-based tests for the lexer.
//!
//! Sources are built from a fixed alphabet of words separated by spaces, so
//! every source lexes. The event stream must follow the source and every
//! event must slice back to its own text.

#![allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly")]

use proptest::prelude::*;
use stree_lexer::{lex, LexEvent};

fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex("[a-z][a-z_]{0,5}").unwrap(),
        2 => (0u32..10_000).prop_map(|n| n.to_string()),
        1 => prop::sample::select(vec![
            "+", "*", "==", ",", "(", ")", "[", "]", "@iv", "\"str\"", "# note\n", "\n",
        ])
        .prop_map(str::to_owned),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..40).prop_map(|words| words.join(" "))
}

proptest! {
    /// Events come out in source order without overlapping.
    #[test]
    fn prop_events_follow_the_source(source in source_strategy()) {
        let events = lex(&source).unwrap();
        for pair in events.windows(2) {
            prop_assert!(
                pair[0].span().end_offset <= pair[1].span().start_offset,
                "{:?} overlaps {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    /// Each token and comment spans exactly its own text.
    #[test]
    fn prop_events_slice_to_their_text(source in source_strategy()) {
        for event in lex(&source).unwrap() {
            let (text, span) = match &event {
                LexEvent::Token(token) => (token.text.as_str(), token.span),
                LexEvent::Comment { text, span } | LexEvent::EmbDoc { text, span } => {
                    (text.as_str(), *span)
                }
            };
            prop_assert_eq!(span.slice(&source), Some(text));
        }
    }
}
