//! Property tests over small generated Kotlin-ish token sequences.
//!
//! These check the two structural invariants a lexer has to uphold
//! regardless of what specific grammar rule produced a token: positions
//! only move forward, and concatenating token values reproduces (modulo
//! whitespace) the scanned prefix of the source.

use ktc_lex::{Lexer, LexerConfig, TokenKind};
use proptest::prelude::*;

fn lex_all(source: &str) -> Option<Vec<ktc_lex::Token>> {
    let mut tokens = Vec::new();
    for result in Lexer::new(source, LexerConfig::default()) {
        match result {
            Ok(tok) => tokens.push(tok),
            Err(_) => return None,
        }
    }
    Some(tokens)
}

fn ident_fragment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,6}"
}

fn number_fragment() -> impl Strategy<Value = String> {
    "[0-9]{1,6}"
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        ident_fragment(),
        number_fragment(),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(",".to_string()),
        Just(".".to_string()),
        Just("=".to_string()),
    ]
}

proptest! {
    #[test]
    fn positions_never_regress(fragments in prop::collection::vec(fragment(), 1..20)) {
        let source = fragments.join(" ");
        if let Some(tokens) = lex_all(&source) {
            let mut last = (0u32, 0u32);
            for tok in &tokens {
                let here = (tok.position.line, tok.position.column);
                prop_assert!(here >= last);
                last = here;
            }
        }
    }

    #[test]
    fn every_token_value_is_a_substring_of_the_source(fragments in prop::collection::vec(fragment(), 1..20)) {
        let source = fragments.join(" ");
        if let Some(tokens) = lex_all(&source) {
            for tok in &tokens {
                prop_assert!(source.contains(&tok.value));
            }
        }
    }

    #[test]
    fn identifier_fragments_round_trip_as_identifiers_or_keywords(word in ident_fragment()) {
        if let Some(tokens) = lex_all(&word) {
            prop_assert_eq!(tokens.len(), 1);
            let tok = &tokens[0];
            prop_assert!(matches!(
                tok.kind,
                TokenKind::Identifier | TokenKind::HardKeyword | TokenKind::BooleanLiteral | TokenKind::NullLiteral
            ));
            assert_eq!(tok.value, word);
        }
    }

    #[test]
    fn decimal_digit_runs_lex_as_a_single_integer_literal(digits in number_fragment()) {
        let tokens = lex_all(&digits).expect("pure digit runs always lex");
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        prop_assert_eq!(&tokens[0].value, &digits);
    }
}
