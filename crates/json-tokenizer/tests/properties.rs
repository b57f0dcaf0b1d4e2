//! Property tests over generated JSON documents and arbitrary bytes.
use json_tokenizer::{tokenize, tokenize_stream, Token, TokenizeResult, Tokenizer};
use proptest::prelude::*;
use regex::Regex;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
            .prop_map(Value::from),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn render(s: &str) -> TokenizeResult<String> {
    let mut out = String::new();
    tokenize(s, |token| out.push_str(&token.to_string()))?;
    Ok(out)
}

/// Every token up to the first error, plus the outcome.
fn run_both(bytes: &[u8]) -> (Vec<Token<'_>>, Vec<Token<'static>>, bool, bool) {
    let mut borrowed = Vec::new();
    let borrowed_ok = tokenize(bytes, |token| borrowed.push(token)).is_ok();
    let mut owned = Vec::new();
    let owned_ok = tokenize_stream(bytes.iter().copied(), |token| owned.push(token)).is_ok();
    (borrowed, owned, borrowed_ok, owned_ok)
}

proptest! {
    #[test]
    fn compact_documents_render_back_identically(value in arb_json()) {
        let s = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(render(&s).unwrap(), s);
    }

    #[test]
    fn pretty_documents_keep_their_structure(value in arb_json()) {
        let s = serde_json::to_string_pretty(&value).unwrap();
        let rendered = render(&s).unwrap();
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        let original: Value = serde_json::from_str(&s).unwrap();
        prop_assert_eq!(reparsed, original);
    }

    #[test]
    fn number_text_matches_the_grammar(value in arb_json()) {
        let grammar = Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap();
        let s = serde_json::to_string_pretty(&value).unwrap();
        for token in Tokenizer::from_slice(s.as_bytes()) {
            match token.unwrap() {
                Token::Number(text) => {
                    prop_assert!(!text.is_empty());
                    let text = text.to_string();
                    prop_assert!(grammar.is_match(&text), "{}", text);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn strategies_agree_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let (borrowed, owned, borrowed_ok, owned_ok) = run_both(&bytes);
        prop_assert_eq!(borrowed_ok, owned_ok);
        prop_assert_eq!(borrowed, owned);
    }

    #[test]
    fn strategies_agree_on_documents(value in arb_json()) {
        let s = serde_json::to_string(&value).unwrap();
        let (borrowed, owned, borrowed_ok, owned_ok) = run_both(s.as_bytes());
        prop_assert!(borrowed_ok && owned_ok);
        prop_assert_eq!(borrowed, owned);
    }

    #[test]
    fn retokenizing_is_idempotent(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let first: Vec<_> = Tokenizer::from_slice(&bytes[..]).collect();
        let second: Vec<_> = Tokenizer::from_slice(&bytes[..]).collect();
        prop_assert_eq!(first, second);
    }
}
