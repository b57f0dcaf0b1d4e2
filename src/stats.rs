use std::io::{self, Write};
use std::ops::ControlFlow;

use indexmap::IndexMap;
use json_tokenizer::{JsonChar, Token, Visitor};
use rustc_hash::FxHashMap;
use string_interner::{DefaultStringInterner, DefaultSymbol};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KindStats {
    pub count: u64,
    /// Characters of token text, quotes excluded.
    pub chars: u64,
}

/// Token counts per kind, in the order the kinds were first seen, plus
/// occurrence counts for string tokens.
pub struct TokenStats {
    kinds: IndexMap<&'static str, KindStats>,
    strings: DefaultStringInterner,
    string_counts: FxHashMap<DefaultSymbol, u64>,
}

impl Default for TokenStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStats {
    pub fn new() -> Self {
        TokenStats {
            kinds: IndexMap::new(),
            strings: DefaultStringInterner::default(),
            string_counts: FxHashMap::default(),
        }
    }

    pub fn record<C: JsonChar>(&mut self, token: &Token<'_, C>) {
        let chars = match (token.literal(), token.text()) {
            (Some(literal), _) => literal.len(),
            (None, Some(text)) => text.len(),
            (None, None) => 0,
        };
        let entry = self.kinds.entry(token.kind_name()).or_default();
        entry.count += 1;
        entry.chars += chars as u64;

        if let Token::String(text) = token {
            let symbol = self.strings.get_or_intern(text.to_string_lossy());
            *self.string_counts.entry(symbol).or_insert(0) += 1;
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = (&'static str, KindStats)> + '_ {
        self.kinds.iter().map(|(kind, stats)| (*kind, *stats))
    }

    pub fn total_tokens(&self) -> u64 {
        self.kinds.values().map(|stats| stats.count).sum()
    }

    pub fn distinct_strings(&self) -> usize {
        self.strings.len()
    }

    /// The `n` most frequent string tokens, most frequent first. Ties are broken alphabetically.
    pub fn most_frequent_strings(&self, n: usize) -> Vec<(&str, u64)> {
        let mut counts: Vec<(&str, u64)> = self
            .string_counts
            .iter()
            .filter_map(|(symbol, count)| Some((self.strings.resolve(*symbol)?, *count)))
            .collect();
        counts.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts.truncate(n);
        counts
    }

    pub fn write_report(&self, out: &mut impl Write, top: usize) -> io::Result<()> {
        writeln!(out, "{:<16} {:>10} {:>12}", "kind", "count", "chars")?;
        for (kind, stats) in self.kinds() {
            writeln!(out, "{:<16} {:>10} {:>12}", kind, stats.count, stats.chars)?;
        }
        writeln!(out, "{:<16} {:>10}", "total", self.total_tokens())?;
        writeln!(out, "distinct strings: {}", self.distinct_strings())?;
        let frequent = self.most_frequent_strings(top);
        if !frequent.is_empty() {
            writeln!(out, "most frequent strings:")?;
            for (s, count) in frequent {
                writeln!(out, "{count:>10}  \"{s}\"")?;
            }
        }
        Ok(())
    }
}

impl<'a, C: JsonChar> Visitor<'a, C> for TokenStats {
    fn visit_token(&mut self, token: Token<'a, C>) -> ControlFlow<()> {
        self.record(&token);
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod test {
    use json_tokenizer::{tokenize_with, IntoCursor, TokenizerOptions};

    use super::*;

    fn stats(s: &str) -> TokenStats {
        let mut stats = TokenStats::new();
        tokenize_with(s.into_cursor(), TokenizerOptions::default(), &mut stats).unwrap();
        stats
    }

    #[test]
    fn counts_per_kind_in_first_seen_order() {
        let stats = stats(r#"[{"a": 1}, {"a": 22}, "b"]"#);
        let kinds: Vec<_> = stats.kinds().collect();
        assert_eq!(
            kinds,
            vec![
                ("array-begin", KindStats { count: 1, chars: 1 }),
                ("object-begin", KindStats { count: 2, chars: 2 }),
                ("string", KindStats { count: 3, chars: 3 }),
                ("name-separator", KindStats { count: 2, chars: 2 }),
                ("number", KindStats { count: 2, chars: 3 }),
                ("object-end", KindStats { count: 2, chars: 2 }),
                ("value-separator", KindStats { count: 2, chars: 2 }),
                ("array-end", KindStats { count: 1, chars: 1 }),
            ]
        );
        assert_eq!(stats.total_tokens(), 15);
    }

    #[test]
    fn frequent_strings() {
        let stats = stats(r#"{"x": "y", "z": ["x", "y", "x"]}"#);
        assert_eq!(stats.distinct_strings(), 3);
        assert_eq!(stats.most_frequent_strings(2), vec![("x", 3), ("y", 2)]);
    }

    #[test]
    fn report() {
        let stats = stats(r#"["k", "k"]"#);
        let mut out = Vec::new();
        stats.write_report(&mut out, 5).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("distinct strings: 1"));
        assert!(out.contains("         2  \"k\""));
    }
}
