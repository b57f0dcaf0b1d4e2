/// Configuration options for the tokenizer.
///
/// # Default
///
/// All options default to `false`, which is strict RFC 8259 behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Whether a number may start with `+`.
    ///
    /// RFC 8259 only permits a leading `-`. When enabled, `+12` is accepted
    /// and produces a `Number` token whose text includes the `+`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_plus: bool,
}

impl TokenizerOptions {
    pub fn allow_leading_plus(mut self, allow: bool) -> Self {
        self.allow_leading_plus = allow;
        self
    }
}
