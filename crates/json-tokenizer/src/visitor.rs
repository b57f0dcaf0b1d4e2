use std::ops::ControlFlow;

use crate::chars::JsonChar;
use crate::cursor::{Cursor, IntoCursor, StreamCursor};
use crate::error::TokenizeResult;
use crate::options::TokenizerOptions;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// Receives each token as soon as it is recognized.
pub trait Visitor<'a, C: 'a> {
    /// Returning `ControlFlow::Break` stops tokenization, which then fails
    /// with [`TokenizeErrorKind::Aborted`](crate::TokenizeErrorKind::Aborted).
    fn visit_token(&mut self, token: Token<'a, C>) -> ControlFlow<()>;
}

/// Return types accepted from visitor closures.
///
/// `bool` is the abortable form (`false` stops), `()` never stops.
pub trait VisitFlow {
    fn into_flow(self) -> ControlFlow<()>;
}

impl VisitFlow for bool {
    fn into_flow(self) -> ControlFlow<()> {
        if self {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }
}

impl VisitFlow for () {
    fn into_flow(self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl VisitFlow for ControlFlow<()> {
    fn into_flow(self) -> ControlFlow<()> {
        self
    }
}

/// Adapts a closure to the [`Visitor`] trait.
pub struct FnVisitor<F>(pub F);

impl<'a, C: 'a, F, R> Visitor<'a, C> for FnVisitor<F>
where
    F: FnMut(Token<'a, C>) -> R,
    R: VisitFlow,
{
    fn visit_token(&mut self, token: Token<'a, C>) -> ControlFlow<()> {
        (self.0)(token).into_flow()
    }
}

/// Tokenizes `cursor`, handing every token to `visitor`.
///
/// Tokens delivered before an error form a valid prefix of the document; no
/// token is delivered for the offending input.
pub fn tokenize_with<'a, K, V>(
    cursor: K,
    options: TokenizerOptions,
    visitor: &mut V,
) -> TokenizeResult<()>
where
    K: Cursor<'a>,
    V: Visitor<'a, K::Char> + ?Sized,
{
    let mut tokenizer = Tokenizer::with_options(cursor, options);
    while let Some(token) = tokenizer.next_token()? {
        if visitor.visit_token(token).is_break() {
            return Err(tokenizer.abort());
        }
    }
    Ok(())
}

/// Tokenizes any cursor with default options.
pub fn tokenize_cursor<'a, K, R>(
    cursor: K,
    visitor: impl FnMut(Token<'a, K::Char>) -> R,
) -> TokenizeResult<()>
where
    K: Cursor<'a>,
    R: VisitFlow,
{
    tokenize_with(cursor, TokenizerOptions::default(), &mut FnVisitor(visitor))
}

/// Tokenizes an in-memory input. String and number tokens borrow from `input`.
///
/// ```
/// use json_tokenizer::tokenize;
///
/// let mut kinds = Vec::new();
/// let result = tokenize(r#"{"a": [1, true]}"#, |token| {
///     kinds.push(token.kind_name());
/// });
/// assert!(result.is_ok());
/// assert_eq!(kinds, ["object-begin", "string", "name-separator", "array-begin", "number",
///                    "value-separator", "true", "array-end", "object-end"]);
/// ```
pub fn tokenize<'a, S, R>(
    input: S,
    visitor: impl FnMut(Token<'a, <S::Cursor as Cursor<'a>>::Char>) -> R,
) -> TokenizeResult<()>
where
    S: IntoCursor<'a>,
    R: VisitFlow,
{
    tokenize_cursor(input.into_cursor(), visitor)
}

/// Tokenizes a single-pass input. String and number tokens own their text.
pub fn tokenize_stream<I, R>(
    input: I,
    visitor: impl FnMut(Token<'static, I::Item>) -> R,
) -> TokenizeResult<()>
where
    I: IntoIterator,
    I::Item: JsonChar,
    R: VisitFlow,
{
    tokenize_cursor(StreamCursor::new(input), visitor)
}
