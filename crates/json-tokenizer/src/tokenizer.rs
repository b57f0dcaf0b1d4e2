use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::chars::{is_whitespace, JsonChar};
use crate::cursor::{Cursor, SliceCursor, StreamCursor};
use crate::error::{Location, TokenizeError, TokenizeErrorKind, TokenizeResult};
use crate::options::TokenizerOptions;
use crate::token::Token;

/// A value together with where it started and ended in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub start: Location,
    /// The location just past the last character of the value.
    pub end: Location,
}

/// A pull-based tokenizer which walks a [`Cursor`] and emits [`Token`]s.
///
/// After the first error, or once the input is exhausted, every further call
/// to [`next_token`](Tokenizer::next_token) returns `Ok(None)`.
pub struct Tokenizer<'a, K: Cursor<'a>> {
    cursor: K,
    location: Location,
    options: TokenizerOptions,
    finished: bool,
    _input: PhantomData<&'a ()>,
}

impl<'a, C: JsonChar> Tokenizer<'a, SliceCursor<'a, C>> {
    /// Create a tokenizer whose tokens borrow from `input`.
    pub fn from_slice(input: &'a [C]) -> Self {
        Tokenizer::new(SliceCursor::new(input))
    }
}

impl<I> Tokenizer<'static, StreamCursor<I>>
where
    I: Iterator,
    I::Item: JsonChar,
{
    /// Create a tokenizer over a single-pass input. Tokens own their text.
    pub fn from_stream<T: IntoIterator<IntoIter = I>>(it: T) -> Self {
        Tokenizer::new(StreamCursor::new(it))
    }
}

impl<'a, K: Cursor<'a>> Tokenizer<'a, K> {
    /// Create a new [`Tokenizer`] with default options.
    pub fn new(cursor: K) -> Self {
        Self::with_options(cursor, TokenizerOptions::default())
    }

    pub fn with_options(cursor: K, options: TokenizerOptions) -> Self {
        Tokenizer {
            cursor,
            location: Location::default(),
            options,
            finished: false,
            _input: PhantomData,
        }
    }

    /// The location of the token that will be returned by the next call to `next_token()`.
    ///
    /// If there is whitespace before the next token, this is the location of
    /// that whitespace instead.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Parses a token and returns it, `Ok(None)` at the end of the input, or an error.
    pub fn next_token(&mut self) -> TokenizeResult<Option<Token<'a, K::Char>>> {
        Ok(self.next_spanned()?.map(|spanned| spanned.value))
    }

    /// Like [`next_token`](Tokenizer::next_token), but also reports where the token is.
    pub fn next_spanned(&mut self) -> TokenizeResult<Option<Spanned<Token<'a, K::Char>>>> {
        if self.finished {
            return Ok(None);
        }
        let Some(c) = self.peek_skip_whitespace() else {
            self.finished = true;
            return Ok(None);
        };
        let start = self.location;
        let token = self.scan_token(c)?;
        log::trace!("{} token at {}:{}", token.kind_name(), start.line, start.col);
        Ok(Some(Spanned {
            value: token,
            start,
            end: self.location,
        }))
    }

    /// Stops the tokenizer on behalf of a visitor and returns the matching error.
    pub(crate) fn abort(&mut self) -> TokenizeError {
        self.fail(TokenizeErrorKind::Aborted)
    }

    fn fail(&mut self, kind: TokenizeErrorKind) -> TokenizeError {
        self.finished = true;
        let err = TokenizeError::new(kind, self.location);
        log::debug!("{err}");
        err
    }

    fn peek_skip_whitespace(&mut self) -> Option<K::Char> {
        while let Some(c) = self.cursor.peek() {
            if !is_whitespace(c) {
                return Some(c);
            }
            self.advance(c);
        }
        None
    }

    /// Consumes `c`, which the caller has just peeked.
    fn advance(&mut self, c: K::Char) {
        let bumped = self.cursor.bump();
        debug_assert_eq!(bumped, Some(c));
        self.location.advance_by(c);
    }

    /// Consumes `c`, which the caller has just peeked, as part of the captured text.
    fn take(&mut self, capture: &mut K::Capture, c: K::Char) {
        self.advance(c);
        self.cursor.record(capture, c);
    }

    fn peek_digit(&mut self) -> Option<K::Char> {
        self.cursor.peek().filter(|c| c.is_ascii_digit())
    }

    fn take_digits(&mut self, capture: &mut K::Capture) {
        while let Some(d) = self.peek_digit() {
            self.take(capture, d);
        }
    }

    fn scan_token(&mut self, c: K::Char) -> TokenizeResult<Token<'a, K::Char>> {
        let token = match c.to_ascii() {
            Some(b'{') => Token::ObjectBegin,
            Some(b'}') => Token::ObjectEnd,
            Some(b'[') => Token::ArrayBegin,
            Some(b']') => Token::ArrayEnd,
            Some(b':') => Token::NameSeparator,
            Some(b',') => Token::ValueSeparator,
            Some(b'"') => return self.consume_string(c),
            Some(b'-' | b'0'..=b'9') => return self.consume_number(),
            Some(b'+') if self.options.allow_leading_plus => return self.consume_number(),
            Some(b't') => return self.consume_literal("true", Token::True),
            Some(b'f') => return self.consume_literal("false", Token::False),
            Some(b'n') => return self.consume_literal("null", Token::Null),
            _ => return Err(self.fail(TokenizeErrorKind::UnexpectedChar(c.code()))),
        };
        self.advance(c);
        Ok(token)
    }

    fn consume_string(&mut self, quote: K::Char) -> TokenizeResult<Token<'a, K::Char>> {
        self.advance(quote);
        let mut capture = self.cursor.begin_capture();
        let mut escaped = false;
        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(self.fail(TokenizeErrorKind::UnterminatedString));
            };
            if c.is(b'"') && !escaped {
                break;
            }
            // Escapes stay in the text as written; only `\"` and `\\` matter
            // for finding the closing quote.
            escaped = c.is(b'\\') && !escaped;
            self.take(&mut capture, c);
        }
        let text = self.cursor.finish_capture(capture);
        self.advance(quote);
        Ok(Token::String(text))
    }

    fn consume_number(&mut self) -> TokenizeResult<Token<'a, K::Char>> {
        let mut capture = self.cursor.begin_capture();

        if let Some(sign) = self.cursor.peek().filter(|c| c.is(b'-') || c.is(b'+')) {
            self.take(&mut capture, sign);
        }

        match self.peek_digit() {
            Some(zero) if zero.is(b'0') => {
                self.take(&mut capture, zero);
                if self.peek_digit().is_some() {
                    return Err(self.fail(TokenizeErrorKind::MalformedNumber(
                        "leading zeros are not allowed",
                    )));
                }
            }
            Some(_) => self.take_digits(&mut capture),
            None => {
                return Err(self.fail(TokenizeErrorKind::MalformedNumber(
                    "expected a digit after the sign",
                )))
            }
        }

        if let Some(dot) = self.cursor.peek().filter(|c| c.is(b'.')) {
            self.take(&mut capture, dot);
            if self.peek_digit().is_none() {
                return Err(self.fail(TokenizeErrorKind::MalformedNumber(
                    "expected a digit after the decimal point",
                )));
            }
            self.take_digits(&mut capture);
        }

        if let Some(e) = self.cursor.peek().filter(|c| c.is(b'e') || c.is(b'E')) {
            self.take(&mut capture, e);
            if let Some(sign) = self.cursor.peek().filter(|c| c.is(b'-') || c.is(b'+')) {
                self.take(&mut capture, sign);
            }
            if self.peek_digit().is_none() {
                return Err(self.fail(TokenizeErrorKind::MalformedNumber(
                    "expected a digit in the exponent",
                )));
            }
            self.take_digits(&mut capture);
        }

        Ok(Token::Number(self.cursor.finish_capture(capture)))
    }

    fn consume_literal(
        &mut self,
        expected: &'static str,
        token: Token<'a, K::Char>,
    ) -> TokenizeResult<Token<'a, K::Char>> {
        for &b in expected.as_bytes() {
            match self.cursor.peek() {
                Some(c) if c.is(b) => self.advance(c),
                Some(_) => {
                    return Err(self.fail(TokenizeErrorKind::MalformedLiteral { expected }))
                }
                None => return Err(self.fail(TokenizeErrorKind::TruncatedLiteral { expected })),
            }
        }
        Ok(token)
    }
}

impl<'a, K: Cursor<'a>> Iterator for Tokenizer<'a, K> {
    type Item = TokenizeResult<Token<'a, K::Char>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<'a, K: Cursor<'a>> FusedIterator for Tokenizer<'a, K> {}

#[cfg(feature = "fallible-iterator")]
impl<'a, K: Cursor<'a>> fallible_iterator::FallibleIterator for Tokenizer<'a, K> {
    type Item = Token<'a, K::Char>;
    type Error = TokenizeError;

    fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        self.next_token()
    }
}
