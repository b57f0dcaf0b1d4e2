use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

use crate::chars::JsonChar;

/// The buffer behind an owned [`TextSpan`]. Short strings and most numbers fit inline.
pub type OwnedText<C> = SmallVec<[C; 16]>;

/// The text content of a `String` or `Number` token.
///
/// Whether a span borrows or owns is decided by the cursor the tokenizer runs
/// over, never per token: a [`SliceCursor`](crate::SliceCursor) only produces
/// `Borrowed` spans and a [`StreamCursor`](crate::StreamCursor) only produces
/// `Owned` ones.
#[derive(Debug, Clone)]
pub enum TextSpan<'a, C = u8> {
    /// A view into the input buffer. Valid for as long as the input is.
    Borrowed(&'a [C]),
    /// A copy collected while scanning a single-pass input.
    Owned(OwnedText<C>),
}

impl<'a, C> TextSpan<'a, C> {
    pub fn as_slice(&self) -> &[C] {
        match self {
            TextSpan::Borrowed(s) => s,
            TextSpan::Owned(v) => v,
        }
    }
}

impl<'a, C: JsonChar> TextSpan<'a, C> {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, TextSpan::Borrowed(_))
    }

    /// Detaches the span from the input buffer, copying if necessary.
    pub fn into_owned(self) -> TextSpan<'static, C> {
        match self {
            TextSpan::Borrowed(s) => TextSpan::Owned(SmallVec::from_slice(s)),
            TextSpan::Owned(v) => TextSpan::Owned(v),
        }
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        C::decode_lossy(self.as_slice())
    }
}

// Spans compare by content, so a borrowed and an owned span of the same text are equal.
impl<C: PartialEq> PartialEq for TextSpan<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<C: Eq> Eq for TextSpan<'_, C> {}

impl<C: JsonChar> Deref for TextSpan<'_, C> {
    type Target = [C];

    fn deref(&self) -> &[C] {
        self.as_slice()
    }
}

impl<C: JsonChar> fmt::Display for TextSpan<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// A JSON token.
///
/// `String` carries the content between the quotes with escape sequences left
/// exactly as written. `Number` carries the matched literal, sign through exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a, C = u8> {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    NameSeparator,
    ValueSeparator,
    True,
    False,
    Null,
    String(TextSpan<'a, C>),
    Number(TextSpan<'a, C>),
}

impl<'a, C: JsonChar> Token<'a, C> {
    /// A short lowercase name for the token kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::ObjectBegin => "object-begin",
            Token::ObjectEnd => "object-end",
            Token::ArrayBegin => "array-begin",
            Token::ArrayEnd => "array-end",
            Token::NameSeparator => "name-separator",
            Token::ValueSeparator => "value-separator",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::String(_) => "string",
            Token::Number(_) => "number",
        }
    }

    /// The text payload, for `String` and `Number` tokens.
    pub fn text(&self) -> Option<&TextSpan<'a, C>> {
        match self {
            Token::String(text) | Token::Number(text) => Some(text),
            _ => None,
        }
    }

    /// The literal form of a fixed token, e.g. `"{"` or `"null"`.
    pub fn literal(&self) -> Option<&'static str> {
        Some(match self {
            Token::ObjectBegin => "{",
            Token::ObjectEnd => "}",
            Token::ArrayBegin => "[",
            Token::ArrayEnd => "]",
            Token::NameSeparator => ":",
            Token::ValueSeparator => ",",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::String(_) | Token::Number(_) => return None,
        })
    }

    pub fn into_owned(self) -> Token<'static, C> {
        match self {
            Token::ObjectBegin => Token::ObjectBegin,
            Token::ObjectEnd => Token::ObjectEnd,
            Token::ArrayBegin => Token::ArrayBegin,
            Token::ArrayEnd => Token::ArrayEnd,
            Token::NameSeparator => Token::NameSeparator,
            Token::ValueSeparator => Token::ValueSeparator,
            Token::True => Token::True,
            Token::False => Token::False,
            Token::Null => Token::Null,
            Token::String(text) => Token::String(text.into_owned()),
            Token::Number(text) => Token::Number(text.into_owned()),
        }
    }
}

/// Renders the token as JSON text. Strings get their quotes back; since escapes
/// are kept raw, the output is the source text of the token.
impl<C: JsonChar> fmt::Display for Token<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(text) => write!(f, "\"{text}\""),
            Token::Number(text) => write!(f, "{text}"),
            token => f.write_str(token.literal().unwrap_or_default()),
        }
    }
}
