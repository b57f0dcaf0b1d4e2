use std::fmt;

use crate::chars::JsonChar;

/// A character offset and the corresponding line and column number.
///
/// Offsets count input elements, so for `u8` input they are byte offsets.
/// Lines and columns start at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub offset: u64,
    pub line: u64,
    pub col: u64,
}

impl Location {
    pub(crate) fn advance_by<C: JsonChar>(&mut self, c: C) {
        if c.is(b'\n') {
            self.col = 0;
            self.line += 1;
        } else {
            self.col += 1;
        }
        self.offset += 1;
    }
}

/// Why tokenization stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    /// The character (given as its code unit value) does not start any token.
    UnexpectedChar(u32),
    /// End of input was reached inside a string.
    UnterminatedString,
    /// The number grammar was violated. The payload says how.
    MalformedNumber(&'static str),
    /// A `t`, `f` or `n` was not followed by the rest of `true`, `false` or `null`.
    MalformedLiteral { expected: &'static str },
    /// Input ended in the middle of `true`, `false` or `null`.
    TruncatedLiteral { expected: &'static str },
    /// The visitor asked to stop.
    Aborted,
}

impl fmt::Display for TokenizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeErrorKind::UnexpectedChar(c) => write!(f, "Unexpected character {c:#x}"),
            TokenizeErrorKind::UnterminatedString => {
                f.write_str("Unexpected EOF: string is missing its closing quote")
            }
            TokenizeErrorKind::MalformedNumber(why) => write!(f, "Malformed number: {why}"),
            TokenizeErrorKind::MalformedLiteral { expected } => {
                write!(f, "Unexpected character while parsing '{expected}'")
            }
            TokenizeErrorKind::TruncatedLiteral { expected } => {
                write!(f, "Unexpected EOF while parsing '{expected}'")
            }
            TokenizeErrorKind::Aborted => f.write_str("Tokenization aborted by visitor"),
        }
    }
}

/// The error type used in this crate. Comes with Location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    kind: TokenizeErrorKind,
    location: Location,
}

impl TokenizeError {
    /// Creates a new [`TokenizeError`].
    pub fn new(kind: TokenizeErrorKind, location: Location) -> TokenizeError {
        TokenizeError { kind, location }
    }

    pub fn kind(&self) -> TokenizeErrorKind {
        self.kind
    }

    /// The location in the source document at which the error was encountered.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether the input itself was invalid, as opposed to the visitor stopping early.
    pub fn is_syntax_error(&self) -> bool {
        self.kind != TokenizeErrorKind::Aborted
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tokenize error at line:{}, col:{}: {}",
            self.location.line, self.location.col, self.kind,
        )
    }
}

impl std::error::Error for TokenizeError {}

/// A type alias for `Result<T, TokenizeError>`.
pub type TokenizeResult<T> = Result<T, TokenizeError>;
