use std::iter::Peekable;

use smallvec::SmallVec;

use crate::chars::JsonChar;
use crate::token::{OwnedText, TextSpan};

/// A forward-only position in the input, plus the strategy for pulling token
/// text out of it.
///
/// The strategy is fixed by the cursor type through the associated `Capture`
/// type. Contiguous inputs remember where a token started and hand out a
/// borrowed slice when it ends. Single-pass inputs can't go back, so they copy
/// each character into an owned buffer as it is consumed.
pub trait Cursor<'a> {
    type Char: JsonChar;

    /// The in-progress state of a text capture.
    type Capture;

    /// Whether this cursor produces [`TextSpan::Borrowed`] spans.
    const BORROWS: bool;

    fn peek(&mut self) -> Option<Self::Char>;

    /// Consumes and returns the next character.
    fn bump(&mut self) -> Option<Self::Char>;

    /// Starts capturing text at the current position.
    fn begin_capture(&self) -> Self::Capture;

    /// Notes that `c` was just consumed as part of the capture.
    fn record(&self, capture: &mut Self::Capture, c: Self::Char);

    /// Ends the capture at the current position.
    fn finish_capture(&self, capture: Self::Capture) -> TextSpan<'a, Self::Char>;
}

/// A cursor over a contiguous slice. Token text borrows from the slice.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, C> {
    input: &'a [C],
    pos: usize,
}

impl<'a, C: JsonChar> SliceCursor<'a, C> {
    pub fn new(input: &'a [C]) -> Self {
        SliceCursor { input, pos: 0 }
    }

    /// The part of the input that has not been consumed yet.
    pub fn remaining(&self) -> &'a [C] {
        &self.input[self.pos..]
    }
}

impl<'a, C: JsonChar> Cursor<'a> for SliceCursor<'a, C> {
    type Char = C;
    type Capture = usize;

    const BORROWS: bool = true;

    fn peek(&mut self) -> Option<C> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<C> {
        let c = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn begin_capture(&self) -> usize {
        self.pos
    }

    fn record(&self, _capture: &mut usize, _c: C) {}

    fn finish_capture(&self, start: usize) -> TextSpan<'a, C> {
        TextSpan::Borrowed(&self.input[start..self.pos])
    }
}

/// A cursor over a single-pass iterator. Token text is copied out.
pub struct StreamCursor<I: Iterator> {
    chars: Peekable<I>,
}

impl<I> StreamCursor<I>
where
    I: Iterator,
    I::Item: JsonChar,
{
    pub fn new<T: IntoIterator<IntoIter = I>>(it: T) -> Self {
        StreamCursor {
            chars: it.into_iter().peekable(),
        }
    }
}

impl<I> Cursor<'static> for StreamCursor<I>
where
    I: Iterator,
    I::Item: JsonChar,
{
    type Char = I::Item;
    type Capture = OwnedText<I::Item>;

    const BORROWS: bool = false;

    fn peek(&mut self) -> Option<I::Item> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<I::Item> {
        self.chars.next()
    }

    fn begin_capture(&self) -> Self::Capture {
        SmallVec::new()
    }

    fn record(&self, capture: &mut Self::Capture, c: I::Item) {
        capture.push(c);
    }

    fn finish_capture(&self, capture: Self::Capture) -> TextSpan<'static, I::Item> {
        TextSpan::Owned(capture)
    }
}

/// Sequence-like inputs that can be scanned without copying.
pub trait IntoCursor<'a> {
    type Cursor: Cursor<'a>;

    fn into_cursor(self) -> Self::Cursor;
}

impl<'a, C: JsonChar> IntoCursor<'a> for &'a [C] {
    type Cursor = SliceCursor<'a, C>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, C: JsonChar, const N: usize> IntoCursor<'a> for &'a [C; N] {
    type Cursor = SliceCursor<'a, C>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, C: JsonChar> IntoCursor<'a> for &'a Vec<C> {
    type Cursor = SliceCursor<'a, C>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a> IntoCursor<'a> for &'a str {
    type Cursor = SliceCursor<'a, u8>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_bytes())
    }
}

impl<'a> IntoCursor<'a> for &'a String {
    type Cursor = SliceCursor<'a, u8>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_bytes())
    }
}
