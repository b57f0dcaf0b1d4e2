use std::borrow::Cow;

/// A character element the tokenizer can scan.
///
/// JSON's grammar is entirely ASCII, so the scanner only ever needs to know
/// whether an element is a particular ASCII character. Everything else is
/// passed through as opaque content. Implemented for `u8` (UTF-8 code units),
/// `u16` (UTF-16 code units) and `char`.
pub trait JsonChar: Copy + Eq + std::fmt::Debug + 'static {
    /// The ASCII byte this element encodes, or `None` for anything outside
    /// the ASCII range.
    fn to_ascii(self) -> Option<u8>;

    /// The numeric value of this element, for error messages.
    fn code(self) -> u32;

    /// Decodes a run of elements into a string, replacing invalid sequences
    /// with U+FFFD.
    fn decode_lossy(text: &[Self]) -> Cow<'_, str>;

    fn is(self, b: u8) -> bool {
        self.to_ascii() == Some(b)
    }

    fn is_ascii_digit(self) -> bool {
        matches!(self.to_ascii(), Some(b'0'..=b'9'))
    }
}

impl JsonChar for u8 {
    fn to_ascii(self) -> Option<u8> {
        self.is_ascii().then_some(self)
    }

    fn code(self) -> u32 {
        u32::from(self)
    }

    fn decode_lossy(text: &[u8]) -> Cow<'_, str> {
        String::from_utf8_lossy(text)
    }
}

impl JsonChar for u16 {
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok().filter(u8::is_ascii)
    }

    fn code(self) -> u32 {
        u32::from(self)
    }

    fn decode_lossy(text: &[u16]) -> Cow<'_, str> {
        Cow::Owned(String::from_utf16_lossy(text))
    }
}

impl JsonChar for char {
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok().filter(u8::is_ascii)
    }

    fn code(self) -> u32 {
        u32::from(self)
    }

    fn decode_lossy(text: &[char]) -> Cow<'_, str> {
        Cow::Owned(text.iter().collect())
    }
}

// Note: char::is_ascii_whitespace is not available because some characters are not defined as
// whitespace character in RFC 8259. For example, U+000C FORM FEED is whitespace in Rust but
// it isn't in JSON.
pub(crate) fn is_whitespace<C: JsonChar>(c: C) -> bool {
    matches!(c.to_ascii(), Some(0x20 | 0xa | 0xd | 0x9))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn non_ascii_units_are_opaque() {
        assert_eq!(0xe9u8.to_ascii(), None);
        assert_eq!(0x122u16.to_ascii(), None);
        assert_eq!('é'.to_ascii(), None);
        assert_eq!(b'{'.to_ascii(), Some(b'{'));
        assert_eq!(u16::from(b'{').to_ascii(), Some(b'{'));
    }

    #[test]
    fn form_feed_is_not_whitespace() {
        assert!(!is_whitespace(0xcu8));
        assert!(is_whitespace(b'\t'));
        assert!(is_whitespace('\r'));
        assert!(is_whitespace(0x20u16));
    }

    #[test]
    fn lossy_decoding() {
        let wide: Vec<u16> = "héllo".encode_utf16().collect();
        assert_eq!(u16::decode_lossy(&wide), "héllo");
        assert_eq!(u8::decode_lossy(b"h\xffi"), "h\u{fffd}i");
        assert_eq!(char::decode_lossy(&['o', 'k']), "ok");
    }
}
