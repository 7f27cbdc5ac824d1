/// An object that can be converted into a [`Cursor`].
///
/// For example, any string or byte slice can be converted into a `Cursor`, such that
/// `Tokenizer::new("mystring")` and `Tokenizer::new(&b"foo".to_vec())` work.
///
/// The whole input has to be in memory before scanning starts.
pub trait Readable<'a> {
    /// Convert self to a cursor positioned at the start of the input.
    fn to_cursor(self) -> Cursor<'a>;
}

impl<'a> Readable<'a> for Cursor<'a> {
    fn to_cursor(self) -> Cursor<'a> {
        self
    }
}

impl<'a> Readable<'a> for &'a str {
    fn to_cursor(self) -> Cursor<'a> {
        Cursor::new(self.as_bytes())
    }
}

impl<'a> Readable<'a> for &'a String {
    fn to_cursor(self) -> Cursor<'a> {
        Cursor::new(self.as_bytes())
    }
}

impl<'a> Readable<'a> for &'a Vec<u8> {
    fn to_cursor(self) -> Cursor<'a> {
        Cursor::new(self.as_slice())
    }
}

impl<'a> Readable<'a> for &'a [u8] {
    fn to_cursor(self) -> Cursor<'a> {
        Cursor::new(self)
    }
}

/// A read-only view of the input with a scan position and a mark.
///
/// The position only moves forwards, except for the single rollback the comment scanner performs
/// when a `<!--` turns out to be unterminated. The mark records where the token that is currently
/// being built started.
///
/// ```rust
/// use tagscan::Readable;
///
/// let cursor = "<p>hi</p>".to_cursor();
/// assert_eq!(cursor.position(), 0);
/// assert_eq!(cursor.len(), 9);
/// assert!(!cursor.is_eof());
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
    mark: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Cursor {
            input,
            position: 0,
            mark: 0,
        }
    }

    /// The entire input, independent of the current position.
    #[must_use]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Current scan offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Offset at which the in-progress token started.
    #[must_use]
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Length of the input in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Whether the position has reached the end of the input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    pub(crate) fn set_mark(&mut self) {
        self.mark = self.position;
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    pub(crate) fn starts_with(&self, s: &[u8]) -> bool {
        self.input
            .get(self.position..)
            .map_or(false, |rest| rest.starts_with(s))
    }

    pub(crate) fn advance(&mut self, by: usize) {
        self.advance_to(self.position + by);
    }

    pub(crate) fn advance_to(&mut self, offset: usize) {
        debug_assert!(offset >= self.position);
        self.position = offset.min(self.input.len());
    }

    /// Move the position backwards. Only the comment scanner does this, and never past the `<`
    /// that started the comment attempt.
    pub(crate) fn rewind_to(&mut self, offset: usize) {
        debug_assert!(offset <= self.position);
        self.position = offset;
    }

    /// Advance to the next byte contained in `needle` and return it without consuming it.
    ///
    /// If no such byte exists, the position is moved to the end of the input and `None` is
    /// returned.
    pub(crate) fn skip_until(&mut self, needle: &[u8]) -> Option<u8> {
        let rest = self.input.get(self.position..).unwrap_or_default();
        match fast_find(needle, rest) {
            Some(i) => {
                self.position += i;
                Some(rest[i])
            }
            None => {
                self.position = self.input.len();
                None
            }
        }
    }

    /// Find the absolute offset of the next occurrence of `s`, starting at the current position.
    /// Does not move the position.
    pub(crate) fn find(&self, s: &[u8]) -> Option<usize> {
        let rest = self.input.get(self.position..)?;
        fast_find_str(s, rest).map(|i| self.position + i)
    }
}

fn fast_find(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    #[cfg(feature = "memchr")]
    if needle.len() == 3 {
        return memchr::memchr3(needle[0], needle[1], needle[2], haystack);
    } else if needle.len() == 2 {
        return memchr::memchr2(needle[0], needle[1], haystack);
    } else if needle.len() == 1 {
        return memchr::memchr(needle[0], haystack);
    }

    haystack.iter().position(|b| needle.contains(b))
}

fn fast_find_str(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    #[cfg(feature = "memchr")]
    return memchr::memmem::find(haystack, needle);

    #[cfg(not(feature = "memchr"))]
    {
        if needle.is_empty() {
            return Some(0);
        }
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }
}

#[test]
fn test_skip_until() {
    let mut cursor = "abc>def".to_cursor();
    assert_eq!(cursor.skip_until(b" >"), Some(b'>'));
    assert_eq!(cursor.position(), 3);
    // already sitting on a needle byte: does not move
    assert_eq!(cursor.skip_until(b">"), Some(b'>'));
    assert_eq!(cursor.position(), 3);
    cursor.advance(1);
    assert_eq!(cursor.skip_until(b"<"), None);
    assert!(cursor.is_eof());
    assert_eq!(cursor.position(), 7);
}

#[test]
fn test_find_and_rewind() {
    let mut cursor = "x<!-- a -->".to_cursor();
    cursor.advance(1);
    assert!(cursor.starts_with(b"<!--"));
    assert_eq!(cursor.find(b"-->"), Some(8));
    cursor.advance(4);
    cursor.rewind_to(2);
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.peek(), Some(b'!'));
}

#[test]
fn test_fast_find_matches_linear_scan() {
    let haystack = b"key=\"v a l\" other>";
    for needle in [&b" "[..], b" >", b" =>", b" =\"'>"] {
        assert_eq!(
            fast_find(needle, haystack),
            haystack.iter().position(|b| needle.contains(b)),
        );
    }
}
