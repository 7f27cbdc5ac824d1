use std::ops::Range;

/// Position/ boundary `start..end` in the input, as byte offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position (inclusive) of the span.
    pub start: usize,
    /// End position (exclusive) of the span.
    pub end: usize,
}

impl Span {
    /// Create a span covering `start..end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the bytes this span covers from `input`.
    ///
    /// Panics if the span is out of bounds for `input`.
    #[must_use]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start..span.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

#[test]
fn test_span_slice() {
    let span = Span::new(1, 4);
    assert_eq!(span.slice(b"<div>"), b"div");
    assert_eq!(span.len(), 3);
    assert_eq!(Range::from(span), 1..4);
}
