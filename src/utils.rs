use crate::Span;

/// Shrink `start..end` until neither end of `input[start..end]` is ASCII whitespace.
pub(crate) fn trim_span(input: &[u8], mut start: usize, mut end: usize) -> Span {
    while start < end && input[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && input[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    Span::new(start, end)
}

// having this be a macro is performance critical. rustc appears to be unable to optimize away code
// like this:
//
// ```rust
// fn noop(s: &str) {}
//
// noop(&format!("foo"));
// ```
//
// format!() + its string allocation still exists in resulting code
macro_rules! trace_log {
    ($($tt:tt)*) => {{
        #[cfg(debug_assertions)]
        crate::testutils::trace_log(&format!($($tt)*));
    }};
}

pub(crate) use trace_log;

#[test]
fn test_trim_span() {
    let input = b"  a b \n";
    assert_eq!(trim_span(input, 0, input.len()), Span::new(2, 5));
    assert_eq!(trim_span(input, 0, 2), Span::new(2, 2));
    assert_eq!(trim_span(input, 3, 4), Span::new(4, 4));
}
