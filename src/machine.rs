//! The sub-scanners the dispatch loop in `tokenizer.rs` hands control to.
//!
//! Each of them starts at the current cursor position, moves the cursor forwards and reports zero
//! or more tokens to the emitter. A sub-scanner that runs into the end of the input reports one
//! error and leaves the cursor at the end, which ends the dispatch loop.
use crate::state::next_state;
use crate::utils::{trace_log, trim_span};
use crate::{Emitter, Error, Span, State, Tokenizer};

pub(crate) const COMMENT_OPEN: &[u8] = b"<!--";
pub(crate) const COMMENT_CLOSE: &[u8] = b"-->";

const TAG_NAME_DELIMITERS: &[u8] = b" >";
const ATTRIBUTE_DELIMITERS: &[u8] = b" =\"'>";
const TEXT_DELIMITERS: &[u8] = b"<>";

impl<'a, E: Emitter> Tokenizer<'a, E> {
    /// Scan the name of a start tag. The cursor is right after the `<`.
    ///
    /// Returns `false` if the input ended before the name did.
    pub(crate) fn scan_start_tag(&mut self) -> bool {
        self.cursor.set_mark();
        if self.cursor.skip_until(TAG_NAME_DELIMITERS).is_none() {
            self.emit_eof_error(Error::EofInStartTagName);
            return false;
        }

        let span = Span::new(self.cursor.mark(), self.cursor.position());
        let name = span.slice(self.cursor.input());
        trace_log!("tag open: {:?}", String::from_utf8_lossy(name));
        self.emitter.emit_tag_open(name, span);
        self.switch_state_after_tag(name, false);
        true
    }

    /// Scan the name of an end tag up to and including the closing `>`. The cursor is right after
    /// the `</`.
    pub(crate) fn scan_end_tag(&mut self) {
        self.cursor.set_mark();
        let delimiter = match self.cursor.skip_until(TAG_NAME_DELIMITERS) {
            Some(delimiter) => delimiter,
            None => return self.emit_eof_error(Error::EofInEndTag),
        };

        let span = Span::new(self.cursor.mark(), self.cursor.position());
        if delimiter != b'>' && self.cursor.skip_until(b">").is_none() {
            return self.emit_eof_error(Error::EofInEndTag);
        }

        let name = span.slice(self.cursor.input());
        trace_log!("tag close: {:?}", String::from_utf8_lossy(name));
        self.emitter.emit_tag_close(name, span);
        self.switch_state_after_tag(name, true);
        self.cursor.advance(1);
    }

    fn switch_state_after_tag(&mut self, name: &[u8], is_end_tag: bool) {
        self.state = if is_end_tag && self.verbatim_raw_text {
            State::Data
        } else {
            next_state(name)
        };

        if self.state.is_raw_text() {
            self.raw_text_end.truncate(2);
            self.raw_text_end.extend_from_slice(name);
        }
    }

    /// Scan `key` and `key=value` pairs up to and including the `>` that closes a start tag. The
    /// cursor is on the delimiter that ended the tag name.
    pub(crate) fn scan_attributes(&mut self) {
        self.cursor.set_mark();
        let mut offset = self.cursor.position();
        let mut key = None;
        let mut quote = None;

        loop {
            let c = match self.cursor.skip_until(ATTRIBUTE_DELIMITERS) {
                Some(c) => c,
                None => return self.emit_eof_error(Error::EofInAttributes),
            };
            let quoted = self.quote_aware_attributes && quote.is_some();

            match c {
                b'>' if !quoted => {
                    self.flush_attribute(&mut key, &mut offset);
                    self.cursor.advance(1);
                    return;
                }
                b' ' if !quoted => {
                    self.flush_attribute(&mut key, &mut offset);
                    self.cursor.advance(1);
                    self.cursor.set_mark();
                    continue;
                }
                b'=' if quote.is_none() => {
                    let span = trim_span(
                        self.cursor.input(),
                        self.cursor.mark(),
                        self.cursor.position(),
                    );
                    key = Some(span).filter(|span| !span.is_empty());
                    self.cursor.advance(1);
                    self.cursor.set_mark();
                    continue;
                }
                b'"' | b'\'' => {
                    quote = match quote {
                        None => Some(c),
                        Some(open) if open == c || !self.quote_aware_attributes => None,
                        open => open,
                    };
                }
                _ => (),
            }

            self.cursor.advance(1);
        }
    }

    /// Emit whatever accumulated since the mark, either as the value of the pending key or as a
    /// key of its own.
    ///
    /// Once an attribute is emitted, the delimiter under the cursor becomes the offset of the next
    /// one.
    fn flush_attribute(&mut self, key: &mut Option<Span>, offset: &mut usize) {
        let input = self.cursor.input();
        let accumulated = trim_span(input, self.cursor.mark(), self.cursor.position());

        match key.take() {
            Some(key) => {
                let end = if accumulated.is_empty() {
                    key.end
                } else {
                    accumulated.end
                };
                self.emitter.emit_attribute(
                    key.slice(input),
                    accumulated.slice(input),
                    Span::new(key.start, end),
                    *offset,
                );
            }
            None if !accumulated.is_empty() => {
                self.emitter
                    .emit_attribute(accumulated.slice(input), b"", accumulated, *offset);
            }
            None => return,
        }

        *offset = self.cursor.position();
    }

    /// Scan character data up to the next `<`, handing over to the comment scanner if that `<`
    /// opens a comment.
    pub(crate) fn scan_text(&mut self) {
        self.cursor.set_mark();
        let offset = self.cursor.position();

        loop {
            match self.cursor.skip_until(TEXT_DELIMITERS) {
                None => return self.emit_eof_error(Error::EofInText),
                Some(b'>') => {
                    // a stray `>` never ends up in a text token
                    self.cursor.advance(1);
                    self.cursor.set_mark();
                }
                Some(_) => break,
            }
        }

        if self.state.is_raw_text() {
            trace_log!("text: dropped in raw text mode");
            return;
        }

        let lt = self.cursor.position();
        if !self.scan_comment() {
            let span = trim_span(self.cursor.input(), self.cursor.mark(), lt);
            self.emit_text(span, offset);
        }
    }

    /// Try to scan a comment starting at the `<` under the cursor.
    ///
    /// On success, any text between the mark and the `<` is emitted first, reported at the mark. If
    /// the comment is never closed, nothing is emitted and the cursor is left right after the `<`.
    fn scan_comment(&mut self) -> bool {
        if !self.cursor.starts_with(COMMENT_OPEN) {
            return false;
        }

        let lt = self.cursor.position();
        self.cursor.advance(COMMENT_OPEN.len());
        let interior_start = self.cursor.position();

        let close = match self.cursor.find(COMMENT_CLOSE) {
            Some(close) => close,
            None => {
                trace_log!("comment: unterminated, rolling back to {}", lt + 1);
                self.cursor.rewind_to(lt + 1);
                return false;
            }
        };

        let input = self.cursor.input();
        self.emit_text(trim_span(input, self.cursor.mark(), lt), self.cursor.mark());
        let span = trim_span(input, interior_start, close);
        self.emitter
            .emit_comment(span.slice(input), span, interior_start);
        self.cursor.advance_to(close + COMMENT_CLOSE.len());
        true
    }

    /// Scan the body of a raw-text element verbatim, up to its end tag.
    pub(crate) fn scan_raw_text(&mut self) {
        self.cursor.set_mark();
        match self.cursor.find(&self.raw_text_end) {
            Some(end) => {
                let span = trim_span(self.cursor.input(), self.cursor.mark(), end);
                self.emit_text(span, self.cursor.mark());
                self.cursor.advance_to(end);
            }
            None => {
                self.cursor.advance_to(self.cursor.len());
                self.emit_eof_error(Error::EofInText);
            }
        }
    }

    fn emit_text(&mut self, span: Span, offset: usize) {
        if !span.is_empty() {
            self.emitter
                .emit_text(span.slice(self.cursor.input()), span, offset);
        }
    }

    fn emit_eof_error(&mut self, error: Error) {
        debug_assert!(self.cursor.is_eof());
        let span = Span::new(self.cursor.mark(), self.cursor.position());
        trace_log!("error: {} at {:?}", error, span);
        self.emitter
            .emit_error(error, span.slice(self.cursor.input()), span);
    }
}

#[cfg(test)]
fn render(tokens: &[crate::Token]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

#[test]
fn test_stray_gt_is_not_text() {
    // the text is still reported where the text scanner started
    assert_eq!(
        render(&crate::tokenize("a > b<i>")),
        ["Text - b [0]", "TagOpen - i [6]"]
    );
}

#[test]
fn test_end_tag_with_trailing_space() {
    assert_eq!(
        render(&crate::tokenize("</p  >x<b>")),
        ["TagClose - p [2]", "Text - x [6]", "TagOpen - b [8]"]
    );
}

#[test]
fn test_end_tag_unterminated_after_name() {
    assert_eq!(
        render(&crate::tokenize("</p x")),
        ["Error - SyntaxError — EndToken: p x [2 - 5]"]
    );
}

#[test]
fn test_equals_with_empty_value() {
    assert_eq!(
        render(&crate::tokenize("<a b= c>")),
        ["TagOpen - a [1]", "Attribute - b= [2]", "Attribute - c= [5]"]
    );
}

#[test]
fn test_empty_key_falls_back_to_value() {
    assert_eq!(
        render(&crate::tokenize("<a =x>")),
        ["TagOpen - a [1]", "Attribute - x= [2]"]
    );
}

#[test]
fn test_attribute_offset_is_preceding_delimiter() {
    use crate::Token;

    let tokens = crate::tokenize("<a  b c=d>");
    assert_eq!(
        render(&tokens),
        ["TagOpen - a [1]", "Attribute - b= [2]", "Attribute - c=d [5]"]
    );

    match &tokens[2] {
        Token::Attribute(attr) => {
            assert_eq!(attr.offset, 5);
            assert_eq!((attr.span.start, attr.span.end), (6, 9));
        }
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_attribute_span_covers_key_and_value() {
    use crate::Token;

    let tokens = crate::tokenize("<a  href=\"/\" >");
    match &tokens[1] {
        Token::Attribute(attr) => {
            assert_eq!(attr.key, "href");
            assert_eq!(attr.value, "\"/\"");
            assert_eq!((attr.span.start, attr.span.end), (4, 12));
            assert_eq!(attr.offset, 2);
        }
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_quoted_gt_ends_tag_by_default() {
    assert_eq!(
        render(&crate::tokenize("<a t=\"x>y\">z<b>")),
        [
            "TagOpen - a [1]",
            "Attribute - t=\"x [2]",
            "Text - z [8]",
            "TagOpen - b [13]"
        ]
    );
}

#[test]
fn test_quote_aware_attributes() {
    let mut tokenizer = Tokenizer::new("<a t=\"x> y\" u='v'>");
    tokenizer.quote_aware_attributes(true);
    assert_eq!(
        render(&tokenizer.collect::<Vec<_>>()),
        [
            "TagOpen - a [1]",
            "Attribute - t=\"x> y\" [2]",
            "Attribute - u='v' [11]"
        ]
    );
}

#[test]
fn test_text_offset_includes_leading_whitespace() {
    use crate::Token;

    let tokens = crate::tokenize("<span> World </span>");
    assert_eq!(
        render(&tokens),
        ["TagOpen - span [1]", "Text - World [6]", "TagClose - span [15]"]
    );

    match &tokens[1] {
        Token::Text(text) => {
            assert_eq!(text.offset, 6);
            assert_eq!((text.span.start, text.span.end), (7, 12));
        }
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_unterminated_comment_rolls_back() {
    assert_eq!(
        render(&crate::tokenize("a<!-- x")),
        ["Text - a [0]", "Error - SyntaxError — ValueToken: !-- x [2 - 7]"]
    );
}

#[test]
fn test_text_before_comment_is_flushed() {
    assert_eq!(
        render(&crate::tokenize("<p>one <!-- two --> three</p>")),
        [
            "TagOpen - p [1]",
            "Text - one [3]",
            "Comment - two [11]",
            "Text - three [19]",
            "TagClose - p [27]"
        ]
    );
}

#[test]
fn test_comment_offset_is_after_open_marker() {
    use crate::Token;

    let tokens = crate::tokenize("x <!-- c --> y<b>");
    assert_eq!(
        render(&tokens),
        [
            "Text - x [0]",
            "Comment - c [6]",
            "Text - y [12]",
            "TagOpen - b [15]"
        ]
    );

    match &tokens[1] {
        Token::Comment(comment) => assert_eq!((comment.span.start, comment.span.end), (7, 8)),
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_empty_comment() {
    assert_eq!(render(&crate::tokenize("<!---->")), ["Comment -  [4]"]);
}
