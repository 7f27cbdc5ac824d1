use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

use crate::{Error, HtmlString, Span};

/// An emitter is an object providing methods to the tokenizer to produce tokens.
///
/// The tokenizer calls exactly one method per token it recognizes, in input order. All byte slices
/// passed in are borrowed from the input and already trimmed where the token kind calls for it.
///
/// `span` always covers the payload itself. `offset` is the position a token is reported at, which
/// for attributes, text and comments lies before the payload:
///
/// * attributes: the end of the tag name for the first one, else the space that ended the previous one
/// * text: where the sub-scanner that found the text started, surrounding whitespace included
/// * comments: right after the `<!--`
///
/// Implement this trait to avoid the per-token allocations of [`DefaultEmitter`], or to react to
/// tokens directly instead of collecting them.
pub trait Emitter {
    /// The token type emitted by this emitter. This controls what type of values the
    /// [`crate::Tokenizer`] yields when used as an iterator.
    type Token;

    /// A start tag such as `<div` has been scanned. `name` is the tag name, `span` covers it.
    fn emit_tag_open(&mut self, name: &[u8], span: Span);

    /// An end tag such as `</div>` has been scanned. `name` is the tag name, `span` covers it.
    fn emit_tag_close(&mut self, name: &[u8], span: Span);

    /// An attribute of the most recent start tag.
    ///
    /// `value` is empty for boolean attributes such as `disabled`. Quotes around the value are
    /// passed through untouched. `span` runs from the start of `key` to the end of `value`.
    fn emit_attribute(&mut self, key: &[u8], value: &[u8], span: Span, offset: usize);

    /// A run of character data, never empty.
    fn emit_text(&mut self, text: &[u8], span: Span, offset: usize);

    /// The interior of a `<!-- ... -->` comment. May be empty.
    fn emit_comment(&mut self, comment: &[u8], span: Span, offset: usize);

    /// A sub-scanner ran into the end of the input.
    ///
    /// `unscanned` is the input from the start of the abandoned token up to the end of the input,
    /// `span` covers exactly that part. No further tokens follow.
    ///
    /// [`DefaultEmitter`] joins [`Error::as_str`] and `unscanned` with a `": "` separator to build
    /// [`ErrorToken::message`].
    fn emit_error(&mut self, error: Error, unscanned: &[u8], span: Span);

    /// After every dispatch step, the tokenizer calls this method to retrieve a new token that can
    /// be returned via the tokenizer's iterator interface.
    fn pop_token(&mut self) -> Option<Self::Token>;
}

/// A start or end tag, such as `<p>` or `</a>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// The tag's name, such as `"p"` or `"a"`.
    pub name: HtmlString,
    /// The span of the name.
    pub span: Span,
}

/// A `key` or `key=value` pair found after a start tag's name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribute {
    /// The attribute name, trimmed of surrounding whitespace. Never empty.
    pub key: HtmlString,
    /// The attribute value including any quotes. Empty for boolean attributes.
    pub value: HtmlString,
    /// Runs from the start of the key to the end of the value.
    pub span: Span,
    /// Offset of the delimiter in front of the attribute, see [`Emitter`].
    pub offset: usize,
}

impl Attribute {
    /// Whether this attribute was written without `=value`, like `disabled`.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.value.is_empty()
    }

    /// The value with one pair of matching surrounding quotes removed.
    ///
    /// ```
    /// let tokens = tagscan::tokenize(r#"<a href="/home" x='1' y=2>"#);
    /// let values: Vec<_> = tokens
    ///     .iter()
    ///     .filter_map(|token| match token {
    ///         tagscan::Token::Attribute(attr) => Some(attr.unquoted_value().to_vec()),
    ///         _ => None,
    ///     })
    ///     .collect();
    /// assert_eq!(values, [&b"/home"[..], b"1", b"2"]);
    /// ```
    #[must_use]
    pub fn unquoted_value(&self) -> &[u8] {
        match self.value.as_slice() {
            [open @ (b'"' | b'\''), inner @ .., close] if open == close => inner,
            value => value,
        }
    }
}

/// Character data between tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    /// The text with surrounding whitespace trimmed. Never empty.
    pub value: HtmlString,
    /// The span of the trimmed text.
    pub span: Span,
    /// Where the untrimmed run of text started.
    pub offset: usize,
}

/// A `<!-- ... -->` comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    /// The interior of the comment with surrounding whitespace trimmed.
    pub value: HtmlString,
    /// The span of the trimmed interior.
    pub span: Span,
    /// Offset right after the `<!--`.
    pub offset: usize,
}

/// An error token. See [`Error`] for the possible causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToken {
    /// Which sub-scanner gave up.
    pub error: Error,
    /// The diagnostic message: the error's prefix, `": "`, and the unscanned input.
    pub message: HtmlString,
    /// From the start of the abandoned token to the end of the input.
    pub span: Span,
}

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// See [`Token::TagOpen`].
    TagOpen,
    /// See [`Token::TagClose`].
    TagClose,
    /// See [`Token::Attribute`].
    Attribute,
    /// See [`Token::Text`].
    Text,
    /// See [`Token::Comment`].
    Comment,
    /// See [`Token::Error`].
    Error,
}

impl TokenKind {
    /// The name used when rendering tokens.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::TagOpen => "TagOpen",
            TokenKind::TagClose => "TagClose",
            TokenKind::Attribute => "Attribute",
            TokenKind::Text => "Text",
            TokenKind::Comment => "Comment",
            TokenKind::Error => "Error",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// The token type used by default. You can define your own token type by implementing the
/// [`crate::Emitter`] trait and using [`crate::Tokenizer::new_with_emitter`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// A start tag, without its attributes. Those follow as separate tokens.
    TagOpen(Tag),
    /// An end tag.
    TagClose(Tag),
    /// An attribute of the preceding start tag.
    Attribute(Attribute),
    /// Character data between tags.
    Text(Text),
    /// A comment.
    Comment(Comment),
    /// The input ended in the middle of a token. This is always the last token.
    Error(ErrorToken),
}

impl Token {
    /// The kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::TagOpen(_) => TokenKind::TagOpen,
            Token::TagClose(_) => TokenKind::TagClose,
            Token::Attribute(_) => TokenKind::Attribute,
            Token::Text(_) => TokenKind::Text,
            Token::Comment(_) => TokenKind::Comment,
            Token::Error(_) => TokenKind::Error,
        }
    }

    /// The span of the token's payload in the input.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Token::TagOpen(tag) | Token::TagClose(tag) => tag.span,
            Token::Attribute(attr) => attr.span,
            Token::Text(text) => text.span,
            Token::Comment(comment) => comment.span,
            Token::Error(e) => e.span,
        }
    }

    /// Byte offset at which the token begins. This is the offset tokens are rendered with.
    ///
    /// Tags and errors begin where their span does. See [`Emitter`] for the other kinds.
    #[must_use]
    pub fn start_offset(&self) -> usize {
        match self {
            Token::TagOpen(tag) | Token::TagClose(tag) => tag.span.start,
            Token::Attribute(attr) => attr.offset,
            Token::Text(text) => text.offset,
            Token::Comment(comment) => comment.offset,
            Token::Error(e) => e.span.start,
        }
    }

    /// Byte offset at which scanning gave up. Only set for errors.
    #[must_use]
    pub fn end_offset(&self) -> Option<usize> {
        match self {
            Token::Error(e) => Some(e.span.end),
            _ => None,
        }
    }

    /// The attribute name. Only set for attributes.
    #[must_use]
    pub fn key(&self) -> Option<&[u8]> {
        match self {
            Token::Attribute(attr) => Some(attr.key.as_slice()),
            _ => None,
        }
    }

    /// The tag name, attribute value, text, comment or error message.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        match self {
            Token::TagOpen(tag) | Token::TagClose(tag) => tag.name.as_slice(),
            Token::Attribute(attr) => attr.value.as_slice(),
            Token::Text(text) => text.value.as_slice(),
            Token::Comment(comment) => comment.value.as_slice(),
            Token::Error(e) => e.message.as_slice(),
        }
    }
}

impl Display for Token {
    /// One line per token:
    ///
    /// * `TagOpen - div [1]`
    /// * `Attribute - class="x" [4]`
    /// * `Error - SyntaxError — StartToken: div [1 - 4]`
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Attribute(attr) => write!(
                f,
                "{} - {}={} [{}]",
                self.kind(),
                attr.key,
                attr.value,
                attr.offset
            ),
            Token::Error(e) => write!(
                f,
                "{} - {} [{} - {}]",
                self.kind(),
                e.message,
                e.span.start,
                e.span.end
            ),
            _ => write!(
                f,
                "{} - {} [{}]",
                self.kind(),
                String::from_utf8_lossy(self.value()),
                self.start_offset()
            ),
        }
    }
}

/// The default implementation of [`crate::Emitter`], used to produce ("emit") tokens.
///
/// Tokens are copied out of the input and queued until the tokenizer pops them.
#[derive(Debug, Default)]
pub struct DefaultEmitter {
    emitted_tokens: VecDeque<Token>,
}

impl DefaultEmitter {
    /// Take all tokens that have been emitted but not popped yet, in input order.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.emitted_tokens.into()
    }

    fn emit_token(&mut self, token: Token) {
        self.emitted_tokens.push_back(token);
    }
}

impl Emitter for DefaultEmitter {
    type Token = Token;

    fn emit_tag_open(&mut self, name: &[u8], span: Span) {
        self.emit_token(Token::TagOpen(Tag {
            name: name.into(),
            span,
        }));
    }

    fn emit_tag_close(&mut self, name: &[u8], span: Span) {
        self.emit_token(Token::TagClose(Tag {
            name: name.into(),
            span,
        }));
    }

    fn emit_attribute(&mut self, key: &[u8], value: &[u8], span: Span, offset: usize) {
        debug_assert!(!key.is_empty());
        self.emit_token(Token::Attribute(Attribute {
            key: key.into(),
            value: value.into(),
            span,
            offset,
        }));
    }

    fn emit_text(&mut self, text: &[u8], span: Span, offset: usize) {
        debug_assert!(!text.is_empty());
        self.emit_token(Token::Text(Text {
            value: text.into(),
            span,
            offset,
        }));
    }

    fn emit_comment(&mut self, comment: &[u8], span: Span, offset: usize) {
        self.emit_token(Token::Comment(Comment {
            value: comment.into(),
            span,
            offset,
        }));
    }

    fn emit_error(&mut self, error: Error, unscanned: &[u8], span: Span) {
        let mut message = HtmlString::from(error.as_str());
        message.extend_from_slice(b": ");
        message.extend_from_slice(unscanned);
        self.emit_token(Token::Error(ErrorToken {
            error,
            message,
            span,
        }));
    }

    fn pop_token(&mut self) -> Option<Self::Token> {
        self.emitted_tokens.pop_front()
    }
}

#[test]
fn test_render_tokens() {
    let mut emitter = DefaultEmitter::default();
    emitter.emit_tag_open(b"div", Span::new(1, 4));
    emitter.emit_attribute(b"class", b"\"x\"", Span::new(5, 14), 4);
    emitter.emit_attribute(b"disabled", b"", Span::new(15, 23), 14);
    emitter.emit_text(b"hi", Span::new(24, 26), 24);
    emitter.emit_comment(b"note", Span::new(31, 35), 30);
    emitter.emit_tag_close(b"div", Span::new(41, 44));
    emitter.emit_error(Error::EofInText, b"tail", Span::new(45, 49));

    let rendered: Vec<String> = emitter
        .into_tokens()
        .iter()
        .map(Token::to_string)
        .collect();

    assert_eq!(
        rendered,
        [
            "TagOpen - div [1]",
            "Attribute - class=\"x\" [4]",
            "Attribute - disabled= [14]",
            "Text - hi [24]",
            "Comment - note [30]",
            "TagClose - div [41]",
            "Error - SyntaxError — ValueToken: tail [45 - 49]",
        ]
    );
}

#[test]
fn test_flat_accessors() {
    let attr = Token::Attribute(Attribute {
        key: "disabled".into(),
        value: HtmlString::default(),
        span: Span::new(3, 11),
        offset: 2,
    });
    assert_eq!(attr.kind(), TokenKind::Attribute);
    assert_eq!(attr.key(), Some(&b"disabled"[..]));
    assert_eq!(attr.value(), b"");
    assert_eq!(attr.span().start, 3);
    assert_eq!(attr.start_offset(), 2);
    assert_eq!(attr.end_offset(), None);

    let mut emitter = DefaultEmitter::default();
    emitter.emit_error(Error::EofInStartTagName, b"div", Span::new(1, 4));
    let error = emitter.pop_token().unwrap();
    assert_eq!(error.kind(), TokenKind::Error);
    assert_eq!(error.key(), None);
    assert_eq!(error.end_offset(), Some(4));
    assert_eq!(error.value(), "SyntaxError — StartToken: div".as_bytes());
    assert!(emitter.pop_token().is_none());
}
