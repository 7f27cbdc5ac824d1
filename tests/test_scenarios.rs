use std::convert::Infallible;

use pretty_assertions::assert_eq;

use tagscan::{tokenize, Emitter, Error, Span, Token, TokenKind, Tokenizer};

const DOCUMENT: &str = concat!(
    "<html><head><style>p{}</style></head>",
    "<body class=\"x\" hidden><!-- c --><p>Hi <b>there</b></p>",
    "<input type=text disabled></body></html>",
);

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(Token::kind).collect()
}

/// Every token's payload must be found in the input at the position its span claims.
fn assert_spans_point_into_input(input: &[u8], tokens: &[Token]) {
    let mut last_end = 0;
    for token in tokens {
        let span = token.span();
        assert!(span.start <= span.end && span.end <= input.len(), "{:?}", token);
        assert!(last_end <= span.start, "{:?} overlaps previous token", token);
        last_end = span.end;

        match token {
            Token::Attribute(attr) => {
                assert!(input[span.start..].starts_with(&attr.key), "{:?}", token);
                assert!(input[..span.end].ends_with(&attr.value), "{:?}", token);
            }
            Token::Error(e) => {
                assert_eq!(e.span.end, input.len());
                assert!(e.message.ends_with(span.slice(input)));
            }
            _ => assert_eq!(span.slice(input), token.value(), "{:?}", token),
        }
    }
}

#[test]
fn test_document() {
    let tokens = tokenize(DOCUMENT);
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();

    assert_eq!(
        rendered,
        [
            "TagOpen - html [1]",
            "TagOpen - head [7]",
            "TagOpen - style [13]",
            "TagClose - style [24]",
            "TagClose - head [32]",
            "TagOpen - body [38]",
            "Attribute - class=\"x\" [42]",
            "Attribute - hidden= [52]",
            "Comment - c [64]",
            "TagOpen - p [71]",
            "Text - Hi [73]",
            "TagOpen - b [77]",
            "Text - there [79]",
            "TagClose - b [86]",
            "TagClose - p [90]",
            "TagOpen - input [93]",
            "Attribute - type=text [98]",
            "Attribute - disabled= [108]",
            "TagClose - body [120]",
            "TagClose - html [127]",
        ]
    );
    assert_spans_point_into_input(DOCUMENT.as_bytes(), &tokens);
}

#[test]
fn test_every_prefix_ends_in_at_most_one_error() {
    for len in 0..=DOCUMENT.len() {
        let input = &DOCUMENT.as_bytes()[..len];
        let tokens = tokenize(input);

        let errors = tokens
            .iter()
            .filter(|token| token.kind() == TokenKind::Error)
            .count();
        assert!(errors <= 1, "{} errors for prefix {}", errors, len);
        if errors == 1 {
            assert_eq!(tokens.last().and_then(Token::end_offset), Some(len));
        }

        assert_spans_point_into_input(input, &tokens);
    }
}

#[test]
fn test_iterator_matches_tokenize() {
    let collected: Vec<Token> = Tokenizer::new(DOCUMENT).collect();
    assert_eq!(collected, tokenize(DOCUMENT));
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<option selected>");
    match &tokens[1] {
        Token::Attribute(attr) => {
            assert_eq!(attr.key, "selected");
            assert!(attr.is_boolean());
        }
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_leading_comment_has_no_text() {
    assert_eq!(
        kinds(&tokenize("<!-- note -->")),
        [TokenKind::Comment]
    );
}

#[test]
fn test_truncated_name_is_a_single_error() {
    let tokens = tokenize("<div");
    assert_eq!(kinds(&tokens), [TokenKind::Error]);
    assert_eq!(tokens[0].start_offset(), 1);
    assert_eq!(tokens[0].end_offset(), Some(4));
    match &tokens[0] {
        Token::Error(e) => assert_eq!(e.error, Error::EofInStartTagName),
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_adjacent_comments() {
    let tokens = tokenize("<!-- a --><!-- b -->");
    let values: Vec<&[u8]> = tokens.iter().map(Token::value).collect();
    assert_eq!(kinds(&tokens), [TokenKind::Comment, TokenKind::Comment]);
    assert_eq!(values, [&b"a"[..], b"b"]);
}

#[test]
fn test_rendered_tokens_rescan_the_same() {
    // a well-formed document without comments or raw-text elements survives being rebuilt from
    // its own tokens
    let input = "<ul id=list><li>one</li><li class=x>two</li></ul>";
    let tokens = tokenize(input);

    let mut rebuilt = String::new();
    let mut in_tag = false;
    for token in &tokens {
        if in_tag && !matches!(token, Token::Attribute(_)) {
            rebuilt.push('>');
            in_tag = false;
        }
        match token {
            Token::TagOpen(tag) => {
                rebuilt.push_str(&format!("<{}", tag.name));
                in_tag = true;
            }
            Token::Attribute(attr) => rebuilt.push_str(&format!(" {}={}", attr.key, attr.value)),
            Token::Text(text) => rebuilt.push_str(&text.value.to_string()),
            Token::TagClose(tag) => rebuilt.push_str(&format!("</{}>", tag.name)),
            other => panic!("unexpected token {:?}", other),
        }
    }

    assert_eq!(rebuilt, input);
    assert_eq!(tokenize(&rebuilt), tokens);
}

/// Counts tags without copying anything out of the input.
#[derive(Default)]
struct TagCounter {
    open: usize,
    close: usize,
    spans: Vec<Span>,
}

impl Emitter for TagCounter {
    type Token = Infallible;

    fn emit_tag_open(&mut self, _name: &[u8], span: Span) {
        self.open += 1;
        self.spans.push(span);
    }

    fn emit_tag_close(&mut self, _name: &[u8], span: Span) {
        self.close += 1;
        self.spans.push(span);
    }

    fn emit_attribute(&mut self, _key: &[u8], _value: &[u8], _span: Span, _offset: usize) {}

    fn emit_text(&mut self, _text: &[u8], _span: Span, _offset: usize) {}

    fn emit_comment(&mut self, _comment: &[u8], _span: Span, _offset: usize) {}

    fn emit_error(&mut self, _error: Error, _unscanned: &[u8], _span: Span) {}

    fn pop_token(&mut self) -> Option<Self::Token> {
        None
    }
}

#[test]
fn test_custom_emitter() {
    let counter = Tokenizer::new_with_emitter(DOCUMENT, TagCounter::default()).finish();
    assert_eq!(counter.open, 7);
    assert_eq!(counter.close, 6);
    assert_eq!(counter.spans.first(), Some(&Span::new(1, 5)));
}
