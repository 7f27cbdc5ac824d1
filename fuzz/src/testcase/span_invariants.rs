use tagscan::{Token, Tokenizer};

/// Validates span invariants for all tokens produced from the input.
///
/// This fuzzer checks that:
/// 1. Spans have valid bounds (start <= end <= input.len())
/// 2. Spans point to the token's payload in the input
/// 3. Spans are non-overlapping and ordered
/// 4. There is at most one error, it is the last token and it ends at the end of the input
pub fn validate_span_invariants(input: &[u8]) {
    for verbatim_raw_text in [false, true] {
        let mut tokenizer = Tokenizer::new(input);
        tokenizer.verbatim_raw_text(verbatim_raw_text);

        let mut last_end = 0;
        let mut seen_error = false;

        for token in tokenizer {
            assert!(!seen_error, "token after error: {:?}", token);
            validate_token_span(&token, input, &mut last_end);
            seen_error = matches!(token, Token::Error(_));
        }
    }
}

fn validate_token_span(token: &Token, input: &[u8], last_end: &mut usize) {
    let span = token.span();
    assert!(
        span.start <= span.end && span.end <= input.len(),
        "{:?} has out of bounds span {}..{} (input length {})",
        token,
        span.start,
        span.end,
        input.len()
    );
    assert!(
        *last_end <= span.start,
        "{:?} starts at {} but the previous token ended at {}",
        token,
        span.start,
        last_end
    );
    *last_end = span.end;

    let content = span.slice(input);
    match token {
        Token::Attribute(attr) => {
            assert!(!attr.key.is_empty(), "attribute without key: {:?}", token);
            assert!(content.starts_with(&attr.key), "{:?}", token);
            assert!(content.ends_with(&attr.value), "{:?}", token);
        }
        Token::Text(text) => {
            assert!(!text.value.is_empty(), "empty text token at {}", span.start);
            assert!(text.offset <= span.start, "{:?}", token);
            assert_eq!(content, text.value.as_slice());
        }
        Token::Comment(comment) => {
            assert!(comment.offset <= span.start, "{:?}", token);
            assert_eq!(content, comment.value.as_slice());
        }
        Token::Error(error) => {
            assert_eq!(span.end, input.len(), "error does not end at end of input");
            assert!(error.message.ends_with(content));
        }
        _ => assert_eq!(content, token.value()),
    }
}
