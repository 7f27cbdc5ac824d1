//! Point at the place where scanning gave up.
//!
//! ```text
//! printf '<p class="intro">Hello <b world' | cargo run --example=diagnostics
//! ```
use std::io::Read;

use annotate_snippets::{Level, Renderer, Snippet};
use tagscan::{Token, Tokenizer};

fn main() {
    let mut input = Vec::new();
    std::io::stdin().lock().read_to_end(&mut input).unwrap();
    let source = String::from_utf8_lossy(&input);

    let mut tokenizer = Tokenizer::new(&input);
    tokenizer.verbatim_raw_text(true);

    let errors: Vec<_> = tokenizer
        .filter_map(|token| match token {
            Token::Error(e) => Some(e),
            _ => None,
        })
        .collect();

    if errors.is_empty() {
        println!("no errors");
        return;
    }

    for error in &errors {
        let message = Level::Error.title(error.error.as_str()).snippet(
            Snippet::source(&source)
                .origin("<stdin>")
                .fold(true)
                .annotation(
                    Level::Error
                        .span(error.span.start..error.span.end)
                        .label("unterminated"),
                ),
        );
        println!("{}", Renderer::styled().render(message));
    }
}
