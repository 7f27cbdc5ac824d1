//! Print one token per line.
//!
//! ```text
//! printf '<h1 class=title>Hello world!</h1>' | cargo run --example=tokenize
//! cargo run --example=tokenize -- page.html
//! ```
use std::io::Read;

use argh::FromArgs;
use tagscan::Tokenizer;

#[derive(FromArgs)]
/// Scan a markup file and print its tokens.
struct Args {
    /// file to read, stdin if omitted
    #[argh(positional)]
    path: Option<String>,
}

fn main() {
    let args: Args = argh::from_env();

    let input = match args.path {
        Some(path) => std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {}", path, e)),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf).unwrap();
            buf
        }
    };

    for token in Tokenizer::new(&input) {
        println!("{}", token);
    }
}
