//! Replay a single fuzzer input, read from the file given as the first argument or from stdin.
use std::io::Read;

fn main() {
    let input = match std::env::args_os().nth(1) {
        Some(path) => std::fs::read(path).unwrap(),
        None => {
            let mut input = Vec::new();
            std::io::stdin().lock().read_to_end(&mut input).unwrap();
            input
        }
    };
    testcase::run(&input);
}
