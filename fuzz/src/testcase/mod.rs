use std::env;

mod span_invariants;

pub fn run(s: &[u8]) {
    // unconditionally run the tokenizer against raw bytes in every mode, it should never crash or
    // hang. we rely on running in debug mode such that the internal debug assertions are checked
    for (verbatim_raw_text, quote_aware_attributes) in
        [(false, false), (true, false), (false, true), (true, true)]
    {
        let mut tokenizer = tagscan::Tokenizer::new(s);
        tokenizer.verbatim_raw_text(verbatim_raw_text);
        tokenizer.quote_aware_attributes(quote_aware_attributes);
        for _ in tokenizer {}
    }

    if env::var("FUZZ_SPAN_INVARIANTS").map_or(true, |x| x == "1") {
        span_invariants::validate_span_invariants(s);
    }
}
