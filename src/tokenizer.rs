use crate::machine::COMMENT_OPEN;
use crate::utils::trace_log;
use crate::{Cursor, DefaultEmitter, Emitter, Readable, State, Token};

/// A markup tokenizer. See crate-level docs for basic usage.
///
/// Each call to [`Iterator::next`] runs the dispatch loop until the emitter has a token to hand
/// out, or the input is exhausted.
#[derive(Debug)]
pub struct Tokenizer<'a, E: Emitter = DefaultEmitter> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) emitter: E,
    pub(crate) state: State,
    /// `</` followed by the name of the raw-text element we are in, if any.
    pub(crate) raw_text_end: Vec<u8>,
    pub(crate) verbatim_raw_text: bool,
    pub(crate) quote_aware_attributes: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer from some input.
    ///
    /// `input` can be `&str`, `&String`, `&[u8]` or `&Vec<u8>`, as those are the types for which
    /// [`crate::Readable`] is implemented.
    pub fn new<S: Readable<'a>>(input: S) -> Self {
        Tokenizer::new_with_emitter(input, DefaultEmitter::default())
    }
}

impl<'a, E: Emitter> Tokenizer<'a, E> {
    /// Construct a new tokenizer from some input and a custom emitter.
    ///
    /// Use this method over [`Tokenizer::new`] when you want to have more control over string
    /// allocation for tokens.
    pub fn new_with_emitter<S: Readable<'a>>(input: S, emitter: E) -> Self {
        Tokenizer {
            cursor: input.to_cursor(),
            emitter,
            state: State::default(),
            raw_text_end: b"</".to_vec(),
            verbatim_raw_text: false,
            quote_aware_attributes: false,
        }
    }

    /// Override the current mode. Necessary for scanning partial documents, such as the body of a
    /// `<script>` element on its own.
    pub fn set_state(&mut self, state: State) {
        self.state = state;
        self.raw_text_end.truncate(2);
    }

    /// The current mode.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether to scan the body of raw-text elements verbatim.
    ///
    /// When on, everything between `<script>` and the next `</script` is emitted as a single text
    /// token, `<` included, and end tags always switch back to [`State::Data`].
    ///
    /// The default is off: inside a raw-text element no text is emitted at all, and every `<` is
    /// read as the start of a tag.
    pub fn verbatim_raw_text(&mut self, yes: bool) {
        self.verbatim_raw_text = yes;
    }

    /// Whether spaces and `>` inside quoted attribute values stay part of the value.
    ///
    /// The default is off: a space splits the value and a `>` ends the tag even between quotes.
    pub fn quote_aware_attributes(&mut self, yes: bool) {
        self.quote_aware_attributes = yes;
    }

    /// The input and the current scan position.
    #[must_use]
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    /// Run the dispatch loop until the input is exhausted and return the emitter, with any tokens
    /// it has not handed out yet still inside.
    ///
    /// This is the way to drive emitters that do their work as a side effect.
    ///
    /// ```
    /// use tagscan::Tokenizer;
    ///
    /// let tokens = Tokenizer::new("<p>hello</p>").finish().into_tokens();
    /// assert_eq!(tokens.len(), 3);
    /// ```
    pub fn finish(mut self) -> E {
        while !self.cursor.is_eof() {
            self.step();
        }
        self.emitter
    }

    /// One iteration of the dispatch loop. Always moves the cursor forwards.
    fn step(&mut self) {
        trace_log!(
            "dispatch: position={} state={:?} next={:?}",
            self.cursor.position(),
            self.state,
            self.cursor.peek().map(char::from)
        );

        if self.verbatim_raw_text
            && self.state.is_raw_text()
            && !self.cursor.starts_with(&self.raw_text_end)
        {
            self.scan_raw_text();
        } else if self.cursor.starts_with(b"</") {
            self.cursor.advance(2);
            self.scan_end_tag();
        } else if !self.state.is_raw_text() && self.cursor.starts_with(COMMENT_OPEN) {
            self.scan_text();
        } else if self.cursor.peek() == Some(b'<') {
            self.cursor.advance(1);
            if self.scan_start_tag() {
                self.scan_attributes();
            }
        } else {
            self.scan_text();
        }
    }
}

impl<'a, E: Emitter> Iterator for Tokenizer<'a, E> {
    type Item = E::Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.emitter.pop_token() {
                break Some(token);
            } else if !self.cursor.is_eof() {
                self.step();
            } else {
                break None;
            }
        }
    }
}

/// Scan all of `input` and return the tokens in input order.
///
/// ```
/// let tokens = tagscan::tokenize("<b>bold</b>");
/// let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["TagOpen - b [1]", "Text - bold [3]", "TagClose - b [9]"]);
/// ```
#[must_use]
pub fn tokenize<'a, S: Readable<'a>>(input: S) -> Vec<Token> {
    Tokenizer::new(input).finish().into_tokens()
}
