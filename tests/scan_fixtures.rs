use std::{fs::File, io::BufReader, path::Path};

use glob::glob;
use libtest_mimic::{self, Arguments, Trial};
use pretty_assertions::assert_eq;
use serde::Deserialize;

use tagscan::{testutils::trace_log, State, Token, Tokenizer};

mod testutils;

// this macro is a horrible way to define a type that deserializes only from a particular
// string. Together with serde(untagged) this gives us really flexible enum tagging with really
// terrible error messages.
macro_rules! def_const {
    ($str:expr, $ty:ident) => {
        #[derive(Deserialize, Debug, PartialEq, Eq)]
        enum $ty {
            #[serde(rename = $str)]
            $ty,
        }
    };
}

def_const!("TagOpen", TagOpenConst);
def_const!("TagClose", TagCloseConst);
def_const!("Attribute", AttributeConst);
def_const!("Text", TextConst);
def_const!("Comment", CommentConst);
def_const!("Error", ErrorConst);

/// A token as written in the fixture files: the kind, the payload, then the offsets.
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
enum OutputToken {
    // "TagOpen", name, start
    TagOpen(TagOpenConst, String, usize),
    // "TagClose", name, start
    TagClose(TagCloseConst, String, usize),
    // "Attribute", key, value, start
    Attribute(AttributeConst, String, String, usize),
    // "Text", text, start
    Text(TextConst, String, usize),
    // "Comment", comment, start
    Comment(CommentConst, String, usize),
    // "Error", message, start, end
    Error(ErrorConst, String, usize, usize),
}

impl From<Token> for OutputToken {
    fn from(token: Token) -> Self {
        let start = token.start_offset();
        match token {
            Token::TagOpen(tag) => {
                OutputToken::TagOpen(TagOpenConst::TagOpenConst, tag.name.to_string(), start)
            }
            Token::TagClose(tag) => {
                OutputToken::TagClose(TagCloseConst::TagCloseConst, tag.name.to_string(), start)
            }
            Token::Attribute(attr) => OutputToken::Attribute(
                AttributeConst::AttributeConst,
                attr.key.to_string(),
                attr.value.to_string(),
                start,
            ),
            Token::Text(text) => {
                OutputToken::Text(TextConst::TextConst, text.value.to_string(), start)
            }
            Token::Comment(comment) => {
                OutputToken::Comment(CommentConst::CommentConst, comment.value.to_string(), start)
            }
            Token::Error(error) => OutputToken::Error(
                ErrorConst::ErrorConst,
                error.message.to_string(),
                error.span.start,
                error.span.end,
            ),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
enum InitialState {
    Data,
    RawText,
}

impl From<InitialState> for State {
    fn from(state: InitialState) -> State {
        match state {
            InitialState::Data => State::Data,
            InitialState::RawText => State::RawText,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Options {
    #[serde(default)]
    initial_state: Option<InitialState>,
    #[serde(default)]
    verbatim_raw_text: bool,
    #[serde(default)]
    quote_aware_attributes: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Testcase {
    description: String,
    input: String,
    #[serde(default)]
    options: Options,
    output: Vec<OutputToken>,
}

#[derive(Deserialize)]
struct Testfile {
    tests: Vec<Testcase>,
}

fn produce_testcases_from_file(tests: &mut Vec<Trial>, path: &Path) {
    let fname = path.file_name().unwrap().to_str().unwrap().to_owned();

    let Testfile { tests: testcases } =
        serde_json::from_reader(BufReader::new(File::open(path).unwrap()))
            .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));

    for (i, testcase) in testcases.into_iter().enumerate() {
        let name = format!("{}:{}:{}", fname, i, testcase.description);
        tests.push(Trial::test(name, move || {
            testutils::catch_unwind_and_report(move || run_test(testcase))
        }));
    }
}

fn run_test(testcase: Testcase) {
    trace_log(&format!("{:#?}", testcase));

    let mut tokenizer = Tokenizer::new(&testcase.input);
    if let Some(state) = testcase.options.initial_state {
        tokenizer.set_state(state.into());
    }
    tokenizer.verbatim_raw_text(testcase.options.verbatim_raw_text);
    tokenizer.quote_aware_attributes(testcase.options.quote_aware_attributes);

    let tokens: Vec<Token> = tokenizer.collect();

    for (i, token) in tokens.iter().enumerate() {
        if let Some(end) = token.end_offset() {
            assert_eq!(end, testcase.input.len(), "error does not end at end of input");
            assert_eq!(i + 1, tokens.len(), "error is not the last token");
        }
    }

    let actual: Vec<OutputToken> = tokens.into_iter().map(OutputToken::from).collect();
    assert_eq!(actual, testcase.output);
}

fn main() {
    let args = Arguments::from_args();
    let mut tests = Vec::new();

    for entry in glob("tests/fixtures/*.json").unwrap() {
        produce_testcases_from_file(&mut tests, &entry.unwrap());
    }

    libtest_mimic::run(&args, tests).exit();
}
