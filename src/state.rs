/// Mode the tokenizer is in while scanning character data.
///
/// The mode is re-evaluated from the tag name every time a start or end tag is emitted, see
/// [`next_state`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum State {
    /// Character data is scanned for text, comments and tags.
    #[default]
    Data,
    /// Inside a raw-text element such as `<script>` or `<style>`. The body is not interpreted as
    /// markup.
    RawText,
}

impl State {
    /// Whether this is [`State::RawText`].
    #[must_use]
    pub fn is_raw_text(self) -> bool {
        self == State::RawText
    }
}

/// Names of the elements whose body is raw text. Matched case-sensitively.
pub const RAW_TEXT_ELEMENTS: &[&[u8]] = &[b"script", b"style"];

/// Compute the mode that follows a just-now emitted start or end tag.
///
/// Note that this does not look at whether the tag opened or closed the element: `</script>`
/// switches into [`State::RawText`] just like `<script>` does, and any other tag name switches
/// back to [`State::Data`].
#[must_use]
pub fn next_state(tag_name: &[u8]) -> State {
    if RAW_TEXT_ELEMENTS.contains(&tag_name) {
        State::RawText
    } else {
        State::Data
    }
}

#[test]
fn test_next_state() {
    assert_eq!(next_state(b"script"), State::RawText);
    assert_eq!(next_state(b"style"), State::RawText);
    assert_eq!(next_state(b"Script"), State::Data);
    assert_eq!(next_state(b"div"), State::Data);
    assert_eq!(next_state(b""), State::Data);
}
