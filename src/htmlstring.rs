use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, DerefMut};

/// A wrapper around a bytestring.
///
/// Token payloads are copied out of the source as raw bytes. This newtype provides a readable
/// `Debug` impl and a lossy UTF-8 `Display` impl on top of `Vec<u8>`.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HtmlString(pub Vec<u8>);

impl HtmlString {
    /// Decode the bytes as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl Deref for HtmlString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for HtmlString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Debug for HtmlString {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "b\"")?;
        for &byte in &self.0 {
            for ch in std::ascii::escape_default(byte) {
                write!(f, "{}", ch as char)?;
            }
        }

        write!(f, "\"")
    }
}

impl Display for HtmlString {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(&self.to_string_lossy(), f)
    }
}

impl Borrow<[u8]> for HtmlString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for HtmlString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for HtmlString {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&[u8]> for HtmlString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&str> for HtmlString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl From<Vec<u8>> for HtmlString {
    fn from(vec: Vec<u8>) -> HtmlString {
        HtmlString(vec)
    }
}

impl From<&[u8]> for HtmlString {
    fn from(bytes: &[u8]) -> HtmlString {
        HtmlString(bytes.to_vec())
    }
}

impl From<&str> for HtmlString {
    fn from(s: &str) -> HtmlString {
        HtmlString(s.as_bytes().to_vec())
    }
}

impl From<HtmlString> for Vec<u8> {
    fn from(other: HtmlString) -> Vec<u8> {
        other.0
    }
}

#[test]
fn test_eq_html_str_and_byte_literal() {
    assert!(HtmlString(b"hello world".to_vec()) == b"hello world");
}

#[test]
fn test_eq_html_str_and_str() {
    assert!(HtmlString::from("span") == "span");
}

#[test]
fn test_debug_escapes_bytes() {
    let s = HtmlString(b"a\"\n".to_vec());
    assert_eq!(format!("{:?}", s), "b\"a\\\"\\n\"");
}

#[test]
fn test_display_is_lossy() {
    let s = HtmlString(vec![b'o', b'k', 0xff]);
    assert_eq!(s.to_string(), "ok\u{fffd}");
}
