macro_rules! impl_error {
    ($(
        $string:literal <=> $variant:ident,
    )*) => {
        /// All syntax errors this tokenizer can emit.
        ///
        /// Each one names the sub-scanner that ran into the end of the input.
        #[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
        pub enum Error {
            $(
                #[doc = concat!("Rendered as `", $string, "`.")]
                $variant
            ),*
        }

        impl std::str::FromStr for Error {
            type Err = ();

            /// Parse the diagnostic prefix of an error back into an enum variant.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $string => Ok(Self::$variant), )*
                    _ => Err(())
                }
            }
        }

        impl Error {
            /// The fixed diagnostic prefix that starts the message of an error token.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $( Self::$variant => $string, )*
                }
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl_error! {
    "SyntaxError — StartToken" <=> EofInStartTagName,
    "SyntaxError — EndToken" <=> EofInEndTag,
    "SyntaxError — AttributeNode" <=> EofInAttributes,
    "SyntaxError — ValueToken" <=> EofInText,
}

#[test]
fn test_error_roundtrips_through_str() {
    for error in [
        Error::EofInStartTagName,
        Error::EofInEndTag,
        Error::EofInAttributes,
        Error::EofInText,
    ] {
        assert_eq!(error.as_str().parse::<Error>(), Ok(error));
    }
    assert_eq!("SyntaxError".parse::<Error>(), Err(()));
}
