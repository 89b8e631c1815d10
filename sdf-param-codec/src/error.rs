//! Error types for string decoding

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("'{text}' is not a valid {type_name}")]
    Malformed { type_name: &'static str, text: String },

    #[error("{type_name} expects {expected} tokens, found {found}")]
    WrongArity {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(type_name: &'static str, text: &str) -> Self {
        Self::Malformed {
            type_name,
            text: text.to_string(),
        }
    }
}
