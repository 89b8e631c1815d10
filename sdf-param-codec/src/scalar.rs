//! Scalar codecs.
//!
//! Numbers use Rust's locale-independent literal syntax. Floating point
//! values encode with the shortest representation that parses back to the
//! same bits, so `2.0` encodes as `"2"` and `1.5` as `"1.5"`.

use crate::{ParamCodec, ParseError, Result};

macro_rules! impl_numeric_codec {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl ParamCodec for $ty {
                const TYPE_NAME: &'static str = $name;

                fn encode(&self) -> String {
                    self.to_string()
                }

                fn decode(text: &str) -> Result<Self> {
                    let trimmed = text.trim();
                    trimmed
                        .parse::<$ty>()
                        .map_err(|_| ParseError::malformed($name, trimmed))
                }
            }
        )*
    };
}

impl_numeric_codec! {
    i32 => "int",
    u32 => "unsigned int",
    f32 => "float",
    f64 => "double",
}

impl ParamCodec for bool {
    const TYPE_NAME: &'static str = "bool";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed == "1" || trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed == "0" || trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseError::malformed(Self::TYPE_NAME, trimmed))
        }
    }
}

impl ParamCodec for char {
    const TYPE_NAME: &'static str = "char";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(text: &str) -> Result<Self> {
        // A lone whitespace character is its own literal.
        let mut raw = text.chars();
        if let (Some(c), None) = (raw.next(), raw.next()) {
            return Ok(c);
        }

        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParseError::malformed(Self::TYPE_NAME, trimmed)),
        }
    }
}

impl ParamCodec for String {
    const TYPE_NAME: &'static str = "string";

    fn encode(&self) -> String {
        self.clone()
    }

    /// Strings are stored verbatim, surrounding whitespace included.
    fn decode(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}
