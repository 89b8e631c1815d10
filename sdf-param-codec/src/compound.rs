//! Codecs for the multi-token value types.

use std::str::FromStr;

use crate::math::{Color, Pose, Quaternion, Time, Vector2d, Vector2i, Vector3};
use crate::{ParamCodec, ParseError, Result};

/// Split `text` into exactly `N` whitespace-separated tokens.
fn tokens<'a, const N: usize>(text: &'a str, type_name: &'static str) -> Result<[&'a str; N]> {
    let found: Vec<&str> = text.split_whitespace().collect();
    <[&str; N]>::try_from(found).map_err(|found| ParseError::WrongArity {
        type_name,
        expected: N,
        found: found.len(),
    })
}

fn token<T: FromStr>(token: &str, type_name: &'static str) -> Result<T> {
    token
        .parse()
        .map_err(|_| ParseError::malformed(type_name, token))
}

impl ParamCodec for Vector2i {
    const TYPE_NAME: &'static str = "vector2i";

    fn encode(&self) -> String {
        format!("{} {}", self.x, self.y)
    }

    fn decode(text: &str) -> Result<Self> {
        let [x, y] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(x, Self::TYPE_NAME)?,
            token(y, Self::TYPE_NAME)?,
        ))
    }
}

impl ParamCodec for Vector2d {
    const TYPE_NAME: &'static str = "vector2d";

    fn encode(&self) -> String {
        format!("{} {}", self.x, self.y)
    }

    fn decode(text: &str) -> Result<Self> {
        let [x, y] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(x, Self::TYPE_NAME)?,
            token(y, Self::TYPE_NAME)?,
        ))
    }
}

impl ParamCodec for Vector3 {
    const TYPE_NAME: &'static str = "vector3";

    fn encode(&self) -> String {
        format!("{} {} {}", self.x, self.y, self.z)
    }

    fn decode(text: &str) -> Result<Self> {
        let [x, y, z] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(x, Self::TYPE_NAME)?,
            token(y, Self::TYPE_NAME)?,
            token(z, Self::TYPE_NAME)?,
        ))
    }
}

impl ParamCodec for Quaternion {
    const TYPE_NAME: &'static str = "quaternion";

    fn encode(&self) -> String {
        format!("{} {} {} {}", self.w, self.x, self.y, self.z)
    }

    fn decode(text: &str) -> Result<Self> {
        let [w, x, y, z] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(w, Self::TYPE_NAME)?,
            token(x, Self::TYPE_NAME)?,
            token(y, Self::TYPE_NAME)?,
            token(z, Self::TYPE_NAME)?,
        ))
    }
}

impl ParamCodec for Pose {
    const TYPE_NAME: &'static str = "pose";

    fn encode(&self) -> String {
        format!("{} {}", self.pos.encode(), self.rot.encode())
    }

    fn decode(text: &str) -> Result<Self> {
        let [x, y, z, w, qx, qy, qz] = tokens(text, Self::TYPE_NAME)?;
        let pos = Vector3::new(
            token(x, Self::TYPE_NAME)?,
            token(y, Self::TYPE_NAME)?,
            token(z, Self::TYPE_NAME)?,
        );
        let rot = Quaternion::new(
            token(w, Self::TYPE_NAME)?,
            token(qx, Self::TYPE_NAME)?,
            token(qy, Self::TYPE_NAME)?,
            token(qz, Self::TYPE_NAME)?,
        );
        Ok(Self::new(pos, rot))
    }
}

impl ParamCodec for Color {
    const TYPE_NAME: &'static str = "color";

    fn encode(&self) -> String {
        format!("{} {} {} {}", self.r, self.g, self.b, self.a)
    }

    fn decode(text: &str) -> Result<Self> {
        let [r, g, b, a] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(r, Self::TYPE_NAME)?,
            token(g, Self::TYPE_NAME)?,
            token(b, Self::TYPE_NAME)?,
            token(a, Self::TYPE_NAME)?,
        ))
    }
}

impl ParamCodec for Time {
    const TYPE_NAME: &'static str = "time";

    fn encode(&self) -> String {
        format!("{} {}", self.sec, self.nsec)
    }

    fn decode(text: &str) -> Result<Self> {
        let [sec, nsec] = tokens(text, Self::TYPE_NAME)?;
        Ok(Self::new(
            token(sec, Self::TYPE_NAME)?,
            token(nsec, Self::TYPE_NAME)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_form() {
        assert_eq!(Vector3::new(0.0, 0.0, -9.8).encode(), "0 0 -9.8");
        assert_eq!(
            Vector3::decode("  1.0\t2.0   3.0 "),
            Ok(Vector3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            Vector2d::decode("1.0 2.0 3.0"),
            Err(ParseError::WrongArity {
                type_name: "vector2d",
                expected: 2,
                found: 3,
            })
        );
        assert_eq!(
            Vector3::decode(""),
            Err(ParseError::WrongArity {
                type_name: "vector3",
                expected: 3,
                found: 0,
            })
        );
    }

    #[test]
    fn test_bad_token_is_malformed() {
        assert_eq!(
            Vector3::decode("1 two 3"),
            Err(ParseError::Malformed {
                type_name: "vector3",
                text: "two".to_string(),
            })
        );
        assert!(matches!(
            Vector2i::decode("1.5 2"),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_tokens_borrow_input() {
        let text = String::from(" 3 -4 ");
        let [x, y] = tokens::<2>(&text, "vector2i").unwrap();
        assert_eq!((x, y), ("3", "-4"));
        assert_eq!(
            tokens::<3>(&text, "vector3"),
            Err(ParseError::WrongArity {
                type_name: "vector3",
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_pose_has_seven_tokens() {
        let pose = Pose::new(Vector3::new(1.0, 2.0, 3.0), Quaternion::IDENTITY);
        assert_eq!(pose.encode(), "1 2 3 1 0 0 0");
        assert!(matches!(
            Pose::decode("1 2 3 0 0 0"),
            Err(ParseError::WrongArity { expected: 7, found: 6, .. })
        ));
    }
}
