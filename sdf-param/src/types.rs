//! Parameter type tags and the closed value union.
//!
//! [`ParamType`] names the fixed set of supported types; [`ParamValue`]
//! holds one value of any of them. Concrete Rust types move in and out of
//! a `ParamValue` through the [`ParamKind`] trait.

use std::str::FromStr;

use sdf_param_codec::{
    Color, ParamCodec, ParseError, Pose, Quaternion, Time, Vector2d, Vector2i, Vector3,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The type of a parameter value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum ParamType {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "unsigned int")]
    UInt,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "double")]
    Double,
    #[strum(serialize = "char")]
    Char,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "vector2i")]
    Vector2i,
    #[strum(serialize = "vector2d")]
    Vector2d,
    #[strum(serialize = "vector3")]
    Vector3,
    #[strum(serialize = "quaternion")]
    Quaternion,
    #[strum(serialize = "pose")]
    Pose,
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "time")]
    Time,
}

impl ParamType {
    /// Canonical type tag.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Types whose typed getter falls back to parsing the string form.
    pub fn is_vector_like(self) -> bool {
        matches!(
            self,
            ParamType::Vector2i | ParamType::Vector2d | ParamType::Vector3
        )
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        ParamType::from_str(&tag)
            .map_err(|_| serde::de::Error::custom(format!("unknown parameter type '{tag}'")))
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Vector2i(Vector2i),
    Vector2d(Vector2d),
    Vector3(Vector3),
    Quaternion(Quaternion),
    Pose(Pose),
    Color(Color),
    Time(Time),
}

impl ParamValue {
    /// Returns the parameter type of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Bool(_) => ParamType::Bool,
            Self::Int(_) => ParamType::Int,
            Self::UInt(_) => ParamType::UInt,
            Self::Float(_) => ParamType::Float,
            Self::Double(_) => ParamType::Double,
            Self::Char(_) => ParamType::Char,
            Self::String(_) => ParamType::String,
            Self::Vector2i(_) => ParamType::Vector2i,
            Self::Vector2d(_) => ParamType::Vector2d,
            Self::Vector3(_) => ParamType::Vector3,
            Self::Quaternion(_) => ParamType::Quaternion,
            Self::Pose(_) => ParamType::Pose,
            Self::Color(_) => ParamType::Color,
            Self::Time(_) => ParamType::Time,
        }
    }

    /// Canonical string form.
    pub fn encode(&self) -> String {
        match self {
            Self::Bool(v) => v.encode(),
            Self::Int(v) => v.encode(),
            Self::UInt(v) => v.encode(),
            Self::Float(v) => v.encode(),
            Self::Double(v) => v.encode(),
            Self::Char(v) => v.encode(),
            Self::String(v) => v.encode(),
            Self::Vector2i(v) => v.encode(),
            Self::Vector2d(v) => v.encode(),
            Self::Vector3(v) => v.encode(),
            Self::Quaternion(v) => v.encode(),
            Self::Pose(v) => v.encode(),
            Self::Color(v) => v.encode(),
            Self::Time(v) => v.encode(),
        }
    }

    /// Decode `text` as a value of type `ty`.
    pub fn parse(ty: ParamType, text: &str) -> Result<Self, ParseError> {
        Ok(match ty {
            ParamType::Bool => Self::Bool(ParamCodec::decode(text)?),
            ParamType::Int => Self::Int(ParamCodec::decode(text)?),
            ParamType::UInt => Self::UInt(ParamCodec::decode(text)?),
            ParamType::Float => Self::Float(ParamCodec::decode(text)?),
            ParamType::Double => Self::Double(ParamCodec::decode(text)?),
            ParamType::Char => Self::Char(ParamCodec::decode(text)?),
            ParamType::String => Self::String(ParamCodec::decode(text)?),
            ParamType::Vector2i => Self::Vector2i(ParamCodec::decode(text)?),
            ParamType::Vector2d => Self::Vector2d(ParamCodec::decode(text)?),
            ParamType::Vector3 => Self::Vector3(ParamCodec::decode(text)?),
            ParamType::Quaternion => Self::Quaternion(ParamCodec::decode(text)?),
            ParamType::Pose => Self::Pose(ParamCodec::decode(text)?),
            ParamType::Color => Self::Color(ParamCodec::decode(text)?),
            ParamType::Time => Self::Time(ParamCodec::decode(text)?),
        })
    }

    /// Zero value for a parameter type.
    pub fn default_for(ty: ParamType) -> Self {
        match ty {
            ParamType::Bool => Self::Bool(false),
            ParamType::Int => Self::Int(0),
            ParamType::UInt => Self::UInt(0),
            ParamType::Float => Self::Float(0.0),
            ParamType::Double => Self::Double(0.0),
            ParamType::Char => Self::Char('\0'),
            ParamType::String => Self::String(String::new()),
            ParamType::Vector2i => Self::Vector2i(Vector2i::default()),
            ParamType::Vector2d => Self::Vector2d(Vector2d::default()),
            ParamType::Vector3 => Self::Vector3(Vector3::default()),
            ParamType::Quaternion => Self::Quaternion(Quaternion::default()),
            ParamType::Pose => Self::Pose(Pose::default()),
            ParamType::Color => Self::Color(Color::default()),
            ParamType::Time => Self::Time(Time::default()),
        }
    }
}

/// Concrete Rust types that a parameter can hold.
pub trait ParamKind: ParamCodec + Clone {
    const TYPE: ParamType;

    fn into_value(self) -> ParamValue;

    fn from_value(value: &ParamValue) -> Option<Self>;
}

macro_rules! impl_param_kind {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ParamKind for $ty {
                const TYPE: ParamType = ParamType::$variant;

                fn into_value(self) -> ParamValue {
                    ParamValue::$variant(self)
                }

                fn from_value(value: &ParamValue) -> Option<Self> {
                    match value {
                        ParamValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_param_kind! {
    bool => Bool,
    i32 => Int,
    u32 => UInt,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => String,
    Vector2i => Vector2i,
    Vector2d => Vector2d,
    Vector3 => Vector3,
    Quaternion => Quaternion,
    Pose => Pose,
    Color => Color,
    Time => Time,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_type_names_round_trip() {
        for ty in ParamType::iter() {
            assert_eq!(ParamType::from_str(ty.name()), Ok(ty));
            assert_eq!(ty.to_string(), ty.name());
        }
        assert_eq!(ParamType::UInt.name(), "unsigned int");
        assert_eq!(ParamType::iter().count(), 14);
    }

    #[test]
    fn test_default_matches_type() {
        for ty in ParamType::iter() {
            assert_eq!(ParamValue::default_for(ty).param_type(), ty);
        }
    }

    #[test]
    fn test_parse_tags_value() {
        assert_eq!(
            ParamValue::parse(ParamType::Vector3, "0 0 -9.8"),
            Ok(ParamValue::Vector3(Vector3::new(0.0, 0.0, -9.8)))
        );
        assert_eq!(
            ParamValue::parse(ParamType::UInt, "7"),
            Ok(ParamValue::UInt(7))
        );
        assert!(ParamValue::parse(ParamType::Double, "abc").is_err());
    }

    #[test]
    fn test_encode_parse_round_trip() {
        // `\0` is representable: it is a single non-whitespace char.
        for ty in ParamType::iter() {
            let value = ParamValue::default_for(ty);
            assert_eq!(ParamValue::parse(ty, &value.encode()), Ok(value));
        }
    }

    #[test]
    fn test_kind_conversions() {
        assert_eq!(2.5f64.into_value(), ParamValue::Double(2.5));
        assert_eq!(f64::from_value(&ParamValue::Double(2.5)), Some(2.5));
        assert_eq!(f64::from_value(&ParamValue::Float(2.5)), None);
        assert_eq!(<Vector3 as ParamKind>::TYPE, ParamType::Vector3);
    }

    #[test]
    fn test_vector_like() {
        let vector_like: Vec<_> = ParamType::iter().filter(|t| t.is_vector_like()).collect();
        assert_eq!(
            vector_like,
            vec![ParamType::Vector2i, ParamType::Vector2d, ParamType::Vector3]
        );
    }

    #[test]
    fn test_serde_uses_tag() {
        let ty: ParamType = serde_yaml::from_str("unsigned int").unwrap();
        assert_eq!(ty, ParamType::UInt);
        assert!(serde_yaml::from_str::<ParamType>("matrix").is_err());
    }
}
