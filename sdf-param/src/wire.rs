//! Tagged parameter values as carried by property-update messages.
//!
//! A [`WireNamedParam`] has a name, an optional type discriminant and up to
//! six optional payload fields. Decoding picks exactly one payload and
//! produces a [`TaggedValue`]:
//!
//! - with a discriminant, the matching field must be present;
//! - without one, the first populated field wins, in the order
//!   double, int, string, vector3d, bool, float.
//!
//! A record with no usable payload is skipped with a warning.

use sdf_param_codec::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::types::ParamType;

/// A value carrying exactly one payload from the wire subset of types.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    Double(f64),
    Int(i32),
    String(String),
    Vector3d(Vector3),
    Bool(bool),
    Float(f32),
}

impl TaggedValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            TaggedValue::Double(_) => ParamType::Double,
            TaggedValue::Int(_) => ParamType::Int,
            TaggedValue::String(_) => ParamType::String,
            TaggedValue::Vector3d(_) => ParamType::Vector3,
            TaggedValue::Bool(_) => ParamType::Bool,
            TaggedValue::Float(_) => ParamType::Float,
        }
    }

    /// Encode as a wire record with an explicit discriminant.
    pub fn to_wire(&self, name: impl Into<String>) -> WireNamedParam {
        let mut wire = WireNamedParam {
            name: name.into(),
            ..Default::default()
        };
        match self {
            TaggedValue::Double(v) => {
                wire.r#type = Some(WireParamType::Double);
                wire.double_value = Some(*v);
            }
            TaggedValue::Int(v) => {
                wire.r#type = Some(WireParamType::Int);
                wire.int_value = Some(*v);
            }
            TaggedValue::String(v) => {
                wire.r#type = Some(WireParamType::String);
                wire.string_value = Some(v.clone());
            }
            TaggedValue::Vector3d(v) => {
                wire.r#type = Some(WireParamType::Vector3d);
                wire.vector3d = Some(*v);
            }
            TaggedValue::Bool(v) => {
                wire.r#type = Some(WireParamType::Bool);
                wire.bool_value = Some(*v);
            }
            TaggedValue::Float(v) => {
                wire.r#type = Some(WireParamType::Float);
                wire.float_value = Some(*v);
            }
        }
        wire
    }
}

/// Rust types a named property can declare, and their tag in [`TaggedValue`].
pub trait WireKind: Sized {
    const TYPE: ParamType;

    fn into_tagged(self) -> TaggedValue;

    /// Exact-tag extraction; no numeric widening.
    fn from_tagged(value: &TaggedValue) -> Option<Self>;
}

macro_rules! impl_wire_kind {
    ($($ty:ty => $variant:ident, $param_type:ident);* $(;)?) => {
        $(
            impl WireKind for $ty {
                const TYPE: ParamType = ParamType::$param_type;

                fn into_tagged(self) -> TaggedValue {
                    TaggedValue::$variant(self)
                }

                fn from_tagged(value: &TaggedValue) -> Option<Self> {
                    match value {
                        TaggedValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_wire_kind! {
    f64 => Double, Double;
    i32 => Int, Int;
    String => String, String;
    Vector3 => Vector3d, Vector3;
    bool => Bool, Bool;
    f32 => Float, Float;
}

/// Explicit type discriminant of a wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireParamType {
    #[serde(rename = "DOUBLE_TYPE")]
    Double,
    #[serde(rename = "INT_TYPE")]
    Int,
    #[serde(rename = "STRING_TYPE")]
    String,
    #[serde(rename = "VECTOR3D_TYPE")]
    Vector3d,
    #[serde(rename = "BOOL_TYPE")]
    Bool,
    #[serde(rename = "FLOAT_TYPE")]
    Float,
}

/// One name/value pair of a property-update message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireNamedParam {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<WireParamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector3d: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f32>,
}

impl WireNamedParam {
    /// Pick the payload of this record.
    pub fn decode(&self) -> Result<TaggedValue, ParamError> {
        let value = match self.r#type {
            Some(WireParamType::Double) => self.double_value.map(TaggedValue::Double),
            Some(WireParamType::Int) => self.int_value.map(TaggedValue::Int),
            Some(WireParamType::String) => self.string_value.clone().map(TaggedValue::String),
            Some(WireParamType::Vector3d) => self.vector3d.map(TaggedValue::Vector3d),
            Some(WireParamType::Bool) => self.bool_value.map(TaggedValue::Bool),
            Some(WireParamType::Float) => self.float_value.map(TaggedValue::Float),
            None => self
                .double_value
                .map(TaggedValue::Double)
                .or_else(|| self.int_value.map(TaggedValue::Int))
                .or_else(|| self.string_value.clone().map(TaggedValue::String))
                .or_else(|| self.vector3d.map(TaggedValue::Vector3d))
                .or_else(|| self.bool_value.map(TaggedValue::Bool))
                .or_else(|| self.float_value.map(TaggedValue::Float)),
        };
        value.ok_or_else(|| ParamError::EmptyValue(self.name.clone()))
    }
}

/// An ordered batch of name/value pairs from one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireParamBatch {
    #[serde(default)]
    pub parameters: Vec<WireNamedParam>,
}

impl WireParamBatch {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, TaggedValue)>) -> Self {
        Self {
            parameters: pairs
                .into_iter()
                .map(|(name, value)| value.to_wire(name))
                .collect(),
        }
    }
}
