//! The typed value container.
//!
//! A [`Param`] holds a default and a current value of one fixed
//! [`ParamType`]. It can be written from its canonical string form or from a
//! typed value, and read back either way. Typed reads are checked against
//! the stored type; mismatches are reported and fail without touching the
//! caller's output.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::ParamError;
use crate::types::{ParamKind, ParamType, ParamValue};

/// Shared handle to a parameter owned by a document element.
pub type ParamPtr = Arc<RwLock<Param>>;

/// A named, runtime-typed parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    key: String,
    required: bool,
    set: bool,
    description: String,
    default: ParamValue,
    value: ParamValue,
}

macro_rules! type_probes {
    ($($method:ident => $variant:ident),* $(,)?) => {
        impl Param {
            $(
                #[doc = concat!("Whether this parameter holds a `", stringify!($variant), "`.")]
                pub fn $method(&self) -> bool {
                    self.param_type() == ParamType::$variant
                }
            )*
        }
    };
}

type_probes! {
    is_bool => Bool,
    is_int => Int,
    is_uint => UInt,
    is_float => Float,
    is_double => Double,
    is_char => Char,
    is_str => String,
    is_vector2i => Vector2i,
    is_vector2d => Vector2d,
    is_vector3 => Vector3,
    is_quaternion => Quaternion,
    is_pose => Pose,
    is_color => Color,
    is_time => Time,
}

impl Param {
    /// Create a parameter whose type is that of `default`.
    pub fn new<T: ParamKind>(key: impl Into<String>, default: T, required: bool) -> Self {
        let default = default.into_value();
        Self {
            key: key.into(),
            required,
            set: false,
            description: String::new(),
            value: default.clone(),
            default,
        }
    }

    /// Create a parameter of type `ty` from the literal text of its default.
    pub fn from_default_str(
        key: impl Into<String>,
        ty: ParamType,
        default: &str,
        required: bool,
    ) -> Result<Self, ParamError> {
        let key = key.into();
        let default = ParamValue::parse(ty, default).map_err(|source| ParamError::Parse {
            key: key.clone(),
            source,
        })?;
        Ok(Self {
            key,
            required,
            set: false,
            description: String::new(),
            value: default.clone(),
            default,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wrap into a shared handle.
    pub fn into_ptr(self) -> ParamPtr {
        Arc::new(RwLock::new(self))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn param_type(&self) -> ParamType {
        self.default.param_type()
    }

    pub fn type_name(&self) -> &'static str {
        self.param_type().name()
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether a value was assigned since construction or the last reset.
    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn default_value(&self) -> &ParamValue {
        &self.default
    }

    pub fn get_as_string(&self) -> String {
        self.value.encode()
    }

    pub fn default_as_string(&self) -> String {
        self.default.encode()
    }

    /// Restore the default value and clear the set flag.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.set = false;
    }

    /// Decode `text` as this parameter's type and store it.
    ///
    /// On failure the current value is left untouched.
    pub fn try_set_from_string(&mut self, text: &str) -> Result<(), ParamError> {
        let value =
            ParamValue::parse(self.param_type(), text).map_err(|source| ParamError::Parse {
                key: self.key.clone(),
                source,
            })?;
        self.value = value;
        self.set = true;
        Ok(())
    }

    /// Like [`Param::try_set_from_string`], reporting the failure instead.
    pub fn set_from_string(&mut self, text: &str) -> bool {
        match self.try_set_from_string(text) {
            Ok(()) => true,
            Err(e) => {
                e.report();
                false
            }
        }
    }

    /// Store a typed value.
    ///
    /// A value of another type is converted through its canonical string
    /// form, so it is accepted only if that text parses as this type.
    pub fn set<T: ParamKind>(&mut self, value: T) -> bool {
        if T::TYPE == self.param_type() {
            self.value = value.into_value();
            self.set = true;
            true
        } else {
            self.set_from_string(&value.encode())
        }
    }

    /// Read the current value as a `T`.
    ///
    /// Vector-like requests against a parameter of another type parse the
    /// current string form with the requested arity instead of failing
    /// outright. Any other mismatch is a [`ParamError::TypeMismatch`].
    pub fn try_get<T: ParamKind>(&self) -> Result<T, ParamError> {
        if let Some(v) = T::from_value(&self.value) {
            return Ok(v);
        }

        if T::TYPE.is_vector_like() {
            debug!(
                key = %self.key,
                stored = %self.param_type(),
                requested = %T::TYPE,
                "parsing string form as vector"
            );
            return T::decode(&self.get_as_string()).map_err(|source| ParamError::Parse {
                key: self.key.clone(),
                source,
            });
        }

        Err(ParamError::TypeMismatch {
            key: self.key.clone(),
            stored: self.param_type(),
            requested: T::TYPE,
        })
    }

    /// Write the current value into `out` if it can be read as a `T`.
    ///
    /// On failure `out` is not written and the diagnostic is reported.
    pub fn get<T: ParamKind>(&self, out: &mut T) -> bool {
        match self.try_get::<T>() {
            Ok(v) => {
                *out = v;
                true
            }
            Err(e) => {
                e.report();
                false
            }
        }
    }
}
