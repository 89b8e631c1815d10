//! Canonical string codec for SDF parameter values.
//!
//! Every supported parameter type has exactly one textual form. Scalars use
//! their standard locale-independent literal; compound types are a fixed
//! number of whitespace-separated scalar tokens:
//!
//! | Type | Form |
//! |------|------|
//! | [`Vector2i`], [`Vector2d`] | `x y` |
//! | [`Vector3`] | `x y z` |
//! | [`Quaternion`] | `w x y z` |
//! | [`Pose`] | `x y z w qx qy qz` |
//! | [`Color`] | `r g b a` |
//! | [`Time`] | `sec nsec` |
//!
//! Rotations are stored as quaternions, never as Euler angles. A classic
//! six-token SDF pose such as `"0 0 0 0 0 0"` (`x y z roll pitch yaw`) is
//! therefore rejected with [`ParseError::WrongArity`]; write the identity
//! rotation as `"0 0 0 1 0 0 0"` instead.
//!
//! Decoding is all-or-nothing: a malformed token or a wrong token count
//! yields a [`ParseError`] and no partial value.

pub mod compound;
pub mod error;
pub mod math;
pub mod scalar;

pub use error::{ParseError, Result};
pub use math::{Color, Pose, Quaternion, Time, Vector2d, Vector2i, Vector3};

/// A type with a canonical string form.
pub trait ParamCodec: Sized {
    /// Canonical type tag, e.g. `"double"` or `"vector3"`.
    const TYPE_NAME: &'static str;

    /// Encode into the canonical string form. Never fails.
    fn encode(&self) -> String;

    /// Decode from text, rejecting anything that is not a complete literal.
    fn decode(text: &str) -> Result<Self>;
}

/// Encode `value` into its canonical string form.
pub fn encode<T: ParamCodec>(value: &T) -> String {
    value.encode()
}

/// Decode `text` as a `T`.
pub fn decode<T: ParamCodec>(text: &str) -> Result<T> {
    T::decode(text)
}
