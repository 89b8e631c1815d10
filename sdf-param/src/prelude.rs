//! Convenience re-exports for common sdf-param types.
//!
//! Import everything with `use sdf_param::prelude::*;`.

/// The builder trait, required to call `.build()` on any builder type.
pub use crate::Builder;

/// The typed value container and its type tags.
pub use crate::param::{Param, ParamPtr};
pub use crate::types::{ParamKind, ParamType, ParamValue};

/// Compound value types and the string codec trait.
pub use sdf_param_codec::{
    Color, ParamCodec, ParseError, Pose, Quaternion, Time, Vector2d, Vector2i, Vector3,
};

/// Documents, schemas and loading.
pub use crate::element::{Element, ElementSchema, ParamDescription};
pub use crate::loader::{DocumentLoader, LoadOutcome, LoadReport};
pub use crate::registry::{RegistrySession, validate_required};

/// Named property dispatch.
pub use crate::dispatch::{ApplyReport, PropertyHost, PropertyTable};
pub use crate::wire::{TaggedValue, WireKind, WireNamedParam, WireParamBatch};

/// Physics engine properties.
pub use crate::physics::{PhysicsConfig, physics_schema};

/// Error types and the `Result` alias used throughout sdf-param.
pub use crate::error::{Error, ParamError, Result, Severity};
