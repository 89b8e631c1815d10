//! # sdf-param: runtime-typed simulation parameters
//!
//! `sdf-param` stores a fixed set of scalar and compound parameter types
//! uniformly, converts them to and from a canonical string form, and lets
//! callers read and write them by name without knowing their concrete type
//! at compile time.
//!
//! ## Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | [`ParamType`] tags and the [`ParamValue`] union |
//! | [`param`] | [`Param`], the typed value container |
//! | [`registry`] | [`RegistrySession`], the per-load enumeration of declared params |
//! | [`element`], [`loader`] | schema-driven documents loaded from YAML |
//! | [`wire`], [`dispatch`] | tagged values and named property tables |
//! | [`physics`] | the physics engine's named properties |
//!
//! ## Example
//!
//! ```rust,ignore
//! use sdf_param::prelude::*;
//!
//! let loader = DocumentLoader::builder().schema(physics_schema()).build()?;
//! let outcome = loader.load_str("real_time_factor: \"1.5\"")?;
//! let host = PhysicsConfig::from_element(outcome.element)?.into_host();
//! host.apply_named("real_time_factor", TaggedValue::Double(2.0));
//! ```
//!
//! Parse failures, type mismatches and unknown keys never abort: they are
//! logged through `tracing` and returned as [`ParamError`] values or a
//! `false` result.

pub mod dispatch;
pub mod element;
pub mod error;
pub mod loader;
pub mod logger;
pub mod param;
pub mod physics;
pub mod prelude;
pub mod registry;
pub mod types;
pub mod wire;

pub use error::{Error, ParamError, Result, Severity};
pub use param::{Param, ParamPtr};
pub use registry::RegistrySession;
pub use sdf_param_codec as codec;
pub use types::{ParamKind, ParamType, ParamValue};

/// Builds a configured object, consuming the builder.
pub trait Builder {
    /// The type produced by this builder.
    type Output;
    /// Consume the builder and construct the configured object.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn build(self) -> Result<Self::Output>;
}
