//! Physics engine configuration exposed as named properties.

use sdf_param_codec::Vector3;
use tracing::debug;

use crate::dispatch::{PropertyHost, PropertyTable, RESERVED_TYPE_KEY};
use crate::element::{Element, ElementSchema, ParamDescription};
use crate::error::Result;
use crate::types::ParamType;

pub const PHYSICS_ELEMENT: &str = "physics";

pub const MAX_STEP_SIZE: &str = "max_step_size";
pub const REAL_TIME_UPDATE_RATE: &str = "real_time_update_rate";
pub const REAL_TIME_FACTOR: &str = "real_time_factor";
pub const GRAVITY: &str = "gravity";
pub const MAGNETIC_FIELD: &str = "magnetic_field";

/// Parameters declared by a `physics` element.
pub fn physics_schema() -> ElementSchema {
    ElementSchema::new(PHYSICS_ELEMENT)
        .param(
            ParamDescription::new(RESERVED_TYPE_KEY, ParamType::String, "ode")
                .describe("physics engine implementation"),
        )
        .param(
            ParamDescription::new(MAX_STEP_SIZE, ParamType::Double, "0.001")
                .describe("maximum time step size in seconds"),
        )
        .param(
            ParamDescription::new(REAL_TIME_FACTOR, ParamType::Double, "1")
                .describe("target ratio of simulated time to real time"),
        )
        .param(
            ParamDescription::new(REAL_TIME_UPDATE_RATE, ParamType::Double, "1000")
                .describe("physics updates per real second, 0 runs as fast as possible"),
        )
        .param(
            ParamDescription::new(GRAVITY, ParamType::Vector3, "0 0 -9.8")
                .describe("gravity vector in m/s^2"),
        )
        .param(
            ParamDescription::new(
                MAGNETIC_FIELD,
                ParamType::Vector3,
                "5.5645e-6 22.8758e-6 -42.3884e-6",
            )
            .describe("global magnetic field in Tesla"),
        )
}

/// Scalar physics configuration backed by a `physics` element.
///
/// The step size, update rate and real time factor are cached; every
/// setter writes through to the element so its string form stays current.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    element: Element,
    engine_type: String,
    max_step_size: f64,
    real_time_update_rate: f64,
    target_real_time_factor: f64,
}

impl PhysicsConfig {
    /// Read the cached values out of a loaded element.
    pub fn from_element(element: Element) -> Result<Self> {
        let config = Self {
            engine_type: element.require(RESERVED_TYPE_KEY)?,
            max_step_size: element.require(MAX_STEP_SIZE)?,
            real_time_update_rate: element.require(REAL_TIME_UPDATE_RATE)?,
            target_real_time_factor: element.require(REAL_TIME_FACTOR)?,
            element,
        };
        debug!(engine = %config.engine_type, "physics configuration loaded");
        Ok(config)
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn engine_type(&self) -> &str {
        &self.engine_type
    }

    pub fn max_step_size(&self) -> f64 {
        self.max_step_size
    }

    pub fn set_max_step_size(&mut self, step_size: f64) {
        self.element.set(MAX_STEP_SIZE, step_size);
        self.max_step_size = step_size;
    }

    pub fn real_time_update_rate(&self) -> f64 {
        self.real_time_update_rate
    }

    pub fn set_real_time_update_rate(&mut self, rate: f64) {
        self.element.set(REAL_TIME_UPDATE_RATE, rate);
        self.real_time_update_rate = rate;
    }

    pub fn target_real_time_factor(&self) -> f64 {
        self.target_real_time_factor
    }

    pub fn set_target_real_time_factor(&mut self, factor: f64) {
        self.element.set(REAL_TIME_FACTOR, factor);
        self.target_real_time_factor = factor;
    }

    pub fn gravity(&self) -> Vector3 {
        self.element.get(GRAVITY).unwrap_or_default()
    }

    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.element.set(GRAVITY, gravity);
    }

    pub fn magnetic_field(&self) -> Vector3 {
        self.element.get(MAGNETIC_FIELD).unwrap_or_default()
    }

    pub fn set_magnetic_field(&mut self, field: Vector3) {
        self.element.set(MAGNETIC_FIELD, field);
    }

    /// Real seconds between updates, or 0 when the rate is unbounded.
    pub fn update_period(&self) -> f64 {
        if self.real_time_update_rate > 0.0 {
            1.0 / self.real_time_update_rate
        } else {
            0.0
        }
    }

    /// Named properties settable from property-update messages.
    pub fn property_table() -> PropertyTable<PhysicsConfig> {
        PropertyTable::<PhysicsConfig>::builder()
            .read_only(RESERVED_TYPE_KEY, |p: &PhysicsConfig| p.engine_type.clone())
            .property(MAX_STEP_SIZE, PhysicsConfig::max_step_size, PhysicsConfig::set_max_step_size)
            .property(
                REAL_TIME_UPDATE_RATE,
                PhysicsConfig::real_time_update_rate,
                PhysicsConfig::set_real_time_update_rate,
            )
            .property(
                REAL_TIME_FACTOR,
                PhysicsConfig::target_real_time_factor,
                PhysicsConfig::set_target_real_time_factor,
            )
            .property(GRAVITY, PhysicsConfig::gravity, PhysicsConfig::set_gravity)
            .property(
                MAGNETIC_FIELD,
                PhysicsConfig::magnetic_field,
                PhysicsConfig::set_magnetic_field,
            )
            .build()
    }

    /// Move into a lock-guarded host answering named property requests.
    pub fn into_host(self) -> PropertyHost<PhysicsConfig> {
        PropertyHost::new(PHYSICS_ELEMENT, self, Self::property_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySession;
    use crate::wire::TaggedValue;

    fn config() -> PhysicsConfig {
        let element = physics_schema()
            .instantiate(&mut RegistrySession::begin("test"))
            .unwrap();
        PhysicsConfig::from_element(element).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.engine_type(), "ode");
        assert_eq!(config.max_step_size(), 0.001);
        assert_eq!(config.target_real_time_factor(), 1.0);
        assert_eq!(config.gravity(), Vector3::new(0.0, 0.0, -9.8));
        assert_eq!(config.update_period(), 0.001);
    }

    #[test]
    fn test_setters_write_through() {
        let mut config = config();
        config.set_max_step_size(0.004);
        config.set_real_time_update_rate(0.0);
        assert_eq!(config.element().get_as_string(MAX_STEP_SIZE).as_deref(), Some("0.004"));
        assert_eq!(config.update_period(), 0.0);
        assert!(config.element().param(MAX_STEP_SIZE).unwrap().read().is_set());
    }

    #[test]
    fn test_host_reads_every_key() {
        let host = config().into_host();
        for key in host.table().keys() {
            assert!(host.read_named(key).is_some(), "{key}");
        }
        assert_eq!(
            host.read_named(RESERVED_TYPE_KEY),
            Some(TaggedValue::String("ode".into()))
        );
    }

    #[test]
    fn test_host_applies_magnetic_field() {
        let host = config().into_host();
        let field = Vector3::new(0.0, 2e-5, -4e-5);
        assert!(host.apply_named(MAGNETIC_FIELD, TaggedValue::Vector3d(field)));
        assert_eq!(host.with_state(PhysicsConfig::magnetic_field), field);
        assert!(!host.apply_named(RESERVED_TYPE_KEY, TaggedValue::String("bullet".into())));
        assert_eq!(host.with_state(|p| p.engine_type().to_string()), "ode");
    }
}
