//! Document elements and their schemas.
//!
//! An [`ElementSchema`] lists the parameters an element declares: key,
//! type, literal default, and whether a document must set it. Instantiating
//! the schema inside a [`RegistrySession`] yields an [`Element`] owning one
//! [`Param`] per description.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, ParamError, Result};
use crate::param::{Param, ParamPtr};
use crate::registry::RegistrySession;
use crate::types::{ParamKind, ParamType};

/// Declaration of a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescription {
    pub key: String,
    #[serde(rename = "type")]
    pub type_: ParamType,
    pub default: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl ParamDescription {
    pub fn new(key: impl Into<String>, type_: ParamType, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_,
            default: default.into(),
            required: false,
            description: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn declare(&self) -> std::result::Result<Param, ParamError> {
        Ok(
            Param::from_default_str(&self.key, self.type_, &self.default, self.required)?
                .with_description(&self.description),
        )
    }
}

/// The parameters one kind of element declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSchema {
    pub name: String,
    pub params: Vec<ParamDescription>,
}

impl ElementSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, description: ParamDescription) -> Self {
        self.params.push(description);
        self
    }

    /// Check the name, key uniqueness and that every default parses.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidSchema("element name is empty".into()));
        }

        let mut seen = HashSet::new();
        for desc in &self.params {
            if desc.key.is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "element [{}] declares a parameter with an empty key",
                    self.name
                )));
            }
            if !seen.insert(desc.key.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "element [{}] declares [{}] twice",
                    self.name, desc.key
                )));
            }
            desc.declare()
                .map_err(|e| Error::InvalidSchema(format!("element [{}]: {}", self.name, e)))?;
        }
        Ok(())
    }

    /// Create an element, registering each parameter in `session`.
    pub fn instantiate(&self, session: &mut RegistrySession) -> Result<Element> {
        let mut element = Element::new(&self.name);
        for desc in &self.params {
            element.add_param(desc.declare()?, Some(&mut *session));
        }
        Ok(element)
    }
}

/// A named, ordered set of parameters.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    params: Vec<ParamPtr>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of `param`, registering it in `session` if one is active.
    pub fn add_param(&mut self, param: Param, session: Option<&mut RegistrySession>) -> ParamPtr {
        debug!(element = %self.name, key = param.key(), ty = %param.param_type(), "declare");
        let ptr = param.into_ptr();
        if let Some(session) = session {
            session.register(&ptr);
        }
        self.params.push(ptr.clone());
        ptr
    }

    pub fn param(&self, key: &str) -> Option<&ParamPtr> {
        self.params.iter().find(|p| p.read().key() == key)
    }

    pub fn params(&self) -> &[ParamPtr] {
        &self.params
    }

    pub fn keys(&self) -> Vec<String> {
        self.params.iter().map(|p| p.read().key().to_string()).collect()
    }

    /// Typed read of `key`; `None` if the key is unknown or unreadable as `T`.
    pub fn get<T: ParamKind>(&self, key: &str) -> Option<T> {
        let param = self.lookup(key)?.read();
        match param.try_get::<T>() {
            Ok(v) => Some(v),
            Err(e) => {
                e.report();
                None
            }
        }
    }

    pub fn set<T: ParamKind>(&self, key: &str, value: T) -> bool {
        self.lookup(key).is_some_and(|p| p.write().set(value))
    }

    pub fn get_as_string(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|p| p.read().get_as_string())
    }

    pub fn set_from_string(&self, key: &str, text: &str) -> bool {
        self.lookup(key)
            .is_some_and(|p| p.write().set_from_string(text))
    }

    /// Typed read that fails as a whole when the key is missing or mistyped.
    pub fn require<T: ParamKind>(&self, key: &str) -> Result<T> {
        let param = self.param(key).ok_or_else(|| Error::MissingProperty {
            element: self.name.clone(),
            key: key.to_string(),
        })?;
        let value = param.read().try_get::<T>()?;
        Ok(value)
    }

    fn lookup(&self, key: &str) -> Option<&ParamPtr> {
        let found = self.param(key);
        if found.is_none() {
            ParamError::UnknownKey(format!("{}::{}", self.name, key)).report();
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use sdf_param_codec::Vector3;

    use super::*;

    fn schema() -> ElementSchema {
        ElementSchema::new("physics")
            .param(ParamDescription::new("type", ParamType::String, "ode").required())
            .param(ParamDescription::new("max_step_size", ParamType::Double, "0.001"))
            .param(
                ParamDescription::new("gravity", ParamType::Vector3, "0 0 -9.8")
                    .describe("gravity vector"),
            )
    }

    #[test]
    fn test_instantiate_registers_in_order() {
        let mut session = RegistrySession::begin("physics");
        let element = schema().instantiate(&mut session).unwrap();
        assert_eq!(element.keys(), vec!["type", "max_step_size", "gravity"]);

        let registered = session.end();
        assert_eq!(registered.len(), 3);
        assert!(std::sync::Arc::ptr_eq(&registered[2], &element.params()[2]));
    }

    #[test]
    fn test_element_get_set() {
        let mut session = RegistrySession::begin("physics");
        let element = schema().instantiate(&mut session).unwrap();

        assert_eq!(element.get::<f64>("max_step_size"), Some(0.001));
        assert_eq!(
            element.get::<Vector3>("gravity"),
            Some(Vector3::new(0.0, 0.0, -9.8))
        );
        assert!(element.set("max_step_size", 0.002f64));
        assert!(element.set_from_string("gravity", "0 0 -1.6"));
        assert_eq!(element.get_as_string("gravity").as_deref(), Some("0 0 -1.6"));
        assert_eq!(
            element.param("gravity").unwrap().read().description(),
            "gravity vector"
        );

        assert_eq!(element.get::<f64>("missing"), None);
        assert!(!element.set_from_string("missing", "1"));
        assert_eq!(element.get::<f64>("gravity"), None);
    }

    #[test]
    fn test_require() {
        let element = schema().instantiate(&mut RegistrySession::begin("p")).unwrap();
        assert_eq!(element.require::<String>("type").unwrap(), "ode");
        assert!(matches!(
            element.require::<f64>("nope"),
            Err(Error::MissingProperty { .. })
        ));
        assert!(matches!(
            element.require::<f64>("type"),
            Err(Error::Param(ParamError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_validate_schema() {
        assert!(schema().validate().is_ok());

        let dup = schema().param(ParamDescription::new("type", ParamType::String, "bullet"));
        assert!(matches!(dup.validate(), Err(Error::InvalidSchema(_))));

        let bad_default = ElementSchema::new("x")
            .param(ParamDescription::new("g", ParamType::Vector3, "0 0"));
        assert!(bad_default.validate().is_err());

        assert!(ElementSchema::new("").validate().is_err());
    }

    #[test]
    fn test_schema_from_yaml() {
        let yaml = r#"
name: light
params:
  - key: diffuse
    type: color
    default: "1 1 1 1"
  - key: cast_shadows
    type: bool
    default: "true"
    required: true
"#;
        let schema: ElementSchema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.params[0].type_, ParamType::Color);
        assert!(schema.params[1].required);
        assert!(schema.validate().is_ok());
    }
}
