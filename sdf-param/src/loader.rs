//! YAML document loading.
//!
//! A document is a flat mapping from parameter key to literal:
//!
//! ```yaml
//! real_time_factor: "1.5"
//! max_step_size: 0.002
//! gravity: "0 0 -9.8"
//! magnetic_field: [5.5645e-6, 22.8758e-6, -42.3884e-6]
//! ```
//!
//! Every literal goes through the parameter's string setter, so quoted and
//! unquoted scalars behave the same. Sequences of scalars are joined with
//! single spaces, which makes `[0, 0, -9.8]` equivalent to `"0 0 -9.8"`.
//!
//! Loading is best effort: unknown keys, nested mappings and malformed
//! literals are reported and skipped, and required parameters that were never set are
//! collected after the registry session closes.

use std::path::Path;

use sdf_param_codec::ParamCodec;
use serde_yaml::Value;
use tracing::{debug, info};

use crate::Builder;
use crate::element::{Element, ElementSchema};
use crate::error::{Error, ParamError, Result, Severity};
use crate::registry::{RegistrySession, validate_required};

/// Diagnostics gathered while loading one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of literals stored into parameters.
    pub applied: usize,
    pub diagnostics: Vec<ParamError>,
}

impl LoadReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn unmet_requirements(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                ParamError::UnmetRequirement(key) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }
}

/// A loaded element together with what went wrong loading it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub element: Element,
    pub report: LoadReport,
}

/// Loads documents against a fixed element schema.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    schema: ElementSchema,
    fail_on_unmet_requirement: bool,
}

/// Builder for [`DocumentLoader`].
#[derive(Debug, Default)]
pub struct DocumentLoaderBuilder {
    schema: Option<ElementSchema>,
    fail_on_unmet_requirement: bool,
}

impl DocumentLoaderBuilder {
    pub fn schema(mut self, schema: ElementSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Treat required-but-unset parameters as a load failure.
    pub fn fail_on_unmet_requirement(mut self, enabled: bool) -> Self {
        self.fail_on_unmet_requirement = enabled;
        self
    }
}

impl Builder for DocumentLoaderBuilder {
    type Output = DocumentLoader;

    fn build(self) -> Result<DocumentLoader> {
        let schema = self
            .schema
            .ok_or_else(|| Error::InvalidSchema("no schema given".into()))?;
        schema.validate()?;
        Ok(DocumentLoader {
            schema,
            fail_on_unmet_requirement: self.fail_on_unmet_requirement,
        })
    }
}

impl DocumentLoader {
    pub fn builder() -> DocumentLoaderBuilder {
        DocumentLoaderBuilder::default()
    }

    pub fn schema(&self) -> &ElementSchema {
        &self.schema
    }

    /// Load a document from a YAML file.
    pub fn load_file(&self, path: &Path) -> Result<LoadOutcome> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&content)
    }

    /// Load a document from a YAML string.
    pub fn load_str(&self, yaml: &str) -> Result<LoadOutcome> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        let mapping = match &doc {
            Value::Mapping(mapping) => Some(mapping),
            // An empty document sets nothing.
            Value::Null => None,
            _ => return Err(Error::InvalidDocument("root must be a mapping".into())),
        };

        let mut session = RegistrySession::begin(&self.schema.name);
        let element = self.schema.instantiate(&mut session)?;
        let mut report = LoadReport::default();

        for (key, value) in mapping.into_iter().flatten() {
            let key = match scalar_literal(key) {
                Some(key) => key,
                None => format!("{key:?}"),
            };
            let key = key.as_str();

            let Some(param) = element.param(key) else {
                let diagnostic = ParamError::UnknownKey(key.to_string());
                diagnostic.report();
                report.diagnostics.push(diagnostic);
                continue;
            };

            let Some(text) = yaml_literal(value) else {
                let diagnostic = ParamError::NotALiteral(key.to_string());
                diagnostic.report();
                report.diagnostics.push(diagnostic);
                continue;
            };

            match param.write().try_set_from_string(&text) {
                Ok(()) => {
                    debug!(element = %self.schema.name, key, value = %text, "set");
                    report.applied += 1;
                }
                Err(e) => {
                    e.report();
                    report.diagnostics.push(e);
                }
            }
        }

        let registered = session.end();
        report.diagnostics.extend(validate_required(&registered));

        info!(
            element = %self.schema.name,
            applied = report.applied,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "document loaded"
        );

        if self.fail_on_unmet_requirement {
            let unmet = report.unmet_requirements();
            if !unmet.is_empty() {
                return Err(Error::UnmetRequirements(unmet));
            }
        }

        Ok(LoadOutcome { element, report })
    }
}

/// Literal text of a YAML scalar, or of a sequence of scalars joined by spaces.
fn yaml_literal(value: &Value) -> Option<String> {
    match value {
        Value::Sequence(seq) => {
            let parts: Option<Vec<String>> = seq.iter().map(scalar_literal).collect();
            parts.map(|p| p.join(" "))
        }
        other => scalar_literal(other),
    }
}

fn scalar_literal(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        // YAML spells non-finite floats `.inf` and `.nan`.
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && !f.is_finite() => f.encode(),
            _ => n.to_string(),
        }),
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sdf_param_codec::Vector3;

    use super::*;
    use crate::element::ParamDescription;
    use crate::types::ParamType;

    fn loader() -> DocumentLoader {
        let schema = ElementSchema::new("physics")
            .param(ParamDescription::new("real_time_factor", ParamType::Double, "1"))
            .param(ParamDescription::new("gravity", ParamType::Vector3, "0 0 -9.8"))
            .param(ParamDescription::new("max_contacts", ParamType::UInt, "20"))
            .param(ParamDescription::new("solver", ParamType::String, "quick").required());
        DocumentLoader::builder().schema(schema).build().unwrap()
    }

    #[test]
    fn test_load_literals() {
        let yaml = r#"
real_time_factor: "1.5"
gravity: "0 0 -9.8"
max_contacts: 10
solver: world
"#;
        let outcome = loader().load_str(yaml).unwrap();
        assert_eq!(outcome.report.applied, 4);
        assert!(outcome.report.diagnostics.is_empty());
        assert_eq!(
            outcome.element.get_as_string("real_time_factor").as_deref(),
            Some("1.5")
        );
        assert_eq!(outcome.element.get::<u32>("max_contacts"), Some(10));
    }

    #[test]
    fn test_sequence_literal() {
        let outcome = loader()
            .load_str("gravity: [0, 0, -1.6]\nsolver: quick\n")
            .unwrap();
        assert_eq!(
            outcome.element.get::<Vector3>("gravity"),
            Some(Vector3::new(0.0, 0.0, -1.6))
        );
    }

    #[test]
    fn test_bad_literal_keeps_default_and_continues() {
        let yaml = "real_time_factor: abc\nmax_contacts: -1\nsolver: quick\n";
        let outcome = loader().load_str(yaml).unwrap();
        assert_eq!(outcome.report.applied, 1);
        assert_eq!(outcome.report.error_count(), 2);
        assert_eq!(outcome.element.get::<f64>("real_time_factor"), Some(1.0));
        assert_eq!(outcome.element.get::<u32>("max_contacts"), Some(20));
    }

    #[test]
    fn test_unknown_key_is_warning() {
        let outcome = loader()
            .load_str("not_a_real_key: 1\nsolver: quick\n")
            .unwrap();
        assert_eq!(
            outcome.report.diagnostics,
            vec![ParamError::UnknownKey("not_a_real_key".into())]
        );
        assert_eq!(outcome.report.warning_count(), 1);
        assert!(!outcome.report.has_errors());
    }

    #[test]
    fn test_unmet_requirement_reported() {
        let outcome = loader().load_str("real_time_factor: 2").unwrap();
        assert_eq!(outcome.report.unmet_requirements(), vec!["solver"]);

        let strict = DocumentLoader::builder()
            .schema(loader().schema().clone())
            .fail_on_unmet_requirement(true)
            .build()
            .unwrap();
        assert!(matches!(
            strict.load_str("real_time_factor: 2"),
            Err(Error::UnmetRequirements(keys)) if keys == vec!["solver".to_string()]
        ));
    }

    #[test]
    fn test_empty_document() {
        let outcome = loader().load_str("").unwrap();
        assert_eq!(outcome.report.applied, 0);
        assert_eq!(outcome.report.unmet_requirements().len(), 1);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            loader().load_str("- a\n- b\n"),
            Err(Error::InvalidDocument(_))
        ));
        assert!(matches!(loader().load_str("a: [1"), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_nested_value_skipped_others_kept() {
        let yaml = "real_time_factor: \"1.5\"\ngravity: {x: 0}\nsolver: pgs\n";
        let outcome = loader().load_str(yaml).unwrap();
        assert_eq!(outcome.report.applied, 2);
        assert_eq!(
            outcome.report.diagnostics,
            vec![ParamError::NotALiteral("gravity".into())]
        );
        assert!(outcome.report.has_errors());
        assert_eq!(outcome.element.get::<f64>("real_time_factor"), Some(1.5));
        assert_eq!(
            outcome.element.get::<Vector3>("gravity"),
            Some(Vector3::new(0.0, 0.0, -9.8))
        );
        assert_eq!(outcome.element.get::<String>("solver").as_deref(), Some("pgs"));
    }

    #[test]
    fn test_non_string_key_is_unknown() {
        let outcome = loader().load_str("1: x\nsolver: pgs\n").unwrap();
        assert_eq!(outcome.report.applied, 1);
        assert_eq!(
            outcome.report.diagnostics,
            vec![ParamError::UnknownKey("1".into())]
        );
    }

    #[test]
    fn test_yaml_non_finite_floats() {
        let outcome = loader()
            .load_str("real_time_factor: .inf\nsolver: pgs\n")
            .unwrap();
        assert!(outcome.report.diagnostics.is_empty());
        assert_eq!(
            outcome.element.get::<f64>("real_time_factor"),
            Some(f64::INFINITY)
        );
        assert_eq!(
            outcome.element.get_as_string("real_time_factor").as_deref(),
            Some("inf")
        );

        let outcome = loader()
            .load_str("real_time_factor: -.inf\ngravity: [0, .nan, 1]\nsolver: pgs\n")
            .unwrap();
        assert!(outcome.report.diagnostics.is_empty());
        assert_eq!(
            outcome.element.get::<f64>("real_time_factor"),
            Some(f64::NEG_INFINITY)
        );
        assert!(outcome.element.get::<Vector3>("gravity").unwrap().y.is_nan());
    }

    #[test]
    fn test_builder_requires_schema() {
        assert!(DocumentLoader::builder().build().is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "solver: pgs").unwrap();
        let outcome = loader().load_file(file.path()).unwrap();
        assert_eq!(outcome.element.get::<String>("solver").as_deref(), Some("pgs"));

        assert!(matches!(
            loader().load_file(Path::new("/nonexistent/physics.yaml")),
            Err(Error::Io { .. })
        ));
    }
}
