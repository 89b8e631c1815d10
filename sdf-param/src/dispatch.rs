//! Named property dispatch.
//!
//! A subsystem exposes a fixed [`PropertyTable`] mapping property names to
//! typed accessors. [`PropertyHost`] owns the subsystem state behind one
//! lock and applies externally supplied name/value pairs through the table:
//! unknown keys are tolerated, tagged values are coerced to the declared
//! type, and the typed setter is called. The key `"type"` names the
//! subsystem itself and can never be written.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::ParamError;
use crate::types::ParamType;
use crate::wire::{TaggedValue, WireKind, WireParamBatch};

/// Key reserved for the subsystem's identity.
pub const RESERVED_TYPE_KEY: &str = "type";

type Getter<S> = Box<dyn Fn(&S) -> TaggedValue + Send + Sync>;
/// Returns `false` when the tagged value does not coerce.
type Setter<S> = Box<dyn Fn(&mut S, &TaggedValue) -> bool + Send + Sync>;

struct Property<S> {
    ty: ParamType,
    get: Getter<S>,
    set: Option<Setter<S>>,
}

/// Fixed map from property name to typed accessors over a state `S`.
pub struct PropertyTable<S> {
    properties: HashMap<String, Property<S>>,
}

impl<S> std::fmt::Debug for PropertyTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyTable")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Builder for [`PropertyTable`].
pub struct PropertyTableBuilder<S> {
    properties: HashMap<String, Property<S>>,
}

impl<S> Default for PropertyTableBuilder<S> {
    fn default() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }
}

impl<S: 'static> PropertyTableBuilder<S> {
    /// Declare a read/write property of type `T`.
    pub fn property<T, G, W>(mut self, key: &str, get: G, set: W) -> Self
    where
        T: WireKind + 'static,
        G: Fn(&S) -> T + Send + Sync + 'static,
        W: Fn(&mut S, T) + Send + Sync + 'static,
    {
        let setter: Setter<S> = Box::new(move |state, value| match T::from_tagged(value) {
            Some(v) => {
                set(state, v);
                true
            }
            None => false,
        });
        self.properties.insert(
            key.to_string(),
            Property {
                ty: T::TYPE,
                get: Box::new(move |state| get(state).into_tagged()),
                set: Some(setter),
            },
        );
        self
    }

    /// Declare a property that can be read but never applied.
    pub fn read_only<T, G>(mut self, key: &str, get: G) -> Self
    where
        T: WireKind + 'static,
        G: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.properties.insert(
            key.to_string(),
            Property {
                ty: T::TYPE,
                get: Box::new(move |state| get(state).into_tagged()),
                set: None,
            },
        );
        self
    }

    pub fn build(self) -> PropertyTable<S> {
        PropertyTable {
            properties: self.properties,
        }
    }
}

impl<S: 'static> PropertyTable<S> {
    pub fn builder() -> PropertyTableBuilder<S> {
        PropertyTableBuilder::default()
    }
}

impl<S> PropertyTable<S> {
    /// Property names, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn property_type(&self, key: &str) -> Option<ParamType> {
        self.properties.get(key).map(|p| p.ty)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Coerce `value` to the declared type of `key` and store it in `state`.
    pub fn apply(&self, state: &mut S, key: &str, value: &TaggedValue) -> Result<(), ParamError> {
        if key == RESERVED_TYPE_KEY {
            return Err(ParamError::ReadOnlyKey(key.to_string()));
        }
        let property = self
            .properties
            .get(key)
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))?;
        let setter = property
            .set
            .as_ref()
            .ok_or_else(|| ParamError::ReadOnlyKey(key.to_string()))?;

        if setter(state, value) {
            Ok(())
        } else {
            Err(ParamError::TypeMismatch {
                key: key.to_string(),
                stored: property.ty,
                requested: value.param_type(),
            })
        }
    }

    pub fn read(&self, state: &S, key: &str) -> Result<TaggedValue, ParamError> {
        self.properties
            .get(key)
            .map(|p| (p.get)(state))
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))
    }
}

/// Outcome of applying one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Keys stored, in batch order.
    pub applied: Vec<String>,
    pub failures: Vec<ParamError>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Subsystem state guarded by a single lock, plus its property table.
pub struct PropertyHost<S> {
    name: String,
    state: Mutex<S>,
    table: PropertyTable<S>,
}

impl<S> std::fmt::Debug for PropertyHost<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyHost")
            .field("name", &self.name)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<S> PropertyHost<S> {
    pub fn new(name: impl Into<String>, state: S, table: PropertyTable<S>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(state),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &PropertyTable<S> {
        &self.table
    }

    /// Run `f` against the locked state.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.state.lock())
    }

    pub fn into_inner(self) -> S {
        self.state.into_inner()
    }

    /// Apply one named value. Failures are reported and return `false`.
    pub fn apply_named(&self, key: &str, value: TaggedValue) -> bool {
        let mut state = self.state.lock();
        self.apply_locked(&mut state, key, &value).is_ok()
    }

    /// Read one named value. Unknown keys are reported and yield `None`.
    pub fn read_named(&self, key: &str) -> Option<TaggedValue> {
        let state = self.state.lock();
        match self.table.read(&state, key) {
            Ok(v) => Some(v),
            Err(e) => {
                e.report();
                None
            }
        }
    }

    /// Apply every pair in order under one lock; failures do not stop the batch.
    pub fn apply_batch<K: AsRef<str>>(&self, batch: &[(K, TaggedValue)]) -> ApplyReport {
        let mut state = self.state.lock();
        let mut report = ApplyReport::default();
        for (key, value) in batch {
            let key = key.as_ref();
            match self.apply_locked(&mut state, key, value) {
                Ok(()) => report.applied.push(key.to_string()),
                Err(e) => report.failures.push(e),
            }
        }
        drop(state);
        self.log_report(&report);
        report
    }

    /// Decode and apply a wire batch. Records without a payload are skipped.
    pub fn apply_wire(&self, batch: &WireParamBatch) -> ApplyReport {
        let mut state = self.state.lock();
        let mut report = ApplyReport::default();
        for param in &batch.parameters {
            let result = param
                .decode()
                .and_then(|value| self.apply_locked(&mut state, &param.name, &value));
            match result {
                Ok(()) => report.applied.push(param.name.clone()),
                Err(e) => {
                    if matches!(e, ParamError::EmptyValue(_)) {
                        e.report();
                    }
                    report.failures.push(e);
                }
            }
        }
        drop(state);
        self.log_report(&report);
        report
    }

    fn apply_locked(&self, state: &mut S, key: &str, value: &TaggedValue) -> Result<(), ParamError> {
        let result = self.table.apply(state, key, value);
        match &result {
            Ok(()) => debug!(subsystem = %self.name, key, ?value, "property applied"),
            Err(e) => e.report(),
        }
        result
    }

    fn log_report(&self, report: &ApplyReport) {
        info!(
            subsystem = %self.name,
            applied = report.applied.len(),
            failed = report.failures.len(),
            "property batch applied"
        );
    }
}
