//! Registration sessions.
//!
//! A [`RegistrySession`] observes every parameter declared while one
//! document is being loaded. It holds weak references only, so it never
//! extends a parameter's lifetime. Ending the session hands back the
//! still-live parameters in declaration order for a validation pass.

use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::ParamError;
use crate::param::{Param, ParamPtr};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Non-owning, ordered record of the parameters declared in one load.
#[derive(Debug)]
pub struct RegistrySession {
    id: u64,
    label: String,
    entries: Vec<Weak<RwLock<Param>>>,
}

impl RegistrySession {
    /// Start a new session. `label` only appears in logs.
    pub fn begin(label: impl Into<String>) -> Self {
        let session = Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
            entries: Vec::new(),
        };
        debug!(session = session.id, label = %session.label, "registry session started");
        session
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `param`. Registering the same parameter twice is a no-op.
    pub fn register(&mut self, param: &ParamPtr) {
        let weak = Arc::downgrade(param);
        if self.entries.iter().any(|e| e.ptr_eq(&weak)) {
            debug!(
                session = self.id,
                key = %param.read().key(),
                "parameter already registered"
            );
            return;
        }
        self.entries.push(weak);
    }

    /// Close the session and return the live parameters in registration order.
    pub fn end(self) -> Vec<ParamPtr> {
        let registered = self.entries.len();
        let live: Vec<ParamPtr> = self.entries.iter().filter_map(Weak::upgrade).collect();
        debug!(
            session = self.id,
            label = %self.label,
            registered,
            live = live.len(),
            "registry session ended"
        );
        live
    }
}

/// Check every required parameter has been set.
///
/// Reports and returns one [`ParamError::UnmetRequirement`] per offender;
/// the pass always visits every parameter.
pub fn validate_required(params: &[ParamPtr]) -> Vec<ParamError> {
    params
        .iter()
        .filter_map(|p| {
            let p = p.read();
            (p.required() && !p.is_set()).then(|| ParamError::UnmetRequirement(p.key().to_string()))
        })
        .inspect(ParamError::report)
        .collect()
}
