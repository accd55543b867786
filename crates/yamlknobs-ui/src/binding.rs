use std::collections::HashMap;

use indexmap::IndexMap;
use yamlknobs_doc::{NodeRef, Value};

use crate::control::{ControlHandle, ControlId};

/// Ties a control to the key it edits inside the mapping that owns the key.
#[derive(Debug, Clone)]
pub struct BindingRecord {
    pub owner: NodeRef,
    pub key: String,
    pub control: ControlHandle,
}

impl BindingRecord {
    /// The value currently stored in the document, `None` if the key is absent.
    pub fn document_value(&self) -> Option<Value> {
        self.owner.borrow().get(&self.key).cloned()
    }
}

/// Flat, insertion-ordered table of bindings keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct BindingTable {
    by_name: IndexMap<String, BindingRecord>,
    by_control: HashMap<ControlId, String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `record` under `name`, returning the record it replaced.
    pub fn insert(&mut self, name: impl Into<String>, record: BindingRecord) -> Option<BindingRecord> {
        let name = name.into();
        self.by_control.insert(record.control.id(), name.clone());
        let previous = self.by_name.insert(name, record);
        if let Some(prev) = &previous {
            if !self.by_name.values().any(|r| r.control.ptr_eq(&prev.control)) {
                self.by_control.remove(&prev.control.id());
            }
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&BindingRecord> {
        self.by_name.get(name)
    }

    /// Find the binding of `control` by identity.
    pub fn find_by_control(&self, control: &ControlHandle) -> Option<(&str, &BindingRecord)> {
        let name = self.by_control.get(&control.id())?;
        let record = self.by_name.get(name)?;
        record.control.ptr_eq(control).then_some((name.as_str(), record))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindingRecord)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
