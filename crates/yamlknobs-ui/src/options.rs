use indexmap::IndexMap;
use yamlknobs_doc::{Node, Value};

use crate::control::ControlError;

/// Option naming a control's display label.
pub const DESCRIPTION: &str = "description";
/// Option carrying a control's initial value.
pub const VALUE: &str = "value";

/// Named construction options handed to a toolkit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: IndexMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the entries of an `args` mapping.
    pub fn from_node(node: &Node) -> Self {
        Self { entries: node.iter().map(|(k, v)| (k.to_string(), v.clone())).collect() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Insert `value` only if `key` is not already set.
    pub fn set_default(&mut self, key: &str, value: Value) {
        if !self.entries.contains_key(key) {
            self.entries.insert(key.to_string(), value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `value` option, `Null` when unset.
    pub fn value(&self) -> &Value {
        self.entries.get(VALUE).unwrap_or(&Value::Null)
    }

    pub fn description(&self) -> Result<String, ControlError> {
        Ok(self.string(DESCRIPTION)?.unwrap_or_default())
    }

    // ── Typed accessors ───────────────────────────────────────────────────
    //
    // Absent or null options read as `None`; present options of the wrong
    // shape are an error.

    pub fn f64(&self, key: &'static str) -> Result<Option<f64>, ControlError> {
        self.typed(key, "a number", Value::as_f64)
    }

    pub fn i64(&self, key: &'static str) -> Result<Option<i64>, ControlError> {
        self.typed(key, "an integer", Value::as_i64)
    }

    pub fn bool(&self, key: &'static str) -> Result<Option<bool>, ControlError> {
        self.typed(key, "a boolean", Value::as_bool)
    }

    /// Strings, plus scalars rendered as text.
    pub fn string(&self, key: &'static str) -> Result<Option<String>, ControlError> {
        self.typed(key, "a string", |v| v.is_scalar().then(|| v.to_string()))
    }

    pub fn seq(&self, key: &'static str) -> Result<Option<&[Value]>, ControlError> {
        self.typed(key, "a sequence", Value::as_seq)
    }

    fn typed<'a, T>(
        &'a self,
        key: &'static str,
        expected: &'static str,
        read: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, ControlError> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => read(v)
                .map(Some)
                .ok_or(ControlError::BadOption { option: key, expected, found: v.type_name() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_default_keeps_explicit_entries() {
        let mut opts = Options::new().with(DESCRIPTION, "Gain");
        opts.set_default(DESCRIPTION, Value::from("x"));
        opts.set_default(VALUE, Value::Int(1));
        assert_eq!(opts.description().unwrap(), "Gain");
        assert_eq!(opts.value(), &Value::Int(1));
    }

    #[test]
    fn typed_reads() {
        let opts = Options::new().with("min", 0i64).with("max", 2.5).with("flag", true).with("none", Value::Null);
        assert_eq!(opts.i64("min").unwrap(), Some(0));
        assert_eq!(opts.f64("max").unwrap(), Some(2.5));
        assert_eq!(opts.bool("flag").unwrap(), Some(true));
        assert_eq!(opts.i64("none").unwrap(), None);
        assert_eq!(opts.i64("missing").unwrap(), None);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let opts = Options::new().with("max", "lots");
        let err = opts.f64("max").unwrap_err();
        assert_eq!(err, ControlError::BadOption { option: "max", expected: "a number", found: "string" });
    }

    #[test]
    fn scalars_read_as_strings() {
        let opts = Options::new().with(DESCRIPTION, 42i64);
        assert_eq!(opts.description().unwrap(), "42");
    }
}
