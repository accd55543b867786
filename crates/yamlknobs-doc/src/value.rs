use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::DocError;

// `i64::MIN` is exactly representable; `i64::MAX` is not, so the upper
// bound is the first float past it (2^63), exclusive.
const I64_MIN_F: f64 = i64::MIN as f64;
const I64_END_F: f64 = 9_223_372_036_854_775_808.0;

/// Shared handle to a mapping inside the live document.
///
/// Cloning the handle does not copy the mapping: every clone observes and
/// mutates the same node, which is what lets a binding write back into the
/// exact place it was created from.
pub type NodeRef = Rc<RefCell<Node>>;

// ── Value ─────────────────────────────────────────────────────────────────

/// A value stored under a key of a [`Node`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; smaller ones are always `Int`.
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(NodeRef),
}

impl Value {
    /// Wrap a fresh node as a value.
    pub fn map(node: Node) -> Self {
        Value::Map(Rc::new(RefCell::new(node)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Map(_))
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Value::Map(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            Value::Float(f) if f.fract() == 0.0 && (I64_MIN_F..I64_END_F).contains(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Equality that compares numbers by value, so `1` and `1.0` match.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(_), _) | (_, Value::Float(_)) => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            _ => self == other,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    // ── serde_yaml conversion ─────────────────────────────────────────────

    /// Convert a parsed YAML value into a live value tree.
    ///
    /// Tags are dropped (the tagged value is kept). Scalar mapping keys are
    /// stringified; mapping or sequence keys are rejected.
    pub fn from_yaml(yaml: serde_yaml::Value) -> Result<Self, DocError> {
        Ok(match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                (None, None) => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => Value::Str(s),
            serde_yaml::Value::Sequence(items) => Value::Seq(
                items.into_iter().map(Value::from_yaml).collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(mapping) => {
                let mut node = Node::new();
                for (k, v) in mapping {
                    node.insert(yaml_key(k)?, Value::from_yaml(v)?);
                }
                Value::map(node)
            }
            serde_yaml::Value::Tagged(tagged) => Value::from_yaml(tagged.value)?,
        })
    }

    /// Parse a single YAML fragment such as `7`, `true` or `[a, b]`.
    pub fn parse(src: &str) -> Result<Self, DocError> {
        Value::from_yaml(serde_yaml::from_str(src)?)
    }

    /// Convert back into a `serde_yaml` value for serialization.
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Int(i) => serde_yaml::Value::Number((*i).into()),
            Value::UInt(u) => serde_yaml::Value::Number((*u).into()),
            Value::Float(f) => serde_yaml::Value::Number((*f).into()),
            Value::Str(s) => serde_yaml::Value::String(s.clone()),
            Value::Seq(items) => {
                serde_yaml::Value::Sequence(items.iter().map(Value::to_yaml).collect())
            }
            Value::Map(node) => serde_yaml::Value::Mapping(node.borrow().to_yaml()),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, DocError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) => Err(DocError::ComplexKey("sequence")),
        serde_yaml::Value::Mapping(_) => Err(DocError::ComplexKey("mapping")),
    }
}

/// Human-readable rendering: strings unquoted, containers in flow style.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(node) => {
                f.write_str("{")?;
                for (i, (k, v)) in node.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

/// An ordered mapping from string keys to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    entries: IndexMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Move this node behind a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
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

    pub fn to_yaml(&self) -> serde_yaml::Mapping {
        let mut mapping = serde_yaml::Mapping::new();
        for (k, v) in &self.entries {
            mapping.insert(serde_yaml::Value::String(k.clone()), v.to_yaml());
        }
        mapping
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> serde_yaml::Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn numbers_keep_int_float_split() {
        let v = Value::from_yaml(yaml("[1, 2.5, -3]")).unwrap();
        assert_eq!(v, Value::Seq(vec![Value::Int(1), Value::Float(2.5), Value::Int(-3)]));
    }

    #[test]
    fn integral_floats_outside_i64_have_no_int_view() {
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
        assert_eq!(Value::Float(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Value::Float(1e20).as_i64(), None);
        assert_eq!(Value::Float(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
    }

    #[test]
    fn same_value_ignores_number_representation() {
        assert!(Value::Int(1).same_value(&Value::Float(1.0)));
        assert!(Value::Float(2.5).same_value(&Value::Float(2.5)));
        assert!(!Value::Int(1).same_value(&Value::Float(1.5)));
        assert!(!Value::Float(1.0).same_value(&Value::from("1")));
        assert!(Value::from("a").same_value(&Value::from("a")));
    }

    #[test]
    fn large_unsigned_stays_integral() {
        assert_eq!(Value::parse("18446744073709551615").unwrap(), Value::UInt(u64::MAX));
        assert_eq!(Value::parse("9223372036854775807").unwrap(), Value::Int(i64::MAX));
    }

    #[test]
    fn parse_fragments() {
        assert_eq!(Value::parse("7").unwrap(), Value::Int(7));
        assert_eq!(Value::parse("adam").unwrap(), Value::from("adam"));
        assert_eq!(Value::parse("[true]").unwrap(), Value::Seq(vec![Value::Bool(true)]));
    }

    #[test]
    fn mapping_order_is_preserved() {
        let v = Value::from_yaml(yaml("z: 1\na: 2\nm: 3")).unwrap();
        let node = v.as_node().unwrap().borrow();
        assert_eq!(node.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let v = Value::from_yaml(yaml("1: one\ntrue: yes")).unwrap();
        let node = v.as_node().unwrap().borrow();
        assert_eq!(node.get("1"), Some(&Value::from("one")));
        assert!(node.contains_key("true"));
    }

    #[test]
    fn complex_keys_are_rejected() {
        let err = Value::from_yaml(yaml("? [a, b]\n: 1")).unwrap_err();
        assert!(matches!(err, DocError::ComplexKey("sequence")));
    }

    #[test]
    fn tags_are_dropped() {
        let v = Value::from_yaml(yaml("!thing 5")).unwrap();
        assert_eq!(v, Value::Int(5));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut node: Node =
            [("a", Value::Int(1)), ("b", Value::Int(2)), ("c", Value::Int(3))].into_iter().collect();
        node.remove("b");
        assert_eq!(node.keys().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn clones_share_the_node() {
        let v = Value::map(Node::new());
        let alias = v.clone();
        alias.as_node().unwrap().borrow_mut().insert("k", Value::Bool(true));
        assert_eq!(v.as_node().unwrap().borrow().get("k"), Some(&Value::Bool(true)));
    }

    #[test]
    fn integral_float_reads_as_int() {
        assert_eq!(Value::Float(4.0).as_i64(), Some(4));
        assert_eq!(Value::Float(4.5).as_i64(), None);
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    }

    #[test]
    fn display_is_flow_style() {
        let v = Value::from_yaml(yaml("a: [1, x]\nb: {c: null}")).unwrap();
        assert_eq!(v.to_string(), "{a: [1, x], b: {c: null}}");
    }
}
