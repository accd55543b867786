use thiserror::Error;
use yamlknobs_doc::Value;

use crate::options::Options;
use crate::registry::{ControlKind, UnknownKind};

/// Why an annotation value could not be read as a control description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("annotation must be a mapping, found {0}")]
    NotAMapping(&'static str),
    #[error("annotation has no `type`")]
    MissingType,
    #[error("`type` must be a string, found {0}")]
    TypeNotAString(&'static str),
    #[error(transparent)]
    UnknownType(#[from] UnknownKind),
    #[error("`args` must be a mapping, found {0}")]
    ArgsNotAMapping(&'static str),
    #[error("`nested` must be a boolean, found {0}")]
    NestedNotABool(&'static str),
}

/// `{type: <kind>, args: {...}, nested: <bool>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub kind: ControlKind,
    pub options: Options,
    /// Open inside the current container instead of after it.
    pub nested: bool,
}

impl ControlSpec {
    pub fn from_value(value: &Value) -> Result<Self, SpecError> {
        let Value::Map(node) = value else {
            return Err(SpecError::NotAMapping(value.type_name()));
        };
        let node = node.borrow();

        let kind = match node.get("type") {
            None | Some(Value::Null) => return Err(SpecError::MissingType),
            Some(Value::Str(name)) => ControlKind::from_name(name)?,
            Some(other) => return Err(SpecError::TypeNotAString(other.type_name())),
        };

        let options = match node.get("args") {
            None | Some(Value::Null) => Options::new(),
            Some(Value::Map(args)) => Options::from_node(&args.borrow()),
            Some(other) => return Err(SpecError::ArgsNotAMapping(other.type_name())),
        };

        let nested = match node.get("nested") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(SpecError::NestedNotABool(other.type_name())),
        };

        Ok(Self { kind, options, nested })
    }
}
