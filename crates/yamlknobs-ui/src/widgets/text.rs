use yamlknobs_doc::Value;

use crate::control::{Control, ControlError};
use crate::options::Options;
use crate::registry::ControlKind;

/// `Label` (read-only) or `Text` (editable) string control.
///
/// Scalar values are shown as text: binding `Text` to `retries: 3` starts with
/// `"3"` and writes a string back once edited.
pub struct TextField {
    kind: ControlKind,
    description: String,
    value: String,
    placeholder: String,
}

impl TextField {
    pub fn from_options(kind: ControlKind, options: &Options) -> Result<Self, ControlError> {
        Ok(Self {
            kind,
            description: options.description()?,
            value: coerce_text(kind, options.value())?,
            placeholder: options.string("placeholder")?.unwrap_or_default(),
        })
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

fn coerce_text(kind: ControlKind, value: &Value) -> Result<String, ControlError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Str(s) => Ok(s.clone()),
        v if v.is_scalar() => Ok(v.to_string()),
        v => Err(ControlError::rejected(kind, v, "expected text")),
    }
}

impl Control for TextField {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        Value::Str(self.value.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        self.value = coerce_text(self.kind, &value)?;
        Ok(())
    }

    fn summary(&self) -> String {
        if self.kind == ControlKind::Label {
            self.value.clone()
        } else if self.value.is_empty() && !self.placeholder.is_empty() {
            format!("{}: <{}>", self.description, self.placeholder)
        } else {
            format!("{}: {:?}", self.description, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_become_text() {
        let opts = Options::new().with("value", 3i64);
        let t = TextField::from_options(ControlKind::Text, &opts).unwrap();
        assert_eq!(t.value(), Value::from("3"));
    }

    #[test]
    fn null_is_empty() {
        let t = TextField::from_options(ControlKind::Text, &Options::new()).unwrap();
        assert_eq!(t.value(), Value::from(""));
    }

    #[test]
    fn sequences_are_rejected() {
        let mut t = TextField::from_options(ControlKind::Text, &Options::new()).unwrap();
        assert!(t.set_value(Value::Seq(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn label_summary_is_its_text() {
        let opts = Options::new().with("value", "Settings").with("description", "Title");
        let t = TextField::from_options(ControlKind::Label, &opts).unwrap();
        assert_eq!(t.summary(), "Settings");
    }
}
