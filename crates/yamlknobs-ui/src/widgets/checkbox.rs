use yamlknobs_doc::Value;

use crate::control::{Control, ControlError};
use crate::options::Options;
use crate::registry::ControlKind;

/// Boolean toggle. A null value starts unchecked.
pub struct Checkbox {
    description: String,
    checked: bool,
}

impl Checkbox {
    pub fn from_options(options: &Options) -> Result<Self, ControlError> {
        let checked = match options.value() {
            Value::Null => false,
            v => coerce_bool(v)?,
        };
        Ok(Self { description: options.description()?, checked })
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

fn coerce_bool(value: &Value) -> Result<bool, ControlError> {
    value
        .as_bool()
        .ok_or_else(|| ControlError::rejected(ControlKind::Checkbox, value, "expected true or false"))
}

impl Control for Checkbox {
    fn kind(&self) -> ControlKind {
        ControlKind::Checkbox
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        Value::Bool(self.checked)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        self.checked = coerce_bool(&value)?;
        Ok(())
    }

    fn summary(&self) -> String {
        let mark = if self.checked { "x" } else { " " };
        format!("[{mark}] {}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_value() {
        let c = Checkbox::from_options(&Options::new().with("value", true)).unwrap();
        assert!(c.is_checked());
        assert!(!Checkbox::from_options(&Options::new()).unwrap().is_checked());
    }

    #[test]
    fn rejects_non_bool() {
        assert!(Checkbox::from_options(&Options::new().with("value", 1i64)).is_err());
        let mut c = Checkbox::from_options(&Options::new()).unwrap();
        assert!(c.set_value(Value::from("yes")).is_err());
        assert!(!c.is_checked());
    }
}
