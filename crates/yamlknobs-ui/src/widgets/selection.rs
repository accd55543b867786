use yamlknobs_doc::Value;

use crate::control::{Control, ControlError};
use crate::options::Options;
use crate::registry::ControlKind;

/// One entry of an `options` list: `value` or `[label, value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: Value,
}

fn parse_options(options: &Options) -> Result<Vec<ChoiceOption>, ControlError> {
    let Some(items) = options.seq("options")? else {
        return Ok(Vec::new());
    };
    items
        .iter()
        .map(|item| match item {
            Value::Seq(pair) if pair.len() == 2 && pair.iter().all(Value::is_scalar) => {
                Ok(ChoiceOption { label: pair[0].to_string(), value: pair[1].clone() })
            }
            v if v.is_scalar() => Ok(ChoiceOption { label: v.to_string(), value: v.clone() }),
            v => Err(ControlError::BadOption {
                option: "options",
                expected: "a sequence of scalars or [label, value] pairs",
                found: v.type_name(),
            }),
        })
        .collect()
}

// ── Choice ────────────────────────────────────────────────────────────────

/// `Dropdown` / `RadioButtons`: exactly one of the options.
///
/// A null value selects the first option. Values outside the options are
/// rejected, including at construction.
pub struct Choice {
    kind: ControlKind,
    description: String,
    options: Vec<ChoiceOption>,
    selected: Option<usize>,
}

impl Choice {
    pub fn from_options(kind: ControlKind, options: &Options) -> Result<Self, ControlError> {
        let mut choice = Self {
            kind,
            description: options.description()?,
            options: parse_options(options)?,
            selected: None,
        };
        match options.value() {
            Value::Null => choice.selected = (!choice.options.is_empty()).then_some(0),
            v => choice.set_value(v.clone())?,
        }
        Ok(choice)
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].label.as_str())
    }
}

impl Control for Choice {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        self.selected.map_or(Value::Null, |i| self.options[i].value.clone())
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        let index = self
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| ControlError::rejected(self.kind, &value, "not one of the options"))?;
        self.selected = Some(index);
        Ok(())
    }

    fn summary(&self) -> String {
        let labels: Vec<String> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| if Some(i) == self.selected { format!("({})", o.label) } else { o.label.clone() })
            .collect();
        format!("{}: {}", self.description, labels.join(" | "))
    }
}

// ── MultiChoice ───────────────────────────────────────────────────────────

/// `SelectMultiple`: any subset of the options, reported in option order.
pub struct MultiChoice {
    description: String,
    options: Vec<ChoiceOption>,
    selected: Vec<bool>,
}

impl MultiChoice {
    pub fn from_options(options: &Options) -> Result<Self, ControlError> {
        let parsed = parse_options(options)?;
        let mut multi = Self {
            description: options.description()?,
            selected: vec![false; parsed.len()],
            options: parsed,
        };
        if !options.value().is_null() {
            multi.set_value(options.value().clone())?;
        }
        Ok(multi)
    }
}

impl Control for MultiChoice {
    fn kind(&self) -> ControlKind {
        ControlKind::SelectMultiple
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        Value::Seq(
            self.options
                .iter()
                .zip(&self.selected)
                .filter(|(_, on)| **on)
                .map(|(o, _)| o.value.clone())
                .collect(),
        )
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        let kind = ControlKind::SelectMultiple;
        let Value::Seq(wanted) = &value else {
            return Err(ControlError::rejected(kind, &value, "expected a sequence"));
        };
        let mut selected = vec![false; self.options.len()];
        for w in wanted {
            let i = self
                .options
                .iter()
                .position(|o| &o.value == w)
                .ok_or_else(|| ControlError::rejected(kind, &value, "contains a value outside the options"))?;
            selected[i] = true;
        }
        self.selected = selected;
        Ok(())
    }

    fn summary(&self) -> String {
        let labels: Vec<String> = self
            .options
            .iter()
            .zip(&self.selected)
            .map(|(o, on)| if *on { format!("[{}]", o.label) } else { o.label.clone() })
            .collect();
        format!("{}: {}", self.description, labels.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Value {
        Value::Seq(items.iter().map(|s| Value::from(*s)).collect())
    }

    #[test]
    fn null_selects_first() {
        let opts = Options::new().with("options", seq(&["adam", "sgd"]));
        let c = Choice::from_options(ControlKind::Dropdown, &opts).unwrap();
        assert_eq!(c.value(), Value::from("adam"));
    }

    #[test]
    fn value_outside_options_is_rejected() {
        let opts = Options::new().with("options", seq(&["adam", "sgd"])).with("value", "rmsprop");
        assert!(Choice::from_options(ControlKind::Dropdown, &opts).is_err());
    }

    #[test]
    fn labelled_pairs() {
        let pairs = Value::Seq(vec![
            Value::Seq(vec![Value::from("Small"), Value::Int(1)]),
            Value::Seq(vec![Value::from("Large"), Value::Int(8)]),
        ]);
        let opts = Options::new().with("options", pairs).with("value", 8i64);
        let c = Choice::from_options(ControlKind::RadioButtons, &opts).unwrap();
        assert_eq!(c.selected_label(), Some("Large"));
        assert_eq!(c.value(), Value::Int(8));
    }

    #[test]
    fn multi_reports_in_option_order() {
        let opts = Options::new().with("options", seq(&["a", "b", "c"]));
        let mut m = MultiChoice::from_options(&opts).unwrap();
        assert_eq!(m.value(), Value::Seq(vec![]));
        m.set_value(seq(&["c", "a"])).unwrap();
        assert_eq!(m.value(), seq(&["a", "c"]));
        assert!(m.set_value(seq(&["z"])).is_err());
        assert_eq!(m.value(), seq(&["a", "c"]));
    }
}
