use yamlknobs_doc::Value;

use crate::control::{Control, ControlError};
use crate::options::Options;
use crate::registry::ControlKind;
use crate::widgets::{coerce_f64, coerce_i64};

// ── IntField ──────────────────────────────────────────────────────────────

/// `IntSlider`, `BoundedIntText` (clamped to `min..=max`, defaults 0..=100)
/// and `IntText` (unbounded).
pub struct IntField {
    kind: ControlKind,
    description: String,
    value: i64,
    bounds: Option<(i64, i64)>,
}

impl IntField {
    pub fn from_options(kind: ControlKind, options: &Options) -> Result<Self, ControlError> {
        let bounds = match kind {
            ControlKind::IntText => None,
            _ => {
                let min = options.i64("min")?.unwrap_or(0);
                let max = options.i64("max")?.unwrap_or(100);
                if min > max {
                    return Err(ControlError::InvalidBounds {
                        kind,
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Some((min, max))
            }
        };
        let mut field = Self {
            kind,
            description: options.description()?,
            value: bounds.map_or(0, |(min, _)| min),
            bounds,
        };
        if !options.value().is_null() {
            field.set_value(options.value().clone())?;
        }
        Ok(field)
    }

    pub fn bounds(&self) -> Option<(i64, i64)> {
        self.bounds
    }
}

impl Control for IntField {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        Value::Int(self.value)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        let v = coerce_i64(self.kind, &value)?;
        self.value = match self.bounds {
            Some((min, max)) => v.clamp(min, max),
            None => v,
        };
        Ok(())
    }

    fn summary(&self) -> String {
        match self.bounds {
            Some((min, max)) => format!("{}: {} ({min}..={max})", self.description, self.value),
            None => format!("{}: {}", self.description, self.value),
        }
    }
}

// ── FloatField ────────────────────────────────────────────────────────────

/// `FloatLogSlider` (exponents `min..=max` of `base`, defaults 0..=4 of 10),
/// `BoundedFloatText` (clamped, defaults 0..=100) and `FloatText` (unbounded).
pub struct FloatField {
    kind: ControlKind,
    description: String,
    value: f64,
    /// Value bounds, already raised to `base` for the log slider.
    bounds: Option<(f64, f64)>,
    base: Option<f64>,
}

impl FloatField {
    pub fn from_options(kind: ControlKind, options: &Options) -> Result<Self, ControlError> {
        let (bounds, base) = match kind {
            ControlKind::FloatText => (None, None),
            ControlKind::FloatLogSlider => {
                let base = options.f64("base")?.unwrap_or(10.0);
                let min = options.f64("min")?.unwrap_or(0.0);
                let max = options.f64("max")?.unwrap_or(4.0);
                (Some(ordered(kind, base.powf(min), base.powf(max))?), Some(base))
            }
            _ => {
                let min = options.f64("min")?.unwrap_or(0.0);
                let max = options.f64("max")?.unwrap_or(100.0);
                (Some(ordered(kind, min, max)?), None)
            }
        };
        let mut field = Self {
            kind,
            description: options.description()?,
            value: bounds.map_or(0.0, |(min, _)| min),
            bounds,
            base,
        };
        if !options.value().is_null() {
            field.set_value(options.value().clone())?;
        }
        Ok(field)
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }
}

fn ordered(kind: ControlKind, min: f64, max: f64) -> Result<(f64, f64), ControlError> {
    if min > max || min.is_nan() || max.is_nan() {
        return Err(ControlError::InvalidBounds { kind, min: min.to_string(), max: max.to_string() });
    }
    Ok((min, max))
}

impl Control for FloatField {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn value(&self) -> Value {
        Value::Float(self.value)
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        let v = coerce_f64(self.kind, &value)?;
        if v.is_nan() {
            return Err(ControlError::rejected(self.kind, &value, "not a number"));
        }
        self.value = match self.bounds {
            Some((min, max)) => v.clamp(min, max),
            None => v,
        };
        Ok(())
    }

    fn summary(&self) -> String {
        match (self.bounds, self.base) {
            (Some((min, max)), Some(base)) => {
                format!("{}: {} ({min}..={max}, log base {base})", self.description, self.value)
            }
            (Some((min, max)), None) => format!("{}: {} ({min}..={max})", self.description, self.value),
            _ => format!("{}: {}", self.description, self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(kind: ControlKind, opts: Options) -> IntField {
        IntField::from_options(kind, &opts).unwrap()
    }

    #[test]
    fn slider_clamps_initial_and_later_values() {
        let mut s = int(ControlKind::IntSlider, Options::new().with("min", 0i64).with("max", 10i64).with("value", 42i64));
        assert_eq!(s.value(), Value::Int(10));
        s.set_value(Value::Int(-3)).unwrap();
        assert_eq!(s.value(), Value::Int(0));
    }

    #[test]
    fn null_value_starts_at_min() {
        let s = int(ControlKind::BoundedIntText, Options::new().with("min", 5i64));
        assert_eq!(s.value(), Value::Int(5));
    }

    #[test]
    fn int_text_is_unbounded() {
        let mut s = int(ControlKind::IntText, Options::new());
        s.set_value(Value::Int(1_000_000)).unwrap();
        assert_eq!(s.value(), Value::Int(1_000_000));
        assert_eq!(s.bounds(), None);
    }

    #[test]
    fn int_accepts_integral_float_only() {
        let mut s = int(ControlKind::IntText, Options::new());
        s.set_value(Value::Float(7.0)).unwrap();
        assert_eq!(s.value(), Value::Int(7));
        assert!(s.set_value(Value::Float(7.5)).is_err());
        assert_eq!(s.value(), Value::Int(7));
    }

    #[test]
    fn int_rejects_values_outside_i64() {
        let mut s = int(ControlKind::IntText, Options::new().with("value", 3i64));
        let err = s.set_value(Value::Float(1e20)).unwrap_err();
        assert!(matches!(err, ControlError::Rejected { kind: ControlKind::IntText, .. }));
        assert!(s.set_value(Value::UInt(u64::MAX)).is_err());
        assert_eq!(s.value(), Value::Int(3));
    }

    #[test]
    fn inverted_bounds_fail_to_build() {
        let opts = Options::new().with("min", 10i64).with("max", 1i64);
        assert!(matches!(
            IntField::from_options(ControlKind::IntSlider, &opts),
            Err(ControlError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn log_slider_bounds_are_powers() {
        let opts = Options::new().with("base", 2.0).with("min", 1.0).with("max", 3.0).with("value", 100i64);
        let f = FloatField::from_options(ControlKind::FloatLogSlider, &opts).unwrap();
        assert_eq!(f.bounds(), Some((2.0, 8.0)));
        assert_eq!(f.value(), Value::Float(8.0));
    }

    #[test]
    fn float_from_int_value() {
        let f = FloatField::from_options(ControlKind::FloatText, &Options::new().with("value", 3i64)).unwrap();
        assert_eq!(f.value(), Value::Float(3.0));
    }

    #[test]
    fn float_rejects_text() {
        let mut f = FloatField::from_options(ControlKind::BoundedFloatText, &Options::new()).unwrap();
        assert!(f.set_value(Value::from("fast")).is_err());
    }
}
