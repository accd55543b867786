//! Headless toolkit: controls that hold state without drawing anything.
//!
//! Hosts that render (a terminal front end, a notebook bridge, …) read and
//! write these through [`ControlHandle`]; tests drive them directly.

pub mod checkbox;
pub mod container;
pub mod number;
pub mod selection;
pub mod text;

use yamlknobs_doc::Value;

use crate::control::{ControlError, ControlHandle};
use crate::options::Options;
use crate::registry::{ControlKind, Toolkit};

use checkbox::Checkbox;
use container::ContainerControl;
use number::{FloatField, IntField};
use selection::{Choice, MultiChoice};
use text::TextField;

// ── HeadlessToolkit ───────────────────────────────────────────────────────

/// Builds the in-memory controls in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessToolkit;

impl Toolkit for HeadlessToolkit {
    fn build(&self, kind: ControlKind, options: &Options) -> Result<ControlHandle, ControlError> {
        let handle = match kind {
            ControlKind::Label | ControlKind::Text => {
                ControlHandle::new(TextField::from_options(kind, options)?)
            }
            ControlKind::IntSlider | ControlKind::BoundedIntText | ControlKind::IntText => {
                ControlHandle::new(IntField::from_options(kind, options)?)
            }
            ControlKind::FloatLogSlider | ControlKind::BoundedFloatText | ControlKind::FloatText => {
                ControlHandle::new(FloatField::from_options(kind, options)?)
            }
            ControlKind::Checkbox => ControlHandle::new(Checkbox::from_options(options)?),
            ControlKind::Dropdown | ControlKind::RadioButtons => {
                ControlHandle::new(Choice::from_options(kind, options)?)
            }
            ControlKind::SelectMultiple => ControlHandle::new(MultiChoice::from_options(options)?),
            ControlKind::Accordion | ControlKind::Tab | ControlKind::VBox => {
                ControlHandle::new(ContainerControl::new(kind))
            }
            ControlKind::Close => return Err(ControlError::NotBuildable(kind)),
        };
        log::debug!("built {kind}");
        Ok(handle)
    }
}

// ── Coercion helpers shared by the controls ───────────────────────────────

pub(crate) fn coerce_i64(kind: ControlKind, value: &Value) -> Result<i64, ControlError> {
    value.as_i64().ok_or_else(|| ControlError::rejected(kind, value, "expected an integer"))
}

pub(crate) fn coerce_f64(kind: ControlKind, value: &Value) -> Result<f64, ControlError> {
    value.as_f64().ok_or_else(|| ControlError::rejected(kind, value, "expected a number"))
}
