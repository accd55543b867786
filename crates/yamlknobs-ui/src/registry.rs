//! The closed set of control kinds an annotation may name, and the
//! [`Toolkit`] seam that turns a kind into a live control.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::control::{ControlError, ControlHandle};
use crate::options::Options;

// ── ControlKind ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Label,
    Text,
    IntSlider,
    BoundedIntText,
    IntText,
    FloatLogSlider,
    BoundedFloatText,
    FloatText,
    Checkbox,
    Dropdown,
    RadioButtons,
    SelectMultiple,
    Accordion,
    Tab,
    VBox,
    /// Closes the current container without opening one.
    Close,
}

/// Static facts about one kind.
#[derive(Debug)]
pub struct KindInfo {
    pub kind: ControlKind,
    pub name: &'static str,
    /// Holds a value that is bound to a document key.
    pub plain_value: bool,
    /// Opens a container that collects subsequent controls.
    pub container: bool,
    /// Container whose children carry titles (tabs, accordion panes).
    pub titled: bool,
    pub doc: &'static str,
}

const fn plain(kind: ControlKind, name: &'static str, doc: &'static str) -> KindInfo {
    KindInfo { kind, name, plain_value: true, container: false, titled: false, doc }
}

const fn container(kind: ControlKind, name: &'static str, titled: bool, doc: &'static str) -> KindInfo {
    KindInfo { kind, name, plain_value: false, container: true, titled, doc }
}

/// Indexed by `ControlKind as usize`.
pub static KINDS: &[KindInfo] = &[
    plain(ControlKind::Label, "Label", "Read-only text."),
    plain(ControlKind::Text, "Text", "Single-line text entry."),
    plain(ControlKind::IntSlider, "IntSlider", "Integer slider over `min..=max`."),
    plain(ControlKind::BoundedIntText, "BoundedIntText", "Integer entry clamped to `min..=max`."),
    plain(ControlKind::IntText, "IntText", "Unbounded integer entry."),
    plain(ControlKind::FloatLogSlider, "FloatLogSlider", "Float slider over `base^min..=base^max`."),
    plain(ControlKind::BoundedFloatText, "BoundedFloatText", "Float entry clamped to `min..=max`."),
    plain(ControlKind::FloatText, "FloatText", "Unbounded float entry."),
    plain(ControlKind::Checkbox, "Checkbox", "Boolean toggle."),
    plain(ControlKind::Dropdown, "Dropdown", "One choice out of `options`."),
    plain(ControlKind::RadioButtons, "RadioButtons", "One choice out of `options`."),
    plain(ControlKind::SelectMultiple, "SelectMultiple", "Any subset of `options`."),
    container(ControlKind::Accordion, "Accordion", true, "Collapsible titled panes."),
    container(ControlKind::Tab, "Tab", true, "Titled tabs."),
    container(ControlKind::VBox, "VBox", false, "Vertical stack."),
    KindInfo {
        kind: ControlKind::Close,
        name: "Close",
        plain_value: false,
        container: false,
        titled: false,
        doc: "Ends the innermost open container.",
    },
];

impl ControlKind {
    pub fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn is_plain_value(self) -> bool {
        self.info().plain_value
    }

    pub fn is_container(self) -> bool {
        self.info().container
    }

    pub fn has_titled_children(self) -> bool {
        self.info().titled
    }

    pub fn is_terminator(self) -> bool {
        self == ControlKind::Close
    }

    pub fn all() -> impl Iterator<Item = ControlKind> {
        KINDS.iter().map(|k| k.kind)
    }

    /// Look up a kind by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Result<Self, UnknownKind> {
        KINDS
            .iter()
            .find(|k| k.name == name)
            .map(|k| k.kind)
            .ok_or_else(|| UnknownKind(name.to_string()))
    }
}

impl FromStr for ControlKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A control type name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown control type `{0}`")]
pub struct UnknownKind(pub String);

// ── Toolkit ───────────────────────────────────────────────────────────────

/// Factory for live controls.
///
/// `options` is the resolved option set from the annotation (with
/// `description` and `value` already defaulted for plain kinds). Containers
/// are built with empty options.
pub trait Toolkit {
    fn build(&self, kind: ControlKind, options: &Options) -> Result<ControlHandle, ControlError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, info) in KINDS.iter().enumerate() {
            assert_eq!(info.kind as usize, i, "{} out of place", info.name);
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in ControlKind::all() {
            assert_eq!(ControlKind::from_name(kind.name()), Ok(kind));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(ControlKind::from_name("vbox"), Err(UnknownKind("vbox".into())));
    }

    #[test]
    fn flags() {
        assert!(ControlKind::IntSlider.is_plain_value());
        assert!(!ControlKind::IntSlider.is_container());
        assert!(ControlKind::Tab.is_container() && ControlKind::Tab.has_titled_children());
        assert!(!ControlKind::VBox.has_titled_children());
        let close = ControlKind::Close;
        assert!(close.is_terminator() && !close.is_container() && !close.is_plain_value());
    }
}
