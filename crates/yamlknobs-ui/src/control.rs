use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use yamlknobs_doc::Value;

use crate::registry::ControlKind;

// ── ControlError ──────────────────────────────────────────────────────────

/// Errors raised by the toolkit when building or updating a control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("option `{option}` must be {expected}, found {found}")]
    BadOption { option: &'static str, expected: &'static str, found: &'static str },

    #[error("{kind} rejects value {value}: {reason}")]
    Rejected { kind: ControlKind, value: String, reason: &'static str },

    #[error("{kind}: min {min} is greater than max {max}")]
    InvalidBounds { kind: ControlKind, min: String, max: String },

    #[error("{0} is not a container kind")]
    NotAContainer(ControlKind),

    #[error("{0} does not build a control")]
    NotBuildable(ControlKind),
}

impl ControlError {
    pub(crate) fn rejected(kind: ControlKind, value: &Value, reason: &'static str) -> Self {
        Self::Rejected { kind, value: value.to_string(), reason }
    }
}

// ── Control trait ─────────────────────────────────────────────────────────

/// The object a toolkit produces for one control.
///
/// Plain controls hold a value; containers hold children and report
/// [`Value::Null`]. The container-only methods default to no-ops so leaf
/// controls only implement what they have.
pub trait Control: 'static {
    fn kind(&self) -> ControlKind;

    /// Display label.
    fn description(&self) -> &str {
        ""
    }

    fn value(&self) -> Value;

    /// Replace the value. Implementations coerce compatible scalars and
    /// clamp to their bounds; anything else is rejected and the old value kept.
    fn set_value(&mut self, value: Value) -> Result<(), ControlError>;

    fn set_children(&mut self, _children: Vec<ControlHandle>) {}

    fn children(&self) -> &[ControlHandle] {
        &[]
    }

    /// Whether [`set_title`](Control::set_title) does anything.
    fn supports_titles(&self) -> bool {
        false
    }

    fn set_title(&mut self, _index: usize, _title: &str) {}

    fn title(&self, _index: usize) -> Option<&str> {
        None
    }

    /// One-line description used when rendering a control tree.
    fn summary(&self) -> String {
        format!("{}: {}", self.description(), self.value())
    }
}

// ── Change notification ───────────────────────────────────────────────────

/// A value change on a control, delivered to every listener of that control.
pub struct Change {
    /// The control whose value changed.
    pub source: ControlHandle,
    pub old: Value,
    pub new: Value,
}

/// Receives [`Change`]s. One listener may observe any number of controls and
/// tells them apart through [`Change::source`].
pub trait ChangeListener {
    fn on_change(&self, change: &Change);
}

// ── ControlHandle ─────────────────────────────────────────────────────────

/// Stable identity of a control, valid while any handle to it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

struct Slot {
    control: RefCell<Box<dyn Control>>,
    listeners: RefCell<Vec<Rc<dyn ChangeListener>>>,
}

/// Shared handle to a control: read by the host, written by the binding layer.
///
/// Clones refer to the same control. Equality is identity.
#[derive(Clone)]
pub struct ControlHandle(Rc<Slot>);

impl ControlHandle {
    pub fn new(control: impl Control) -> Self {
        Self::from_boxed(Box::new(control))
    }

    pub fn from_boxed(control: Box<dyn Control>) -> Self {
        Self(Rc::new(Slot { control: RefCell::new(control), listeners: RefCell::new(Vec::new()) }))
    }

    pub fn id(&self) -> ControlId {
        ControlId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &ControlHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn borrow(&self) -> Ref<'_, dyn Control> {
        Ref::map(self.0.control.borrow(), |c| c.as_ref())
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Control> {
        RefMut::map(self.0.control.borrow_mut(), |c| c.as_mut())
    }

    pub fn kind(&self) -> ControlKind {
        self.borrow().kind()
    }

    pub fn description(&self) -> String {
        self.borrow().description().to_string()
    }

    pub fn value(&self) -> Value {
        self.borrow().value()
    }

    /// Set the value and notify every listener.
    ///
    /// Every accepted assignment notifies, including one that leaves the
    /// value unchanged. The control is not borrowed while listeners run.
    pub fn set_value(&self, value: Value) -> Result<(), ControlError> {
        let (old, new) = {
            let mut control = self.borrow_mut();
            let old = control.value();
            control.set_value(value)?;
            (old, control.value())
        };
        let change = Change { source: self.clone(), old, new };
        let listeners = self.0.listeners.borrow().clone();
        for listener in &listeners {
            listener.on_change(&change);
        }
        Ok(())
    }

    /// Register a change listener.
    pub fn observe(&self, listener: Rc<dyn ChangeListener>) {
        self.0.listeners.borrow_mut().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    pub fn children(&self) -> Vec<ControlHandle> {
        self.borrow().children().to_vec()
    }

    pub fn set_children(&self, children: Vec<ControlHandle>) {
        self.borrow_mut().set_children(children);
    }

    pub fn title(&self, index: usize) -> Option<String> {
        self.borrow().title(index).map(str::to_string)
    }
}

impl PartialEq for ControlHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ControlHandle {}

impl fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.control.try_borrow() {
            Ok(c) => write!(f, "ControlHandle({} {:?})", c.kind(), c.description()),
            Err(_) => write!(f, "ControlHandle(<borrowed>)"),
        }
    }
}
