use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::binding::BindingTable;
use crate::control::{Change, ChangeListener};

/// Outcome of handling one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The owning node now holds the new value.
    Written,
    /// The node already held that value.
    Unchanged,
    /// The control has no binding.
    Unbound,
}

/// Writes control changes back into the document.
///
/// A single instance is registered on every bound plain control.
pub struct ChangePropagator {
    bindings: Rc<RefCell<BindingTable>>,
    writes: Cell<usize>,
}

impl ChangePropagator {
    pub fn new(bindings: Rc<RefCell<BindingTable>>) -> Self {
        Self { bindings, writes: Cell::new(0) }
    }

    /// Number of values written into the document so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn propagate(&self, change: &Change) -> Propagation {
        let bindings = self.bindings.borrow();
        let Some((name, record)) = bindings.find_by_control(&change.source) else {
            log::debug!("change from unbound {:?} ignored", change.source);
            return Propagation::Unbound;
        };

        let mut owner = record.owner.borrow_mut();
        if owner.get(&record.key).is_some_and(|v| v.same_value(&change.new)) {
            return Propagation::Unchanged;
        }
        log::debug!("setting {name} to {}", change.new);
        owner.insert(record.key.clone(), change.new.clone());
        self.writes.set(self.writes.get() + 1);
        Propagation::Written
    }
}

impl ChangeListener for ChangePropagator {
    fn on_change(&self, change: &Change) {
        self.propagate(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingRecord;
    use crate::control::ControlHandle;
    use crate::options::Options;
    use crate::registry::{ControlKind, Toolkit};
    use crate::widgets::HeadlessToolkit;
    use yamlknobs_doc::{Node, NodeRef, Value};

    struct Fixture {
        node: NodeRef,
        propagator: Rc<ChangePropagator>,
        gain: ControlHandle,
    }

    fn fixture() -> Fixture {
        let node: NodeRef =
            [("gain", Value::Int(1)), ("other", Value::Int(9))].into_iter().collect::<Node>().into_ref();
        let bindings = Rc::new(RefCell::new(BindingTable::new()));
        let propagator = Rc::new(ChangePropagator::new(bindings.clone()));
        let opts = Options::new().with("value", 1i64).with("max", 10i64);
        let gain = HeadlessToolkit.build(ControlKind::IntSlider, &opts).unwrap();
        gain.observe(propagator.clone());
        bindings.borrow_mut().insert(
            "gain",
            BindingRecord { owner: node.clone(), key: "gain".into(), control: gain.clone() },
        );
        Fixture { node, propagator, gain }
    }

    #[test]
    fn writes_only_the_bound_key() {
        let f = fixture();
        f.gain.set_value(Value::Int(7)).unwrap();
        let node = f.node.borrow();
        assert_eq!(node.get("gain"), Some(&Value::Int(7)));
        assert_eq!(node.get("other"), Some(&Value::Int(9)));
    }

    #[test]
    fn same_value_twice_writes_once() {
        let f = fixture();
        f.gain.set_value(Value::Int(4)).unwrap();
        f.gain.set_value(Value::Int(4)).unwrap();
        assert_eq!(f.propagator.writes(), 1);
    }

    #[test]
    fn clamped_value_is_what_lands() {
        let f = fixture();
        f.gain.set_value(Value::Int(50)).unwrap();
        assert_eq!(f.node.borrow().get("gain"), Some(&Value::Int(10)));
    }

    #[test]
    fn unbound_control_is_ignored() {
        let f = fixture();
        let stray = HeadlessToolkit.build(ControlKind::IntText, &Options::new()).unwrap();
        stray.observe(f.propagator.clone());
        stray.set_value(Value::Int(3)).unwrap();
        assert_eq!(f.propagator.writes(), 0);
        let change = Change { source: stray, old: Value::Int(0), new: Value::Int(3) };
        assert_eq!(f.propagator.propagate(&change), Propagation::Unbound);
    }

    #[test]
    fn equal_number_in_another_representation_is_not_written() {
        let node: NodeRef = [("x", Value::Int(1))].into_iter().collect::<Node>().into_ref();
        let bindings = Rc::new(RefCell::new(BindingTable::new()));
        let propagator = Rc::new(ChangePropagator::new(bindings.clone()));
        let x = HeadlessToolkit.build(ControlKind::FloatText, &Options::new().with("value", 1i64)).unwrap();
        x.observe(propagator.clone());
        bindings.borrow_mut().insert("x", BindingRecord { owner: node.clone(), key: "x".into(), control: x.clone() });

        x.set_value(Value::Float(1.0)).unwrap();
        assert_eq!(propagator.writes(), 0);
        assert_eq!(node.borrow().get("x"), Some(&Value::Int(1)));
        x.set_value(Value::Float(1.5)).unwrap();
        assert_eq!(node.borrow().get("x"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn absent_key_is_inserted() {
        let f = fixture();
        f.node.borrow_mut().remove("gain");
        f.gain.set_value(Value::Int(2)).unwrap();
        assert_eq!(f.node.borrow().get("gain"), Some(&Value::Int(2)));
    }
}
