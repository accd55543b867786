//! Depth-first walk that turns `-widget` annotations into bound controls.
//!
//! For every mapping the walker visits keys in document order:
//!
//! - plain keys holding a mapping, or a sequence with mapping elements, are
//!   descended into with the path extended by `key` or `key[index]`
//! - `<target>-widget` keys build one control per control description and
//!   bind it to `<target>` in the same mapping
//!
//! Bad annotations are reported to the diagnostics sink and skipped.

use std::cell::RefCell;
use std::rc::Rc;

use yamlknobs_doc::annotation::{annotation_target, indexed, join_path, repeated};
use yamlknobs_doc::{NodeRef, Value};

use crate::binding::{BindingRecord, BindingTable};
use crate::container_stack::ContainerStack;
use crate::control::{ChangeListener, ControlHandle};
use crate::control_spec::ControlSpec;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::options::{DESCRIPTION, VALUE};
use crate::registry::Toolkit;

pub struct TreeWalker<'s> {
    toolkit: &'s dyn Toolkit,
    stack: &'s mut ContainerStack,
    bindings: &'s RefCell<BindingTable>,
    listener: Rc<dyn ChangeListener>,
    diagnostics: &'s dyn Diagnostics,
}

impl<'s> TreeWalker<'s> {
    pub fn new(
        toolkit: &'s dyn Toolkit,
        stack: &'s mut ContainerStack,
        bindings: &'s RefCell<BindingTable>,
        listener: Rc<dyn ChangeListener>,
        diagnostics: &'s dyn Diagnostics,
    ) -> Self {
        Self { toolkit, stack, bindings, listener, diagnostics }
    }

    /// Walk a whole document from its root mapping.
    pub fn walk(&mut self, root: &NodeRef) {
        self.walk_node(root, None);
    }

    fn walk_node(&mut self, node: &NodeRef, prefix: Option<&str>) {
        // Snapshot the entries: building controls must not hold a borrow of
        // the node they bind into.
        let entries: Vec<(String, Value)> =
            node.borrow().iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

        for (key, value) in entries {
            log::debug!("processing {}", join_path(prefix, &key));

            let Some(target) = annotation_target(&key) else {
                match &value {
                    Value::Map(child) => self.walk_node(child, Some(&join_path(prefix, &key))),
                    Value::Seq(items) => {
                        for (n, item) in items.iter().enumerate() {
                            if let Value::Map(child) = item {
                                self.walk_node(child, Some(&join_path(prefix, &indexed(&key, n))));
                            }
                        }
                    }
                    _ => {}
                }
                continue;
            };

            let name = join_path(prefix, target);
            match &value {
                Value::Seq(specs) => {
                    for (n, spec) in specs.iter().enumerate() {
                        self.build_control(spec, &repeated(&name, n), node, target);
                    }
                }
                spec => self.build_control(spec, &name, node, target),
            }
        }
    }

    /// Build the control described by `spec` and bind it to `owner[target]`
    /// under `name`.
    pub fn build_control(&mut self, spec: &Value, name: &str, owner: &NodeRef, target: &str) {
        let spec = match ControlSpec::from_value(spec) {
            Ok(spec) => spec,
            Err(e) => return self.report(name, DiagnosticKind::InvalidSpec(e)),
        };
        let kind = spec.kind;

        if kind.is_terminator() {
            log::debug!("closing container at {name}");
            self.stack.finish(false);
            return;
        }

        let mut options = spec.options;
        options.set_default(DESCRIPTION, Value::from(name));
        if !options.contains(VALUE) {
            let current = owner.borrow().get(target).cloned();
            if current.is_none() {
                log::debug!("{name}: `{target}` not in document, starting from null");
            }
            options.insert(VALUE, current.unwrap_or_default());
        }

        if kind.is_container() {
            let title = match options.value() {
                Value::Null => None,
                v => Some(v.to_string()),
            };
            match self.stack.start_container(kind, title, spec.nested) {
                Ok(container) => self.bind(name, owner, target, container),
                Err(e) => self.report(name, DiagnosticKind::BuildFailed(e)),
            }
            return;
        }

        log::debug!("{kind} {name} {options:?}");
        match self.toolkit.build(kind, &options) {
            Ok(control) => {
                control.observe(self.listener.clone());
                self.bind(name, owner, target, control.clone());
                self.stack.add_child(control, None);
            }
            Err(e) => self.report(name, DiagnosticKind::BuildFailed(e)),
        }
    }

    fn bind(&mut self, name: &str, owner: &NodeRef, target: &str, control: ControlHandle) {
        let record = BindingRecord { owner: owner.clone(), key: target.to_string(), control };
        if self.bindings.borrow_mut().insert(name, record).is_some() {
            self.report(name, DiagnosticKind::DuplicateName);
        }
    }

    fn report(&self, name: &str, kind: DiagnosticKind) {
        self.diagnostics.report(Diagnostic::new(name, kind));
    }
}
