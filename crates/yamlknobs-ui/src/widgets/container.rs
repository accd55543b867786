use yamlknobs_doc::Value;

use crate::control::{Control, ControlError, ControlHandle};
use crate::registry::ControlKind;

/// `VBox`, `Tab` or `Accordion`.
///
/// Children are replaced wholesale by [`set_children`](Control::set_children).
/// Titles are kept only for kinds with titled children, one slot per child.
pub struct ContainerControl {
    kind: ControlKind,
    children: Vec<ControlHandle>,
    titles: Vec<Option<String>>,
}

impl ContainerControl {
    pub fn new(kind: ControlKind) -> Self {
        Self { kind, children: Vec::new(), titles: Vec::new() }
    }
}

impl Control for ContainerControl {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn value(&self) -> Value {
        Value::Null
    }

    fn set_value(&mut self, value: Value) -> Result<(), ControlError> {
        Err(ControlError::rejected(self.kind, &value, "containers hold no value"))
    }

    fn set_children(&mut self, children: Vec<ControlHandle>) {
        self.titles.resize(children.len(), None);
        self.children = children;
    }

    fn children(&self) -> &[ControlHandle] {
        &self.children
    }

    fn supports_titles(&self) -> bool {
        self.kind.has_titled_children()
    }

    fn set_title(&mut self, index: usize, title: &str) {
        if !self.supports_titles() {
            return;
        }
        if index >= self.titles.len() {
            self.titles.resize(index + 1, None);
        }
        self.titles[index] = Some(title.to_string());
    }

    fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).and_then(|t| t.as_deref())
    }

    fn summary(&self) -> String {
        format!("{} ({} children)", self.kind, self.children.len())
    }
}
