//! One document, its controls and the bindings between them.

use std::cell::{Ref, RefCell};
use std::io::{Read, Write};
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use yamlknobs_doc::{DocError, Document, Value, strip_annotations};

use crate::binding::BindingTable;
use crate::config::SessionConfig;
use crate::container_stack::ContainerStack;
use crate::control::{ControlError, ControlHandle};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::options::{Options, VALUE};
use crate::propagate::ChangePropagator;
use crate::registry::{ControlKind, Toolkit};
use crate::walker::TreeWalker;
use crate::widgets::HeadlessToolkit;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Doc(#[from] DocError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("no control is bound to `{0}`")]
    UnknownBinding(String),

    #[error("no document has been loaded")]
    NothingLoaded,

    #[error("a document is already loaded")]
    AlreadyLoaded,
}

// ── Session ───────────────────────────────────────────────────────────────

/// Loads an annotated document, builds its controls and keeps the document
/// in step with them.
///
/// ```rust
/// use yamlknobs_ui::{Session, SessionConfig};
/// use yamlknobs_doc::Value;
///
/// let mut session = Session::new(SessionConfig::default().untitled()).unwrap();
/// session.load_str("x: 1\nx-widget: {type: IntSlider, args: {min: 0, max: 10}}\n").unwrap();
/// session.display();
/// session.set("x", Value::Int(7)).unwrap();
/// assert_eq!(session.dump(true).unwrap(), "x: 7\n");
/// ```
pub struct Session {
    config:      SessionConfig,
    toolkit:     Rc<dyn Toolkit>,
    diagnostics: Rc<dyn Diagnostics>,
    stack:       ContainerStack,
    bindings:    Rc<RefCell<BindingTable>>,
    propagator:  Rc<ChangePropagator>,
    document:    Option<Document>,
}

impl Session {
    /// Headless controls, diagnostics sent to the log.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_parts(config, Rc::new(HeadlessToolkit), Rc::new(LogDiagnostics))
    }

    pub fn with_diagnostics(
        config: SessionConfig,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<Self, SessionError> {
        Self::with_parts(config, Rc::new(HeadlessToolkit), diagnostics)
    }

    pub fn with_toolkit(config: SessionConfig, toolkit: Rc<dyn Toolkit>) -> Result<Self, SessionError> {
        Self::with_parts(config, toolkit, Rc::new(LogDiagnostics))
    }

    /// Create the root container and, for a non-empty title, its leading label.
    pub fn with_parts(
        config: SessionConfig,
        toolkit: Rc<dyn Toolkit>,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<Self, SessionError> {
        let mut stack = ContainerStack::new(
            toolkit.clone(),
            config.root_kind,
            config.root_title.clone(),
            config.implicit_close,
        )?;
        if !config.title.is_empty() {
            let label = toolkit.build(ControlKind::Label, &Options::new().with(VALUE, config.title.as_str()))?;
            stack.add_child(label, None);
        }

        let bindings = Rc::new(RefCell::new(BindingTable::new()));
        let propagator = Rc::new(ChangePropagator::new(bindings.clone()));
        Ok(Self { config, toolkit, diagnostics, stack, bindings, propagator, document: None })
    }

    // ── Loading ───────────────────────────────────────────────────────────

    pub fn load_str(&mut self, src: &str) -> Result<(), SessionError> {
        self.load_document(Document::parse_str(src)?)
    }

    pub fn load_reader(&mut self, reader: impl Read) -> Result<(), SessionError> {
        self.load_document(Document::from_reader(reader)?)
    }

    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        log::info!("loading {}", path.display());
        self.load_document(Document::from_path(path)?)
    }

    /// Walk `document`, building and binding a control for every annotation.
    pub fn load_document(&mut self, document: Document) -> Result<(), SessionError> {
        if self.document.is_some() {
            return Err(SessionError::AlreadyLoaded);
        }
        TreeWalker::new(
            self.toolkit.as_ref(),
            &mut self.stack,
            &self.bindings,
            self.propagator.clone(),
            self.diagnostics.as_ref(),
        )
        .walk(document.root());
        log::debug!("bound {} controls", self.bindings.borrow().len());
        self.document = Some(document);
        Ok(())
    }

    /// Finish every open container and return the root control.
    ///
    /// Safe to call again; later calls return the same root.
    pub fn display(&mut self) -> ControlHandle {
        self.stack.finish_all()
    }

    // ── Bindings ──────────────────────────────────────────────────────────

    pub fn bindings(&self) -> Ref<'_, BindingTable> {
        self.bindings.borrow()
    }

    pub fn control(&self, name: &str) -> Option<ControlHandle> {
        self.bindings.borrow().get(name).map(|r| r.control.clone())
    }

    /// Set a bound control's value as a user would, so the change flows
    /// back into the document.
    pub fn set(&self, name: &str, value: Value) -> Result<(), SessionError> {
        let control = self.control(name).ok_or_else(|| SessionError::UnknownBinding(name.to_string()))?;
        control.set_value(value)?;
        Ok(())
    }

    /// Number of document writes performed by control changes.
    pub fn writes(&self) -> usize {
        self.propagator.writes()
    }

    // ── Dumping ───────────────────────────────────────────────────────────

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn loaded(&self) -> Result<&Document, SessionError> {
        self.document.as_ref().ok_or(SessionError::NothingLoaded)
    }

    /// Prepare the live document for output. Stripping is done in place and
    /// is permanent; bindings keep working since only annotation keys go.
    fn prepare(&self, strip: bool) -> Result<&Document, SessionError> {
        let document = self.loaded()?;
        if strip {
            let removed = strip_annotations(document.root());
            log::debug!("stripped {removed} annotations");
        }
        Ok(document)
    }

    pub fn dump(&self, strip: bool) -> Result<String, SessionError> {
        Ok(self.prepare(strip)?.to_string()?)
    }

    /// [`dump`](Self::dump) with `strip_on_dump` from the config.
    pub fn dump_default(&self) -> Result<String, SessionError> {
        self.dump(self.config.strip_on_dump)
    }

    pub fn dump_to_writer(&self, writer: impl Write, strip: bool) -> Result<(), SessionError> {
        Ok(self.prepare(strip)?.to_writer(writer)?)
    }

    pub fn dump_to_path(&self, path: impl AsRef<Path>, strip: bool) -> Result<(), SessionError> {
        let path = path.as_ref();
        log::info!("writing {}", path.display());
        Ok(self.prepare(strip)?.to_path(path)?)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container_stack::ImplicitClose;
    use crate::diagnostics::CollectingDiagnostics;

    const SLIDER: &str = "x: 1\nx-widget: {type: IntSlider, args: {min: 0, max: 10}}\n";

    fn session(src: &str) -> (Session, Rc<CollectingDiagnostics>) {
        let diagnostics = Rc::new(CollectingDiagnostics::new());
        let mut session = Session::with_diagnostics(SessionConfig::default(), diagnostics.clone()).unwrap();
        session.load_str(src).unwrap();
        (session, diagnostics)
    }

    #[test]
    fn slider_edit_is_dumped() {
        let (mut s, _) = session(SLIDER);
        s.display();
        s.set("x", Value::Int(7)).unwrap();
        assert_eq!(s.dump(true).unwrap(), "x: 7\n");
        assert_eq!(s.writes(), 1);
    }

    #[test]
    fn round_trip_without_annotations() {
        let src = "a: 1\nb:\n  c: two\n  d:\n  - 3\n  - 4.5\n";
        let (s, d) = session(src);
        assert!(d.is_empty());
        assert_eq!(s.dump(true).unwrap(), Document::parse_str(src).unwrap().to_string().unwrap());
    }

    #[test]
    fn keep_annotations_when_asked() {
        let (s, _) = session(SLIDER);
        assert!(s.dump(false).unwrap().contains("x-widget"));
        assert!(!s.dump(true).unwrap().contains("x-widget"));
    }

    #[test]
    fn title_label_leads_the_root() {
        let (mut s, _) = session(SLIDER);
        let root = s.display();
        let children = root.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), ControlKind::Label);
        assert_eq!(children[0].value(), Value::from("Title"));
        assert_eq!(children[1], s.control("x").unwrap());
    }

    #[test]
    fn untitled_session_has_no_label() {
        let mut s = Session::new(SessionConfig::default().untitled()).unwrap();
        s.load_str(SLIDER).unwrap();
        assert_eq!(s.display().children().len(), 1);
    }

    #[test]
    fn display_is_idempotent() {
        let (mut s, _) = session("t: T\nt-widget: {type: Tab}\nx: 1\nx-widget: {type: IntText}\n");
        let first = s.display();
        let second = s.display();
        assert_eq!(first, second);
        assert_eq!(second.children().len(), 2);
    }

    #[test]
    fn errors() {
        let (s, _) = session(SLIDER);
        assert!(matches!(s.set("y", Value::Int(1)), Err(SessionError::UnknownBinding(n)) if n == "y"));
        assert!(matches!(s.set("x", Value::from("ten")), Err(SessionError::Control(_))));

        let empty = Session::new(SessionConfig::default()).unwrap();
        assert!(matches!(empty.dump(true), Err(SessionError::NothingLoaded)));

        let mut twice = Session::new(SessionConfig::default()).unwrap();
        twice.load_str("a: 1\n").unwrap();
        assert!(matches!(twice.load_str("b: 2\n"), Err(SessionError::AlreadyLoaded)));
        assert!(matches!(
            Session::new(SessionConfig::default()).unwrap().load_str("- 1\n"),
            Err(SessionError::Doc(DocError::RootNotMapping(_)))
        ));
    }

    #[test]
    fn root_kind_must_be_a_container() {
        let config = SessionConfig::default().root_kind(ControlKind::Checkbox);
        assert!(matches!(Session::new(config), Err(SessionError::Control(ControlError::NotAContainer(_)))));
    }

    #[test]
    fn policy_reaches_the_stack() {
        let src = "a: A\na-widget: {type: VBox}\nb: B\nb-widget: {type: Tab}\n";
        let mut s = Session::new(SessionConfig::default().untitled().implicit_close(ImplicitClose::SameKind)).unwrap();
        s.load_str(src).unwrap();
        let root = s.display();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children().len(), 1);
    }

    #[test]
    fn bad_annotations_are_reported_not_fatal() {
        let (s, d) = session("x: 1\nx-widget: {type: Knob}\ny: 2\ny-widget: {type: IntText}\n");
        assert_eq!(d.len(), 1);
        assert_eq!(s.bindings().len(), 1);
    }

    #[test]
    fn dump_to_writer_and_reader() {
        let (s, _) = session(SLIDER);
        let mut out = Vec::new();
        s.dump_to_writer(&mut out, true).unwrap();
        let mut again = Session::new(SessionConfig::default()).unwrap();
        again.load_reader(out.as_slice()).unwrap();
        assert_eq!(again.dump(false).unwrap(), "x: 1\n");
    }
}
