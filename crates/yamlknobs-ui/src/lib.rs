//! yamlknobs UI: editable controls generated from `-widget` annotations in
//! a YAML document.
//!
//! A document such as
//!
//! ```yaml
//! lr: 0.01
//! lr-widget:
//!   type: FloatLogSlider
//!   args: {min: -5, max: 0}
//! ```
//!
//! gets one control per annotation, bound to the annotated key. Changing a
//! control writes the new value straight into the live document, which can
//! then be dumped with the annotations removed.
//!
//! # Quick start
//!
//! ```rust
//! use yamlknobs_ui::prelude::*;
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! session.load_str("x: 1\nx-widget: {type: IntSlider, args: {min: 0, max: 10}}\n").unwrap();
//! let root = session.display();
//! println!("{}", render_tree(&root));
//!
//! session.set("x", Value::Int(7)).unwrap();
//! assert_eq!(session.dump(true).unwrap(), "x: 7\n");
//! ```
//!
//! # Plugging in another toolkit
//!
//! Implement [`Toolkit`] to build real widgets, and [`Control`] for each of
//! them, then hand it to [`Session::with_parts`]. Containers must accept
//! children through [`Control::set_children`].

pub mod binding;
pub mod config;
pub mod container_stack;
pub mod control;
pub mod control_spec;
pub mod diagnostics;
pub mod logging;
pub mod options;
pub mod propagate;
pub mod registry;
pub mod render;
pub mod session;
pub mod walker;
pub mod widgets;

pub use config::SessionConfig;
pub use container_stack::{ContainerStack, ImplicitClose, UnknownPolicy};
pub use control::{Change, ChangeListener, Control, ControlError, ControlHandle};
pub use registry::{ControlKind, Toolkit, UnknownKind};
pub use render::render_tree;
pub use session::{Session, SessionError};

/// Everything a host application needs: `use yamlknobs_ui::prelude::*;`.
pub mod prelude {
    pub use crate::binding::{BindingRecord, BindingTable};
    pub use crate::config::SessionConfig;
    pub use crate::container_stack::ImplicitClose;
    pub use crate::control::{Change, ChangeListener, Control, ControlError, ControlHandle};
    pub use crate::diagnostics::{CollectingDiagnostics, Diagnostic, DiagnosticKind, Diagnostics, LogDiagnostics};
    pub use crate::logging::{LoggingConfig, init_logging};
    pub use crate::options::Options;
    pub use crate::registry::{ControlKind, Toolkit};
    pub use crate::render::render_tree;
    pub use crate::session::{Session, SessionError};
    pub use crate::widgets::HeadlessToolkit;
    pub use yamlknobs_doc::{Document, Value};
}
