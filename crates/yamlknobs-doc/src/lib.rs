//! Live YAML document tree for **yamlknobs**.
//!
//! The document is parsed once into a tree of shared, mutable mappings
//! ([`NodeRef`]). Controls bound to a value keep a handle to the mapping that
//! owns it and write straight into it, so dumping the document always
//! reflects the latest edits.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`value`] | `Value`, `Node`, `NodeRef` |
//! | [`document`] | `Document` parse / serialize |
//! | [`annotation`] | `-widget` key detection, binding-name paths |
//! | [`strip`] | `strip_annotations` |
//! | [`error`] | `DocError` |
//!
//! # Quick start
//!
//! ```rust
//! use yamlknobs_doc::{Document, Value, strip_annotations};
//!
//! let doc = Document::parse_str("x: 1\nx-widget: {type: IntSlider}\n").unwrap();
//! doc.root().borrow_mut().insert("x", Value::Int(7));
//! strip_annotations(doc.root());
//! assert_eq!(doc.to_string().unwrap(), "x: 7\n");
//! ```

pub mod annotation;
pub mod document;
pub mod error;
pub mod strip;
pub mod value;

pub use document::Document;
pub use error::DocError;
pub use strip::strip_annotations;
pub use value::{Node, NodeRef, Value};
