use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::DocError;
use crate::value::{Node, NodeRef, Value};

// ── Document ──────────────────────────────────────────────────────────────

/// A parsed document: a root mapping shared with everything bound to it.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Wrap an existing node as a document root.
    pub fn new(root: Node) -> Self {
        Self { root: root.into_ref() }
    }

    /// Parse YAML text. An empty document yields an empty root mapping.
    pub fn parse_str(src: &str) -> Result<Self, DocError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(src)?;
        Self::from_yaml(yaml)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DocError> {
        let yaml: serde_yaml::Value = serde_yaml::from_reader(reader)?;
        Self::from_yaml(yaml)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocError> {
        let src = fs::read_to_string(path)?;
        Self::parse_str(&src)
    }

    fn from_yaml(yaml: serde_yaml::Value) -> Result<Self, DocError> {
        match Value::from_yaml(yaml)? {
            Value::Map(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new(Node::new())),
            other => Err(DocError::RootNotMapping(other.type_name())),
        }
    }

    /// The live root node. Mutations through this handle are what gets dumped.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn to_yaml(&self) -> serde_yaml::Value {
        serde_yaml::Value::Mapping(self.root.borrow().to_yaml())
    }

    pub fn to_string(&self) -> Result<String, DocError> {
        Ok(serde_yaml::to_string(&self.to_yaml())?)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<(), DocError> {
        Ok(serde_yaml::to_writer(writer, &self.to_yaml())?)
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), DocError> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        *self.root.borrow() == *other.root.borrow()
    }
}
