use thiserror::Error;

/// Errors raised while reading or writing a document.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The top level of the document is a scalar or a sequence.
    #[error("document root must be a mapping, found {0}")]
    RootNotMapping(&'static str),

    /// A mapping key that is itself a mapping or a sequence.
    #[error("unsupported mapping key of type {0}")]
    ComplexKey(&'static str),
}
