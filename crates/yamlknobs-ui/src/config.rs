use crate::container_stack::ImplicitClose;
use crate::registry::ControlKind;

/// Per-session settings.
///
/// Builder-style: start from [`SessionConfig::default`] and override what
/// differs.
///
/// ```rust
/// use yamlknobs_ui::{ControlKind, ImplicitClose, SessionConfig};
///
/// let config = SessionConfig::default()
///     .title("Training")
///     .root_kind(ControlKind::Accordion)
///     .implicit_close(ImplicitClose::SameKind);
/// assert_eq!(config.title, "Training");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Text of the leading `Label`. Empty means no label.
    pub title:          String,
    pub root_kind:      ControlKind,
    pub root_title:     Option<String>,
    pub implicit_close: ImplicitClose,
    /// Whether [`Session::dump_default`](crate::Session::dump_default) removes annotations.
    pub strip_on_dump:  bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title:          "Title".to_string(),
            root_kind:      ControlKind::VBox,
            root_title:     Some("ROOT".to_string()),
            implicit_close: ImplicitClose::default(),
            strip_on_dump:  true,
        }
    }
}

impl SessionConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Omit the leading title label.
    pub fn untitled(mut self) -> Self {
        self.title.clear();
        self
    }

    pub fn root_kind(mut self, kind: ControlKind) -> Self {
        self.root_kind = kind;
        self
    }

    pub fn root_title(mut self, title: Option<String>) -> Self {
        self.root_title = title;
        self
    }

    pub fn implicit_close(mut self, policy: ImplicitClose) -> Self {
        self.implicit_close = policy;
        self
    }

    pub fn strip_on_dump(mut self, strip: bool) -> Self {
        self.strip_on_dump = strip;
        self
    }
}
