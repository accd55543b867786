//! Assembles nested containers from a flat stream of start / add / finish
//! events.
//!
//! Only the open path is tracked: the container currently receiving children
//! plus the suspended ancestors below it on a stack. A container's children
//! become visible on the container control only when it is finished.

use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

use crate::control::{ControlError, ControlHandle};
use crate::options::Options;
use crate::registry::{ControlKind, Toolkit};

// ── ImplicitClose ─────────────────────────────────────────────────────────

/// When starting a non-nested container finishes the one currently open.
///
/// The root container is never closed implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImplicitClose {
    /// Any non-nested start closes the current container: consecutive
    /// non-nested containers become siblings.
    #[default]
    AnyNonNested,
    /// Only a non-nested start of the same kind as the current container
    /// closes it; a different kind opens inside it.
    SameKind,
    /// Containers are closed only by `Close` or finish-all.
    Never,
}

impl ImplicitClose {
    fn closes(self, current: ControlKind, starting: ControlKind) -> bool {
        match self {
            ImplicitClose::AnyNonNested => true,
            ImplicitClose::SameKind => current == starting,
            ImplicitClose::Never => false,
        }
    }
}

/// A policy name other than `any`, `same-kind` or `never`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown implicit-close policy `{0}` (any, same-kind, never)")]
pub struct UnknownPolicy(pub String);

impl FromStr for ImplicitClose {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(ImplicitClose::AnyNonNested),
            "same-kind" => Ok(ImplicitClose::SameKind),
            "never" => Ok(ImplicitClose::Never),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

// ── ContainerState ────────────────────────────────────────────────────────

struct ContainerState {
    kind: ControlKind,
    title: Option<String>,
    container: ControlHandle,
    children: Vec<ControlHandle>,
    /// Index-aligned with `children`.
    titles: Vec<Option<String>>,
}

impl ContainerState {
    fn new(kind: ControlKind, title: Option<String>, container: ControlHandle) -> Self {
        Self { kind, title, container, children: Vec::new(), titles: Vec::new() }
    }

    fn push(&mut self, child: ControlHandle, title: Option<String>) {
        self.children.push(child);
        self.titles.push(title);
    }

    /// Write the accumulated children (and titles, where supported) into the
    /// container control. Repeating a commit produces the same result.
    fn commit(&self) {
        log::debug!(
            "finishing {}/{} with {} children",
            self.kind,
            self.title.as_deref().unwrap_or("-"),
            self.children.len()
        );
        let mut control = self.container.borrow_mut();
        control.set_children(self.children.clone());
        if control.supports_titles() {
            for (i, title) in self.titles.iter().enumerate() {
                if let Some(title) = title {
                    control.set_title(i, title);
                }
            }
        }
    }
}

// ── ContainerStack ────────────────────────────────────────────────────────

pub struct ContainerStack {
    toolkit: Rc<dyn Toolkit>,
    policy: ImplicitClose,
    current: ContainerState,
    stack: Vec<ContainerState>,
}

impl ContainerStack {
    /// Build the root container and make it current.
    pub fn new(
        toolkit: Rc<dyn Toolkit>,
        root_kind: ControlKind,
        root_title: Option<String>,
        policy: ImplicitClose,
    ) -> Result<Self, ControlError> {
        if !root_kind.is_container() {
            return Err(ControlError::NotAContainer(root_kind));
        }
        let root = toolkit.build(root_kind, &Options::new())?;
        Ok(Self {
            toolkit,
            policy,
            current: ContainerState::new(root_kind, root_title, root),
            stack: Vec::new(),
        })
    }

    pub fn root(&self) -> &ControlHandle {
        self.stack.first().map_or(&self.current.container, |s| &s.container)
    }

    /// The container currently receiving children.
    pub fn current(&self) -> &ControlHandle {
        &self.current.container
    }

    pub fn current_kind(&self) -> ControlKind {
        self.current.kind
    }

    /// Number of open containers above the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn policy(&self) -> ImplicitClose {
        self.policy
    }

    /// Open a container of `kind` inside the current one.
    ///
    /// With `nested == false` the current container is finished first when
    /// the [`ImplicitClose`] policy says so, making the new container its
    /// sibling.
    pub fn start_container(
        &mut self,
        kind: ControlKind,
        title: Option<String>,
        nested: bool,
    ) -> Result<ControlHandle, ControlError> {
        if !kind.is_container() {
            return Err(ControlError::NotAContainer(kind));
        }
        if !nested && !self.stack.is_empty() && self.policy.closes(self.current.kind, kind) {
            log::debug!("{kind} follows {} without nesting, closing it", self.current.kind);
            self.finish(false);
        }

        log::debug!("starting {kind}/{}", title.as_deref().unwrap_or("-"));
        let container = self.toolkit.build(kind, &Options::new())?;
        self.current.push(container.clone(), title.clone());

        let parent = std::mem::replace(
            &mut self.current,
            ContainerState::new(kind, title, container.clone()),
        );
        self.stack.push(parent);
        Ok(container)
    }

    pub fn add_child(&mut self, child: ControlHandle, title: Option<String>) {
        self.current.push(child, title);
    }

    /// Commit the current container and make its parent current.
    ///
    /// Returns the committed container, or with `finish_all` keeps unwinding
    /// and returns the root. Finishing the root commits it and leaves it
    /// current, so it can be repeated.
    pub fn finish(&mut self, finish_all: bool) -> ControlHandle {
        loop {
            self.current.commit();
            let committed = self.current.container.clone();
            let Some(parent) = self.stack.pop() else {
                return committed;
            };
            self.current = parent;
            if !finish_all {
                return committed;
            }
        }
    }

    pub fn finish_all(&mut self) -> ControlHandle {
        self.finish(true)
    }
}
