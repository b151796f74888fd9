//! Interaction events and the drag data channel.

use std::collections::BTreeMap;
use std::fmt;

use super::NodeId;

/// Events views react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::DragStart => "dragstart",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drag operation, used both for what a source allows and what a target performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
    All,
}

impl DragEffect {
    /// Whether a source allowing `self` permits `effect`.
    pub fn permits(&self, effect: DragEffect) -> bool {
        match self {
            Self::All => effect != Self::None,
            Self::None => false,
            allowed => *allowed == effect,
        }
    }
}

/// Which parts of a [`DataTransfer`] are accessible at the current phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    /// Drag start: data may be written.
    #[default]
    ReadWrite,
    /// Enter, over, leave: only the list of formats is visible.
    Protected,
    /// Drop: data may be read.
    ReadOnly,
}

/// Data carried by one drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DataTransfer {
    data: BTreeMap<String, String>,
    mode: TransferMode,
    pub effect_allowed: DragEffect,
    pub drop_effect: DragEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }

    /// Store `value` under `format`. Ignored outside drag start.
    pub fn set_data(&mut self, format: &str, value: impl Into<String>) -> bool {
        if self.mode != TransferMode::ReadWrite {
            return false;
        }
        self.data.insert(format.to_string(), value.into());
        true
    }

    /// Read the value stored under `format`. Hidden while protected.
    pub fn get_data(&self, format: &str) -> Option<&str> {
        if self.mode == TransferMode::Protected {
            return None;
        }
        self.data.get(format).map(String::as_str)
    }

    /// Formats carrying data; always visible.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn has_type(&self, format: &str) -> bool {
        self.data.contains_key(format)
    }
}

/// An event travelling from its target up through its ancestors.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
    pub data_transfer: Option<DataTransfer>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            default_prevented: false,
            propagation_stopped: false,
            data_transfer: None,
        }
    }

    pub fn with_transfer(kind: EventKind, transfer: DataTransfer) -> Self {
        Self {
            data_transfer: Some(transfer),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_target(&mut self, node: NodeId) {
        self.target = Some(node);
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = Some(node);
    }
}
