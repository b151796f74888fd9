//! Drives one drag gesture the way a browser dispatches it.
//!
//! Sequence: `dragstart` on the source, then `dragenter`/`dragover` and
//! `dragleave` on whatever targets the pointer crosses, then either `drop`
//! on the current target (only if its last `dragover` was accepted) or
//! nothing, and finally `dragend` on the source. Every event shares one
//! [`DataTransfer`].

use tracing::debug;

use crate::dom::{DataTransfer, DragEffect, Dom, Event, EventKind, NodeId, TransferMode};
use crate::error::UiResult;

/// How a gesture finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped onto a target that accepted it.
    Dropped { target: NodeId, effect: DragEffect },
    /// Released elsewhere, or over a target that refused it.
    Cancelled,
}

pub struct DragSession {
    dom: Dom,
    source: NodeId,
    transfer: Option<DataTransfer>,
    over: Option<NodeId>,
    accepted: bool,
}

impl DragSession {
    /// Fire `dragstart` on `source`.
    pub fn start(dom: &Dom, source: NodeId) -> UiResult<Self> {
        let event = dom.dispatch(source, Event::with_transfer(EventKind::DragStart, DataTransfer::new()))?;
        let mut transfer = event.data_transfer.unwrap_or_default();
        transfer.set_mode(TransferMode::Protected);
        debug!(source = %source, formats = transfer.types().count(), "Drag session started");
        Ok(Self {
            dom: dom.clone(),
            source,
            transfer: Some(transfer),
            over: None,
            accepted: false,
        })
    }

    /// Move the pointer onto `target`, leaving the previous target first.
    pub fn enter(&mut self, target: NodeId) -> UiResult<bool> {
        if let Some(previous) = self.over {
            if previous == target {
                return self.hover();
            }
            self.leave()?;
        }
        self.over = Some(target);
        self.fire(target, EventKind::DragEnter)?;
        self.hover()
    }

    /// Fire another `dragover` on the current target. Returns whether it accepts a drop.
    pub fn hover(&mut self) -> UiResult<bool> {
        let Some(target) = self.over else {
            return Ok(false);
        };
        let event = self.fire(target, EventKind::DragOver)?;
        self.accepted = event.default_prevented();
        Ok(self.accepted)
    }

    /// Move the pointer off the current target.
    pub fn leave(&mut self) -> UiResult<()> {
        if let Some(target) = self.over.take() {
            self.fire(target, EventKind::DragLeave)?;
        }
        self.accepted = false;
        Ok(())
    }

    /// Release the pointer, then fire `dragend` on the source.
    pub fn release(mut self) -> UiResult<DropOutcome> {
        let over = self.over;
        let outcome = match over {
            Some(target) if self.accepted => {
                if let Some(transfer) = self.transfer.as_mut() {
                    transfer.set_mode(TransferMode::ReadOnly);
                }
                let event = self.fire(target, EventKind::Drop)?;
                let effect = if event.default_prevented() {
                    event.data_transfer.as_ref().map(|t| t.drop_effect).unwrap_or_default()
                } else {
                    DragEffect::None
                };
                self.over = None;
                DropOutcome::Dropped { target, effect }
            }
            _ => {
                self.leave()?;
                if let Some(transfer) = self.transfer.as_mut() {
                    transfer.drop_effect = DragEffect::None;
                }
                DropOutcome::Cancelled
            }
        };

        if self.dom.contains(self.source) {
            self.fire(self.source, EventKind::DragEnd)?;
        }
        debug!(outcome = ?outcome, "Drag session finished");
        Ok(outcome)
    }

    /// Start on `source`, enter `target` and release there.
    pub fn drag_to(dom: &Dom, source: NodeId, target: NodeId) -> UiResult<DropOutcome> {
        let mut session = Self::start(dom, source)?;
        session.enter(target)?;
        session.release()
    }

    fn fire(&mut self, node: NodeId, kind: EventKind) -> UiResult<Event> {
        let transfer = self.transfer.take().unwrap_or_default();
        let mut event = self.dom.dispatch(node, Event::with_transfer(kind, transfer))?;
        self.transfer = event.data_transfer.take();
        Ok(event)
    }
}
