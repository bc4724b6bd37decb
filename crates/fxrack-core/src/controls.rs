//! Control surface contract and the events it reports back.
//!
//! Every realized stage gets one [`ControlGroup`]: a label, a slider and a
//! removal affordance. Widgets never call into the chain directly; they emit
//! [`ControlEvent`]s over a channel that the rack drains between UI events.

use crate::parameter::ParameterRange;
use crate::stage::StageId;
use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Event emitted by a stage's controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// The slider moved.
    ParamChanged { stage: StageId, value: f32 },
    /// The removal affordance was activated.
    RemoveRequested { stage: StageId },
}

impl ControlEvent {
    pub fn stage(&self) -> StageId {
        match *self {
            ControlEvent::ParamChanged { stage, .. } | ControlEvent::RemoveRequested { stage } => {
                stage
            }
        }
    }
}

/// Sending half handed to widgets.
#[derive(Debug, Clone)]
pub struct ControlSender {
    tx: Sender<ControlEvent>,
}

impl ControlSender {
    pub fn send(&self, event: ControlEvent) {
        // Only fails once the rack is gone, at which point nobody listens.
        if self.tx.send(event).is_err() {
            tracing::debug!("Dropped {:?}: control receiver closed", event);
        }
    }

    pub fn param_changed(&self, stage: StageId, value: f32) {
        self.send(ControlEvent::ParamChanged { stage, value });
    }

    pub fn request_removal(&self, stage: StageId) {
        self.send(ControlEvent::RemoveRequested { stage });
    }
}

/// Receiving half drained by the rack.
#[derive(Debug)]
pub struct ControlReceiver {
    rx: Receiver<ControlEvent>,
}

impl ControlReceiver {
    /// Next pending event, if any. Never blocks.
    pub fn try_next(&self) -> Option<ControlEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain every pending event in arrival order.
    pub fn drain(&self) -> Vec<ControlEvent> {
        self.rx.try_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Create a connected sender/receiver pair.
pub fn control_channel() -> (ControlSender, ControlReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ControlSender { tx }, ControlReceiver { rx })
}

/// Widget group rendered for one stage.
#[derive(Debug, Clone)]
pub struct ControlGroup {
    pub stage: StageId,
    pub label: &'static str,
    pub range: ParameterRange,
    pub value: f32,
    events: ControlSender,
}

impl ControlGroup {
    pub fn new(
        stage: StageId,
        label: &'static str,
        range: ParameterRange,
        value: f32,
        events: ControlSender,
    ) -> Self {
        Self {
            stage,
            label,
            range,
            value,
            events,
        }
    }

    /// Report a slider movement.
    pub fn slide(&self, value: f32) {
        self.events.param_changed(self.stage, value);
    }

    /// Activate the removal affordance.
    pub fn remove(&self) {
        self.events.request_removal(self.stage);
    }
}

/// Display surface that hosts control groups in chain order.
pub trait ControlSurface {
    /// Append a group after every group already shown.
    fn append_group(&mut self, group: ControlGroup);

    /// Take the group of `stage` off the display.
    fn remove_group(&mut self, stage: StageId);

    /// Move the slider of `stage` to a value the chain applied.
    fn set_group_value(&mut self, stage: StageId, value: f32);
}

/// Surface that keeps groups in memory, for tests and headless sessions.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    groups: Vec<ControlGroup>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups in display order.
    pub fn groups(&self) -> &[ControlGroup] {
        &self.groups
    }

    pub fn group(&self, stage: StageId) -> Option<&ControlGroup> {
        self.groups.iter().find(|g| g.stage == stage)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.groups.iter().map(|g| g.label).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl ControlSurface for HeadlessSurface {
    fn append_group(&mut self, group: ControlGroup) {
        self.groups.push(group);
    }

    fn remove_group(&mut self, stage: StageId) {
        self.groups.retain(|g| g.stage != stage);
    }

    fn set_group_value(&mut self, stage: StageId, value: f32) {
        if let Some(group) = self.groups.iter_mut().find(|g| g.stage == stage) {
            group.value = value;
        }
    }
}
