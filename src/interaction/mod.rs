use serde::{Deserialize, Serialize};

use crate::core::{HitResult, ScreenPoint, ScreenVector};

/// Semantic input actions; binding raw gestures to these happens in the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlotAction {
    /// Drag by `delta` pixels; horizontal axes take `dx`, vertical axes `dy`.
    Pan { delta: ScreenVector },
    /// Zoom around `position`; `factor > 1` zooms in.
    ZoomAt { position: ScreenPoint, factor: f64 },
    /// Move the tracker to `position`.
    Track { position: ScreenPoint },
    /// Restore every axis to its configured range.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Tracking,
}

/// Public tracker state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerState {
    pub visible: bool,
    pub pointer: Option<ScreenPoint>,
    pub hit: Option<HitResult>,
}

impl TrackerState {
    pub(crate) fn show(&mut self, pointer: ScreenPoint, hit: Option<HitResult>) {
        self.visible = hit.is_some();
        self.pointer = Some(pointer);
        self.hit = hit;
    }

    pub(crate) fn hide(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    tracker: TrackerState,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn tracker(&self) -> &TrackerState {
        &self.tracker
    }

    pub(crate) fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut TrackerState {
        &mut self.tracker
    }
}
