use serde::{Deserialize, Serialize};

use crate::core::{AxisChange, HitResult, ScreenRect, Viewport};
use crate::interaction::InteractionMode;
use crate::layout::LayoutState;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotContext {
    pub viewport: Option<Viewport>,
    pub plot_area: ScreenRect,
    pub layout_state: LayoutState,
    pub axis_count: usize,
    pub series_count: usize,
    pub attached_view: Option<u64>,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlotEvent {
    AxisChanged {
        axis_id: String,
        change: AxisChange,
    },
    Updated {
        excluded_values: usize,
        recovered_ranges: usize,
    },
    Rendered {
        primitive_count: usize,
    },
    TrackerChanged {
        hit: Option<HitResult>,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Observers see events and read plot context without mutating model
/// internals directly.
pub trait PlotObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PlotEvent, context: &PlotContext);
}
