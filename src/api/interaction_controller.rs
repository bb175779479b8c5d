use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::tracker::find_nearest;
use crate::core::{AxisChange, AxisOrientation, HitResult, ScreenPoint, ScreenVector};
use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotEvent;
use crate::interaction::{InteractionMode, PlotAction};

use super::PlotModel;

/// What a handled action changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Axes whose desired range moved, keyed by axis id.
    pub changes: Vec<(String, AxisChange)>,
    /// Tracker hit for `PlotAction::Track`.
    pub hit: Option<HitResult>,
}

impl ActionOutcome {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty() && self.hit.is_none()
    }
}

impl PlotModel {
    /// Applies a semantic input action.
    ///
    /// Axes that reject the action (disabled, clamped or at their span limit)
    /// are left untouched and do not appear in the outcome.
    pub fn handle_action(&mut self, action: PlotAction) -> PlotResult<ActionOutcome> {
        let outcome = match action {
            PlotAction::Pan { delta } => self.apply_pan(delta)?,
            PlotAction::ZoomAt { position, factor } => self.apply_zoom(position, factor)?,
            PlotAction::Track { position } => {
                let hit = self.track(position)?;
                ActionOutcome {
                    changes: Vec::new(),
                    hit,
                }
            }
            PlotAction::Reset => {
                let changes = self
                    .axes
                    .iter_mut()
                    .filter_map(|(axis_id, axis)| {
                        axis.reset().map(|change| (axis_id.clone(), change))
                    })
                    .collect();
                ActionOutcome { changes, hit: None }
            }
        };

        if !outcome.changes.is_empty() {
            self.refresh_after_axis_change()?;
            for (axis_id, change) in &outcome.changes {
                self.emit(PlotEvent::AxisChanged {
                    axis_id: axis_id.clone(),
                    change: *change,
                });
            }
        }
        trace!(?action, changed = outcome.changes.len(), "action handled");
        Ok(outcome)
    }

    fn apply_pan(&mut self, delta: ScreenVector) -> PlotResult<ActionOutcome> {
        if !delta.dx.is_finite() || !delta.dy.is_finite() {
            return Err(PlotError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.interaction.set_mode(InteractionMode::Panning);
        let changes = self
            .axes
            .iter_mut()
            .filter_map(|(axis_id, axis)| {
                let change = match axis.orientation() {
                    AxisOrientation::Horizontal if delta.dx != 0.0 => axis.pan(delta.dx),
                    AxisOrientation::Vertical if delta.dy != 0.0 => axis.pan(delta.dy),
                    _ => None,
                };
                change.map(|change| (axis_id.clone(), change))
            })
            .collect();
        self.interaction.set_mode(InteractionMode::Idle);
        Ok(ActionOutcome { changes, hit: None })
    }

    fn apply_zoom(&mut self, position: ScreenPoint, factor: f64) -> PlotResult<ActionOutcome> {
        if !position.is_finite() || !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(format!(
                "zoom needs a finite position and a positive factor, got {factor}"
            )));
        }
        let changes = self
            .axes
            .iter_mut()
            .filter_map(|(axis_id, axis)| {
                let change = match axis.orientation() {
                    AxisOrientation::Horizontal => axis.zoom_at(position.x, factor),
                    AxisOrientation::Vertical => axis.zoom_at(position.y, factor),
                    // Radial zoom keeps the centre fixed.
                    AxisOrientation::Magnitude => axis.zoom_at(0.0, factor),
                    AxisOrientation::Angular => None,
                };
                change.map(|change| (axis_id.clone(), change))
            })
            .collect();
        Ok(ActionOutcome { changes, hit: None })
    }

    /// Moves the tracker to `pointer` and returns the hit, if any.
    fn track(&mut self, pointer: ScreenPoint) -> PlotResult<Option<HitResult>> {
        if !self.config.tracker.enabled {
            return Ok(None);
        }
        if !pointer.is_finite() {
            return Err(PlotError::InvalidData(
                "tracker position must be finite".to_owned(),
            ));
        }
        self.interaction.set_mode(InteractionMode::Tracking);
        let hit = find_nearest(&self.rendered, pointer, self.config.tracker.tolerance_px);
        let changed = self.interaction.tracker().hit != hit;
        self.interaction.tracker_mut().show(pointer, hit.clone());
        if changed {
            self.emit(PlotEvent::TrackerChanged { hit: hit.clone() });
        }
        Ok(hit)
    }

    /// Hides the tracker, for example when the pointer leaves the view.
    pub fn track_leave(&mut self) {
        let had_hit = self.interaction.tracker().hit.is_some();
        self.interaction.tracker_mut().hide();
        self.interaction.set_mode(InteractionMode::Idle);
        if had_hit {
            self.emit(PlotEvent::TrackerChanged { hit: None });
        }
    }

    /// Nearest rendered point to `pointer` without touching tracker state.
    #[must_use]
    pub fn find_nearest(&self, pointer: ScreenPoint, tolerance_px: f64) -> Option<HitResult> {
        find_nearest(&self.rendered, pointer, tolerance_px)
    }

    fn refresh_after_axis_change(&mut self) -> PlotResult<()> {
        for axis in self.axes.values_mut() {
            axis.update_actual_range();
        }
        if let Some(viewport) = self.viewport {
            self.layout_and_project(viewport, None)?;
        }
        // Tracker geometry is stale once the axes move.
        if self.interaction.tracker().visible {
            self.interaction.tracker_mut().hide();
            self.interaction.set_mode(InteractionMode::Idle);
        }
        debug!("axes changed by interaction");
        Ok(())
    }
}
