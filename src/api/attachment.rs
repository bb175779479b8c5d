use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlotError, PlotResult};

use super::PlotModel;

/// Identity of the host view a model is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u64);

impl PlotModel {
    /// Binds the model to `view`. A model shows in at most one view at a time;
    /// re-attaching the same view is a no-op.
    pub fn attach(&mut self, view: ViewId) -> PlotResult<()> {
        match self.attached {
            Some(current) if current == view => Ok(()),
            Some(current) => Err(PlotError::AlreadyAttached { attached: current.0 }),
            None => {
                debug!(view = view.0, "plot model attached");
                self.attached = Some(view);
                Ok(())
            }
        }
    }

    pub fn detach(&mut self, view: ViewId) -> PlotResult<()> {
        if self.attached != Some(view) {
            return Err(PlotError::NotAttached { requested: view.0 });
        }
        debug!(view = view.0, "plot model detached");
        self.attached = None;
        Ok(())
    }

    #[must_use]
    pub fn attached_view(&self) -> Option<ViewId> {
        self.attached
    }
}
