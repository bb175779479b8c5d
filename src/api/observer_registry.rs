use crate::error::{PlotError, PlotResult};
use crate::extensions::{PlotContext, PlotEvent, PlotObserver};

use super::PlotModel;

impl PlotModel {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn PlotObserver>) -> PlotResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(PlotError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.iter().any(|entry| entry.id() == observer_id) {
            return Err(PlotError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn context(&self) -> PlotContext {
        PlotContext {
            viewport: self.viewport,
            plot_area: self.layout.plot_area,
            layout_state: self.layout.state,
            axis_count: self.axes.len(),
            series_count: self.series.len(),
            attached_view: self.attached.map(|view| view.0),
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit(&mut self, event: PlotEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(&event, &context);
        }
    }
}
