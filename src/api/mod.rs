mod attachment;
mod interaction_controller;
mod observer_registry;
mod plot_config;
mod plot_model;
mod render_coordinator;
mod series_binding;
mod update_pass;

pub use attachment::ViewId;
pub use interaction_controller::ActionOutcome;
pub use plot_config::{PlotModelConfig, TrackerConfig};
pub use plot_model::PlotModel;
pub use update_pass::UpdateDiagnostics;
