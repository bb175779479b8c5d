mod observers;

pub use observers::{PlotContext, PlotEvent, PlotObserver};
