use tracing::debug;

use crate::core::{Axis, AxisOrientation, AxisPair, AxisPosition, PolarTransform, Series};
use crate::error::{PlotError, PlotResult};

use super::PlotModel;

const DEFAULT_X_AXIS: &str = "x";
const DEFAULT_Y_AXIS: &str = "y";

fn is_x_like(axis: &Axis) -> bool {
    matches!(
        axis.orientation(),
        AxisOrientation::Horizontal | AxisOrientation::Angular
    )
}

fn is_y_like(axis: &Axis) -> bool {
    matches!(
        axis.orientation(),
        AxisOrientation::Vertical | AxisOrientation::Magnitude
    )
}

impl PlotModel {
    /// Explicit axis references must exist and face the right way.
    pub(super) fn check_series_axes(&self, series: &Series) -> PlotResult<()> {
        if let Some(x_id) = series.x_axis() {
            let axis = self
                .axes
                .get(x_id)
                .ok_or_else(|| PlotError::UnknownAxis(x_id.to_owned()))?;
            if !is_x_like(axis) {
                return Err(PlotError::axis_config(
                    x_id,
                    "series X axis must be horizontal or angular",
                ));
            }
        }
        if let Some(y_id) = series.y_axis() {
            let axis = self
                .axes
                .get(y_id)
                .ok_or_else(|| PlotError::UnknownAxis(y_id.to_owned()))?;
            if !is_y_like(axis) {
                return Err(PlotError::axis_config(
                    y_id,
                    "series Y axis must be vertical or magnitude",
                ));
            }
        }
        Ok(())
    }

    /// Adds a linear bottom X and left Y axis when no axis can serve as one.
    pub(super) fn ensure_default_axes(&mut self) -> PlotResult<()> {
        if !self.axes.values().any(is_x_like) {
            let axis = Axis::linear(self.free_axis_id(DEFAULT_X_AXIS), AxisPosition::Bottom)?;
            debug!(axis = axis.id(), "default X axis created");
            self.axes.insert(axis.id().to_owned(), axis);
        }
        if !self.axes.values().any(is_y_like) {
            let axis = Axis::linear(self.free_axis_id(DEFAULT_Y_AXIS), AxisPosition::Left)?;
            debug!(axis = axis.id(), "default Y axis created");
            self.axes.insert(axis.id().to_owned(), axis);
        }
        Ok(())
    }

    fn free_axis_id(&self, base: &str) -> String {
        let mut candidate = base.to_owned();
        let mut suffix = 1;
        while self.axes.contains_key(&candidate) {
            suffix += 1;
            candidate = format!("{base}{suffix}");
        }
        candidate
    }

    /// Axis ids a series draws against; unset ids take the first axis of a
    /// fitting orientation.
    pub(super) fn series_axis_ids(&self, series: &Series) -> Option<(String, String)> {
        let x_id = match series.x_axis() {
            Some(id) => id.to_owned(),
            None => self.axes.values().find(|axis| is_x_like(axis))?.id().to_owned(),
        };
        let y_id = match series.y_axis() {
            Some(id) => id.to_owned(),
            None => self.axes.values().find(|axis| is_y_like(axis))?.id().to_owned(),
        };
        Some((x_id, y_id))
    }

    /// Current transforms for an axis pair; `None` until both are laid out.
    pub(super) fn axis_pair(&self, x_id: &str, y_id: &str) -> Option<AxisPair> {
        let x_axis = self.axes.get(x_id)?;
        let y_axis = self.axes.get(y_id)?;
        match (x_axis.orientation(), y_axis.orientation()) {
            (AxisOrientation::Angular, AxisOrientation::Magnitude) => {
                let frame = y_axis.polar_frame()?;
                Some(AxisPair::Polar(PolarTransform::new(
                    x_axis.angular_transform().ok()?,
                    y_axis.transform().ok()?,
                    frame.center,
                )))
            }
            (AxisOrientation::Horizontal, AxisOrientation::Vertical) => Some(AxisPair::Cartesian {
                x: x_axis.transform().ok()?,
                y: y_axis.transform().ok()?,
            }),
            _ => None,
        }
    }

    /// Visible, titled series in draw order.
    pub(super) fn legend_entries(&self) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|series| series.is_visible() && series.title().is_some())
            .collect()
    }

    pub(super) fn legend_titles(&self) -> Vec<String> {
        self.legend_entries()
            .into_iter()
            .filter_map(|series| series.title().map(str::to_owned))
            .collect()
    }
}
