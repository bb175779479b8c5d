use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Raised at construction time when an axis could never be rendered.
    #[error("invalid axis configuration for `{axis}`: {reason}")]
    InvalidAxisConfig { axis: String, reason: String },

    /// Range collapsed to zero width. Recovered internally by widening the span.
    #[error("degenerate range: min={min}, max={max}")]
    DegenerateRange { min: f64, max: f64 },

    /// Non-finite or out-of-domain value. Recovered internally by excluding it.
    #[error("value {value} is outside the domain of the {axis_kind} transform")]
    InvalidDataValue { value: f64, axis_kind: &'static str },

    #[error("unknown axis `{0}`")]
    UnknownAxis(String),

    #[error("plot model is already attached to view {attached}")]
    AlreadyAttached { attached: u64 },

    #[error("plot model is not attached to view {requested}")]
    NotAttached { requested: u64 },

    #[error("drawing backend failure: {0}")]
    Backend(String),
}

impl PlotError {
    pub(crate) fn axis_config(axis: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAxisConfig {
            axis: axis.to_owned(),
            reason: reason.into(),
        }
    }
}
