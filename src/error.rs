use thiserror::Error;

pub type PickerResult<T> = std::result::Result<T, PickerError>;

/// Inputs the picker rejects at its boundary instead of letting NaN or
/// degenerate sizes propagate through the geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("layout {width}x{height} leaves no room for the picker")]
    InvalidLayout { width: f64, height: f64 },

    #[error("invalid ring radii: outer {outer}, inner {inner}")]
    InvalidRadius { outer: f64, inner: f64 },

    #[error("{name} component {value} is outside {min}..={max}")]
    ComponentOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("channel index {0} is not one of 0 (red), 1 (green), 2 (blue)")]
    InvalidChannel(usize),

    #[error("invalid picker config: {0}")]
    InvalidConfig(&'static str),
}
