use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("canvas must have positive dimensions, got {width}x{height}")]
    InvalidCanvas { width: i32, height: i32 },
    #[error("balloon radius must be positive, got {0}")]
    InvalidRadius(i32),
    #[error("balloon padding must not be negative, got {0}")]
    InvalidPadding(i32),
    #[error("search reach out of range: radius {radius}, padding {padding}, {max_steps} steps")]
    SearchOutOfRange {
        radius: i32,
        padding: i32,
        max_steps: u32,
    },
}
