use thiserror::Error;

/// Errors reported by the diagram's mutation API.
///
/// Every error is reported before any state is touched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DiagramError {
    /// A site must lie strictly inside the diagram.
    #[error("Site ({x}, {y}) is outside of the open rectangle 0 < x < {width}, 0 < y < {height}")]
    OutOfBounds { x: f64, y: f64, width: u32, height: u32 },

    #[error("There are no sites to remove")]
    EmptyCollection,

    #[error("Diagram dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 }
}
