use thiserror::Error;

/// Precondition failures for grid construction, cell access and generation.
///
/// These indicate a caller bug (bad dimensions, bad coordinates). A correctly
/// configured [`SessionController`](crate::session::SessionController) never
/// produces them at play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid grid dimension {width}x{height}: both sides must be odd and at least 5")]
    InvalidDimension { width: u32, height: u32 },

    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("start ({x}, {y}) must be an odd-indexed interior cell")]
    InvalidStart { x: u32, y: u32 },

    #[error("exit ({x}, {y}) must be an odd-indexed interior cell distinct from the start")]
    InvalidExit { x: u32, y: u32 },
}
