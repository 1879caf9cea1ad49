use thiserror::Error;

/// Errors raised by the compositing pipeline and the driver boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    /// The external lighting driver could not be started, fed, or exited non-zero.
    #[error("external driver `{program}` failed: {reason}")]
    ExternalDriverFailure { program: String, reason: String },

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("unknown keyboard model: {0}")]
    UnknownModel(String),

    #[error("invalid colour `{0}`: expected six hex digits")]
    InvalidColour(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
