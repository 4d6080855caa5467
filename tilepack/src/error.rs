use thiserror::Error;

#[derive(Debug, Error)]
pub enum TilepackError {
    #[error("pixel index {index} is outside the buffer of {len} pixels")]
    OutOfBounds { index: isize, len: usize },

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("{unplaced} tile(s) do not fit in the {canvas_width}x{canvas_height} atlas")]
    PackingCapacityExceeded {
        unplaced: usize,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("pixel buffer of {len} pixels does not match {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },

    #[error("invalid PADDING value '{0}': expected a non-negative integer")]
    InvalidPadding(String),
}

pub type Result<T, E = TilepackError> = std::result::Result<T, E>;
