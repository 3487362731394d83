use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Invalid input: {width}x{height} RGBA buffer needs {expected} bytes, got {actual}")]
    InvalidInput {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("Could not load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Could not save image: {0}")]
    ImageSave(image::ImageError),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported file format: {0}. Please use .toml or .json files")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShapeError {
    /// True for the pipeline's own input validation failures, as opposed to
    /// loader or I/O failures raised around it.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::ZeroDimensions { .. })
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
