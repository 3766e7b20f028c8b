use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("invalid color: {name:?} -- must be one of {available}")]
    InvalidColorName { name: String, available: String },
    #[error("invalid glyph: {name:?} -- must be one of {available}")]
    InvalidGlyphName { name: String, available: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("process error: {0}")]
    Process(String),
}

pub type Result<T> = std::result::Result<T, UiError>;
