use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The scramble charset has no usable glyph.
    #[error("charset is empty: at least one printable, non-space glyph is required")]
    EmptyCharset,

    /// Referenced input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// The render surface failed to initialize or a write failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
