use thiserror::Error;

/// Errors raised by the color pipeline.
///
/// Contrast searches never fail; these only cover caller-supplied input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    /// A color or HSL component outside its valid range, or an unparsable hex string.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Input the pipeline cannot run on, such as an empty color list.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
