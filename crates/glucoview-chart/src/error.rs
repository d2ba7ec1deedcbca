#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ComposeError {
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
}
