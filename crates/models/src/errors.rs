use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid {kind} payload: {reason}")]
    Decode { kind: &'static str, reason: String },
}
