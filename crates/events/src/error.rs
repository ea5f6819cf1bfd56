use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Event has no attribute named '{0}'")]
    MissingAttribute(String),

    #[error("Event attribute '{name}' holds {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
