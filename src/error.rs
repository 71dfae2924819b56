// Street Cats - Registry errors
// Both variants are recoverable at the transport boundary; neither changes state.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Name, description or location missing or empty on create
    #[error("Required information omitted. Please provide Name, Description, Location")]
    Validation,

    #[error("Cat not found: {id}")]
    NotFound { id: u64 },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
