//! UseCase errors.

use thiserror::Error;

use crate::domain::{RegistryError, StateTransitionError};

/// Failure to register a freshly upgraded connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    InvalidState(#[from] StateTransitionError),
}
