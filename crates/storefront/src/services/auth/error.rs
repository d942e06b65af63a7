//! Login error types.

use thiserror::Error;

/// Errors that can occur when logging in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password was left empty.
    #[error("username and password are required")]
    MissingFields,

    /// Username was present but unusable.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] funky_teens_core::UsernameError),
}
