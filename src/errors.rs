//! Unified error types for Agrolibro.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! one-to-one onto the error taxonomy exposed to API callers: a caller can
//! always tell "not logged in" (`Unauthenticated`) apart from "logged in but
//! not permitted" (`Forbidden`) and from "record does not exist" (`NotFound`).

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing, malformed, or expired credential.
    #[error("authentication required: {message}")]
    Unauthenticated {
        /// Why the credential was rejected
        message: String,
    },

    /// Valid credential, but the role or ownership check failed.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Which check denied the request
        message: String,
    },

    /// The referenced record does not exist.
    #[error("{what} not found")]
    NotFound {
        /// Human description of the missing record ("venta 42", "usuario 7")
        what: String,
    },

    /// Malformed or logically inconsistent input.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// Unique-constraint collision (e.g. duplicate username).
    #[error("conflict: {message}")]
    Conflict {
        /// Which constraint collided
        message: String,
    },

    /// Configuration loading or validation failure.
    #[error("configuration error: {message}")]
    Config {
        /// What failed to load or validate
        message: String,
    },

    /// Internal failure that is not the caller's fault (password hashing, etc.).
    #[error("internal error: {message}")]
    Internal {
        /// Internal detail, logged but never meant to guide the caller
        message: String,
    },

    /// Store or transaction failure from `SeaORM`.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config files, socket binding).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
