//! Custom error types for registry operations.

use std::fmt;

/// Errors that can occur while editing a prefix table or registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The prefix already has an entry.
    AlreadyRegistered {
        /// The canonical prefix that was already registered
        prefix: String,
    },
    /// The prefix, or the item under it, is not registered.
    NotRegistered {
        /// The canonical prefix that was looked up
        prefix: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered { prefix } => {
                write!(
                    f,
                    "prefix '{prefix}' is already registered; use replace to change its value"
                )
            }
            Self::NotRegistered { prefix } => {
                write!(
                    f,
                    "nothing is registered under prefix '{prefix}'; verify the prefix and register it first"
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl RegistryError {
    /// Creates an `AlreadyRegistered` error.
    #[must_use]
    pub fn already_registered(prefix: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            prefix: prefix.into(),
        }
    }

    /// Creates a `NotRegistered` error.
    #[must_use]
    pub fn not_registered(prefix: impl Into<String>) -> Self {
        Self::NotRegistered {
            prefix: prefix.into(),
        }
    }

    /// Returns true if this error indicates a duplicate prefix.
    #[must_use]
    pub const fn is_already_registered(&self) -> bool {
        matches!(self, Self::AlreadyRegistered { .. })
    }

    /// Returns true if this error indicates a missing prefix or item.
    #[must_use]
    pub const fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }

    /// Returns the canonical prefix the error is about.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::AlreadyRegistered { prefix } | Self::NotRegistered { prefix } => prefix,
        }
    }
}
