//! Result and error types for the core library

use thiserror::Error;

use super::PersonId;

/// Which side of a transaction resolved to nobody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Payers,
    Payees,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Payers => write!(f, "payers"),
            Side::Payees => write!(f, "payees"),
        }
    }
}

/// Which name table a duplicate definition collided in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Person,
    Group,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::Person => write!(f, "Person or alias"),
            Namespace::Group => write!(f, "Group"),
        }
    }
}

/// Core library error type
///
/// Every variant is a deterministic data error. Processing stops at the
/// first one and no partial ledger is returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{namespace} \"{name}\" is defined twice")]
    DuplicateName { name: String, namespace: Namespace },

    #[error("Currency \"{0}\" is defined twice")]
    DuplicateCurrency(String),

    #[error("Conversion from currency \"{0}\" is defined twice")]
    DuplicateConversion(String),

    #[error("No group or person with name \"{0}\" exists")]
    UnknownEntity(String),

    #[error("Currency \"{0}\" is not defined")]
    UnknownCurrency(String),

    #[error("No person with id {0}")]
    UnknownPerson(PersonId),

    #[error("Transaction in {currency} has no {side}")]
    EmptyParticipants { side: Side, currency: String },

    #[error("Settlement needs at least 2 people, got {0}")]
    InsufficientParticipants(usize),

    #[error("Invalid conversion: {0}")]
    InvalidConversion(String),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, namespace: Namespace) -> Self {
        Self::DuplicateName {
            name: name.into(),
            namespace,
        }
    }

    /// Create a parse error for a given input line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid conversion error
    pub fn invalid_conversion(msg: impl Into<String>) -> Self {
        Self::InvalidConversion(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = Error::UnknownEntity("dave".to_string());
        assert!(err.to_string().contains("\"dave\""));

        let err = Error::EmptyParticipants {
            side: Side::Payees,
            currency: "usd".to_string(),
        };
        assert_eq!(err.to_string(), "Transaction in usd has no payees");
    }

    #[test]
    fn test_duplicate_name_names_the_namespace() {
        let err = Error::duplicate_name("team", Namespace::Group);
        assert_eq!(err.to_string(), "Group \"team\" is defined twice");

        let err = Error::duplicate_name("al", Namespace::Person);
        assert_eq!(err.to_string(), "Person or alias \"al\" is defined twice");
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = Error::parse(7, "expected value");
        assert!(matches!(err, Error::Parse { line: 7, .. }));
        assert!(err.to_string().starts_with("Line 7:"));
    }
}
