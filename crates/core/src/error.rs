//! Error types for the finderdb record store.

use crate::record::RecordId;
use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for finderdb operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for store and query operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed query descriptor.
    Parse {
        fragment: String,
    },
    /// Field name not present in the target entity.
    UnknownField {
        entity: String,
        field: String,
    },
    /// Wrong number of bound arguments for a descriptor's placeholders.
    ParameterMismatch {
        expected: usize,
        got: usize,
    },
    /// Invalid page request (non-positive page size).
    InvalidPageRequest {
        message: String,
    },
    /// Record not found by identity.
    NotFound {
        entity: String,
        id: RecordId,
    },
    /// Type mismatch between a field and a value.
    TypeMismatch {
        expected: DataType,
        got: Option<DataType>,
    },
    /// Null written to a non-nullable field.
    NullConstraint {
        field: String,
    },
    /// Invalid entity definition.
    InvalidSchema {
        message: String,
    },
    /// Invalid operation (e.g. on a finished transaction).
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { fragment } => {
                write!(f, "Unrecognized descriptor fragment: {}", fragment)
            }
            Error::UnknownField { entity, field } => {
                write!(f, "Unknown field {} on entity {}", field, entity)
            }
            Error::ParameterMismatch { expected, got } => {
                write!(f, "Parameter mismatch: expected {}, got {}", expected, got)
            }
            Error::InvalidPageRequest { message } => {
                write!(f, "Invalid page request: {}", message)
            }
            Error::NotFound { entity, id } => {
                write!(f, "Not found in {}: id {}", entity, id)
            }
            Error::TypeMismatch { expected, got } => match got {
                Some(got) => write!(f, "Type mismatch: expected {}, got {}", expected, got),
                None => write!(f, "Type mismatch: expected {}, got null", expected),
            },
            Error::NullConstraint { field } => {
                write!(f, "Null constraint violation on field: {}", field)
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a parse error naming the unrecognized fragment.
    pub fn parse(fragment: impl Into<String>) -> Self {
        Error::Parse {
            fragment: fragment.into(),
        }
    }

    /// Creates an unknown field error.
    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Error::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Creates a parameter mismatch error.
    pub fn parameter_mismatch(expected: usize, got: usize) -> Self {
        Error::ParameterMismatch { expected, got }
    }

    /// Creates an invalid page request error.
    pub fn invalid_page_request(message: impl Into<String>) -> Self {
        Error::InvalidPageRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: impl Into<String>, id: RecordId) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: Option<DataType>) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates a null constraint error.
    pub fn null_constraint(field: impl Into<String>) -> Self {
        Error::NullConstraint {
            field: field.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
