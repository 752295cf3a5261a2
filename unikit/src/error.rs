//! Error type for fixture generation and configuration.

use std::any::type_name;
use std::fmt;

/// Single error kind for everything that can go wrong while configuring or
/// materializing a fixture.
///
/// Every failure is terminal: there is no retry and no partial result. A
/// generation error means the test author has to fix the setup (register a
/// missing mapping, make an excluded field vacancy-capable), not handle a
/// transient condition.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// No implementation registered for an abstract slot type
    UnresolvedMapping { abstract_type: &'static str },

    /// Mapping registration rejected: key not abstract or value not concrete
    InvalidMapping { message: String },

    /// An excluded field's type has no vacant (zero) value
    VacantUnsupported { type_name: &'static str },

    /// A shape the engine cannot populate
    UnsupportedShape { type_name: &'static str },

    /// Internal invariant violation in the fixture engine
    Internal { message: String },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::UnresolvedMapping { abstract_type } => {
                write!(f, "there is no mapping for: {}", abstract_type)
            }
            InitError::InvalidMapping { message } => {
                write!(f, "invalid mapping registration: {}", message)
            }
            InitError::VacantUnsupported { type_name } => {
                write!(f, "no vacant value for excluded field of type: {}", type_name)
            }
            InitError::UnsupportedShape { type_name } => {
                write!(f, "unsupported shape for generation: {}", type_name)
            }
            InitError::Internal { message } => {
                write!(f, "internal fixture error: {}", message)
            }
        }
    }
}

impl std::error::Error for InitError {}

impl InitError {
    /// Create an unresolved mapping error naming the abstract type
    pub fn unresolved_mapping<A: ?Sized>() -> Self {
        Self::UnresolvedMapping {
            abstract_type: type_name::<A>(),
        }
    }

    /// Create an invalid mapping registration error
    pub fn invalid_mapping(message: impl Into<String>) -> Self {
        Self::InvalidMapping {
            message: message.into(),
        }
    }

    /// Create a vacant-value error naming the field type
    pub fn vacant_unsupported<T: ?Sized>() -> Self {
        Self::VacantUnsupported {
            type_name: type_name::<T>(),
        }
    }

    /// Create an unsupported shape error naming the type
    pub fn unsupported_shape<T: ?Sized>() -> Self {
        Self::UnsupportedShape {
            type_name: type_name::<T>(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
