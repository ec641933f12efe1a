use thiserror::Error;

use crate::rules::RuleError;
use crate::sources::ResolveError;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("property '{field}' must not be empty")]
    EmptyProperty { field: &'static str },
}

impl EmitError {
    /// The declarative property an error should be reported against, when the
    /// error is tied to one.
    pub fn property_field(&self) -> Option<&'static str> {
        match self {
            EmitError::Resolve(err) => Some(err.field()),
            EmitError::EmptyProperty { field } => Some(field),
            EmitError::Rule(_) => None,
        }
    }
}
