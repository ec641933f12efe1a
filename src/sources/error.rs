use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("invalid glob pattern '{pattern}': {reason}")]
    PatternInvalid { pattern: String, reason: String },

    #[error("I/O error while expanding '{pattern}'")]
    Io {
        pattern: String,
        #[source]
        source: std::io::Error,
    },
}

impl GlobError {
    /// The pattern whose expansion failed.
    pub fn pattern(&self) -> &str {
        match self {
            GlobError::PatternInvalid { pattern, .. } => pattern,
            GlobError::Io { pattern, .. } => pattern,
        }
    }
}

/// A declared source pattern could not be expanded. Fatal to the current
/// module's action emission; the host engine reports it against the
/// declarative property named by `field` and may continue with other modules.
#[derive(Debug, Error)]
#[error("{field}: cannot resolve files that match pattern '{pattern}'")]
pub struct ResolveError {
    pub field: &'static str,
    pub pattern: String,
    #[source]
    pub source: GlobError,
}

impl ResolveError {
    /// The declarative property the failing pattern came from.
    pub fn field(&self) -> &'static str {
        self.field
    }
}
