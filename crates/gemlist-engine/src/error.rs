use std::fmt;

use gemlist_types::CatalogKind;

/// Result type for gemlist-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Filter model and family context describe different catalogs
    KindMismatch {
        filters: CatalogKind,
        context: CatalogKind,
    },

    /// Parameter value that cannot be mapped back onto a facet
    InvalidParam { key: String, reason: String },

    /// Types layer error
    Types(gemlist_types::Error),
}

impl Error {
    pub(crate) fn invalid_param(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidParam {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KindMismatch { filters, context } => write!(
                f,
                "Filters for {} cannot be compiled against the {} endpoint",
                filters, context
            ),
            Error::InvalidParam { key, reason } => {
                write!(f, "Invalid parameter '{}': {}", key, reason)
            }
            Error::Types(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::KindMismatch { .. } | Error::InvalidParam { .. } => None,
        }
    }
}

impl From<gemlist_types::Error> for Error {
    fn from(err: gemlist_types::Error) -> Self {
        Error::Types(err)
    }
}
