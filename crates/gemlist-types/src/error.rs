use std::fmt;

use crate::{Facet, FacetKind, Family, Subtype};

/// Result type for gemlist-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Family/subtype combination that has no catalog (e.g. melee watches)
    InvalidCatalog { family: Family, subtype: Subtype },

    /// Facet does not exist for the filter model's family
    UnknownFacet { family: Family, facet: Facet },

    /// Facet exists but is of another kind than the operation expects
    FacetKind {
        facet: Facet,
        expected: FacetKind,
        actual: FacetKind,
    },

    /// Unrecognized name while parsing a family, subtype or facet
    Parse(String),

    /// Page number or page size outside the accepted range
    InvalidPage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCatalog { family, subtype } => {
                write!(f, "No {} catalog for {}", subtype, family)
            }
            Error::UnknownFacet { family, facet } => {
                write!(f, "Facet '{}' is not available for {}", facet, family)
            }
            Error::FacetKind {
                facet,
                expected,
                actual,
            } => write!(
                f,
                "Facet '{}' is a {} facet, expected {}",
                facet, actual, expected
            ),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::InvalidPage(msg) => write!(f, "Invalid page: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
