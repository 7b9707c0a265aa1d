// Engine module - pure transformations between filter state and the listing API
// This layer sits between the schema types and the runtime/CLI orchestration

pub mod compiler;
pub mod error;
pub mod normalize;

pub use compiler::{
    Conventions, DecodedQuery, FamilyContext, FieldRemap, ListEncoding, RangeEncoding, compile,
    decode,
};
pub use error::{Error, Result};
pub use normalize::{PageMeta, ResponseShape, envelope_failure, normalize, normalize_listing};
