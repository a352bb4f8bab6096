//! Data model shared by every pipeline stage.
//!
//! SBOM components and raw scanner findings come in through
//! [`crate::parsers`]; the normalizer turns them into [`Occurrence`]s, which
//! are what the diff engine and the aggregator operate on. The severity and
//! state enums and the count tables here are part of the output wire
//! contract.

mod counts;
mod finding;
mod identifiers;
mod metadata;
mod occurrence;
mod sbom;
mod severity;

pub use counts::*;
pub use finding::*;
pub use identifiers::*;
pub use metadata::*;
pub use occurrence::*;
pub use sbom::*;
pub use severity::*;

#[cfg(test)]
pub(crate) use occurrence::test_support;
