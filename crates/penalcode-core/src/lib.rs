//! Offense cleaning core: reference registry, record types, and the
//! classification/validation pipeline.

pub mod criminality;
pub mod normalize;
pub mod offense;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod search;
pub mod statute;
pub mod vfo;

pub use criminality::{Criminality, is_criminal};
pub use normalize::normalize_class;
pub use offense::{CleanedOffense, RawOffense, Rejection, RejectionReason};
pub use pipeline::{Outcome, Pipeline, PipelineOutput, RunSummary};
pub use registry::{LabelFamily, ReferenceRegistry, RegistryError};
pub use search::search;
pub use statute::is_valid_section;
pub use vfo::tag_vfo;
