//! verbdrill-core: verb collection, quiz sessions, and the generation contract.
//!
//! This crate holds everything that does not talk to the network or the
//! terminal: the data model, the deduplicating store and its persistence
//! slot, quiz selection and grading, and the client that turns a backend's
//! structured output into verb records.

pub mod error;
pub mod generation;
pub mod ids;
pub mod model;
pub mod quiz;
pub mod selector;
pub mod slot;
pub mod store;
pub mod traits;

pub use error::{GenerationError, ProviderError, QuizError, StoreError};
pub use model::{QuizMode, VerbRecord};
pub use store::{MergeOutcome, VerbStore};
