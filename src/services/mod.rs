pub mod catalog;
pub mod submission;
pub mod toggles;

pub use catalog::CatalogStore;
pub use submission::{SubmissionPipeline, SubmitOutcome, SubmitState};
pub use toggles::{ToggleKind, ToggleMutator, ToggleOutcome};
