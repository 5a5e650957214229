//! The import pipeline: batch driver, commit coordinator, and the
//! `Importer` facade that ties one review session together.

pub mod batch;
pub mod commit;
pub mod importer;

pub use batch::run_batch;
pub use commit::{commit_staged, CommitConfig};
pub use importer::Importer;
