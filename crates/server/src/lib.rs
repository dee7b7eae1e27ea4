//! Server-side twin of the client simulation.
//!
//! Submissions carry a seed, the ordered action ids and the claimed score.
//! [`Verifier`] replays them through the shared `game-core` engine with the
//! standard catalogs, scores the result and compares it with the claim under
//! [`VerifierConfig`]'s tolerance policy. Accepted runs become
//! [`SubmissionRecord`]s keyed by a content hash so inserts are idempotent.
pub mod config;
pub mod error;
pub mod payload;
pub mod record;
pub mod repository;
pub mod verifier;

pub use config::VerifierConfig;
pub use error::{Result, ServerError};
pub use payload::{Submission, VerificationMismatch, VerificationResponse};
pub use record::{SubmissionRecord, content_hash, state_fingerprint};
pub use repository::{InMemorySubmissionRepo, SubmissionRepository};
pub use verifier::{Verification, Verifier};
