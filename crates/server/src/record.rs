//! Persistence records and hashing helpers.

use game_core::RunState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ServerError};
use crate::payload::Submission;

/// Row stored for every accepted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub wallet: String,
    pub score: u64,
    pub seed: u32,
    pub ending_id: String,
    pub action_count: usize,
    /// Hex SHA-256 of the canonical submission; dedup key.
    pub content_hash: String,
    pub tx_id: Option<String>,
}

impl SubmissionRecord {
    /// Builds a record from the submission and the verified outcome.
    pub fn new(submission: &Submission, verified_score: u64, verified_ending_id: &str) -> Result<Self> {
        Ok(Self {
            wallet: submission.wallet.clone(),
            score: verified_score,
            seed: submission.seed,
            ending_id: verified_ending_id.to_string(),
            action_count: submission.action_ids.len(),
            content_hash: content_hash(submission)?,
            tx_id: None,
        })
    }

    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }
}

/// Fields covered by the content hash, in their canonical order and with
/// the same camelCase keys the client sends.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalSubmission<'a> {
    seed: u32,
    action_ids: &'a [String],
    score: u64,
    ending_id: &'a str,
    wallet: &'a str,
}

/// Hex SHA-256 over the canonical JSON of the claimed run.
///
/// Season and crisis choices are excluded so resubmitting the same claim
/// with different replay hints still deduplicates.
pub fn content_hash(submission: &Submission) -> Result<String> {
    let canonical = CanonicalSubmission {
        seed: submission.seed,
        action_ids: &submission.action_ids,
        score: submission.score,
        ending_id: &submission.ending_id,
        wallet: &submission.wallet,
    };
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Hex SHA-256 over the bincode encoding of a run state.
pub fn state_fingerprint(state: &RunState) -> Result<String> {
    let bytes =
        bincode::serialize(state).map_err(|e| ServerError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
