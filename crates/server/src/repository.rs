//! Storage contract for accepted submissions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, ServerError};
use crate::record::SubmissionRecord;

/// Store of accepted submissions keyed by content hash.
pub trait SubmissionRepository: Send + Sync {
    /// Inserts the record unless one with the same content hash exists.
    ///
    /// Returns `true` when the record was new.
    fn insert(&self, record: SubmissionRecord) -> Result<bool>;

    fn get(&self, content_hash: &str) -> Result<Option<SubmissionRecord>>;

    /// Highest scores first.
    fn top(&self, limit: usize) -> Result<Vec<SubmissionRecord>>;
}

/// In-memory implementation of SubmissionRepository
#[derive(Default)]
pub struct InMemorySubmissionRepo {
    records: RwLock<HashMap<String, SubmissionRecord>>,
}

impl InMemorySubmissionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionRepository for InMemorySubmissionRepo {
    fn insert(&self, record: SubmissionRecord) -> Result<bool> {
        let mut records = self.records.write().map_err(|_| ServerError::LockPoisoned)?;
        if records.contains_key(&record.content_hash) {
            tracing::debug!("Duplicate submission {}", record.content_hash);
            return Ok(false);
        }
        records.insert(record.content_hash.clone(), record);
        Ok(true)
    }

    fn get(&self, content_hash: &str) -> Result<Option<SubmissionRecord>> {
        let records = self.records.read().map_err(|_| ServerError::LockPoisoned)?;
        Ok(records.get(content_hash).cloned())
    }

    fn top(&self, limit: usize) -> Result<Vec<SubmissionRecord>> {
        let records = self.records.read().map_err(|_| ServerError::LockPoisoned)?;
        let mut ranked: Vec<SubmissionRecord> = records.values().cloned().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.content_hash.cmp(&b.content_hash))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str, score: u64) -> SubmissionRecord {
        SubmissionRecord {
            wallet: "0xabc".into(),
            score,
            seed: 1,
            ending_id: "neutral".into(),
            action_count: 3,
            content_hash: hash.into(),
            tx_id: None,
        }
    }

    #[test]
    fn inserts_are_idempotent_per_hash() {
        let repo = InMemorySubmissionRepo::new();
        assert!(repo.insert(record("aa", 10)).unwrap());
        assert!(!repo.insert(record("aa", 99)).unwrap());
        assert_eq!(repo.get("aa").unwrap().map(|r| r.score), Some(10));
        assert_eq!(repo.get("bb").unwrap(), None);
    }

    #[test]
    fn top_orders_by_score() {
        let repo = InMemorySubmissionRepo::new();
        for (hash, score) in [("a", 5), ("b", 50), ("c", 20)] {
            repo.insert(record(hash, score)).unwrap();
        }
        let scores: Vec<u64> = repo.top(2).unwrap().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![50, 20]);
    }
}
