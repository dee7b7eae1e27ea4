//! Wire shapes exchanged with the client.

use serde::{Deserialize, Serialize};

/// A finished run as submitted by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub seed: u32,
    pub action_ids: Vec<String>,
    /// Score the client computed.
    pub score: u64,
    pub ending_id: String,
    pub wallet: String,
    /// Season the run was played in; `accumulation` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    /// Options picked for each crisis, in the order the crises fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_choices: Option<Vec<String>>,
}

impl Submission {
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Verdict returned to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub verified_score: u64,
    pub verified_ending_id: String,
    pub accepted: bool,
}

/// Claimed and replayed scores of a rejected submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMismatch {
    pub claimed: u64,
    pub computed: u64,
    /// Largest difference the policy would have accepted.
    pub allowed: f64,
}

impl VerificationMismatch {
    pub fn difference(&self) -> u64 {
        self.claimed.abs_diff(self.computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{
            "seed": 42,
            "actionIds": ["mining_acceleration"],
            "score": 0,
            "endingId": "failure",
            "wallet": "0xabc"
        }"#;
        let submission = Submission::from_json(json).unwrap();
        assert_eq!(submission.seed, 42);
        assert_eq!(submission.season, None);
        assert_eq!(submission.crisis_choices, None);
    }

    #[test]
    fn client_payload_uses_camel_case_keys() {
        let json = r#"{"seed":42,"actionIds":["mining_acceleration"],"score":0,"endingId":"failure","wallet":"0xabc","crisisChoices":["settle"]}"#;
        let submission = Submission::from_json(json).unwrap();
        assert_eq!(submission.action_ids, vec!["mining_acceleration".to_string()]);
        assert_eq!(submission.ending_id, "failure");
        assert_eq!(submission.crisis_choices, Some(vec!["settle".to_string()]));

        let snake = r#"{"seed":42,"action_ids":["mining_acceleration"],"score":0,"ending_id":"failure","wallet":"0xabc"}"#;
        assert!(Submission::from_json(snake).is_err());
    }

    #[test]
    fn response_serializes_camel_case_keys() {
        let response = VerificationResponse {
            verified_score: 1_000,
            verified_ending_id: "success".into(),
            accepted: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "verifiedScore": 1_000,
                "verifiedEndingId": "success",
                "accepted": true
            })
        );
    }

    #[test]
    fn malformed_payloads_are_boundary_errors() {
        let err = Submission::from_json(r#"{"seed": -1}"#).unwrap_err();
        assert!(matches!(err, crate::ServerError::Json(_)));
    }
}
