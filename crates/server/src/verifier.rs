//! Replay verification of submitted runs.
//!
//! The verifier replays the submitted seed and action list through the same
//! [`GameEngine`] the client plays with, then scores the replayed state with
//! [`ScoreEvaluator`]. Two inputs never reach the verifier verbatim (crisis
//! choices made without hints, and the client's flavor-RNG ending pick), so
//! the score comparison keeps a tolerance band instead of demanding equality.

use std::str::FromStr;

use game_core::{
    EndingChoice, GameEngine, GameEnv, Prng, RunState, ScoreBreakdown, ScoreEvaluator, SeasonId,
    StepOutcome,
};

use crate::config::VerifierConfig;
use crate::error::{Result, ServerError};
use crate::payload::{Submission, VerificationMismatch, VerificationResponse};
use crate::record::{SubmissionRecord, state_fingerprint};

/// Full result of replaying one submission.
#[derive(Clone, Debug)]
pub struct Verification {
    pub response: VerificationResponse,
    /// Set when the claimed score fell outside the tolerance band.
    pub mismatch: Option<VerificationMismatch>,
    pub breakdown: ScoreBreakdown,
    pub final_state: RunState,
    /// Submitted actions applied before the run ended.
    pub actions_replayed: usize,
    /// Hex SHA-256 of the final state, for log correlation.
    pub fingerprint: String,
}

impl Verification {
    pub fn accepted(&self) -> bool {
        self.response.accepted
    }

    /// Persistence record for an accepted run; `None` when rejected.
    pub fn record(&self, submission: &Submission) -> Result<Option<SubmissionRecord>> {
        if !self.accepted() {
            return Ok(None);
        }
        SubmissionRecord::new(
            submission,
            self.response.verified_score,
            &self.response.verified_ending_id,
        )
        .map(Some)
    }
}

/// Replays submissions against a fixed rule set.
#[derive(Clone, Debug)]
pub struct Verifier<'a> {
    engine: GameEngine<'a>,
    evaluator: ScoreEvaluator<'a>,
    config: VerifierConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(env: GameEnv<'a>, config: VerifierConfig) -> Self {
        Self {
            engine: GameEngine::new(env),
            evaluator: ScoreEvaluator::new(env),
            config,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Replays and scores a submission.
    ///
    /// Returns an error only for payloads that cannot be replayed; a score
    /// outside tolerance is a rejected [`Verification`].
    pub fn verify(&self, submission: &Submission) -> Result<Verification> {
        let season = self.check_payload(submission)?;
        tracing::info!(
            "Verifying run seed={} wallet={} actions={}",
            submission.seed,
            submission.wallet,
            submission.action_ids.len()
        );

        let (final_state, actions_replayed) = self
            .replay(submission, season)
            .inspect_err(|err| log_replay_failure(submission.seed, err))?;
        let ending = self.ending_for(&final_state, &submission.ending_id);
        let breakdown = self.evaluator.score_with(&final_state, ending);
        let computed = breakdown.score;

        let accepted = self.config.within_tolerance(submission.score, computed);
        let mismatch = (!accepted).then(|| VerificationMismatch {
            claimed: submission.score,
            computed,
            allowed: self.config.allowed_difference(computed),
        });

        let fingerprint = state_fingerprint(&final_state)?;
        match &mismatch {
            None => tracing::info!(
                "Accepted seed={} score={} ending={} state={}",
                submission.seed,
                computed,
                breakdown.ending.id,
                fingerprint
            ),
            Some(m) => tracing::warn!(
                "Rejected seed={} claimed={} computed={} allowed={:.0} state={}",
                submission.seed,
                m.claimed,
                m.computed,
                m.allowed,
                fingerprint
            ),
        }

        Ok(Verification {
            response: VerificationResponse {
                verified_score: computed,
                verified_ending_id: breakdown.ending.id.clone(),
                accepted,
            },
            mismatch,
            breakdown,
            final_state,
            actions_replayed,
            fingerprint,
        })
    }

    fn check_payload(&self, submission: &Submission) -> Result<SeasonId> {
        if submission.action_ids.is_empty() {
            return Err(ServerError::EmptyActions);
        }

        let limit = self
            .config
            .max_actions
            .unwrap_or(self.engine.env().config().max_turns as usize);
        if submission.action_ids.len() > limit {
            return Err(ServerError::TooManyActions {
                count: submission.action_ids.len(),
                limit,
            });
        }

        match &submission.season {
            None => Ok(SeasonId::default()),
            Some(name) => {
                SeasonId::from_str(name).map_err(|_| ServerError::UnknownSeason(name.clone()))
            }
        }
    }

    /// Replays actions until the run ends or the list is exhausted.
    fn replay(&self, submission: &Submission, season: SeasonId) -> Result<(RunState, usize)> {
        let mut rng = Prng::new(submission.seed);
        let mut state = self
            .engine
            .initial_state(submission.wallet.as_str(), season, &mut rng);
        let mut choices = submission.crisis_choices.iter().flatten();
        let mut applied = 0;

        for (index, action_id) in submission.action_ids.iter().enumerate() {
            if state.terminal {
                tracing::warn!(
                    "Run ended after {} actions; ignoring {} trailing",
                    applied,
                    submission.action_ids.len() - applied
                );
                break;
            }

            if state.has_pending_crisis() {
                state = self.resolve_pending(&state, choices.next(), &mut rng)?;
                if state.terminal {
                    continue;
                }
            }

            if self.config.strict_menu && !state.available_action_ids.contains(action_id) {
                return Err(ServerError::OffMenuAction {
                    index,
                    action_id: action_id.clone(),
                });
            }

            state = match self.engine.step(&state, action_id, &mut rng) {
                StepOutcome::Applied { state, report } => {
                    tracing::debug!(
                        "Turn {}: {} ({:?}, {}) draws={} crisis={:?} event={:?}",
                        report.turn,
                        report.action_id,
                        report.lookup,
                        report.severity,
                        report.draws,
                        report.crisis_id,
                        report.event_id
                    );
                    state
                }
                StepOutcome::Rejected { error, .. } => {
                    return Err(ServerError::Replay {
                        index,
                        source: error,
                    });
                }
            };
            applied += 1;
        }

        // A crisis rolled on the last turn is only resolved when the client
        // told us how it was answered.
        if state.has_pending_crisis()
            && !state.terminal
            && let Some(choice) = choices.next()
        {
            state = self.resolve_pending(&state, Some(choice), &mut rng)?;
        }

        Ok((state, applied))
    }

    fn resolve_pending(
        &self,
        state: &RunState,
        choice: Option<&String>,
        rng: &mut Prng,
    ) -> Result<RunState> {
        let option_id = match choice {
            Some(choice) => choice.clone(),
            None => {
                let default = state
                    .pending_crisis
                    .as_ref()
                    .and_then(|pending| self.engine.env().content().crisis(&pending.crisis_id))
                    .and_then(|crisis| crisis.default_option())
                    .map(|option| option.id.to_string())
                    .unwrap_or_default();
                tracing::warn!(
                    "No crisis choice supplied at turn {}; using '{}'",
                    state.turn,
                    default
                );
                default
            }
        };

        let resolution = self.engine.resolve_crisis(state, &option_id, rng)?;
        tracing::debug!(
            "Resolved {} with {}: {}",
            resolution.crisis_id,
            resolution.option_id,
            resolution.narrative
        );
        Ok(resolution.state)
    }

    /// Honours the claimed ending when the replayed state supports it.
    fn ending_for(&self, state: &RunState, claimed: &str) -> EndingChoice {
        match self.evaluator.claimed_ending(state, claimed) {
            Some(ending) => ending,
            None => {
                let ending = self.evaluator.heaviest_ending(state);
                tracing::warn!(
                    "Claimed ending '{}' does not match the replay; using '{}'",
                    claimed,
                    ending.id
                );
                ending
            }
        }
    }
}

/// Content bugs are logged as errors, bad input as warnings and retryable
/// engine states at debug level.
fn log_replay_failure(seed: u32, err: &ServerError) {
    let code = err.error_code();
    match err.engine_severity() {
        Some(severity) if severity.is_internal() => tracing::error!(
            "Replay failed seed={} code={} ({}): {}",
            seed,
            code,
            severity.as_str(),
            err
        ),
        Some(severity) if severity.is_recoverable() => tracing::debug!(
            "Replay stopped seed={} code={} ({}): {}",
            seed,
            code,
            severity.as_str(),
            err
        ),
        Some(severity) => tracing::warn!(
            "Replay rejected seed={} code={} ({}): {}",
            seed,
            code,
            severity.as_str(),
            err
        ),
        None => tracing::warn!("Replay rejected seed={} code={}: {}", seed, code, err),
    }
}
