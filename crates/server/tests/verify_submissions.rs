use game_content::StandardContent;
use game_core::{
    ContentOracle, GameConfig, GameEngine, GameEnv, Prng, RunState, ScoreEvaluator, SeasonId,
    StepError,
};
use game_server::{
    InMemorySubmissionRepo, ServerError, Submission, SubmissionRepository, Verifier,
    VerifierConfig,
};

const WALLET: &str = "0xc0ffee";

/// A run played the way the client plays it.
struct ClientRun {
    state: RunState,
    actions: Vec<String>,
    choices: Vec<String>,
}

/// Rotates through each menu and answers crises with their last option.
fn play_client(engine: &GameEngine<'_>, seed: u32, season: SeasonId) -> ClientRun {
    let mut rng = Prng::new(seed);
    let mut state = engine.initial_state(WALLET, season, &mut rng);
    let mut actions = Vec::new();
    let mut choices = Vec::new();

    while !state.terminal {
        if let Some(pending) = &state.pending_crisis {
            let option = engine
                .env()
                .content()
                .crisis(&pending.crisis_id)
                .and_then(|crisis| crisis.options.last())
                .map(|option| option.id.to_string())
                .expect("crisis has options");
            state = engine
                .resolve_crisis(&state, &option, &mut rng)
                .expect("client resolution applies")
                .state;
            choices.push(option);
            continue;
        }

        let menu = &state.available_action_ids;
        let id = menu[state.turn as usize % menu.len()].clone();
        state = engine
            .step(&state, &id, &mut rng)
            .into_result()
            .expect("menu action applies")
            .0;
        actions.push(id);
    }

    ClientRun {
        state,
        actions,
        choices,
    }
}

fn submission_for(
    env: GameEnv<'_>,
    run: &ClientRun,
    seed: u32,
    season: SeasonId,
    with_choices: bool,
) -> Submission {
    let evaluator = ScoreEvaluator::new(env);
    let ending = evaluator.heaviest_ending(&run.state);
    let breakdown = evaluator.score_with(&run.state, ending);
    Submission {
        seed,
        action_ids: run.actions.clone(),
        score: breakdown.score,
        ending_id: breakdown.ending.id,
        wallet: WALLET.to_string(),
        season: Some(season.to_string()),
        crisis_choices: with_choices.then(|| run.choices.clone()),
    }
}

#[test]
fn honest_runs_are_accepted_with_the_same_score() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let engine = GameEngine::new(env);
    let verifier = Verifier::new(env, VerifierConfig::default());

    for seed in 0..12 {
        for season in SeasonId::ALL {
            let run = play_client(&engine, seed, season);
            let submission = submission_for(env, &run, seed, season, true);

            let verification = verifier.verify(&submission).expect("replayable");
            assert!(verification.accepted(), "seed {seed} season {season}");
            assert_eq!(verification.response.verified_score, submission.score);
            assert_eq!(verification.response.verified_ending_id, submission.ending_id);
            assert_eq!(verification.final_state, run.state);
            assert_eq!(verification.actions_replayed, run.actions.len());
            assert!(verification.mismatch.is_none());
        }
    }
}

#[test]
fn crisis_choices_steer_the_replay() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let engine = GameEngine::new(env);
    let verifier = Verifier::new(env, VerifierConfig::default());

    let mut crises_seen = 0;
    for seed in 0..24 {
        let run = play_client(&engine, seed, SeasonId::Bear);
        if run.choices.is_empty() {
            continue;
        }
        crises_seen += 1;

        let hinted = submission_for(env, &run, seed, SeasonId::Bear, true);
        let verification = verifier.verify(&hinted).expect("replayable");
        assert_eq!(verification.final_state.resolved_crises.len(), run.choices.len());
        for (resolved, choice) in verification
            .final_state
            .resolved_crises
            .iter()
            .zip(&run.choices)
        {
            assert_eq!(&resolved.option_id, choice);
        }
    }
    assert!(crises_seen > 0, "no crisis fired across the seed range");
}

#[test]
fn tolerance_band_is_enforced_on_both_sides() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let engine = GameEngine::new(env);
    let policy = VerifierConfig::default();
    let verifier = Verifier::new(env, policy.clone());

    let run = play_client(&engine, 5, SeasonId::Accumulation);
    let honest = submission_for(env, &run, 5, SeasonId::Accumulation, true);
    let computed = honest.score;
    let allowed = policy.allowed_difference(computed).floor() as u64;

    // ================================================================
    // Right at the edge of the band
    // ================================================================
    let edge = Submission {
        score: computed + allowed,
        ..honest.clone()
    };
    let verification = verifier.verify(&edge).expect("replayable");
    assert!(verification.accepted());
    assert_eq!(verification.response.verified_score, computed);

    // ================================================================
    // One point past the edge
    // ================================================================
    let inflated = Submission {
        score: computed + allowed + 1,
        ..honest
    };
    let verification = verifier.verify(&inflated).expect("replayable");
    assert!(!verification.accepted());
    let mismatch = verification.mismatch.expect("mismatch reported");
    assert_eq!(mismatch.claimed, computed + allowed + 1);
    assert_eq!(mismatch.computed, computed);
    assert_eq!(mismatch.difference(), allowed + 1);
}

#[test]
fn accepted_runs_produce_deduplicated_records() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let engine = GameEngine::new(env);
    let verifier = Verifier::new(env, VerifierConfig::default());
    let repo = InMemorySubmissionRepo::new();

    let run = play_client(&engine, 11, SeasonId::Bull);
    let submission = submission_for(env, &run, 11, SeasonId::Bull, true);
    let verification = verifier.verify(&submission).expect("replayable");

    let record = verification
        .record(&submission)
        .expect("record builds")
        .expect("accepted run has a record");
    assert_eq!(record.seed, 11);
    assert_eq!(record.action_count, run.actions.len());
    assert_eq!(record.content_hash.len(), 64);

    assert!(repo.insert(record.clone()).expect("insert"));
    assert!(!repo.insert(record.clone()).expect("insert"));
    assert_eq!(repo.get(&record.content_hash).expect("get"), Some(record));

    let rejected = Submission {
        score: submission.score * 2 + 50_000_000,
        ..submission
    };
    let verification = verifier.verify(&rejected).expect("replayable");
    assert_eq!(verification.record(&rejected).expect("no error"), None);
}

#[test]
fn malformed_payloads_are_boundary_errors() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let verifier = Verifier::new(GameEnv::new(&content, &config), VerifierConfig::default());
    let base = Submission {
        seed: 42,
        action_ids: vec!["mining_acceleration".to_string()],
        score: 0,
        ending_id: "failure".to_string(),
        wallet: "0xabc".to_string(),
        season: None,
        crisis_choices: None,
    };

    let empty = Submission {
        action_ids: Vec::new(),
        ..base.clone()
    };
    assert!(matches!(
        verifier.verify(&empty),
        Err(ServerError::EmptyActions)
    ));

    let too_many = Submission {
        action_ids: vec!["governance_vote".to_string(); 31],
        ..base.clone()
    };
    assert!(matches!(
        verifier.verify(&too_many),
        Err(ServerError::TooManyActions {
            count: 31,
            limit: 30
        })
    ));

    let winter = Submission {
        season: Some("winter".to_string()),
        ..base.clone()
    };
    assert!(matches!(
        verifier.verify(&winter),
        Err(ServerError::UnknownSeason(name)) if name == "winter"
    ));

    let unknown = Submission {
        action_ids: vec!["fee_hike".to_string(), "moon_mission".to_string()],
        ..base
    };
    match verifier.verify(&unknown) {
        Err(ServerError::Replay { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(
                source,
                StepError::UnknownAction {
                    action_id: "moon_mission".to_string()
                }
            );
        }
        other => panic!("expected replay error, got {other:?}"),
    }
}

#[test]
fn strict_menu_rejects_catalog_fallbacks() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let submission = Submission {
        seed: 42,
        action_ids: vec!["fee_hike".to_string(), "mining_acceleration".to_string()],
        score: 0,
        ending_id: "failure".to_string(),
        wallet: "0xabc".to_string(),
        season: None,
        crisis_choices: None,
    };

    let lenient = Verifier::new(env, VerifierConfig::default());
    assert_eq!(
        lenient.verify(&submission).expect("replayable").actions_replayed,
        2
    );

    let strict = Verifier::new(
        env,
        VerifierConfig {
            strict_menu: true,
            ..VerifierConfig::default()
        },
    );
    let first_menu = {
        let mut rng = Prng::new(42);
        GameEngine::new(env)
            .initial_state("menu", SeasonId::default(), &mut rng)
            .available_action_ids
    };
    assert!(first_menu.contains(&"fee_hike".to_string()));
    assert!(matches!(
        strict.verify(&Submission {
            action_ids: vec!["mining_acceleration".to_string()],
            ..submission
        }),
        Err(ServerError::OffMenuAction { index: 0, .. })
    ));
}

#[test]
fn client_json_payloads_verify_end_to_end() {
    let content = StandardContent::new();
    let config = GameConfig::default();
    let env = GameEnv::new(&content, &config);
    let engine = GameEngine::new(env);
    let verifier = Verifier::new(env, VerifierConfig::default());

    let run = play_client(&engine, 42, SeasonId::Accumulation);
    let submission = submission_for(env, &run, 42, SeasonId::Accumulation, true);
    let actions = serde_json::to_string(&submission.action_ids).unwrap();
    let payload = format!(
        r#"{{"seed":42,"actionIds":{actions},"score":{},"endingId":"{}","wallet":"{WALLET}","season":"accumulation","crisisChoices":{}}}"#,
        submission.score,
        submission.ending_id,
        serde_json::to_string(&run.choices).unwrap()
    );

    let parsed = Submission::from_json(&payload).expect("camelCase payload parses");
    assert_eq!(parsed, submission);

    let verification = verifier.verify(&parsed).expect("replayable");
    assert!(verification.accepted());
    let response = serde_json::to_value(&verification.response).unwrap();
    assert_eq!(response["verifiedScore"], submission.score);
    assert_eq!(response["verifiedEndingId"], submission.ending_id.as_str());
    assert_eq!(response["accepted"], true);
}
