//! Replay a submission file through the verifier.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_core::GameEnv;
use game_server::{Submission, Verification, Verifier, VerifierConfig};

use crate::utils::{format_amount, load_session};

/// Replay a submission file and check its score
#[derive(Parser)]
pub struct Verify {
    /// Submission JSON file (as written by `xtask simulate --submission`)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Directory with game.toml / seasons.ron overrides
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Reject actions that were not on the sampled menu
    #[arg(long)]
    strict: bool,

    /// Print the persistence record of an accepted run
    #[arg(long)]
    record: bool,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

impl Verify {
    pub fn execute(self) -> Result<()> {
        let payload = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read submission: {}", self.file.display()))?;
        let submission = Submission::from_json(&payload)
            .with_context(|| format!("Failed to parse submission: {}", self.file.display()))?;

        let session = load_session(self.data_dir.as_deref(), None)?;
        let mut config = VerifierConfig::from_env();
        config.strict_menu |= self.strict;

        let verifier = Verifier::new(GameEnv::new(&session.content, &session.config), config);
        let verification = verifier.verify(&submission)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&verification.response)?);
        } else {
            print_verdict(&submission, &verification);
        }

        if self.record
            && let Some(record) = verification.record(&submission)?
        {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        if !verification.accepted() {
            anyhow::bail!("submission rejected");
        }
        Ok(())
    }
}

fn print_verdict(submission: &Submission, verification: &Verification) {
    let verdict = if verification.accepted() {
        style("ACCEPTED").bold().green()
    } else {
        style("REJECTED").bold().red()
    };
    println!("{} {}", style("Verdict:").bold().cyan(), verdict);
    println!("  Seed:          {}", submission.seed);
    println!(
        "  Actions:       {} submitted, {} replayed",
        submission.action_ids.len(),
        verification.actions_replayed
    );
    println!("  Claimed score: {}", format_amount(submission.score as f64));
    println!(
        "  Replay score:  {}",
        format_amount(verification.response.verified_score as f64)
    );
    println!(
        "  Ending:        {} (claimed {})",
        verification.response.verified_ending_id, submission.ending_id
    );
    if let Some(mismatch) = &verification.mismatch {
        println!(
            "  Difference:    {} (allowed {})",
            format_amount(mismatch.difference() as f64),
            format_amount(mismatch.allowed)
        );
    }
    println!("  State:         {}", verification.fingerprint);
}
