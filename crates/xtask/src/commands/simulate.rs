//! Play a seeded run from the command line.
//!
//! Picks actions with a scripted strategy, answers crises with a fixed
//! policy, scores the result and optionally writes a submission file that
//! `xtask verify` accepts.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::path::PathBuf;

use game_core::{
    ActionCategory, GameEngine, GameEnv, Meters, Prng, RunState, ScoreBreakdown, ScoreEvaluator,
    SeasonId,
};
use game_server::Submission;

use crate::utils::{format_amount, load_session};

/// Play a seeded run with a scripted strategy
#[derive(Parser)]
pub struct Simulate {
    /// Run seed (random when omitted)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u32>,

    /// Market season
    #[arg(long, default_value = "accumulation", value_parser = parse_season)]
    season: SeasonId,

    /// How actions are picked from each menu
    #[arg(long, value_enum, default_value = "rotate")]
    strategy: Strategy,

    /// How crises are answered
    #[arg(long, value_enum, default_value = "first")]
    crisis: CrisisPolicy,

    /// Override the configured run length
    #[arg(long, value_name = "TURNS")]
    max_turns: Option<u32>,

    /// Directory with game.toml / seasons.ron overrides
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seed for the ending tie-break (non-deterministic when omitted)
    #[arg(long, value_name = "SEED")]
    flavor_seed: Option<u64>,

    /// Wallet recorded in the submission
    #[arg(long, default_value = "local")]
    wallet: String,

    /// Write the run as a submission JSON file
    #[arg(long, value_name = "PATH")]
    submission: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Strategy {
    /// Cycle through the menu with the turn number
    Rotate,
    /// Always take the first menu entry
    First,
    /// Prefer community, compliance and development actions
    Cautious,
    /// Prefer extraction actions
    Greedy,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CrisisPolicy {
    First,
    Last,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Turn log plus final meters and score
    Summary,
    /// Final state and score breakdown as JSON
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let session = load_session(self.data_dir.as_deref(), self.max_turns)?;
        let env = GameEnv::new(&session.content, &session.config);
        let engine = GameEngine::new(env);
        let seed = self.seed.unwrap_or_else(rand::random);

        tracing::info!("Simulating seed={} season={}", seed, self.season);

        let mut rng = Prng::new(seed);
        let mut state = engine.initial_state(self.wallet.as_str(), self.season, &mut rng);
        let mut action_ids = Vec::new();
        let mut choices = Vec::new();

        while !state.terminal {
            if let Some(pending) = &state.pending_crisis {
                let crisis = env
                    .content()
                    .crisis(&pending.crisis_id)
                    .with_context(|| format!("Unknown crisis '{}'", pending.crisis_id))?;
                let option = match self.crisis {
                    CrisisPolicy::First => crisis.options.first(),
                    CrisisPolicy::Last => crisis.options.last(),
                }
                .with_context(|| format!("Crisis '{}' has no options", crisis.id))?;

                let resolution = engine.resolve_crisis(&state, option.id, &mut rng)?;
                choices.push(resolution.option_id);
                state = resolution.state;
                continue;
            }

            let id = self.pick(&engine, &state);
            let (next, report) = engine.step(&state, &id, &mut rng).into_result()?;
            tracing::debug!(
                "Turn {}: {} severity={} draws={}",
                report.turn,
                report.action_id,
                report.severity,
                report.draws
            );
            action_ids.push(id);
            state = next;
        }

        let mut flavor: Box<dyn RngCore> = match self.flavor_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };
        let breakdown = ScoreEvaluator::new(env).evaluate(&state, &mut *flavor);

        match self.format {
            OutputFormat::Summary => print_summary(seed, &state, &breakdown),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "seed": seed,
                    "state": state,
                    "score": breakdown,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }

        if let Some(path) = &self.submission {
            let submission = Submission {
                seed,
                action_ids,
                score: breakdown.score,
                ending_id: breakdown.ending.id.clone(),
                wallet: self.wallet.clone(),
                season: Some(self.season.to_string()),
                crisis_choices: Some(choices),
            };
            let json = serde_json::to_string_pretty(&submission)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write submission: {}", path.display()))?;
            tracing::info!("Submission written to {}", path.display());
        }

        Ok(())
    }

    fn pick(&self, engine: &GameEngine<'_>, state: &RunState) -> String {
        let menu = &state.available_action_ids;
        let preferred: &[ActionCategory] = match self.strategy {
            Strategy::Rotate => return menu[state.turn as usize % menu.len()].clone(),
            Strategy::First => return menu[0].clone(),
            Strategy::Cautious => &[
                ActionCategory::Community,
                ActionCategory::Compliance,
                ActionCategory::Development,
            ],
            Strategy::Greedy => &[ActionCategory::Extraction],
        };

        let offered = engine.menu(state);
        preferred
            .iter()
            .find_map(|category| offered.iter().find(|action| action.category == *category))
            .map(|action| action.id.to_string())
            .unwrap_or_else(|| menu[0].clone())
    }
}

fn parse_season(value: &str) -> std::result::Result<SeasonId, String> {
    value.parse::<SeasonId>().map_err(|_| {
        let known: Vec<String> = SeasonId::ALL.iter().map(|id| id.to_string()).collect();
        format!("unknown season '{value}' (expected one of: {})", known.join(", "))
    })
}

fn print_summary(seed: u32, state: &RunState, breakdown: &ScoreBreakdown) {
    println!("{}", style("=== Run Log ===").bold().green());
    for line in state.log.iter().rev() {
        println!("  {}", line);
    }
    println!();

    println!("{}", style("Final Meters:").bold().yellow());
    let meters = &state.meters;
    println!("  Reserves:  {}", format_amount(meters.reserves()));
    println!("  Legacy:    {}", format_amount(meters.legacy()));
    for (name, value) in [
        ("Unrest", meters.unrest()),
        ("Oversight", meters.oversight()),
        ("Trust", meters.trust()),
        ("Momentum", meters.momentum()),
    ] {
        println!("  {:<10} {:>6.2} / {}", format!("{name}:"), value, Meters::PERCENT_MAX);
    }
    println!("  Price:     {:.4}", state.market.price());
    println!();

    println!("{}", style("Score:").bold().yellow());
    println!("  Seed:      {}", seed);
    println!(
        "  Turns:     {} / {} ({})",
        state.turn,
        state.max_turns,
        state
            .terminal_reason
            .map(|reason| reason.to_string())
            .unwrap_or_else(|| "running".to_string())
    );
    println!("  Base:      {}", format_amount(breakdown.base));
    for combo in &breakdown.combos {
        println!("  Combo:     {} x{:.2}", combo.name, combo.multiplier);
    }
    println!("  Survival:  x{:.2}", breakdown.survival_multiplier);
    println!(
        "  Ending:    {} x{:.2}",
        breakdown.ending.title, breakdown.ending.multiplier
    );
    println!(
        "  {} {}",
        style("Total:").bold().cyan(),
        format_amount(breakdown.score as f64)
    );
}
