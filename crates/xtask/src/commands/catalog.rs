//! List catalog content.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_core::{ContentOracle, GameConfig, RunState, SeasonId};

use crate::utils::load_session;

/// List catalog content
#[derive(Parser)]
pub struct Catalog {
    /// Section to list (all when omitted)
    #[arg(value_enum)]
    kind: Option<CatalogKind>,

    /// Directory with game.toml / seasons.ron overrides
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CatalogKind {
    Actions,
    Events,
    Crises,
    Endings,
    Combos,
    Seasons,
}

impl Catalog {
    pub fn execute(self) -> Result<()> {
        let session = load_session(self.data_dir.as_deref(), None)?;
        let content = &session.content;
        let shows = |kind: CatalogKind| self.kind.is_none_or(|wanted| wanted == kind);

        if shows(CatalogKind::Actions) {
            print_actions(content, &session.config);
        }
        if shows(CatalogKind::Events) {
            println!("{}", style("Events:").bold().yellow());
            for event in content.events() {
                println!("  {:<26} {}", event.id, event.name);
            }
            println!();
        }
        if shows(CatalogKind::Crises) {
            println!("{}", style("Crises:").bold().yellow());
            for crisis in content.crises() {
                let options: Vec<&str> = crisis.options.iter().map(|option| option.id).collect();
                println!("  {:<22} {}", crisis.id, options.join(", "));
            }
            println!();
        }
        if shows(CatalogKind::Endings) {
            println!("{}", style("Endings:").bold().yellow());
            for ending in content.endings() {
                println!(
                    "  {:<20} weight {:>4.1}  x{:.2}  {}",
                    ending.id, ending.weight, ending.multiplier, ending.title
                );
            }
            println!();
        }
        if shows(CatalogKind::Combos) {
            println!("{}", style("Combos:").bold().yellow());
            for combo in content.combos() {
                println!("  {:<22} x{:.2}  {}", combo.id, combo.multiplier, combo.name);
            }
            println!();
        }
        if shows(CatalogKind::Seasons) {
            println!("{}", style("Seasons:").bold().yellow());
            for id in SeasonId::ALL {
                let season = content.season(id);
                println!(
                    "  {:<13} drift u{:+.1} o{:+.1} t{:+.1} m{:+.1}  bias {:+.3}  vol {:.1}  crisis x{:.2}  event x{:.2}  extraction x{:.2}",
                    id.to_string(),
                    season.unrest_drift,
                    season.oversight_drift,
                    season.trust_drift,
                    season.momentum_drift,
                    season.sentiment_bias,
                    season.volatility,
                    season.crisis_factor,
                    season.event_factor,
                    season.extraction_weight
                );
            }
            println!();
        }

        Ok(())
    }
}

fn print_actions(content: &dyn ContentOracle, config: &GameConfig) {
    println!("{}", style("Actions:").bold().yellow());
    let fresh = RunState::new("catalog", SeasonId::default(), config);
    let season = content.season(SeasonId::default());
    for action in content.actions() {
        let available = action.applies.is_none_or(|applies| applies(&fresh));
        println!(
            "  {:<26} {:<12} risk {:>4.2}  weight {:>4.2}{}",
            action.id,
            action.category.to_string(),
            action.risk,
            (action.weight)(&fresh, &season),
            if available { "" } else { "  (locked)" }
        );
    }
    println!();
}
