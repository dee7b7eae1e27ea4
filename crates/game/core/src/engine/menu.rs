//! Stratified action-menu sampling.

use crate::env::{ActionCategory, ActionDef, GameEnv, Prng};
use crate::state::RunState;

use super::select::sample_without_replacement;

/// Category with the most catalog entries; ties go to the earlier category.
pub(crate) fn primary_category(actions: &[ActionDef]) -> ActionCategory {
    let mut best = ActionCategory::ALL[0];
    let mut best_count = 0;
    for category in ActionCategory::ALL {
        let count = actions.iter().filter(|a| a.category == category).count();
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    best
}

/// Samples the menu for the next turn.
///
/// Buckets the catalog by category (in [`ActionCategory::ALL`] order, catalog
/// order inside a bucket), keeps applicable entries with positive weight, and
/// draws without replacement: the primary pick count from the largest
/// category and the secondary count from every other one. One draw per pick.
pub(crate) fn sample_menu(env: &GameEnv<'_>, state: &RunState, rng: &mut Prng) -> Vec<String> {
    let actions = env.content().actions();
    let config = env.config();
    let season = env.season(state.season);
    let primary = primary_category(actions);

    let mut menu = Vec::with_capacity(config.menu_size(ActionCategory::ALL.len()));
    for category in ActionCategory::ALL {
        let quota = if category == primary {
            config.primary_picks
        } else {
            config.secondary_picks
        };

        let candidates: Vec<(&ActionDef, f64)> = actions
            .iter()
            .filter(|action| action.category == category)
            .map(|action| (action, action.weight_in(state, &season)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();

        for index in sample_without_replacement(&weights, quota, rng) {
            menu.push(candidates[index].0.id.to_string());
        }
    }
    menu
}
