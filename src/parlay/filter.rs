//! Screening of props ahead of the combination search.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::parlay::{GameFilter, Leg};
use crate::prop::GameId;

/// Props whose trust score is at least `min_trust`, in the order given.
pub fn by_trust<L: Leg>(props: &[L], min_trust: f64) -> Vec<&L> {
    props
        .iter()
        .filter(|prop| prop.trust_score() >= min_trust)
        .collect()
}

pub fn by_game<'a, L: Leg>(props: Vec<&'a L>, filter: &GameFilter) -> Vec<&'a L> {
    match filter {
        GameFilter::Any => {
            let mut seen = FxHashSet::default();
            props
                .into_iter()
                .filter(|prop| seen.insert(prop.game_id()))
                .collect()
        }
        GameFilter::Single => busiest_game(props),
        GameFilter::Specific(games) if games.is_empty() => props,
        GameFilter::Specific(games) => {
            let games: FxHashSet<_> = games.iter().collect();
            props
                .into_iter()
                .filter(|prop| games.contains(&prop.game_id()))
                .collect()
        }
    }
}

/// Props of the game with the most entries. Ties go to the game seen first.
fn busiest_game<L: Leg>(props: Vec<&L>) -> Vec<&L> {
    let mut order: Vec<GameId> = vec![];
    let mut groups: FxHashMap<GameId, Vec<&L>> = FxHashMap::default();
    for prop in props {
        let game_id = prop.game_id();
        if !groups.contains_key(&game_id) {
            order.push(game_id.clone());
        }
        groups.entry(game_id).or_default().push(prop);
    }

    let mut busiest: Option<&GameId> = None;
    let mut most = 0;
    for game_id in &order {
        let count = groups[game_id].len();
        if count > most {
            most = count;
            busiest = Some(game_id);
        }
    }
    match busiest.cloned() {
        Some(game_id) => groups.remove(&game_id).unwrap_or_default(),
        None => vec![],
    }
}
