use rustc_hash::FxHashSet;
use tinyrand::{Seeded, StdRand};

use super::search::{estimate_legs, SearchConfig};
use super::*;

#[derive(Debug, PartialEq)]
struct TestLeg {
    name: &'static str,
    team: &'static str,
    opponent: &'static str,
    trust: f64,
    odds: i32,
}

impl Leg for TestLeg {
    fn trust_score(&self) -> f64 {
        self.trust
    }

    fn american_odds(&self) -> i32 {
        self.odds
    }

    fn game_id(&self) -> GameId {
        GameId::new(self.team, self.opponent)
    }
}

fn leg(name: &'static str, team: &'static str, opponent: &'static str, trust: f64, odds: i32) -> TestLeg {
    TestLeg {
        name,
        team,
        opponent,
        trust,
        odds,
    }
}

fn names<L: std::ops::Deref<Target = TestLeg>>(legs: &[L]) -> Vec<&'static str> {
    legs.iter().map(|leg| leg.name).collect()
}

fn slate() -> Vec<TestLeg> {
    vec![
        leg("A", "LAL", "GSW", 72.0, -120),
        leg("B", "MIL", "BKN", 68.0, -130),
        leg("C", "DAL", "PHX", 65.0, -115),
        leg("D", "DEN", "LAC", 70.0, -125),
        leg("E", "GSW", "LAL", 63.0, -110),
        leg("F", "BOS", "MIA", 81.0, 120),
        leg("G", "NYK", "PHI", 77.0, 105),
        leg("H", "SAC", "POR", 58.0, -105),
        leg("I", "MEM", "NOP", 74.0, 140),
        leg("J", "CHI", "DET", 66.0, -140),
        leg("K", "ATL", "ORL", 61.0, 110),
        leg("L", "TOR", "CHA", 69.0, -160),
    ]
}

#[test]
fn trust_methods() {
    let legs = [leg("A", "X", "Y", 70.0, -110), leg("B", "Z", "W", 80.0, -110)];
    assert_eq!(75.0, parlay_trust(&legs, TrustMethod::Average));
    assert_eq!(56.0, parlay_trust(&legs, TrustMethod::Probability));
    assert_eq!(0.0, parlay_trust::<TestLeg>(&[], TrustMethod::Average));
    assert_eq!(0.0, parlay_trust::<TestLeg>(&[], TrustMethod::Probability));
}

#[test]
fn odds_of_legs() {
    let legs = [leg("A", "X", "Y", 70.0, -120), leg("B", "Z", "W", 80.0, 150)];
    assert_eq!(358, parlay_odds(&legs));
    assert_eq!(0, parlay_odds::<TestLeg>(&[]));
}

#[test]
fn safety_levels() {
    assert_eq!(70.0, SafetyLevel::Conservative.min_trust());
    assert_eq!(60.0, SafetyLevel::Moderate.min_trust());
    assert_eq!(50.0, SafetyLevel::Aggressive.min_trust());
    assert_eq!(SafetyLevel::Aggressive, "Aggressive".parse().unwrap());
    assert_eq!(
        "unknown safety level 'reckless'",
        "reckless".parse::<SafetyLevel>().err().unwrap().to_string()
    );
    assert_eq!("moderate", SafetyLevel::Moderate.to_string());
}

#[test]
fn game_filter_modes() {
    assert_eq!(GameFilterMode::Single, "single".parse().unwrap());
    assert_eq!(GameFilterMode::Specific, "SPECIFIC".parse().unwrap());
    assert!(matches!(
        "nearby".parse::<GameFilterMode>(),
        Err(InvalidRequest::UnknownGameFilter(_))
    ));
    assert_eq!(
        GameFilter::Specific(vec!["LAL_vs_GSW".into()]),
        GameFilter::new(GameFilterMode::Specific, vec!["LAL_vs_GSW".into()])
    );
    assert_eq!(GameFilter::Any, GameFilter::new(GameFilterMode::Any, vec!["LAL_vs_GSW".into()]));
}

#[test]
fn invalid_requests() {
    let legs = slate();
    let mut rand = StdRand::seed(1);

    let request = ParlayRequest {
        min_legs: 0,
        ..ParlayRequest::default()
    };
    assert!(matches!(
        build_parlays(&legs, &request, &mut rand),
        Err(InvalidRequest::ZeroLegs)
    ));

    let request = ParlayRequest {
        min_legs: 4,
        max_legs: 3,
        ..ParlayRequest::default()
    };
    assert_eq!(
        "min legs (4) cannot exceed max legs (3)",
        build_parlays(&legs, &request, &mut rand).err().unwrap().to_string()
    );

    let request = ParlayRequest {
        num_suggestions: 0,
        ..ParlayRequest::default()
    };
    assert!(matches!(
        build_parlays(&legs, &request, &mut rand),
        Err(InvalidRequest::ZeroSuggestions)
    ));

    let request = ParlayRequest {
        search: SearchConfig {
            max_combinations: 0,
            ..SearchConfig::default()
        },
        ..ParlayRequest::default()
    };
    assert!(matches!(
        build_parlays(&legs, &request, &mut rand),
        Err(InvalidRequest::SearchConfig(_))
    ));
}

#[test]
fn filter_by_trust_is_inclusive() {
    let legs = slate();
    let trusted = filter::by_trust(&legs, 70.0);
    assert_eq!(vec!["A", "D", "F", "G", "I"], names(&trusted));
}

#[test]
fn filter_any_keeps_first_per_game() {
    let legs = vec![
        leg("A", "LAL", "GSW", 70.0, -110),
        leg("B", "LAL", "GSW", 90.0, -110),
        leg("C", "GSW", "LAL", 80.0, -110),
        leg("D", "BOS", "MIA", 75.0, -110),
    ];
    let filtered = filter::by_game(legs.iter().collect(), &GameFilter::Any);
    assert_eq!(vec!["A", "C", "D"], names(&filtered));
}

#[test]
fn filter_single_picks_busiest_game() {
    let legs = vec![
        leg("A", "LAL", "GSW", 70.0, -110),
        leg("B", "BOS", "MIA", 70.0, -110),
        leg("C", "LAL", "GSW", 70.0, -110),
        leg("D", "BOS", "MIA", 70.0, -110),
        leg("E", "BOS", "MIA", 70.0, -110),
    ];
    let filtered = filter::by_game(legs.iter().collect(), &GameFilter::Single);
    assert_eq!(vec!["B", "D", "E"], names(&filtered));

    let filtered = filter::by_game(legs[..4].iter().collect(), &GameFilter::Single);
    assert_eq!(vec!["A", "C"], names(&filtered));

    assert!(filter::by_game(Vec::<&TestLeg>::new(), &GameFilter::Single).is_empty());
}

#[test]
fn filter_specific_games() {
    let legs = slate();
    let filter = GameFilter::Specific(vec!["LAL_vs_GSW".into(), "BOS_vs_MIA".into()]);
    let filtered = filter::by_game(legs.iter().collect(), &filter);
    assert_eq!(vec!["A", "F"], names(&filtered));

    let filtered = filter::by_game(legs.iter().collect(), &GameFilter::Specific(vec![]));
    assert_eq!(legs.len(), filtered.len());
}

#[test]
fn leg_estimate_from_prices() {
    let range = 2..=6;
    let juiced = [leg("A", "X", "Y", 70.0, -200), leg("B", "Z", "W", 70.0, -200)];
    assert_eq!(4, estimate_legs(&juiced, 400, &range, 10));

    let standard = [leg("A", "X", "Y", 70.0, -110)];
    assert_eq!(6, estimate_legs(&standard, 400, &range, 10));
    assert_eq!(2, estimate_legs(&standard, -150, &range, 10));
    assert_eq!(2, estimate_legs::<TestLeg>(&[], 400, &range, 10));
}

#[test]
fn no_trusted_props() {
    let legs = [leg("A", "X", "Y", 40.0, -110)];
    let proposal = build_parlays(&legs, &ParlayRequest::default(), &mut StdRand::seed(0)).unwrap();
    assert!(matches!(proposal, Proposal::NoTrustedProps { min_trust } if min_trust == 60.0));
    assert_eq!(
        Some("No props found with trust score >= 60.0%".into()),
        proposal.error()
    );
    assert_eq!(
        Some("Try lowering safety level or adjusting filters".into()),
        proposal.suggestion()
    );
    assert!(proposal.suggestions().is_none());
}

#[test]
fn no_game_matches() {
    let legs = slate();
    let request = ParlayRequest {
        game_filter: GameFilter::Specific(vec!["SEA_vs_OKC".into()]),
        ..ParlayRequest::default()
    };
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(0)).unwrap();
    assert!(matches!(proposal, Proposal::NoGameMatches));
    assert_eq!(Some("Try different game selection".into()), proposal.suggestion());
}

#[test]
fn single_prop_cannot_combine() {
    let legs = [leg("A", "X", "Y", 64.0, -110)];
    let proposal = build_parlays(&legs, &ParlayRequest::default(), &mut StdRand::seed(0)).unwrap();
    match &proposal {
        Proposal::NoCombination {
            target_odds,
            available_props,
            avg_trust,
            ..
        } => {
            assert_eq!(400, *target_odds);
            assert_eq!(1, *available_props);
            assert_eq!(64.0, *avg_trust);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        Some("Could not find parlay matching +400 odds".into()),
        proposal.error()
    );
    assert_eq!(
        Some("With moderate safety (60.0%+ trust), try lowering target odds or increasing max legs".into()),
        proposal.suggestion()
    );
}

#[test]
fn closest_fallback_when_nothing_within_tolerance() {
    let legs = [
        leg("A", "LAL", "GSW", 65.0, -110),
        leg("B", "BOS", "MIA", 66.0, -110),
        leg("C", "DEN", "LAC", 67.0, -110),
    ];
    let request = ParlayRequest {
        num_suggestions: 5,
        ..ParlayRequest::default()
    };
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(42)).unwrap();
    let suggestions = proposal.suggestions().unwrap();
    assert_eq!(4, suggestions.len());
    for suggestion in suggestions {
        assert!(!suggestion.within_tolerance);
        match suggestion.num_legs {
            2 => assert_eq!(264, suggestion.parlay_odds),
            3 => assert_eq!(595, suggestion.parlay_odds),
            other => panic!("unexpected leg count {other}"),
        }
    }

    let request = ParlayRequest::default();
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(42)).unwrap();
    assert_eq!(1, proposal.suggestions().unwrap().len());
}

#[test]
fn suggestions_within_tolerance() {
    let legs = [
        leg("A", "LAL", "GSW", 80.0, 100),
        leg("B", "BOS", "MIA", 75.0, 100),
        leg("C", "DEN", "LAC", 70.0, 100),
        leg("D", "NYK", "PHI", 65.0, 100),
    ];
    let request = ParlayRequest {
        num_suggestions: 2,
        ..ParlayRequest::default()
    };
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(7)).unwrap();
    let suggestions = proposal.suggestions().unwrap();
    assert_eq!(2, suggestions.len());
    for suggestion in suggestions {
        assert!(suggestion.within_tolerance);
        assert_eq!(2, suggestion.num_legs);
        assert_eq!(300, suggestion.parlay_odds);
        assert_eq!("+300", suggestion.parlay_odds_display);
        assert_eq!(4.0, suggestion.payout_per_dollar);
        assert_eq!(SafetyLevel::Moderate, suggestion.safety_level);
        assert!(suggestion.true_win_rate <= suggestion.avg_trust);
    }
    assert_ne!(names(&suggestions[0].legs), names(&suggestions[1].legs));
}

#[test]
fn conservative_legs_meet_floor() {
    let legs = slate();
    let request = ParlayRequest {
        safety_level: SafetyLevel::Conservative,
        target_odds: 250,
        num_suggestions: 3,
        ..ParlayRequest::default()
    };
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(11)).unwrap();
    for suggestion in proposal.suggestions().unwrap() {
        assert!(suggestion.legs.iter().all(|leg| leg.trust >= 70.0));
    }
}

#[test]
fn suggestions_are_well_formed() {
    let legs = slate();
    for seed in 0..20 {
        let request = ParlayRequest {
            safety_level: SafetyLevel::Aggressive,
            num_suggestions: 3,
            ..ParlayRequest::default()
        };
        let proposal = build_parlays(&legs, &request, &mut StdRand::seed(seed)).unwrap();
        let suggestions = proposal.suggestions().unwrap();
        assert!(!suggestions.is_empty() && suggestions.len() <= 3);
        for suggestion in suggestions {
            assert!((2..=6).contains(&suggestion.num_legs));
            assert_eq!(suggestion.num_legs, suggestion.legs.len());
            assert_eq!(parlay_odds(&suggestion.legs), suggestion.parlay_odds);
            let games: FxHashSet<_> = suggestion.legs.iter().map(|leg| leg.game_id()).collect();
            assert_eq!(suggestion.num_legs, games.len(), "seed {seed}");
            assert!(suggestion.legs.iter().all(|leg| legs.contains(*leg)));
            if suggestion.within_tolerance {
                assert!((suggestion.parlay_odds - 400).abs() <= 100);
            }
        }
    }
}

#[test]
fn selection_repeatable_under_seed() {
    let legs = slate();
    let request = ParlayRequest {
        safety_level: SafetyLevel::Aggressive,
        num_suggestions: 2,
        ..ParlayRequest::default()
    };
    let first = build_parlays(&legs, &request, &mut StdRand::seed(99)).unwrap();
    let second = build_parlays(&legs, &request, &mut StdRand::seed(99)).unwrap();
    let legs_of = |proposal: &Proposal<TestLeg>| {
        proposal
            .suggestions()
            .unwrap()
            .iter()
            .map(|suggestion| names(&suggestion.legs))
            .collect::<Vec<_>>()
    };
    assert_eq!(legs_of(&first), legs_of(&second));
}

/// Ten even-money props from distinct games with trust 60, 63, .., 87. Every pair prices at
/// exactly +300; larger combinations price at +700 or more.
fn evens_slate() -> Vec<TestLeg> {
    const GAMES: [(&str, &str); 10] = [
        ("LAL", "GSW"),
        ("MIL", "BKN"),
        ("DAL", "PHX"),
        ("DEN", "LAC"),
        ("BOS", "MIA"),
        ("NYK", "PHI"),
        ("SAC", "POR"),
        ("MEM", "NOP"),
        ("CHI", "DET"),
        ("ATL", "ORL"),
    ];
    const NAMES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
    GAMES
        .iter()
        .zip(NAMES)
        .enumerate()
        .map(|(index, (&(team, opponent), name))| leg(name, team, opponent, 60.0 + 3.0 * index as f64, 100))
        .collect()
}

#[test]
fn average_trust_rounds_ties_to_even() {
    let legs = [leg("A", "X", "Y", 70.0, -110), leg("B", "Z", "W", 70.5, -110)];
    assert_eq!(70.2, parlay_trust(&legs, TrustMethod::Average));
}

#[test]
fn oversized_suggestion_count_returns_every_candidate() {
    let legs = evens_slate();
    let request = ParlayRequest {
        target_odds: 300,
        num_suggestions: usize::MAX / 2,
        ..ParlayRequest::default()
    };
    let proposal = build_parlays(&legs, &request, &mut StdRand::seed(3)).unwrap();
    let suggestions = proposal.suggestions().unwrap();
    assert_eq!(45, suggestions.len());
    assert!(suggestions
        .iter()
        .all(|suggestion| suggestion.within_tolerance && suggestion.num_legs == 2));
}

#[test]
fn selection_drawn_from_most_trusted_pool() {
    let legs = evens_slate();
    let mut pair_trusts = vec![];
    for (i, first) in legs.iter().enumerate() {
        for second in &legs[i + 1..] {
            pair_trusts.push(parlay_trust(&[first, second], TrustMethod::Average));
        }
    }
    pair_trusts.sort_by(|a, b| b.total_cmp(a));
    let pool_size = usize::max(2 * 3, usize::min(20, pair_trusts.len()));
    let cutoff = pair_trusts[pool_size - 1];
    assert_eq!(75.0, cutoff);
    assert!(pair_trusts[pool_size] < cutoff);

    let request = ParlayRequest {
        target_odds: 300,
        num_suggestions: 2,
        ..ParlayRequest::default()
    };
    for seed in 0..30 {
        let proposal = build_parlays(&legs, &request, &mut StdRand::seed(seed)).unwrap();
        let suggestions = proposal.suggestions().unwrap();
        assert_eq!(2, suggestions.len());
        assert_ne!(names(&suggestions[0].legs), names(&suggestions[1].legs));
        for suggestion in suggestions {
            assert!(
                suggestion.avg_trust >= cutoff,
                "seed {seed}: {} below pool cutoff {cutoff}",
                suggestion.avg_trust
            );
        }
    }
}

#[test]
fn accept_cap_skips_remaining_leg_counts() {
    let legs = evens_slate();
    let config = SearchConfig::default();
    // +500 takes the wide tolerance, admitting both pairs (+300) and triples (+700). The estimate
    // clamps to three legs, so triples are tried first.
    let eligible: Vec<_> = legs[..8].iter().collect();
    let candidates = search::find_combinations(&eligible, 500, 2..=3, &config, &mut StdRand::seed(0));
    assert_eq!(56, candidates.len());
    assert!(candidates.iter().all(|candidate| candidate.legs.len() == 3));

    let eligible: Vec<_> = legs[..5].iter().collect();
    let candidates = search::find_combinations(&eligible, 500, 2..=3, &config, &mut StdRand::seed(0));
    assert_eq!(20, candidates.len());
    assert_eq!(10, candidates.iter().filter(|candidate| candidate.legs.len() == 2).count());
    assert_eq!(10, candidates.iter().filter(|candidate| candidate.legs.len() == 3).count());
    assert!(candidates.iter().all(|candidate| candidate.within_tolerance));
}
