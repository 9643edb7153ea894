//! Console tables for scored props and parlay suggestions.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::display::{DisplayOption, DisplaySamples};
use crate::odds::display_american;
use crate::parlay::ParlaySuggestion;
use crate::scorer::streak::Streak;
use crate::scorer::{ScoredProp, WEIGHTS};

fn left(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Left))
}

fn right(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Right))
}

fn header(cells: &[&str]) -> Row {
    Row::new(
        Styles::default().with(Header(true)),
        cells.iter().map(|&cell| cell.into()).collect(),
    )
}

fn format_streak(streak: &Streak) -> String {
    match streak.side {
        None => "-".into(),
        Some(side) => format!("{} {side}", streak.length),
    }
}

pub fn tabulate_scored(scored: &[ScoredProp]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            left(20),
            left(8),
            right(6),
            right(6),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(6))
                    .with(HAlign::Right),
            ),
            left(7),
            right(6),
            right(6),
            right(6),
            left(8),
            left(15),
            left(30),
        ])
        .with_row(header(&[
            "Player",
            "Stat",
            "Line",
            "Odds",
            "Trust",
            "Form",
            "Hit %",
            "L10 %",
            "L5 avg",
            "Streak",
            "Consistency",
            "Last games",
        ]));

    for prop in scored {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                prop.player_name.clone().into(),
                prop.stat_type.to_string().into(),
                format!("{:.1}", prop.line).into(),
                display_american(prop.american_odds).into(),
                format!("{:.1}", prop.trust_score).into(),
                prop.form.to_string().into(),
                format!("{:.1}", prop.hit_rate).into(),
                format!("{:.1}", prop.recent.rate).into(),
                DisplayOption(&prop.avg_last_5).to_string().into(),
                format_streak(&prop.streak).into(),
                prop.consistency.grade.to_string().into(),
                DisplaySamples::from(&*prop.last_games).to_string().into(),
            ],
        ));
    }
    table
}

/// The individual factor scores of each prop, one column per factor.
pub fn tabulate_factors(scored: &[ScoredProp]) -> Table {
    let mut cols = vec![left(20), left(8)];
    let mut header_cells = vec!["Player".into(), "Stat".into()];
    for (factor, _) in WEIGHTS {
        cols.push(right(11));
        header_cells.push(factor.to_string().into());
    }
    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header_cells));

    for prop in scored {
        let mut row_cells = vec![
            prop.player_name.clone().into(),
            prop.stat_type.to_string().into(),
        ];
        for (factor, _) in WEIGHTS {
            row_cells.push(format!("{:.1}", prop.factors[factor]).into());
        }
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

pub fn tabulate_suggestions(suggestions: &[ParlaySuggestion<ScoredProp>]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            right(3),
            right(5),
            right(8),
            right(10),
            right(10),
            right(8),
            left(8),
        ])
        .with_row(header(&[
            "#",
            "Legs",
            "Odds",
            "Avg trust",
            "True win",
            "Payout",
            "Target",
        ]));

    for (index, suggestion) in suggestions.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{}", suggestion.num_legs).into(),
                suggestion.parlay_odds_display.clone().into(),
                format!("{:.1}", suggestion.avg_trust).into(),
                format!("{:.1}", suggestion.true_win_rate).into(),
                format!("{:.2}", suggestion.payout_per_dollar).into(),
                if suggestion.within_tolerance {
                    "hit"
                } else {
                    "closest"
                }
                .into(),
            ],
        ));
    }
    table
}

pub fn tabulate_legs(suggestion: &ParlaySuggestion<ScoredProp>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            left(20),
            left(14),
            left(8),
            right(6),
            right(6),
            right(6),
            right(8),
        ])
        .with_row(header(&[
            "Player", "Game", "Stat", "Line", "Odds", "Trust", "Opp rank",
        ]));

    for leg in &suggestion.legs {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                leg.player_name.clone().into(),
                format!("{} v {}", leg.team, leg.opponent).into(),
                leg.stat_type.to_string().into(),
                format!("{:.1}", leg.line).into(),
                display_american(leg.american_odds).into(),
                format!("{:.1}", leg.trust_score).into(),
                format!("{}", leg.opponent_rank).into(),
            ],
        ));
    }
    table
}
