//! Text renderers
//!
//! Each view is a pure function of a [`DashboardState`] snapshot and the
//! current time. They share the evaluator output and never filter on their own.

use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::str::FromStr;

use crate::dashboard::state::DashboardState;
use crate::dashboard::view::{ProfileRow, Summary};
use crate::services::{
    charts::{ChartPoint, overview_series, top_market_cap_bars},
    format::{
        format_currency, format_grouped, format_number, format_optional_currency,
        format_optional_metric, short_address,
    },
};

const BAR_WIDTH: usize = 40;
const TOP_CHART_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
    Chart,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "cards" | "card" => Ok(ViewMode::Cards),
            "chart" | "charts" => Ok(ViewMode::Chart),
            other => Err(format!("Unknown view '{}'. Expected table, cards or chart", other)),
        }
    }
}

/// Full screen for the given view
pub fn render(state: &DashboardState, mode: ViewMode, now: DateTime<Utc>) -> String {
    let rows = state.visible_rows(now);
    let summary = state.summary(&rows);

    let mut out = String::new();
    out.push_str(&render_status(state));
    out.push_str(&render_summary(&summary, state.fetch_count()));
    out.push('\n');

    if state.is_loading() && state.fetch_count() == 0 && state.error().is_none() {
        out.push_str("Loading ZoraVerse creators...\n");
        return out;
    }

    let body = match mode {
        ViewMode::Table => render_table(&rows),
        ViewMode::Cards => render_cards(&rows),
        ViewMode::Chart => render_chart(state),
    };
    out.push_str(&body);
    let _ = writeln!(out, "\nShowing {} of {} creators", summary.showing, summary.total);
    out
}

/// Status banner: live indicator, last update, error with retry hint
pub fn render_status(state: &DashboardState) -> String {
    let mut out = String::new();
    let filter = state.filter();

    let updated = state
        .last_updated()
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    let activity = if state.is_loading() { "refreshing…" } else { "live" };

    let _ = writeln!(
        out,
        "ZoraVerse — Creator Tracker [{}] last update: {} | sort: {} {}",
        activity,
        updated,
        filter.sort_by.label(),
        filter.sort_order.arrow()
    );

    if let Some(error) = state.error() {
        let _ = writeln!(out, "! Failed to load profiles: {} (type `refresh` to retry)", error);
    }
    out
}

pub fn render_summary(summary: &Summary, seed: u64) -> String {
    let overview = overview_series(seed);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total Market Cap: ${}  |  New Tokens (24h): {}  |  Market Cap 7D: {}",
        format_grouped(summary.total_market_cap),
        summary.new_tokens,
        sparkline(&overview)
    );
    out
}

pub fn render_table(rows: &[ProfileRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4}{:<24}{:<10}{:>12}{:>12}{:>6}{:>11}{:>9}  {}",
        "#", "Creator", "Coin", "Market Cap", "24h Vol", "Age", "Followers", "Holders", "Chart"
    );

    if rows.is_empty() {
        out.push_str("No creators match the current filters.\n");
        return out;
    }

    for (i, row) in rows.iter().enumerate() {
        let creator = truncate(&format!("{} @{}", row.name, row.handle), 23);
        let _ = writeln!(
            out,
            "{:<4}{:<24}{:<10}{:>12}{:>12}{:>6}{:>11}{:>9}  {}",
            i + 1,
            creator,
            truncate(&row.coin, 9),
            format_optional_currency(row.market_cap),
            format_optional_currency(row.volume_24h),
            row.age,
            format_optional_metric(Some(row.followers as f64)),
            format_number(row.holders as f64),
            sparkline(&row.chart)
        );
    }
    out
}

pub fn render_cards(rows: &[ProfileRow]) -> String {
    if rows.is_empty() {
        return "No creators match the current filters.\n".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "┌ {} ({})", row.name, row.coin);
        let _ = writeln!(out, "│ {}", row.description);
        let _ = writeln!(
            out,
            "│ Market Cap: {}  Holders: {}  Posts: {}  Followers: {}",
            format_optional_currency(row.market_cap),
            format_number(row.holders as f64),
            format_number(row.posts as f64),
            format_number(row.followers as f64)
        );

        let mut links = Vec::new();
        if let Some(twitter) = &row.twitter {
            links.push(format!("Twitter {}", twitter));
        }
        if let Some(farcaster) = &row.farcaster {
            links.push(format!("Farcaster {}", farcaster));
        }
        links.push(format!("Zora {}", row.zora));
        let _ = writeln!(out, "│ {}", links.join(" · "));
        let _ = writeln!(out, "└ {} · age {}", short_address(&row.id), row.age);
    }
    out
}

/// Horizontal bars for the ten largest visible profiles
pub fn render_chart(state: &DashboardState) -> String {
    let bars = top_market_cap_bars(&state.visible_profiles(), TOP_CHART_SIZE);
    if bars.is_empty() {
        return "No market cap data to chart.\n".to_string();
    }

    let max = bars.iter().map(|b| b.market_cap).fold(0.0_f64, f64::max);
    let mut out = String::from("Top 10 by Market Cap\n");
    for bar in &bars {
        let width = if max > 0.0 {
            ((bar.market_cap / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let volume = bar
            .volume_24h
            .map(|v| format!("  24h: {}", format_currency(v)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<10}{:<w$} {}{}",
            truncate(&bar.label, 9),
            "█".repeat(width),
            format_currency(bar.market_cap),
            volume,
            w = BAR_WIDTH
        );
    }
    out
}

/// Unicode sparkline scaled to the series' own range
pub fn sparkline(points: &[ChartPoint]) -> String {
    const TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    if points.is_empty() {
        return String::new();
    }

    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    points
        .iter()
        .map(|p| {
            if span <= 0.0 {
                TICKS[TICKS.len() / 2]
            } else {
                let idx = ((p.value - min) / span * (TICKS.len() - 1) as f64).round() as usize;
                TICKS[idx.min(TICKS.len() - 1)]
            }
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        head.push('…');
        head
    }
}
