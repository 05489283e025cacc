//! Chart data for the dashboard
//!
//! The profiles endpoint carries no price history, so sparkline and overview
//! series are placeholders. They are seeded from stable inputs so a redraw of
//! the same snapshot draws the same lines.

use serde::Serialize;

use crate::models::profile::Profile;
use crate::services::evaluator::top_by_market_cap;

pub const SERIES_LEN: usize = 7;
const DEFAULT_SERIES_BASE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One bar in the top market cap chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub market_cap: f64,
    pub volume_24h: Option<f64>,
}

/// Deterministic generator for placeholder series (splitmix64)
struct SeriesRng(u64);

impl SeriesRng {
    fn seeded(seed: &str) -> Self {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in seed.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Self(hash)
    }

    /// Uniform value in [0, 1)
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Seven-point sparkline around the profile's market cap (0.8x .. 1.2x)
pub fn placeholder_series(profile: &Profile) -> Vec<ChartPoint> {
    let base = match profile.market_cap {
        Some(cap) if cap > 0.0 => cap,
        _ => DEFAULT_SERIES_BASE,
    };
    let mut rng = SeriesRng::seeded(&profile.address);

    (0..SERIES_LEN)
        .map(|i| ChartPoint {
            label: format!("{}d", i),
            value: base * (0.8 + rng.next_unit() * 0.4),
        })
        .collect()
}

/// Seven-day market overview in the 1M .. 6M range, reseeded per fetch
pub fn overview_series(seed: u64) -> Vec<ChartPoint> {
    let mut rng = SeriesRng::seeded(&format!("overview-{}", seed));

    (0..SERIES_LEN)
        .map(|i| ChartPoint {
            label: format!("{}d", i + 1),
            value: 1_000_000.0 + rng.next_unit() * 5_000_000.0,
        })
        .collect()
}

/// Label for a profile on a chart axis: ticker, else a short name
pub fn chart_label(profile: &Profile) -> String {
    if let Some(ticker) = profile.token_ticker.as_deref().filter(|t| !t.is_empty()) {
        return ticker.to_string();
    }
    match profile.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => name.chars().take(8).collect(),
        None => "Unknown".to_string(),
    }
}

/// Bars for the ten largest profiles by market cap
pub fn top_market_cap_bars(profiles: &[Profile], n: usize) -> Vec<ChartBar> {
    top_by_market_cap(profiles, n)
        .iter()
        .map(|p| ChartBar {
            label: chart_label(p),
            market_cap: p.market_cap.unwrap_or(0.0),
            volume_24h: p.volume_24h,
        })
        .collect()
}
