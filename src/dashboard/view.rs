use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::profile::Profile;
use crate::services::{
    charts::{ChartPoint, placeholder_series},
    format::{PLACEHOLDER, age_label},
};

const AVATAR_SEED_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// One profile as shown by the dashboard views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub handle: String,
    pub avatar: String,
    pub coin: String,
    pub market_cap: Option<f64>,
    pub followers: u64,
    pub holders: u64,
    pub posts: u64,
    pub volume_24h: Option<f64>,
    pub age: String,
    pub twitter: Option<String>,
    pub farcaster: Option<String>,
    pub zora: String,
    pub buy: String,
    pub chart: Vec<ChartPoint>,
}

impl ProfileRow {
    /// `index` is the position in the visible list, used when the address is missing
    pub fn from_profile(profile: &Profile, index: usize, now: DateTime<Utc>) -> Self {
        let id = if profile.address.is_empty() {
            format!("creator-{}", index)
        } else {
            profile.address.clone()
        };

        let name = non_empty(profile.name.as_deref()).unwrap_or("Unnamed Creator");
        let avatar = non_empty(profile.image.as_deref())
            .or_else(|| non_empty(profile.avatar.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", AVATAR_SEED_URL, name));
        let zora = non_empty(profile.zora_link.as_deref()).unwrap_or("#").to_string();

        Self {
            id,
            name: name.to_string(),
            description: non_empty(profile.description.as_deref())
                .unwrap_or("No description")
                .to_string(),
            handle: non_empty(profile.creator_handle.as_deref())
                .unwrap_or("unknown")
                .to_string(),
            avatar,
            coin: non_empty(profile.token_ticker.as_deref())
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            market_cap: profile.market_cap,
            followers: profile.followers_count.unwrap_or(0),
            holders: profile.holders_count.unwrap_or(0),
            posts: profile.posts_count.unwrap_or(0),
            volume_24h: profile.volume_24h,
            age: age_label(profile.created_at.as_deref(), now),
            twitter: profile.twitter.clone(),
            farcaster: profile.farcaster.clone(),
            buy: zora.clone(),
            zora,
            chart: placeholder_series(profile),
        }
    }

    /// Created within the last day
    pub fn is_new(&self) -> bool {
        self.age.ends_with('h')
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Headline numbers above the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_market_cap: f64,
    pub new_tokens: usize,
    pub showing: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_rows(rows: &[ProfileRow], total: usize) -> Self {
        Self {
            total_market_cap: rows.iter().filter_map(|r| r.market_cap).sum(),
            new_tokens: rows.iter().filter(|r| r.is_new()).count(),
            showing: rows.len(),
            total,
        }
    }
}
