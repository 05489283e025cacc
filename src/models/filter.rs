use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric a profile list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    MarketCap,
    PostsCount,
    FollowersCount,
    HoldersCount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::MarketCap => "marketCap",
            SortField::PostsCount => "postsCount",
            SortField::FollowersCount => "followersCount",
            SortField::HoldersCount => "holdersCount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::MarketCap => "Market Cap",
            SortField::PostsCount => "Posts",
            SortField::FollowersCount => "Followers",
            SortField::HoldersCount => "Holders",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept wire names plus the short forms used in dashboard commands
        match s.trim().to_lowercase().as_str() {
            "marketcap" | "mc" | "cap" => Ok(SortField::MarketCap),
            "postscount" | "posts" => Ok(SortField::PostsCount),
            "followerscount" | "followers" => Ok(SortField::FollowersCount),
            "holderscount" | "holders" => Ok(SortField::HoldersCount),
            other => Err(format!(
                "Unknown sort field '{}'. Expected one of: marketCap, postsCount, followersCount, holdersCount",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order '{}'. Expected asc or desc", other)),
        }
    }
}

/// Declarative filter and sort applied to the fetched profile list
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub search: String,
    pub min_market_cap: f64,
    pub max_market_cap: f64,
    pub min_followers: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_market_cap: 0.0,
            max_market_cap: f64::INFINITY,
            min_followers: 0,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl FilterSpec {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_market_cap.is_nan() || self.max_market_cap.is_nan() {
            return Err("market cap bounds must be numbers".to_string());
        }
        if self.min_market_cap < 0.0 {
            return Err(format!(
                "min market cap cannot be negative, got: {}",
                self.min_market_cap
            ));
        }
        if self.min_market_cap > self.max_market_cap {
            return Err(format!(
                "min market cap ({}) is greater than max market cap ({})",
                self.min_market_cap, self.max_market_cap
            ));
        }
        Ok(())
    }

    /// Select a sort column. Re-selecting the active column flips the order,
    /// a new column starts descending.
    pub fn select_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = field;
            self.sort_order = SortOrder::Desc;
        }
    }
}
