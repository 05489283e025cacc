use serde::{Deserialize, Deserializer, Serialize};

use crate::models::filter::SortField;

/// Creator/token profile as served by GET /profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Chain address, unique within one snapshot
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub token_ticker: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "flexible_count")]
    pub holders_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    pub posts_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    pub followers_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub farcaster: Option<String>,
    #[serde(default)]
    pub zora_link: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub creator_handle: Option<String>,
    /// ISO-8601 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Profile {
    /// Numeric value used for sorting, missing metrics count as 0
    pub fn metric(&self, field: SortField) -> f64 {
        match field {
            SortField::MarketCap => self.market_cap.unwrap_or(0.0),
            SortField::PostsCount => self.posts_count.unwrap_or(0) as f64,
            SortField::FollowersCount => self.followers_count.unwrap_or(0) as f64,
            SortField::HoldersCount => self.holders_count.unwrap_or(0) as f64,
        }
    }
}

/// `null` reads as the type's default. A missing address becomes `""`, which
/// only weakens the sort tie-break; views fall back to a positional row id.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts may arrive float-encoded (`1200.0`, `1.5e3`); floored, negatives clamp to 0
fn flexible_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Integer(u64),
        Float(f64),
    }

    Ok(match Option::<Count>::deserialize(deserializer)? {
        Some(Count::Integer(n)) => Some(n),
        Some(Count::Float(f)) if f.is_finite() => Some(f.floor().max(0.0) as u64),
        Some(Count::Float(_)) | None => None,
    })
}

/// Body of GET /profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub count: usize,
    pub profiles: Vec<Profile>,
}

impl ProfilesResponse {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            count: profiles.len(),
            profiles,
        }
    }
}

/// Query parameters for GET /profiles
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesQuery {
    pub limit: Option<u32>, // Default: 25, Max: 100
}

impl ProfilesQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err(format!("limit must be between 1 and 100, got: {}", limit));
            }
        }
        Ok(())
    }

    pub fn get_limit(&self) -> u32 {
        self.limit.unwrap_or(25)
    }
}

/// Single holder of a creator coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub address: Option<String>,
    pub balance: Option<String>,
    pub percent: Option<f64>, // Not provided by the SDK
    pub handle: Option<String>,
}

/// Body of GET /holders/{token_address}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldersResponse {
    pub count: usize,
    pub holders: Vec<Holder>,
}

/// Query parameters for GET /holders/{token_address}
#[derive(Debug, Clone, Deserialize)]
pub struct HoldersQuery {
    pub limit: Option<u32>, // Default: 10, Max: 100
}

impl HoldersQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err(format!("limit must be between 1 and 100, got: {}", limit));
            }
        }
        Ok(())
    }

    pub fn get_limit(&self) -> u32 {
        self.limit.unwrap_or(10)
    }
}
