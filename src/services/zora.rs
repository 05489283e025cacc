use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;

use crate::models::profile::{Holder, Profile};
use crate::services::demo_profiles::demo_profiles;

pub const BASE_CHAIN_ID: u64 = 8453;
const EXPLORE_LIST_TYPE: &str = "TOP_VOLUME_24H";

type ServiceResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone)]
pub struct ZoraService {
    client: Client,
    api_key: String,
    base_url: String,
    cache: Arc<Cache<u32, Vec<Profile>>>,
}

/// Where a profile list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilesOrigin {
    Upstream,
    Cache,
    Demo,
}

// Zora SDK API response structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExploreResponse {
    #[serde(default)]
    explore_list: Option<Connection<CoinNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default)]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinNode {
    address: Option<String>,
    name: Option<String>,
    description: Option<String>,
    symbol: Option<String>,
    #[serde(default, deserialize_with = "flexible_f64")]
    market_cap: Option<f64>,
    #[serde(default, deserialize_with = "flexible_f64")]
    unique_holders: Option<f64>,
    #[serde(default, deserialize_with = "flexible_f64")]
    total_supply: Option<f64>,
    #[serde(default, deserialize_with = "flexible_f64")]
    total_volume: Option<f64>,
    #[serde(default, deserialize_with = "flexible_f64")]
    volume_24h: Option<f64>,
    creator_address: Option<String>,
    chain_id: Option<u64>,
    created_at: Option<String>,
    creator_profile: Option<CreatorProfile>,
    media_content: Option<MediaContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatorProfile {
    handle: Option<String>,
    social_accounts: Option<SocialAccounts>,
}

#[derive(Debug, Deserialize)]
struct SocialAccounts {
    twitter: Option<SocialAccount>,
    farcaster: Option<SocialAccount>,
}

#[derive(Debug, Deserialize)]
struct SocialAccount {
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaContent {
    preview_image: Option<PreviewImage>,
}

#[derive(Debug, Deserialize)]
struct PreviewImage {
    medium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    data: Option<ProfileData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    address: Option<String>,
    name: Option<String>,
    bio: Option<String>,
    token: Option<ProfileToken>,
    posts_count: Option<u64>,
    followers_count: Option<u64>,
    following_count: Option<u64>,
    socials: Option<ProfileSocials>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileToken {
    symbol: Option<String>,
    #[serde(default, deserialize_with = "flexible_f64")]
    market_cap_usd: Option<f64>,
    holders_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProfileSocials {
    twitter: Option<String>,
    farcaster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinHoldersResponse {
    zora20_token: Option<HoldersToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoldersToken {
    token_balances: Option<Connection<BalanceNode>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceNode {
    owner_address: Option<String>,
    balance: Option<String>,
    owner_profile: Option<OwnerProfile>,
}

#[derive(Debug, Deserialize)]
struct OwnerProfile {
    handle: Option<String>,
}

/// Zora sends most amounts as decimal strings
fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::String(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

impl ZoraService {
    pub fn new(
        api_key: String,
        base_url: String,
        cache_ttl: Duration,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let cache = Cache::builder()
            .max_capacity(100) // One entry per distinct limit
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Arc::new(cache),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Top coins by 24h volume from the explore endpoint
    pub async fn fetch_explore_profiles(&self, limit: u32) -> ServiceResult<Vec<Profile>> {
        let url = format!("{}/explore", self.base_url);
        tracing::info!("Fetching {} explore profiles from Zora", limit);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .query(&[("listType", EXPLORE_LIST_TYPE), ("count", limit.to_string().as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Zora API error {}: {}", status, error_text).into());
        }

        let data: ExploreResponse = response.json().await?;
        let profiles = explore_to_profiles(data, limit as usize);

        tracing::info!("Got {} tokens from Zora SDK API", profiles.len());
        Ok(profiles)
    }

    /// Cached explore profiles, falling back to the demo dataset on any failure
    pub async fn profiles_or_demo(&self, limit: u32) -> (Vec<Profile>, ProfilesOrigin) {
        if let Some(cached) = self.cache.get(&limit).await {
            tracing::debug!("Cache hit for explore profiles (limit {})", limit);
            return (cached, ProfilesOrigin::Cache);
        }

        match self.fetch_explore_profiles(limit).await {
            Ok(profiles) => {
                self.cache.insert(limit, profiles.clone()).await;
                (profiles, ProfilesOrigin::Upstream)
            }
            Err(e) => {
                tracing::warn!("Zora explore request failed, serving demo data: {}", e);
                (demo_profiles(limit as usize), ProfilesOrigin::Demo)
            }
        }
    }

    /// Profile details. `Ok(None)` when Zora answers with a non-2xx status.
    pub async fn fetch_profile(&self, address: &str) -> ServiceResult<Option<Profile>> {
        let url = format!("{}/profiles/{}", self.base_url, address);
        tracing::info!("Fetching Zora profile {}", address);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Zora profile {} not found ({})", address, response.status());
            return Ok(None);
        }

        let envelope: ProfileEnvelope = response.json().await?;
        Ok(Some(profile_from_data(envelope.data.unwrap_or_default())))
    }

    /// Largest holders of a creator coin on Base
    pub async fn fetch_holders(&self, token_address: &str, limit: u32) -> ServiceResult<Vec<Holder>> {
        let url = format!("{}/coinHolders", self.base_url);
        tracing::info!("Fetching {} holders for {}", limit, token_address);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .query(&[
                ("chainId", BASE_CHAIN_ID.to_string()),
                ("address", token_address.to_string()),
                ("count", limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Zora API error {}: {}", status, error_text).into());
        }

        let data: CoinHoldersResponse = response.json().await?;
        Ok(holders_from_response(data))
    }
}

fn explore_to_profiles(data: ExploreResponse, limit: usize) -> Vec<Profile> {
    data.explore_list
        .map(|list| list.edges)
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(|edge| profile_from_coin(edge.node.unwrap_or_default()))
        .collect()
}

fn profile_from_coin(coin: CoinNode) -> Profile {
    let (handle, socials) = match coin.creator_profile {
        Some(creator) => (creator.handle, creator.social_accounts),
        None => (None, None),
    };
    let username = |account: Option<SocialAccount>| account.map(|a| a.username.unwrap_or_default());

    let (twitter, farcaster) = match socials {
        Some(s) => (
            username(s.twitter).map(|u| format!("https://twitter.com/{}", u)),
            username(s.farcaster).map(|u| format!("https://warpcast.com/{}", u)),
        ),
        None => (None, None),
    };

    let address = coin.address.unwrap_or_default();
    let holders = coin.unique_holders.map(|h| h.max(0.0) as u64);

    Profile {
        zora_link: Some(format!("https://zora.co/collect/{}", address)),
        address,
        name: coin.name,
        description: coin.description,
        token_ticker: coin.symbol,
        market_cap: coin.market_cap.filter(|v| *v != 0.0),
        holders_count: Some(holders.unwrap_or(0)),
        posts_count: Some(coin.total_supply.map(|s| s.max(0.0) as u64).unwrap_or(0)),
        // Zora has no follower graph on coins; unique holders stand in
        followers_count: Some(holders.unwrap_or(0)),
        following_count: Some(0),
        volume_24h: coin.volume_24h.filter(|v| *v != 0.0),
        total_volume: coin.total_volume.filter(|v| *v != 0.0),
        twitter,
        farcaster,
        image: coin
            .media_content
            .and_then(|m| m.preview_image)
            .and_then(|p| p.medium),
        owner_address: coin.creator_address,
        network: Some(format!("Chain {}", coin.chain_id.unwrap_or(BASE_CHAIN_ID))),
        creator_handle: handle,
        created_at: coin.created_at,
        ..Default::default()
    }
}

fn profile_from_data(data: ProfileData) -> Profile {
    let address = data.address.unwrap_or_default();
    let (ticker, market_cap, holders) = match data.token {
        Some(token) => (token.symbol, token.market_cap_usd, token.holders_count),
        None => (None, None, None),
    };
    let (twitter, farcaster) = match data.socials {
        Some(s) => (s.twitter, s.farcaster),
        None => (None, None),
    };

    Profile {
        zora_link: Some(format!("https://zora.co/{}", address)),
        address,
        name: data.name,
        description: data.bio,
        token_ticker: ticker,
        market_cap,
        holders_count: holders,
        posts_count: data.posts_count,
        followers_count: data.followers_count,
        following_count: data.following_count,
        twitter,
        farcaster,
        ..Default::default()
    }
}

fn holders_from_response(data: CoinHoldersResponse) -> Vec<Holder> {
    data.zora20_token
        .and_then(|t| t.token_balances)
        .map(|balances| balances.edges)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|edge| edge.node)
        .map(|node| Holder {
            address: node.owner_address,
            balance: node.balance,
            percent: None,
            handle: node.owner_profile.and_then(|p| p.handle),
        })
        .collect()
}
