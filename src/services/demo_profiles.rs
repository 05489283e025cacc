//! Demo dataset served by GET /profiles when the Zora API is unavailable

use crate::models::profile::Profile;

struct DemoCreator {
    address: &'static str,
    name: &'static str,
    description: &'static str,
    ticker: &'static str,
    market_cap: f64,
    holders: u64,
    posts: u64,
    followers: u64,
    following: u64,
    handle: &'static str,
}

const DEMO_CREATORS: [DemoCreator; 8] = [
    DemoCreator {
        address: "0x1234567890abcdef1234567890abcdef12345678",
        name: "Crypto Artist",
        description: "Digital artist creating unique NFT collections",
        ticker: "ART",
        market_cap: 1_500_000.0,
        holders: 250,
        posts: 45,
        followers: 1200,
        following: 300,
        handle: "cryptoartist",
    },
    DemoCreator {
        address: "0x2345678901bcdef1234567890abcdef123456789",
        name: "DeFi Builder",
        description: "Building the future of decentralized finance",
        ticker: "DEFI",
        market_cap: 850_000.0,
        holders: 180,
        posts: 32,
        followers: 950,
        following: 200,
        handle: "defibuilder",
    },
    DemoCreator {
        address: "0x3456789012cdef1234567890abcdef1234567890",
        name: "NFT Collector",
        description: "Curating the best NFT collections",
        ticker: "COLLECT",
        market_cap: 3_200_000.0,
        holders: 420,
        posts: 78,
        followers: 2100,
        following: 500,
        handle: "nftcollector",
    },
    DemoCreator {
        address: "0x4567890123def1234567890abcdef1234567890a",
        name: "Web3 Developer",
        description: "Creating innovative blockchain solutions",
        ticker: "WEB3",
        market_cap: 750_000.0,
        holders: 150,
        posts: 28,
        followers: 800,
        following: 180,
        handle: "web3dev",
    },
    DemoCreator {
        address: "0x5678901234ef1234567890abcdef1234567890ab",
        name: "Metaverse Creator",
        description: "Building immersive virtual worlds",
        ticker: "META",
        market_cap: 2_100_000.0,
        holders: 320,
        posts: 55,
        followers: 1500,
        following: 400,
        handle: "metaversecreator",
    },
    DemoCreator {
        address: "0x6789012345f1234567890abcdef1234567890abc",
        name: "DAO Leader",
        description: "Leading decentralized autonomous organizations",
        ticker: "DAO",
        market_cap: 1_200_000.0,
        holders: 200,
        posts: 38,
        followers: 1100,
        following: 250,
        handle: "daoleader",
    },
    DemoCreator {
        address: "0x78901234561234567890abcdef1234567890abcd",
        name: "Crypto Trader",
        description: "Professional cryptocurrency trading",
        ticker: "TRADE",
        market_cap: 450_000.0,
        holders: 90,
        posts: 22,
        followers: 600,
        following: 120,
        handle: "cryptotrader",
    },
    DemoCreator {
        address: "0x8901234567234567890abcdef1234567890abcde",
        name: "Blockchain Researcher",
        description: "Researching next-generation blockchain technology",
        ticker: "RESEARCH",
        market_cap: 1_800_000.0,
        holders: 280,
        posts: 65,
        followers: 1300,
        following: 350,
        handle: "blockchainresearch",
    },
];

/// Up to `limit` demo profiles
pub fn demo_profiles(limit: usize) -> Vec<Profile> {
    DEMO_CREATORS
        .iter()
        .take(limit)
        .map(|c| Profile {
            address: c.address.to_string(),
            name: Some(c.name.to_string()),
            description: Some(c.description.to_string()),
            token_ticker: Some(c.ticker.to_string()),
            market_cap: Some(c.market_cap),
            holders_count: Some(c.holders),
            posts_count: Some(c.posts),
            followers_count: Some(c.followers),
            following_count: Some(c.following),
            twitter: Some(format!("https://twitter.com/{}", c.handle)),
            farcaster: Some(format!("https://warpcast.com/{}", c.handle)),
            zora_link: Some(format!("https://zora.co/{}", c.address)),
            creator_handle: Some(c.handle.to_string()),
            ..Default::default()
        })
        .collect()
}
