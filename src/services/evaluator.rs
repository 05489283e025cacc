//! Filter/sort evaluator
//!
//! The one place where the visible subset of a profile snapshot is derived.
//! Table, card and chart views all consume its output.

use std::cmp::Ordering;

use crate::models::{
    filter::{FilterSpec, SortOrder},
    profile::Profile,
};

/// Apply `spec` to `profiles` and return a freshly ordered list.
///
/// Steps run in a fixed order: text search, follower floor, market cap range,
/// then a stable sort with ties broken by address.
pub fn evaluate(profiles: &[Profile], spec: &FilterSpec) -> Vec<Profile> {
    let needle = spec.search.trim().to_lowercase();

    let mut visible: Vec<Profile> = profiles
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| p.followers_count.unwrap_or(0) >= spec.min_followers)
        .filter(|p| within_market_cap(p, spec.min_market_cap, spec.max_market_cap))
        .cloned()
        .collect();

    sort_profiles(&mut visible, spec);
    visible
}

fn matches_search(profile: &Profile, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [
        profile.name.as_deref(),
        profile.token_ticker.as_deref(),
        profile.creator_handle.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Profiles without a market cap (absent or zero) are never excluded by the
/// range. Kept as observed upstream; see DESIGN.md.
fn within_market_cap(profile: &Profile, min: f64, max: f64) -> bool {
    match profile.market_cap {
        None => true,
        Some(cap) if cap == 0.0 => true,
        Some(cap) => cap >= min && cap <= max,
    }
}

fn sort_profiles(profiles: &mut [Profile], spec: &FilterSpec) {
    let field = spec.sort_by;
    profiles.sort_by(|a, b| {
        let by_metric = a
            .metric(field)
            .partial_cmp(&b.metric(field))
            .unwrap_or(Ordering::Equal);

        let by_metric = match spec.sort_order {
            SortOrder::Asc => by_metric,
            SortOrder::Desc => by_metric.reverse(),
        };

        by_metric.then_with(|| a.address.cmp(&b.address))
    });
}

/// Top `n` profiles by market cap, used by the chart view
pub fn top_by_market_cap(profiles: &[Profile], n: usize) -> Vec<Profile> {
    let mut ranked = evaluate(profiles, &FilterSpec::default());
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::SortField;

    fn profile(address: &str, name: &str, market_cap: Option<f64>, followers: u64) -> Profile {
        Profile {
            address: address.to_string(),
            name: Some(name.to_string()),
            market_cap,
            followers_count: Some(followers),
            ..Default::default()
        }
    }

    fn addresses(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.address.as_str()).collect()
    }

    fn sample() -> Vec<Profile> {
        let mut artist = profile("0xa", "Crypto Artist", Some(1_500_000.0), 1200);
        artist.token_ticker = Some("ART".to_string());
        artist.creator_handle = Some("pixelqueen".to_string());

        let mut builder = profile("0xb", "DeFi Builder", Some(850_000.0), 950);
        builder.token_ticker = Some("DEFI".to_string());

        let mut fresh = profile("0xc", "Fresh Mint", None, 10);
        fresh.token_ticker = Some("MINT".to_string());

        vec![artist, builder, fresh]
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let profiles = sample();
        let result = evaluate(&profiles, &FilterSpec::default());
        assert_eq!(result.len(), profiles.len());

        let spaces = FilterSpec {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(evaluate(&profiles, &spaces).len(), profiles.len());
    }

    #[test]
    fn test_search_matches_name_ticker_and_handle_case_insensitively() {
        let profiles = sample();
        let by = |q: &str| {
            let spec = FilterSpec {
                search: q.to_string(),
                ..Default::default()
            };
            addresses(&evaluate(&profiles, &spec))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        assert_eq!(by("builder"), vec!["0xb"]);
        assert_eq!(by("art"), vec!["0xa"]);
        assert_eq!(by("PIXEL"), vec!["0xa"]);
        assert_eq!(by("mint"), vec!["0xc"]);
        assert!(by("nothing-here").is_empty());
    }

    #[test]
    fn test_follower_floor() {
        let spec = FilterSpec {
            min_followers: 1000,
            ..Default::default()
        };
        assert_eq!(addresses(&evaluate(&sample(), &spec)), vec!["0xa"]);

        let mut no_followers = profile("0xd", "Ghost", Some(10.0), 0);
        no_followers.followers_count = None;
        let spec = FilterSpec {
            min_followers: 1,
            ..Default::default()
        };
        assert!(evaluate(&[no_followers], &spec).is_empty());
    }

    #[test]
    fn test_zero_market_cap_passes_any_range() {
        let profiles = vec![
            profile("0x1", "Zero", Some(0.0), 0),
            profile("0x2", "Absent", None, 0),
            profile("0x3", "Big", Some(5_000_000.0), 0),
            profile("0x4", "Small", Some(5.0), 0),
        ];
        let spec = FilterSpec {
            min_market_cap: 10.0,
            max_market_cap: 1_000.0,
            ..Default::default()
        };

        let result = evaluate(&profiles, &spec);
        assert_eq!(addresses(&result), vec!["0x1", "0x2"]);
    }

    #[test]
    fn test_market_cap_range_is_inclusive() {
        let profiles = vec![
            profile("0x1", "Low", Some(100.0), 0),
            profile("0x2", "High", Some(200.0), 0),
            profile("0x3", "Over", Some(200.5), 0),
        ];
        let spec = FilterSpec {
            min_market_cap: 100.0,
            max_market_cap: 200.0,
            ..Default::default()
        };
        assert_eq!(addresses(&evaluate(&profiles, &spec)), vec!["0x2", "0x1"]);
    }

    #[test]
    fn test_sort_market_cap_descending() {
        let profiles = vec![
            profile("0x1", "a", Some(5.0), 0),
            profile("0x2", "b", Some(20.0), 0),
            profile("0x3", "c", Some(1.0), 0),
        ];
        let result = evaluate(&profiles, &FilterSpec::default());
        let caps: Vec<f64> = result.iter().map(|p| p.market_cap.unwrap()).collect();
        assert_eq!(caps, vec![20.0, 5.0, 1.0]);
    }

    #[test]
    fn test_sort_ascending_with_missing_values_as_zero() {
        let mut posts = sample();
        posts[0].posts_count = Some(45);
        posts[1].posts_count = Some(32);
        posts[2].posts_count = None;

        let spec = FilterSpec {
            sort_by: SortField::PostsCount,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(addresses(&evaluate(&posts, &spec)), vec!["0xc", "0xb", "0xa"]);
    }

    #[test]
    fn test_ties_broken_by_address() {
        let profiles = vec![
            profile("0xff", "x", Some(10.0), 0),
            profile("0x01", "y", Some(10.0), 0),
            profile("0x80", "z", Some(10.0), 0),
        ];
        let desc = evaluate(&profiles, &FilterSpec::default());
        assert_eq!(addresses(&desc), vec!["0x01", "0x80", "0xff"]);

        let asc = evaluate(
            &profiles,
            &FilterSpec {
                sort_order: SortOrder::Asc,
                ..Default::default()
            },
        );
        assert_eq!(addresses(&asc), vec!["0x01", "0x80", "0xff"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let profiles = vec![
            profile("0x1", "a", Some(1.0), 0),
            profile("0x2", "b", Some(2.0), 0),
        ];
        let before = profiles.clone();
        let _ = evaluate(&profiles, &FilterSpec::default());
        assert_eq!(profiles, before);
    }

    #[test]
    fn test_top_by_market_cap() {
        let profiles: Vec<Profile> = (0..15)
            .map(|i| profile(&format!("0x{:02}", i), "p", Some(i as f64 * 100.0), 0))
            .collect();
        let top = top_by_market_cap(&profiles, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].market_cap, Some(1400.0));
        assert_eq!(top[9].market_cap, Some(500.0));
    }
}
